//! Width resolution for table columns.
//!
//! All widths here include the column's horizontal padding; borders and
//! dividers are the caller's business.

/// What a column asks for, in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnBounds {
    /// Exact width, for fixed columns.
    pub fixed: Option<usize>,
    /// Share of the leftover width, for ratio columns.
    pub ratio: Option<usize>,
    /// Narrowest width that keeps words whole.
    pub minimum: usize,
    /// Width with nothing wrapped.
    pub natural: usize,
}

impl ColumnBounds {
    fn is_auto(&self) -> bool {
        self.fixed.is_none() && self.ratio.is_none()
    }
}

/// Resolved widths for all columns in a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedWidths {
    /// Width of each column, padding included.
    pub widths: Vec<usize>,
}

impl ResolvedWidths {
    pub fn get(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Total width of all columns, without borders.
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Resolves column widths so they sum to exactly `available`.
///
/// 1. Fixed columns take their width, auto columns their natural width.
/// 2. Ratio columns split what is left, floor division, with the remainder
///    handed out one cell at a time from the left.
/// 3. If that is too wide, auto columns give up cells starting from the
///    widest, down to their minimum; then every column shrinks.
/// 4. If it is too narrow, the extra goes to auto columns in proportion to
///    their natural width.
pub fn resolve_widths(columns: &[ColumnBounds], available: usize) -> ResolvedWidths {
    if columns.is_empty() {
        return ResolvedWidths { widths: vec![] };
    }

    let mut widths: Vec<usize> = columns
        .iter()
        .map(|col| match (col.fixed, col.ratio) {
            (Some(width), _) => width,
            (None, Some(_)) => 0,
            (None, None) => col.natural,
        })
        .collect();

    let ratios: Vec<(usize, usize)> = columns
        .iter()
        .enumerate()
        .filter(|(_, col)| col.fixed.is_none())
        .filter_map(|(i, col)| col.ratio.map(|ratio| (i, ratio)))
        .collect();
    if !ratios.is_empty() {
        let used: usize = widths.iter().sum();
        let remaining = available.saturating_sub(used);
        let weights: Vec<usize> = ratios.iter().map(|(_, ratio)| *ratio).collect();
        for ((idx, _), share) in ratios.iter().zip(distribute(remaining, &weights)) {
            widths[*idx] = share;
        }
    }

    let total: usize = widths.iter().sum();
    if total > available {
        let floors: Vec<Option<usize>> = columns
            .iter()
            .map(|col| col.is_auto().then_some(col.minimum))
            .collect();
        let excess = shrink_widest(&mut widths, &floors, total - available);

        if excess > 0 {
            let floors = vec![Some(0); columns.len()];
            shrink_widest(&mut widths, &floors, excess);
        }
    } else if total < available {
        let extra = available - total;
        let auto: Vec<usize> = (0..columns.len())
            .filter(|&i| columns[i].is_auto())
            .collect();
        let targets: Vec<usize> = if auto.is_empty() {
            (0..columns.len()).collect()
        } else {
            auto
        };
        let weights: Vec<usize> = targets
            .iter()
            .map(|&i| columns[i].natural.max(widths[i]))
            .collect();
        for (idx, share) in targets.iter().zip(distribute(extra, &weights)) {
            widths[*idx] += share;
        }
    }

    tracing::debug!(available, ?widths, "resolved table column widths");
    ResolvedWidths { widths }
}

/// Splits `amount` in proportion to `weights`, floor first, then one cell
/// at a time from the left. Zero total weight splits evenly.
fn distribute(amount: usize, weights: &[usize]) -> Vec<usize> {
    if weights.is_empty() {
        return vec![];
    }
    let total: usize = weights.iter().sum();
    let mut shares: Vec<usize> = if total == 0 {
        vec![amount / weights.len(); weights.len()]
    } else {
        weights.iter().map(|w| amount * w / total).collect()
    };

    let mut remainder = amount - shares.iter().sum::<usize>();
    let mut i = 0;
    while remainder > 0 {
        if total == 0 || weights[i] > 0 {
            shares[i] += 1;
            remainder -= 1;
        }
        i = (i + 1) % weights.len();
    }
    shares
}

/// Takes up to `excess` cells away, one at a time from the widest column
/// that is still above its floor. Columns with no floor are never touched.
/// Returns the excess that could not be removed.
fn shrink_widest(widths: &mut [usize], floors: &[Option<usize>], mut excess: usize) -> usize {
    while excess > 0 {
        let widest = widths
            .iter()
            .zip(floors)
            .enumerate()
            .filter(|(_, (width, floor))| matches!(floor, Some(f) if **width > *f))
            .max_by(|(ia, (wa, _)), (ib, (wb, _))| wa.cmp(wb).then(ib.cmp(ia)))
            .map(|(i, _)| i);
        match widest {
            Some(i) => {
                widths[i] -= 1;
                excess -= 1;
            }
            None => break,
        }
    }
    excess
}

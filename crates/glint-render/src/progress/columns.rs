//! Columns of a progress display.
//!
//! Every visible task becomes one line. Each column renders a cell per task,
//! column widths are the widest cell, and bars without a fixed width share
//! whatever is left of the line.

use std::time::{Duration, Instant};

use glint_style::{Style, Theme};
use serde::{Deserialize, Serialize};

use super::bar::ProgressBar;
use super::task::Task;
use crate::renderable::Render;
use crate::segment::{Justify, Line};
use crate::text::Text;

const SEPARATOR: &str = " ";

/// One column of a progress line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressColumn {
    /// The task description, as markup.
    Description,
    /// The bar. `None` takes the width left over by the other columns.
    Bar { width: Option<usize> },
    /// `" 42%"`. Blank for tasks without a total.
    Percentage,
    /// `"42/100"`, or `"42/?"` without a total.
    Count,
    /// Time since the task started, as `H:MM:SS`.
    Elapsed,
    /// Estimated time left, `-:--:--` until there is enough data.
    Remaining,
    /// Markup with `{description}`, `{completed}`, `{total}` and
    /// `{percentage}` placeholders.
    Text(String),
}

impl ProgressColumn {
    /// Description, a 40 cell bar, percentage and time remaining.
    pub fn defaults() -> Vec<ProgressColumn> {
        vec![
            ProgressColumn::Description,
            ProgressColumn::Bar { width: Some(40) },
            ProgressColumn::Percentage,
            ProgressColumn::Remaining,
        ]
    }

    fn justify(&self) -> Justify {
        match self {
            ProgressColumn::Description | ProgressColumn::Text(_) => Justify::Left,
            _ => Justify::Right,
        }
    }
}

/// What a column needs besides the task.
pub(crate) struct Frame<'a> {
    pub theme: &'a Theme,
    pub now: Instant,
    pub colors: bool,
    /// Seconds since the session started, for pulse animation.
    pub animation_time: f64,
}

/// Formats a duration as `H:MM:SS`.
///
/// ```rust
/// use std::time::Duration;
/// use glint_render::progress::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(3725)), "1:02:05");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn markup_line(markup: &str, style: Style) -> Line {
    let text = Text::from(markup).style(style).no_wrap(true);
    let width = text.measure(usize::MAX).maximum;
    text.render(width).into_iter().next().unwrap_or_default()
}

fn expand_template(template: &str, task: &Task) -> String {
    let total = task.total().map_or_else(|| "?".to_string(), format_amount);
    template
        .replace("{description}", task.description())
        .replace("{completed}", &format_amount(task.completed()))
        .replace("{total}", &total)
        .replace("{percentage}", &format!("{:.0}", task.percentage()))
}

fn cell(column: &ProgressColumn, task: &Task, frame: &Frame<'_>) -> Line {
    let theme = frame.theme;
    match column {
        ProgressColumn::Description => {
            markup_line(task.description(), theme.style("progress.description"))
        }
        ProgressColumn::Text(template) => markup_line(&expand_template(template, task), Style::default()),
        ProgressColumn::Percentage => match task.total() {
            Some(_) => Line::styled(
                format!("{:>3.0}%", task.percentage()),
                theme.style("progress.percentage"),
            ),
            None => Line::new(),
        },
        ProgressColumn::Count => {
            let total = task.total().map_or_else(|| "?".to_string(), format_amount);
            Line::styled(
                format!("{}/{}", format_amount(task.completed()), total),
                theme.style("progress.count"),
            )
        }
        ProgressColumn::Elapsed => Line::styled(
            format_duration(task.elapsed(frame.now)),
            theme.style("progress.elapsed"),
        ),
        ProgressColumn::Remaining => {
            let text = match (task.total(), task.time_remaining()) {
                (None, _) => String::new(),
                (Some(_), Some(left)) => format_duration(left),
                (Some(_), None) => "-:--:--".to_string(),
            };
            Line::styled(text, theme.style("progress.remaining"))
        }
        ProgressColumn::Bar { .. } => Line::new(),
    }
}

fn bar_line(task: &Task, width: usize, frame: &Frame<'_>) -> Line {
    ProgressBar::new(task.total())
        .completed(task.completed())
        .colors(frame.colors)
        .animation_time(frame.animation_time)
        .theme(frame.theme)
        .render(width)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Column widths for `width` cells. Fixed columns get their widest cell;
/// flexible bars split what remains. When the fixed columns alone do not
/// fit, the description gives up cells first.
fn column_widths(columns: &[ProgressColumn], cells: &[Vec<Line>], width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| match column {
            ProgressColumn::Bar { width } => width.unwrap_or(0),
            _ => cells.iter().map(|row| row[i].width()).max().unwrap_or(0),
        })
        .collect();

    let separators = SEPARATOR.len() * columns.len().saturating_sub(1);
    let used: usize = widths.iter().sum::<usize>() + separators;

    if used > width {
        let mut overflow = used - width;
        for (i, column) in columns.iter().enumerate() {
            if *column == ProgressColumn::Description {
                let cut = overflow.min(widths[i]);
                widths[i] -= cut;
                overflow -= cut;
            }
        }
        return widths;
    }

    let flexible: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, column)| matches!(column, ProgressColumn::Bar { width: None }))
        .map(|(i, _)| i)
        .collect();
    if !flexible.is_empty() {
        let spare = width - used;
        let share = spare / flexible.len();
        let mut extra = spare % flexible.len();
        for i in flexible {
            widths[i] = share + usize::from(extra > 0);
            extra = extra.saturating_sub(1);
        }
    }
    widths
}

/// Renders one line per task, each cropped to `width`.
pub(crate) fn render_tasks(
    columns: &[ProgressColumn],
    tasks: &[&Task],
    frame: &Frame<'_>,
    width: usize,
) -> Vec<Line> {
    let cells: Vec<Vec<Line>> = tasks
        .iter()
        .map(|task| columns.iter().map(|column| cell(column, task, frame)).collect())
        .collect();
    let widths = column_widths(columns, &cells, width);

    tasks
        .iter()
        .zip(cells)
        .map(|(task, row)| {
            let mut line = Line::new();
            for (i, (column, mut content)) in columns.iter().zip(row).enumerate() {
                if i > 0 {
                    line.push_str(SEPARATOR, &Style::default());
                }
                if matches!(column, ProgressColumn::Bar { .. }) {
                    content = bar_line(task, widths[i], frame);
                } else {
                    content.ellipsize(widths[i]);
                }
                content.justify(widths[i], column.justify(), &Style::default());
                line.append(content);
            }
            line.crop(width);
            line
        })
        .collect()
}

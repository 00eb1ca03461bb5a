//! Horizontal rules, optionally titled.

use std::sync::Arc;

use glint_style::{Style, Theme};

use crate::cells::{cell_len, repeat_to_width};
use crate::measure::Measurement;
use crate::renderable::Render;
use crate::segment::{Justify, Line};
use crate::text::{themed_parser, Text};

/// Glyphs kept on each side of a centered title.
const MARGIN: usize = 2;

/// A full-width horizontal line.
///
/// ```rust
/// use glint_render::{Render, Rule};
///
/// let lines = Rule::new().title("Hi").render(12);
/// assert_eq!(lines[0].plain_text(), "──── Hi ────");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    title: Option<Text>,
    characters: String,
    style: Style,
    title_style: Style,
    align: Justify,
    markup_theme: Option<Arc<Theme>>,
}

impl Default for Rule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule {
    pub fn new() -> Self {
        let theme = crate::default_theme();
        Self {
            title: None,
            characters: "─".to_string(),
            style: theme.style("rule.line"),
            title_style: theme.style("rule.text"),
            align: Justify::Center,
            markup_theme: None,
        }
    }

    /// A markup title laid into the line.
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(match self.markup_theme.as_deref() {
            Some(theme) => Text::lenient_with(title, &themed_parser(theme)),
            None => Text::from(title),
        });
        self
    }

    /// The glyphs repeated to fill the line. Empty input keeps the default.
    pub fn characters(mut self, characters: &str) -> Self {
        if cell_len(characters) > 0 {
            self.characters = characters.to_string();
        }
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn align(mut self, align: Justify) -> Self {
        self.align = align;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.style = theme.style("rule.line");
        self.title_style = theme.style("rule.text");
        if let Some(title) = &mut self.title {
            title.retheme(&themed_parser(theme));
        }
        self.markup_theme = Some(Arc::new(theme.clone()));
        self
    }

    fn glyphs(&self, width: usize) -> Line {
        Line::styled(repeat_to_width(&self.characters, width), self.style.clone())
    }

    fn title_line(&self, title: &Text, width: usize) -> Line {
        let style = self.title_style.merge(title.base_style());
        let mut line = title
            .clone()
            .style(style)
            .no_wrap(true)
            .render(width)
            .into_iter()
            .next()
            .unwrap_or_default();
        line.ellipsize(width);
        line
    }
}

impl Render for Rule {
    fn measure(&self, max_width: usize) -> Measurement {
        Measurement::new(1, max_width).clamp(max_width)
    }

    fn render(&self, width: usize) -> Vec<Line> {
        let fits = match self.align {
            Justify::Center => width > 2 * (MARGIN + 1),
            Justify::Left | Justify::Right => width >= 3,
        };
        let title = match &self.title {
            Some(title) if fits => title,
            _ => return vec![self.glyphs(width)],
        };

        let mut line = Line::new();
        match self.align {
            Justify::Center => {
                let label = self.title_line(title, width - 2 * (MARGIN + 1));
                let label_width = label.width();
                let side = (width - label_width) / 2;
                line.append(self.glyphs(side - 1));
                line.push_str(" ", &Style::default());
                line.append(label);
                line.push_str(" ", &Style::default());
                line.append(self.glyphs(width - label_width - side - 1));
            }
            Justify::Left => {
                let label = self.title_line(title, width - 2);
                let rest = width - label.width() - 1;
                line.append(label);
                line.push_str(" ", &Style::default());
                line.append(self.glyphs(rest));
            }
            Justify::Right => {
                let label = self.title_line(title, width - 2);
                let rest = width - label.width() - 1;
                line.append(self.glyphs(rest));
                line.push_str(" ", &Style::default());
                line.append(label);
            }
        }
        line.set_width(width, &Style::default());
        vec![line]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_style::Color;

    fn plain(rule: &Rule, width: usize) -> String {
        rule.render(width)[0].plain_text()
    }

    #[test]
    fn untitled_fills_width() {
        assert_eq!(plain(&Rule::new(), 5), "─────");
        assert_eq!(plain(&Rule::new().characters("=-"), 5), "=-=-=");
    }

    #[test]
    fn centered_title() {
        assert_eq!(plain(&Rule::new().title("Hi"), 12), "──── Hi ────");
        assert_eq!(plain(&Rule::new().title("Odd"), 12), "─── Odd ────");
    }

    #[test]
    fn aligned_title() {
        let left = Rule::new().title("Hi").align(Justify::Left);
        assert_eq!(plain(&left, 8), "Hi ─────");
        let right = Rule::new().title("Hi").align(Justify::Right);
        assert_eq!(plain(&right, 8), "───── Hi");
    }

    #[test]
    fn long_title_truncates() {
        let line = plain(&Rule::new().title("A long heading"), 10);
        assert_eq!(line, "── A l… ──");
    }

    #[test]
    fn centered_title_keeps_two_glyphs_each_side() {
        for width in 7..30 {
            let line = plain(&Rule::new().title("A fairly long heading"), width);
            let left = line.chars().take_while(|&c| c == '─').count();
            let right = line.chars().rev().take_while(|&c| c == '─').count();
            assert!(left >= 2 && right >= 2, "{line:?}");
        }
        assert_eq!(plain(&Rule::new().title("Hi"), 8), "── Hi ──");
        assert_eq!(plain(&Rule::new().title("Hi"), 7), "── … ──");
    }

    #[test]
    fn too_narrow_for_title() {
        assert_eq!(plain(&Rule::new().title("Hi"), 4), "────");
        assert_eq!(plain(&Rule::new().title("Hi"), 6), "──────");
    }

    #[test]
    fn theme_names_in_title() {
        let theme = Theme::default().add("heading", Style::new().underline());
        let rule = Rule::new().theme(&theme).title("[heading]Part[/heading]");
        assert_eq!(plain(&rule, 12), "─── Part ───");
        let earlier = Rule::new().title("[heading]Part[/]").theme(&theme);
        assert_eq!(plain(&earlier, 12), "─── Part ───");
    }

    #[test]
    fn styles() {
        let lines = Rule::new().title("[bold]T[/bold]").render(7);
        let segments = lines[0].segments();
        assert_eq!(segments[0].style(), &Style::new().fg(Color::Standard(10)));
        assert!(segments.iter().any(|s| s.text() == "T" && s.style().has(glint_style::Attribute::Bold)));
    }

    #[test]
    fn measure_is_flexible() {
        assert_eq!(Rule::new().measure(30), Measurement::new(1, 30));
    }
}

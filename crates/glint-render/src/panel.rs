//! A border around a single renderable, with optional titles.

use std::sync::Arc;

use glint_style::{Style, Theme};

use crate::boxes::{BoxStyle, CellRow};
use crate::measure::Measurement;
use crate::renderable::{Render, Renderable};
use crate::segment::{Justify, Line};
use crate::text::{themed_parser, Text};

/// A bordered box around one child.
///
/// ```rust
/// use glint_render::{Panel, Render};
///
/// let panel = Panel::fit("Hello").title("Hi");
/// let lines = panel.render(80);
/// assert_eq!(lines[0].plain_text(), "╭─ Hi ──╮");
/// assert_eq!(lines[1].plain_text(), "│ Hello │");
/// ```
#[derive(Debug, Clone)]
pub struct Panel {
    child: Box<Renderable>,
    title: Option<Text>,
    subtitle: Option<Text>,
    title_align: Justify,
    subtitle_align: Justify,
    box_style: BoxStyle,
    border_style: Style,
    title_style: Style,
    expand: bool,
    padding: (usize, usize),
    markup_theme: Option<Arc<Theme>>,
}

impl Panel {
    /// A panel that fills the available width.
    pub fn new(child: impl Into<Renderable>) -> Self {
        let theme = crate::default_theme();
        Self {
            child: Box::new(child.into()),
            title: None,
            subtitle: None,
            title_align: Justify::Center,
            subtitle_align: Justify::Center,
            box_style: BoxStyle::Rounded,
            border_style: theme.style("panel.border"),
            title_style: theme.style("panel.title"),
            expand: true,
            padding: (0, 1),
            markup_theme: None,
        }
    }

    /// A panel that shrinks to fit its content.
    pub fn fit(child: impl Into<Renderable>) -> Self {
        Self::new(child).expand(false)
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(self.label(title));
        self
    }

    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(self.label(subtitle));
        self
    }

    fn label(&self, markup: &str) -> Text {
        match self.markup_theme.as_deref() {
            Some(theme) => Text::lenient_with(markup, &themed_parser(theme)),
            None => Text::from(markup),
        }
    }

    pub fn title_align(mut self, align: Justify) -> Self {
        self.title_align = align;
        self
    }

    pub fn subtitle_align(mut self, align: Justify) -> Self {
        self.subtitle_align = align;
        self
    }

    pub fn box_style(mut self, box_style: BoxStyle) -> Self {
        self.box_style = box_style;
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Blank lines above and below, spaces left and right of the child.
    pub fn padding(mut self, vertical: usize, horizontal: usize) -> Self {
        self.padding = (vertical, horizontal);
        self
    }

    /// Takes border and title styles from `theme`, and resolves its names
    /// in the titles and in text content.
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.border_style = theme.style("panel.border");
        self.title_style = theme.style("panel.title");
        let parser = themed_parser(theme);
        for title in self.title.iter_mut().chain(self.subtitle.iter_mut()) {
            title.retheme(&parser);
        }
        self.child.retheme_text(&parser);
        self.markup_theme = Some(Arc::new(theme.clone()));
        self
    }

    /// Cells taken by the border and horizontal padding.
    fn frame(&self) -> usize {
        2 + 2 * self.padding.1
    }

    fn title_line(&self, title: &Text) -> Line {
        let style = self.title_style.merge(title.base_style());
        let rendered = title.clone().style(style.clone()).no_wrap(true).render(usize::MAX);
        let mut line = Line::plain(" ").with_base(&style);
        if let Some(first) = rendered.into_iter().next() {
            line.append(first);
        }
        line.push_str(" ", &style);
        line
    }

    /// A top or bottom border with an optional title laid into it.
    fn edge_line(&self, corners: (char, char, char), title: Option<&Text>, align: Justify, width: usize) -> Line {
        let (left, fill, right) = corners;
        let border = &self.border_style;
        let fill_width = width.saturating_sub(2);

        let mut line = Line::styled(left.to_string(), border.clone());
        match title.filter(|_| width > 4) {
            Some(title) => {
                let mut label = self.title_line(title);
                label.ellipsize(width - 4);
                let excess = fill_width - label.width();
                let (before, after) = match align {
                    Justify::Left => (1, excess - 1),
                    Justify::Center => (excess / 2, excess - excess / 2),
                    Justify::Right => (excess - 1, 1),
                };
                line.push_str(&fill.to_string().repeat(before), border);
                line.append(label);
                line.push_str(&fill.to_string().repeat(after), border);
            }
            None => line.push_str(&fill.to_string().repeat(fill_width), border),
        }
        line.push_str(&right.to_string(), border);
        line
    }

    fn title_width(title: &Option<Text>) -> usize {
        title
            .as_ref()
            .map(|t| t.measure(usize::MAX).maximum + 6)
            .unwrap_or(0)
    }
}

impl Render for Panel {
    fn measure(&self, max_width: usize) -> Measurement {
        let frame = self.frame();
        let child = self.child.measure(max_width.saturating_sub(frame));
        let maximum = if self.expand {
            max_width
        } else {
            (child.maximum + frame)
                .max(Self::title_width(&self.title))
                .max(Self::title_width(&self.subtitle))
        };
        Measurement::new(child.minimum + frame, maximum).clamp(max_width)
    }

    fn render(&self, width: usize) -> Vec<Line> {
        let target = if self.expand {
            width
        } else {
            self.measure(width).maximum
        };
        let chars = self.box_style.chars();
        let (vertical, horizontal) = self.padding;
        let inner = target.saturating_sub(self.frame());
        let (side_left, _, side_right) = chars.cell_edges(CellRow::Body);

        let mut body: Vec<Line> = Vec::new();
        body.extend((0..vertical).map(|_| Line::new()));
        body.extend(self.child.render(inner));
        body.extend((0..vertical).map(|_| Line::new()));

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(self.edge_line(
            (chars.top_left(), chars.top(), chars.top_right()),
            self.title.as_ref(),
            self.title_align,
            target,
        ));
        for mut content in body {
            content.set_width(inner, &Style::default());
            let mut line = Line::styled(side_left.to_string(), self.border_style.clone());
            line.push_str(&" ".repeat(horizontal), &Style::default());
            line.append(content);
            line.push_str(&" ".repeat(horizontal), &Style::default());
            line.push_str(&side_right.to_string(), &self.border_style);
            lines.push(line);
        }
        lines.push(self.edge_line(
            (chars.bottom_left(), chars.bottom(), chars.bottom_right()),
            self.subtitle.as_ref(),
            self.subtitle_align,
            target,
        ));

        for line in &mut lines {
            line.set_width(target, &Style::default());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::lines_to_plain;
    use glint_style::Color;

    mod sizing {
        use super::*;

        #[test]
        fn fit_wraps_content() {
            let panel = Panel::fit("Hello");
            assert_eq!(
                lines_to_plain(&panel.render(80)),
                "╭───────╮\n│ Hello │\n╰───────╯"
            );
        }

        #[test]
        fn expand_fills_width() {
            let lines = Panel::new("x").render(12);
            assert!(lines.iter().all(|line| line.width() == 12));
            assert_eq!(lines[1].plain_text(), "│ x        │");
        }

        #[test]
        fn fit_is_never_narrower_than_title() {
            let panel = Panel::fit("a").title("Long title");
            assert_eq!(panel.measure(80).maximum, 16);
            assert_eq!(panel.render(80)[0].plain_text(), "╭─ Long title ─╮");
        }

        #[test]
        fn child_wraps_inside() {
            let lines = Panel::new("one two three").render(9);
            assert_eq!(
                lines_to_plain(&lines),
                "╭───────╮\n│ one   │\n│ two   │\n│ three │\n╰───────╯"
            );
        }

        #[test]
        fn vertical_padding() {
            let lines = Panel::fit("x").padding(1, 2).render(80);
            assert_eq!(
                lines_to_plain(&lines),
                "╭─────╮\n│     │\n│  x  │\n│     │\n╰─────╯"
            );
        }
    }

    mod titles {
        use super::*;

        #[test]
        fn truncated_with_ellipsis() {
            let lines = Panel::new("x").title("A very long title").render(12);
            assert_eq!(lines[0].plain_text(), "╭─ A very…─╮");
            assert_eq!(lines[0].width(), 12);
        }

        #[test]
        fn alignment() {
            let left = Panel::new("x").title("T").title_align(Justify::Left).render(10);
            assert_eq!(left[0].plain_text(), "╭─ T ────╮");
            let right = Panel::new("x").title("T").title_align(Justify::Right).render(10);
            assert_eq!(right[0].plain_text(), "╭──── T ─╮");
        }

        #[test]
        fn subtitle_on_bottom() {
            let lines = Panel::new("x").subtitle("end").render(11);
            assert_eq!(lines[2].plain_text(), "╰── end ──╯");
        }

        #[test]
        fn title_markup_is_styled() {
            let lines = Panel::new("x").title("[red]T[/red]").render(10);
            let seg = lines[0]
                .segments()
                .iter()
                .find(|s| s.text() == "T")
                .unwrap();
            assert_eq!(seg.style(), &Style::new().fg(Color::Standard(1)));
        }

        #[test]
        fn theme_names_in_titles_and_body() {
            let theme = Theme::default().add("note", Style::new().italic());
            let panel = Panel::fit("[note]body[/note]")
                .theme(&theme)
                .title("[note]T[/note]")
                .subtitle("[note]S[/]");
            let text = lines_to_plain(&panel.render(20));
            assert!(!text.contains("[note]"), "{text}");
            assert!(text.contains("│ body │"), "{text}");
            let lines = panel.render(20);
            let title = lines[0].segments().iter().find(|s| s.text() == "T").unwrap();
            assert!(title.style().has(glint_style::Attribute::Italic));
        }
    }

    #[test]
    fn box_styles_keep_corners() {
        for style in BoxStyle::ALL {
            let chars = style.chars();
            let lines = Panel::new("body").box_style(style).render(10);
            let top = lines[0].plain_text();
            let bottom = lines[lines.len() - 1].plain_text();
            assert_eq!(top.chars().next(), Some(chars.top_left()), "{style}");
            assert_eq!(top.chars().last(), Some(chars.top_right()), "{style}");
            assert_eq!(bottom.chars().next(), Some(chars.bottom_left()), "{style}");
            assert_eq!(bottom.chars().last(), Some(chars.bottom_right()), "{style}");
        }
    }
}

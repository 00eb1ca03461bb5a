//! Hierarchies drawn with guide lines.
//!
//! Traversal is iterative, so trees of any depth render without growing
//! the call stack.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use glint_markup::MarkupParser;

use glint_style::{Style, StyleError, Theme};
use serde::{Deserialize, Serialize};

use crate::measure::Measurement;
use crate::renderable::Render;
use crate::segment::Line;
use crate::text::{themed_parser, Text};

/// Width of every guide, in cells.
const GUIDE_WIDTH: usize = 4;

/// Glyph set for tree guides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideStyle {
    #[default]
    Normal,
    Bold,
    Double,
    Ascii,
}

/// The four guides: space, continue, fork, end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Guides {
    pub space: &'static str,
    pub vertical: &'static str,
    pub fork: &'static str,
    pub end: &'static str,
}

impl GuideStyle {
    pub fn guides(self) -> Guides {
        let [space, vertical, fork, end] = match self {
            GuideStyle::Normal => ["    ", "│   ", "├── ", "└── "],
            GuideStyle::Bold => ["    ", "┃   ", "┣━━ ", "┗━━ "],
            GuideStyle::Double => ["    ", "║   ", "╠══ ", "╚══ "],
            GuideStyle::Ascii => ["    ", "|   ", "+-- ", "`-- "],
        };
        Guides {
            space,
            vertical,
            fork,
            end,
        }
    }
}

impl FromStr for GuideStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(GuideStyle::Normal),
            "bold" | "heavy" => Ok(GuideStyle::Bold),
            "double" => Ok(GuideStyle::Double),
            "ascii" => Ok(GuideStyle::Ascii),
            _ => Err(StyleError::spec(s, "expected normal, bold, double or ascii")),
        }
    }
}

impl fmt::Display for GuideStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GuideStyle::Normal => "normal",
            GuideStyle::Bold => "bold",
            GuideStyle::Double => "double",
            GuideStyle::Ascii => "ascii",
        };
        f.write_str(name)
    }
}

/// A node with a label and owned children.
///
/// Display settings (guides, guide style, `hide_root`, theme) are read from
/// the node being rendered; `expanded` is read from every node. Labels are
/// parsed again against the rendered node's theme, so children added after
/// [`Tree::theme`] can use its names.
///
/// ```rust
/// use glint_render::{Render, Tree};
///
/// let mut tree = Tree::new("Root");
/// tree.add(Tree::new("Child 1"));
/// tree.add(Tree::new("Child 2")).add(Tree::new("Grandchild"));
///
/// let text: Vec<String> = tree.render(40).iter().map(|l| l.plain_text()).collect();
/// assert_eq!(text, vec!["Root", "├── Child 1", "└── Child 2", "    └── Grandchild"]);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    label: Text,
    children: Vec<Tree>,
    expanded: bool,
    hide_root: bool,
    guide_style: GuideStyle,
    style: Style,
    markup_theme: Option<Arc<Theme>>,
}

impl Tree {
    /// A node with a markup label.
    pub fn new(label: &str) -> Self {
        Self::with_text(Text::from(label))
    }

    pub fn with_text(label: Text) -> Self {
        Self {
            label,
            children: Vec::new(),
            expanded: true,
            hide_root: false,
            guide_style: GuideStyle::default(),
            style: crate::default_theme().style("tree.line"),
            markup_theme: None,
        }
    }

    /// Adds a child and returns it, for building nested levels.
    pub fn add(&mut self, child: Tree) -> &mut Tree {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Adds a child, returning the tree for chaining.
    pub fn child(mut self, child: Tree) -> Self {
        self.children.push(child);
        self
    }

    /// Render only the children.
    pub fn hide_root(mut self, hide: bool) -> Self {
        self.hide_root = hide;
        self
    }

    /// Collapsed nodes do not show their children.
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn guide_style(mut self, guide_style: GuideStyle) -> Self {
        self.guide_style = guide_style;
        self
    }

    /// Style of the guide lines.
    pub fn guides(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Guide style from `theme`; its names also resolve in labels.
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.style = theme.style("tree.line");
        self.markup_theme = Some(Arc::new(theme.clone()));
        self
    }

    fn parser(&self) -> Option<MarkupParser> {
        self.markup_theme.as_deref().map(themed_parser)
    }

    pub fn label(&self) -> &Text {
        &self.label
    }

    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    /// Visits visible nodes in pre-order. `lasts[i]` tells whether the
    /// node's ancestor at depth `i + 1` (or the node itself, for the final
    /// entry) is the last of its siblings.
    fn walk(&self, mut visit: impl FnMut(&Tree, &[bool])) {
        let mut lasts: Vec<bool> = Vec::new();
        if !self.hide_root {
            visit(self, &lasts);
        }
        if !self.expanded {
            return;
        }

        let mut stack = vec![self.children.iter()];
        while let Some(siblings) = stack.last_mut() {
            let Some(node) = siblings.next() else {
                stack.pop();
                lasts.pop();
                continue;
            };
            let is_last = siblings.len() == 0;
            lasts.truncate(stack.len() - 1);
            lasts.push(is_last);
            visit(node, &lasts);
            if node.expanded && !node.children.is_empty() {
                stack.push(node.children.iter());
            }
        }
    }

    /// Guide columns for a node, cut off once `width` cells are filled.
    fn prefix(&self, lasts: &[bool], first_line: bool, width: usize) -> String {
        let guides = self.guide_style.guides();
        let levels = if self.hide_root {
            lasts.get(1..).unwrap_or(&[])
        } else {
            lasts
        };

        let mut prefix = String::new();
        for (i, &last) in levels.iter().enumerate().take(width.div_ceil(GUIDE_WIDTH)) {
            let own = i + 1 == levels.len();
            let guide = match (own && first_line, last) {
                (true, true) => guides.end,
                (true, false) => guides.fork,
                (false, true) => guides.space,
                (false, false) => guides.vertical,
            };
            prefix.push_str(guide);
        }
        prefix
    }

    fn depth_width(&self, depth: usize) -> usize {
        let depth = if self.hide_root {
            depth.saturating_sub(1)
        } else {
            depth
        };
        depth * GUIDE_WIDTH
    }
}

impl Render for Tree {
    fn measure(&self, max_width: usize) -> Measurement {
        let parser = self.parser();
        let mut measurement = Measurement::default();
        self.walk(|node, lasts| {
            let indent = self.depth_width(lasts.len());
            let label = node.label.rethemed(parser.as_ref()).measure(usize::MAX);
            measurement = measurement.union(label.add(indent));
        });
        measurement.clamp(max_width)
    }

    fn render(&self, width: usize) -> Vec<Line> {
        let parser = self.parser();
        let mut lines = Vec::new();
        self.walk(|node, lasts| {
            let indent = self.depth_width(lasts.len());
            let label_width = width.saturating_sub(indent);
            let label = node.label.rethemed(parser.as_ref());
            for (i, label_line) in label.render(label_width).into_iter().enumerate() {
                let mut line = Line::styled(self.prefix(lasts, i == 0, width), self.style.clone());
                line.append(label_line);
                line.crop(width);
                lines.push(line);
            }
        });
        lines
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::lines_to_plain;
    use glint_style::Color;

    fn sample() -> Tree {
        let mut tree = Tree::new("Root");
        tree.add(Tree::new("Child 1"));
        let child = tree.add(Tree::new("Child 2"));
        child.add(Tree::new("Grandchild 1"));
        child.add(Tree::new("Grandchild 2"));
        tree.add(Tree::new("Child 3"));
        tree
    }

    mod layout {
        use super::*;

        #[test]
        fn guides() {
            let expected = "\
Root
├── Child 1
├── Child 2
│   ├── Grandchild 1
│   └── Grandchild 2
└── Child 3";
            assert_eq!(lines_to_plain(&sample().render(40)), expected);
        }

        #[test]
        fn hide_root() {
            let expected = "\
Child 1
Child 2
├── Grandchild 1
└── Grandchild 2
Child 3";
            assert_eq!(lines_to_plain(&sample().hide_root(true).render(40)), expected);
        }

        #[test]
        fn collapsed_node() {
            let tree = Tree::new("Root")
                .child(Tree::new("open").child(Tree::new("shown")))
                .child(Tree::new("closed").child(Tree::new("hidden")).expanded(false));
            assert_eq!(
                lines_to_plain(&tree.render(40)),
                "Root\n├── open\n│   └── shown\n└── closed"
            );
        }

        #[test]
        fn collapsed_root_shows_only_label() {
            let tree = sample().expanded(false);
            assert_eq!(lines_to_plain(&tree.render(40)), "Root");
        }

        #[test]
        fn wrapped_label_continues_guides() {
            let tree = Tree::new("Root")
                .child(Tree::new("alpha beta"))
                .child(Tree::new("gamma"));
            assert_eq!(
                lines_to_plain(&tree.render(9)),
                "Root\n├── alpha\n│   beta\n└── gamma"
            );
        }

        #[test]
        fn guide_sets() {
            let tree = Tree::new("R")
                .child(Tree::new("a"))
                .child(Tree::new("b"))
                .guide_style(GuideStyle::Ascii);
            assert_eq!(lines_to_plain(&tree.render(20)), "R\n+-- a\n`-- b");
            let bold = Tree::new("R").child(Tree::new("a")).guide_style(GuideStyle::Bold);
            assert_eq!(lines_to_plain(&bold.render(20)), "R\n┗━━ a");
        }

        #[test]
        fn narrow_width_crops() {
            for line in sample().render(6) {
                assert!(line.width() <= 6);
            }
        }
    }

    #[test]
    fn guide_style_applied() {
        let green = Style::new().fg(Color::Standard(2));
        let tree = Tree::new("R").child(Tree::new("a")).guides(green.clone());
        let lines = tree.render(20);
        assert_eq!(lines[1].segments()[0].text(), "└── ");
        assert_eq!(lines[1].segments()[0].style(), &green);
    }

    #[test]
    fn labels_use_root_theme() {
        let theme = Theme::default().add("dir", Style::new().bold());
        let mut tree = Tree::new("[dir]src[/dir]").theme(&theme);
        tree.add(Tree::new("[dir]bin[/dir]")).add(Tree::new("main.rs"));
        assert_eq!(lines_to_plain(&tree.render(30)), "src\n└── bin\n    └── main.rs");
        let lines = tree.render(30);
        assert!(lines[1].segments()[1].style().has(glint_style::Attribute::Bold));

        let unthemed = Tree::new("[dir]src[/dir]");
        assert_eq!(lines_to_plain(&unthemed.render(30)), "[dir]src[/dir]");
    }

    #[test]
    fn measure_includes_indent() {
        let m = sample().measure(80);
        assert_eq!(m, Measurement::new(18, 20));
    }

    #[test]
    fn parse_guide_style() {
        assert_eq!("double".parse::<GuideStyle>().unwrap(), GuideStyle::Double);
        assert!("dotted".parse::<GuideStyle>().is_err());
    }

    #[test]
    fn very_deep_tree() {
        const DEPTH: usize = 100_000;
        let mut tree = Tree::new("leaf");
        for _ in 0..DEPTH {
            tree = Tree::new("node").child(tree);
        }
        let lines = tree.render(40);
        assert_eq!(lines.len(), DEPTH + 1);
        assert_eq!(lines[1].plain_text(), "└── node");
        assert!(lines.iter().all(|line| line.width() <= 40));
        assert_eq!(tree.measure(40).maximum, 40);
    }
}

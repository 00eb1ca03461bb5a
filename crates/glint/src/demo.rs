//! Sample renderables shown by the `glint-demo` binary.

use std::io::Write;
use std::thread;
use std::time::Duration;

use glint_render::progress::{Progress, TaskUpdate};
use glint_render::{
    Align, BoxStyle, Column, Columns, GuideStyle, Justify, Panel, Renderable, Result, Rule, Table,
    Text, Tree,
};
use glint_style::Theme;

/// A small release table.
pub fn table(theme: &Theme) -> Result<Table> {
    let mut table = Table::new()
        .theme(theme)
        .title("Releases")
        .caption("most recent first")
        .column(Column::new("Version").no_wrap(true))
        .column(Column::new("Date").justify(Justify::Center))
        .column(Column::new("Notes").ratio(1))
        .column(Column::new("Size").justify(Justify::Right));
    table.add_row(&["[bold]0.3.0[/bold]", "2026-09-30", "Live progress with pulse bars for open-ended work", "1.2 MB"])?;
    table.add_row(&["0.2.1", "2026-08-14", "[green]Fixed[/] wide characters in table cells: 日本語", "1.1 MB"])?;
    table.add_row(&["0.2.0", "2026-07-02", "Panels, trees and rules", "980 kB"])?;
    Ok(table)
}

/// A source tree with one collapsed directory.
pub fn tree(theme: &Theme, guide_style: GuideStyle) -> Tree {
    let mut root = Tree::new("[bold]glint[/bold]").theme(theme).guide_style(guide_style);
    let crates = root.add(Tree::new("crates"));
    for name in ["glint-style", "glint-markup", "glint-render"] {
        let krate = crates.add(Tree::new(name));
        krate.add(Tree::new("Cargo.toml"));
        krate.add(Tree::new("src"));
    }
    root.add(
        Tree::new("target [dim](collapsed)[/dim]")
            .expanded(false)
            .child(Tree::new("debug")),
    );
    root.add(Tree::new("Cargo.toml"));
    root
}

/// A titled panel around a paragraph.
pub fn panel(theme: &Theme, box_style: BoxStyle) -> Panel {
    let body = Text::from(
        "Glint lays out [bold]styled text[/bold], tables and trees, then writes \
         them with the escape sequences your terminal understands. \
         :sparkles:",
    );
    Panel::new(body)
        .theme(theme)
        .box_style(box_style)
        .title("[italic]About[/italic]")
        .subtitle("v0.1.0")
        .subtitle_align(Justify::Right)
}

/// Six equal-width items flowed into as many columns as fit.
pub fn columns() -> Columns {
    Columns::new((1..=6).map(|i| format!("Item {i}"))).equal(true)
}

/// The same line placed left, center and right.
pub fn alignment() -> Renderable {
    Renderable::Group(vec![
        Align::left("Left aligned").into(),
        Align::center("[bold]Center[/bold] aligned").into(),
        Align::right("Right aligned").into(),
    ])
}

pub fn rule(theme: &Theme, title: Option<&str>) -> Rule {
    let rule = Rule::new().theme(theme);
    match title {
        Some(title) => rule.title(title),
        None => rule,
    }
}

/// Drives a three-task session to completion, pausing `delay` per step.
pub fn run_progress<W: Write>(progress: &mut Progress<W>, steps: usize, delay: Duration) -> Result<()> {
    let steps = steps.max(1);
    let download = progress.add_task("[cyan]Downloading", Some(steps as f64));
    let unpack = progress.add_task("[magenta]Unpacking", Some(steps as f64 / 2.0));
    let index = progress.add_task("Indexing", None);
    progress.start()?;

    for step in 0..steps {
        progress.advance(download, 1.0)?;
        progress.advance(unpack, 0.5)?;
        if step + 1 == steps {
            progress.update(index, TaskUpdate::new().total(Some(1.0)).completed(1.0))?;
        }
        progress.tick()?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    progress.stop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_render::segment::lines_to_plain;
    use glint_render::Render;

    #[test]
    fn table_rows() {
        let table = table(&Theme::default()).unwrap();
        assert_eq!(table.row_count(), 3);
        for line in table.render(50) {
            assert_eq!(line.width(), 50);
        }
    }

    #[test]
    fn tree_hides_collapsed_children() {
        let text = lines_to_plain(&tree(&Theme::default(), GuideStyle::Normal).render(60));
        assert!(text.contains("target (collapsed)"));
        assert!(!text.contains("debug"));
        assert!(text.contains("│   ├── glint-style"));
    }

    #[test]
    fn columns_flow() {
        let text = lines_to_plain(&columns().render(20));
        assert_eq!(text, "Item 1 Item 2 Item 3\nItem 4 Item 5 Item 6");
    }

    #[test]
    fn alignment_fills_width() {
        let lines = alignment().render(30);
        assert_eq!(lines[1].plain_text(), "        Center aligned        ");
        assert_eq!(lines[2].plain_text(), "                 Right aligned");
    }

    #[test]
    fn panel_has_titles() {
        let lines = panel(&Theme::default(), BoxStyle::Rounded).render(40);
        assert!(lines[0].plain_text().contains("About"));
        assert!(lines[lines.len() - 1].plain_text().contains("v0.1.0"));
    }
}

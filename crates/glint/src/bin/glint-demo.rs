//! Shows off every renderable on the current terminal.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glint::demo;
use glint::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "glint-demo", version, about = "Render glint's built-in components")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Output width in cells (defaults to the terminal width)
    #[arg(long, short, global = true)]
    width: Option<usize>,

    /// Color capability: none, ansi16, ansi256 or truecolor
    #[arg(long, global = true)]
    color: Option<Capability>,

    /// YAML theme file layered over the default theme
    #[arg(long, global = true)]
    theme: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// A table with a title, caption and ratio column
    Table {
        #[arg(long, default_value = "rounded")]
        box_style: BoxStyle,
    },
    /// A panel around wrapped text
    Panel {
        #[arg(long, default_value = "rounded")]
        box_style: BoxStyle,
    },
    /// A directory tree
    Tree {
        #[arg(long, default_value = "normal")]
        guides: GuideStyle,
    },
    /// A horizontal rule
    Rule { title: Option<String> },
    /// Items flowed into columns
    Columns,
    /// Left, center and right alignment
    Align,
    /// A live progress display
    Progress {
        #[arg(long, default_value_t = 60)]
        steps: usize,
        /// Milliseconds between steps
        #[arg(long, default_value_t = 40)]
        delay: u64,
    },
    /// Print markup given on the command line
    Markup { text: String },
    /// Everything except progress
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "glint_render={level},glint_markup={level},glint_demo={level}"
        )))
        .with_writer(io::stderr)
        .init();

    let theme = match &cli.theme {
        Some(path) => Theme::load(path)
            .with_context(|| format!("failed to load theme {}", path.display()))?,
        None => Theme::default(),
    };

    let mut console = Console::stdout().theme(theme.clone());
    if let Some(width) = cli.width {
        console = console.width(width);
    }
    if let Some(capability) = cli.color {
        console = console.capability(capability);
    }
    tracing::debug!(
        width = console.get_width(),
        capability = %console.get_capability(),
        "console ready"
    );

    match cli.command.unwrap_or(Command::All) {
        Command::Table { box_style } => {
            console.print(&demo::table(&theme)?.box_style(box_style))?;
        }
        Command::Panel { box_style } => {
            console.print(&demo::panel(&theme, box_style))?;
        }
        Command::Tree { guides } => {
            console.print(&demo::tree(&theme, guides))?;
        }
        Command::Rule { title } => {
            console.print(&demo::rule(&theme, title.as_deref()))?;
        }
        Command::Columns => {
            console.print(&demo::columns())?;
        }
        Command::Align => {
            console.print(&demo::alignment())?;
        }
        Command::Markup { text } => {
            console
                .print_markup(&text)
                .context("could not render markup")?;
        }
        Command::Progress { steps, delay } => {
            let mut progress = Progress::new(io::stdout())
                .width(console.get_width())
                .capability(console.get_capability())
                .theme(theme);
            demo::run_progress(&mut progress, steps, Duration::from_millis(delay))?;
        }
        Command::All => {
            console.print(&demo::rule(&theme, Some("Table")))?;
            console.print(&demo::table(&theme)?)?;
            console.line()?;
            console.print(&demo::rule(&theme, Some("Panel")))?;
            console.print(&demo::panel(&theme, BoxStyle::Rounded))?;
            console.line()?;
            console.print(&demo::rule(&theme, Some("Tree")))?;
            console.print(&demo::tree(&theme, GuideStyle::Normal))?;
            console.line()?;
            console.print(&demo::rule(&theme, Some("Columns")))?;
            console.print(&demo::columns())?;
            console.line()?;
            console.print(&demo::rule(&theme, Some("Alignment")))?;
            console.print(&demo::alignment())?;
        }
    }
    Ok(())
}

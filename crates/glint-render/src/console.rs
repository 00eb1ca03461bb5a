//! Writing renderables to a sink.

use std::io::{self, Write};

use glint_markup::MarkupParser;
use glint_style::{Capability, Theme};

use crate::error::Result;
use crate::output::AnsiEncoder;
use crate::renderable::Render;
use crate::rule::Rule;
use crate::segment::Line;
use crate::text::Text;

const DEFAULT_WIDTH: usize = 80;

/// A sink with a fixed width and capability.
///
/// ```rust
/// use glint_render::Console;
/// use glint_style::Capability;
///
/// let mut console = Console::new(Vec::new()).width(40).capability(Capability::None);
/// console.print_markup("[bold]Hello[/bold] world")?;
/// console.rule(Some("Section"))?;
///
/// let out = String::from_utf8(console.into_inner()).unwrap();
/// assert!(out.starts_with("Hello world\n"));
/// # Ok::<(), glint_render::RenderError>(())
/// ```
pub struct Console<W: Write> {
    writer: W,
    width: usize,
    height: Option<usize>,
    encoder: AnsiEncoder,
    theme: Theme,
    parser: MarkupParser,
}

impl Console<io::Stdout> {
    /// A console on stdout, sized from the terminal.
    ///
    /// Falls back to 80 columns when stdout is not a terminal. Color is
    /// turned off when the `console` crate reports colors disabled
    /// (`NO_COLOR`, `CLICOLOR=0`, or not a tty).
    pub fn stdout() -> Self {
        let term = console::Term::stdout();
        let (height, width) = match term.size_checked() {
            Some((rows, cols)) => (Some(rows as usize), cols as usize),
            None => (None, DEFAULT_WIDTH),
        };
        let capability = if console::colors_enabled() {
            Capability::TrueColor
        } else {
            Capability::None
        };
        let mut stdout = Console::new(io::stdout()).width(width).capability(capability);
        stdout.height = height;
        stdout
    }
}

impl<W: Write> Console<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            width: DEFAULT_WIDTH,
            height: None,
            encoder: AnsiEncoder::default(),
            theme: Theme::default(),
            parser: MarkupParser::new(),
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn capability(mut self, capability: Capability) -> Self {
        self.encoder = AnsiEncoder::new(capability);
        self
    }

    /// Theme used for markup tags and console-made renderables.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.parser = MarkupParser::new().theme(theme.clone());
        self.theme = theme;
        self
    }

    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> Option<usize> {
        self.height
    }

    pub fn get_capability(&self) -> Capability {
        self.encoder.capability()
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Lays `renderable` out at its natural width, up to the console width.
    pub fn render_lines<R: Render + ?Sized>(&self, renderable: &R) -> Vec<Line> {
        let width = renderable.measure(self.width).maximum.min(self.width);
        renderable.render(width)
    }

    /// Writes lines, each followed by a newline.
    pub fn write_lines(&mut self, lines: &[Line]) -> Result<()> {
        let mut out = String::new();
        for line in lines {
            out.push_str(&self.encoder.encode_line(line));
            out.push('\n');
        }
        self.writer.write_all(out.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn print<R: Render + ?Sized>(&mut self, renderable: &R) -> Result<()> {
        let lines = self.render_lines(renderable);
        tracing::trace!(lines = lines.len(), width = self.width, "print");
        self.write_lines(&lines)
    }

    /// Parses and prints markup, wrapped to the console width.
    pub fn print_markup(&mut self, markup: &str) -> Result<()> {
        let text = Text::from_spans(self.parser.parse(markup)?);
        self.print(&text)
    }

    /// A full-width rule, optionally titled.
    pub fn rule(&mut self, title: Option<&str>) -> Result<()> {
        let mut rule = Rule::new().theme(&self.theme);
        if let Some(title) = title {
            rule = rule.title(title);
        }
        self.print(&rule)
    }

    /// An empty line.
    pub fn line(&mut self) -> Result<()> {
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use glint_style::Style;

    fn plain_console(width: usize) -> Console<Vec<u8>> {
        Console::new(Vec::new()).width(width).capability(Capability::None)
    }

    fn written(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).unwrap()
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    mod printing {
        use super::*;

        #[test]
        fn text_wraps_to_width() {
            let mut console = plain_console(10);
            console.print(&Text::from("The quick brown fox")).unwrap();
            assert_eq!(written(console), "The quick\nbrown fox\n");
        }

        #[test]
        fn rule_and_blank_line() {
            let mut console = plain_console(40);
            console.rule(None).unwrap();
            console.line().unwrap();
            assert_eq!(written(console), format!("{}\n\n", "─".repeat(40)));
        }

        #[test]
        fn markup_is_styled() {
            let mut console = Console::new(Vec::new()).capability(Capability::Ansi16);
            console.print_markup("[bold]hi[/]").unwrap();
            assert_eq!(written(console), "\x1b[1mhi\x1b[0m\n");
        }

        #[test]
        fn bad_markup_is_reported() {
            let mut console = plain_console(20);
            let err = console.print_markup("[bold]open").unwrap_err();
            assert!(matches!(err, RenderError::Markup(_)));
        }

        #[test]
        fn theme_names_resolve_in_markup() {
            let theme = Theme::default().add("shout", Style::new().bold());
            let mut console = Console::new(Vec::new())
                .capability(Capability::TrueColor)
                .theme(theme);
            console.print_markup("[shout]hey[/shout]").unwrap();
            assert_eq!(written(console), "\x1b[1mhey\x1b[0m\n");
        }
    }

    #[test]
    fn write_failure_is_io_error() {
        let mut console = Console::new(FailingWriter);
        let err = console.print(&Text::plain("x")).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn builder_settings() {
        let console = Console::new(Vec::new()).width(33).height(10);
        assert_eq!(console.get_width(), 33);
        assert_eq!(console.get_height(), Some(10));
        assert_eq!(console.get_capability(), Capability::TrueColor);
    }
}

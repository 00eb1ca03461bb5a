//! Turning lines into terminal escape sequences.
//!
//! This is the only place that knows about SGR codes. Each styled run is
//! written as `ESC[<params>m text ESC[0m`, so runs never leak style into
//! each other. Hyperlinks use OSC 8.

use glint_style::{resolve_color, Capability, Color, EmissionColor, Style};

use crate::segment::Line;

const RESET: &str = "\x1b[0m";

/// Encodes rendered lines for a sink of fixed capability.
///
/// ```rust
/// use glint_render::output::AnsiEncoder;
/// use glint_render::segment::Line;
/// use glint_style::{Capability, Style};
///
/// let line = Line::styled("hi", Style::new().bold());
/// assert_eq!(AnsiEncoder::new(Capability::Ansi16).encode(&[line.clone()]), "\x1b[1mhi\x1b[0m");
/// assert_eq!(AnsiEncoder::new(Capability::None).encode(&[line]), "hi");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnsiEncoder {
    capability: Capability,
}

impl AnsiEncoder {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// SGR parameters for `style`, without the `ESC[` and `m`. Empty when the
    /// style has no visible effect.
    pub fn sgr(&self, style: &Style) -> String {
        if self.capability == Capability::None {
            return String::new();
        }

        let mut params: Vec<String> = Vec::new();
        let attributes = [
            (style.bold, "1"),
            (style.dim, "2"),
            (style.italic, "3"),
            (style.underline, "4"),
            (style.reverse, "7"),
            (style.strike, "9"),
        ];
        for (flag, code) in attributes {
            if flag == Some(true) {
                params.push(code.to_string());
            }
        }

        if let Some(color) = style.fg.as_ref().and_then(|c| self.emit(c)) {
            match color {
                EmissionColor::Default => params.push("39".into()),
                EmissionColor::Ansi16 { index, bright } if bright => {
                    if self.capability == Capability::Ansi16 {
                        if style.bold != Some(true) {
                            params.push("1".into());
                        }
                        params.push(format!("{}", 30 + index));
                    } else {
                        params.push(format!("{}", 90 + index));
                    }
                }
                EmissionColor::Ansi16 { index, .. } => params.push(format!("{}", 30 + index)),
                EmissionColor::Ansi256(n) => params.push(format!("38;5;{n}")),
                EmissionColor::Rgb(r, g, b) => params.push(format!("38;2;{r};{g};{b}")),
            }
        }

        if let Some(color) = style.bg.as_ref().and_then(|c| self.emit(c)) {
            match color {
                EmissionColor::Default => params.push("49".into()),
                EmissionColor::Ansi16 { index, bright } => {
                    let base = if bright && self.capability > Capability::Ansi16 {
                        100
                    } else {
                        40
                    };
                    params.push(format!("{}", base + index));
                }
                EmissionColor::Ansi256(n) => params.push(format!("48;5;{n}")),
                EmissionColor::Rgb(r, g, b) => params.push(format!("48;2;{r};{g};{b}")),
            }
        }

        params.join(";")
    }

    fn emit(&self, color: &Color) -> Option<EmissionColor> {
        resolve_color(color, self.capability)
    }

    /// Encodes one line. Adjacent runs that encode the same way are merged.
    pub fn encode_line(&self, line: &Line) -> String {
        if self.capability == Capability::None {
            return line.plain_text();
        }

        let mut out = String::new();
        let mut run: Option<(String, Option<String>, String)> = None;
        for segment in line.segments() {
            let params = self.sgr(segment.style());
            let link = segment.style().link.clone();
            let same = matches!(&run, Some((p, l, _)) if *p == params && *l == link);
            if same {
                if let Some((_, _, text)) = run.as_mut() {
                    text.push_str(segment.text());
                }
                continue;
            }
            if let Some((p, l, text)) = run.take() {
                write_run(&mut out, &p, l.as_deref(), &text);
            }
            run = Some((params, link, segment.text().to_string()));
        }
        if let Some((p, l, text)) = run {
            write_run(&mut out, &p, l.as_deref(), &text);
        }
        out
    }

    /// Encodes lines, joined with `\n`.
    pub fn encode(&self, lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| self.encode_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn write_run(out: &mut String, params: &str, link: Option<&str>, text: &str) {
    if let Some(url) = link {
        out.push_str("\x1b]8;;");
        out.push_str(url);
        out.push_str("\x1b\\");
    }
    if params.is_empty() {
        out.push_str(text);
    } else {
        out.push_str("\x1b[");
        out.push_str(params);
        out.push('m');
        out.push_str(text);
        out.push_str(RESET);
    }
    if link.is_some() {
        out.push_str("\x1b]8;;\x1b\\");
    }
}

//! A redrawable block of lines at the bottom of the terminal.

use std::io::Write;

use glint_style::Capability;

use crate::error::Result;
use crate::output::AnsiEncoder;
use crate::segment::Line;

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const ERASE_LINE: &str = "\x1b[2K";
const CURSOR_UP: &str = "\x1b[1A";

/// Owns the last `height` lines written to `writer` and replaces them in
/// place on each redraw.
///
/// Without terminal capability nothing is redrawn; only the final frame is
/// written on release.
#[derive(Debug)]
pub struct LiveRegion<W: Write> {
    writer: W,
    encoder: AnsiEncoder,
    active: bool,
    height: usize,
    last_frame: Option<Vec<Line>>,
}

impl<W: Write> LiveRegion<W> {
    pub fn new(writer: W, capability: Capability) -> Self {
        Self {
            writer,
            encoder: AnsiEncoder::new(capability),
            active: false,
            height: 0,
            last_frame: None,
        }
    }

    /// Changes the capability of an inactive region.
    pub(crate) fn set_capability(&mut self, capability: Capability) {
        if !self.active {
            self.encoder = AnsiEncoder::new(capability);
        }
    }

    fn interactive(&self) -> bool {
        self.encoder.capability() != Capability::None
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Takes over the bottom of the terminal and hides the cursor.
    pub fn acquire(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        self.active = true;
        if self.interactive() {
            self.writer.write_all(HIDE_CURSOR.as_bytes())?;
            self.writer.flush()?;
        }
        Ok(())
    }

    fn clear(&self) -> String {
        if self.height == 0 {
            return String::new();
        }
        let mut out = String::from("\r");
        for _ in 1..self.height {
            out.push_str(ERASE_LINE);
            out.push_str(CURSOR_UP);
        }
        out.push_str(ERASE_LINE);
        out
    }

    fn draw(&mut self, frame: &[Line]) -> Result<()> {
        let mut out = self.clear();
        out.push_str(&self.encoder.encode(frame));
        self.writer.write_all(out.as_bytes())?;
        self.writer.flush()?;
        self.height = frame.len();
        Ok(())
    }

    /// Replaces the region with `frame`. Returns whether anything was
    /// written; identical frames are skipped.
    pub fn redraw(&mut self, frame: &[Line]) -> Result<bool> {
        if !self.active {
            return Ok(false);
        }
        if self.last_frame.as_deref() == Some(frame) {
            tracing::trace!(lines = frame.len(), "live region unchanged, skipping redraw");
            return Ok(false);
        }
        if self.interactive() {
            self.draw(frame)?;
        }
        self.last_frame = Some(frame.to_vec());
        Ok(self.interactive())
    }

    /// Leaves `frame` on screen, moves below it and restores the cursor.
    ///
    /// The cursor is restored even when writing the frame fails.
    pub fn release(&mut self, frame: &[Line]) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let written = if self.interactive() {
            let drawn = if self.last_frame.as_deref() == Some(frame) {
                Ok(())
            } else {
                self.draw(frame)
            };
            let finished = drawn.and_then(|()| Ok(self.writer.write_all(b"\n")?));
            let restored = self.writer.write_all(SHOW_CURSOR.as_bytes());
            finished?;
            restored?;
            Ok(())
        } else {
            let mut out = self.encoder.encode(frame);
            out.push('\n');
            self.writer.write_all(out.as_bytes())
        };
        self.last_frame = Some(frame.to_vec());
        self.height = 0;
        written?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

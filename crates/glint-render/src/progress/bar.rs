//! The progress bar renderable.

use glint_style::{Color, Rgb, Style, Theme};

use crate::measure::Measurement;
use crate::renderable::Render;
use crate::segment::{Line, Segment};

const PULSE_SIZE: usize = 20;
const BAR: char = '━';
const HALF_RIGHT: char = '╸';
const HALF_LEFT: char = '╺';

/// A horizontal bar showing `completed` out of `total`.
///
/// Without a total (or with `pulse` set) the bar animates a pulse instead,
/// positioned by `animation_time`.
///
/// ```rust
/// use glint_render::{ProgressBar, Render};
///
/// let bar = ProgressBar::new(Some(100.0)).completed(50.0).width(10);
/// assert_eq!(bar.render(80)[0].plain_text(), "━━━━━╺━━━━");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    total: Option<f64>,
    completed: f64,
    width: Option<usize>,
    pulse: bool,
    colors: bool,
    animation_time: f64,
    back_style: Style,
    complete_style: Style,
    finished_style: Style,
    pulse_style: Style,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(Some(100.0))
    }
}

impl ProgressBar {
    pub fn new(total: Option<f64>) -> Self {
        let theme = crate::default_theme();
        Self {
            total,
            completed: 0.0,
            width: None,
            pulse: false,
            colors: true,
            animation_time: 0.0,
            back_style: theme.style("bar.back"),
            complete_style: theme.style("bar.complete"),
            finished_style: theme.style("bar.finished"),
            pulse_style: theme.style("bar.pulse"),
        }
    }

    pub fn completed(mut self, completed: f64) -> Self {
        self.completed = completed;
        self
    }

    pub fn total(mut self, total: Option<f64>) -> Self {
        self.total = total;
        self
    }

    /// Fixed width. Without one the bar fills whatever it is given.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn pulse(mut self, pulse: bool) -> Self {
        self.pulse = pulse;
        self
    }

    /// Whether the sink can show color. Off, the unfilled part and the
    /// pulse tail are left blank.
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Seconds since the animation started.
    pub fn animation_time(mut self, seconds: f64) -> Self {
        self.animation_time = seconds;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.back_style = theme.style("bar.back");
        self.complete_style = theme.style("bar.complete");
        self.finished_style = theme.style("bar.finished");
        self.pulse_style = theme.style("bar.pulse");
        self
    }

    /// Percent complete, or `None` when indeterminate.
    pub fn percentage(&self) -> Option<f64> {
        match self.total {
            None => None,
            Some(total) if total <= 0.0 => Some(100.0),
            Some(total) => Some((self.completed / total * 100.0).clamp(0.0, 100.0)),
        }
    }

    fn is_finished(&self) -> bool {
        matches!(self.total, Some(total) if self.completed >= total)
    }

    fn pulse_segments(&self) -> Vec<Segment> {
        let glyph = BAR.to_string();
        if !self.colors {
            let head = PULSE_SIZE / 2;
            return (0..PULSE_SIZE)
                .map(|i| {
                    if i < head {
                        Segment::new(glyph.clone(), self.pulse_style.clone())
                    } else {
                        Segment::plain(" ")
                    }
                })
                .collect();
        }

        let fore = style_rgb(&self.pulse_style).unwrap_or(Rgb(255, 0, 255));
        let back = style_rgb(&self.back_style).unwrap_or(Rgb(0, 0, 0));
        (0..PULSE_SIZE)
            .map(|i| {
                let position = i as f64 / PULSE_SIZE as f64;
                let fade = 0.5 + (position * std::f64::consts::TAU).cos() / 2.0;
                let Rgb(r, g, b) = blend(fore, back, fade);
                Segment::new(glyph.clone(), Style::new().fg(Color::Rgb(r, g, b)))
            })
            .collect()
    }

    fn render_pulse(&self, width: usize) -> Line {
        let segments = self.pulse_segments();
        let offset = (-self.animation_time * 15.0).floor() as i64;
        let offset = offset.rem_euclid(PULSE_SIZE as i64) as usize;
        segments
            .iter()
            .cycle()
            .skip(offset)
            .take(width)
            .cloned()
            .collect()
    }

    fn render_bar(&self, width: usize) -> Line {
        let total = self.total.unwrap_or(100.0);
        let completed = self.completed.clamp(0.0, total.max(0.0));
        let halves = if total > 0.0 {
            ((width * 2) as f64 * completed / total).floor() as usize
        } else {
            width * 2
        };
        let bars = halves / 2;
        let half = halves % 2;

        let style = if self.is_finished() {
            &self.finished_style
        } else {
            &self.complete_style
        };

        let mut line = Line::new();
        line.push_str(&BAR.to_string().repeat(bars), style);
        if half == 1 {
            line.push_str(&HALF_RIGHT.to_string(), style);
        }
        let mut remaining = width.saturating_sub(bars + half);
        if !self.colors {
            line.push_str(&" ".repeat(remaining), &Style::default());
            return line;
        }
        if remaining > 0 && half == 0 && bars > 0 {
            line.push_str(&HALF_LEFT.to_string(), &self.back_style);
            remaining -= 1;
        }
        line.push_str(&BAR.to_string().repeat(remaining), &self.back_style);
        line
    }
}

fn style_rgb(style: &Style) -> Option<Rgb> {
    style.fg.and_then(Color::to_rgb)
}

fn blend(from: Rgb, to: Rgb, fade: f64) -> Rgb {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * fade).round() as u8;
    Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

impl Render for ProgressBar {
    fn measure(&self, max_width: usize) -> Measurement {
        match self.width {
            Some(width) => Measurement::exact(width).clamp(max_width),
            None => Measurement::new(4, max_width).clamp(max_width),
        }
    }

    fn render(&self, width: usize) -> Vec<Line> {
        let width = self.width.map_or(width, |w| w.min(width));
        let line = if self.pulse || self.total.is_none() {
            self.render_pulse(width)
        } else {
            self.render_bar(width)
        };
        vec![line]
    }
}

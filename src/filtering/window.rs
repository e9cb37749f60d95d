//! Windowing rules.
//!
//! `top` and `excerpt` are declared like filters but never evaluated on pairs:
//! they are converted into a `[begin, stop)` range of line indices once the number
//! of lines of the source is known, and that range bounds the iteration on the source.
//! Lines outside the window are never read by filters, so they are not tallied.
use serde::Deserialize;

use crate::error::Error;

/// Percentages declared by a windowing rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSpec {
    /// Keep the first `percent`% lines.
    Top { percent: f64 },
    /// Keep lines between the `top_percentile` and the `bottom_percentile`.
    Excerpt {
        top_percentile: f64,
        bottom_percentile: f64,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct TopArgs {
    percent: f64,
}

impl Default for TopArgs {
    fn default() -> Self {
        Self { percent: 100.0 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct ExcerptArgs {
    top_percentile: f64,
    bottom_percentile: f64,
}

impl Default for ExcerptArgs {
    fn default() -> Self {
        Self {
            top_percentile: 0.0,
            bottom_percentile: 100.0,
        }
    }
}

fn check_percentage(rule: &str, name: &str, v: f64) -> Result<(), Error> {
    if !(0.0..=100.0).contains(&v) {
        return Err(Error::Config(format!(
            "{rule}: {name} must be within [0, 100], got {v}"
        )));
    }
    Ok(())
}

/// index of the line at `pct`% of `nb_lines`, truncated.
#[inline]
fn cutoff(pct: f64, nb_lines: usize) -> usize {
    ((pct / 100.0) * nb_lines as f64) as usize
}

impl WindowSpec {
    pub fn top(percent: f64) -> Result<Self, Error> {
        check_percentage("top", "percent", percent)?;
        Ok(WindowSpec::Top { percent })
    }

    pub fn excerpt(top_percentile: f64, bottom_percentile: f64) -> Result<Self, Error> {
        check_percentage("excerpt", "top_percentile", top_percentile)?;
        check_percentage("excerpt", "bottom_percentile", bottom_percentile)?;
        if top_percentile > bottom_percentile {
            return Err(Error::Config(format!(
                "excerpt: top_percentile ({top_percentile}) is greater than bottom_percentile ({bottom_percentile})"
            )));
        }
        Ok(WindowSpec::Excerpt {
            top_percentile,
            bottom_percentile,
        })
    }

    pub(crate) fn from_top_args(args: TopArgs) -> Result<Self, Error> {
        Self::top(args.percent)
    }

    pub(crate) fn from_excerpt_args(args: ExcerptArgs) -> Result<Self, Error> {
        Self::excerpt(args.top_percentile, args.bottom_percentile)
    }

    /// Resolve the percentages into line indices.
    pub fn window(&self, nb_lines: usize) -> Window {
        match *self {
            WindowSpec::Top { percent } => Window {
                begin: 0,
                stop: Some(cutoff(percent, nb_lines)),
            },
            WindowSpec::Excerpt {
                top_percentile,
                bottom_percentile,
            } => Window {
                begin: cutoff(top_percentile, nb_lines),
                stop: Some(cutoff(bottom_percentile, nb_lines)),
            },
        }
    }
}

/// `[begin, stop)` range of line indices. `stop == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub begin: usize,
    pub stop: Option<usize>,
}

impl Window {
    /// Both windows apply: keep their intersection.
    pub fn intersect(self, other: Window) -> Window {
        let stop = match (self.stop, other.stop) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Window {
            begin: self.begin.max(other.begin),
            stop,
        }
    }

    /// line is before the window
    #[inline]
    pub fn is_before(&self, idx: usize) -> bool {
        idx < self.begin
    }

    /// line is at or past the end of the window
    #[inline]
    pub fn is_past(&self, idx: usize) -> bool {
        self.stop.map_or(false, |stop| idx >= stop)
    }
}

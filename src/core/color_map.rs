use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Interval;
use crate::core::primitives::linspace;

/// Palette family used to color flood plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ColorMapKind {
    /// Equal-intensity gray ramp from black to white.
    Gray,
    /// Classic blue-cyan-yellow-red "jet" palette.
    #[default]
    Jet,
}

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Channels scaled to `0.0..=1.0`, for renderers working in normalized color.
    #[must_use]
    pub fn to_normalized(self) -> [f64; 3] {
        [
            f64::from(self.red) / 255.0,
            f64::from(self.green) / 255.0,
            f64::from(self.blue) / 255.0,
        ]
    }
}

/// One anchor of a color map: normalized position and its color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Rgb,
}

const JET_DEFAULT_LOW: Rgb = Rgb::new(0, 0, 189);
const JET_DEFAULT_HIGH: Rgb = Rgb::new(132, 0, 0);

/// Discrete color stops derived from a set of scalar levels.
///
/// Levels may arrive in any order; their min/max define the normalization.
/// Stops are sorted by position and intended for fixed-color lookup (no
/// blending between stops). Out-of-range values take `min_color` /
/// `max_color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMap {
    kind: ColorMapKind,
    levels: Vec<f64>,
    stops: Vec<ColorStop>,
    range: Option<Interval>,
    min_color: Rgb,
    max_color: Rgb,
}

impl ColorMap {
    /// Builds the stop list for `levels`.
    ///
    /// Empty levels, or levels without a finite spread, produce a map with no
    /// stops; callers are expected to widen flat ranges before getting here.
    #[must_use]
    pub fn new(levels: Vec<f64>, kind: ColorMapKind) -> Self {
        let (default_low, default_high) = match kind {
            ColorMapKind::Gray => (Rgb::BLACK, Rgb::WHITE),
            ColorMapKind::Jet => (JET_DEFAULT_LOW, JET_DEFAULT_HIGH),
        };
        let mut map = Self {
            kind,
            levels,
            stops: Vec::new(),
            range: None,
            min_color: default_low,
            max_color: default_high,
        };

        let finite = || {
            map.levels
                .iter()
                .copied()
                .filter(|level| level.is_finite())
                .map(OrderedFloat)
        };
        let (Some(min), Some(max)) = (finite().min(), finite().max()) else {
            warn!(?kind, "color map has no finite levels, no stops generated");
            return map;
        };
        let (min, max) = (min.0, max.0);
        if min == max {
            warn!(?kind, level = min, "color map levels are flat, no stops generated");
            return map;
        }

        let colors = match kind {
            ColorMapKind::Gray => gray_colors(map.levels.len()),
            ColorMapKind::Jet => {
                let colors = jet_colors(map.levels.len());
                let (low, high) = jet_endpoints(&colors);
                map.min_color = low;
                map.max_color = high;
                colors
            }
        };
        map.stops = build_stops(&map.levels, &colors, min, max);
        map.range = Interval::new(min, max).ok();

        debug!(
            ?kind,
            levels = map.levels.len(),
            stops = map.stops.len(),
            min,
            max,
            "built color map"
        );
        map
    }

    /// Builds a map over `count` evenly spaced levels spanning `interval`.
    #[must_use]
    pub fn from_interval(interval: Interval, count: usize, kind: ColorMapKind) -> Self {
        Self::new(
            linspace(interval.min_value(), interval.max_value(), count),
            kind,
        )
    }

    #[must_use]
    pub fn kind(&self) -> ColorMapKind {
        self.kind
    }

    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color for values below the mapped range.
    #[must_use]
    pub fn min_color(&self) -> Rgb {
        self.min_color
    }

    /// Color for values above the mapped range.
    #[must_use]
    pub fn max_color(&self) -> Rgb {
        self.max_color
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.stops.is_empty()
    }

    /// Fixed-color lookup: the color of the last stop at or below `value`.
    ///
    /// Values under the level range (and NaN) take `min_color`, values over
    /// it take `max_color`. A degenerate map answers `min_color` everywhere.
    #[must_use]
    pub fn color_at(&self, value: f64) -> Rgb {
        let Some(range) = self.range else {
            return self.min_color;
        };
        if value.is_nan() || value < range.min_value() {
            return self.min_color;
        }
        if value > range.max_value() {
            return self.max_color;
        }

        let position = range.normalize(value);
        let index = self.stops.partition_point(|stop| stop.position <= position);
        self.stops
            .get(index.saturating_sub(1))
            .map_or(self.min_color, |stop| stop.color)
    }
}

// Shade follows the level's index in the input list, not its value: two equal
// levels at different indices get different grays. Sort the levels first for
// a value-ordered ramp.
fn gray_colors(len: usize) -> Vec<Rgb> {
    let last = (len - 1) as f64;
    (0..len)
        .map(|i| Rgb::gray((255.0 * i as f64 / last).round() as u8))
        .collect()
}

fn jet_colors(len: usize) -> Vec<Rgb> {
    let n = len.div_ceil(4);
    let ramp = jet_ramp(n);
    let shift = i64::from(len % 4 == 1);
    let green_start = n.div_ceil(2) as i64 - shift;
    let red_start = green_start + n as i64;
    let blue_start = green_start - n as i64;

    (0..len as i64)
        .map(|i| {
            Rgb::new(
                intensity(ramp_value(&ramp, i - red_start)),
                intensity(ramp_value(&ramp, i - green_start)),
                intensity(ramp_value(&ramp, i - blue_start)),
            )
        })
        .collect()
}

/// Trapezoid of length `3n - 1`: rises over `n` steps, holds at 1, falls over `n` steps.
///
/// Steps are computed in single precision; truncation to 8-bit channels
/// depends on it (e.g. `1/3 * 255` truncates to 85 in `f32` but 84 in `f64`).
fn jet_ramp(n: usize) -> Vec<f64> {
    let width = n as f32;
    (0..3 * n - 1)
        .map(|k| {
            if k < n {
                f64::from((k + 1) as f32 / width)
            } else if k < 2 * n - 1 {
                1.0
            } else {
                f64::from((3 * n - 1 - k) as f32 / width)
            }
        })
        .collect()
}

fn ramp_value(ramp: &[f64], offset: i64) -> f64 {
    usize::try_from(offset)
        .ok()
        .and_then(|k| ramp.get(k))
        .copied()
        .unwrap_or(0.0)
}

fn intensity(value: f64) -> u8 {
    (value * 255.0) as u8
}

// Unusual on purpose: the endpoints are not the first/last palette entries.
// The low end is the dimmest pure blue and the high end the dimmest pure red
// found anywhere in the palette, first occurrence winning ties. Palettes
// without such entries keep the fixed defaults.
fn jet_endpoints(colors: &[Rgb]) -> (Rgb, Rgb) {
    let mut low = JET_DEFAULT_LOW;
    let mut high = JET_DEFAULT_HIGH;
    let mut low_blue = u16::MAX;
    let mut high_red = u16::MAX;

    for &color in colors {
        if color.red == 0 && color.green == 0 && color.blue > 0 && u16::from(color.blue) < low_blue
        {
            low_blue = u16::from(color.blue);
            low = color;
        }
        if color.green == 0 && color.blue == 0 && color.red > 0 && u16::from(color.red) < high_red {
            high_red = u16::from(color.red);
            high = color;
        }
    }

    (low, high)
}

/// Inserts one stop per level in input order; a later level landing on an
/// existing position replaces that stop's color.
fn build_stops(levels: &[f64], colors: &[Rgb], min: f64, max: f64) -> Vec<ColorStop> {
    let span = max - min;
    let mut stops: Vec<ColorStop> = Vec::with_capacity(levels.len());

    for (&level, &color) in levels.iter().zip(colors) {
        let position = (level - min) / span;
        if !position.is_finite() {
            continue;
        }

        let index = stops.partition_point(|stop| stop.position < position);
        match stops.get_mut(index) {
            Some(stop) if stop.position == position => stop.color = color,
            _ => stops.insert(index, ColorStop { position, color }),
        }
    }

    stops
}

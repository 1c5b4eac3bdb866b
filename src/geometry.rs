//! Donut and legend geometry for the card.
//!
//! Everything here is pure: angles are radians in screen space (y grows
//! downward), so increasing angles run clockwise and `-π/2` is 12 o'clock.

use std::f64::consts::{PI, TAU};

use crate::error::{CardError, Result};
use crate::model::Category;

/// Angle of the first segment's leading edge (12 o'clock).
pub const START_ANGLE: f64 = -PI / 2.0;

const CENTER_X_FRACTION: f64 = 0.25;
const CENTER_Y_FRACTION: f64 = 0.67;
const OUTER_RADIUS_FRACTION: f64 = 0.23;
const INNER_RADIUS_RATIO: f64 = 0.43;
const LEGEND_X_FRACTION: f64 = 0.525;
const LEGEND_Y_FRACTION: f64 = 0.567;

pub const LEGEND_ROW_PITCH: f64 = 25.0;
pub const LEGEND_SWATCH_SIZE: f64 = 15.0;

/// Shortest chord, in pixels, a large single arc may span before it is split.
const MIN_ARC_CHORD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn on_circle(center: Point, radius: f64, angle: f64) -> Self {
        Self {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Card size in pixels plus the fixed fractions every other position is
/// derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    width_px: u32,
    height_px: u32,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            width_px: 400,
            height_px: 300,
        }
    }
}

impl CardLayout {
    pub fn new(width_px: u32, height_px: u32) -> Result<Self> {
        if width_px == 0 || height_px == 0 {
            return Err(CardError::Layout {
                width: width_px,
                height: height_px,
            });
        }
        Ok(Self {
            width_px,
            height_px,
        })
    }

    pub fn width(&self) -> u32 {
        self.width_px
    }

    pub fn height(&self) -> u32 {
        self.height_px
    }

    pub fn donut_center(&self) -> Point {
        Point::new(
            self.width_px as f64 * CENTER_X_FRACTION,
            self.height_px as f64 * CENTER_Y_FRACTION,
        )
    }

    pub fn outer_radius(&self) -> f64 {
        self.height_px as f64 * OUTER_RADIUS_FRACTION
    }

    pub fn inner_radius(&self) -> f64 {
        self.outer_radius() * INNER_RADIUS_RATIO
    }

    pub fn legend_x(&self) -> f64 {
        self.width_px as f64 * LEGEND_X_FRACTION
    }

    pub fn legend_base_y(&self) -> f64 {
        self.height_px as f64 * LEGEND_Y_FRACTION
    }

    pub fn legend_row_y(&self, index: usize) -> f64 {
        self.legend_base_y() + index as f64 * LEGEND_ROW_PITCH
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub center: Point,
    pub start_angle: f64,
    pub end_angle: f64,
    pub sweep: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub outer_start: Point,
    pub outer_end: Point,
    pub inner_start: Point,
    pub inner_end: Point,
    pub large_arc: bool,
    pub fill_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Elliptical arc with equal radii; `clockwise` is the SVG sweep flag.
    ArcTo {
        radius: f64,
        large_arc: bool,
        clockwise: bool,
        to: Point,
    },
    Close,
}

pub fn compute_donut_segments(
    categories: &[Category],
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
    start_angle: f64,
) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(categories.len());
    let mut start = start_angle;
    for category in categories {
        let sweep = category.weight_percent / 100.0 * TAU;
        let end = start + sweep;
        segments.push(Segment {
            center,
            start_angle: start,
            end_angle: end,
            sweep,
            outer_radius,
            inner_radius,
            outer_start: Point::on_circle(center, outer_radius, start),
            outer_end: Point::on_circle(center, outer_radius, end),
            inner_start: Point::on_circle(center, inner_radius, start),
            inner_end: Point::on_circle(center, inner_radius, end),
            large_arc: sweep > PI,
            fill_color: category.fill_color.clone(),
        });
        start = end;
    }
    segments
}

impl Segment {
    /// Outer arc clockwise, line to the inner ring, inner arc back
    /// counter-clockwise, close.
    pub fn path_commands(&self) -> Vec<PathCommand> {
        let mut commands = vec![PathCommand::MoveTo(self.outer_start)];
        self.push_arc(
            &mut commands,
            self.outer_radius,
            self.start_angle,
            self.sweep,
            self.outer_end,
        );
        commands.push(PathCommand::LineTo(self.inner_end));
        self.push_arc(
            &mut commands,
            self.inner_radius,
            self.end_angle,
            -self.sweep,
            self.inner_start,
        );
        commands.push(PathCommand::Close);
        commands
    }

    fn push_arc(&self, commands: &mut Vec<PathCommand>, radius: f64, from: f64, delta: f64, to: Point) {
        let clockwise = delta >= 0.0;
        let chord = Point::on_circle(self.center, radius, from).distance(to);
        if delta.abs() < TAU && (chord >= MIN_ARC_CHORD || delta.abs() <= PI) {
            commands.push(PathCommand::ArcTo {
                radius,
                large_arc: self.large_arc,
                clockwise,
                to,
            });
            return;
        }
        // An arc whose endpoints coincide once serialized draws nothing, so
        // full and nearly full turns are split into pieces of at most half a
        // turn. Anything past one turn only needs the ring plus the remainder.
        let turns = delta.abs();
        let span = if turns > TAU { TAU + turns % TAU } else { turns };
        let pieces = (span / PI).ceil() as usize;
        let step = span.copysign(delta) / pieces as f64;
        for piece in 1..=pieces {
            let target = if piece == pieces {
                to
            } else {
                Point::on_circle(self.center, radius, from + step * piece as f64)
            };
            commands.push(PathCommand::ArcTo {
                radius,
                large_arc: false,
                clockwise,
                to: target,
            });
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub fill_color: String,
}

pub fn compute_legend_swatches(categories: &[Category], layout: &CardLayout) -> Vec<Swatch> {
    categories
        .iter()
        .enumerate()
        .map(|(idx, category)| Swatch {
            x: layout.legend_x(),
            y: layout.legend_row_y(idx),
            size: LEGEND_SWATCH_SIZE,
            fill_color: category.fill_color.clone(),
        })
        .collect()
}

pub fn card_segments(categories: &[Category], layout: &CardLayout) -> Vec<Segment> {
    compute_donut_segments(
        categories,
        layout.donut_center(),
        layout.outer_radius(),
        layout.inner_radius(),
        START_ANGLE,
    )
}

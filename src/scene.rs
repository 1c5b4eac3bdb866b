use crate::geometry::{CardLayout, PathCommand, card_segments, compute_legend_swatches};
use crate::model::PortfolioSnapshot;
use crate::theme::CARD_THEME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl FillRule {
    fn as_svg(self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRect {
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub commands: Vec<PathCommand>,
    pub fill: String,
    pub fill_rule: FillRule,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Background(RoundedRect),
    Segment(PathShape),
    Swatch(RectShape),
}

/// Ordered draw list for one card. Primitives paint in sequence, so the
/// background comes first.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathShape> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Segment(path) => Some(path),
            _ => None,
        })
    }

    pub fn swatches(&self) -> impl Iterator<Item = &RectShape> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Swatch(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let (width, height) = (self.width, self.height);
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n",
        ));
        for primitive in &self.primitives {
            match primitive {
                Primitive::Background(rect) => {
                    svg.push_str(&format!(
                        "<rect width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"{}\" ry=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
                        rect.width,
                        rect.height,
                        escape_xml(&rect.fill),
                        rect.corner_radius,
                        rect.corner_radius,
                        escape_xml(&rect.stroke),
                        rect.stroke_width
                    ));
                }
                Primitive::Segment(path) => {
                    svg.push_str(&format!(
                        "<path fill-rule=\"{}\" stroke=\"{}\" stroke-width=\"{}\" d=\"{}\" fill=\"{}\"/>\n",
                        path.fill_rule.as_svg(),
                        escape_xml(&path.stroke),
                        path.stroke_width,
                        path_data(&path.commands),
                        escape_xml(&path.fill)
                    ));
                }
                Primitive::Swatch(rect) => {
                    svg.push_str(&format!(
                        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
                        rect.x,
                        rect.y,
                        rect.width,
                        rect.height,
                        escape_xml(&rect.fill)
                    ));
                }
            }
        }
        svg.push_str("</svg>\n");
        svg
    }
}

pub fn compose_scene(portfolio: &PortfolioSnapshot, layout: &CardLayout) -> Scene {
    let theme = &CARD_THEME;
    let segments = card_segments(&portfolio.categories, layout);
    let swatches = compute_legend_swatches(&portfolio.categories, layout);

    let mut primitives = Vec::with_capacity(1 + segments.len() + swatches.len());
    primitives.push(Primitive::Background(RoundedRect {
        width: layout.width() as f64,
        height: layout.height() as f64,
        corner_radius: theme.corner_radius,
        fill: theme.background.to_string(),
        stroke: theme.border.to_string(),
        stroke_width: theme.border_width,
    }));
    for segment in &segments {
        primitives.push(Primitive::Segment(PathShape {
            commands: segment.path_commands(),
            fill: segment.fill_color.clone(),
            fill_rule: FillRule::EvenOdd,
            stroke: theme.segment_stroke.to_string(),
            stroke_width: theme.segment_stroke_width,
        }));
    }
    for swatch in swatches {
        primitives.push(Primitive::Swatch(RectShape {
            x: swatch.x,
            y: swatch.y,
            width: swatch.size,
            height: swatch.size,
            fill: swatch.fill_color,
        }));
    }

    tracing::debug!(
        width = layout.width(),
        height = layout.height(),
        primitives = primitives.len(),
        "composed card scene"
    );

    Scene {
        width: layout.width(),
        height: layout.height(),
        primitives,
    }
}

fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match command {
            PathCommand::MoveTo(p) => d.push_str(&format!("M {:.1},{:.1}", p.x, p.y)),
            PathCommand::LineTo(p) => d.push_str(&format!("L {:.1},{:.1}", p.x, p.y)),
            PathCommand::ArcTo {
                radius,
                large_arc,
                clockwise,
                to,
            } => d.push_str(&format!(
                "A {radius:.1},{radius:.1} 0 {} {} {:.1},{:.1}",
                u8::from(*large_arc),
                u8::from(*clockwise),
                to.x,
                to.y
            )),
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

//! Card text: what each label says, where it sits, and how glyphs are
//! painted onto the rasterized card.

use crate::geometry::{CardLayout, LEGEND_ROW_PITCH};
use crate::model::PortfolioSnapshot;
use crate::theme::{CARD_THEME, TextStyle};

#[cfg(feature = "png")]
use crate::error::Result;
#[cfg(feature = "png")]
use crate::font::{Font, FontSet};
#[cfg(feature = "png")]
use crate::raster::RenderedCard;
#[cfg(feature = "png")]
use crate::theme::Rgba;
#[cfg(feature = "png")]
use resvg::tiny_skia;

/// Points are pixels at 72 DPI.
pub const TEXT_DPI: f32 = 72.0;

const TEXT_MARGIN_X: i32 = 20;
const TITLE_BASELINE: i32 = 35;
const SUBTITLE_BASELINE: i32 = 70;
const METRIC_BASELINE: i32 = 100;
const LEGEND_TEXT_OFFSET_X: f64 = 20.0;
const LEGEND_TEXT_OFFSET_Y: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Title,
    Subtitle,
    Metric,
    Legend(usize),
}

/// One line of text, left-aligned with its baseline at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub kind: LabelKind,
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub style: TextStyle,
}

pub fn card_labels(portfolio: &PortfolioSnapshot, layout: &CardLayout) -> Vec<LabelSpec> {
    let theme = &CARD_THEME;
    let mut labels = Vec::with_capacity(3 + portfolio.categories.len());
    labels.push(LabelSpec {
        kind: LabelKind::Title,
        text: format!("{}'s NPS Tier 1 Portfolio", portfolio.display_name),
        x: TEXT_MARGIN_X,
        y: TITLE_BASELINE,
        style: theme.title,
    });
    labels.push(LabelSpec {
        kind: LabelKind::Subtitle,
        text: "All Schemes".to_string(),
        x: TEXT_MARGIN_X,
        y: SUBTITLE_BASELINE,
        style: theme.subtitle,
    });
    labels.push(LabelSpec {
        kind: LabelKind::Metric,
        text: format!(
            "XIRR : {:.1}% in last {} years",
            portfolio.return_rate_percent, portfolio.period_years
        ),
        x: TEXT_MARGIN_X,
        y: METRIC_BASELINE,
        style: theme.metric,
    });

    let legend_x = (layout.legend_x() + LEGEND_TEXT_OFFSET_X) as i32;
    let legend_base = layout.legend_base_y() as i32;
    for (idx, category) in portfolio.categories.iter().enumerate() {
        labels.push(LabelSpec {
            kind: LabelKind::Legend(idx),
            text: format!("{} : {}%", category.label, format_weight(category.weight_percent)),
            x: legend_x,
            y: legend_base + idx as i32 * LEGEND_ROW_PITCH as i32 + LEGEND_TEXT_OFFSET_Y,
            style: theme.legend,
        });
    }
    labels
}

/// `60` for whole weights, shortest round-trip form otherwise.
pub fn format_weight(weight: f64) -> String {
    if weight.is_finite() && weight.fract() == 0.0 && weight.abs() < 1e15 {
        format!("{}", weight as i64)
    } else {
        format!("{weight}")
    }
}

/// Draws `text` with its baseline starting at `(x, y)` and returns the pen
/// position after the last glyph.
#[cfg(feature = "png")]
pub fn draw_label(
    card: &mut RenderedCard,
    font: &Font,
    size_pt: f32,
    color: Rgba,
    x: f32,
    y: f32,
    text: &str,
) -> Result<f32> {
    let size_px = size_pt * TEXT_DPI / 72.0;
    let run = font.layout(text, size_px)?;
    let face = font.face()?;

    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    let pixmap = card.pixmap_mut();
    for glyph in &run.glyphs {
        let mut builder = GlyphPathBuilder::new(x + glyph.x, y, run.scale);
        if face.outline_glyph(glyph.id, &mut builder).is_none() {
            continue;
        }
        if let Some(path) = builder.finish() {
            pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }
    Ok(x + run.advance)
}

#[cfg(feature = "png")]
pub fn draw_card_labels(card: &mut RenderedCard, fonts: &FontSet<'_>, labels: &[LabelSpec]) -> Result<()> {
    for label in labels {
        draw_label(
            card,
            fonts.get(label.style.weight),
            label.style.size,
            label.style.color,
            label.x as f32,
            label.y as f32,
            &label.text,
        )?;
    }
    Ok(())
}

/// Maps font units (y up) onto the pixmap (y down) around a baseline origin.
#[cfg(feature = "png")]
struct GlyphPathBuilder {
    path: tiny_skia::PathBuilder,
    x: f32,
    y: f32,
    scale: f32,
}

#[cfg(feature = "png")]
impl GlyphPathBuilder {
    fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            path: tiny_skia::PathBuilder::new(),
            x,
            y,
            scale,
        }
    }

    fn px(&self, gx: f32) -> f32 {
        self.x + gx * self.scale
    }

    fn py(&self, gy: f32) -> f32 {
        self.y - gy * self.scale
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.path.finish()
    }
}

#[cfg(feature = "png")]
impl ttf_parser::OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.px(x), self.py(y));
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.px(x), self.py(y));
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1, x, y) = (self.px(x1), self.py(y1), self.px(x), self.py(y));
        self.path.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = (self.px(x1), self.py(y1));
        let (x2, y2) = (self.px(x2), self.py(y2));
        let (x, y) = (self.px(x), self.py(y));
        self.path.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.path.close();
    }
}

use std::path::Path;

use resvg::tiny_skia;

use crate::error::{CardError, Result};
use crate::scene::Scene;

/// Finished card pixels. Only the pipeline draws into it; afterwards it is
/// read-only.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pixmap: tiny_skia::Pixmap,
}

impl RenderedCard {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let color = px.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|err| CardError::Encode(err.to_string()))
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.pixmap
            .save_png(path)
            .map_err(|err| CardError::Encode(format!("{}: {err}", path.display())))
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut tiny_skia::Pixmap {
        &mut self.pixmap
    }
}

/// Rasterizes the scene 1:1 onto a canvas of the scene's own size.
pub fn rasterize(scene: &Scene) -> Result<RenderedCard> {
    let (width, height) = (scene.width(), scene.height());
    let mut opt = usvg::Options::default();
    if let Some(size) = usvg::Size::from_wh(width as f32, height as f32) {
        opt.default_size = size;
    }

    let svg = scene.to_svg();
    let tree = usvg::Tree::from_str(&svg, &opt)?;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(CardError::Canvas { width, height })?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap_mut);
    tracing::debug!(width, height, "rasterized card scene");
    Ok(RenderedCard { pixmap })
}

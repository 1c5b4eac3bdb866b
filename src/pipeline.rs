use std::path::Path;

use anyhow::Result;

use crate::geometry::CardLayout;
use crate::model::PortfolioSnapshot;
use crate::scene::compose_scene;

#[cfg(feature = "png")]
use crate::error::CardError;
#[cfg(feature = "png")]
use crate::font::FontSet;
#[cfg(feature = "png")]
use crate::overlay::{card_labels, draw_card_labels};
#[cfg(feature = "png")]
use crate::raster::{RenderedCard, rasterize};

/// SVG markup of the card's vector scene (chart, legend and background;
/// text is drawn only on the raster path).
pub fn render_card_svg(portfolio: &PortfolioSnapshot, layout: &CardLayout) -> String {
    compose_scene(portfolio, layout).to_svg()
}

/// Renders cards at one size with one pair of fonts.
#[cfg(feature = "png")]
#[derive(Debug, Clone, Copy)]
pub struct CardRenderer<'a> {
    layout: CardLayout,
    fonts: FontSet<'a>,
}

#[cfg(feature = "png")]
impl<'a> CardRenderer<'a> {
    pub fn new(layout: CardLayout, fonts: FontSet<'a>) -> Self {
        Self { layout, fonts }
    }

    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    pub fn render(&self, portfolio: &PortfolioSnapshot) -> Result<RenderedCard, CardError> {
        self.render_with_scene(portfolio).map(|(card, _)| card)
    }

    /// Like [`render`](Self::render), also returning the SVG the pixels were
    /// rasterized from.
    pub fn render_with_scene(
        &self,
        portfolio: &PortfolioSnapshot,
    ) -> Result<(RenderedCard, String), CardError> {
        let scene = compose_scene(portfolio, &self.layout);
        let svg = scene.to_svg();
        let mut card = rasterize(&scene)?;
        let labels = card_labels(portfolio, &self.layout);
        draw_card_labels(&mut card, &self.fonts, &labels)?;
        Ok((card, svg))
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            ensure_parent_dir(path)?;
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(card: &RenderedCard, output: &Path) -> Result<()> {
    ensure_parent_dir(output)?;
    card.save_png(output)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn sample() -> PortfolioSnapshot {
        PortfolioSnapshot {
            display_name: "TestUser".to_string(),
            return_rate_percent: 9.5,
            period_years: 2,
            categories: vec![
                Category::new("Equity", 60.0, "#4285F4"),
                Category::new("Debt", 30.0, "#34A853"),
                Category::new("Gold", 10.0, "#FBBC05"),
            ],
        }
    }

    #[test]
    fn svg_is_rendered_without_fonts() {
        let svg = render_card_svg(&sample(), &CardLayout::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("fill=\"#34A853\""));
    }

    #[test]
    fn writes_svg_into_new_directory() {
        let dir = std::env::temp_dir().join(format!("npscard-svg-{}", std::process::id()));
        let path = dir.join("nested").join("card.svg");
        let svg = render_card_svg(&sample(), &CardLayout::default());
        write_output_svg(&svg, Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), svg);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(feature = "png")]
    #[test]
    fn renders_full_card() {
        use crate::font::tests::system_sans;

        let Some(font) = system_sans() else {
            return;
        };
        let renderer = CardRenderer::new(CardLayout::default(), FontSet::new(&font, &font));
        let (card, svg) = renderer.render_with_scene(&sample()).unwrap();
        assert_eq!((card.width(), card.height()), (400, 300));
        assert_eq!(svg, render_card_svg(&sample(), renderer.layout()));

        let bare = rasterize(&compose_scene(&sample(), renderer.layout())).unwrap();
        assert_ne!(card.to_rgba(), bare.to_rgba());
        // the donut is untouched by text
        assert_eq!(card.pixel(150, 201), bare.pixel(150, 201));

        let dir = std::env::temp_dir().join(format!("npscard-png-{}", std::process::id()));
        let path = dir.join("card.png");
        write_output_png(&card, &path).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}

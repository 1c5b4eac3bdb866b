#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod font;
pub mod geometry;
pub mod model;
pub mod overlay;
pub mod pipeline;
#[cfg(feature = "png")]
pub mod raster;
pub mod scene;
pub mod theme;
pub mod validate;

#[cfg(feature = "cli")]
pub use cli::run;
pub use error::CardError;
pub use font::{Font, FontError, FontSet};
pub use geometry::{CardLayout, compute_donut_segments, compute_legend_swatches};
pub use model::{Category, PortfolioSnapshot, load_portfolio, parse_portfolio};
pub use pipeline::render_card_svg;
#[cfg(feature = "png")]
pub use pipeline::CardRenderer;
#[cfg(feature = "png")]
pub use raster::{RenderedCard, rasterize};
pub use scene::{Scene, compose_scene};
pub use validate::{ValidationReport, validate};

use crate::config::{Config, load_config};
use crate::font::{Font, FontSet};
use crate::model::load_portfolio;
use crate::pipeline::{CardRenderer, render_card_svg, write_output_png, write_output_svg};
use crate::theme::FontWeight;
use crate::validate::validate;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "npscard", version, about = "Render an NPS portfolio allocation card")]
pub struct Args {
    /// Portfolio JSON file
    #[arg(short = 'i', long = "json", default_value = "portfolio.json")]
    pub json: PathBuf,

    /// Output file (png/svg)
    #[arg(short = 'o', long = "output", default_value = "nps_card.png")]
    pub output: PathBuf,

    /// Output format
    #[arg(short = 'e', long = "format", value_enum, default_value = "png")]
    pub format: OutputFormat,

    /// Config JSON file (size and fonts)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Regular-weight TTF/OTF file
    #[arg(long = "regular-font")]
    pub regular_font: Option<PathBuf>,

    /// Bold TTF/OTF file
    #[arg(long = "bold-font")]
    pub bold_font: Option<PathBuf>,

    /// Resolve fonts from installed system fonts by family instead of files
    #[arg(long = "font-family")]
    pub font_family: Option<String>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<u32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<u32>,

    /// Also write the vector scene next to the PNG for debugging
    #[arg(long = "save-svg")]
    pub save_svg: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = resolve_config(&args)?;
    let layout = config.render.layout()?;

    let portfolio = load_portfolio(&args.json)
        .with_context(|| format!("failed to load portfolio from {}", args.json.display()))?;
    let report = validate(&portfolio);
    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }
    report.into_result()?;

    match args.format {
        OutputFormat::Svg => {
            let output = svg_path(&args.output);
            write_output_svg(&render_card_svg(&portfolio, &layout), Some(&output))?;
            tracing::info!("card scene written: {}", output.display());
        }
        OutputFormat::Png => {
            let (regular, bold) = load_fonts(&config)?;
            let renderer = CardRenderer::new(layout, FontSet::new(&regular, &bold));
            let (card, svg) = renderer.render_with_scene(&portfolio)?;
            if args.save_svg {
                let svg_output = svg_path(&args.output);
                write_output_svg(&svg, Some(&svg_output))?;
                tracing::info!("SVG version saved for debugging: {}", svg_output.display());
            }
            write_output_png(&card, &args.output)?;
            tracing::info!("card generated: {}", args.output.display());
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(path) = &args.regular_font {
        config.fonts.regular = path.clone();
    }
    if let Some(path) = &args.bold_font {
        config.fonts.bold = path.clone();
    }
    if args.font_family.is_some() {
        config.fonts.family = args.font_family.clone();
    }
    Ok(config)
}

fn load_fonts(config: &Config) -> Result<(Font, Font)> {
    if let Some(family) = config.fonts.family.as_deref() {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let regular = Font::from_database(&db, family, FontWeight::Regular)
            .context("failed to load regular font")?;
        let bold = Font::from_database(&db, family, FontWeight::Bold)
            .context("failed to load bold font")?;
        return Ok((regular, bold));
    }
    let regular = Font::from_file(&config.fonts.regular).context("failed to load regular font")?;
    let bold = Font::from_file(&config.fonts.bold).context("failed to load bold font")?;
    Ok((regular, bold))
}

/// `cards/nps_card.png` -> `cards/nps_card.svg`.
fn svg_path(output: &Path) -> PathBuf {
    output.with_extension("svg")
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::CardLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let layout = CardLayout::default();
        Self {
            width: layout.width(),
            height: layout.height(),
        }
    }
}

impl RenderConfig {
    pub fn layout(&self) -> crate::error::Result<CardLayout> {
        CardLayout::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub regular: PathBuf,
    pub bold: PathBuf,
    /// When set, fonts are resolved from the system font database by family
    /// instead of being read from `regular`/`bold`.
    pub family: Option<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: PathBuf::from("assets/fonts/Poppins-Regular.ttf"),
            bold: PathBuf::from("assets/fonts/Poppins-Bold.ttf"),
            family: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub render: RenderConfig,
    pub fonts: FontConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    width: Option<u32>,
    height: Option<u32>,
    fonts: Option<FontConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FontConfigFile {
    regular: Option<PathBuf>,
    bold: Option<PathBuf>,
    family: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(v) = parsed.width {
        config.render.width = v;
    }
    if let Some(v) = parsed.height {
        config.render.height = v;
    }
    if let Some(fonts) = parsed.fonts {
        if let Some(v) = fonts.regular {
            config.fonts.regular = v;
        }
        if let Some(v) = fonts.bold {
            config.fonts.bold = v;
        }
        if fonts.family.is_some() {
            config.fonts.family = fonts.family;
        }
    }
}

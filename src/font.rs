use std::path::Path;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use thiserror::Error;
use ttf_parser::{Face, FaceParsingError, GlyphId};

use crate::theme::FontWeight;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot load font from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse font from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: FaceParsingError,
    },

    #[error("no installed font matches {0}")]
    NotFound(String),
}

/// An outline font held in memory. Fonts are loaded once by the caller and
/// only ever borrowed by the renderer.
#[derive(Debug, Clone)]
pub struct Font {
    data: Vec<u8>,
    index: u32,
    origin: String,
    units_per_em: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub id: GlyphId,
    /// Pen offset from the run origin, in pixels.
    pub x: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub glyphs: Vec<PositionedGlyph>,
    pub advance: f32,
    pub scale: f32,
}

impl Font {
    pub fn from_bytes(data: Vec<u8>, index: u32, origin: impl Into<String>) -> Result<Self, FontError> {
        let origin = origin.into();
        let units_per_em = match Face::parse(&data, index) {
            Ok(face) => face.units_per_em().max(1),
            Err(source) => return Err(FontError::Parse { origin, source }),
        };
        Ok(Self {
            data,
            index,
            origin,
            units_per_em,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(data, 0, path.display().to_string())
    }

    /// Resolves a CSS-like family list (`"Poppins, sans-serif"`) against the
    /// installed system fonts.
    pub fn from_system(font_family: &str, weight: FontWeight) -> Result<Self, FontError> {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::from_database(&db, font_family, weight)
    }

    pub fn from_database(db: &Database, font_family: &str, weight: FontWeight) -> Result<Self, FontError> {
        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names.iter().map(|name| generic_family(name)).collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        let query = Query {
            families: &families,
            weight: match weight {
                FontWeight::Regular => Weight::NORMAL,
                FontWeight::Bold => Weight::BOLD,
            },
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = db
            .query(&query)
            .ok_or_else(|| FontError::NotFound(font_family.to_string()))?;
        let origin = format!("system font '{font_family}' ({weight:?})");
        db.with_face_data(id, |data, index| Self::from_bytes(data.to_vec(), index, origin.clone()))
            .unwrap_or_else(|| Err(FontError::NotFound(font_family.to_string())))
    }

    pub fn face(&self) -> Result<Face<'_>, FontError> {
        Face::parse(&self.data, self.index).map_err(|source| FontError::Parse {
            origin: self.origin.clone(),
            source,
        })
    }

    /// Positions each character of a single line at `size_px`, applying
    /// horizontal kerning. Unmapped characters use glyph 0 (`.notdef`).
    pub fn layout(&self, text: &str, size_px: f32) -> Result<GlyphRun, FontError> {
        let face = self.face()?;
        let scale = size_px / self.units_per_em as f32;
        let mut glyphs = Vec::with_capacity(text.len());
        let mut pen = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = face.glyph_index(ch).unwrap_or(GlyphId(0));
            if let Some(left) = previous {
                pen += kerning(&face, left, id) as f32 * scale;
            }
            glyphs.push(PositionedGlyph { id, x: pen });
            pen += face.glyph_hor_advance(id).unwrap_or(0) as f32 * scale;
            previous = Some(id);
        }
        Ok(GlyphRun {
            glyphs,
            advance: pen.max(0.0),
            scale,
        })
    }

    pub fn measure_width(&self, text: &str, size_px: f32) -> Result<f32, FontError> {
        if text.is_empty() || size_px <= 0.0 {
            return Ok(0.0);
        }
        Ok(self.layout(text, size_px)?.advance)
    }
}

/// Regular and bold faces for one card.
#[derive(Debug, Clone, Copy)]
pub struct FontSet<'a> {
    pub regular: &'a Font,
    pub bold: &'a Font,
}

impl<'a> FontSet<'a> {
    pub fn new(regular: &'a Font, bold: &'a Font) -> Self {
        Self { regular, bold }
    }

    pub fn get(&self, weight: FontWeight) -> &'a Font {
        match weight {
            FontWeight::Regular => self.regular,
            FontWeight::Bold => self.bold,
        }
    }
}

fn generic_family<'a>(name: &'a str) -> Family<'a> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

fn kerning(face: &Face<'_>, left: GlyphId, right: GlyphId) -> i16 {
    let Some(kern) = face.tables().kern else {
        return 0;
    };
    kern.subtables
        .into_iter()
        .filter(|subtable| subtable.horizontal && !subtable.variable)
        .find_map(|subtable| subtable.glyphs_kerning(left, right))
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// First installed sans-serif face, if the host has any fonts at all.
    pub(crate) fn system_sans() -> Option<Font> {
        match Font::from_system("DejaVu Sans, Liberation Sans, Arial, sans-serif", FontWeight::Regular) {
            Ok(font) => Some(font),
            Err(err) => {
                eprintln!("skipping font test: {err}");
                None
            }
        }
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = Font::from_bytes(vec![0u8; 16], 0, "garbage").unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));
        assert!(err.to_string().contains("garbage"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Font::from_file(Path::new("/nonexistent/Poppins-Regular.ttf")).unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
    }

    #[test]
    fn empty_database_finds_nothing() {
        let db = Database::new();
        let err = Font::from_database(&db, "Poppins", FontWeight::Bold).unwrap_err();
        assert!(matches!(err, FontError::NotFound(_)));
    }

    #[test]
    fn generic_families_map_to_fontdb() {
        assert!(matches!(generic_family("sans-serif"), Family::SansSerif));
        assert!(matches!(generic_family("Monospace"), Family::Monospace));
        assert!(matches!(generic_family("Poppins"), Family::Name("Poppins")));
    }

    #[test]
    fn measures_text_with_system_font() {
        let Some(font) = system_sans() else {
            return;
        };
        assert_eq!(font.measure_width("", 14.0).unwrap(), 0.0);
        let short = font.measure_width("Gold", 14.0).unwrap();
        let long = font.measure_width("Gold : 10%", 14.0).unwrap();
        assert!(short > 0.0);
        assert!(long > short);
        let doubled = font.measure_width("Gold", 28.0).unwrap();
        assert!((doubled - short * 2.0).abs() < 0.01);

        let run = font.layout("ab", 14.0).unwrap();
        assert_eq!(run.glyphs.len(), 2);
        assert_eq!(run.glyphs[0].x, 0.0);
        assert!(run.glyphs[1].x > 0.0);
    }
}

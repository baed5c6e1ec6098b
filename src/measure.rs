//! Text width measurement for anchoring floating surfaces
//!
//! The position estimator only needs the rendered width of a single line of
//! text in the surface's font. That capability sits behind [`TextMeasurer`] so
//! hosts can plug in their own shaping and tests can use fixed widths.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use serde::{Deserialize, Serialize};

/// Font weight at or above which the bold face is used
pub const BOLD_WEIGHT: u16 = 600;

/// Computed font of the editable surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default = "default_family")]
    pub family: String,
    /// Font size in pixels
    #[serde(default = "default_size")]
    pub size: f32,
    /// CSS-style numeric weight (400 regular, 700 bold)
    #[serde(default = "default_weight")]
    pub weight: u16,
}

fn default_family() -> String {
    "Inter".to_string()
}

fn default_size() -> f32 {
    16.0
}

fn default_weight() -> u16 {
    400
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: default_family(),
            size: default_size(),
            weight: default_weight(),
        }
    }
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32, weight: u16) -> Self {
        Self {
            family: family.into(),
            size,
            weight,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= BOLD_WEIGHT
    }
}

/// Measures the rendered pixel width of a run of text.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Every character advances by the same width, scaled by font size.
///
/// `advance` is the width of one character at 16px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthMeasurer {
    pub advance: f32,
}

impl FixedWidthMeasurer {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl TextMeasurer for FixedWidthMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * self.advance * (font.size / 16.0)
    }
}

// Advance cache key: (character, font_size as bits, bold face)
type AdvanceKey = (char, u32, bool);

/// Measures with real glyph advances from a TrueType/OpenType face.
pub struct FontdueMeasurer {
    regular: Font,
    bold: Option<Font>,
    advances: RefCell<HashMap<AdvanceKey, f32>>,
}

impl std::fmt::Debug for FontdueMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueMeasurer")
            .field("has_bold", &self.bold.is_some())
            .field("cached_advances", &self.advances.borrow().len())
            .finish()
    }
}

impl FontdueMeasurer {
    /// Build a measurer from raw font bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let regular = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to load font: {}", e))?;
        Ok(Self {
            regular,
            bold: None,
            advances: RefCell::new(HashMap::new()),
        })
    }

    /// Load a measurer from a font file
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        Self::from_bytes(&bytes)
    }

    /// Attach a bold face used for weights >= [`BOLD_WEIGHT`]
    pub fn with_bold_bytes(mut self, bytes: &[u8]) -> Result<Self> {
        let bold = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to load bold font: {}", e))?;
        self.bold = Some(bold);
        self.advances.get_mut().clear();
        Ok(self)
    }

    /// Attach a bold face loaded from a font file
    pub fn with_bold_path(self, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        self.with_bold_bytes(&bytes)
    }

    /// Try to create a measurer; any failure means no measurement context.
    pub fn load(path: Option<&Path>, bold_path: Option<&Path>) -> Option<Self> {
        let path = path?;
        let measurer = match Self::from_path(path) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("No text measurer available: {:#}", e);
                return None;
            }
        };
        match bold_path {
            Some(bold) => match measurer.with_bold_path(bold) {
                Ok(m) => Some(m),
                Err(e) => {
                    tracing::warn!("Bold face unavailable, measuring with regular: {:#}", e);
                    Self::from_path(path).ok()
                }
            },
            None => Some(measurer),
        }
    }
}

impl TextMeasurer for FontdueMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        let use_bold = font.is_bold() && self.bold.is_some();
        let face = match (&self.bold, use_bold) {
            (Some(bold), true) => bold,
            _ => &self.regular,
        };

        let mut cache = self.advances.borrow_mut();
        text.chars()
            .map(|ch| {
                *cache
                    .entry((ch, font.size.to_bits(), use_bold))
                    .or_insert_with(|| face.metrics(ch, font.size).advance_width)
            })
            .sum()
    }
}

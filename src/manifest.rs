//! Wire types for sprite-sheet manifests.
//!
//! A manifest is a flat JSON object mapping sprite keys to image values:
//! PNG data URLs in the raster rendition, literal SVG markup in the vector
//! rendition. There is no schema or version field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::mode::RenderMode;

/// A fetched manifest: sprite key to image value.
///
/// Transient; consumed by one merge into the registry and discarded.
pub type Manifest = HashMap<String, String>;

/// Descriptor naming both renditions of one sprite sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    /// URL of the vector manifest.
    pub svg: String,
    /// URL of the raster manifest.
    pub png: String,
}

impl SpriteSheet {
    /// Create a descriptor from the two manifest URLs.
    pub fn new(svg: impl Into<String>, png: impl Into<String>) -> Self {
        Self {
            svg: svg.into(),
            png: png.into(),
        }
    }

    /// The manifest URL to fetch under `mode`.
    pub fn url_for(&self, mode: RenderMode) -> &str {
        match mode {
            RenderMode::Vector => &self.svg,
            RenderMode::Raster => &self.png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_mode() {
        let sheet = SpriteSheet::new("https://cdn.test/icons.svg.json", "https://cdn.test/icons.png.json");
        assert_eq!(sheet.url_for(RenderMode::Vector), "https://cdn.test/icons.svg.json");
        assert_eq!(sheet.url_for(RenderMode::Raster), "https://cdn.test/icons.png.json");
    }

    #[test]
    fn test_sheet_from_json() {
        let sheet: SpriteSheet = serde_json::from_str(
            r#"{"svg": "/sprites/app.svg.json", "png": "/sprites/app.png.json"}"#,
        )
        .unwrap();
        assert_eq!(sheet.svg, "/sprites/app.svg.json");
        assert_eq!(sheet.png, "/sprites/app.png.json");
    }

    #[test]
    fn test_manifest_decodes_string_map() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"play": "<svg/>", "stop": "<svg/>"}"#).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest["play"], "<svg/>");
    }

    #[test]
    fn test_manifest_rejects_non_string_values() {
        let result: Result<Manifest, _> = serde_json::from_str(r#"{"play": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_rejects_non_object() {
        let result: Result<Manifest, _> = serde_json::from_str(r#"["play"]"#);
        assert!(result.is_err());
    }
}

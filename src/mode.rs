//! Render mode selection.

use serde::{Deserialize, Serialize};

/// How image values are fetched and rendered.
///
/// The mode is chosen once by the host at startup, typically from a
/// capability probe of the target environment, and injected wherever sprites
/// are loaded or bound. It decides which manifest URL a
/// [`SpriteSheet`](crate::manifest::SpriteSheet) resolves to and whether
/// cached values render as inline markup or image references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Values are inline vector markup; manifests come from the `svg` URL.
    #[default]
    Vector,
    /// Values are raster data URLs; manifests come from the `png` URL.
    Raster,
}

impl RenderMode {
    /// Map the result of a host-side vector-support probe onto a mode.
    pub fn from_vector_support(supported: bool) -> Self {
        if supported {
            RenderMode::Vector
        } else {
            RenderMode::Raster
        }
    }

    /// Whether values render as inline vector markup.
    pub fn is_vector(self) -> bool {
        matches!(self, RenderMode::Vector)
    }
}

//! Media Model
//!
//! Images are stored outside the catalog, keyed by
//! `(product_id, variant_id, kind)`. Only the folder naming lives here.

use serde::{Deserialize, Serialize};

/// Per-variant image folder kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Gallery,
    Thumbnail,
}

impl ImageKind {
    /// Every kind a variant may own
    pub const ALL: [ImageKind; 2] = [ImageKind::Gallery, ImageKind::Thumbnail];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Gallery => "gallery",
            ImageKind::Thumbnail => "thumbnail",
        }
    }

    /// Folder name of a variant's images of this kind: `{variant_id}_{kind}`
    pub fn variant_folder(&self, variant_id: i64) -> String {
        format!("{}_{}", variant_id, self.as_str())
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

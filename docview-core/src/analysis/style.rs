use std::collections::BTreeMap;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::{analysis::category::Category, consts::OVERLAY_ALPHA};

/// Category → RGBA tint table used by the overlay renderer.
///
/// Categories missing from the table are not painted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryStyle {
    tints: BTreeMap<Category, [u8; 4]>,
}

impl Default for CategoryStyle {
    fn default() -> Self {
        Category::ORDER
            .iter()
            .map(|category| {
                let [r, g, b] = category.color();
                (*category, Rgba([r, g, b, OVERLAY_ALPHA]))
            })
            .collect()
    }
}

impl CategoryStyle {
    /// A table without any tint; nothing gets painted with it.
    pub fn empty() -> Self {
        Self {
            tints: BTreeMap::new(),
        }
    }

    pub fn tint(&self, category: Category) -> Option<Rgba<u8>> {
        self.tints.get(&category).copied().map(Rgba)
    }

    pub fn with_tint(mut self, category: Category, tint: Rgba<u8>) -> Self {
        self.tints.insert(category, tint.0);
        self
    }

    pub fn without(mut self, category: Category) -> Self {
        self.tints.remove(&category);
        self
    }

    /// Legend entries in paint order: (label, `#rrggbb`).
    pub fn legend(&self) -> Vec<(&'static str, String)> {
        self.tints
            .iter()
            .map(|(category, tint)| (category.name(), rgba_to_hex(Rgba(*tint))))
            .collect()
    }
}

impl FromIterator<(Category, Rgba<u8>)> for CategoryStyle {
    fn from_iter<T: IntoIterator<Item = (Category, Rgba<u8>)>>(iter: T) -> Self {
        Self {
            tints: iter.into_iter().map(|(category, tint)| (category, tint.0)).collect(),
        }
    }
}

/// `#rrggbb` form of a tint; alpha is dropped.
pub fn rgba_to_hex(rgba: Rgba<u8>) -> String {
    let [r, g, b, _] = rgba.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}

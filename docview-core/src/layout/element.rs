use serde::Serialize;

use crate::analysis::{bbox::BoundingBox, category::Category};

/// A single detected region on a page.
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct Region {
    pub category: Category,
    pub bbox: BoundingBox,
}

/// All regions of one category on a page, in the order the extraction
/// result listed them.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct RegionGroup {
    pub category: Category,
    pub boxes: Vec<BoundingBox>,
}

impl RegionGroup {
    pub fn new(category: Category, boxes: Vec<BoundingBox>) -> Self {
        Self { category, boxes }
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Groups loose regions per category, ordered by paint order.
pub fn group_regions<I: IntoIterator<Item = Region>>(regions: I) -> Vec<RegionGroup> {
    let mut groups: Vec<RegionGroup> = Vec::new();

    for region in regions {
        match groups.iter_mut().find(|g| g.category == region.category) {
            Some(group) => group.boxes.push(region.bbox),
            None => groups.push(RegionGroup::new(region.category, vec![region.bbox])),
        }
    }

    groups.sort_by_key(|group| group.category);
    groups
}

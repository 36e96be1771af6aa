use glam::UVec2;
use image::{DynamicImage, GenericImageView, RgbaImage};
use imageproc::drawing::{Blend, draw_filled_rect_mut};
use snafu::ensure;
use tracing::*;

use crate::{
    analysis::style::CategoryStyle,
    error::*,
    layout::element::{Region, RegionGroup, group_regions},
};

/// Paints category tinted rectangles over a page image.
///
/// Each region is drawn as a flat, semi-transparent rectangle and
/// alpha-composited ("over") onto what is already there, so overlapping
/// regions layer instead of overwriting each other. Groups are painted in
/// category order no matter how they are passed in, which keeps e.g. a footer
/// visible on top of the text block containing it.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    style: CategoryStyle,
}

impl OverlayRenderer {
    pub fn new(style: CategoryStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &CategoryStyle {
        &self.style
    }

    /// Renders `groups` over a copy of `base`.
    ///
    /// # Arguments
    ///
    /// * `base` - The page image; converted to RGBA, never modified
    /// * `groups` - Regions per category, fractional coordinates
    ///
    /// # Returns
    ///
    /// * `Ok(RgbaImage)` - A new image of the same size with all overlays
    /// * `Err(ViewerError)` - The base image has no pixels
    ///
    /// Boxes reaching outside the image are clipped, empty boxes and
    /// categories without a tint are skipped.
    pub fn render(
        &self,
        base: &DynamicImage,
        groups: &[RegionGroup],
    ) -> Result<RgbaImage, ViewerError> {
        let (width, height) = base.dimensions();
        ensure!(
            width > 0 && height > 0,
            InvalidInputSnafu {
                stage: "overlay",
                message: format!("base image is {width}x{height}"),
            }
        );

        let size = UVec2::new(width, height);
        let mut canvas = Blend(base.to_rgba8());

        let mut ordered: Vec<&RegionGroup> = groups.iter().collect();
        ordered.sort_by_key(|group| group.category);

        let mut painted = 0usize;
        let mut covered = 0u64;
        for group in ordered {
            let Some(tint) = self.style.tint(group.category) else {
                debug!("no tint for {:?}, skip {} regions", group.category, group.len());
                continue;
            };

            for bbox in &group.boxes {
                let pixels = bbox.to_pixel_rect(size);
                let Some(rect) = pixels.to_rect() else {
                    trace!("skip empty {:?} region {:?}", group.category, bbox);
                    continue;
                };

                draw_filled_rect_mut(&mut canvas, rect, tint);
                painted += 1;
                covered += pixels.area();
            }
        }

        debug!("painted {painted} regions ({covered} px) on {width}x{height} image");
        Ok(canvas.0)
    }

    /// Same as [`OverlayRenderer::render`] for regions not grouped yet.
    pub fn render_regions(
        &self,
        base: &DynamicImage,
        regions: &[Region],
    ) -> Result<RgbaImage, ViewerError> {
        self.render(base, &group_regions(regions.iter().copied()))
    }
}

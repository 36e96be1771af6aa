use glam::UVec2;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

/// A bounding box expressed as fractions of the page image size.
///
/// This is the geometry the extraction pipeline emits for every block: the
/// origin is the top-left corner of the page, `left`/`width` are relative to
/// the page width and `top`/`height` to the page height. Values are expected
/// to lie in `[0, 1]` with `left + width <= 1` and `top + height <= 1`, but
/// nothing enforces it; [`BoundingBox::to_pixel_rect`] clips instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Creates a new fractional bounding box.
    ///
    /// # Example
    /// ```
    /// use docview_core::analysis::bbox::BoundingBox;
    /// let bbox = BoundingBox::new(0.1, 0.1, 0.2, 0.05);
    /// assert_eq!(bbox.width, 0.2);
    /// ```
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Converts the fractional box to the pixel rectangle painted for an image
    /// of the given size, clipped to the image bounds.
    ///
    /// # Arguments
    /// * `image_size` - The image dimensions in pixels (width, height)
    ///
    /// # Conversion
    /// - `left = floor(W * left)`, `top = floor(H * top)`
    /// - `right = left + floor(W * width)`, `bottom = top + floor(H * height)`
    /// - all four are clamped to `[0, W]` / `[0, H]`
    /// - columns `left..=right` and rows `top..=bottom` are covered, clipped
    ///   to `[0, W - 1]` / `[0, H - 1]`
    ///
    /// A box whose clamped width or height is zero covers nothing. Non-finite
    /// inputs count as zero. The result may be empty, see
    /// [`PixelRect::is_empty`].
    ///
    /// # Example
    /// ```
    /// use glam::UVec2;
    /// use docview_core::analysis::bbox::BoundingBox;
    /// let bbox = BoundingBox::new(0.1, 0.1, 0.2, 0.05);
    /// let rect = bbox.to_pixel_rect(UVec2::new(1000, 2000));
    /// assert_eq!(rect.min, UVec2::new(100, 200));
    /// assert_eq!(rect.max, UVec2::new(301, 301));
    /// ```
    pub fn to_pixel_rect(&self, image_size: UVec2) -> PixelRect {
        let (w, h) = (image_size.x, image_size.y);

        let left = scaled_floor(w, self.left);
        let top = scaled_floor(h, self.top);
        let right = left.saturating_add(scaled_floor(w, self.width));
        let bottom = top.saturating_add(scaled_floor(h, self.height));

        let min = UVec2::new(clamp_to(left, w), clamp_to(top, h));
        let far = UVec2::new(clamp_to(right, w), clamp_to(bottom, h));
        if far.x <= min.x || far.y <= min.y {
            return PixelRect { min, max: min };
        }

        // the far edge itself is painted too
        PixelRect {
            min,
            max: UVec2::new(far.x.saturating_add(1).min(w), far.y.saturating_add(1).min(h)),
        }
    }
}

/// `floor(extent * fraction)`, with non-finite results mapped to zero.
fn scaled_floor(extent: u32, fraction: f64) -> i64 {
    let value = (extent as f64 * fraction).floor();
    if value.is_finite() { value as i64 } else { 0 }
}

fn clamp_to(value: i64, upper: u32) -> u32 {
    value.clamp(0, upper as i64) as u32
}

/// A pixel rectangle covering `min.x <= x < max.x`, `min.y <= y < max.y`.
///
/// Built by [`BoundingBox::to_pixel_rect`], so `max` is one past the far
/// edge of the box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Top-left corner (inclusive).
    pub min: UVec2,
    /// Bottom-right corner (exclusive).
    pub max: UVec2,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn height(&self) -> u32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// True when the rectangle covers no pixel at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The equivalent `imageproc` rectangle, or `None` when empty.
    pub fn to_rect(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }

        Some(Rect::at(self.min.x as i32, self.min.y as i32).of_size(self.width(), self.height()))
    }
}

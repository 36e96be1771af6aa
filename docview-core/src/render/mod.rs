pub mod overlay;
pub mod page;

pub use overlay::OverlayRenderer;
pub use page::{PageRasterizer, Rasterize};

pub mod analysis;
pub mod config;
pub mod consts;
pub mod error;
pub mod fetch;
pub mod index;
pub mod layout;
pub mod render;
pub mod result;
pub mod viewer;

// Re-export commonly used types
pub use analysis::{bbox::BoundingBox, category::Category, style::CategoryStyle};
pub use config::ViewerConfig;
pub use error::{ErrorKind, ViewerError};
pub use fetch::{Fetch, HttpFetcher, LocalFetcher};
pub use index::ResultIndex;
pub use render::{OverlayRenderer, PageRasterizer, Rasterize};
pub use viewer::{FileView, FolderReport, Viewer};

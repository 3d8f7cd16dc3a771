/// Downloadable report: statistics table plus a PNG of the current chart,
/// packed into one self-contained HTML document.
pub mod export;
pub mod raster;

pub use export::{build_export_link, decode_export_link, REPORT_FILE_NAME};
pub use raster::{PlottersRasterizer, Rasterize};

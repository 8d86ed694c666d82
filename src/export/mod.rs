//! PDF export of the rendered survey
//!
//! - `traits`: the rasterizer and page-document capabilities
//! - `pipeline`: capture, paginate and save, one export at a time
//! - `raster`: terminal buffer to bitmap
//! - `pdf`: `printpdf`-backed page documents

mod pdf;
mod pipeline;
mod raster;
mod traits;

pub use pdf::PrintPdfAssembler;
pub use pipeline::{ExportOutcome, ExportPipeline, EXPORT_FILE_NAME};
pub use raster::BufferRasterizer;
pub use traits::{DocumentAssembler, ExportError, Rasterizer};

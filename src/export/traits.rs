//! Capabilities the export pipeline depends on
//!
//! Injected as trait objects so tests can substitute mocks and the app can
//! run with a capability missing.

use crate::ui::FormContainer;
use async_trait::async_trait;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while exporting the form
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF capability not available: {0}")]
    MissingCapability(&'static str),
    #[error("failed to capture the form: {0}")]
    Capture(String),
    #[error("captured image is empty")]
    EmptyCapture,
    #[error("failed to assemble the document: {0}")]
    Assemble(String),
    #[error("failed to save {}: {message}", path.display())]
    Save { path: PathBuf, message: String },
}

impl ExportError {
    /// Message shown to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCapability(_) => {
                "La librería para generar PDF no está cargada. Por favor, intente de nuevo."
            }
            _ => "Ocurrió un error al generar el PDF.",
        }
    }
}

/// Page dimensions in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Orientation and size of every page in a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub size: PageSize,
}

impl PageLayout {
    /// A4 portrait, 210 × 297 mm
    pub const A4_PORTRAIT: Self = Self {
        size: PageSize {
            width: 210.0,
            height: 297.0,
        },
    };
}

/// Where an image lands on the current page, in millimetres from the top-left
/// corner. Offsets may be negative and sizes may exceed the page; whatever
/// falls outside the page is clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Turns the rendered form into a bitmap
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Capture the container at `scale` times its natural pixel size
    async fn rasterize(&self, container: &FormContainer, scale: u32)
        -> Result<RgbaImage, ExportError>;
}

/// Creates paged documents
#[cfg_attr(test, mockall::automock)]
pub trait DocumentAssembler: Send + Sync {
    fn create(&self, layout: PageLayout) -> Result<Box<dyn PageDocument>, ExportError>;
}

/// A paged document being assembled; starts with one page
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageDocument: Send {
    fn page_size(&self) -> PageSize;

    /// Place an image on the current page
    fn add_image(&mut self, image: Arc<RgbaImage>, placement: Placement);

    /// Append a page and make it current
    fn add_page(&mut self);

    /// Write the document, returning where it was saved
    async fn save(&mut self, file_name: &str) -> Result<PathBuf, ExportError>;
}

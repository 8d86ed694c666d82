//! Snapshot-to-PDF export pipeline
//!
//! `Idle -> Capturing -> RenderingPages -> Saving -> Idle`, with a single
//! in-flight export at a time.

use super::traits::{
    DocumentAssembler, ExportError, PageDocument, PageLayout, Placement, Rasterizer,
};
use crate::ui::FormContainer;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Name of the saved document
pub const EXPORT_FILE_NAME: &str = "Relevamiento_Socio-Urbano.pdf";

/// Capture scale factor
pub const RASTER_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    Idle,
    Capturing,
    RenderingPages,
    Saving,
}

/// How an export request ended, short of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { path: PathBuf, pages: usize },
    /// Another export was in flight; nothing was done
    Busy,
    /// There was nothing mounted to capture
    NoContainer,
}

/// Exports the rendered form as a paginated PDF
#[derive(Clone)]
pub struct ExportPipeline {
    rasterizer: Option<Arc<dyn Rasterizer>>,
    assembler: Option<Arc<dyn DocumentAssembler>>,
    phase: Arc<Mutex<ExportPhase>>,
}

impl ExportPipeline {
    pub fn new(
        rasterizer: Option<Arc<dyn Rasterizer>>,
        assembler: Option<Arc<dyn DocumentAssembler>>,
    ) -> Self {
        Self {
            rasterizer,
            assembler,
            phase: Arc::new(Mutex::new(ExportPhase::Idle)),
        }
    }

    pub fn phase(&self) -> ExportPhase {
        *lock(&self.phase)
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != ExportPhase::Idle
    }

    /// Capture `container` and save it as a multi-page PDF.
    ///
    /// The container's controls are hidden while it is captured and visible
    /// again afterwards, whatever the result.
    pub async fn export(
        &self,
        container: Option<FormContainer>,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(container) = container else {
            tracing::warn!("export requested but no form container is mounted");
            return Ok(ExportOutcome::NoContainer);
        };
        let Some(flight) = InFlight::begin(&self.phase) else {
            tracing::debug!("export already in progress");
            return Ok(ExportOutcome::Busy);
        };

        let rasterizer = self.rasterizer.as_ref();
        let assembler = self.assembler.as_ref();
        let (Some(rasterizer), Some(assembler)) = (rasterizer, assembler) else {
            let missing = if rasterizer.is_none() {
                "rasterizer"
            } else {
                "document assembler"
            };
            tracing::warn!("cannot export: {missing} unavailable");
            return Err(ExportError::MissingCapability(missing));
        };

        tracing::debug!("capturing form at {} columns", container.width());
        let bitmap = {
            let _hidden = container.controls().hide();
            rasterizer.rasterize(&container, RASTER_SCALE).await
        };
        let bitmap = bitmap.inspect_err(|e| tracing::error!("capture failed: {e}"))?;
        if bitmap.width() == 0 || bitmap.height() == 0 {
            tracing::error!("capture produced an empty image");
            return Err(ExportError::EmptyCapture);
        }

        flight.advance(ExportPhase::RenderingPages);
        let mut document = assembler
            .create(PageLayout::A4_PORTRAIT)
            .inspect_err(|e| tracing::error!("{e}"))?;
        let pages = paginate(document.as_mut(), Arc::new(bitmap))?;

        flight.advance(ExportPhase::Saving);
        let path = document
            .save(EXPORT_FILE_NAME)
            .await
            .inspect_err(|e| tracing::error!("{e}"))?;

        tracing::info!("exported {pages} page(s) to {}", path.display());
        Ok(ExportOutcome::Saved { path, pages })
    }
}

/// Vertical offsets (mm) at which the full image is placed, one per page.
///
/// The first page shows the top of the image; each following page shifts it
/// up by one page height until the whole height has been shown.
pub fn page_offsets(total_height: f64, page_height: f64) -> Vec<f64> {
    let mut position = 0.0;
    let mut height_left = total_height;
    let mut offsets = vec![position];
    height_left -= page_height;

    while height_left > 0.0 {
        position -= page_height;
        offsets.push(position);
        height_left -= page_height;
    }
    offsets
}

/// Lay the bitmap across as many pages as its scaled height needs
pub fn paginate(
    document: &mut dyn PageDocument,
    bitmap: Arc<RgbaImage>,
) -> Result<usize, ExportError> {
    let page = document.page_size();
    if page.width <= 0.0 || page.height <= 0.0 {
        return Err(ExportError::Assemble(format!(
            "invalid page size {} x {} mm",
            page.width, page.height
        )));
    }

    let total_height = page.width * f64::from(bitmap.height()) / f64::from(bitmap.width());
    let offsets = page_offsets(total_height, page.height);
    tracing::debug!(
        "paginating {}x{} px image: {total_height:.1} mm over {} page(s)",
        bitmap.width(),
        bitmap.height(),
        offsets.len()
    );

    for (index, &y) in offsets.iter().enumerate() {
        if index > 0 {
            document.add_page();
        }
        document.add_image(
            Arc::clone(&bitmap),
            Placement {
                x: 0.0,
                y,
                width: page.width,
                height: total_height,
            },
        );
    }
    Ok(offsets.len())
}

fn lock(phase: &Mutex<ExportPhase>) -> MutexGuard<'_, ExportPhase> {
    phase.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the pipeline out of `Idle`; resets it on drop
struct InFlight<'a> {
    phase: &'a Mutex<ExportPhase>,
}

impl<'a> InFlight<'a> {
    fn begin(phase: &'a Mutex<ExportPhase>) -> Option<Self> {
        let mut current = lock(phase);
        if *current != ExportPhase::Idle {
            return None;
        }
        *current = ExportPhase::Capturing;
        Some(Self { phase })
    }

    fn advance(&self, next: ExportPhase) {
        *lock(self.phase) = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *lock(self.phase) = ExportPhase::Idle;
    }
}

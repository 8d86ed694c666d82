//! PDF page documents backed by `printpdf`

use super::traits::{
    DocumentAssembler, ExportError, PageDocument, PageLayout, PageSize, Placement,
};
use async_trait::async_trait;
use image::{imageops, RgbaImage};
use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument,
    PdfLayerReference, Px,
};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const LAYER_NAME: &str = "Layer 1";
const MM_PER_INCH: f64 = 25.4;

/// Writes portrait PDFs into a fixed output directory
#[derive(Debug, Clone)]
pub struct PrintPdfAssembler {
    output_dir: PathBuf,
    title: String,
}

impl PrintPdfAssembler {
    pub fn new(output_dir: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            title: title.into(),
        }
    }
}

impl DocumentAssembler for PrintPdfAssembler {
    fn create(&self, layout: PageLayout) -> Result<Box<dyn PageDocument>, ExportError> {
        if layout.size.width <= 0.0 || layout.size.height <= 0.0 {
            return Err(ExportError::Assemble(format!(
                "invalid page size {} x {} mm",
                layout.size.width, layout.size.height
            )));
        }
        Ok(Box::new(PrintPdfDocument {
            size: layout.size,
            output_dir: self.output_dir.clone(),
            title: self.title.clone(),
            pages: vec![Vec::new()],
        }))
    }
}

/// Records pages and placements; the PDF itself is built on save
#[derive(Debug)]
pub struct PrintPdfDocument {
    size: PageSize,
    output_dir: PathBuf,
    title: String,
    pages: Vec<Vec<(Arc<RgbaImage>, Placement)>>,
}

#[async_trait]
impl PageDocument for PrintPdfDocument {
    fn page_size(&self) -> PageSize {
        self.size
    }

    fn add_image(&mut self, image: Arc<RgbaImage>, placement: Placement) {
        if let Some(page) = self.pages.last_mut() {
            page.push((image, placement));
        }
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    async fn save(&mut self, file_name: &str) -> Result<PathBuf, ExportError> {
        let path = self.output_dir.join(file_name);
        let pages = std::mem::take(&mut self.pages);
        let size = self.size;
        let title = self.title.clone();

        let target = path.clone();
        tokio::task::spawn_blocking(move || write_pdf(&target, &title, size, &pages))
            .await
            .map_err(|e| ExportError::Save {
                path: path.clone(),
                message: e.to_string(),
            })??;
        Ok(path)
    }
}

fn write_pdf(
    path: &Path,
    title: &str,
    size: PageSize,
    pages: &[Vec<(Arc<RgbaImage>, Placement)>],
) -> Result<(), ExportError> {
    let save_error = |message: String| ExportError::Save {
        path: path.to_path_buf(),
        message,
    };

    let (width, height) = (Mm(size.width as f32), Mm(size.height as f32));
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);

    for (index, placements) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(width, height, LAYER_NAME);
            doc.get_page(page).get_layer(layer)
        };
        for (image, placement) in placements {
            place_image(&layer, image, *placement, size);
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| save_error(e.to_string()))?;
    }
    let file = File::create(path).map_err(|e| save_error(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| save_error(e.to_string()))?;
    Ok(())
}

/// Part of an image that falls on the page, in source pixel rows and page mm
#[derive(Debug, Clone, Copy, PartialEq)]
struct VisibleBand {
    first_row: u32,
    rows: u32,
    top: f64,
    height: f64,
}

/// Clip a placement to the page so only visible rows are embedded
fn visible_band(image_height: u32, placement: Placement, page_height: f64) -> Option<VisibleBand> {
    if image_height == 0 || placement.height <= 0.0 {
        return None;
    }
    let top = placement.y.max(0.0);
    let bottom = (placement.y + placement.height).min(page_height);
    if bottom <= top {
        return None;
    }

    let px_per_mm = f64::from(image_height) / placement.height;
    let first_row = ((top - placement.y) * px_per_mm).floor() as u32;
    let last_row = (((bottom - placement.y) * px_per_mm).ceil() as u32).min(image_height);
    let rows = last_row.saturating_sub(first_row);
    if rows == 0 {
        return None;
    }

    Some(VisibleBand {
        first_row,
        rows,
        top: placement.y + f64::from(first_row) / px_per_mm,
        height: f64::from(rows) / px_per_mm,
    })
}

fn place_image(layer: &PdfLayerReference, image: &RgbaImage, placement: Placement, size: PageSize) {
    let Some(band) = visible_band(image.height(), placement, size.height) else {
        return;
    };
    let (width, _) = image.dimensions();
    let slice = imageops::crop_imm(image, 0, band.first_row, width, band.rows).to_image();

    let pdf_image = Image::from(ImageXObject {
        width: Px(width as usize),
        height: Px(band.rows as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: flatten_on_white(&slice),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI = pixels / (mm / 25.4)
    let dpi = f64::from(width) * MM_PER_INCH / placement.width;
    // printpdf measures from the bottom-left corner
    let bottom = size.height - band.top - band.height;

    pdf_image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(placement.x as f32)),
            translate_y: Some(Mm(bottom as f32)),
            dpi: Some(dpi as f32),
            ..Default::default()
        },
    );
}

/// RGB bytes of an RGBA image composited over white paper
fn flatten_on_white(image: &RgbaImage) -> Vec<u8> {
    let mut raw = Vec::with_capacity(image.as_raw().len() / 4 * 3);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let a = u16::from(a);
        for channel in [r, g, b] {
            raw.push(((u16::from(channel) * a + 255 * (255 - a)) / 255) as u8);
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn placement(y: f64, height: f64) -> Placement {
        Placement {
            x: 0.0,
            y,
            width: 210.0,
            height,
        }
    }

    mod band {
        use super::*;

        #[test]
        fn test_first_page_shows_top_rows() {
            // 1000 px over 1000 mm
            let band = visible_band(1000, placement(0.0, 1000.0), 297.0).unwrap();
            assert_eq!(band.first_row, 0);
            assert_eq!(band.rows, 297);
            assert_eq!(band.top, 0.0);
        }

        #[test]
        fn test_shifted_page_shows_following_rows() {
            let band = visible_band(1000, placement(-297.0, 1000.0), 297.0).unwrap();
            assert_eq!(band.first_row, 297);
            assert_eq!(band.rows, 297);
            assert_eq!(band.top, 0.0);
        }

        #[test]
        fn test_last_page_is_partial() {
            let band = visible_band(1000, placement(-891.0, 1000.0), 297.0).unwrap();
            assert_eq!(band.first_row, 891);
            assert_eq!(band.rows, 109);
            assert_eq!(band.height, 109.0);
        }

        #[test]
        fn test_off_page_is_skipped() {
            assert!(visible_band(1000, placement(-1000.0, 1000.0), 297.0).is_none());
            assert!(visible_band(0, placement(0.0, 1000.0), 297.0).is_none());
        }
    }

    #[test]
    fn test_transparency_is_flattened_on_white() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        assert_eq!(flatten_on_white(&image), vec![10, 20, 30, 255, 255, 255]);
    }

    #[test]
    fn test_images_go_on_the_current_page() {
        let assembler = PrintPdfAssembler::new("/tmp", "Relevamiento");
        let document = assembler.create(PageLayout::A4_PORTRAIT).unwrap();
        assert_eq!(document.page_size(), PageLayout::A4_PORTRAIT.size);

        let mut document = PrintPdfDocument {
            size: PageLayout::A4_PORTRAIT.size,
            output_dir: PathBuf::from("/tmp"),
            title: String::new(),
            pages: vec![Vec::new()],
        };
        let image = Arc::new(RgbaImage::new(1, 1));
        document.add_image(Arc::clone(&image), placement(0.0, 1.0));
        document.add_page();
        document.add_page();
        document.add_image(image, placement(-297.0, 1.0));

        let per_page: Vec<usize> = document.pages.iter().map(Vec::len).collect();
        assert_eq!(per_page, vec![1, 0, 1]);
    }

    #[test]
    fn test_rejects_empty_page_size() {
        let assembler = PrintPdfAssembler::new("/tmp", "Relevamiento");
        let layout = PageLayout {
            size: PageSize {
                width: 0.0,
                height: 297.0,
            },
        };
        assert!(matches!(
            assembler.create(layout),
            Err(ExportError::Assemble(_))
        ));
    }

    #[tokio::test]
    async fn test_saves_multi_page_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let assembler = PrintPdfAssembler::new(dir.path(), "Relevamiento");
        let mut document = assembler.create(PageLayout::A4_PORTRAIT).unwrap();
        let image = Arc::new(RgbaImage::from_pixel(21, 60, Rgba([0, 0, 0, 255])));
        // 21 x 60 px at 210 mm wide is 600 mm tall
        for (index, y) in [0.0, -297.0, -594.0].into_iter().enumerate() {
            if index > 0 {
                document.add_page();
            }
            document.add_image(Arc::clone(&image), placement(y, 600.0));
        }

        let path = document.save("Relevamiento_Socio-Urbano.pdf").await.unwrap();

        assert_eq!(path, dir.path().join("Relevamiento_Socio-Urbano.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

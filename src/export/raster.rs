//! Paint a rendered terminal buffer into an RGBA bitmap

use super::traits::{ExportError, Rasterizer};
use crate::ui::FormContainer;
use async_trait::async_trait;
use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, LATIN_FONTS, MISC_FONTS};
use image::{Rgba, RgbaImage};
use ratatui::{
    buffer::{Buffer, Cell},
    style::{Color, Modifier},
};

/// Cell size in pixels at scale 1; glyph rows are doubled vertically
pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([20, 20, 20, 255]);

/// Rasterizes the container's buffer with an 8x8 bitmap font
#[derive(Debug, Default, Clone, Copy)]
pub struct BufferRasterizer;

#[async_trait]
impl Rasterizer for BufferRasterizer {
    async fn rasterize(
        &self,
        container: &FormContainer,
        scale: u32,
    ) -> Result<RgbaImage, ExportError> {
        let buffer = container.render();
        tokio::task::spawn_blocking(move || paint(&buffer, scale))
            .await
            .map_err(|e| ExportError::Capture(e.to_string()))
    }
}

/// Paint every cell of `buffer` at `scale` times the base cell size
pub fn paint(buffer: &Buffer, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let cell_w = CELL_WIDTH * scale;
    let cell_h = CELL_HEIGHT * scale;
    let area = buffer.area;
    let mut img = RgbaImage::from_pixel(
        u32::from(area.width) * cell_w,
        u32::from(area.height) * cell_h,
        PAPER,
    );

    for y in 0..area.height {
        for x in 0..area.width {
            let Some(cell) = buffer.cell((area.x + x, area.y + y)) else {
                continue;
            };
            paint_cell(
                &mut img,
                cell,
                u32::from(x) * cell_w,
                u32::from(y) * cell_h,
                scale,
            );
        }
    }
    img
}

fn paint_cell(img: &mut RgbaImage, cell: &Cell, left: u32, top: u32, scale: u32) {
    let mut fg = ink(cell.fg, INK);
    let mut bg = ink(cell.bg, PAPER);
    if cell.modifier.contains(Modifier::REVERSED) {
        std::mem::swap(&mut fg, &mut bg);
    }

    if bg != PAPER {
        for py in top..top + CELL_HEIGHT * scale {
            for px in left..left + CELL_WIDTH * scale {
                img.put_pixel(px, py, bg);
            }
        }
    }

    let Some(bitmap) = cell.symbol().chars().next().and_then(glyph) else {
        return;
    };
    let bold = cell.modifier.contains(Modifier::BOLD);

    for (row, bits) in bitmap.iter().enumerate() {
        for col in 0..8u32 {
            let lit = bits & (1 << col) != 0 || (bold && col > 0 && bits & (1 << (col - 1)) != 0);
            if !lit {
                continue;
            }
            // each glyph row covers two pixel rows
            let x0 = left + col * scale;
            let y0 = top + row as u32 * 2 * scale;
            for py in y0..y0 + 2 * scale {
                for px in x0..x0 + scale {
                    img.put_pixel(px, py, fg);
                }
            }
        }
    }
}

/// 8x8 glyph for a character; `None` for blanks
fn glyph(c: char) -> Option<[u8; 8]> {
    if c.is_whitespace() {
        return None;
    }
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BOX_FONTS.get(c))
        .or_else(|| BLOCK_FONTS.get(c))
        .or_else(|| MISC_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
}

/// Print colour for a terminal colour; dark tones read better on paper
fn ink(color: Color, default: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b] = match color {
        Color::Reset => return default,
        Color::Black => [0, 0, 0],
        Color::Red | Color::LightRed => [190, 30, 30],
        Color::Green | Color::LightGreen => [30, 130, 50],
        Color::Yellow | Color::LightYellow => [150, 110, 0],
        Color::Blue | Color::LightBlue => [30, 70, 180],
        Color::Magenta | Color::LightMagenta => [140, 40, 140],
        Color::Cyan | Color::LightCyan => [0, 110, 130],
        Color::Gray => [90, 90, 90],
        Color::DarkGray => [140, 140, 140],
        Color::White => [255, 255, 255],
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Indexed(_) => return default,
    };
    Rgba([r, g, b, 255])
}

use crate::qrcode::QrCode;

use image::imageops::{self, FilterType};
use image::{GrayImage, ImageError, ImageFormat, Luma};
use std::io::Cursor;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/*---- Rasterization ----*/

/// Rasterizes a symbol into a two-tone grayscale image.
///
/// Every module becomes a `scale` × `scale` block of pixels, surrounded by a light quiet zone
/// `border` modules wide. Pixel colors come only from the module grid.
///
/// # Panics
///
/// Panics if `scale` is zero, or if the image side does not fit in a `u32`.
///
/// # Example
///
/// ```rust
/// use longqr::qrcode::{QrCode, QrCodeEcc};
/// use longqr::render::render;
///
/// let qr = QrCode::encode_text("Hello, world!", QrCodeEcc::Medium).unwrap();
/// let img = render(&qr, 10, 4);
/// assert_eq!(img.dimensions(), (290, 290));
/// ```
pub fn render(qr: &QrCode, scale: u32, border: u32) -> GrayImage {
    assert!(scale > 0, "Scale must be positive");
    let side = match image_side(qr.size() as u32, scale, border) {
        Some(side) => side,
        None => panic!("Image side overflows u32"),
    };
    let mut img = GrayImage::new(side, side);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (x / scale) as i32 - border as i32;
        let qr_y = (y / scale) as i32 - border as i32;
        *pixel = if qr.get_module(qr_x, qr_y) { DARK } else { LIGHT };
    }

    img
}

/// Side length in pixels of a `size`-module symbol rendered at `scale` with a `border` quiet
/// zone, or `None` on overflow.
pub fn image_side(size: u32, scale: u32, border: u32) -> Option<u32> {
    border.checked_mul(2)?.checked_add(size)?.checked_mul(scale)
}

/// Produces a square on-screen preview of `original`.
///
/// The resize is lossy. Exports must always be taken from the unscaled image.
pub fn preview(original: &GrayImage, side: u32) -> GrayImage {
    imageops::resize(original, side, side, FilterType::Lanczos3)
}

/// Encodes an image as PNG bytes.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Renders a symbol as block characters for a terminal, two columns per module.
///
/// Lines always end with `\n`, regardless of the platform.
pub fn to_terminal_string(qr: &QrCode, border: i32) -> String {
    assert!(border >= 0, "Border must be non-negative");
    let mut result = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c = if qr.get_module(x, y) { '█' } else { ' ' };
            result.push(c);
            result.push(c);
        }
        result.push('\n');
    }
    result
}

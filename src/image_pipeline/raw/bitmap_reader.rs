//! Reader for modulated frames stored as bitmaps (BMP, PNG).
//!
//! Captures saved straight from the camera SDK keep the modulated width, so
//! the geometry comes from the file rather than from the caller.

use tracing::debug;

use crate::image_pipeline::common::error::{DemodError, Result};
use crate::image_pipeline::double_rate::types::ModulatedImage;
use crate::image_pipeline::raw::reader::ModulatedImageReader;

#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFrameReader;

impl ModulatedImageReader for BitmapFrameReader {
    fn read_modulated(&self, data: &[u8]) -> Result<ModulatedImage> {
        debug!("Decoding bitmap, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| DemodError::DecodeError(e.to_string()))?;

        // Colour bitmaps of a mono stream are collapsed back to luma.
        let luma = decoded.into_luma8();
        let (width, height) = luma.dimensions();

        debug!("Decoded bitmap: {}x{}", width, height);

        Ok(ModulatedImage {
            width: width as usize,
            height: height as usize,
            data: luma.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_grayscale_bmp() {
        let pixels: Vec<u8> = (0..8 * 3).map(|v| v as u8 * 10).collect();
        let mut encoded = Cursor::new(Vec::new());
        image::write_buffer_with_format(
            &mut encoded,
            &pixels,
            8,
            3,
            image::ExtendedColorType::L8,
            image::ImageFormat::Bmp,
        )
        .unwrap();

        let frame = BitmapFrameReader.read_modulated(encoded.get_ref()).unwrap();
        assert_eq!(frame.width, 8);
        assert_eq!(frame.height, 3);
        assert_eq!(frame.data, pixels);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = BitmapFrameReader.read_modulated(b"not a bitmap");
        assert!(matches!(result, Err(DemodError::DecodeError(_))));
    }
}

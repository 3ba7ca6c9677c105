//! Reader for headerless double-rate captures (`.dr1`).

use tracing::debug;

use crate::image_pipeline::common::error::{DemodError, Result};
use crate::image_pipeline::double_rate::types::ModulatedImage;
use crate::image_pipeline::raw::reader::ModulatedImageReader;

/// Reads a flat 8-bit raster whose row width is known up front.
///
/// The file carries no header, so the height is inferred from the file size.
#[derive(Debug, Clone, Copy)]
pub struct RawFrameReader {
    modulated_width: usize,
}

impl RawFrameReader {
    pub fn new(modulated_width: usize) -> Self {
        Self { modulated_width }
    }

    pub fn modulated_width(&self) -> usize {
        self.modulated_width
    }

    fn geometry(&self, len: usize) -> Result<(usize, usize)> {
        let width = self.modulated_width;
        if width == 0 {
            return Err(DemodError::InvalidWidth(width));
        }

        let height = len / width;
        if height == 0 || len % width != 0 {
            // A partial trailing row means the width guess is wrong.
            return Err(DemodError::SizeMismatch {
                expected: height.max(1) * width,
                actual: len,
            });
        }

        Ok((width, height))
    }
}

impl ModulatedImageReader for RawFrameReader {
    fn read_modulated(&self, data: &[u8]) -> Result<ModulatedImage> {
        self.read_modulated_owned(data.to_vec())
    }

    fn read_modulated_owned(&self, data: Vec<u8>) -> Result<ModulatedImage> {
        let (width, height) = self.geometry(data.len())?;
        debug!("Raw frame: {} bytes -> {}x{}", data.len(), width, height);

        Ok(ModulatedImage {
            width,
            height,
            data,
        })
    }
}

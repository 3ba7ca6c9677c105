use std::io::Cursor;
use tracing::info;
use bayer::{BayerDepth, Demosaic, RasterDepth, RasterMut};
use crate::image_pipeline::common::error::{DemodError, Result};
use crate::image_pipeline::debayer::types::{BayerPattern, RgbImageData};
use crate::image_pipeline::double_rate::types::DemodulatedImage;

/// Bilinear demosaic of an 8-bit demodulated frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuDebayer {
    pattern: BayerPattern,
}

impl CpuDebayer {
    pub fn new(pattern: BayerPattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> BayerPattern {
        self.pattern
    }

    pub fn process(&self, image: &DemodulatedImage) -> Result<RgbImageData> {
        let width = image.width;
        let height = image.height;
        info!("Starting CPU debayering for image {}x{}", width, height);

        if width == 0 || height == 0 || image.data.len() != width * height {
            return Err(DemodError::DebayerError(format!(
                "{} bytes do not form a {}x{} frame",
                image.data.len(),
                width,
                height
            )));
        }

        let mut output_buf = vec![0u8; width * height * 3];
        let mut cursor = Cursor::new(&image.data[..]);

        info!("Running demosaic with CFA={:?}, algo=Linear", self.pattern);

        {
            let mut output_raster = RasterMut::new(width, height, RasterDepth::Depth8, &mut output_buf);
            bayer::run_demosaic(
                &mut cursor,
                BayerDepth::Depth8,
                self.pattern.cfa(),
                Demosaic::Linear,
                &mut output_raster,
            )
            .map_err(|e| DemodError::DebayerError(format!("{:?}", e)))?;
        }

        Ok(RgbImageData {
            width,
            height,
            data: output_buf,
        })
    }
}

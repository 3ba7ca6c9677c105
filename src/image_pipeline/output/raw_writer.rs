use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::conversions::types::DemodulationConfig;
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::double_rate::types::DemodulatedImage;
use crate::image_pipeline::output::writer::ImageWriter;

/// Writes pixel bytes without any header, like the `.raw` files of the SDK samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawWriter;

impl ImageWriter for RawWriter {
    fn write_gray(
        &self,
        image: &DemodulatedImage,
        output: &mut dyn Write,
        _config: &DemodulationConfig,
    ) -> Result<()> {
        debug!("Writing raw frame: {}x{}", image.width, image.height);
        output.write_all(&image.data)?;
        Ok(())
    }

    fn write_rgb(
        &self,
        image: &RgbImageData,
        output: &mut dyn Write,
        _config: &DemodulationConfig,
    ) -> Result<()> {
        debug!("Writing raw RGB frame: {}x{}", image.width, image.height);
        output.write_all(&image.data)?;
        Ok(())
    }
}

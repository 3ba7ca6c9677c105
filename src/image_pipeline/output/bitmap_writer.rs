use std::io::{Cursor, Write};
use tracing::debug;
use crate::image_pipeline::common::error::{DemodError, Result};
use crate::image_pipeline::conversions::types::DemodulationConfig;
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::double_rate::types::DemodulatedImage;
use crate::image_pipeline::output::writer::ImageWriter;

#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapWriter;

impl BitmapWriter {
    fn encode(
        data: &[u8],
        width: usize,
        height: usize,
        color: image::ExtendedColorType,
        output: &mut dyn Write,
    ) -> Result<()> {
        let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(DemodError::EncodeError(format!("{}x{} too large for BMP", width, height))),
        };

        let expected = width as usize * height as usize * color.bits_per_pixel() as usize / 8;
        if data.len() != expected {
            return Err(DemodError::EncodeError(format!(
                "buffer holds {} bytes, {}x{} needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }

        // The BMP encoder needs Seek, so encode in memory first.
        let mut buffer = Cursor::new(Vec::new());
        image::write_buffer_with_format(
            &mut buffer,
            data,
            width,
            height,
            color,
            image::ImageFormat::Bmp,
        )
        .map_err(|e| DemodError::EncodeError(e.to_string()))?;

        output.write_all(buffer.get_ref())?;
        Ok(())
    }
}

impl ImageWriter for BitmapWriter {
    fn write_gray(
        &self,
        image: &DemodulatedImage,
        output: &mut dyn Write,
        _config: &DemodulationConfig,
    ) -> Result<()> {
        debug!("Encoding BMP image: {}x{}", image.width, image.height);
        Self::encode(&image.data, image.width, image.height, image::ExtendedColorType::L8, output)
    }

    fn write_rgb(
        &self,
        image: &RgbImageData,
        output: &mut dyn Write,
        _config: &DemodulationConfig,
    ) -> Result<()> {
        debug!("Encoding RGB BMP image: {}x{}", image.width, image.height);
        Self::encode(&image.data, image.width, image.height, image::ExtendedColorType::Rgb8, output)
    }
}

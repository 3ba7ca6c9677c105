use std::io::Write;
use tracing::debug;
use tiff::encoder::{Compression, TiffEncoder, colortype, compression::DeflateLevel};
use crate::image_pipeline::common::error::{DemodError, Result};
use crate::image_pipeline::conversions::types::DemodulationConfig;
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::double_rate::types::DemodulatedImage;
use crate::image_pipeline::output::types::TiffCompression;
use crate::image_pipeline::output::writer::ImageWriter;

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTiffWriter;

impl StandardTiffWriter {
    fn compression(compression: TiffCompression) -> Compression {
        match compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        }
    }

    fn dimensions(width: usize, height: usize) -> Result<(u32, u32)> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => Err(DemodError::EncodeError(format!("{}x{} too large for TIFF", width, height))),
        }
    }
}

impl ImageWriter for StandardTiffWriter {
    fn write_gray(
        &self,
        image: &DemodulatedImage,
        output: &mut dyn Write,
        config: &DemodulationConfig,
    ) -> Result<()> {
        debug!("Encoding TIFF image: {}x{} ({:?})", image.width, image.height, config.compression);
        let (width, height) = Self::dimensions(image.width, image.height)?;

        let mut buffer = Vec::new();
        TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| DemodError::EncodeError(e.to_string()))?
            .with_compression(Self::compression(config.compression))
            .write_image::<colortype::Gray8>(width, height, &image.data)
            .map_err(|e| DemodError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }

    fn write_rgb(
        &self,
        image: &RgbImageData,
        output: &mut dyn Write,
        config: &DemodulationConfig,
    ) -> Result<()> {
        debug!("Encoding RGB TIFF image: {}x{} ({:?})", image.width, image.height, config.compression);
        let (width, height) = Self::dimensions(image.width, image.height)?;

        let mut buffer = Vec::new();
        TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| DemodError::EncodeError(e.to_string()))?
            .with_compression(Self::compression(config.compression))
            .write_image::<colortype::RGB8>(width, height, &image.data)
            .map_err(|e| DemodError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

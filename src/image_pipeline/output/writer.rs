use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::conversions::types::DemodulationConfig;
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::double_rate::types::DemodulatedImage;

pub trait ImageWriter {
    fn write_gray(&self, image: &DemodulatedImage, output: &mut dyn Write, config: &DemodulationConfig) -> Result<()>;
    fn write_rgb(&self, image: &RgbImageData, output: &mut dyn Write, config: &DemodulationConfig) -> Result<()>;
}

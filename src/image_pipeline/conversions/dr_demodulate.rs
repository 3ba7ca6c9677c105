use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{DemodError, Result},
    conversions::types::{ConversionSummary, DemodulationConfig},
    debayer::CpuDebayer,
    double_rate::{DoubleRateCodec, ModulatedImage, RATE_FACTOR},
    output::{ImageWriter, RawWriter},
    raw::{ModulatedImageReader, RawFrameReader},
};

pub struct DemodulatePipeline<R: ModulatedImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    codec: DoubleRateCodec,
    config: DemodulationConfig,
}

impl DemodulatePipeline<RawFrameReader, RawWriter> {
    /// `.dr1` in, `.raw` out, as the SDK's file demodulation sample does.
    pub fn new(modulated_width: usize, config: DemodulationConfig) -> Self {
        Self::with_custom(RawFrameReader::new(modulated_width), RawWriter, config)
    }
}

impl<R: ModulatedImageReader, W: ImageWriter> DemodulatePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: DemodulationConfig) -> Self {
        Self {
            reader,
            writer,
            codec: DoubleRateCodec::new().parallel(config.parallel),
            config,
        }
    }

    fn validate_dimensions(
        &self,
        modulated_width: usize,
        height: usize,
        demodulated_width: usize,
    ) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if modulated_width == 0 || height == 0 || demodulated_width == 0 {
            return Err(DemodError::InvalidDimensions(
                modulated_width,
                height,
                demodulated_width,
            ));
        }

        if let Some(max) = self.config.max_dimension {
            if modulated_width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    modulated_width, height, max
                );
                return Err(DemodError::InvalidDimensions(
                    modulated_width,
                    height,
                    demodulated_width,
                ));
            }
        }

        Ok(())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<ConversionSummary> {
        info!("Starting double-rate demodulation");

        let frame = {
            let _span = tracing::info_span!("read_input").entered();
            self.reader.read_modulated(input_data)?
        };

        self.convert_frame(&frame, output)
    }

    fn convert_frame(
        &self,
        frame: &ModulatedImage,
        output: &mut dyn Write,
    ) -> Result<ConversionSummary> {
        {
            // Checked before the width is derived so empty frames surface as
            // InvalidDimensions rather than InvalidWidth.
            let demodulated_width = self
                .config
                .demodulated_width
                .unwrap_or(frame.width / RATE_FACTOR);
            let _span = tracing::info_span!(
                "validate_dimensions",
                modulated_width = frame.width,
                height = frame.height,
                demodulated_width
            )
            .entered();
            self.validate_dimensions(frame.width, frame.height, demodulated_width)?;
        }

        let demodulated_width = match self.config.demodulated_width {
            Some(width) => width,
            None => DoubleRateCodec::demodulated_width(frame.width)?,
        };

        let demodulated = {
            let _span = tracing::info_span!(
                "demodulate",
                color_variant = self.config.color_variant
            )
            .entered();
            self.codec
                .demodulate_image(frame, demodulated_width, self.config.color_variant)?
        };

        match self.config.debayer {
            Some(pattern) => {
                let rgb = {
                    let _span = tracing::info_span!("debayer").entered();
                    CpuDebayer::new(pattern).process(&demodulated)?
                };
                let _span = tracing::info_span!("encode_output").entered();
                self.writer.write_rgb(&rgb, output, &self.config)?;
            }
            None => {
                let _span = tracing::info_span!("encode_output").entered();
                self.writer.write_gray(&demodulated, output, &self.config)?;
            }
        }

        info!(
            modulated_width = frame.width,
            width = demodulated.width,
            height = demodulated.height,
            "Demodulation complete"
        );

        Ok(ConversionSummary {
            modulated_width: frame.width,
            demodulated_width: demodulated.width,
            height: demodulated.height,
            debayered: self.config.debayer.is_some(),
        })
    }

    /// Converts `input_path` into `output_path`.
    ///
    /// The output is staged in a temporary file next to the target and only
    /// renamed into place once fully written.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ConversionSummary> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                DemodError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let output_dir = match output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut staged = {
            let _span = tracing::info_span!("create_output_file").entered();
            tempfile::Builder::new()
                .prefix(".dr_demod")
                .tempfile_in(output_dir)
                .map_err(|e| {
                    DemodError::OutputWriteError(format!("{}: {}", output_path.display(), e))
                })?
        };

        let frame = {
            let _span = tracing::info_span!("read_input").entered();
            self.reader.read_modulated_owned(input_data)?
        };
        let summary = self.convert_frame(&frame, staged.as_file_mut())?;

        staged.as_file_mut().sync_all().map_err(|e| {
            DemodError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
        staged.persist(output_path).map_err(|e| {
            DemodError::OutputWriteError(format!("{}: {}", output_path.display(), e.error))
        })?;

        Ok(summary)
    }

    pub fn config(&self) -> &DemodulationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DemodulationConfig) {
        self.codec = self.codec.clone().parallel(config.parallel);
        self.config = config;
    }
}

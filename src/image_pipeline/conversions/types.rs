//! Demodulation configuration types

use crate::image_pipeline::debayer::types::BayerPattern;
use crate::image_pipeline::output::types::TiffCompression;

/// Largest accepted side length when dimension validation is on
pub const DEFAULT_MAX_DIMENSION: usize = 65_536;

/// Configuration for demodulating a double-rate frame
#[derive(Debug, Clone)]
pub struct DemodulationConfig {
    /// Decode with the colour-sensor interleave order
    pub color_variant: bool,
    /// Demodulated width (`Window_W`); derived from the frame width when `None`
    pub demodulated_width: Option<usize>,
    /// Spread rows over the rayon pool
    pub parallel: bool,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
    /// Upper bound on either side when validating
    pub max_dimension: Option<usize>,
    /// Demosaic the demodulated frame to RGB with this pattern
    pub debayer: Option<BayerPattern>,
    /// Compression used by TIFF output
    pub compression: TiffCompression,
}

impl Default for DemodulationConfig {
    fn default() -> Self {
        Self {
            color_variant: false,
            demodulated_width: None,
            parallel: true,
            validate_dimensions: true,
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
            debayer: None,
            compression: TiffCompression::None,
        }
    }
}

impl DemodulationConfig {
    pub fn builder() -> DemodulationConfigBuilder {
        DemodulationConfigBuilder::default()
    }
}

/// Builder for DemodulationConfig
#[derive(Default)]
pub struct DemodulationConfigBuilder {
    color_variant: Option<bool>,
    demodulated_width: Option<Option<usize>>,
    parallel: Option<bool>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    debayer: Option<Option<BayerPattern>>,
    compression: Option<TiffCompression>,
}

impl DemodulationConfigBuilder {
    pub fn color_variant(mut self, enable: bool) -> Self {
        self.color_variant = Some(enable);
        self
    }

    pub fn demodulated_width(mut self, width: Option<usize>) -> Self {
        self.demodulated_width = Some(width);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn debayer(mut self, pattern: Option<BayerPattern>) -> Self {
        self.debayer = Some(pattern);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn build(self) -> DemodulationConfig {
        let default = DemodulationConfig::default();
        DemodulationConfig {
            color_variant: self.color_variant.unwrap_or(default.color_variant),
            demodulated_width: self.demodulated_width.unwrap_or(default.demodulated_width),
            parallel: self.parallel.unwrap_or(default.parallel),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            debayer: self.debayer.unwrap_or(default.debayer),
            compression: self.compression.unwrap_or(default.compression),
        }
    }
}

/// What a conversion produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub modulated_width: usize,
    pub demodulated_width: usize,
    pub height: usize,
    /// Output was demosaiced to RGB
    pub debayered: bool,
}

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{DemodError, Result};
use crate::image_pipeline::double_rate::strategy::{
    ColorInterleave, DemodulationStrategy, MonoInterleave,
};
use crate::image_pipeline::double_rate::types::{DemodulatedImage, ModulatedImage};

/// Modulated samples per demodulated pixel.
pub const RATE_FACTOR: usize = 2;

/// Demodulated widths must be a multiple of this (one CFA pixel pair).
pub const DEMODULATED_WIDTH_GRANULARITY: usize = 2;

/// Modulated widths must be a multiple of this.
pub const MODULATED_WIDTH_GRANULARITY: usize = DEMODULATED_WIDTH_GRANULARITY * RATE_FACTOR;

/// Stateless converter between modulated and demodulated frames.
///
/// Holds one strategy per un-interleave order; the `color_variant` flag of
/// each call picks between them. Rows are independent, so with `parallel`
/// set they are spread over the rayon pool; output is identical either way.
#[derive(Clone)]
pub struct DoubleRateCodec {
    mono: Arc<dyn DemodulationStrategy>,
    color: Arc<dyn DemodulationStrategy>,
    parallel: bool,
}

impl Default for DoubleRateCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DoubleRateCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoubleRateCodec")
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

impl DoubleRateCodec {
    pub fn new() -> Self {
        Self {
            mono: Arc::new(MonoInterleave),
            color: Arc::new(ColorInterleave),
            parallel: true,
        }
    }

    /// Replaces the built-in layouts, e.g. with a vendor-documented one.
    pub fn with_strategies<M, C>(mono: M, color: C) -> Self
    where
        M: DemodulationStrategy + 'static,
        C: DemodulationStrategy + 'static,
    {
        Self {
            mono: Arc::new(mono),
            color: Arc::new(color),
            parallel: true,
        }
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Width of the reconstructed frame for a modulated row of `modulated_width` samples.
    pub fn demodulated_width(modulated_width: usize) -> Result<usize> {
        if modulated_width == 0 || modulated_width % MODULATED_WIDTH_GRANULARITY != 0 {
            return Err(DemodError::InvalidWidth(modulated_width));
        }
        Ok(modulated_width / RATE_FACTOR)
    }

    /// Width a double-rate camera transmits for a sensor window of `demodulated_width` pixels.
    pub fn modulated_width(demodulated_width: usize) -> Result<usize> {
        if demodulated_width == 0 || demodulated_width % DEMODULATED_WIDTH_GRANULARITY != 0 {
            return Err(DemodError::InvalidWidth(demodulated_width));
        }
        demodulated_width
            .checked_mul(RATE_FACTOR)
            .ok_or(DemodError::InvalidWidth(demodulated_width))
    }

    fn strategy(&self, color_variant: bool) -> &dyn DemodulationStrategy {
        if color_variant {
            self.color.as_ref()
        } else {
            self.mono.as_ref()
        }
    }

    /// Checks a frame geometry and returns `(modulated_len, demodulated_len)`.
    fn frame_sizes(
        modulated_width: usize,
        height: usize,
        demodulated_width: usize,
    ) -> Result<(usize, usize)> {
        let invalid = || DemodError::InvalidDimensions(modulated_width, height, demodulated_width);

        if modulated_width == 0 || height == 0 || demodulated_width == 0 {
            return Err(invalid());
        }

        if Self::modulated_width(demodulated_width)? != modulated_width {
            return Err(DemodError::InvalidWidth(modulated_width));
        }

        let modulated_len = modulated_width.checked_mul(height).ok_or_else(invalid)?;
        Ok((modulated_len, modulated_len / RATE_FACTOR))
    }

    /// Demodulates `input` into a newly allocated `demodulated_width * height` buffer.
    pub fn demodulate(
        &self,
        input: &[u8],
        modulated_width: usize,
        height: usize,
        demodulated_width: usize,
        color_variant: bool,
    ) -> Result<Vec<u8>> {
        let (_, demodulated_len) = Self::frame_sizes(modulated_width, height, demodulated_width)?;
        let mut output = vec![0u8; demodulated_len];
        self.demodulate_into(
            input,
            modulated_width,
            height,
            demodulated_width,
            color_variant,
            &mut output,
        )?;
        Ok(output)
    }

    /// Demodulates `input` into a caller-owned buffer of exactly
    /// `demodulated_width * height` bytes. On error the buffer is left untouched.
    #[instrument(level = "debug", skip(self, input, output), fields(input_size = input.len()))]
    pub fn demodulate_into(
        &self,
        input: &[u8],
        modulated_width: usize,
        height: usize,
        demodulated_width: usize,
        color_variant: bool,
        output: &mut [u8],
    ) -> Result<()> {
        let (modulated_len, demodulated_len) =
            Self::frame_sizes(modulated_width, height, demodulated_width)?;

        if input.len() != modulated_len {
            return Err(DemodError::SizeMismatch {
                expected: modulated_len,
                actual: input.len(),
            });
        }
        if output.len() != demodulated_len {
            return Err(DemodError::SizeMismatch {
                expected: demodulated_len,
                actual: output.len(),
            });
        }

        let strategy = self.strategy(color_variant);
        if self.parallel {
            input
                .par_chunks_exact(modulated_width)
                .zip(output.par_chunks_exact_mut(demodulated_width))
                .for_each(|(src, dst)| strategy.demodulate_row(src, dst));
        } else {
            input
                .chunks_exact(modulated_width)
                .zip(output.chunks_exact_mut(demodulated_width))
                .for_each(|(src, dst)| strategy.demodulate_row(src, dst));
        }

        debug!(
            "Demodulated {}x{} -> {}x{}",
            modulated_width, height, demodulated_width, height
        );
        Ok(())
    }

    pub fn demodulate_image(
        &self,
        image: &ModulatedImage,
        demodulated_width: usize,
        color_variant: bool,
    ) -> Result<DemodulatedImage> {
        let data = self.demodulate(
            &image.data,
            image.width,
            image.height,
            demodulated_width,
            color_variant,
        )?;
        Ok(DemodulatedImage {
            width: demodulated_width,
            height: image.height,
            data,
        })
    }

    /// Re-encodes a sensor frame the way a double-rate camera transmits it.
    #[instrument(level = "debug", skip(self, image), fields(width = image.width, height = image.height))]
    pub fn modulate(&self, image: &DemodulatedImage, color_variant: bool) -> Result<ModulatedImage> {
        let modulated_width = Self::modulated_width(image.width)?;
        let (modulated_len, demodulated_len) =
            Self::frame_sizes(modulated_width, image.height, image.width)?;

        if image.data.len() != demodulated_len {
            return Err(DemodError::SizeMismatch {
                expected: demodulated_len,
                actual: image.data.len(),
            });
        }

        let strategy = self.strategy(color_variant);
        let mut data = vec![0u8; modulated_len];
        if self.parallel {
            image
                .data
                .par_chunks_exact(image.width)
                .zip(data.par_chunks_exact_mut(modulated_width))
                .for_each(|(src, dst)| strategy.modulate_row(src, dst));
        } else {
            image
                .data
                .chunks_exact(image.width)
                .zip(data.chunks_exact_mut(modulated_width))
                .for_each(|(src, dst)| strategy.modulate_row(src, dst));
        }

        Ok(ModulatedImage {
            width: modulated_width,
            height: image.height,
            data,
        })
    }
}

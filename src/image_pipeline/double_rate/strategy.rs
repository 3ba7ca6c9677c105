//! Sample layouts of a double-rate row.
//!
//! Every demodulated pixel travels as two samples: a coarse sample carrying
//! the high nibble and a fine sample carrying the low nibble. Both are
//! MSB-aligned in their byte so a modulated frame still previews as a
//! (posterised) image. Only the upper nibble of a modulated byte is payload.

const NIBBLE_MASK: u8 = 0xF0;

#[inline]
fn coarse(pixel: u8) -> u8 {
    pixel & NIBBLE_MASK
}

#[inline]
fn fine(pixel: u8) -> u8 {
    pixel << 4
}

#[inline]
fn join(coarse: u8, fine: u8) -> u8 {
    (coarse & NIBBLE_MASK) | (fine >> 4)
}

/// Un-interleave order of one double-rate row.
///
/// The codec guarantees `modulated.len() == 2 * demodulated.len()` and that
/// `demodulated.len()` is a multiple of
/// [`DEMODULATED_WIDTH_GRANULARITY`](super::DEMODULATED_WIDTH_GRANULARITY)
/// before calling into a strategy.
pub trait DemodulationStrategy: Send + Sync {
    fn demodulate_row(&self, modulated: &[u8], demodulated: &mut [u8]);

    fn modulate_row(&self, demodulated: &[u8], modulated: &mut [u8]);
}

/// Monochrome sensors: coarse and fine samples alternate pixel by pixel.
///
/// `[c0 f0 c1 f1 c2 f2 ...]`
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoInterleave;

impl DemodulationStrategy for MonoInterleave {
    fn demodulate_row(&self, modulated: &[u8], demodulated: &mut [u8]) {
        for (pixel, pair) in demodulated.iter_mut().zip(modulated.chunks_exact(2)) {
            *pixel = join(pair[0], pair[1]);
        }
    }

    fn modulate_row(&self, demodulated: &[u8], modulated: &mut [u8]) {
        for (&pixel, pair) in demodulated.iter().zip(modulated.chunks_exact_mut(2)) {
            pair[0] = coarse(pixel);
            pair[1] = fine(pixel);
        }
    }
}

/// Colour-filter-array sensors: both pixels of a same-row CFA pair are read
/// out together, coarse samples first.
///
/// `[c0 c1 f0 f1 c2 c3 f2 f3 ...]`
///
/// Cameras with colour support use this order even when streaming a mono
/// pixel format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorInterleave;

impl DemodulationStrategy for ColorInterleave {
    fn demodulate_row(&self, modulated: &[u8], demodulated: &mut [u8]) {
        for (pixels, group) in demodulated
            .chunks_exact_mut(2)
            .zip(modulated.chunks_exact(4))
        {
            pixels[0] = join(group[0], group[2]);
            pixels[1] = join(group[1], group[3]);
        }
    }

    fn modulate_row(&self, demodulated: &[u8], modulated: &mut [u8]) {
        for (pixels, group) in demodulated
            .chunks_exact(2)
            .zip(modulated.chunks_exact_mut(4))
        {
            group[0] = coarse(pixels[0]);
            group[1] = coarse(pixels[1]);
            group[2] = fine(pixels[0]);
            group[3] = fine(pixels[1]);
        }
    }
}

use ss_core::ramp::Ramp;

/// Maps luminance samples to ramp glyphs under a contrast multiplier.
///
/// `index = clamp(floor(lum · len / 255 · contrast), 0, len-1)`.
///
/// Pure et sans état mutable: construit une fois par session.
///
/// # Example
/// ```
/// use ss_ascii::glyph::GlyphMapper;
/// use ss_core::ramp::{Ramp, RampStyle};
/// let mapper = GlyphMapper::new(Ramp::from_style(RampStyle::Default), 1.0);
/// assert_eq!(mapper.map(0), ' ');
/// assert_eq!(mapper.map(255), '@');
/// ```
pub struct GlyphMapper {
    ramp: Ramp,
    contrast: f32,
}

impl GlyphMapper {
    /// Build a mapper from a resolved ramp and a positive contrast.
    ///
    /// Contrast > 1 pushes mid-tones toward the densest glyph; much above
    /// ~3 most of a frame resolves to a single glyph. A creative-control
    /// knob, not clamped here.
    #[must_use]
    pub fn new(ramp: Ramp, contrast: f32) -> Self {
        debug_assert!(contrast > 0.0, "contrast is validated upstream");
        Self { ramp, contrast }
    }

    /// Ramp index for a luminance sample, always in `[0, len-1]`.
    ///
    /// Non-decreasing in `lum` for fixed contrast, and non-decreasing in
    /// contrast for fixed `lum`.
    #[inline(always)]
    #[must_use]
    pub fn index(&self, lum: u8) -> usize {
        let len = self.ramp.len();
        let raw = (f32::from(lum) * len as f32 / 255.0 * self.contrast).floor();
        (raw.max(0.0) as usize).min(len - 1)
    }

    /// Glyph for a luminance sample.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, lum: u8) -> char {
        self.ramp.glyph(self.index(lum))
    }
}

use serde::{Deserialize, Serialize};

/// 10 caractères — compact, bon contraste.
pub const RAMP_DEFAULT: &str = " .-:=+*#%@";

/// Blocs Unicode — pseudo-pixels.
pub const RAMP_BLOCKS: &str = " ░▒▓█";

/// Minimal — haut contraste.
pub const RAMP_MINIMAL: &str = " ·+*#";

/// 70 caractères — Paul Bourke extended, résolution maximale.
pub const RAMP_DETAILED: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// One of the built-in character ramps, selected at configuration time.
///
/// A closed set: there is no runtime lookup by arbitrary string key, so an
/// invalid selection is unrepresentable once configuration is parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RampStyle {
    /// 10 glyphs, sparse to dense.
    #[default]
    Default,
    /// Unicode shade blocks.
    Blocks,
    /// 5 glyphs, high contrast.
    Minimal,
    /// 70 glyphs, dense to sparse.
    Detailed,
}

impl RampStyle {
    /// The raw glyph sequence for this style.
    #[must_use]
    pub fn glyphs(self) -> &'static str {
        match self {
            Self::Default => RAMP_DEFAULT,
            Self::Blocks => RAMP_BLOCKS,
            Self::Minimal => RAMP_MINIMAL,
            Self::Detailed => RAMP_DETAILED,
        }
    }
}

/// An immutable, resolved character ramp.
///
/// Resolved once from a [`RampStyle`] when the session is configured;
/// never empty, indexed `[0, len-1]` darkest to brightest bucket.
///
/// # Example
/// ```
/// use ss_core::ramp::{Ramp, RampStyle};
/// let ramp = Ramp::from_style(RampStyle::Default);
/// assert_eq!(ramp.len(), 10);
/// assert_eq!(ramp.glyph(0), ' ');
/// assert_eq!(ramp.glyph(9), '@');
/// ```
#[derive(Clone, Debug)]
pub struct Ramp {
    glyphs: Vec<char>,
}

impl Ramp {
    /// Resolve a built-in style into an immutable glyph sequence.
    #[must_use]
    pub fn from_style(style: RampStyle) -> Self {
        let glyphs: Vec<char> = style.glyphs().chars().collect();
        debug_assert!(!glyphs.is_empty(), "built-in ramps are never empty");
        Self { glyphs }
    }

    /// Number of glyphs in the ramp. Always ≥ 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True only for a hand-built empty ramp; built-ins never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the valid range.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ramps_are_non_empty() {
        for style in [
            RampStyle::Default,
            RampStyle::Blocks,
            RampStyle::Minimal,
            RampStyle::Detailed,
        ] {
            assert!(!Ramp::from_style(style).is_empty());
        }
    }

    #[test]
    fn glyph_index_is_clamped() {
        let ramp = Ramp::from_style(RampStyle::Blocks);
        assert_eq!(ramp.glyph(0), ' ');
        assert_eq!(ramp.glyph(ramp.len() - 1), '█');
        assert_eq!(ramp.glyph(usize::MAX), '█');
    }

    #[test]
    fn style_roundtrips_through_serde() {
        let toml = "ramp = \"blocks\"";
        #[derive(serde::Deserialize)]
        struct Probe {
            ramp: RampStyle,
        }
        let probe: Probe = toml::from_str(toml).unwrap();
        assert_eq!(probe.ramp, RampStyle::Blocks);
    }
}

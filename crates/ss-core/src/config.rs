use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StreamError;
use crate::ramp::RampStyle;

/// Cadence used when neither the CLI nor the source reports a rate.
pub const DEFAULT_FPS: f64 = 30.0;

/// Configuration d'une session de rendu. Immuable pendant le streaming.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ss_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.width, 100);
/// assert!(config.fps.is_none());
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Largeur de sortie en colonnes de caractères. Recommandé 40–200.
    pub width: u32,
    /// Multiplicateur de contraste. >1 pousse les tons moyens vers le
    /// glyphe le plus dense; au-delà de ~3 la frame entière s'aplatit
    /// sur un seul glyphe (propriété documentée, pas un bug).
    pub contrast: f32,
    /// Activer la couleur truecolor par cellule.
    pub color: bool,
    /// FPS cible. `None` = utiliser le rate natif de la source,
    /// sinon [`DEFAULT_FPS`].
    pub fps: Option<f64>,
    /// Character ramp sélectionnée parmi les presets built-in.
    pub ramp: RampStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 100,
            contrast: 1.5,
            color: false,
            fps: None,
            ramp: RampStyle::Default,
        }
    }
}

impl RenderConfig {
    /// Reject values the renderer cannot work with.
    ///
    /// # Errors
    /// Returns [`StreamError::Config`] for a zero width, a non-positive
    /// contrast, or a non-positive fps override.
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.width == 0 {
            return Err(StreamError::Config("width must be ≥ 1".into()));
        }
        if self.contrast <= 0.0 {
            return Err(StreamError::Config(format!(
                "contrast must be positive, got {}",
                self.contrast
            )));
        }
        if let Some(fps) = self.fps
            && fps <= 0.0
        {
            return Err(StreamError::Config(format!(
                "fps override must be positive, got {fps}"
            )));
        }
        Ok(())
    }

    /// Effective target frame rate: CLI override, then the source's
    /// reported rate, then [`DEFAULT_FPS`].
    #[must_use]
    pub fn effective_fps(&self, source_rate: Option<f64>) -> f64 {
        self.fps
            .or(source_rate.filter(|r| *r > 0.0))
            .unwrap_or(DEFAULT_FPS)
    }
}

/// Partial TOML file: every field optional, merged onto defaults.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    width: Option<u32>,
    contrast: Option<f32>,
    color: Option<bool>,
    fps: Option<f64>,
    ramp: Option<RampStyle>,
}

/// Load a configuration file, filling omitted fields from defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;
    log::debug!("config chargée depuis {}", path.display());

    let mut config = RenderConfig::default();
    if let Some(v) = file.width {
        config.width = v;
    }
    if let Some(v) = file.contrast {
        config.contrast = v;
    }
    if let Some(v) = file.color {
        config.color = v;
    }
    if let Some(v) = file.fps {
        config.fps = Some(v);
    }
    if let Some(v) = file.ramp {
        config.ramp = v;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_width_is_rejected() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(config.validate(), Err(StreamError::Config(_))));
    }

    #[test]
    fn non_positive_contrast_is_rejected() {
        let config = RenderConfig {
            contrast: 0.0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn fps_fallback_chain() {
        let mut config = RenderConfig::default();
        assert!((config.effective_fps(None) - DEFAULT_FPS).abs() < f64::EPSILON);
        assert!((config.effective_fps(Some(23.976)) - 23.976).abs() < 1e-9);
        // A source reporting a degenerate rate is treated as unknown.
        assert!((config.effective_fps(Some(0.0)) - DEFAULT_FPS).abs() < f64::EPSILON);
        config.fps = Some(12.0);
        assert!((config.effective_fps(Some(23.976)) - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_merges_onto_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 80\nramp = \"minimal\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.ramp, crate::ramp::RampStyle::Minimal);
        assert!((config.contrast - 1.5).abs() < f32::EPSILON);
        assert!(config.fps.is_none());
    }
}

use std::path::PathBuf;

use clap::Parser;

/// streamscii — Real-time ASCII rendering of video streams in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source vidéo : index de caméra (0 = défaut).
    #[arg(long)]
    pub camera: Option<u32>,

    /// Source vidéo : chemin vers un fichier.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Source vidéo : URL de flux directe (http, rtsp, …). La résolution
    /// d'une page de site média en URL de flux n'est pas gérée ici.
    #[arg(long)]
    pub url: Option<String>,

    /// Largeur de sortie en colonnes. Recommandé 40–200.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Multiplicateur de contraste. Recommandé 0.5–3.0.
    #[arg(short, long)]
    pub contrast: Option<f32>,

    /// Activer la couleur truecolor.
    #[arg(long, default_value_t = false)]
    pub color: bool,

    /// FPS cible (défaut : rate natif de la source, sinon 30).
    #[arg(long)]
    pub fps: Option<f64>,

    /// Character ramp : default, blocks, minimal, detailed.
    #[arg(long)]
    pub ramp: Option<String>,

    /// Fichier texte de sortie (append, jamais tronqué).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML optionnel.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that exactly one video source is provided.
    ///
    /// # Errors
    /// Returns an error if zero or more than one source is specified.
    pub fn validate_source(&self) -> anyhow::Result<()> {
        let count = usize::from(self.camera.is_some())
            + usize::from(self.file.is_some())
            + usize::from(self.url.is_some());

        if count == 0 {
            anyhow::bail!("Aucune source vidéo spécifiée. Utilisez --camera, --file, ou --url.");
        }
        if count > 1 {
            anyhow::bail!("Une seule source vidéo à la fois. Spécifiez --camera, --file, OU --url.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_source_is_required() {
        let cli = Cli::parse_from(["streamscii"]);
        assert!(cli.validate_source().is_err());

        let cli = Cli::parse_from(["streamscii", "--file", "a.mkv"]);
        assert!(cli.validate_source().is_ok());

        let cli = Cli::parse_from(["streamscii", "--file", "a.mkv", "--camera", "0"]);
        assert!(cli.validate_source().is_err());
    }

    #[test]
    fn flags_parse_into_overrides() {
        let cli = Cli::parse_from([
            "streamscii",
            "--camera",
            "1",
            "-w",
            "120",
            "--color",
            "--fps",
            "24",
        ]);
        assert_eq!(cli.camera, Some(1));
        assert_eq!(cli.width, Some(120));
        assert!(cli.color);
        assert_eq!(cli.fps, Some(24.0));
    }
}

use anyhow::Result;
use clap::Parser;

use ss_core::cancel::CancelToken;
use ss_core::config::RenderConfig;
use ss_core::ramp::RampStyle;
use ss_render::{DisplaySink, FileSink};
use ss_source::{FfmpegSource, SourceDescriptor};

pub mod cli;
pub mod session;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider la source
    cli.validate_source()?;
    let descriptor = resolve_descriptor(&cli);

    // 4. Charger la config et appliquer les overrides CLI
    let config = resolve_config(&cli)?;
    config.validate()?;

    // 5. Câbler le signal d'annulation
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.request_stop())?;

    // 6. Ouvrir la source (échec ici = session jamais démarrée)
    let source = FfmpegSource::open(&descriptor)?;

    // 7. Sink fichier optionnel
    let file_sink = cli
        .output
        .as_deref()
        .map(FileSink::open)
        .transpose()?;

    // 8. Dérouler la session
    let session = session::Session::new(
        source,
        &config,
        DisplaySink::stdout(),
        file_sink,
        cancel,
    );
    let frames = session.run()?;

    println!("\n{frames} frames rendues — conversion terminée");
    Ok(())
}

/// Map the validated CLI source flags onto a descriptor.
fn resolve_descriptor(cli: &cli::Cli) -> SourceDescriptor {
    if let Some(idx) = cli.camera {
        SourceDescriptor::Camera(idx)
    } else if let Some(ref path) = cli.file {
        SourceDescriptor::File(path.clone())
    } else {
        // validate_source() garantit qu'une des trois branches existe.
        SourceDescriptor::Url(cli.url.clone().unwrap_or_default())
    }
}

/// Resolve config: optional TOML file first, CLI flags override fields.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    let mut config = match cli.config {
        Some(ref path) => ss_core::config::load_config(path)?,
        None => RenderConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(contrast) = cli.contrast {
        config.contrast = contrast;
    }
    if cli.color {
        config.color = true;
    }
    if let Some(fps) = cli.fps {
        config.fps = Some(fps);
    }
    if let Some(ref ramp) = cli.ramp {
        config.ramp = match ramp.as_str() {
            "default" => RampStyle::Default,
            "blocks" => RampStyle::Blocks,
            "minimal" => RampStyle::Minimal,
            "detailed" => RampStyle::Detailed,
            _ => {
                log::warn!("Ramp inconnue '{ramp}', utilisation du défaut.");
                config.ramp
            }
        };
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_win_over_defaults() {
        let cli = cli::Cli::parse_from([
            "streamscii",
            "--file",
            "a.mkv",
            "--width",
            "60",
            "--ramp",
            "blocks",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.width, 60);
        assert_eq!(config.ramp, RampStyle::Blocks);
        assert!((config.contrast - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_ramp_falls_back_to_the_default() {
        let cli = cli::Cli::parse_from(["streamscii", "--file", "a.mkv", "--ramp", "psychedelic"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.ramp, RampStyle::Default);
    }

    #[test]
    fn descriptor_follows_the_selected_flag() {
        let cli = cli::Cli::parse_from(["streamscii", "--camera", "3"]);
        assert_eq!(resolve_descriptor(&cli), SourceDescriptor::Camera(3));

        let cli = cli::Cli::parse_from(["streamscii", "--url", "rtsp://cam/live"]);
        assert_eq!(
            resolve_descriptor(&cli),
            SourceDescriptor::Url("rtsp://cam/live".into())
        );
    }
}

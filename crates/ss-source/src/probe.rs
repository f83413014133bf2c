use std::process::{Command, Stdio};

use ss_core::StreamError;

use crate::descriptor::{CAMERA_HEIGHT, CAMERA_WIDTH, SourceDescriptor};

/// Métadonnées extraites via ffprobe.
#[derive(Clone, Copy, Debug)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    /// Images par seconde (ex: 23.976, 24.0, 30.0). `None` si la source
    /// ne déclare pas de rate exploitable.
    pub rate: Option<f64>,
}

/// Interroge `ffprobe` pour obtenir les métadonnées du flux vidéo principal.
///
/// Camera devices skip the probe and report the fixed capture size with
/// an unknown rate.
///
/// # Errors
/// Returns [`StreamError::SourceUnavailable`] if `ffprobe` cannot be
/// launched or reports no decodable video stream.
pub fn probe(descriptor: &SourceDescriptor) -> Result<StreamInfo, StreamError> {
    if descriptor.is_live_device() {
        return Ok(StreamInfo {
            width: CAMERA_WIDTH,
            height: CAMERA_HEIGHT,
            rate: None,
        });
    }

    let mut args: Vec<String> = vec![
        "-v".into(),
        "quiet".into(),
        "-select_streams".into(),
        "v:0".into(),
        "-show_entries".into(),
        "stream=width,height,r_frame_rate".into(),
        "-of".into(),
        "default=noprint_wrappers=1".into(),
    ];
    args.extend(descriptor.input_args());

    let output = Command::new("ffprobe")
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| StreamError::SourceUnavailable {
            descriptor: descriptor.to_string(),
            reason: format!("impossible de lancer ffprobe (installé et en PATH ?): {e}"),
        })?;

    let text = String::from_utf8_lossy(&output.stdout);
    let info = parse_probe_output(&text);

    if info.width == 0 || info.height == 0 {
        return Err(StreamError::SourceUnavailable {
            descriptor: descriptor.to_string(),
            reason: "ffprobe n'a trouvé aucun flux vidéo".into(),
        });
    }

    log::info!(
        "probe: {}x{} @ {} — {descriptor}",
        info.width,
        info.height,
        info.rate.map_or("?".into(), |r| format!("{r:.3}fps")),
    );

    Ok(info)
}

/// Parse `key=value` lines as emitted by ffprobe `-of default`.
fn parse_probe_output(text: &str) -> StreamInfo {
    let mut width = 0u32;
    let mut height = 0u32;
    let mut rate = None;

    for line in text.lines() {
        if let Some(val) = line.strip_prefix("width=") {
            width = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("height=") {
            height = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("r_frame_rate=") {
            rate = parse_rate(val.trim());
        }
    }

    StreamInfo {
        width,
        height,
        rate,
    }
}

/// Parse an ffprobe rational rate ("24/1", "30000/1001", "0/0").
///
/// `0/0` and unparsable values mean the source does not know its rate.
fn parse_rate(val: &str) -> Option<f64> {
    let mut parts = val.splitn(2, '/');
    let num: f64 = parts.next()?.parse().ok()?;
    let den: f64 = parts.next().unwrap_or("1").parse().ok()?;
    if num > 0.0 && den > 0.0 {
        Some(num / den)
    } else {
        None
    }
}

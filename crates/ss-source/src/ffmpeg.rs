use std::io::Read;
use std::process::{Child, ChildStdout, Command, Stdio};

use ss_core::frame::FrameBuffer;
use ss_core::traits::FrameSource;
use ss_core::StreamError;

use crate::descriptor::SourceDescriptor;
use crate::probe::{self, StreamInfo};

/// Opened video source backed by an `ffmpeg` subprocess.
///
/// ffmpeg decodes the container and writes raw RGB24 frames to its stdout;
/// each frame is `w × h × 3` bytes, row-major, no padding. The read is
/// blocking and the pipe's backpressure throttles ffmpeg when the pacing
/// loop drains slower than the source decodes.
///
/// The child process is killed and reaped on `Drop`, so the handle is
/// released exactly once on every exit path of a session.
///
/// # Example
/// ```no_run
/// use ss_source::{FfmpegSource, SourceDescriptor};
/// use std::path::PathBuf;
/// let mut source = FfmpegSource::open(&SourceDescriptor::File(PathBuf::from("clip.mkv")))?;
/// # Ok::<(), ss_core::StreamError>(())
/// ```
pub struct FfmpegSource {
    child: Child,
    stdout: ChildStdout,
    /// Buffer de frame réutilisé — une seule allocation par session.
    frame: FrameBuffer,
    info: StreamInfo,
    drained: bool,
}

impl FfmpegSource {
    /// Probe the source and spawn the decode pipe.
    ///
    /// # Errors
    /// Returns [`StreamError::SourceUnavailable`] if the probe finds no
    /// video stream or ffmpeg cannot be spawned. The session never enters
    /// streaming in that case.
    pub fn open(descriptor: &SourceDescriptor) -> Result<Self, StreamError> {
        let info = probe::probe(descriptor)?;

        let mut args: Vec<String> = vec![
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-nostdin".into(),
        ];
        args.extend(descriptor.input_args());
        args.extend(
            ["-f", "rawvideo", "-pix_fmt", "rgb24", "-an", "pipe:1"]
                .map(String::from),
        );

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdout(Stdio::piped())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| StreamError::SourceUnavailable {
                descriptor: descriptor.to_string(),
                reason: format!("impossible de lancer ffmpeg: {e}"),
            })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            // Stdio::piped() garantit un stdout; branche de sécurité.
            StreamError::SourceUnavailable {
                descriptor: descriptor.to_string(),
                reason: "ffmpeg n'a pas exposé de pipe stdout".into(),
            }
        })?;

        log::debug!(
            "ffmpeg spawné: {}x{} rgb24 depuis {descriptor}",
            info.width,
            info.height
        );

        Ok(Self {
            child,
            stdout,
            frame: FrameBuffer::new(info.width, info.height),
            info,
            drained: false,
        })
    }
}

impl FrameSource for FfmpegSource {
    fn read_frame(&mut self) -> Option<&FrameBuffer> {
        if self.drained {
            return None;
        }
        match read_exact_or_eof(&mut self.stdout, &mut self.frame.data) {
            Ok(true) => Some(&self.frame),
            Ok(false) => {
                log::info!("source: EOF, drain propre");
                self.drained = true;
                None
            }
            Err(e) => {
                // Transient read failures end the stream like EOF does:
                // retry/backoff has no meaning for a single ordered pipe.
                log::warn!("source: erreur lecture pipe, drain: {e}");
                self.drained = true;
                None
            }
        }
    }

    fn native_size(&self) -> (u32, u32) {
        (self.info.width, self.info.height)
    }

    fn native_rate(&self) -> Option<f64> {
        self.info.rate
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        log::debug!("source: handle ffmpeg libéré");
    }
}

/// Lit exactement `buf.len()` bytes depuis `reader`.
///
/// Retourne `Ok(true)` si lu avec succès, `Ok(false)` sur EOF avant
/// complétion, `Err` sur erreur I/O fatale.
///
/// # Errors
/// Propagates any I/O error other than `Interrupted`.
pub fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<bool> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => return Ok(false), // EOF
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_exact_fills_from_chunked_reader() {
        let mut reader = Cursor::new(vec![7u8; 12]);
        let mut buf = [0u8; 12];
        assert!(read_exact_or_eof(&mut reader, &mut buf).unwrap());
        assert_eq!(buf, [7u8; 12]);
    }

    #[test]
    fn short_read_reports_eof_not_error() {
        let mut reader = Cursor::new(vec![7u8; 5]);
        let mut buf = [0u8; 12];
        assert!(!read_exact_or_eof(&mut reader, &mut buf).unwrap());
    }
}

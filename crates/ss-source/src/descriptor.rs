use std::fmt;
use std::path::PathBuf;

/// Capture size requested from camera devices, which cannot be probed
/// the way demuxable containers can.
pub const CAMERA_WIDTH: u32 = 640;
/// See [`CAMERA_WIDTH`].
pub const CAMERA_HEIGHT: u32 = 480;

/// What to open: a capture device, a local file, or a direct media URL.
///
/// Resolving a media-site page URL into a playable stream address is the
/// caller's business; a [`SourceDescriptor::Url`] is handed to ffmpeg
/// verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// Camera device by index (`/dev/video{n}` on Linux).
    Camera(u32),
    /// Local video file.
    File(PathBuf),
    /// Direct stream URL (http, rtsp, …).
    Url(String),
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera(idx) => write!(f, "camera {idx}"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

impl SourceDescriptor {
    /// ffmpeg/ffprobe input arguments for this source.
    ///
    /// Camera capture goes through the platform demuxer and requests a
    /// fixed [`CAMERA_WIDTH`]×[`CAMERA_HEIGHT`] size.
    #[must_use]
    pub fn input_args(&self) -> Vec<String> {
        match self {
            #[cfg(target_os = "macos")]
            Self::Camera(idx) => vec![
                "-f".into(),
                "avfoundation".into(),
                "-video_size".into(),
                format!("{CAMERA_WIDTH}x{CAMERA_HEIGHT}"),
                "-i".into(),
                format!("{idx}"),
            ],
            #[cfg(not(target_os = "macos"))]
            Self::Camera(idx) => vec![
                "-f".into(),
                "v4l2".into(),
                "-video_size".into(),
                format!("{CAMERA_WIDTH}x{CAMERA_HEIGHT}"),
                "-i".into(),
                format!("/dev/video{idx}"),
            ],
            Self::File(path) => vec!["-i".into(), path.to_string_lossy().into_owned()],
            Self::Url(url) => vec!["-i".into(), url.clone()],
        }
    }

    /// `true` for sources that cannot be probed with ffprobe.
    #[must_use]
    pub fn is_live_device(&self) -> bool {
        matches!(self, Self::Camera(_))
    }
}

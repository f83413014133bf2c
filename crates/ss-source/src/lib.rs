/// Video source glue for streamscii: ffprobe metadata probing and the
/// ffmpeg subprocess raw-RGB decode pipe.
///
/// Decoding runs via subprocess (std::process::Command) rather than an
/// ffmpeg FFI crate. Prérequis runtime: `ffmpeg` et `ffprobe` en PATH.

pub mod descriptor;
pub mod ffmpeg;
pub mod probe;

pub use descriptor::SourceDescriptor;
pub use ffmpeg::FfmpegSource;
pub use probe::StreamInfo;

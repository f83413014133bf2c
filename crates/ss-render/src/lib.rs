/// Output boundary for streamscii: serialization of cell grids to ANSI
/// text, the terminal display sink, and the append-only file sink.
///
/// The renderer upstream stays output-format-agnostic; escape sequences
/// exist only in this crate.

pub mod ansi;
pub mod display;
pub mod file_sink;

pub use display::DisplaySink;
pub use file_sink::FileSink;

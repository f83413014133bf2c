/// The rendering core: luminance → glyph mapping and raw-frame → cell-grid
/// conversion. Pure transforms, no I/O.

pub mod glyph;
pub mod renderer;
pub mod resize;

pub use glyph::GlyphMapper;
pub use renderer::FrameRenderer;
pub use resize::Resizer;

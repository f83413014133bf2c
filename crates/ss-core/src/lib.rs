/// Configuration, types, and shared structures for streamscii.
///
/// This crate contains all shared types, traits, and configuration logic
/// used across the streamscii workspace.

pub mod cancel;
pub mod config;
pub mod error;
pub mod frame;
pub mod ramp;
pub mod traits;

pub use cancel::CancelToken;
pub use config::RenderConfig;
pub use error::StreamError;
pub use frame::{Cell, CellGrid, FrameBuffer};
pub use ramp::{Ramp, RampStyle};
pub use traits::FrameSource;

use crate::frame::FrameBuffer;

/// Fournit des frames brutes au pacing loop.
///
/// Implémenté par `FfmpegSource` (ss-source) et par des stubs de test.
/// The handle behind an implementation is released by `Drop`, which makes
/// release idempotent and guaranteed on every exit path of the session.
///
/// # Example
/// ```
/// use ss_core::traits::FrameSource;
/// use ss_core::frame::FrameBuffer;
///
/// struct Exhausted;
/// impl FrameSource for Exhausted {
///     fn read_frame(&mut self) -> Option<&FrameBuffer> { None }
///     fn native_size(&self) -> (u32, u32) { (0, 0) }
///     fn native_rate(&self) -> Option<f64> { None }
/// }
/// ```
pub trait FrameSource {
    /// Block until the next raw frame is decoded and return it.
    ///
    /// Returns `None` on end of stream. A transient read failure is also
    /// reported as `None`: for a live, ordered stream there is nothing
    /// useful to retry, so the loop drains cleanly instead.
    fn read_frame(&mut self) -> Option<&FrameBuffer>;

    /// Dimensions natives de la source (avant downsampling).
    fn native_size(&self) -> (u32, u32);

    /// Frame rate reported by the source, if it knows one.
    fn native_rate(&self) -> Option<f64>;
}

use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer as FirResizer};
use ss_core::StreamError;
use ss_core::frame::FrameBuffer;

/// Resizer réutilisable wrappant fast_image_resize.
///
/// Convolution resampling (never nearest-neighbor), so the character grid
/// averages over the pixels it covers instead of aliasing. Pré-alloué pour
/// zéro allocation en hot path.
///
/// # Example
/// ```
/// use ss_ascii::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (the crate wants `&mut` on its input).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new(),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns [`StreamError::InvalidFrame`] if either buffer has
    /// degenerate dimensions.
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<(), StreamError> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        let degenerate = |fb: &FrameBuffer| StreamError::InvalidFrame {
            width: fb.width,
            height: fb.height,
        };

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x3)
                .map_err(|_| degenerate(src))?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x3)
                .map_err(|_| StreamError::InvalidFrame {
                    width: dst.width,
                    height: dst.height,
                })?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|_| degenerate(src))?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_dimensions_copy_through() {
        let mut src = FrameBuffer::new(4, 4);
        src.data.fill(200);
        let mut dst = FrameBuffer::new(4, 4);
        let mut r = Resizer::new();
        r.resize_into(&src, &mut dst).unwrap();
        assert_eq!(dst.data, src.data);
    }

    #[test]
    fn uniform_frame_stays_uniform_after_downsampling() {
        let mut src = FrameBuffer::new(8, 8);
        src.data.fill(90);
        let mut dst = FrameBuffer::new(2, 2);
        let mut r = Resizer::new();
        r.resize_into(&src, &mut dst).unwrap();
        assert!(dst.data.iter().all(|&b| b == 90));
    }
}

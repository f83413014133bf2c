use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use ss_ascii::FrameRenderer;
use ss_core::cancel::CancelToken;
use ss_core::config::RenderConfig;
use ss_core::traits::FrameSource;
use ss_render::ansi;
use ss_render::{DisplaySink, FileSink};

/// Cycle de vie d'une session de streaming.
///
/// `Idle` et `Opening` are lived through before a `Session` value exists:
/// opening happens in `FfmpegSource::open`, and an open failure means the
/// session is never constructed. No state is reachable after `Closed`
/// because [`Session::run`] consumes the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing opened yet.
    Idle,
    /// Source handle being opened.
    Opening,
    /// Pacing loop running.
    Streaming,
    /// Cancel or EOF observed, handle being released.
    Draining,
    /// Handle released; terminal state.
    Closed,
}

/// One streaming invocation: owns the source handle, the renderer and the
/// sinks, and drives the single-threaded pacing loop.
///
/// Each iteration fully completes acquire → render → dispatch before the
/// next begins; the only suspension point is the end-of-iteration pacing
/// sleep, skipped entirely when the frame budget is already spent. Frames
/// are dropped implicitly by real-time pacing, never queued.
pub struct Session<S: FrameSource, W: Write> {
    source: S,
    renderer: FrameRenderer,
    display: DisplaySink<W>,
    file_sink: Option<FileSink>,
    cancel: CancelToken,
    interval: Duration,
    phase: SessionPhase,
}

impl<S: FrameSource, W: Write> Session<S, W> {
    /// Assemble a session around an already-opened source.
    ///
    /// The target interval is fixed here from the override → source rate →
    /// default fallback chain and never changes mid-session.
    pub fn new(
        source: S,
        config: &RenderConfig,
        display: DisplaySink<W>,
        file_sink: Option<FileSink>,
        cancel: CancelToken,
    ) -> Self {
        let fps = config.effective_fps(source.native_rate());
        log::info!("session: cadence cible {fps:.3} fps");
        Self {
            source,
            renderer: FrameRenderer::new(config),
            display,
            file_sink,
            cancel,
            interval: Duration::from_secs_f64(1.0 / fps),
            phase: SessionPhase::Idle,
        }
    }

    /// Target interval between successive frames.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Run the pacing loop until cancellation or end of stream.
    ///
    /// Consumes the session: the source handle drops (and is thereby
    /// released) on every exit path, including mid-iteration failures.
    /// Returns the number of frames dispatched.
    ///
    /// # Errors
    /// Returns an error on a degenerate decoded frame or a dead sink.
    /// End of stream and cancellation terminate normally.
    pub fn run(mut self) -> Result<u64> {
        self.phase = SessionPhase::Streaming;
        let mut dispatched = 0u64;

        loop {
            // Cancellation is observed at iteration boundaries only: the
            // frame in flight below always completes before shutdown.
            if self.cancel.is_stopped() {
                log::info!("session: arrêt demandé, drain");
                break;
            }

            let start = Instant::now();

            let Some(frame) = self.source.read_frame() else {
                break;
            };

            // Render once; display and file sink share the encoded text.
            let grid = self.renderer.render(frame)?;
            let text = ansi::encode_grid(&grid);
            self.display.present(&text)?;
            if let Some(sink) = self.file_sink.as_mut() {
                sink.append(&text)?;
            }
            dispatched += 1;

            // Sleep out the slack; an overrun proceeds immediately and the
            // deficit is never carried into the next iteration.
            if let Some(slack) = self.interval.checked_sub(start.elapsed()) {
                std::thread::sleep(slack);
            }
        }

        self.phase = SessionPhase::Draining;
        drop(self.source);
        self.phase = SessionPhase::Closed;
        log::info!("session: fermée après {dispatched} frames");
        Ok(dispatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_core::config::DEFAULT_FPS;
    use ss_core::frame::FrameBuffer;
    use ss_core::ramp::RampStyle;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic in-memory source: yields `remaining` copies of a
    /// frame, then end-of-stream. Tracks reads and drops.
    struct StubSource {
        frame: FrameBuffer,
        remaining: usize,
        reads: Arc<AtomicUsize>,
        drops: Arc<AtomicUsize>,
        rate: Option<f64>,
        /// Simulates a signal arriving while the frame is in flight.
        cancel_during_read: Option<CancelToken>,
    }

    impl StubSource {
        fn new(frames: usize) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let reads = Arc::new(AtomicUsize::new(0));
            let drops = Arc::new(AtomicUsize::new(0));
            let mut frame = FrameBuffer::new(4, 4);
            frame.data.fill(180);
            (
                Self {
                    frame,
                    remaining: frames,
                    reads: Arc::clone(&reads),
                    drops: Arc::clone(&drops),
                    rate: None,
                    cancel_during_read: None,
                },
                reads,
                drops,
            )
        }
    }

    impl FrameSource for StubSource {
        fn read_frame(&mut self) -> Option<&FrameBuffer> {
            self.reads.fetch_add(1, Ordering::Relaxed);
            if let Some(token) = &self.cancel_during_read {
                token.request_stop();
            }
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            Some(&self.frame)
        }

        fn native_size(&self) -> (u32, u32) {
            (self.frame.width, self.frame.height)
        }

        fn native_rate(&self) -> Option<f64> {
            self.rate
        }
    }

    impl Drop for StubSource {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn fast_config() -> RenderConfig {
        RenderConfig {
            width: 4,
            contrast: 1.0,
            color: false,
            // 1 kHz cible: le sleep de pacing reste négligeable en test.
            fps: Some(1000.0),
            ramp: RampStyle::Default,
        }
    }

    fn session(
        source: StubSource,
        config: &RenderConfig,
        cancel: CancelToken,
    ) -> Session<StubSource, Vec<u8>> {
        Session::new(source, config, DisplaySink::new(Vec::new()), None, cancel)
    }

    #[test]
    fn a_new_session_is_idle_until_run() {
        let (source, _, _) = StubSource::new(0);
        let s = session(source, &fast_config(), CancelToken::new());
        assert_eq!(s.phase(), SessionPhase::Idle);
    }

    #[test]
    fn unknown_rate_falls_back_to_the_default_cadence() {
        let (source, _, _) = StubSource::new(0);
        let config = RenderConfig {
            fps: None,
            ..fast_config()
        };
        let s = session(source, &config, CancelToken::new());
        let expected = Duration::from_secs_f64(1.0 / DEFAULT_FPS);
        assert_eq!(s.interval(), expected);
    }

    #[test]
    fn source_rate_wins_over_the_default() {
        let (mut source, _, _) = StubSource::new(0);
        source.rate = Some(50.0);
        let config = RenderConfig {
            fps: None,
            ..fast_config()
        };
        let s = session(source, &config, CancelToken::new());
        assert_eq!(s.interval(), Duration::from_secs_f64(1.0 / 50.0));
    }

    #[test]
    fn n_frames_then_eof_dispatches_exactly_n() {
        let (source, reads, drops) = StubSource::new(3);
        let dispatched = session(source, &fast_config(), CancelToken::new())
            .run()
            .unwrap();
        assert_eq!(dispatched, 3);
        // 3 frames + the read observing end of stream.
        assert_eq!(reads.load(Ordering::Relaxed), 4);
        assert_eq!(drops.load(Ordering::Relaxed), 1, "handle released once");
    }

    #[test]
    fn cancel_mid_iteration_finishes_the_frame_in_flight() {
        let cancel = CancelToken::new();
        let (mut source, reads, drops) = StubSource::new(5);
        source.cancel_during_read = Some(cancel.clone());
        let dispatched = session(source, &fast_config(), cancel).run().unwrap();
        // The frame being read when the signal arrived still rendered and
        // displayed; no further frame was acquired.
        assert_eq!(dispatched, 1);
        assert_eq!(reads.load(Ordering::Relaxed), 1);
        assert_eq!(drops.load(Ordering::Relaxed), 1, "handle released once");
    }

    #[test]
    fn pre_cancelled_session_dispatches_nothing() {
        let cancel = CancelToken::new();
        cancel.request_stop();
        let (source, reads, _) = StubSource::new(5);
        let dispatched = session(source, &fast_config(), cancel).run().unwrap();
        assert_eq!(dispatched, 0);
        assert_eq!(reads.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn rendered_frames_reach_the_file_sink_with_separators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.txt");
        let sink = FileSink::open(&path).unwrap();
        let (source, _, _) = StubSource::new(2);
        let s = Session::new(
            source,
            &fast_config(),
            DisplaySink::new(Vec::new()),
            Some(sink),
            CancelToken::new(),
        );
        assert_eq!(s.run().unwrap(), 2);
        let content = std::fs::read_to_string(&path).unwrap();
        // 4 lignes par frame, séparateur vide entre les deux.
        assert_eq!(content.matches("\n\n").count(), 2);
        assert_eq!(content.lines().filter(|l| !l.is_empty()).count(), 8);
    }

    #[test]
    fn degenerate_frame_aborts_with_invalid_frame() {
        struct ZeroSource {
            frame: FrameBuffer,
        }
        impl FrameSource for ZeroSource {
            fn read_frame(&mut self) -> Option<&FrameBuffer> {
                Some(&self.frame)
            }
            fn native_size(&self) -> (u32, u32) {
                (0, 0)
            }
            fn native_rate(&self) -> Option<f64> {
                None
            }
        }
        let source = ZeroSource {
            frame: FrameBuffer::new(0, 0),
        };
        let s = Session::new(
            source,
            &fast_config(),
            DisplaySink::new(Vec::new()),
            None,
            CancelToken::new(),
        );
        let err = s.run().unwrap_err();
        assert!(err.to_string().contains("invalid frame"));
    }
}

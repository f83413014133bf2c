use std::io::{Stdout, Write};

use anyhow::{Context, Result};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};

/// Terminal display sink: home the cursor, write the frame, clear whatever
/// the previous frame left below it.
///
/// Generic over `Write` so tests can capture the byte stream. A dead
/// display is a fatal, unrecovered condition for the session.
pub struct DisplaySink<W: Write> {
    out: W,
}

impl DisplaySink<Stdout> {
    /// Sink writing to the process stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> DisplaySink<W> {
    /// Wrap an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Replace the previous frame with `frame_text`.
    ///
    /// # Errors
    /// Propagates any write failure; the caller treats it as fatal.
    pub fn present(&mut self, frame_text: &str) -> Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        self.out
            .write_all(frame_text.as_bytes())
            .context("écriture frame vers le display")?;
        self.out.write_all(b"\n")?;
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        self.out.flush().context("flush display")?;
        Ok(())
    }
}

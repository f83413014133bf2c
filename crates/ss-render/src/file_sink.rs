use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Append-only persistent sink for rendered frames.
///
/// Created if absent, never truncated: a session appends to whatever is
/// already there, and a crash mid-frame at worst loses the in-progress
/// frame's text. Held open for the whole session, one flush per frame.
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Open (or create) the sink in append mode.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened for appending.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("ouverture du fichier de sortie {}", path.display()))?;
        log::info!("file sink: append vers {}", path.display());
        Ok(Self { file })
    }

    /// Append one frame's text followed by a blank separator line.
    ///
    /// # Errors
    /// Propagates write failures; the caller treats them as fatal.
    pub fn append(&mut self, frame_text: &str) -> Result<()> {
        self.file.write_all(frame_text.as_bytes())?;
        self.file.write_all(b"\n\n")?;
        self.file.flush()?;
        Ok(())
    }
}

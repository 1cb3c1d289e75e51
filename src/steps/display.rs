//! Shows the contents of a TXT or CSV file.

use crate::console::Console;
use crate::error::StepError;
use crate::step::{Step, StepKind};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions probed for, in priority order.
const PROBE_ORDER: [&str; 2] = ["txt", "csv"];

/// Displays `<name>.txt` or, failing that, `<name>.csv`.
///
/// The first successful probe is cached: once a file has been found the step
/// keeps using it and never checks the other extension again, even if the
/// files on disk change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStep {
    name: PathBuf,
    resolved: bool,
}

impl DisplayStep {
    /// Creates a display step for a base file name without extension.
    pub fn new(name: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            resolved: false,
        }
    }

    /// The stored file name; carries the extension once resolved.
    pub fn file_name(&self) -> &Path {
        &self.name
    }

    /// Whether a file has already been found.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Probes for the file unless it was found before.
    ///
    /// Returns `true` when the stored name points at a discovered file.
    fn resolve(&mut self) -> bool {
        if self.resolved {
            return true;
        }
        for extension in PROBE_ORDER {
            let mut candidate = self.name.clone().into_os_string();
            candidate.push(".");
            candidate.push(extension);
            let candidate = PathBuf::from(candidate);
            if candidate.is_file() {
                debug!("Resolved {} to {}", self.name.display(), candidate.display());
                self.name = candidate;
                self.resolved = true;
                return true;
            }
        }
        false
    }

    fn open(&self) -> Result<BufReader<File>, StepError> {
        File::open(&self.name)
            .map(BufReader::new)
            .map_err(|e| StepError::io(&self.name, e))
    }
}

/// Copies every line of `reader` into `w` byte for byte, whatever the
/// encoding.
fn copy_lines(
    reader: &mut impl BufRead,
    w: &mut dyn Write,
    path: &Path,
) -> Result<(), StepError> {
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| StepError::io(path, e))?;
        if read == 0 {
            return Ok(());
        }
        w.write_all(&line).map_err(StepError::Sink)?;
    }
}

impl Step for DisplayStep {
    fn kind(&self) -> StepKind {
        StepKind::Display
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        if !self.resolve() {
            return Err(StepError::NotFound(self.name.clone()));
        }
        let mut reader = self.open()?;
        let out = console.out();
        writeln!(out, "Content of file '{}':", self.name.display()).map_err(StepError::Sink)?;
        copy_lines(&mut reader, out, &self.name)
    }

    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        console: &mut dyn Console,
    ) -> Result<(), StepError> {
        self.resolve();
        // Opened before the header so an unreadable file leaves the sink untouched.
        let mut reader = self.open()?;
        writeln!(sink, "Content of file '{}':", self.name.display()).map_err(StepError::Sink)?;
        copy_lines(&mut reader, sink, &self.name)?;
        writeln!(
            console.out(),
            "Content of file '{}' written to the output file successfully.",
            self.name.display()
        )
        .map_err(StepError::Sink)
    }
}

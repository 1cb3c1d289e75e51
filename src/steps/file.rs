//! Steps that create demonstration TXT and CSV files.

use crate::console::Console;
use crate::error::StepError;
use crate::step::{Step, StepKind};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const TXT_CONTENT: &str = "it works!\nData1,Data2,Data3\n";
const CSV_CONTENT: &str = "Header1,Header2,Header3\nData1,Data2,Data3\n";

/// Appends `.{extension}` unless the path already ends with it.
fn with_suffix(path: impl Into<PathBuf>, extension: &str) -> PathBuf {
    let path = path.into();
    if path.extension().is_some_and(|ext| ext == extension) {
        return path;
    }
    let mut raw = path.into_os_string();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

/// Truncates `path` and writes `content`, announcing success on the console.
fn create(
    label: &str,
    path: &Path,
    content: &str,
    console: &mut dyn Console,
) -> Result<(), StepError> {
    fs::write(path, content).map_err(|e| StepError::io(path, e))?;
    info!("Created {} file {}", label, path.display());
    writeln!(
        console.out(),
        "{} file '{}' created successfully.",
        label,
        path.display()
    )
    .map_err(StepError::Sink)
}

/// Creates (or overwrites) a two-line text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFileCreateStep {
    description: String,
    path: PathBuf,
}

impl TextFileCreateStep {
    /// Creates the step; `.txt` is appended to `path` if missing.
    pub fn new(description: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            description: description.into(),
            path: with_suffix(path, "txt"),
        }
    }

    /// The file this step writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Step for TextFileCreateStep {
    fn kind(&self) -> StepKind {
        StepKind::TextFileCreate
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        create("TXT", &self.path, TXT_CONTENT, console)
    }

    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        _console: &mut dyn Console,
    ) -> Result<(), StepError> {
        write!(sink, "{}: ", self.description).map_err(StepError::Sink)
    }
}

/// Creates (or overwrites) a CSV file with a header and one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFileCreateStep {
    description: String,
    path: PathBuf,
}

impl CsvFileCreateStep {
    /// Creates the step; `.csv` is appended to `path` if missing.
    pub fn new(description: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            description: description.into(),
            path: with_suffix(path, "csv"),
        }
    }

    /// The file this step writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Step for CsvFileCreateStep {
    fn kind(&self) -> StepKind {
        StepKind::CsvFileCreate
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        create("CSV", &self.path, CSV_CONTENT, console)
    }

    fn try_render_to(
        &mut self,
        sink: &mut dyn Write,
        _console: &mut dyn Console,
    ) -> Result<(), StepError> {
        write!(sink, "{}: ", self.description).map_err(StepError::Sink)
    }
}

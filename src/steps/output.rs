use crate::console::Console;
use crate::error::StepError;
use crate::step::{Step, StepKind};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes a standalone document with title, description and information
/// blocks.
///
/// Takes no part in flow rendering: [`render_to`](Step::render_to) writes
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeOutputStep {
    path: PathBuf,
    title: String,
    description: String,
    information: String,
}

impl CompositeOutputStep {
    /// Creates the step.
    pub fn new(
        path: impl Into<PathBuf>,
        title: impl Into<String>,
        description: impl Into<String>,
        information: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            description: description.into(),
            information: information.into(),
        }
    }

    /// The document this step writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_document(&self) -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(&self.path)?);
        write!(w, "Title: {}\n\n", self.title)?;
        write!(w, "Description: {}\n\n", self.description)?;
        writeln!(w, "Information: {}", self.information)?;
        w.flush()
    }
}

impl Step for CompositeOutputStep {
    fn kind(&self) -> StepKind {
        StepKind::CompositeOutput
    }

    fn try_execute(&mut self, console: &mut dyn Console) -> Result<(), StepError> {
        self.write_document()
            .map_err(|e| StepError::io(&self.path, e))?;
        info!("Wrote output document {}", self.path.display());
        writeln!(
            console.out(),
            "File '{}' created and data written successfully.",
            self.path.display()
        )
        .map_err(StepError::Sink)
    }

    fn try_render_to(
        &mut self,
        _sink: &mut dyn Write,
        _console: &mut dyn Console,
    ) -> Result<(), StepError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;
    use std::fs;

    #[test]
    fn test_execute_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        let mut step = CompositeOutputStep::new(&path, "Sales", "Quarterly", "Up 4%");
        let mut console = MemoryConsole::default();

        step.execute(&mut console);

        assert_eq!(step.path(), path);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Title: Sales\n\nDescription: Quarterly\n\nInformation: Up 4%\n"
        );
        assert!(console.stdout().ends_with("created and data written successfully.\n"));
    }

    #[test]
    fn test_render_is_noop() {
        let mut step = CompositeOutputStep::new("unused.txt", "t", "d", "i");
        let mut console = MemoryConsole::default();
        let mut sink = Vec::new();

        step.render_to(&mut sink, &mut console);

        assert!(sink.is_empty());
        assert_eq!(console.stderr(), "");
    }

    #[test]
    fn test_unwritable_target_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no/such/dir.txt");
        let mut step = CompositeOutputStep::new(target, "t", "d", "i");
        let mut console = MemoryConsole::default();

        step.execute(&mut console);

        assert!(console.stderr().starts_with("Error: I/O failure on"));
    }
}

//! Interactive menu that builds, replays and deletes flows.

use crate::config::Settings;
use crate::console::Console;
use crate::error::ShellError;
use crate::flow::{Flow, FlowSummary};
use crate::registry::FlowRegistry;
use crate::steps::{
    CalculusStep, CompositeOutputStep, CsvFileCreateStep, DisplayStep, NumberStep,
    TextFileCreateStep, TextPromptStep, TextStep, TitleStep,
};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

const MENU: &str = "To use an existing flow, press 1; to create a new one, press 2; \
                    to delete a flow, press 3; and to exit, press 4: ";

/// Why the current action stopped early.
#[derive(Debug)]
enum Interrupt {
    EndOfInput,
    Io(io::Error),
}

impl From<io::Error> for Interrupt {
    fn from(e: io::Error) -> Self {
        Interrupt::Io(e)
    }
}

type Action<T = ()> = Result<T, Interrupt>;

/// The step types offered while building a flow, in the order offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepChoice {
    Title,
    Text,
    TextPrompt,
    Number,
    Calculus,
    TextFile,
    CsvFile,
    Display,
    Output,
}

const BUILD_SEQUENCE: [StepChoice; 10] = [
    StepChoice::Title,
    StepChoice::Text,
    StepChoice::TextPrompt,
    StepChoice::Number,
    StepChoice::Number,
    StepChoice::Calculus,
    StepChoice::TextFile,
    StepChoice::CsvFile,
    StepChoice::Display,
    StepChoice::Output,
];

impl StepChoice {
    fn label(self) -> &'static str {
        match self {
            StepChoice::Title => "title",
            StepChoice::Text => "text",
            StepChoice::TextPrompt => "text prompt",
            StepChoice::Number => "number",
            StepChoice::Calculus => "calculus",
            StepChoice::TextFile => "text file",
            StepChoice::CsvFile => "CSV file",
            StepChoice::Display => "display",
            StepChoice::Output => "output",
        }
    }
}

fn ask(console: &mut dyn Console, prompt: &str) -> Action<String> {
    write!(console.out(), "{prompt}")?;
    console.read_token()?.ok_or(Interrupt::EndOfInput)
}

fn say(console: &mut dyn Console, message: impl Display) -> Action {
    writeln!(console.out(), "{message}")?;
    Ok(())
}

fn complain(console: &mut dyn Console, message: impl Display) -> Action {
    writeln!(console.err(), "{message}")?;
    Ok(())
}

/// The driving loop around a [`FlowRegistry`].
///
/// Reads menu choices and step parameters from a [`Console`] one token at a
/// time. User mistakes are reported on the console error stream and the menu
/// repeats; only a broken console ends [`run`](Shell::run) with an error.
///
/// # Examples
///
/// ```
/// use stepflow::{FlowRegistry, MemoryConsole, Settings, Shell};
///
/// // Create flow "demo" with just a number step, then exit.
/// let mut console = MemoryConsole::new("2 demo 2 2 2 1 count 7 3 4");
/// let mut shell = Shell::new(Settings::default(), FlowRegistry::new());
/// shell.run(&mut console)?;
///
/// assert_eq!(shell.registry().get(1)?.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Shell {
    settings: Settings,
    registry: FlowRegistry,
}

impl Shell {
    /// Creates a shell owning `registry`.
    pub fn new(settings: Settings, registry: FlowRegistry) -> Self {
        Self { settings, registry }
    }

    /// The flows created so far.
    pub fn registry(&self) -> &FlowRegistry {
        &self.registry
    }

    /// Hands the registry back.
    pub fn into_registry(self) -> FlowRegistry {
        self.registry
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] if the console cannot be read or written.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<(), ShellError> {
        match self.menu_loop(console) {
            Ok(()) | Err(Interrupt::EndOfInput) => Ok(()),
            Err(Interrupt::Io(e)) => Err(ShellError::Io(e)),
        }
    }

    fn menu_loop(&mut self, console: &mut dyn Console) -> Action {
        loop {
            let choice = ask(console, MENU)?;
            debug!("Menu choice {choice:?}");
            match choice.as_str() {
                "1" => self.run_flow(console)?,
                "2" => self.create_flow(console)?,
                "3" => self.delete_flow(console)?,
                "4" => {
                    say(console, "Exit..")?;
                    return Ok(());
                }
                _ => complain(console, "Invalid option, choose again.")?,
            }
        }
    }

    fn list_flows(&self, console: &mut dyn Console) -> Action {
        for (position, flow) in (1..).zip(self.registry.flows()) {
            say(console, listing_line(position, &flow.summary()))?;
        }
        Ok(())
    }

    fn run_flow(&mut self, console: &mut dyn Console) -> Action {
        if self.registry.is_empty() {
            return say(console, "There are no available flows for use.");
        }
        say(console, "Choose an existing flow:")?;
        self.list_flows(console)?;
        let answer = ask(console, "")?;
        let Ok(position) = answer.parse::<usize>() else {
            return complain(console, "Invalid option.");
        };
        match self.registry.select(position) {
            Ok(flow) => flow.execute(console),
            Err(e) => complain(console, e)?,
        }
        Ok(())
    }

    fn delete_flow(&mut self, console: &mut dyn Console) -> Action {
        if self.registry.is_empty() {
            return say(console, "There are no flows to be deleted.");
        }
        say(console, "Choose a flow to delete it:")?;
        self.list_flows(console)?;
        let answer = ask(console, "")?;
        let Ok(position) = answer.parse::<usize>() else {
            return complain(console, "Invalid option.");
        };
        match self.registry.delete(position) {
            Ok(_) => say(console, "The flow has been successfully deleted."),
            Err(e) => complain(console, e),
        }
    }

    fn create_flow(&mut self, console: &mut dyn Console) -> Action {
        say(console, "Create a new flow.")?;
        let name = ask(console, "Please enter the flow name: ")?;
        let flow = self.registry.create(name);
        say(
            console,
            "Available step types: title, text, text prompt, number, calculus, \
             text file, CSV file, display, output",
        )?;

        for choice in BUILD_SEQUENCE {
            let label = choice.label();
            say(console, format_args!("Do you want to add a {label} step?"))?;
            say(console, format_args!("1. Add a new {label} step"))?;
            say(console, "2. Skip step")?;
            say(console, "3. End")?;
            match ask(console, "")?.as_str() {
                "1" => add_step(choice, flow, &self.settings, console)?,
                "2" => say(console, "Skipping step...")?,
                "3" => break,
                _ => complain(console, "Invalid option, skipping step.")?,
            }
        }

        let summary = flow.summary();
        info!(
            "Built flow '{}' with {} steps: {:?}",
            summary.name, summary.step_count, summary.kinds
        );
        say(console, format_args!("Flow '{}' saved.", summary.name))
    }
}

/// One line of the flow listing: position, name, size and creation time.
fn listing_line(position: usize, summary: &FlowSummary) -> String {
    format!(
        "{position}. {} ({} steps, created {})",
        summary.name,
        summary.step_count,
        summary.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn add_step(
    choice: StepChoice,
    flow: &mut Flow,
    settings: &Settings,
    console: &mut dyn Console,
) -> Action {
    match choice {
        StepChoice::Title => {
            let title = ask(console, "Enter title: ")?;
            let subtitle = ask(console, "Enter subtitle: ")?;
            flow.add_step(TitleStep::new(title, subtitle));
        }
        StepChoice::Text => {
            let title = ask(console, "Enter title: ")?;
            let copy = ask(console, "Enter text copy: ")?;
            flow.add_step(TextStep::new(title, copy));
        }
        StepChoice::TextPrompt => {
            let description = ask(console, "Enter prompt description: ")?;
            flow.add_step(TextPromptStep::new(description));
        }
        StepChoice::Number => {
            let description = ask(console, "Enter number description: ")?;
            let raw = ask(console, "Enter a number: ")?;
            match raw.parse::<i32>() {
                Ok(value) => {
                    flow.add_step(NumberStep::new(description, value));
                }
                Err(_) => complain(
                    console,
                    format_args!("'{raw}' is not a whole number; step skipped."),
                )?,
            }
        }
        StepChoice::Calculus => {
            let Some(lhs) = read_operand(flow, console, "first")? else {
                return Ok(());
            };
            let Some(rhs) = read_operand(flow, console, "second")? else {
                return Ok(());
            };
            let symbol = ask(
                console,
                "Enter operation (+, -, *, /, m for min, M for max): ",
            )?;
            flow.add_step(CalculusStep::new(lhs, rhs, symbol));
        }
        StepChoice::TextFile => {
            let description = ask(console, "Enter file description: ")?;
            let name = ask(console, "Enter file name: ")?;
            flow.add_step(TextFileCreateStep::new(description, settings.resolve(name)));
        }
        StepChoice::CsvFile => {
            let description = ask(console, "Enter CSV description: ")?;
            let name = ask(console, "Enter CSV file name: ")?;
            flow.add_step(CsvFileCreateStep::new(description, settings.resolve(name)));
        }
        StepChoice::Display => {
            let name = ask(console, "Enter file name to display: ")?;
            flow.add_step(DisplayStep::new(settings.resolve(name)));
        }
        StepChoice::Output => {
            let path = settings.resolve(ask(console, "Enter output file name: ")?);
            let title = ask(console, "Enter output title: ")?;
            let description = ask(console, "Enter output description: ")?;
            let information = ask(console, "Enter output information: ")?;
            render_into(flow, &path, console)?;
            flow.add_step(CompositeOutputStep::new(path, title, description, information));
        }
    }
    Ok(())
}

/// Reads a 0-based step position and resolves it to a number.
///
/// Returns `None` after reporting why the position cannot be used.
fn read_operand(flow: &Flow, console: &mut dyn Console, which: &str) -> Action<Option<i32>> {
    let raw = ask(
        console,
        &format!("Position of the {which} number step (0-based): "),
    )?;
    let Ok(index) = raw.parse::<usize>() else {
        complain(
            console,
            format_args!("'{raw}' is not a step position; calculus step skipped."),
        )?;
        return Ok(None);
    };
    match flow.number_at(index) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            complain(console, format_args!("{e}; calculus step skipped."))?;
            Ok(None)
        }
    }
}

/// Renders the flow built so far into a freshly created file.
fn render_into(flow: &mut Flow, path: &Path, console: &mut dyn Console) -> Action {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            return complain(
                console,
                format_args!("Unable to create/open file '{}': {e}", path.display()),
            );
        }
    };
    let mut sink = BufWriter::new(file);
    flow.render_to(&mut sink, console);
    match sink.flush() {
        Ok(()) => say(
            console,
            format_args!("Flow rendered into '{}'.", path.display()),
        ),
        Err(e) => complain(
            console,
            format_args!("Unable to write file '{}': {e}", path.display()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemoryConsole;
    use crate::step::StepKind;
    use std::fs;

    fn shell() -> Shell {
        Shell::new(Settings::default(), FlowRegistry::new())
    }

    /// Answers skipping every offered step from index `from` onwards.
    fn skip_rest(from: usize) -> String {
        vec!["2"; BUILD_SEQUENCE.len() - from].join(" ")
    }

    #[test]
    fn test_exit() {
        let mut console = MemoryConsole::new("4");
        shell().run(&mut console).unwrap();
        assert!(console.stdout().ends_with("Exit..\n"));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let mut console = MemoryConsole::new("");
        assert!(shell().run(&mut console).is_ok());
    }

    #[test]
    fn test_invalid_menu_choice() {
        let mut console = MemoryConsole::new("9 x 4");
        shell().run(&mut console).unwrap();
        assert_eq!(
            console.stderr(),
            "Invalid option, choose again.\nInvalid option, choose again.\n"
        );
    }

    #[test]
    fn test_run_with_no_flows() {
        let mut console = MemoryConsole::new("1 3 4");
        shell().run(&mut console).unwrap();
        let stdout = console.stdout();
        assert!(stdout.contains("There are no available flows for use."));
        assert!(stdout.contains("There are no flows to be deleted."));
    }

    #[test]
    fn test_create_and_end_early() {
        let mut console = MemoryConsole::new("2 intro 1 Hello World 3 4");
        let mut shell = shell();
        shell.run(&mut console).unwrap();

        let flow = shell.registry().get(1).unwrap();
        assert_eq!(flow.name().as_str(), "intro");
        assert_eq!(flow.kinds(), vec![StepKind::Title]);
        assert!(console.stdout().contains("Flow 'intro' saved."));
    }

    #[test]
    fn test_calculus_resolves_positions() {
        let script = format!(
            "2 math 2 2 2 1 a 5 1 b 3 1 0 1 + {} 1 1 4",
            skip_rest(6)
        );
        let mut console = MemoryConsole::new(&script);
        let mut shell = shell();
        shell.run(&mut console).unwrap();

        let flow = shell.registry().get(1).unwrap();
        assert_eq!(
            flow.kinds(),
            vec![StepKind::Number, StepKind::Number, StepKind::Calculus]
        );
        assert!(console.stdout().contains("The result is: 8\n"));
    }

    #[test]
    fn test_calculus_rejects_non_numeric_position() {
        let script = format!("2 math 1 T S 2 2 2 2 1 0 {} 4", skip_rest(6));
        let mut console = MemoryConsole::new(&script);
        let mut shell = shell();
        shell.run(&mut console).unwrap();

        let flow = shell.registry().get(1).unwrap();
        assert_eq!(flow.kinds(), vec![StepKind::Title]);
        assert!(console
            .stderr()
            .contains("Step 0 is a title step, not a number step; calculus step skipped."));
    }

    #[test]
    fn test_invalid_number_skipped() {
        let script = format!("2 nums 2 2 2 1 n abc {} 4", skip_rest(4));
        let mut console = MemoryConsole::new(&script);
        let mut shell = shell();
        shell.run(&mut console).unwrap();

        assert!(shell.registry().get(1).unwrap().is_empty());
        assert!(console.stderr().contains("'abc' is not a whole number"));
    }

    #[test]
    fn test_listing_shows_summary() {
        let mut console = MemoryConsole::new("2 first 2 2 2 1 n 3 3 1 1 4");
        let mut shell = shell();
        shell.run(&mut console).unwrap();

        let summary = shell.registry().get(1).unwrap().summary();
        let created = summary.created_at.format("%Y-%m-%d %H:%M:%S UTC");
        let expected = format!("\n1. first (1 steps, created {created})\n");
        assert!(console.stdout().contains(&expected));
    }

    #[test]
    fn test_into_registry_keeps_flows() {
        let mut console = MemoryConsole::new("2 kept 3 4");
        let mut shell = shell();
        shell.run(&mut console).unwrap();

        let registry = shell.into_registry();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.flows()[0].name().as_str(), "kept");
    }

    #[test]
    fn test_delete_out_of_range_then_valid() {
        let mut console = MemoryConsole::new("2 a 3 2 b 3 3 5 3 1 4");
        let mut shell = shell();
        shell.run(&mut console).unwrap();

        let names: Vec<_> = shell.registry().list_names().collect();
        assert_eq!(names, vec![(1, "b")]);
        assert!(console.stderr().contains("flow 5 does not exist"));
        assert!(console
            .stdout()
            .contains("The flow has been successfully deleted."));
    }

    #[test]
    fn test_output_step_renders_flow() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            base_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let mut shell = Shell::new(settings, FlowRegistry::new());
        let script = "2 report 1 Sales Q3 2 2 1 count 7 2 2 2 2 2 1 out.txt Sum Desc Info 4";
        let mut console = MemoryConsole::new(script);
        shell.run(&mut console).unwrap();

        let rendered = fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(rendered, "Title: Sales\nSubtitle: Q3\ncount: 7\n");

        let flow = shell.registry().get(1).unwrap();
        assert_eq!(flow.kinds().last(), Some(&StepKind::CompositeOutput));
    }
}

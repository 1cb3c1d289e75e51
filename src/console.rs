//! Interactive input/output channel shared by steps and the shell.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

/// The console a step echoes to, prompts on, and reports errors through.
///
/// Input is consumed one whitespace-delimited token at a time.
pub trait Console {
    /// Standard output.
    fn out(&mut self) -> &mut dyn Write;

    /// Error stream.
    fn err(&mut self) -> &mut dyn Write;

    /// Reads the next whitespace-delimited token.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    fn read_token(&mut self) -> io::Result<Option<String>>;
}

/// Splits any buffered reader into whitespace-delimited tokens, one line at
/// a time.
#[derive(Debug)]
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

/// Console bound to the process's stdin, stdout and stderr.
pub struct StdConsole {
    input: Tokens<io::StdinLock<'static>>,
    out: io::Stdout,
    err: io::Stderr,
}

impl fmt::Debug for StdConsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdConsole")
            .field("pending", &self.input.pending)
            .finish()
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl StdConsole {
    /// Creates a console over the standard streams.
    pub fn new() -> Self {
        Self {
            input: Tokens::new(io::stdin().lock()),
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl Console for StdConsole {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn err(&mut self) -> &mut dyn Write {
        &mut self.err
    }

    fn read_token(&mut self) -> io::Result<Option<String>> {
        // Prompts are written without a newline; make them visible first.
        self.out.flush()?;
        self.input.next_token()
    }
}

/// In-memory console with scripted input and captured output.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use stepflow::{Console, MemoryConsole};
///
/// let mut console = MemoryConsole::new("first second");
/// assert_eq!(console.read_token().unwrap(), Some("first".to_string()));
///
/// writeln!(console.out(), "hello").unwrap();
/// assert_eq!(console.stdout(), "hello\n");
/// ```
#[derive(Debug, Default)]
pub struct MemoryConsole {
    input: VecDeque<String>,
    out: Vec<u8>,
    err: Vec<u8>,
}

impl MemoryConsole {
    /// Creates a console whose input is the whitespace-split `input`.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.split_whitespace().map(str::to_string).collect(),
            out: Vec::new(),
            err: Vec::new(),
        }
    }

    /// Appends more scripted input.
    pub fn push_input(&mut self, input: &str) {
        self.input.extend(input.split_whitespace().map(str::to_string));
    }

    /// Everything written to standard output so far.
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    /// Everything written to the error stream so far.
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }

    /// Number of input tokens not consumed yet.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for MemoryConsole {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn err(&mut self) -> &mut dyn Write {
        &mut self.err
    }

    fn read_token(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_tokens_span_lines() {
        let mut tokens = Tokens::new(Cursor::new("a b\n\n  c\n"));
        assert_eq!(tokens.next_token().unwrap(), Some("a".to_string()));
        assert_eq!(tokens.next_token().unwrap(), Some("b".to_string()));
        assert_eq!(tokens.next_token().unwrap(), Some("c".to_string()));
        assert_eq!(tokens.next_token().unwrap(), None);
    }

    #[test]
    fn test_memory_console_capture() {
        let mut console = MemoryConsole::new("x");
        write!(console.out(), "out").unwrap();
        write!(console.err(), "err").unwrap();
        assert_eq!(console.stdout(), "out");
        assert_eq!(console.stderr(), "err");
        assert_eq!(console.remaining_input(), 1);
    }

    #[test]
    fn test_memory_console_exhausted() {
        let mut console = MemoryConsole::new("");
        assert_eq!(console.read_token().unwrap(), None);

        console.push_input("late");
        assert_eq!(console.read_token().unwrap(), Some("late".to_string()));
    }
}

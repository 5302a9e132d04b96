//! Line-oriented console I/O.
//!
//! The driver talks to the user only through [`Console`], so it can run
//! against the real terminal or against a scripted list of inputs.

use std::collections::VecDeque;
use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// ANSI "erase display" followed by "cursor home".
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Prompting, printing and screen clearing.
#[allow(async_fn_in_trait)]
pub trait Console {
    /// Show `prompt` and read one line, without its line terminator.
    ///
    /// Returns `None` at end of input.
    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print `text` followed by a newline.
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Clear the screen so the next output starts at the top.
    fn clear(&mut self) -> io::Result<()>;
}

/// Console backed by the process's stdin and stdout.
#[derive(Debug)]
pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Terminal {
    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
        drop(stdout);

        // Ctrl+C at a prompt ends input the same way Ctrl+D does.
        tokio::select! {
            line = self.lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                println!();
                Ok(None)
            }
        }
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{CLEAR_SCREEN}")?;
        stdout.flush()
    }
}

/// Console that replays scripted input and records everything written.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    transcript: String,
    screen: String,
    clears: usize,
}

impl ScriptedConsole {
    /// Create a console that answers prompts with `inputs`, in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Everything printed so far, including prompts and echoed input.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Output since the last clear.
    pub fn screen(&self) -> &str {
        &self.screen
    }

    /// Number of screen clears.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Inputs not yet consumed.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn push(&mut self, text: &str) {
        self.transcript.push_str(text);
        self.screen.push_str(text);
    }
}

impl Console for ScriptedConsole {
    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        self.push(prompt);

        let line = self.inputs.pop_front();
        if let Some(line) = &line {
            self.push(line);
        }
        self.push("\n");
        Ok(line)
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.push(text);
        self.push("\n");
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        self.screen.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_inputs_in_order() {
        let mut console = ScriptedConsole::new(["first", "second"]);

        assert_eq!(
            console.read_line("> ").await.unwrap().as_deref(),
            Some("first")
        );
        assert_eq!(
            console.read_line("> ").await.unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(console.read_line("> ").await.unwrap(), None);
        assert_eq!(console.prompts().len(), 3);
    }

    #[tokio::test]
    async fn transcript_and_screen() {
        let mut console = ScriptedConsole::new(["x"]);

        console.print("before").unwrap();
        console.clear().unwrap();
        console.print("after").unwrap();
        console.read_line("? ").await.unwrap();

        assert_eq!(console.transcript(), "before\nafter\n? x\n");
        assert_eq!(console.screen(), "after\n? x\n");
        assert_eq!(console.clears(), 1);
        assert_eq!(console.remaining_inputs(), 0);
    }
}

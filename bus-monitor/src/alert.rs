//! Audible alerts for buses that are about to arrive.

use std::io::{self, Write};
use std::time::Duration;

/// ASCII BEL.
const BELL: &str = "\x07";

/// A fixed-pitch alert tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            frequency_hz: 1000,
            duration: Duration::from_millis(200),
        }
    }
}

/// Something that can play a tone. Tones play one after another: `beep`
/// returns once the tone has finished.
#[allow(async_fn_in_trait)]
pub trait Beeper {
    async fn beep(&mut self, tone: Tone) -> io::Result<()>;
}

/// Rings the terminal bell and holds for the tone's duration.
///
/// Terminals choose their own bell sound, so the frequency is advisory.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Beeper for TerminalBell {
    async fn beep(&mut self, tone: Tone) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{BELL}")?;
        stdout.flush()?;
        drop(stdout);

        tokio::time::sleep(tone.duration).await;
        Ok(())
    }
}

/// Records tones instead of playing them.
#[derive(Debug, Default, Clone)]
pub struct RecordingBeeper {
    tones: Vec<Tone>,
}

impl RecordingBeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tones played so far, oldest first.
    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn count(&self) -> usize {
        self.tones.len()
    }
}

impl Beeper for RecordingBeeper {
    async fn beep(&mut self, tone: Tone) -> io::Result<()> {
        self.tones.push(tone);
        Ok(())
    }
}

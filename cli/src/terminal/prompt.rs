use std::io::{self, Write};
use std::time::{Duration, Instant};

use colored::*;
use crossterm::event::{self, Event, KeyEvent, KeyCode};
use crossterm::terminal;
use preppr_common::prompt::OperatorPrompt;

/// Terminal prompt that waits a bounded time for a key press and then
/// falls back to continuing, so unattended runs never hang.
pub struct TimedPrompt {
    wait: Duration,
}

impl TimedPrompt {
    pub fn new(wait: Duration) -> Self {
        Self { wait }
    }

    /// `None` when no usable terminal is attached or the wait elapsed.
    fn poll_answer(&self) -> Option<bool> {
        terminal::enable_raw_mode().ok()?;

        let deadline: Instant = Instant::now() + self.wait;
        let mut answer: Option<bool> = None;

        while answer.is_none() {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                break;
            };
            if !event::poll(remaining).unwrap_or(false) {
                break;
            }
            if let Ok(Event::Key(KeyEvent { code, .. })) = event::read() {
                answer = match code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
                    _ => None,
                };
            }
        }

        let _ = terminal::disable_raw_mode();
        answer
    }
}

impl OperatorPrompt for TimedPrompt {
    fn confirm_continue(&self, question: &str) -> bool {
        print!(
            "{} {} ",
            question.yellow().bold(),
            format!("[Y/n, continues in {}s]", self.wait.as_secs()).bright_black()
        );
        let _ = io::stdout().flush();

        let answer: bool = self.poll_answer().unwrap_or(true);
        println!();
        answer
    }
}

//! Operator commands
//!
//! The frame loop polls a [`CommandSource`] once per iteration with a
//! bounded wait; that wait is also the loop's pacing mechanism. The stdin
//! implementation binds `s` to start, `e` to end, and `q` to quit.

use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::BufRead;
use std::time::Duration;

/// An operator command, one per poll at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a session (recording starts after the configured delay)
    Start,
    /// End the current session, keeping recorded rows for flush
    Stop,
    /// Exit the loop and flush
    Quit,
}

impl Command {
    /// Parse an input line into a command. Unrecognized input is ignored.
    pub fn parse(line: &str) -> Option<Command> {
        match line.trim() {
            "s" | "start" => Some(Command::Start),
            "e" | "stop" => Some(Command::Stop),
            "q" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Yields at most one command per poll, waiting up to `wait`.
pub trait CommandSource {
    fn poll(&mut self, wait: Duration) -> Option<Command>;
}

/// Commands read from stdin on a dedicated reader thread.
///
/// The reader forwards parsed commands over a channel; `poll` does a
/// bounded-wait receive. A closed stdin is reported as a quit so the loop
/// can unwind and flush.
pub struct StdinCommands {
    receiver: Receiver<Command>,
}

impl StdinCommands {
    /// Spawn the stdin reader thread.
    pub fn spawn() -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(8);
        std::thread::Builder::new()
            .name("stdin-commands".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else { break };
                    if let Some(command) = Command::parse(&line) {
                        if sender.send(command).is_err() {
                            break;
                        }
                        if command == Command::Quit {
                            break;
                        }
                    }
                }
                // Dropping the sender disconnects the channel; poll turns
                // that into a quit.
            })
            .expect("failed to spawn stdin reader thread");
        Self { receiver }
    }

    /// Build from an existing receiver (tests feed commands directly).
    pub fn from_receiver(receiver: Receiver<Command>) -> Self {
        Self { receiver }
    }
}

impl CommandSource for StdinCommands {
    fn poll(&mut self, wait: Duration) -> Option<Command> {
        match self.receiver.recv_timeout(wait) {
            Ok(command) => Some(command),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("Command input closed, quitting");
                Some(Command::Quit)
            }
        }
    }
}

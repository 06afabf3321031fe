//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use lumatrace::control::{Command, CommandSource};
use lumatrace::types::{ChannelOrder, Frame};
use std::time::Duration;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Build a uniform gray frame
pub fn uniform_frame(value: u8, width: u32, height: u32) -> Frame {
    Frame::new(
        vec![value; width as usize * height as usize * 3],
        width,
        height,
        ChannelOrder::Bgr,
    )
    .unwrap()
}

/// Replays a fixed command script, one entry per poll, then yields nothing.
pub struct ScriptedCommands {
    script: Vec<Option<Command>>,
    position: usize,
}

impl ScriptedCommands {
    pub fn new(script: Vec<Option<Command>>) -> Self {
        Self {
            script,
            position: 0,
        }
    }

    /// A script that issues a single command on the first poll.
    pub fn once(command: Command) -> Self {
        Self::new(vec![Some(command)])
    }
}

impl CommandSource for ScriptedCommands {
    fn poll(&mut self, _wait: Duration) -> Option<Command> {
        let command = self.script.get(self.position).copied().flatten();
        self.position += 1;
        command
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;

use crate::errors::ChannelError;
use crate::traits::CommandChannel;

enum Scripted {
    Reply(String),
    Fail(String),
}

/// An in-memory reader for testing the inspection cycle.
///
/// Responses are scripted per command prefix (the text before the first
/// comma, e.g. `LON` or `WD`) and consumed in order. Unscripted commands
/// answer `OK,<prefix>` unless the prefix was rejected. Every command is
/// recorded, including those that fail.
#[derive(Default)]
pub struct ScriptedChannel {
    scripts: HashMap<String, VecDeque<Scripted>>,
    rejected: HashMap<String, String>,
    history: Vec<String>,
    last_error: Option<String>,
    closed: bool,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one response for the next command with `prefix`.
    pub fn reply(&mut self, prefix: &str, response: &str) -> &mut Self {
        self.queue(prefix, Scripted::Reply(response.to_string()))
    }

    /// Queues one device error for the next command with `prefix`.
    pub fn fail(&mut self, prefix: &str, code: &str) -> &mut Self {
        self.queue(prefix, Scripted::Fail(code.to_string()))
    }

    /// Rejects every unscripted command with `prefix`.
    pub fn reject(&mut self, prefix: &str, code: &str) -> &mut Self {
        self.rejected.insert(prefix.to_string(), code.to_string());
        self
    }

    fn queue(&mut self, prefix: &str, scripted: Scripted) -> &mut Self {
        self.scripts
            .entry(prefix.to_string())
            .or_default()
            .push_back(scripted);
        self
    }

    pub fn commands(&self) -> Vec<&str> {
        self.history.iter().map(String::as_str).collect()
    }

    /// Number of recorded commands with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.history
            .iter()
            .filter(|command| prefix_of(command) == prefix)
            .count()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn device_error(&mut self, command: &str, code: String) -> ChannelError {
        self.last_error = Some(code.clone());
        ChannelError::Device {
            command: command.to_string(),
            code,
        }
    }
}

fn prefix_of(command: &str) -> &str {
    command.split(',').next().unwrap_or(command)
}

#[async_trait]
impl CommandChannel for ScriptedChannel {
    async fn exec(&mut self, command: &str) -> Result<String, ChannelError> {
        if self.closed {
            return Err(ChannelError::NotConnected {
                command: command.to_string(),
            });
        }
        self.history.push(command.to_string());

        let prefix = prefix_of(command);
        let scripted = self.scripts.get_mut(prefix).and_then(VecDeque::pop_front);

        match scripted {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(code)) => Err(self.device_error(command, code)),
            None => match self.rejected.get(prefix).cloned() {
                Some(code) => Err(self.device_error(command, code)),
                None => Ok(format!("OK,{}", prefix)),
            },
        }
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    async fn close(&mut self) {
        self.closed = true;
    }
}

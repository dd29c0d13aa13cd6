//! Reply Simulator
//!
//! The full reply is computed up front. A [`RevealStream`] then discloses
//! it a few characters per tick to imitate streaming output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AssistantMode {
    #[default]
    Default,
    Helpful,
}

impl AssistantMode {
    pub const ALL: [AssistantMode; 2] = [AssistantMode::Default, AssistantMode::Helpful];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantMode::Default => "default",
            AssistantMode::Helpful => "helpful",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssistantMode::Default => "Default Assistant",
            AssistantMode::Helpful => "Helpful Assistant",
        }
    }

    /// Lenient parse for select values; anything unknown is `Default`.
    pub fn from_value(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for AssistantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(AssistantMode::Default),
            "helpful" => Ok(AssistantMode::Helpful),
            other => Err(format!("unknown assistant mode: {other}")),
        }
    }
}

/// Pure function of `(mode, user_text)`.
pub fn compose_reply(mode: AssistantMode, user_text: &str) -> String {
    match mode {
        AssistantMode::Default => format!("This is the response to: \"{user_text}\"."),
        AssistantMode::Helpful => {
            format!("I can help! You said: \"{user_text}\". Here are some suggestions to try.")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Idle,
    Streaming,
}

/// Chunked reveal of a precomputed reply, bound to the message it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealStream {
    target: usize,
    full: String,
    /// Byte offset of the revealed prefix; always on a char boundary.
    revealed: usize,
    chunk_size: usize,
    phase: StreamPhase,
}

impl RevealStream {
    pub fn new(target: usize, full: impl Into<String>, chunk_size: usize) -> Self {
        let full = full.into();
        let phase = if full.is_empty() {
            StreamPhase::Idle
        } else {
            StreamPhase::Streaming
        };
        Self {
            target,
            full,
            revealed: 0,
            chunk_size: chunk_size.max(1),
            phase,
        }
    }

    /// Index of the message this stream writes into.
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    pub fn full_text(&self) -> &str {
        &self.full
    }

    pub fn revealed_text(&self) -> &str {
        &self.full[..self.revealed]
    }

    /// Reveal the next chunk and return the cumulative prefix, or `None`
    /// once the stream is idle.
    pub fn tick(&mut self) -> Option<&str> {
        if self.phase == StreamPhase::Idle {
            return None;
        }

        let rest = &self.full[self.revealed..];
        let step = rest
            .char_indices()
            .nth(self.chunk_size)
            .map(|(offset, _)| offset)
            .unwrap_or(rest.len());
        self.revealed += step;

        if self.revealed >= self.full.len() {
            self.phase = StreamPhase::Idle;
        }
        Some(&self.full[..self.revealed])
    }

    pub fn cancel(&mut self) {
        self.phase = StreamPhase::Idle;
    }
}

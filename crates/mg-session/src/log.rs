//! Session event log.
//!
//! Every phase transition and every dropped signal is recorded here, in
//! order, so presentation layers and tests can see what the session did.

use chrono::{DateTime, Utc};
use mg_core::RoundOutcome;
use serde::Serialize;

/// What happened in the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEventKind {
    /// A new game began.
    Started {
        /// Lives at the start.
        lives: u32,
    },
    /// The command screen was requested for a microgame.
    CommandShown {
        /// Scene of the upcoming microgame.
        scene: String,
    },
    /// A round began.
    RoundStarted {
        /// Scene being played.
        scene: String,
        /// Countdown length in seconds.
        limit: f64,
    },
    /// A round was decided.
    RoundResolved {
        /// Scene that was played.
        scene: String,
        /// How the round ended.
        outcome: RoundOutcome,
        /// Lives after applying the outcome.
        lives: u32,
        /// Score after applying the outcome.
        score: u32,
    },
    /// A round could not start because no microgame was selected.
    MissingDescriptor,
    /// The last life was lost.
    GameOver {
        /// Final score.
        score: u32,
    },
    /// The player returned to the title screen.
    Quit,
    /// A win or lose signal arrived while no round could take it.
    SignalIgnored {
        /// The signal that was dropped.
        outcome: RoundOutcome,
    },
}

/// A record of something that happened during a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    /// Position in the session's event sequence, starting at 1.
    pub seq: u64,
    /// The specific kind of event.
    pub kind: SessionEventKind,
    /// A human-readable description.
    pub description: String,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Accumulates session events.
#[derive(Debug, Default)]
pub struct SessionLog {
    events: Vec<SessionEvent>,
    max_events: usize,
    next_seq: u64,
}

impl SessionLog {
    /// Create a log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
            next_seq: 1,
        }
    }

    /// Record an event, dropping the oldest if the log exceeds its capacity.
    pub fn record(&mut self, kind: SessionEventKind, description: impl Into<String>) {
        let seq = self.next_seq.max(1);
        self.next_seq = seq + 1;
        self.events.push(SessionEvent {
            seq,
            kind,
            description: description.into(),
            timestamp: Utc::now(),
        });
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// All retained events, oldest first.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// The most recent event.
    pub fn last(&self) -> Option<&SessionEvent> {
        self.events.last()
    }

    /// Retained round resolutions, oldest first.
    pub fn rounds(&self) -> Vec<&SessionEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, SessionEventKind::RoundResolved { .. }))
            .collect()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events are retained.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all retained events. Sequence numbers keep counting.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the run ends.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Events collected by a [`VecSink`], readable after the sink has been
/// moved into a bus.
pub type SharedEvents = Arc<Mutex<Vec<SimulationEvent>>>;

/// Collects events into a shared `Vec` for tests and inspection.
#[derive(Default)]
pub struct VecSink {
    events: SharedEvents,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the collected events.
    pub fn events(&self) -> SharedEvents {
        Arc::clone(&self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        // A poisoned lock only means another reader panicked; keep collecting.
        let mut events = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing` at a fixed level. Instability events are
/// always logged at `WARN`.
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(Level::DEBUG)
    }
}

macro_rules! emit_at {
    ($level:expr, $($arg:tt)+) => {
        if $level == Level::ERROR {
            tracing::error!($($arg)+)
        } else if $level == Level::WARN {
            tracing::warn!($($arg)+)
        } else if $level == Level::INFO {
            tracing::info!($($arg)+)
        } else if $level == Level::DEBUG {
            tracing::debug!($($arg)+)
        } else {
            tracing::trace!($($arg)+)
        }
    };
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let EventKind::Instability { clamped } = event.kind {
            tracing::warn!(frame = event.frame, clamped, "stability guard intervened");
            return;
        }
        emit_at!(
            self.level,
            frame = event.frame,
            event = event.label(),
            detail = ?event.kind,
            "simulation_event"
        );
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

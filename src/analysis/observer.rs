//! @ai:module:intent Optional diagnostics side channel for the analyzer
//! @ai:module:layer application
//! @ai:module:public_api AnalysisEvent, AnalysisObserver, TracingObserver, RecordingObserver

use std::sync::Mutex;

/// @ai:intent Diagnostic events emitted by SalesAnalyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    /// An analyzer was built over `records` records.
    Initialized { records: usize },
    /// A filter produced a new analyzer.
    Filtered { criterion: String, records: usize },
    /// An aggregate finished with `groups` output entries.
    Aggregated { metric: &'static str, groups: usize },
}

/// @ai:intent Receives analyzer events; never influences results
pub trait AnalysisObserver: Send + Sync {
    /// @ai:intent Handle one event
    fn notify(&self, event: &AnalysisEvent);
}

/// @ai:intent Forwards analyzer events to tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    /// @ai:effects log
    fn notify(&self, event: &AnalysisEvent) {
        match event {
            AnalysisEvent::Initialized { records } => {
                tracing::info!("SalesAnalyzer initialized with {} records", records);
            }
            AnalysisEvent::Filtered { criterion, records } => {
                tracing::info!("Filtered by {}: {} records", criterion, records);
            }
            AnalysisEvent::Aggregated { metric, groups } => {
                tracing::debug!("Computed {} ({} groups)", metric, groups);
            }
        }
    }
}

/// @ai:intent Collects events in memory, mainly for tests
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<AnalysisEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Snapshot of the events seen so far
    /// @ai:effects state:read
    pub fn events(&self) -> Vec<AnalysisEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AnalysisObserver for RecordingObserver {
    /// @ai:effects state:write
    fn notify(&self, event: &AnalysisEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

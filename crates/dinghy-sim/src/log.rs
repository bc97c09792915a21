//! Decision log: an append-only record of every steering decision.
//!
//! The engine writes one record per boat per tick. Sinks may refuse a
//! record; the engine treats that as non-fatal.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use dinghy_core::decision::Decision;

/// One logged decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionRecord {
    pub tick: u64,
    pub boat: u32,
    pub decision: Decision,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("decision log is full ({capacity} records)")]
    Full { capacity: usize },
}

/// A sink for decision records.
pub trait DecisionLog: Send {
    fn record(&mut self, record: DecisionRecord) -> Result<(), LogError>;
}

/// Writes each decision as a `trace` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl DecisionLog for TracingLog {
    fn record(&mut self, record: DecisionRecord) -> Result<(), LogError> {
        trace!(
            tick = record.tick,
            boat = record.boat,
            action = ?record.decision.action,
            target = %record.decision.target,
            sense = ?record.decision.sense,
            reason = record.reason,
            "decision"
        );
        Ok(())
    }
}

/// Keeps decisions in memory up to a fixed capacity. Clones share the
/// same buffer, so a handle kept outside the engine sees every record.
#[derive(Debug, Clone)]
pub struct MemoryLog {
    capacity: usize,
    records: Arc<Mutex<VecDeque<DecisionRecord>>>,
}

impl MemoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(4096)))),
        }
    }

    /// Copy of everything recorded so far, oldest first.
    pub fn records(&self) -> Vec<DecisionRecord> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DecisionLog for MemoryLog {
    fn record(&mut self, record: DecisionRecord) -> Result<(), LogError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.len() >= self.capacity {
            return Err(LogError::Full {
                capacity: self.capacity,
            });
        }
        records.push_back(record);
        Ok(())
    }
}

//! telemetry/counters.rs
//! Per-transform counters.
//!
//! Summary: collected by the orchestrator while it drives a codec over a
//! message and handed back on success.
use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformCounters {
    pub chunks_in: u64,
    pub bytes_in: u64,
    pub blocks_out: u64,
    pub bytes_out: u64,
}

impl TransformCounters {
    /// Record one input range fed to the codec.
    pub fn add_input(&mut self, len: usize) {
        self.chunks_in += 1;
        self.bytes_in += len as u64;
    }

    /// Record one output block appended to the message.
    pub fn add_block(&mut self, len: usize) {
        self.blocks_out += 1;
        self.bytes_out += len as u64;
    }

    /// `bytes_out / bytes_in`; 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }

    /// Fold another transform's counters into these.
    pub fn merge(&mut self, other: &TransformCounters) {
        self.chunks_in += other.chunks_in;
        self.bytes_in += other.bytes_in;
        self.blocks_out += other.blocks_out;
        self.bytes_out += other.bytes_out;
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

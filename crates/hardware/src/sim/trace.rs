//! Cycle traces.
//!
//! A [`CycleRecord`] captures the pins and state-machine view right after one rising edge.
//! Records are handed to a [`TraceSink`]; two sinks are provided:
//! 1. **`MemoryTrace`:** Keeps records in a shared in-memory buffer.
//! 2. **`JsonLinesTrace`:** Writes one JSON object per line to any writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::common::{Result, SimError};
use crate::core::{CoreState, PinInputs, PinOutputs};

/// Pins and state sampled immediately after a rising edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// 1-based index of the edge.
    pub cycle: u64,
    /// Simulated time of the edge in nanoseconds.
    pub time_ns: u64,
    /// State the core was in when the edge was taken.
    pub state: CoreState,
    /// Inputs sampled at the edge.
    pub inputs: PinInputs,
    /// Outputs after the edge with the same inputs applied.
    pub outputs: PinOutputs,
}

/// Destination for cycle records.
pub trait TraceSink: Send {
    /// Records one edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be stored or written.
    fn record(&mut self, record: &CycleRecord) -> Result<()>;

    /// Flushes buffered records.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails to flush.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory trace whose buffer is shared between clones.
///
/// Attach one clone to a simulator and keep another to read the records back.
#[derive(Clone, Debug, Default)]
pub struct MemoryTrace {
    records: Arc<Mutex<Vec<CycleRecord>>>,
}

impl MemoryTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record so far.
    pub fn records(&self) -> Vec<CycleRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of records so far.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TraceSink for MemoryTrace {
    fn record(&mut self, record: &CycleRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}

/// Writes each record as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesTrace<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesTrace<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesTrace<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes records to it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> TraceSink for JsonLinesTrace<W> {
    fn record(&mut self, record: &CycleRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n").map_err(SimError::Trace)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(SimError::Trace)
    }
}

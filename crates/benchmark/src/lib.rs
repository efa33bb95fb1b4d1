#![allow(clippy::cast_possible_truncation)]
#![allow(missing_docs)]

use std::collections::BTreeMap;

use wirepack_serialize::{Decode, Encode, Pairs};

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct LogRecord {
    pub timestamp: u64,
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
    pub labels: Pairs<String, u32>,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Batch {
    pub source: String,
    pub records: Vec<LogRecord>,
}

const LEVELS: [Level; 4] = [Level::Debug, Level::Info, Level::Warn, Level::Error];

#[must_use]
pub fn create_record(seed: u64) -> LogRecord {
    let mut fields = BTreeMap::new();
    for key in 0..(seed % 5) {
        fields.insert(format!("field_{key}"), format!("value_{}", seed * key));
    }

    let labels = (0..(seed % 3) as u32)
        .map(|i| ("shard".to_string(), i))
        .collect();

    LogRecord {
        timestamp: 1_700_000_000 + seed,
        level: LEVELS[(seed % 4) as usize].clone(),
        target: format!("service::module_{}", seed % 7),
        message: format!("processed request {seed} in {}us", seed * 13 % 997),
        fields,
        labels,
        payload: (0..(seed % 64) as u8).collect(),
    }
}

#[must_use]
pub fn create_batch(len: u64) -> Batch {
    Batch {
        source: "bench-host".to_string(),
        records: (0..len).map(create_record).collect(),
    }
}

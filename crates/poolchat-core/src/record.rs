use crate::types::{PoolSize, RecordKind, Schedule, ServiceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The caller-supplied portion of a submission. The store adds the id and
/// the server-side timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Quote {
        pool_size: PoolSize,
        schedule: Schedule,
        monthly_price: u32,
        name: String,
        email: String,
        phone: String,
        address: String,
    },
    Inquiry {
        service_type: ServiceType,
        name: String,
        phone: String,
        email: String,
        message: String,
    },
}

impl Payload {
    pub fn kind(&self) -> RecordKind {
        match self {
            Payload::Quote { .. } => RecordKind::Quote,
            Payload::Inquiry { .. } => RecordKind::Inquiry,
        }
    }
}

// ---------------------------------------------------------------------------
// SubmissionRecord
// ---------------------------------------------------------------------------

/// A persisted submission. Immutable once written; there is no update or
/// delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: Payload,
}

impl SubmissionRecord {
    pub fn kind(&self) -> RecordKind {
        self.payload.kind()
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The shared JSON document every backend persists as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub submissions: Vec<SubmissionRecord>,
}

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ServiceType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Cleaning,
    Repair,
    Question,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Cleaning => "cleaning",
            ServiceType::Repair => "repair",
            ServiceType::Question => "question",
        }
    }

    /// Email subject prefix for the inquiry branch.
    pub fn subject(self) -> &'static str {
        match self {
            ServiceType::Cleaning => "Cleaning Inquiry",
            ServiceType::Repair => "Repair / Equipment Inquiry",
            ServiceType::Question => "General Question",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = crate::error::ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cleaning" => Ok(ServiceType::Cleaning),
            "repair" => Ok(ServiceType::Repair),
            "question" => Ok(ServiceType::Question),
            _ => Err(crate::error::ChatError::InvalidServiceType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PoolSize
// ---------------------------------------------------------------------------

/// Bucketed gallon ranges. Wire names match the marketing site's buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolSize {
    #[serde(rename = "10k-20k")]
    Small,
    #[serde(rename = "20k-30k")]
    Medium,
    #[serde(rename = "30k+")]
    Large,
}

impl PoolSize {
    pub fn as_str(self) -> &'static str {
        match self {
            PoolSize::Small => "10k-20k",
            PoolSize::Medium => "20k-30k",
            PoolSize::Large => "30k+",
        }
    }
}

impl fmt::Display for PoolSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PoolSize {
    type Err = crate::error::ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "10k-20k" => Ok(PoolSize::Small),
            "20k-30k" => Ok(PoolSize::Medium),
            "30k+" => Ok(PoolSize::Large),
            _ => Err(crate::error::ChatError::InvalidPoolSize(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    Weekly,
    Biweekly,
}

impl Schedule {
    pub fn as_str(self) -> &'static str {
        match self {
            Schedule::Weekly => "weekly",
            Schedule::Biweekly => "biweekly",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Schedule {
    type Err = crate::error::ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Schedule::Weekly),
            "biweekly" => Ok(Schedule::Biweekly),
            _ => Err(crate::error::ChatError::InvalidSchedule(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// Conversation step tags.
///
/// Flow A (cleaning): service_type → pool_size → schedule → details →
/// submitting → result. Flow B (repair/question): service_type → inquiry →
/// inquiry_submitting → inquiry_result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ServiceType,
    PoolSize,
    Schedule,
    Details,
    Submitting,
    Result,
    Inquiry,
    InquirySubmitting,
    InquiryResult,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::ServiceType => "service_type",
            Step::PoolSize => "pool_size",
            Step::Schedule => "schedule",
            Step::Details => "details",
            Step::Submitting => "submitting",
            Step::Result => "result",
            Step::Inquiry => "inquiry",
            Step::InquirySubmitting => "inquiry_submitting",
            Step::InquiryResult => "inquiry_result",
        }
    }

    /// True for steps whose only exit is an in-flight async callback.
    /// Persisted state must never be restored into one of these.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Step::Submitting | Step::InquirySubmitting)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Step {
    type Err = crate::error::ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "service_type" => Ok(Step::ServiceType),
            "pool_size" => Ok(Step::PoolSize),
            "schedule" => Ok(Step::Schedule),
            "details" => Ok(Step::Details),
            "submitting" => Ok(Step::Submitting),
            "result" => Ok(Step::Result),
            "inquiry" => Ok(Step::Inquiry),
            "inquiry_submitting" => Ok(Step::InquirySubmitting),
            "inquiry_result" => Ok(Step::InquiryResult),
            _ => Err(crate::error::ChatError::InvalidStep(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Quote,
    Inquiry,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Quote => "quote",
            RecordKind::Inquiry => "inquiry",
        }
    }

    /// Prefix used when generating submission ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            RecordKind::Quote => "q",
            RecordKind::Inquiry => "i",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = crate::error::ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quote" => Ok(RecordKind::Quote),
            "inquiry" => Ok(RecordKind::Inquiry),
            _ => Err(crate::error::ChatError::InvalidKind(s.to_string())),
        }
    }
}

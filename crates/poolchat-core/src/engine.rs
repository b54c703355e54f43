//! The lead-capture conversation engine.
//!
//! A pure state machine: `Conversation::apply` maps (state, action) to the
//! next state with no I/O and no randomness. The host renders the current
//! step, forwards user input as actions, and calls the submission store
//! itself; the engine only records the outcome via `SubmissionSucceeded`
//! / `SubmissionFailed`.

use crate::pricing;
use crate::types::{PoolSize, Schedule, ServiceType, Step};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Detail records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetServiceType { service_type: ServiceType },
    SetPoolSize { pool_size: PoolSize },
    SetSchedule { schedule: Schedule },
    SubmitDetails { details: ContactDetails },
    SubmitInquiry { inquiry: InquiryDetails },
    SubmissionSucceeded { id: String },
    SubmissionFailed { message: String },
    GoBack,
    Reset,
    /// Host escape hatch, e.g. correcting a step after restoring
    /// persisted state.
    SetStep { step: Step },
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// The single source of truth for an in-progress lead capture.
///
/// Fields for steps not yet reached are `None`; `step` determines which
/// fields are meaningful. Mutated only through [`Conversation::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub step: Step,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<PoolSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ContactDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry: Option<InquiryDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// A fresh conversation at the initial step.
    pub fn new() -> Self {
        Self {
            step: Step::ServiceType,
            service_type: None,
            pool_size: None,
            schedule: None,
            details: None,
            inquiry: None,
            submission_id: None,
            last_error: None,
        }
    }

    /// The quoted monthly price, derived from the chosen schedule and
    /// pool size. `None` until both are set, so a premature quote cannot
    /// exist by construction.
    pub fn quoted_price(&self) -> Option<u32> {
        match (self.schedule, self.pool_size) {
            (Some(schedule), Some(size)) => Some(pricing::monthly_price(schedule, size)),
            _ => None,
        }
    }

    /// Coerce a restored conversation out of any in-flight step.
    ///
    /// A persisted `submitting` step has no async callback to re-attach,
    /// so resuming it would strand the conversation. Drop back to the
    /// editable step instead.
    pub fn rehydrate(mut self) -> Self {
        match self.step {
            Step::Submitting => self.step = Step::Details,
            Step::InquirySubmitting => self.step = Step::Inquiry,
            _ => {}
        }
        self
    }

    /// Apply one action and return the next state.
    ///
    /// Total over its domain: an action that is valid elsewhere in the
    /// machine but not at the current step leaves the state unchanged.
    pub fn apply(self, action: Action) -> Self {
        let mut next = self.clone();
        match action {
            Action::SetServiceType { service_type } => {
                // The service type is immutable once chosen (short of Reset),
                // so the branch point can only fire from the initial step.
                if self.step != Step::ServiceType {
                    return self;
                }
                next.service_type = Some(service_type);
                next.step = match service_type {
                    ServiceType::Cleaning => Step::PoolSize,
                    ServiceType::Repair | ServiceType::Question => Step::Inquiry,
                };
            }
            Action::SetPoolSize { pool_size } => {
                if self.step != Step::PoolSize {
                    return self;
                }
                next.pool_size = Some(pool_size);
                next.step = Step::Schedule;
            }
            Action::SetSchedule { schedule } => {
                if self.step != Step::Schedule {
                    return self;
                }
                next.schedule = Some(schedule);
                next.step = Step::Details;
            }
            Action::SubmitDetails { details } => {
                if self.step != Step::Details {
                    return self;
                }
                next.details = Some(details);
                next.last_error = None;
                next.step = Step::Submitting;
            }
            Action::SubmitInquiry { inquiry } => {
                if self.step != Step::Inquiry {
                    return self;
                }
                next.inquiry = Some(inquiry);
                next.last_error = None;
                next.step = Step::InquirySubmitting;
            }
            Action::SubmissionSucceeded { id } => match self.step {
                Step::Submitting => {
                    next.submission_id = Some(id);
                    next.step = Step::Result;
                }
                Step::InquirySubmitting => {
                    next.submission_id = Some(id);
                    next.step = Step::InquiryResult;
                }
                _ => return self,
            },
            Action::SubmissionFailed { message } => match self.step {
                Step::Submitting => {
                    next.last_error = Some(message);
                    next.step = Step::Details;
                }
                Step::InquirySubmitting => {
                    next.last_error = Some(message);
                    next.step = Step::Inquiry;
                }
                _ => return self,
            },
            Action::GoBack => match back_target(self.step) {
                Some(prev) => next.step = prev,
                None => return self,
            },
            Action::Reset => return Conversation::new(),
            Action::SetStep { step } => next.step = step,
        }
        next
    }
}

/// Fixed back-map for the explicit "back" action. Steps without an entry
/// treat "back" as a no-op.
fn back_target(step: Step) -> Option<Step> {
    match step {
        Step::PoolSize => Some(Step::ServiceType),
        Step::Schedule => Some(Step::PoolSize),
        Step::Details => Some(Step::Schedule),
        Step::Inquiry => Some(Step::ServiceType),
        _ => None,
    }
}

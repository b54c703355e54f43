//! End-to-end flows: the conversation engine driven by a host that
//! validates payloads, computes the quoted price, and calls the
//! submission store, feeding outcomes back as actions.

use poolchat_core::engine::{Action, ContactDetails, Conversation, InquiryDetails};
use poolchat_core::error::ChatError;
use poolchat_core::pricing;
use poolchat_core::record::{Document, Payload, SubmissionRecord};
use poolchat_core::store::backend::DocumentBackend;
use poolchat_core::store::file::JsonFileBackend;
use poolchat_core::store::memory::MemoryBackend;
use poolchat_core::store::redb::RedbBackend;
use poolchat_core::store::SubmissionStore;
use poolchat_core::types::{PoolSize, RecordKind, Schedule, ServiceType, Step};
use poolchat_core::validate;
use std::sync::Arc;

fn jane() -> ContactDetails {
    ContactDetails {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        phone: "4695550100".into(),
        address: "123 Elm St".into(),
    }
}

/// What the widget host does once the engine reaches `Submitting`: build
/// the payload (with the derived price), call the store, translate the
/// outcome into an action.
async fn run_quote_submission(state: Conversation, store: &SubmissionStore) -> Conversation {
    assert_eq!(state.step, Step::Submitting);
    let details = state.details.clone().expect("details set before submit");
    validate::contact_details(&details).expect("validated before dispatch");

    let payload = Payload::Quote {
        pool_size: state.pool_size.expect("pool size set"),
        schedule: state.schedule.expect("schedule set"),
        monthly_price: state.quoted_price().expect("price derivable"),
        name: details.name,
        email: details.email,
        phone: details.phone,
        address: details.address,
    };

    match store.submit(payload).await {
        Ok(id) => state.apply(Action::SubmissionSucceeded { id }),
        Err(e) => state.apply(Action::SubmissionFailed {
            message: e.to_string(),
        }),
    }
}

fn walk_to_submitting() -> Conversation {
    Conversation::new()
        .apply(Action::SetServiceType {
            service_type: ServiceType::Cleaning,
        })
        .apply(Action::SetPoolSize {
            pool_size: PoolSize::Medium,
        })
        .apply(Action::SetSchedule {
            schedule: Schedule::Weekly,
        })
        .apply(Action::SubmitDetails { details: jane() })
}

#[tokio::test]
async fn scenario_a_full_quote_flow_succeeds() {
    let store = SubmissionStore::new(Box::new(MemoryBackend::new()));
    let state = run_quote_submission(walk_to_submitting(), &store).await;

    assert_eq!(state.step, Step::Result);
    assert_eq!(
        state.quoted_price(),
        Some(pricing::monthly_price(Schedule::Weekly, PoolSize::Medium))
    );
    let id = state.submission_id.expect("id recorded");
    assert!(id.starts_with("q_"));

    let stored = store.list_by_kind(RecordKind::Quote).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    match &stored[0].payload {
        Payload::Quote { monthly_price, .. } => assert_eq!(*monthly_price, 180),
        other => panic!("expected quote payload, got {other:?}"),
    }
}

#[tokio::test]
async fn scenario_b_write_failure_returns_to_details() {
    struct BrokenBackend;

    #[async_trait::async_trait]
    impl DocumentBackend for BrokenBackend {
        async fn read(&self) -> poolchat_core::Result<Document> {
            Ok(Document::default())
        }
        async fn write(&self, _doc: &Document) -> poolchat_core::Result<()> {
            Err(ChatError::WriteFailed("remote rejected the write".into()))
        }
    }

    let store = SubmissionStore::new(Box::new(BrokenBackend));
    let before = walk_to_submitting();
    let state = run_quote_submission(before.clone(), &store).await;

    assert_eq!(state.step, Step::Details);
    assert!(state.last_error.is_some());
    assert!(state.submission_id.is_none());
    // Everything the visitor entered is retained for the retry.
    assert_eq!(state.pool_size, before.pool_size);
    assert_eq!(state.schedule, before.schedule);
    assert_eq!(state.details, before.details);
}

#[tokio::test]
async fn scenario_c_repair_branch_locks_out_cleaning_fields() {
    let state = Conversation::new().apply(Action::SetServiceType {
        service_type: ServiceType::Repair,
    });
    assert_eq!(state.step, Step::Inquiry);

    // Cleaning-branch actions are foreign here and must not stick.
    let state = state
        .apply(Action::SetPoolSize {
            pool_size: PoolSize::Large,
        })
        .apply(Action::SetSchedule {
            schedule: Schedule::Weekly,
        });
    assert!(state.pool_size.is_none());
    assert!(state.schedule.is_none());
    assert_eq!(state.quoted_price(), None);

    // Only Reset reopens the branch point.
    let reset = state.apply(Action::Reset);
    assert_eq!(reset.step, Step::ServiceType);
    assert!(reset.service_type.is_none());
}

#[tokio::test]
async fn scenario_d_concurrent_submissions_against_seeded_store() {
    let seeded = Document {
        submissions: (0..3)
            .map(|i| SubmissionRecord {
                id: format!("q_seed_{i}"),
                created_at: chrono::Utc::now(),
                payload: Payload::Quote {
                    pool_size: PoolSize::Small,
                    schedule: Schedule::Biweekly,
                    monthly_price: 119,
                    name: format!("Seed {i}"),
                    email: "seed@example.com".into(),
                    phone: "4695550000".into(),
                    address: "1 Pool Ln".into(),
                },
            })
            .collect(),
    };
    let store = Arc::new(SubmissionStore::new(Box::new(MemoryBackend::seeded(seeded))));

    let a = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { run_quote_submission(walk_to_submitting(), &store).await })
    };
    let b = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { run_quote_submission(walk_to_submitting(), &store).await })
    };
    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    assert_eq!(a.step, Step::Result);
    assert_eq!(b.step, Step::Result);
    assert_ne!(a.submission_id, b.submission_id);

    let all = store.list_by_kind(RecordKind::Quote).await.unwrap();
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn inquiry_flow_persists_and_reaches_terminal_state() {
    let store = SubmissionStore::new(Box::new(MemoryBackend::new()));
    let inquiry = InquiryDetails {
        name: "Sam Lee".into(),
        phone: "4695550111".into(),
        email: "sam@example.com".into(),
        message: "Heater stopped working".into(),
    };
    validate::inquiry_details(&inquiry).unwrap();

    let state = Conversation::new()
        .apply(Action::SetServiceType {
            service_type: ServiceType::Repair,
        })
        .apply(Action::SubmitInquiry {
            inquiry: inquiry.clone(),
        });
    assert_eq!(state.step, Step::InquirySubmitting);

    let payload = Payload::Inquiry {
        service_type: state.service_type.unwrap(),
        name: inquiry.name,
        phone: inquiry.phone,
        email: inquiry.email,
        message: inquiry.message,
    };
    let state = match store.submit(payload).await {
        Ok(id) => state.apply(Action::SubmissionSucceeded { id }),
        Err(e) => state.apply(Action::SubmissionFailed {
            message: e.to_string(),
        }),
    };

    assert_eq!(state.step, Step::InquiryResult);
    let stored = store.list_by_kind(RecordKind::Inquiry).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn file_backend_behaves_like_memory() {
    // Backend swap transparency: the same flow over the JSON file backend.
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(SubmissionStore::new(Box::new(JsonFileBackend::new(
        dir.path().join("submissions.json"),
    ))));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            run_quote_submission(walk_to_submitting(), &store).await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().step, Step::Result);
    }

    let stored = store.list_by_kind(RecordKind::Quote).await.unwrap();
    assert_eq!(stored.len(), 4);
    let ids: std::collections::HashSet<_> = stored.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 4);
}

#[tokio::test]
async fn redb_backend_behaves_like_memory() {
    // Backend swap transparency: the same flow over the redb backend.
    let dir = tempfile::TempDir::new().unwrap();
    let backend = RedbBackend::open(&dir.path().join("poolchat.redb")).unwrap();
    let store = Arc::new(SubmissionStore::new(Box::new(backend)));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            run_quote_submission(walk_to_submitting(), &store).await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().step, Step::Result);
    }

    let stored = store.list_by_kind(RecordKind::Quote).await.unwrap();
    assert_eq!(stored.len(), 4);
    let ids: std::collections::HashSet<_> = stored.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 4);
}

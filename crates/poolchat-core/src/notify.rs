//! Best-effort outbound notification.
//!
//! Posts a form-style JSON body to a configured endpoint (a Formspree
//! form or anything shaped like one) after a submission is committed.
//! The store invokes this fire-and-forget: a failure here is logged and
//! never changes the submit result.

use crate::error::{ChatError, Result};
use crate::record::{Payload, SubmissionRecord};
use std::time::Duration;

pub struct Notifier {
    client: reqwest::Client,
    endpoint: String,
}

impl Notifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChatError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// POST the record to the endpoint. The caller decides what to do
    /// with a failure; the store only logs it.
    pub async fn send(&self, record: &SubmissionRecord) -> Result<()> {
        let body = notification_body(record);
        let resp = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Backend(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ChatError::Backend(format!(
                "notification endpoint responded with {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

fn notification_body(record: &SubmissionRecord) -> serde_json::Value {
    match &record.payload {
        Payload::Quote {
            pool_size,
            schedule,
            monthly_price,
            name,
            email,
            phone,
            address,
        } => serde_json::json!({
            "_subject": format!("New Pool Quote — ${monthly_price}/mo ({name})"),
            "_replyto": email,
            "Quote ID": record.id,
            "Name": name,
            "Email": email,
            "Phone": phone,
            "Address": address,
            "Pool Size": pool_size.as_str(),
            "Schedule": schedule.as_str(),
            "Monthly Price": format!("${monthly_price}"),
            "Submitted At": record.created_at.to_rfc3339(),
        }),
        Payload::Inquiry {
            service_type,
            name,
            phone,
            email,
            message,
        } => serde_json::json!({
            "_subject": format!("{} — {name}", service_type.subject()),
            "_replyto": email,
            "Inquiry ID": record.id,
            "Type": service_type.subject(),
            "Name": name,
            "Email": email,
            "Phone": phone,
            "Message": message,
            "Submitted At": record.created_at.to_rfc3339(),
        }),
    }
}

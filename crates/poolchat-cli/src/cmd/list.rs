use crate::output::{print_json, print_table};
use anyhow::Context;
use poolchat_core::config::Config;
use poolchat_core::record::Payload;
use poolchat_core::store::SubmissionStore;
use poolchat_core::types::RecordKind;
use std::path::Path;

pub fn run(config_path: &Path, kind: &str, json: bool) -> anyhow::Result<()> {
    let kind: RecordKind = kind.parse()?;
    let config = if config_path.exists() {
        Config::load(config_path).context("failed to load config")?
    } else {
        Config::default()
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let records = runtime.block_on(async {
        let store = SubmissionStore::from_config(&config)?;
        store.list_by_kind(kind).await
    })?;

    if json {
        return print_json(&records);
    }

    match kind {
        RecordKind::Quote => {
            let rows: Vec<Vec<String>> = records
                .iter()
                .filter_map(|r| match &r.payload {
                    Payload::Quote {
                        name,
                        pool_size,
                        schedule,
                        monthly_price,
                        ..
                    } => Some(vec![
                        r.id.clone(),
                        name.clone(),
                        pool_size.to_string(),
                        schedule.to_string(),
                        format!("${monthly_price}"),
                        r.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    ]),
                    _ => None,
                })
                .collect();
            print_table(
                &["ID", "NAME", "POOL", "SCHEDULE", "PRICE/MO", "CREATED"],
                &rows,
            );
        }
        RecordKind::Inquiry => {
            let rows: Vec<Vec<String>> = records
                .iter()
                .filter_map(|r| match &r.payload {
                    Payload::Inquiry {
                        service_type,
                        name,
                        message,
                        ..
                    } => Some(vec![
                        r.id.clone(),
                        name.clone(),
                        service_type.to_string(),
                        truncate(message, 40),
                        r.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    ]),
                    _ => None,
                })
                .collect();
            print_table(&["ID", "NAME", "TYPE", "MESSAGE", "CREATED"], &rows);
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

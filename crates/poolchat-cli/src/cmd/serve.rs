use anyhow::Context;
use poolchat_core::config::Config;
use poolchat_core::store::SubmissionStore;
use std::path::Path;
use std::sync::Arc;

pub fn run(config_path: &Path, port: u16) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        Config::load(config_path).context("failed to load config")?
    } else {
        tracing::warn!(
            "no config at {}, using defaults (run 'poolchat init' to create one)",
            config_path.display()
        );
        Config::default()
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let store = SubmissionStore::from_config(&config).context("failed to build store")?;
        poolchat_server::serve(Arc::new(store), port).await
    })
}

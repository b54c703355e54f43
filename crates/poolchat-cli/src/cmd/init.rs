use anyhow::Context;
use poolchat_core::config::{Config, StorageConfig};
use poolchat_core::io;
use poolchat_core::record::Document;
use std::path::Path;

/// Write a default config next to an empty submission document.
/// Idempotent: existing files are left alone.
pub fn run(config_path: &Path) -> anyhow::Result<()> {
    if config_path.exists() {
        println!("config already exists: {}", config_path.display());
    } else {
        let config = Config::default();
        config
            .save(config_path)
            .context("failed to write config")?;
        println!("wrote {}", config_path.display());
    }

    let config = Config::load(config_path).context("failed to load config")?;
    if let StorageConfig::File { path } = &config.storage {
        if !path.exists() {
            let doc = serde_json::to_vec_pretty(&Document::default())?;
            io::atomic_write(path, &doc).context("failed to write submission document")?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

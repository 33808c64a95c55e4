//! CLI `extract` command: build a memory profile from a messages file.

use anyhow::{Context, Result};
use std::path::Path;

use companion::config::CompanionConfig;
use companion::server::{setup_shared_state, validate_messages};

/// Extract a profile and print it as pretty JSON.
pub async fn extract(config: &CompanionConfig, path: &Path) -> Result<()> {
    let messages = super::read_messages(path)?;
    validate_messages(&messages).map_err(anyhow::Error::msg)?;

    let state = setup_shared_state(config)?;
    let parsed = state
        .extractor
        .extract_detailed(&messages)
        .await
        .context("model call failed")?;

    if let companion::memory::ParsedMemory::Degraded { reason, .. } = &parsed {
        eprintln!("warning: model output was unusable ({reason}); printing empty profile");
    }

    println!("{}", serde_json::to_string_pretty(parsed.memory())?);
    Ok(())
}

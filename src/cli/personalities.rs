//! CLI personality commands: list, transform, and compare.

use anyhow::Result;

use companion::config::CompanionConfig;
use companion::personality::{Conversation, PersonalityCatalog};
use companion::server::setup_shared_state;

/// Print the builtin catalog.
pub fn list() -> Result<()> {
    let catalog = PersonalityCatalog::builtin();

    println!("Personalities");
    println!("{}", "=".repeat(40));
    for (i, p) in catalog.profiles().iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        println!("  {:<20} {}{}", p.key, p.name, marker);
        println!("  {:<20} {}", "", p.description);
        println!("  {:<20} tone: {}", "", p.tone);
        println!();
    }
    Ok(())
}

/// Answer `message` in one voice and print both stages.
pub async fn transform(config: &CompanionConfig, personality: &str, message: &str) -> Result<()> {
    let state = setup_shared_state(config)?;
    let profile = state.engine.catalog().resolve(personality).name.clone();

    let result = state
        .engine
        .transform(message, personality, Conversation::default())
        .await;

    println!("Original:");
    println!("{}", result.original);
    println!();
    println!("{profile}:");
    println!("{}", result.transformed);
    Ok(())
}

/// Answer `message` in every voice.
pub async fn compare(config: &CompanionConfig, message: &str) -> Result<()> {
    let state = setup_shared_state(config)?;
    let responses = state.engine.compare_all(message, None).await;

    // Print in catalog order rather than map order.
    for profile in state.engine.catalog().profiles() {
        if let Some(text) = responses.get(&profile.name) {
            println!("{}", profile.name);
            println!("{}", "-".repeat(profile.name.len()));
            println!("{text}");
            println!();
        }
    }
    Ok(())
}

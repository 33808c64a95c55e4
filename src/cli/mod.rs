pub mod extract;
pub mod personalities;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use companion::memory::ChatMessage;

/// Accepted shapes for a messages file.
#[derive(Deserialize)]
#[serde(untagged)]
enum MessagesFile {
    Bare(Vec<ChatMessage>),
    Wrapped { messages: Vec<ChatMessage> },
}

/// Read chat messages from a JSON file, or stdin when `path` is `-`.
///
/// Accepts either a bare array or an object with a `messages` array.
pub fn read_messages(path: &Path) -> Result<Vec<ChatMessage>> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read messages from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    parse_messages(&contents)
}

fn parse_messages(contents: &str) -> Result<Vec<ChatMessage>> {
    let file: MessagesFile =
        serde_json::from_str(contents).context("messages must be a JSON array or {\"messages\": [...]}")?;
    Ok(match file {
        MessagesFile::Bare(messages) | MessagesFile::Wrapped { messages } => messages,
    })
}

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::TranscriptRecord;

/// Write transcript records as JSON, compact by default
pub fn write_records(records: &[TranscriptRecord], path: &Path, pretty: bool) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    if pretty {
        serde_json::to_writer_pretty(file, records).context("Failed to write JSON")?;
    } else {
        serde_json::to_writer(file, records).context("Failed to write JSON")?;
    }
    Ok(())
}

/// Read transcript records back from a JSON file
pub fn read_records(path: &Path) -> Result<Vec<TranscriptRecord>> {
    info!("processing {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse records: {:?}", path))
}

/// Render records as plain narration text, one paragraph per record:
/// "<character> <text>" for spoken records, the bare character for
/// announcement markers. Records with neither are skipped.
pub fn render_narration(records: &[TranscriptRecord]) -> String {
    let paragraphs: Vec<String> = records
        .iter()
        .filter_map(|record| match (&record.character, &record.text) {
            (Some(character), Some(text)) => Some(format!("{} {}", character, text)),
            (Some(character), None) => Some(character.clone()),
            _ => None,
        })
        .collect();
    paragraphs.join("\n\n")
}

/// Render record files to a narration text file
pub fn write_narration(records: &[TranscriptRecord], path: &Path) -> Result<()> {
    let character_count: usize = records
        .iter()
        .filter_map(|r| r.text.as_ref().map(String::len))
        .sum();
    info!("writing to {} ({} characters)", path.display(), character_count);

    std::fs::write(path, render_narration(records))
        .with_context(|| format!("Failed to write narration: {:?}", path))
}

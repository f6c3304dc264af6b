use tracing::debug;

use crate::models::{PageLine, TranscriptRecord};
use crate::stages::PatternSet;
use crate::voices::{normalize_key, RegistryError, VoiceRegistry};

/// Narrator label used for stage directions and witness announcements
const AUDIO_DESCRIPTION: &str = "AUDIO DESCRIPTION:";

/// Perform Stage 2: build transcript records from collated turns
///
/// Each turn is classified (examiner announcement, witness call, stage
/// direction, or plain attributed speech) and resolved against the
/// voice registry. Turns with no recognizable speaker and no witness
/// call are continuation artifacts and are dropped. Record order
/// matches turn order.
pub fn build_records(
    turns: &[PageLine],
    patterns: &PatternSet,
    registry: &mut VoiceRegistry,
) -> Result<Vec<TranscriptRecord>, RegistryError> {
    let mut records = Vec::new();

    for turn in turns {
        let Some(line_text) = turn.line_text.as_deref() else {
            // blank lines pass through as bare page/line markers
            records.push(TranscriptRecord::marker(
                turn.page.clone(),
                turn.line_number.clone(),
            ));
            continue;
        };

        // an examination announcement re-points the examiner role and
        // is kept as a marker carrying the raw announcement
        if let Some(examiner) = patterns.examiner_name(line_text) {
            let key = normalize_key(examiner);
            debug!("examiner {} takes over Q", key);
            registry.assign_alias(&key, &["Q"])?;
            records.push(TranscriptRecord {
                page: turn.page.clone(),
                line_number: turn.line_number.clone(),
                character: Some(line_text.to_string()),
                voice: None,
                text: None,
            });
            continue;
        }

        let segments = patterns.split_character(line_text);
        let Some(person) = segments.first().copied() else {
            continue;
        };
        let text = segments.get(1).copied();

        let witness_called = patterns.is_witness_called(person);

        // a witness announcement re-points the witness roles
        if let Some(witness) = text.and_then(|t| patterns.witness_name(t)) {
            let key = normalize_key(witness);
            debug!("witness {} takes over THEWITNESS/A", key);
            registry.assign_alias(&key, &["THEWITNESS", "A"])?;
        }

        if text.is_none() && !witness_called {
            // no attribution possible; drop the turn
            continue;
        }

        let person = patterns.fix_ocr_misread(person);
        let is_direction = person.starts_with('(');

        let voice = if witness_called {
            registry.resolve("THEWITNESS")?
        } else {
            registry.resolve(&normalize_key(&person))?
        };

        let character = if is_direction || witness_called {
            AUDIO_DESCRIPTION.to_string()
        } else {
            person.trim().to_string()
        };

        let record_text = if witness_called {
            person.trim().to_string()
        } else if is_direction {
            let text = text.unwrap_or_default().trim();
            text.strip_suffix(')').unwrap_or(text).to_string()
        } else {
            text.unwrap_or_default().trim().to_string()
        };

        records.push(TranscriptRecord {
            page: turn.page.clone(),
            line_number: turn.line_number.clone(),
            character: Some(character),
            voice: Some(voice),
            text: Some(record_text),
        });
    }

    Ok(records)
}

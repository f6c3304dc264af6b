use tracing::debug;

use crate::models::PageLine;
use crate::stages::{ParseMode, PatternSet};

/// Perform Stage 1: collate lines into speaker turns
///
/// Single forward pass over the normalized lines. A line starts a new
/// turn when it is blank, matches the speaker-label pattern for the
/// current parse mode, follows a page-continuation marker, or announces
/// a witness being called; any other line is a continuation and is
/// appended to the previous turn with a joining space.
///
/// The pass also tracks the current speaker so that text continued onto
/// a new page can be re-attributed to them.
pub fn collate_turns(lines: Vec<PageLine>, patterns: &PatternSet) -> Vec<PageLine> {
    let mut turns: Vec<PageLine> = Vec::new();
    let mut mode = ParseMode::Normal;
    let mut current_speaker = String::new();
    let mut new_page = false;
    let mut witness_called = false;

    for index in 0..lines.len() {
        let line = &lines[index];
        let text = line.line_text.as_deref();

        if mode == ParseMode::Examination
            && text.is_some_and(|t| patterns.is_witness_excused(t))
        {
            debug!("examination ended at {} line {:?}", line.page, line.line_number);
            mode = ParseMode::Normal;
        }
        if mode == ParseMode::Normal && text.is_some_and(|t| patterns.is_examination(t)) {
            debug!("examination started at {} line {:?}", line.page, line.line_number);
            mode = ParseMode::Examination;
        }

        // one-line lookahead for witness announcements split across lines
        let next_text = lines.get(index + 1).and_then(|l| l.line_text.as_deref());
        witness_called = !witness_called
            && (text.is_some_and(|t| patterns.is_witness_called(t))
                || next_text.is_some_and(|t| patterns.is_witness_called_next(t)));

        let starts_turn = text.is_none()
            || text.is_some_and(|t| patterns.speaker(mode).is_match(t))
            || new_page
            || witness_called;

        if !starts_turn {
            witness_called = false;
            match turns.last_mut() {
                Some(turn) => {
                    turn.line_text = Some(match turn.line_text.take() {
                        Some(existing) => format!("{} {}", existing, text.unwrap_or_default()),
                        None => text.unwrap_or_default().to_string(),
                    });
                }
                // degenerate input starting mid-utterance
                None => turns.push(line.clone()),
            }
            continue;
        }

        // segments of the original text, before any page-continuation rewrite
        let segments: Vec<String> = text
            .map(|t| {
                patterns
                    .split_character(t)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut turn = line.clone();
        if new_page {
            if segments.len() > 1 {
                current_speaker = segments[0].clone();
            } else if let Some(t) = text {
                // text continued onto this page: restore the speaker label,
                // except on directions, examination markers and attributions
                if !t.starts_with('(')
                    && !patterns.is_examination(t)
                    && !patterns.is_by_attribution(t)
                {
                    turn.line_text = Some(format!("{}{}", current_speaker, t));
                }
            }
            new_page = false;
        } else if text.is_some_and(|t| patterns.is_page_continued(t)) {
            new_page = true;
        }

        turns.push(turn);

        if segments.len() > 1 && !segments[0].trim().starts_with('(') {
            current_speaker = segments[0].clone();
        }
    }

    turns
}

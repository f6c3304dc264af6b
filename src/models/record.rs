use serde::{Deserialize, Serialize};

/// Final output unit: one attributed utterance or marker line.
///
/// A record with neither `text` nor `voice` is a marker (blank line,
/// page break, or an examination announcement kept for context).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    /// Page marker (e.g. "Page 2568")
    pub page: String,
    /// Printed line number within the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<String>,
    /// Speaker label as spoken by the narrator (e.g. "THE COURT:",
    /// "AUDIO DESCRIPTION:"), or the raw announcement text for markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    /// Assigned synthetic voice identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Utterance text to synthesize
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TranscriptRecord {
    /// Marker record carrying only position metadata
    pub fn marker(page: impl Into<String>, line_number: Option<String>) -> Self {
        Self {
            page: page.into(),
            line_number,
            character: None,
            voice: None,
            text: None,
        }
    }

    /// Whether this record produces audio downstream
    pub fn is_spoken(&self) -> bool {
        self.text.is_some() && self.voice.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_serializes_without_absent_fields() {
        let record = TranscriptRecord::marker("Page 2568", Some("12".to_string()));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"page":"Page 2568","lineNumber":"12"}"#);
    }

    #[test]
    fn test_spoken_record_round_trips_field_names() {
        let record = TranscriptRecord {
            page: "Page 3".to_string(),
            line_number: Some("7".to_string()),
            character: Some("THE COURT:".to_string()),
            voice: Some("female_voice_1".to_string()),
            text: Some("Good morning.".to_string()),
        };
        assert!(record.is_spoken());

        let json = serde_json::to_string(&record).unwrap();
        let parsed: TranscriptRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert!(json.contains(r#""lineNumber":"7""#));
    }
}

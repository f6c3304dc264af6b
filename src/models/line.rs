/// One transcript line after page normalization.
///
/// `line_text` starts as the text to the right of the line-number token
/// and absorbs continuation lines during collation, so a collated
/// `PageLine` represents one full speaker turn (or a marker/blank line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    /// Page marker this line belongs to (e.g. "Page 2568")
    pub page: String,
    /// Printed line number, absent for blank separator lines
    pub line_number: Option<String>,
    /// Utterance text, absent for blank separator lines
    pub line_text: Option<String>,
}

impl PageLine {
    pub fn new(
        page: impl Into<String>,
        line_number: Option<String>,
        line_text: Option<String>,
    ) -> Self {
        Self {
            page: page.into(),
            line_number,
            line_text,
        }
    }

    /// Whether this line carries any utterance text
    pub fn has_text(&self) -> bool {
        self.line_text.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_text() {
        let blank = PageLine::new("Page 1", None, None);
        assert!(!blank.has_text());

        let spoken = PageLine::new(
            "Page 1",
            Some("4".to_string()),
            Some("THE COURT: Good morning.".to_string()),
        );
        assert!(spoken.has_text());
    }
}

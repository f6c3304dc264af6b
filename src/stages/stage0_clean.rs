use tracing::debug;

use crate::models::PageLine;
use crate::stages::PatternSet;

/// Perform Stage 0: page normalization
///
/// For each page this strips the header line and the two-line court
/// reporter footer, takes the next line as the page marker, and splits
/// every remaining line into its printed line number and utterance text.
///
/// Pages too short to carry the expected structure yield truncated or
/// empty output rather than an error; validation is not this stage's job.
pub fn clean_pages(pages: Vec<Vec<String>>, patterns: &PatternSet) -> Vec<PageLine> {
    pages
        .into_iter()
        .flat_map(|page| clean_page(page, patterns))
        .collect()
}

fn clean_page(mut lines: Vec<String>, patterns: &PatternSet) -> Vec<PageLine> {
    // header
    if !lines.is_empty() {
        lines.remove(0);
    }
    // court reporter details
    lines.truncate(lines.len().saturating_sub(2));

    let page = if lines.is_empty() {
        String::new()
    } else {
        lines.remove(0).trim().to_string()
    };
    debug!("cleaning {} ({} lines)", page, lines.len());

    lines
        .iter()
        .map(|line| match patterns.split_line_number(line) {
            Some((number, text)) => PageLine::new(
                page.clone(),
                non_empty(number.trim()),
                non_empty(text.trim()),
            ),
            None => PageLine::new(page.clone(), None, None),
        })
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strips_header_marker_and_footer() {
        let patterns = PatternSet::new();
        let lines = clean_pages(
            vec![page(&[
                "HEADER",
                "Page 2568",
                "1 Q. Are you",
                "2 sure?",
                "Reporter Name",
                "Official Court Reporter",
            ])],
            &patterns,
        );

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].page, "Page 2568");
        assert_eq!(lines[0].line_number.as_deref(), Some("1"));
        assert_eq!(lines[0].line_text.as_deref(), Some("Q. Are you"));
        assert_eq!(lines[1].line_number.as_deref(), Some("2"));
        assert_eq!(lines[1].line_text.as_deref(), Some("sure?"));
    }

    #[test]
    fn test_blank_lines_have_no_number_or_text() {
        let patterns = PatternSet::new();
        let lines = clean_pages(
            vec![page(&["HEADER", "Page 3", "1 THE COURT: Yes.", "", "3", "f1", "f2"])],
            &patterns,
        );

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].line_number, None);
        assert_eq!(lines[1].line_text, None);
        // a bare line number yields no text
        assert_eq!(lines[2].line_number.as_deref(), Some("3"));
        assert_eq!(lines[2].line_text, None);
    }

    #[test]
    fn test_pages_concatenate_in_order() {
        let patterns = PatternSet::new();
        let lines = clean_pages(
            vec![
                page(&["H", "Page 1", "1 MR. BLANCHE: Morning.", "f1", "f2"]),
                page(&["H", "Page 2", "1 THE COURT: Morning.", "f1", "f2"]),
            ],
            &patterns,
        );

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].page, "Page 1");
        assert_eq!(lines[1].page, "Page 2");
    }

    #[test]
    fn test_short_page_yields_nothing() {
        let patterns = PatternSet::new();
        let lines = clean_pages(vec![page(&["HEADER", "f1", "f2"])], &patterns);
        assert!(lines.is_empty());
    }
}

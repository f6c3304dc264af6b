use regex::Regex;

/// Parsing state of the collation pass.
///
/// During direct/cross examination single-letter `Q`/`A` tokens denote
/// speaker turns, so the speaker-label pattern is broader there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Normal,
    Examination,
}

/// All patterns used by the reconstruction stages, compiled once.
#[derive(Debug)]
pub struct PatternSet {
    /// Splits the character part from the text (e.g. "THE COURT: Good morning")
    character_split: Regex,
    /// Identifies a speaker line during examination
    speaker_examination: Regex,
    /// Identifies a speaker line outside of examination
    speaker_normal: Regex,
    /// Splits the leading line-number token from the utterance text
    line_number: Regex,
    /// "SO-AND-SO, called as a witness" phrases
    witness_called: Regex,
    /// Start of a "herein, called as a witness" line (one-line lookahead)
    witness_called_next: Regex,
    /// End of a witness examination
    witness_excused: Regex,
    /// Start of a direct/cross examination
    examination: Regex,
    /// "(Continued from previous page)" markers
    page_continued: Regex,
    /// "BY MR. SO-AND-SO:" attribution lines
    by_attribution: Regex,
    /// Examination announcements naming the examiner
    examiner_announcement: Regex,
    /// Witness announcements naming the witness
    witness_announcement: Regex,
    /// Leading "O"/"0" token, a common OCR misread of "Q"
    ocr_misread_q: Regex,
}

impl PatternSet {
    pub fn new() -> Self {
        Self {
            character_split: Regex::new(
                r"(^\({1})|(^Q{1}\.\s)|(^Q{1}\s)|(^O{1}\.\s)|(^O{1}\s)|(^0{1}\.\s)|(^0{1}\s)|(^A{1}\.\s)|(^A{1}\s)|(^[A-Z .]*: )",
            )
            .expect("character split pattern"),
            speaker_examination: Regex::new(
                r"(^.*EXAMINATION)|(^\*{3,})|(^\({1})|(^Q\.?\s{1})|(^O\.?\s{1})|(^0\.?\s{1})|(^A\.?\s{1})|(^[A-Z .]*: )",
            )
            .expect("examination speaker pattern"),
            speaker_normal: Regex::new(r"(^.*EXAMINATION)|(^\*{3,})|(^\({1})|(^[A-Z .]*: )")
                .expect("normal speaker pattern"),
            line_number: Regex::new(r"^(\w{1,2} ?)(.*)").expect("line number pattern"),
            witness_called: Regex::new(r", called as a witness|, called as witness")
                .expect("witness called pattern"),
            witness_called_next: Regex::new(r"^(herein, )?called as (a )?witness")
                .expect("witness called lookahead pattern"),
            witness_excused: Regex::new(r".* the witness is excused .*")
                .expect("witness excused pattern"),
            examination: Regex::new(r".*EXAMINATION.*").expect("examination pattern"),
            page_continued: Regex::new(r"(?i)continued from.*previous page")
                .expect("page continuation pattern"),
            by_attribution: Regex::new(r"^BY .*").expect("by attribution pattern"),
            examiner_announcement: Regex::new(r".*EXAMINATION.*BY (.*:)|BY (.*:)")
                .expect("examiner announcement pattern"),
            witness_announcement: Regex::new(
                r"(?i)the people call ([a-zA-Z\s\.]*),?|the defense calls ([a-zA-Z\s\.]*),?",
            )
            .expect("witness announcement pattern"),
            ocr_misread_q: Regex::new(r"^[O0]\.? ").expect("ocr misread pattern"),
        }
    }

    /// Speaker-label pattern for the given parse mode
    pub fn speaker(&self, mode: ParseMode) -> &Regex {
        match mode {
            ParseMode::Normal => &self.speaker_normal,
            ParseMode::Examination => &self.speaker_examination,
        }
    }

    /// Split a line into its character and text segments.
    ///
    /// Yields at most two non-empty segments: the matched speaker label
    /// and the remainder. A line with no recognizable label comes back
    /// as a single segment.
    pub fn split_character<'t>(&self, text: &'t str) -> Vec<&'t str> {
        // every alternative is anchored, so a match is always at the start
        match self.character_split.find(text) {
            Some(m) => {
                let mut segments = vec![m.as_str()];
                let rest = &text[m.end()..];
                if !rest.is_empty() {
                    segments.push(rest);
                }
                segments
            }
            None => {
                if text.is_empty() {
                    vec![]
                } else {
                    vec![text]
                }
            }
        }
    }

    /// Split the leading line-number token from a raw page line
    pub fn split_line_number<'t>(&self, line: &'t str) -> Option<(&'t str, &'t str)> {
        self.line_number.captures(line).map(|caps| {
            let number = caps.get(1).map_or("", |m| m.as_str());
            let text = caps.get(2).map_or("", |m| m.as_str());
            (number, text)
        })
    }

    pub fn is_witness_called(&self, text: &str) -> bool {
        self.witness_called.is_match(text)
    }

    pub fn is_witness_called_next(&self, text: &str) -> bool {
        self.witness_called_next.is_match(text)
    }

    pub fn is_witness_excused(&self, text: &str) -> bool {
        self.witness_excused.is_match(text)
    }

    pub fn is_examination(&self, text: &str) -> bool {
        self.examination.is_match(text)
    }

    pub fn is_page_continued(&self, text: &str) -> bool {
        self.page_continued.is_match(text)
    }

    pub fn is_by_attribution(&self, text: &str) -> bool {
        self.by_attribution.is_match(text)
    }

    /// Extract the examiner name from an examination announcement
    /// (e.g. "DIRECT EXAMINATION BY MR. STEINGLASS:" or "BY MR. STEINGLASS:")
    pub fn examiner_name<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.examiner_announcement.captures(text).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
        })
    }

    /// Extract the witness name from a "the People call ..." /
    /// "the defense calls ..." announcement
    pub fn witness_name<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.witness_announcement.captures(text).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
        })
    }

    /// Rewrite a leading "O"/"0" token to "Q"
    pub fn fix_ocr_misread<'t>(&self, person: &'t str) -> std::borrow::Cow<'t, str> {
        self.ocr_misread_q.replace(person, "Q ")
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

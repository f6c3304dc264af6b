pub mod io;
pub mod models;
pub mod stages;
pub mod voices;

pub use io::{read_page_file, read_page_files, read_records, render_narration, write_narration, write_records};
pub use models::{PageLine, TranscriptRecord};
pub use stages::{build_records, clean_pages, collate_turns, ParseMode, PatternSet};
pub use voices::{normalize_key, Gender, RegistryError, VoiceRegistry};

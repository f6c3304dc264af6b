use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use colloquy::{
    build_records, clean_pages, collate_turns, read_page_files, read_records, write_narration,
    write_records, PatternSet, VoiceRegistry,
};

#[derive(Parser)]
#[command(name = "colloquy")]
#[command(author, version, about = "Court transcript reconstruction and voice assignment pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct page text files into a structured transcript
    Process {
        /// Page text files, in transcript order
        files: Vec<PathBuf>,

        /// Voice store to use for characters
        #[arg(short, long, default_value = "voices.json")]
        voices: PathBuf,

        /// Output file for the structured transcript (JSON)
        #[arg(short, long, default_value = "transcript.json")]
        output: PathBuf,

        /// Format the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Verbose output
        #[arg(long)]
        verbose: bool,
    },

    /// Render structured transcripts as plain narration text
    Render {
        /// Structured transcript files (JSON)
        files: Vec<PathBuf>,

        /// Output text file
        #[arg(short, long, default_value = "transcript.txt")]
        output: PathBuf,

        /// Verbose output
        #[arg(long)]
        verbose: bool,
    },

    /// Analyze a structured transcript without making changes
    Analyze {
        /// Structured transcript file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            files,
            voices,
            output,
            pretty,
            verbose,
        } => {
            setup_logging(verbose);
            process_transcript(files, voices, output, pretty)
        }
        Commands::Render {
            files,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            render_transcript(files, output)
        }
        Commands::Analyze { input, verbose } => {
            setup_logging(verbose);
            analyze_transcript(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn process_transcript(
    files: Vec<PathBuf>,
    voices: PathBuf,
    output: PathBuf,
    pretty: bool,
) -> Result<()> {
    let mut registry =
        VoiceRegistry::load(&voices).context("Failed to load the voice store")?;
    let patterns = PatternSet::new();

    let pages = read_page_files(&files)?;
    let cleansed = clean_pages(pages, &patterns);
    info!("normalized {} lines", cleansed.len());

    let turns = collate_turns(cleansed, &patterns);
    info!("collated {} turns", turns.len());

    let records = build_records(&turns, &patterns, &mut registry)
        .context("Failed to assign voices")?;
    info!(
        "built {} records using {} voices",
        records.len(),
        registry.len()
    );

    write_records(&records, &output, pretty)?;
    info!("output written to {}", output.display());
    Ok(())
}

fn render_transcript(files: Vec<PathBuf>, output: PathBuf) -> Result<()> {
    let mut records = Vec::new();
    for file in &files {
        records.extend(read_records(file)?);
    }
    write_narration(&records, &output)?;
    info!("narration written to {}", output.display());
    Ok(())
}

fn analyze_transcript(input: PathBuf) -> Result<()> {
    let records = read_records(&input)?;

    let pages: std::collections::BTreeSet<&str> =
        records.iter().map(|r| r.page.as_str()).collect();
    let spoken = records.iter().filter(|r| r.is_spoken()).count();
    let markers = records.iter().filter(|r| r.character.is_none()).count();

    println!("Transcript Analysis");
    println!("==================");
    println!("Total records: {}", records.len());
    println!("Pages: {}", pages.len());
    println!("Spoken records: {}", spoken);
    println!("Marker records: {}", markers);
    println!();

    // words and voice per character
    let mut characters: BTreeMap<&str, (usize, usize, Option<&str>)> = BTreeMap::new();
    for record in &records {
        let (Some(character), Some(text)) = (&record.character, &record.text) else {
            continue;
        };
        let entry = characters.entry(character.as_str()).or_default();
        entry.0 += 1;
        entry.1 += text.split_whitespace().count();
        entry.2 = record.voice.as_deref();
    }

    println!("Characters");
    println!("----------");
    for (character, (turns, words, voice)) in &characters {
        println!(
            "{} {} turns, {} words, voice {}",
            character,
            turns,
            words,
            voice.unwrap_or("-")
        );
    }

    Ok(())
}

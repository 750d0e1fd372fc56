use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use umscan::{
    clean_tier, corpus, discover_documents, load_document, scan_document, BatchMetadata,
    BatchOutput, CorpusConfig, EventTable, ScanConfig,
};

#[derive(Parser)]
#[command(name = "umscan")]
#[command(author, version, about = "Disfluency event extraction from force-aligned TextGrid corpora", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a corpus of TextGrids and write the event table
    Scan {
        /// Dataset root containing site directories
        #[arg(short, long)]
        root: PathBuf,

        /// Output file for the tab-separated event table
        #[arg(short, long)]
        output: PathBuf,

        /// Optional JSON rendering of the event records
        #[arg(long)]
        json: Option<PathBuf>,

        /// Minimum pause duration in seconds for chunk boundaries
        #[arg(long, default_value = "0.2")]
        min_pause: f64,

        /// Site directory name prefix
        #[arg(long, default_value = "PH")]
        site_prefix: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a single TextGrid without writing output
    Analyze {
        /// Input TextGrid file
        #[arg(short, long)]
        input: PathBuf,

        /// Minimum pause duration in seconds for chunk boundaries
        #[arg(long, default_value = "0.2")]
        min_pause: f64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            root,
            output,
            json,
            min_pause,
            site_prefix,
            verbose,
        } => {
            setup_logging(verbose);
            scan_corpus(root, output, json, min_pause, site_prefix).await
        }
        Commands::Analyze {
            input,
            min_pause,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_document(input, min_pause)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn scan_corpus(
    root: PathBuf,
    output: PathBuf,
    json: Option<PathBuf>,
    min_pause: f64,
    site_prefix: String,
) -> Result<()> {
    let corpus_config = CorpusConfig { site_prefix };
    let entries = discover_documents(&root, &corpus_config)?;
    info!(
        "Found {} annotation documents under {:?}",
        entries.len(),
        root
    );

    let scan_config = ScanConfig {
        min_pause_duration: min_pause,
        ..Default::default()
    };

    // One blocking task per document; joined in discovery order so the
    // batch output stays deterministic whatever the completion order.
    let mut handles = Vec::with_capacity(entries.len());
    for entry in entries {
        let config = scan_config.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let result = load_document(&entry.path, &entry.doc_id)
                .and_then(|doc| scan_document(&doc, &config).map_err(Into::into));
            (entry, result)
        }));
    }

    let mut events = Vec::new();
    let mut documents_scanned = 0usize;
    let mut documents_skipped = 0usize;
    for handle in handles {
        let (entry, result) = handle.await?;
        match result {
            Ok(scan) => {
                info!(
                    "{}: {} events, {} words",
                    entry.doc_id,
                    scan.events.len(),
                    scan.word_count
                );
                events.extend(scan.events);
                documents_scanned += 1;
            }
            Err(err) => {
                warn!("Skipping {:?}: {err:#}", entry.path);
                documents_skipped += 1;
            }
        }
    }

    EventTable::new(&events).write_file(&output)?;
    info!("Event table written to {:?}", output);

    if let Some(json_path) = json {
        let metadata = BatchMetadata {
            total_events: events.len(),
            documents_scanned,
            documents_skipped,
        };
        BatchOutput::new(&events, metadata).write_json(&json_path)?;
        info!("JSON output written to {:?}", json_path);
    }

    info!(
        "Complete: {} events from {} documents ({} skipped)",
        events.len(),
        documents_scanned,
        documents_skipped
    );

    Ok(())
}

fn analyze_document(input: PathBuf, min_pause: f64) -> Result<()> {
    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document");
    let doc_id = corpus::doc_id_for(file_name, "PH");
    info!("Analyzing {:?}", input);

    let doc = load_document(&input, &doc_id)?;
    let clean_words = clean_tier(&doc.words);
    let clean_phones = clean_tier(&doc.phones);

    println!("Document Analysis");
    println!("=================");
    println!("Identifier: {}", doc.doc_id);
    println!(
        "Phone tier: {} intervals ({} after cleaning)",
        doc.phones.len(),
        clean_phones.len()
    );
    println!(
        "Word tier: {} intervals ({} after cleaning)",
        doc.words.len(),
        clean_words.len()
    );
    println!(
        "Duration: {:.2}s",
        doc.words.end_time() - doc.words.start_time()
    );

    let qualifying_pauses = clean_words
        .intervals()
        .iter()
        .filter(|iv| iv.is_silence() && iv.duration() >= min_pause)
        .count();
    println!(
        "Qualifying pauses (>= {:.2}s): {}",
        min_pause, qualifying_pauses
    );
    println!();

    let config = ScanConfig {
        min_pause_duration: min_pause,
        ..Default::default()
    };
    let result = scan_document(&doc, &config)?;

    println!("Disfluency Events");
    println!("-----------------");
    for event in &result.events {
        let next_seg = event
            .next_seg
            .as_ref()
            .map(|seg| seg.label.as_str())
            .unwrap_or("-");
        println!(
            "{:>8} at {:.3}-{:.3}s, chunk {:.3}-{:.3}s, next segment {}, word #{}",
            event.word,
            event.start_time,
            event.end_time,
            event.chunk_start,
            event.chunk_end,
            next_seg,
            event.n_words
        );
    }
    println!();
    println!(
        "Total: {} events, {} words",
        result.events.len(),
        result.word_count
    );

    Ok(())
}

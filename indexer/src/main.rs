mod command;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use session::{run, OutputFormat};
use stemdex::{BTreeBackend, BenchmarkLog, Config, Database, HashBackend, IndexBackend, TimingSink, TrackingMode, TrieBackend};
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Compressed prefix trie
    Trie,
    /// Ordered map
    Btree,
    /// Hash map
    Hash,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query an in-memory inverted index from a script of instructions", long_about = None)]
struct Cli {
    /// Term -> postings store
    #[arg(long, value_enum, default_value_t = Backend::Trie)]
    backend: Backend,
    /// Keep document paths and re-check every query against the source files
    #[arg(long, default_value_t = false)]
    verify: bool,
    /// Index lowercased words without stemming
    #[arg(long, default_value_t = false)]
    no_stemming: bool,
    /// Omit posting lines from text query output
    #[arg(long, default_value_t = false)]
    quiet: bool,
    /// Print one JSON object per output line instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Write per-operation timings to this file
    #[arg(long)]
    benchmark: Option<PathBuf>,
    /// Read instructions from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let started = Instant::now();

    let config = Config {
        tracking: if cli.verify { TrackingMode::Verifying } else { TrackingMode::Counting },
        stemming: !cli.no_stemming,
        print_postings: !cli.quiet,
    };
    let timings: Option<Arc<dyn TimingSink>> = match &cli.benchmark {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot write benchmark file {}", path.display()))?;
            Some(Arc::new(BenchmarkLog::new(BufWriter::new(file))))
        }
        None => None,
    };
    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot read script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let format = if cli.json { OutputFormat::Json } else { OutputFormat::Text };

    tracing::info!(backend = ?cli.backend, ?config, ?format, "starting session");
    match cli.backend {
        Backend::Trie => start_session::<TrieBackend>(config, timings.clone(), input, format)?,
        Backend::Btree => start_session::<BTreeBackend>(config, timings.clone(), input, format)?,
        Backend::Hash => start_session::<HashBackend>(config, timings.clone(), input, format)?,
    }

    if let Some(sink) = &timings {
        sink.record("Total", "", started.elapsed());
    }
    Ok(())
}

fn start_session<B: IndexBackend>(
    config: Config,
    timings: Option<Arc<dyn TimingSink>>,
    input: impl BufRead,
    format: OutputFormat,
) -> Result<()> {
    let mut db: Database<B> = Database::new(config);
    if let Some(sink) = timings {
        db = db.with_timings(sink);
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&mut db, input, &mut out, format)?;
    let info = db.info();
    tracing::info!(backend = B::NAME, documents = info.documents, terms = info.terms, "session finished");
    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use revsearch_core::engine::DEFAULT_LIMIT;
use revsearch_core::{Lexicon, Mode, RatingFilterEngine, Review, SearchConfig, SearchEngine, SearchHit};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "revsearch")]
#[command(about = "Boolean opinion search over product reviews", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Boolean search only
    Baseline,
    /// Boolean search plus opinion-polarity rating filter
    Rating,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search loop over a review corpus
    Repl {
        /// Corpus file, one JSON review per line
        #[arg(long)]
        corpus: PathBuf,
        /// Boolean mode for plain queries
        #[arg(long, default_value = "and")]
        mode: Mode,
        /// Results per query
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long, value_enum, default_value_t = Method::Baseline)]
        method: Method,
        /// Positive opinion lexicon (required for --method rating)
        #[arg(long)]
        positive: Option<PathBuf>,
        /// Negative opinion lexicon (required for --method rating)
        #[arg(long)]
        negative: Option<PathBuf>,
    },
    /// Run one query and write matching review ids to a file, one per line
    Batch {
        #[arg(long)]
        corpus: PathBuf,
        /// Query string, plain or aspect:opinion
        #[arg(long)]
        query: String,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value = "and")]
        mode: Mode,
        #[arg(long, default_value_t = 1000)]
        limit: usize,
        #[arg(long, value_enum, default_value_t = Method::Baseline)]
        method: Method,
        #[arg(long)]
        positive: Option<PathBuf>,
        #[arg(long)]
        negative: Option<PathBuf>,
    },
}

enum Searcher {
    Baseline(SearchEngine),
    Rating(RatingFilterEngine),
}

impl Searcher {
    fn search(&self, query: &str, mode: Mode, limit: usize) -> Vec<SearchHit<'_>> {
        match self {
            Searcher::Baseline(engine) => engine.search(query, mode, limit),
            Searcher::Rating(engine) => engine.search(query, limit),
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Repl { corpus, mode, limit, method, positive, negative } => {
            let searcher = build_searcher(&corpus, method, positive, negative)?;
            repl(&searcher, mode, limit)
        }
        Commands::Batch { corpus, query, output, mode, limit, method, positive, negative } => {
            let searcher = build_searcher(&corpus, method, positive, negative)?;
            let hits = searcher.search(&query, mode, limit);
            write_ids(&output, &hits)?;
            tracing::info!(count = hits.len(), output = %output.display(), "wrote review ids");
            Ok(())
        }
    }
}

fn build_searcher(
    corpus: &Path,
    method: Method,
    positive: Option<PathBuf>,
    negative: Option<PathBuf>,
) -> Result<Searcher> {
    let reviews = load_corpus(corpus)?;
    let engine = SearchEngine::new(reviews, SearchConfig::default());
    match method {
        Method::Baseline => Ok(Searcher::Baseline(engine)),
        Method::Rating => {
            let positive =
                positive.context("--positive lexicon path is required with --method rating")?;
            let negative =
                negative.context("--negative lexicon path is required with --method rating")?;
            let lexicon = Lexicon::load(&positive, &negative)?;
            Ok(Searcher::Rating(RatingFilterEngine::new(engine, lexicon)))
        }
    }
}

/// Load a JSONL corpus: one review object per line, blank lines skipped.
fn load_corpus(path: &Path) -> Result<Vec<Review>> {
    let f = File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;
    let mut reviews = Vec::new();
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let review: Review = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: bad review record", path.display(), lineno + 1))?;
        reviews.push(review);
    }
    tracing::info!(num_reviews = reviews.len(), "corpus loaded");
    Ok(reviews)
}

fn repl(searcher: &Searcher, mode: Mode, limit: usize) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("query (empty to exit)> ");
        io::stdout().flush()?;
        let mut raw = String::new();
        if stdin.lock().read_line(&mut raw)? == 0 {
            break;
        }
        let raw = raw.trim();
        if raw.is_empty() {
            break;
        }

        let hits = searcher.search(raw, mode, limit);
        if hits.is_empty() {
            println!("No results found.\n");
            continue;
        }
        for (rank, hit) in hits.iter().enumerate() {
            let title = hit.review.title.as_deref().unwrap_or("<no title>");
            println!("[{}] score={} | {} | {}", rank + 1, hit.score, hit.review.id, title);
            println!("    {}", snippet(&hit.review.text, 200));
        }
        println!();
    }
    Ok(())
}

fn snippet(text: &str, max_chars: usize) -> String {
    let mut s: String = text.chars().take(max_chars).collect();
    s = s.replace('\n', " ");
    if text.chars().count() > max_chars {
        s.push_str("...");
    }
    s
}

fn write_ids(output: &Path, hits: &[SearchHit<'_>]) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut f = File::create(output)
        .with_context(|| format!("creating output file {}", output.display()))?;
    for hit in hits {
        writeln!(f, "{}", hit.review.id)?;
    }
    Ok(())
}

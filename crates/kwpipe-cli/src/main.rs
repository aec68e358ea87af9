use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kwpipe_core::{DocumentSource, ResearchOptions};
use kwpipe_local::file_source::FileSource;
use kwpipe_local::serp::SerpSource;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "kwpipe")]
#[command(about = "Keyword research from search results (SERP mining + ranking)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run keyword research for one query (writes a JSON artifact).
    Research(ResearchCmd),
    /// Print version info.
    Version,
}

#[derive(clap::Args, Debug)]
struct ResearchCmd {
    /// Search query. Must be non-blank.
    #[arg(long)]
    query: String,
    /// Rank documents from a JSONL file instead of fetching a SERP.
    ///
    /// One document per line: {"text": "...", "tier": "important" | "normal"}.
    #[arg(long)]
    docs_file: Option<std::path::PathBuf>,
    /// Max result pages to fetch and mine for body text.
    #[arg(long, env = "KWPIPE_MAX_SITES", default_value_t = 5)]
    max_sites: usize,
    /// Timeout per network operation (ms).
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,
    /// Hard cap on bytes read per fetched body.
    #[arg(long, default_value_t = 2_000_000)]
    max_bytes: u64,
    /// Cap on the ranked output length.
    #[arg(long, default_value_t = kwpipe_core::MAX_KEYWORDS)]
    max_keywords: usize,
    /// Output JSON path (default: stdout; "-" also means stdout).
    #[arg(long)]
    out: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("kwpipe=info,kwpipe_core=info,kwpipe_local=info")
                }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Research(cmd) => run_research(cmd).await,
        Commands::Version => {
            let v = serde_json::json!({
                "schema_version": 1,
                "name": "kwpipe",
                "version": env!("CARGO_PKG_VERSION"),
            });
            println!("{}", serde_json::to_string_pretty(&v)?);
            Ok(())
        }
    }
}

async fn run_research(cmd: ResearchCmd) -> Result<()> {
    let query = cmd.query.trim().to_string();
    if query.is_empty() {
        // Boundary check: the engine is never invoked for a blank query.
        bail!("query must not be blank");
    }

    let opts = ResearchOptions {
        max_sites: cmd.max_sites,
        timeout_ms: cmd.timeout_ms,
        max_bytes: cmd.max_bytes,
        max_keywords: cmd.max_keywords,
    };

    let source: Box<dyn DocumentSource> = match &cmd.docs_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(SerpSource::from_env(kwpipe_local::default_client()?)),
    };

    let t0 = Instant::now();
    let keywords = kwpipe_core::research(&query, source.as_ref(), &opts).await;
    let elapsed_ms = t0.elapsed().as_millis();

    let artifact = serde_json::json!({
        "schema_version": 1,
        "query": query,
        "source": source.name(),
        "elapsed_ms": elapsed_ms,
        "keyword_count": keywords.len(),
        "keywords": keywords,
    });
    let rendered = serde_json::to_string_pretty(&artifact)?;

    match cmd.out.as_deref() {
        None => println!("{rendered}"),
        Some(p) if p == std::path::Path::new("-") => println!("{rendered}"),
        Some(p) => {
            std::fs::write(p, rendered.as_bytes())
                .with_context(|| format!("write artifact to {}", p.display()))?;
            tracing::info!(path = %p.display(), "wrote artifact");
        }
    }
    Ok(())
}

mod config;
mod errors;
mod jobs;
mod letters;
mod llm_client;
mod pipeline;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::profile::profile_dataset;
use crate::jobs::search::{search_jobs_json, SearchQuery};
use crate::letters::drafter::LlmLetterDrafter;
use crate::llm_client::LlmClient;
use crate::pipeline::{run_pipeline, PipelineSettings};
use crate::resume::extract::extract_text_from_pdf_async;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "jobmatch", version, about = "Match a résumé to job listings and draft cover letters")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve,
    /// Extract a résumé PDF, find matching jobs, and write cover letters.
    Run {
        /// Path to the résumé PDF.
        resume: PathBuf,
    },
    /// Print matching job rows as JSON records.
    Search {
        /// Column to search; repeat for several.
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,
        #[arg(short, long)]
        keyword: String,
        /// Defaults to SEARCH_LIMIT.
        #[arg(short, long, allow_hyphen_values = true)]
        limit: Option<i64>,
    },
    /// Print row count and missing values per column.
    Profile,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging. Logs go to stderr so `search` and
    // `profile` output stays pipeable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Run { resume } => run_once(config, resume).await,
        Command::Search {
            columns,
            keyword,
            limit,
        } => {
            let query = SearchQuery {
                columns,
                keyword,
                limit: limit.unwrap_or(config.search_limit),
            };
            println!("{}", search_jobs_json(&config.jobs_dataset_path, &query)?);
            Ok(())
        }
        Command::Profile => {
            let profile = profile_dataset(&config.jobs_dataset_path)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.require_api_key()?.to_string())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    info!("Job dataset: {}", config.jobs_dataset_path.display());

    let state = AppState {
        config: config.clone(),
        drafter: Arc::new(LlmLetterDrafter(llm)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_once(config: Config, resume: PathBuf) -> Result<()> {
    let llm = LlmClient::new(config.require_api_key()?.to_string())?;
    let drafter = LlmLetterDrafter(llm);

    info!("Parsing résumé {}", resume.display());
    let resume_text = extract_text_from_pdf_async(resume).await?;

    let settings = PipelineSettings::from_config(&config);
    let outcome = run_pipeline(&resume_text, &settings, &drafter).await?;

    match &outcome.output_path {
        Some(path) => println!(
            "Wrote {} cover letter(s) for keyword {:?} to {}",
            outcome.letters.len(),
            outcome.keyword,
            path.display()
        ),
        None => println!(
            "No job listings matched keyword {:?} in {:?}; nothing written",
            outcome.keyword, outcome.columns
        ),
    }
    Ok(())
}

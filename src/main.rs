use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use resume_ranker::config::Config;
use resume_ranker::embeddings::{self, download};
use resume_ranker::output::export::{self, ExportFormat};
use resume_ranker::output::{self as report, terminal};
use resume_ranker::profile::summary::SummaryExtractor;
use resume_ranker::{ingest, pipeline, BatchOptions, FeatureExtractor, JobRequirements};

/// Resume ranker: extract candidate profiles from resumes and rank them
/// against weighted job requirements.
#[derive(Parser)]
#[command(name = "resume-ranker", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every resume in a directory against a requirements file
    Rank {
        /// Job requirements JSON file
        #[arg(long)]
        requirements: PathBuf,

        /// Directory of plain-text resumes (.txt / .md)
        #[arg(long, default_value = "resumes")]
        resumes_dir: PathBuf,

        /// Only show/export the top N candidates (default: all)
        #[arg(long)]
        top: Option<usize>,

        /// Export format when --output is given
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,

        /// Write the ranking to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of resumes to process in parallel (default: RESUME_RANKER_CONCURRENCY or 8)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Print the profile extracted from a single resume
    Extract {
        /// Plain-text resume file
        file: PathBuf,
    },

    /// Download the ONNX sentence embedding model (~90 MB)
    DownloadModel,

    /// Validate a requirements file without ranking anything
    CheckRequirements {
        /// Job requirements JSON file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Json => ExportFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("resume_ranker=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            requirements,
            resumes_dir,
            top,
            format,
            output,
            concurrency,
        } => {
            let config = Config::load()?;
            config.require_embedder()?;

            // Fail on bad requirements before reading any resume
            let requirements = JobRequirements::load(&requirements)?;
            let resumes = ingest::load_resumes(&resumes_dir)?;
            println!(
                "Ranking {} resumes from {}...",
                resumes.len(),
                resumes_dir.display()
            );

            let provider = embeddings::build_provider(&config);
            info!(provider = provider.name(), "Embedding provider ready");

            let options = BatchOptions {
                concurrency: concurrency.unwrap_or(config.concurrency).max(1),
                show_progress: true,
            };
            let outcome = pipeline::rank_resumes(
                Some(&requirements),
                resumes,
                Arc::new(feature_extractor(&config)),
                provider,
                &options,
            )
            .await
            .context("Ranking failed")?;

            let shown = report::top_n(&outcome.candidates, top);
            terminal::display_ranking(shown, outcome.candidates.len());
            terminal::display_warnings(&outcome.warnings, outcome.is_partial());

            if let Some(path) = output {
                export::write_report(&path, format.into(), shown)?;
                println!(
                    "\n{}",
                    format!("Wrote {} candidates to {}", shown.len(), path.display()).bold()
                );
            }
        }

        Commands::Extract { file } => {
            let config = Config::load()?;
            let doc = ingest::load_resume(&file)?;
            let profile = feature_extractor(&config).extract(&doc.filename, &doc.raw_text);
            terminal::display_profile(&profile);

            let missing = profile.missing_fields();
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
                println!(
                    "\n  {} not found: {}",
                    "~".yellow(),
                    names.join(", ").dimmed()
                );
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading ONNX embedding model...");
            println!("  Destination: {}", model_dir.display());

            download::download_model(model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("Semantic scoring will now use the sentence transformer.");
        }

        Commands::CheckRequirements { file } => {
            let requirements = JobRequirements::load(&file)?;
            terminal::display_requirements(&requirements);
        }
    }

    Ok(())
}

/// Default extractor with the configured summary length.
fn feature_extractor(config: &Config) -> FeatureExtractor {
    FeatureExtractor::default().with_summary(SummaryExtractor {
        sentences: config.summary_sentences,
    })
}

mod render;

use brandmon_core::AppConfig;
use brandmon_sentiment::{
    predict_text, run_search, Acquirer, LexiconClassifier, NeutralBand, SearchRequest,
    SentimentClassifier, TeiClassifier,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brandmon-cli")]
#[command(about = "Brand sentiment monitor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Acquire recent posts for a query, label them and report the trend
    Search {
        /// Brand or product to search for
        #[arg(long)]
        query: String,

        /// Maximum number of posts to acquire (defaults to `BRANDMON_DEFAULT_LIMIT`)
        #[arg(long)]
        limit: Option<usize>,

        /// Only posts from this UTC day onwards (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Lower bound of the neutral confidence band
        #[arg(long)]
        neutral_lo: Option<f64>,

        /// Upper bound of the neutral confidence band
        #[arg(long)]
        neutral_hi: Option<f64>,

        #[arg(long, value_enum, default_value_t = ClassifierKind::Tei)]
        classifier: ClassifierKind,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Label a single piece of text
    Predict {
        #[arg(long)]
        text: String,

        #[arg(long, value_enum, default_value_t = ClassifierKind::Tei)]
        classifier: ClassifierKind,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ClassifierKind {
    /// Remote TEI sequence-classification server
    Tei,
    /// Built-in keyword lexicon, no network
    Lexicon,
}

fn build_classifier(
    kind: ClassifierKind,
    config: &AppConfig,
) -> anyhow::Result<Box<dyn SentimentClassifier>> {
    Ok(match kind {
        ClassifierKind::Tei => Box::new(TeiClassifier::new(
            &config.classifier_url,
            config.classifier_timeout_secs,
            &config.user_agent,
        )?),
        ClassifierKind::Lexicon => Box::new(LexiconClassifier),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = brandmon_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            query,
            limit,
            since,
            neutral_lo,
            neutral_hi,
            classifier,
            json,
        } => {
            let request = SearchRequest {
                query,
                limit: limit.unwrap_or(config.default_limit),
                since,
                neutral_lo: neutral_lo.unwrap_or(config.neutral_lo),
                neutral_hi: neutral_hi.unwrap_or(config.neutral_hi),
            };
            let acquirer = Acquirer::from_config(&config)?;
            let classifier = build_classifier(classifier, &config)?;
            tracing::debug!(sources = ?acquirer.source_names(), "acquisition chain ready");

            let report = run_search(&acquirer, classifier.as_ref(), &request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_report(&report));
            }
        }
        Commands::Predict {
            text,
            classifier,
            json,
        } => {
            let band = NeutralBand::new(config.neutral_lo, config.neutral_hi)?;
            let classifier = build_classifier(classifier, &config)?;
            let prediction = predict_text(&text, classifier.as_ref(), band).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                println!("{}", render::render_prediction(&prediction));
            }
        }
    }

    Ok(())
}

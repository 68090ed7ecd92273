use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use esr::EngineConfig;
use esr_core::compliance::{ComplianceContext, SessionType};
use esr_core::json::ClassifyOutput;
use esr_core::evidence::{
    validate_source, EvidenceRecommendation, EvidenceSource, FormattedEvidence, SourceCandidate,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "esr")]
#[command(about = "Evidence strength rating, crisis severity and compliance checks")]
#[command(version)]
struct Args {
    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rate a JSON array of evidence sources
    Rate {
        /// File holding the sources
        file: PathBuf,

        /// Reference date for recency (default: today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the display summary for a recommendation instead of the bare rating
        #[arg(long)]
        display: bool,

        /// Recommendation text used with --display
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Classify the crisis severity of a message
    Classify {
        /// Message text (read from stdin when omitted)
        text: Option<String>,
    },

    /// Check a candidate source record before admission
    Validate {
        /// File holding the candidate
        file: PathBuf,
    },

    /// Check coaching speech for compliance problems
    Compliance {
        /// Text to check (read from stdin when omitted)
        text: Option<String>,

        /// The text comes from the client rather than the coach
        #[arg(long)]
        client: bool,

        /// Vet a proposed coach response before it is spoken
        #[arg(long, conflicts_with = "client")]
        pre_speech: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    esr::tracing::init_with_filter(&args.log_level);

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Rate {
            file,
            today,
            display,
            text,
        } => {
            let sources: Vec<EvidenceSource> = serde_json::from_str(&read_file(&file)?)?;
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            let rater = config.rater();
            info!("Rating {} sources", sources.len());

            if display {
                let recommendation = EvidenceRecommendation::new(text, "", &sources, &rater, today);
                print_json(&FormattedEvidence::new(&recommendation, &sources))?;
            } else {
                print_json(&rater.rate(&sources, today))?;
            }
        }
        Command::Classify { text } => {
            let text = text_or_stdin(text)?;
            let assessment = config.classifier().assess(&text);
            let escalation = config.escalation().decide(assessment.tier);
            print_json(&ClassifyOutput {
                assessment,
                escalation,
            })?;
        }
        Command::Validate { file } => {
            let candidate: SourceCandidate = serde_json::from_str(&read_file(&file)?)?;
            print_json(&validate_source(&candidate))?;
        }
        Command::Compliance {
            text,
            client,
            pre_speech,
        } => {
            let text = text_or_stdin(text)?;
            let checker = config.compliance_checker()?;
            if pre_speech {
                print_json(&checker.pre_speech_check(&text))?;
            } else {
                let context = if client {
                    ComplianceContext::client(SessionType::LiveClient)
                } else {
                    ComplianceContext::coach(SessionType::LiveClient)
                };
                print_json(&checker.check(&text, context))?;
            }
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> esr::Result<String> {
    debug!("Reading {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}

fn text_or_stdin(text: Option<String>) -> esr::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> esr::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

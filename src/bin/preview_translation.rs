//! Preview binary - shows how a stored translation map resolves for a locale
//!
//! Usage:
//!   cargo run --bin preview -- data/title.json                  # Resolve for LANGUAGE_CODE
//!   cargo run --bin preview -- data/title.json --locale fr_FR   # Resolve for another locale
//!   cargo run --bin preview -- data/title.json --metrics        # Also print resolution metrics
//!
//! Optional environment variables:
//! - LANGUAGE_CODE (defaults to en-us; empty disables the fallback)
//! - USE_I18N (defaults to true)

use anyhow::{bail, Context, Result};
use json_model_translations::i18n::{ResolutionMetrics, ThreadLocale, TranslationMapValidator};
use json_model_translations::{
    BaseField, ReadOutcome, TranslationContext, TranslationHolder, TranslationSettings,
};
use std::fs;
use tracing::{info, warn};

struct PreviewArgs {
    path: String,
    locale: Option<String>,
    show_metrics: bool,
}

impl PreviewArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut path = None;
        let mut locale = None;
        let mut show_metrics = false;

        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--locale" => {
                    locale = Some(iter.next().context("--locale needs a value")?.clone());
                }
                "--metrics" => show_metrics = true,
                other if path.is_none() => path = Some(other.to_string()),
                other => bail!("Unexpected argument: {}", other),
            }
        }

        Ok(Self {
            path: path.context("Usage: preview <translations.json> [--locale CODE] [--metrics]")?,
            locale,
            show_metrics,
        })
    }
}

/// Which slot answered, for the summary line.
fn describe_outcome(outcome: &ReadOutcome<'_>) -> &'static str {
    match outcome {
        ReadOutcome::Unset => "unset",
        ReadOutcome::Active(_) => "active locale",
        ReadOutcome::Fallback(_) => "default locale",
        ReadOutcome::Missing => "none",
    }
}

fn main() -> Result<()> {
    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("json_model_translations=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let args = PreviewArgs::parse(&args)?;
    let settings = TranslationSettings::from_env()?;

    let contents = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read translations from {}", args.path))?;
    let holder = TranslationHolder::from_json_str(&contents)
        .with_context(|| format!("Failed to load translations from {}", args.path))?;

    if let Some(map) = holder.get_raw_map() {
        info!("Loaded {} translations from {}", map.len(), args.path);
        let report = TranslationMapValidator::validate(map, &BaseField::Json);
        for warning in &report.warnings {
            warn!("{}", warning);
        }
    } else {
        info!("{} holds no translations (null)", args.path);
    }

    let _guard = args.locale.as_deref().map(ThreadLocale::override_locale);
    let ctx = TranslationContext::from_source(&ThreadLocale, &settings);
    let outcome = holder.read_outcome(&ctx)?;
    ResolutionMetrics::global().record_read(&outcome);

    println!(
        "Active locale:  {}",
        ctx.active.as_ref().map(|c| c.as_str()).unwrap_or("-")
    );
    println!(
        "Default locale: {}",
        ctx.default.as_ref().map(|c| c.as_str()).unwrap_or("-")
    );
    println!("Answered by:    {}", describe_outcome(&outcome));
    match outcome.value() {
        Some(value) => println!("Value:          {}", serde_json::to_string_pretty(value)?),
        None => println!("Value:          (no translation)"),
    }

    if args.show_metrics {
        let report = ResolutionMetrics::global().report();
        println!();
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

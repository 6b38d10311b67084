use std::fs;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ampquote_core::assemble::QuoteAssembler;
use ampquote_core::clock::SystemClock;
use ampquote_core::config::{AppConfig, LoadOptions};
use ampquote_core::domain::job::{JobType, QuoteDraft};
use ampquote_core::domain::materials::MaterialList;
use ampquote_core::domain::quote::QuoteRecord;
use ampquote_core::jitter::StdJitter;
use ampquote_generator::{
    GenerateError, GeneratorRuntime, HttpQuoteClient, MemorySink, NoopQuoteClient,
    RemoteQuoteClient, SessionHandle, TracingNotifier,
};

use crate::commands::CommandResult;

/// A drafted quote as written by the operator: the form fields plus an
/// optional job type and working material list.
#[derive(Debug, Deserialize)]
struct DraftFile {
    #[serde(default)]
    job_type: Option<String>,
    #[serde(default)]
    materials: Vec<DraftMaterial>,
    #[serde(flatten)]
    draft: QuoteDraft,
}

#[derive(Debug, Deserialize)]
struct DraftMaterial {
    description: String,
    quantity: u32,
    unit_price: Decimal,
}

#[derive(Debug, Serialize)]
struct GenerateOutput {
    command: &'static str,
    status: &'static str,
    source: &'static str,
    quote: QuoteRecord,
}

pub fn run(input: &Path, use_remote: bool, seed: Option<u64>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "generate",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let raw = match fs::read_to_string(input) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "generate",
                "draft_read",
                format!("could not read draft file `{}`: {error}", input.display()),
                3,
            );
        }
    };

    let draft_file: DraftFile = match toml::from_str(&raw) {
        Ok(draft_file) => draft_file,
        Err(error) => {
            return CommandResult::failure(
                "generate",
                "draft_parse",
                format!("could not parse draft file `{}`: {error}", input.display()),
                4,
            );
        }
    };

    let client: Box<dyn RemoteQuoteClient> = if use_remote {
        match HttpQuoteClient::from_config(&config.remote) {
            Ok(client) => Box::new(client),
            Err(error) => {
                return CommandResult::failure(
                    "generate",
                    "remote_not_configured",
                    format!("--remote was requested but {error}"),
                    6,
                );
            }
        }
    } else {
        Box::new(NoopQuoteClient)
    };

    let job_type = draft_file.job_type.as_deref().map(JobType::from_key);
    let materials = MaterialList::from_entries(
        draft_file
            .materials
            .into_iter()
            .map(|material| (material.description, material.quantity, material.unit_price)),
    );

    let jitter = match seed {
        Some(seed) => StdJitter::seeded(seed),
        None => StdJitter::from_entropy(),
    };

    let sink = Arc::new(MemorySink::default());
    let runtime = GeneratorRuntime::new(
        QuoteAssembler::new(SystemClock, config.pricing.daily_rate),
        client,
        Arc::new(TracingNotifier),
        sink.clone(),
        Box::new(jitter),
        SessionHandle::new(),
    );

    let tokio_runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "generate",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                7,
            );
        }
    };

    let outcome = tokio_runtime
        .block_on(runtime.generate(&draft_file.draft, job_type, &materials));

    match outcome {
        Ok(outcome) => {
            let Some(record) = sink.records().into_iter().next() else {
                return CommandResult::failure(
                    "generate",
                    "sink_empty",
                    "generation succeeded but no quote reached the sink",
                    8,
                );
            };
            render_quote(outcome.source.key(), record)
        }
        Err(GenerateError::Validation(error)) => {
            CommandResult::failure("generate", "draft_validation", error.to_string(), 5)
        }
        Err(error) => CommandResult::failure("generate", "generation", error.to_string(), 8),
    }
}

fn render_quote(source: &'static str, quote: QuoteRecord) -> CommandResult {
    let payload = GenerateOutput { command: "generate", status: "ok", source, quote };
    match serde_json::to_string_pretty(&payload) {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure(
            "generate",
            "serialization",
            format!("could not serialize quote: {error}"),
            8,
        ),
    }
}

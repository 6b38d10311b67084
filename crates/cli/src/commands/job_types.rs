use serde::Serialize;

use ampquote_core::defaults::base_labour_days;
use ampquote_core::domain::job::JobType;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct JobTypesOutput {
    command: &'static str,
    status: &'static str,
    job_types: Vec<JobTypeEntry>,
}

#[derive(Debug, Serialize)]
struct JobTypeEntry {
    key: &'static str,
    label: &'static str,
    /// Base labour days before complexity jitter, quoted for a
    /// three-bedroom property.
    base_labour_days: f64,
}

pub fn run() -> CommandResult {
    let payload = JobTypesOutput {
        command: "job-types",
        status: "ok",
        job_types: JobType::ALL
            .into_iter()
            .map(|job_type| JobTypeEntry {
                key: job_type.key(),
                label: job_type.label(),
                base_labour_days: base_labour_days(job_type, 3),
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&payload) {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure(
            "job-types",
            "serialization",
            format!("could not serialize job types: {error}"),
            8,
        ),
    }
}

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info, warn};

use ampquote_core::assemble::{AssemblyInput, QuoteAssembler};
use ampquote_core::clock::Clock;
use ampquote_core::defaults;
use ampquote_core::domain::job::{JobType, QuoteDraft};
use ampquote_core::domain::materials::MaterialList;
use ampquote_core::domain::quote::QuoteRecord;
use ampquote_core::errors::DomainError;
use ampquote_core::jitter::Jitter;
use ampquote_core::remote::QuoteRequest;

use crate::client::{RemoteError, RemoteQuoteClient};
use crate::notify::Notifier;

const SUCCESS_MESSAGE: &str = "Your quote has been generated successfully.";

/// Observable phase of the generation workflow. One session moves
/// `Idle -> Requesting -> AssemblingRemote | AssemblingLocal -> Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    Requesting,
    AssemblingRemote,
    AssemblingLocal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteSource {
    Remote,
    Local,
}

impl QuoteSource {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteOutcome {
    pub source: QuoteSource,
    pub quote_number: String,
}

/// The only ways generation can refuse to produce a quote. Remote failures
/// are not among them; those fall back to the local path.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("a quote generation is already in flight for this session")]
    Busy,
    #[error("the drafting session ended before the quote resolved")]
    SessionEnded,
}

/// Caller-supplied destination for finished quotes. The runtime keeps no
/// copy of a delivered record.
pub trait QuoteSink: Send + Sync {
    fn deliver(&self, record: QuoteRecord);
}

#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<QuoteRecord>>,
}

impl MemorySink {
    pub fn records(&self) -> Vec<QuoteRecord> {
        self.records.lock().map(|records| records.clone()).unwrap_or_default()
    }
}

impl QuoteSink for MemorySink {
    fn deliver(&self, record: QuoteRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

/// Identity of one drafting session. Results resolved after the session ends
/// are discarded rather than applied to whatever replaced it.
#[derive(Clone, Debug, Default)]
pub struct SessionHandle {
    epoch: Arc<AtomicU64>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the current session; any in-flight generation becomes stale.
    pub fn end(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    fn current(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}

/// The fallback controller: validates preconditions, asks the remote
/// composer once, and assembles from the remote payload or from local
/// defaults. Once preconditions pass, a quote is always produced.
pub struct GeneratorRuntime<C: Clock> {
    assembler: QuoteAssembler<C>,
    client: Box<dyn RemoteQuoteClient>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn QuoteSink>,
    jitter: Mutex<Box<dyn Jitter>>,
    session: SessionHandle,
    busy: AtomicBool,
    state: Mutex<GeneratorState>,
}

impl<C: Clock> GeneratorRuntime<C> {
    pub fn new(
        assembler: QuoteAssembler<C>,
        client: Box<dyn RemoteQuoteClient>,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn QuoteSink>,
        jitter: Box<dyn Jitter>,
        session: SessionHandle,
    ) -> Self {
        Self {
            assembler,
            client,
            notifier,
            sink,
            jitter: Mutex::new(jitter),
            session,
            busy: AtomicBool::new(false),
            state: Mutex::new(GeneratorState::Idle),
        }
    }

    pub fn state(&self) -> GeneratorState {
        self.state.lock().map(|state| *state).unwrap_or(GeneratorState::Idle)
    }

    fn set_state(&self, next: GeneratorState) {
        if let Ok(mut state) = self.state.lock() {
            *state = next;
        }
    }

    /// One user-initiated generate action. At most one may be in flight; a
    /// re-entrant call is rejected with [`GenerateError::Busy`] rather than
    /// queued, mirroring a disabled submit button.
    pub async fn generate(
        &self,
        draft: &QuoteDraft,
        job_type: Option<JobType>,
        materials: &MaterialList,
    ) -> Result<QuoteOutcome, GenerateError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(GenerateError::Busy);
        }

        let result = self.generate_inner(draft, job_type, materials).await;

        self.set_state(GeneratorState::Idle);
        self.busy.store(false, Ordering::SeqCst);
        result
    }

    async fn generate_inner(
        &self,
        draft: &QuoteDraft,
        job_type: Option<JobType>,
        materials: &MaterialList,
    ) -> Result<QuoteOutcome, GenerateError> {
        let job_type = match job_type {
            Some(job_type) => job_type,
            None => return Err(self.reject(DomainError::MissingJobType)),
        };
        if !draft.has_client_name() {
            return Err(self.reject(DomainError::MissingClientName));
        }

        let epoch = self.session.current();
        self.set_state(GeneratorState::Requesting);

        let request = QuoteRequest::from_draft(draft, job_type);
        info!(
            event_name = "generator.remote.request",
            job_type = job_type.key(),
            "requesting remote quote composition"
        );

        let remote_payload = match self.client.compose(&request).await {
            Ok(response) => {
                let payload = response.into_usable();
                if payload.is_none() {
                    warn!(
                        event_name = "generator.remote.unusable",
                        job_type = job_type.key(),
                        "remote response carried no usable quote payload; using local defaults"
                    );
                }
                payload
            }
            Err(RemoteError::NotConfigured) => {
                debug!(
                    event_name = "generator.remote.skipped",
                    job_type = job_type.key(),
                    "remote composition not configured; using local defaults"
                );
                None
            }
            Err(error) => {
                warn!(
                    event_name = "generator.remote.failed",
                    job_type = job_type.key(),
                    error = %error,
                    "remote quote composition failed; using local defaults"
                );
                None
            }
        };

        if self.session.current() != epoch {
            debug!(
                event_name = "generator.stale_result",
                "discarding quote resolved after its session ended"
            );
            return Err(GenerateError::SessionEnded);
        }

        let source =
            if remote_payload.is_some() { QuoteSource::Remote } else { QuoteSource::Local };
        self.set_state(match source {
            QuoteSource::Remote => GeneratorState::AssemblingRemote,
            QuoteSource::Local => GeneratorState::AssemblingLocal,
        });

        let mut jitter = self.jitter.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let working = if materials.is_empty() {
            defaults::default_materials(job_type, jitter.as_mut())
        } else {
            materials.clone()
        };

        let record = self.assembler.assemble(
            AssemblyInput {
                draft,
                job_type,
                materials: &working,
                remote: remote_payload.as_ref(),
            },
            jitter.as_mut(),
        );
        drop(jitter);

        let outcome =
            QuoteOutcome { source, quote_number: record.quote_number.clone() };
        info!(
            event_name = "generator.quote_emitted",
            quote_number = %record.quote_number,
            source = source.key(),
            total = %record.financials.total,
            "quote assembled and handed to sink"
        );

        self.sink.deliver(record);
        self.notifier.success(SUCCESS_MESSAGE);
        Ok(outcome)
    }

    fn reject(&self, error: DomainError) -> GenerateError {
        self.notifier.validation_failure(error.user_message());
        GenerateError::Validation(error)
    }
}

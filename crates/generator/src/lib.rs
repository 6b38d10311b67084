pub mod client;
pub mod notify;
pub mod runtime;

pub use client::{HttpQuoteClient, NoopQuoteClient, RemoteError, RemoteQuoteClient};
pub use notify::{MemoryNotifier, Notification, Notifier, TracingNotifier};
pub use runtime::{
    GenerateError, GeneratorRuntime, GeneratorState, MemorySink, QuoteOutcome, QuoteSink,
    QuoteSource, SessionHandle,
};

//! In-memory data and query layer for a personal journaling application.
//!
//! The presentation shell owns screens and forms; this crate owns the
//! journals, the tags, the active filter criteria, and the change events the
//! shell subscribes to. Nothing here touches disk or network: state lives for
//! the lifetime of the process.

mod errors;
mod events;
mod filter;
mod models;
mod store;

pub use errors::{AppError, AppResult};
pub use events::{EventBus, EventEnvelope};
pub use filter::filter_journals;
pub use models::{FilterCriteria, Journal, Tag};
pub use store::JournalStore;

/// Installs the process-wide tracing subscriber. The embedding shell calls
/// this once at startup; `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|error| error.to_string())
}

pub mod config;
pub mod corpus; // Reference tables: training cases, severity weights, guidance
pub mod inference; // Lexicon, decision trees, aggregation, severity, follow-up
pub mod triage; // Caller-facing engine: diagnose, suggestions, follow-up

use tracing_subscriber::EnvFilter;

pub use triage::{DiagnoseRequest, DiagnosisReport, FollowupRequest, TriageEngine, TriageError};

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
/// Calling it again after a subscriber is set is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

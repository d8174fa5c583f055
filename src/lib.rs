pub mod chart;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod store;

pub use config::Config;
pub use error::{ExtractError, FetchError, PersistError, PipelineError, RenderError};
pub use pipeline::{run, EmptyStage, RunOutcome};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the fmt subscriber used by every binary. `RUST_LOG` wins over the
/// default filter.
pub fn init_tracing() {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,seatscraper=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
}

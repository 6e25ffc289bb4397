//! Console output for assembly runs.

use std::io::{self, IsTerminal};

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Verbosity;

impl Verbosity {
    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// One line per event: level and message, no timestamp or target.
pub fn console_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
}

/// Plain progress lines on stdout. `RUST_LOG` wins unless a verbosity flag was given.
pub fn init(verbosity: Verbosity) -> Result<(), TryInitError> {
    let filter = match verbosity {
        Verbosity::Normal => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(verbosity.directive())),
        other => EnvFilter::new(other.directive()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer(io::stdout, io::stdout().is_terminal()))
        .try_init()
}

//! Diagnostics output of the binary.
//!
//! Nothing is installed unless `LOGTRAIL_LOG` or `RUST_LOG` is set. Both take
//! `RUST_LOG` filter syntax, `LOGTRAIL_LOG` winning when both are present.
//! `LOGTRAIL_LOG_FORMAT=json` switches to one JSON object per event.
//!
//! Logs always go to stderr: stdout carries either the edited file or LSP
//! traffic.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "LOGTRAIL_LOG";
const FORMAT_VAR: &str = "LOGTRAIL_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

pub(crate) fn init() {
    let filter = match std::env::var(LOG_VAR) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() => {
            EnvFilter::from_default_env()
        }
        Err(_) => return,
    };

    match LogFormat::parse(&std::env::var(FORMAT_VAR).unwrap_or_default()) {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
        }
    }
}

//! Logging setup for the `rasterbox` binary.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. [`init`] installs one that writes
//! `timestamp - LEVEL - message` lines to stderr:
//!
//! ```text
//! 2026-10-18T09:12:44.120Z - DEBUG - decoded image path=in.png width=640 height=480
//! 2026-10-18T09:12:44.131Z - WARN - unsupported conversion, image left unchanged from=2 to=1
//! ```
//!
//! The level comes from `[logging] level` in `config.toml`, `--verbose`
//! raises it to `debug`, and a `RUST_LOG` environment variable overrides
//! both.

use crate::config::LoggingConfig;
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Target used for the default filter directive.
pub const TARGET: &str = "rasterbox";

/// Event formatter producing `timestamp - LEVEL - message fields`.
#[derive(Debug, Default)]
pub struct DashFormat<T = SystemTime> {
    timer: T,
}

impl<T> DashFormat<T> {
    pub fn with_timer(timer: T) -> Self {
        Self { timer }
    }
}

impl<S, N, T> FormatEvent<S, N> for DashFormat<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;
        write!(writer, " - {} - ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Filter directive for a configured level, before `RUST_LOG` is consulted.
pub fn directive(config: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { config.level.as_str() };
    format!("{TARGET}={level}")
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// is kept.
pub fn init(config: &LoggingConfig, verbose: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(config, verbose)));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .event_format(DashFormat::<SystemTime>::default())
        .try_init()
        .is_ok()
}

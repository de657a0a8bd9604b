//! Diagnostic logging setup
//!
//! Progress for humans goes to stderr through `eprintln!`; this subscriber only
//! carries `tracing` events. `STATDOC_LOG` takes an `EnvFilter` directive and
//! wins over the verbosity flag.

use owo_colors::OwoColorize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "STATDOC_LOG";

/// `[LEVEL] [target]: fields` with a coloured level
pub struct LogFormatter;

impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let level = match *meta.level() {
            Level::ERROR => "ERROR".red().to_string(),
            Level::WARN => "WARN".yellow().to_string(),
            Level::INFO => "INFO".green().to_string(),
            Level::DEBUG => "DEBUG".blue().to_string(),
            Level::TRACE => "TRACE".purple().to_string(),
        };
        write!(writer, "[{level}] [{}]: ", meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(LogFormatter)
        .try_init();
}

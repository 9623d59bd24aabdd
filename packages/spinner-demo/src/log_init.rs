use std::io::Write as _;
use std::sync::OnceLock;

use env_filter::{Builder as LogEnvBuilder, Filter as LogEnvFilter};
use log::LevelFilter;

static LOG_FILTER: OnceLock<LogEnvFilter> = OnceLock::new();

/// Install the logger. `level` is the verbosity from the command line,
/// `-2` (quietest) to `2` (most verbose)
///
/// If `RUST_LOG` is set, it filters the records instead, but never hides
/// what the verbosity flags asked for.
pub fn init(level: i8) {
    let level = match level {
        ..=-2 => LevelFilter::Error,
        -1 => LevelFilter::Warn,
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let env_rust_log = std::env::var("RUST_LOG");
    let log_level = match env_rust_log {
        Ok(value) if !value.is_empty() => {
            let mut builder = LogEnvBuilder::new();
            let filter = builder.parse(&value).build();
            let log_level = filter.filter();
            let _ = LOG_FILTER.set(filter);
            log_level.max(level)
        }
        _ => level,
    };
    log::set_max_level(log_level);
    let _ = log::set_logger(&LogImpl);
}

/// Writes records to stderr, leaving stdout to the indicators
struct LogImpl;
impl log::Log for LogImpl {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        match LOG_FILTER.get() {
            Some(filter) => filter.enabled(metadata),
            None => metadata.level() <= log::max_level(),
        }
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut message = String::new();
        if record.level() == log::Level::Trace {
            // source location in trace messages
            if let Some(p) = record.module_path() {
                // aliased crate, use the shorthand
                let p = p.strip_prefix("pistonite_").unwrap_or(p);
                message.push('[');
                message.push_str(p);
                if let Some(l) = record.line() {
                    message.push(':');
                    message.push_str(&format!("{l}"));
                }
                message.push_str("] ");
            }
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{:<5} {message}{}",
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

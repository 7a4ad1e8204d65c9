use anyhow::{Context, Result};
use chrono::Local;
use std::{
    borrow::Cow,
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::settings::LoggingSettings;

// --- Formatter ---

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// One line per event: `<local time> <LEVEL> <crate>:<file>:<line> <fields>`.
struct LocalFmt;

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// `salary-core/src/calculations/salary.rs` becomes
/// `core:calculations/salary.rs`. Other paths are kept as they are.
fn short_source(file: &str) -> Cow<'_, str> {
    [("salary-core/src/", "core"), ("salary-cli/src/", "cli")]
        .into_iter()
        .find_map(|(prefix, label)| {
            file.strip_prefix(prefix)
                .map(|rest| Cow::Owned(format!("{label}:{rest}")))
        })
        .unwrap_or(Cow::Borrowed(file))
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let (dim, cyan, color, reset) = if writer.has_ansi_escapes() {
            (DIM, CYAN, level_color(meta.level()), RESET)
        } else {
            ("", "", "", "")
        };

        let now = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        write!(writer, "{dim}{now}{reset} {color}{:>5}{reset} ", meta.level())?;
        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            write!(writer, "{cyan}{}:{line}{reset} ", short_source(file))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Public API ---

/// Builds the level filter: `RUST_LOG` when set, otherwise `level`.
/// Accepts a bare level ("warn", "debug", ...) or a full directive.
pub fn make_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}")),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped. Stdout
///   is left for JSON output.
/// - File: plain text, appended, only when `settings.file` is set.
/// - Level: `RUST_LOG` if set, else `settings.level`.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let level_filter = make_filter(&settings.level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = match &settings.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn short_source_labels_workspace_crates() {
        assert_eq!(
            short_source("salary-core/src/calculations/salary.rs"),
            "core:calculations/salary.rs"
        );
        assert_eq!(short_source("salary-cli/src/commands.rs"), "cli:commands.rs");
        assert_eq!(short_source("/rustc/lib.rs"), "/rustc/lib.rs");
    }

    #[test]
    fn plain_lines_carry_level_source_and_fields() {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(LocalFmt)
            .with_writer(buffer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(kids = 2, "returning approximate gross salary");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains(" WARN cli:logging.rs:"), "{output}");
        assert!(output.contains("returning approximate gross salary kids=2"), "{output}");
        assert!(!output.contains('\x1b'), "{output}");
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn open_log_file_reports_bad_path() {
        let err = open_log_file(Path::new("/no/such/dir/salary.log")).unwrap_err();

        assert!(err.to_string().contains("/no/such/dir/salary.log"));
    }
}

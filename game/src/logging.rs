use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

pub const LOG_FILE_ENV: &str = "WRISTFLAP_LOG_FILE";

/// Installs the global subscriber: `RUST_LOG` filter (default `info`), compact stderr output,
/// and a daily-rolling file when `WRISTFLAP_LOG_FILE` is set.
///
/// Keep the returned guard alive until exit or buffered file lines are lost.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let (file_layer, guard) = match std::env::var(LOG_FILE_ENV) {
        Ok(log_path) if !log_path.is_empty() => {
            let path = Path::new(&log_path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("wristflap.log"));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file_name));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .compact();
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    std::panic::set_hook(Box::new(|info| {
        let mut msg = String::new();
        if let Some(loc) = info.location() {
            msg.push_str(&format!("panic at {}:{}:{} ", loc.file(), loc.line(), loc.column()));
        }
        if let Some(s) = info.payload().downcast_ref::<&str>() {
            msg.push_str(s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            msg.push_str(s);
        } else {
            msg.push_str("<non-string panic>");
        }
        let bt = std::backtrace::Backtrace::force_capture();
        tracing::error!("{msg}\nBacktrace:\n{bt}");
    }));

    guard
}

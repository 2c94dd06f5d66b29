use std::io::{self, Write};

use attendance_registry::config::Logging;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::{EnvFilter, Registry, prelude::*};

pub struct LoggingHandle {
    _vec: Vec<WorkerGuard>,
}

pub fn init_logging(cfg: &Logging) -> Option<LoggingHandle> {
    if !cfg.output.stdout && !cfg.output.file {
        return None;
    }

    let Logging {
        output,
        file_path,
        level,
    } = cfg.clone();

    let mut guards: Vec<WorkerGuard> = Vec::new();

    let env_filter = if let Ok(env_filter) = EnvFilter::try_from_default_env()
    {
        env_filter
    } else {
        EnvFilter::new(level)
    };

    let stdout_layer = output.stdout.then(|| {
        let (stdout_nb, guard) = NonBlocking::new(io::stdout());
        guards.push(guard);

        let mw = {
            let nb = stdout_nb.clone();
            BoxMakeWriter::new(move || -> Box<dyn Write + Send + Sync> {
                Box::new(nb.clone())
            })
        };

        fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(mw)
    });

    let file_layer = output.file.then(|| {
        std::fs::create_dir_all(&file_path).ok();

        let appender =
            tracing_appender::rolling::never(&file_path, "attendance.log");
        let (file_nb, guard) = NonBlocking::new(appender);
        guards.push(guard);

        let mw = {
            let nb = file_nb.clone();
            BoxMakeWriter::new(move || -> Box<dyn Write + Send + Sync> {
                Box::new(nb.clone())
            })
        };

        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(mw)
    });

    let subscriber = Registry::default()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);

    // If a subscriber is running (e.g. tests)
    if subscriber.try_init().is_err() {
        return None;
    }

    Some(LoggingHandle { _vec: guards })
}

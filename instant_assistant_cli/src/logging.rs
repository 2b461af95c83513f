//! Logger setup
//!
//! Log lines and the upload bar share stderr. Records are written with the
//! bars of a shared `MultiProgress` cleared, then the bars are redrawn below.

use indicatif::MultiProgress;
use log::{LevelFilter, Log, Metadata, Record};

/// env_logger that suspends the progress bars while it writes
struct SuspendingLogger {
    inner: env_logger::Logger,
    bars: MultiProgress,
}

impl Log for SuspendingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.inner.enabled(record.metadata()) {
            self.bars.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the global logger
///
/// Returns the bar group that progress rendering must draw into.
pub fn init(debug: bool) -> MultiProgress {
    let bars = MultiProgress::new();
    let logger = builder(debug).build();
    let max_level = logger.filter();

    let installed = log::set_boxed_logger(Box::new(SuspendingLogger {
        inner: logger,
        bars: bars.clone(),
    }));
    if installed.is_ok() {
        log::set_max_level(max_level);
    }

    bars
}

fn builder(debug: bool) -> env_logger::Builder {
    if debug {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        builder
            .filter_level(LevelFilter::Info)
            .filter_module("instant_assistant_core", LevelFilter::Debug)
            .filter_module("instant_assistant_cli", LevelFilter::Debug)
            .filter_module("instant_assistant", LevelFilter::Debug)
            .format_timestamp_millis();
        builder
    } else {
        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
        builder.format_timestamp(None).format_target(false);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::{ProgressBar, ProgressDrawTarget};
    use log::Level;

    #[test]
    fn test_debug_builder_enables_crate_debug() {
        let logger = builder(true).build();
        assert!(logger.filter() >= LevelFilter::Debug);
    }

    #[test]
    fn test_log_line_leaves_bar_in_place() {
        let bars = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let bar = bars.add(ProgressBar::new(3));
        bar.set_position(2);
        let logger = SuspendingLogger {
            inner: builder(true).build(),
            bars: bars.clone(),
        };

        logger.log(
            &Record::builder()
                .args(format_args!("Uploaded notes.md"))
                .level(Level::Info)
                .target("instant_assistant_core::provision")
                .build(),
        );
        logger.flush();

        assert_eq!(bar.position(), 2);
        assert!(!bar.is_finished());
    }
}

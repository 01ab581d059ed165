use log::{Log, Metadata, Record};

/// Prints log records to stdout, prefixed with where they were logged.
pub(crate) struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let file = record.file().unwrap_or("?");
        let line = record.line().unwrap_or_default();
        println!("{file}:{line}: {}: {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

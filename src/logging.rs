use std::fmt;
use std::io::Write;
use std::sync::Arc;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};

pub const TARGET: &str = "smartsheet_bulkedit";

/// Logging handle owned by the service and its client.
///
/// Records go to the injected sink rather than the process-wide logger, so a
/// service (or a test) decides where its messages end up for its lifetime.
#[derive(Clone)]
pub struct ServiceLog {
    sink: Arc<dyn Log>,
}

impl ServiceLog {
    pub fn new(sink: Arc<dyn Log>) -> Self {
        Self { sink }
    }

    /// Forward to whatever logger `log` has installed for the process.
    pub fn global() -> Self {
        Self::new(Arc::new(GlobalLog))
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(TARGET).build();
        if !self.sink.enabled(&metadata) {
            return;
        }
        self.sink.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .module_path(Some(module_path!()))
                .build(),
        );
    }
}

impl fmt::Debug for ServiceLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceLog").finish_non_exhaustive()
    }
}

struct GlobalLog;

impl Log for GlobalLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            log::logger().log(record);
        }
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// Plain stderr logger for the command-line tool.
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(StderrLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{} {:<5} {}",
            Local::now().format("%H:%M:%S"),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

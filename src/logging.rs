// src/logging.rs

use crate::errors::{ParleyError, ParleyResult};
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Starts the file logger. The TUI owns stdout, so everything goes to
/// `logs/parley_<timestamp>.log`; level comes from config. The returned
/// handle must stay alive for the life of the program.
pub fn init_logging(log_level: &str) -> ParleyResult<LoggerHandle> {
    Logger::try_with_str(log_level)
        .map_err(|e| ParleyError::config_error(format!("invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().directory("logs").basename("parley"))
        .start()
        .map_err(|e| ParleyError::config_error(format!("failed to start logger: {}", e)))
}

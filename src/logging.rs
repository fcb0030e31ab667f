//! Console logging setup for binaries, demos and benches
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use thiserror::Error;

const PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging config: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("a logger is already installed: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

/// Logging config with a single stderr appender at `level`.
///
/// # Errors
pub fn console_config(level: LevelFilter) -> Result<Config, LoggingError> {
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    Ok(Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?)
}

/// Install the console logger globally.
///
/// # Errors
/// If the config is invalid or another logger was installed first.
pub fn init_console(level: LevelFilter) -> Result<log4rs::Handle, LoggingError> {
    Ok(log4rs::init_config(console_config(level)?)?)
}

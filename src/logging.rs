use env_logger::fmt::Formatter;
use log::{LevelFilter, Record};
use std::io::Write;

/// Sends log records to stderr as `[timestamp] [LEVEL] - message`.
pub fn init(level: LevelFilter) {
    env_logger::Builder::new()
        .format(|buf: &mut Formatter, record: &Record| {
            let timestamp = buf.timestamp_millis();
            writeln!(buf, "[{}] [{}] - {}", timestamp, record.level(), record.args())
        })
        .filter_level(level)
        .init();
}

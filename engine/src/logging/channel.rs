use crossbeam::channel::{Receiver, Sender, TryRecvError, unbounded};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// One formatted log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// A `log::Log` implementation that forwards every enabled record over a crossbeam channel.
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    level: LevelFilter,
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // The receiver may already be gone during shutdown.
            let _ = self.sender.try_send(LogMessage {
                level: record.level(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    /// Forward records at `Info` and above.
    pub fn new(sender: Sender<LogMessage>) -> Self {
        Self {
            sender,
            level: LevelFilter::Info,
        }
    }

    pub fn with_receiver() -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    /// Change the most verbose level forwarded.
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Install as the global logger. Fails if a logger is already installed.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

/// Collect every message currently queued without blocking.
pub fn drain(receiver: &Receiver<LogMessage>) -> Vec<LogMessage> {
    let mut messages = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(message) => messages.push(message),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => return messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;

    #[test]
    fn forwards_enabled_records() {
        // Given
        let (logger, receiver) = ChannelLogger::with_receiver();

        // When
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("sprite_engine::ecs")
                .args(format_args!("replacing signature"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("too verbose"))
                .build(),
        );

        // Then
        assert_eq!(
            drain(&receiver),
            vec![LogMessage {
                level: Level::Warn,
                target: "sprite_engine::ecs".into(),
                message: "replacing signature".into(),
            }]
        );
    }

    #[test]
    fn level_is_configurable() {
        // Given
        let (logger, receiver) = ChannelLogger::with_receiver();
        let logger = logger.with_level(LevelFilter::Trace);

        // When
        logger.log(
            &Record::builder()
                .level(Level::Trace)
                .args(format_args!("destroyed Entity(3)"))
                .build(),
        );

        // Then
        let messages = drain(&receiver);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "destroyed Entity(3)");
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let (logger, receiver) = ChannelLogger::with_receiver();
        drop(receiver);

        logger.log(&Record::builder().level(Level::Error).args(format_args!("gone")).build());
    }
}

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use thiserror::Error;
use tracing::warn;

/// Alert dispatch errors
#[derive(Debug, Error)]
pub enum AlertError {
    /// Writing the alert failed
    #[error("Failed to deliver alert: {0}")]
    Io(#[from] io::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Trait for sending alert messages
#[cfg_attr(test, mockall::automock)]
pub trait SendAlertService: Send + Sync {
    /// Deliver a fully formatted alert message
    fn send(&self, message: &str) -> Result<(), AlertError>;
}

impl<T: SendAlertService + ?Sized> SendAlertService for &T {
    fn send(&self, message: &str) -> Result<(), AlertError> {
        (**self).send(message)
    }
}

/// Alert service that prints each message on its own line.
/// Writes to stdout unless given another writer.
#[derive(Debug)]
pub struct ConsoleAlertService<W: Write + Send = Stdout> {
    writer: Mutex<W>,
}

impl ConsoleAlertService<Stdout> {
    /// Create an alert service writing to stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleAlertService<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> ConsoleAlertService<W> {
    /// Create an alert service writing to the given sink
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Take the writer back out
    pub fn into_inner(self) -> Result<W, AlertError> {
        self.writer
            .into_inner()
            .map_err(|e| AlertError::Lock(e.to_string()))
    }
}

impl<W: Write + Send> SendAlertService for ConsoleAlertService<W> {
    fn send(&self, message: &str) -> Result<(), AlertError> {
        warn!(alert = %message, "Sending patient alert");

        let mut writer = self
            .writer
            .lock()
            .map_err(|e| AlertError::Lock(e.to_string()))?;
        writeln!(writer, "{}", message)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_alert_writes_one_line_per_message() {
        let service = ConsoleAlertService::with_writer(Vec::new());
        service.send("Warning, patient with id: 1, need help").unwrap();
        service.send("Warning, patient with id: 2, need help").unwrap();

        let output = String::from_utf8(service.into_inner().unwrap()).unwrap();
        assert_eq!(
            output,
            "Warning, patient with id: 1, need help\nWarning, patient with id: 2, need help\n"
        );
    }

    #[test]
    fn test_console_alert_reports_write_failure() {
        let service = ConsoleAlertService::with_writer(BrokenPipe);
        let result = service.send("Warning, patient with id: 1, need help");
        assert!(matches!(result, Err(AlertError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}

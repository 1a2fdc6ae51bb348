use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use crate::redactor::PiiRedactor;

/// `MakeWriter` that runs every formatted log line through a [`PiiRedactor`]
/// before it reaches stdout. The fmt layer hands over one complete event per
/// `write` call, so patterns never straddle two writes.
#[derive(Clone)]
pub struct RedactingMakeWriter {
    redactor: Option<Arc<PiiRedactor>>,
}

impl RedactingMakeWriter {
    pub fn new(redactor: Option<Arc<PiiRedactor>>) -> Self {
        Self { redactor }
    }
}

impl<'a> MakeWriter<'a> for RedactingMakeWriter {
    type Writer = RedactingWriter<io::Stdout>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(io::stdout(), self.redactor.clone())
    }
}

pub struct RedactingWriter<W: Write> {
    inner: W,
    redactor: Option<Arc<PiiRedactor>>,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, redactor: Option<Arc<PiiRedactor>>) -> Self {
        Self { inner, redactor }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.redactor {
            Some(redactor) => {
                let line = String::from_utf8_lossy(buf);
                self.inner.write_all(redactor.redact(&line).as_bytes())?;
            }
            None => self.inner.write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_each_written_line() {
        let mut writer = RedactingWriter::new(Vec::new(), Some(Arc::new(PiiRedactor::default())));
        writer.write_all(b"saved record for P-2025-001\n").unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.starts_with("saved record for PATIENT["));
        assert!(!output.contains("2025-001"));
    }

    #[test]
    fn passes_through_without_redactor() {
        let mut writer = RedactingWriter::new(Vec::new(), None);
        writer.write_all(b"P001").unwrap();
        assert_eq!(writer.into_inner(), b"P001");
    }
}

//! In-memory stream with scripted reads.

use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, ErrorKind, Read, Write},
    rc::Rc,
};

use linechat_client::Stream;

/// Outcome of one read on a [`MemoryStream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadStep {
    /// Return these bytes (split across reads if the buffer is smaller).
    Data(Vec<u8>),
    /// Return zero bytes: orderly shutdown.
    Eof,
    /// Fail with an error of this kind.
    Fail(ErrorKind),
}

impl ReadStep {
    /// Read that returns `handle> text`.
    pub fn reply(handle: &str, text: &str) -> Self {
        Self::Data(format!("{handle}> {text}").into_bytes())
    }
}

/// Everything the stream saw, shared so it outlives the stream.
#[derive(Debug, Default)]
pub struct StreamLog {
    /// Bytes from each write call, in order
    pub written: Vec<Vec<u8>>,
    /// Number of read calls
    pub reads: usize,
    /// Whether the stream was shut down
    pub shut_down: bool,
}

impl StreamLog {
    /// Written messages decoded as UTF-8, lossily.
    pub fn written_text(&self) -> Vec<String> {
        self.written.iter().map(|m| String::from_utf8_lossy(m).into_owned()).collect()
    }
}

/// Stream with scripted reads and recorded writes.
///
/// Reads past the end of the script return zero bytes.
#[derive(Debug, Default)]
pub struct MemoryStream {
    /// Remaining read outcomes
    reads: VecDeque<ReadStep>,
    /// Error kind every write fails with, if set
    write_failure: Option<ErrorKind>,
    /// Shared log
    log: Rc<RefCell<StreamLog>>,
}

impl MemoryStream {
    /// Create a stream that plays `reads` in order.
    pub fn new(reads: impl IntoIterator<Item = ReadStep>) -> Self {
        Self { reads: reads.into_iter().collect(), ..Self::default() }
    }

    /// Make every write fail with `kind`.
    #[must_use]
    pub fn failing_writes(mut self, kind: ErrorKind) -> Self {
        self.write_failure = Some(kind);
        self
    }

    /// Handle to the log, valid after the stream is dropped.
    pub fn log(&self) -> Rc<RefCell<StreamLog>> {
        Rc::clone(&self.log)
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.log.borrow_mut().reads += 1;

        match self.reads.pop_front() {
            Some(ReadStep::Data(mut data)) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                if len < data.len() {
                    self.reads.push_front(ReadStep::Data(data.split_off(len)));
                }
                Ok(len)
            },
            Some(ReadStep::Fail(kind)) => Err(io::Error::new(kind, "scripted read failure")),
            Some(ReadStep::Eof) | None => Ok(0),
        }
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.write_failure {
            return Err(io::Error::new(kind, "scripted write failure"));
        }

        self.log.borrow_mut().written.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Stream for MemoryStream {
    fn shutdown(&mut self) -> io::Result<()> {
        self.log.borrow_mut().shut_down = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_reads_in_order() {
        let mut stream = MemoryStream::new([ReadStep::reply("peer", "hi"), ReadStep::Eof]);
        let mut buf = [0u8; 64];

        let n = stream.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"peer> hi");
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
        assert_eq!(stream.log().borrow().reads, 2);
    }

    #[test]
    fn splits_data_larger_than_buffer() {
        let mut stream = MemoryStream::new([ReadStep::Data(b"abcdef".to_vec())]);
        let mut buf = [0u8; 4];

        assert_eq!(stream.read(&mut buf).unwrap(), 4);
        assert_eq!(stream.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
    }

    #[test]
    fn records_writes_and_shutdown() {
        let mut stream = MemoryStream::default();
        let log = stream.log();

        stream.write_all(b"bob> hi").unwrap();
        stream.shutdown().unwrap();
        drop(stream);

        assert_eq!(log.borrow().written_text(), vec!["bob> hi".to_string()]);
        assert!(log.borrow().shut_down);
    }

    #[test]
    fn write_failure_is_injected() {
        let mut stream = MemoryStream::default().failing_writes(ErrorKind::BrokenPipe);
        let err = stream.write_all(b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
    }
}

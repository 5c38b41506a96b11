use std::time::{SystemTime, UNIX_EPOCH};

/// `<epoch-millis> <message>\r\n`
pub fn encode_line(now: SystemTime, msg: &str) -> Vec<u8> {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{} {}\r\n", millis, msg).into_bytes()
}

/// what `LogBuffer::push` did with a line
#[derive(Debug, PartialEq, Eq)]
pub enum Push {
    /// appended to the buffer
    Appended,
    /// the buffer was full, its old contents are returned and the line appended
    Swapped(Vec<u8>),
    /// the line is longer than the whole buffer
    Dropped,
}

/// fixed capacity byte buffer, owned by one writer
pub struct LogBuffer {
    buf: Vec<u8>,
    cap: usize,
}

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, line: &[u8]) -> Push {
        if line.len() > self.cap {
            return Push::Dropped;
        }
        let mut result = Push::Appended;
        if self.buf.len() + line.len() > self.cap {
            result = Push::Swapped(self.take());
        }
        self.buf.extend_from_slice(line);
        result
    }

    /// move the contents out, leaving a fresh empty buffer
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.buf, Vec::with_capacity(self.cap))
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

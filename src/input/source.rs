use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

/// Bytes of consumed text kept before the buffer is compacted.
const COMPACT_THRESHOLD: usize = 64 * 1024;

/// Character source for the scanner.
///
/// In-memory text is held whole. A reader is pulled line by line, keeping
/// the unread part of the current line plus everything up to the next
/// non-blank line buffered. That window is all the lookahead any rule needs:
/// tokens never span a line break, and sentence-end detection only looks
/// past whitespace to the next visible character.
pub struct Source {
    reader: Option<Box<dyn BufRead>>,
    buffer: String,
    pos: usize,
}

impl Source {
    pub fn from_text(text: &str) -> Self {
        Self {
            reader: None,
            buffer: text.to_string(),
            pos: 0,
        }
    }

    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self::from_buf_read(BufReader::new(reader))
    }

    pub fn from_buf_read<R: BufRead + 'static>(reader: R) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            buffer: String::new(),
            pos: 0,
        }
    }

    /// Unread buffered text.
    pub fn rest(&self) -> &str {
        &self.buffer[self.pos..]
    }

    /// True when the reader has hit end of input, so `rest()` is the whole remainder.
    pub fn at_end_of_input(&self) -> bool {
        self.reader.is_none()
    }

    /// True once the reader is done and every buffered byte is consumed.
    pub fn is_exhausted(&self) -> bool {
        self.reader.is_none() && self.pos >= self.buffer.len()
    }

    /// Consumes `bytes` bytes of `rest()`. Must land on a char boundary.
    pub fn advance(&mut self, bytes: usize) {
        self.pos = (self.pos + bytes).min(self.buffer.len());
        if self.reader.is_some() && self.pos >= COMPACT_THRESHOLD {
            self.buffer.drain(..self.pos);
            self.pos = 0;
        }
    }

    /// Reads lines until the lookahead window is complete or the reader is done.
    pub fn fill(&mut self) -> io::Result<()> {
        while self.reader.is_some() && !self.has_lookahead() {
            self.read_line()?;
        }
        Ok(())
    }

    fn has_lookahead(&self) -> bool {
        let rest = self.rest();
        match rest.find('\n') {
            Some(nl) => rest[nl + 1..].chars().any(|c| !c.is_whitespace()),
            None => false,
        }
    }

    fn read_line(&mut self) -> io::Result<()> {
        if let Some(reader) = self.reader.as_mut() {
            if reader.read_line(&mut self.buffer)? == 0 {
                self.reader = None;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("streaming", &self.reader.is_some())
            .field("buffered", &(self.buffer.len() - self.pos))
            .finish()
    }
}

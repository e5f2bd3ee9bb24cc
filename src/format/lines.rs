use std::io::{BufRead, Read};

use crate::error::LoadError;

/// One input line with its 1-based position. Line terminators are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

impl Line {
    pub fn is_comment(&self) -> bool {
        self.text.starts_with('#')
    }
}

/// Line reader with a growable buffer, a hard length cap and one line of
/// pushback. The header stage hands its first data line back through
/// `push_back` so the edge stage sees it again.
pub struct LineReader<R> {
    inner: R,
    max_line_bytes: usize,
    lines_read: usize,
    pending: Option<Line>,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner,
            max_line_bytes,
            lines_read: 0,
            pending: None,
            buf: Vec::new(),
        }
    }

    /// Next line, or `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<Line>, LoadError> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        self.buf.clear();
        // allow limit + '\r' + '\n' so CRLF input gets the same budget as LF
        let cap = self.max_line_bytes as u64 + 2;
        let n = (&mut self.inner).take(cap).read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.lines_read += 1;

        let terminated = self.buf.last() == Some(&b'\n');
        if terminated {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        if self.buf.len() > self.max_line_bytes {
            return Err(LoadError::LineTooLong {
                line_number: self.lines_read,
                limit: self.max_line_bytes,
            });
        }

        let text = String::from_utf8_lossy(&self.buf).into_owned();
        Ok(Some(Line {
            number: self.lines_read,
            text,
        }))
    }

    /// Return `line` so the next `next_line` call yields it again.
    /// Only one line of lookahead is held.
    pub fn push_back(&mut self, line: Line) {
        debug_assert!(self.pending.is_none(), "only one line of pushback");
        self.pending = Some(line);
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

//! Incremental line framing for a chunked byte stream.

/// Splits an arbitrarily chunked byte stream into lines.
///
/// Lines end at `\n`; a trailing `\r` is stripped. Bytes after the last newline
/// stay buffered until the next chunk, which also keeps a multi-byte UTF-8
/// sequence split across chunks intact. Invalid UTF-8 is replaced, not
/// rejected.
///
/// ```rust
/// use restyle_assist::LineFramer;
///
/// let mut framer = LineFramer::new();
/// assert!(framer.feed(b"data: {\"con").is_empty());
/// assert_eq!(framer.feed(b"tent\":\"hi\"}\r\n\n"), vec!["data: {\"content\":\"hi\"}", ""]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns every line it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            lines.push(decode_line(&self.buffer[start..end]));
            start = end + 1;
        }
        self.buffer.drain(..start);
        lines
    }

    /// Returns the buffered unterminated line, if any, and empties the buffer.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = decode_line(&self.buffer);
        self.buffer.clear();
        Some(line)
    }

    /// Bytes received but not yet part of a complete line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.feed(b"a\nb\r\nc"), vec!["a", "b"]);
        assert_eq!(framer.pending(), 1);
        assert_eq!(framer.finish().as_deref(), Some("c"));
        assert_eq!(framer.finish(), None);
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut framer = LineFramer::new();
        assert!(framer.feed(b"data: hel").is_empty());
        assert!(framer.feed(b"lo").is_empty());
        assert_eq!(framer.feed(b"\n"), vec!["data: hello"]);
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn test_crlf_split_between_chunks() {
        let mut framer = LineFramer::new();
        assert!(framer.feed(b"x\r").is_empty());
        assert_eq!(framer.feed(b"\n"), vec!["x"]);
    }

    #[test]
    fn test_utf8_sequence_split_across_chunks() {
        let text = "data: café ✓\n".as_bytes();
        let (a, b) = text.split_at(text.len() - 3);
        let mut framer = LineFramer::new();
        assert!(framer.feed(a).is_empty());
        assert_eq!(framer.feed(b), vec!["data: café ✓"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.feed(b"a\xffb\n"), vec!["a\u{fffd}b"]);
    }
}

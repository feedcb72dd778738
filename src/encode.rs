use embedded_io::{ErrorType, SliceWriteError, Write};

/// Streaming bencode writer.
///
/// Emits wire bytes through the sink as each push call happens; nothing is
/// buffered, so no storage is needed beyond the sink itself. The encoder
/// does not validate structure: `begin_*`/`end_*` calls must be balanced and
/// dictionary entries must alternate string key / value, otherwise the
/// output is malformed bencode.
///
/// ```
/// use bentok::{Encoder, SliceSink};
///
/// let mut out = [0u8; 32];
/// let mut sink = SliceSink::new(&mut out);
/// let mut enc = Encoder::new(&mut sink);
///
/// enc.begin_list().unwrap();
/// enc.push_str("spam").unwrap();
/// enc.push_int(-3).unwrap();
/// enc.end_list().unwrap();
///
/// assert_eq!(sink.data(), b"l4:spami-3ee");
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Encoder { writer }
    }

    /// Writes a byte string: decimal length, `:`, raw payload.
    ///
    /// Any byte value is legal payload; there is no escaping.
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error.
    pub fn push_bytes(&mut self, data: &[u8]) -> Result<(), W::Error> {
        self.push_count(data.len() as u64)?;
        self.writer.write_all(b":")?;
        self.writer.write_all(data)
    }

    /// Writes the UTF-8 bytes of `text` as a byte string.
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error.
    pub fn push_str(&mut self, text: &str) -> Result<(), W::Error> {
        self.push_bytes(text.as_bytes())
    }

    /// Writes a signed integer: `i`, optional `-`, decimal digits, `e`.
    ///
    /// The magnitude is taken with `unsigned_abs`, so `i32::MIN` encodes
    /// correctly.
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error.
    pub fn push_int(&mut self, value: i32) -> Result<(), W::Error> {
        self.writer.write_all(b"i")?;
        if value < 0 {
            self.writer.write_all(b"-")?;
        }
        self.push_count(u64::from(value.unsigned_abs()))?;
        self.writer.write_all(b"e")
    }

    /// Opens a list. Must be matched by [`end_list`](Self::end_list).
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error.
    pub fn begin_list(&mut self) -> Result<(), W::Error> {
        self.writer.write_all(b"l")
    }

    /// Closes the innermost open list.
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error.
    pub fn end_list(&mut self) -> Result<(), W::Error> {
        self.writer.write_all(b"e")
    }

    /// Opens a dictionary. Must be matched by [`end_dict`](Self::end_dict).
    ///
    /// Entries are written by the caller as alternating string key and
    /// value pushes; the encoder does not enforce this.
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error.
    pub fn begin_dict(&mut self) -> Result<(), W::Error> {
        self.writer.write_all(b"d")
    }

    /// Closes the innermost open dictionary.
    ///
    /// # Errors
    ///
    /// Propagates the sink's write error.
    pub fn end_dict(&mut self) -> Result<(), W::Error> {
        self.writer.write_all(b"e")
    }

    /// Access to the underlying sink.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the encoder and returns the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn push_count(&mut self, mut value: u64) -> Result<(), W::Error> {
        let mut digits = [0u8; 20];
        let mut at = digits.len();
        loop {
            at -= 1;
            digits[at] = b'0' + (value % 10) as u8;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        self.writer.write_all(&digits[at..])
    }
}

/// Fixed-capacity sink over a caller-provided buffer.
///
/// Implements [`embedded_io::Write`]; once the buffer is full, writes return
/// [`SliceWriteError::Full`] instead of wrapping or truncating silently.
/// [`reset`](Self::reset) rewinds the cursor so the buffer can be reused.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceSink { buf, pos: 0 }
    }

    /// The bytes written so far.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Rewinds the write cursor, discarding the buffer's content.
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl ErrorType for SliceSink<'_> {
    type Error = SliceWriteError;
}

impl Write for SliceSink<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        let free = self.buf.len() - self.pos;
        if free == 0 {
            return Err(SliceWriteError::Full);
        }
        let n = buf.len().min(free);
        self.buf[self.pos..self.pos + n].copy_from_slice(&buf[..n]);
        self.pos += n;
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

use crate::error::DecodeError;
use crate::token::{Tag, TokenReader, MAX_STR_LEN};

/// Smallest usable decode buffer: string tag + terminator + end tag, enough
/// for the empty string `0:`.
pub const MIN_CAPACITY: usize = 3;

/// String payload terminator appended after string and integer payloads.
const TERMINATOR: u8 = 0;

/// Progress report from [`Decoder::process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// More input bytes are needed before the message is complete
    Incomplete,
    /// A full top-level value closed; its token stream occupies the first
    /// `len` bytes of the decode buffer (end tag included)
    Complete {
        /// Bytes of the buffer holding the completed token stream
        len: usize,
    },
}

/// Parse state between two `process` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between values, waiting for the first byte of the next item
    Any,
    /// Accumulating the decimal length prefix of a string
    Len,
    /// Copying the raw payload of a string
    Str,
    /// Accumulating the text of an integer
    Int,
    /// A complete message is in the buffer
    Done,
    /// A decode error occurred; input is rejected until reset
    Failed,
}

/// Incremental bencode decoder over a caller-provided buffer.
///
/// Bytes are fed one at a time through [`process`](Self::process); the
/// decoder linearizes the message into a token stream inside the buffer,
/// tracking nesting with a counter instead of a call stack. When `process`
/// reports [`Status::Complete`], the stream is read back through
/// [`tokens`](Self::tokens). Call [`reset`](Self::reset) before decoding the
/// next message.
///
/// The buffer bounds the whole token stream of one message; capacities of
/// roughly 50 to a couple hundred bytes cover typical small messages.
///
/// Not reentrant: one decoder instance must be driven from one thread.
///
/// ```
/// use bentok::{Decoder, Status, TokenKind};
///
/// let mut buffer = [0u8; 64];
/// let mut decoder = Decoder::new(&mut buffer).unwrap();
///
/// let mut done = Status::Incomplete;
/// for byte in b"4:spam" {
///     done = decoder.process(*byte).unwrap();
/// }
/// assert!(matches!(done, Status::Complete { .. }));
///
/// let mut tokens = decoder.tokens().unwrap();
/// assert_eq!(tokens.next_token(), TokenKind::Str);
/// assert_eq!(tokens.as_bytes().unwrap(), b"spam");
/// assert_eq!(tokens.next_token(), TokenKind::End);
/// ```
#[derive(Debug)]
pub struct Decoder<'a> {
    buffer: &'a mut [u8],
    /// Write cursor into the buffer
    pos: usize,
    /// Count of currently open list/dictionary scopes
    level: usize,
    state: State,
    /// Pending string length (Len state) or remaining payload bytes (Str)
    count: usize,
    /// Token stream length of the completed message
    msg_len: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder that assembles token streams in `buffer`.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::BufferTooSmall` if the buffer cannot hold even
    /// the smallest message ([`MIN_CAPACITY`] bytes).
    pub fn new(buffer: &'a mut [u8]) -> Result<Self, DecodeError> {
        if buffer.len() < MIN_CAPACITY {
            return Err(DecodeError::BufferTooSmall {
                required: MIN_CAPACITY,
                provided: buffer.len(),
            });
        }
        Ok(Decoder {
            buffer,
            pos: 0,
            level: 0,
            state: State::Any,
            count: 0,
            msg_len: 0,
        })
    }

    /// Consumes one input byte.
    ///
    /// Returns [`Status::Complete`] when this byte closed a full top-level
    /// value; the decoder then rejects further input until
    /// [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// - `DecodeError::BufferOverflow` if the buffer fills up mid-message
    /// - `DecodeError::UnbalancedClose` on an `e` with no open scope
    /// - `DecodeError::StringTooLong` on an over-long string length prefix
    /// - `DecodeError::UnexpectedByte` on a byte the grammar cannot accept
    ///   at this position
    /// - `DecodeError::NeedsReset` after completion or a prior error
    ///
    /// Any error other than `NeedsReset` poisons the decoder; the partial
    /// token stream is discarded and cannot be read.
    pub fn process(&mut self, byte: u8) -> Result<Status, DecodeError> {
        match self.state {
            State::Any => self.on_any(byte),
            State::Len => self.on_len(byte),
            State::Str => self.on_str(byte),
            State::Int => self.on_int(byte),
            State::Done | State::Failed => Err(DecodeError::NeedsReset),
        }
    }

    /// Token reader over the completed message.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::MessageIncomplete` unless the last `process`
    /// call reported [`Status::Complete`].
    pub fn tokens(&self) -> Result<TokenReader<'_>, DecodeError> {
        if self.state != State::Done {
            return Err(DecodeError::MessageIncomplete);
        }
        Ok(TokenReader::new(&self.buffer[..self.msg_len]))
    }

    /// Discards all parse state and prepares for a new message.
    ///
    /// Aborts an in-progress parse, clears a poisoned decoder, and
    /// invalidates any outstanding token payloads. A no-op when no message
    /// is in progress.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.level = 0;
        self.state = State::Any;
        self.count = 0;
        self.msg_len = 0;
    }

    /// Current nesting depth of the in-progress parse.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.level
    }

    fn on_any(&mut self, byte: u8) -> Result<Status, DecodeError> {
        match byte {
            b'0'..=b'9' => {
                self.count = usize::from(byte - b'0');
                self.state = State::Len;
                Ok(Status::Incomplete)
            }
            b'i' => {
                self.append(Tag::Int.to_byte())?;
                self.state = State::Int;
                Ok(Status::Incomplete)
            }
            b'd' => {
                self.append(Tag::DictOpen.to_byte())?;
                self.level += 1;
                Ok(Status::Incomplete)
            }
            b'l' => {
                self.append(Tag::ListOpen.to_byte())?;
                self.level += 1;
                Ok(Status::Incomplete)
            }
            b'e' => {
                if self.level == 0 {
                    return Err(self.fail(DecodeError::UnbalancedClose));
                }
                self.append(Tag::Pop.to_byte())?;
                self.level -= 1;
                self.end_of_item()
            }
            // Bytes between values are not part of any item; skip them
            _ => Ok(Status::Incomplete),
        }
    }

    fn on_len(&mut self, byte: u8) -> Result<Status, DecodeError> {
        match byte {
            b'0'..=b'9' => {
                // count <= MAX_STR_LEN here, so this cannot overflow
                let length = self.count * 10 + usize::from(byte - b'0');
                if length > MAX_STR_LEN {
                    return Err(self.fail(DecodeError::StringTooLong {
                        length,
                        max: MAX_STR_LEN,
                    }));
                }
                self.count = length;
                Ok(Status::Incomplete)
            }
            b':' => {
                self.append(Tag::Str(self.count).to_byte())?;
                if self.count == 0 {
                    self.append(TERMINATOR)?;
                    return self.end_of_item();
                }
                self.state = State::Str;
                Ok(Status::Incomplete)
            }
            found => Err(self.fail(DecodeError::UnexpectedByte { found })),
        }
    }

    fn on_str(&mut self, byte: u8) -> Result<Status, DecodeError> {
        self.append(byte)?;
        self.count -= 1;
        if self.count == 0 {
            self.append(TERMINATOR)?;
            return self.end_of_item();
        }
        Ok(Status::Incomplete)
    }

    fn on_int(&mut self, byte: u8) -> Result<Status, DecodeError> {
        match byte {
            b'e' => {
                self.append(TERMINATOR)?;
                self.end_of_item()
            }
            // A NUL would forge the record terminator
            TERMINATOR => Err(self.fail(DecodeError::UnexpectedByte { found: byte })),
            // Anything else is kept verbatim; validation happens in as_int
            _ => {
                self.append(byte)?;
                Ok(Status::Incomplete)
            }
        }
    }

    /// A string, integer, or scope close just finished.
    fn end_of_item(&mut self) -> Result<Status, DecodeError> {
        if self.level > 0 {
            self.state = State::Any;
            return Ok(Status::Incomplete);
        }
        self.append(Tag::End.to_byte())?;
        self.state = State::Done;
        self.msg_len = self.pos;
        Ok(Status::Complete { len: self.msg_len })
    }

    fn append(&mut self, byte: u8) -> Result<(), DecodeError> {
        if self.pos >= self.buffer.len() {
            return Err(self.fail(DecodeError::BufferOverflow {
                capacity: self.buffer.len(),
            }));
        }
        self.buffer[self.pos] = byte;
        self.pos += 1;
        Ok(())
    }

    fn fail(&mut self, error: DecodeError) -> DecodeError {
        self.state = State::Failed;
        error
    }
}

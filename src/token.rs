use crate::error::DecodeError;

/// Longest byte string a single token record can describe.
///
/// String tokens reuse the tag byte as their length, so lengths share the
/// tag space with the control tags below.
pub const MAX_STR_LEN: usize = 250;

const TAG_INT: u8 = 251;
const TAG_DICT: u8 = 252;
const TAG_LIST: u8 = 253;
const TAG_POP: u8 = 254;
const TAG_END: u8 = 255;

/// Internal tag of one record in the linearized token stream.
///
/// The wire between the decoder and the reader is a single byte; this enum
/// is the only place that byte is interpreted, so the string-length vs.
/// control-tag distinction stays type-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    /// String of the given length, followed by payload and a NUL terminator
    Str(usize),
    /// Integer, followed by its ASCII text and a NUL terminator
    Int,
    DictOpen,
    ListOpen,
    Pop,
    End,
}

impl Tag {
    pub(crate) fn from_byte(byte: u8) -> Tag {
        match byte {
            TAG_INT => Tag::Int,
            TAG_DICT => Tag::DictOpen,
            TAG_LIST => Tag::ListOpen,
            TAG_POP => Tag::Pop,
            TAG_END => Tag::End,
            len => Tag::Str(usize::from(len)),
        }
    }

    pub(crate) fn to_byte(self) -> u8 {
        match self {
            // Caller guarantees len <= MAX_STR_LEN
            Tag::Str(len) => len as u8,
            Tag::Int => TAG_INT,
            Tag::DictOpen => TAG_DICT,
            Tag::ListOpen => TAG_LIST,
            Tag::Pop => TAG_POP,
            Tag::End => TAG_END,
        }
    }
}

/// Kind of the token most recently read by [`TokenReader::next_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Byte string; payload available through [`TokenReader::as_bytes`]
    Str,
    /// Integer; value available through [`TokenReader::as_int`]
    Int,
    /// Start of a dictionary
    DictOpen,
    /// Start of a list
    ListOpen,
    /// End of the innermost open list or dictionary
    Close,
    /// End of the token stream
    End,
}

/// One decoded token with its payload, as yielded by iterating a
/// [`TokenReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Str(&'a [u8]),
    /// Raw ASCII text of the integer, between `i` and `e` on the wire
    Int(&'a [u8]),
    DictOpen,
    ListOpen,
    Close,
}

/// Cursor over the token stream of one completed message.
///
/// Obtained from [`Decoder::tokens`](crate::Decoder::tokens). Borrows the
/// decoder's buffer; payloads are valid until the decoder is reset.
#[derive(Debug)]
pub struct TokenReader<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Payload span of the current token, `None` for markers / before start
    current: Option<(usize, usize)>,
}

impl<'a> TokenReader<'a> {
    /// `buf` must be a complete token stream ending with the end tag.
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        TokenReader {
            buf,
            pos: 0,
            current: None,
        }
    }

    /// Reads the token at the cursor and advances past it.
    ///
    /// Once the end of the stream is reached, further calls keep returning
    /// [`TokenKind::End`] without advancing.
    pub fn next_token(&mut self) -> TokenKind {
        // The stream is decoder-produced: every record is complete and the
        // last tag is always End, so the cursor never leaves the buffer.
        match Tag::from_byte(self.buf[self.pos]) {
            Tag::Str(len) => {
                let start = self.pos + 1;
                self.current = Some((start, len));
                self.pos = start + len + 1;
                TokenKind::Str
            }
            Tag::Int => {
                let start = self.pos + 1;
                let mut end = start;
                while self.buf[end] != 0 {
                    end += 1;
                }
                self.current = Some((start, end - start));
                self.pos = end + 1;
                TokenKind::Int
            }
            Tag::DictOpen => {
                self.current = None;
                self.pos += 1;
                TokenKind::DictOpen
            }
            Tag::ListOpen => {
                self.current = None;
                self.pos += 1;
                TokenKind::ListOpen
            }
            Tag::Pop => {
                self.current = None;
                self.pos += 1;
                TokenKind::Close
            }
            Tag::End => {
                self.current = None;
                TokenKind::End
            }
        }
    }

    /// Payload of the current string or integer token, without the
    /// terminator byte.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::NoCurrentToken` before the first `next_token`
    /// call, after the end of the stream, or when the current token is an
    /// open/close marker.
    pub fn as_bytes(&self) -> Result<&'a [u8], DecodeError> {
        self.payload().ok_or(DecodeError::NoCurrentToken)
    }

    /// Parses the current payload as a signed decimal integer.
    ///
    /// Works for integer tokens and for string tokens whose payload happens
    /// to be numeric text.
    ///
    /// # Errors
    ///
    /// `DecodeError::NoCurrentToken` as for [`as_bytes`](Self::as_bytes);
    /// `DecodeError::MalformedInteger` if the text is not an optional `-`
    /// followed by at least one digit; `DecodeError::IntegerOutOfRange` if
    /// the value does not fit in an `i32`.
    pub fn as_int(&self) -> Result<i32, DecodeError> {
        let bytes = self.as_bytes()?;
        parse_int(bytes)
    }

    fn payload(&self) -> Option<&'a [u8]> {
        let (start, len) = self.current?;
        Some(&self.buf[start..start + len])
    }
}

fn parse_int(bytes: &[u8]) -> Result<i32, DecodeError> {
    // str::parse accepts a leading '+', which the wire grammar does not
    if bytes.first() == Some(&b'+') {
        return Err(DecodeError::MalformedInteger);
    }
    let text = core::str::from_utf8(bytes).map_err(|_| DecodeError::MalformedInteger)?;
    text.parse::<i32>().map_err(|e| match e.kind() {
        core::num::IntErrorKind::PosOverflow | core::num::IntErrorKind::NegOverflow => {
            DecodeError::IntegerOutOfRange
        }
        _ => DecodeError::MalformedInteger,
    })
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            TokenKind::Str => self.payload().map(Token::Str),
            TokenKind::Int => self.payload().map(Token::Int),
            TokenKind::DictOpen => Some(Token::DictOpen),
            TokenKind::ListOpen => Some(Token::ListOpen),
            TokenKind::Close => Some(Token::Close),
            TokenKind::End => None,
        }
    }
}

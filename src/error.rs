use thiserror::Error;

/// Error types for decoding and token extraction.
///
/// All variants are local, recoverable conditions. After a mid-parse error
/// the decoder is poisoned and must be [`reset`](crate::Decoder::reset)
/// before it accepts input again.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DecodeError {
    /// Decode buffer cannot hold even the smallest message
    #[error("Buffer too small: {required} bytes required, {provided} provided")]
    BufferTooSmall {
        /// Minimum buffer size accepted by the decoder
        required: usize,
        /// Size of the buffer that was provided
        provided: usize,
    },
    /// Decode buffer capacity was exhausted before the message completed
    #[error("Buffer overflow: message exceeds the {capacity}-byte decode buffer")]
    BufferOverflow {
        /// Total capacity of the decode buffer
        capacity: usize,
    },
    /// An `e` arrived with no list or dictionary open
    #[error("Unbalanced close: 'e' received at nesting depth zero")]
    UnbalancedClose,
    /// String length prefix exceeds what a token record can describe
    #[error("String too long: length prefix {length} exceeds maximum of {max}")]
    StringTooLong {
        /// Length prefix as accumulated so far (at least this value)
        length: usize,
        /// Maximum representable string length
        max: usize,
    },
    /// A byte that is not valid in the current position of the wire grammar
    #[error("Unexpected byte 0x{found:02x} in input")]
    UnexpectedByte {
        /// The offending input byte
        found: u8,
    },
    /// `process` called after completion or after an error, without `reset`
    #[error("Decoder needs reset before accepting more input")]
    NeedsReset,
    /// Token access requested before a complete message is in the buffer
    #[error("Message incomplete: no token stream to read")]
    MessageIncomplete,
    /// Payload extraction with no current string or integer token
    #[error("No current token with a payload")]
    NoCurrentToken,
    /// Integer text is not an optional '-' followed by decimal digits
    #[error("Malformed integer text")]
    MalformedInteger,
    /// Integer text is well-formed but does not fit in an i32
    #[error("Integer out of range for i32")]
    IntegerOutOfRange,
}

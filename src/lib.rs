#![no_std]

//! `bentok`: an incremental bencode codec for fixed buffers.
//!
//! Bencode is the self-delimiting serialization format used by
//! BitTorrent-style protocols: byte strings (`4:spam`), signed integers
//! (`i-3e`), lists (`l...e`), and dictionaries (`d...e`). This crate
//! encodes and decodes it without heap allocation, without recursion, and
//! without
//! requiring a whole message to be buffered up front, which makes it
//! suitable for embedded and other memory-constrained environments.
//!
//! This crate is `no_std` compatible and stores everything in
//! caller-provided buffers.
//!
//! # Decoding
//!
//! [`Decoder`] is a byte-at-a-time state machine. The caller owns the event
//! loop and feeds bytes as they arrive, from a serial line, a socket, or a
//! slice; the decoder never blocks, it reports [`Status::Incomplete`] and
//! keeps its state between calls. Nesting is tracked with a counter instead
//! of a call stack, and the message is linearized into a compact token
//! stream inside the caller's buffer.
//!
//! ```
//! use bentok::{Decoder, Status, Token};
//!
//! let mut buffer = [0u8; 64];
//! let mut decoder = Decoder::new(&mut buffer).unwrap();
//!
//! let mut status = Status::Incomplete;
//! for byte in b"l4:spam4:eggse" {
//!     status = decoder.process(*byte).unwrap();
//! }
//! assert!(matches!(status, Status::Complete { .. }));
//!
//! let tokens: Vec<_> = decoder.tokens().unwrap().collect();
//! assert_eq!(
//!     tokens,
//!     [
//!         Token::ListOpen,
//!         Token::Str(b"spam"),
//!         Token::Str(b"eggs"),
//!         Token::Close,
//!     ]
//! );
//! ```
//!
//! After [`Status::Complete`], read the message back with
//! [`Decoder::tokens`], either through the cursor interface
//! ([`TokenReader::next_token`] plus [`TokenReader::as_bytes`] /
//! [`TokenReader::as_int`]) or as an iterator of [`Token`]s. Payloads
//! borrow the decode buffer and stay valid until [`Decoder::reset`], which
//! must be called before the next message.
//!
//! A message larger than the decode buffer fails deterministically with
//! [`DecodeError::BufferOverflow`]; the partial token stream is discarded
//! and can never be read as a truncated-but-valid message.
//!
//! # Encoding
//!
//! [`Encoder`] writes wire bytes directly through any
//! [`embedded_io::Write`] sink, one push call per value, with explicit
//! `begin`/`end` calls for list and dictionary scopes. [`SliceSink`] is a
//! ready-made fixed-capacity sink that rejects writes past capacity.
//!
//! ```
//! use bentok::{Encoder, SliceSink};
//!
//! let mut out = [0u8; 64];
//! let mut sink = SliceSink::new(&mut out);
//! let mut enc = Encoder::new(&mut sink);
//!
//! enc.begin_dict().unwrap();
//! enc.push_str("cow").unwrap();
//! enc.push_str("moo").unwrap();
//! enc.push_str("spam").unwrap();
//! enc.push_str("eggs").unwrap();
//! enc.end_dict().unwrap();
//!
//! assert_eq!(sink.data(), b"d3:cow3:moo4:spam4:eggse");
//! ```
//!
//! # Limits
//!
//! Integers are machine-width: `i32`, checked ([`i32::MIN`] included).
//! A single string token is limited to [`token::MAX_STR_LEN`] bytes.
//! Dictionary key ordering and uniqueness are not enforced on either side.
//!
//! Enable the optional `std` feature for `std::error::Error` integration:
//!
//! ```toml
//! [dependencies]
//! bentok = { version = "0.1", features = ["std"] }
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod token;

pub use decode::{Decoder, Status, MIN_CAPACITY};
pub use encode::{Encoder, SliceSink};
pub use error::DecodeError;
pub use token::{Token, TokenKind, TokenReader, MAX_STR_LEN};

use bentok::{DecodeError, Decoder, Status, TokenKind, MAX_STR_LEN, MIN_CAPACITY};

#[test]
fn test_buffer_too_small_for_any_message() {
    let mut buffer = [0u8; 2];
    assert_eq!(
        Decoder::new(&mut buffer).unwrap_err(),
        DecodeError::BufferTooSmall {
            required: MIN_CAPACITY,
            provided: 2
        }
    );
}

#[test]
fn test_overflow_is_deterministic() {
    // "6:abcdef" needs 9 token-stream bytes, one more than capacity
    let mut buffer = [0u8; 8];
    let mut decoder = Decoder::new(&mut buffer).unwrap();

    let mut result = Ok(Status::Incomplete);
    for byte in b"6:abcdef" {
        result = decoder.process(*byte);
        if result.is_err() {
            break;
        }
    }
    assert_eq!(result, Err(DecodeError::BufferOverflow { capacity: 8 }));

    // The partial stream must not be readable as a valid message
    assert_eq!(
        decoder.tokens().unwrap_err(),
        DecodeError::MessageIncomplete
    );
}

#[test]
fn test_overflow_poisons_until_reset() {
    let mut buffer = [0u8; 4];
    let mut decoder = Decoder::new(&mut buffer).unwrap();

    for byte in b"9:aaaaaaaaa" {
        let _ = decoder.process(*byte);
    }
    assert_eq!(decoder.process(b'i'), Err(DecodeError::NeedsReset));

    decoder.reset();
    assert!(decoder.process(b'i').is_ok());
}

#[test]
fn test_overflow_then_reset_recovers() {
    let mut buffer = [0u8; 6];
    let mut decoder = Decoder::new(&mut buffer).unwrap();

    for byte in b"8:overlong" {
        let _ = decoder.process(*byte);
    }
    decoder.reset();

    let mut status = Status::Incomplete;
    for byte in b"3:fit" {
        status = decoder.process(*byte).unwrap();
    }
    assert!(matches!(status, Status::Complete { .. }));

    let mut tokens = decoder.tokens().unwrap();
    assert_eq!(tokens.next_token(), TokenKind::Str);
    assert_eq!(tokens.as_bytes().unwrap(), b"fit");
}

#[test]
fn test_unbalanced_close_at_top_level() {
    let mut buffer = [0u8; 64];
    let mut decoder = Decoder::new(&mut buffer).unwrap();

    assert_eq!(decoder.process(b'e'), Err(DecodeError::UnbalancedClose));
}

#[test]
fn test_unbalanced_close_after_balanced_value() {
    let mut buffer = [0u8; 64];
    let mut decoder = Decoder::new(&mut buffer).unwrap();

    for byte in b"le" {
        decoder.process(*byte).unwrap();
    }
    // Completed; the stray 'e' is rejected as unsynchronized input
    assert_eq!(decoder.process(b'e'), Err(DecodeError::NeedsReset));

    decoder.reset();
    assert_eq!(decoder.process(b'e'), Err(DecodeError::UnbalancedClose));
}

#[test]
fn test_string_length_over_token_limit() {
    let mut buffer = [0u8; 64];
    let mut decoder = Decoder::new(&mut buffer).unwrap();

    decoder.process(b'2').unwrap();
    decoder.process(b'5').unwrap();
    assert_eq!(
        decoder.process(b'1'),
        Err(DecodeError::StringTooLong {
            length: 251,
            max: MAX_STR_LEN
        })
    );
}

#[test]
fn test_garbage_in_length_prefix() {
    let mut buffer = [0u8; 64];
    let mut decoder = Decoder::new(&mut buffer).unwrap();

    decoder.process(b'4').unwrap();
    assert_eq!(
        decoder.process(b'x'),
        Err(DecodeError::UnexpectedByte { found: b'x' })
    );
}

#[test]
fn test_nul_in_integer_text() {
    let mut buffer = [0u8; 64];
    let mut decoder = Decoder::new(&mut buffer).unwrap();

    decoder.process(b'i').unwrap();
    assert_eq!(
        decoder.process(0),
        Err(DecodeError::UnexpectedByte { found: 0 })
    );
}

#[test]
fn test_error_display_messages() {
    let error = DecodeError::BufferOverflow { capacity: 32 };
    assert_eq!(
        error.to_string(),
        "Buffer overflow: message exceeds the 32-byte decode buffer"
    );

    let error = DecodeError::UnexpectedByte { found: 0x0a };
    assert_eq!(error.to_string(), "Unexpected byte 0x0a in input");
}

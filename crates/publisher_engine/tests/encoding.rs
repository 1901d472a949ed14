use pretty_assertions::assert_eq;
use publisher_engine::{from_base64, is_valid_base64, to_base64, EncodingError};

#[test]
fn round_trip_preserves_unicode() {
    let samples = [
        "",
        "hello world",
        "你好世界",
        "Ünïcödé ümlauts",
        "emoji 🦀🚀 and astral 𝄞",
        "mixed 你好 world 123",
        "---\ntitle: \"引用\"\n---\n\nbody",
    ];
    for sample in samples {
        let encoded = to_base64(sample);
        assert_eq!(from_base64(&encoded).unwrap(), sample, "sample {sample:?}");
    }
}

#[test]
fn encodes_utf8_bytes_of_multibyte_text() {
    assert_eq!(to_base64("你好世界"), "5L2g5aW95LiW55WM");
    assert_eq!(to_base64("Hello"), "SGVsbG8=");
    assert_eq!(to_base64(""), "");
}

#[test]
fn decode_rejects_malformed_base64() {
    assert!(matches!(
        from_base64("not base64!!"),
        Err(EncodingError::InvalidBase64(_))
    ));
}

#[test]
fn decode_rejects_non_utf8_bytes() {
    // "//4=" decodes to 0xFF 0xFE, which is not valid UTF-8.
    assert_eq!(from_base64("//4="), Err(EncodingError::InvalidUtf8));
}

#[test]
fn validity_check_never_errors() {
    assert!(is_valid_base64(""));
    assert!(is_valid_base64("SGVsbG8="));
    assert!(is_valid_base64(&to_base64("你好世界")));

    // Missing padding, garbage, and non-canonical trailing bits.
    assert!(!is_valid_base64("SGVsbG8"));
    assert!(!is_valid_base64("not base64!!"));
    assert!(!is_valid_base64("AB=="));
}

/// Verbatim decode for any `text/*` attachment. Invalid UTF-8 sequences are
/// replaced rather than failing the turn.
pub fn decode_text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passes_through_verbatim() {
        assert_eq!(decode_text("héllo\nwörld".as_bytes()), "héllo\nwörld");
    }

    #[test]
    fn test_invalid_bytes_are_replaced_not_fatal() {
        let decoded = decode_text(&[b'o', b'k', 0xff, 0xfe]);
        assert!(decoded.starts_with("ok"));
        assert!(decoded.contains('\u{fffd}'));
    }
}

//! Latin-1 text helpers for fixed character buffers

use bytes::BufMut;

/// Decode Latin-1 bytes
///
/// Every byte maps to the code point of the same value, so this never fails.
#[inline]
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode text as Latin-1
///
/// Characters outside Latin-1 become `?`.
pub fn string_to_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Keep at most `capacity` characters
pub fn truncate_to_capacity(text: &str, capacity: usize) -> String {
    text.chars().take(capacity).collect()
}

/// Write text into a fixed NUL-padded buffer of exactly `width` bytes
///
/// Text longer than `width` bytes is cut silently. Text of exactly `width`
/// bytes fills the buffer with no terminator, as the wire allows.
pub fn put_fixed_text<B: BufMut>(buf: &mut B, text: &str, width: usize) {
    let bytes = string_to_latin1(text);
    let used = bytes.len().min(width);
    buf.put_slice(&bytes[..used]);
    buf.put_bytes(0, width - used);
}

/// Write text as a `u32` byte count followed by the bytes
pub fn put_prefixed_text<B: BufMut>(buf: &mut B, text: &str) {
    let bytes = string_to_latin1(text);
    buf.put_u32_le(bytes.len() as u32);
    buf.put_slice(&bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_fixed_text_pads_and_truncates() {
        let mut buf = BytesMut::new();
        put_fixed_text(&mut buf, "abc", 6);
        assert_eq!(&buf[..], b"abc\0\0\0");

        let mut buf = BytesMut::new();
        put_fixed_text(&mut buf, "abcdefgh", 4);
        assert_eq!(&buf[..], b"abcd");
    }

    #[test]
    fn test_full_width_text_reads_back() {
        let mut buf = BytesMut::new();
        put_fixed_text(&mut buf, "ABCDEFGHIJKLMNOPQRST", 20);
        assert_eq!(&buf[..], b"ABCDEFGHIJKLMNOPQRST");

        let mut s = crate::NetStream::new(&buf);
        assert_eq!(s.read_fixed_text(20).unwrap(), "ABCDEFGHIJKLMNOPQRST");
        assert!(s.at_end());
    }

    #[test]
    fn test_latin1_round_trip() {
        let bytes = string_to_latin1("Ærthé");
        assert_eq!(latin1_to_string(&bytes), "Ærthé");
        assert_eq!(string_to_latin1("€"), b"?");
    }

    #[test]
    fn test_truncate_to_capacity() {
        assert_eq!(truncate_to_capacity("Sword of Truth", 5), "Sword");
        assert_eq!(truncate_to_capacity("abc", 32), "abc");
        assert_eq!(truncate_to_capacity("abc", 0), "");
    }
}

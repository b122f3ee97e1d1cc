use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use murmurhash3::murmurhash3_x86_32;

use super::types::{Fingerprint, HashVariant};

/// Raw bytes per encoded line; 57 bytes encode to exactly 76 characters.
const MIME_LINE_BYTES: usize = 57;

/// Base64 with a newline after every 76 output characters and after the
/// final partial line. Empty input encodes to an empty buffer.
pub fn encode_mime_base64(data: &[u8]) -> Vec<u8> {
    let lines = data.len().div_ceil(MIME_LINE_BYTES);
    let mut out = Vec::with_capacity(data.len().div_ceil(3) * 4 + lines);
    for chunk in data.chunks(MIME_LINE_BYTES) {
        out.extend_from_slice(STANDARD.encode(chunk).as_bytes());
        out.push(b'\n');
    }
    out
}

/// MurmurHash3 x86 32-bit, seed 0, reinterpreted as signed
pub fn murmur3_32(data: &[u8]) -> i32 {
    murmurhash3_x86_32(data, 0) as i32
}

/// Fingerprint of a favicon's raw bytes.
pub fn favicon_hash(data: &[u8], variant: HashVariant) -> Fingerprint {
    let encoded = encode_mime_base64(data);
    match variant {
        HashVariant::Bytes => Fingerprint(murmur3_32(&encoded)),
        HashVariant::Text => {
            // base64 output is ASCII, so this never substitutes
            let text = String::from_utf8_lossy(&encoded);
            Fingerprint(murmur3_32(text.as_bytes()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn murmur3_matches_reference_value() {
        assert_eq!(murmur3_32(b"foo"), -156908512);
        assert_eq!(murmur3_32(b""), 0);
    }

    #[test]
    fn mime_encoding_wraps_at_76_chars() {
        let data = vec![0u8; 120];
        let encoded = encode_mime_base64(&data);
        let text = String::from_utf8_lossy(&encoded);
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 76);
        assert_eq!(lines[1].len(), 76);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn mime_encoding_of_empty_input_is_empty() {
        assert!(encode_mime_base64(b"").is_empty());
    }

    #[test]
    fn mime_encoding_short_input() {
        assert_eq!(encode_mime_base64(b"\x00\x00\x01\x00"), b"AAABAA==\n".to_vec());
    }

    #[test]
    fn byte_variant_known_values() {
        assert_eq!(favicon_hash(b"\x00\x00\x01\x00", HashVariant::Bytes), Fingerprint(-216455174));
        assert_eq!(favicon_hash(b"test favicon content", HashVariant::Bytes), Fingerprint(549458447));
    }

    #[test]
    fn byte_variant_spans_multiple_lines() {
        let data: Vec<u8> = (0u8..=255).collect();
        assert_eq!(favicon_hash(&data, HashVariant::Bytes), Fingerprint(-757223386));
    }

    #[test]
    fn text_variant_hashes_base64_text() {
        let svg = b"<svg xmlns='http://www.w3.org/2000/svg'/>";
        assert_eq!(favicon_hash(svg, HashVariant::Text), Fingerprint(1344464334));

        let png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
        let text = String::from_utf8_lossy(&encode_mime_base64(png)).into_owned();
        assert_eq!(favicon_hash(png, HashVariant::Text), Fingerprint(murmur3_32(text.as_bytes())));
        assert_eq!(favicon_hash(png, HashVariant::Text), Fingerprint(628805695));
    }

    #[test]
    fn text_variant_keeps_binary_icons_apart() {
        let png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
        let mut other = *png;
        other[0] = 0x8a;
        assert_eq!(favicon_hash(&other, HashVariant::Text), Fingerprint(-2125700464));
        assert_ne!(favicon_hash(png, HashVariant::Text), favicon_hash(&other, HashVariant::Text));
    }

    #[test]
    fn query_uses_signed_decimal() {
        assert_eq!(Fingerprint(-216455174).query(), "http.favicon.hash:-216455174");
    }
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Percent escaping of corbaloc object keys (RFC 2396 style).

/// Characters that may appear unescaped in a corbaloc key.
const KEY_SAFE: &[u8] = b";/:?@&=+$,-_.!~*'()";

/// Decode `%XX` escapes into raw key bytes.
///
/// A `%` that is not followed by two hex digits is kept literally, so
/// decoding never fails.
pub fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

/// Encode key bytes, escaping everything outside the corbaloc safe set.
pub fn percent_encode(key: &[u8]) -> String {
    let mut out = String::with_capacity(key.len());
    for &b in key {
        if b.is_ascii_alphanumeric() || KEY_SAFE.contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain() {
        assert_eq!(percent_decode("Prod/aTradingService"), b"Prod/aTradingService");
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(percent_decode("a%20b"), b"a b");
        assert_eq!(percent_decode("%00%ff%7E"), vec![0x00, 0xFF, 0x7E]);
        assert_eq!(percent_decode("%e4%b8%96"), "世".as_bytes());
    }

    #[test]
    fn test_decode_malformed_escape_kept() {
        assert_eq!(percent_decode("100%"), b"100%");
        assert_eq!(percent_decode("%4"), b"%4");
        assert_eq!(percent_decode("%zz"), b"%zz");
    }

    #[test]
    fn test_encode() {
        assert_eq!(percent_encode(b"Dev/NameService"), "Dev/NameService");
        assert_eq!(percent_encode(b"a b#c%"), "a%20b%23c%25");
        assert_eq!(percent_encode(&[0x00, 0xFF]), "%00%FF");
    }

    #[test]
    fn test_encode_decode_inverse() {
        let key: Vec<u8> = (0u8..=255).collect();
        assert_eq!(percent_decode(&percent_encode(&key)), key);
    }
}

//! URL path decoding.
//!
//! Request paths arrive percent-encoded; escapes are decoded before the
//! path is mapped onto the filesystem so `/hello%20world.html` reaches an
//! on-disk `hello world.html`.

/// Decode `%XX` escapes in a URL path.
///
/// Malformed escapes (truncated, or not followed by two hex digits) are
/// kept literally, the way lenient URL parsers treat them. Returns `None`
/// when the decoded bytes are not valid UTF-8; such a path cannot name a
/// served file.
pub fn percent_decode(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                decoded.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8(decoded).ok()
}

const fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

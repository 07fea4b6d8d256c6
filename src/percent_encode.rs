use crate::compat::{Cow, String, Vec};
use crate::error::{Error, ErrorKind, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, percent_encode};

// Encode sets following RFC 3986 section 2 and 3.
// Each set lists the bytes that must be escaped; bytes >= 0x80 always are.

/// Everything but unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub const UNRESERVED_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Unreserved + sub-delims
pub const USER_SET: &AsciiSet = &UNRESERVED_SET
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// User + ":"
pub const PASSWORD_SET: &AsciiSet = &USER_SET.remove(b':');

/// pchar without ":" (first segment of a relative reference)
pub const SEGMENT_NC_SET: &AsciiSet = &USER_SET.remove(b'@');

/// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
pub const SEGMENT_SET: &AsciiSet = &SEGMENT_NC_SET.remove(b':');

/// pchar + "/"
pub const PATH_SET: &AsciiSet = &SEGMENT_SET.remove(b'/');

/// pchar + "/" + "?"
pub const QUERY_SET: &AsciiSet = &PATH_SET.remove(b'?');

/// Query without the pair separators and "+", which reads back as a space
pub const QUERY_KEY_SET: &AsciiSet = &QUERY_SET.add(b'&').add(b'=').add(b'+');

/// Query without "&" and "+"
pub const QUERY_VALUE_SET: &AsciiSet = &QUERY_SET.add(b'&').add(b'+');

/// A component character-set policy.
///
/// Plain text is encoded with `encode`, which always escapes `%`. Encoded
/// text is checked against `verbatim`, which lets `%` through so that the
/// triplets can be checked separately.
#[derive(Debug)]
pub struct CharSet {
    encode: AsciiSet,
    verbatim: AsciiSet,
}

pub static UNRESERVED: CharSet = CharSet::new(UNRESERVED_SET);
pub static USER: CharSet = CharSet::new(USER_SET);
pub static PASSWORD: CharSet = CharSet::new(PASSWORD_SET);
pub static USERINFO: CharSet = CharSet::new(PASSWORD_SET);
pub static REG_NAME: CharSet = CharSet::new(USER_SET);
pub static SEGMENT: CharSet = CharSet::new(SEGMENT_SET);
pub static SEGMENT_NC: CharSet = CharSet::new(SEGMENT_NC_SET);
pub static PATH: CharSet = CharSet::new(PATH_SET);
pub static QUERY: CharSet = CharSet::new(QUERY_SET);
pub static QUERY_KEY: CharSet = CharSet::new(QUERY_KEY_SET);
pub static QUERY_VALUE: CharSet = CharSet::new(QUERY_VALUE_SET);
pub static FRAGMENT: CharSet = CharSet::new(QUERY_SET);

impl CharSet {
    const fn new(encode: &AsciiSet) -> Self {
        Self {
            encode: encode.add(b'%'),
            verbatim: encode.remove(b'%'),
        }
    }

    /// Length of the longest prefix of `s` made of allowed bytes and
    /// escapes. Fails only on a malformed escape inside that prefix.
    pub fn scan(&'static self, s: &[u8]) -> Result<usize> {
        let mut pos = 0;
        for chunk in percent_encode(s, &self.verbatim) {
            let chunk = chunk.as_bytes();
            // An escaped chunk stands for a single disallowed byte
            if chunk[0] != s[pos] {
                return Ok(pos);
            }
            check_escapes(chunk, pos)?;
            pos += chunk.len();
        }
        Ok(pos)
    }

    /// Check that all of `s` is valid encoded text for this component.
    pub fn validate(&'static self, s: &[u8]) -> Result<()> {
        let n = self.scan(s)?;
        if n == s.len() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::InvalidCharacter, n))
        }
    }

    /// Exact number of bytes `encode` writes for `plain`
    pub fn encoded_size(&'static self, plain: &[u8]) -> usize {
        percent_encode(plain, &self.encode).map(str::len).sum()
    }

    /// Write `plain` percent-encoded to the front of `dest`; returns the
    /// number of bytes written. `dest` must hold `encoded_size(plain)` bytes.
    pub fn encode(&'static self, dest: &mut [u8], plain: &[u8]) -> usize {
        let mut n = 0;
        for chunk in percent_encode(plain, &self.encode) {
            dest[n..n + chunk.len()].copy_from_slice(chunk.as_bytes());
            n += chunk.len();
        }
        n
    }

    /// Write percent-encoded string directly to buffer
    pub fn encode_into(&'static self, buffer: &mut String, plain: &str) {
        buffer.reserve(plain.len());
        for chunk in percent_encode(plain.as_bytes(), &self.encode) {
            buffer.push_str(chunk);
        }
    }
}

fn check_escapes(run: &[u8], base: usize) -> Result<()> {
    for i in memchr::memchr_iter(b'%', run) {
        let valid = i + 2 < run.len()
            && run[i + 1].is_ascii_hexdigit()
            && run[i + 2].is_ascii_hexdigit();
        if !valid {
            return Err(Error::new(ErrorKind::InvalidPercentEncoding, base + i));
        }
    }
    Ok(())
}

/// Number of bytes `decode` writes for already validated text
pub fn decoded_size(encoded: &[u8]) -> usize {
    percent_decode(encoded).count()
}

/// Decode validated text into `dest`; returns the number of bytes written
pub fn decode(dest: &mut [u8], encoded: &[u8]) -> usize {
    let mut n = 0;
    for (slot, byte) in dest.iter_mut().zip(percent_decode(encoded)) {
        *slot = byte;
        n += 1;
    }
    n
}

/// Decode to text, replacing invalid UTF-8. Borrows when nothing is escaped.
pub fn decode_str(encoded: &str) -> Cow<'_, str> {
    percent_decode(encoded.as_bytes()).decode_utf8_lossy()
}

/// Query bytes with `+` read as a space
fn query_bytes(encoded: &str) -> impl Iterator<Item = u8> + '_ {
    encoded
        .as_bytes()
        .split(|&b| b == b'+')
        .enumerate()
        .flat_map(|(i, piece)| {
            (i > 0)
                .then_some(b' ')
                .into_iter()
                .chain(percent_decode(piece))
        })
}

/// Decode a query key or value: escapes and `+` as space
pub fn decode_query_str(encoded: &str) -> Cow<'_, str> {
    if memchr::memchr(b'+', encoded.as_bytes()).is_none() {
        return decode_str(encoded);
    }
    let bytes: Vec<u8> = query_bytes(encoded).collect();
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

/// Compare an encoded query key with plain text without allocating
pub fn query_eq(encoded: &str, plain: &str) -> bool {
    query_bytes(encoded).eq(plain.bytes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn encode_to_vec(set: &'static CharSet, plain: &str) -> Vec<u8> {
        let mut dest = vec![0; set.encoded_size(plain.as_bytes())];
        let n = set.encode(&mut dest, plain.as_bytes());
        assert_eq!(n, dest.len());
        dest
    }

    #[test]
    fn test_validate() {
        assert!(USER.validate(b"user%20name").is_ok());
        assert!(USER.validate(b"!$&'()*+,;=").is_ok());

        let err = USER.validate(b"us:er").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        assert_eq!(err.offset(), 2);

        let err = USER.validate(b"ab%2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPercentEncoding);
        assert_eq!(err.offset(), 2);

        let err = PATH.validate(b"/home/%ile.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPercentEncoding);
        assert_eq!(err.offset(), 6);

        assert!(PASSWORD.validate(b"a:b").is_ok());
        assert!(QUERY.validate(b"a=1&b=/?").is_ok());
        assert!(QUERY.validate(b"\x01").is_err());
        assert!(REG_NAME.validate("caf\u{e9}".as_bytes()).is_err());
    }

    #[test]
    fn test_scan_stops_at_delimiter() {
        assert_eq!(REG_NAME.scan(b"example.com:80").unwrap(), 11);
        assert_eq!(SEGMENT_NC.scan(b"a%20b:c").unwrap(), 5);
        assert_eq!(PATH.scan(b"/a/b?q").unwrap(), 4);
        assert_eq!(PATH.scan(b"").unwrap(), 0);
        // A bad escape after the stop is not looked at
        assert_eq!(REG_NAME.scan(b"host/%zz").unwrap(), 4);
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode_to_vec(&USER, ":"), b"%3A");
        assert_eq!(encode_to_vec(&USER, "@"), b"%40");
        assert_eq!(encode_to_vec(&PASSWORD, "a:b"), b"a:b");
        assert_eq!(encode_to_vec(&PATH, "/a b/100%"), b"/a%20b/100%25");
        assert_eq!(encode_to_vec(&SEGMENT, "a/b"), b"a%2Fb");
        assert_eq!(encode_to_vec(&UNRESERVED, "\u{e9}"), b"%C3%A9");
        assert_eq!(
            encode_to_vec(&QUERY, "!@#$%^&*()_+=-;:'{}[]|\\?/>.<,"),
            b"!@%23$%25%5E&*()_+=-;:'%7B%7D%5B%5D%7C%5C?/%3E.%3C,"
        );
        assert_eq!(encode_to_vec(&QUERY_KEY, "a=b&c+d"), b"a%3Db%26c%2Bd");
        assert_eq!(encode_to_vec(&QUERY_VALUE, "a=b&c"), b"a=b%26c");
    }

    #[test]
    fn test_encoded_size_counts_escapes() {
        assert_eq!(USER.encoded_size(b"abc"), 3);
        assert_eq!(USER.encoded_size(b"a b"), 5);
        assert_eq!(USER.encoded_size(b""), 0);
    }

    #[test]
    fn test_decode_inverts_encode() {
        for plain in ["", "plain", "a b c", "100%", "\u{e9}t\u{e9}", "::@@//??##"] {
            for set in [&UNRESERVED, &USER, &PATH, &QUERY_KEY] {
                let encoded = encode_to_vec(set, plain);
                let mut dest = vec![0; decoded_size(&encoded)];
                let n = decode(&mut dest, &encoded);
                assert_eq!(&dest[..n], plain.as_bytes());
            }
        }
    }

    #[test]
    fn test_decode_str() {
        assert_eq!(decode_str("hello%20world"), "hello world");
        assert!(matches!(decode_str("plain"), Cow::Borrowed("plain")));
        assert_eq!(decode_str("%C3%A9"), "\u{e9}");
        assert_eq!(decode_str("a+b"), "a+b");
    }

    #[test]
    fn test_decode_query_str() {
        assert_eq!(decode_query_str("a+b"), "a b");
        assert_eq!(decode_query_str("a%2Bb"), "a+b");
        assert_eq!(decode_query_str("*()_+"), "*()_ ");
        assert_eq!(decode_query_str("+"), " ");
    }

    #[test]
    fn test_query_eq() {
        assert!(query_eq("first+name", "first name"));
        assert!(query_eq("a%3Db", "a=b"));
        assert!(!query_eq("ab", "abc"));
        assert!(query_eq("", ""));
    }
}

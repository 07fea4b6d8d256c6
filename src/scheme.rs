use crate::types::Scheme;

/// Look up a scheme (without the trailing `:`), ignoring ASCII case.
/// Uses perfect hash based on length + first byte to minimize comparisons.
pub fn get_scheme(scheme: &str) -> Scheme {
    let bytes = scheme.as_bytes();
    if bytes.is_empty() {
        return Scheme::None;
    }

    let first = bytes[0].to_ascii_lowercase();
    match (bytes.len(), first) {
        (2, b'w') if bytes.eq_ignore_ascii_case(b"ws") => Scheme::Ws,
        (3, b'w') if bytes.eq_ignore_ascii_case(b"wss") => Scheme::Wss,
        (3, b'f') if bytes.eq_ignore_ascii_case(b"ftp") => Scheme::Ftp,
        (4, b'h') if bytes.eq_ignore_ascii_case(b"http") => Scheme::Http,
        (4, b'f') if bytes.eq_ignore_ascii_case(b"file") => Scheme::File,
        (5, b'h') if bytes.eq_ignore_ascii_case(b"https") => Scheme::Https,
        _ => Scheme::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_scheme() {
        assert_eq!(get_scheme("http"), Scheme::Http);
        assert_eq!(get_scheme("HTTPS"), Scheme::Https);
        assert_eq!(get_scheme("Ftp"), Scheme::Ftp);
        assert_eq!(get_scheme("ws"), Scheme::Ws);
        assert_eq!(get_scheme("custom"), Scheme::Unknown);
        assert_eq!(get_scheme("htt"), Scheme::Unknown);
        assert_eq!(get_scheme(""), Scheme::None);
    }
}

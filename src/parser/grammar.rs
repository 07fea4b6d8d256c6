use super::authority::authority;
use super::scan_at;
use crate::character_sets::is_scheme_char;
use crate::error::{Error, ErrorKind, Result};
use crate::params::Params;
use crate::parts::{Part, Parts};
use crate::percent_encode::{FRAGMENT, PATH, QUERY, SEGMENT_NC};
use crate::scheme::get_scheme;
use crate::segments::Segments;
use crate::types::{HostKind, Scheme};

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
///
/// Returns the length of the scheme at the start of `s`.
pub(crate) fn scheme_len(s: &[u8]) -> Result<usize> {
    match s.first() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return Err(Error::new(ErrorKind::InvalidScheme, 0)),
    }
    Ok(s.iter().position(|&b| !is_scheme_char(b)).unwrap_or(s.len()))
}

/// Parse a whole string as `scheme` (without the `:`).
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidScheme`] at the first offending byte.
pub fn parse_scheme(s: &str) -> Result<Scheme> {
    let n = scheme_len(s.as_bytes())?;
    if n != s.len() {
        return Err(Error::new(ErrorKind::InvalidScheme, n));
    }
    Ok(get_scheme(s))
}

/// URI = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
///
/// # Errors
///
/// Returns the first offending byte and why it was rejected.
pub fn parse_uri(s: &str) -> Result<Parts> {
    let bytes = s.as_bytes();
    let n = scheme_len(bytes)?;
    if bytes.get(n) != Some(&b':') {
        return Err(Error::new(ErrorKind::InvalidScheme, n));
    }

    let mut parts = Parts::new();
    parts.scheme = get_scheme(&s[..n]);
    parts.set_offset(Part::User, n + 1);
    hier_part(s, n + 1, true, &mut parts)?;
    Ok(parts)
}

/// relative-ref = relative-part [ "?" query ] [ "#" fragment ]
///
/// # Errors
///
/// Returns the first offending byte and why it was rejected.
pub fn parse_relative_ref(s: &str) -> Result<Parts> {
    let mut parts = Parts::new();
    hier_part(s, 0, false, &mut parts)?;
    Ok(parts)
}

/// URI-reference = URI / relative-ref
///
/// # Errors
///
/// Returns the first offending byte and why it was rejected.
pub fn parse_uri_reference(s: &str) -> Result<Parts> {
    let bytes = s.as_bytes();
    match scheme_len(bytes) {
        Ok(n) if bytes.get(n) == Some(&b':') => parse_uri(s),
        _ => parse_relative_ref(s),
    }
}

/// Everything after the scheme: `[ "//" authority ] path [ "?" query ] [ "#" fragment ]`
fn hier_part(s: &str, start: usize, has_scheme: bool, parts: &mut Parts) -> Result<()> {
    let bytes = s.as_bytes();
    let mut pos = start;

    if bytes[pos..].starts_with(b"//") {
        let auth = authority(bytes, pos + 2)?;
        parts.set_offset(Part::Password, auth.user_end);
        parts.set_offset(Part::Host, auth.password_end);
        parts.set_offset(Part::Port, auth.host_end);
        parts.set_offset(Part::Path, auth.end);
        parts.host = auth.host;
        parts.port_number = auth.port_number;
        pos = auth.end;

        // path-abempty
        if bytes.get(pos) == Some(&b'/') {
            pos = scan_at(&PATH, bytes, pos)?;
        }
    } else {
        for part in [Part::Password, Part::Host, Part::Port, Part::Path] {
            parts.set_offset(part, pos);
        }
        parts.host = HostKind::None;

        if has_scheme || bytes.get(pos) == Some(&b'/') {
            // path-absolute / path-rootless / path-empty
            pos = scan_at(&PATH, bytes, pos)?;
        } else {
            // path-noscheme: the first segment cannot hold a ':'
            pos = scan_at(&SEGMENT_NC, bytes, pos)?;
            if bytes.get(pos) == Some(&b'/') {
                pos = scan_at(&PATH, bytes, pos)?;
            }
        }
    }

    parts.set_offset(Part::Query, pos);
    if bytes.get(pos) == Some(&b'?') {
        pos = scan_at(&QUERY, bytes, pos + 1)?;
    }
    parts.set_offset(Part::Fragment, pos);
    if bytes.get(pos) == Some(&b'#') {
        pos = scan_at(&FRAGMENT, bytes, pos + 1)?;
    }
    parts.set_offset(Part::End, pos);

    if pos != bytes.len() {
        return Err(Error::new(ErrorKind::InvalidCharacter, pos));
    }

    let path = &s[parts.offset(Part::Path)..parts.offset(Part::Query)];
    let query = &s[parts.offset(Part::Query)..parts.offset(Part::Fragment)];
    parts.segment_count = Segments::new(path).len();
    parts.param_count = Params::new(query).len();
    Ok(())
}

use core::net::{Ipv4Addr, Ipv6Addr};

use super::scan_at;
use crate::character_sets::is_ipvfuture_char;
use crate::error::{Error, ErrorKind, Result};
use crate::percent_encode::{REG_NAME, USERINFO};
use crate::types::{HostKind, HostType};

/// Boundaries of an authority found in a larger string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AuthorityParts {
    /// End of the user, where `:` or `@` follows
    pub user_end: usize,
    /// Just past `@`; equals `user_end` when there is no userinfo
    pub password_end: usize,
    pub host_end: usize,
    /// End of the port, or `host_end` without one
    pub end: usize,
    pub host: HostKind,
    pub port_number: Option<u16>,
}

/// authority = [ userinfo "@" ] host [ ":" port ]
///
/// The authority must be followed by `/`, `?`, `#` or the end of `s`.
pub(crate) fn authority(s: &[u8], start: usize) -> Result<AuthorityParts> {
    // Only a '@' tells userinfo apart from a host
    let probe = scan_at(&USERINFO, s, start)?;
    let (user_end, password_end) = if s.get(probe) == Some(&b'@') {
        let colon = memchr::memchr(b':', &s[start..probe]).map_or(probe, |i| start + i);
        (colon, probe + 1)
    } else {
        (start, start)
    };

    let (host_end, host) = host(s, password_end)?;

    let mut end = host_end;
    let mut port_number = None;
    if s.get(end) == Some(&b':') {
        let digits = end + 1;
        end = digits + s[digits..].iter().take_while(|b| b.is_ascii_digit()).count();
        port_number = port_value(&s[digits..end]);
        if !at_authority_end(s, end) {
            return Err(Error::new(ErrorKind::InvalidPort, end));
        }
    } else if !at_authority_end(s, end) {
        return Err(Error::new(ErrorKind::InvalidCharacter, end));
    }

    Ok(AuthorityParts {
        user_end,
        password_end,
        host_end,
        end,
        host,
        port_number,
    })
}

fn at_authority_end(s: &[u8], pos: usize) -> bool {
    matches!(s.get(pos), None | Some(b'/' | b'?' | b'#'))
}

/// host = IP-literal / IPv4address / reg-name
pub(crate) fn host(s: &[u8], start: usize) -> Result<(usize, HostKind)> {
    if s.get(start) != Some(&b'[') {
        let end = scan_at(&REG_NAME, s, start)?;
        let kind = ipv4(&s[start..end]).map_or(HostKind::Name, HostKind::Ipv4);
        return Ok((end, kind));
    }

    let inner = start + 1;
    let close = memchr::memchr(b']', &s[inner..])
        .map(|i| inner + i)
        .ok_or(Error::new(ErrorKind::InvalidHost, start))?;
    let literal = &s[inner..close];
    let kind = if matches!(literal.first(), Some(b'v' | b'V')) {
        ipvfuture(literal, inner)?;
        HostKind::IpvFuture
    } else {
        HostKind::Ipv6(ipv6(literal).ok_or(Error::new(ErrorKind::InvalidIpv6, inner))?)
    };
    Ok((close + 1, kind))
}

/// IPv4address = dec-octet "." dec-octet "." dec-octet "." dec-octet
fn ipv4(text: &[u8]) -> Option<Ipv4Addr> {
    core::str::from_utf8(text).ok()?.parse().ok()
}

fn ipv6(text: &[u8]) -> Option<Ipv6Addr> {
    core::str::from_utf8(text).ok()?.parse().ok()
}

/// IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
fn ipvfuture(text: &[u8], base: usize) -> Result<()> {
    let fail = |at: usize| Error::new(ErrorKind::InvalidIpvFuture, base + at);

    let hex = text[1..].iter().take_while(|b| b.is_ascii_hexdigit()).count();
    if hex == 0 {
        return Err(fail(1));
    }
    let dot = 1 + hex;
    if text.get(dot) != Some(&b'.') {
        return Err(fail(dot));
    }
    let tail = text[dot + 1..]
        .iter()
        .take_while(|&&b| is_ipvfuture_char(b))
        .count();
    let end = dot + 1 + tail;
    if tail == 0 || end != text.len() {
        return Err(fail(end));
    }
    Ok(())
}

/// Port digits as a number, if they fit
fn port_value(digits: &[u8]) -> Option<u16> {
    core::str::from_utf8(digits).ok()?.parse().ok()
}

/// A parsed authority, borrowed from the text it was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authority<'a> {
    text: &'a str,
    parts: AuthorityParts,
}

impl<'a> Authority<'a> {
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn has_userinfo(&self) -> bool {
        self.parts.password_end > self.parts.user_end
    }

    /// Userinfo without the trailing `@`
    pub fn userinfo(&self) -> Option<&'a str> {
        self.has_userinfo()
            .then(|| &self.text[..self.parts.password_end - 1])
    }

    pub fn user(&self) -> &'a str {
        &self.text[..self.parts.user_end]
    }

    /// Password, when the userinfo contains a `:`
    pub fn password(&self) -> Option<&'a str> {
        let AuthorityParts {
            user_end,
            password_end,
            ..
        } = self.parts;
        (password_end - user_end > 1).then(|| &self.text[user_end + 1..password_end - 1])
    }

    pub fn host(&self) -> &'a str {
        &self.text[self.parts.password_end..self.parts.host_end]
    }

    pub fn host_type(&self) -> HostType {
        self.parts.host.host_type()
    }

    /// Port digits, when a `:` follows the host
    pub fn port(&self) -> Option<&'a str> {
        (self.parts.end > self.parts.host_end).then(|| &self.text[self.parts.host_end + 1..])
    }

    pub fn port_number(&self) -> Option<u16> {
        self.parts.port_number
    }

    pub(crate) fn parts(&self) -> AuthorityParts {
        self.parts
    }
}

/// Parse a whole string as `authority`.
///
/// # Errors
///
/// Returns the first offending byte and why it was rejected.
pub fn parse_authority(s: &str) -> Result<Authority<'_>> {
    let parts = authority(s.as_bytes(), 0)?;
    if parts.end != s.len() {
        return Err(Error::new(ErrorKind::InvalidCharacter, parts.end));
    }
    Ok(Authority { text: s, parts })
}

pub(crate) fn host_kind(s: &str) -> Result<HostKind> {
    let (end, kind) = host(s.as_bytes(), 0)?;
    if end != s.len() {
        return Err(Error::new(ErrorKind::InvalidCharacter, end));
    }
    Ok(kind)
}

/// Parse a whole string as `host` and classify it.
///
/// # Errors
///
/// Returns the first offending byte and why it was rejected.
pub fn parse_host(s: &str) -> Result<HostType> {
    host_kind(s).map(HostKind::host_type)
}

/// Parse `port = *DIGIT`. Empty or too large ports are valid and have no number.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidPort`] at the first non-digit.
pub fn parse_port(s: &str) -> Result<Option<u16>> {
    match s.bytes().position(|b| !b.is_ascii_digit()) {
        Some(at) => Err(Error::new(ErrorKind::InvalidPort, at)),
        None => Ok(port_value(s.as_bytes())),
    }
}

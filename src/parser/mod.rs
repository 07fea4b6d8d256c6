mod authority;
mod grammar;

pub(crate) use authority::host_kind;
pub use authority::{Authority, parse_authority, parse_host, parse_port};
pub use grammar::{parse_relative_ref, parse_scheme, parse_uri, parse_uri_reference};

use crate::error::Result;
use crate::percent_encode::CharSet;

/// Scan `s[start..]` under `set` and return the absolute end of the match
fn scan_at(set: &'static CharSet, s: &[u8], start: usize) -> Result<usize> {
    set.scan(&s[start..])
        .map(|n| start + n)
        .map_err(|e| e.shifted(start))
}

#![cfg_attr(not(feature = "std"), no_std)]

//! RFC 3986 URLs stored as a single percent-encoded buffer.
//!
//! A [`Url`] keeps its text and an offset table for the nine component
//! boundaries. Getters borrow from the buffer; setters validate, reserve and
//! then edit in place. Paths and queries are walked on demand through
//! [`Segments`] and [`Params`].

#[cfg(not(feature = "std"))]
extern crate alloc;

// Logging goes through tracing when the feature is on and compiles away
// otherwise
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod buffer;
mod character_sets;
mod error;
mod normalize;
mod params;
mod parser;
mod parts;
mod percent_encode;
mod scheme;
mod segments;
#[cfg(feature = "serde")]
mod serde_impl;
mod storage;
mod types;
mod url;
mod url_path;
mod url_query;

// Public API
pub use buffer::MAX_SIZE;
pub use error::{Error, ErrorKind, Result};
pub use params::{Param, ParamCursor, Params, ParamsIter};
pub use parser::{
    Authority, parse_authority, parse_host, parse_port, parse_relative_ref, parse_scheme,
    parse_uri, parse_uri_reference,
};
pub use parts::{Part, Parts};
pub use percent_encode::{
    CharSet, FRAGMENT, PASSWORD, PATH, QUERY, QUERY_KEY, QUERY_VALUE, REG_NAME, SEGMENT,
    SEGMENT_NC, UNRESERVED, USER, USERINFO, decode, decode_query_str, decode_str, decoded_size,
    query_eq,
};
pub use scheme::get_scheme;
pub use segments::{SegmentCursor, Segments, SegmentsIter};
pub use storage::{HeapStorage, SliceStorage, Storage};
pub use types::{HostType, Scheme};
pub use crate::url::Url;

//! Heap types from `std` or `alloc`, so the rest of the crate does not care
//! which one is linked.

#[cfg(feature = "std")]
pub(crate) use std::{
    borrow::Cow,
    format,
    string::{String, ToString},
    vec::Vec,
};

#[cfg(not(feature = "std"))]
pub(crate) use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString},
    vec::Vec,
};

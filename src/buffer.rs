use crate::error::{Error, ErrorKind, Result};
use crate::parts::{Part, Parts};
use crate::storage::Storage;

/// Largest URL whose offsets fit the part table, leaving room for the NUL
pub const MAX_SIZE: usize = u32::MAX as usize - 1;

/// The encoded URL bytes and the part table describing them.
///
/// The bytes are followed by a NUL whenever any capacity has been
/// allocated.
#[derive(Debug, Clone)]
pub(crate) struct UrlBuffer<S> {
    storage: S,
    pub(crate) parts: Parts,
}

impl<S: Storage> UrlBuffer<S> {
    pub(crate) fn new(mut storage: S) -> Self {
        if let Some(first) = storage.bytes_mut().first_mut() {
            *first = 0;
        }
        Self {
            storage,
            parts: Parts::new(),
        }
    }

    pub(crate) fn as_bytes_with_nul(&self) -> &[u8] {
        if self.storage.capacity() == 0 {
            return b"\0";
        }
        &self.storage.bytes()[..=self.parts.total()]
    }

    /// Bytes in `[start, end)`; the buffer only ever holds ASCII
    pub(crate) fn slice(&self, start: usize, end: usize) -> &str {
        core::str::from_utf8(&self.storage.bytes()[start..end]).unwrap_or_default()
    }

    pub(crate) fn part(&self, part: Part) -> &str {
        let start = self.parts.offset(part);
        self.slice(start, start + self.parts.len(part))
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        let total = self.parts.total();
        &mut self.storage.bytes_mut()[..total]
    }

    pub(crate) fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Make room for a URL of `total` bytes.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::SizeLimit`] before anything is modified.
    pub(crate) fn reserve(&mut self, total: usize) -> Result<()> {
        if total > MAX_SIZE {
            return Err(Error::new(ErrorKind::SizeLimit, total));
        }
        self.storage.resize(total + 1)?;
        Ok(())
    }

    /// Total length after replacing `[first, last)` with `new_len` bytes
    pub(crate) fn total_after(&self, first: Part, last: Part, new_len: usize) -> usize {
        self.parts.total() - self.parts.len_between(first, last) + new_len
    }

    /// Resize the region `[first, last)` to `new_len` bytes and return it.
    ///
    /// Bytes after the region move with it and boundaries from `last` on
    /// shift by the size difference. Boundaries strictly inside the region
    /// move to its new end; callers split the region again afterwards. The
    /// first `min(old, new)` bytes of the region keep their contents.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::SizeLimit`] before anything is modified.
    pub(crate) fn splice(&mut self, first: Part, last: Part, new_len: usize) -> Result<&mut [u8]> {
        let total = self
            .parts
            .total()
            .checked_add(new_len)
            .map_or(usize::MAX, |n| n - self.parts.len_between(first, last));
        self.reserve(total)?;
        Ok(self.resize_within(first, last, new_len))
    }

    /// `splice` for a size the current capacity already covers
    pub(crate) fn resize_within(&mut self, first: Part, last: Part, new_len: usize) -> &mut [u8] {
        let start = self.parts.offset(first);
        let end = self.parts.offset(last);
        let total = self.parts.total();
        let new_end = start + new_len;

        if new_len != end - start {
            let new_total = total - (end - start) + new_len;
            debug_assert!(new_total < self.storage.capacity());
            trace!(?first, ?last, old = end - start, new = new_len, "splice");

            let bytes = self.storage.bytes_mut();
            bytes.copy_within(end..total, new_end);
            bytes[new_total] = 0;
            self.parts.shift_from(last, new_end as isize - end as isize);
        }
        self.parts.collapse(first, last, new_end);
        debug_assert!(self.parts.is_ordered());
        &mut self.storage.bytes_mut()[start..new_end]
    }

    /// Insert `prefix` at the start of `part`; capacity must already cover it
    pub(crate) fn prefix_within(&mut self, part: Part, prefix: &[u8]) {
        let len = self.parts.len(part);
        let k = prefix.len();
        let region = self.resize_within(part, part.next(), len + k);
        region.copy_within(..len, k);
        region[..k].copy_from_slice(prefix);
    }

    /// Drop the first `k` bytes of `part`
    pub(crate) fn strip_prefix(&mut self, part: Part, k: usize) {
        let start = self.parts.offset(part);
        let len = self.parts.len(part);
        self.storage
            .bytes_mut()
            .copy_within(start + k..start + len, start);
        self.resize_within(part, part.next(), len - k);
    }

    /// Replace the whole URL with already parsed text
    pub(crate) fn assign(&mut self, text: &[u8], parts: Parts) -> Result<()> {
        self.reserve(text.len())?;
        let bytes = self.storage.bytes_mut();
        bytes[..text.len()].copy_from_slice(text);
        bytes[text.len()] = 0;
        self.parts = parts;
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.parts = Parts::new();
        if let Some(first) = self.storage.bytes_mut().first_mut() {
            *first = 0;
        }
    }
}

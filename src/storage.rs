use crate::compat::Vec;
use crate::error::{Error, ErrorKind, Result};

/// Backing memory for a URL buffer.
///
/// `resize` either provides at least `capacity` bytes, keeping the bytes
/// already stored, or fails without touching them. Asking for no more than
/// the current capacity always succeeds.
pub trait Storage {
    /// Bytes available
    fn capacity(&self) -> usize;

    /// All `capacity()` bytes
    fn bytes(&self) -> &[u8];

    /// All `capacity()` bytes, writable
    fn bytes_mut(&mut self) -> &mut [u8];

    /// Grow to at least `capacity` bytes. Never shrinks.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeLimit`] when the memory cannot be provided.
    fn resize(&mut self, capacity: usize) -> Result<&mut [u8]>;
}

/// Growable heap storage
#[derive(Debug, Clone, Default)]
pub struct HeapStorage {
    bytes: Vec<u8>,
}

impl HeapStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for HeapStorage {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn resize(&mut self, capacity: usize) -> Result<&mut [u8]> {
        if capacity > self.bytes.len() {
            let target = capacity.next_power_of_two().max(16);
            self.bytes
                .try_reserve_exact(target - self.bytes.len())
                .map_err(|_| Error::new(ErrorKind::SizeLimit, capacity))?;
            self.bytes.resize(target, 0);
        }
        Ok(&mut self.bytes)
    }
}

/// Fixed storage over a caller-provided slice
#[derive(Debug)]
pub struct SliceStorage<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SliceStorage<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }
}

impl Storage for SliceStorage<'_> {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn bytes(&self) -> &[u8] {
        self.bytes
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self.bytes
    }

    fn resize(&mut self, capacity: usize) -> Result<&mut [u8]> {
        if capacity > self.bytes.len() {
            return Err(Error::new(ErrorKind::SizeLimit, capacity));
        }
        Ok(self.bytes)
    }
}

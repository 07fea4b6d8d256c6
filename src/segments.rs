use core::iter::FusedIterator;

/// The segments of an encoded path.
///
/// Segments are found by scanning for `/` on every step; nothing is
/// stored besides the path itself. The path `/` has no segments, and a
/// leading `./` (or `/./` for absolute paths) is filler that only keeps the
/// path unambiguous, so it is not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    path: &'a str,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(path: &'a str) -> Self {
        Self { path }
    }

    /// The encoded path
    pub fn as_str(&self) -> &'a str {
        self.path
    }

    pub fn is_absolute(&self) -> bool {
        self.path.starts_with('/')
    }

    /// Where the first segment starts
    fn region_start(&self) -> usize {
        let path = self.path.as_bytes();
        if path == b"/" {
            1
        } else if path.starts_with(b"/./") {
            2
        } else if path.starts_with(b"./") {
            1
        } else {
            0
        }
    }

    pub fn begin(&self) -> SegmentCursor<'a> {
        SegmentCursor::at(self.path, self.region_start(), self.region_start())
    }

    pub fn end(&self) -> SegmentCursor<'a> {
        SegmentCursor::at(self.path, self.region_start(), self.path.len())
    }

    pub fn iter(&self) -> SegmentsIter<'a> {
        SegmentsIter {
            front: self.begin(),
            back: self.end(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.begin() == self.end()
    }

    /// Segment at `index`, counting from the end when negative
    pub fn get(&self, index: isize) -> Option<&'a str> {
        if index >= 0 {
            self.iter().nth(index as usize)
        } else {
            self.iter().rev().nth(index.unsigned_abs() - 1)
        }
    }
}

impl<'a> IntoIterator for Segments<'a> {
    type Item = &'a str;
    type IntoIter = SegmentsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Position of one segment: the offset where it starts (on the `/` before
/// it, except for a first segment that has none) and its length without
/// that `/`.
///
/// Two cursors are equal when they sit at the same offset with the same
/// length. The end cursor sits at the end of the path with length zero.
#[derive(Debug, Clone, Copy)]
pub struct SegmentCursor<'a> {
    path: &'a str,
    start: usize,
    pos: usize,
    len: usize,
}

impl<'a> SegmentCursor<'a> {
    fn at(path: &'a str, start: usize, pos: usize) -> Self {
        let bytes = path.as_bytes();
        let len = if pos >= bytes.len() {
            0
        } else {
            let from = pos + usize::from(bytes[pos] == b'/');
            memchr::memchr(b'/', &bytes[from..]).unwrap_or(bytes.len() - from)
        };
        Self {
            path,
            start,
            pos: pos.min(bytes.len()),
            len,
        }
    }

    fn has_slash(&self) -> bool {
        self.path.as_bytes().get(self.pos) == Some(&b'/')
    }

    pub fn is_end(&self) -> bool {
        self.pos == self.path.len()
    }

    /// Byte offset in the path
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The encoded segment under the cursor.
    ///
    /// # Panics
    ///
    /// Panics on the end cursor.
    pub fn get(&self) -> &'a str {
        assert!(!self.is_end(), "segment cursor is at the end");
        let from = self.pos + usize::from(self.has_slash());
        &self.path[from..from + self.len]
    }

    /// Step to the next segment.
    ///
    /// # Panics
    ///
    /// Panics on the end cursor.
    pub fn advance(&mut self) {
        assert!(!self.is_end(), "segment cursor is at the end");
        let next = self.pos + usize::from(self.has_slash()) + self.len;
        *self = Self::at(self.path, self.start, next);
    }

    /// Step to the previous segment.
    ///
    /// # Panics
    ///
    /// Panics on the first segment.
    pub fn retreat(&mut self) {
        assert!(self.pos > self.start, "segment cursor is at the beginning");
        let bytes = &self.path.as_bytes()[self.start..self.pos];
        let prev = memchr::memrchr(b'/', bytes).map_or(self.start, |i| self.start + i);
        *self = Self::at(self.path, self.start, prev);
    }
}

impl PartialEq for SegmentCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.path, other.path) && self.pos == other.pos && self.len == other.len
    }
}

impl Eq for SegmentCursor<'_> {}

/// Double-ended iterator over encoded segments
#[derive(Debug, Clone)]
pub struct SegmentsIter<'a> {
    front: SegmentCursor<'a>,
    back: SegmentCursor<'a>,
}

impl<'a> Iterator for SegmentsIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let segment = self.front.get();
        self.front.advance();
        Some(segment)
    }
}

impl DoubleEndedIterator for SegmentsIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.retreat();
        Some(self.back.get())
    }
}

impl FusedIterator for SegmentsIter<'_> {}

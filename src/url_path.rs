use crate::compat::String;
use crate::error::Result;
use crate::parts::Part;
use crate::percent_encode::{PATH, SEGMENT};
use crate::storage::Storage;
use crate::url::{Input, Url, first_segment_has_colon, rejected};

impl<S: Storage> Url<S> {
    /// Replace the path with encoded text.
    ///
    /// The path is adjusted so it keeps its meaning: under an authority it
    /// gets a leading `/`, without one a leading `//` becomes `/.//`, and
    /// a `:` in the first segment of a scheme-less path gets a `./` prefix.
    ///
    /// # Errors
    ///
    /// Returns the first offending byte of `path` and why it was rejected.
    pub fn set_encoded_path(&mut self, path: &str) -> Result<&mut Self> {
        PATH.validate(path.as_bytes()).map_err(rejected("path"))?;
        self.write_path(Input::Encoded(path), path)
    }

    /// Replace the path with plain text, encoding what the path cannot
    /// hold. `/` stays a separator.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeLimit`](crate::ErrorKind::SizeLimit) when
    /// the storage cannot grow.
    pub fn set_path(&mut self, path: &str) -> Result<&mut Self> {
        self.write_path(Input::Plain(path, &PATH), path)
    }

    /// `raw` is the caller's text; `/` and `:` mean the same in plain and
    /// encoded form, so the prefix can be decided on it
    fn write_path(&mut self, input: Input<'_>, raw: &str) -> Result<&mut Self> {
        let prefix: &[u8] = if self.has_authority() {
            if raw.starts_with('/') { b"" } else { b"/" }
        } else if raw.starts_with("//") {
            b"/."
        } else if !self.has_scheme() && first_segment_has_colon(raw) {
            b"./"
        } else {
            b""
        };

        let k = prefix.len();
        let region = self.buf.splice(Part::Path, Part::Query, k + input.len())?;
        region[..k].copy_from_slice(prefix);
        input.write(&mut region[k..]);
        self.update_segment_count();
        Ok(self)
    }

    /// Make the path absolute or relative; returns whether the request
    /// could be honored.
    ///
    /// A path under an authority can only become relative when it is `/`
    /// or empty; otherwise nothing changes and `false` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeLimit`](crate::ErrorKind::SizeLimit) when
    /// the storage cannot grow.
    pub fn set_path_absolute(&mut self, absolute: bool) -> Result<bool> {
        let path = self.encoded_path();
        if absolute == path.starts_with('/') {
            return Ok(true);
        }

        let grown = self.len() + 1;
        if absolute {
            self.buf.reserve(grown)?;
            self.buf.prefix_within(Part::Path, b"/");
        } else if self.has_authority() {
            if path != "/" {
                return Ok(false);
            }
            self.buf.strip_prefix(Part::Path, 1);
        } else if !self.has_scheme() && first_segment_has_colon(&path[1..]) {
            // "/a:b" becomes "./a:b"
            self.buf.reserve(grown)?;
            self.buf.prefix_within(Part::Path, b".");
        } else {
            self.buf.strip_prefix(Part::Path, 1);
        }
        self.update_segment_count();
        Ok(true)
    }

    /// Replace all segments with encoded ones.
    ///
    /// The path stays absolute when it was absolute or has an authority.
    ///
    /// # Errors
    ///
    /// Returns the first offending byte of the failing segment and why it
    /// was rejected.
    pub fn set_encoded_segments<'s, I>(&mut self, segments: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let path = self.segment_path(segments.into_iter().map(Input::Encoded))?;
        self.write_built_path(&path)
    }

    /// Replace all segments with plain ones; a `/` inside a segment is
    /// encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeLimit`](crate::ErrorKind::SizeLimit) when
    /// the storage cannot grow.
    pub fn set_segments<'s, I>(&mut self, segments: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let inputs = segments.into_iter().map(|s| Input::Plain(s, &SEGMENT));
        let path = self.segment_path(inputs)?;
        self.write_built_path(&path)
    }

    /// Append one encoded segment.
    ///
    /// # Errors
    ///
    /// Returns the first offending byte of `segment` and why it was
    /// rejected.
    pub fn push_encoded_segment(&mut self, segment: &str) -> Result<&mut Self> {
        self.push_input(Input::Encoded(segment))
    }

    /// Append one plain segment.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeLimit`](crate::ErrorKind::SizeLimit) when
    /// the storage cannot grow.
    pub fn push_segment(&mut self, segment: &str) -> Result<&mut Self> {
        self.push_input(Input::Plain(segment, &SEGMENT))
    }

    fn push_input(&mut self, segment: Input<'_>) -> Result<&mut Self> {
        let path = {
            let existing = self.segments().into_iter().map(Input::Encoded);
            self.segment_path(existing.chain(core::iter::once(segment)))?
        };
        self.write_built_path(&path)
    }

    /// Remove every segment, keeping a lone `/` on an absolute path
    pub fn clear_segments(&mut self) -> &mut Self {
        let keep = usize::from(self.is_path_absolute());
        self.buf.resize_within(Part::Path, Part::Query, keep);
        self.update_segment_count();
        self
    }

    /// Join segments into a path that reads back as the same list
    fn segment_path<'s>(&self, segments: impl Iterator<Item = Input<'s>>) -> Result<String> {
        let mut body = String::new();
        let mut count = 0;
        let mut first_len = 0;
        let mut first_is_dot = false;
        let mut first_has_colon = false;

        for segment in segments {
            if count > 0 {
                body.push('/');
            }
            let start = body.len();
            match segment {
                Input::Encoded(s) => {
                    SEGMENT.validate(s.as_bytes()).map_err(rejected("segment"))?;
                    body.push_str(s);
                }
                Input::Plain(s, set) => set.encode_into(&mut body, s),
            }
            if count == 0 {
                let first = &body[start..];
                first_len = first.len();
                first_is_dot = first == ".";
                first_has_colon = first.contains(':');
            }
            count += 1;
        }

        let absolute = self.is_path_absolute() || self.has_authority();
        let mut path = String::with_capacity(body.len() + 3);
        if absolute {
            path.push('/');
        }
        if count == 0 {
            return Ok(path);
        }
        // Without "./" a leading empty or "." segment would be read as
        // filler, and a leading "a:" as a scheme
        let needs_dot = first_len == 0
            || (first_is_dot && count > 1)
            || (!absolute && !self.has_scheme() && first_has_colon);
        if needs_dot {
            path.push_str("./");
        }
        path.push_str(&body);
        Ok(path)
    }

    fn write_built_path(&mut self, path: &str) -> Result<&mut Self> {
        let region = self.buf.splice(Part::Path, Part::Query, path.len())?;
        region.copy_from_slice(path.as_bytes());
        self.update_segment_count();
        Ok(self)
    }

    pub(crate) fn update_segment_count(&mut self) {
        self.buf.parts.segment_count = self.segments().len();
    }
}

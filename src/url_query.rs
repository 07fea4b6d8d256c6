use crate::error::{Error, ErrorKind, Result};
use crate::parts::Part;
use crate::percent_encode::{FRAGMENT, QUERY, QUERY_KEY, QUERY_VALUE};
use crate::storage::Storage;
use crate::url::{Input, Url, rejected};

impl<S: Storage> Url<S> {
    // --- Query ---

    /// Replace the query with encoded text (without `?`). Empty text
    /// removes the query.
    ///
    /// # Errors
    ///
    /// Returns the first offending byte of `query` and why it was rejected.
    pub fn set_encoded_query(&mut self, query: &str) -> Result<&mut Self> {
        QUERY.validate(query.as_bytes()).map_err(rejected("query"))?;
        if query.is_empty() {
            return Ok(self.remove_query());
        }
        self.write_query(Input::Encoded(query))
    }

    /// Replace the query with plain text; `&`, `=` and `+` are kept as
    /// they are. Empty text removes the query.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeLimit`] when the storage cannot grow.
    pub fn set_query(&mut self, query: &str) -> Result<&mut Self> {
        if query.is_empty() {
            return Ok(self.remove_query());
        }
        self.write_query(Input::Plain(query, &QUERY))
    }

    /// Replace the query including its `?`; `"?"` keeps an empty query and
    /// `""` removes it.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidCharacter`] at offset 0 when text is not
    /// led by `?`, or the first offending byte of the query.
    pub fn set_query_part(&mut self, part: &str) -> Result<&mut Self> {
        let Some(query) = part.strip_prefix('?') else {
            if part.is_empty() {
                return Ok(self.remove_query());
            }
            return Err(rejected("query")(Error::new(ErrorKind::InvalidCharacter, 0)));
        };
        QUERY
            .validate(query.as_bytes())
            .map_err(|e| rejected("query")(e.shifted(1)))?;
        self.write_query(Input::Encoded(query))
    }

    fn write_query(&mut self, input: Input<'_>) -> Result<&mut Self> {
        let n = input.len();
        let region = self.buf.splice(Part::Query, Part::Fragment, n + 1)?;
        region[0] = b'?';
        input.write(&mut region[1..]);
        self.update_param_count();
        Ok(self)
    }

    /// Remove the query and its `?`
    pub fn remove_query(&mut self) -> &mut Self {
        self.buf.resize_within(Part::Query, Part::Fragment, 0);
        self.buf.parts.param_count = 0;
        self
    }

    /// Append a `key[=value]` pair from plain text. `&`, `=` and `+` in the
    /// key and `&` and `+` in the value are encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeLimit`] when the storage cannot grow.
    pub fn append_param(&mut self, key: &str, value: Option<&str>) -> Result<&mut Self> {
        let key = Input::Plain(key, &QUERY_KEY);
        let value = value.map(|v| Input::Plain(v, &QUERY_VALUE));
        let key_len = key.len();
        let pair_len = key_len + value.map_or(0, |v| 1 + v.len());

        // An absent query gets its "?"; a non-empty one gets a "&"
        let existing = self.buf.parts.len(Part::Query);
        let keep = existing.max(1);
        let sep = usize::from(existing > 1);
        let region = self
            .buf
            .splice(Part::Query, Part::Fragment, keep + sep + pair_len)?;
        region[0] = b'?';
        let mut at = keep;
        if sep == 1 {
            region[at] = b'&';
            at += 1;
        }
        key.write(&mut region[at..at + key_len]);
        at += key_len;
        if let Some(value) = value {
            region[at] = b'=';
            value.write(&mut region[at + 1..]);
        }
        self.update_param_count();
        Ok(self)
    }

    fn update_param_count(&mut self) {
        self.buf.parts.param_count = self.params().len();
    }

    // --- Fragment ---

    /// Replace the fragment with encoded text (without `#`). Empty text
    /// removes the fragment.
    ///
    /// # Errors
    ///
    /// Returns the first offending byte of `fragment` and why it was
    /// rejected.
    pub fn set_encoded_fragment(&mut self, fragment: &str) -> Result<&mut Self> {
        FRAGMENT
            .validate(fragment.as_bytes())
            .map_err(rejected("fragment"))?;
        if fragment.is_empty() {
            return Ok(self.remove_fragment());
        }
        self.write_fragment(Input::Encoded(fragment))
    }

    /// Replace the fragment with plain text. Empty text removes the
    /// fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SizeLimit`] when the storage cannot grow.
    pub fn set_fragment(&mut self, fragment: &str) -> Result<&mut Self> {
        if fragment.is_empty() {
            return Ok(self.remove_fragment());
        }
        self.write_fragment(Input::Plain(fragment, &FRAGMENT))
    }

    /// Replace the fragment including its `#`; `"#"` keeps an empty
    /// fragment and `""` removes it.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidCharacter`] at offset 0 when text is not
    /// led by `#`, or the first offending byte of the fragment.
    pub fn set_fragment_part(&mut self, part: &str) -> Result<&mut Self> {
        let Some(fragment) = part.strip_prefix('#') else {
            if part.is_empty() {
                return Ok(self.remove_fragment());
            }
            return Err(rejected("fragment")(Error::new(ErrorKind::InvalidCharacter, 0)));
        };
        FRAGMENT
            .validate(fragment.as_bytes())
            .map_err(|e| rejected("fragment")(e.shifted(1)))?;
        self.write_fragment(Input::Encoded(fragment))
    }

    fn write_fragment(&mut self, input: Input<'_>) -> Result<&mut Self> {
        let n = input.len();
        let region = self.buf.splice(Part::Fragment, Part::End, n + 1)?;
        region[0] = b'#';
        input.write(&mut region[1..]);
        Ok(self)
    }

    /// Remove the fragment and its `#`
    pub fn remove_fragment(&mut self) -> &mut Self {
        self.buf.resize_within(Part::Fragment, Part::End, 0);
        self
    }
}

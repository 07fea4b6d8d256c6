use core::iter::FusedIterator;

use crate::compat::Cow;
use crate::percent_encode::{decode_query_str, query_eq};

/// One `key[=value]` pair of a query, still encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'a> {
    encoded_key: &'a str,
    encoded_value: Option<&'a str>,
}

impl<'a> Param<'a> {
    pub fn encoded_key(&self) -> &'a str {
        self.encoded_key
    }

    /// Encoded value, `""` when there is no `=`
    pub fn encoded_value(&self) -> &'a str {
        self.encoded_value.unwrap_or_default()
    }

    pub fn has_value(&self) -> bool {
        self.encoded_value.is_some()
    }

    /// Decoded key; `+` reads as a space
    pub fn key(&self) -> Cow<'a, str> {
        decode_query_str(self.encoded_key)
    }

    /// Decoded value; `+` reads as a space
    pub fn value(&self) -> Cow<'a, str> {
        decode_query_str(self.encoded_value())
    }
}

/// The parameters of an encoded query.
///
/// Pairs are separated by `&` and split at the first `=`. Lookups decode
/// keys on the fly and compare them with plain text; nothing is cached, so
/// each lookup walks the whole query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params<'a> {
    /// Query with its leading `?`, or empty
    query: &'a str,
}

impl<'a> Params<'a> {
    pub(crate) fn new(query: &'a str) -> Self {
        Self { query }
    }

    /// The encoded query without `?`
    pub fn as_str(&self) -> &'a str {
        self.query.get(1..).unwrap_or_default()
    }

    pub fn begin(&self) -> ParamCursor<'a> {
        if self.query.len() <= 1 {
            self.end()
        } else {
            ParamCursor::at(self.query, 0)
        }
    }

    pub fn end(&self) -> ParamCursor<'a> {
        ParamCursor::at(self.query, self.query.len())
    }

    pub fn iter(&self) -> ParamsIter<'a> {
        ParamsIter {
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

    /// Whether any key decodes to `key`
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Number of pairs whose key decodes to `key`
    pub fn count(&self, key: &str) -> usize {
        self.iter().filter(|p| query_eq(p.encoded_key, key)).count()
    }

    /// First pair whose key decodes to `key`
    pub fn find(&self, key: &str) -> Option<Param<'a>> {
        self.iter().find(|p| query_eq(p.encoded_key, key))
    }

    /// Last pair whose key decodes to `key`
    pub fn find_last(&self, key: &str) -> Option<Param<'a>> {
        self.iter().rev().find(|p| query_eq(p.encoded_key, key))
    }

    /// Decoded value of the first pair with `key`
    pub fn get(&self, key: &str) -> Option<Cow<'a, str>> {
        self.find(key).map(|p| p.value())
    }

    /// Decoded value of the first pair with `key`, `""` when absent
    pub fn value(&self, key: &str) -> Cow<'a, str> {
        self.get(key).unwrap_or_default()
    }

    /// Decoded values of every pair with `key`
    pub fn get_all(&self, key: &'a str) -> impl Iterator<Item = Cow<'a, str>> {
        self.iter()
            .filter(move |p| query_eq(p.encoded_key, key))
            .map(|p| p.value())
    }
}

impl<'a> IntoIterator for Params<'a> {
    type Item = Param<'a>;
    type IntoIter = ParamsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Position of one pair: the offset of the `?` or `&` before it, the key
/// length, and the value length including its `=` (zero without one).
///
/// Two cursors are equal when offset and lengths match. The end cursor sits
/// at the end of the query with zero lengths.
#[derive(Debug, Clone, Copy)]
pub struct ParamCursor<'a> {
    query: &'a str,
    pos: usize,
    key_len: usize,
    value_len: usize,
}

impl<'a> ParamCursor<'a> {
    fn at(query: &'a str, pos: usize) -> Self {
        let bytes = query.as_bytes();
        let mut cursor = Self {
            query,
            pos,
            key_len: 0,
            value_len: 0,
        };
        if pos >= bytes.len() {
            cursor.pos = bytes.len();
            return cursor;
        }

        let key = pos + 1;
        let key_end =
            memchr::memchr2(b'&', b'=', &bytes[key..]).map_or(bytes.len(), |i| key + i);
        cursor.key_len = key_end - key;
        if bytes.get(key_end) == Some(&b'=') {
            let value = key_end + 1;
            let value_end =
                memchr::memchr(b'&', &bytes[value..]).map_or(bytes.len(), |i| value + i);
            cursor.value_len = value_end - key_end;
        }
        cursor
    }

    pub fn is_end(&self) -> bool {
        self.pos == self.query.len()
    }

    /// Byte offset of the `?` or `&` before the pair
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The pair under the cursor.
    ///
    /// # Panics
    ///
    /// Panics on the end cursor.
    pub fn get(&self) -> Param<'a> {
        assert!(!self.is_end(), "param cursor is at the end");
        let key = self.pos + 1;
        let key_end = key + self.key_len;
        Param {
            encoded_key: &self.query[key..key_end],
            encoded_value: (self.value_len > 0)
                .then(|| &self.query[key_end + 1..key_end + self.value_len]),
        }
    }

    /// Step to the next pair.
    ///
    /// # Panics
    ///
    /// Panics on the end cursor.
    pub fn advance(&mut self) {
        assert!(!self.is_end(), "param cursor is at the end");
        let next = self.pos + 1 + self.key_len + self.value_len;
        *self = Self::at(self.query, next);
    }

    /// Step to the previous pair.
    ///
    /// # Panics
    ///
    /// Panics on the first pair.
    pub fn retreat(&mut self) {
        assert!(self.pos > 0, "param cursor is at the beginning");
        let prev =
            memchr::memrchr(b'&', &self.query.as_bytes()[1..self.pos]).map_or(0, |i| i + 1);
        *self = Self::at(self.query, prev);
    }
}

impl PartialEq for ParamCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.query, other.query)
            && self.pos == other.pos
            && self.key_len == other.key_len
            && self.value_len == other.value_len
    }
}

impl Eq for ParamCursor<'_> {}

/// Double-ended iterator over query parameters
#[derive(Debug, Clone)]
pub struct ParamsIter<'a> {
    front: ParamCursor<'a>,
    back: ParamCursor<'a>,
}

impl<'a> Iterator for ParamsIter<'a> {
    type Item = Param<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let param = self.front.get();
        self.front.advance();
        Some(param)
    }
}

impl DoubleEndedIterator for ParamsIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.retreat();
        Some(self.back.get())
    }
}

impl FusedIterator for ParamsIter<'_> {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::Vec;

    fn pairs(query: &str) -> Vec<(&str, Option<&str>)> {
        Params::new(query)
            .iter()
            .map(|p| (p.encoded_key(), p.encoded_value))
            .collect()
    }

    #[test]
    fn test_split_pairs() {
        assert!(pairs("").is_empty());
        assert!(pairs("?").is_empty());
        assert_eq!(pairs("?a"), [("a", None)]);
        assert_eq!(pairs("?a="), [("a", Some(""))]);
        assert_eq!(pairs("?a=1&b=2"), [("a", Some("1")), ("b", Some("2"))]);
        assert_eq!(pairs("?&"), [("", None), ("", None)]);
        assert_eq!(pairs("?a=b=c"), [("a", Some("b=c"))]);
        assert_eq!(pairs("?=x"), [("", Some("x"))]);
    }

    #[test]
    fn test_reverse() {
        let rev: Vec<_> = Params::new("?a=1&b&c=3")
            .iter()
            .rev()
            .map(|p| p.encoded_key())
            .collect();
        assert_eq!(rev, ["c", "b", "a"]);

        let rev: Vec<_> = Params::new("?&").iter().rev().collect();
        assert_eq!(rev.len(), 2);
    }

    #[test]
    fn test_lookup() {
        let params = Params::new("?x=1&y=2");
        let found = params.find("y").unwrap();
        assert_eq!(found.key(), "y");
        assert_eq!(found.value(), "2");
        assert_eq!(params.count("z"), 0);
        assert_eq!(params.value("z"), "");
        assert!(params.contains("x"));
        assert!(!params.contains("X"));
    }

    #[test]
    fn test_decoded_keys() {
        let params = Params::new("?first+name=J%C3%B6rg&a%3Db=1&k=1&k=2");
        assert_eq!(params.get("first name").unwrap(), "J\u{f6}rg");
        assert_eq!(params.get("a=b").unwrap(), "1");
        assert_eq!(params.count("k"), 2);
        assert_eq!(params.find_last("k").unwrap().value(), "2");
        let all: Vec<_> = params.get_all("k").collect();
        assert_eq!(all, ["1", "2"]);
    }

    #[test]
    fn test_cursor_walk() {
        let params = Params::new("?a=1&bb");
        let mut cursor = params.begin();
        assert_eq!(cursor.offset(), 0);
        cursor.advance();
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.get().encoded_key(), "bb");
        assert!(!cursor.get().has_value());
        cursor.advance();
        assert_eq!(cursor, params.end());
        cursor.retreat();
        cursor.retreat();
        assert_eq!(cursor, params.begin());
    }

    #[test]
    #[should_panic(expected = "at the end")]
    fn test_end_cursor_get_panics() {
        let _ = Params::new("?a").end().get();
    }
}

#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Query parameter iteration and lookups
use urlbuf::Url;

fn keys(url: &Url) -> Vec<&str> {
    url.params().iter().map(|p| p.encoded_key()).collect()
}

#[test]
fn test_find_count_value() {
    let url = Url::parse("?x=1&y=2").unwrap();
    let params = url.params();
    let y = params.find("y").unwrap();
    assert_eq!((y.encoded_key(), y.encoded_value()), ("y", "2"));
    assert_eq!(params.count("z"), 0);
    assert_eq!(params.value("z"), "");
    assert_eq!(params.len(), 2);
    assert_eq!(url.param_count(), 2);
}

#[test]
fn test_empty_queries() {
    for input in ["", "http://h/", "http://h/?"] {
        let url = Url::parse(input).unwrap();
        assert!(url.params().is_empty(), "{input}");
        assert_eq!(url.param_count(), 0, "{input}");
    }
    let url = Url::parse("?&").unwrap();
    assert_eq!(url.param_count(), 2);
}

#[test]
fn test_reverse_iteration() {
    let url = Url::parse("http://h/?a=1&b&c=").unwrap();
    let rev: Vec<_> = url.params().iter().rev().map(|p| p.encoded_key()).collect();
    assert_eq!(rev, ["c", "b", "a"]);

    let mut iter = url.params().iter();
    assert_eq!(iter.next_back().unwrap().encoded_key(), "c");
    assert_eq!(iter.next().unwrap().encoded_key(), "a");
    assert_eq!(iter.next().unwrap().encoded_key(), "b");
    assert!(iter.next().is_none());
    assert!(iter.next_back().is_none());
}

#[test]
fn test_values_and_flags() {
    let url = Url::parse("?flag&empty=&v=a=b").unwrap();
    let params = url.params();
    let flag = params.find("flag").unwrap();
    assert!(!flag.has_value());
    assert_eq!(flag.value(), "");
    let empty = params.find("empty").unwrap();
    assert!(empty.has_value());
    assert_eq!(params.get("v").unwrap(), "a=b");
}

#[test]
fn test_decoded_comparison() {
    let url = Url::parse("?na%6De=1&a+b=2&c%2Bd=3").unwrap();
    let params = url.params();
    assert!(params.contains("name"));
    assert_eq!(params.get("a b").unwrap(), "2");
    assert_eq!(params.get("c+d").unwrap(), "3");
    assert!(!params.contains("a+b"));
}

#[test]
fn test_repeated_keys() {
    let url = Url::parse("?k=1&x&k=2&k").unwrap();
    let params = url.params();
    assert_eq!(params.count("k"), 3);
    assert_eq!(params.find("k").unwrap().value(), "1");
    assert!(!params.find_last("k").unwrap().has_value());
    let values: Vec<_> = params.get_all("k").collect();
    assert_eq!(values, ["1", "2", ""]);
}

#[test]
fn test_fragment_is_not_query() {
    let url = Url::parse("http://h/?a=1#b=2").unwrap();
    assert_eq!(keys(&url), ["a"]);
}

#[test]
fn test_append_then_iterate() {
    let mut url = Url::parse("http://h/p").unwrap();
    url.append_param("a&b", Some("c+d")).unwrap();
    url.append_param("e", None).unwrap();
    assert_eq!(url, "http://h/p?a%26b=c%2Bd&e");
    assert_eq!(keys(&url), ["a%26b", "e"]);
    assert_eq!(url.params().get("a&b").unwrap(), "c+d");
    assert_eq!(url.param_count(), 2);

    url.remove_query();
    assert_eq!(url.param_count(), 0);
}

#[test]
fn test_cursor_offsets() {
    let url = Url::parse("?a=1&bb=22").unwrap();
    let params = url.params();
    let mut cursor = params.begin();
    assert_eq!(cursor.offset(), 0);
    cursor.advance();
    assert_eq!(cursor.offset(), 4);
    assert_eq!(cursor.get().encoded_value(), "22");
    cursor.advance();
    assert!(cursor.is_end());
    assert_eq!(cursor, params.end());
}

#[test]
#[should_panic(expected = "at the end")]
fn test_advance_past_end_panics() {
    let url = Url::parse("?a").unwrap();
    let mut cursor = url.params().end();
    cursor.advance();
}

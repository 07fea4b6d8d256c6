#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Storage injection and the all-or-nothing setter guarantee
use urlbuf::{Error, ErrorKind, HeapStorage, SliceStorage, Storage, Url};

#[test]
fn test_heap_growth() {
    let mut url = Url::new();
    assert_eq!(url.capacity(), 0);
    url.set_scheme("http").unwrap();
    assert!(url.capacity() > url.len());
    url.reserve(1000).unwrap();
    assert!(url.capacity() > 1000);
    assert_eq!(url, "http:");
}

#[test]
fn test_size_limit_before_allocation() {
    let mut url = Url::new();
    let err = url.reserve(urlbuf::MAX_SIZE + 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeLimit);
    assert_eq!(url.capacity(), 0);
}

#[test]
fn test_fixed_storage_fits() {
    let mut memory = [0u8; 64];
    let mut url = Url::with_storage(SliceStorage::new(&mut memory));
    url.assign("https://example.com/a?b#c").unwrap();
    url.set_port(443).unwrap();
    assert_eq!(url, "https://example.com:443/a?b#c");
    assert_eq!(url.as_bytes_with_nul().last(), Some(&0));
}

#[test]
fn test_fixed_storage_failure_is_atomic() {
    let mut memory = [0u8; 16];
    let mut url = Url::with_storage(SliceStorage::new(&mut memory));
    url.assign("x://h/p?q#f").unwrap();
    let before = url.parts().clone();

    let attempts: [fn(&mut Url<SliceStorage<'_>>) -> urlbuf::Result<()>; 7] = [
        |u| u.set_host("a-longer-host").map(drop),
        |u| u.set_user("user").map(drop),
        |u| u.set_password("secret").map(drop),
        |u| u.set_encoded_path("/a/much/longer/path").map(drop),
        |u| u.append_param("key", Some("value")).map(drop),
        |u| u.set_fragment("fragment").map(drop),
        |u| u.set_path_absolute(true).map(drop),
    ];
    for (i, attempt) in attempts.iter().enumerate() {
        if i == 6 {
            // already absolute: nothing to grow
            assert!(attempt(&mut url).is_ok());
            continue;
        }
        let err = attempt(&mut url).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeLimit, "attempt {i}");
        assert_eq!(url, "x://h/p?q#f", "attempt {i}");
        assert_eq!(url.parts(), &before, "attempt {i}");
    }

    // Exactly full: 15 bytes and the NUL
    url.set_fragment("fgh").unwrap();
    assert_eq!(url, "x://h/p?q#fgh");
    url.set_host("abc").unwrap();
    assert_eq!(url.len(), 15);
    assert!(url.set_host("abcd").is_err());
}

#[test]
fn test_invalid_input_is_atomic() {
    let mut url = Url::parse("http://u:p@h:1/a?b#c").unwrap();
    let before = url.encoded_url().to_owned();
    assert!(url.set_encoded_user("a b").is_err());
    assert!(url.set_encoded_password("%").is_err());
    assert!(url.set_encoded_host("[x]").is_err());
    assert!(url.set_port_str("-1").is_err());
    assert!(url.set_encoded_path("a#").is_err());
    assert!(url.set_encoded_query("#").is_err());
    assert!(url.set_encoded_fragment("%G0").is_err());
    assert!(url.set_scheme("").is_err());
    assert_eq!(url, before.as_str());
}

/// Heap storage that refuses to grow past a fixed size
struct CappedStorage {
    inner: HeapStorage,
    limit: usize,
}

impl Storage for CappedStorage {
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn bytes(&self) -> &[u8] {
        self.inner.bytes()
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self.inner.bytes_mut()
    }

    fn resize(&mut self, capacity: usize) -> urlbuf::Result<&mut [u8]> {
        if capacity > self.limit {
            return Err(Error::new(ErrorKind::SizeLimit, capacity));
        }
        self.inner.resize(capacity)
    }
}

#[test]
fn test_custom_storage() {
    let mut url = Url::with_storage(CappedStorage {
        inner: HeapStorage::new(),
        limit: 32,
    });
    url.assign("http://h/").unwrap();
    let mut pushed = 0;
    while url.push_segment(&format!("s{pushed}")).is_ok() {
        pushed += 1;
    }
    assert!(url.len() < 32);
    assert_eq!(url.segment_count(), pushed);
    assert!(url.encoded_url().starts_with("http://h/s0/s1"));

    let err = url.set_host("longer-host").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeLimit);
}

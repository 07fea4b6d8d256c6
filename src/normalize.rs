use crate::parts::Part;
use crate::storage::Storage;
use crate::types::HostType;
use crate::url::Url;

impl<S: Storage> Url<S> {
    /// Apply the case normalizations of RFC 3986 section 6.2.2.1 in place:
    /// lowercase scheme and registered name, uppercase escape digits.
    ///
    /// The length never changes, so this cannot fail.
    pub fn normalize(&mut self) -> &mut Self {
        self.normalize_scheme();

        if self.host_type() == HostType::Name {
            let start = self.parts().offset(Part::Host);
            let end = start + self.parts().len(Part::Host);
            self.buf.bytes_mut()[start..end].make_ascii_lowercase();
        }

        let bytes = self.buf.bytes_mut();
        let mut at = 0;
        while let Some(i) = memchr::memchr(b'%', &bytes[at..]) {
            let pos = at + i;
            for digit in bytes.iter_mut().skip(pos + 1).take(2) {
                digit.make_ascii_uppercase();
            }
            at = pos + 1;
        }
        trace!(url = self.encoded_url(), "normalized");
        self
    }
}

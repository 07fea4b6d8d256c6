/// Reason a URL or component was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Scheme is empty, does not start with a letter, or has a disallowed byte
    InvalidScheme,
    /// A byte that the component does not allow, even escaped
    InvalidCharacter,
    /// `%` not followed by two hex digits
    InvalidPercentEncoding,
    /// Malformed IP-literal (missing `]`, empty brackets)
    InvalidHost,
    /// Bracketed text that is not an IPv6 address
    InvalidIpv6,
    /// Bracketed `v` literal that does not match `"v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
    InvalidIpvFuture,
    /// Port with a non-digit byte
    InvalidPort,
    /// The buffer cannot grow to the requested size
    SizeLimit,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidScheme => "invalid scheme",
            Self::InvalidCharacter => "invalid character",
            Self::InvalidPercentEncoding => "invalid percent encoding",
            Self::InvalidHost => "invalid host",
            Self::InvalidIpv6 => "invalid IPv6 address",
            Self::InvalidIpvFuture => "invalid IPvFuture address",
            Self::InvalidPort => "invalid port",
            Self::SizeLimit => "size limit exceeded",
        }
    }
}

/// Errors returned by the grammar, the codec and every fallible setter.
///
/// `offset` is the byte position of the first offending byte in the string
/// passed to the failing call. For [`ErrorKind::SizeLimit`] it is the byte
/// length that could not be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    offset: usize,
}

impl Error {
    /// Also used by custom [`Storage`](crate::Storage) implementations to
    /// report [`ErrorKind::SizeLimit`]
    pub const fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Same error, reported relative to a string that starts `by` bytes earlier
    pub(crate) const fn shifted(self, by: usize) -> Self {
        Self::new(self.kind, self.offset + by)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.kind == ErrorKind::SizeLimit {
            write!(f, "{} ({} bytes)", self.kind.as_str(), self.offset)
        } else {
            write!(f, "{} at offset {}", self.kind.as_str(), self.offset)
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for URL operations
pub type Result<T> = core::result::Result<T, Error>;

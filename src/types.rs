use core::net::{Ipv4Addr, Ipv6Addr};

/// Well-known schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// The URL has no scheme
    #[default]
    None,
    /// A valid scheme that is not in the table
    Unknown,
    Ftp,
    File,
    Http,
    Https,
    Ws,
    Wss,
}

impl Scheme {
    /// Canonical lowercase spelling, or `""` for `None` and `Unknown`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None | Self::Unknown => "",
            Self::Ftp => "ftp",
            Self::File => "file",
            Self::Http => "http",
            Self::Https => "https",
            Self::Ws => "ws",
            Self::Wss => "wss",
        }
    }

    /// Get the default port for this scheme
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http | Self::Ws => Some(80),
            Self::Https | Self::Wss => Some(443),
            Self::Ftp => Some(21),
            Self::None | Self::Unknown | Self::File => None,
        }
    }
}

/// Classification of the host of a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostType {
    /// No authority
    #[default]
    None,
    /// A registered name, possibly empty
    Name,
    Ipv4,
    Ipv6,
    IpvFuture,
}

/// Parsed host with the address value for IP hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum HostKind {
    #[default]
    None,
    Name,
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    IpvFuture,
}

impl HostKind {
    pub(crate) fn host_type(self) -> HostType {
        match self {
            Self::None => HostType::None,
            Self::Name => HostType::Name,
            Self::Ipv4(_) => HostType::Ipv4,
            Self::Ipv6(_) => HostType::Ipv6,
            Self::IpvFuture => HostType::IpvFuture,
        }
    }
}

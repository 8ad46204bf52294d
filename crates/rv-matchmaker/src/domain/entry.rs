//! Entry descriptors for clients waiting in a round.

use std::fmt;

/// Largest value an identifier may take (31-bit, non-negative).
///
/// Keeping identifiers inside the positive `i32` range makes the JSON value
/// identical for clients that decode it as a signed 32-bit integer.
pub const MAX_IDENTIFIER: u32 = i32::MAX as u32;

/// Public peer identifier returned to every member of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u32);

impl EntryId {
    /// Create an identifier, masking it into the 31-bit range.
    pub const fn new(value: u32) -> Self {
        Self(value & MAX_IDENTIFIER)
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Random salt used only to put the two sides of a pair in canonical order
/// before hashing. Never exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderingKey(u32);

impl OrderingKey {
    /// Create an ordering key, masking it into the 31-bit range.
    pub const fn new(value: u32) -> Self {
        Self(value & MAX_IDENTIFIER)
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// NAT classification reported by the client.
///
/// Forwarded for logging only. Matching never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NatType {
    /// Client did not report a type, or reported one we do not know
    #[default]
    Unspecified,
    /// No NAT in front of the client
    OpenInternet,
    /// Full-cone NAT
    FullCone,
    /// Address-restricted cone NAT
    Restricted,
    /// Port-restricted cone NAT
    PortRestricted,
    /// Symmetric NAT
    Symmetric,
    /// Symmetric UDP firewall
    SymmetricUdpFirewall,
}

impl NatType {
    /// Parse the client-supplied string, falling back to `Unspecified`.
    ///
    /// Matching is case-insensitive on the variant name.
    pub fn parse_lossy(value: &str) -> Self {
        let value = value.trim();
        [
            Self::OpenInternet,
            Self::FullCone,
            Self::Restricted,
            Self::PortRestricted,
            Self::Symmetric,
            Self::SymmetricUdpFirewall,
        ]
        .into_iter()
        .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
        .unwrap_or(Self::Unspecified)
    }

    /// Canonical name, as clients send it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::OpenInternet => "OpenInternet",
            Self::FullCone => "FullCone",
            Self::Restricted => "Restricted",
            Self::PortRestricted => "PortRestricted",
            Self::Symmetric => "Symmetric",
            Self::SymmetricUdpFirewall => "SymmetricUDPFirewall",
        }
    }
}

impl fmt::Display for NatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed join request, as handed over by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    /// Self-reported NAT classification
    pub nat_type: NatType,
    /// Endpoint as seen from the public internet (e.g. via STUN)
    pub public_endpoint: String,
    /// Endpoint on the client's local network
    pub local_endpoint: String,
}

impl JoinRequest {
    /// Build a request from its parts.
    pub fn new(
        nat_type: NatType,
        public_endpoint: impl Into<String>,
        local_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            nat_type,
            public_endpoint: public_endpoint.into(),
            local_endpoint: local_endpoint.into(),
        }
    }
}

/// One waiting client's descriptor for the current round.
///
/// Immutable once created. The completion handle is not part of the entry;
/// the pool keeps it alongside so that it can be moved out exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    ordering_key: OrderingKey,
    public_endpoint: String,
    local_endpoint: String,
    nat_type: NatType,
}

impl Entry {
    /// Create an entry from freshly drawn identifiers and the client request.
    pub fn new(id: EntryId, ordering_key: OrderingKey, request: JoinRequest) -> Self {
        Self {
            id,
            ordering_key,
            public_endpoint: request.public_endpoint,
            local_endpoint: request.local_endpoint,
            nat_type: request.nat_type,
        }
    }

    /// Public identifier.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Ordering salt for token derivation.
    pub fn ordering_key(&self) -> OrderingKey {
        self.ordering_key
    }

    /// Public endpoint, verbatim.
    pub fn public_endpoint(&self) -> &str {
        &self.public_endpoint
    }

    /// Local endpoint, verbatim.
    pub fn local_endpoint(&self) -> &str {
        &self.local_endpoint
    }

    /// Reported NAT type.
    pub fn nat_type(&self) -> NatType {
        self.nat_type
    }
}

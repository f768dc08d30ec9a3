//! AX.25 address block carried ahead of the network identifier in header mode.

/// Size of one AX.25 address field: 6 callsign bytes + 1 SSID byte.
pub const ADDRESS_SIZE: usize = 7;

/// Link header size: destination address followed by source address.
pub const HEADER_SIZE: usize = 2 * ADDRESS_SIZE;

const CALLSIGN_LEN: usize = ADDRESS_SIZE - 1;
const SSID_MASK: u8 = 0x0F;

/// One AX.25 address field as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    raw: [u8; ADDRESS_SIZE],
}

impl Address {
    /// Build an address from an ASCII callsign (padded with spaces to six
    /// characters, truncated beyond) and a 4-bit SSID.
    pub fn new(callsign: &str, ssid: u8) -> Self {
        let mut raw = [b' ' << 1; ADDRESS_SIZE];
        for (slot, ch) in raw[..CALLSIGN_LEN].iter_mut().zip(callsign.bytes()) {
            *slot = ch.to_ascii_uppercase() << 1;
        }
        raw[CALLSIGN_LEN] = 0x60 | ((ssid & SSID_MASK) << 1);
        Self { raw }
    }

    /// The callsign with AX.25 bit shifting undone and padding trimmed.
    pub fn callsign(&self) -> String {
        self.raw[..CALLSIGN_LEN]
            .iter()
            .map(|b| char::from(b >> 1))
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    /// Secondary station identifier.
    pub fn ssid(&self) -> u8 {
        (self.raw[CALLSIGN_LEN] >> 1) & SSID_MASK
    }

    /// Raw wire bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.raw
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.callsign(), self.ssid())
    }
}

/// Link header copied out of an inbound frame.
///
/// The adapter strips it by size alone; contents are exposed for diagnostics
/// and never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkHeader {
    raw: [u8; HEADER_SIZE],
}

impl LinkHeader {
    /// Assemble a header from destination and source addresses.
    pub fn new(destination: Address, source: Address) -> Self {
        let mut raw = [0u8; HEADER_SIZE];
        raw[..ADDRESS_SIZE].copy_from_slice(destination.as_bytes());
        raw[ADDRESS_SIZE..].copy_from_slice(source.as_bytes());
        Self { raw }
    }

    /// Copy the leading `HEADER_SIZE` bytes of `src`, if present.
    pub fn from_bytes(src: &[u8]) -> Option<Self> {
        let raw: [u8; HEADER_SIZE] = src.get(..HEADER_SIZE)?.try_into().ok()?;
        Some(Self { raw })
    }

    /// Destination address field.
    pub fn destination(&self) -> Address {
        self.address(0)
    }

    /// Source address field.
    pub fn source(&self) -> Address {
        self.address(ADDRESS_SIZE)
    }

    /// Raw wire bytes.
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.raw
    }

    fn address(&self, offset: usize) -> Address {
        let mut raw = [0u8; ADDRESS_SIZE];
        raw.copy_from_slice(&self.raw[offset..offset + ADDRESS_SIZE]);
        Address { raw }
    }
}

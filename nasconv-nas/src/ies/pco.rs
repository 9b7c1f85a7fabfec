//! Protocol Configuration Options (3GPP TS 24.008 Section 10.5.6.3)
//!
//! The PCO value starts with one octet holding the extension bit, a spare bit
//! and the configuration protocol, followed by zero or more protocol or
//! container units:
//!
//! ```text
//! +---+---+-----------------------+
//! | 1 | 0 | configuration proto 0 |   octet 0
//! +---+---+-----------------------+
//! | ID (2 octets, big endian)     |
//! | length (1 octet)              |   repeated
//! | contents (length octets)      |
//! +-------------------------------+
//! ```
//!
//! Decoding drops the first octet, so extension, spare and protocol bits do
//! not survive a decode/encode cycle. Units are kept as raw identifiers,
//! unknown ones included.
//!
//! In 5GS the list travels in the Extended Protocol Configuration Options IE
//! (TS 24.501 Section 9.11.4.6), a TLV-E; [`NasEncode`]/[`NasDecode`] handle
//! that 2-octet length framing.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::{Buf, BufMut};
use thiserror::Error;
use tracing::{debug, trace};

use nasconv_common::{log_nas_ie, Direction, HexDump, TARGET_CONVERT};

use crate::codec::{
    ensure_capacity, read_length_u16, CodecResult, InformationElement6, NasDecode, NasEncode,
};
use crate::enums::{DownlinkContainerId, UplinkContainerId};

/// Extension bit, always set on encode
const EXTENSION_BIT: u8 = 0x80;
/// Configuration protocol "PPP for use with IP PDP type or IP PDN type"
const CONFIGURATION_PROTOCOL_PPP: u8 = 0x00;
/// Size of the fixed part of a unit (ID + length)
const UNIT_HEADER_LEN: usize = 3;
/// Largest content a unit can carry
pub const MAX_CONTENT_LEN: usize = u8::MAX as usize;

/// IPv4 address length in octets
const IPV4_LEN: usize = 4;
/// IPv6 address length in octets
const IPV6_LEN: usize = 16;

/// Address family a builder expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4
    Ipv4,
    /// IPv6
    Ipv6,
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "IPv4"),
            AddressFamily::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Error type for Protocol Configuration Options encoding/decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcoError {
    /// Writing a field to the output failed
    #[error("Write {field} failed: output buffer full")]
    Encoding {
        /// Field being written
        field: &'static str,
    },
    /// Input ended before the structure it declares
    #[error("Truncated input: expected at least {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Bytes the next field needs
        expected: usize,
        /// Bytes left in the input
        actual: usize,
    },
    /// Address of the wrong family for this container
    #[error("Invalid address family: expected {expected}")]
    InvalidAddressFamily {
        /// Family the container carries
        expected: AddressFamily,
    },
    /// Content or address of the wrong size
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required (or maximum) size
        expected: usize,
        /// Supplied size
        actual: usize,
    },
}

/// Result type for PCO operations
pub type PcoResult<T> = Result<T, PcoError>;

// ============================================================================
// Protocol or container unit
// ============================================================================

/// One protocol or container unit (ID, length, contents)
///
/// The length octet is derived from the contents, so the two can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ProtocolOrContainerUnit {
    id: u16,
    contents: Vec<u8>,
}

impl ProtocolOrContainerUnit {
    /// Create a unit, failing if `contents` is longer than 255 bytes
    pub fn new(id: u16, contents: Vec<u8>) -> PcoResult<Self> {
        if contents.len() > MAX_CONTENT_LEN {
            return Err(PcoError::InvalidLength {
                expected: MAX_CONTENT_LEN,
                actual: contents.len(),
            });
        }
        Ok(Self { id, contents })
    }

    /// Create a unit with no contents
    pub fn empty(id: u16) -> Self {
        Self {
            id,
            contents: Vec::new(),
        }
    }

    /// Protocol or container identifier
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Length of contents octet
    pub fn length(&self) -> u8 {
        self.contents.len() as u8
    }

    /// Contents
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Take the contents
    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }

    fn encoded_len(&self) -> usize {
        UNIT_HEADER_LEN + self.contents.len()
    }
}

// ============================================================================
// Decoder state machine
// ============================================================================

/// Position of the decoder within the current unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadingState {
    /// Next two octets are a unit identifier
    ReadingId,
    /// Next octet is the length of the unit with this identifier
    ReadingLength { id: u16 },
    /// Next `length` octets are the contents of the unit
    ReadingContent { id: u16, length: u8 },
}

/// Check that `needed` more bytes are available before reading them
fn require(remaining: usize, needed: usize) -> PcoResult<()> {
    if needed > remaining {
        return Err(truncated(needed, remaining));
    }
    Ok(())
}

fn truncated(expected: usize, actual: usize) -> PcoError {
    let err = PcoError::TruncatedInput { expected, actual };
    debug!(target: TARGET_CONVERT, error = %err, "PCO decode failed");
    err
}

// ============================================================================
// Protocol Configuration Options
// ============================================================================

/// Protocol Configuration Options value: an ordered list of units
///
/// # Example
/// ```
/// use std::net::{IpAddr, Ipv4Addr};
/// use nasconv_nas::ies::ProtocolConfigurationOptions;
///
/// let mut pco = ProtocolConfigurationOptions::new();
/// pco.add_dns_server_ipv4_address(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))).unwrap();
/// pco.add_ipv4_link_mtu(1400);
///
/// let bytes = pco.encode_to_vec();
/// assert_eq!(
///     bytes,
///     vec![0x80, 0x00, 0x0D, 0x04, 8, 8, 8, 8, 0x00, 0x10, 0x02, 0x05, 0x78]
/// );
///
/// let decoded = ProtocolConfigurationOptions::decode(&mut bytes.as_slice()).unwrap();
/// assert_eq!(decoded, pco);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtocolConfigurationOptions {
    units: Vec<ProtocolOrContainerUnit>,
}

impl ProtocolConfigurationOptions {
    /// Create an empty option list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a list of units, in wire order
    pub fn from_units(units: Vec<ProtocolOrContainerUnit>) -> Self {
        Self { units }
    }

    /// Units in wire order
    pub fn units(&self) -> &[ProtocolOrContainerUnit] {
        &self.units
    }

    /// Take the units
    pub fn into_units(self) -> Vec<ProtocolOrContainerUnit> {
        self.units
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the list holds no units
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterate over the units in wire order
    pub fn iter(&self) -> std::slice::Iter<'_, ProtocolOrContainerUnit> {
        self.units.iter()
    }

    /// First unit with the given identifier
    pub fn find(&self, id: u16) -> Option<&ProtocolOrContainerUnit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Append a unit
    pub fn push(&mut self, unit: ProtocolOrContainerUnit) {
        self.units.push(unit);
    }

    /// Append a unit built from an identifier and contents
    pub fn add_container(&mut self, id: u16, contents: Vec<u8>) -> PcoResult<()> {
        let unit = ProtocolOrContainerUnit::new(id, contents)?;
        self.units.push(unit);
        Ok(())
    }

    /// Size of the encoded value (meta octet plus all units)
    pub fn value_len(&self) -> usize {
        1 + self.units.iter().map(|u| u.encoded_len()).sum::<usize>()
    }

    // ------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------

    /// Encode the PCO value (meta octet and units) into `buf`
    ///
    /// Fails with [`PcoError::Encoding`] naming the first field the buffer
    /// had no room for.
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> PcoResult<()> {
        let meta = EXTENSION_BIT | CONFIGURATION_PROTOCOL_PPP;
        put_field(buf, "meta", &[meta])?;

        for unit in &self.units {
            put_field(buf, "protocol or container ID", &unit.id.to_be_bytes())?;
            put_field(buf, "length of contents", &[unit.length()])?;
            put_field(buf, "contents", &unit.contents)?;
        }

        trace!(
            target: TARGET_CONVERT,
            units = self.units.len(),
            len = self.value_len(),
            "PCO encoded"
        );
        Ok(())
    }

    /// Encode the PCO value into a new vector
    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.value_len());
        buf.put_u8(EXTENSION_BIT | CONFIGURATION_PROTOCOL_PPP);
        for unit in &self.units {
            buf.put_u16(unit.id);
            buf.put_u8(unit.length());
            buf.put_slice(&unit.contents);
        }
        trace!(target: TARGET_CONVERT, hex = %HexDump(&buf), "PCO encoded");
        buf
    }

    // ------------------------------------------------------------------
    // Decoding
    // ------------------------------------------------------------------

    /// Decode a PCO value, consuming every remaining byte of `buf`
    ///
    /// The first octet is read and discarded. On error nothing is returned;
    /// units parsed before the failure are dropped.
    pub fn decode<B: Buf>(buf: &mut B) -> PcoResult<Self> {
        require(buf.remaining(), 1)?;
        let meta = buf.get_u8();
        let mut remaining = buf.remaining();
        trace!(target: TARGET_CONVERT, meta, remaining, "PCO decode start");

        let mut units = Vec::new();
        let mut state = ReadingState::ReadingId;

        while remaining > 0 {
            state = match state {
                ReadingState::ReadingId => {
                    require(remaining, 2)?;
                    let id = buf.get_u16();
                    remaining -= 2;
                    ReadingState::ReadingLength { id }
                }
                ReadingState::ReadingLength { id } => {
                    require(remaining, 1)?;
                    let length = buf.get_u8();
                    remaining -= 1;
                    if length == 0 {
                        trace!(target: TARGET_CONVERT, id, "PCO unit without contents");
                        units.push(ProtocolOrContainerUnit::empty(id));
                        ReadingState::ReadingId
                    } else {
                        ReadingState::ReadingContent { id, length }
                    }
                }
                ReadingState::ReadingContent { id, length } => {
                    let length = length as usize;
                    require(remaining, length)?;
                    let mut contents = vec![0u8; length];
                    buf.copy_to_slice(&mut contents);
                    remaining -= length;
                    trace!(target: TARGET_CONVERT, id, length, "PCO unit");
                    units.push(ProtocolOrContainerUnit { id, contents });
                    ReadingState::ReadingId
                }
            };
        }

        // An ID or length that ends exactly at the input boundary leaves a
        // unit half read.
        match state {
            ReadingState::ReadingId => Ok(Self { units }),
            ReadingState::ReadingLength { .. } => Err(truncated(1, 0)),
            ReadingState::ReadingContent { length, .. } => Err(truncated(length as usize, 0)),
        }
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    /// Request DNS server IPv4 addresses (uplink, no contents)
    pub fn add_dns_server_ipv4_address_request(&mut self) {
        self.push_empty(UplinkContainerId::DnsServerIpv4AddressRequest.into());
    }

    /// Request DNS server IPv6 addresses (uplink, no contents)
    pub fn add_dns_server_ipv6_address_request(&mut self) {
        self.push_empty(UplinkContainerId::DnsServerIpv6AddressRequest.into());
    }

    /// Request IP address allocation via NAS signalling (uplink, no contents)
    pub fn add_ip_address_allocation_via_nas_signalling(&mut self) {
        self.push_empty(UplinkContainerId::IpAddressAllocationViaNasSignalling.into());
    }

    /// Add a DNS server IPv4 address (downlink)
    ///
    /// IPv4-mapped IPv6 addresses are accepted and stored as IPv4.
    pub fn add_dns_server_ipv4_address(&mut self, addr: IpAddr) -> PcoResult<()> {
        self.add_dns_server_ipv4_address_octets(&ip_octets(addr))
    }

    /// Add a DNS server IPv4 address given as raw octets (4, or 16 if IPv4-mapped)
    pub fn add_dns_server_ipv4_address_octets(&mut self, octets: &[u8]) -> PcoResult<()> {
        let addr = ipv4_octets(octets)?;
        self.push_address(DownlinkContainerId::DnsServerIpv4Address.into(), &addr);
        Ok(())
    }

    /// Add a P-CSCF IPv4 address (downlink)
    pub fn add_pcscf_ipv4_address(&mut self, addr: IpAddr) -> PcoResult<()> {
        self.add_pcscf_ipv4_address_octets(&ip_octets(addr))
    }

    /// Add a P-CSCF IPv4 address given as raw octets
    pub fn add_pcscf_ipv4_address_octets(&mut self, octets: &[u8]) -> PcoResult<()> {
        let addr = ipv4_octets(octets)?;
        self.push_address(DownlinkContainerId::PcscfIpv4Address.into(), &addr);
        Ok(())
    }

    /// Add a DNS server IPv6 address (downlink)
    pub fn add_dns_server_ipv6_address(&mut self, addr: IpAddr) -> PcoResult<()> {
        self.add_dns_server_ipv6_address_octets(&ip_octets(addr))
    }

    /// Add a DNS server IPv6 address given as 16 raw octets
    pub fn add_dns_server_ipv6_address_octets(&mut self, octets: &[u8]) -> PcoResult<()> {
        let addr = ipv6_octets(octets)?;
        self.push_address(DownlinkContainerId::DnsServerIpv6Address.into(), &addr);
        Ok(())
    }

    /// Add the IPv4 link MTU (downlink, 2 octets big endian)
    pub fn add_ipv4_link_mtu(&mut self, mtu: u16) {
        self.units.push(ProtocolOrContainerUnit {
            id: DownlinkContainerId::Ipv4LinkMtu.into(),
            contents: mtu.to_be_bytes().to_vec(),
        });
    }

    fn push_empty(&mut self, id: u16) {
        self.units.push(ProtocolOrContainerUnit::empty(id));
    }

    fn push_address(&mut self, id: u16, octets: &[u8]) {
        self.units.push(ProtocolOrContainerUnit {
            id,
            contents: octets.to_vec(),
        });
    }

    // ------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------

    /// DNS server IPv4 addresses carried in downlink units
    pub fn dns_server_ipv4_addresses(&self) -> Vec<Ipv4Addr> {
        self.fixed_contents::<IPV4_LEN>(DownlinkContainerId::DnsServerIpv4Address)
            .map(Ipv4Addr::from)
            .collect()
    }

    /// P-CSCF IPv4 addresses carried in downlink units
    pub fn pcscf_ipv4_addresses(&self) -> Vec<Ipv4Addr> {
        self.fixed_contents::<IPV4_LEN>(DownlinkContainerId::PcscfIpv4Address)
            .map(Ipv4Addr::from)
            .collect()
    }

    /// DNS server IPv6 addresses carried in downlink units
    pub fn dns_server_ipv6_addresses(&self) -> Vec<Ipv6Addr> {
        self.fixed_contents::<IPV6_LEN>(DownlinkContainerId::DnsServerIpv6Address)
            .map(Ipv6Addr::from)
            .collect()
    }

    /// IPv4 link MTU, if present and well formed
    pub fn ipv4_link_mtu(&self) -> Option<u16> {
        self.fixed_contents::<2>(DownlinkContainerId::Ipv4LinkMtu)
            .map(u16::from_be_bytes)
            .next()
    }

    /// Contents of the units with `id` that are exactly `N` octets long
    fn fixed_contents<const N: usize>(
        &self,
        id: DownlinkContainerId,
    ) -> impl Iterator<Item = [u8; N]> + '_ {
        let id = u16::from(id);
        self.units
            .iter()
            .filter(move |unit| unit.id == id)
            .filter_map(move |unit| match <[u8; N]>::try_from(unit.contents.as_slice()) {
                Ok(contents) => Some(contents),
                Err(_) => {
                    debug!(
                        target: TARGET_CONVERT,
                        id,
                        length = unit.contents.len(),
                        expected = N,
                        "PCO unit with unexpected length skipped"
                    );
                    None
                }
            })
    }
}

impl<'a> IntoIterator for &'a ProtocolConfigurationOptions {
    type Item = &'a ProtocolOrContainerUnit;
    type IntoIter = std::slice::Iter<'a, ProtocolOrContainerUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

impl IntoIterator for ProtocolConfigurationOptions {
    type Item = ProtocolOrContainerUnit;
    type IntoIter = std::vec::IntoIter<ProtocolOrContainerUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.into_iter()
    }
}

impl NasEncode for ProtocolConfigurationOptions {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        let value_len = self.value_len();
        let length = u16::try_from(value_len).map_err(|_| PcoError::InvalidLength {
            expected: u16::MAX as usize,
            actual: value_len,
        })?;
        ensure_capacity(buf, 2, "extended PCO length")?;
        buf.put_u16(length);
        self.encode(buf)?;
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        2 + self.value_len()
    }
}

impl NasDecode for ProtocolConfigurationOptions {
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        let length = read_length_u16(buf)?;
        let mut value = buf.copy_to_bytes(length);
        log_nas_ie(Direction::Rx, "Extended Protocol Configuration Options", &value);
        Ok(Self::decode(&mut value)?)
    }
}

impl InformationElement6 for ProtocolConfigurationOptions {}

// ============================================================================
// Helpers
// ============================================================================

fn put_field<B: BufMut>(buf: &mut B, field: &'static str, bytes: &[u8]) -> PcoResult<()> {
    if buf.remaining_mut() < bytes.len() {
        debug!(
            target: TARGET_CONVERT,
            field,
            needed = bytes.len(),
            available = buf.remaining_mut(),
            "PCO encode failed"
        );
        return Err(PcoError::Encoding { field });
    }
    buf.put_slice(bytes);
    Ok(())
}

fn ip_octets(addr: IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

/// Accept 4 octets, or 16 octets holding an IPv4-mapped address
fn ipv4_octets(octets: &[u8]) -> PcoResult<[u8; IPV4_LEN]> {
    match octets.len() {
        IPV4_LEN => {
            let mut addr = [0u8; IPV4_LEN];
            addr.copy_from_slice(octets);
            Ok(addr)
        }
        IPV6_LEN => {
            let mut v6 = [0u8; IPV6_LEN];
            v6.copy_from_slice(octets);
            Ipv6Addr::from(v6)
                .to_ipv4_mapped()
                .map(|v4| v4.octets())
                .ok_or(PcoError::InvalidAddressFamily {
                    expected: AddressFamily::Ipv4,
                })
        }
        actual => Err(PcoError::InvalidLength {
            expected: IPV4_LEN,
            actual,
        }),
    }
}

fn ipv6_octets(octets: &[u8]) -> PcoResult<[u8; IPV6_LEN]> {
    match octets.len() {
        IPV6_LEN => {
            let mut addr = [0u8; IPV6_LEN];
            addr.copy_from_slice(octets);
            Ok(addr)
        }
        IPV4_LEN => Err(PcoError::InvalidAddressFamily {
            expected: AddressFamily::Ipv6,
        }),
        actual => Err(PcoError::InvalidLength {
            expected: IPV6_LEN,
            actual,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;

    fn decode(data: &[u8]) -> PcoResult<ProtocolConfigurationOptions> {
        ProtocolConfigurationOptions::decode(&mut &data[..])
    }

    #[test]
    fn test_encode_empty() {
        let pco = ProtocolConfigurationOptions::new();
        assert_eq!(pco.encode_to_vec(), vec![0x80]);
        assert_eq!(pco.value_len(), 1);
    }

    #[test]
    fn test_encode_requests() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_dns_server_ipv4_address_request();
        pco.add_dns_server_ipv6_address_request();
        pco.add_ip_address_allocation_via_nas_signalling();

        assert_eq!(
            pco.encode_to_vec(),
            vec![0x80, 0x00, 0x0D, 0x00, 0x00, 0x03, 0x00, 0x00, 0x0A, 0x00]
        );
    }

    #[test]
    fn test_encode_into_bufmut_matches_vec() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_pcscf_ipv4_address(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
            .unwrap();
        pco.add_container(0xFF00, vec![1, 2, 3]).unwrap();

        let mut buf = Vec::new();
        pco.encode(&mut buf).unwrap();
        assert_eq!(buf, pco.encode_to_vec());
        assert_eq!(buf.len(), pco.value_len());
    }

    #[test]
    fn test_encode_reports_failed_field() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_container(0x0001, vec![0xAA; 4]).unwrap();

        let mut storage = [0u8; 0];
        assert_eq!(
            pco.encode(&mut &mut storage[..]),
            Err(PcoError::Encoding { field: "meta" })
        );

        let mut storage = [0u8; 2];
        assert_eq!(
            pco.encode(&mut &mut storage[..]),
            Err(PcoError::Encoding {
                field: "protocol or container ID"
            })
        );

        let mut storage = [0u8; 3];
        assert_eq!(
            pco.encode(&mut &mut storage[..]),
            Err(PcoError::Encoding {
                field: "length of contents"
            })
        );

        let mut storage = [0u8; 6];
        assert_eq!(
            pco.encode(&mut &mut storage[..]),
            Err(PcoError::Encoding { field: "contents" })
        );

        let mut storage = [0u8; 8];
        assert!(pco.encode(&mut &mut storage[..]).is_ok());
        assert_eq!(storage, [0x80, 0x00, 0x01, 0x04, 0xAA, 0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn test_decode_zero_length_unit() {
        let pco = decode(&[0x80, 0x00, 0x0A, 0x00]).unwrap();
        assert_eq!(pco.len(), 1);
        let unit = &pco.units()[0];
        assert_eq!(unit.id(), 0x000A);
        assert_eq!(unit.length(), 0);
        assert!(unit.contents().is_empty());
    }

    #[test]
    fn test_decode_meta_only() {
        let pco = decode(&[0x80]).unwrap();
        assert!(pco.is_empty());
    }

    #[test]
    fn test_decode_ignores_meta_bits() {
        let pco = decode(&[0x00, 0x00, 0x0D, 0x00]).unwrap();
        assert_eq!(pco.encode_to_vec(), vec![0x80, 0x00, 0x0D, 0x00]);
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(
            decode(&[]),
            Err(PcoError::TruncatedInput {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_decode_truncated_contents() {
        assert_eq!(
            decode(&[0x80, 0x00, 0x0A, 0x05, 0x01, 0x02]),
            Err(PcoError::TruncatedInput {
                expected: 5,
                actual: 2
            })
        );
    }

    #[test]
    fn test_decode_truncated_id() {
        assert_eq!(
            decode(&[0x80, 0x00]),
            Err(PcoError::TruncatedInput {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_decode_missing_length() {
        assert_eq!(
            decode(&[0x80, 0x00, 0x0D]),
            Err(PcoError::TruncatedInput {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_decode_missing_contents() {
        assert_eq!(
            decode(&[0x80, 0x00, 0x0D, 0x04]),
            Err(PcoError::TruncatedInput {
                expected: 4,
                actual: 0
            })
        );
    }

    #[test]
    fn test_decode_truncation_after_good_unit() {
        let result = decode(&[0x80, 0x00, 0x0D, 0x00, 0x00, 0x03, 0x02, 0xFF]);
        assert!(matches!(result, Err(PcoError::TruncatedInput { .. })));
    }

    #[test]
    fn test_decode_keeps_order_and_unknown_ids() {
        let data = [
            0x80, 0xFF, 0x00, 0x01, 0x7A, 0x00, 0x0D, 0x04, 1, 1, 1, 1, 0x00, 0x10, 0x02, 0x05,
            0xDC,
        ];
        let pco = decode(&data).unwrap();
        let ids: Vec<u16> = pco.iter().map(|u| u.id()).collect();
        assert_eq!(ids, vec![0xFF00, 0x000D, 0x0010]);
        assert_eq!(pco.find(0xFF00).unwrap().contents(), &[0x7A]);
        assert_eq!(pco.encode_to_vec(), data.to_vec());
    }

    #[test]
    fn test_round_trip_mixed() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_dns_server_ipv4_address_request();
        pco.add_dns_server_ipv6_address("2001:db8::1".parse().unwrap())
            .unwrap();
        pco.add_ipv4_link_mtu(1500);
        pco.add_container(0x0020, vec![0x55; 255]).unwrap();

        let bytes = pco.encode_to_vec();
        assert_eq!(decode(&bytes).unwrap(), pco);
    }

    #[test]
    fn test_add_dns_ipv4_address() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_dns_server_ipv4_address(IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)))
            .unwrap();
        let unit = &pco.units()[0];
        assert_eq!(unit.id(), 0x000D);
        assert_eq!(unit.length(), 4);
        assert_eq!(unit.contents(), &[8, 8, 4, 4]);
    }

    #[test]
    fn test_add_dns_ipv4_accepts_mapped_ipv6() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_dns_server_ipv4_address("::ffff:192.0.2.53".parse().unwrap())
            .unwrap();
        assert_eq!(pco.units()[0].contents(), &[192, 0, 2, 53]);
    }

    #[test]
    fn test_add_dns_ipv4_rejects_ipv6() {
        let mut pco = ProtocolConfigurationOptions::new();
        let result = pco.add_dns_server_ipv4_address("2001:db8::53".parse().unwrap());
        assert_eq!(
            result,
            Err(PcoError::InvalidAddressFamily {
                expected: AddressFamily::Ipv4
            })
        );
        assert!(pco.is_empty());
    }

    #[test]
    fn test_add_dns_ipv4_octets_lengths() {
        let mut pco = ProtocolConfigurationOptions::new();
        assert!(matches!(
            pco.add_dns_server_ipv4_address_octets(&[0x20; 16]),
            Err(PcoError::InvalidAddressFamily { .. })
        ));
        assert_eq!(
            pco.add_dns_server_ipv4_address_octets(&[1, 2, 3, 4, 5]),
            Err(PcoError::InvalidLength {
                expected: 4,
                actual: 5
            })
        );
        assert_eq!(pco.len(), 0);

        pco.add_dns_server_ipv4_address_octets(&[1, 2, 3, 4]).unwrap();
        assert_eq!(pco.len(), 1);
    }

    #[test]
    fn test_add_pcscf_ipv4_address() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_pcscf_ipv4_address(IpAddr::V4(Ipv4Addr::new(172, 16, 0, 9)))
            .unwrap();
        assert_eq!(pco.units()[0].id(), 0x000C);
        assert_eq!(pco.pcscf_ipv4_addresses(), vec![Ipv4Addr::new(172, 16, 0, 9)]);

        assert!(pco
            .add_pcscf_ipv4_address("fe80::1".parse().unwrap())
            .is_err());
        assert_eq!(pco.len(), 1);
    }

    #[test]
    fn test_add_dns_ipv6_address() {
        let mut pco = ProtocolConfigurationOptions::new();
        let addr: Ipv6Addr = "2001:4860:4860::8888".parse().unwrap();
        pco.add_dns_server_ipv6_address(IpAddr::V6(addr)).unwrap();
        let unit = &pco.units()[0];
        assert_eq!(unit.id(), 0x0003);
        assert_eq!(unit.length(), 16);
        assert_eq!(pco.dns_server_ipv6_addresses(), vec![addr]);
    }

    #[test]
    fn test_add_dns_ipv6_rejects_ipv4() {
        let mut pco = ProtocolConfigurationOptions::new();
        assert_eq!(
            pco.add_dns_server_ipv6_address(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            Err(PcoError::InvalidAddressFamily {
                expected: AddressFamily::Ipv6
            })
        );
        assert_eq!(
            pco.add_dns_server_ipv6_address_octets(&[0; 15]),
            Err(PcoError::InvalidLength {
                expected: 16,
                actual: 15
            })
        );
        assert!(pco.is_empty());
    }

    #[test]
    fn test_add_ipv4_link_mtu() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_ipv4_link_mtu(0x05DC);
        let unit = &pco.units()[0];
        assert_eq!(unit.id(), 0x0010);
        assert_eq!(unit.length(), 2);
        assert_eq!(unit.contents(), &[0x05, 0xDC]);
        assert_eq!(pco.ipv4_link_mtu(), Some(1500));
    }

    #[test]
    fn test_readers_skip_malformed_units() {
        let data = [
            0x80, 0x00, 0x0D, 0x03, 1, 2, 3, 0x00, 0x0D, 0x04, 9, 9, 9, 9, 0x00, 0x10, 0x00,
        ];
        let pco = decode(&data).unwrap();
        assert_eq!(pco.dns_server_ipv4_addresses(), vec![Ipv4Addr::new(9, 9, 9, 9)]);
        assert_eq!(pco.ipv4_link_mtu(), None);
    }

    #[test]
    fn test_unit_content_too_long() {
        assert_eq!(
            ProtocolOrContainerUnit::new(1, vec![0; 256]),
            Err(PcoError::InvalidLength {
                expected: 255,
                actual: 256
            })
        );
        let mut pco = ProtocolConfigurationOptions::new();
        assert!(pco.add_container(1, vec![0; 300]).is_err());
        assert!(pco.is_empty());
    }

    #[test]
    fn test_into_iterators() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_dns_server_ipv4_address_request();
        pco.add_ipv4_link_mtu(1280);

        assert_eq!((&pco).into_iter().count(), 2);
        let units: Vec<_> = pco.clone().into_iter().collect();
        assert_eq!(units, pco.into_units());
    }

    #[test]
    fn test_extended_pco_framing() {
        let mut pco = ProtocolConfigurationOptions::new();
        pco.add_dns_server_ipv4_address(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)))
            .unwrap();

        let mut buf = Vec::new();
        pco.nas_encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0x00, 0x08, 0x80, 0x00, 0x0D, 0x04, 1, 1, 1, 1]);
        assert_eq!(buf.len(), pco.encoded_len());

        // Trailing bytes after the IE belong to the next IE.
        buf.extend_from_slice(&[0x7B, 0x00]);
        let mut slice = buf.as_slice();
        let decoded = ProtocolConfigurationOptions::nas_decode(&mut slice).unwrap();
        assert_eq!(decoded, pco);
        assert_eq!(slice, &[0x7B, 0x00]);
    }

    #[test]
    fn test_extended_pco_framing_errors() {
        let data = [0x00, 0x05, 0x80, 0x00];
        assert!(matches!(
            ProtocolConfigurationOptions::nas_decode(&mut &data[..]),
            Err(CodecError::LengthExceedsBuffer { .. })
        ));

        let data = [0x00, 0x03, 0x80, 0x00, 0x0D];
        assert_eq!(
            ProtocolConfigurationOptions::nas_decode(&mut &data[..]),
            Err(CodecError::Pco(PcoError::TruncatedInput {
                expected: 1,
                actual: 0
            }))
        );

        let pco = ProtocolConfigurationOptions::new();
        let mut storage = [0u8; 2];
        assert!(matches!(
            pco.nas_encode(&mut &mut storage[..]),
            Err(CodecError::Pco(PcoError::Encoding { field: "meta" }))
        ));
    }
}

//! NAS enumerations
//!
//! Protocol and container identifiers used by the Protocol Configuration
//! Options IE (3GPP TS 24.008 Section 10.5.6.3, Table 10.5.154) and the GPRS
//! timer unit field (3GPP TS 24.008 Section 10.5.7.3).
//!
//! The same numeric identifier means different things depending on the
//! direction of the message carrying it, so the catalog is split into an
//! uplink (MS to network) and a downlink (network to MS) enum.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Container identifiers sent from the MS to the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum UplinkContainerId {
    /// P-CSCF IPv6 Address Request
    PcscfIpv6AddressRequest = 0x0001,
    /// IM CN Subsystem Signaling Flag
    ImCnSubsystemSignalingFlag = 0x0002,
    /// DNS Server IPv6 Address Request
    DnsServerIpv6AddressRequest = 0x0003,
    /// MS Support of Network Requested Bearer Control indicator
    MsSupportOfNetworkRequestedBearerControlIndicator = 0x0005,
    /// IP address allocation via NAS signalling
    IpAddressAllocationViaNasSignalling = 0x000A,
    /// IPv4 address allocation via DHCPv4
    Ipv4AddressAllocationViaDhcpv4 = 0x000B,
    /// P-CSCF IPv4 Address Request
    PcscfIpv4AddressRequest = 0x000C,
    /// DNS Server IPv4 Address Request
    DnsServerIpv4AddressRequest = 0x000D,
    /// MSISDN Request
    MsisdnRequest = 0x000E,
    /// IPv4 Link MTU Request
    Ipv4LinkMtuRequest = 0x0010,
}

/// Container identifiers sent from the network to the MS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum DownlinkContainerId {
    /// P-CSCF IPv6 Address
    PcscfIpv6Address = 0x0001,
    /// IM CN Subsystem Signaling Flag
    ImCnSubsystemSignalingFlag = 0x0002,
    /// DNS Server IPv6 Address
    DnsServerIpv6Address = 0x0003,
    /// Policy Control rejection code
    PolicyControlRejectionCode = 0x0004,
    /// Selected Bearer Control Mode
    SelectedBearerControlMode = 0x0005,
    /// P-CSCF IPv4 Address
    PcscfIpv4Address = 0x000C,
    /// DNS Server IPv4 Address
    DnsServerIpv4Address = 0x000D,
    /// MSISDN
    Msisdn = 0x000E,
    /// IPv4 Link MTU
    Ipv4LinkMtu = 0x0010,
}

/// GPRS timer value unit (3GPP TS 24.008 Section 10.5.7.3)
///
/// Occupies bits 8 to 6 of the timer value octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum GprsTimerValueUnit {
    /// Value is incremented in multiples of 2 seconds
    #[default]
    MultiplesOf2Seconds = 0b000,
    /// Value is incremented in multiples of 1 minute
    MultiplesOf1Minute = 0b001,
    /// Value is incremented in multiples of decihours (6 minutes)
    MultiplesOfDecihours = 0b010,
    /// Timer is deactivated
    TimerDeactivated = 0b111,
}

impl GprsTimerValueUnit {
    /// Number of seconds one step of this unit represents, `None` when deactivated
    pub fn step_seconds(self) -> Option<u32> {
        match self {
            GprsTimerValueUnit::MultiplesOf2Seconds => Some(2),
            GprsTimerValueUnit::MultiplesOf1Minute => Some(60),
            GprsTimerValueUnit::MultiplesOfDecihours => Some(360),
            GprsTimerValueUnit::TimerDeactivated => None,
        }
    }
}

//! NAS (Non-Access Stratum) conversion primitives
//!
//! Building blocks used by a 5G NAS codec and security context, as defined in
//! 3GPP TS 24.008, TS 24.501 and TS 33.501:
//!
//! - [`ProtocolConfigurationOptions`]: TLV codec and builders for the
//!   Protocol Configuration Options IE carried in session management messages
//! - [`NasCount`]: the 24-bit NAS COUNT fed to integrity and ciphering
//! - [`encode_gprs_timer2`]: seconds to GPRS Timer 2 value octet
//!
//! These types only handle IE payload bytes. Choosing which IEs appear in
//! which message is left to the surrounding message codec.
//!
//! # Example
//!
//! ```rust
//! use nasconv_nas::{encode_gprs_timer2, NasCount, ProtocolConfigurationOptions};
//!
//! // UE side: ask for DNS servers
//! let mut pco = ProtocolConfigurationOptions::new();
//! pco.add_dns_server_ipv4_address_request();
//! assert_eq!(pco.encode_to_vec(), vec![0x80, 0x00, 0x0D, 0x00]);
//!
//! // Network side: periodic registration timer of 12 minutes
//! assert_eq!(encode_gprs_timer2(720).unwrap(), 0x2C);
//!
//! // Security context: advance the uplink count
//! let mut ul_count = NasCount::default();
//! ul_count.add_one();
//! assert_eq!(ul_count.to_u32(), 1);
//! ```

pub mod codec;
pub mod enums;
pub mod ies;
pub mod security;


pub use codec::{CodecError, CodecResult, NasDecode, NasEncode};
pub use enums::{DownlinkContainerId, GprsTimerValueUnit, UplinkContainerId};
pub use ies::{
    decode_gprs_timer2, encode_gprs_timer2, AddressFamily, IeGprsTimer2, PcoError, PcoResult,
    ProtocolConfigurationOptions, ProtocolOrContainerUnit, TimerError,
};
pub use security::{NasCount, NasCountPair, NasDirection};

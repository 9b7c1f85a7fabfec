//! NAS Information Elements (IEs)
//!
//! - [`pco`]: Protocol Configuration Options (TS 24.008 Section 10.5.6.3)
//! - [`gprs_timer`]: GPRS Timer 2 (TS 24.008 Section 10.5.7.4)

pub mod gprs_timer;
pub mod pco;

pub use gprs_timer::{decode_gprs_timer2, encode_gprs_timer2, IeGprsTimer2, TimerError};
pub use pco::{
    AddressFamily, PcoError, PcoResult, ProtocolConfigurationOptions, ProtocolOrContainerUnit,
};

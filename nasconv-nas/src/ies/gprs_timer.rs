//! GPRS Timer 2 (3GPP TS 24.008 Section 10.5.7.4, TS 24.501 Section 9.11.2.4)
//!
//! The timer value octet carries a 3-bit unit in bits 8 to 6 and a 5-bit
//! magnitude in bits 5 to 1. The encoder picks the unit from the size of the
//! duration:
//!
//! | Seconds | Unit | Requirement |
//! |---|---|---|
//! | `<= 64` | 2 seconds | even |
//! | minutes `<= 31` | 1 minute | none, sub-minute part dropped |
//! | otherwise | decihour | minutes divisible by 6, at most 31 decihours |
//!
//! The minute tier truncates `seconds / 60` instead of rejecting unaligned
//! input. Existing peers rely on that, so it is kept.

use bytes::{Buf, BufMut};
use thiserror::Error;
use tracing::trace;

use nasconv_common::TARGET_CONVERT;

use crate::codec::{
    ensure_capacity, read_length_u8, CodecError, CodecResult, InformationElement4, NasDecode,
    NasEncode,
};
use crate::enums::GprsTimerValueUnit;

/// Upper bound of the 2-second tier, in seconds
const MAX_TWO_SECOND_TIER: u32 = 64;
/// Largest value of the 5-bit magnitude field
const MAX_TIMER_VALUE: u32 = 31;

/// Error type for GPRS timer conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Duration is not aligned to the step of the selected unit
    #[error("timer value {seconds}s is not a multiple of {step}")]
    InvalidGranularity {
        /// Requested duration
        seconds: u32,
        /// Step the duration must be aligned to
        step: &'static str,
    },
    /// Duration does not fit in the 5-bit magnitude of any unit
    #[error("timer value {seconds}s is out of range")]
    OutOfRange {
        /// Requested duration
        seconds: u32,
    },
    /// Unit bits that TS 24.008 does not define for GPRS Timer 2
    #[error("invalid GPRS timer unit: 0b{0:03b}")]
    InvalidUnit(u8),
}

/// Encode a duration in seconds as a GPRS Timer 2 value octet
///
/// # Example
/// ```
/// use nasconv_nas::ies::gprs_timer::encode_gprs_timer2;
///
/// assert_eq!(encode_gprs_timer2(10).unwrap(), 0x05);
/// assert_eq!(encode_gprs_timer2(780).unwrap(), 0x2D);
/// assert!(encode_gprs_timer2(15).is_err());
/// ```
pub fn encode_gprs_timer2(seconds: u32) -> Result<u8, TimerError> {
    let value = if seconds <= MAX_TWO_SECOND_TIER {
        if seconds % 2 != 0 {
            return Err(TimerError::InvalidGranularity {
                seconds,
                step: "2 seconds",
            });
        }
        (seconds / 2) as u8
    } else {
        let minutes = seconds / 60;
        if minutes <= MAX_TIMER_VALUE {
            unit_bits(GprsTimerValueUnit::MultiplesOf1Minute) | minutes as u8
        } else {
            if minutes % 6 != 0 {
                return Err(TimerError::InvalidGranularity {
                    seconds,
                    step: "deci-hours",
                });
            }
            let decihours = minutes / 6;
            if decihours > MAX_TIMER_VALUE {
                return Err(TimerError::OutOfRange { seconds });
            }
            unit_bits(GprsTimerValueUnit::MultiplesOfDecihours) | decihours as u8
        }
    };

    trace!(target: TARGET_CONVERT, seconds, value, "GPRS timer 2 encoded");
    Ok(value)
}

/// Decode a GPRS Timer 2 value octet to seconds
///
/// Returns `Ok(None)` when the timer is deactivated.
pub fn decode_gprs_timer2(value: u8) -> Result<Option<u32>, TimerError> {
    let bits = (value >> 5) & 0x07;
    let unit = GprsTimerValueUnit::try_from(bits).map_err(|_| TimerError::InvalidUnit(bits))?;
    Ok(unit
        .step_seconds()
        .map(|step| step * (value & 0x1F) as u32))
}

fn unit_bits(unit: GprsTimerValueUnit) -> u8 {
    u8::from(unit) << 5
}

/// GPRS Timer 2 IE (Type 4, TLV, value length 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeGprsTimer2 {
    /// Encoded timer value octet
    pub value: u8,
}

impl IeGprsTimer2 {
    /// Create from an already encoded timer value octet
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Create from a duration in seconds
    pub fn from_seconds(seconds: u32) -> Result<Self, TimerError> {
        Ok(Self {
            value: encode_gprs_timer2(seconds)?,
        })
    }

    /// A deactivated timer
    pub fn deactivated() -> Self {
        Self {
            value: unit_bits(GprsTimerValueUnit::TimerDeactivated),
        }
    }

    /// Unit field of the value octet
    pub fn unit(&self) -> Result<GprsTimerValueUnit, TimerError> {
        let bits = (self.value >> 5) & 0x07;
        GprsTimerValueUnit::try_from(bits).map_err(|_| TimerError::InvalidUnit(bits))
    }

    /// 5-bit magnitude field of the value octet
    pub fn timer_value(&self) -> u8 {
        self.value & 0x1F
    }

    /// Duration in seconds, `None` when deactivated
    pub fn to_seconds(&self) -> Result<Option<u32>, TimerError> {
        decode_gprs_timer2(self.value)
    }
}

impl NasEncode for IeGprsTimer2 {
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()> {
        ensure_capacity(buf, 2, "GPRS timer 2")?;
        buf.put_u8(1);
        buf.put_u8(self.value);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        2
    }
}

impl NasDecode for IeGprsTimer2 {
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self> {
        let length = read_length_u8(buf)?;
        if length != 1 {
            return Err(CodecError::InvalidValue(format!(
                "GPRS timer 2 length must be 1, got {length}"
            )));
        }
        let ie = Self::new(buf.get_u8());
        ie.unit()?;
        Ok(ie)
    }
}

impl InformationElement4 for IeGprsTimer2 {}

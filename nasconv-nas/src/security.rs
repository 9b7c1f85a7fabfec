//! NAS security counter
//!
//! Implements the NAS COUNT that a security context keeps per direction and
//! feeds into the integrity and ciphering algorithms (3GPP TS 33.501 Section
//! 6.4.3.1):
//!
//! ```text
//! COUNT (32 bits)     := 0x00 || NAS COUNT (24 bits)
//! NAS COUNT (24 bits) := NAS OVERFLOW (16 bits) || NAS SQN (8 bits)
//! ```
//!
//! # Concurrency
//!
//! [`NasCount`] is a plain value mutated through `&mut self`. It has exactly one
//! writer: the code path that protects (or verifies) messages in its direction.
//! [`NasCountPair`] keeps one counter per direction so uplink and downlink paths
//! never contend for the same value. A pair shared between threads must be
//! wrapped in a lock by its owner.

use std::fmt;

/// Mask for the 24 significant bits of the NAS COUNT
const COUNT_MASK: u32 = 0x00FF_FFFF;
/// Mask for the overflow field (bits 8-23)
const OVERFLOW_MASK: u32 = 0x00FF_FF00;
/// Mask for the sequence number field (bits 0-7)
const SQN_MASK: u32 = 0x0000_00FF;

/// NAS COUNT for one direction of a security context
///
/// The value is always in `0..=0x00FF_FFFF`.
///
/// # Example
/// ```
/// use nasconv_nas::security::NasCount;
///
/// let mut count = NasCount::new(0x0001, 0xFF);
/// count.add_one();
/// assert_eq!(count.overflow(), 0x0002);
/// assert_eq!(count.sqn(), 0x00);
/// assert_eq!(count.to_u32(), 0x0000_0200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NasCount(u32);

impl NasCount {
    /// Create a NAS count from its overflow and sequence number fields
    pub fn new(overflow: u16, sqn: u8) -> Self {
        let mut count = Self::default();
        count.set(overflow, sqn);
        count
    }

    /// Create a NAS count from a 32-bit value, keeping only the low 24 bits
    pub fn from_u32(value: u32) -> Self {
        Self(value & COUNT_MASK)
    }

    /// Value for use as algorithm input (upper byte always zero)
    pub fn to_u32(&self) -> u32 {
        self.0
    }

    /// Overflow counter (bits 8-23)
    pub fn overflow(&self) -> u16 {
        ((self.0 & OVERFLOW_MASK) >> 8) as u16
    }

    /// Sequence number (bits 0-7), the part carried in the security header
    pub fn sqn(&self) -> u8 {
        (self.0 & SQN_MASK) as u8
    }

    /// Replace the overflow field, leaving the sequence number untouched
    pub fn set_overflow(&mut self, overflow: u16) {
        self.0 = (self.0 & SQN_MASK) | ((overflow as u32) << 8);
        self.mask_to_24_bits();
    }

    /// Replace the sequence number, leaving the overflow field untouched
    pub fn set_sqn(&mut self, sqn: u8) {
        self.0 = (self.0 & OVERFLOW_MASK) | sqn as u32;
        self.mask_to_24_bits();
    }

    /// Replace both fields
    pub fn set(&mut self, overflow: u16, sqn: u8) {
        self.set_overflow(overflow);
        self.set_sqn(sqn);
    }

    /// Advance the count by one message.
    ///
    /// Wraps silently from `0xFFFFFF` to zero. Deciding what a wrap means
    /// (for example a new key set) is up to the owning security context.
    pub fn add_one(&mut self) {
        self.0 = self.0.wrapping_add(1);
        self.mask_to_24_bits();
    }

    /// Estimate the full NAS count from a received sequence number
    ///
    /// Only the 8-bit SQN travels in a protected message. If it is lower than
    /// the SQN of this count the sender has wrapped, so the overflow counter
    /// is advanced by one.
    pub fn estimate_from_sqn(&self, received_sqn: u8) -> NasCount {
        let mut estimated = *self;
        if self.sqn() > received_sqn {
            estimated.set_overflow(self.overflow().wrapping_add(1));
        }
        estimated.set_sqn(received_sqn);
        estimated
    }

    fn mask_to_24_bits(&mut self) {
        self.0 &= COUNT_MASK;
    }
}

impl fmt::Display for NasCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:02x}", self.overflow(), self.sqn())
    }
}

impl From<NasCount> for u32 {
    fn from(count: NasCount) -> Self {
        count.to_u32()
    }
}

/// Direction values for NAS security
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NasDirection {
    /// Uplink (UE to network)
    Uplink = 0,
    /// Downlink (network to UE)
    Downlink = 1,
}

/// One NAS count per direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NasCountPair {
    /// Uplink NAS COUNT
    pub uplink: NasCount,
    /// Downlink NAS COUNT
    pub downlink: NasCount,
}

impl NasCountPair {
    /// Create a pair with both counts at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for a direction
    pub fn count(&self, direction: NasDirection) -> NasCount {
        match direction {
            NasDirection::Uplink => self.uplink,
            NasDirection::Downlink => self.downlink,
        }
    }

    /// Exclusive access to the count of one direction
    pub fn count_mut(&mut self, direction: NasDirection) -> &mut NasCount {
        match direction {
            NasDirection::Uplink => &mut self.uplink,
            NasDirection::Downlink => &mut self.downlink,
        }
    }

    /// Return the count to use for the next protected message in `direction`
    /// and advance the stored value.
    pub fn next(&mut self, direction: NasDirection) -> NasCount {
        let count = self.count_mut(direction);
        let current = *count;
        count.add_one();
        tracing::trace!(
            target: nasconv_common::TARGET_MESSAGE,
            ?direction,
            count = %current,
            "NAS COUNT advanced"
        );
        current
    }

    /// Reset both counts, as done when a new security context is taken into use
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

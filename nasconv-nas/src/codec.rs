//! NAS IE encoding/decoding traits
//!
//! This module provides the traits the surrounding NAS message codec uses to
//! place IE values into, and pull them out of, a message buffer.
//!
//! # Traits
//!
//! - [`NasEncode`]: Trait for encoding types to bytes
//! - [`NasDecode`]: Trait for decoding types from bytes
//!
//! # Example
//!
//! ```rust
//! use nasconv_nas::codec::{NasDecode, NasEncode};
//! use nasconv_nas::ies::IeGprsTimer2;
//!
//! let timer = IeGprsTimer2::from_seconds(120).unwrap();
//! let mut buf = Vec::new();
//! timer.nas_encode(&mut buf).unwrap();
//! assert_eq!(buf, vec![0x01, 0x22]);
//!
//! let decoded = IeGprsTimer2::nas_decode(&mut buf.as_slice()).unwrap();
//! assert_eq!(decoded, timer);
//! ```

use bytes::{Buf, BufMut};
use thiserror::Error;

use crate::ies::gprs_timer::TimerError;
use crate::ies::pco::PcoError;

/// Errors that can occur during NAS IE encoding/decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Buffer does not have enough bytes for decoding
    #[error("Buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Expected minimum bytes
        expected: usize,
        /// Actual bytes available
        actual: usize,
    },

    /// Invalid value encountered during decoding
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Length field exceeds remaining buffer
    #[error("Length exceeds buffer: length field is {length}, but only {remaining} bytes remain")]
    LengthExceedsBuffer {
        /// Length specified in the length field
        length: usize,
        /// Remaining bytes in buffer
        remaining: usize,
    },

    /// Encoding error
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Protocol Configuration Options error
    #[error("PCO error: {0}")]
    Pco(#[from] PcoError),

    /// GPRS timer conversion error
    #[error("GPRS timer error: {0}")]
    Timer(#[from] TimerError),
}

/// Result type for NAS codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Trait for encoding NAS Information Elements to bytes
pub trait NasEncode {
    /// Encode this value to the provided buffer
    ///
    /// # Arguments
    /// * `buf` - Mutable buffer to write encoded bytes to
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(CodecError)` if encoding fails
    fn nas_encode<B: BufMut>(&self, buf: &mut B) -> CodecResult<()>;

    /// Returns the encoded size in bytes
    ///
    /// This is useful for pre-allocating buffers or calculating
    /// length fields before encoding.
    fn encoded_len(&self) -> usize;
}

/// Trait for decoding NAS Information Elements from bytes
pub trait NasDecode: Sized {
    /// Decode a value from the provided buffer
    ///
    /// # Arguments
    /// * `buf` - Buffer to read encoded bytes from
    ///
    /// # Returns
    /// * `Ok(Self)` on success
    /// * `Err(CodecError)` if decoding fails
    fn nas_decode<B: Buf>(buf: &mut B) -> CodecResult<Self>;
}

/// Marker trait for Type 4 Information Elements (variable-length, 1-byte length)
pub trait InformationElement4: NasEncode + NasDecode {}

/// Marker trait for Type 6 Information Elements (variable-length, 2-byte length)
pub trait InformationElement6: NasEncode + NasDecode {}

// ============================================================================
// Length-prefix helpers shared by the IE implementations
// ============================================================================

/// Read a 1-byte length field and check the value fits in the buffer
pub fn read_length_u8<B: Buf>(buf: &mut B) -> CodecResult<usize> {
    if buf.remaining() < 1 {
        return Err(CodecError::BufferTooShort {
            expected: 1,
            actual: buf.remaining(),
        });
    }
    let length = buf.get_u8() as usize;
    if buf.remaining() < length {
        return Err(CodecError::LengthExceedsBuffer {
            length,
            remaining: buf.remaining(),
        });
    }
    Ok(length)
}

/// Read a 2-byte length field and check the value fits in the buffer
pub fn read_length_u16<B: Buf>(buf: &mut B) -> CodecResult<usize> {
    if buf.remaining() < 2 {
        return Err(CodecError::BufferTooShort {
            expected: 2,
            actual: buf.remaining(),
        });
    }
    let length = buf.get_u16() as usize;
    if buf.remaining() < length {
        return Err(CodecError::LengthExceedsBuffer {
            length,
            remaining: buf.remaining(),
        });
    }
    Ok(length)
}

/// Make sure the sink can take `needed` more bytes
pub fn ensure_capacity<B: BufMut>(buf: &B, needed: usize, what: &str) -> CodecResult<()> {
    if buf.remaining_mut() < needed {
        return Err(CodecError::EncodingError(format!(
            "no room for {what}: need {needed} bytes, {} left",
            buf.remaining_mut()
        )));
    }
    Ok(())
}

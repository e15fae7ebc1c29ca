//! Variable-length integer encoding utilities.
//!
//! Compiled synonym entry records store their header and output ordinals as
//! vints: 7 bits per byte, low bits first, high bit set on every byte except
//! the last.

use std::io::Read;

use byteorder::ReadBytesExt;

use crate::error::{Result, SynfilterError};

/// Append the vint encoding of `value` to `buf`.
pub fn push_u32(buf: &mut Vec<u8>, value: u32) {
    let mut val = value;

    loop {
        let mut byte = (val & 0x7F) as u8;
        val >>= 7;

        if val != 0 {
            byte |= 0x80; // Set continuation bit
        }

        buf.push(byte);

        if val == 0 {
            break;
        }
    }
}

/// Read a variable-length encoded u32 from a reader.
pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut result = 0u32;
    let mut shift = 0;

    loop {
        let byte = reader.read_u8()?;

        if shift >= 32 {
            return Err(SynfilterError::other("VarInt overflow"));
        }

        result |= ((byte & 0x7F) as u32) << shift;

        if (byte & 0x80) == 0 {
            return Ok(result);
        }

        shift += 7;
    }
}

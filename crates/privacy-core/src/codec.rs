//! Fixed-stride byte codec shared by all proof encodings
//!
//! Points and scalars occupy 32-byte slots, variable-length sequences are
//! prefixed with a single count byte, and integers are little-endian.

use crate::{group::decode_scalar, PrivacyError, PrivacyResult, ELEMENT_SIZE};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};

/// Cursor over an encoded proof
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Fail unless the whole buffer has been consumed
    pub fn finish(&self) -> PrivacyResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(PrivacyError::TrailingBytes(n)),
        }
    }

    pub fn read_bytes(&mut self, len: usize) -> PrivacyResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(PrivacyError::Truncated {
                needed: len,
                available: self.remaining(),
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_array(&mut self) -> PrivacyResult<[u8; ELEMENT_SIZE]> {
        let mut out = [0u8; ELEMENT_SIZE];
        out.copy_from_slice(self.read_bytes(ELEMENT_SIZE)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> PrivacyResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u64(&mut self) -> PrivacyResult<u64> {
        let mut out = [0u8; 8];
        out.copy_from_slice(self.read_bytes(8)?);
        Ok(u64::from_le_bytes(out))
    }

    /// Read a point slot; validity is left to the sanity check
    pub fn read_point(&mut self) -> PrivacyResult<CompressedRistretto> {
        Ok(CompressedRistretto(self.read_array()?))
    }

    /// Read a scalar slot, rejecting non-canonical encodings
    pub fn read_scalar(&mut self) -> PrivacyResult<Scalar> {
        decode_scalar(self.read_array()?)
    }

    pub fn read_points(&mut self, count: usize) -> PrivacyResult<Vec<CompressedRistretto>> {
        (0..count).map(|_| self.read_point()).collect()
    }

    pub fn read_scalars(&mut self, count: usize) -> PrivacyResult<Vec<Scalar>> {
        (0..count).map(|_| self.read_scalar()).collect()
    }

    /// Read an optional point behind a presence byte
    pub fn read_optional_point(&mut self) -> PrivacyResult<Option<CompressedRistretto>> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(self.read_point()?)),
            flag => Err(PrivacyError::InvalidParameters(format!("invalid presence flag {flag}"))),
        }
    }
}

/// Append a count byte, failing if the count does not fit
pub fn write_count(out: &mut Vec<u8>, count: usize) -> PrivacyResult<()> {
    let byte = u8::try_from(count)
        .map_err(|_| PrivacyError::InvalidParameters(format!("sequence of {count} elements exceeds 255")))?;
    out.push(byte);
    Ok(())
}

pub fn write_points(out: &mut Vec<u8>, points: &[CompressedRistretto]) {
    for point in points {
        out.extend_from_slice(point.as_bytes());
    }
}

pub fn write_scalars(out: &mut Vec<u8>, scalars: &[Scalar]) {
    for scalar in scalars {
        out.extend_from_slice(scalar.as_bytes());
    }
}

pub fn write_optional_point(out: &mut Vec<u8>, point: Option<&CompressedRistretto>) {
    match point {
        Some(point) => {
            out.push(1);
            out.extend_from_slice(point.as_bytes());
        }
        None => out.push(0),
    }
}

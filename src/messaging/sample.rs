//! Tilt samples: wire codec and the shared latest-sample slot

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// One `(x, y)` tilt reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
}

impl AccelSample {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Parse a `"<x>,<y>"` payload.
    ///
    /// Fields may carry surrounding whitespace. Anything other than exactly
    /// two finite numeric fields is rejected.
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        let fields: Vec<&str> = payload.split(',').collect();
        if fields.len() != 2 {
            return Err(DecodeError::FieldCount(fields.len()));
        }

        let x = parse_field(fields[0], 0)?;
        let y = parse_field(fields[1], 1)?;
        Ok(Self { x, y })
    }

    /// Parse raw message bytes
    pub fn decode_bytes(payload: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(payload).map_err(|_| DecodeError::NotUtf8)?;
        Self::decode(text)
    }

    /// Wire form, `"<x>,<y>"`
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AccelSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

fn parse_field(field: &str, index: usize) -> Result<f32, DecodeError> {
    let value = field
        .trim()
        .parse::<f32>()
        .map_err(|_| DecodeError::NotANumber {
            index,
            value: field.to_string(),
        })?;

    // `parse` accepts "NaN" and "inf"; neither is a usable tilt
    if !value.is_finite() {
        return Err(DecodeError::NotFinite { index });
    }
    Ok(value)
}

/// Latest tilt sample, shared between the delivery thread and the frame loop.
///
/// Both components are packed into one atomic word so a reader always sees a
/// pair that was written together.
#[derive(Debug)]
pub struct SampleCell {
    bits: AtomicU64,
}

impl SampleCell {
    pub fn new(sample: AccelSample) -> Self {
        Self {
            bits: AtomicU64::new(pack(sample)),
        }
    }

    pub fn store(&self, sample: AccelSample) {
        self.bits.store(pack(sample), Ordering::Release);
    }

    pub fn load(&self) -> AccelSample {
        unpack(self.bits.load(Ordering::Acquire))
    }
}

impl Default for SampleCell {
    fn default() -> Self {
        Self::new(AccelSample::ZERO)
    }
}

#[inline]
fn pack(sample: AccelSample) -> u64 {
    ((sample.x.to_bits() as u64) << 32) | sample.y.to_bits() as u64
}

#[inline]
fn unpack(bits: u64) -> AccelSample {
    AccelSample {
        x: f32::from_bits((bits >> 32) as u32),
        y: f32::from_bits(bits as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_decode() {
        let s = AccelSample::decode("1.5,-2.25").unwrap();
        assert_eq!(s, AccelSample::new(1.5, -2.25));

        let s = AccelSample::decode(" -4.905 , 0.0 ").unwrap();
        assert_eq!(s, AccelSample::new(-4.905, 0.0));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(AccelSample::decode("1.0"), Err(DecodeError::FieldCount(1)));
        assert_eq!(AccelSample::decode("1,2,3"), Err(DecodeError::FieldCount(3)));
        assert!(matches!(
            AccelSample::decode("1.0,abc"),
            Err(DecodeError::NotANumber { index: 1, .. })
        ));
        assert!(matches!(
            AccelSample::decode(",2"),
            Err(DecodeError::NotANumber { index: 0, .. })
        ));
        assert_eq!(AccelSample::decode_bytes(&[0xff, 0x2c]), Err(DecodeError::NotUtf8));
    }

    #[test]
    fn test_decode_rejects_non_finite() {
        assert_eq!(AccelSample::decode("NaN,0"), Err(DecodeError::NotFinite { index: 0 }));
        assert_eq!(AccelSample::decode("inf,1"), Err(DecodeError::NotFinite { index: 0 }));
        assert_eq!(AccelSample::decode("1,-inf"), Err(DecodeError::NotFinite { index: 1 }));
        assert_eq!(AccelSample::decode("0.5, nan"), Err(DecodeError::NotFinite { index: 1 }));
        // Overflows to infinity
        assert_eq!(AccelSample::decode("1e39,0"), Err(DecodeError::NotFinite { index: 0 }));
    }

    #[test]
    fn test_encode_matches_controller_format() {
        let s = AccelSample::new(-1.5, 2.0);
        assert_eq!(s.encode(), "-1.5,2");
        assert_eq!(AccelSample::decode(&s.encode()).unwrap(), s);
    }

    #[test]
    fn test_cell_store_load() {
        let cell = SampleCell::default();
        assert_eq!(cell.load(), AccelSample::ZERO);

        cell.store(AccelSample::new(-0.0, f32::MAX));
        let s = cell.load();
        assert_eq!(s.x.to_bits(), (-0.0f32).to_bits());
        assert_eq!(s.y, f32::MAX);
    }

    #[test]
    fn test_cell_never_tears() {
        // Writer only ever stores pairs with y == -x
        let cell = Arc::new(SampleCell::default());
        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for i in 0..20_000 {
                    let v = i as f32;
                    cell.store(AccelSample::new(v, -v));
                }
            })
        };

        for _ in 0..20_000 {
            let s = cell.load();
            assert_eq!(s.x, -s.y);
        }
        writer.join().unwrap();
    }
}

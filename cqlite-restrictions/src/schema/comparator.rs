//! Ordering of serialized key values
//!
//! Values are compared in the serialized form Cassandra stores in keys:
//! big-endian fixed-width integers and floats, raw UTF-8 / bytes for text and
//! blobs, 16-byte UUIDs. A zero-length value is the "empty" value and sorts
//! before every non-empty value of any type.

use super::CqlType;
use crate::error::{Error, Result};
use std::cmp::Ordering;

impl CqlType {
    /// Compare two serialized values in the natural order of this type
    pub fn compare(&self, left: &[u8], right: &[u8]) -> Ordering {
        match (left.is_empty(), right.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        match self {
            CqlType::TinyInt | CqlType::SmallInt | CqlType::Int | CqlType::BigInt | CqlType::Timestamp | CqlType::Time => {
                compare_signed(left, right)
            }
            CqlType::Float => match (read_array::<4>(left), read_array::<4>(right)) {
                (Some(l), Some(r)) => f32::from_be_bytes(l).total_cmp(&f32::from_be_bytes(r)),
                _ => left.cmp(right),
            },
            CqlType::Double => match (read_array::<8>(left), read_array::<8>(right)) {
                (Some(l), Some(r)) => f64::from_be_bytes(l).total_cmp(&f64::from_be_bytes(r)),
                _ => left.cmp(right),
            },
            CqlType::Uuid => compare_uuid(left, right),
            CqlType::TimeUuid => compare_timeuuid(left, right),
            // Dates are unsigned day counts centered on 2^31, booleans single bytes
            CqlType::Boolean
            | CqlType::Date
            | CqlType::Text
            | CqlType::Ascii
            | CqlType::Blob
            | CqlType::Inet
            | CqlType::Custom(_) => left.cmp(right),
        }
    }

    /// Check that a serialized value is well formed for this type
    pub fn validate(&self, value: &[u8]) -> Result<()> {
        if let Some(size) = self.fixed_size() {
            if value.len() != size {
                return Err(Error::type_conversion(format!(
                    "Expected {} bytes for {} value, got {}",
                    size,
                    self,
                    value.len()
                )));
            }
        }

        match self {
            CqlType::Text => std::str::from_utf8(value)
                .map(|_| ())
                .map_err(|e| Error::type_conversion(format!("Invalid UTF-8 in text value: {}", e))),
            CqlType::Ascii if !value.is_ascii() => Err(Error::type_conversion(
                "Non-ASCII byte in ascii value".to_string(),
            )),
            CqlType::Inet if value.len() != 4 && value.len() != 16 => Err(Error::type_conversion(format!(
                "Expected 4 or 16 bytes for inet value, got {}",
                value.len()
            ))),
            _ => Ok(()),
        }
    }

    /// Render a serialized value for display
    pub fn format_value(&self, value: &[u8]) -> String {
        if value.is_empty() {
            return "EMPTY".to_string();
        }

        let formatted = match self {
            CqlType::Boolean => value.first().map(|b| (*b != 0).to_string()),
            CqlType::TinyInt => read_array::<1>(value).map(|b| i8::from_be_bytes(b).to_string()),
            CqlType::SmallInt => read_array::<2>(value).map(|b| i16::from_be_bytes(b).to_string()),
            CqlType::Int => read_array::<4>(value).map(|b| i32::from_be_bytes(b).to_string()),
            CqlType::BigInt | CqlType::Timestamp | CqlType::Time => {
                read_array::<8>(value).map(|b| i64::from_be_bytes(b).to_string())
            }
            CqlType::Date => read_array::<4>(value)
                .map(|b| (i64::from(u32::from_be_bytes(b)) - (1i64 << 31)).to_string()),
            CqlType::Float => read_array::<4>(value).map(|b| f32::from_be_bytes(b).to_string()),
            CqlType::Double => read_array::<8>(value).map(|b| f64::from_be_bytes(b).to_string()),
            CqlType::Text | CqlType::Ascii => {
                std::str::from_utf8(value).ok().map(|s| format!("'{}'", s))
            }
            CqlType::Uuid | CqlType::TimeUuid => read_array::<16>(value).map(format_uuid),
            CqlType::Blob | CqlType::Inet | CqlType::Custom(_) => None,
        };

        formatted.unwrap_or_else(|| format!("0x{}", hex::encode(value)))
    }
}

fn read_array<const N: usize>(value: &[u8]) -> Option<[u8; N]> {
    value.try_into().ok()
}

/// Two's complement big-endian comparison
///
/// A shorter value is sign-extended; numerically equal values of different
/// widths order by width so that only identical bytes compare equal.
fn compare_signed(left: &[u8], right: &[u8]) -> Ordering {
    let left_negative = left[0] & 0x80 != 0;
    let right_negative = right[0] & 0x80 != 0;
    match (left_negative, right_negative) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let width = left.len().max(right.len());
    let pad = if left_negative { 0xFF } else { 0x00 };
    let extend = |v: &[u8], i: usize| {
        let offset = width - v.len();
        if i < offset { pad } else { v[i - offset] }
    };

    (0..width)
        .map(|i| extend(left, i).cmp(&extend(right, i)))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or_else(|| left.len().cmp(&right.len()))
}

fn uuid_version(value: &[u8]) -> u8 {
    value.get(6).map_or(0, |b| b >> 4)
}

/// 60-bit timestamp of a version 1 UUID
fn uuid_timestamp(value: &[u8]) -> u64 {
    let time_low = u64::from(u32::from_be_bytes([value[0], value[1], value[2], value[3]]));
    let time_mid = u64::from(u16::from_be_bytes([value[4], value[5]]));
    let time_hi = u64::from(u16::from_be_bytes([value[6] & 0x0F, value[7]]));
    (time_hi << 48) | (time_mid << 32) | time_low
}

fn compare_uuid(left: &[u8], right: &[u8]) -> Ordering {
    if left.len() != 16 || right.len() != 16 {
        return left.cmp(right);
    }

    let (left_version, right_version) = (uuid_version(left), uuid_version(right));
    if left_version != right_version {
        return left_version.cmp(&right_version);
    }
    if left_version == 1 {
        let by_time = uuid_timestamp(left).cmp(&uuid_timestamp(right));
        if by_time != Ordering::Equal {
            return by_time;
        }
    }
    left.cmp(right)
}

fn compare_timeuuid(left: &[u8], right: &[u8]) -> Ordering {
    if left.len() != 16 || right.len() != 16 {
        return left.cmp(right);
    }

    uuid_timestamp(left)
        .cmp(&uuid_timestamp(right))
        .then_with(|| {
            // clock sequence and node compare as signed bytes
            left[8..]
                .iter()
                .map(|b| *b as i8)
                .cmp(right[8..].iter().map(|b| *b as i8))
        })
        .then_with(|| left.cmp(right))
}

fn format_uuid(bytes: [u8; 16]) -> String {
    let hex = hex::encode(bytes);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

//! Column values used to build key elements

use crate::error::{Error, Result};
use crate::schema::CqlType;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a primary key column as supplied by a restriction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 8-bit signed integer
    TinyInt(i8),
    /// 16-bit signed integer
    SmallInt(i16),
    /// 32-bit signed integer
    Integer(i32),
    /// 64-bit signed integer
    BigInt(i64),
    /// 32-bit floating point
    Float32(f32),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
    /// Timestamp (milliseconds since Unix epoch)
    Timestamp(i64),
    /// Days since Unix epoch
    Date(i32),
    /// Nanoseconds since midnight
    Time(i64),
    /// UUID as 16 bytes
    Uuid([u8; 16]),
    /// IPv4 or IPv6 address bytes
    Inet(Vec<u8>),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Serialize this value as a component of a key of the given type
    ///
    /// Integer values widen to larger integer types; any other mismatch is
    /// a conversion error.
    pub fn to_key_bytes(&self, cql_type: &CqlType) -> Result<Bytes> {
        let bytes: Vec<u8> = match (cql_type, self) {
            (_, Value::Null) => {
                return Err(Error::type_conversion(format!(
                    "Invalid null value for {} key component",
                    cql_type
                )))
            }
            (CqlType::Boolean, Value::Boolean(b)) => vec![u8::from(*b)],
            (CqlType::TinyInt, Value::TinyInt(i)) => i.to_be_bytes().to_vec(),
            (CqlType::SmallInt, Value::SmallInt(i)) => i.to_be_bytes().to_vec(),
            (CqlType::SmallInt, Value::TinyInt(i)) => i16::from(*i).to_be_bytes().to_vec(),
            (CqlType::Int, Value::Integer(i)) => i.to_be_bytes().to_vec(),
            (CqlType::Int, Value::SmallInt(i)) => i32::from(*i).to_be_bytes().to_vec(),
            (CqlType::Int, Value::TinyInt(i)) => i32::from(*i).to_be_bytes().to_vec(),
            (CqlType::BigInt, Value::BigInt(i)) => i.to_be_bytes().to_vec(),
            (CqlType::BigInt, Value::Integer(i)) => i64::from(*i).to_be_bytes().to_vec(),
            (CqlType::Float, Value::Float32(f)) => f.to_be_bytes().to_vec(),
            (CqlType::Double, Value::Float(f)) => f.to_be_bytes().to_vec(),
            (CqlType::Double, Value::Float32(f)) => f64::from(*f).to_be_bytes().to_vec(),
            (CqlType::Text, Value::Text(s)) => s.as_bytes().to_vec(),
            (CqlType::Ascii, Value::Text(s)) if s.is_ascii() => s.as_bytes().to_vec(),
            (CqlType::Blob | CqlType::Custom(_), Value::Blob(b)) => b.clone(),
            (CqlType::Timestamp, Value::Timestamp(ts)) => ts.to_be_bytes().to_vec(),
            (CqlType::Date, Value::Date(days)) => {
                // unsigned with the epoch at 2^31
                let shifted = (i64::from(*days) + (1i64 << 31)) as u32;
                shifted.to_be_bytes().to_vec()
            }
            (CqlType::Time, Value::Time(nanos)) => nanos.to_be_bytes().to_vec(),
            (CqlType::Uuid | CqlType::TimeUuid, Value::Uuid(uuid)) => uuid.to_vec(),
            (CqlType::Inet, Value::Inet(addr)) => addr.clone(),
            (cql_type, value) => {
                return Err(Error::type_conversion(format!(
                    "Cannot use {} as a {} key component",
                    value, cql_type
                )))
            }
        };

        Ok(Bytes::from(bytes))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::TinyInt(i) => write!(f, "{}", i),
            Value::SmallInt(i) => write!(f, "{}", i),
            Value::Integer(i) => write!(f, "{}", i),
            Value::BigInt(i) => write!(f, "{}", i),
            Value::Float32(fl) => write!(f, "{}", fl),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Text(s) => write!(f, "'{}'", s),
            Value::Blob(b) => write!(f, "BLOB({} bytes)", b.len()),
            Value::Timestamp(ts) => write!(f, "TIMESTAMP({})", ts),
            Value::Date(days) => write!(f, "DATE({})", days),
            Value::Time(nanos) => write!(f, "TIME({})", nanos),
            Value::Uuid(uuid) => write!(f, "UUID({})", hex::encode(uuid)),
            Value::Inet(addr) => write!(f, "INET({})", hex::encode(addr)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_int_encoding() {
        let bytes = Value::Integer(3).to_key_bytes(&CqlType::Int).unwrap();
        assert_eq!(&bytes[..], &[0, 0, 0, 3]);

        let widened = Value::Integer(-1).to_key_bytes(&CqlType::BigInt).unwrap();
        assert_eq!(&widened[..], &[0xFF; 8]);
    }

    #[test]
    fn test_null_is_rejected() {
        let err = Value::Null.to_key_bytes(&CqlType::Int).unwrap_err();
        assert!(err.to_string().contains("Invalid null value"));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        assert!(Value::Text("a".into()).to_key_bytes(&CqlType::Int).is_err());
        assert!(Value::BigInt(1).to_key_bytes(&CqlType::Int).is_err());
        assert!(Value::Text("é".into()).to_key_bytes(&CqlType::Ascii).is_err());
    }

    #[test]
    fn test_date_encoding_preserves_order() {
        let before = Value::Date(-1).to_key_bytes(&CqlType::Date).unwrap();
        let epoch = Value::Date(0).to_key_bytes(&CqlType::Date).unwrap();
        assert_eq!(&epoch[..], &(1u32 << 31).to_be_bytes());
        assert_eq!(CqlType::Date.compare(&before, &epoch), Ordering::Less);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Text("x".into()).to_string(), "'x'");
        assert_eq!(Value::Blob(vec![1, 2]).to_string(), "BLOB(2 bytes)");
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}

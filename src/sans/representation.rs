//! Primitive values and the representation codes selecting their encoding.

use alloc::{string::String, vec::Vec};

use thiserror::Error;
use zerocopy::{
    FromBytes,
    byteorder::{BigEndian, I16, I32, U16, U32},
};

/// Representation code numbers.
pub mod code {
    pub const FSHORT: u8 = 1;
    pub const FSINGL: u8 = 2;
    pub const FSING1: u8 = 3;
    pub const FSING2: u8 = 4;
    pub const ISINGL: u8 = 5;
    pub const VSINGL: u8 = 6;
    pub const FDOUBL: u8 = 7;
    pub const FDOUB1: u8 = 8;
    pub const FDOUB2: u8 = 9;
    pub const CSINGL: u8 = 10;
    pub const CDOUBL: u8 = 11;
    pub const SSHORT: u8 = 12;
    pub const SNORM: u8 = 13;
    pub const SLONG: u8 = 14;
    pub const USHORT: u8 = 15;
    pub const UNORM: u8 = 16;
    pub const ULONG: u8 = 17;
    pub const UVARI: u8 = 18;
    pub const IDENT: u8 = 19;
    pub const ASCII: u8 = 20;
    pub const DTIME: u8 = 21;
    pub const ORIGIN: u8 = 22;
    pub const OBNAME: u8 = 23;
    pub const OBJREF: u8 = 24;
    pub const ATTREF: u8 = 25;
    pub const STATUS: u8 = 26;
    pub const UNITS: u8 = 27;
}

/// A decoded primitive value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// No value (count of zero, or not supplied).
    #[default]
    Absent,
    String(String),
    Integer(i64),
    /// Bytes of a code without a native interpretation here (floats, times,
    /// references).
    RawBytes(Vec<u8>),
    StructuredName(ObjectName),
    /// Elements of a value with a count greater than one.
    List(Vec<Value>),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// The identity of an object: origin, copy number and identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectName {
    pub origin: u32,
    pub copy: u8,
    pub identifier: String,
}

/// An error reading a primitive value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not enough bytes remain for the value.
    #[error("Needed {needed} bytes, found {available}.")]
    Truncated { needed: usize, available: usize },
    /// The representation code is unknown to the reader.
    #[error("Unsupported representation code ({0}).")]
    UnsupportedCode(u8),
    /// Text is not valid UTF-8.
    #[error("Text is not valid UTF-8.")]
    InvalidText,
    /// The reader returned a different kind of value than the subfield needs.
    #[error("Unexpected kind of value.")]
    UnexpectedKind,
}

/// Decode primitive values by representation code.
///
/// Implementations must not hold shared mutable state, so that independent
/// records can be decoded concurrently with the same reader.
pub trait ReadRepresentation {
    /// Decode one value of representation code `code` from the front of `r`.
    ///
    /// Returns the value and the number of bytes it occupied.
    fn read(&self, code: u8, r: &[u8]) -> Result<(Value, usize), DecodeError>;
}

impl<T: ReadRepresentation + ?Sized> ReadRepresentation for &T {
    fn read(&self, code: u8, r: &[u8]) -> Result<(Value, usize), DecodeError> {
        (**self).read(code, r)
    }
}

/// Reader for the representation codes defined by RP66 V1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Standard;

impl ReadRepresentation for Standard {
    fn read(&self, c: u8, r: &[u8]) -> Result<(Value, usize), DecodeError> {
        let integer = |(i, n): (i64, usize)| (Value::Integer(i), n);
        let string = |(s, n): (String, usize)| (Value::String(s), n);

        Ok(match c {
            code::SSHORT => integer((fixed::<i8>(r)?.into(), 1)),
            code::SNORM => integer((fixed::<I16<BigEndian>>(r)?.get().into(), 2)),
            code::SLONG => integer((fixed::<I32<BigEndian>>(r)?.get().into(), 4)),
            code::USHORT | code::STATUS => integer((fixed::<u8>(r)?.into(), 1)),
            code::UNORM => integer((fixed::<U16<BigEndian>>(r)?.get().into(), 2)),
            code::ULONG => integer((fixed::<U32<BigEndian>>(r)?.get().into(), 4)),
            code::UVARI | code::ORIGIN => {
                let (i, n) = uvari(r)?;
                integer((i.into(), n))
            }
            code::IDENT | code::UNITS => string(ident(r)?),
            code::ASCII => {
                let (length, n) = uvari(r)?;
                let (s, m) = text(&r[n..], length as usize)?;
                string((s, n + m))
            }
            code::OBNAME => {
                let (name, n) = obname(r)?;
                (Value::StructuredName(name), n)
            }
            code::OBJREF => {
                let (_, n) = ident(r)?;
                let (_, m) = obname(&r[n..])?;
                raw(r, n + m)?
            }
            code::ATTREF => {
                let (_, n) = ident(r)?;
                let (_, m) = obname(&r[n..])?;
                let (_, k) = ident(&r[n + m..])?;
                raw(r, n + m + k)?
            }
            code::FSHORT => raw(r, 2)?,
            code::FSINGL | code::ISINGL | code::VSINGL => raw(r, 4)?,
            code::FSING1 | code::FDOUBL | code::CSINGL | code::DTIME => raw(r, 8)?,
            code::FSING2 => raw(r, 12)?,
            code::FDOUB1 | code::CDOUBL => raw(r, 16)?,
            code::FDOUB2 => raw(r, 24)?,
            _ => Err(DecodeError::UnsupportedCode(c))?,
        })
    }
}

/// Read a fixed-size value from the front of a slice.
fn fixed<T: FromBytes>(r: &[u8]) -> Result<T, DecodeError> {
    let (value, _) = T::read_from_prefix(r).map_err(|_| DecodeError::Truncated {
        needed: size_of::<T>(),
        available: r.len(),
    })?;

    Ok(value)
}

/// Read a variable-length unsigned integer (1, 2 or 4 bytes).
fn uvari(r: &[u8]) -> Result<(u32, usize), DecodeError> {
    let first = fixed::<u8>(r)?;

    Ok(match first >> 6 {
        0b00 | 0b01 => (u32::from(first), 1),
        0b10 => (u32::from(fixed::<U16<BigEndian>>(r)?.get() & 0x3FFF), 2),
        _ => (fixed::<U32<BigEndian>>(r)?.get() & 0x3FFF_FFFF, 4),
    })
}

/// Read a string with a single byte length prefix.
fn ident(r: &[u8]) -> Result<(String, usize), DecodeError> {
    let length = fixed::<u8>(r)?;
    let (s, n) = text(&r[1..], length as usize)?;
    Ok((s, n + 1))
}

fn obname(r: &[u8]) -> Result<(ObjectName, usize), DecodeError> {
    let (origin, n) = uvari(r)?;
    let copy = fixed::<u8>(&r[n..])?;
    let (identifier, m) = ident(&r[n + 1..])?;

    let name = ObjectName {
        origin,
        copy,
        identifier,
    };

    Ok((name, n + 1 + m))
}

fn text(r: &[u8], length: usize) -> Result<(String, usize), DecodeError> {
    let bytes = r.get(..length).ok_or(DecodeError::Truncated {
        needed: length,
        available: r.len(),
    })?;

    let s = core::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidText)?;

    Ok((s.into(), length))
}

fn raw(r: &[u8], length: usize) -> Result<(Value, usize), DecodeError> {
    let bytes = r.get(..length).ok_or(DecodeError::Truncated {
        needed: length,
        available: r.len(),
    })?;

    Ok((Value::RawBytes(bytes.to_vec()), length))
}

//! Position within a record body, and the reading of flagged subfields.

use alloc::{string::String, vec::Vec};

use super::{
    Context,
    descriptor::Descriptor,
    error::Error,
    grammar::{SubfieldCode, SubfieldTable},
    observer::{Observer, Warning},
    representation::{DecodeError, ReadRepresentation, Value},
};

/// Subfield values indexed by characteristics bit, `None` where not present.
pub type Subfields = [Option<Value>; 5];

/// A read position within one EFLR body.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    body: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { body, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.body.len()
    }

    /// Take the descriptor of the next component, if the body has any left.
    pub fn descriptor(&mut self) -> Option<Descriptor> {
        let r = *self.body.get(self.offset)?;
        self.offset += 1;
        Some(Descriptor::decode(r))
    }

    /// Read the subfields flagged in a descriptor, from bit 4 down to bit 0.
    ///
    /// Subfields with a [`SubfieldCode::Element`] code are read as a number of
    /// elements of a representation code, both given by `element` from the
    /// subfields read before them.
    pub fn subfields<R, O>(
        &mut self,
        cx: &mut Context<'_, R, O>,
        d: Descriptor,
        table: &SubfieldTable,
        mut element: impl FnMut(&Subfields) -> (u8, u32),
    ) -> Result<Subfields, Error>
    where
        R: ReadRepresentation + ?Sized,
        O: Observer + ?Sized,
    {
        let role = cx.grammar.role_name(d.role);
        let start = self.offset;

        let mut fields: Subfields = Default::default();
        let mut undefined = 0;

        for bit in (0..5u8).rev() {
            if !d.has(bit) {
                continue;
            }

            let Some(subfield) = table[bit as usize] else {
                undefined |= 1 << bit;
                continue;
            };

            let value = match subfield.code {
                SubfieldCode::Fixed(code) => self.read(cx.reader, code, role, subfield.name)?,
                SubfieldCode::Element => {
                    let (code, count) = element(&fields);
                    self.elements(cx.reader, code, count, role, subfield.name)?
                }
            };

            fields[bit as usize] = Some(value);
        }

        if undefined != 0 {
            let warning = Warning::UndefinedCharacteristics {
                role: d.role,
                mask: undefined,
            };
            cx.observer.warning(start, warning);
        }

        Ok(fields)
    }

    fn elements<R: ReadRepresentation + ?Sized>(
        &mut self,
        reader: &R,
        code: u8,
        count: u32,
        role: &'static str,
        subfield: &'static str,
    ) -> Result<Value, Error> {
        Ok(match count {
            0 => Value::Absent,
            1 => self.read(reader, code, role, subfield)?,
            n => {
                let mut values = Vec::new();
                for _ in 0..n {
                    values.push(self.read(reader, code, role, subfield)?);
                }
                Value::List(values)
            }
        })
    }

    fn read<R: ReadRepresentation + ?Sized>(
        &mut self,
        reader: &R,
        code: u8,
        role: &'static str,
        subfield: &'static str,
    ) -> Result<Value, Error> {
        let r = &self.body[self.offset.min(self.body.len())..];

        let (value, n) = reader
            .read(code, r)
            .map_err(|err| Error::subfield(role, subfield, err))?;

        if n > r.len() {
            Err(Error::TruncatedRecord { role, subfield })?;
        }

        self.offset += n;

        Ok(value)
    }
}

/// Take a string subfield, if present.
pub(super) fn take_string(
    fields: &mut Subfields,
    bit: u8,
    role: &'static str,
    subfield: &'static str,
) -> Result<Option<String>, Error> {
    match fields[bit as usize].take() {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(unexpected(role, subfield)),
    }
}

/// Take an integer subfield, if present, converting it to `T`.
pub(super) fn take_integer<T: TryFrom<i64>>(
    fields: &mut Subfields,
    bit: u8,
    role: &'static str,
    subfield: &'static str,
) -> Result<Option<T>, Error> {
    match fields[bit as usize].take() {
        None => Ok(None),
        Some(Value::Integer(i)) => T::try_from(i)
            .map(Some)
            .map_err(|_| unexpected(role, subfield)),
        Some(_) => Err(unexpected(role, subfield)),
    }
}

fn unexpected(role: &'static str, subfield: &'static str) -> Error {
    Error::Decode {
        role,
        subfield,
        source: DecodeError::UnexpectedKind,
    }
}

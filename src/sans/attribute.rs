//! Decoding of attribute components, in either phase of a record.
//!
//! Before the first object, an attribute component defines a template column
//! and absent subfields take the defaults of RP66 V1 (count 1, code `IDENT`,
//! no units, no value). Afterwards, it supplies an object's attribute and
//! absent subfields take the values of the column it is aligned with.
//!
//! In both phases a count of zero leaves the attribute without a value.

use alloc::string::String;

use super::{
    Context,
    cursor::{Cursor, take_integer, take_string},
    descriptor::{Descriptor, Role},
    error::{Error, Malformed},
    grammar::attribute_bit as bit,
    observer::{Observer, Warning},
    representation::{ReadRepresentation, Value, code},
    template::AttributeSpec,
};

/// An attribute of an object, resolved against its template column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Label of the template column.
    pub label: String,
    pub count: u32,
    pub rep_code: u8,
    pub units: String,
    pub value: Value,
}

impl From<&AttributeSpec> for Attribute {
    fn from(column: &AttributeSpec) -> Self {
        Self {
            label: column.label.clone(),
            count: column.count,
            rep_code: column.rep_code,
            units: column.units.clone(),
            value: column.value.clone(),
        }
    }
}

/// The subfields an attribute component supplied.
struct Supplied {
    label: Option<String>,
    count: Option<u32>,
    rep_code: Option<u8>,
    units: Option<String>,
    value: Option<Value>,
}

fn decode_supplied<R, O>(
    cx: &mut Context<'_, R, O>,
    d: Descriptor,
    r: &mut Cursor<'_>,
    (fallback_code, fallback_count): (u8, u32),
) -> Result<Supplied, Error>
where
    R: ReadRepresentation + ?Sized,
    O: Observer + ?Sized,
{
    let grammar = cx.grammar;
    let role = grammar.role_name(d.role);

    let mut fields = r.subfields(cx, d, &grammar.attribute, |fields| {
        let supplied = |b: u8| fields[b as usize].as_ref().and_then(Value::as_integer);

        let code = supplied(bit::REP_CODE)
            .and_then(|c| u8::try_from(c).ok())
            .unwrap_or(fallback_code);
        let count = supplied(bit::COUNT)
            .and_then(|c| u32::try_from(c).ok())
            .unwrap_or(fallback_count);

        (code, count)
    })?;

    Ok(Supplied {
        label: take_string(&mut fields, bit::LABEL, role, "Label")?,
        count: take_integer(&mut fields, bit::COUNT, role, "Count")?,
        rep_code: take_integer(&mut fields, bit::REP_CODE, role, "RepCode")?,
        units: take_string(&mut fields, bit::UNITS, role, "Units")?,
        value: fields[bit::VALUE as usize].take(),
    })
}

/// Decode an attribute component preceding the first object, as a template
/// column.
pub(super) fn decode_column<R, O>(
    cx: &mut Context<'_, R, O>,
    d: Descriptor,
    r: &mut Cursor<'_>,
) -> Result<AttributeSpec, Error>
where
    R: ReadRepresentation + ?Sized,
    O: Observer + ?Sized,
{
    let supplied = decode_supplied(cx, d, r, (code::IDENT, 1))?;

    let Some(label) = supplied.label else {
        Err(Malformed::ColumnWithoutLabel)?
    };

    let count = supplied.count.unwrap_or(1);
    let value = match supplied.value {
        Some(value) if count != 0 => value,
        _ => Value::Absent,
    };

    Ok(AttributeSpec {
        label,
        count,
        rep_code: supplied.rep_code.unwrap_or(code::IDENT),
        units: supplied.units.unwrap_or_default(),
        value,
        is_invariant: d.role == Role::Invatr,
    })
}

/// Decode an attribute component of an object, aligned with `column`.
pub(super) fn decode_attribute<R, O>(
    cx: &mut Context<'_, R, O>,
    d: Descriptor,
    r: &mut Cursor<'_>,
    column: &AttributeSpec,
) -> Result<Attribute, Error>
where
    R: ReadRepresentation + ?Sized,
    O: Observer + ?Sized,
{
    if column.is_invariant || d.role == Role::Invatr {
        Err(Malformed::InvariantRedefined)?;
    }

    let supplied = decode_supplied(cx, d, r, (column.rep_code, column.count))?;

    let count = supplied.count.unwrap_or(column.count);
    let value = if count == 0 {
        Value::Absent
    } else {
        supplied.value.unwrap_or_else(|| column.value.clone())
    };

    Ok(Attribute {
        label: column.label.clone(),
        count,
        rep_code: supplied.rep_code.unwrap_or(column.rep_code),
        units: supplied.units.unwrap_or_else(|| column.units.clone()),
        value,
    })
}

/// Resolve an absent attribute component of an object, aligned with `column`.
///
/// The object supplies no value for the column. Absent attributes have no
/// subfields, so any characteristics bits are ignored.
pub(super) fn absent_attribute<R, O>(
    cx: &mut Context<'_, R, O>,
    d: Descriptor,
    r: &Cursor<'_>,
    column: &AttributeSpec,
) -> Attribute
where
    R: ReadRepresentation + ?Sized,
    O: Observer + ?Sized,
{
    if d.characteristics != 0 {
        let warning = Warning::AbsentCharacteristics(d.characteristics);
        cx.observer.warning(r.offset(), warning);
    }

    Attribute {
        value: Value::Absent,
        ..Attribute::from(column)
    }
}

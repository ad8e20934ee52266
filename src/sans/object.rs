//! States processing the objects of a record.

use alloc::vec::Vec;

use super::{
    Context,
    attribute::{Attribute, absent_attribute, decode_attribute},
    cursor::Cursor,
    descriptor::{Descriptor, Role},
    eflr::Eflr,
    error::{Error, Malformed},
    grammar::object_bit,
    observer::Observer,
    representation::{DecodeError, ObjectName, ReadRepresentation, Value},
};

/// An object (row) of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub name: ObjectName,
    /// One attribute per template column, in column order.
    pub attributes: Vec<Attribute>,
}

impl Object {
    /// The attribute of the column with a label.
    pub fn attribute(&self, label: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.label == label)
    }
}

/// State token to decode a component inside an object.
///
/// Attribute components are aligned with template columns in order; the next
/// object component closes the current object and opens another.
#[derive(Debug)]
pub struct BuildingObject {
    pub(super) column: usize,
}

impl BuildingObject {
    /// Transition to another state by decoding a component following an
    /// object.
    ///
    /// Returns a successor state token.
    pub fn advance<R, O>(
        self,
        cx: &mut Context<'_, R, O>,
        d: Descriptor,
        r: &mut Cursor<'_>,
        eflr: &mut Eflr,
    ) -> Result<BuildingObject, Error>
    where
        R: ReadRepresentation + ?Sized,
        O: Observer + ?Sized,
    {
        Ok(match d.role {
            Role::Object => {
                self.finish(eflr);
                open_object(cx, d, r, eflr)?
            }
            Role::Set | Role::Rdset | Role::Rset => Err(Malformed::MultipleSets)?,
            Role::Attrib | Role::Invatr | Role::Absent => {
                let Some(column) = eflr.template.get(self.column) else {
                    Err(Malformed::AttributeOverflow)?
                };

                let attribute = if d.role == Role::Absent {
                    absent_attribute(cx, d, r, column)
                } else {
                    decode_attribute(cx, d, r, column)?
                };

                if let Some(object) = eflr.objects.last_mut() {
                    object.attributes.push(attribute);
                }

                BuildingObject {
                    column: self.column + 1,
                }
            }
            // Skipped by the driver before reaching any state.
            Role::Reserved => self,
        })
    }

    /// Close the current object, giving columns it did not supply their
    /// template values.
    pub fn finish(self, eflr: &mut Eflr) {
        eflr.close_object();
    }
}

/// Decode an object component, opening a new object in `eflr`.
pub(super) fn open_object<R, O>(
    cx: &mut Context<'_, R, O>,
    d: Descriptor,
    r: &mut Cursor<'_>,
    eflr: &mut Eflr,
) -> Result<BuildingObject, Error>
where
    R: ReadRepresentation + ?Sized,
    O: Observer + ?Sized,
{
    let grammar = cx.grammar;
    let role = grammar.role_name(d.role);

    let mut fields = r.subfields(cx, d, &grammar.object, |_| (0, 0))?;

    let name = match fields[object_bit::NAME as usize].take() {
        Some(Value::StructuredName(name)) => name,
        Some(_) => Err(Error::Decode {
            role,
            subfield: "Name",
            source: DecodeError::UnexpectedKind,
        })?,
        None => Err(Malformed::ObjectWithoutName)?,
    };

    eflr.objects.push(Object {
        name,
        attributes: Vec::with_capacity(eflr.template.len()),
    });

    Ok(BuildingObject { column: 0 })
}

//! States processing the template of a record.

use alloc::{string::String, vec::Vec};

use either::Either::{self, Left, Right};

use super::{
    Context,
    attribute::decode_column,
    cursor::Cursor,
    descriptor::{Descriptor, Role},
    eflr::Eflr,
    error::{Error, Malformed},
    object::{BuildingObject, open_object},
    observer::Observer,
    representation::{ReadRepresentation, Value, code},
};

/// One column of a template: the specification, and defaults, of an attribute
/// shared by every object in the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    pub label: String,
    pub count: u32,
    pub rep_code: u8,
    pub units: String,
    pub value: Value,
    /// Whether the value is fixed for every object, and never supplied by one.
    pub is_invariant: bool,
}

impl AttributeSpec {
    /// A column with the default characteristics of RP66 V1.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            count: 1,
            rep_code: code::IDENT,
            units: String::new(),
            value: Value::Absent,
            is_invariant: false,
        }
    }
}

/// The ordered columns shared by every object in a set.
///
/// Columns can only be added before the first object, after which the
/// template is frozen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    columns: Vec<AttributeSpec>,
}

impl Template {
    pub fn columns(&self) -> &[AttributeSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&AttributeSpec> {
        self.columns.get(i)
    }

    /// Index of the column with a label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }
}

/// State token to decode a template column, or the first object freezing the
/// template.
#[derive(Debug)]
pub struct BuildingTemplate(pub(super) ());

impl BuildingTemplate {
    /// Transition to another state by decoding a component following the set.
    ///
    /// Attribute components append a column to the template of `eflr`. An
    /// object component freezes the template and opens the first object.
    ///
    /// Returns a successor state token.
    pub fn advance<R, O>(
        self,
        cx: &mut Context<'_, R, O>,
        d: Descriptor,
        r: &mut Cursor<'_>,
        eflr: &mut Eflr,
    ) -> Result<Either<BuildingTemplate, BuildingObject>, Error>
    where
        R: ReadRepresentation + ?Sized,
        O: Observer + ?Sized,
    {
        Ok(match d.role {
            Role::Attrib | Role::Invatr => {
                let column = decode_column(cx, d, r)?;
                eflr.template.columns.push(column);
                Left(self)
            }
            Role::Object => Right(open_object(cx, d, r, eflr)?),
            Role::Absent => Err(Malformed::AbsentOutsideObject)?,
            Role::Set | Role::Rdset | Role::Rset => Err(Malformed::MultipleSets)?,
            // Skipped by the driver before reaching any state.
            Role::Reserved => Left(self),
        })
    }
}

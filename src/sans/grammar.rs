//! Tables giving each characteristics bit its meaning, per role.
//!
//! A [`Grammar`] is plain immutable data. Decoders borrow one through a
//! [`super::Context`], so alternative tables can be substituted without
//! touching decoding logic.

use super::{descriptor::Role, representation::code};

/// Characteristics bits of set components.
pub mod set_bit {
    pub const TYPE: u8 = 4;
    pub const NAME: u8 = 3;
}

/// Characteristics bits of object components.
pub mod object_bit {
    pub const NAME: u8 = 4;
}

/// Characteristics bits of attribute components.
pub mod attribute_bit {
    pub const LABEL: u8 = 4;
    pub const COUNT: u8 = 3;
    pub const REP_CODE: u8 = 2;
    pub const UNITS: u8 = 1;
    pub const VALUE: u8 = 0;
}

/// How the representation code of a subfield is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubfieldCode {
    /// Always this code.
    Fixed(u8),
    /// Count elements of a code resolved while decoding (attribute values).
    Element,
}

/// The meaning of one characteristics bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subfield {
    pub name: &'static str,
    pub code: SubfieldCode,
}

impl Subfield {
    const fn fixed(name: &'static str, code: u8) -> Option<Self> {
        Some(Self {
            name,
            code: SubfieldCode::Fixed(code),
        })
    }
}

/// Subfields indexed by characteristics bit.
pub type SubfieldTable = [Option<Subfield>; 5];

/// Role names and subfield tables for every component role.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub role_names: [&'static str; 8],
    pub set: SubfieldTable,
    pub object: SubfieldTable,
    pub attribute: SubfieldTable,
}

impl Grammar {
    /// The component grammar of RP66 V1, section 3.2.2.
    pub const RP66_V1: Grammar = Grammar {
        role_names: [
            "ABSATR", "ATTRIB", "INVATR", "OBJECT", "reserved", "RDSET", "RSET", "SET",
        ],
        set: [
            None,
            None,
            None,
            Subfield::fixed("Name", code::IDENT),
            Subfield::fixed("Type", code::IDENT),
        ],
        object: [
            None,
            None,
            None,
            None,
            Subfield::fixed("Name", code::OBNAME),
        ],
        attribute: [
            Some(Subfield {
                name: "Value",
                code: SubfieldCode::Element,
            }),
            Subfield::fixed("Units", code::UNITS),
            Subfield::fixed("RepCode", code::USHORT),
            Subfield::fixed("Count", code::UVARI),
            Subfield::fixed("Label", code::IDENT),
        ],
    };

    pub fn role_name(&self, role: Role) -> &'static str {
        self.role_names[role as usize]
    }

    /// The subfield table used by components of `role`, if it has one.
    pub fn table(&self, role: Role) -> Option<&SubfieldTable> {
        match role {
            Role::Set | Role::Rdset | Role::Rset => Some(&self.set),
            Role::Object => Some(&self.object),
            Role::Attrib | Role::Invatr => Some(&self.attribute),
            Role::Absent | Role::Reserved => None,
        }
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::RP66_V1
    }
}

/// Name an EFLR logical record type, for diagnostics.
pub fn describe_record_type(code: u8) -> &'static str {
    match code {
        0 => "FHLR (File Header)",
        1 => "OLR (Origin)",
        2 => "AXIS (Coordinate Axis)",
        3 => "CHANNL (Channel-related information)",
        4 => "FRAME (Frame Data)",
        5 => "STATIC (Static Data)",
        6 => "SCRIPT (Textual Data)",
        7 => "UPDATE (Update Data)",
        8 => "UDI (Unformatted Data Identifier)",
        9 => "LNAME (Long Name)",
        10 => "SPEC (Specification)",
        11 => "DICT (Dictionary)",
        12..=127 => "Undefined (reserved)",
        _ => "Private",
    }
}

//! Component descriptors.

use tartan_bitfield::bitfield;

/// The role of a component, held in the three high bits of its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Role {
    /// Absent attribute (`000`).
    Absent = 0,
    /// Attribute (`001`).
    Attrib = 1,
    /// Invariant attribute (`010`).
    Invatr = 2,
    /// Object (`011`).
    Object = 3,
    /// Reserved (`100`).
    Reserved = 4,
    /// Redundant set (`101`).
    Rdset = 5,
    /// Replacement set (`110`).
    Rset = 6,
    /// Set (`111`).
    Set = 7,
}

impl Role {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Absent,
            1 => Self::Attrib,
            2 => Self::Invatr,
            3 => Self::Object,
            4 => Self::Reserved,
            5 => Self::Rdset,
            6 => Self::Rset,
            _ => Self::Set,
        }
    }

    /// Whether this role opens a set (`SET`, `RDSET` or `RSET`).
    pub fn is_set(self) -> bool {
        matches!(self, Self::Set | Self::Rdset | Self::Rset)
    }

    /// Whether this role describes an attribute (`ATTRIB`, `INVATR` or `ABSATR`).
    pub fn is_attribute(self) -> bool {
        matches!(self, Self::Attrib | Self::Invatr | Self::Absent)
    }
}

/// The first byte of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub role: Role,
    /// Subfield presence flags, bits 4 through 0.
    pub characteristics: u8,
}

impl Descriptor {
    /// Split a descriptor byte into its role and characteristics.
    pub fn decode(r: u8) -> Self {
        bitfield! {
            struct RawDescriptor(u8) {
                [0..5] characteristics: u8,
                [5..8] role: u8,
            }
        }

        let raw = RawDescriptor(r);

        Self {
            role: Role::from_bits(raw.role()),
            characteristics: raw.characteristics(),
        }
    }

    /// Whether the subfield flagged by characteristics bit `bit` is present.
    pub fn has(&self, bit: u8) -> bool {
        self.characteristics & (1 << bit) != 0
    }
}

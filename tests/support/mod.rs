#![allow(dead_code)]

use eflr::sans::{
    descriptor::Descriptor,
    observer::{Observer, Warning},
};

pub const ABSATR: u8 = 0b000 << 5;
pub const ATTRIB: u8 = 0b001 << 5;
pub const INVATR: u8 = 0b010 << 5;
pub const OBJECT: u8 = 0b011 << 5;
pub const RESERVED: u8 = 0b100 << 5;
pub const RDSET: u8 = 0b101 << 5;
pub const RSET: u8 = 0b110 << 5;
pub const SET: u8 = 0b111 << 5;

pub const SET_TYPE: u8 = 1 << 4;
pub const SET_NAME: u8 = 1 << 3;
pub const OBJECT_NAME: u8 = 1 << 4;

pub const LABEL: u8 = 1 << 4;
pub const COUNT: u8 = 1 << 3;
pub const REP_CODE: u8 = 1 << 2;
pub const UNITS: u8 = 1 << 1;
pub const VALUE: u8 = 1 << 0;

/// Assembles an EFLR body byte by byte.
#[derive(Debug, Default, Clone)]
pub struct Body(pub Vec<u8>);

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn byte(mut self, b: u8) -> Self {
        self.0.push(b);
        self
    }

    pub fn ident(mut self, s: &str) -> Self {
        self.0.push(s.len() as u8);
        self.0.extend_from_slice(s.as_bytes());
        self
    }

    pub fn uvari(mut self, n: u32) -> Self {
        if n < 0x80 {
            self.0.push(n as u8);
        } else if n < 0x4000 {
            self.0.extend_from_slice(&(n as u16 | 0x8000).to_be_bytes());
        } else {
            self.0.extend_from_slice(&(n | 0xC000_0000).to_be_bytes());
        }
        self
    }

    pub fn obname(self, origin: u32, copy: u8, identifier: &str) -> Self {
        self.uvari(origin).byte(copy).ident(identifier)
    }

    /// A set component with a type and name.
    pub fn set(self, role: u8, set_type: &str, name: &str) -> Self {
        self.byte(role | SET_TYPE | SET_NAME).ident(set_type).ident(name)
    }

    /// An object component with a name.
    pub fn object(self, origin: u32, copy: u8, identifier: &str) -> Self {
        self.byte(OBJECT | OBJECT_NAME).obname(origin, copy, identifier)
    }

    /// An attribute component with only a label.
    pub fn column(self, label: &str) -> Self {
        self.byte(ATTRIB | LABEL).ident(label)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Observer keeping every warning.
#[derive(Debug, Default)]
pub struct Recorder {
    pub components: Vec<(usize, Descriptor)>,
    pub warnings: Vec<(usize, Warning)>,
    pub records: Vec<Option<&'static str>>,
}

impl Observer for Recorder {
    fn record(&mut self, record_type: Option<&'static str>) {
        self.records.push(record_type);
    }
    fn component(&mut self, offset: usize, descriptor: Descriptor) {
        self.components.push((offset, descriptor));
    }
    fn warning(&mut self, offset: usize, warning: Warning) {
        self.warnings.push((offset, warning));
    }
}

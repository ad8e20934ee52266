//! Diagnostics emitted while decoding.

use super::descriptor::{Descriptor, Role};

/// A recoverable irregularity. Decoding continues after each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// A component with the reserved role was skipped, assuming it has no
    /// subfields.
    ReservedRole,
    /// An absent attribute carried characteristics bits, which were ignored.
    AbsentCharacteristics(u8),
    /// Characteristics bits with no meaning for the role were ignored.
    UndefinedCharacteristics { role: Role, mask: u8 },
    /// A redundant set was found with no open set to compare it against.
    UnmatchedRedundantSet,
}

/// Receive diagnostics while decoding.
///
/// The default implementation of each method ignores what it receives.
#[allow(unused_variables)]
pub trait Observer {
    /// Decoding of a record begins. The record type is named when known.
    fn record(&mut self, record_type: Option<&'static str>) {}
    /// A component starts at byte `offset` of the body.
    fn component(&mut self, offset: usize, descriptor: Descriptor) {}
    /// A warning arose at byte `offset` of the body.
    fn warning(&mut self, offset: usize, warning: Warning) {}
}

impl Observer for () {}

impl<T: Observer + ?Sized> Observer for &mut T {
    fn record(&mut self, record_type: Option<&'static str>) {
        (**self).record(record_type)
    }
    fn component(&mut self, offset: usize, descriptor: Descriptor) {
        (**self).component(offset, descriptor)
    }
    fn warning(&mut self, offset: usize, warning: Warning) {
        (**self).warning(offset, warning)
    }
}

//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals. See [`crate::avec`] for implementations covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! An EFLR body is a stream of components. Each component opens with a
//! descriptor byte (see [`descriptor`]) whose three high bits select a role
//! and whose five low bits flag which subfields follow. A component's length
//! is only known once it has been decoded, so components are consumed strictly
//! in order.
//!
//! All states are represented by a zero-size, non-copy token. Once the
//! descriptor of the next component has been taken from a [`cursor::Cursor`],
//! transition to another state by calling the token's `advance` method. This
//! consumes the rest of the component and returns a successor state token.
//!
//! - [`set::ExpectSet`] accepts the single Set component opening the record.
//! - [`template::BuildingTemplate`] appends a column per attribute component,
//!   until the first Object freezes the template.
//! - [`object::BuildingObject`] aligns attribute components with template
//!   columns, one Object at a time.
//!
//! Decoded data is accumulated in an [`eflr::Eflr`] owned by the caller, so a
//! partially built record survives a failure. Primitive values are read
//! through the [`representation::ReadRepresentation`] trait, and the meaning
//! of each characteristics bit is looked up in a [`grammar::Grammar`], both
//! injected through a [`Context`].
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! Some areas of the decoding process are not represented in the
//! finite-state machine and must be carefully written:
//!
//! - Skipping components with the reserved role (see
//!   [`observer::Warning::ReservedRole`]).
//!
//! - Closing the last Object once the body is exhausted, with
//!   [`object::BuildingObject::finish`].
//!
//! Implementers are recommended to begin by studying and modifying the decoder
//! in the [`crate::avec::slice`] module.

pub mod attribute;
pub mod cursor;
pub mod descriptor;
pub mod eflr;
pub mod error;
pub mod grammar;
pub mod object;
pub mod observer;
pub mod representation;
pub mod set;
pub mod template;

use grammar::Grammar;
use observer::Observer;
use representation::ReadRepresentation;

/// Entrypoint to the finite-state machine.
pub type Decoder = set::ExpectSet;

/// Collaborators shared by every state transition.
pub struct Context<'a, R: ?Sized, O: ?Sized> {
    /// Per-role subfield tables.
    pub grammar: &'a Grammar,
    /// Decoder for primitive values.
    pub reader: &'a R,
    /// Receiver of diagnostics.
    pub observer: &'a mut O,
}

impl<'a, R, O> Context<'a, R, O>
where
    R: ReadRepresentation + ?Sized,
    O: Observer + ?Sized,
{
    pub fn new(grammar: &'a Grammar, reader: &'a R, observer: &'a mut O) -> Self {
        Self {
            grammar,
            reader,
            observer,
        }
    }
}

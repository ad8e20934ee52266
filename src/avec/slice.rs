//! Slice-based decoder implementation.

use core::sync::atomic::{AtomicBool, Ordering};

use either::Either::{self, Left, Right};
use thiserror::Error;

use crate::sans::{
    Context,
    cursor::Cursor,
    descriptor::{Descriptor, Role},
    eflr::Eflr,
    error::{Error, Malformed},
    grammar::{Grammar, describe_record_type},
    object::BuildingObject,
    observer::{Observer, Warning},
    representation::{ReadRepresentation, Standard},
    set::{ExpectSet, Set},
    template::BuildingTemplate,
};

use super::FromObjects;

static RP66_V1: Grammar = Grammar::RP66_V1;

/// A failure decoding a record, with whatever was decoded before it.
///
/// The partial record is present once the set has been decoded. Its last
/// object is completed with template values, so every object still has one
/// attribute per column.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Failure {
    #[source]
    pub error: Error,
    pub partial: Option<Eflr>,
}

/// Settings for decoding a record.
#[derive(Debug, Clone, Copy)]
pub struct Options<'a> {
    /// Per-role subfield tables.
    pub grammar: &'a Grammar,
    /// The set a redundant set must match.
    pub open_set: Option<&'a Set>,
    /// When set, decoding stops before the next component.
    pub cancel: Option<&'a AtomicBool>,
    /// Logical record type, passed to the observer.
    pub record_type: Option<u8>,
}

impl Default for Options<'_> {
    fn default() -> Self {
        Self {
            grammar: &RP66_V1,
            open_set: None,
            cancel: None,
            record_type: None,
        }
    }
}

/// Decode the body of a record with the standard representation codes.
///
/// This method is also re-exported as `eflr::avec::decode_slice`.
pub fn decode(r: &[u8]) -> Result<Eflr, Failure> {
    decode_with(r, &Standard, &mut (), &Options::default())
}

/// Decode the body of a record, publishing its objects to a receiver.
pub fn decode_into(r: &[u8], o: &mut impl FromObjects) -> Result<(), Failure> {
    let eflr = decode(r)?;
    publish(&eflr, o);
    Ok(())
}

/// Publish the objects of a decoded record to a receiver.
pub fn publish(eflr: &Eflr, o: &mut impl FromObjects) {
    for object in &eflr.objects {
        let Some(o) = o.add_object(&eflr.set.set_type) else {
            continue;
        };

        o.add_name(&object.name);

        for attribute in &object.attributes {
            o.add_attribute(&attribute.label, attribute);
        }
    }
}

/// Decode the body of a record with a given representation reader and
/// observer.
pub fn decode_with<R, O>(
    r: &[u8],
    reader: &R,
    observer: &mut O,
    options: &Options<'_>,
) -> Result<Eflr, Failure>
where
    R: ReadRepresentation + ?Sized,
    O: Observer + ?Sized,
{
    let cx = &mut Context::new(options.grammar, reader, observer);
    let r = &mut Cursor::new(r);

    cx.observer.record(options.record_type.map(describe_record_type));

    let fail = |error: Error, partial: Option<Eflr>| Failure { error, partial };

    if is_cancelled(options) {
        return Err(fail(Error::Cancelled, None));
    }

    let Some(d) = next(cx, r) else {
        return Err(fail(Malformed::MissingLeadingSet.into(), None));
    };

    let (set, state) = ExpectSet
        .advance(cx, d, r, options.open_set)
        .map_err(|err| fail(err, None))?;

    let mut eflr = Eflr::new(set);
    let mut state: Either<BuildingTemplate, BuildingObject> = Left(state);

    loop {
        if is_cancelled(options) {
            eflr.close_object();
            return Err(fail(Error::Cancelled, Some(eflr)));
        }

        let Some(d) = next(cx, r) else {
            break;
        };

        let successor = match state {
            Left(s) => s.advance(cx, d, r, &mut eflr),
            Right(s) => s.advance(cx, d, r, &mut eflr).map(Right),
        };

        state = match successor {
            Ok(state) => state,
            Err(err) => {
                eflr.close_object();
                return Err(fail(err, Some(eflr)));
            }
        };
    }

    if let Right(state) = state {
        state.finish(&mut eflr);
    }

    Ok(eflr)
}

/// Take the descriptor of the next component, skipping those with the
/// reserved role.
fn next<R, O>(cx: &mut Context<'_, R, O>, r: &mut Cursor<'_>) -> Option<Descriptor>
where
    R: ReadRepresentation + ?Sized,
    O: Observer + ?Sized,
{
    loop {
        let offset = r.offset();
        let d = r.descriptor()?;

        cx.observer.component(offset, d);

        if d.role != Role::Reserved {
            return Some(d);
        }

        // TODO: Check the length of reserved-role components against RP66 V1 3.2.2.1.
        cx.observer.warning(offset, Warning::ReservedRole);
    }
}

fn is_cancelled(options: &Options<'_>) -> bool {
    options.cancel.is_some_and(|c| c.load(Ordering::Relaxed))
}

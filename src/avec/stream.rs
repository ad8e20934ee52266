//! Records of one logical file, with redundant and replacement sets applied.

use alloc::vec::Vec;

use crate::sans::{
    eflr::Eflr,
    observer::Observer,
    representation::{ReadRepresentation, Standard},
    set::{Set, SetKind},
};

use super::slice::{Failure, Options, decode_with};

/// The sets decoded from successive records of a logical file.
///
/// The set of the most recent record is open: a redundant set in the next
/// record must match it. Objects of a redundant set are only kept if not
/// already present. A replacement set supersedes the template of the set with
/// the same type and name, and replaces each of its objects with the same name.
/// Objects it does not name are re-aligned with the new template by label.
#[derive(Debug, Clone, Default)]
pub struct Stream {
    sets: Vec<Eflr>,
    open: Option<Set>,
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the body of the next record with the standard representation
    /// codes.
    pub fn push(&mut self, r: &[u8]) -> Result<(), Failure> {
        self.push_with(r, &Standard, &mut (), &Options::default())
    }

    /// Decode the body of the next record. The open set of `options` is
    /// replaced with that of the stream.
    pub fn push_with<R, O>(
        &mut self,
        r: &[u8],
        reader: &R,
        observer: &mut O,
        options: &Options<'_>,
    ) -> Result<(), Failure>
    where
        R: ReadRepresentation + ?Sized,
        O: Observer + ?Sized,
    {
        let options = Options {
            open_set: self.open.as_ref(),
            ..*options
        };

        let eflr = decode_with(r, reader, observer, &options)?;

        self.open = Some(eflr.set.clone());
        self.merge(eflr);

        Ok(())
    }

    fn merge(&mut self, eflr: Eflr) {
        let kind = eflr.set.kind;

        let existing = match kind {
            SetKind::Set => None,
            _ => self.sets.iter_mut().rev().find(|e| e.set.same_identity(&eflr.set)),
        };

        let Some(entry) = existing else {
            self.sets.push(eflr);
            return;
        };

        if kind == SetKind::Replacement {
            entry.replace_template(eflr.template);
        }

        for object in eflr.objects {
            match entry.objects.iter_mut().find(|o| o.name == object.name) {
                Some(existing) if kind == SetKind::Replacement => *existing = object,
                Some(_) => {}
                None => entry.objects.push(object),
            }
        }
    }

    /// Sets in the order they were first decoded.
    pub fn sets(&self) -> &[Eflr] {
        &self.sets
    }

    /// The most recent set with a type and name.
    pub fn get(&self, set_type: &str, name: &str) -> Option<&Eflr> {
        self.sets
            .iter()
            .rev()
            .find(|e| e.set.set_type == set_type && e.set.name == name)
    }

    /// The set a redundant set in the next record must match.
    pub fn open_set(&self) -> Option<&Set> {
        self.open.as_ref()
    }

    pub fn into_sets(self) -> Vec<Eflr> {
        self.sets
    }
}

//! States processing the set component opening a record.

use alloc::string::String;

use super::{
    Context,
    cursor::{Cursor, take_string},
    descriptor::{Descriptor, Role},
    error::{Error, Malformed},
    grammar::set_bit,
    observer::{Observer, Warning},
    representation::ReadRepresentation,
    template::BuildingTemplate,
};

/// Which set role opened a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SetKind {
    #[default]
    Set,
    /// A copy of a set appearing earlier in the same logical file.
    Redundant,
    /// A set superseding objects of an earlier set of the same identity.
    Replacement,
}

/// The set heading a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Set {
    pub kind: SetKind,
    /// Type of the objects in the set, for example `CHANNEL`.
    pub set_type: String,
    pub name: String,
}

impl Set {
    /// Whether two sets share a type and name, whatever their kind.
    pub fn same_identity(&self, other: &Set) -> bool {
        self.set_type == other.set_type && self.name == other.name
    }

    fn identity(&self) -> (String, String) {
        (self.set_type.clone(), self.name.clone())
    }
}

/// State token to decode the set component opening a record.
#[derive(Debug)]
pub struct ExpectSet;

impl ExpectSet {
    /// Transition to another state by decoding a set component.
    ///
    /// `open` is the set a redundant set must match, if one is known.
    ///
    /// Returns the set, and a successor state token.
    pub fn advance<R, O>(
        self,
        cx: &mut Context<'_, R, O>,
        d: Descriptor,
        r: &mut Cursor<'_>,
        open: Option<&Set>,
    ) -> Result<(Set, BuildingTemplate), Error>
    where
        R: ReadRepresentation + ?Sized,
        O: Observer + ?Sized,
    {
        if !d.role.is_set() {
            Err(Malformed::MissingLeadingSet)?;
        }

        let start = r.offset();
        let grammar = cx.grammar;
        let role = grammar.role_name(d.role);

        let mut fields = r.subfields(cx, d, &grammar.set, |_| (0, 0))?;

        let set_type = match take_string(&mut fields, set_bit::TYPE, role, "Type")? {
            Some(set_type) => set_type,
            None => Err(Malformed::SetWithoutType)?,
        };
        let name = take_string(&mut fields, set_bit::NAME, role, "Name")?.unwrap_or_default();

        let kind = match d.role {
            Role::Rdset => SetKind::Redundant,
            Role::Rset => SetKind::Replacement,
            _ => SetKind::Set,
        };

        let set = Set {
            kind,
            set_type,
            name,
        };

        if kind == SetKind::Redundant {
            match open {
                Some(open) if !open.same_identity(&set) => {
                    Err(Error::InconsistentRedundantSet {
                        open: open.identity(),
                        found: set.identity(),
                    })?;
                }
                Some(_) => {}
                None => cx.observer.warning(start, Warning::UnmatchedRedundantSet),
            }
        }

        Ok((set, BuildingTemplate(())))
    }
}

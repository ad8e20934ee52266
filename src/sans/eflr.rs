//! The decoded form of a record.

use alloc::vec::Vec;

use super::{attribute::Attribute, object::Object, set::Set, template::Template};

/// An Explicitly Formatted Logical Record: one set, its template, and its
/// objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eflr {
    pub set: Set,
    pub template: Template,
    pub objects: Vec<Object>,
}

impl Eflr {
    /// An empty record headed by `set`.
    pub fn new(set: Set) -> Self {
        Self {
            set,
            template: Template::default(),
            objects: Vec::new(),
        }
    }

    /// The object with an identifier, if any.
    pub fn object(&self, identifier: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.name.identifier == identifier)
    }

    /// Give the last object the template values of the columns it did not
    /// supply.
    pub(crate) fn close_object(&mut self) {
        let Self {
            template, objects, ..
        } = self;

        if let Some(object) = objects.last_mut() {
            let supplied = object.attributes.len();
            let defaults = template.columns().iter().skip(supplied);
            object.attributes.extend(defaults.map(Attribute::from));
        }
    }

    /// Supersede the template, re-aligning every object with the new columns.
    ///
    /// Attributes are matched to columns by label. Columns an object has no
    /// attribute for take their template values, and attributes of removed
    /// columns are dropped.
    pub(crate) fn replace_template(&mut self, template: Template) {
        for object in &mut self.objects {
            let mut previous = core::mem::take(&mut object.attributes);

            object.attributes = template
                .columns()
                .iter()
                .map(|column| match previous.iter().position(|a| a.label == column.label) {
                    Some(i) => previous.swap_remove(i),
                    None => Attribute::from(column),
                })
                .collect();
        }

        self.template = template;
    }
}

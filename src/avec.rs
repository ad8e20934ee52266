//! Convenience interfaces for common decoding patterns.
//!
//! The functions in [`slice`] decode one record body into an [`Eflr`], or
//! publish its objects to the [`FromObjects`] and [`FromObject`] traits. The
//! [`stream`] module keeps the records of a logical file together, applying
//! redundant and replacement sets.
//!
//! In many cases (when objects are of a known shape), the receiver traits can
//! be derived. See the [`FromObjects`](macro@FromObjects) and
//! [`FromObject`](macro@FromObject) macros for details.
//!
//! [`Eflr`]: crate::Eflr

pub mod slice;
pub mod stream;

use alloc::{string::String, vec::Vec};

pub use crate::sans::{
    attribute::Attribute,
    representation::{ObjectName, Value},
};
pub use slice::{decode as decode_slice, decode_into};
pub use stream::Stream;

/// Derive [`FromObjects`] for a struct holding a collection of objects.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single object, add the `set("TYPE")` attribute to an
/// `Option<T>` struct field, where `TYPE` is the set type and `T` is a type
/// implementing [`FromObject`] and [`Default`]. Additional objects received
/// for the same set type will overwrite earlier ones. To collect multiple
/// objects, apply the attribute to a `Vec<T>` instead. A field may receive
/// objects of several set types, each listed once across the struct.
///
/// ```
/// #[derive(Debug, Default, FromObjects)]
/// struct Logical {
///     #[set("ORIGIN")]
///     origin: Option<Origin>,
///     #[set("CHANNEL")]
///     channels: Vec<Channel>,
///     #[set("PARAMETER", "EQUIPMENT")]
///     properties: Vec<Property>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use eflr_derive::FromObjects;

/// Produce object receivers for a record.
///
/// See the [`FromObjects`](macro@FromObjects) derive macro for an automatic
/// implementation of this trait.
pub trait FromObjects {
    /// Retrieve a receiver for an object of a set type, if one exists.
    fn add_object(&mut self, set_type: &str) -> Option<&mut dyn FromObject>;
}

/// Derive [`FromObject`] for a struct representing a single object.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive the value of an attribute, add the `attribute("LABEL")`
/// attribute to an `Option<T>` struct field, where `LABEL` is the template
/// column label and `T` implements [`FromValue`]. To receive the object name,
/// add `name` to an `Option<ObjectName>` field.
///
/// ```
/// #[derive(Debug, Default, FromObject)]
/// struct Channel {
///     #[name]
///     name: Option<ObjectName>,
///     #[attribute("LONG-NAME")]
///     long_name: Option<String>,
///     #[attribute("DIMENSION")]
///     dimension: Option<Vec<i64>>,
/// }
/// ```
///
/// To receive units or other characteristics, supply a handler closure. The
/// second argument receives the resolved [`Attribute`].
///
/// ```
/// #[derive(Debug, Default, FromObject)]
/// struct Parameter {
///     #[attribute("VALUES", |v, a: &Attribute| *v = (a.units.clone(), a.count))]
///     values: (String, u32),
/// }
/// ```
#[cfg(feature = "derive")]
pub use eflr_derive::FromObject;

/// Receive the name and attributes of an object.
///
/// Attributes are published in template column order, after the name. The
/// default implementation of each method ignores received values.
///
/// See the [`FromObject`](macro@FromObject) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromObject {
    /// Add the object name.
    fn add_name(&mut self, name: &ObjectName) {}
    /// Add the attribute of the template column labelled `label`.
    fn add_attribute(&mut self, label: &str, attribute: &Attribute) {}
}

/// Convert an attribute value to a Rust type, if it holds one.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        (!value.is_absent()).then(|| value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromValue for ObjectName {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::StructuredName(name) => Some(name.clone()),
            _ => None,
        }
    }
}

macro_rules! from_value_integer {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    value.as_integer().and_then(|i| <$t>::try_from(i).ok())
                }
            }
        )*
    };
}

from_value_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Every element of a value; a single element is a list of one.
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Absent => None,
            Value::List(values) => values.iter().map(T::from_value).collect(),
            value => T::from_value(value).map(|v| alloc::vec![v]),
        }
    }
}

/// Observer forwarding diagnostics to the `log` facade.
///
/// _Requires Cargo feature `log`._
#[cfg(feature = "log")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

#[cfg(feature = "log")]
impl crate::sans::observer::Observer for LogObserver {
    fn record(&mut self, record_type: Option<&'static str>) {
        log::debug!("Decoding EFLR of type {}", record_type.unwrap_or("unknown"));
    }

    fn component(&mut self, offset: usize, descriptor: crate::sans::descriptor::Descriptor) {
        log::trace!("Component at {offset}: {descriptor:?}");
    }

    fn warning(&mut self, offset: usize, warning: crate::sans::observer::Warning) {
        log::warn!("At byte {offset} of EFLR body: {warning:?}");
    }
}

//! sievelet – composable predicate sifting and template stamping over typed records.
//!
//! The crate centers on two small, independent pieces:
//! * A [`construct::Item`] is a flat record of named, typed attributes
//!   ([`datatype::Value`]) with no identity beyond attribute equality.
//! * A [`predicate::Predicate`] is a pure boolean criterion over an item:
//!   an attribute/value equality, or the conjunction of other predicates.
//!   [`predicate::Predicate::sift`] applies one lazily to any item
//!   sequence, preserving input order.
//! * A [`construct::Record`] is a nested entity shape whose fields are
//!   leaf values or further records, owned outright with no internal
//!   sharing.
//! * A [`construct::TemplateKeeper`] owns canonical records under string
//!   keys and stamps out independent deep copies with field overrides
//!   applied, so no stamped record can alias the template or a sibling.
//!
//! ## Modules
//! * [`construct`] – Items, records, field paths and the template keeper.
//! * [`datatype`] – The closed [`datatype::Value`] sum of attribute/field
//!   value types (text, integer, boolean, decimal, date).
//! * [`predicate`] – The predicate sum type, evaluation and lazy sifting.
//! * [`selector`] – A small textual syntax that denotes predicates
//!   (grammar in `selector.pest`).
//! * [`error`] – The crate error enum and `Result` alias.
//!
//! ## Quick Start
//! ```
//! use sievelet::construct::{Item, Record, TemplateKeeper};
//! use sievelet::predicate::Predicate;
//!
//! let apple = Item::new().with("name", "Apple").with("color", "green");
//! let tree = Item::new().with("name", "Tree").with("color", "green");
//! let green = Predicate::equals("color", "green");
//! let matching: Vec<_> = green
//!     .sift(vec![&apple, &tree])
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(matching.len(), 2);
//!
//! let mut keeper = TemplateKeeper::new();
//! keeper
//!     .keep(
//!         "office",
//!         Record::new().with_value("name", "").with_record(
//!             "address",
//!             Record::new()
//!                 .with_value("street", "123 East Dr")
//!                 .with_value("suite", 0),
//!         ),
//!     )
//!     .unwrap();
//! let john = keeper
//!     .stamp("office", &[("name", "John".into()), ("address.suite", 101.into())])
//!     .unwrap();
//! assert_eq!(
//!     john.to_string(),
//!     r#"{name: "John", address: {street: "123 East Dr", suite: 101}}"#
//! );
//! ```
//!
//! ## Errors
//! Everything that can fail does so synchronously through
//! [`error::SieveletError`]; nothing is retried or swallowed internally,
//! so every failure is recoverable at the call site.

pub mod construct;
pub mod datatype;
pub mod error;
pub mod predicate;
pub mod selector;

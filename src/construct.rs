use std::sync::Arc;

// string-keyed maps use a fast hashing algo, since keys are never secrets
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

// used to print out readable forms of a construct
use std::fmt;

use tracing::{debug, trace};

// our own stuff that we need
use crate::datatype::Value;
use crate::error::{Result, SieveletError};

pub type KeyHasher = BuildHasherDefault<SeaHasher>;

// ------------- Item -------------
// A flat record of named attributes. Items carry no identity beyond
// attribute equality and are immutable once built, so evaluating a
// predicate against one can never change it.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Item {
    attributes: HashMap<String, Value, KeyHasher>,
}

impl Item {
    pub fn new() -> Self {
        Self {
            attributes: HashMap::default(),
        }
    }
    /// Adds an attribute while building; the last write for a name wins.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.attributes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // attribute storage is unordered, so print names sorted
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        let mut s = String::new();
        for name in names {
            s += &format!("{}: {}, ", name, self.attributes[name]);
        }
        s.pop();
        s.pop();
        write!(f, "{{{}}}", s)
    }
}

// ------------- Record -------------
/// A named field inside a [`Record`]: either a leaf value or a nested record.
#[derive(PartialEq, Eq, Debug)]
pub enum Field {
    Value(Value),
    Record(Record),
}
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::Value(value) => write!(f, "{}", value),
            Field::Record(record) => write!(f, "{}", record),
        }
    }
}

/// A nested entity shape, fields kept in declaration order.
///
/// A record owns its fields outright. There is no shared ownership inside
/// the tree, so no copy of a record can alias another's nested state.
#[derive(PartialEq, Eq, Debug)]
pub struct Record {
    fields: Vec<(String, Field)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }
    /// Adds a leaf field while building; re-declaring a name replaces it.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(name.into(), Field::Value(value.into()));
        self
    }
    /// Adds a nested record field while building.
    pub fn with_record(mut self, name: impl Into<String>, record: Record) -> Self {
        self.put(name.into(), Field::Record(record));
        self
    }
    fn put(&mut self, name: String, field: Field) {
        match self.fields.iter().position(|(n, _)| n.as_str() == name) {
            Some(i) => self.fields[i].1 = field,
            None => self.fields.push((name, field)),
        }
    }
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, field)| field)
    }
    fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, field)| field)
    }
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(n, field)| (n.as_str(), field))
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
    /// Returns the leaf value addressed by `path`, if the path resolves.
    pub fn value_at(&self, path: &FieldPath) -> Option<&Value> {
        let mut record = self;
        let mut segments = path.segments().iter().peekable();
        while let Some(segment) = segments.next() {
            match record.field(segment)? {
                Field::Value(value) if segments.peek().is_none() => return Some(value),
                Field::Record(nested) if segments.peek().is_some() => record = nested,
                _ => return None,
            }
        }
        None
    }
    /// Replaces the leaf value addressed by `path`.
    ///
    /// A path that does not resolve is [`SieveletError::UnknownField`]; a
    /// path that stops on a nested record is
    /// [`SieveletError::InvalidArgument`], since only leaves can be
    /// replaced.
    pub fn set_at(&mut self, path: &FieldPath, value: Value) -> Result<()> {
        fn descend(
            record: &mut Record,
            segments: &[String],
            path: &FieldPath,
            value: Value,
        ) -> Result<()> {
            let Some((segment, rest)) = segments.split_first() else {
                return Err(SieveletError::UnknownField {
                    path: path.to_string(),
                });
            };
            match record.field_mut(segment) {
                Some(Field::Value(slot)) if rest.is_empty() => {
                    *slot = value;
                    Ok(())
                }
                Some(Field::Record(nested)) if !rest.is_empty() => {
                    descend(nested, rest, path, value)
                }
                Some(Field::Record(_)) => Err(SieveletError::InvalidArgument(format!(
                    "field {} is a nested record, not a value",
                    path
                ))),
                // the path continues past a leaf, or names nothing at all
                _ => Err(SieveletError::UnknownField {
                    path: path.to_string(),
                }),
            }
        }
        descend(self, path.segments(), path, value)
    }
    /// Produces a fully independent copy of this record.
    ///
    /// Every nested record is copied recursively. The result shares nothing
    /// with the original, which is what makes stamped records safe to hand
    /// out: mutating one can never be observed through another.
    pub fn deep_copy(&self) -> Record {
        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, field) in &self.fields {
            let copied = match field {
                Field::Value(value) => Field::Value(value.clone()),
                Field::Record(nested) => Field::Record(nested.deep_copy()),
            };
            fields.push((name.clone(), copied));
        }
        Record { fields }
    }
}
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for (name, field) in &self.fields {
            s += &format!("{}: {}, ", name, field);
        }
        s.pop();
        s.pop();
        write!(f, "{{{}}}", s)
    }
}

// ------------- FieldPath -------------
/// A dot-separated path addressing a field inside a record, e.g.
/// `address.suite`.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Splits `path` on `.`; every segment must be non-empty.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(SieveletError::InvalidArgument(format!(
                "malformed field path: {:?}",
                path
            )));
        }
        Ok(Self {
            segments: path.split('.').map(String::from).collect(),
        })
    }
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}
impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

// ------------- TemplateKeeper -------------
/// What [`TemplateKeeper::keep`] does when the key is already registered.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DuplicatePolicy {
    /// Re-registration fails with [`SieveletError::DuplicateKey`].
    Reject,
    /// Re-registration replaces the canonical template.
    Overwrite,
}

/// Owns the canonical templates and hands out independent copies of them.
///
/// The keeper is an explicitly constructed value passed around by whoever
/// owns it. Writes take `&mut self`, so an embedder sharing a keeper
/// across threads has to serialize registration externally.
pub struct TemplateKeeper {
    policy: DuplicatePolicy,
    kept: HashMap<String, Arc<Record>, KeyHasher>,
}

impl TemplateKeeper {
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Reject)
    }
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            kept: HashMap::default(),
        }
    }
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }
    /// Registers `template` as the canonical instance for `key`.
    ///
    /// Duplicate keys follow the keeper's [`DuplicatePolicy`], fixed at
    /// construction.
    pub fn keep(&mut self, key: impl Into<String>, template: Record) -> Result<Arc<Record>> {
        let keepsake = Arc::new(template);
        match self.kept.entry(key.into()) {
            Entry::Vacant(e) => {
                debug!(key = %e.key(), "template registered");
                Ok(Arc::clone(e.insert(keepsake)))
            }
            Entry::Occupied(mut e) => match self.policy {
                DuplicatePolicy::Reject => Err(SieveletError::DuplicateKey(e.key().clone())),
                DuplicatePolicy::Overwrite => {
                    debug!(key = %e.key(), "template overwritten");
                    e.insert(keepsake);
                    Ok(Arc::clone(e.get()))
                }
            },
        }
    }
    /// Returns the canonical template registered under `key`.
    pub fn get(&self, key: &str) -> Result<Arc<Record>> {
        self.kept
            .get(key)
            .map(Arc::clone)
            .ok_or_else(|| SieveletError::UnknownKey(String::from(key)))
    }
    /// Deep-copies the template under `key`, then applies `overrides` in
    /// order, each addressed by a dot-separated field path.
    ///
    /// The returned record is exclusively owned by the caller; mutating it
    /// never affects the template or any other stamped record.
    pub fn stamp(&self, key: &str, overrides: &[(&str, Value)]) -> Result<Record> {
        let template = self.get(key)?;
        let mut stamped = template.deep_copy();
        for (path, value) in overrides {
            let path = FieldPath::parse(path)?;
            stamped.set_at(&path, value.clone())?;
        }
        trace!(key, overrides = overrides.len(), "template stamped");
        Ok(stamped)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

use std::borrow::Borrow;
use std::fmt;

use crate::construct::Item;
use crate::datatype::Value;
use crate::error::{Result, SieveletError};

/// A pure boolean criterion over an [`Item`].
///
/// The variant set is closed: extending the criteria language means adding
/// a variant and its [`matches`](Predicate::matches) arm, while
/// [`sift`](Predicate::sift) and the existing variants stay untouched.
/// Predicates are immutable once constructed and evaluation mutates
/// neither side.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Predicate {
    /// True iff the named attribute is present and equals the expected value.
    Equals { attribute: String, expected: Value },
    /// True iff every child predicate is true. Carries at least one child.
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn equals(attribute: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self::Equals {
            attribute: attribute.into(),
            expected: expected.into(),
        }
    }
    /// Builds a conjunction. An empty conjunction asserts nothing and is
    /// rejected with [`SieveletError::InvalidArgument`].
    pub fn all(children: Vec<Predicate>) -> Result<Self> {
        if children.is_empty() {
            return Err(SieveletError::InvalidArgument(String::from(
                "a conjunction needs at least one child predicate",
            )));
        }
        Ok(Self::All(children))
    }
    /// Evaluates the predicate against `item`.
    ///
    /// An attribute the item does not carry is
    /// [`SieveletError::AttributeNotFound`]. Conjunctions short-circuit on
    /// the first `false` or first error.
    pub fn matches(&self, item: &Item) -> Result<bool> {
        match self {
            Predicate::Equals {
                attribute,
                expected,
            } => match item.attribute(attribute) {
                Some(value) => Ok(value == expected),
                None => Err(SieveletError::AttributeNotFound {
                    attribute: attribute.clone(),
                }),
            },
            Predicate::All(children) => {
                for child in children {
                    if !child.matches(item)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
    /// Lazily sifts `items`, yielding the matching ones in input order.
    ///
    /// Evaluation failures surface as `Err` at the position of the
    /// offending item and the sift can be driven past them. Nothing is
    /// buffered, so a sift is restartable exactly when its source is.
    pub fn sift<'p, I>(&'p self, items: I) -> Sift<'p, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Item>,
    {
        Sift {
            predicate: self,
            items: items.into_iter(),
        }
    }
}
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Predicate::Equals {
                attribute,
                expected,
            } => write!(f, "{} = {}", attribute, expected),
            Predicate::All(children) => {
                let mut s = String::new();
                for child in children {
                    s += &format!("{} & ", child);
                }
                s.pop();
                s.pop();
                s.pop();
                write!(f, "{}", s)
            }
        }
    }
}

/// Lazy filtering adapter returned by [`Predicate::sift`].
pub struct Sift<'p, I> {
    predicate: &'p Predicate,
    items: I,
}

impl<'p, I> Iterator for Sift<'p, I>
where
    I: Iterator,
    I::Item: Borrow<Item>,
{
    type Item = Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.items.next()?;
            match self.predicate.matches(item.borrow()) {
                Ok(true) => return Some(Ok(item)),
                Ok(false) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        // a sift never yields more than its source
        (0, self.items.size_hint().1)
    }
}

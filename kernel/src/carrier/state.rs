//! `State`: an immutable value vector compared by dominance.
//!
//! # Orientation
//!
//! Every field is stored so that a *lower* value is better. Fields whose
//! natural preference is "higher is better" are negated on the way in by
//! [`StateSchema`](crate::carrier::schema::StateSchema), so dominance never
//! needs to consult a schema:
//!
//! ```text
//! a ≤ b  ⇔  ∀ i: a[i] ≤ b[i]        (a dominates b)
//! ```
//!
//! Because each field is totally ordered, `a ≤ b ∧ b ≤ a` holds exactly when
//! the stored vectors are equal, so [`State::comparably_equals`] agrees with
//! `==`. States of different arity are incomparable.

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

/// Field count stored inline before spilling to the heap.
pub const INLINE_FIELDS: usize = 8;

/// An immutable, dominance-ordered value vector.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct State {
    fields: SmallVec<[i32; INLINE_FIELDS]>,
}

impl State {
    /// Construct from stored (dominance-oriented) field values.
    #[must_use]
    pub fn from_fields<I: IntoIterator<Item = i32>>(fields: I) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// The zero-arity state. Dominates and is dominated by itself only.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fields: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Stored field values, in schema order.
    #[must_use]
    pub fn fields(&self) -> &[i32] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<i32> {
        self.fields.get(index).copied()
    }

    /// Return a copy with one stored field replaced.
    ///
    /// Out-of-range indices return an unchanged copy.
    #[must_use]
    pub fn with_field(&self, index: usize, value: i32) -> Self {
        let mut fields = self.fields.clone();
        if let Some(slot) = fields.get_mut(index) {
            *slot = value;
        }
        Self { fields }
    }

    /// True iff every field of `self` is no worse than the matching field of `other`.
    #[must_use]
    pub fn is_comparably_le(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a <= b)
    }

    /// `self` dominates `other` (ties included).
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        self.is_comparably_le(other)
    }

    /// Mutual domination.
    #[must_use]
    pub fn comparably_equals(&self, other: &Self) -> bool {
        self.is_comparably_le(other) && other.is_comparably_le(self)
    }

    /// Neither state dominates the other.
    #[must_use]
    pub fn is_incomparable(&self, other: &Self) -> bool {
        !self.is_comparably_le(other) && !other.is_comparably_le(self)
    }
}

/// Dominance order: `Less` means `self` strictly dominates `other`.
impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_comparably_le(other), other.is_comparably_le(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State{:?}", self.fields.as_slice())
    }
}

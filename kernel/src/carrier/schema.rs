//! `StateSchema`: named, typed, bounded fields for [`State`] construction.
//!
//! The schema is the only place that knows field names, kinds and
//! preferences. It converts between natural values and the stored
//! dominance orientation (lower is better).

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::carrier::state::{State, INLINE_FIELDS};
use crate::error::KernelError;

/// The value kind of a state field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `false` / `true`, stored as 0 / 1 before orientation.
    Bool,
    /// Inclusive integer range.
    Int { min: i32, max: i32 },
}

/// Which natural value of a field is preferable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preference {
    /// Spent resources, damage flags: lower is better.
    #[default]
    LowerIsBetter,
    /// Capacities, earned flags: higher is better. Stored negated.
    HigherIsBetter,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub preference: Preference,
}

impl FieldSpec {
    fn kind_name(&self) -> &'static str {
        match self.kind {
            FieldKind::Bool => "bool",
            FieldKind::Int { .. } => "int",
        }
    }

    fn natural_default(&self) -> i32 {
        match self.kind {
            FieldKind::Bool => 0,
            FieldKind::Int { min, max } => 0_i32.clamp(min, max),
        }
    }

    fn orient(&self, natural: i32) -> i32 {
        match self.preference {
            Preference::LowerIsBetter => natural,
            Preference::HigherIsBetter => -natural,
        }
    }
}

/// An ordered, named set of state fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSchema {
    fields: Vec<FieldSpec>,
    index: BTreeMap<String, usize>,
}

impl StateSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a boolean field.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicateField`] if the name is taken.
    pub fn with_bool(self, name: &str, preference: Preference) -> Result<Self, KernelError> {
        self.with_field(FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Bool,
            preference,
        })
    }

    /// Declare a bounded integer field.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicateField`] if the name is taken, or
    /// [`KernelError::EmptyRange`] if `min > max`, or
    /// [`KernelError::UnorientableRange`] if the field prefers higher values
    /// and `min` has no negation in `i32`.
    pub fn with_int(
        self,
        name: &str,
        min: i32,
        max: i32,
        preference: Preference,
    ) -> Result<Self, KernelError> {
        if min > max {
            return Err(KernelError::EmptyRange {
                name: name.to_string(),
                min,
                max,
            });
        }
        if preference == Preference::HigherIsBetter && min == i32::MIN {
            return Err(KernelError::UnorientableRange {
                name: name.to_string(),
                min,
            });
        }
        self.with_field(FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Int { min, max },
            preference,
        })
    }

    fn with_field(mut self, spec: FieldSpec) -> Result<Self, KernelError> {
        if self.index.contains_key(&spec.name) {
            return Err(KernelError::DuplicateField { name: spec.name });
        }
        self.index.insert(spec.name.clone(), self.fields.len());
        self.fields.push(spec);
        Ok(self)
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Index of a named field.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownField`] if the name is not declared.
    pub fn field_index(&self, name: &str) -> Result<usize, KernelError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| KernelError::UnknownField {
                name: name.to_string(),
            })
    }

    /// The state with every field at its natural default
    /// (`false`, or `0` clamped into range).
    #[must_use]
    pub fn default_state(&self) -> State {
        State::from_fields(self.fields.iter().map(|f| f.orient(f.natural_default())))
    }

    /// Start building from [`StateSchema::default_state`].
    #[must_use]
    pub fn builder(&self) -> StateBuilder<'_> {
        StateBuilder {
            schema: self,
            fields: self
                .fields
                .iter()
                .map(|f| f.orient(f.natural_default()))
                .collect(),
        }
    }

    /// Start building from an existing state of this schema.
    ///
    /// A state of foreign arity is truncated, or padded with the schema's
    /// defaults for the missing fields.
    #[must_use]
    pub fn modify(&self, state: &State) -> StateBuilder<'_> {
        let mut builder = self.builder();
        for (slot, &value) in builder.fields.iter_mut().zip(state.fields()) {
            *slot = value;
        }
        builder
    }

    /// Read a boolean field in its natural orientation.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownField`] or [`KernelError::FieldKindMismatch`].
    pub fn get_bool(&self, state: &State, name: &str) -> Result<bool, KernelError> {
        let (index, spec) = self.spec(name)?;
        if spec.kind != FieldKind::Bool {
            return Err(kind_mismatch(spec));
        }
        Ok(spec.orient(state.field(index).unwrap_or_default()) != 0)
    }

    /// Read an integer field in its natural orientation.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownField`] or [`KernelError::FieldKindMismatch`].
    pub fn get_int(&self, state: &State, name: &str) -> Result<i32, KernelError> {
        let (index, spec) = self.spec(name)?;
        if !matches!(spec.kind, FieldKind::Int { .. }) {
            return Err(kind_mismatch(spec));
        }
        Ok(spec.orient(state.field(index).unwrap_or_default()))
    }

    fn spec(&self, name: &str) -> Result<(usize, &FieldSpec), KernelError> {
        let index = self.field_index(name)?;
        Ok((index, &self.fields[index]))
    }
}

fn kind_mismatch(spec: &FieldSpec) -> KernelError {
    KernelError::FieldKindMismatch {
        name: spec.name.clone(),
        expected: spec.kind_name(),
    }
}

/// Builder for a [`State`] of a given schema.
///
/// Setters take natural values and consume the builder so they chain with `?`:
///
/// ```
/// # use lodestar_kernel::carrier::schema::{Preference, StateSchema};
/// let schema = StateSchema::new()
///     .with_int("SPENTSOUL", 0, 99, Preference::LowerIsBetter)?
///     .with_bool("BROKEHEART", Preference::LowerIsBetter)?;
/// let state = schema.builder().set_int("SPENTSOUL", 33)?.set_bool("BROKEHEART", true)?.build();
/// assert_eq!(schema.get_int(&state, "SPENTSOUL")?, 33);
/// # Ok::<(), lodestar_kernel::error::KernelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StateBuilder<'a> {
    schema: &'a StateSchema,
    fields: SmallVec<[i32; INLINE_FIELDS]>,
}

impl StateBuilder<'_> {
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownField`] or [`KernelError::FieldKindMismatch`].
    pub fn set_bool(mut self, name: &str, value: bool) -> Result<Self, KernelError> {
        let (index, spec) = self.schema.spec(name)?;
        if spec.kind != FieldKind::Bool {
            return Err(kind_mismatch(spec));
        }
        self.fields[index] = spec.orient(i32::from(value));
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`KernelError::UnknownField`], [`KernelError::FieldKindMismatch`]
    /// or [`KernelError::FieldOutOfRange`].
    pub fn set_int(mut self, name: &str, value: i32) -> Result<Self, KernelError> {
        let (index, spec) = self.schema.spec(name)?;
        let FieldKind::Int { min, max } = spec.kind else {
            return Err(kind_mismatch(spec));
        };
        if !(min..=max).contains(&value) {
            return Err(KernelError::FieldOutOfRange {
                name: spec.name.clone(),
                value,
                min,
                max,
            });
        }
        self.fields[index] = spec.orient(value);
        Ok(self)
    }

    /// Add `delta` to an integer field, failing if the result leaves its range.
    ///
    /// # Errors
    ///
    /// Same as [`StateBuilder::set_int`].
    pub fn add_int(self, name: &str, delta: i32) -> Result<Self, KernelError> {
        let (index, spec) = self.schema.spec(name)?;
        let current = spec.orient(self.fields[index]);
        self.set_int(name, current.saturating_add(delta))
    }

    #[must_use]
    pub fn build(self) -> State {
        State::from_fields(self.fields)
    }
}

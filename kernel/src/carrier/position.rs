//! `Position`: interned graph location identifiers.
//!
//! A position is a dense `u32` handed out by a [`PositionTable`] in
//! registration order. The numeric order carries no search meaning; it is
//! only used to make enumeration and tie-breaking deterministic.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::KernelError;

/// A graph location.
///
/// Derives `Ord` so positions can key `BTreeMap`s and sort action lists.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u32);

impl Position {
    /// Construct from a raw identifier.
    ///
    /// Prefer [`PositionTable::intern`]; raw construction is for tests and
    /// collaborators that manage their own numbering.
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional name ↔ [`Position`] mapping.
///
/// Registration is append-only: a name keeps its position for the lifetime
/// of the table.
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    names: Vec<String>,
    lookup: BTreeMap<String, Position>,
}

impl PositionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from names in order.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicatePosition`] if a name repeats.
    pub fn from_names<I, S>(names: I) -> Result<Self, KernelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for name in names {
            table.register(name)?;
        }
        Ok(table)
    }

    /// Register a new name.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DuplicatePosition`] if the name is already registered.
    pub fn register(&mut self, name: impl Into<String>) -> Result<Position, KernelError> {
        let name = name.into();
        if self.lookup.contains_key(&name) {
            return Err(KernelError::DuplicatePosition { name });
        }
        Ok(self.push(name))
    }

    /// Return the position for `name`, registering it if needed.
    pub fn intern(&mut self, name: &str) -> Position {
        match self.lookup.get(name) {
            Some(&position) => position,
            None => self.push(name.to_string()),
        }
    }

    fn push(&mut self, name: String) -> Position {
        #[allow(clippy::cast_possible_truncation)]
        let position = Position(self.names.len() as u32);
        self.lookup.insert(name.clone(), position);
        self.names.push(name);
        position
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Position> {
        self.lookup.get(name).copied()
    }

    /// Look up a registered name.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::UnknownPosition`] if the name is not registered.
    pub fn resolve(&self, name: &str) -> Result<Position, KernelError> {
        self.get(name).ok_or_else(|| KernelError::UnknownPosition {
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn name(&self, position: Position) -> Option<&str> {
        self.names.get(position.0 as usize).map(String::as_str)
    }

    /// Name for display; falls back to the numeric form for foreign positions.
    #[must_use]
    pub fn display(&self, position: Position) -> String {
        self.name(position)
            .map_or_else(|| position.to_string(), str::to_string)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All positions in registration order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.names.len()).map(|i| {
            #[allow(clippy::cast_possible_truncation)]
            Position(i as u32)
        })
    }
}

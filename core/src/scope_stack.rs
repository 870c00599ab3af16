//! Lexical scopes used by the analyzer to resolve names.
//!
//! Every scope is complete when it is pushed: a `map` pushes all of its
//! parameters at once, and a recursive `let` pushes all of its definitions
//! before any right-hand side is resolved. That is what makes
//!
//! ```jam
//! let even? := map n to if n = 0 then true else odd?(n - 1);
//!     odd?  := map n to if n = 0 then false else even?(n - 1);
//! in even?(10)
//! ```
//!
//! resolve `odd?` inside `even?`.

use alloc::string::ToString;
use alloc::vec::Vec;
use bumpalo::Bump;
use core::fmt;

/// An immutable scope. Bindings are sorted by name for binary search.
pub struct CompleteScope<'a, T>(&'a [(&'a str, T)]);

impl<'a, T> CompleteScope<'a, T> {
    /// Sort `bindings` into the arena.
    ///
    /// Returns an error naming the first duplicate, in source order.
    pub fn new(
        arena: &'a Bump,
        bindings: impl IntoIterator<Item = (&'a str, T)>,
    ) -> Result<Self, DuplicateError> {
        let mut bindings: Vec<(usize, (&'a str, T))> = bindings.into_iter().enumerate().collect();
        // Stable on position, so the later occurrence of a name sorts second.
        bindings.sort_by(|(i, (a, _)), (j, (b, _))| a.cmp(b).then(i.cmp(j)));

        let duplicate = bindings
            .windows(2)
            .filter(|w| w[0].1.0 == w[1].1.0)
            .map(|w| w[1].0)
            .min();
        if let Some(position) = duplicate {
            let name = bindings
                .iter()
                .find(|(i, _)| *i == position)
                .map(|(_, (name, _))| name.to_string())
                .unwrap_or_default();
            return Err(DuplicateError(name));
        }

        let slice = arena.alloc_slice_fill_iter(bindings.into_iter().map(|(_, binding)| binding));
        Ok(Self(slice))
    }

    /// Wrap bindings that are already sorted and free of duplicates.
    pub fn from_sorted(bindings: &'a [(&'a str, T)]) -> CompleteScope<'a, T> {
        debug_assert!(is_sorted(bindings), "Bindings must be sorted by name");
        CompleteScope(bindings)
    }

    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.0
            .binary_search_by_key(&name, |(n, _)| *n)
            .ok()
            .map(|idx| &self.0[idx].1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A stack of scopes, searched from innermost to outermost.
pub struct ScopeStack<'a, T> {
    scopes: Vec<CompleteScope<'a, T>>,
}

impl<'a, T> ScopeStack<'a, T> {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn push(&mut self, scope: CompleteScope<'a, T>) {
        self.scopes.push(scope);
    }

    /// Pop the topmost scope from the stack.
    ///
    /// Returns an error if the stack is empty.
    pub fn pop(&mut self) -> Result<(), PopError> {
        self.scopes.pop().ok_or(PopError::EmptyStack)?;
        Ok(())
    }

    /// Innermost binding of `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl<T> Default for ScopeStack<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a slice is sorted by name (for debug assertions).
fn is_sorted<T>(slice: &[(&str, T)]) -> bool {
    slice.windows(2).all(|w| w[0].0 <= w[1].0)
}

/// Error when trying to pop a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopError {
    /// The stack is empty.
    EmptyStack,
}

impl fmt::Display for PopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopError::EmptyStack => write!(f, "Cannot pop from empty scope stack"),
        }
    }
}

/// Error when duplicate names are found in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateError(pub alloc::string::String);

impl fmt::Display for DuplicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duplicate name '{}' in scope", self.0)
    }
}

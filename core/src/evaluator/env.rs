//! Persistent environments.
//!
//! An [`Env`] is a pointer to the newest frame of an immutable singly linked
//! list. Extending allocates one frame in the arena and shares the tail, so
//! every environment ever captured stays valid and unchanged.

use bumpalo::Bump;
use core::fmt;

use crate::ast::Variable;
use crate::evaluator::suspension::{Suspension, Thunk};
use crate::values::Value;

/// A variable together with its deferred or computed value.
pub struct Binding<'a> {
    pub var: &'a Variable<'a>,
    pub thunk: Thunk<'a>,
}

impl<'a> Binding<'a> {
    /// Call-by-value: the value is already known.
    pub fn value(var: &'a Variable<'a>, value: Value<'a>) -> Self {
        Self {
            var,
            thunk: Thunk::forced(value),
        }
    }

    /// Call-by-name: re-evaluated on every reference.
    pub fn name(var: &'a Variable<'a>, suspension: Suspension<'a>) -> Self {
        Self {
            var,
            thunk: Thunk::by_name(suspension),
        }
    }

    /// Call-by-need: evaluated on first reference, then cached.
    pub fn need(var: &'a Variable<'a>, suspension: Suspension<'a>) -> Self {
        Self {
            var,
            thunk: Thunk::by_need(suspension),
        }
    }

    /// A binding whose definition has not been installed yet. Reading it is an
    /// illegal forward reference.
    pub fn placeholder(var: &'a Variable<'a>) -> Self {
        Self {
            var,
            thunk: Thunk::unset(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.thunk.is_unset()
    }

    /// Copy the state of `real` into this placeholder.
    pub fn install(&self, real: &Binding<'a>) {
        debug_assert!(self.var.same(real.var), "installing a binding for another variable");
        self.thunk.install(&real.thunk);
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {:?}", self.var.name, self.thunk)
    }
}

struct Frame<'a> {
    binding: &'a Binding<'a>,
    next: Env<'a>,
}

#[derive(Clone, Copy, Default)]
pub struct Env<'a>(Option<&'a Frame<'a>>);

impl<'a> Env<'a> {
    pub const EMPTY: Self = Env(None);

    /// A new environment with `binding` in front of `self`.
    pub fn extend(self, arena: &'a Bump, binding: &'a Binding<'a>) -> Env<'a> {
        Env(Some(arena.alloc(Frame {
            binding,
            next: self,
        })))
    }

    /// Innermost binding of `var`, compared by identity.
    pub fn find(self, var: &Variable<'a>) -> Option<&'a Binding<'a>> {
        self.bindings().find(|binding| binding.var.same(var))
    }

    /// Bindings from newest to oldest.
    pub fn bindings(self) -> impl Iterator<Item = &'a Binding<'a>> {
        let mut current = self.0;
        core::iter::from_fn(move || {
            let frame = current?;
            current = frame.next.0;
            Some(frame.binding)
        })
    }

    pub fn is_empty(self) -> bool {
        self.0.is_none()
    }

    pub fn len(self) -> usize {
        self.bindings().count()
    }
}

// Only names: thunks may hold closures that capture this very environment.
impl fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bindings().map(|binding| binding.var.name))
            .finish()
    }
}

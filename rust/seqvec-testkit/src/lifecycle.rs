//! Element types that record their own lifecycle.
//!
//! A [`LifecycleCounter`] hands out [`Tracked`] values. Every construction (direct or
//! via `clone`) and every drop of such a value is recorded in the counter, which
//! lets tests assert that a container drops each element exactly once.

use std::{cell::Cell, fmt, ops::Deref, rc::Rc};

#[derive(Debug, Default)]
struct Counts {
    created: Cell<usize>,
    cloned: Cell<usize>,
    dropped: Cell<usize>,
}

/// Shared tally of [`Tracked`] values created, cloned and dropped.
#[derive(Debug, Clone, Default)]
pub struct LifecycleCounter(Rc<Counts>);

impl LifecycleCounter {
    pub fn new() -> LifecycleCounter {
        Self::default()
    }

    /// Wraps `value` in a [`Tracked`] reporting to this counter.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        bump(&self.0.created);
        Tracked {
            value,
            counts: self.0.clone(),
        }
    }

    /// Number of values created, including clones.
    pub fn created(&self) -> usize {
        self.0.created.get()
    }

    pub fn cloned(&self) -> usize {
        self.0.cloned.get()
    }

    pub fn dropped(&self) -> usize {
        self.0.dropped.get()
    }

    /// Number of values that were created and not yet dropped.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

/// A value whose construction and destruction are recorded by a [`LifecycleCounter`].
pub struct Tracked<T> {
    value: T,
    counts: Rc<Counts>,
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        bump(&self.counts.created);
        bump(&self.counts.cloned);
        Tracked {
            value: self.value.clone(),
            counts: self.counts.clone(),
        }
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        bump(&self.counts.dropped);
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: PartialEq> PartialEq<T> for Tracked<T> {
    fn eq(&self, other: &T) -> bool {
        self.value == *other
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

/// A `Clone` type whose `clone` panics once a shared budget of clones is used up.
///
/// Used to check that containers stay consistent when copying elements fails
/// midway.
#[derive(Debug)]
pub struct FailingClone {
    pub id: usize,
    budget: Rc<Cell<usize>>,
}

impl FailingClone {
    /// Creates `count` values sharing a budget of `clone_budget` successful clones.
    pub fn batch(count: usize, clone_budget: usize) -> Vec<FailingClone> {
        let budget = Rc::new(Cell::new(clone_budget));
        (0..count)
            .map(|id| FailingClone {
                id,
                budget: budget.clone(),
            })
            .collect()
    }
}

impl Clone for FailingClone {
    fn clone(&self) -> Self {
        let left = self.budget.get();
        assert!(left > 0, "clone budget exhausted");
        self.budget.set(left - 1);
        FailingClone {
            id: self.id,
            budget: self.budget.clone(),
        }
    }
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

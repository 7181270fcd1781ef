use std::panic::{AssertUnwindSafe, catch_unwind};

use seqvec::SeqVec;
use seqvec_testkit::lifecycle::{FailingClone, LifecycleCounter, Tracked};

fn filled(counter: &LifecycleCounter, count: usize) -> SeqVec<Tracked<usize>> {
    (0..count).map(|i| counter.track(i)).collect()
}

#[test]
fn test_drop_releases_every_element_once() {
    let counter = LifecycleCounter::new();
    let v = filled(&counter, 35);
    assert_eq!(v.capacity(), 40);
    assert_eq!(counter.live(), 35);
    // Growth moves elements; nothing may be cloned or dropped along the way.
    assert_eq!(counter.cloned(), 0);
    assert_eq!(counter.dropped(), 0);
    drop(v);
    assert_eq!(counter.dropped(), 35);
    assert_eq!(counter.live(), 0);
}

#[test]
fn test_clear_drops_elements() {
    let counter = LifecycleCounter::new();
    let mut v = filled(&counter, 12);
    v.clear();
    assert_eq!(counter.dropped(), 12);
    assert_eq!(v.capacity(), 20);

    v.push_back(counter.track(100));
    assert_eq!(counter.live(), 1);
    drop(v);
    assert_eq!(counter.live(), 0);
}

#[test]
fn test_remove_and_pop_drop_exactly_one() {
    let counter = LifecycleCounter::new();
    let mut v = filled(&counter, 6);

    v.remove_at(2).unwrap();
    assert_eq!(counter.dropped(), 1);
    let c = v.remove(v.begin()).unwrap();
    assert_eq!(counter.dropped(), 2);
    assert_eq!(*v[c], 1);

    let popped = v.pop_back().unwrap();
    assert_eq!(counter.dropped(), 2);
    assert_eq!(popped, 5);
    drop(popped);
    assert_eq!(counter.dropped(), 3);

    let values: Vec<usize> = v.iter().map(|t| **t).collect();
    assert_eq!(values, [1, 3, 4]);
    assert_eq!(counter.live(), 3);
}

#[test]
fn test_insert_does_not_clone_or_drop() {
    let counter = LifecycleCounter::new();
    let mut v = filled(&counter, 10);
    v.insert_at(0, counter.track(99)).unwrap();
    v.insert_before(v.end(), counter.track(98)).unwrap();
    assert_eq!(v.len(), 12);
    assert_eq!(counter.cloned(), 0);
    assert_eq!(counter.dropped(), 0);
    assert_eq!(*v[0], 99);
    assert_eq!(**v.last().unwrap(), 98);
}

#[test]
fn test_failed_insert_does_not_leak_value() {
    let counter = LifecycleCounter::new();
    let mut v = filled(&counter, 3);
    assert!(v.insert_at(7, counter.track(7)).is_err());
    // The rejected value is dropped together with the error path.
    assert_eq!(counter.dropped(), 1);
    assert_eq!(v.len(), 3);
}

#[test]
fn test_clone_and_assign_accounting() {
    let counter = LifecycleCounter::new();
    let a = filled(&counter, 4);
    let b = a.clone();
    assert_eq!(counter.cloned(), 4);
    assert_eq!(counter.live(), 8);

    let mut c = filled(&counter, 7);
    c.assign(&b);
    assert_eq!(counter.cloned(), 8);
    assert_eq!(counter.dropped(), 7);
    assert_eq!(c, a);

    drop((a, b, c));
    assert_eq!(counter.live(), 0);
}

#[test]
fn test_panicking_clone_leaves_source_and_target_intact() {
    let source: SeqVec<FailingClone> = FailingClone::batch(5, 3).into();
    let mut target: SeqVec<FailingClone> = FailingClone::batch(2, 100).into();
    let target_id = target.buffer_id();

    let result = catch_unwind(AssertUnwindSafe(|| target.assign(&source)));
    assert!(result.is_err());
    assert_eq!(target.len(), 2);
    assert_eq!(target.buffer_id(), target_id);
    assert_eq!(target[1].id, 1);
    assert_eq!(source.len(), 5);
}

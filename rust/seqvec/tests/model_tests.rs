use seqvec::{Result, SeqVec};
use seqvec_testkit::ops::{Op, OpsParams, generate_ops};

/// Outcome of one operation, comparable between the container and the model.
#[derive(Debug, PartialEq)]
enum Outcome {
    Done,
    Value(u32),
    Position(usize),
    OutOfBounds,
    Empty,
}

fn observe<T>(result: Result<T>, f: impl FnOnce(T) -> Outcome) -> Outcome {
    match result {
        Ok(v) => f(v),
        Err(e) if e.is_out_of_bounds() => Outcome::OutOfBounds,
        Err(e) if e.is_container_empty() => Outcome::Empty,
        Err(e) => panic!("unexpected error: {e}"),
    }
}

fn apply(v: &mut SeqVec<u32>, op: Op) -> Outcome {
    match op {
        Op::PushBack(value) => {
            v.push_back(value);
            Outcome::Done
        }
        Op::PopBack => observe(v.pop_back(), Outcome::Value),
        Op::InsertAt { index, value } => observe(v.insert_at(index, value), |c| {
            Outcome::Position(c.offset() as usize)
        }),
        Op::RemoveAt { index } => {
            observe(v.remove_at(index), |c| Outcome::Position(c.offset() as usize))
        }
        Op::Set { index, value } => observe(v.at_mut(index), |slot| {
            *slot = value;
            Outcome::Done
        }),
        Op::Get { index } => observe(v.at(index), |x| Outcome::Value(*x)),
        Op::First => observe(v.first(), |x| Outcome::Value(*x)),
        Op::Last => observe(v.last(), |x| Outcome::Value(*x)),
        Op::Clear => {
            v.clear();
            Outcome::Done
        }
        Op::Reassign => {
            let copy = v.clone();
            v.assign(&copy);
            Outcome::Done
        }
    }
}

fn apply_model(m: &mut Vec<u32>, op: Op) -> Outcome {
    match op {
        Op::PushBack(value) => {
            m.push(value);
            Outcome::Done
        }
        Op::PopBack => m.pop().map_or(Outcome::Empty, Outcome::Value),
        Op::InsertAt { index, value } if index <= m.len() => {
            m.insert(index, value);
            Outcome::Position(index)
        }
        Op::RemoveAt { index } if index < m.len() => {
            m.remove(index);
            Outcome::Position(index)
        }
        Op::Set { index, value } if index < m.len() => {
            m[index] = value;
            Outcome::Done
        }
        Op::Get { index } if index < m.len() => Outcome::Value(m[index]),
        Op::InsertAt { .. } | Op::RemoveAt { .. } | Op::Set { .. } | Op::Get { .. } => {
            Outcome::OutOfBounds
        }
        Op::First => m.first().copied().map_or(Outcome::Empty, Outcome::Value),
        Op::Last => m.last().copied().map_or(Outcome::Empty, Outcome::Value),
        Op::Clear => {
            m.clear();
            Outcome::Done
        }
        Op::Reassign => Outcome::Done,
    }
}

fn run_model_test(params: OpsParams) {
    let mut v = SeqVec::new();
    let mut model = Vec::new();
    let mut max_len = 0;
    for (step, op) in generate_ops(&params).into_iter().enumerate() {
        let actual = apply(&mut v, op);
        let expected = apply_model(&mut model, op);
        assert_eq!(actual, expected, "step {step}: {op:?}");
        assert_eq!(v.as_slice(), model.as_slice(), "step {step}: {op:?}");
        assert!(v.len() <= v.capacity());
        max_len = max_len.max(v.len());
    }
    assert!(max_len > SeqVec::<u32>::INITIAL_CAPACITY);
}

#[test]
fn test_matches_vec_model() {
    run_model_test(OpsParams::default());
}

#[test]
fn test_matches_vec_model_with_wide_indices() {
    run_model_test(OpsParams {
        seed: 297135646,
        count: 20_000,
        max_index: 400,
    });
}

#[test]
fn test_cursor_walk_matches_indices() {
    let mut rng = fastrand::Rng::with_seed(2985745485);
    let v: SeqVec<u64> = (0..200).map(|_| rng.u64(..)).collect();
    let begin = v.cbegin();
    for _ in 0..1000 {
        let i = rng.usize(0..v.len());
        let j = rng.usize(0..=v.len());
        let ci = begin + i as isize;
        let cj = v.end() - (v.len() - j) as isize;
        assert_eq!(v[ci], v[i]);
        assert_eq!(cj.offset_from(ci).unwrap(), j as isize - i as isize);
        assert_eq!(ci.distance_to(cj).unwrap(), j as isize - i as isize);
    }
}

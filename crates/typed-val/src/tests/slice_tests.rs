//! Slicing checked against a plain `Vec` model that walks positions one by
//! one.

use crate::{ListRef, Value};
use pretty_assertions::assert_eq;
use typed_list::{ErrorKind, Slice, Type};

fn to_list(items: &[i64]) -> ListRef {
    ListRef::from_values(Type::Int64, items.iter().map(|x| Value::from(*x))).unwrap()
}

fn ints(list: &ListRef) -> Vec<i64> {
    list.to_vec().iter().filter_map(Value::as_int).collect()
}

fn walk(len: usize, slice: &Slice) -> Vec<usize> {
    let n = len as i64;
    let norm = |b: i64| if b < 0 { b + n } else { b };
    let step = slice.step.unwrap_or(1);
    let mut out = vec![];
    if step > 0 {
        let mut i = slice.start.map(norm).unwrap_or(0).max(0);
        let hi = slice.stop.map(norm).unwrap_or(n).min(n);
        while i < hi {
            out.push(i as usize);
            i += step;
        }
    } else {
        let mut i = slice.start.map(norm).unwrap_or(n - 1).min(n - 1);
        let lo = slice.stop.map(norm).unwrap_or(-1).max(-1);
        while i > lo {
            out.push(i as usize);
            i += step;
        }
    }
    out
}

fn slices() -> Vec<Slice> {
    let bounds: Vec<Option<i64>> = std::iter::once(None).chain((-8..9).map(Some)).collect();
    let steps = [None, Some(-3), Some(-2), Some(-1), Some(2), Some(3)];
    let mut out = vec![];
    for start in &bounds {
        for stop in &bounds {
            for step in steps {
                out.push(Slice::new(*start, *stop, step));
            }
        }
    }
    out
}

#[test]
fn test_get_slice_matches_model() {
    for len in 0..7usize {
        let model: Vec<i64> = (0..len as i64).map(|x| x * 10).collect();
        let list = to_list(&model);
        for slice in slices() {
            let want: Vec<i64> = walk(len, &slice).into_iter().map(|i| model[i]).collect();
            let got = list.get_slice(&slice).unwrap();
            assert_eq!(ints(&got), want, "len {} [{}]", len, slice);
            assert_eq!(got.item_type(), Some(Type::Int64));
        }
    }
}

#[test]
fn test_delete_slice_matches_model() {
    for len in 0..7usize {
        let model: Vec<i64> = (0..len as i64).collect();
        for slice in slices() {
            let list = to_list(&model);
            let gone = walk(len, &slice);
            let want: Vec<i64> = model
                .iter()
                .enumerate()
                .filter(|(i, _)| !gone.contains(i))
                .map(|(_, x)| *x)
                .collect();
            list.delete_slice(&slice).unwrap();
            assert_eq!(ints(&list), want, "len {} del [{}]", len, slice);
        }
    }
}

#[test]
fn test_set_slice_matches_model() {
    for len in 0..6usize {
        let model: Vec<i64> = (0..len as i64).collect();
        for slice in slices() {
            let selected = walk(len, &slice);
            for k in [0usize, 1, 3] {
                let repl: Vec<i64> = (100..100 + k as i64).collect();
                let list = to_list(&model);
                let got = list.set_slice(&slice, &to_list(&repl).into());

                if slice.is_simple() {
                    let n = len as i64;
                    let norm = |b: i64| (if b < 0 { b + n } else { b }).clamp(0, n) as usize;
                    let lo = slice.start.map(norm).unwrap_or(0);
                    let hi = slice.stop.map(norm).unwrap_or(len).max(lo);
                    let mut want = model.clone();
                    want.splice(lo..hi, repl.iter().copied());
                    got.unwrap();
                    assert_eq!(ints(&list), want, "len {} [{}] = {:?}", len, slice, repl);
                } else if selected.len() != k {
                    let err = got.unwrap_err();
                    assert_eq!(err.kind(), ErrorKind::ValueError);
                    assert_eq!(ints(&list), model);
                } else {
                    let mut want = model.clone();
                    for (i, x) in selected.iter().zip(&repl) {
                        want[*i] = *x;
                    }
                    got.unwrap();
                    assert_eq!(ints(&list), want, "len {} [{}] = {:?}", len, slice, repl);
                }
            }
        }
    }
}

#[test]
fn test_extended_slice_length_mismatch() {
    let l = to_list(&(10..20).collect::<Vec<_>>());
    let err = l
        .set_slice(&Slice::stepped(0, 10, 2), &to_list(&[1, 2, 3]).into())
        .unwrap_err();
    assert_eq!(err.to_string(), "length mismatch for extended slice and sequence");
    assert_eq!(ints(&l), (10..20).collect::<Vec<_>>());
}

#[test]
fn test_delete_descending_extended_slice() {
    let l = to_list(&(10..20).collect::<Vec<_>>());
    l.delete_slice(&Slice::stepped(8, 3, -1)).unwrap();
    assert_eq!(ints(&l), vec![10, 11, 12, 13, 19]);
}

#[test]
fn test_zero_step() {
    let l = to_list(&[1, 2, 3]);
    for err in [
        l.get_slice(&Slice::step(0)).map(|_| ()).unwrap_err(),
        l.delete_slice(&Slice::step(0)).unwrap_err(),
        l.set_slice(&Slice::step(0), &to_list(&[]).into()).unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::ValueError);
    }
    assert_eq!(ints(&l), vec![1, 2, 3]);
}

#[test]
fn test_set_slice_from_non_iterable() {
    let l = to_list(&[1, 2, 3]);
    let err = l.set_slice(&Slice::range(0, 1), &Value::from(4)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeError);
    assert_eq!(err.to_string(), "'int64' object is not iterable");
}

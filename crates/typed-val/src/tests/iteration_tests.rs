use crate::{ListRef, Value};
use pretty_assertions::assert_eq;
use typed_list::Type;

fn to_list(items: impl IntoIterator<Item = i64>) -> ListRef {
    ListRef::from_values(Type::Int64, items.into_iter().map(Value::from)).unwrap()
}

#[test]
fn test_iteration_is_restartable() {
    let l = to_list(0..3);
    let first: Vec<Value> = l.iter().collect();
    let second: Vec<Value> = (&l).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_appending_while_iterating_terminates() {
    let l = to_list(0..3);
    let mut seen = vec![];
    for item in &l {
        l.append(&item).unwrap();
        seen.push(item);
    }
    assert_eq!(seen, [0i64, 1, 2].map(Value::from).to_vec());
    assert_eq!(l.len(), 6);
}

#[test]
fn test_shrinking_while_iterating_stops_early() {
    let l = to_list(0..6);
    let mut seen = 0;
    for _ in &l {
        l.pop().unwrap();
        seen += 1;
    }
    assert_eq!(seen, 3);
    assert_eq!(l.len(), 3);
}

#[test]
fn test_iterator_keeps_list_alive() {
    let l = to_list(0..2);
    let mut it = l.iter();
    drop(l);
    assert_eq!(it.next(), Some(Value::from(0)));
    assert_eq!(it.next(), Some(Value::from(1)));
    assert_eq!(it.next(), None);
}

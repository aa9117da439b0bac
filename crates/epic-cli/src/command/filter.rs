//! Ordering for the list filter.

use std::cmp::Ordering;

/// One field the list filter can order by. `label` shows the key in
/// brackets, as in `"[E]mail"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
  pub key:   char,
  pub label: &'static str,
}

impl SortKey {
  pub const fn new(key: char, label: &'static str) -> Self { Self { key, label } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
  Ascending,
  Descending,
}

impl Order {
  pub const CODES: &'static [&'static str] = &["A", "D"];

  pub fn from_code(code: &str) -> Self {
    match code {
      "D" => Order::Descending,
      _ => Order::Ascending,
    }
  }
}

/// Sort by each key in turn, later keys breaking ties of earlier ones. The
/// order applies to every key. Records equal on all keys keep their listed
/// order.
pub fn sort_by_keys<R>(
  records: &mut [R],
  keys: &[char],
  order: Order,
  compare: impl Fn(char, &R, &R) -> Ordering,
) {
  records.sort_by(|a, b| {
    let ord = keys.iter().fold(Ordering::Equal, |acc, &key| acc.then_with(|| compare(key, a, b)));
    match order {
      Order::Ascending => ord,
      Order::Descending => ord.reverse(),
    }
  });
}

// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Frequency based bigram score (Mikolov et al., 2013).
///
/// Pairs seen fewer than `min_count` times score below zero.
pub fn original_score(
  count_a: f64,
  count_b: f64,
  count_ab: f64,
  vocab_len: f64,
  min_count: f64,
) -> f64 {
  (count_ab - min_count) / count_a / count_b * vocab_len
}

/// Normalized pointwise mutual information, in [-1, 1] (Bouma, 2009).
///
/// Pairs seen fewer than `min_count` times score negative infinity.
pub fn npmi_score(count_a: f64, count_b: f64, count_ab: f64, n: f64, min_count: f64) -> f64 {
  if count_ab < min_count {
    return f64::NEG_INFINITY;
  }

  let pa = count_a / n;
  let pb = count_b / n;
  let pab = count_ab / n;

  // A bigram covering the whole corpus makes the denominator zero.
  if pab >= 1.0 {
    return f64::NEG_INFINITY;
  }

  (pab / (pa * pb)).ln() / -pab.ln()
}

/// Pairs every item with the item that follows it.
pub fn consecutive_pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> {
  items.iter().zip(items.iter().skip(1))
}

#[test]
fn original_score_values() {
  assert!((original_score(20.0, 20.0, 20.0, 5.0, 5.0) - 0.1875).abs() < 1e-12);
  assert!(original_score(10.0, 10.0, 4.0, 100.0, 5.0) < 0.0);
}

#[test]
fn npmi_score_bounds() {
  // Words that only ever appear together.
  let together = npmi_score(10.0, 10.0, 10.0, 1000.0, 1.0);
  assert!((together - 1.0).abs() < 1e-9);

  // Independent words.
  let independent = npmi_score(100.0, 100.0, 10.0, 1000.0, 1.0);
  assert!(independent.abs() < 1e-9);

  assert_eq!(npmi_score(10.0, 10.0, 2.0, 1000.0, 5.0), f64::NEG_INFINITY);
  assert_eq!(npmi_score(2.0, 2.0, 2.0, 2.0, 1.0), f64::NEG_INFINITY);
}

#[test]
fn consecutive_pairs_iter() {
  let pairs: Vec<(&i32, &i32)> = consecutive_pairs(&[1, 2, 3]).collect();

  assert_eq!(pairs, vec![(&1, &2), (&2, &3)]);
  assert_eq!(consecutive_pairs::<i32>(&[]).count(), 0);
  assert_eq!(consecutive_pairs(&[1]).count(), 0);
}

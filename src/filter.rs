// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashSet;

use crate::params::{DefinesFillerWords, DefinesStopwords};

/// Builds the stopword set: the base list, extended with caller additions.
pub fn build_stopwords<P, S>(additional: &[S]) -> HashSet<String>
where
  P: DefinesStopwords,
  S: AsRef<str>,
{
  P::STOPWORDS
    .iter()
    .map(|w| w.to_string())
    .chain(additional.iter().map(|w| w.as_ref().to_string()))
    .collect()
}

/// Removes every token found in `stopwords`. Token order is kept.
pub fn remove_stopwords(docs: Vec<Vec<String>>, stopwords: &HashSet<String>) -> Vec<Vec<String>> {
  docs
    .into_iter()
    .map(|doc| doc.into_iter().filter(|w| !stopwords.contains(w)).collect())
    .collect()
}

/// Removes the fixed list of filler words.
pub fn remove_words<P>(docs: Vec<Vec<String>>) -> Vec<Vec<String>>
where
  P: DefinesFillerWords,
{
  docs
    .into_iter()
    .map(|doc| {
      doc
        .into_iter()
        .filter(|w| !P::FILLER_WORDS.contains(w.as_str()))
        .collect()
    })
    .collect()
}

#[cfg(test)]
use crate::params::Standard;

#[cfg(test)]
fn docs(raw: &[&[&str]]) -> Vec<Vec<String>> {
  raw
    .iter()
    .map(|d| d.iter().map(|w| w.to_string()).collect())
    .collect()
}

#[test]
fn build_stopwords_merges_additions() {
  let stopwords = build_stopwords::<Standard, _>(&["paper", "propose"]);

  assert_eq!(stopwords.len(), 181);
  assert!(stopwords.contains("the"));
  assert!(stopwords.contains("paper"));
}

#[test]
fn remove_stopwords_preserves_order() {
  let stopwords = build_stopwords::<Standard, &str>(&[]);
  let out = remove_stopwords(
    docs(&[&["the", "graph", "is", "a", "tree"], &[], &["of", "the"]]),
    &stopwords,
  );

  assert_eq!(out, docs(&[&["graph", "tree"], &[], &[]]));
}

#[test]
fn remove_stopwords_never_returns_a_stopword() {
  let stopwords = build_stopwords::<Standard, _>(&["model"]);
  let input = docs(&[
    &["we", "propose", "a", "model", "for", "it", "and", "its", "model"],
    &["ours", "theirs", "network", "very", "deep", "model"],
  ]);

  for doc in remove_stopwords(input, &stopwords) {
    assert!(doc.iter().all(|w| !stopwords.contains(w)));
  }
}

#[test]
fn remove_words_drops_every_filler() {
  let all: Vec<&str> = Standard::FILLER_WORDS.iter().cloned().collect();
  let mut input = docs(&[&["graph", "course", "theory"]]);

  input.push(all.iter().map(|w| w.to_string()).collect());

  let out = remove_words::<Standard>(input);

  assert_eq!(out[0], vec!["graph", "theory"]);
  assert!(out[1].is_empty());
}

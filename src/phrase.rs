// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Statistical phrase detection.
//!
//! A `PhraseTrainer` counts unigrams and adjacent pairs over a corpus and
//! keeps the pairs that score above a threshold. The resulting `PhraseModel`
//! merges those pairs into single `left_right` tokens. Chaining models, each
//! trained on the output of the previous one, yields longer phrases.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use freqdist::FrequencyDistribution;
use log::debug;
use rustc_serialize::json::{Json, ToJson};

use crate::error::{Error, Result};
use crate::util;

/// Joins the parts of a detected phrase.
pub const PHRASE_DELIMITER: char = '_';

/// How a candidate pair is scored against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
  /// Frequency score, scaled by the vocabulary size. Thresholds are
  /// positive and unbounded.
  Default,
  /// Normalized pointwise mutual information. Thresholds lie in [-1, 1].
  Npmi,
}

impl Scoring {
  #[inline]
  fn score(
    &self,
    count_a: usize,
    count_b: usize,
    count_ab: usize,
    vocab_len: usize,
    word_count: usize,
    min_count: usize,
  ) -> f64 {
    match *self {
      Scoring::Default => util::original_score(
        count_a as f64,
        count_b as f64,
        count_ab as f64,
        vocab_len as f64,
        min_count as f64,
      ),
      Scoring::Npmi => util::npmi_score(
        count_a as f64,
        count_b as f64,
        count_ab as f64,
        word_count as f64,
        min_count as f64,
      ),
    }
  }
}

impl Default for Scoring {
  fn default() -> Scoring {
    Scoring::Default
  }
}

impl fmt::Display for Scoring {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Scoring::Default => f.write_str("default"),
      Scoring::Npmi => f.write_str("npmi"),
    }
  }
}

impl FromStr for Scoring {
  type Err = Error;

  fn from_str(s: &str) -> Result<Scoring> {
    match s {
      "default" => Ok(Scoring::Default),
      "npmi" => Ok(Scoring::Npmi),
      _ => Err(Error::InvalidParameter(format!("unknown scoring `{}`", s))),
    }
  }
}

/// Stores the pairs learned by a `PhraseTrainer`, with their scores.
///
/// A model is immutable once trained; applying it never changes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhraseModel {
  phrases: HashMap<String, HashMap<String, f64>>,
}

impl PhraseModel {
  /// Creates a new, empty model. An empty model leaves every token alone.
  #[inline(always)]
  pub fn new() -> PhraseModel {
    PhraseModel {
      ..Default::default()
    }
  }

  /// Checks if a pair of tokens is merged by this model.
  #[inline]
  pub fn contains_phrase(&self, left: &str, right: &str) -> bool {
    self
      .phrases
      .get(left)
      .map(|s| s.contains_key(right))
      .unwrap_or(false)
  }

  /// Gets the score a pair was learned with.
  #[inline]
  pub fn score(&self, left: &str, right: &str) -> Option<f64> {
    self.phrases.get(left).and_then(|s| s.get(right)).cloned()
  }

  /// Insert a newly learned pair.
  fn insert_phrase(&mut self, left: &str, right: &str, score: f64) -> bool {
    self
      .phrases
      .entry(left.to_string())
      .or_insert_with(HashMap::new)
      .insert(right.to_string(), score)
      .is_none()
  }

  /// Number of learned pairs.
  pub fn len(&self) -> usize {
    self.phrases.values().map(|s| s.len()).sum()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.phrases.is_empty()
  }

  /// Iterates over the learned pairs, in no particular order.
  pub fn phrases_iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
    self.phrases.iter().flat_map(|(l, rs)| {
      rs.iter()
        .map(move |(r, score)| (l.as_str(), r.as_str(), *score))
    })
  }

  /// Merges learned pairs in a token sequence, scanning left to right.
  ///
  /// A merged token does not pair again with its right neighbour within the
  /// same pass.
  pub fn apply<S>(&self, doc: &[S]) -> Vec<String>
  where
    S: AsRef<str>,
  {
    let mut merged = Vec::with_capacity(doc.len());
    let mut start: Option<&str> = None;

    for word in doc.iter().map(|w| w.as_ref()) {
      match start {
        Some(left) if self.contains_phrase(left, word) => {
          merged.push(format!("{}{}{}", left, PHRASE_DELIMITER, word));
          start = None;
        }
        Some(left) => {
          merged.push(left.to_string());
          start = Some(word);
        }
        None => start = Some(word),
      }
    }

    if let Some(left) = start {
      merged.push(left.to_string());
    }

    merged
  }

  /// Applies the model to every document of a batch.
  pub fn apply_all<S>(&self, docs: &[Vec<S>]) -> Vec<Vec<String>>
  where
    S: AsRef<str>,
  {
    docs.iter().map(|doc| self.apply(doc)).collect()
  }

  /// Reads a model back from the layout produced by `to_json`.
  pub fn from_json(json: Json) -> Result<PhraseModel> {
    let mut model = PhraseModel::new();

    match json {
      Json::Array(arr) => {
        for x in arr.into_iter() {
          match x {
            Json::Array(mut triple) => match (triple.pop(), triple.pop(), triple.pop()) {
              (Some(score), Some(Json::String(r)), Some(Json::String(l))) => {
                let score = score
                  .as_f64()
                  .ok_or(Error::Format("phrase score is not a number"))?;

                model.insert_phrase(&l, &r, score);
              }
              _ => return Err(Error::Format("failed to parse phrase entry")),
            },
            _ => return Err(Error::Format("failed to parse phrase entry")),
          }
        }

        Ok(model)
      }
      _ => Err(Error::Format("phrase model is not an array")),
    }
  }
}

impl ToJson for PhraseModel {
  /// Serializes as `[[left, right, score], ...]`, sorted for stable output.
  fn to_json(&self) -> Json {
    let sorted: BTreeMap<(&str, &str), f64> = self
      .phrases_iter()
      .map(|(l, r, score)| ((l, r), score))
      .collect();

    Json::Array(
      sorted
        .into_iter()
        .map(|((l, r), score)| {
          Json::Array(vec![
            Json::String(l.to_string()),
            Json::String(r.to_string()),
            Json::F64(score),
          ])
        })
        .collect(),
    )
  }
}

/// A trainer learns which adjacent pairs occur together often enough, given
/// the chosen scoring, to be treated as a single token.
#[derive(Debug, Clone, Copy)]
pub struct PhraseTrainer {
  min_count: usize,
  threshold: f64,
  scoring: Scoring,
}

impl PhraseTrainer {
  /// Creates a new trainer. Pairs need a score strictly above `threshold`.
  #[inline(always)]
  pub fn new(min_count: usize, threshold: f64, scoring: Scoring) -> PhraseTrainer {
    PhraseTrainer {
      min_count,
      threshold,
      scoring,
    }
  }

  /// Trains a model on a whole corpus.
  pub fn train<S>(&self, docs: &[Vec<S>]) -> PhraseModel
  where
    S: AsRef<str>,
  {
    let mut model = PhraseModel::new();
    let mut word_fdist: FrequencyDistribution<&str> = FrequencyDistribution::new();
    let mut pair_fdist: FrequencyDistribution<(&str, &str)> = FrequencyDistribution::new();

    for doc in docs.iter() {
      for w in doc.iter() {
        word_fdist.insert(w.as_ref());
      }

      for (l, r) in util::consecutive_pairs(doc) {
        pair_fdist.insert((l.as_ref(), r.as_ref()));
      }
    }

    // Both unigrams and bigrams count towards the vocabulary.
    let vocab_len = word_fdist.keys().count() + pair_fdist.keys().count();
    let word_count = word_fdist.sum_counts();

    for &(l, r) in pair_fdist.keys() {
      let score = self.scoring.score(
        *word_fdist.get(l).unwrap_or(&0),
        *word_fdist.get(r).unwrap_or(&0),
        *pair_fdist.get(&(l, r)).unwrap_or(&0),
        vocab_len,
        word_count,
        self.min_count,
      );

      if score > self.threshold {
        model.insert_phrase(l, r, score);
      }
    }

    model
  }

  /// Trains one model per n-gram order in `[2, max_n)`, each on the output
  /// of the previous one. Returns the chain and the merged corpus.
  ///
  /// An empty model ends the chain early: it leaves the corpus unchanged, so
  /// every later order would learn nothing as well.
  pub fn train_chain(
    &self,
    mut docs: Vec<Vec<String>>,
    max_n: usize,
  ) -> (Vec<PhraseModel>, Vec<Vec<String>>) {
    let mut chain = Vec::new();

    for n in 2..max_n {
      let model = self.train(&docs);
      let done = model.is_empty();

      debug!("learned {} phrases for n = {}", model.len(), n);

      docs = model.apply_all(&docs);
      chain.push(model);

      if done {
        break;
      }
    }

    (chain, docs)
  }
}

/// Applies a trained chain of models, in order.
pub fn apply_chain(chain: &[PhraseModel], docs: Vec<Vec<String>>) -> Vec<Vec<String>> {
  chain
    .iter()
    .fold(docs, |docs, model| model.apply_all(&docs))
}

#[cfg(test)]
fn repeat(doc: &[&str], times: usize) -> Vec<Vec<String>> {
  (0..times)
    .map(|_| doc.iter().map(|w| w.to_string()).collect())
    .collect()
}

#[test]
fn train_merges_frequent_pairs() {
  let corpus = repeat(&["neural", "network", "model"], 20);
  let model = PhraseTrainer::new(5, 0.1, Scoring::Default).train(&corpus);

  assert_eq!(model.len(), 2);
  assert!(model.contains_phrase("neural", "network"));
  assert!(model.contains_phrase("network", "model"));
  assert!((model.score("neural", "network").unwrap() - 0.1875).abs() < 1e-12);

  // `network` is consumed by the first phrase, so `network_model` never forms.
  assert_eq!(
    model.apply(&["neural", "network", "model"]),
    vec!["neural_network", "model"]
  );
}

#[test]
fn train_respects_threshold_and_min_count() {
  let corpus = repeat(&["neural", "network", "model"], 20);

  assert!(PhraseTrainer::new(5, 0.2, Scoring::Default)
    .train(&corpus)
    .is_empty());

  let rare = repeat(&["neural", "network"], 4);

  assert!(PhraseTrainer::new(5, 0.0, Scoring::Default)
    .train(&rare)
    .is_empty());
}

#[test]
fn chained_models_build_trigrams() {
  let trainer = PhraseTrainer::new(5, 0.1, Scoring::Default);
  let corpus = repeat(&["neural", "network", "model"], 20);

  let bigrams = trainer.train(&corpus);
  let corpus = bigrams.apply_all(&corpus);
  let trigrams = trainer.train(&corpus);

  assert!(trigrams.contains_phrase("neural_network", "model"));
  assert_eq!(
    trigrams.apply(&bigrams.apply(&["neural", "network", "model"])),
    vec!["neural_network_model"]
  );
}

#[test]
fn train_chain_orders() {
  let trainer = PhraseTrainer::new(5, 0.1, Scoring::Default);
  let corpus = repeat(&["neural", "network", "model"], 20);

  let (chain, merged) = trainer.train_chain(corpus.clone(), 4);

  assert_eq!(chain.len(), 2);
  assert_eq!(merged[0], vec!["neural_network_model"]);
  assert_eq!(apply_chain(&chain, corpus.clone()), merged);

  let (chain, unchanged) = trainer.train_chain(corpus.clone(), 2);

  assert!(chain.is_empty());
  assert_eq!(unchanged, corpus);
}

#[test]
fn train_chain_stops_at_empty_model() {
  let trainer = PhraseTrainer::new(5, 0.1, Scoring::Default);
  let corpus = repeat(&["neural", "network", "model"], 20);

  // Two orders merge everything, the third learns nothing and ends the chain.
  let (chain, merged) = trainer.train_chain(corpus, usize::MAX);

  assert_eq!(chain.len(), 3);
  assert!(chain[2].is_empty());
  assert_eq!(merged[0], vec!["neural_network_model"]);
}

#[test]
fn npmi_scoring_finds_fixed_collocations() {
  let corpus = repeat(&["neural", "network", "graph", "theory"], 10);
  let model = PhraseTrainer::new(5, 0.5, Scoring::Npmi).train(&corpus);

  assert_eq!(
    model.apply(&["graph", "theory", "neural", "network"]),
    vec!["graph_theory", "neural_network"]
  );
}

#[test]
fn apply_leaves_unknown_tokens() {
  let model = PhraseModel::new();

  assert_eq!(model.apply(&["a", "b"]), vec!["a", "b"]);
  assert!(model.apply::<&str>(&[]).is_empty());
}

#[test]
fn apply_does_not_mutate_model() {
  let corpus = repeat(&["neural", "network", "model"], 20);
  let model = PhraseTrainer::new(5, 0.1, Scoring::Default).train(&corpus);
  let before = model.clone();

  model.apply_all(&corpus);
  model.apply_all(&repeat(&["graph", "neural", "network"], 3));

  assert_eq!(model, before);
}

#[test]
fn phrase_model_json() {
  let corpus = repeat(&["neural", "network", "model"], 20);
  let model = PhraseTrainer::new(5, 0.1, Scoring::Default).train(&corpus);
  let json = model.to_json();

  assert_eq!(
    json.to_string(),
    "[[\"network\",\"model\",0.1875],[\"neural\",\"network\",0.1875]]"
  );
  assert_eq!(PhraseModel::from_json(json).unwrap(), model);
  assert!(PhraseModel::from_json(Json::String("x".to_string())).is_err());
}

#[test]
fn scoring_from_str() {
  assert_eq!("npmi".parse::<Scoring>().unwrap(), Scoring::Npmi);
  assert_eq!(Scoring::Default.to_string(), "default");
  assert!("pmi".parse::<Scoring>().is_err());
}

// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Overview
//!
//! A preprocessing pipeline that turns raw scientific abstracts and course
//! descriptions into clean token sequences for topic modeling. Documents go
//! through nine stages, in order:
//!
//! 1. heading removal,
//! 2. boilerplate section removal,
//! 3. inline equation removal,
//! 4. whitespace normalization,
//! 5. tokenization,
//! 6. stopword removal,
//! 7. phrase detection,
//! 8. lemmatization filtered by part of speech,
//! 9. filler word removal.
//!
//! Every stage is also exposed on its own, in the `clean`, `tokenizer`,
//! `filter`, `phrase` and `lemma` modules.
//!
//! # Fitting
//!
//! `Preprocessor::fit_transform` learns a stopword set and a chain of phrase
//! models from a corpus. `Preprocessor::transform` reuses that state on new
//! documents without learning anything. The learned `FittedModel` can be
//! written to JSON with `corpus::export_model` and loaded back.
//!
//! Compile-time tables (heading markers, section anchors, stopwords, filler
//! words, tokenizer limits) are associated constants on the traits in
//! `params`. `Standard` implements all of them with the defaults.
//!
//! # Example
//!
//! ```
//! use abstractor::{FitParameters, Preprocessor, Standard};
//!
//! let docs = vec!["Graph neural networks for chemistry."; 8];
//! let params = FitParameters::new().n_gram_threshold(0.3);
//! let mut pre = Preprocessor::<Standard>::new().unwrap();
//!
//! pre.fit_transform(&docs, &params).unwrap();
//!
//! let out = pre.transform(&["Graph neural networks for traffic."]).unwrap();
//!
//! assert_eq!(out[0][0], "graph_neural");
//! ```

pub mod clean;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod lemma;
pub mod params;
pub mod phrase;
pub mod pos;
pub mod preprocessor;
pub mod tokenizer;

mod util;

pub use crate::error::{Error, Result};
pub use crate::lemma::{Annotation, Annotator, RuleAnnotator};
pub use crate::params::Standard;
pub use crate::phrase::{PhraseModel, PhraseTrainer, Scoring};
pub use crate::pos::PosTag;
pub use crate::preprocessor::{FitParameters, FittedModel, Preprocessor};

/// Reads every fixture under `dir_path`, ordered by file name.
#[cfg(test)]
fn get_test_documents(dir_path: &str) -> Vec<(String, String)> {
  use std::fs;

  walkdir::WalkDir::new(dir_path)
    .sort_by_file_name()
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .map(|e| {
      let name = e.file_name().to_string_lossy().into_owned();
      let text = fs::read_to_string(e.path()).unwrap();

      (name, text)
    })
    .collect() // Returns (File name, File contents)
}

#[test]
fn fit_transform_fixtures() {
  use crate::params::DefinesFillerWords;

  let fixtures = get_test_documents("test/raw");
  let docs: Vec<&str> = fixtures.iter().map(|(_, d)| d.as_str()).collect();
  let params = FitParameters::new().min_count(2).n_gram_threshold(1.0);
  let mut pre = Preprocessor::<Standard>::new().unwrap();

  let out = pre.fit_transform(&docs, &params).unwrap();
  let stopwords = pre.fitted().unwrap().stopwords();

  assert_eq!(out.len(), fixtures.len());

  for ((name, _), doc) in fixtures.iter().zip(out.iter()) {
    assert!(!doc.is_empty(), "{} produced no tokens", name);

    for tok in doc.iter() {
      assert!(!stopwords.contains(tok), "{}: stopword {}", name, tok);
      assert!(
        !Standard::FILLER_WORDS.contains(tok.as_str()),
        "{}: filler {}",
        name,
        tok
      );
      assert!(tok.chars().all(|c| c.is_alphabetic() || c == '_'));
    }
  }

  // Transforming the training corpus gives back the fitted output.
  assert_eq!(pre.transform(&docs).unwrap(), out);
}

#[test]
fn fixtures_strip_and_merge() {
  let fixtures = get_test_documents("test/raw");
  let docs: Vec<&str> = fixtures.iter().map(|(_, d)| d.as_str()).collect();
  let params = FitParameters::new().min_count(2).n_gram_threshold(1.0);
  let mut pre = Preprocessor::<Standard>::new().unwrap();

  let out = pre.fit_transform(&docs, &params).unwrap();
  let position = |file: &str| fixtures.iter().position(|(name, _)| name == file).unwrap();
  let has = |file: &str, tok: &str| out[position(file)].iter().any(|t| t == tok);

  for gone in ["lovelace", "english", "homework", "textbook"].iter() {
    assert!(!has("syllabus.txt", *gone), "{} survived", gone);
  }

  assert!(has("syllabus.txt", "probabilistic"));
  assert!(has("graph-neural-networks.txt", "graph_neural"));
  assert!(has("sparse-attention.txt", "sparse_attention"));
}

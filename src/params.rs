// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compile-time tables used by the pipeline.
//!
//! Every table is an associated constant with a default, so a custom set of
//! parameters only needs to override what differs from `Standard`.

pub use phf::Set;
use phf::phf_set;

/// Defines the substrings that mark a line as a heading to discard.
pub trait DefinesHeadingMarkers {
  /// A line containing any of these is dropped.
  const HEADING_MARKERS: &'static [&'static str] = &[
    "Instructors",
    "Department",
    "Campus",
    "Language\u{a0}of\u{a0}instruction",
    "Workload",
    "On\u{ad}site\u{a0}hours",
  ];
}

/// Defines the ordered (start, end) anchors whose interior is collapsed.
pub trait DefinesSectionAnchors {
  /// Pairs are applied in order. A pair may rely on the end anchor of a
  /// previous pair still being present.
  const SECTION_ANCHORS: &'static [(&'static str, &'static str)] = &[
    (
      "Class\u{a0}components\u{a0}(lecture,\u{a0}labs,\u{a0}etc.)",
      "Grading",
    ),
    ("Grading", "Resources"),
    ("Grading", "Course\u{a0}support"),
    ("Course\u{a0}support", "Resources"),
    (
      "Resources",
      "Learning\u{a0}outcomes\u{a0}covered\u{a0}on\u{a0}the\u{a0}course",
    ),
  ];
}

/// Defines the character that opens and closes inline math.
pub trait DefinesEquationDelimiter {
  const EQUATION_DELIMITER: char = '$';
}

/// Defines the base stopword list that caller additions are merged into.
pub trait DefinesStopwords {
  const STOPWORDS: &'static Set<&'static str> = &phf_set! {
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "you're", "you've", "you'll", "you'd", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "she's", "her",
    "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
    "over", "under", "again", "further", "then", "once", "here", "there",
    "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m",
    "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
    "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won",
    "won't", "wouldn", "wouldn't"
  };
}

/// Defines generic words that survive every other stage but carry no topic.
pub trait DefinesFillerWords {
  const FILLER_WORDS: &'static Set<&'static str> = &phf_set! {
    "course", "student", "end", "day", "campus", "group", "part", "grading",
    "class", "components", "resources", "learning", "outcomes", "covered",
    "support"
  };
}

/// Limits applied when splitting text into word tokens.
pub trait TokenizerParameters {
  /// Shortest token kept, in characters.
  const MIN_TOKEN_LEN: usize = 2;

  /// Longest token kept, in characters.
  const MAX_TOKEN_LEN: usize = 15;

  /// Strip accents before tokenizing.
  const DEACCENT: bool = true;
}

/// Everything a `Preprocessor` needs.
pub trait PreprocessorParameters:
  DefinesHeadingMarkers
  + DefinesSectionAnchors
  + DefinesEquationDelimiter
  + DefinesStopwords
  + DefinesFillerWords
  + TokenizerParameters
{
}

impl<T> PreprocessorParameters for T where
  T: DefinesHeadingMarkers
    + DefinesSectionAnchors
    + DefinesEquationDelimiter
    + DefinesStopwords
    + DefinesFillerWords
    + TokenizerParameters
{
}

/// Standard parameters, tuned for arXiv abstracts and course syllabi.
#[derive(Debug, Clone, Copy, Default)]
pub struct Standard;

impl DefinesHeadingMarkers for Standard {}
impl DefinesSectionAnchors for Standard {}
impl DefinesEquationDelimiter for Standard {}
impl DefinesStopwords for Standard {}
impl DefinesFillerWords for Standard {}
impl TokenizerParameters for Standard {}

#[test]
fn standard_stopwords_match_english_list() {
  assert_eq!(Standard::STOPWORDS.len(), 179);
  assert!(Standard::STOPWORDS.contains("the"));
  assert!(Standard::STOPWORDS.contains("wouldn't"));
  assert!(!Standard::STOPWORDS.contains("network"));
}

#[test]
fn standard_filler_words() {
  assert_eq!(Standard::FILLER_WORDS.len(), 15);
  assert!(Standard::FILLER_WORDS.contains("grading"));
  assert!(!Standard::FILLER_WORDS.contains("model"));
}

#[test]
fn section_anchors_chain_through_end_markers() {
  // Every start anchor after the first is an anchor of an earlier pair.
  let anchors = Standard::SECTION_ANCHORS;

  for (i, &(start, _)) in anchors.iter().enumerate().skip(1) {
    assert!(
      anchors[..i].iter().any(|&(s, e)| s == start || e == start),
      "{:?} is not anchored by an earlier pair",
      start
    );
  }
}

// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::marker::PhantomData;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::params::TokenizerParameters;

/// Lowercases a document, and strips accents from it if the parameters ask
/// for it.
pub fn normalize<P>(doc: &str) -> String
where
  P: TokenizerParameters,
{
  let lower = doc.to_lowercase();

  if P::DEACCENT {
    lower.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
  } else {
    lower
  }
}

/// A word character is a letter or an underscore. Digits split words.
#[inline(always)]
fn is_word_char(c: char) -> bool {
  c.is_alphabetic() || c == '_'
}

/// Iterates over the word tokens of an already normalized document.
///
/// A token is a maximal run of word characters. Tokens outside the
/// configured length range, and tokens starting with an underscore, are
/// skipped.
pub struct WordTokenizer<'a, P> {
  doc: &'a str,
  pos: usize,
  params: PhantomData<P>,
}

impl<'a, P> WordTokenizer<'a, P>
where
  P: TokenizerParameters,
{
  #[inline(always)]
  pub fn new(doc: &'a str) -> WordTokenizer<'a, P> {
    WordTokenizer {
      doc,
      pos: 0,
      params: PhantomData,
    }
  }

  #[inline]
  fn accepts(tok: &str) -> bool {
    let len = tok.chars().count();

    len >= P::MIN_TOKEN_LEN && len <= P::MAX_TOKEN_LEN && !tok.starts_with('_')
  }
}

impl<'a, P> Iterator for WordTokenizer<'a, P>
where
  P: TokenizerParameters,
{
  type Item = &'a str;

  fn next(&mut self) -> Option<&'a str> {
    while self.pos < self.doc.len() {
      let rest = &self.doc[self.pos..];

      // Skip to the start of the next word.
      let start = match rest.char_indices().find(|&(_, c)| is_word_char(c)) {
        Some((i, _)) => self.pos + i,
        None => {
          self.pos = self.doc.len();
          return None;
        }
      };

      let end = self.doc[start..]
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map(|(i, _)| start + i)
        .unwrap_or(self.doc.len());

      self.pos = end;

      let tok = &self.doc[start..end];

      if Self::accepts(tok) {
        return Some(tok);
      }
    }

    None
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, Some((self.doc.len() - self.pos) / 2 + 1))
  }
}

/// Splits a document into owned tokens: normalize, then tokenize.
pub fn tokenize<P>(doc: &str) -> Vec<String>
where
  P: TokenizerParameters,
{
  let normalized = normalize::<P>(doc);

  WordTokenizer::<P>::new(&normalized)
    .map(|t| t.to_string())
    .collect()
}

#[cfg(test)]
use crate::params::Standard;

#[test]
fn tokenize_lowercases_and_drops_punctuation() {
  assert_eq!(
    tokenize::<Standard>("Course Overview. Grading Resources: none. is great."),
    vec!["course", "overview", "grading", "resources", "none", "is", "great"]
  );
}

#[test]
fn tokenize_splits_on_digits() {
  assert_eq!(
    tokenize::<Standard>("GPT4o and l2norm, 3d-cnn"),
    vec!["gpt", "and", "norm", "cnn"]
  );
}

#[test]
fn tokenize_length_limits() {
  let toks = tokenize::<Standard>("a an abc supercalifragilistic fifteencharsxx");

  assert_eq!(toks, vec!["an", "abc", "fifteencharsxx"]);
}

#[test]
fn tokenize_strips_accents() {
  assert_eq!(
    tokenize::<Standard>("Erdős–Rényi naïve café"),
    vec!["erdos", "renyi", "naive", "cafe"]
  );
}

#[test]
fn tokenize_keeps_inner_underscores() {
  assert_eq!(
    tokenize::<Standard>("snake_case _hidden tail_"),
    vec!["snake_case", "tail_"]
  );
}

#[test]
fn tokenize_custom_parameters() {
  struct Strict;

  impl TokenizerParameters for Strict {
    const MIN_TOKEN_LEN: usize = 3;
    const DEACCENT: bool = false;
  }

  assert_eq!(
    tokenize::<Strict>("An éclair is ok"),
    vec!["éclair"]
  );
}

#[test]
fn word_tokenizer_empty_and_blank() {
  assert_eq!(WordTokenizer::<Standard>::new("").count(), 0);
  assert_eq!(WordTokenizer::<Standard>::new(" 12 ... 3.4 ").count(), 0);
}

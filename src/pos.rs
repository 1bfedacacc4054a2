// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Universal part-of-speech tags.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PosTag {
  Adj,
  Adp,
  Adv,
  Aux,
  Cconj,
  Det,
  Intj,
  Noun,
  Num,
  Part,
  Pron,
  Propn,
  Punct,
  Sconj,
  Sym,
  Verb,
  X,
}

impl PosTag {
  /// The upper-case tag name, as used by the universal tag set.
  pub fn as_str(&self) -> &'static str {
    match *self {
      PosTag::Adj => "ADJ",
      PosTag::Adp => "ADP",
      PosTag::Adv => "ADV",
      PosTag::Aux => "AUX",
      PosTag::Cconj => "CCONJ",
      PosTag::Det => "DET",
      PosTag::Intj => "INTJ",
      PosTag::Noun => "NOUN",
      PosTag::Num => "NUM",
      PosTag::Part => "PART",
      PosTag::Pron => "PRON",
      PosTag::Propn => "PROPN",
      PosTag::Punct => "PUNCT",
      PosTag::Sconj => "SCONJ",
      PosTag::Sym => "SYM",
      PosTag::Verb => "VERB",
      PosTag::X => "X",
    }
  }

  /// The tags kept by default: nouns, adjectives and proper nouns.
  pub fn content_tags() -> HashSet<PosTag> {
    [PosTag::Noun, PosTag::Adj, PosTag::Propn]
      .iter()
      .cloned()
      .collect()
  }
}

impl fmt::Display for PosTag {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PosTag {
  type Err = Error;

  fn from_str(s: &str) -> Result<PosTag> {
    let tag = match s {
      "ADJ" => PosTag::Adj,
      "ADP" => PosTag::Adp,
      "ADV" => PosTag::Adv,
      "AUX" => PosTag::Aux,
      "CCONJ" => PosTag::Cconj,
      "DET" => PosTag::Det,
      "INTJ" => PosTag::Intj,
      "NOUN" => PosTag::Noun,
      "NUM" => PosTag::Num,
      "PART" => PosTag::Part,
      "PRON" => PosTag::Pron,
      "PROPN" => PosTag::Propn,
      "PUNCT" => PosTag::Punct,
      "SCONJ" => PosTag::Sconj,
      "SYM" => PosTag::Sym,
      "VERB" => PosTag::Verb,
      "X" => PosTag::X,
      _ => {
        return Err(Error::InvalidParameter(format!(
          "unknown part-of-speech tag `{}`",
          s
        )))
      }
    };

    Ok(tag)
  }
}

#[test]
fn pos_tag_names_round_trip() {
  for name in ["ADJ", "NOUN", "PROPN", "VERB", "CCONJ", "X"].iter() {
    assert_eq!(name.parse::<PosTag>().unwrap().to_string(), *name);
  }

  assert!("noun".parse::<PosTag>().is_err());
}

#[test]
fn content_tags_default() {
  let tags = PosTag::content_tags();

  assert_eq!(tags.len(), 3);
  assert!(tags.contains(&PosTag::Propn));
  assert!(!tags.contains(&PosTag::Verb));
}

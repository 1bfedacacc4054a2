// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Part-of-speech annotation and lemmatization.
//!
//! The lemmatizer is written against the `Annotator` trait, so any tagger can
//! be plugged in. `RuleAnnotator` is a small English tagger built from
//! compile-time lexicons and suffix rules. It expects lowercased input, which
//! is what the tokenizer produces.

use std::collections::HashSet;

use phf::{phf_map, phf_set, Map, Set};

use crate::phrase::PHRASE_DELIMITER;
use crate::pos::PosTag;

/// A token, its lemma, and its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
  pub text: String,
  pub lemma: String,
  pub pos: PosTag,
}

/// Annotates the whitespace separated tokens of a text.
pub trait Annotator {
  /// Returns one annotation per token, in order.
  fn annotate(&self, text: &str) -> Vec<Annotation>;
}

/// Lexicon and suffix based English annotator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleAnnotator;

impl RuleAnnotator {
  #[inline(always)]
  pub fn new() -> RuleAnnotator {
    RuleAnnotator
  }
}

impl Annotator for RuleAnnotator {
  fn annotate(&self, text: &str) -> Vec<Annotation> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut annotations = Vec::with_capacity(tokens.len());
    let mut prev = None;

    for (i, &tok) in tokens.iter().enumerate() {
      let (pos, lemma) = match tok.rfind(PHRASE_DELIMITER) {
        Some(j) if j > 0 && j + 1 < tok.len() => annotate_phrase(&tok[..j], &tok[j + 1..]),
        _ => annotate_word(tok, prev, tokens.get(i + 1).copied()),
      };

      prev = Some(pos);

      annotations.push(Annotation {
        text: tok.to_string(),
        lemma,
        pos,
      });
    }

    annotations
  }
}

/// Annotates each document and keeps the lemmas of tokens whose tag is in
/// `pos_tags`.
pub fn lemmatize<A>(annotator: &A, docs: &[Vec<String>], pos_tags: &HashSet<PosTag>) -> Vec<Vec<String>>
where
  A: Annotator + ?Sized,
{
  docs
    .iter()
    .map(|doc| {
      annotator
        .annotate(&doc.join(" "))
        .into_iter()
        .filter(|a| pos_tags.contains(&a.pos))
        .map(|a| a.lemma)
        .collect()
    })
    .collect()
}

/// Reduces a plural noun to its singular form.
pub fn singularize(word: &str) -> String {
  if let Some(singular) = IRREGULAR_NOUNS.get(word) {
    return singular.to_string();
  }

  if word.chars().count() <= 3 {
    return word.to_string();
  }

  if let Some(stem) = word.strip_suffix("ies") {
    return format!("{}y", stem);
  }

  if ["sses", "xes", "ches", "shes"].iter().any(|s| word.ends_with(s)) {
    return word[..word.len() - 2].to_string();
  }

  if ["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
    return word.to_string();
  }

  word.strip_suffix('s').unwrap_or(word).to_string()
}

/// The last component of a phrase decides its tag. Phrases that end in
/// anything but a noun, adjective or proper noun are compound nouns.
fn annotate_phrase(head: &str, last: &str) -> (PosTag, String) {
  let (pos, lemma) = annotate_word(last, None, None);

  match pos {
    PosTag::Noun | PosTag::Adj | PosTag::Propn => (pos, format!("{}{}{}", head, PHRASE_DELIMITER, lemma)),
    _ => (PosTag::Noun, format!("{}{}{}", head, PHRASE_DELIMITER, last)),
  }
}

fn annotate_word(word: &str, prev: Option<PosTag>, next: Option<&str>) -> (PosTag, String) {
  if let Some(pos) = CLOSED_CLASS.get(word) {
    return (*pos, word.to_string());
  }

  if PROPER_NOUNS.contains(word) {
    return (PosTag::Propn, word.to_string());
  }

  if ADJECTIVES.contains(word) {
    return (PosTag::Adj, word.to_string());
  }

  if NOUNS.contains(word) {
    return (PosTag::Noun, singularize(word));
  }

  if let Some(base) = IRREGULAR_VERBS.get(word) {
    return (PosTag::Verb, base.to_string());
  }

  if VERBS.contains(word) {
    return (PosTag::Verb, word.to_string());
  }

  // A third person `-s` form needs a subject right before it. After a noun
  // it also needs something other than a verb or the end of the text after
  // it, otherwise it is the plural head of a compound (`model updates`).
  let finite = match prev {
    Some(PosTag::Pron) | Some(PosTag::Propn) => true,
    Some(PosTag::Noun) => next.map_or(false, |n| !is_verb_form(n)),
    _ => false,
  };

  if let Some(base) = verb_base(word, finite) {
    return (PosTag::Verb, base);
  }

  let len = word.chars().count();

  if len > 4 && word.ends_with("ed") {
    (PosTag::Adj, word.to_string())
  } else if len > 5 && word.ends_with("ing") {
    (PosTag::Noun, word.to_string())
  } else if len > 4 && word.ends_with("ly") {
    (PosTag::Adv, word.to_string())
  } else if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
    (PosTag::Adj, word.to_string())
  } else {
    (PosTag::Noun, singularize(word))
  }
}

/// Whether `word` is a lexicon verb or one of its non-finite forms.
fn is_verb_form(word: &str) -> bool {
  VERBS.contains(word) || IRREGULAR_VERBS.contains_key(word) || verb_base(word, false).is_some()
}

/// Finds the lexicon base of an inflected verb form.
fn verb_base(word: &str, finite: bool) -> Option<String> {
  let mut candidates = Vec::with_capacity(3);

  if let Some(stem) = word.strip_suffix("ing").filter(|s| s.chars().count() > 1) {
    candidates.push(stem.to_string());
    candidates.push(format!("{}e", stem));
    candidates.extend(undouble(stem));
  } else if let Some(stem) = word.strip_suffix("ied") {
    candidates.push(format!("{}y", stem));
  } else if let Some(stem) = word.strip_suffix("ed") {
    candidates.push(format!("{}e", stem));
    candidates.push(stem.to_string());
    candidates.extend(undouble(stem));
  } else if finite {
    if let Some(stem) = word.strip_suffix("ies") {
      candidates.push(format!("{}y", stem));
    } else if let Some(stem) = word.strip_suffix("es") {
      candidates.push(stem.to_string());
      candidates.push(format!("{}e", stem));
    } else if let Some(stem) = word.strip_suffix('s') {
      candidates.push(stem.to_string());
    }
  }

  candidates.into_iter().find(|c| VERBS.contains(c.as_str()))
}

/// `occurr` -> `occur`.
fn undouble(stem: &str) -> Option<String> {
  let mut chars = stem.chars().rev();

  match (chars.next(), chars.next()) {
    (Some(a), Some(b)) if a == b && !"aeiou".contains(a) => {
      Some(stem[..stem.len() - a.len_utf8()].to_string())
    }
    _ => None,
  }
}

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ive", "able", "ible", "al", "ic", "ful", "less"];

static CLOSED_CLASS: Map<&'static str, PosTag> = phf_map! {
  "the" => PosTag::Det, "a" => PosTag::Det, "an" => PosTag::Det,
  "this" => PosTag::Det, "that" => PosTag::Det, "these" => PosTag::Det,
  "those" => PosTag::Det, "each" => PosTag::Det, "every" => PosTag::Det,
  "some" => PosTag::Det, "any" => PosTag::Det, "no" => PosTag::Det,
  "all" => PosTag::Det, "both" => PosTag::Det, "either" => PosTag::Det,
  "neither" => PosTag::Det, "another" => PosTag::Det, "i" => PosTag::Pron,
  "me" => PosTag::Pron, "my" => PosTag::Pron, "mine" => PosTag::Pron,
  "myself" => PosTag::Pron, "you" => PosTag::Pron, "your" => PosTag::Pron,
  "yours" => PosTag::Pron, "yourself" => PosTag::Pron,
  "yourselves" => PosTag::Pron, "he" => PosTag::Pron, "him" => PosTag::Pron,
  "his" => PosTag::Pron, "himself" => PosTag::Pron, "she" => PosTag::Pron,
  "her" => PosTag::Pron, "hers" => PosTag::Pron, "herself" => PosTag::Pron,
  "it" => PosTag::Pron, "its" => PosTag::Pron, "itself" => PosTag::Pron,
  "we" => PosTag::Pron, "us" => PosTag::Pron, "our" => PosTag::Pron,
  "ours" => PosTag::Pron, "ourselves" => PosTag::Pron, "they" => PosTag::Pron,
  "them" => PosTag::Pron, "their" => PosTag::Pron, "theirs" => PosTag::Pron,
  "themselves" => PosTag::Pron, "who" => PosTag::Pron, "whom" => PosTag::Pron,
  "whose" => PosTag::Pron, "which" => PosTag::Pron, "what" => PosTag::Pron,
  "whatever" => PosTag::Pron, "whichever" => PosTag::Pron,
  "none" => PosTag::Pron, "nothing" => PosTag::Pron,
  "something" => PosTag::Pron, "anything" => PosTag::Pron,
  "everything" => PosTag::Pron, "someone" => PosTag::Pron,
  "anyone" => PosTag::Pron, "everyone" => PosTag::Pron,
  "somebody" => PosTag::Pron, "anybody" => PosTag::Pron,
  "everybody" => PosTag::Pron, "nobody" => PosTag::Pron, "of" => PosTag::Adp,
  "in" => PosTag::Adp, "on" => PosTag::Adp, "at" => PosTag::Adp,
  "by" => PosTag::Adp, "for" => PosTag::Adp, "with" => PosTag::Adp,
  "from" => PosTag::Adp, "into" => PosTag::Adp, "onto" => PosTag::Adp,
  "over" => PosTag::Adp, "under" => PosTag::Adp, "between" => PosTag::Adp,
  "among" => PosTag::Adp, "amongst" => PosTag::Adp, "through" => PosTag::Adp,
  "throughout" => PosTag::Adp, "across" => PosTag::Adp,
  "within" => PosTag::Adp, "without" => PosTag::Adp, "via" => PosTag::Adp,
  "per" => PosTag::Adp, "upon" => PosTag::Adp, "about" => PosTag::Adp,
  "against" => PosTag::Adp, "during" => PosTag::Adp, "before" => PosTag::Adp,
  "after" => PosTag::Adp, "above" => PosTag::Adp, "below" => PosTag::Adp,
  "along" => PosTag::Adp, "around" => PosTag::Adp, "beyond" => PosTag::Adp,
  "despite" => PosTag::Adp, "toward" => PosTag::Adp, "towards" => PosTag::Adp,
  "behind" => PosTag::Adp, "beside" => PosTag::Adp, "besides" => PosTag::Adp,
  "near" => PosTag::Adp, "inside" => PosTag::Adp, "outside" => PosTag::Adp,
  "unlike" => PosTag::Adp, "and" => PosTag::Cconj, "or" => PosTag::Cconj,
  "but" => PosTag::Cconj, "nor" => PosTag::Cconj, "yet" => PosTag::Cconj,
  "if" => PosTag::Sconj, "because" => PosTag::Sconj, "while" => PosTag::Sconj,
  "although" => PosTag::Sconj, "though" => PosTag::Sconj,
  "whereas" => PosTag::Sconj, "since" => PosTag::Sconj,
  "unless" => PosTag::Sconj, "whether" => PosTag::Sconj,
  "than" => PosTag::Sconj, "once" => PosTag::Sconj, "until" => PosTag::Sconj,
  "is" => PosTag::Aux, "are" => PosTag::Aux, "was" => PosTag::Aux,
  "were" => PosTag::Aux, "be" => PosTag::Aux, "been" => PosTag::Aux,
  "being" => PosTag::Aux, "am" => PosTag::Aux, "have" => PosTag::Aux,
  "has" => PosTag::Aux, "had" => PosTag::Aux, "having" => PosTag::Aux,
  "do" => PosTag::Aux, "does" => PosTag::Aux, "did" => PosTag::Aux,
  "doing" => PosTag::Aux, "can" => PosTag::Aux, "could" => PosTag::Aux,
  "may" => PosTag::Aux, "might" => PosTag::Aux, "must" => PosTag::Aux,
  "shall" => PosTag::Aux, "should" => PosTag::Aux, "will" => PosTag::Aux,
  "would" => PosTag::Aux, "not" => PosTag::Part, "to" => PosTag::Part,
  "also" => PosTag::Adv, "very" => PosTag::Adv, "well" => PosTag::Adv,
  "however" => PosTag::Adv, "thus" => PosTag::Adv, "therefore" => PosTag::Adv,
  "hence" => PosTag::Adv, "often" => PosTag::Adv, "always" => PosTag::Adv,
  "never" => PosTag::Adv, "here" => PosTag::Adv, "there" => PosTag::Adv,
  "then" => PosTag::Adv, "now" => PosTag::Adv, "so" => PosTag::Adv,
  "too" => PosTag::Adv, "just" => PosTag::Adv, "only" => PosTag::Adv,
  "even" => PosTag::Adv, "still" => PosTag::Adv, "further" => PosTag::Adv,
  "moreover" => PosTag::Adv, "furthermore" => PosTag::Adv,
  "rather" => PosTag::Adv, "almost" => PosTag::Adv, "quite" => PosTag::Adv,
  "already" => PosTag::Adv, "instead" => PosTag::Adv, "again" => PosTag::Adv,
  "ever" => PosTag::Adv, "perhaps" => PosTag::Adv, "up" => PosTag::Adv,
  "down" => PosTag::Adv, "out" => PosTag::Adv, "off" => PosTag::Adv,
  "where" => PosTag::Adv, "when" => PosTag::Adv, "why" => PosTag::Adv,
  "how" => PosTag::Adv, "one" => PosTag::Num, "two" => PosTag::Num,
  "three" => PosTag::Num, "four" => PosTag::Num, "five" => PosTag::Num,
  "six" => PosTag::Num, "seven" => PosTag::Num, "eight" => PosTag::Num,
  "nine" => PosTag::Num, "ten" => PosTag::Num, "eleven" => PosTag::Num,
  "twelve" => PosTag::Num, "twenty" => PosTag::Num, "thirty" => PosTag::Num,
  "hundred" => PosTag::Num, "thousand" => PosTag::Num,
  "million" => PosTag::Num, "billion" => PosTag::Num, "yes" => PosTag::Intj,
  "oh" => PosTag::Intj
};

static PROPER_NOUNS: Set<&'static str> = phf_set! {
  "python", "matlab", "java", "google", "github", "arxiv", "linux", "markov",
  "bayes", "fourier", "turing", "wikipedia", "imagenet", "pytorch",
  "tensorflow", "europe", "america", "china", "newton", "euler", "gauss"
};

static ADJECTIVES: Set<&'static str> = phf_set! {
  "new", "novel", "large", "small", "good", "high", "low", "deep", "different",
  "recent", "simple", "complex", "general", "common", "main", "key",
  "important", "significant", "robust", "efficient", "effective", "accurate",
  "real", "true", "big", "wide", "broad", "strong", "weak", "fast", "slow",
  "early", "late", "current", "previous", "various", "many", "much", "few",
  "more", "most", "less", "least", "several", "multiple", "single", "first",
  "second", "third", "final", "basic", "advanced", "open", "free", "full",
  "great", "best", "better", "whole", "specific", "particular", "certain",
  "possible", "available", "able", "likely", "unlikely", "necessary",
  "similar", "due", "prior", "optimal", "sparse", "dense", "linear",
  "nonlinear", "random", "latent", "hidden", "visual", "temporal", "spatial",
  "explicit", "implicit", "relevant", "dominant", "sufficient", "consistent",
  "independent", "excellent", "frequent", "absent", "other", "own", "same",
  "such", "primary", "secondary", "arbitrary", "ordinary", "elementary",
  "preliminary", "temporary", "stationary", "binary", "daily", "weekly",
  "monthly", "yearly", "costly", "friendly", "elderly", "adversarial",
  "competitive", "higher", "lower", "larger", "smaller", "faster", "deeper",
  "stronger", "wider", "easy", "hard", "difficult", "clear", "short", "long",
  "old", "young", "local", "global", "total", "minimal", "maximal",
  "empirical", "theoretical", "practical", "fundamental", "natural",
  "artificial", "human", "social", "classical", "quantum", "neural", "noisy",
  "safe", "fair", "rich", "poor"
};

/// Nouns that a suffix or verb rule would otherwise tag as something else.
static NOUNS: Set<&'static str> = phf_set! {
  "topic", "logic", "music", "metric", "traffic", "clinic", "arithmetic",
  "rhetoric", "mechanic", "critic", "signal", "interval", "proposal",
  "journal", "material", "animal", "approval", "arrival", "potential",
  "terminal", "capital", "hospital", "manual", "tutorial", "trial", "rival",
  "portal", "objective", "alternative", "perspective", "initiative",
  "incentive", "derivative", "archive", "narrative", "motive", "executive",
  "representative", "variable", "deliverable", "observable", "family",
  "anomaly", "assembly", "supply", "reply", "monopoly", "ally", "need",
  "removal", "retrieval", "survival", "withdrawal", "disposal", "festival",
  "renewal", "referral", "rehearsal", "denial", "arsenal", "speed", "breed",
  "greed", "timetable", "syllable", "learning", "training", "understanding",
  "building", "computing", "encoding", "decoding", "passing", "writing",
  "reading", "finding", "findings", "teaching", "thinking"
};

static VERBS: Set<&'static str> = phf_set! {
  "propose", "present", "show", "use", "study", "develop", "introduce",
  "provide", "improve", "demonstrate", "achieve", "apply", "compare",
  "evaluate", "analyze", "analyse", "investigate", "describe", "consider",
  "obtain", "derive", "prove", "extend", "explore", "outperform", "enable",
  "require", "allow", "reduce", "increase", "learn", "train", "predict",
  "estimate", "compute", "solve", "generate", "perform", "identify", "address",
  "capture", "combine", "exploit", "design", "implement", "leverage", "yield",
  "establish", "suggest", "indicate", "reveal", "discuss", "examine",
  "include", "make", "take", "give", "find", "get", "become", "remain", "lead",
  "build", "define", "represent", "optimize", "minimize", "maximize", "employ",
  "adopt", "construct", "formulate", "characterize", "assess", "measure",
  "validate", "verify", "understand", "know", "see", "seem", "appear",
  "attempt", "aim", "seek", "tend", "teach", "enroll", "complete", "pass",
  "submit", "write", "read", "discover", "detect", "classify", "encode",
  "decode", "infer", "update", "converge", "vary", "depend", "rely", "lie",
  "hold", "belong", "contain", "consist", "involve", "highlight", "motivate",
  "inspire", "guarantee", "ensure", "handle", "tackle", "overcome", "mitigate",
  "alleviate", "surpass", "exceed", "emerge", "arise", "occur", "exist",
  "bring", "think", "begin", "choose", "draw", "run", "determine", "focus",
  "explain", "illustrate", "argue", "claim", "conclude", "observe", "note",
  "report"
};

static IRREGULAR_VERBS: Map<&'static str, &'static str> = phf_map! {
  "made" => "make", "took" => "take", "taken" => "take", "given" => "give",
  "gave" => "give", "found" => "find", "got" => "get", "gotten" => "get",
  "became" => "become", "led" => "lead", "built" => "build", "shown" => "show",
  "known" => "know", "knew" => "know", "seen" => "see", "saw" => "see",
  "held" => "hold", "arose" => "arise", "arisen" => "arise",
  "wrote" => "write", "written" => "write", "taught" => "teach",
  "sought" => "seek", "proven" => "prove", "learnt" => "learn",
  "understood" => "understand", "brought" => "bring", "thought" => "think",
  "began" => "begin", "begun" => "begin", "chosen" => "choose",
  "chose" => "choose", "drawn" => "draw", "drew" => "draw", "ran" => "run"
};

static IRREGULAR_NOUNS: Map<&'static str, &'static str> = phf_map! {
  "children" => "child", "people" => "person", "men" => "man",
  "women" => "woman", "feet" => "foot", "teeth" => "tooth", "mice" => "mouse",
  "geese" => "goose", "oxen" => "ox", "analyses" => "analysis",
  "hypotheses" => "hypothesis", "theses" => "thesis",
  "criteria" => "criterion", "phenomena" => "phenomenon", "indices" => "index",
  "matrices" => "matrix", "vertices" => "vertex", "appendices" => "appendix",
  "axes" => "axis", "crises" => "crisis", "diagnoses" => "diagnosis",
  "syntheses" => "synthesis", "parentheses" => "parenthesis",
  "emphases" => "emphasis", "radii" => "radius", "stimuli" => "stimulus",
  "nuclei" => "nucleus", "foci" => "focus", "loci" => "locus",
  "alumni" => "alumnus", "curricula" => "curriculum", "spectra" => "spectrum",
  "optima" => "optimum", "maxima" => "maximum", "minima" => "minimum",
  "media" => "medium", "strata" => "stratum", "leaves" => "leaf",
  "lives" => "life", "halves" => "half", "selves" => "self",
  "knives" => "knife", "caches" => "cache", "niches" => "niche",
  "headaches" => "headache", "data" => "data", "series" => "series",
  "species" => "species", "news" => "news", "physics" => "physics",
  "mathematics" => "mathematics", "statistics" => "statistics",
  "economics" => "economics", "robotics" => "robotics",
  "linguistics" => "linguistics", "genetics" => "genetics",
  "dynamics" => "dynamics", "analytics" => "analytics", "ethics" => "ethics",
  "electronics" => "electronics", "graphics" => "graphics",
  "politics" => "politics", "mechanics" => "mechanics",
  "semantics" => "semantics", "logistics" => "logistics",
  "kinematics" => "kinematics", "informatics" => "informatics",
  "bioinformatics" => "bioinformatics", "movies" => "movie",
  "cookies" => "cookie", "calories" => "calorie", "bias" => "bias",
  "atlas" => "atlas", "canvas" => "canvas", "alias" => "alias",
  "lens" => "lens", "biases" => "bias", "aliases" => "alias",
  "lenses" => "lens", "gases" => "gas", "corpora" => "corpus"
};

#[cfg(test)]
fn tags_and_lemmas(text: &str) -> Vec<(PosTag, String)> {
  RuleAnnotator::new()
    .annotate(text)
    .into_iter()
    .map(|a| (a.pos, a.lemma))
    .collect()
}

#[cfg(test)]
fn tagged(pairs: &[(PosTag, &str)]) -> Vec<(PosTag, String)> {
  pairs.iter().map(|&(p, l)| (p, l.to_string())).collect()
}

#[test]
fn annotate_syllabus_tokens() {
  assert_eq!(
    tags_and_lemmas("course overview grading resources none great"),
    tagged(&[
      (PosTag::Noun, "course"),
      (PosTag::Noun, "overview"),
      (PosTag::Noun, "grading"),
      (PosTag::Noun, "resource"),
      (PosTag::Pron, "none"),
      (PosTag::Adj, "great"),
    ])
  );
}

#[test]
fn annotate_keeps_text_and_order() {
  let annotations = RuleAnnotator::new().annotate("  graphs \n of  trees ");
  let texts: Vec<&str> = annotations.iter().map(|a| a.text.as_str()).collect();

  assert_eq!(texts, vec!["graphs", "of", "trees"]);
  assert_eq!(annotations[1].pos, PosTag::Adp);
  assert!(RuleAnnotator::new().annotate("").is_empty());
}

#[test]
fn annotate_verb_inflections() {
  assert_eq!(
    tags_and_lemmas("method proposes recent studies show supervised models occurred"),
    tagged(&[
      (PosTag::Noun, "method"),
      (PosTag::Verb, "propose"),
      (PosTag::Adj, "recent"),
      (PosTag::Noun, "study"),
      (PosTag::Verb, "show"),
      (PosTag::Adj, "supervised"),
      (PosTag::Noun, "model"),
      (PosTag::Verb, "occur"),
    ])
  );

  assert_eq!(tags_and_lemmas("studied"), tagged(&[(PosTag::Verb, "study")]));
  assert_eq!(tags_and_lemmas("taught"), tagged(&[(PosTag::Verb, "teach")]));
}

#[test]
fn annotate_gerunds_are_nouns() {
  assert_eq!(
    tags_and_lemmas("learning clustering message passing"),
    tagged(&[
      (PosTag::Noun, "learning"),
      (PosTag::Noun, "clustering"),
      (PosTag::Noun, "message"),
      (PosTag::Noun, "passing"),
    ])
  );
}

#[test]
fn annotate_present_participles_are_verbs() {
  assert_eq!(
    tags_and_lemmas("using reducing improving achieving running"),
    tagged(&[
      (PosTag::Verb, "use"),
      (PosTag::Verb, "reduce"),
      (PosTag::Verb, "improve"),
      (PosTag::Verb, "achieve"),
      (PosTag::Verb, "run"),
    ])
  );
}

#[test]
fn lemmatize_drops_present_participles() {
  let docs = vec![vec!["pattern", "reducing", "cost", "using", "windows"]
    .into_iter()
    .map(String::from)
    .collect()];

  assert_eq!(
    lemmatize(&RuleAnnotator::new(), &docs, &PosTag::content_tags()),
    vec![vec!["pattern", "cost", "window"]]
  );
}

#[test]
fn annotate_plural_compound_heads() {
  assert_eq!(
    tags_and_lemmas("gradient estimates converge"),
    tagged(&[
      (PosTag::Noun, "gradient"),
      (PosTag::Noun, "estimate"),
      (PosTag::Verb, "converge"),
    ])
  );

  assert_eq!(
    tags_and_lemmas("convergence guarantees"),
    tagged(&[(PosTag::Noun, "convergence"), (PosTag::Noun, "guarantee")])
  );

  assert_eq!(
    tags_and_lemmas("model updates"),
    tagged(&[(PosTag::Noun, "model"), (PosTag::Noun, "update")])
  );

  assert_eq!(
    tags_and_lemmas("it updates weights"),
    tagged(&[
      (PosTag::Pron, "it"),
      (PosTag::Verb, "update"),
      (PosTag::Noun, "weight"),
    ])
  );
}

#[test]
fn annotate_suffix_rules() {
  assert_eq!(
    tags_and_lemmas("probabilistic efficiently signal variables anomaly"),
    tagged(&[
      (PosTag::Adj, "probabilistic"),
      (PosTag::Adv, "efficiently"),
      (PosTag::Noun, "signal"),
      (PosTag::Noun, "variable"),
      (PosTag::Noun, "anomaly"),
    ])
  );
}

#[test]
fn annotate_proper_nouns() {
  assert_eq!(
    tags_and_lemmas("python markov"),
    tagged(&[(PosTag::Propn, "python"), (PosTag::Propn, "markov")])
  );
}

#[test]
fn annotate_phrases_by_last_component() {
  assert_eq!(
    tags_and_lemmas("neural_networks machine_learning case_study deep_sparse"),
    tagged(&[
      (PosTag::Noun, "neural_network"),
      (PosTag::Noun, "machine_learning"),
      (PosTag::Noun, "case_study"),
      (PosTag::Adj, "deep_sparse"),
    ])
  );
}

#[test]
fn singularize_rules() {
  let cases = [
    ("resources", "resource"),
    ("matrices", "matrix"),
    ("hypotheses", "hypothesis"),
    ("classes", "class"),
    ("approaches", "approach"),
    ("boxes", "box"),
    ("queries", "query"),
    ("analysis", "analysis"),
    ("corpus", "corpus"),
    ("bias", "bias"),
    ("gas", "gas"),
    ("data", "data"),
    ("graph", "graph"),
  ];

  for &(plural, singular) in cases.iter() {
    assert_eq!(singularize(plural), singular, "{}", plural);
  }
}

#[test]
fn lemmatize_filters_by_tag() {
  let docs = vec![
    vec!["course", "overview", "grading", "resources", "none", "great"]
      .into_iter()
      .map(String::from)
      .collect(),
    vec![],
  ];

  assert_eq!(
    lemmatize(&RuleAnnotator::new(), &docs, &PosTag::content_tags()),
    vec![
      vec!["course", "overview", "grading", "resource", "great"],
      vec![],
    ]
  );
}

#[test]
fn lemmatize_with_custom_annotator() {
  struct Shouting;

  impl Annotator for Shouting {
    fn annotate(&self, text: &str) -> Vec<Annotation> {
      text
        .split_whitespace()
        .map(|t| Annotation {
          text: t.to_string(),
          lemma: t.to_uppercase(),
          pos: if t.len() > 3 { PosTag::X } else { PosTag::Sym },
        })
        .collect()
    }
  }

  let docs = vec![vec!["graph".to_string(), "of".to_string()]];
  let keep: HashSet<PosTag> = [PosTag::X].iter().cloned().collect();
  let annotator: Box<dyn Annotator> = Box::new(Shouting);

  assert_eq!(lemmatize(annotator.as_ref(), &docs, &keep), vec![vec!["GRAPH"]]);
}

// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The nine stage pipeline.
//!
//! `Preprocessor::fit_transform` learns the stopword set and the phrase model
//! chain from a corpus, and `Preprocessor::transform` reuses them on new
//! documents. The learned state lives in a `FittedModel`, which can be
//! written to JSON and loaded back.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use log::{debug, info, log, Level};
use rustc_serialize::json::{self, Json, ToJson};

use crate::clean::{remove_latex_equations, remove_newlines, BoilerplateStripper};
use crate::error::{Error, Result};
use crate::filter::{build_stopwords, remove_stopwords, remove_words};
use crate::lemma::{lemmatize, Annotator, RuleAnnotator};
use crate::params::{PreprocessorParameters, Standard};
use crate::phrase::{apply_chain, PhraseModel, PhraseTrainer, Scoring};
use crate::pos::PosTag;
use crate::tokenizer::tokenize;

/// Runtime settings of a fit.
///
/// # Examples
///
/// ```
/// use abstractor::{FitParameters, Scoring};
///
/// let params = FitParameters::new()
///   .additional_stopwords(vec!["paper", "propose"])
///   .n_gram_threshold(0.5)
///   .scoring(Scoring::Npmi);
///
/// assert_eq!(params.max_n, 3);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FitParameters {
  /// Merged into the base stopword list.
  pub additional_stopwords: Vec<String>,
  /// Phrase models are trained for every order in `[2, max_n)`.
  pub max_n: usize,
  /// A pair must score strictly above this to become a phrase.
  pub n_gram_threshold: f64,
  /// Tokens tagged with anything else are dropped while lemmatizing.
  pub pos_tags: HashSet<PosTag>,
  /// Pairs seen fewer times than this are never merged.
  pub min_count: usize,
  pub scoring: Scoring,
}

impl Default for FitParameters {
  fn default() -> FitParameters {
    FitParameters {
      additional_stopwords: Vec::new(),
      max_n: 3,
      n_gram_threshold: 100.0,
      pos_tags: PosTag::content_tags(),
      min_count: 5,
      scoring: Scoring::Default,
    }
  }
}

impl FitParameters {
  #[inline(always)]
  pub fn new() -> FitParameters {
    FitParameters {
      ..Default::default()
    }
  }

  pub fn additional_stopwords<I, S>(mut self, words: I) -> FitParameters
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.additional_stopwords = words.into_iter().map(Into::into).collect();
    self
  }

  pub fn max_n(mut self, max_n: usize) -> FitParameters {
    self.max_n = max_n;
    self
  }

  pub fn n_gram_threshold(mut self, threshold: f64) -> FitParameters {
    self.n_gram_threshold = threshold;
    self
  }

  pub fn pos_tags<I>(mut self, tags: I) -> FitParameters
  where
    I: IntoIterator<Item = PosTag>,
  {
    self.pos_tags = tags.into_iter().collect();
    self
  }

  pub fn min_count(mut self, min_count: usize) -> FitParameters {
    self.min_count = min_count;
    self
  }

  pub fn scoring(mut self, scoring: Scoring) -> FitParameters {
    self.scoring = scoring;
    self
  }

  /// Checks the threshold against the scoring range and the minimum count.
  pub fn validate(&self) -> Result<()> {
    if self.min_count < 1 {
      return Err(Error::InvalidParameter(
        "`min_count` must be at least 1".to_string(),
      ));
    }

    let t = self.n_gram_threshold;

    match self.scoring {
      Scoring::Default if !(t.is_finite() && t > 0.0) => Err(Error::InvalidParameter(format!(
        "`n_gram_threshold` must be positive with default scoring, got {}",
        t
      ))),
      Scoring::Npmi if !(-1.0..=1.0).contains(&t) => Err(Error::InvalidParameter(format!(
        "`n_gram_threshold` must be in [-1, 1] with npmi scoring, got {}",
        t
      ))),
      _ => Ok(()),
    }
  }

  fn from_json(json: Json) -> Result<FitParameters> {
    let mut obj = match json {
      Json::Object(obj) => obj,
      _ => return Err(Error::Format("fit parameters are not an object")),
    };

    let tags = string_array(obj.remove("pos_tags"), "failed to parse `pos_tags`")?;

    Ok(FitParameters {
      additional_stopwords: string_array(
        obj.remove("additional_stopwords"),
        "failed to parse `additional_stopwords`",
      )?,
      max_n: obj
        .get("max_n")
        .and_then(Json::as_u64)
        .ok_or(Error::Format("failed to parse `max_n`"))? as usize,
      n_gram_threshold: obj
        .get("n_gram_threshold")
        .and_then(Json::as_f64)
        .ok_or(Error::Format("failed to parse `n_gram_threshold`"))?,
      pos_tags: tags
        .iter()
        .map(|t| t.parse())
        .collect::<Result<HashSet<PosTag>>>()?,
      min_count: obj
        .get("min_count")
        .and_then(Json::as_u64)
        .ok_or(Error::Format("failed to parse `min_count`"))? as usize,
      scoring: obj
        .get("scoring")
        .and_then(Json::as_string)
        .ok_or(Error::Format("failed to parse `scoring`"))?
        .parse()?,
    })
  }
}

impl ToJson for FitParameters {
  fn to_json(&self) -> Json {
    let mut tags: Vec<&str> = self.pos_tags.iter().map(|t| t.as_str()).collect();
    let mut obj = BTreeMap::new();

    tags.sort_unstable();

    obj.insert(
      "additional_stopwords".to_string(),
      self.additional_stopwords.to_json(),
    );
    obj.insert("max_n".to_string(), Json::U64(self.max_n as u64));
    obj.insert("n_gram_threshold".to_string(), Json::F64(self.n_gram_threshold));
    obj.insert(
      "pos_tags".to_string(),
      Json::Array(tags.into_iter().map(|t| Json::String(t.to_string())).collect()),
    );
    obj.insert("min_count".to_string(), Json::U64(self.min_count as u64));
    obj.insert("scoring".to_string(), Json::String(self.scoring.to_string()));

    Json::Object(obj)
  }
}

fn string_array(json: Option<Json>, err: &'static str) -> Result<Vec<String>> {
  match json {
    Some(Json::Array(arr)) => arr
      .into_iter()
      .map(|x| match x {
        Json::String(s) => Ok(s),
        _ => Err(Error::Format(err)),
      })
      .collect(),
    _ => Err(Error::Format(err)),
  }
}

/// Everything learned by `fit_transform`. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
  params: FitParameters,
  stopwords: HashSet<String>,
  phrase_models: Vec<PhraseModel>,
}

impl FittedModel {
  /// The parameters the model was fitted with.
  #[inline(always)]
  pub fn params(&self) -> &FitParameters {
    &self.params
  }

  /// Base stopwords merged with the additional ones.
  #[inline(always)]
  pub fn stopwords(&self) -> &HashSet<String> {
    &self.stopwords
  }

  /// One model per n-gram order, in training order.
  #[inline(always)]
  pub fn phrase_models(&self) -> &[PhraseModel] {
    &self.phrase_models[..]
  }

  /// Serializes the model to a JSON string.
  pub fn to_json_string(&self) -> Result<String> {
    Ok(json::encode(&self.to_json())?)
  }
}

impl ToJson for FittedModel {
  fn to_json(&self) -> Json {
    let mut stopwords: Vec<&String> = self.stopwords.iter().collect();
    let mut obj = BTreeMap::new();

    stopwords.sort_unstable();

    obj.insert("params".to_string(), self.params.to_json());
    obj.insert(
      "stopwords".to_string(),
      Json::Array(stopwords.into_iter().map(|s| Json::String(s.clone())).collect()),
    );
    obj.insert(
      "phrase_models".to_string(),
      Json::Array(self.phrase_models.iter().map(|m| m.to_json()).collect()),
    );

    Json::Object(obj)
  }
}

impl FromStr for FittedModel {
  type Err = Error;

  /// Deserializes JSON written with `to_json`.
  fn from_str(s: &str) -> Result<FittedModel> {
    match Json::from_str(s)? {
      Json::Object(mut obj) => {
        let params = match obj.remove("params") {
          Some(params) => FitParameters::from_json(params)?,
          None => return Err(Error::Format("failed to parse `params`")),
        };

        let mut stopwords = HashSet::new();
        let mut phrase_models = Vec::new();

        // Gets a Json array by a path on the object, then runs an action for
        // every member matching a pattern.
        macro_rules! read_json_array_data(
          ($path:literal, $mtch:pat, $act:expr) => (
            match obj.remove($path) {
              Some(Json::Array(arr)) => {
                for x in arr.into_iter() {
                  match x {
                    $mtch => { $act; }
                    _ => return Err(Error::Format(concat!("unexpected member in `", $path, "`"))),
                  }
                }
              }
              _ => return Err(Error::Format(concat!("failed to parse `", $path, "`"))),
            }
          );
        );

        read_json_array_data!("stopwords", Json::String(st), stopwords.insert(st));

        read_json_array_data!(
          "phrase_models",
          model @ Json::Array(_),
          phrase_models.push(PhraseModel::from_json(model)?)
        );

        Ok(FittedModel {
          params,
          stopwords,
          phrase_models,
        })
      }
      _ => Err(Error::Format("no json object found containing a fitted model")),
    }
  }
}

enum State {
  Unfitted,
  Fitted(FittedModel),
}

#[inline]
fn stage(level: Level, n: usize, what: &str) {
  log!(level, "[{}/9] {}...", n, what);
}

/// Runs the nine stages over batches of documents.
///
/// # Examples
///
/// ```
/// use abstractor::{FitParameters, Preprocessor, Standard};
///
/// let mut pre = Preprocessor::<Standard>::new().unwrap();
/// let docs = ["Instructors: J. Smith\nCourse Overview.\nGrading: 50% exam. Resources: none. $x+y$ is great."];
///
/// let out = pre.fit_transform(&docs, &FitParameters::default()).unwrap();
///
/// assert_eq!(out, vec![vec!["overview", "resource", "great"]]);
/// ```
pub struct Preprocessor<P = Standard> {
  stripper: BoilerplateStripper<P>,
  annotator: Box<dyn Annotator>,
  state: State,
}

impl<P> Preprocessor<P>
where
  P: PreprocessorParameters,
{
  /// Creates an unfitted preprocessor with the bundled annotator.
  pub fn new() -> Result<Preprocessor<P>> {
    Preprocessor::with_annotator(RuleAnnotator::new())
  }

  /// Creates an unfitted preprocessor that lemmatizes with `annotator`.
  pub fn with_annotator<A>(annotator: A) -> Result<Preprocessor<P>>
  where
    A: Annotator + 'static,
  {
    Ok(Preprocessor {
      stripper: BoilerplateStripper::new()?,
      annotator: Box::new(annotator),
      state: State::Unfitted,
    })
  }

  /// Creates a fitted preprocessor from a previously learned model.
  pub fn from_model(model: FittedModel) -> Result<Preprocessor<P>> {
    model.params.validate()?;

    let mut pre = Preprocessor::new()?;

    pre.state = State::Fitted(model);

    Ok(pre)
  }

  /// Replaces the annotator used by the lemmatizing stage.
  pub fn set_annotator<A>(&mut self, annotator: A)
  where
    A: Annotator + 'static,
  {
    self.annotator = Box::new(annotator);
  }

  /// The learned state, if `fit_transform` has run.
  #[inline]
  pub fn fitted(&self) -> Option<&FittedModel> {
    match self.state {
      State::Fitted(ref model) => Some(model),
      State::Unfitted => None,
    }
  }

  #[inline]
  pub fn is_fitted(&self) -> bool {
    self.fitted().is_some()
  }

  /// Learns the stopword set and phrase chain from `docs`, then runs every
  /// stage on them. A second call refits from scratch.
  pub fn fit_transform<S>(&mut self, docs: &[S], params: &FitParameters) -> Result<Vec<Vec<String>>>
  where
    S: AsRef<str>,
  {
    params.validate()?;

    info!("fitting on {} documents", docs.len());

    let tokens = self.clean(docs, Level::Info);

    stage(Level::Info, 6, "Removing stopwords");
    let stopwords = build_stopwords::<P, _>(&params.additional_stopwords);
    let tokens = remove_stopwords(tokens, &stopwords);

    stage(Level::Info, 7, "Identifying phrases");
    let trainer = PhraseTrainer::new(params.min_count, params.n_gram_threshold, params.scoring);
    let (phrase_models, tokens) = trainer.train_chain(tokens, params.max_n);

    debug!(
      "fitted {} stopwords and {} phrase models",
      stopwords.len(),
      phrase_models.len()
    );

    let tokens = self.lemmatize_and_filter(&tokens, &params.pos_tags, Level::Info);

    self.state = State::Fitted(FittedModel {
      params: params.clone(),
      stopwords,
      phrase_models,
    });

    Ok(tokens)
  }

  /// Runs every stage on `docs` with the learned state. Nothing is learned.
  pub fn transform<S>(&self, docs: &[S]) -> Result<Vec<Vec<String>>>
  where
    S: AsRef<str>,
  {
    let model = self.fitted().ok_or(Error::NotFitted)?;

    debug!("transforming {} documents", docs.len());

    let tokens = self.clean(docs, Level::Debug);

    stage(Level::Debug, 6, "Removing stopwords");
    let tokens = remove_stopwords(tokens, &model.stopwords);

    stage(Level::Debug, 7, "Identifying phrases");
    let tokens = apply_chain(&model.phrase_models, tokens);

    Ok(self.lemmatize_and_filter(&tokens, &model.params.pos_tags, Level::Debug))
  }

  /// Merges phrases with the learned chain, without learning anything.
  pub fn identify_phrases(&self, docs: Vec<Vec<String>>) -> Result<Vec<Vec<String>>> {
    let model = self.fitted().ok_or(Error::NotFitted)?;

    Ok(apply_chain(&model.phrase_models, docs))
  }

  /// Stages one to five: raw text to tokens.
  fn clean<S>(&self, docs: &[S], level: Level) -> Vec<Vec<String>>
  where
    S: AsRef<str>,
  {
    stage(level, 1, "Removing headings");
    let docs: Vec<String> = docs
      .iter()
      .map(|d| self.stripper.remove_heading(d.as_ref()))
      .collect();

    stage(level, 2, "Removing useless information");
    let docs: Vec<String> = docs
      .iter()
      .map(|d| self.stripper.remove_useless_info(d))
      .collect();

    stage(level, 3, "Removing LaTeX equations");
    let docs: Vec<String> = docs
      .iter()
      .map(|d| remove_latex_equations::<P>(d).into_owned())
      .collect();

    stage(level, 4, "Removing newlines");
    let docs: Vec<String> = docs.iter().map(|d| remove_newlines(d)).collect();

    stage(level, 5, "Tokenizing");
    docs.iter().map(|d| tokenize::<P>(d)).collect()
  }

  /// Stages eight and nine.
  fn lemmatize_and_filter(
    &self,
    tokens: &[Vec<String>],
    pos_tags: &HashSet<PosTag>,
    level: Level,
  ) -> Vec<Vec<String>> {
    stage(level, 8, "Lemmatizing");
    let tokens = lemmatize(self.annotator.as_ref(), tokens, pos_tags);

    stage(level, 9, "Removing custom words");
    remove_words::<P>(tokens)
  }
}

#[cfg(test)]
const SYLLABUS: &str =
  "Instructors: J. Smith\nCourse Overview.\nGrading: 50% exam. Resources: none. $x+y$ is great.";

#[cfg(test)]
fn graph_corpus() -> Vec<String> {
  [
    "chemistry",
    "traffic",
    "recommendation",
    "physics",
    "biology",
    "vision",
    "language",
    "robotics",
  ]
  .iter()
  .map(|topic| format!("Graph neural networks for {}.", topic))
  .collect()
}

#[test]
fn fit_transform_syllabus() {
  let mut pre = Preprocessor::<Standard>::new().unwrap();
  let out = pre.fit_transform(&[SYLLABUS], &FitParameters::default()).unwrap();

  assert_eq!(out, vec![vec!["overview", "resource", "great"]]);
  assert!(!out[0].iter().any(|w| w == "course" || w == "grading"));

  let model = pre.fitted().unwrap();

  assert_eq!(model.stopwords().len(), 179);
  assert_eq!(model.phrase_models().len(), 1);
  assert!(model.phrase_models()[0].is_empty());
}

#[test]
fn fit_transform_custom_parameters() {
  use crate::params::*;

  struct KeepSections;

  impl DefinesHeadingMarkers for KeepSections {
    const HEADING_MARKERS: &'static [&'static str] = &[];
  }
  impl DefinesSectionAnchors for KeepSections {
    const SECTION_ANCHORS: &'static [(&'static str, &'static str)] = &[];
  }
  impl DefinesEquationDelimiter for KeepSections {}
  impl DefinesStopwords for KeepSections {}
  impl DefinesFillerWords for KeepSections {
    const FILLER_WORDS: &'static Set<&'static str> = &phf::phf_set! { "great" };
  }
  impl TokenizerParameters for KeepSections {}

  let mut pre = Preprocessor::<KeepSections>::new().unwrap();
  let out = pre.fit_transform(&[SYLLABUS], &FitParameters::default()).unwrap();

  assert_eq!(
    out,
    vec![vec!["instructor", "smith", "course", "overview", "grading", "exam", "resource"]]
  );
}

#[test]
fn transform_before_fit() {
  let pre = Preprocessor::<Standard>::new().unwrap();

  assert!(!pre.is_fitted());
  assert!(match pre.transform(&[SYLLABUS]) {
    Err(Error::NotFitted) => true,
    _ => false,
  });
  assert!(match pre.identify_phrases(vec![]) {
    Err(Error::NotFitted) => true,
    _ => false,
  });
}

#[test]
fn fit_rejects_invalid_parameters() {
  let mut pre = Preprocessor::<Standard>::new().unwrap();
  let invalid = [
    FitParameters::new().n_gram_threshold(-1.0),
    FitParameters::new().n_gram_threshold(0.0),
    FitParameters::new().scoring(Scoring::Npmi).n_gram_threshold(1.5),
    FitParameters::new().min_count(0),
  ];

  for params in invalid.iter() {
    assert!(match pre.fit_transform(&[SYLLABUS], params) {
      Err(Error::InvalidParameter(_)) => true,
      _ => false,
    });
  }

  assert!(!pre.is_fitted());
  assert!(FitParameters::new()
    .scoring(Scoring::Npmi)
    .n_gram_threshold(-0.5)
    .validate()
    .is_ok());
}

#[test]
fn fit_transform_additional_stopwords() {
  let mut pre = Preprocessor::<Standard>::new().unwrap();
  let params = FitParameters::new().additional_stopwords(vec!["overview"]);
  let out = pre.fit_transform(&[SYLLABUS], &params).unwrap();

  assert_eq!(out, vec![vec!["resource", "great"]]);
  assert!(pre.fitted().unwrap().stopwords().contains("overview"));
}

#[test]
fn fit_transform_learns_phrase_chain() {
  let mut pre = Preprocessor::<Standard>::new().unwrap();
  let params = FitParameters::new().max_n(4).n_gram_threshold(0.5);
  let out = pre.fit_transform(&graph_corpus(), &params).unwrap();

  assert_eq!(pre.fitted().unwrap().phrase_models().len(), 2);

  for doc in out.iter() {
    assert_eq!(doc.len(), 2);
    assert_eq!(doc[0], "graph_neural_network");
  }

  assert_eq!(
    pre.transform(&["Graph neural networks for chemistry."]).unwrap(),
    vec![vec!["graph_neural_network", "chemistry"]]
  );
}

#[test]
fn transform_does_not_learn() {
  let mut pre = Preprocessor::<Standard>::new().unwrap();
  let params = FitParameters::new().n_gram_threshold(0.5);

  pre.fit_transform(&graph_corpus(), &params).unwrap();

  let before = pre.fitted().unwrap().clone();
  let unseen: Vec<String> = (0..10).map(|_| "Deep belief nets.".to_string()).collect();
  let out = pre.transform(&unseen).unwrap();

  assert_eq!(pre.fitted().unwrap(), &before);
  assert_eq!(out[0], vec!["deep", "belief", "net"]);
}

#[test]
fn identify_phrases_applies_chain() {
  let mut pre = Preprocessor::<Standard>::new().unwrap();
  let params = FitParameters::new().max_n(4).n_gram_threshold(0.5);

  pre.fit_transform(&graph_corpus(), &params).unwrap();

  let docs = vec![vec!["graph", "neural", "networks", "graph"]
    .into_iter()
    .map(String::from)
    .collect()];

  assert_eq!(
    pre.identify_phrases(docs).unwrap(),
    vec![vec!["graph_neural_networks", "graph"]]
  );
}

#[test]
fn fitted_model_json_round_trip() {
  let mut pre = Preprocessor::<Standard>::new().unwrap();
  let params = FitParameters::new()
    .max_n(4)
    .n_gram_threshold(0.5)
    .additional_stopwords(vec!["paper"]);

  pre.fit_transform(&graph_corpus(), &params).unwrap();

  let model = pre.fitted().unwrap();
  let loaded: FittedModel = model.to_json_string().unwrap().parse().unwrap();

  assert_eq!(loaded.params(), model.params());
  assert_eq!(loaded.stopwords(), model.stopwords());
  assert_eq!(loaded.phrase_models().len(), 2);

  let reloaded = Preprocessor::<Standard>::from_model(loaded).unwrap();
  let docs = ["Graph neural networks for traffic. A paper on graph neural networks."];

  assert_eq!(reloaded.transform(&docs).unwrap(), pre.transform(&docs).unwrap());
}

#[test]
fn fitted_model_rejects_bad_json() {
  assert!("[1, 2]".parse::<FittedModel>().is_err());
  assert!("{\"params\": {}}".parse::<FittedModel>().is_err());
  assert!("not json".parse::<FittedModel>().is_err());
}

#[test]
fn fit_parameters_json() {
  let params = FitParameters::new()
    .pos_tags(vec![PosTag::Noun, PosTag::Verb])
    .scoring(Scoring::Npmi)
    .n_gram_threshold(0.5);

  assert_eq!(
    params.to_json().to_string(),
    "{\"additional_stopwords\":[],\"max_n\":3,\"min_count\":5,\
     \"n_gram_threshold\":0.5,\"pos_tags\":[\"NOUN\",\"VERB\"],\"scoring\":\"npmi\"}"
  );
  assert_eq!(FitParameters::from_json(params.to_json()).unwrap(), params);
}

#[test]
fn custom_annotator_is_used() {
  struct KeepAll;

  impl Annotator for KeepAll {
    fn annotate(&self, text: &str) -> Vec<crate::lemma::Annotation> {
      text
        .split_whitespace()
        .map(|t| crate::lemma::Annotation {
          text: t.to_string(),
          lemma: t.to_string(),
          pos: PosTag::Noun,
        })
        .collect()
    }
  }

  let mut pre = Preprocessor::<Standard>::with_annotator(KeepAll).unwrap();
  let out = pre.fit_transform(&[SYLLABUS], &FitParameters::default()).unwrap();

  assert_eq!(out, vec![vec!["overview", "none", "great"]]);
}

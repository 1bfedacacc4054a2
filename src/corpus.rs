// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Getting documents in and out of the pipeline: arXiv metadata filtering,
//! persistence of documents and fitted models, and, behind cargo features,
//! PDF text extraction and abstract page scraping.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use rustc_serialize::json::{self, Json};
use rustc_serialize::{Decodable, Encodable};

use crate::error::{Error, Result};
use crate::preprocessor::FittedModel;

/// arXiv categories kept by default: AI, game theory, vision, retrieval,
/// machine learning, multi-agent, neural computing, and statistics.
pub const DEFAULT_CATEGORIES: &[&str] = &[
  "cs.AI", "cs.GT", "cs.CV", "cs.IR", "cs.LG", "cs.MA", "cs.NE", "stat.ML", "stat.ME", "stat.CO",
  "stat.TH",
];

/// Reads a metadata snapshot, one JSON record per line.
pub fn read_metadata<P>(path: P) -> Result<Vec<String>>
where
  P: AsRef<Path>,
{
  let file = fs::File::open(path.as_ref())?;
  let lines = BufReader::new(file).lines().collect::<std::io::Result<Vec<String>>>()?;

  debug!("read {} metadata records from {:?}", lines.len(), path.as_ref());

  Ok(lines)
}

/// Keeps the papers listed under any of `categories` and returns
/// `title + " " + abstract` for each, in input order.
///
/// A category matches when it is a substring of the record's `categories`
/// field. Blank lines are skipped.
///
/// # Examples
///
/// ```
/// use abstractor::corpus::extract_abstracts;
///
/// let records = [
///   r#"{"title": "Deep nets", "abstract": "We train.", "categories": "cs.LG stat.ML"}"#,
///   r#"{"title": "Sheaves", "abstract": "We glue.", "categories": "math.AG"}"#,
/// ];
///
/// assert_eq!(
///   extract_abstracts(&records, &["cs.LG"]).unwrap(),
///   vec!["Deep nets We train."]
/// );
/// ```
pub fn extract_abstracts<L, C>(lines: &[L], categories: &[C]) -> Result<Vec<String>>
where
  L: AsRef<str>,
  C: AsRef<str>,
{
  let mut abstracts = Vec::new();

  for line in lines.iter().map(|l| l.as_ref()).filter(|l| !l.trim().is_empty()) {
    let paper = match Json::from_str(line)? {
      Json::Object(obj) => obj,
      _ => return Err(Error::Format("metadata record is not an object")),
    };

    let field = |name: &'static str, err: &'static str| {
      paper
        .get(name)
        .and_then(Json::as_string)
        .ok_or(Error::Format(err))
    };

    let listed = field("categories", "metadata record has no `categories`")?;

    if categories.iter().any(|c| listed.contains(c.as_ref())) {
      let title = field("title", "metadata record has no `title`")?;
      let abs = field("abstract", "metadata record has no `abstract`")?;

      abstracts.push(format!("{} {}", title, abs));
    }
  }

  info!(
    "extracted {} abstracts from {} records",
    abstracts.len(),
    lines.len()
  );

  Ok(abstracts)
}

/// Writes any encodable document collection as JSON.
pub fn export_documents<T, P>(documents: &T, path: P) -> Result<()>
where
  T: Encodable,
  P: AsRef<Path>,
{
  fs::write(path, json::encode(documents)?)?;
  Ok(())
}

/// Reads back a collection written by `export_documents`.
pub fn load_documents<T, P>(path: P) -> Result<T>
where
  T: Decodable,
  P: AsRef<Path>,
{
  Ok(json::decode(&fs::read_to_string(path)?)?)
}

/// Writes a fitted model as JSON.
pub fn export_model<P>(model: &FittedModel, path: P) -> Result<()>
where
  P: AsRef<Path>,
{
  fs::write(path, model.to_json_string()?)?;
  Ok(())
}

/// Reads back a model written by `export_model`.
pub fn load_model<P>(path: P) -> Result<FittedModel>
where
  P: AsRef<Path>,
{
  fs::read_to_string(path)?.parse()
}

/// Creates `path` and its parents when missing.
pub fn create_directory_if_not_exists<P>(path: P) -> Result<()>
where
  P: AsRef<Path>,
{
  let path = path.as_ref();

  if !path.exists() {
    fs::create_dir_all(path)?;
    info!("created directory {:?}", path);
  }

  Ok(())
}

/// Extracts the text of every regular file in `dir`, one document per file,
/// ordered by file name.
#[cfg(feature = "pdf")]
pub fn extract_pdf_texts<P>(dir: P) -> Result<Vec<String>>
where
  P: AsRef<Path>,
{
  let mut paths = Vec::new();

  for entry in fs::read_dir(dir)? {
    let path = entry?.path();

    if path.is_file() {
      paths.push(path);
    }
  }

  paths.sort();

  let mut texts = Vec::with_capacity(paths.len());

  for path in paths.iter() {
    debug!("extracting text from {:?}", path);
    texts.push(pdf_extract::extract_text(path)?);
  }

  info!("extracted {} pdf documents", texts.len());

  Ok(texts)
}

#[cfg(feature = "scrape")]
mod scrape {
  use log::error;
  use once_cell::sync::Lazy;
  use scraper::{ElementRef, Html, Selector};

  use crate::error::{Error, Result};

  static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.title.mathjax").expect("valid selector"));
  static ABSTRACT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("blockquote.abstract.mathjax").expect("valid selector"));

  /// Text of an element without its leading `<span>` descriptor, such as
  /// `Title:` or `Abstract:`.
  fn text_without_descriptor(el: ElementRef) -> String {
    let mut skipped = false;
    let mut text = String::new();

    for child in el.children() {
      match ElementRef::wrap(child) {
        Some(inner) if !skipped && inner.value().name() == "span" => skipped = true,
        Some(inner) => text.extend(inner.text()),
        None => {
          if let Some(t) = child.value().as_text() {
            text.push_str(t);
          }
        }
      }
    }

    text.trim().to_string()
  }

  /// Pulls `title + "\n" + abstract` out of an arXiv abstract page.
  pub fn parse_arxiv_abstract(html: &str) -> Result<String> {
    let doc = Html::parse_document(html);
    let title = doc
      .select(&TITLE)
      .next()
      .ok_or(Error::Scrape("the paper title"))?;
    let abs = doc
      .select(&ABSTRACT)
      .next()
      .ok_or(Error::Scrape("the paper abstract"))?;

    Ok(format!(
      "{}\n{}",
      text_without_descriptor(title),
      text_without_descriptor(abs)
    ))
  }

  fn fetch(url: &str) -> Result<String> {
    let page = reqwest::blocking::get(url)?.error_for_status()?.text()?;

    parse_arxiv_abstract(&page)
  }

  /// Fetches an arXiv abstract page and returns `title + "\n" + abstract`.
  /// Failures are logged before being returned.
  pub fn scrape_arxiv_abstract(url: &str) -> Result<String> {
    fetch(url).map_err(|e| {
      error!("failed to scrape {}: {}", url, e);
      e
    })
  }

  #[test]
  fn parse_arxiv_abstract_page() {
    let html = r#"<html><body>
      <h1 class="title mathjax"><span class="descriptor">Title:</span>Attention Is All You Need</h1>
      <blockquote class="abstract mathjax">
        <span class="descriptor">Abstract:</span> The dominant <em>sequence</em> models.
      </blockquote>
    </body></html>"#;

    assert_eq!(
      parse_arxiv_abstract(html).unwrap(),
      "Attention Is All You Need\nThe dominant sequence models."
    );
  }

  #[test]
  fn parse_arxiv_abstract_missing_parts() {
    assert!(match parse_arxiv_abstract("<html><h1>Nothing</h1></html>") {
      Err(Error::Scrape(_)) => true,
      _ => false,
    });
  }
}

#[cfg(feature = "scrape")]
pub use self::scrape::{parse_arxiv_abstract, scrape_arxiv_abstract};

#[cfg(test)]
const RECORDS: &[&str] = &[
  r#"{"id": "1", "title": "Deep nets", "abstract": "We train.", "categories": "cs.LG stat.ML"}"#,
  r#"{"id": "2", "title": "Sheaves", "abstract": "We glue.", "categories": "math.AG"}"#,
  "",
  r#"{"id": "3", "title": "Auctions", "abstract": "We bid.", "categories": "cs.GT econ.TH"}"#,
  r#"{"id": "4", "title": "Priors", "abstract": "We infer.", "categories": "stat.ME"}"#,
];

#[test]
fn extract_abstracts_default_categories() {
  assert_eq!(
    extract_abstracts(RECORDS, DEFAULT_CATEGORIES).unwrap(),
    vec!["Deep nets We train.", "Auctions We bid.", "Priors We infer."]
  );
}

#[test]
fn extract_abstracts_substring_match() {
  // `stat.M` is a prefix of both `stat.ML` and `stat.ME`; each paper still
  // appears once.
  assert_eq!(
    extract_abstracts(RECORDS, &["stat.M", "stat.ML"]).unwrap(),
    vec!["Deep nets We train.", "Priors We infer."]
  );
  assert!(extract_abstracts(RECORDS, &["q-bio"]).unwrap().is_empty());
}

#[test]
fn extract_abstracts_malformed() {
  assert!(extract_abstracts(&["{not json"], DEFAULT_CATEGORIES).is_err());
  assert!(match extract_abstracts(&[r#"{"title": "x"}"#], DEFAULT_CATEGORIES) {
    Err(Error::Format(_)) => true,
    _ => false,
  });
}

#[test]
fn read_metadata_lines() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("metadata.json");

  fs::write(&path, RECORDS.join("\n")).unwrap();

  let lines = read_metadata(&path).unwrap();

  assert_eq!(lines.len(), RECORDS.len());
  assert_eq!(extract_abstracts(&lines, &["cs.GT"]).unwrap(), vec!["Auctions We bid."]);
  assert!(read_metadata(dir.path().join("missing.json")).is_err());
}

#[test]
fn documents_round_trip() {
  let dir = tempfile::tempdir().unwrap();
  let raw = dir.path().join("raw.json");
  let tokens = dir.path().join("tokens.json");

  let docs = vec!["Deep nets.".to_string(), "Café \"quoted\"\n".to_string()];
  let toks = vec![vec!["deep".to_string(), "net".to_string()], vec![]];

  export_documents(&docs, &raw).unwrap();
  export_documents(&toks, &tokens).unwrap();

  assert_eq!(load_documents::<Vec<String>, _>(&raw).unwrap(), docs);
  assert_eq!(load_documents::<Vec<Vec<String>>, _>(&tokens).unwrap(), toks);
  assert!(load_documents::<Vec<Vec<String>>, _>(&raw).is_err());
}

#[test]
fn model_round_trip() {
  use crate::params::Standard;
  use crate::preprocessor::{FitParameters, Preprocessor};

  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("models").join("model.json");
  let docs = vec!["Graph neural networks, part one."; 8];

  let mut pre = Preprocessor::<Standard>::new().unwrap();

  pre
    .fit_transform(&docs, &FitParameters::new().n_gram_threshold(0.3))
    .unwrap();

  create_directory_if_not_exists(path.parent().unwrap()).unwrap();
  export_model(pre.fitted().unwrap(), &path).unwrap();

  let fitted = pre.fitted().unwrap();
  let loaded = load_model(&path).unwrap();
  let phrases = &loaded.phrase_models()[0];

  assert_eq!(loaded.params(), fitted.params());
  assert_eq!(loaded.stopwords(), fitted.stopwords());
  assert_eq!(phrases.len(), 4);
  assert!(fitted.phrase_models()[0]
    .phrases_iter()
    .all(|(l, r, _)| phrases.contains_phrase(l, r)));
}

#[test]
fn create_directory_is_idempotent() {
  let dir = tempfile::tempdir().unwrap();
  let nested = dir.path().join("a").join("b");

  create_directory_if_not_exists(&nested).unwrap();
  create_directory_if_not_exists(&nested).unwrap();

  assert!(nested.is_dir());
}

#[cfg(feature = "pdf")]
#[test]
fn extract_pdf_texts_reads_every_file() {
  let texts = extract_pdf_texts("test/pdf").unwrap();
  let text: Vec<&str> = texts[0].split_whitespace().collect();

  assert_eq!(texts.len(), 1);
  assert_eq!(text.join(" "), "Graph neural networks for chemistry.");
}

#[cfg(feature = "pdf")]
#[test]
fn extract_pdf_texts_empty_directory() {
  let dir = tempfile::tempdir().unwrap();

  assert!(extract_pdf_texts(dir.path()).unwrap().is_empty());
}

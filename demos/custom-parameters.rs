use abstractor::params::*;
use abstractor::{FitParameters, PosTag, Preprocessor, Scoring};
use phf::phf_set;

struct MyParams;

impl DefinesHeadingMarkers for MyParams {
  const HEADING_MARKERS: &'static [&'static str] = &["Keywords:", "Comments:", "arXiv:"];
}
impl DefinesSectionAnchors for MyParams {
  const SECTION_ANCHORS: &'static [(&'static str, &'static str)] = &[];
}
impl DefinesEquationDelimiter for MyParams {}
impl DefinesStopwords for MyParams {}
impl DefinesFillerWords for MyParams {
  const FILLER_WORDS: &'static Set<&'static str> = &phf_set! {
    "paper", "result", "method", "approach", "work"
  };
}

impl TokenizerParameters for MyParams {
  const MIN_TOKEN_LEN: usize = 3;
  const MAX_TOKEN_LEN: usize = 20;
}

// Abstracts fetched from arXiv listings carry metadata lines instead of
// syllabus sections. The parameters above drop those lines, skip section
// stripping altogether, and filter words that are common in any abstract.
fn main() -> abstractor::Result<()> {
  env_logger::init();

  let docs: Vec<String> = [
    "message passing",
    "spectral filters",
    "attention heads",
    "graph pooling",
    "edge features",
    "random walks",
  ]
  .iter()
  .map(|topic| {
    format!(
      "Graph neural networks with {}.\nKeywords: graphs, deep learning\n\
       In this paper we show that graph neural networks benefit from {}.",
      topic, topic
    )
  })
  .collect();

  let params = FitParameters::new()
    .additional_stopwords(vec!["show", "benefit"])
    .max_n(4)
    .scoring(Scoring::Npmi)
    .n_gram_threshold(0.6)
    .pos_tags(vec![PosTag::Noun, PosTag::Propn]);

  let mut pre = Preprocessor::<MyParams>::new()?;

  println!("\n-- Fitted using custom parameters --\n");
  for tokens in pre.fit_transform(&docs, &params)? {
    println!("{:?}", tokens);
  }

  Ok(())
}

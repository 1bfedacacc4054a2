use abstractor::corpus;
use abstractor::{FitParameters, Preprocessor, Standard};

fn main() -> abstractor::Result<()> {
  env_logger::init();

  let docs = [
    include_str!("../test/raw/bayesian-optimization.txt"),
    include_str!("../test/raw/graph-neural-networks.txt"),
    include_str!("../test/raw/sparse-attention.txt"),
    include_str!("../test/raw/syllabus.txt"),
  ];

  // Phrase scores grow with the vocabulary, so a small corpus needs a lower
  // threshold and minimum count than the defaults.
  let params = FitParameters::new().min_count(2).n_gram_threshold(1.0);
  let mut pre = Preprocessor::<Standard>::new()?;

  println!("\n-- Fitted --");
  for tokens in pre.fit_transform(&docs, &params)? {
    println!("{:?}", tokens);
  }

  println!("\n-- Learned phrases --");
  if let Some(model) = pre.fitted() {
    for phrases in model.phrase_models() {
      for (left, right, score) in phrases.phrases_iter() {
        println!("{} {} ({:.2})", left, right, score);
      }
    }
  }

  // New documents reuse the fitted state.
  println!("\n-- Transformed --");
  let unseen = ["Sparse attention lets graph neural networks scale to large graphs."];

  for tokens in pre.transform(&unseen)? {
    println!("{:?}", tokens);
  }

  // The fitted state can be saved and loaded back later.
  let dir = std::env::temp_dir().join("abstractor");
  let path = dir.join("model.json");

  corpus::create_directory_if_not_exists(&dir)?;

  if let Some(model) = pre.fitted() {
    corpus::export_model(model, &path)?;
  }

  let reloaded = Preprocessor::<Standard>::from_model(corpus::load_model(&path)?)?;

  assert_eq!(reloaded.transform(&unseen)?, pre.transform(&unseen)?);
  println!("\nModel saved to {:?}", path);

  Ok(())
}

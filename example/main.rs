use std::env;
use std::path::PathBuf;
use std::process;

use abstractor::corpus::{self, DEFAULT_CATEGORIES};
use abstractor::{FitParameters, Preprocessor, Standard};
use log::{error, info};

// Usage: abstractor_example <metadata.json> <output dir>
//
// Filters an arXiv metadata snapshot down to the default categories, fits the
// pipeline on the abstracts, and writes the token sequences and the fitted
// model to the output directory.
fn run(metadata: PathBuf, out_dir: PathBuf) -> abstractor::Result<()> {
  let records = corpus::read_metadata(&metadata)?;
  let abstracts = corpus::extract_abstracts(&records, DEFAULT_CATEGORIES)?;

  let mut pre = Preprocessor::<Standard>::new()?;
  let tokens = pre.fit_transform(&abstracts, &FitParameters::default())?;

  corpus::create_directory_if_not_exists(&out_dir)?;
  corpus::export_documents(&abstracts, out_dir.join("abstracts.json"))?;
  corpus::export_documents(&tokens, out_dir.join("tokens.json"))?;

  if let Some(model) = pre.fitted() {
    corpus::export_model(model, out_dir.join("model.json"))?;

    for (n, phrases) in model.phrase_models().iter().enumerate() {
      info!("model {} merges {} pairs", n + 2, phrases.len());
    }
  }

  println!("==Documents ({})==", tokens.len());

  for doc in tokens.iter().take(5) {
    println!("{:?}", doc);
  }

  Ok(())
}

fn main() {
  env_logger::init();

  let mut args = env::args_os().skip(1);

  match (args.next(), args.next()) {
    (Some(metadata), Some(out_dir)) => {
      if let Err(e) = run(metadata.into(), out_dir.into()) {
        error!("{}", e);
        process::exit(1);
      }
    }
    _ => {
      eprintln!("usage: abstractor_example <metadata.json> <output dir>");
      process::exit(2);
    }
  }
}

// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;

use rustc_serialize::json;
use thiserror::Error;

/// Errors raised by the pipeline and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
  /// Learned state was requested before `fit_transform` ran.
  #[error("preprocessor has not been fitted; call `fit_transform` first")]
  NotFitted,

  #[error("invalid parameter: {0}")]
  InvalidParameter(String),

  #[error("failed to compile anchor pattern: {0}")]
  Regex(#[from] regex::Error),

  #[error("i/o error: {0}")]
  Io(#[from] io::Error),

  #[error("malformed json: {0}")]
  JsonParse(#[from] json::ParserError),

  #[error("failed to decode json: {0}")]
  JsonDecode(#[from] json::DecoderError),

  #[error("failed to encode json: {0}")]
  JsonEncode(#[from] json::EncoderError),

  /// Well-formed JSON without the expected structure.
  #[error("unexpected data layout: {0}")]
  Format(&'static str),

  #[cfg(feature = "scrape")]
  #[error("http request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[cfg(feature = "scrape")]
  #[error("could not find {0} on the page")]
  Scrape(&'static str),

  #[cfg(feature = "pdf")]
  #[error("failed to extract pdf text: {0}")]
  Pdf(#[from] pdf_extract::OutputError),
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

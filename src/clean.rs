// Copyright 2026 abstractor developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Raw text cleanup: boilerplate stripping, equation removal and whitespace
//! normalization. All of these run on whole documents, before tokenization.

use std::borrow::Cow;
use std::marker::PhantomData;

use regex::{NoExpand, Regex};

use crate::error::Result;
use crate::params::{DefinesEquationDelimiter, DefinesHeadingMarkers, DefinesSectionAnchors};

/// Trims the document and turns escaped `\n` and `\xa0` sequences, which
/// survive some extraction tools as literal text, back into characters.
#[inline]
fn unescape(doc: &str) -> String {
  doc.trim().replace("\\n", "\n").replace("\\xa0", " ")
}

/// Line boundaries recognised by the heading pass. `\r\n` counts as one.
const LINE_BREAKS: &[char] = &[
  '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Splits on every line boundary, including form feeds, lone carriage
/// returns and the Unicode line and paragraph separators.
fn split_lines(text: &str) -> Vec<&str> {
  let mut lines: Vec<&str> = text.split(LINE_BREAKS).collect();

  // A trailing boundary closes the last line instead of opening a new one.
  if text.ends_with(LINE_BREAKS) {
    lines.pop();
  }

  lines
}

/// Strips known non-content text from documents.
///
/// The heading pass drops whole lines; the section pass collapses the text
/// between paired anchors, keeping both anchors.
pub struct BoilerplateStripper<P> {
  sections: Vec<(Regex, String)>,
  params: PhantomData<P>,
}

impl<P> BoilerplateStripper<P>
where
  P: DefinesHeadingMarkers + DefinesSectionAnchors,
{
  /// Compiles one pattern per anchor pair.
  pub fn new() -> Result<BoilerplateStripper<P>> {
    let mut sections = Vec::with_capacity(P::SECTION_ANCHORS.len());

    for &(start, end) in P::SECTION_ANCHORS {
      let re = Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(start),
        regex::escape(end)
      ))?;

      sections.push((re, format!("{}\n{}", start, end)));
    }

    Ok(BoilerplateStripper {
      sections,
      params: PhantomData,
    })
  }

  /// Removes every line containing a heading marker.
  pub fn remove_heading(&self, doc: &str) -> String {
    let text = unescape(doc).replace("\r\n", "\n");

    split_lines(&text)
      .into_iter()
      .filter(|line| !P::HEADING_MARKERS.iter().any(|m| line.contains(m)))
      .collect::<Vec<&str>>()
      .join("\n")
  }

  /// Collapses `start ... end` to `start\nend` for each anchor pair, in order.
  pub fn remove_useless_info(&self, doc: &str) -> String {
    let mut text = unescape(doc);

    for (re, replacement) in self.sections.iter() {
      text = re.replace_all(&text, NoExpand(replacement)).into_owned();
    }

    text
  }
}

/// Removes inline equations: the text between each consecutive pair of
/// delimiters, delimiters included.
///
/// When the delimiter count is odd the pairing is ambiguous and the document
/// is returned unchanged.
pub fn remove_latex_equations<P>(doc: &str) -> Cow<'_, str>
where
  P: DefinesEquationDelimiter,
{
  let delims: Vec<usize> = doc
    .char_indices()
    .filter(|&(_, c)| c == P::EQUATION_DELIMITER)
    .map(|(i, _)| i)
    .collect();

  if delims.is_empty() || delims.len() % 2 != 0 {
    return Cow::Borrowed(doc);
  }

  let width = P::EQUATION_DELIMITER.len_utf8();
  let mut parsed = String::with_capacity(doc.len());
  let mut last = 0;

  for pair in delims.chunks(2) {
    parsed.push_str(&doc[last..pair[0]]);
    last = pair[1] + width;
  }

  parsed.push_str(&doc[last..]);

  Cow::Owned(parsed)
}

/// Replaces every run of whitespace (newlines included) with a single space.
pub fn remove_newlines(doc: &str) -> String {
  let mut normalized = String::with_capacity(doc.len());
  let mut in_space = false;

  for c in doc.chars() {
    if c.is_whitespace() {
      if !in_space {
        normalized.push(' ');
        in_space = true;
      }
    } else {
      normalized.push(c);
      in_space = false;
    }
  }

  normalized
}

#[cfg(test)]
use crate::params::Standard;

#[cfg(test)]
fn stripper() -> BoilerplateStripper<Standard> {
  BoilerplateStripper::new().unwrap()
}

#[test]
fn remove_heading_drops_marker_lines() {
  let doc = "Instructors: J. Smith\nCourse Overview.\nDepartment of Physics\nTopics.";

  assert_eq!(stripper().remove_heading(doc), "Course Overview.\nTopics.");
}

#[test]
fn remove_heading_splits_on_every_line_boundary() {
  assert_eq!(stripper().remove_heading("Instructors: A\rGraph theory"), "Graph theory");
  assert_eq!(
    stripper().remove_heading("Workload: 5\x0cGraph theory\r\nCampus: X\u{2028}Trees"),
    "Graph theory\nTrees"
  );
  assert_eq!(
    stripper().remove_heading("Trees\x1cDepartment of Physics\x1c"),
    "Trees"
  );
  assert_eq!(stripper().remove_heading(""), "");
}

#[test]
fn remove_heading_unescapes_before_splitting() {
  let doc = "  Workload: 5 ECTS\\nGraph theory\\xa0basics\\nCampus: North  ";

  assert_eq!(stripper().remove_heading(doc), "Graph theory basics");
}

#[test]
fn remove_heading_matches_non_breaking_markers() {
  let doc = "Language\u{a0}of\u{a0}instruction: English\nOn\u{ad}site\u{a0}hours: 40\nKept";

  assert_eq!(stripper().remove_heading(doc), "Kept");
}

#[test]
fn remove_useless_info_keeps_anchors() {
  let doc = "Intro.\nGrading: 50% exam.\nmore\nResources: none.";

  assert_eq!(
    stripper().remove_useless_info(doc),
    "Intro.\nGrading\nResources: none."
  );
}

#[test]
fn remove_useless_info_is_non_greedy() {
  let doc = "Grading a Resources b Grading c Resources d";

  assert_eq!(
    stripper().remove_useless_info(doc),
    "Grading\nResources b Grading\nResources d"
  );
}

#[test]
fn remove_useless_info_chains_pairs() {
  let doc = "Class\u{a0}components\u{a0}(lecture,\u{a0}labs,\u{a0}etc.) lectures \
             Grading exams Resources books \
             Learning\u{a0}outcomes\u{a0}covered\u{a0}on\u{a0}the\u{a0}course graphs";

  assert_eq!(
    stripper().remove_useless_info(doc),
    "Class\u{a0}components\u{a0}(lecture,\u{a0}labs,\u{a0}etc.)\nGrading\n\
     Resources\nLearning\u{a0}outcomes\u{a0}covered\u{a0}on\u{a0}the\u{a0}course graphs"
  );
}

#[test]
fn remove_useless_info_course_support_route() {
  // Without a `Resources` after `Grading`, the support anchors take over.
  let doc = "Grading exams Course\u{a0}support forum";

  assert_eq!(
    stripper().remove_useless_info(doc),
    "Grading\nCourse\u{a0}support forum"
  );
}

#[test]
fn remove_useless_info_without_end_anchor() {
  let doc = "Grading: 50% exam, nothing after.";

  assert_eq!(stripper().remove_useless_info(doc), doc);
}

#[test]
fn remove_latex_equations_even() {
  let doc = "Let $x+y$ be a sum and $z$ a value.";

  assert_eq!(
    remove_latex_equations::<Standard>(doc),
    "Let  be a sum and  a value."
  );
}

#[test]
fn remove_latex_equations_odd_is_unchanged() {
  let doc = "Costs $5 and $x$ here.";

  assert_eq!(remove_latex_equations::<Standard>(doc), doc);
}

#[test]
fn remove_latex_equations_adjacent_and_multibyte() {
  let doc = "é$a$$b$ü $\u{3b1}$";

  assert_eq!(remove_latex_equations::<Standard>(doc), "éü ");
}

#[test]
fn remove_latex_equations_no_delimiters() {
  assert!(matches!(
    remove_latex_equations::<Standard>("plain text"),
    Cow::Borrowed("plain text")
  ));
}

#[test]
fn remove_newlines_collapses_runs() {
  assert_eq!(
    remove_newlines("a \n\n b\t\tc\u{a0}d "),
    "a b c d "
  );
}

#[test]
fn remove_newlines_is_idempotent() {
  let docs = ["", " ", "\n\nx\r\ny  z\t", "Grading\nResources: none.  is great."];

  for doc in docs.iter() {
    let once = remove_newlines(doc);

    assert_eq!(remove_newlines(&once), once);
  }
}

#[test]
fn strip_worked_example() {
  let stripper = stripper();
  let doc = "Instructors: J. Smith\nCourse Overview.\nGrading: 50% exam. \
             Resources: none. $x+y$ is great.";

  let doc = stripper.remove_heading(doc);
  let doc = stripper.remove_useless_info(&doc);
  let doc = remove_latex_equations::<Standard>(&doc).into_owned();
  let doc = remove_newlines(&doc);

  assert_eq!(doc, "Course Overview. Grading Resources: none. is great.");
}

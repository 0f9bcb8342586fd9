//! Query term highlighting for search result fragments
//!
//! Terms are combined into one case-insensitive alternation and matched in
//! a single pass, so a term can never match inside markup produced for an
//! earlier term. Longer terms are tried first, which makes overlapping
//! terms resolve to the longest match at any position.

use regex::{Regex, RegexBuilder};

use ragdesk_core::{Error, Result};

/// One piece of a highlighted fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    Plain(&'t str),
    Marked(&'t str),
}

impl<'t> Segment<'t> {
    pub fn text(&self) -> &'t str {
        match self {
            Segment::Plain(s) | Segment::Marked(s) => s,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Segment::Marked(_))
    }
}

/// Splits fragments into plain and marked spans for a fixed set of terms
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Build a highlighter for the given terms. Blank terms are dropped;
    /// with no usable terms every fragment comes back as one plain span.
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let mut terms: Vec<&str> = terms
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| !t.trim().is_empty())
            .collect();
        if terms.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Longest first so the alternation prefers the longest term
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidInput(format!("bad highlight pattern: {}", e)))?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Split `text` into spans, preserving the original casing of matches
    pub fn segments<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let Some(ref pattern) = self.pattern else {
            return if text.is_empty() {
                Vec::new()
            } else {
                vec![Segment::Plain(text)]
            };
        };

        let mut segments = Vec::new();
        let mut cursor = 0;
        for found in pattern.find_iter(text) {
            if found.start() > cursor {
                segments.push(Segment::Plain(&text[cursor..found.start()]));
            }
            segments.push(Segment::Marked(found.as_str()));
            cursor = found.end();
        }
        if cursor < text.len() {
            segments.push(Segment::Plain(&text[cursor..]));
        }
        segments
    }

    /// Render `text` as escaped markup with `<mark>` around matches.
    /// Both plain and marked spans are escaped, so fragments containing
    /// markup characters cannot smuggle tags into the output.
    pub fn to_marked(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for segment in self.segments(text) {
            match segment {
                Segment::Plain(s) => out.push_str(&escape(s)),
                Segment::Marked(s) => {
                    out.push_str("<mark>");
                    out.push_str(&escape(s));
                    out.push_str("</mark>");
                }
            }
        }
        out
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// src/engine/parser.rs

//! Line-oriented question document parser.
//!
//! ```text
//! Category: math
//! Question: 2+2?
//! A) 3 B) 4 C) 5 D) 6
//! Answer: 4
//! ```
//!
//! Keywords are case-insensitive and blank lines are skipped. The parser never
//! fails: anything it cannot make sense of is dropped or left empty, and
//! reported as a [`ParseWarning`].

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::models::{category::Category, question::Question};

/// `A)`, `b.` etc. are not markers: letters are upper-case A to D only.
static OPTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-D][.)](?:\s+|$)").expect("option marker pattern is valid")
});

/// Something in the document that did not produce a well-formed question.
/// `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    UnknownCategory { line: usize, value: String },
    EmptyQuestion { line: usize },
    DanglingAnswer { line: usize },
    DanglingOptions { line: usize },
    OptionsOverwritten { line: usize, question: String },
    MissingCategory { line: usize, question: String },
    MissingOptions { question: String },
    MissingAnswer { question: String },
    AnswerNotInOptions { question: String, answer: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnknownCategory { line, value } => {
                write!(f, "line {}: unknown category '{}' ignored", line, value)
            }
            ParseWarning::EmptyQuestion { line } => {
                write!(f, "line {}: question has no text and was dropped", line)
            }
            ParseWarning::DanglingAnswer { line } => {
                write!(f, "line {}: answer without a question ignored", line)
            }
            ParseWarning::DanglingOptions { line } => {
                write!(f, "line {}: options without a question ignored", line)
            }
            ParseWarning::OptionsOverwritten { line, question } => {
                write!(f, "line {}: options of '{}' replaced", line, question)
            }
            ParseWarning::MissingCategory { line, question } => {
                write!(f, "line {}: '{}' has no category and was dropped", line, question)
            }
            ParseWarning::MissingOptions { question } => {
                write!(f, "'{}' has no options", question)
            }
            ParseWarning::MissingAnswer { question } => {
                write!(f, "'{}' has no answer", question)
            }
            ParseWarning::AnswerNotInOptions { question, answer } => {
                write!(f, "answer '{}' of '{}' is not one of its options", answer, question)
            }
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ParseReport {
    pub questions: Vec<Question>,
    pub warnings: Vec<ParseWarning>,
}

/// Question being assembled between two `Question:` lines.
struct Pending {
    line: usize,
    category: Option<Category>,
    text: String,
    options: Option<Vec<String>>,
    answer: String,
}

/// Parses a document and logs every anomaly at warn level.
///
/// `hint` is the category used until the document's first `Category:` line.
pub fn parse_document(text: &str, hint: Option<Category>) -> Vec<Question> {
    let report = parse_document_with_report(text, hint);
    for warning in &report.warnings {
        tracing::warn!("Question document: {}", warning);
    }
    report.questions
}

pub fn parse_document_with_report(text: &str, hint: Option<Category>) -> ParseReport {
    let mut report = ParseReport::default();
    let mut category = hint;
    let mut pending: Option<Pending> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(value) = strip_keyword(line, "category:") {
            match value.parse::<Category>() {
                Ok(c) => category = Some(c),
                Err(_) => report.warnings.push(ParseWarning::UnknownCategory {
                    line: line_no,
                    value: value.to_string(),
                }),
            }
        } else if let Some(rest) = strip_keyword(line, "question:") {
            if let Some(prev) = pending.take() {
                finish(prev, &mut report);
            }
            if rest.is_empty() {
                report.warnings.push(ParseWarning::EmptyQuestion { line: line_no });
            } else {
                pending = Some(Pending {
                    line: line_no,
                    category,
                    text: rest.to_string(),
                    options: None,
                    answer: String::new(),
                });
            }
        } else if let Some(rest) = strip_keyword(line, "answer:") {
            match pending.as_mut() {
                Some(q) => q.answer = rest.to_string(),
                None => report.warnings.push(ParseWarning::DanglingAnswer { line: line_no }),
            }
        } else if OPTION_MARKER.is_match(line) {
            match pending.as_mut() {
                Some(q) => {
                    if q.options.is_some() {
                        report.warnings.push(ParseWarning::OptionsOverwritten {
                            line: line_no,
                            question: q.text.clone(),
                        });
                    }
                    q.options = Some(split_options(line));
                }
                None => report.warnings.push(ParseWarning::DanglingOptions { line: line_no }),
            }
        }
    }

    if let Some(last) = pending.take() {
        finish(last, &mut report);
    }

    report
}

/// Extracts option contents in marker order. Each runs up to the next marker.
pub fn split_options(line: &str) -> Vec<String> {
    let markers: Vec<_> = OPTION_MARKER.find_iter(line).collect();
    markers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = markers.get(i + 1).map_or(line.len(), |next| next.start());
            line[m.end()..end].trim().to_string()
        })
        .collect()
}

fn finish(pending: Pending, report: &mut ParseReport) {
    let Some(category) = pending.category else {
        report.warnings.push(ParseWarning::MissingCategory {
            line: pending.line,
            question: pending.text,
        });
        return;
    };

    let question = Question {
        options: pending.options.unwrap_or_default(),
        answer: pending.answer,
        ..Question::new(category, pending.text)
    };

    if question.options.is_empty() {
        report.warnings.push(ParseWarning::MissingOptions {
            question: question.text.clone(),
        });
    }
    if question.answer.is_empty() {
        report.warnings.push(ParseWarning::MissingAnswer {
            question: question.text.clone(),
        });
    } else if !question.options.is_empty() && !question.answer_in_options() {
        report.warnings.push(ParseWarning::AnswerNotInOptions {
            question: question.text.clone(),
            answer: question.answer.clone(),
        });
    }

    report.questions.push(question);
}

/// Case-insensitive prefix match; returns the trimmed remainder.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(line[keyword.len()..].trim())
    } else {
        None
    }
}

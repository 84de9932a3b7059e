//! Structured access to javadoc comments.
//!
//! Declarations carry their raw `/** … */` text (see
//! [`crate::ast::MethodDecl::documentation`] and friends); this module turns
//! that text into a [`DocBlock`]: a free-form description followed by
//! `@tag` blocks. Tag names are open-ended -- the well-known ones are
//! broken out into dedicated fields, and every tag also lands in the
//! catch-all [`DocBlock::tags`] map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("not a valid javadoc comment")]
pub struct JavadocError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocBlock {
    pub description: String,
    pub return_doc: Option<String>,
    /// `@param` entries: (name, whitespace-joined description).
    pub params: Vec<(String, String)>,
    pub authors: Vec<String>,
    pub deprecated: bool,
    /// `@throws` entries; `@exception` is an alias and lands here too.
    pub throws: BTreeMap<String, String>,
    /// Every tag as written, including the well-known ones above.
    pub tags: BTreeMap<String, Vec<String>>,
}

impl DocBlock {
    fn add_block(&mut self, name: &str, value: &str) {
        let value = value.trim();

        match name {
            "param" => {
                let (param, description) = split_once_whitespace(value);
                self.params.push((param.to_owned(), join(description)));
            }
            "throws" | "exception" => {
                let (ex, description) = split_once_whitespace(value);
                self.throws.insert(ex.to_owned(), join(description));
            }
            "return" => {
                self.return_doc = Some(value.to_owned());
            }
            "author" => {
                self.authors.push(value.to_owned());
            }
            "deprecated" => {
                self.deprecated = true;
            }
            _ => {}
        }

        self.tags
            .entry(name.to_owned())
            .or_default()
            .push(value.to_owned());
    }
}

/// Collapse a multi-line value into one whitespace-joined line.
fn join(s: &str) -> String {
    s.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_once_whitespace(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

/// Parse a raw `/** … */` comment into a [`DocBlock`].
pub fn parse(raw: &str) -> Result<DocBlock, JavadocError> {
    let sanitized = sanitize(raw)?;
    let uncommented = uncomment(&sanitized);
    let justified = left_justify(&uncommented);
    let prepared = force_blocks_left(&justified);

    let mut doc = DocBlock::default();
    let mut description = Vec::new();
    let mut blocks: Vec<String> = Vec::new();

    for line in prepared.split('\n') {
        if let Some(rest) = line.strip_prefix('@') {
            blocks.push(rest.to_owned());
        } else if let Some(last) = blocks.last_mut() {
            last.push('\n');
            last.push_str(line);
        } else {
            description.push(line);
        }
    }

    doc.description = description.join("\n").trim().to_owned();
    for block in &blocks {
        let (tag, value) = split_once_whitespace(block);
        doc.add_block(tag, value);
    }

    Ok(doc)
}

fn sanitize(raw: &str) -> Result<String, JavadocError> {
    let s = raw.trim();
    if !(s.starts_with("/**") && s.ends_with("*/") && s.len() >= 4) {
        return Err(JavadocError);
    }
    Ok(s.replace('\t', "    "))
}

/// Strip the delimiters and the `*` gutter.
fn uncomment(s: &str) -> String {
    let body = if s.len() >= 5 { &s[3..s.len() - 2] } else { "" };
    body.trim()
        .split('\n')
        .map(|line| {
            let stripped = line.trim_start();
            match stripped.strip_prefix('*') {
                Some(rest) => rest,
                None => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove the indentation shared by every non-blank line.
fn left_justify(s: &str) -> String {
    let s = s.trim_end();
    let indents: Vec<usize> = s
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .collect();
    let common = match indents.iter().min() {
        Some(&n) if n > 0 => n,
        _ => return s.to_owned(),
    };
    s.split('\n')
        .map(|line| line.get(common..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tag lines may still be indented relative to the description; pull every
/// `@` to column zero so block splitting sees them.
fn force_blocks_left(s: &str) -> String {
    s.split('\n')
        .map(|line| {
            let stripped = line.trim_start();
            if stripped.starts_with('@') {
                stripped
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_and_tags_split_apart() {
        let doc = parse(
            "/**\n\
             \x20* Schedules a job for execution.\n\
             \x20*\n\
             \x20* @param job   the job to run\n\
             \x20* @param delay milliseconds to wait,\n\
             \x20*              non-negative\n\
             \x20* @return the transaction id\n\
             \x20* @throws IllegalStateException if the queue is full\n\
             \x20*/",
        )
        .unwrap();

        assert_eq!(doc.description, "Schedules a job for execution.");
        assert_eq!(
            doc.params,
            vec![
                ("job".to_owned(), "the job to run".to_owned()),
                (
                    "delay".to_owned(),
                    "milliseconds to wait, non-negative".to_owned()
                ),
            ]
        );
        assert_eq!(doc.return_doc.as_deref(), Some("the transaction id"));
        assert_eq!(
            doc.throws.get("IllegalStateException").map(String::as_str),
            Some("if the queue is full")
        );
    }

    #[test]
    fn exception_is_an_alias_for_throws() {
        let doc = parse("/** @exception IOException on disk trouble */").unwrap();
        assert_eq!(
            doc.throws.get("IOException").map(String::as_str),
            Some("on disk trouble")
        );
    }

    #[test]
    fn deprecated_and_author() {
        let doc = parse(
            "/**\n\
             \x20* Old entry point.\n\
             \x20* @deprecated\n\
             \x20* @author cthunes\n\
             \x20*/",
        )
        .unwrap();
        assert!(doc.deprecated);
        assert_eq!(doc.authors, vec!["cthunes".to_owned()]);
    }

    #[test]
    fn every_tag_lands_in_the_catch_all_map() {
        let doc = parse("/** @since 11\n * @see Bundle */").unwrap();
        assert_eq!(doc.tags.get("since"), Some(&vec!["11".to_owned()]));
        assert_eq!(doc.tags.get("see"), Some(&vec!["Bundle".to_owned()]));
    }

    #[test]
    fn tag_only_comment_has_empty_description() {
        let doc = parse("/** @return nothing */").unwrap();
        assert_eq!(doc.description, "");
        assert_eq!(doc.return_doc.as_deref(), Some("nothing"));
    }

    #[test]
    fn param_without_description() {
        let doc = parse("/** @param flags */").unwrap();
        assert_eq!(doc.params, vec![("flags".to_owned(), "".to_owned())]);
    }

    #[test]
    fn non_javadoc_text_is_rejected() {
        assert_eq!(parse("/* plain comment */"), Err(JavadocError));
        assert_eq!(parse("// line"), Err(JavadocError));
        assert_eq!(parse(""), Err(JavadocError));
    }
}

//! User templates with `{{name}}` placeholders
//!
//! The text between `{{#commits}}` and `{{/commits}}` is repeated once per
//! commit; text outside the block is rendered once. A template without a
//! block is repeated as a whole for every commit.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use tracing::debug;

use loggit_core::error::RenderError;
use loggit_git::CommitRecord;

use crate::document::LogDocument;

const BLOCK_OPEN: &str = "{{#commits}}";
const BLOCK_CLOSE: &str = "{{/commits}}";

/// Placeholders available inside the commits block
pub const COMMIT_VARIABLES: &[&str] = &[
    "id",
    "short_id",
    "author_name",
    "author_email",
    "date",
    "short_message",
    "full_message",
    "tags",
];

/// Placeholders available anywhere
pub const DOCUMENT_VARIABLES: &[&str] = &["count"];

/// Parsed and checked user template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    path: PathBuf,
    header: String,
    body: String,
    footer: String,
}

impl Template {
    /// Read and parse a template file
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let source = fs::read_to_string(path).map_err(|source| RenderError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source, path)
    }

    /// Parse template text; `path` is used in error messages
    pub fn parse(source: &str, path: &Path) -> Result<Self, RenderError> {
        let unbalanced = || RenderError::UnbalancedBlock(path.to_path_buf());

        let (header, body, footer) = match (source.find(BLOCK_OPEN), source.find(BLOCK_CLOSE)) {
            (None, None) => (String::new(), source.to_string(), String::new()),
            (Some(open), Some(close)) if open < close => {
                let header = &source[..open];
                let body = &source[open + BLOCK_OPEN.len()..close];
                let footer = &source[close + BLOCK_CLOSE.len()..];
                if [header, body, footer]
                    .iter()
                    .any(|part| part.contains(BLOCK_OPEN) || part.contains(BLOCK_CLOSE))
                {
                    return Err(unbalanced());
                }
                (header.to_string(), body.to_string(), footer.to_string())
            }
            _ => return Err(unbalanced()),
        };

        let template = Self {
            path: path.to_path_buf(),
            header,
            body,
            footer,
        };
        template.check_variables()?;

        debug!(path = %path.display(), "template loaded");
        Ok(template)
    }

    /// Path the template was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_variables(&self) -> Result<(), RenderError> {
        let outside = format!("{}{}", self.header, self.footer);
        let unknown = variable_names(&self.body)
            .into_iter()
            .find(|name| !is_commit_variable(name) && !DOCUMENT_VARIABLES.contains(&name.as_str()))
            .or_else(|| {
                variable_names(&outside)
                    .into_iter()
                    .find(|name| !DOCUMENT_VARIABLES.contains(&name.as_str()))
            });

        match unknown {
            Some(name) => Err(RenderError::UnknownVariable {
                name,
                path: self.path.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Render the document
    pub fn render(&self, doc: &LogDocument) -> String {
        let count = doc.len().to_string();
        let document_value = |name: &str| (name == "count").then(|| count.clone());

        let mut output = substitute(&self.header, document_value);
        for commit in &doc.commits {
            output.push_str(&substitute(&self.body, |name| {
                commit_value(commit, name).or_else(|| document_value(name))
            }));
        }
        output.push_str(&substitute(&self.footer, document_value));

        output
    }
}

fn is_commit_variable(name: &str) -> bool {
    COMMIT_VARIABLES.contains(&name)
}

fn commit_value(commit: &CommitRecord, name: &str) -> Option<String> {
    let value = match name {
        "id" => commit.id.clone(),
        "short_id" => commit.short_id().to_string(),
        "author_name" => commit.author_name.clone(),
        "author_email" => commit.author_email.clone(),
        "date" => commit.authored_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "short_message" => commit.short_message.clone(),
        "full_message" => commit.full_message.clone(),
        "tags" => commit.tags.join(", "),
        _ => return None,
    };
    Some(value)
}

/// Names used in `{{...}}` placeholders, in order of first appearance
fn variable_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("{{") {
        remaining = &remaining[start + 2..];
        if let Some(end) = remaining.find("}}") {
            let name = remaining[..end].trim().to_string();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
            remaining = &remaining[end + 2..];
        } else {
            break;
        }
    }

    names
}

/// Replace placeholders in one pass, so substituted values are never rescanned.
///
/// Placeholders the lookup does not know are kept verbatim.
fn substitute<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(text.len());
    let mut remaining = text;

    while let Some(start) = remaining.find("{{") {
        output.push_str(&remaining[..start]);
        let after = &remaining[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let raw = &remaining[start..start + 2 + end + 2];
                match lookup(after[..end].trim()) {
                    Some(value) => output.push_str(&value),
                    None => output.push_str(raw),
                }
                remaining = &after[end + 2..];
            }
            None => {
                output.push_str(&remaining[start..]);
                remaining = "";
            }
        }
    }
    output.push_str(remaining);

    output
}

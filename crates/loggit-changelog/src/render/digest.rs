//! Markdown digest

use crate::document::LogDocument;

/// Render the document as a markdown digest, one two-line item per commit
pub fn render_digest(doc: &LogDocument) -> String {
    let mut output = String::from("# CHANGELOG\n");

    for commit in &doc.commits {
        output.push_str(&format!(
            "* id: {} (by {})\n",
            commit.short_id(),
            commit.author_name
        ));
        output.push_str(&format!("      {}\n", commit.short_message));
    }

    output
}

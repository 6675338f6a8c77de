//! Intermediate XML document

use chrono::SecondsFormat;

use crate::document::LogDocument;

/// Render the document as the `<log>` XML format
pub fn render_raw(doc: &LogDocument) -> String {
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<log>\n");
    xml.push_str("  <commits>\n");

    for commit in &doc.commits {
        xml.push_str("    <commit>\n");
        xml.push_str(&format!("      <id>{}</id>\n", escape_xml(&commit.id)));
        xml.push_str("      <author>\n");
        xml.push_str(&format!(
            "        <name>{}</name>\n",
            escape_xml(&commit.author_name)
        ));
        xml.push_str(&format!(
            "        <email>{}</email>\n",
            escape_xml(&commit.author_email)
        ));
        xml.push_str(&format!(
            "        <date>{}</date>\n",
            commit.authored_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str("      </author>\n");
        xml.push_str("      <message>\n");
        xml.push_str(&format!(
            "        <short>{}</short>\n",
            escape_xml(&commit.short_message)
        ));
        xml.push_str(&format!(
            "        <full>{}</full>\n",
            escape_xml(&commit.full_message)
        ));
        xml.push_str("      </message>\n");

        if commit.tags.is_empty() {
            xml.push_str("      <taggedAs/>\n");
        } else {
            xml.push_str("      <taggedAs>\n");
            for tag in &commit.tags {
                xml.push_str(&format!("        <tag>{}</tag>\n", escape_xml(tag)));
            }
            xml.push_str("      </taggedAs>\n");
        }

        xml.push_str("    </commit>\n");
    }

    xml.push_str("  </commits>\n");
    xml.push_str("</log>\n");

    xml
}

/// Escape special XML characters.
///
/// Characters XML 1.0 cannot carry at all (C0 controls other than tab, LF
/// and CR, and U+FFFE/U+FFFF) are replaced with U+FFFD.
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c < '\u{20}' || c == '\u{FFFE}' || c == '\u{FFFF}' => {
                escaped.push(char::REPLACEMENT_CHARACTER)
            }
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::fixtures::{record, tagged_log, two_commits};

    #[test]
    fn test_commit_element() {
        let xml = render_raw(&LogDocument::new(two_commits()));

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<log>\n  <commits>\n"));
        assert!(xml.contains(
            "    <commit>\n\
             \x20     <id>fcc814a658aea3537ad5182ff211ed8c58479fb9</id>\n\
             \x20     <author>\n\
             \x20       <name>second</name>\n\
             \x20       <email>second@test.com</email>\n\
             \x20       <date>2018-02-26T16:42:00Z</date>\n\
             \x20     </author>\n\
             \x20     <message>\n\
             \x20       <short>Second commit</short>\n\
             \x20       <full>Second commit</full>\n\
             \x20     </message>\n\
             \x20     <taggedAs/>\n\
             \x20   </commit>\n"
        ));
        assert!(xml.ends_with("  </commits>\n</log>\n"));

        let second = xml.find("<name>second</name>").unwrap();
        let first = xml.find("<name>first</name>").unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_tags_listed() {
        let xml = render_raw(&LogDocument::new(tagged_log()));
        assert!(xml.contains("      <taggedAs>\n        <tag>1.0.0</tag>\n      </taggedAs>\n"));
        assert_eq!(xml.matches("<taggedAs/>").count(), 3);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            render_raw(&LogDocument::default()),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<log>\n  <commits>\n  </commits>\n</log>\n"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = LogDocument::new(vec![record(
            "fcc814a658aea3537ad5182ff211ed8c58479fb9",
            "Tom & \"Jerry\"",
            "Use <T> in 'generic' code",
        )]);
        let xml = render_raw(&doc);
        assert!(xml.contains("<name>Tom &amp; &quot;Jerry&quot;</name>"));
        assert!(xml.contains("<short>Use &lt;T&gt; in &apos;generic&apos; code</short>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn test_control_characters_replaced() {
        let doc = LogDocument::new(vec![record(
            "fcc814a658aea3537ad5182ff211ed8c58479fb9",
            "a",
            "\x1b[31mred\x1b[0m fix\x08\n\tdetails\r\n",
        )]);
        let xml = render_raw(&doc);

        assert!(!xml
            .chars()
            .any(|c| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')));
        assert!(xml.contains("<full>\u{FFFD}[31mred\u{FFFD}[0m fix\u{FFFD}\n\tdetails\r\n</full>"));
    }
}

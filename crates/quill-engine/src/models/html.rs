//! HTML rendering of a chapter tree, with the same tags the web editor emits.

use crate::models::doc::{Doc, Mark, Node};

impl Doc {
    /// Render the tree as an HTML fragment
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.content {
            render_node(node, &mut out);
        }
        out
    }
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, marks } => render_text(text, marks, out),
        Node::HardBreak => out.push_str("<br>"),
        Node::HorizontalRule => out.push_str("<hr>"),
        Node::Paragraph { content } => wrap("p", content, out),
        Node::Heading { attrs, content } => {
            let tag = format!("h{}", attrs.level.clamp(1, 6));
            wrap(&tag, content, out);
        }
        Node::CodeBlock { attrs, content } => {
            out.push_str("<pre><code");
            if let Some(language) = &attrs.language {
                out.push_str(" class=\"language-");
                out.push_str(&html_escape::encode_double_quoted_attribute(language));
                out.push('"');
            }
            out.push('>');
            render_children(content, out);
            out.push_str("</code></pre>");
        }
        Node::Blockquote { content } => wrap("blockquote", content, out),
        Node::BulletList { content } => wrap("ul", content, out),
        Node::OrderedList { attrs, content } => {
            if attrs.start == 1 {
                out.push_str("<ol>");
            } else {
                out.push_str(&format!("<ol start=\"{}\">", attrs.start));
            }
            render_children(content, out);
            out.push_str("</ol>");
        }
        Node::ListItem { content } => wrap("li", content, out),
    }
}

fn wrap(tag: &str, content: &[Node], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_children(content, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_children(content: &[Node], out: &mut String) {
    for child in content {
        render_node(child, out);
    }
}

/// Marks open in order and close in reverse, so the first mark is outermost
fn render_text(text: &str, marks: &[Mark], out: &mut String) {
    for mark in marks {
        out.push_str(&open_tag(mark));
    }
    out.push_str(&html_escape::encode_text(text));
    for mark in marks.iter().rev() {
        out.push_str(close_tag(mark));
    }
}

fn open_tag(mark: &Mark) -> String {
    match mark {
        Mark::Bold => "<strong>".to_string(),
        Mark::Italic => "<em>".to_string(),
        Mark::Underline => "<u>".to_string(),
        Mark::Strike => "<s>".to_string(),
        Mark::Code => "<code>".to_string(),
        Mark::TextStyle { attrs } => match &attrs.font_family {
            Some(family) => format!(
                "<span style=\"font-family: {}\">",
                html_escape::encode_double_quoted_attribute(family)
            ),
            None => "<span>".to_string(),
        },
    }
}

fn close_tag(mark: &Mark) -> &'static str {
    match mark {
        Mark::Bold => "</strong>",
        Mark::Italic => "</em>",
        Mark::Underline => "</u>",
        Mark::Strike => "</s>",
        Mark::Code => "</code>",
        Mark::TextStyle { .. } => "</span>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::doc::{CodeBlockAttrs, OrderedListAttrs, TextStyleAttrs};
    use pretty_assertions::assert_eq;

    #[test]
    fn paragraphs_and_headings() {
        let doc = Doc::new(vec![
            Node::heading(2, "Partida"),
            Node::paragraph("Las luces"),
            Node::paragraph(""),
        ]);

        assert_eq!(doc.to_html(), "<h2>Partida</h2><p>Las luces</p><p></p>");
    }

    #[test]
    fn marks_nest_in_order() {
        let doc = Doc::new(vec![Node::Paragraph {
            content: vec![
                Node::marked_text("nunca", vec![Mark::Bold, Mark::Underline]),
                Node::HardBreak,
                Node::marked_text(
                    "más",
                    vec![Mark::TextStyle {
                        attrs: TextStyleAttrs {
                            font_family: Some("Georgia".to_string()),
                        },
                    }],
                ),
            ],
        }]);

        assert_eq!(
            doc.to_html(),
            "<p><strong><u>nunca</u></strong><br><span style=\"font-family: Georgia\">más</span></p>"
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let doc = Doc::new(vec![
            Node::paragraph("a < b & \"c\""),
            Node::CodeBlock {
                attrs: CodeBlockAttrs {
                    language: Some("x\"y".to_string()),
                },
                content: vec![Node::text("<tag>")],
            },
        ]);

        let html = doc.to_html();

        assert!(html.starts_with("<p>a &lt; b &amp; \"c\"</p>"), "{html}");
        assert!(html.ends_with("<code class=\"language-x&quot;y\">&lt;tag&gt;</code></pre>"), "{html}");
    }

    #[test]
    fn lists_quotes_and_rules() {
        let item = |text: &str| Node::ListItem {
            content: vec![Node::paragraph(text)],
        };
        let doc = Doc::new(vec![
            Node::BulletList {
                content: vec![item("uno")],
            },
            Node::OrderedList {
                attrs: OrderedListAttrs { start: 3 },
                content: vec![item("tres")],
            },
            Node::OrderedList {
                attrs: OrderedListAttrs::default(),
                content: vec![item("uno")],
            },
            Node::HorizontalRule,
            Node::Blockquote {
                content: vec![Node::paragraph("cita")],
            },
        ]);

        insta::assert_snapshot!(
            doc.to_html(),
            @r#"<ul><li><p>uno</p></li></ul><ol start="3"><li><p>tres</p></li></ol><ol><li><p>uno</p></li></ol><hr><blockquote><p>cita</p></blockquote>"#
        );
    }
}

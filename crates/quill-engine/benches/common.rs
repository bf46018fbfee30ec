// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use quill_engine::models::{Doc, Mark, Node};

#[allow(dead_code)]
pub fn generate_chapter(sections: usize) -> Doc {
    let mut content = Vec::new();

    for section in 0..sections {
        content.push(Node::heading(2, &format!("Section {section}")));
        content.push(Node::Paragraph {
            content: vec![
                Node::text("Elena Voss miró las luces de la estación. "),
                Node::marked_text("Nadie", vec![Mark::Italic]),
                Node::text(" respondió a la llamada."),
                Node::HardBreak,
                Node::text("El zumbido 💫 no cesaba."),
            ],
        });
        content.push(Node::Blockquote {
            content: vec![Node::paragraph("—¿Quién anda ahí? —preguntó Teh guardia.")],
        });
        if section % 4 == 0 {
            content.push(Node::HorizontalRule);
        }
    }

    Doc::new(content)
}


pub mod chapter;
pub mod doc;
mod html;
pub mod position;

pub use chapter::{Chapter, ChapterFile};
pub use doc::{
    CodeBlockAttrs, Doc, HeadingAttrs, Mark, Node, OrderedListAttrs, TextStyleAttrs,
};
pub use position::{DocPos, ResolvedPos};

pub mod block;
pub mod common;
pub mod composite;
pub mod line_block;
pub mod markup;
pub mod yaml;

pub use block::strip_block_comments;
pub use common::{CommentMatch, StripError, remove_matches};
pub use composite::{CompositeSection, CompositeSections, SectionKind, strip_composite};
pub use line_block::strip_script_comments;
pub use markup::{strip_markup, strip_markup_fragment};
pub use yaml::strip_hash_comments;

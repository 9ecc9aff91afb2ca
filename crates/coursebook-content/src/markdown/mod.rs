//! Line-level markdown scanning for lesson documents.
//!
//! - [`frontmatter`]: leading `key: value` block extraction
//! - [`snippets`]: `lang:summary` hidden-snippet fences
//! - [`sections`]: level-2 heading splits and asset-link prefixing
//!
//! Only the subset lesson authors use is recognised. Everything here is a
//! pure function over `&str` and never fails.

pub mod frontmatter;
pub mod sections;
pub mod snippets;

// Re-export key types and functions
pub use frontmatter::{FrontmatterResult, extract_frontmatter, find_field, strip_frontmatter};
pub use sections::{SplitDocument, level2_heading, prefix_asset_links, split_into_sections};
pub use snippets::{SnippetExtraction, extract_hidden_snippets};

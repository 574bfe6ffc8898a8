//! Multi-document assembly
//!
//! Rendered results are bound to document paths, every heading is indexed
//! as an anchor, and on output each used reference becomes either a relative
//! link definition or plain text plus a warning.

mod file_manager;
mod paths;
mod sanitize;
mod toc;

pub use file_manager::{FileManager, FileResult};
pub use sanitize::remove_broken_links;
pub use toc::render_table_of_contents;

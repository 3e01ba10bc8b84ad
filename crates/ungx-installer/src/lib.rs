mod relocate;
mod rewrite;

pub use relocate::{relocate_all, relocate_package};
pub use rewrite::{ImportRewriter, RewriteReport, DEFAULT_SOURCE_EXTENSIONS};

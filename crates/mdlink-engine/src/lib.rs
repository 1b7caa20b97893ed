pub mod compose;
pub mod link;
pub mod text_fragment;
pub mod url_normalize;

// Re-export key types for easier usage
pub use compose::*;
pub use link::*;
pub use text_fragment::*;
pub use url_normalize::*;

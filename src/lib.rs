pub mod config;
pub mod entities;
pub mod error;
pub mod focus;
pub mod keywords;
pub mod parsers;
pub mod region;
pub mod results;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use entities::{QueryBuilder, build_query};
pub use error::{Error, RecognitionError, Result};
pub use focus::{FocusScorer, score_and_select};
pub use keywords::{KeywordRanker, rank_keywords};
pub use region::{TextRegion, Viewport};
pub use results::{Keyword, QueryProfile};
pub use session::FocusSession;

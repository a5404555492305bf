// Core algorithm exports
pub mod cancel;
pub mod error;
pub mod explain;
pub mod matcher;
pub mod normalizer;
pub mod ranking;
pub mod scoring;

pub use cancel::{Cancellable, CancellationToken};
pub use error::MatchError;
pub use explain::explain_match;
pub use matcher::Matcher;
pub use normalizer::normalize_request;
pub use ranking::{rank_candidates, ScoredCandidate, DEFAULT_TOP_K};
pub use scoring::{composite_score, score_dimensions};

pub mod eval;
pub mod negamax;

pub use negamax::{MoveAnalysis, SearchConfig, Searcher};

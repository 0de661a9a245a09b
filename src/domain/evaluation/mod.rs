//! Evaluation domain - verdicts and scores produced by post-hoc checks.

mod score;
mod verdict;

pub use score::Score;
pub use verdict::{EvalRecord, EvalVerdict};

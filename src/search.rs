//! Filter-then-verify search pipeline.
//!
//! The retriever runs the coarse index query under a wall-clock budget and
//! yields candidate documents; the verifier re-runs the caller-supplied
//! full matching predicate over each candidate; the searcher wires the
//! phases together and assembles the reported result.

pub mod deadline;
pub mod result;
pub mod retriever;
pub mod searcher;
pub mod verifier;

pub use deadline::Deadline;
pub use result::{MatchRecord, MatchingSentence, SearchResult};
pub use retriever::{Retrieval, retrieve};
pub use searcher::{SearchConfig, Searcher};
pub use verifier::{MatchPredicate, Verification, verify};

//! Top-level module for the Markov chain model.
//!
//! - Fixed-order word chain with training and generation (`MarkovChain`)
//! - One transition-table entry (`State`)
//! - The ordered table behind the chain (`TransitionTable`, internal)

/// Word-level Markov chain of fixed order.
///
/// Handles text ingestion, continuation recording and random-walk
/// generation with a caller-controlled RNG.
pub mod chain;

/// A single state key and its recorded continuations.
pub mod state;

/// Insertion-ordered mapping from state keys to states.
///
/// Not exposed.
mod table;

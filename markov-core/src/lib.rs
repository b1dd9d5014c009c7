//! Word-level Markov chain text generation library.
//!
//! This crate provides a small order-k Markov text generator including:
//! - A transition table built from whitespace-separated training text
//! - Probabilistic generation with an injectable randomness source
//! - Sentence post-processing (capitalization, final punctuation)
//! - Configuration and corpus loading helpers for front-ends
//!
//! ```
//! use markov_core::model::chain::MarkovChain;
//!
//! let mut chain = MarkovChain::seeded(2, 42)?;
//! chain.train("the cat sat on the mat")?;
//! let sentence = chain.generate(6)?;
//! assert!(sentence.ends_with('.'));
//! # Ok::<(), markov_core::error::ChainError>(())
//! ```

/// Markov chain model, its transition table, and generation logic.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// Generation parameters deserializable from query strings or files.
pub mod config;

/// Tokenization and sentence finishing rules.
pub mod text;

/// Corpus loading helpers.
pub mod io;

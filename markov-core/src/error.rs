//! Error types for chain construction, training and generation.

/// Errors returned by [`MarkovChain`](crate::model::chain::MarkovChain)
/// and the helpers around it.
///
/// None of these are worth retrying: the caller has to change the input
/// (more text, a valid order) or the model state (train it first).
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
	/// The training text has fewer tokens than the chain order.
	#[error("text is too short for order {order}: got {tokens} token(s)")]
	InsufficientData {
		/// Number of whitespace-separated tokens in the rejected text.
		tokens: usize,
		/// Order of the chain that rejected it.
		order: usize,
	},

	/// `generate` was called before any successful training.
	#[error("model has not been trained")]
	NotTrained,

	/// The requested order cannot form a state key.
	#[error("order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// Corpus loading failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;

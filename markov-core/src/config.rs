use serde::Deserialize;

use crate::error::{ChainError, Result};
use crate::model::chain::{DEFAULT_LENGTH, DEFAULT_ORDER, MarkovChain};

/// Parameters needed to build a chain and sample from it.
///
/// Every field has a default, so an empty query string or an empty JSON
/// object both deserialize to `order = 1`, `length = 100`, unseeded.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationConfig {
	/// Number of tokens in a state key.
	pub order: usize,

	/// Number of tokens requested from `generate`.
	pub length: usize,

	/// Fixed RNG seed for reproducible output; `None` seeds from the OS.
	pub seed: Option<u64>,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			order: DEFAULT_ORDER,
			length: DEFAULT_LENGTH,
			seed: None,
		}
	}
}

impl GenerationConfig {
	/// Checks that the configuration can build a chain.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidOrder`] if `order == 0`.
	pub fn validate(&self) -> Result<()> {
		if self.order == 0 {
			return Err(ChainError::InvalidOrder(self.order));
		}
		Ok(())
	}

	/// Builds an untrained chain from this configuration.
	pub fn build_chain(&self) -> Result<MarkovChain> {
		self.validate()?;
		match self.seed {
			Some(seed) => MarkovChain::seeded(self.order, seed),
			None => MarkovChain::new(self.order),
		}
	}
}

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::state::State;
use super::table::TransitionTable;
use crate::error::{ChainError, Result};
use crate::text::{finalize, tokenize};

/// Order used by [`MarkovChain::default`].
pub const DEFAULT_ORDER: usize = 1;

/// Number of tokens requested when the caller has no preference.
pub const DEFAULT_LENGTH: usize = 100;

/// Training status of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
	/// The transition table is empty: `generate` will fail.
	Untrained,
	/// At least one state exists.
	Trained,
}

/// Word-level Markov chain of fixed order `k`.
///
/// The chain maps every window of `k` consecutive tokens seen during
/// training to the list of tokens that followed it, and generates text by
/// walking that table from a random starting window.
///
/// # Responsibilities
/// - Build the transition table from whitespace-separated text
/// - Accumulate continuations across several `train` calls
/// - Sample new token sequences, stopping early on dead ends
///
/// # Invariants
/// - `order` is always >= 1 and never changes
/// - Every state in the table has at least one continuation
/// - The table is empty iff no `train` call ever recorded a window
///
/// Nothing here is synchronized: `train` and `generate` need `&mut self`,
/// so callers sharing a chain across threads wrap it in a lock.
#[derive(Debug, Clone)]
pub struct MarkovChain<R = StdRng> {
	/// Number of tokens in a state key.
	order: usize,

	/// Mapping from a k-token window to the tokens that followed it.
	table: TransitionTable,

	/// Randomness source used by `generate`.
	rng: R,
}

impl MarkovChain<StdRng> {
	/// Creates an untrained chain of order `order` seeded from the OS.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidOrder`] if `order == 0`.
	pub fn new(order: usize) -> Result<Self> {
		Self::with_rng(order, StdRng::from_os_rng())
	}

	/// Creates an untrained chain whose output is reproducible for a given
	/// `seed` and training history.
	pub fn seeded(order: usize, seed: u64) -> Result<Self> {
		Self::with_rng(order, StdRng::seed_from_u64(seed))
	}
}

impl Default for MarkovChain<StdRng> {
	fn default() -> Self {
		Self {
			order: DEFAULT_ORDER,
			table: TransitionTable::default(),
			rng: StdRng::from_os_rng(),
		}
	}
}

impl<R> MarkovChain<R> {
	/// Creates an untrained chain drawing its randomness from `rng`.
	///
	/// # Errors
	/// Returns [`ChainError::InvalidOrder`] if `order == 0`: a zero-length
	/// key would collapse every context into a single empty state.
	pub fn with_rng(order: usize, rng: R) -> Result<Self> {
		if order == 0 {
			return Err(ChainError::InvalidOrder(order));
		}
		Ok(Self {
			order,
			table: TransitionTable::default(),
			rng,
		})
	}

	/// Number of tokens in a state key.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct state keys.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// Returns `true` if the chain has never been trained successfully.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Current training status.
	pub fn state(&self) -> ChainState {
		if self.is_empty() {
			ChainState::Untrained
		} else {
			ChainState::Trained
		}
	}

	/// Iterates over the transition table in first-seen key order.
	pub fn states(&self) -> impl Iterator<Item = &State> {
		self.table.states().iter()
	}

	/// Returns the continuations recorded for `key`, if the key is known.
	pub fn continuations<S: AsRef<str>>(&self, key: &[S]) -> Option<&[String]> {
		let key: Vec<String> = key.iter().map(|t| t.as_ref().to_owned()).collect();
		self.table.get(&key).map(State::continuations)
	}

	/// Adds a text to the transition table.
	///
	/// Splits `text` on whitespace and, for every window of `order` tokens
	/// followed by another token, records that token as a continuation of
	/// the window. Calls accumulate: training twice on the same text doubles
	/// every continuation list.
	///
	/// # Errors
	/// Returns [`ChainError::InsufficientData`] if `text` holds fewer than
	/// `order` tokens. The table is left untouched in that case.
	///
	/// # Notes
	/// - A text of exactly `order` tokens is accepted but adds nothing.
	pub fn train(&mut self, text: &str) -> Result<()> {
		let tokens = tokenize(text);
		if tokens.len() < self.order {
			return Err(ChainError::InsufficientData {
				tokens: tokens.len(),
				order: self.order,
			});
		}

		let known = self.table.len();
		for window in tokens.windows(self.order + 1) {
			let (key, next) = window.split_at(self.order);
			self.table.push(key, next[0]);
		}

		debug!(
			"trained on {} token(s): {} new state(s), {} total",
			tokens.len(),
			self.table.len() - known,
			self.table.len()
		);
		Ok(())
	}

	/// Generates a sentence of up to `length` tokens drawing from `rng`.
	///
	/// # Behavior
	/// - Picks a starting state uniformly among the distinct keys
	/// - Appends `length - order` sampled tokens, each drawn from the
	///   continuations of the last `order` tokens
	/// - Stops early when the current window has no recorded continuation
	/// - Uppercases the first letter and ends the sentence with `.` unless
	///   the last character already is `.`, `!` or `?`
	///
	/// When `length <= order` the output is only the starting state, so it can
	/// hold more than `length` tokens.
	///
	/// # Errors
	/// Returns [`ChainError::NotTrained`] if the table is empty.
	pub fn generate_with<G: Rng + ?Sized>(&self, length: usize, rng: &mut G) -> Result<String> {
		walk(&self.table, self.order, length, rng)
	}
}

impl<R: Rng> MarkovChain<R> {
	/// Generates a sentence of up to `length` tokens using the chain's own
	/// RNG. See [`MarkovChain::generate_with`].
	pub fn generate(&mut self, length: usize) -> Result<String> {
		walk(&self.table, self.order, length, &mut self.rng)
	}
}

/// Random walk over `table`, shared by both generate entry points.
fn walk<G: Rng + ?Sized>(table: &TransitionTable, order: usize, length: usize, rng: &mut G) -> Result<String> {
	let seed = table.random_state(rng).ok_or(ChainError::NotTrained)?;
	let mut result: Vec<String> = seed.key().to_vec();

	for step in 0..length.saturating_sub(order) {
		let window = &result[result.len() - order..];
		let next = match table.get(window).and_then(|state| state.predict(rng)) {
			Some(next) => next.to_owned(),
			None => {
				debug!("dead end after {} token(s), stopping at step {}", result.len(), step);
				break;
			}
		};
		trace!("{:?} -> {:?}", window, next);
		result.push(next);
	}

	Ok(finalize(&result))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_rejects_zero_order() {
		assert!(matches!(MarkovChain::new(0), Err(ChainError::InvalidOrder(0))));
		assert!(MarkovChain::new(1).is_ok());
	}

	#[test]
	fn test_default_is_untrained_unigram_context() {
		let chain: MarkovChain = MarkovChain::default();
		assert_eq!(chain.order(), DEFAULT_ORDER);
		assert_eq!(chain.state(), ChainState::Untrained);
		assert!(chain.is_empty());
	}

	#[test]
	fn test_train_builds_table() {
		let mut chain = MarkovChain::seeded(1, 0).unwrap();
		chain.train("a b a c a b").unwrap();

		assert_eq!(chain.len(), 3);
		assert_eq!(chain.continuations(&["a"]).unwrap(), &["b", "c", "b"]);
		assert_eq!(chain.continuations(&["b"]).unwrap(), &["a"]);
		assert_eq!(chain.continuations(&["c"]).unwrap(), &["a"]);
		assert_eq!(chain.state(), ChainState::Trained);
	}

	#[test]
	fn test_train_rejects_short_text_without_mutation() {
		let mut chain = MarkovChain::seeded(3, 0).unwrap();
		chain.train("one two three four").unwrap();
		let before: Vec<State> = chain.states().cloned().collect();

		let err = chain.train("only two").unwrap_err();
		assert!(matches!(err, ChainError::InsufficientData { tokens: 2, order: 3 }));

		let after: Vec<State> = chain.states().cloned().collect();
		assert_eq!(before, after);
	}

	#[test]
	fn test_train_exactly_order_tokens_adds_nothing() {
		let mut chain = MarkovChain::seeded(2, 0).unwrap();
		chain.train("hello world").unwrap();
		assert!(chain.is_empty());
		assert!(matches!(chain.generate(5), Err(ChainError::NotTrained)));
	}

	#[test]
	fn test_generate_length_one_is_seed_only() {
		let mut chain = MarkovChain::seeded(1, 11).unwrap();
		chain.train("a b a c a b").unwrap();

		for _ in 0..20 {
			let out = chain.generate(1).unwrap();
			assert!(["A.", "B.", "C."].contains(&out.as_str()), "got {out}");
		}
	}

	#[test]
	fn test_generate_with_does_not_touch_table() {
		let mut chain = MarkovChain::seeded(1, 3).unwrap();
		chain.train("x y z x y").unwrap();
		let before: Vec<State> = chain.states().cloned().collect();

		let mut rng = StdRng::seed_from_u64(9);
		chain.generate_with(30, &mut rng).unwrap();

		let after: Vec<State> = chain.states().cloned().collect();
		assert_eq!(before, after);
	}
}

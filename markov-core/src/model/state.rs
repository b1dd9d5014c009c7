use rand::Rng;
use rand::seq::IndexedRandom;

/// Ordered window of `order` tokens used as a lookup key.
pub type StateKey = Vec<String>;

/// Represents one entry of the transition table.
///
/// A `State` corresponds to a fixed k-token context (`key`) and stores
/// every token observed right after that context, in training order.
///
/// Conceptually, this is a node in a Markov chain whose outgoing edges are
/// weighted by how often they were observed. Instead of counting, the raw
/// occurrences are kept: a token seen twice appears twice, so a uniform pick
/// over the list is already frequency-weighted.
///
/// ## Invariants
/// - All continuations were observed after the same `key`
/// - A state reachable from the table always has at least one continuation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// The k tokens forming the context.
	key: StateKey,
	/// Observed next tokens, duplicates preserved.
	/// Example: ["b", "c", "b"]
	continuations: Vec<String>,
}

impl State {
	/// Creates a new state for the given context, with no continuations yet.
	pub fn new(key: StateKey) -> Self {
		Self {
			key,
			continuations: Vec::new(),
		}
	}

	/// The context tokens of this state.
	pub fn key(&self) -> &[String] {
		&self.key
	}

	/// Every continuation observed so far, in training order.
	pub fn continuations(&self) -> &[String] {
		&self.continuations
	}

	/// Records one more occurrence of `next` after this context.
	pub fn push(&mut self, next: &str) {
		self.continuations.push(next.to_owned());
	}

	/// Picks the next token uniformly over the raw occurrences.
	///
	/// Returns `None` if the state has no continuations.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.continuations.choose(rng).map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn key(tokens: &[&str]) -> StateKey {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	#[test]
	fn test_push_keeps_duplicates_in_order() {
		let mut state = State::new(key(&["a"]));
		state.push("b");
		state.push("c");
		state.push("b");

		assert_eq!(state.key(), &["a".to_string()]);
		assert_eq!(state.continuations(), &["b", "c", "b"]);
	}

	#[test]
	fn test_predict_empty_state() {
		let state = State::new(key(&["a"]));
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(state.predict(&mut rng), None);
	}

	#[test]
	fn test_predict_is_frequency_weighted() {
		let mut state = State::new(key(&["a"]));
		for _ in 0..3 {
			state.push("b");
		}
		state.push("c");

		let mut rng = StdRng::seed_from_u64(42);
		let mut hits = 0;
		let draws = 4000;
		for _ in 0..draws {
			if state.predict(&mut rng) == Some("b") {
				hits += 1;
			}
		}

		// Expected 3/4 of the draws.
		let ratio = hits as f64 / draws as f64;
		assert!((0.70..0.80).contains(&ratio), "ratio was {ratio}");
	}
}

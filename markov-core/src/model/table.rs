use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{State, StateKey};

/// Transition table of a chain: an insertion-ordered multimap from a state
/// key to its continuations.
///
/// States live in a `Vec` in first-seen order and a `HashMap` maps each key
/// to its position. Picking a random state goes through the `Vec`, never
/// through the hash map, so the pick only depends on the RNG and on the
/// training history.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransitionTable {
	states: Vec<State>,
	index: HashMap<StateKey, usize>,
}

impl TransitionTable {
	pub(crate) fn len(&self) -> usize {
		self.states.len()
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub(crate) fn states(&self) -> &[State] {
		&self.states
	}

	pub(crate) fn get(&self, key: &[String]) -> Option<&State> {
		self.index.get(key).map(|&i| &self.states[i])
	}

	/// Appends `next` to the continuations of `key`, creating the state on
	/// first sight.
	pub(crate) fn push(&mut self, key: &[&str], next: &str) {
		let key: StateKey = key.iter().map(|t| (*t).to_owned()).collect();
		let i = match self.index.get(&key) {
			Some(&i) => i,
			None => {
				self.states.push(State::new(key.clone()));
				self.index.insert(key, self.states.len() - 1);
				self.states.len() - 1
			}
		};
		self.states[i].push(next);
	}

	/// Uniform pick over the distinct keys, regardless of their weight.
	pub(crate) fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&State> {
		self.states.choose(rng)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_push_creates_then_appends() {
		let mut table = TransitionTable::default();
		assert!(table.is_empty());

		table.push(&["a"], "b");
		table.push(&["b"], "a");
		table.push(&["a"], "c");

		assert_eq!(table.len(), 2);
		let a = table.get(&["a".to_string()]).unwrap();
		assert_eq!(a.continuations(), &["b", "c"]);
		assert!(table.get(&["z".to_string()]).is_none());
	}

	#[test]
	fn test_states_keep_first_seen_order() {
		let mut table = TransitionTable::default();
		table.push(&["y", "z"], "1");
		table.push(&["a", "b"], "2");
		table.push(&["y", "z"], "3");

		let keys: Vec<&[String]> = table.states().iter().map(State::key).collect();
		assert_eq!(keys, vec![&["y".to_string(), "z".to_string()][..], &["a".to_string(), "b".to_string()][..]]);
	}
}

use super::{Automaton, Error};

/// Run of a deterministic automaton.
///
/// The automaton itself is never modified: several simulations can share it.
pub struct Simulation<'a, Q> {
	automaton: &'a Automaton<Q>,
	state: &'a Q,
}

impl<'a, Q: Ord + Clone> Simulation<'a, Q> {
	pub fn new(automaton: &'a Automaton<Q>) -> Self {
		Self {
			automaton,
			state: automaton.initial(),
		}
	}

	pub fn automaton(&self) -> &'a Automaton<Q> {
		self.automaton
	}

	/// Current state.
	pub fn state(&self) -> &'a Q {
		self.state
	}

	/// Follows the transition on `b` from the current state.
	///
	/// Returns `Ok(false)` and stays put if there is none.
	/// Fails if the automaton is not deterministic at the current state.
	pub fn exec(&mut self, b: u8) -> Result<bool, Error> {
		match self.automaton.step(self.state, b)? {
			Some(q) => {
				self.state = q;
				Ok(true)
			}
			None => Ok(false),
		}
	}

	/// Checks if the current state is accepting.
	pub fn accept(&self) -> bool {
		self.automaton.is_accepting(self.state)
	}

	pub fn reset(&mut self) {
		self.state = self.automaton.initial()
	}
}

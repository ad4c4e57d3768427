use super::{Automaton, StateSet};
use btree_slab::BTreeSet;

impl<Q: Ord + Clone> Automaton<Q> {
	/// Builds the equivalent deterministic automaton by subset construction.
	///
	/// Each state of the result is the set of states of `self` it stands for.
	/// Only the bytes returned by [`inputs_of`](Automaton::inputs_of) are explored,
	/// never the whole alphabet.
	pub fn realize(&self) -> Automaton<StateSet<Q>> {
		let mut initial = BTreeSet::new();
		initial.insert(self.initial.clone());
		let initial = self.closure(&initial);

		// Every known state already has a row, so the table doubles as the visited set.
		let mut det = Automaton::new(initial.clone());
		let mut stack = vec![initial];

		while let Some(det_q) = stack.pop() {
			for b in self.inputs_of(&det_q) {
				let next = self.move_on(&det_q, b);

				if det.add_state(next.clone()) {
					stack.push(next.clone())
				}

				det.add_transition(det_q.clone(), Some(b), next);
			}

			if det_q.iter().any(|q| self.accepting.contains(q)) {
				det.add_accepting(det_q)
			}
		}

		det
	}
}

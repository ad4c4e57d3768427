use super::{Lexer, Pattern, TableError, SEPARATOR};
use crate::automaton::{Automaton, StateSet, EPSILON};
use std::{
	collections::{BTreeMap, BTreeSet},
	fmt,
};

/// Synthetic initial state of the merged automaton.
///
/// Pattern states all contain the separator, so this cannot collide with them.
const START: &str = "0";

/// Interned state of the realized lexer automaton.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum DetState {
	/// Non accepting state.
	Intermediate(u32),

	/// Accepting state of a kind.
	///
	/// The first parameter is the kind index,
	/// the second parameter is a number which, associated with the kind index,
	/// uniquely identifies the state.
	Final(u32, u32),
}

impl DetState {
	/// Index of the kind accepted in this state.
	pub fn kind(&self) -> Option<u32> {
		match self {
			DetState::Final(kind, _) => Some(*kind),
			DetState::Intermediate(_) => None,
		}
	}
}

pub struct DisplayDetState<'a>(pub &'a Lexer, pub &'a DetState);

impl<'a> fmt::Display for DisplayDetState<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.1 {
			DetState::Intermediate(i) => write!(f, "q{}", i),
			DetState::Final(kind, i) => match self.0.kind(*kind) {
				Some(name) => write!(f, "{}({})", name, i),
				None => write!(f, "#{}({})", kind, i),
			},
		}
	}
}

/// Accepting state claimed by several kinds.
///
/// The earliest declared kind wins, the others are shadowed in this state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ambiguity {
	winner: u32,
	shadowed: Vec<u32>,
	sample: Vec<u8>,
}

impl Ambiguity {
	/// Kind returned for the lexemes ending in this state.
	pub fn winner(&self) -> u32 {
		self.winner
	}

	/// Other kinds matching the same lexemes.
	pub fn shadowed(&self) -> &[u32] {
		&self.shadowed
	}

	/// Shortest lexeme ending in this state.
	pub fn sample(&self) -> &[u8] {
		&self.sample
	}
}

/// Kind part of a state label of the merged automaton.
pub(crate) fn kind_of(label: &str) -> &str {
	match label.find(SEPARATOR) {
		Some(i) => &label[..i],
		None => label,
	}
}

/// Builds the merged nondeterministic automaton of the given patterns.
///
/// Each pattern is put under the `kind.` namespace
/// and linked to the synthetic initial state by an epsilon transition.
pub(crate) fn merge(patterns: &[Pattern]) -> Result<Automaton<String>, TableError> {
	if patterns.is_empty() {
		return Err(TableError::NoPatterns);
	}

	let mut kinds = BTreeSet::new();
	for p in patterns {
		if p.kind.is_empty() || p.kind.contains(SEPARATOR) {
			return Err(TableError::InvalidKind(p.kind.clone()));
		}

		if !kinds.insert(p.kind.as_str()) {
			return Err(TableError::DuplicateKind(p.kind.clone()));
		}
	}

	let mut nfa = Automaton::new(START.to_string());
	for p in patterns {
		let a = p.automaton.prefix(&format!("{}{}", p.kind, SEPARATOR));
		nfa.merge_transitions(&a);
		nfa.add_transition(START.to_string(), EPSILON, a.initial().clone());

		for q in a.accepting().iter() {
			nfa.add_accepting(q.clone())
		}
	}

	Ok(nfa)
}

/// Interns the composite states of the realized automaton.
///
/// The kind of each accepting composite state is read back from the labels of
/// its accepting members. When there are several, the lowest index wins and the
/// conflict is reported as an [`Ambiguity`].
pub(crate) fn intern(
	nfa: &Automaton<String>,
	det: &Automaton<StateSet<String>>,
	kinds: &[String],
) -> (Automaton<DetState>, Vec<Ambiguity>) {
	let indexes: BTreeMap<&str, u32> = kinds
		.iter()
		.enumerate()
		.map(|(i, k)| (k.as_str(), i as u32))
		.collect();

	let mut intermediate_count = 0;
	let mut final_counts: BTreeMap<u32, u32> = BTreeMap::new();
	let mut conflicts = Vec::new();

	let automaton = det.map(|states| {
		let matched: BTreeSet<u32> = states
			.iter()
			.filter(|q| nfa.is_accepting(q))
			.filter_map(|q| indexes.get(kind_of(q)).cloned())
			.collect();

		let mut matched = matched.into_iter();
		match matched.next() {
			Some(winner) => {
				let shadowed: Vec<u32> = matched.collect();
				if !shadowed.is_empty() {
					conflicts.push((states.clone(), winner, shadowed))
				}

				let count = final_counts.entry(winner).or_insert(0);
				let q = DetState::Final(winner, *count);
				*count += 1;
				q
			}
			None => {
				let q = DetState::Intermediate(intermediate_count);
				intermediate_count += 1;
				q
			}
		}
	});

	let ambiguities = conflicts
		.into_iter()
		.map(|(states, winner, shadowed)| {
			let sample = det.shortest_path_to(&states).unwrap_or_default();
			log::debug!(
				"`{}` is matched by {} kinds, `{}` wins",
				crate::charset::DisplayBytes(&sample),
				shadowed.len() + 1,
				kinds[winner as usize]
			);

			Ambiguity {
				winner,
				shadowed,
				sample,
			}
		})
		.collect();

	(automaton, ambiguities)
}

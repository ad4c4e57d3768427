use crate::charset::{self, DisplayByte};
use btree_slab::BTreeSet;
use itertools::Itertools;
use std::{
	collections::{BTreeMap, VecDeque},
	fmt,
};

mod determinize;
mod simulation;

pub use simulation::Simulation;

/// Input symbol.
///
/// `None` is the `EPSILON` symbol of transitions consuming no input.
pub type Symbol = Option<u8>;

/// Symbol of the transitions that consume no input.
pub const EPSILON: Symbol = None;

/// Ordered set of states.
///
/// This is also the label of the states of a realized automaton,
/// each one standing for the set of states it has been built from.
pub type StateSet<Q> = BTreeSet<Q>;

/// Outgoing transitions of a state.
pub type Row<Q> = BTreeMap<Symbol, StateSet<Q>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// An automaton was simulated as if deterministic,
	/// but the current state has several ways to go on `symbol`
	/// (or epsilon transitions).
	Nondeterministic { symbol: Symbol, targets: usize },
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::Nondeterministic {
				symbol: Some(b),
				targets,
			} => write!(
				f,
				"nondeterministic automaton: {} transitions on `{}` (realize it first)",
				targets,
				DisplayByte(*b)
			),
			Error::Nondeterministic {
				symbol: None,
				targets,
			} => write!(
				f,
				"nondeterministic automaton: {} epsilon transitions (realize it first)",
				targets
			),
		}
	}
}

impl std::error::Error for Error {}

/// Finite state automaton over bytes.
///
/// The set of states is implicit: it is made of every label appearing in the
/// transition relation (each known state has a, possibly empty, row).
/// An automaton with several targets for one `(state, symbol)` pair, or with
/// epsilon transitions, is nondeterministic and must be [realized](Automaton::realize)
/// before being [simulated](Automaton::simulate).
#[derive(Clone)]
pub struct Automaton<Q> {
	/// The (unique) initial state.
	initial: Q,

	/// Transitions.
	transitions: BTreeMap<Q, Row<Q>>,

	/// Accepting states.
	accepting: StateSet<Q>,
}

impl<Q: Ord + Clone> Automaton<Q> {
	/// Creates an automaton made of the single (non accepting) state `initial`.
	pub fn new(initial: Q) -> Automaton<Q> {
		let mut transitions = BTreeMap::new();
		transitions.insert(initial.clone(), BTreeMap::new());

		Automaton {
			initial,
			transitions,
			accepting: BTreeSet::new(),
		}
	}

	pub fn initial(&self) -> &Q {
		&self.initial
	}

	pub fn accepting(&self) -> &StateSet<Q> {
		&self.accepting
	}

	pub fn is_accepting(&self, q: &Q) -> bool {
		self.accepting.contains(q)
	}

	pub fn transitions(&self) -> impl Iterator<Item = (&Q, &Row<Q>)> {
		self.transitions.iter()
	}

	pub fn targets(&self, q: &Q, symbol: Symbol) -> Option<&StateSet<Q>> {
		self.transitions.get(q).and_then(|row| row.get(&symbol))
	}

	pub fn states(&self) -> impl Iterator<Item = &Q> {
		self.transitions.keys()
	}

	/// Number of states.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	/// Adds a state without transitions.
	///
	/// Returns `false` if the state was already known.
	pub fn add_state(&mut self, q: Q) -> bool {
		if self.transitions.contains_key(&q) {
			false
		} else {
			self.transitions.insert(q, BTreeMap::new());
			true
		}
	}

	pub fn add_transition(&mut self, source: Q, symbol: Symbol, target: Q) {
		self.add_state(target.clone());
		self.transitions
			.entry(source)
			.or_insert_with(BTreeMap::new)
			.entry(symbol)
			.or_insert_with(BTreeSet::new)
			.insert(target);
	}

	pub fn add_accepting(&mut self, q: Q) {
		self.add_state(q.clone());
		self.accepting.insert(q);
	}

	/// Copies every state and transition of `other` into this automaton.
	///
	/// Neither the initial state nor the accepting states of `other` keep their role.
	pub fn merge_transitions(&mut self, other: &Automaton<Q>) {
		for (source, row) in &other.transitions {
			self.add_state(source.clone());
			for (symbol, targets) in row {
				for target in targets {
					self.add_transition(source.clone(), *symbol, target.clone())
				}
			}
		}
	}

	/// Checks that there is at most one way to go from any state on any symbol.
	pub fn is_deterministic(&self) -> bool {
		self.transitions.values().all(|row| {
			row.iter()
				.all(|(symbol, targets)| symbol.is_some() && targets.len() <= 1)
		})
	}

	/// Deterministic transition from `q` on `b`.
	///
	/// Returns `Ok(None)` if there is no such transition.
	pub fn step(&self, q: &Q, b: u8) -> Result<Option<&Q>, Error> {
		match self.transitions.get(q) {
			Some(row) => {
				if let Some(epsilon_qs) = row.get(&EPSILON) {
					if !epsilon_qs.is_empty() {
						return Err(Error::Nondeterministic {
							symbol: EPSILON,
							targets: epsilon_qs.len(),
						});
					}
				}

				match row.get(&Some(b)) {
					Some(targets) if targets.len() > 1 => Err(Error::Nondeterministic {
						symbol: Some(b),
						targets: targets.len(),
					}),
					Some(targets) => Ok(targets.iter().next()),
					None => Ok(None),
				}
			}
			None => Ok(None),
		}
	}

	/// Epsilon-closure of the given states.
	pub fn closure(&self, states: &StateSet<Q>) -> StateSet<Q> {
		let mut closure = BTreeSet::new();
		let mut stack: Vec<&Q> = states.iter().collect();

		while let Some(q) = stack.pop() {
			if closure.insert(q.clone()) {
				if let Some(epsilon_qs) = self.targets(q, EPSILON) {
					stack.extend(epsilon_qs.iter())
				}
			}
		}

		closure
	}

	/// States reached from `states` by consuming `b`, closed under epsilon transitions.
	pub fn move_on(&self, states: &StateSet<Q>, b: u8) -> StateSet<Q> {
		let mut next = BTreeSet::new();

		for q in states.iter() {
			if let Some(targets) = self.targets(q, Some(b)) {
				next.extend(targets.iter().cloned())
			}
		}

		self.closure(&next)
	}

	/// Bytes on which at least one of the given states has a transition.
	pub fn inputs_of(&self, states: &StateSet<Q>) -> BTreeSet<u8> {
		let mut inputs = BTreeSet::new();

		for q in states.iter() {
			if let Some(row) = self.transitions.get(q) {
				inputs.extend(row.keys().filter_map(|symbol| *symbol))
			}
		}

		inputs
	}

	/// Checks if the automaton accepts `input`,
	/// following every possible path at once.
	///
	/// Works for any automaton, deterministic or not.
	pub fn recognizes(&self, input: &[u8]) -> bool {
		let mut initial = BTreeSet::new();
		initial.insert(self.initial.clone());
		let mut states = self.closure(&initial);

		for b in input {
			if states.is_empty() {
				return false;
			}

			states = self.move_on(&states, *b)
		}

		states.iter().any(|q| self.accepting.contains(q))
	}

	/// Starts a simulation from the initial state.
	pub fn simulate(&self) -> Simulation<'_, Q> {
		Simulation::new(self)
	}

	/// Shortest input leading from the initial state to `target`.
	pub fn shortest_path_to(&self, target: &Q) -> Option<Vec<u8>> {
		let mut predecessors: BTreeMap<&Q, (&Q, u8)> = BTreeMap::new();
		let mut queue = VecDeque::new();
		queue.push_back(&self.initial);

		let mut found = false;
		while let Some(q) = queue.pop_front() {
			if q == target {
				found = true;
				break;
			}

			if let Some(row) = self.transitions.get(q) {
				for (symbol, targets) in row {
					if let Some(b) = symbol {
						for r in targets.iter() {
							if *r != self.initial && !predecessors.contains_key(r) {
								predecessors.insert(r, (q, *b));
								queue.push_back(r)
							}
						}
					}
				}
			}
		}

		if !found {
			return None;
		}

		let mut path = Vec::new();
		let mut q = target;
		while let Some((p, b)) = predecessors.get(q) {
			path.push(*b);
			q = *p;
		}

		path.reverse();
		Some(path)
	}

	/// Relabels every state with `f`.
	///
	/// `f` is called once per state.
	pub fn map<P, F>(&self, mut f: F) -> Automaton<P>
	where
		P: Ord + Clone,
		F: FnMut(&Q) -> P,
	{
		let mut map = BTreeMap::new();

		let mut result = Automaton::new(relabel(&mut map, &mut f, &self.initial));
		for (source, row) in &self.transitions {
			let source = relabel(&mut map, &mut f, source);
			result.add_state(source.clone());
			for (symbol, targets) in row {
				for target in targets.iter() {
					let target = relabel(&mut map, &mut f, target);
					result.add_transition(source.clone(), *symbol, target)
				}
			}
		}

		for q in self.accepting.iter() {
			let q = relabel(&mut map, &mut f, q);
			result.add_accepting(q)
		}

		result
	}

	/// Writes the automaton in the Graphviz `dot` format, labeling states with `label`.
	pub fn dot_write_with<W, F>(&self, out: &mut W, label: F) -> std::io::Result<()>
	where
		W: std::io::Write,
		F: Fn(&Q) -> String,
	{
		writeln!(out, "digraph {{")?;
		writeln!(out, "\trankdir=LR")?;
		writeln!(out, "\t\"\" [ shape=none ]")?;
		writeln!(out, "\t\"\" -> {}", dot_id(&label(&self.initial)))?;

		for q in self.accepting.iter() {
			writeln!(out, "\t{} [ shape=doublecircle ]", dot_id(&label(q)))?
		}

		for (source, row) in &self.transitions {
			let source = dot_id(&label(source));
			for (target, symbols) in grouped_row(row) {
				let target = dot_id(&label(target));
				for edge in symbols.labels() {
					writeln!(out, "\t{} -> {} [ label={} ]", source, target, dot_id(&edge))?
				}
			}
		}

		writeln!(out, "}}")
	}
}

impl Automaton<String> {
	/// Rewrites every state label `q` into `name + q`.
	pub fn prefix(&self, name: &str) -> Automaton<String> {
		self.map(|q| format!("{}{}", name, q))
	}
}

impl<Q: Ord + Clone + fmt::Display> Automaton<Q> {
	/// Writes the automaton in the Graphviz `dot` format.
	pub fn dot_write<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
		self.dot_write_with(out, |q| q.to_string())
	}
}

impl<Q: Ord + Clone + fmt::Display> fmt::Display for Automaton<Q> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "initial: {}", self.initial)?;

		for (source, row) in &self.transitions {
			writeln!(f, "state: {}", source)?;
			for (target, symbols) in grouped_row(row) {
				for label in symbols.labels() {
					writeln!(f, "\ton {} goto {}", label, target)?
				}
			}
		}

		writeln!(f, "accepting:")?;
		for q in self.accepting.iter() {
			writeln!(f, "\t{}", q)?
		}

		Ok(())
	}
}

/// Displays a set of states as `{a,b,c}`.
pub struct DisplayStateSet<'a, Q>(pub &'a StateSet<Q>);

impl<'a, Q: fmt::Display> fmt::Display for DisplayStateSet<'a, Q> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{{}}}", self.0.iter().format(","))
	}
}

fn relabel<'a, Q, P, F>(map: &mut BTreeMap<&'a Q, P>, f: &mut F, q: &'a Q) -> P
where
	Q: Ord,
	P: Clone,
	F: FnMut(&Q) -> P,
{
	match map.get(q) {
		Some(p) => p.clone(),
		None => {
			let p = f(q);
			map.insert(q, p.clone());
			p
		}
	}
}

/// Symbols of the transitions between two given states.
#[derive(Default)]
struct Symbols {
	epsilon: bool,
	bytes: Vec<u8>,
}

impl Symbols {
	fn labels(&self) -> Vec<String> {
		let mut labels = Vec::new();

		if self.epsilon {
			labels.push("ε".to_string())
		}

		if !self.bytes.is_empty() {
			let ranges = charset::ranges(self.bytes.iter().cloned());
			labels.push(format!("[{}]", ranges.iter().format("")))
		}

		labels
	}
}

/// Groups the transitions of a row by target.
fn grouped_row<Q: Ord>(row: &Row<Q>) -> BTreeMap<&Q, Symbols> {
	let mut map: BTreeMap<&Q, Symbols> = BTreeMap::new();

	for (symbol, targets) in row {
		for target in targets.iter() {
			let symbols = map.entry(target).or_insert_with(Symbols::default);
			match symbol {
				Some(b) => symbols.bytes.push(*b),
				None => symbols.epsilon = true,
			}
		}
	}

	map
}

fn dot_id(s: &str) -> String {
	format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

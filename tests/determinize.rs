use munch::{
	automaton::{DisplayStateSet, Error},
	regexp::*,
	Automaton, StateSet, EPSILON,
};

fn identifier() -> Regex {
	let alpha = range(b'a', b'z') | range(b'A', b'Z');
	let digit = range(b'0', b'9');
	&alpha + &(&alpha | &digit).star()
}

#[test]
fn realized_automaton_is_deterministic() {
	let nfa = identifier() | literal("if") | plus(&range(b'0', b'9'));
	assert!(!nfa.is_deterministic());

	let dfa = nfa.realize();
	assert!(dfa.is_deterministic());

	for input in &["x", "if", "iffy", "a1b2", "42"] {
		assert!(dfa.recognizes(input.as_bytes()), "{}", input);
	}

	for input in &["", "1a", "a-b"] {
		assert!(!dfa.recognizes(input.as_bytes()), "{}", input);
	}
}

fn edges<Q: Ord + Clone>(a: &Automaton<Q>) -> usize {
	a.transitions()
		.map(|(_, row)| row.values().map(|t| t.len()).sum::<usize>())
		.sum()
}

#[test]
fn realize_is_idempotent() {
	let dfa = (literal("cat") | literal("car") | literal("dog")).realize();
	let again = dfa.realize();

	assert!(again.is_deterministic());
	assert_eq!(again.len(), dfa.len());
	assert_eq!(again.accepting().len(), dfa.accepting().len());

	assert_eq!(edges(&again), edges(&dfa));

	for input in &["cat", "car", "dog", "ca", "cow"] {
		assert_eq!(
			again.recognizes(input.as_bytes()),
			dfa.recognizes(input.as_bytes())
		);
	}
}

#[test]
fn closure_follows_epsilon_cycles() {
	let mut nfa = Automaton::new(0u32);
	nfa.add_transition(0, EPSILON, 1);
	nfa.add_transition(1, EPSILON, 0);
	nfa.add_transition(1, Some(b'a'), 2);
	nfa.add_transition(2, EPSILON, 3);
	nfa.add_accepting(3);

	let mut start = StateSet::new();
	start.insert(0);
	let closure = nfa.closure(&start);
	assert_eq!(closure.iter().cloned().collect::<Vec<_>>(), vec![0, 1]);

	let inputs = nfa.inputs_of(&closure);
	assert_eq!(inputs.iter().cloned().collect::<Vec<_>>(), vec![b'a']);

	let next = nfa.move_on(&closure, b'a');
	assert_eq!(next.iter().cloned().collect::<Vec<_>>(), vec![2, 3]);

	let dfa = nfa.realize();
	assert_eq!(dfa.len(), 2);
	assert!(dfa.recognizes(b"a"));
	assert!(!dfa.recognizes(b"aa"));
}

#[test]
fn feeding_past_the_end_keeps_the_accepting_state() {
	let b_or_cd = union(&symbol(b'b'), &concat(&symbol(b'c'), &symbol(b'd')));
	let dfa = union(&literal("cat"), &b_or_cd).realize();

	let mut simulation = dfa.simulate();
	let moves: Vec<bool> = b"bcdcd"
		.iter()
		.map(|b| simulation.exec(*b).unwrap())
		.collect();

	assert_eq!(moves, vec![true, false, false, false, false]);
	assert!(simulation.accept());

	simulation.reset();
	assert!(simulation.state() == dfa.initial());
	assert!(!simulation.accept());
	assert!(simulation.exec(b'c').unwrap());
	assert!(!simulation.accept());
	assert!(simulation.exec(b'd').unwrap());
	assert!(simulation.accept());
}

#[test]
fn simulating_an_nfa_is_rejected() {
	let mut nfa = Automaton::new(0u32);
	nfa.add_transition(0, Some(b'a'), 1);
	nfa.add_transition(0, Some(b'a'), 2);

	let mut simulation = nfa.simulate();
	assert_eq!(
		simulation.exec(b'a'),
		Err(Error::Nondeterministic {
			symbol: Some(b'a'),
			targets: 2
		})
	);
	assert_eq!(simulation.state(), &0);

	let unrealized = symbol(b'a') | symbol(b'b');
	let mut simulation = unrealized.simulate();
	assert_eq!(
		simulation.exec(b'a'),
		Err(Error::Nondeterministic {
			symbol: None,
			targets: 2
		})
	);
}

#[test]
fn shortest_path() {
	let dfa = (literal("abc") | literal("x")).realize();
	for q in dfa.accepting().iter() {
		let path = dfa.shortest_path_to(q).unwrap();
		assert!(path == b"abc" || path == b"x");
	}

	assert_eq!(dfa.shortest_path_to(dfa.initial()), Some(Vec::new()));
}

#[test]
fn display_and_dot() {
	let nfa = symbol(b'a') | range(b'0', b'9');
	let text = nfa.to_string();
	assert!(text.starts_with("initial: 0\n"));
	assert!(text.contains("\ton ε goto "));
	assert!(text.contains("\ton [0-9] goto "));
	assert!(text.contains("accepting:\n\t1\n"));

	let dfa = nfa.realize();
	let labeled = dfa.map(|q| DisplayStateSet(q).to_string());
	let mut dot = Vec::new();
	labeled.dot_write(&mut dot).unwrap();
	let dot = String::from_utf8(dot).unwrap();
	assert!(dot.starts_with("digraph {"));
	assert!(dot.contains("doublecircle"));
	assert!(dot.contains("label=\"[0-9]\""));
}

#[test]
fn display_state_set() {
	let mut set = StateSet::new();
	set.insert("b".to_string());
	set.insert("a".to_string());
	assert_eq!(DisplayStateSet(&set).to_string(), "{a,b}");
}

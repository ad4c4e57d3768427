//! Regular expression combinators.
//!
//! Every combinator returns a fresh automaton whose initial state is `0` and
//! whose only accepting state is `1` (except for [`concat`], which starts where
//! its first operand starts). Operands are never modified: they are copied
//! under the `a.` and `b.` namespaces before being spliced together with epsilon
//! transitions, so the same expression can be reused any number of times.
//!
//! ```
//! use munch::regexp::{range, symbol};
//!
//! let digit = range(b'0', b'9');
//! let number = &digit + &digit.star();
//! let signed = symbol(b'-').optional() + number;
//! assert!(signed.recognizes(b"-42"));
//! ```
use crate::{Automaton, EPSILON};
use std::ops::{Add, BitOr};

/// Automaton built by the combinators.
pub type Regex = Automaton<String>;

const START: &str = "0";
const ACCEPT: &str = "1";

fn start() -> String {
	START.to_string()
}

fn accept() -> String {
	ACCEPT.to_string()
}

/// The two states `0` and `1`, without transitions.
fn unit() -> Regex {
	let mut a = Automaton::new(start());
	a.add_accepting(accept());
	a
}

/// Matches the single byte `c`.
pub fn symbol(c: u8) -> Regex {
	let mut a = unit();
	a.add_transition(start(), Some(c), accept());
	a
}

/// Matches any byte between `a` and `b` (inclusive, in any order).
pub fn range(a: u8, b: u8) -> Regex {
	let mut r = unit();
	for c in crate::charset::Range::new(a, b).bytes() {
		r.add_transition(start(), Some(c), accept());
	}

	r
}

/// Matches any byte but `c`.
pub fn exclude(c: u8) -> Regex {
	let mut r = unit();
	for b in (0..=u8::MAX).filter(|b| *b != c) {
		r.add_transition(start(), Some(b), accept());
	}

	r
}

/// Matches any one of the given bytes.
pub fn any_of<B: AsRef<[u8]>>(bytes: B) -> Regex {
	let mut r = unit();
	for b in bytes.as_ref() {
		r.add_transition(start(), Some(*b), accept());
	}

	r
}

/// Matches the empty string.
pub fn epsilon() -> Regex {
	let mut r = unit();
	r.add_transition(start(), EPSILON, accept());
	r
}

/// Matches what `a` or `b` matches.
pub fn union(a: &Regex, b: &Regex) -> Regex {
	let a = a.prefix("a.");
	let b = b.prefix("b.");

	let mut r = Automaton::new(start());
	r.merge_transitions(&a);
	r.merge_transitions(&b);

	r.add_transition(start(), EPSILON, a.initial().clone());
	r.add_transition(start(), EPSILON, b.initial().clone());

	for q in a.accepting().iter().chain(b.accepting().iter()) {
		r.add_transition(q.clone(), EPSILON, accept());
	}

	r.add_accepting(accept());
	r
}

/// Matches what `a` matches followed by what `b` matches.
///
/// Also available as the `+` operator:
///
/// ```
/// use munch::regexp::{concat, symbol};
///
/// let ab = symbol(b'a') + symbol(b'b');
/// assert!(ab.recognizes(b"ab"));
/// assert!(!ab.recognizes(b"a"));
///
/// let same = concat(&symbol(b'a'), &symbol(b'b'));
/// assert_eq!(same.to_string(), ab.to_string());
/// ```
pub fn concat(a: &Regex, b: &Regex) -> Regex {
	let a = a.prefix("a.");
	let b = b.prefix("b.");

	let mut r = Automaton::new(a.initial().clone());
	r.merge_transitions(&a);
	r.merge_transitions(&b);

	for q in a.accepting().iter() {
		r.add_transition(q.clone(), EPSILON, b.initial().clone());
	}

	for q in b.accepting().iter() {
		r.add_transition(q.clone(), EPSILON, accept());
	}

	r.add_accepting(accept());
	r
}

/// Kleene closure: zero or more repetitions of `a`.
pub fn star(a: &Regex) -> Regex {
	let a = a.prefix("a.");

	let mut r = Automaton::new(start());
	r.merge_transitions(&a);

	r.add_transition(start(), EPSILON, a.initial().clone());
	r.add_transition(start(), EPSILON, accept());

	for q in a.accepting().iter() {
		r.add_transition(q.clone(), EPSILON, accept());
		r.add_transition(q.clone(), EPSILON, a.initial().clone());
	}

	r.add_accepting(accept());
	r
}

/// One or more repetitions of `a`.
pub fn plus(a: &Regex) -> Regex {
	concat(a, &star(a))
}

/// Zero or one occurrence of `a`.
pub fn optional(a: &Regex) -> Regex {
	union(a, &epsilon())
}

/// Matches exactly the given string.
///
/// The empty string gives [`epsilon`].
pub fn literal<S: AsRef<[u8]>>(s: S) -> Regex {
	match s.as_ref().split_first() {
		Some((first, rest)) => rest
			.iter()
			.fold(symbol(*first), |r, c| concat(&r, &symbol(*c))),
		None => epsilon(),
	}
}

impl Automaton<String> {
	pub fn star(&self) -> Regex {
		star(self)
	}

	pub fn plus(&self) -> Regex {
		plus(self)
	}

	pub fn optional(&self) -> Regex {
		optional(self)
	}
}

impl Add for Regex {
	type Output = Regex;

	fn add(self, other: Regex) -> Regex {
		concat(&self, &other)
	}
}

impl<'a> Add<&'a Regex> for &'a Regex {
	type Output = Regex;

	fn add(self, other: &'a Regex) -> Regex {
		concat(self, other)
	}
}

impl BitOr for Regex {
	type Output = Regex;

	fn bitor(self, other: Regex) -> Regex {
		union(&self, &other)
	}
}

impl<'a> BitOr<&'a Regex> for &'a Regex {
	type Output = Regex;

	fn bitor(self, other: &'a Regex) -> Regex {
		union(self, other)
	}
}

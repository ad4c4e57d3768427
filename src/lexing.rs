//! Lexers: pattern tables compiled into a single deterministic automaton.
use crate::{automaton::Automaton, regexp::Regex};
use source_span::{DefaultMetrics, Metrics, DEFAULT_METRICS};
use std::collections::BTreeSet;

mod error;
mod table;
mod tokenizer;

pub use error::{Error, Result, TableError};
pub use table::{Ambiguity, DetState, DisplayDetState};
pub use tokenizer::{Token, Tokenizer};

/// Kind of the tokens that are matched but never returned (whitespace, comments).
pub const SKIP: &str = "SKIP";

/// Separates the kind from the pattern state in the labels of the merged automaton.
pub const SEPARATOR: char = '.';

/// Strings accepted by `automaton` are tokens of kind `kind`.
#[derive(Clone)]
pub struct Pattern {
	kind: String,
	automaton: Regex,
}

impl Pattern {
	pub fn new<K: Into<String>>(kind: K, automaton: Regex) -> Self {
		Self {
			kind: kind.into(),
			automaton,
		}
	}

	pub fn kind(&self) -> &str {
		&self.kind
	}

	pub fn automaton(&self) -> &Regex {
		&self.automaton
	}
}

impl<K: Into<String>> From<(K, Regex)> for Pattern {
	fn from((kind, automaton): (K, Regex)) -> Self {
		Self::new(kind, automaton)
	}
}

/// Compiled pattern table.
///
/// The table is realized once, when the lexer is built.
/// It is then shared, read-only, by every [`Tokenizer`] session opened with
/// [`tokenize`](Lexer::tokenize).
///
/// When one lexeme is matched by several patterns,
/// the pattern declared first wins.
pub struct Lexer {
	/// Kinds, in declaration order.
	kinds: Vec<String>,

	/// Index of the `SKIP` kind, if declared.
	skip: Option<u32>,

	/// Merged, nondeterministic, automaton.
	nfa: Automaton<String>,

	/// Realized automaton, with interned states.
	automaton: Automaton<DetState>,

	/// Accepting states claimed by more than one kind.
	ambiguities: Vec<Ambiguity>,
}

impl Lexer {
	/// Compiles the given ordered pattern table.
	pub fn tokens<P, I>(patterns: I) -> std::result::Result<Lexer, TableError>
	where
		P: Into<Pattern>,
		I: IntoIterator<Item = P>,
	{
		let patterns: Vec<Pattern> = patterns.into_iter().map(Into::into).collect();

		let nfa = table::merge(&patterns)?;
		log::debug!(
			"merged {} patterns into {} states",
			patterns.len(),
			nfa.len()
		);

		let det = nfa.realize();
		log::debug!("realized automaton has {} states", det.len());

		let kinds: Vec<String> = patterns.into_iter().map(|p| p.kind).collect();
		let (automaton, ambiguities) = table::intern(&nfa, &det, &kinds);

		let produced: BTreeSet<u32> = automaton
			.accepting()
			.iter()
			.filter_map(DetState::kind)
			.collect();
		for (i, kind) in kinds.iter().enumerate() {
			if !produced.contains(&(i as u32)) {
				log::warn!("token kind `{}` can never be produced", kind)
			}
		}

		let skip = kinds.iter().position(|k| k == SKIP).map(|i| i as u32);

		Ok(Lexer {
			kinds,
			skip,
			nfa,
			automaton,
			ambiguities,
		})
	}

	/// Declared kinds, in declaration order.
	pub fn kinds(&self) -> &[String] {
		&self.kinds
	}

	pub fn kind(&self, index: u32) -> Option<&str> {
		self.kinds.get(index as usize).map(String::as_str)
	}

	pub fn kind_index(&self, kind: &str) -> Option<u32> {
		self.kinds.iter().position(|k| k == kind).map(|i| i as u32)
	}

	pub fn is_skip(&self, index: u32) -> bool {
		self.skip == Some(index)
	}

	/// Merged automaton, before realization.
	pub fn nfa(&self) -> &Automaton<String> {
		&self.nfa
	}

	/// Realized automaton.
	pub fn automaton(&self) -> &Automaton<DetState> {
		&self.automaton
	}

	pub fn ambiguities(&self) -> &[Ambiguity] {
		&self.ambiguities
	}

	/// Opens a tokenizer session on `input`.
	pub fn tokenize<'i>(&self, input: &'i [u8]) -> Tokenizer<'_, 'i, DefaultMetrics> {
		Tokenizer::new(self, input, DEFAULT_METRICS)
	}

	/// Opens a tokenizer session on `input`,
	/// measuring lines and columns with `metrics`.
	pub fn tokenize_with_metrics<'i, M: Metrics>(
		&self,
		input: &'i [u8],
		metrics: M,
	) -> Tokenizer<'_, 'i, M> {
		Tokenizer::new(self, input, metrics)
	}

	pub fn display_state<'a>(&'a self, q: &'a DetState) -> DisplayDetState<'a> {
		DisplayDetState(self, q)
	}

	/// Writes the realized automaton in the Graphviz `dot` format.
	pub fn dot_write<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
		self.automaton
			.dot_write_with(out, |q| self.display_state(q).to_string())
	}
}

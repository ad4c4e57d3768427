use super::{DetState, Error, Lexer, Result};
use crate::{automaton::Simulation, charset::DisplayBytes};
use source_span::{DefaultMetrics, Loc, Metrics, Position, Span};
use std::borrow::Cow;

/// Token emitted by a [`Tokenizer`].
#[derive(Clone, Copy, Debug)]
pub struct Token<'l, 'i> {
	kind: &'l str,
	kind_index: u32,
	lexeme: &'i [u8],
	offset: usize,
	span: Span,
}

impl<'l, 'i> Token<'l, 'i> {
	pub fn kind(&self) -> &'l str {
		self.kind
	}

	/// Index of the kind in the pattern table.
	pub fn kind_index(&self) -> u32 {
		self.kind_index
	}

	pub fn lexeme(&self) -> &'i [u8] {
		self.lexeme
	}

	/// Lexeme, decoded as UTF-8 (invalid sequences are replaced).
	pub fn text(&self) -> Cow<'i, str> {
		String::from_utf8_lossy(self.lexeme)
	}

	/// Byte offset of the lexeme in the input.
	pub fn offset(&self) -> usize {
		self.offset
	}

	pub fn span(&self) -> Span {
		self.span
	}

	pub fn is(&self, kind: &str) -> bool {
		self.kind == kind
	}
}

/// Tokenizer session.
///
/// Drives the realized automaton of a [`Lexer`] over an input buffer,
/// always matching the longest possible lexeme.
/// Tokens of the `SKIP` kind are silently dropped by [`next_token`](Tokenizer::next_token).
pub struct Tokenizer<'l, 'i, M: Metrics = DefaultMetrics> {
	lexer: &'l Lexer,
	simulation: Simulation<'l, DetState>,
	input: &'i [u8],

	/// Offset of the next byte to read.
	cursor: usize,

	/// Position of the next byte to read.
	position: Position,

	metrics: M,

	/// Last emitted token.
	current: Option<Token<'l, 'i>>,

	/// Set by the iterator after the first error.
	failed: bool,
}

impl<'l, 'i, M: Metrics> Tokenizer<'l, 'i, M> {
	pub fn new(lexer: &'l Lexer, input: &'i [u8], metrics: M) -> Self {
		Tokenizer {
			lexer,
			simulation: lexer.automaton().simulate(),
			input,
			cursor: 0,
			position: Position::default(),
			metrics,
			current: None,
			failed: false,
		}
	}

	pub fn lexer(&self) -> &'l Lexer {
		self.lexer
	}

	/// Rebinds the session to a new input.
	pub fn tokenize(&mut self, input: &'i [u8]) {
		self.simulation.reset();
		self.input = input;
		self.cursor = 0;
		self.position = Position::default();
		self.current = None;
		self.failed = false;
	}

	/// Last token emitted by [`next_token`](Tokenizer::next_token),
	/// [`next_raw_token`](Tokenizer::next_raw_token) or [`consume`](Tokenizer::consume).
	pub fn token(&self) -> Option<Token<'l, 'i>> {
		self.current
	}

	/// Checks if the whole input has been read.
	///
	/// Trailing skipped lexemes are only read by the next call to
	/// [`next_token`](Tokenizer::next_token).
	pub fn eof(&self) -> bool {
		self.cursor >= self.input.len()
	}

	/// Position of the next byte to read.
	pub fn position(&self) -> Position {
		self.position
	}

	/// Offset of the next byte to read.
	pub fn offset(&self) -> usize {
		self.cursor
	}

	/// Input not read yet.
	pub fn rest(&self) -> &'i [u8] {
		&self.input[self.cursor..]
	}

	/// Next token, skipped kinds excluded.
	///
	/// Returns `Ok(None)` at the end of the input.
	pub fn next_token(&mut self) -> Result<Option<Token<'l, 'i>>> {
		loop {
			match self.munch()? {
				Some(token) if self.lexer.is_skip(token.kind_index) => {
					log::trace!("skipped `{}`", DisplayBytes(token.lexeme))
				}
				Some(token) => {
					log::trace!("token {} `{}`", token.kind, DisplayBytes(token.lexeme));
					self.current = Some(token);
					return Ok(Some(token));
				}
				None => return Ok(None),
			}
		}
	}

	/// Next token, skipped kinds included.
	pub fn next_raw_token(&mut self) -> Result<Option<Token<'l, 'i>>> {
		let token = self.munch()?;
		if token.is_some() {
			self.current = token
		}

		Ok(token)
	}

	/// Next token, without moving forward.
	pub fn lookahead(&mut self) -> Result<Option<Token<'l, 'i>>> {
		let cursor = self.cursor;
		let position = self.position;
		let current = self.current;

		let result = self.next_token();

		self.cursor = cursor;
		self.position = position;
		self.current = current;
		result
	}

	/// Reads the next token, which must be of the given kind.
	///
	/// On mismatch, the token is consumed anyway
	/// and an [`Error::Unexpected`] located on it is returned.
	pub fn consume(&mut self, kind: &str) -> Result<Token<'l, 'i>> {
		match self.next_token()? {
			Some(token) if token.kind == kind => Ok(token),
			Some(token) => Err(Loc::new(
				Error::Unexpected {
					expected: kind.to_string(),
					found: Some((token.kind.to_string(), token.lexeme.to_vec())),
				},
				token.span,
			)),
			None => Err(Loc::new(
				Error::Unexpected {
					expected: kind.to_string(),
					found: None,
				},
				self.position.into(),
			)),
		}
	}

	/// Same as [`consume`](Tokenizer::consume).
	pub fn expect(&mut self, kind: &str) -> Result<Token<'l, 'i>> {
		self.consume(kind)
	}

	/// Reads the longest lexeme starting at the cursor.
	///
	/// On error the cursor is left at the start of the lexeme.
	fn munch(&mut self) -> Result<Option<Token<'l, 'i>>> {
		if self.eof() {
			return Ok(None);
		}

		let start = self.cursor;
		let mut span: Span = self.position.into();
		let mut end = start;

		self.simulation.reset();
		while let Some(&b) = self.input.get(end) {
			match self.simulation.exec(b) {
				Ok(true) => {
					span.push(b as char, &self.metrics);
					end += 1
				}
				Ok(false) => break,
				Err(e) => {
					self.simulation.reset();
					return Err(Loc::new(e.into(), span));
				}
			}
		}

		let lexeme = &self.input[start..end];
		let kind = self.simulation.state().kind();
		self.simulation.reset();

		match kind {
			Some(kind_index) if end > start => {
				self.cursor = end;
				self.position = span.end();

				Ok(Some(Token {
					kind: &self.lexer.kinds()[kind_index as usize],
					kind_index,
					lexeme,
					offset: start,
					span,
				}))
			}
			_ => {
				let found = self.input.get(end).cloned();
				if let Some(b) = found {
					span.push(b as char, &self.metrics)
				}

				Err(Loc::new(
					Error::Lexical {
						lexeme: lexeme.to_vec(),
						found,
					},
					span,
				))
			}
		}
	}
}

impl<'l, 'i, M: Metrics> Iterator for Tokenizer<'l, 'i, M> {
	type Item = Result<Token<'l, 'i>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		match self.next_token() {
			Ok(Some(token)) => Some(Ok(token)),
			Ok(None) => None,
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			}
		}
	}
}

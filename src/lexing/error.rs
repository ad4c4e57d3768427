use crate::{
	automaton,
	charset::{DisplayByte, DisplayBytes},
	out,
};
use source_span::Loc;
use std::fmt;

/// Session result.
///
/// Errors are located in the input.
pub type Result<T> = std::result::Result<T, Loc<Error>>;

/// Invalid pattern table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
	/// Kinds must be non empty and cannot contain the separator.
	InvalidKind(String),

	/// The same kind is declared twice.
	DuplicateKind(String),

	/// There is nothing to match.
	NoPatterns,
}

impl fmt::Display for TableError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			TableError::InvalidKind(kind) => write!(
				f,
				"invalid token kind `{}` (must be non empty and without `{}`)",
				kind,
				super::SEPARATOR
			),
			TableError::DuplicateKind(kind) => write!(f, "token kind `{}` is declared twice", kind),
			TableError::NoPatterns => write!(f, "empty pattern table"),
		}
	}
}

impl std::error::Error for TableError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// No token could be matched.
	///
	/// The lexeme is what has been read since the start of the would-be token,
	/// `found` is the byte on which the automaton got stuck (`None` at the end of the input).
	Lexical {
		lexeme: Vec<u8>,
		found: Option<u8>,
	},

	/// The next token is not of the expected kind.
	///
	/// `found` holds the kind and lexeme of the next token (`None` at the end of the input).
	Unexpected {
		expected: String,
		found: Option<(String, Vec<u8>)>,
	},

	/// The automaton used for the session is not deterministic.
	Automaton(automaton::Error),
}

impl Error {
	pub fn is_lexical(&self) -> bool {
		match self {
			Error::Lexical { .. } => true,
			_ => false,
		}
	}

	pub fn title(&self) -> String {
		match self {
			Error::Lexical { .. } => "lexical error".to_string(),
			Error::Unexpected { .. } => "unexpected token".to_string(),
			Error::Automaton(_) => "invalid lexer".to_string(),
		}
	}

	pub fn fill_block(&self, block: &mut out::Block) {
		use yansi::Paint;

		match self {
			Error::Lexical { lexeme, found } => {
				if !lexeme.is_empty() {
					block.add_note(
						out::NoteType::Note,
						format!(
							"`{}` is the beginning of some token, but no token at all",
							Paint::new(DisplayBytes(lexeme)).bold()
						),
					)
				}

				if found.is_none() {
					block.add_note(out::NoteType::Note, "the input ends in the middle of a token")
				}
			}
			Error::Unexpected { expected, .. } => block.add_note(
				out::NoteType::Help,
				format!("expected some {}", Paint::new(expected).bold()),
			),
			Error::Automaton(_) => block.add_note(
				out::NoteType::Help,
				"only realized automata can be used to tokenize",
			),
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::Lexical { lexeme, found } => {
				match found {
					Some(b) => write!(f, "unexpected byte `{}`", DisplayByte(*b))?,
					None => write!(f, "unexpected end of input")?,
				}

				if !lexeme.is_empty() {
					write!(f, " after `{}`", DisplayBytes(lexeme))?
				}

				Ok(())
			}
			Error::Unexpected { expected, found } => match found {
				Some((kind, lexeme)) => write!(
					f,
					"expected `{}`, found `{}` (`{}`)",
					expected,
					kind,
					DisplayBytes(lexeme)
				),
				None => write!(f, "expected `{}`, found end of input", expected),
			},
			Error::Automaton(e) => e.fmt(f),
		}
	}
}

impl std::error::Error for Error {}

impl From<automaton::Error> for Error {
	fn from(e: automaton::Error) -> Error {
		Error::Automaton(e)
	}
}

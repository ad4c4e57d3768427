//! Diagnostic rendering.
use source_span::{fmt::Style, Loc, Metrics, Span};
use std::{convert::Infallible, fmt};
use yansi::Paint;

use crate::lexing;

pub enum Type {
	Warning,
	Error,
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Warning => write!(f, "{}", Paint::yellow("warning").bold()),
			Self::Error => write!(f, "{}", Paint::red("error").bold()),
		}
	}
}

/// Diagnostic message: a title, highlighted source excerpt and notes.
pub struct Block {
	ty: Type,
	title: String,
	source: Option<String>,
	highlights: source_span::fmt::Formatter,
	notes: Vec<Note>,
}

impl Block {
	pub fn new<S: ToString>(ty: Type, title: S) -> Block {
		Block {
			ty,
			title: title.to_string(),
			source: None,
			highlights: source_span::fmt::Formatter::new(),
			notes: Vec::new(),
		}
	}

	/// Error block of a tokenizer session error, highlighting its location.
	pub fn for_error(e: &Loc<lexing::Error>) -> Block {
		let mut block = Block::new(Type::Error, e.title());
		block
			.highlights_mut()
			.add(e.span(), Some((**e).to_string()), Style::Error);
		e.fill_block(&mut block);
		block
	}

	pub fn source(&self) -> Option<&str> {
		self.source.as_ref().map(String::as_str)
	}

	/// Sets the name of the source (usually a file name) shown under the title.
	pub fn set_source<S: ToString>(&mut self, source: S) {
		self.source = Some(source.to_string())
	}

	pub fn highlights_mut(&mut self) -> &mut source_span::fmt::Formatter {
		&mut self.highlights
	}

	pub fn add_note<S: ToString>(&mut self, ty: NoteType, content: S) {
		self.notes.push(Note {
			ty,
			content: content.to_string(),
		})
	}

	pub fn render<E, I: Iterator<Item = Result<char, E>>, M: Metrics>(
		&self,
		input: I,
		span: Span,
		metrics: &M,
	) -> Result<Formatted<'_>, E> {
		let margin_len = self.highlights.margin_len(&span);

		Ok(Formatted {
			block: self,
			margin_len: if margin_len >= 2 { margin_len - 2 } else { 0 },
			highlights: self.highlights.render(input, span, metrics)?,
		})
	}

	/// Renders the block over a byte buffer, each byte standing for one character.
	pub fn render_bytes<M: Metrics>(&self, input: &[u8], metrics: &M) -> Formatted<'_> {
		match self.render(chars(input), span_of(input, metrics), metrics) {
			Ok(formatted) => formatted,
			Err(e) => match e {},
		}
	}
}

/// Characters of a byte buffer, as expected by the highlights formatter.
pub fn chars<'a>(input: &'a [u8]) -> impl 'a + Iterator<Item = Result<char, Infallible>> {
	input.iter().map(|b| Ok(*b as char))
}

/// Span covering the whole of a byte buffer.
pub fn span_of<M: Metrics>(input: &[u8], metrics: &M) -> Span {
	let mut span = Span::default();
	for b in input {
		span.push(*b as char, metrics)
	}

	span
}

pub struct Formatted<'a> {
	block: &'a Block,
	margin_len: usize,
	highlights: source_span::fmt::Formatted,
}

impl<'a> fmt::Display for Formatted<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let tab = " ".repeat(self.margin_len);

		writeln!(
			f,
			"{}{} {}",
			self.block.ty,
			Paint::new(':').bold(),
			Paint::new(&self.block.title).bold()
		)?;

		if let Some(source) = &self.block.source {
			writeln!(f, "{}{} {}", tab, Paint::blue("-->").bold(), source)?
		}

		write!(f, "{}{}", tab, Paint::blue('|').bold())?;
		self.highlights.fmt(f)?;
		writeln!(f, "{}{}", tab, Paint::blue('|').bold())?;

		for note in &self.block.notes {
			for (i, line) in note.content.lines().enumerate() {
				if i == 0 {
					writeln!(f, "{}= {}: {}", tab, note.ty, line)?;
				} else {
					writeln!(f, "{}  {}", tab, line)?
				}
			}
		}

		Ok(())
	}
}

pub enum NoteType {
	Note,
	Help,
}

impl fmt::Display for NoteType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Note => write!(f, "{}", Paint::new("note").bold()),
			Self::Help => write!(f, "{}", Paint::green("help").bold()),
		}
	}
}

pub struct Note {
	ty: NoteType,
	content: String,
}

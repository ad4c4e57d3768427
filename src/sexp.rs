//! Built-in lexer for the S-expression language.
//!
//! Keywords are declared before `ID` so that they win over identifiers.
use crate::{
	lexing::{Lexer, Pattern, TableError, SKIP},
	regexp::{any_of, exclude, literal, range, symbol, Regex},
};

pub fn digit() -> Regex {
	range(b'0', b'9')
}

pub fn alpha() -> Regex {
	range(b'a', b'z') | range(b'A', b'Z')
}

pub fn identifier() -> Regex {
	alpha() + (alpha() | digit()).star()
}

pub fn number() -> Regex {
	digit().plus()
}

/// Double quoted string, without escape sequences.
pub fn string() -> Regex {
	symbol(b'"') + exclude(b'"').star() + symbol(b'"')
}

/// Whitespace or `#` line comment.
pub fn skip() -> Regex {
	let comment = symbol(b'#') + exclude(b'\n').star() + symbol(b'\n');
	any_of(" \n\t") | comment
}

const KEYWORDS: &[&str] = &[
	"if", "while", "until", "loop", "when", "do", "val", "let", "template", "type", "true",
	"false",
];

const PUNCTUATION: &[(&str, &str)] = &[
	("OPAREN", "("),
	("CPAREN", ")"),
	("OBRACK", "["),
	("CBRACK", "]"),
	("OBRACE", "{"),
	("CBRACE", "}"),
	("ASSIGN", "="),
	("EQUALS", "=="),
	("PLUS", "+"),
	("MINUS", "-"),
	("STAR", "*"),
	("FSLASH", "/"),
	("BSLASH", "\\"),
	("SEMI", ";"),
	("COLONS", "::"),
	("COLON", ":"),
	("DOT", "."),
	("COMMA", ","),
	("AT", "@"),
	("ARROW", "->"),
];

/// Ordered pattern table.
pub fn patterns() -> Vec<Pattern> {
	let mut patterns = vec![
		Pattern::new(SKIP, skip()),
		Pattern::new("STRING", string()),
		Pattern::new("SYM", symbol(b':') + identifier()),
		Pattern::new("NUM", number()),
	];

	for keyword in KEYWORDS {
		patterns.push(Pattern::new(keyword.to_uppercase(), literal(keyword)))
	}

	patterns.push(Pattern::new("ID", identifier()));

	for (kind, text) in PUNCTUATION {
		patterns.push(Pattern::new(*kind, literal(text)))
	}

	patterns
}

pub fn lexer() -> Result<Lexer, TableError> {
	Lexer::tokens(patterns())
}

extern crate source_span;

pub mod automaton;
pub mod charset;
pub mod lexing;
pub mod out;
pub mod regexp;
pub mod sexp;

pub use automaton::{Automaton, StateSet, Symbol, EPSILON};
pub use lexing::{Lexer, Pattern, Token, Tokenizer, SKIP};
pub use regexp::{
	any_of, concat, epsilon, exclude, literal, optional, plus, range, star, symbol, union, Regex,
};

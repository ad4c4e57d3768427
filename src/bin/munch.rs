#[macro_use]
extern crate clap;

use source_span::DefaultMetrics;
use std::{
	fmt,
	fs::File,
	io::{self, Read, Write},
};

use munch::{lexing, out, sexp, Lexer};

fn main() {
	// Parse options.
	let yaml = load_yaml!("munch.yml");
	let matches = clap::App::from_yaml(yaml).get_matches();

	// Init logger.
	let verbosity = matches.occurrences_of("verbose") as usize;
	if let Err(e) = stderrlog::new().verbosity(verbosity).init() {
		eprintln!("unable to initialize the logger: {}", e)
	}

	if let Err(e) = run(&matches) {
		match e {
			Error::Lexing(filename, input, e) => {
				let metrics = DefaultMetrics::with_tab_stop(4);
				let mut block = out::Block::for_error(&e);
				block.set_source(filename);
				eprintln!("{}", block.render_bytes(&input, &metrics))
			}
			e => eprintln!("{}", e),
		}

		std::process::exit(1)
	}
}

fn run(matches: &clap::ArgMatches) -> Result<(), Error> {
	log::info!("building lexer...");
	let lexer = sexp::lexer()?;

	match matches.subcommand() {
		("tokens", Some(m)) => {
			let filename = m.value_of("FILE").unwrap_or_default();
			let mut input = Vec::new();
			File::open(filename)?.read_to_end(&mut input)?;
			print_tokens(&lexer, filename, input)
		}
		("table", Some(m)) => {
			let stdout = io::stdout();
			let mut out = stdout.lock();
			if m.is_present("nfa") {
				lexer.nfa().dot_write(&mut out)?
			} else {
				lexer.dot_write(&mut out)?
			}

			Ok(out.flush()?)
		}
		(name, _) => Err(Error::UnknownCommand(name.to_string())),
	}
}

fn print_tokens(lexer: &Lexer, filename: &str, input: Vec<u8>) -> Result<(), Error> {
	let stdout = io::stdout();
	let mut out = stdout.lock();

	let metrics = DefaultMetrics::with_tab_stop(4);
	let mut tokens = lexer.tokenize_with_metrics(&input, metrics);
	loop {
		match tokens.next_token() {
			Ok(Some(token)) => {
				let start = token.span().start();
				writeln!(
					out,
					"{} {} {}:{}",
					token.kind(),
					token.text(),
					start.line + 1,
					start.column + 1
				)?
			}
			Ok(None) => break,
			Err(e) => return Err(Error::Lexing(filename.to_string(), input.clone(), e)),
		}
	}

	Ok(())
}

enum Error {
	UnknownCommand(String),
	IO(io::Error),
	Table(lexing::TableError),
	Lexing(String, Vec<u8>, source_span::Loc<lexing::Error>),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::UnknownCommand(name) => write!(f, "unknown command `{}`", name),
			Self::IO(e) => e.fmt(f),
			Self::Table(e) => e.fmt(f),
			Self::Lexing(_, _, e) => write!(f, "{}", e.title()),
		}
	}
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Self::IO(e)
	}
}

impl From<lexing::TableError> for Error {
	fn from(e: lexing::TableError) -> Self {
		Self::Table(e)
	}
}

use munch::regexp::*;

fn digit() -> Regex {
	range(b'0', b'9')
}

#[test]
fn symbol_matches_one_byte() {
	let a = symbol(b'a');
	assert!(a.recognizes(b"a"));
	assert!(!a.recognizes(b""));
	assert!(!a.recognizes(b"b"));
	assert!(!a.recognizes(b"aa"));
}

#[test]
fn range_bounds_in_any_order() {
	let r = range(b'9', b'0');
	for c in b'0'..=b'9' {
		assert!(r.recognizes(&[c]));
	}

	assert!(!r.recognizes(b"a"));
	assert!(!r.recognizes(b"/"));
	assert!(!r.recognizes(b":"));
}

#[test]
fn exclude_matches_everything_else() {
	let not_eol = exclude(b'\n');
	assert!(not_eol.recognizes(b"x"));
	assert!(not_eol.recognizes(&[0]));
	assert!(not_eol.recognizes(&[255]));
	assert!(!not_eol.recognizes(b"\n"));
	assert!(!not_eol.recognizes(b""));
}

#[test]
fn union_is_language_union() {
	let ab = union(&literal("ab"), &symbol(b'c'));
	assert!(ab.recognizes(b"ab"));
	assert!(ab.recognizes(b"c"));
	assert!(!ab.recognizes(b"a"));
	assert!(!ab.recognizes(b"abc"));
}

#[test]
fn concat_is_language_product() {
	let a_or_b = symbol(b'a') | symbol(b'b');
	let c_or_d = symbol(b'c') | symbol(b'd');
	let r = concat(&a_or_b, &c_or_d);

	for input in &["ac", "ad", "bc", "bd"] {
		assert!(r.recognizes(input.as_bytes()), "{}", input);
	}

	for input in &["", "a", "c", "ca", "acd"] {
		assert!(!r.recognizes(input.as_bytes()), "{}", input);
	}
}

#[test]
fn star_is_kleene_closure() {
	let r = star(&literal("ab"));
	assert!(r.recognizes(b""));
	assert!(r.recognizes(b"ab"));
	assert!(r.recognizes(b"ababab"));
	assert!(!r.recognizes(b"aba"));
	assert!(!r.recognizes(b"ba"));
}

#[test]
fn star_of_nullable_terminates() {
	let r = star(&star(&symbol(b'a')));
	assert!(r.recognizes(b""));
	assert!(r.recognizes(b"aaaa"));

	let dfa = r.realize();
	assert!(dfa.is_deterministic());
	assert!(dfa.recognizes(b"aa"));
}

#[test]
fn derived_combinators() {
	let number = plus(&digit());
	assert!(!number.recognizes(b""));
	assert!(number.recognizes(b"0"));
	assert!(number.recognizes(b"2021"));

	let sign = optional(&symbol(b'-'));
	assert!(sign.recognizes(b""));
	assert!(sign.recognizes(b"-"));
	assert!(!sign.recognizes(b"--"));

	let ws = any_of(" \t");
	assert!(ws.recognizes(b" "));
	assert!(ws.recognizes(b"\t"));
	assert!(!ws.recognizes(b"\n"));

	assert!(epsilon().recognizes(b""));
	assert!(!epsilon().recognizes(b"a"));
}

#[test]
fn literal_strings() {
	let cat = literal("cat");
	assert!(cat.recognizes(b"cat"));
	assert!(!cat.recognizes(b"ca"));
	assert!(!cat.recognizes(b"cats"));

	let empty = literal("");
	assert!(empty.recognizes(b""));
	assert!(!empty.recognizes(b"a"));
}

#[test]
fn operators() {
	let a = symbol(b'a');
	let b = symbol(b'b');

	let r = (&a | &b).star() + symbol(b'c');
	assert!(r.recognizes(b"c"));
	assert!(r.recognizes(b"abbac"));
	assert!(!r.recognizes(b"ab"));

	let doubled = &a + &a;
	assert!(doubled.recognizes(b"aa"));
	assert!(!doubled.recognizes(b"a"));
}

#[test]
fn operands_are_left_untouched() {
	let a = literal("ab");
	let before = a.to_string();
	let states = a.len();

	let _ = union(&a, &a);
	let _ = concat(&a, &a);
	let _ = star(&a);

	assert_eq!(a.to_string(), before);
	assert_eq!(a.len(), states);
	assert!(a.recognizes(b"ab"));
}

#[test]
fn combinators_use_conventional_labels() {
	let r = union(&symbol(b'a'), &symbol(b'b'));
	assert_eq!(r.initial(), "0");
	assert_eq!(r.accepting().len(), 1);
	assert!(r.is_accepting(&"1".to_string()));
}

#[test]
fn prefix_renames_every_state() {
	let r = literal("abc").prefix("x.");
	assert!(r.states().all(|q| q.starts_with("x.")));
	assert!(r.initial().starts_with("x."));
	assert!(r.accepting().iter().all(|q| q.starts_with("x.")));
	assert!(r.recognizes(b"abc"));
}

use itertools::Itertools;
use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive range of bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Range {
	first: u8,
	last: u8,
}

impl Range {
	/// Creates the range between `a` and `b`, in whatever order they are given.
	pub fn new(a: u8, b: u8) -> Range {
		Range {
			first: std::cmp::min(a, b),
			last: std::cmp::max(a, b),
		}
	}

	pub fn bytes(&self) -> RangeInclusive<u8> {
		self.first..=self.last
	}
}

impl From<u8> for Range {
	fn from(b: u8) -> Range {
		Range { first: b, last: b }
	}
}

/// Groups the given sorted bytes into maximal runs of consecutive values.
pub fn ranges<I: IntoIterator<Item = u8>>(bytes: I) -> Vec<Range> {
	bytes
		.into_iter()
		.map(Range::from)
		.coalesce(|a, b| {
			if a.last as u16 + 1 == b.first as u16 {
				Ok(Range {
					first: a.first,
					last: b.last,
				})
			} else {
				Err((a, b))
			}
		})
		.collect()
}

pub struct DisplayByte(pub u8);

impl fmt::Display for DisplayByte {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.0 {
			b'\\' => write!(f, "\\\\"),
			b'\r' => write!(f, "\\r"),
			b'\n' => write!(f, "\\n"),
			b' ' => write!(f, "\\s"),
			b'\t' => write!(f, "\\t"),
			b if b.is_ascii_graphic() => (b as char).fmt(f),
			b => write!(f, "\\x{:02x}", b),
		}
	}
}

pub struct DisplayBytes<'a>(pub &'a [u8]);

impl<'a> fmt::Display for DisplayBytes<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for b in self.0 {
			DisplayByte(*b).fmt(f)?;
		}

		Ok(())
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.first == self.last {
			DisplayByte(self.first).fmt(f)
		} else if self.first + 1 == self.last {
			write!(f, "{}{}", DisplayByte(self.first), DisplayByte(self.last))
		} else {
			write!(f, "{}-{}", DisplayByte(self.first), DisplayByte(self.last))
		}
	}
}

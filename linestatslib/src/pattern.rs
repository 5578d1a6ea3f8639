//! Structural identity of a line.
//!
//! Two lines belong to the same template when they have the same number of
//! segments, the same literal/numeric layout, and byte-identical literal
//! text. Numeric values and integer/float kinds are ignored.

use std::hash::{BuildHasher, Hash, Hasher};

use crate::tokenizer::{Line, Segment};

/// The value-free view of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape<'a> {
    Literal(&'a str),
    Number,
}

/// Anything made of segments over a text: a freshly tokenized line or a
/// stored pattern.
pub trait Shaped {
    fn text(&self) -> &str;
    fn segments(&self) -> &[Segment];

    fn shapes(&self) -> impl Iterator<Item = Shape<'_>> + '_ {
        let text = self.text();
        self.segments().iter().map(move |segment| match segment {
            Segment::Literal(span) => Shape::Literal(&text[span.clone()]),
            Segment::Number { .. } => Shape::Number,
        })
    }

    /// Fingerprint that is equal for structurally equal values.
    ///
    /// Only the segment count and literal text feed the hash.
    fn fingerprint<S: BuildHasher>(&self, build: &S) -> u64 {
        let mut hasher = build.build_hasher();
        self.segments().len().hash(&mut hasher);
        for shape in self.shapes() {
            if let Shape::Literal(text) = shape {
                text.hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    fn same_shape<O: Shaped + ?Sized>(&self, other: &O) -> bool {
        self.segments().len() == other.segments().len() && self.shapes().eq(other.shapes())
    }

    fn number_count(&self) -> usize {
        self.segments().iter().filter(|s| !s.is_literal()).count()
    }
}

impl Shaped for Line<'_> {
    fn text(&self) -> &str {
        Line::text(self)
    }

    fn segments(&self) -> &[Segment] {
        Line::segments(self)
    }
}

/// The stored shape of a template.
///
/// Owns a copy of the text of the first line that produced it, since the
/// caller's line buffer is reused as input is read.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    text: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn from_line(line: &Line<'_>) -> Self {
        Self {
            text: line.text().to_owned(),
            segments: line.segments().to_vec(),
        }
    }

    /// Source text of a segment, as it appeared in the first occurrence.
    pub fn slice(&self, segment: &Segment) -> &str {
        &self.text[segment.span()]
    }

    /// Reclassify the numeric segment at `index` as literal text.
    ///
    /// Returns false when the segment is already literal.
    pub fn make_literal(&mut self, index: usize) -> bool {
        match self.segments.get(index) {
            Some(Segment::Number { span, .. }) => {
                let span = span.clone();
                self.segments[index] = Segment::Literal(span);
                true
            }
            _ => false,
        }
    }
}

impl Shaped for Pattern {
    fn text(&self) -> &str {
        &self.text
    }

    fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

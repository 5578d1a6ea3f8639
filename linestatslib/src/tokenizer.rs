//! Line tokenizer.
//!
//! Splits a line into alternating literal and numeric segments using a small
//! state machine with one byte of lookahead.
//!
//! Whitespace is handled specially: a run of spaces is held back until we
//! know what follows it, then becomes the prefix of that next segment. This
//! is what makes `"finished in100 seconds"` and `"finished in  5 seconds"`
//! produce the same literal `"finished in"` followed by a number.

use std::ops::Range;

use tracing::{trace, warn};

use crate::number::{Number, NumberKind};

/// One token of a line. Spans are byte ranges into the line text.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Text that must match exactly between lines of the same template
    Literal(Range<usize>),
    /// A parsed number. The span may start with the whitespace before it.
    Number { span: Range<usize>, value: Number },
}

/// Kind of a segment, without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Literal,
    Integer,
    Float,
}

impl Segment {
    pub fn span(&self) -> Range<usize> {
        match self {
            Segment::Literal(span) => span.clone(),
            Segment::Number { span, .. } => span.clone(),
        }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Literal(_) => SegmentKind::Literal,
            Segment::Number { value, .. } => match value.kind() {
                NumberKind::Integer => SegmentKind::Integer,
                NumberKind::Float => SegmentKind::Float,
            },
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Segment::Literal(_))
    }

    pub fn value(&self) -> Option<Number> {
        match self {
            Segment::Literal(_) => None,
            Segment::Number { value, .. } => Some(*value),
        }
    }
}

/// A tokenized line, borrowing the text it was produced from.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    text: &'a str,
    segments: Vec<Segment>,
}

impl<'a> Line<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Source text of a segment.
    pub fn slice(&self, segment: &Segment) -> &'a str {
        &self.text[segment.span()]
    }

    /// Values of the numeric segments, left to right.
    pub fn numbers(&self) -> impl Iterator<Item = Number> + '_ {
        self.segments.iter().filter_map(Segment::value)
    }

    pub fn kinds(&self) -> Vec<SegmentKind> {
        self.segments.iter().map(Segment::kind).collect()
    }
}

/// Tokenize a line.
///
/// The first `skip` numeric runs are kept as literal text, so leading fields
/// such as ids can be excluded from aggregation.
///
/// # Example
///
/// ```rust
/// use linestatslib::tokenizer::{tokenize, SegmentKind};
///
/// let line = tokenize("req took 10ms", 0);
/// assert_eq!(
///     line.kinds(),
///     vec![SegmentKind::Literal, SegmentKind::Integer, SegmentKind::Literal]
/// );
/// assert_eq!(line.slice(&line.segments()[0]), "req took");
/// ```
pub fn tokenize(text: &str, skip: usize) -> Line<'_> {
    let mut tokenizer = Tokenizer {
        text,
        bytes: text.as_bytes(),
        skip,
        start: 0,
        segments: Vec::new(),
    };
    tokenizer.scan();

    trace!(segments = tokenizer.segments.len(), line = text, "tokenized");

    Line {
        text,
        segments: tokenizer.segments,
    }
}

/// Scanner states. `Terminal` is entered once, at end of line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Literal,
    PreSpaces,
    Integer,
    Float,
    Terminal,
}

struct Tokenizer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    skip: usize,
    /// Start of the run currently being scanned
    start: usize,
    segments: Vec<Segment>,
}

impl Tokenizer<'_> {
    fn scan(&mut self) {
        let mut state = State::Literal;
        let mut pos = 0;

        while state != State::Terminal {
            let next = match self.bytes.get(pos) {
                Some(&byte) => transition(state, byte, self.bytes.get(pos + 1).copied()),
                None => State::Terminal,
            };

            // An integer that turns out to have a fraction is the same run.
            let same_run = next == state || (state == State::Integer && next == State::Float);
            if !same_run {
                self.finish_run(state, next, pos);
            }

            state = next;
            pos += 1;
        }
    }

    fn finish_run(&mut self, state: State, next: State, end: usize) {
        match state {
            State::Literal => {
                if end > self.start {
                    self.push_literal(self.start..end);
                }
                self.start = end;
            }
            State::Integer | State::Float => {
                self.push_number(state, self.start..end);
                self.start = end;
            }
            // Pending whitespace belongs to whatever comes next, unless nothing does.
            State::PreSpaces => {
                if next == State::Terminal && end > self.start {
                    self.push_literal(self.start..end);
                    self.start = end;
                }
            }
            State::Terminal => {}
        }
    }

    fn push_literal(&mut self, span: Range<usize>) {
        if let Some(Segment::Literal(prev)) = self.segments.last_mut() {
            if prev.end == span.start {
                prev.end = span.end;
                return;
            }
        }
        self.segments.push(Segment::Literal(span));
    }

    fn push_number(&mut self, state: State, span: Range<usize>) {
        if self.skip > 0 {
            self.skip -= 1;
            self.push_literal(span);
            return;
        }

        let digits = self.text[span.clone()].trim_start_matches(is_space_char);
        let parsed = if state == State::Float {
            digits.parse::<f64>().ok().map(Number::Float)
        } else {
            digits.parse::<i64>().ok().map(Number::Integer)
        };

        match parsed {
            Some(value) => self.segments.push(Segment::Number { span, value }),
            None => {
                let kind = if state == State::Float {
                    "float"
                } else {
                    "integer"
                };
                warn!("could not parse {kind} '{digits}'");
            }
        }
    }
}

fn transition(state: State, byte: u8, lookahead: Option<u8>) -> State {
    let next_is_digit = lookahead.is_some_and(|b| b.is_ascii_digit());
    let starts_number = byte.is_ascii_digit() || (byte == b'-' && next_is_digit);

    match state {
        State::Literal | State::PreSpaces if starts_number => State::Integer,
        State::Literal | State::PreSpaces if is_space(byte) => State::PreSpaces,
        State::Literal | State::PreSpaces => State::Literal,
        State::Integer if byte == b'.' => {
            if next_is_digit {
                State::Float
            } else {
                State::Literal
            }
        }
        State::Integer | State::Float if byte.is_ascii_digit() => state,
        State::Integer | State::Float if is_space(byte) => State::PreSpaces,
        State::Integer | State::Float => State::Literal,
        State::Terminal => State::Terminal,
    }
}

/// C-locale whitespace, including vertical tab and form feed.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

pub(crate) fn is_space_char(c: char) -> bool {
    c.is_ascii() && is_space(c as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(text: &str, skip: usize) -> Vec<(SegmentKind, &str)> {
        let line = tokenize(text, skip);
        line.segments()
            .iter()
            .map(|s| (s.kind(), line.slice(s)))
            .collect()
    }

    use SegmentKind::{Float, Integer, Literal};

    #[test]
    fn empty_line() {
        assert!(tokenize("", 0).segments().is_empty());
    }

    #[test]
    fn only_literal() {
        assert_eq!(pieces("hello world", 0), vec![(Literal, "hello world")]);
    }

    #[test]
    fn whitespace_only_line_is_one_literal() {
        assert_eq!(pieces("   ", 0), vec![(Literal, "   ")]);
    }

    #[test]
    fn number_takes_preceding_spaces() {
        assert_eq!(
            pieces("req took 10ms", 0),
            vec![(Literal, "req took"), (Integer, " 10"), (Literal, "ms")]
        );
    }

    #[test]
    fn glued_and_padded_numbers_share_literal() {
        let glued = pieces("finished in100 seconds", 0);
        let padded = pieces("finished in  5 seconds", 0);

        assert_eq!(glued[0], (Literal, "finished in"));
        assert_eq!(padded[0], (Literal, "finished in"));
        assert_eq!(glued[1], (Integer, "100"));
        assert_eq!(padded[1], (Integer, "  5"));
        assert_eq!(glued[2], (Literal, " seconds"));
        assert_eq!(padded[2], (Literal, " seconds"));
    }

    #[test]
    fn parsed_values() {
        let line = tokenize("x=  42 y=-3 z=0.25", 0);
        let values: Vec<Number> = line.numbers().collect();
        assert_eq!(
            values,
            vec![
                Number::Integer(42),
                Number::Integer(-3),
                Number::Float(0.25)
            ]
        );
    }

    #[test]
    fn dotted_versions() {
        assert_eq!(
            pieces("v1.2.3", 0),
            vec![
                (Literal, "v"),
                (Float, "1.2"),
                (Literal, "."),
                (Integer, "3")
            ]
        );
    }

    #[test]
    fn trailing_dot_is_literal() {
        assert_eq!(pieces("1. done", 0), vec![(Integer, "1"), (Literal, ". done")]);
    }

    #[test]
    fn minus_sign_only_before_digit() {
        assert_eq!(
            pieces("-5 and a-3 - x", 0),
            vec![
                (Integer, "-5"),
                (Literal, " and a"),
                (Integer, "-3"),
                (Literal, " - x")
            ]
        );
    }

    #[test]
    fn range_between_numbers() {
        // The minus after a number is not a sign: numbers only start from literal text.
        assert_eq!(
            pieces("10-20", 0),
            vec![(Integer, "10"), (Literal, "-"), (Integer, "20")]
        );
    }

    #[test]
    fn trailing_whitespace_is_kept() {
        assert_eq!(
            pieces("x 5  ", 0),
            vec![(Literal, "x"), (Integer, " 5"), (Literal, "  ")]
        );
    }

    #[test]
    fn leading_whitespace_before_number() {
        assert_eq!(
            pieces("  7 apples", 0),
            vec![(Integer, "  7"), (Literal, " apples")]
        );
    }

    #[test]
    fn skip_turns_leading_numbers_into_literals() {
        assert_eq!(
            pieces("id 42 took 7ms", 1),
            vec![(Literal, "id 42 took"), (Integer, " 7"), (Literal, "ms")]
        );
        assert_eq!(pieces("1 2.5 3", 2), vec![(Literal, "1 2.5"), (Integer, " 3")]);
        assert_eq!(pieces("1 2", 5), vec![(Literal, "1 2")]);
    }

    #[test]
    fn overflowing_integer_is_dropped() {
        let text = "n=99999999999999999999 x";
        let line = tokenize(text, 0);

        assert_eq!(line.segments().len(), 2);
        assert_eq!(line.slice(&line.segments()[0]), "n=");
        assert_eq!(line.slice(&line.segments()[1]), " x");
        assert_eq!(line.numbers().count(), 0);
    }

    #[test]
    fn segments_are_contiguous() {
        let text = "a 1 b2.5c  -3 d ";
        let line = tokenize(text, 0);
        let mut pos = 0;
        for segment in line.segments() {
            assert_eq!(segment.span().start, pos);
            pos = segment.span().end;
        }
        assert_eq!(pos, text.len());
    }

    #[test]
    fn non_ascii_text() {
        assert_eq!(
            pieces("durée 5µs", 0),
            vec![(Literal, "durée"), (Integer, " 5"), (Literal, "µs")]
        );
    }
}

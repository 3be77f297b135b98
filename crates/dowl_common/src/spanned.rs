//! A trait that can provide the [Span] of the complete context of a token or tree node

use std::fmt::{Display, Formatter};

/// A trait that can provide the [Span] of the complete context of a token or tree node
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A region of source text.
///
/// `offset` and `len` are measured in bytes, `line` and `column` are 1-based and point at the
/// first character of the region. Columns count characters, not bytes.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Span {
    offset: usize,
    len: usize,
    line: usize,
    column: usize,
}

impl Span {
    /// Creates a new span
    pub const fn new(offset: usize, len: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            len,
            line,
            column,
        }
    }

    /// Gets a zero-length span directly after this span.
    ///
    /// Only meaningful for spans that do not cross a line break, which holds for every token.
    pub const fn end(&self) -> Self {
        Self {
            offset: self.offset + self.len,
            len: 0,
            line: self.line,
            column: self.column + self.len,
        }
    }

    /// Creates a span that encompasses both
    pub fn join(&self, other: Self) -> Self {
        let (first, _) = if self.offset <= other.offset {
            (self, &other)
        } else {
            (&other, self)
        };
        let min = self.offset.min(other.offset);
        let max = (self.offset + self.len).max(other.offset + other.len);
        Self {
            offset: min,
            len: max - min,
            line: first.line,
            column: first.column,
        }
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl<T: Spanned> Spanned for Box<T> {
    fn span(&self) -> Span {
        (**self).span()
    }
}

/// A line reader struct that's responsible for getting lines around a span
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a span and `after` number
    /// of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines for a given span out of `source`, plus the base line number.
    ///
    /// Lines are split on `\r\n`, `\n` and `\r`, the same line terminators the lexer counts.
    pub fn lines<'s>(&self, source: &'s str, span: &Span) -> (Vec<Line<'s>>, usize) {
        let base_line = span.line();
        let range = base_line.saturating_sub(self.before)..=base_line.saturating_add(self.after);
        let lines = split_lines(source)
            .enumerate()
            .map(|(idx, src)| Line { line: idx + 1, src })
            .skip_while(|line| !range.contains(&line.line))
            .take_while(|line| range.contains(&line.line))
            .collect();
        (lines, base_line)
    }
}

/// A single line of source text
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'s> {
    pub line: usize,
    pub src: &'s str,
}

/// Splits source into lines, without terminators.
fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    let bytes = source.as_bytes();
    let mut start = 0usize;
    let mut idx = 0usize;
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        while idx < bytes.len() {
            match bytes[idx] {
                b'\n' => {
                    let line = &source[start..idx];
                    idx += 1;
                    start = idx;
                    return Some(line);
                }
                b'\r' => {
                    let line = &source[start..idx];
                    idx += if bytes.get(idx + 1) == Some(&b'\n') { 2 } else { 1 };
                    start = idx;
                    return Some(line);
                }
                _ => idx += 1,
            }
        }
        done = true;
        Some(&source[start..])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_end() {
        let p = Span::new(4, 3, 2, 5).end();
        assert_eq!(p.offset(), 7);
        assert_eq!(p.len(), 0);
        assert_eq!(p.line(), 2);
        assert_eq!(p.column(), 8);
    }

    #[test]
    fn test_join() {
        let p1 = Span::new(16, 8, 2, 1);
        let p2 = Span::new(0, 8, 1, 1);
        assert_eq!(p1.join(p2), Span::new(0, 24, 1, 1));
    }

    #[test]
    fn test_split_lines_mixed_terminators() {
        let lines = split_lines("a\r\nb\rc\nd").collect::<Vec<_>>();
        assert_eq!(lines, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_line_reader_window() {
        let src = "one\ntwo\nthree\nfour\nfive";
        let (lines, base) = LineReader::new(1, 1).lines(src, &Span::new(8, 5, 3, 1));
        assert_eq!(base, 3);
        let lines = lines.iter().map(|l| (l.line, l.src)).collect::<Vec<_>>();
        assert_eq!(lines, [(2, "two"), (3, "three"), (4, "four")]);
    }

    #[test]
    fn test_line_reader_first_line() {
        let (lines, _) = LineReader::new(2, 0).lines("x = 1;\ny = 2;", &Span::new(0, 1, 1, 1));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].src, "x = 1;");
    }
}

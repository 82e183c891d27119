//! Text edits fed to the incremental re-parser.

use text_size::{TextRange, TextSize};

use crate::lexer::LineCol;

/// Zero-based row and UTF-8 byte column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// Zero-based line.
    pub row: u32,
    /// Byte offset within the line.
    pub column: u32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Point of byte `offset` in `text`.
    #[must_use]
    pub fn of_offset(text: &str, offset: TextSize) -> Self {
        LineCol::of_offset(text, offset).into()
    }
}

impl From<LineCol> for Point {
    fn from(pos: LineCol) -> Self {
        Self {
            row: pos.line,
            column: pos.col,
        }
    }
}

impl From<Point> for LineCol {
    fn from(point: Point) -> Self {
        LineCol::new(point.row, point.column)
    }
}

/// One text replacement: `[start, old_end)` of the old text was replaced
/// by what is now `[start, new_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edit {
    /// First changed byte.
    pub start_byte: TextSize,
    /// End of the replaced bytes in the old text.
    pub old_end_byte: TextSize,
    /// End of the inserted bytes in the new text.
    pub new_end_byte: TextSize,
    /// Position of `start_byte`.
    pub start_point: Point,
    /// Position of `old_end_byte` in the old text.
    pub old_end_point: Point,
    /// Position of `new_end_byte` in the new text.
    pub new_end_point: Point,
}

impl Edit {
    /// Describes replacing `range` of `old_text` with `replacement`.
    #[must_use]
    pub fn replace(old_text: &str, range: TextRange, replacement: &str) -> Self {
        let start_point = Point::of_offset(old_text, range.start());
        let new_end_point = LineCol::from(start_point).advance(replacement).into();
        Self {
            start_byte: range.start(),
            old_end_byte: range.end(),
            new_end_byte: range.start() + TextSize::of(replacement),
            start_point,
            old_end_point: Point::of_offset(old_text, range.end()),
            new_end_point,
        }
    }

    /// Describes inserting `text` at `offset`.
    #[must_use]
    pub fn insert(old_text: &str, offset: TextSize, text: &str) -> Self {
        Self::replace(old_text, TextRange::empty(offset), text)
    }

    /// Describes deleting `range`.
    #[must_use]
    pub fn delete(old_text: &str, range: TextRange) -> Self {
        Self::replace(old_text, range, "")
    }

    /// Replaced range in the old text.
    #[must_use]
    pub fn old_range(&self) -> TextRange {
        TextRange::new(self.start_byte, self.old_end_byte.max(self.start_byte))
    }

    /// Inserted range in the new text.
    #[must_use]
    pub fn new_range(&self) -> TextRange {
        TextRange::new(self.start_byte, self.new_end_byte.max(self.start_byte))
    }

    /// Change in text length.
    #[must_use]
    pub fn delta(&self) -> i64 {
        i64::from(u32::from(self.new_end_byte)) - i64::from(u32::from(self.old_end_byte))
    }

    fn is_well_formed(&self) -> bool {
        self.start_byte <= self.old_end_byte && self.start_byte <= self.new_end_byte
    }
}

/// Byte extent of one or more edits as a single replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangedRange {
    /// First changed byte.
    pub start: TextSize,
    /// End of the changed bytes in the old text.
    pub old_end: TextSize,
    /// End of the changed bytes in the new text.
    pub new_end: TextSize,
}

impl ChangedRange {
    /// Changed range in the old text.
    #[must_use]
    pub fn old_range(&self) -> TextRange {
        TextRange::new(self.start, self.old_end)
    }

    /// Changed range in the new text.
    #[must_use]
    pub fn new_range(&self) -> TextRange {
        TextRange::new(self.start, self.new_end)
    }

    /// Change in text length.
    #[must_use]
    pub fn delta(&self) -> i64 {
        i64::from(u32::from(self.new_end)) - i64::from(u32::from(self.old_end))
    }

    /// Maps an old offset at or after `old_end` into the new text.
    #[must_use]
    pub fn shift(&self, offset: TextSize) -> TextSize {
        offset - self.old_end + self.new_end
    }
}

/// Folds sequential edits into one changed range in the coordinates of the
/// text before the first edit. Each edit is expressed in the text produced
/// by the edits before it.
///
/// Returns `None` for an empty list or a malformed edit.
#[must_use]
pub fn fold(edits: &[Edit]) -> Option<ChangedRange> {
    let (first, rest) = edits.split_first()?;
    if !first.is_well_formed() {
        return None;
    }
    let mut folded = ChangedRange {
        start: first.start_byte,
        old_end: first.old_end_byte,
        new_end: first.new_end_byte,
    };

    for edit in rest {
        if !edit.is_well_formed() {
            return None;
        }
        // `edit.old_end_byte` is in the current text; map it back to the
        // original, clamping into the already changed region.
        let old_end = if edit.old_end_byte >= folded.new_end {
            edit.old_end_byte - folded.new_end + folded.old_end
        } else {
            folded.old_end
        };
        // Where the end of the changed region lands after this edit.
        let new_end = if folded.new_end >= edit.old_end_byte {
            folded.new_end - edit.old_end_byte + edit.new_end_byte
        } else {
            edit.new_end_byte
        };
        folded = ChangedRange {
            start: folded.start.min(edit.start_byte),
            old_end: folded.old_end.max(old_end),
            new_end: new_end.max(edit.new_end_byte),
        };
    }

    Some(folded)
}

/// Applies `replacement` over `range` of `text`, returning the new text and
/// the matching edit.
///
/// # Panics
///
/// Panics if `range` is out of bounds or not on character boundaries.
#[must_use]
pub fn apply(text: &str, range: TextRange, replacement: &str) -> (String, Edit) {
    let edit = Edit::replace(text, range, replacement);
    let mut new_text = String::with_capacity(text.len() + replacement.len());
    new_text.push_str(&text[..usize::from(range.start())]);
    new_text.push_str(replacement);
    new_text.push_str(&text[usize::from(range.end())..]);
    (new_text, edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn points_follow_lines() {
        let text = "a := 1;\nb := 2;\n";
        let edit = Edit::replace(text, range(13, 14), "40\n+ 1");
        assert_eq!(edit.start_point, Point::new(1, 5));
        assert_eq!(edit.old_end_point, Point::new(1, 6));
        assert_eq!(edit.new_end_point, Point::new(2, 3));
        assert_eq!(edit.delta(), 5);
    }

    #[test]
    fn fold_single_edit() {
        let edit = Edit::replace("abcdef", range(2, 4), "xyz");
        assert_eq!(
            fold(&[edit]),
            Some(ChangedRange {
                start: 2.into(),
                old_end: 4.into(),
                new_end: 5.into()
            })
        );
        assert_eq!(fold(&[]), None);
    }

    #[test]
    fn fold_sequential_edits() {
        let text = "0123456789";
        let (step1, first) = apply(text, range(2, 3), "ab");
        let (step2, second) = apply(&step1, range(7, 9), "");
        let folded = fold(&[first, second]).unwrap();
        let old = &text[usize::from(folded.start)..usize::from(folded.old_end)];
        let new = &step2[usize::from(folded.start)..usize::from(folded.new_end)];
        assert_eq!(old, "234567");
        assert_eq!(new, "ab345");
        assert_eq!(
            &text[usize::from(folded.old_end)..],
            &step2[usize::from(folded.new_end)..]
        );
    }

    #[test]
    fn fold_edit_before_changed_region() {
        let text = "0123456789";
        let (step1, first) = apply(text, range(6, 7), "xx");
        let (step2, second) = apply(&step1, range(1, 2), "");
        let folded = fold(&[first, second]).unwrap();
        assert_eq!(folded.old_range(), range(1, 7));
        assert_eq!(&step2[1..usize::from(folded.new_end)], "2345xx");
        assert_eq!(folded.delta(), 0);
    }

    #[test]
    fn malformed_edit_is_rejected() {
        let mut edit = Edit::replace("abc", range(1, 2), "");
        edit.old_end_byte = 0.into();
        assert_eq!(fold(&[edit]), None);
    }
}

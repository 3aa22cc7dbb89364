use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// Template char that marks a digit slot.
pub const SLOT: char = 'd';

/// Fill glyph for empty slots in keep-position edits when
/// no placeholder covers the position.
pub const DEFAULT_FILL: char = '_';

/// One position of the input mask.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    /// Accepts an ASCII digit.
    Digit,
    /// Literal that must appear verbatim.
    Separator(char),
}

impl Display for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mask::Digit => write!(f, "{}", SLOT),
            Mask::Separator(c) => write!(f, "{}", c),
        }
    }
}

impl Debug for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mask::Digit => write!(f, "{}", SLOT),
            Mask::Separator(c) => write!(f, "\\{}", c),
        }
    }
}

impl From<char> for Mask {
    fn from(c: char) -> Self {
        if c == SLOT {
            Mask::Digit
        } else {
            Mask::Separator(c)
        }
    }
}

impl Mask {
    /// is a digit slot
    #[inline]
    pub fn is_slot(&self) -> bool {
        *self == Mask::Digit
    }

    /// is a literal
    #[inline]
    pub fn is_separator(&self) -> bool {
        matches!(self, Mask::Separator(_))
    }

    /// Does the char fit at this position of a well-formed value.
    /// For a slot `fill` is the accepted glyph besides the digits.
    #[inline]
    pub(crate) fn accepts(&self, c: char, fill: char) -> bool {
        match self {
            Mask::Digit => c.is_ascii_digit() || c == fill,
            Mask::Separator(sep) => *sep == c,
        }
    }
}

/// Parsed template.
///
/// Every `d` is a digit slot, every other char is a literal.
/// There is no escape syntax.
///
/// Positions are char offsets into the template string.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Template {
    mask: Vec<Mask>,
}

impl Template {
    pub fn new(template: &str) -> Self {
        Self {
            mask: template.chars().map(Mask::from).collect(),
        }
    }

    /// Length in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Mask at the position.
    #[inline]
    pub fn mask_at(&self, pos: usize) -> Option<Mask> {
        self.mask.get(pos).copied()
    }

    /// Is a digit slot. Anything beyond the template is not.
    #[inline]
    pub fn is_slot(&self, pos: usize) -> bool {
        self.mask.get(pos).is_some_and(Mask::is_slot)
    }

    /// Iterate the positions.
    pub fn iter(&self) -> impl Iterator<Item = Mask> + '_ {
        self.mask.iter().copied()
    }

    /// Number of digit slots.
    pub fn slot_count(&self) -> usize {
        self.mask.iter().filter(|v| v.is_slot()).count()
    }

    /// First digit slot.
    pub fn first_slot(&self) -> Option<usize> {
        self.next_slot(0)
    }

    /// First digit slot at or after pos.
    pub fn next_slot(&self, pos: usize) -> Option<usize> {
        (pos..self.mask.len()).find(|&i| self.mask[i].is_slot())
    }

    /// Last digit slot before pos. Skips any literals in between.
    pub fn prev_slot(&self, pos: usize) -> Option<usize> {
        let pos = pos.min(self.mask.len());
        (0..pos).rev().find(|&i| self.mask[i].is_slot())
    }

    /// Skip the run of literals starting at pos.
    /// Positions beyond the template count as literal,
    /// the result is capped at `limit`.
    pub(crate) fn skip_separators(&self, mut pos: usize, limit: usize) -> usize {
        while pos < limit && !self.is_slot(pos) {
            pos += 1;
        }
        pos
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for m in &self.mask {
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

impl Debug for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Template({:?})", self.to_string())
    }
}

impl From<&str> for Template {
    fn from(value: &str) -> Self {
        Template::new(value)
    }
}

impl From<&String> for Template {
    fn from(value: &String) -> Self {
        Template::new(value)
    }
}

impl From<String> for Template {
    fn from(value: String) -> Self {
        Template::new(&value)
    }
}

/// Display skeleton for empty slots.
///
/// Uses the same positions as the template. It may be shorter
/// than the template, positions it doesn't cover have no glyph.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Placeholder {
    glyphs: Vec<char>,
}

impl Placeholder {
    pub fn new(placeholder: &str) -> Self {
        Self {
            glyphs: placeholder.chars().collect(),
        }
    }

    /// Length in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at the position, if the placeholder reaches that far.
    #[inline]
    pub fn glyph_at(&self, pos: usize) -> Option<char> {
        self.glyphs.get(pos).copied()
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in &self.glyphs {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl Debug for Placeholder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Placeholder({:?})", self.to_string())
    }
}

impl From<&str> for Placeholder {
    fn from(value: &str) -> Self {
        Placeholder::new(value)
    }
}

impl From<&String> for Placeholder {
    fn from(value: &String) -> Self {
        Placeholder::new(value)
    }
}

impl From<String> for Placeholder {
    fn from(value: String) -> Self {
        Placeholder::new(&value)
    }
}

/// An empty placeholder is the same as none at all.
#[inline]
pub(crate) fn effective(placeholder: Option<&Placeholder>) -> Option<&Placeholder> {
    placeholder.filter(|v| !v.is_empty())
}

/// Fill glyph used by keep-position edits.
#[inline]
pub(crate) fn fill_glyph(placeholder: Option<&Placeholder>, pos: usize) -> char {
    placeholder
        .and_then(|v| v.glyph_at(pos))
        .unwrap_or(DEFAULT_FILL)
}

//!
//! Edits that leave everything outside the edited span in place.
//!
//! Deleting replaces slots with their fill glyph, typing overwrites
//! the next slot. Nothing shifts left or right.
//!

use crate::edit::EditResult;
use crate::template::{Mask, Placeholder, Template, fill_glyph};
use crate::upos_type;

/// Apply a single edit in keep-position mode.
///
/// * `typed` empty: every slot in `start..end` is replaced with its
///   fill glyph. Literals stay. The cursor goes to `start`.
/// * `start != end` and a typed char: the range is cleared as above
///   and the char goes to the first slot of the range. If the range
///   already starts with the typed char, that one is kept and the
///   char goes to the slot after it.
/// * `start == end` and a typed char: the char overwrites the next slot
///   at or after `start`.
///
/// The fill glyph is the placeholder char at the position or `_`.
/// Non-digits are never written. Only the first char of `typed` is used.
///
/// The value is expected to have the length of the template. A shorter
/// value is extended with the template literals and fill glyphs up to a
/// written slot, clearing beyond its end does nothing.
pub fn patch_keep_position(
    value: &str,
    template: &Template,
    placeholder: Option<&Placeholder>,
    start: upos_type,
    end: upos_type,
    typed: &str,
) -> EditResult {
    let mut buf: Vec<char> = value.chars().collect();
    let start = start as usize;
    let end = end as usize;

    let Some(c) = typed.chars().next() else {
        clear_slots(&mut buf, template, placeholder, start, end);
        return EditResult::new(buf.into_iter().collect(), start as upos_type);
    };

    let mut insert_start = start;
    if start != end {
        if buf.get(start) == Some(&c) {
            // already there. keep it and continue after it.
            insert_start = template.skip_separators(start + 1, template.len());
        }
        clear_slots(&mut buf, template, placeholder, insert_start, end);
    }

    let cursor = match template.next_slot(insert_start) {
        Some(target) if c.is_ascii_digit() => {
            write_slot(&mut buf, template, placeholder, target, c);
            target + 1
        }
        _ => start,
    };

    EditResult::new(buf.into_iter().collect(), cursor as upos_type)
}

/// Replace all slots in the range with the fill glyph.
fn clear_slots(
    buf: &mut [char],
    template: &Template,
    placeholder: Option<&Placeholder>,
    start: usize,
    end: usize,
) {
    let end = end.min(buf.len());
    for i in start..end {
        if template.is_slot(i) {
            buf[i] = fill_glyph(placeholder, i);
        }
    }
}

/// Overwrite one slot. Fills any gap up to the slot if the
/// value is too short.
fn write_slot(
    buf: &mut Vec<char>,
    template: &Template,
    placeholder: Option<&Placeholder>,
    pos: usize,
    c: char,
) {
    while buf.len() < pos {
        let i = buf.len();
        buf.push(match template.mask_at(i) {
            Some(Mask::Separator(sep)) => sep,
            _ => fill_glyph(placeholder, i),
        });
    }
    if pos < buf.len() {
        buf[pos] = c;
    } else {
        buf.push(c);
    }
}

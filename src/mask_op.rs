//!
//! Conversion between formatted values and digit sequences.
//!
//! All functions are pure and work on char offsets.
//!

use crate::template::{Mask, Placeholder, Template, effective, fill_glyph};
use crate::upos_type;

/// Extract the digits from a formatted or partially formatted text.
///
/// Walks the input with a cursor into the template.
/// * Digits are taken when the cursor is at a slot, anything else
///   at a slot is dropped.
/// * A literal that matches the template moves the cursor along.
/// * On a mismatch the template is searched forward for the first
///   slot or a literal equal to the input char, and the cursor
///   syncs to that position. With repeated literals the first match
///   wins.
///
/// Input beyond the end of the template is ignored.
pub fn extract_digits(input: &str, template: &Template) -> String {
    let mut digits = String::new();
    let mut t = 0;

    for c in input.chars() {
        if t >= template.len() {
            break;
        }

        match template.mask_at(t) {
            Some(Mask::Digit) => {
                if c.is_ascii_digit() {
                    digits.push(c);
                    t += 1;
                }
            }
            Some(Mask::Separator(sep)) if sep == c => {
                t += 1;
            }
            _ => {
                let sync = (t..template.len()).find(|&i| match template.mask_at(i) {
                    Some(Mask::Digit) => true,
                    Some(Mask::Separator(sep)) => sep == c,
                    None => false,
                });
                match sync.and_then(|i| template.mask_at(i).map(|m| (i, m))) {
                    Some((i, Mask::Digit)) => {
                        if c.is_ascii_digit() {
                            digits.push(c);
                            t = i + 1;
                        }
                    }
                    Some((i, Mask::Separator(_))) => {
                        t = i + 1;
                    }
                    None => {}
                }
            }
        }
    }

    digits
}

/// Render the digits with the template.
///
/// Literals are always copied. Slots take the next digit, when the
/// digits run out the placeholder glyph is used.
///
/// Without a placeholder rendering stops at the first empty slot,
/// so the value grows while typing and a literal shows up only after
/// the slot before it has been filled. A placeholder shorter than
/// the template leaves the uncovered empty slots out.
///
/// Surplus digits are dropped.
pub fn render_mask(digits: &str, template: &Template, placeholder: Option<&Placeholder>) -> String {
    let placeholder = effective(placeholder);
    let mut digits = digits.chars();
    let mut res = String::with_capacity(template.len());

    for (i, mask) in template.iter().enumerate() {
        match mask {
            Mask::Separator(c) => res.push(c),
            Mask::Digit => {
                if let Some(d) = digits.next() {
                    res.push(d);
                } else if let Some(placeholder) = placeholder {
                    if let Some(g) = placeholder.glyph_at(i) {
                        res.push(g);
                    }
                } else {
                    break;
                }
            }
        }
    }

    res
}

/// Is the value a complete instance of the template?
///
/// Exact template length, every literal in place and every slot
/// holds a digit or the fill glyph for that position.
pub fn matches_template(value: &str, template: &Template, placeholder: Option<&Placeholder>) -> bool {
    if value.chars().count() != template.len() {
        return false;
    }

    value
        .chars()
        .zip(template.iter())
        .enumerate()
        .all(|(i, (c, mask))| mask.accepts(c, fill_glyph(placeholder, i)))
}

/// Caret position after formatting.
///
/// Finds the position after the nth digit in the formatted value
/// and moves past any literals that follow, so the caret lands in
/// front of the next slot. Capped at the length of the value.
pub fn remap_caret(formatted: &str, template: &Template, digits_before: usize) -> upos_type {
    let len = formatted.chars().count();

    let mut count = 0;
    let mut pos = 0;
    for (i, c) in formatted.chars().enumerate() {
        if count >= digits_before {
            break;
        }
        if c.is_ascii_digit() && template.is_slot(i) {
            count += 1;
        }
        pos += 1;
    }

    template.skip_separators(pos, len) as upos_type
}

//!
//! Single entry point for edits.
//!
//! Takes the current value, the selection and the kind of edit
//! and computes the next value and cursor. Dispatches to the
//! keep-position patch or to the shift pipeline of
//! extract, render and caret-remap.
//!

use crate::keep_position::patch_keep_position;
use crate::mask_op::{extract_digits, remap_caret, render_mask};
use crate::template::{Placeholder, Template};
use crate::upos_type;
use log::{debug, trace};

/// Kind of edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Typing or paste.
    Insert,
    /// Backspace.
    DeleteBackward,
    /// Delete.
    DeleteForward,
}

/// Next value and cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub value: String,
    pub cursor: upos_type,
}

impl EditResult {
    pub fn new(value: String, cursor: upos_type) -> Self {
        Self { value, cursor }
    }
}

/// Apply one edit.
///
/// `start..end` is the selection, `start == end` is a plain caret.
/// The positions are swapped if they come in reversed.
/// `typed` is only used for [EditKind::Insert].
///
/// Returns None if there is nothing to do. The caller should
/// keep the value and put the caret back where it was before.
///
/// Insert
/// * keep-position with a single char inside the template: overwrite
///   via [patch_keep_position].
/// * otherwise the text is spliced in and the digits are re-flowed
///   through the template. Returns None if the formatted value doesn't
///   change, e.g. when a non-digit was typed.
///
/// DeleteBackward/DeleteForward
/// * a selection is cleared to fill glyphs in keep-position mode or
///   removed and re-flowed otherwise. The cursor goes to the start.
/// * with a caret the slot before (after) it is deleted. Literals in
///   between are skipped.
#[allow(clippy::too_many_arguments)]
pub fn apply_edit(
    value: &str,
    template: &Template,
    placeholder: Option<&Placeholder>,
    start: upos_type,
    end: upos_type,
    kind: EditKind,
    typed: &str,
    keep_position: bool,
) -> Option<EditResult> {
    let (start, end) = if start <= end {
        (start as usize, end as usize)
    } else {
        (end as usize, start as usize)
    };

    trace!(
        "apply_edit {:?} {}..{} {:?} keep={}",
        kind, start, end, typed, keep_position
    );

    match kind {
        EditKind::Insert => insert(value, template, placeholder, start, end, typed, keep_position),
        EditKind::DeleteBackward => {
            if start == end && start == 0 {
                return None;
            }
            if start != end {
                return Some(delete_selection(
                    value,
                    template,
                    placeholder,
                    start,
                    end,
                    keep_position,
                ));
            }

            let Some(pos) = template.prev_slot(start) else {
                debug!("delete_backward: no slot before {}", start);
                return None;
            };

            if keep_position {
                if pos >= value.chars().count() {
                    return None;
                }
                Some(patch_keep_position(
                    value,
                    template,
                    placeholder,
                    pos as upos_type,
                    pos as upos_type + 1,
                    "",
                ))
            } else {
                let formatted = reflow(&splice(value, pos, pos + 1, ""), template, placeholder);
                Some(EditResult::new(formatted, pos as upos_type))
            }
        }
        EditKind::DeleteForward => {
            if start != end {
                return Some(delete_selection(
                    value,
                    template,
                    placeholder,
                    start,
                    end,
                    keep_position,
                ));
            }

            let pos = template
                .next_slot(start)
                .unwrap_or_else(|| start.max(template.len()));
            if pos >= value.chars().count() {
                debug!("delete_forward: nothing after {}", start);
                return None;
            }

            if keep_position {
                let r = patch_keep_position(
                    value,
                    template,
                    placeholder,
                    pos as upos_type,
                    pos as upos_type + 1,
                    "",
                );
                Some(EditResult::new(r.value, start as upos_type))
            } else {
                let formatted = reflow(&splice(value, pos, pos + 1, ""), template, placeholder);
                Some(EditResult::new(formatted, start as upos_type))
            }
        }
    }
}

fn insert(
    value: &str,
    template: &Template,
    placeholder: Option<&Placeholder>,
    start: usize,
    end: usize,
    typed: &str,
    keep_position: bool,
) -> Option<EditResult> {
    let typed_len = typed.chars().count();

    if keep_position && typed_len == 1 && start < template.len() {
        return Some(patch_keep_position(
            value,
            template,
            placeholder,
            start as upos_type,
            end as upos_type,
            typed,
        ));
    }

    let raw = splice(value, start, end, typed);
    let formatted = reflow(&raw, template, placeholder);
    if formatted == value {
        debug!("insert {:?}: value unchanged", typed);
        return None;
    }

    let before: String = raw.chars().take(start + typed_len).collect();
    let digits_before = extract_digits(&before, template).chars().count();
    let cursor = remap_caret(&formatted, template, digits_before);

    Some(EditResult::new(formatted, cursor))
}

fn delete_selection(
    value: &str,
    template: &Template,
    placeholder: Option<&Placeholder>,
    start: usize,
    end: usize,
    keep_position: bool,
) -> EditResult {
    if keep_position {
        patch_keep_position(
            value,
            template,
            placeholder,
            start as upos_type,
            end as upos_type,
            "",
        )
    } else {
        let formatted = reflow(&splice(value, start, end, ""), template, placeholder);
        EditResult::new(formatted, start as upos_type)
    }
}

/// Extract the digits and render them again.
fn reflow(raw: &str, template: &Template, placeholder: Option<&Placeholder>) -> String {
    render_mask(&extract_digits(raw, template), template, placeholder)
}

/// Replace the char range with the text. The range is clamped
/// to the value.
fn splice(value: &str, start: usize, end: usize, text: &str) -> String {
    let len = value.chars().count();
    let start = start.min(len);
    let end = end.clamp(start, len);

    let mut res = String::with_capacity(value.len() + text.len());
    res.extend(value.chars().take(start));
    res.push_str(text);
    res.extend(value.chars().skip(end));
    res
}

//!
//! Editing state for a digit mask.
//!
//! Holds the formatted value and the selection and applies
//! edits via [apply_edit]. This is what an input widget keeps
//! between events.
//!
//! * Template: `d` is a digit slot, everything else is a literal.
//! * Placeholder: optional glyphs shown in empty slots.
//! * keep-position: deleting leaves a fill glyph in place instead
//!   of shifting the following digits left, typing overwrites.
//!
//! ```rust
//! use rat_mask::masked_state::MaskedState;
//!
//! let mut date = MaskedState::new()
//!     .with_template("dd/dd/dddd")
//!     .with_placeholder("mm/dd/yyyy");
//! assert_eq!(date.value(), "mm/dd/yyyy");
//!
//! date.focus_gained();
//! for c in "12252025".chars() {
//!     date.insert_char(c);
//! }
//! assert_eq!(date.value(), "12/25/2025");
//! assert_eq!(date.raw_value(), "12252025");
//! ```
//!
//! Event handling via [HandleEvent] with the [Regular] and
//! [ReadOnly] qualifiers, or by calling the freestanding fn
//! [handle_events].
//!

use crate::_private::NonExhaustive;
use crate::edit::{EditKind, apply_edit};
use crate::event::{ReadOnly, TextOutcome};
use crate::mask_op::{extract_digits, matches_template, render_mask};
use crate::template::{Placeholder, Template};
use crate::{MaskError, upos_type};
use log::debug;
use rat_event::{HandleEvent, Regular, ct_event};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui_core::layout::Rect;
use ratatui_crossterm::crossterm::event::Event;
use std::cmp::min;
use std::ops::Range;

/// This flag sets the behaviour of the state when
/// it detects that it gained focus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MaskFocusGained {
    /// None
    None,
    /// Move the cursor to the first slot if no digits
    /// have been entered yet.
    #[default]
    FirstSlot,
    /// Select all text on focus gain.
    SelectAll,
}

/// Configuration for a [MaskedState].
#[derive(Debug, Clone)]
pub struct MaskOptions {
    /// Template. `d` is a digit slot.
    pub template: String,
    /// Glyphs for empty slots.
    pub placeholder: Option<String>,
    /// Deleting leaves a fill glyph instead of shifting.
    pub keep_position: bool,
    /// [MaskedState::output_value] gives only the digits.
    pub return_raw_value: bool,
    /// Focus behaviour.
    pub on_focus_gained: MaskFocusGained,

    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            template: Default::default(),
            placeholder: None,
            keep_position: false,
            return_raw_value: false,
            on_focus_gained: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

/// State of a masked input.
#[derive(Debug, Clone)]
pub struct MaskedState {
    template: Template,
    placeholder: Option<Placeholder>,
    keep_position: bool,
    return_raw_value: bool,
    on_focus_gained: MaskFocusGained,

    /// Formatted value.
    value: String,
    /// Selection anchor as char offset.
    anchor: upos_type,
    /// Cursor as char offset.
    cursor: upos_type,

    /// Current focus state.
    /// __read+write__
    pub focus: FocusFlag,
    /// Area for mouse focus. Set by the renderer.
    /// __read+write__
    pub area: Rect,

    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskedState {
    fn default() -> Self {
        Self {
            template: Default::default(),
            placeholder: None,
            keep_position: false,
            return_raw_value: false,
            on_focus_gained: Default::default(),
            value: Default::default(),
            anchor: 0,
            cursor: 0,
            focus: Default::default(),
            area: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl MaskedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All settings at once.
    pub fn with_options(mut self, options: MaskOptions) -> Self {
        self.set_options(options);
        self
    }

    /// With template.
    pub fn with_template(mut self, template: impl Into<Template>) -> Self {
        self.set_template(template);
        self
    }

    /// With placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<Placeholder>) -> Self {
        self.set_placeholder(Some(placeholder));
        self
    }

    /// With keep-position editing.
    pub fn with_keep_position(mut self, keep_position: bool) -> Self {
        self.set_keep_position(keep_position);
        self
    }

    /// [MaskedState::output_value] returns the digits only.
    pub fn with_raw_value(mut self, raw: bool) -> Self {
        self.return_raw_value = raw;
        self
    }

    /// Focus behaviour.
    pub fn with_focus_gained(mut self, on_focus_gained: MaskFocusGained) -> Self {
        self.on_focus_gained = on_focus_gained;
        self
    }

    /// All settings at once.
    /// The current digits are rendered with the new template.
    pub fn set_options(&mut self, options: MaskOptions) {
        let digits = self.raw_value();
        self.template = Template::new(&options.template);
        self.placeholder = options.placeholder.map(Placeholder::from);
        self.keep_position = options.keep_position;
        self.return_raw_value = options.return_raw_value;
        self.on_focus_gained = options.on_focus_gained;
        self.rerender(&digits);
    }

    /// Set the template. The current digits are rendered
    /// with the new template.
    pub fn set_template(&mut self, template: impl Into<Template>) {
        let digits = self.raw_value();
        self.template = template.into();
        self.rerender(&digits);
    }

    #[inline]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Set the placeholder. The value is rendered again.
    pub fn set_placeholder(&mut self, placeholder: Option<impl Into<Placeholder>>) {
        let digits = self.raw_value();
        self.placeholder = placeholder.map(|v| v.into());
        self.rerender(&digits);
    }

    #[inline]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    /// Set keep-position editing. The value goes through
    /// [MaskedState::set_value] again.
    pub fn set_keep_position(&mut self, keep_position: bool) {
        self.keep_position = keep_position;
        let value = self.value.clone();
        self.set_value(value);
    }

    #[inline]
    pub fn keep_position(&self) -> bool {
        self.keep_position
    }

    /// [MaskedState::output_value] returns the digits only.
    #[inline]
    pub fn set_raw_value(&mut self, raw: bool) {
        self.return_raw_value = raw;
    }

    #[inline]
    pub fn return_raw_value(&self) -> bool {
        self.return_raw_value
    }

    /// Focus behaviour.
    #[inline]
    pub fn set_focus_gained(&mut self, on_focus_gained: MaskFocusGained) {
        self.on_focus_gained = on_focus_gained;
    }

    fn rerender(&mut self, digits: &str) {
        self.value = render_mask(digits, &self.template, self.placeholder.as_ref());
        self.clamp_selection();
    }
}

impl MaskedState {
    /// Formatted value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Digits only.
    #[inline]
    pub fn raw_value(&self) -> String {
        extract_digits(&self.value, &self.template)
    }

    /// The value reported to the outside. Either the
    /// formatted value or the digits.
    pub fn output_value(&self) -> String {
        if self.return_raw_value {
            self.raw_value()
        } else {
            self.value.clone()
        }
    }

    /// No digits entered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw_value().is_empty()
    }

    /// Length in chars.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.value.chars().count() as upos_type
    }

    /// Set the value from outside.
    ///
    /// In keep-position mode a value that already fits the template
    /// is taken as is. Anything else is reduced to its digits and
    /// formatted again.
    ///
    /// Returns true if the value changed.
    pub fn set_value<S: AsRef<str>>(&mut self, value: S) -> bool {
        let value = self.sync_value(value.as_ref());
        if value != self.value {
            self.value = value;
            self.clamp_selection();
            true
        } else {
            false
        }
    }

    /// Reset to an empty value.
    pub fn clear(&mut self) -> bool {
        let empty = render_mask("", &self.template, self.placeholder.as_ref());
        if self.value == empty {
            false
        } else {
            self.value = empty;
            self.anchor = 0;
            self.cursor = 0;
            true
        }
    }

    fn sync_value(&self, value: &str) -> String {
        if self.keep_position
            && matches_template(value, &self.template, self.placeholder.as_ref())
        {
            value.to_string()
        } else {
            let formatted = render_mask(
                &extract_digits(value, &self.template),
                &self.template,
                self.placeholder.as_ref(),
            );
            if formatted != value {
                debug!("reformat {:?} -> {:?}", value, formatted);
            }
            formatted
        }
    }
}

impl MaskedState {
    /// Cursor position.
    #[inline]
    pub fn cursor(&self) -> upos_type {
        self.cursor
    }

    /// Selection anchor.
    #[inline]
    pub fn anchor(&self) -> upos_type {
        self.anchor
    }

    /// Any text selection.
    #[inline]
    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Selection.
    #[inline]
    pub fn selection(&self) -> Range<upos_type> {
        if self.anchor <= self.cursor {
            self.anchor..self.cursor
        } else {
            self.cursor..self.anchor
        }
    }

    /// Selected text.
    pub fn selected_text(&self) -> String {
        let sel = self.selection();
        self.value
            .chars()
            .skip(sel.start as usize)
            .take(sel.len())
            .collect()
    }

    /// Set the cursor position. The position is capped at
    /// the length of the value.
    ///
    /// Returns true if the cursor or selection changed.
    pub fn set_cursor(&mut self, cursor: upos_type, extend_selection: bool) -> bool {
        let old = (self.anchor, self.cursor);
        self.cursor = min(cursor, self.len());
        if !extend_selection {
            self.anchor = self.cursor;
        }
        old != (self.anchor, self.cursor)
    }

    /// Set the selection. Positions are capped at the length
    /// of the value.
    pub fn set_selection(&mut self, anchor: upos_type, cursor: upos_type) -> bool {
        let old = (self.anchor, self.cursor);
        let len = self.len();
        self.anchor = min(anchor, len);
        self.cursor = min(cursor, len);
        old != (self.anchor, self.cursor)
    }

    /// Set the selection.
    pub fn try_set_selection(
        &mut self,
        anchor: upos_type,
        cursor: upos_type,
    ) -> Result<bool, MaskError> {
        let len = self.len();
        if anchor > len {
            return Err(MaskError::CharIndexOutOfBounds(
                anchor as usize,
                len as usize,
            ));
        }
        if cursor > len {
            return Err(MaskError::CharIndexOutOfBounds(
                cursor as usize,
                len as usize,
            ));
        }
        Ok(self.set_selection(anchor, cursor))
    }

    /// Select everything.
    pub fn select_all(&mut self) -> bool {
        self.set_selection(0, self.len())
    }

    /// Move to the previous char.
    pub fn move_left(&mut self, extend_selection: bool) -> bool {
        if self.has_selection() && !extend_selection {
            let start = self.selection().start;
            self.set_cursor(start, false)
        } else {
            self.set_cursor(self.cursor.saturating_sub(1), extend_selection)
        }
    }

    /// Move to the next char.
    pub fn move_right(&mut self, extend_selection: bool) -> bool {
        if self.has_selection() && !extend_selection {
            let end = self.selection().end;
            self.set_cursor(end, false)
        } else {
            self.set_cursor(self.cursor + 1, extend_selection)
        }
    }

    /// Start of the value.
    pub fn move_to_line_start(&mut self, extend_selection: bool) -> bool {
        self.set_cursor(0, extend_selection)
    }

    /// End of the value.
    pub fn move_to_line_end(&mut self, extend_selection: bool) -> bool {
        self.set_cursor(self.len(), extend_selection)
    }

    /// Apply the focus behaviour.
    ///
    /// With [MaskFocusGained::FirstSlot] the cursor goes to the first
    /// digit slot as long as nothing has been entered.
    pub fn focus_gained(&mut self) -> bool {
        match self.on_focus_gained {
            MaskFocusGained::None => false,
            MaskFocusGained::FirstSlot => {
                if self.is_empty() {
                    if let Some(pos) = self.template.first_slot() {
                        self.set_cursor(pos as upos_type, false)
                    } else {
                        false
                    }
                } else {
                    false
                }
            }
            MaskFocusGained::SelectAll => self.select_all(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.len();
        self.anchor = min(self.anchor, len);
        self.cursor = min(self.cursor, len);
    }
}

impl MaskedState {
    /// Insert a char at the cursor. Replaces the selection.
    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.edit(EditKind::Insert, c.encode_utf8(&mut buf)) == TextOutcome::TextChanged
    }

    /// Insert a string at the cursor. Replaces the selection.
    ///
    /// More than one char is always inserted by re-flowing the
    /// digits, even in keep-position mode.
    pub fn insert_str(&mut self, s: &str) -> bool {
        self.edit(EditKind::Insert, s) == TextOutcome::TextChanged
    }

    /// Delete the char before the cursor, or the selection.
    pub fn delete_prev_char(&mut self) -> bool {
        self.edit(EditKind::DeleteBackward, "") == TextOutcome::TextChanged
    }

    /// Delete the char after the cursor, or the selection.
    pub fn delete_next_char(&mut self) -> bool {
        self.edit(EditKind::DeleteForward, "") == TextOutcome::TextChanged
    }

    /// Delete the range. Positions are capped at the length
    /// of the value.
    pub fn delete_range(&mut self, range: Range<upos_type>) -> bool {
        let len = self.len();
        let range = min(range.start, len)..min(range.end, len);
        if range.start >= range.end {
            return false;
        }
        self.set_selection(range.start, range.end);
        self.edit(EditKind::DeleteForward, "") == TextOutcome::TextChanged
    }

    /// Delete the range.
    pub fn try_delete_range(&mut self, range: Range<upos_type>) -> Result<bool, MaskError> {
        if range.start > range.end {
            return Err(MaskError::CharRangeInvalid(
                range.start as usize,
                range.end as usize,
            ));
        }
        let len = self.len();
        if range.end > len {
            return Err(MaskError::CharIndexOutOfBounds(
                range.end as usize,
                len as usize,
            ));
        }
        Ok(self.delete_range(range))
    }

    /// Run one edit with the current selection.
    ///
    /// If the edit is a no-op the value and the selection
    /// stay as they are.
    fn edit(&mut self, kind: EditKind, typed: &str) -> TextOutcome {
        let sel = self.selection();
        let Some(r) = apply_edit(
            &self.value,
            &self.template,
            self.placeholder.as_ref(),
            sel.start,
            sel.end,
            kind,
            typed,
            self.keep_position,
        ) else {
            return TextOutcome::Unchanged;
        };

        let value = self.sync_value(&r.value);
        let changed = value != self.value;
        self.value = value;
        let cursor = min(r.cursor, self.len());
        self.anchor = cursor;
        self.cursor = cursor;

        if changed {
            TextOutcome::TextChanged
        } else {
            TextOutcome::Changed
        }
    }
}

impl HasFocus for MaskedState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    #[inline]
    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    #[inline]
    fn area(&self) -> Rect {
        self.area
    }
}

impl HandleEvent<Event, Regular, TextOutcome> for MaskedState {
    fn handle(&mut self, event: &Event, _keymap: Regular) -> TextOutcome {
        // small helper ...
        fn tc(r: bool) -> TextOutcome {
            if r {
                TextOutcome::TextChanged
            } else {
                TextOutcome::Unchanged
            }
        }

        // focus behaviour
        let focus_r = if self.gained_focus() && self.focus_gained() {
            TextOutcome::Changed
        } else {
            TextOutcome::Continue
        };

        let mut r = if self.is_focused() {
            match event {
                ct_event!(key press c)
                | ct_event!(key press SHIFT-c)
                | ct_event!(key press CONTROL_ALT-c) => {
                    let mut buf = [0u8; 4];
                    self.edit(EditKind::Insert, c.encode_utf8(&mut buf))
                }
                ct_event!(keycode press Backspace) => self.edit(EditKind::DeleteBackward, ""),
                ct_event!(keycode press Delete) => self.edit(EditKind::DeleteForward, ""),
                ct_event!(key press CONTROL-'d') => tc(self.clear()),
                ct_event!(paste v) => self.edit(EditKind::Insert, v),
                ct_event!(focus_gained) => self.focus_gained().into(),

                ct_event!(key release _)
                | ct_event!(key release SHIFT-_)
                | ct_event!(key release CONTROL_ALT-_)
                | ct_event!(keycode release Backspace)
                | ct_event!(keycode release Delete)
                | ct_event!(key release CONTROL-'d') => TextOutcome::Unchanged,

                _ => TextOutcome::Continue,
            }
        } else {
            TextOutcome::Continue
        };

        if r == TextOutcome::Continue {
            r = self.handle(event, ReadOnly);
        }
        focus_r.max(r)
    }
}

impl HandleEvent<Event, ReadOnly, TextOutcome> for MaskedState {
    fn handle(&mut self, event: &Event, _keymap: ReadOnly) -> TextOutcome {
        if self.is_focused() {
            match event {
                ct_event!(keycode press Left) => self.move_left(false).into(),
                ct_event!(keycode press Right) => self.move_right(false).into(),
                ct_event!(keycode press Home) => self.move_to_line_start(false).into(),
                ct_event!(keycode press End) => self.move_to_line_end(false).into(),
                ct_event!(keycode press SHIFT-Left) => self.move_left(true).into(),
                ct_event!(keycode press SHIFT-Right) => self.move_right(true).into(),
                ct_event!(keycode press SHIFT-Home) => self.move_to_line_start(true).into(),
                ct_event!(keycode press SHIFT-End) => self.move_to_line_end(true).into(),
                ct_event!(key press CONTROL-'a') => self.select_all().into(),

                ct_event!(keycode release Left)
                | ct_event!(keycode release Right)
                | ct_event!(keycode release Home)
                | ct_event!(keycode release End)
                | ct_event!(keycode release SHIFT-Left)
                | ct_event!(keycode release SHIFT-Right)
                | ct_event!(keycode release SHIFT-Home)
                | ct_event!(keycode release SHIFT-End)
                | ct_event!(key release CONTROL-'a') => TextOutcome::Unchanged,

                _ => TextOutcome::Continue,
            }
        } else {
            TextOutcome::Continue
        }
    }
}

/// Update the focus flag from the given focus. Gained and lost
/// are set when the focus differs from the last call.
fn set_focus(state: &MaskedState, focus: bool) {
    let was_focused = state.focus.get();
    state.focus.set_gained(focus && !was_focused);
    state.focus.set_lost(!focus && was_focused);
    state.focus.set(focus);
}

/// Handle all events.
/// Text events are only processed if focus is true.
pub fn handle_events(state: &mut MaskedState, focus: bool, event: &Event) -> TextOutcome {
    set_focus(state, focus);
    state.handle(event, Regular)
}

/// Handle only navigation events.
/// Text events are only processed if focus is true.
pub fn handle_readonly_events(state: &mut MaskedState, focus: bool, event: &Event) -> TextOutcome {
    set_focus(state, focus);
    state.handle(event, ReadOnly)
}

mod common;

use rat_mask::edit::{EditKind, EditResult, apply_edit};
use rat_mask::{Placeholder, Template};

fn res(value: &str, cursor: u32) -> Option<EditResult> {
    Some(EditResult::new(value.into(), cursor))
}

#[test]
fn test_insert() {
    common::setup_logging();

    let t = Template::new("(ddd) ddd-dddd");
    let p = Placeholder::new("(___) ___-____");

    let r = apply_edit("(___) ___-____", &t, Some(&p), 1, 1, EditKind::Insert, "1", false);
    assert_eq!(r, res("(1__) ___-____", 2));
    let r = apply_edit("(1__) ___-____", &t, Some(&p), 2, 2, EditKind::Insert, "1", false);
    assert_eq!(r, res("(11_) ___-____", 3));
    // skips ") "
    let r = apply_edit("(11_) ___-____", &t, Some(&p), 3, 3, EditKind::Insert, "1", false);
    assert_eq!(r, res("(111) ___-____", 6));
    let r = apply_edit("(111) ___-____", &t, Some(&p), 6, 6, EditKind::Insert, "1", false);
    assert_eq!(r, res("(111) 1__-____", 7));
}

#[test]
fn test_insert_shifts() {
    common::setup_logging();

    let t = Template::new("dd-dd");
    let r = apply_edit("12-34", &t, None, 0, 0, EditKind::Insert, "5", false);
    assert_eq!(r, res("51-23", 1));
    let r = apply_edit("12-34", &t, None, 3, 3, EditKind::Insert, "5", false);
    assert_eq!(r, res("12-53", 4));
    // replace a selection
    let r = apply_edit("12-34", &t, None, 0, 5, EditKind::Insert, "9", false);
    assert_eq!(r, res("9", 1));
}

#[test]
fn test_insert_unchanged() {
    common::setup_logging();

    let t = Template::new("dd-dd");
    assert_eq!(
        apply_edit("12-", &t, None, 3, 3, EditKind::Insert, "x", false),
        None
    );
    let t = Template::new("d");
    let p = Placeholder::new("_");
    // full and past the end, even with keep-position
    assert_eq!(
        apply_edit("1", &t, Some(&p), 1, 1, EditKind::Insert, "2", true),
        None
    );
}

#[test]
fn test_insert_keep_position() {
    common::setup_logging();

    let t = Template::new("(ddd) ddd-dddd");
    let p = Placeholder::new("(___) ___-____");
    let r = apply_edit("(___) ___-____", &t, Some(&p), 1, 1, EditKind::Insert, "1", true);
    assert_eq!(r, res("(1__) ___-____", 2));

    let t = Template::new("dd-dd");
    let p = Placeholder::new("__-__");
    let r = apply_edit("12-34", &t, Some(&p), 3, 3, EditKind::Insert, "5", true);
    assert_eq!(r, res("12-54", 4));
}

#[test]
fn test_paste_keep_position() {
    common::setup_logging();

    let t = Template::new("(ddd)");
    let p = Placeholder::new("(___)");
    let r = apply_edit("(___)", &t, Some(&p), 0, 0, EditKind::Insert, "12", true);
    assert_eq!(r, res("(12_)", 3));

    let t = Template::new("dd-dd");
    let r = apply_edit("12-34", &t, None, 0, 5, EditKind::Insert, "56", true);
    assert_eq!(r, res("56-", 3));
}

#[test]
fn test_backspace() {
    common::setup_logging();

    let t = Template::new("(ddd) ddd-dddd");
    let p = Placeholder::new("(___) ___-____");
    let r = apply_edit("(123) ___-____", &t, Some(&p), 4, 4, EditKind::DeleteBackward, "", false);
    assert_eq!(r, res("(12_) ___-____", 3));
    // caret after ')' skips the literal
    let r = apply_edit("(123) ___-____", &t, Some(&p), 5, 5, EditKind::DeleteBackward, "", false);
    assert_eq!(r, res("(12_) ___-____", 3));
}

#[test]
fn test_backspace_skips_literal() {
    common::setup_logging();

    let t = Template::new("dd-dd");
    let mut value = String::new();
    let mut cursor = 0;
    for c in ["1", "2", "3", "4"] {
        let r = apply_edit(&value, &t, None, cursor, cursor, EditKind::Insert, c, false)
            .expect("changed");
        value = r.value;
        cursor = r.cursor;
    }
    assert_eq!(value, "12-34");
    assert_eq!(cursor, 5);

    let mut seen = Vec::new();
    for _ in 0..3 {
        let r = apply_edit(&value, &t, None, cursor, cursor, EditKind::DeleteBackward, "", false)
            .expect("changed");
        value = r.value;
        cursor = r.cursor;
        seen.push(value.clone());
    }
    assert_eq!(seen, vec!["12-3", "12-", "1"]);
    assert_eq!(cursor, 1);
}

#[test]
fn test_backspace_noop() {
    common::setup_logging();

    let t = Template::new("ddd");
    let p = Placeholder::new("___");
    assert_eq!(
        apply_edit("123", &t, Some(&p), 0, 0, EditKind::DeleteBackward, "", false),
        None
    );
    let t = Template::new("-d");
    let p = Placeholder::new("-_");
    assert_eq!(
        apply_edit("-1", &t, Some(&p), 1, 1, EditKind::DeleteBackward, "", false),
        None
    );
    assert_eq!(
        apply_edit("-1", &t, Some(&p), 1, 1, EditKind::DeleteBackward, "", true),
        None
    );
}

#[test]
fn test_backspace_keep_position() {
    common::setup_logging();

    let t = Template::new("(ddd) ddd-dddd");
    let p = Placeholder::new("(___) ___-____");
    let r = apply_edit("(1__) ___-____", &t, Some(&p), 2, 2, EditKind::DeleteBackward, "", true);
    assert_eq!(r, res("(___) ___-____", 1));

    let t = Template::new("dd/dd/dddd");
    let p = Placeholder::new("mm/dd/yyyy");
    let r = apply_edit("52/12/2024", &t, Some(&p), 2, 2, EditKind::DeleteBackward, "", true);
    assert_eq!(r, res("5m/12/2024", 1));
    // over the literal
    let r = apply_edit("52/12/2024", &t, Some(&p), 3, 3, EditKind::DeleteBackward, "", true);
    assert_eq!(r, res("5m/12/2024", 1));
}

#[test]
fn test_delete_selection() {
    common::setup_logging();

    let t = Template::new("dd-dd");
    let p = Placeholder::new("__-__");
    for kind in [EditKind::DeleteBackward, EditKind::DeleteForward] {
        let r = apply_edit("12-34", &t, Some(&p), 0, 2, kind, "", true);
        assert_eq!(r, res("__-34", 0));
        let r = apply_edit("12-34", &t, Some(&p), 0, 2, kind, "", false);
        assert_eq!(r, res("34-__", 0));
    }
}

#[test]
fn test_delete_forward() {
    common::setup_logging();

    let t = Template::new("dd/dd/dddd");
    let p = Placeholder::new("mm/dd/yyyy");
    let r = apply_edit("12/15/2024", &t, Some(&p), 0, 0, EditKind::DeleteForward, "", true);
    assert_eq!(r, res("m2/15/2024", 0));
    // skips the literal, the caret stays
    let r = apply_edit("12/15/2024", &t, Some(&p), 2, 2, EditKind::DeleteForward, "", true);
    assert_eq!(r, res("12/d5/2024", 2));

    let r = apply_edit("12/15/2024", &t, Some(&p), 2, 2, EditKind::DeleteForward, "", false);
    assert_eq!(r, res("12/52/024y", 2));
    let r = apply_edit("12/15/2024", &t, None, 0, 0, EditKind::DeleteForward, "", false);
    assert_eq!(r, res("21/52/024", 0));
}

#[test]
fn test_delete_forward_noop() {
    common::setup_logging();

    let t = Template::new("d");
    let p = Placeholder::new("_");
    assert_eq!(
        apply_edit("1", &t, Some(&p), 1, 1, EditKind::DeleteForward, "", false),
        None
    );
    let t = Template::new("dd-");
    assert_eq!(
        apply_edit("12-", &t, None, 2, 2, EditKind::DeleteForward, "", false),
        None
    );
}

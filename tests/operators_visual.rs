use vimkeys::{Mode, Position, RegisterKind, TextHost, VisualKind};

mod support;
use support::Harness;

fn pos(line: u32, col: u32) -> Position {
    Position::new(line, col)
}

#[test]
fn dw_deletes_word_and_trailing_space() {
    let mut h = Harness::new("hello world", 0, 0);
    h.keys("dw");
    assert_eq!(h.text(), "world");
    assert_eq!(h.cursor(), pos(0, 0));
    assert_eq!(h.register(), "hello ");
    assert_eq!(h.mode(), Mode::Command);
}

#[test]
fn dw_on_last_word_does_not_join_lines() {
    let mut h = Harness::new("foo bar\nbaz", 0, 4);
    h.keys("dw");
    assert_eq!(h.text(), "foo \nbaz");
    assert_eq!(h.cursor(), pos(0, 3));
}

#[test]
fn dd_deletes_current_line() {
    let mut h = Harness::new("line1\nline2\nline3", 1, 2);
    h.keys("dd");
    assert_eq!(h.text(), "line1\nline3");
    assert_eq!(h.cursor(), pos(1, 0));
    assert_eq!(h.register(), "line2\n");
    assert_eq!(h.engine.register().kind(), RegisterKind::Line);
}

#[test]
fn dd_on_last_line_removes_preceding_break() {
    let mut h = Harness::new("one\ntwo\nthree", 2, 0);
    h.keys("dd");
    assert_eq!(h.text(), "one\ntwo");
    assert_eq!(h.cursor(), pos(1, 0));
    assert_eq!(h.register(), "three\n");
}

#[test]
fn counted_dd_clamps_to_buffer() {
    let mut h = Harness::new("a\nb\nc\nd", 1, 0);
    h.keys("2dd");
    assert_eq!(h.text(), "a\nd");
    h.keys("9dd");
    assert_eq!(h.text(), "a");
}

#[test]
fn dd_on_only_line_empties_buffer() {
    let mut h = Harness::new("solo", 0, 2);
    h.keys("dd");
    assert_eq!(h.text(), "");
    assert_eq!(h.cursor(), pos(0, 0));
}

#[test]
fn x_deletes_counted_characters() {
    let mut h = Harness::new("abc", 0, 0);
    h.keys("3x");
    assert_eq!(h.text(), "");
    assert_eq!(h.cursor(), pos(0, 0));
    assert_eq!(h.register(), "abc");
}

#[test]
fn x_at_line_end_pulls_cursor_back() {
    let mut h = Harness::new("abc", 0, 2);
    h.keys("x");
    assert_eq!(h.text(), "ab");
    assert_eq!(h.cursor(), pos(0, 1));
}

#[test]
fn big_x_deletes_before_cursor() {
    let mut h = Harness::new("abcd", 0, 2);
    h.keys("X");
    assert_eq!(h.text(), "acd");
    assert_eq!(h.cursor(), pos(0, 1));
    h.keys("0X");
    assert_eq!(h.text(), "acd");
}

#[test]
fn counts_before_and_after_operator_multiply() {
    let mut h = Harness::new("a b c d e f g h", 0, 0);
    h.keys("2d3w");
    assert_eq!(h.text(), "g h");
}

#[test]
fn d_dollar_and_big_d() {
    let mut h = Harness::new("hello world", 0, 5);
    h.keys("D");
    assert_eq!(h.text(), "hello");
    assert_eq!(h.cursor(), pos(0, 4));
    assert_eq!(h.register(), " world");
}

#[test]
fn big_d_on_empty_line_keeps_line_break() {
    let mut h = Harness::new("a\n\nb", 1, 0);
    h.keys("D");
    assert_eq!(h.text(), "a\n\nb");
}

#[test]
fn de_is_inclusive() {
    let mut h = Harness::new("hello world", 0, 0);
    h.keys("de");
    assert_eq!(h.text(), " world");
}

#[test]
fn d_find_is_inclusive_and_till_stops_before() {
    let mut h = Harness::new("abc,def", 0, 0);
    h.keys("dt,");
    assert_eq!(h.text(), ",def");
    h.keys("u");
    h.keys("df,");
    assert_eq!(h.text(), "def");
}

#[test]
fn d_big_g_and_dgg_are_linewise() {
    let mut h = Harness::new("l1\nl2\nl3\nl4", 1, 1);
    h.keys("dG");
    assert_eq!(h.text(), "l1");

    let mut h = Harness::new("l1\nl2\nl3\nl4", 2, 1);
    h.keys("dgg");
    assert_eq!(h.text(), "l4");
}

#[test]
fn dj_deletes_two_lines() {
    let mut h = Harness::new("a\nb\nc", 0, 0);
    h.keys("dj");
    assert_eq!(h.text(), "c");
}

#[test]
fn dk_on_first_line_is_cancelled() {
    let mut h = Harness::new("a\nb", 0, 0);
    h.keys("dk");
    assert_eq!(h.text(), "a\nb");
    assert!(h.engine.pending().is_none());
}

#[test]
fn cw_changes_to_word_end() {
    let mut h = Harness::new("hello world", 0, 0);
    h.keys("cw");
    assert_eq!(h.text(), " world");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.cursor(), pos(0, 0));
    h.keys("bye\x1b");
    assert_eq!(h.text(), "bye world");
    assert_eq!(h.mode(), Mode::Command);
}

#[test]
fn cw_on_last_character_of_word() {
    let mut h = Harness::new("ab cd", 0, 1);
    h.keys("cw");
    assert_eq!(h.text(), "a cd");
}

#[test]
fn cw_on_blank_behaves_like_dw() {
    let mut h = Harness::new("a   b", 0, 1);
    h.keys("cw");
    assert_eq!(h.text(), "ab");
    assert_eq!(h.mode(), Mode::Insert);
}

#[test]
fn cc_keeps_an_empty_line() {
    let mut h = Harness::new("  foo\nbar", 0, 3);
    h.keys("cc");
    assert_eq!(h.text(), "\nbar");
    assert_eq!(h.cursor(), pos(0, 0));
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.register(), "  foo\n");
}

#[test]
fn big_c_and_s_shortcuts() {
    let mut h = Harness::new("hello world", 0, 6);
    h.keys("C");
    assert_eq!(h.text(), "hello ");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.cursor(), pos(0, 6));

    let mut h = Harness::new("abc", 0, 1);
    h.keys("sX");
    assert_eq!(h.text(), "aXc");

    let mut h = Harness::new("one\ntwo", 1, 1);
    h.keys("S");
    assert_eq!(h.text(), "one\n");
    assert_eq!(h.mode(), Mode::Insert);
}

#[test]
fn indent_and_dedent_lines() {
    let mut h = Harness::new("abc\ndef", 0, 1);
    h.keys(">>");
    assert_eq!(h.text(), "    abc\ndef");
    assert_eq!(h.cursor(), pos(0, 4));
    h.keys("2>>");
    assert_eq!(h.text(), "        abc\n    def");
    h.keys("<<");
    assert_eq!(h.text(), "    abc\n    def");
    h.keys("<j");
    assert_eq!(h.text(), "abc\ndef");
    h.keys("<<");
    assert_eq!(h.text(), "abc\ndef");
}

#[test]
fn case_operators() {
    let mut h = Harness::new("hello world", 0, 0);
    h.keys("gUiw");
    assert_eq!(h.text(), "HELLO world");
    h.keys("g~~");
    assert_eq!(h.text(), "hello WORLD");
    h.keys("guu");
    assert_eq!(h.text(), "hello world");
}

#[test]
fn tilde_toggles_and_advances() {
    let mut h = Harness::new("abc", 0, 0);
    h.keys("~");
    assert_eq!(h.text(), "Abc");
    assert_eq!(h.cursor(), pos(0, 1));
    h.keys("5~");
    assert_eq!(h.text(), "ABC");
    assert_eq!(h.cursor(), pos(0, 2));
}

#[test]
fn replace_characters() {
    let mut h = Harness::new("abc", 0, 0);
    h.keys("rx");
    assert_eq!(h.text(), "xbc");
    assert_eq!(h.cursor(), pos(0, 0));
    h.keys("3rz");
    assert_eq!(h.text(), "zzz");
    assert_eq!(h.cursor(), pos(0, 2));
    h.keys("05rq");
    assert_eq!(h.text(), "zzz");
}

#[test]
fn join_lines() {
    let mut h = Harness::new("hello\n  world\nagain", 0, 0);
    h.keys("J");
    assert_eq!(h.text(), "hello world\nagain");
    assert_eq!(h.cursor(), pos(0, 5));

    let mut h = Harness::new("a\nb\nc\nd", 0, 0);
    h.keys("3J");
    assert_eq!(h.text(), "a b c\nd");

    let mut h = Harness::new("a \nb", 0, 0);
    h.keys("J");
    assert_eq!(h.text(), "a b");
}

#[test]
fn undo_and_redo() {
    let mut h = Harness::new("abc", 0, 0);
    h.keys("xx");
    assert_eq!(h.text(), "c");
    h.keys("u");
    assert_eq!(h.text(), "bc");
    h.keys("u");
    assert_eq!(h.text(), "abc");
    h.key(vimkeys::KeyEvent::ctrl('r'));
    assert_eq!(h.text(), "bc");
}

#[test]
fn dd_then_undo_restores_text_and_cursor() {
    let mut h = Harness::new("a\nb\nc", 1, 0);
    h.keys("dd");
    h.keys("u");
    assert_eq!(h.text(), "a\nb\nc");
    assert_eq!(h.cursor(), pos(1, 0));
}

// Visual mode

#[test]
fn visual_l_then_d_removes_two_characters() {
    let mut h = Harness::new("hello", 0, 1);
    h.keys("v");
    assert_eq!(h.mode(), Mode::Visual);
    h.keys("ld");
    assert_eq!(h.text(), "hlo");
    assert_eq!(h.cursor(), pos(0, 1));
    assert_eq!(h.mode(), Mode::Command);
    assert_eq!(h.engine.selection(), None);
    assert_eq!(h.buf.selection(), None);
}

#[test]
fn visual_selection_is_mirrored_to_host() {
    let mut h = Harness::new("hello", 0, 1);
    h.keys("vll");
    let sel = h.engine.selection().unwrap();
    assert_eq!(sel.anchor, pos(0, 1));
    assert_eq!(sel.cursor, pos(0, 3));
    assert_eq!(sel.kind, VisualKind::CharWise);
    assert_eq!(h.buf.selection(), Some(sel));
    h.keys("\x1b");
    assert_eq!(h.mode(), Mode::Command);
    assert_eq!(h.buf.selection(), None);
    assert_eq!(h.text(), "hello");
}

#[test]
fn visual_backwards_selection_is_normalized() {
    let mut h = Harness::new("abcdef", 0, 3);
    h.keys("vhhd");
    assert_eq!(h.text(), "aef");
}

#[test]
fn visual_counted_motion() {
    let mut h = Harness::new("abcdef", 0, 0);
    h.keys("v3ld");
    assert_eq!(h.text(), "ef");
}

#[test]
fn visual_yank_leaves_text() {
    let mut h = Harness::new("hello world", 0, 0);
    h.keys("vey");
    assert_eq!(h.text(), "hello world");
    assert_eq!(h.register(), "hello");
    assert_eq!(h.mode(), Mode::Command);
    assert_eq!(h.cursor(), pos(0, 0));
}

#[test]
fn visual_change_enters_insert() {
    let mut h = Harness::new("hello", 0, 0);
    h.keys("vlc");
    assert_eq!(h.text(), "llo");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.buf.selection(), None);
}

#[test]
fn visual_o_swaps_ends() {
    let mut h = Harness::new("hello", 0, 1);
    h.keys("vllo");
    assert_eq!(h.cursor(), pos(0, 1));
    h.keys("hd");
    assert_eq!(h.text(), "o");
}

#[test]
fn visual_line_mode() {
    let mut h = Harness::new("a\nb\nc", 0, 0);
    h.keys("Vjd");
    assert_eq!(h.text(), "c");
    assert_eq!(h.register(), "a\nb\n");
    assert_eq!(h.engine.register().kind(), RegisterKind::Line);
}

#[test]
fn visual_kind_toggles() {
    let mut h = Harness::new("abc\ndef", 0, 1);
    h.keys("vV");
    assert_eq!(h.engine.selection().unwrap().kind, VisualKind::LineWise);
    h.keys("V");
    assert_eq!(h.mode(), Mode::Command);
    h.keys("vv");
    assert_eq!(h.mode(), Mode::Command);
}

#[test]
fn visual_inner_word_then_delete() {
    let mut h = Harness::new("foo bar", 0, 5);
    h.keys("viw");
    let sel = h.engine.selection().unwrap();
    assert_eq!((sel.anchor, sel.cursor), (pos(0, 4), pos(0, 6)));
    h.keys("d");
    assert_eq!(h.text(), "foo ");
}

#[test]
fn visual_indent_and_case() {
    let mut h = Harness::new("ab\ncd\nef", 0, 0);
    h.keys("Vj>");
    assert_eq!(h.text(), "    ab\n    cd\nef");
    h.keys("vjU");
    assert_eq!(h.text(), "    AB\n    Cd\nef");
}

#[test]
fn visual_join() {
    let mut h = Harness::new("a\nb\nc\nd", 0, 0);
    h.keys("VjjJ");
    assert_eq!(h.text(), "a b c\nd");
    assert_eq!(h.mode(), Mode::Command);
}

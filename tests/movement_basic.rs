use vimkeys::{KeyCode, KeyEvent, Position};

mod support;
use support::Harness;

fn pos(line: u32, col: u32) -> Position {
    Position::new(line, col)
}

#[test]
fn hjkl_moves() {
    let mut h = Harness::new("abc\nxyz", 0, 0);

    h.keys("l");
    assert_eq!(h.cursor(), pos(0, 1));
    h.keys("j");
    assert_eq!(h.cursor(), pos(1, 1));
    h.keys("h");
    assert_eq!(h.cursor(), pos(1, 0));
    h.keys("k");
    assert_eq!(h.cursor(), pos(0, 0));
}

#[test]
fn arrow_keys_act_like_hjkl() {
    let mut h = Harness::new("abc\nxyz", 0, 0);
    h.key(KeyEvent::plain(KeyCode::Right));
    h.key(KeyEvent::plain(KeyCode::Down));
    assert_eq!(h.cursor(), pos(1, 1));
    h.key(KeyEvent::plain(KeyCode::Left));
    h.key(KeyEvent::plain(KeyCode::Up));
    assert_eq!(h.cursor(), pos(0, 0));
}

#[test]
fn horizontal_moves_stop_at_line_edges() {
    let mut h = Harness::new("abc\nxyz", 0, 0);
    h.keys("h");
    assert_eq!(h.cursor(), pos(0, 0));
    h.keys("10l");
    assert_eq!(h.cursor(), pos(0, 2));
    h.keys("k");
    assert_eq!(h.cursor(), pos(0, 2));
}

#[test]
fn zero_caret_and_dollar() {
    let mut h = Harness::new("   abcdef\nxy", 0, 5);
    h.keys("0");
    assert_eq!(h.cursor(), pos(0, 0));
    h.keys("^");
    assert_eq!(h.cursor(), pos(0, 3));
    h.keys("$");
    assert_eq!(h.cursor(), pos(0, 8));
}

#[test]
fn dollar_with_count_moves_down_first() {
    let mut h = Harness::new("abc\ndefgh\nij", 0, 0);
    h.keys("2$");
    assert_eq!(h.cursor(), pos(1, 4));
}

#[test]
fn counted_vertical_motion() {
    let mut h = Harness::new("1\n2\n3\n4\n5\n6", 0, 0);
    h.keys("3j");
    assert_eq!(h.cursor(), pos(3, 0));
    h.keys("10j");
    assert_eq!(h.cursor(), pos(5, 0));
    h.keys("2k");
    assert_eq!(h.cursor(), pos(3, 0));
}

#[test]
fn vertical_motion_keeps_preferred_column() {
    let mut h = Harness::new("abcdef\na\nabcdef", 0, 4);
    h.keys("j");
    assert_eq!(h.cursor(), pos(1, 0));
    h.keys("j");
    assert_eq!(h.cursor(), pos(2, 4));
}

#[test]
fn dollar_sticks_to_line_end_across_lines() {
    let mut h = Harness::new("abcdef\nabc\nabcdefgh", 0, 0);
    h.keys("$");
    assert_eq!(h.cursor(), pos(0, 5));
    h.keys("j");
    assert_eq!(h.cursor(), pos(1, 2));
    h.keys("j");
    assert_eq!(h.cursor(), pos(2, 7));
}

#[test]
fn gg_and_big_g() {
    let mut h = Harness::new("l1\nl2\n  l3\nl4", 1, 1);
    h.keys("G");
    assert_eq!(h.cursor(), pos(3, 0));
    h.keys("gg");
    assert_eq!(h.cursor(), pos(0, 0));
    h.keys("3G");
    assert_eq!(h.cursor(), pos(2, 2));
    h.keys("2gg");
    assert_eq!(h.cursor(), pos(1, 0));
    h.keys("99G");
    assert_eq!(h.cursor(), pos(3, 0));
}

#[test]
fn word_motions() {
    let mut h = Harness::new("foo.bar baz", 0, 0);
    h.keys("w");
    assert_eq!(h.cursor(), pos(0, 3));
    h.keys("w");
    assert_eq!(h.cursor(), pos(0, 4));
    h.keys("w");
    assert_eq!(h.cursor(), pos(0, 8));
    h.keys("b");
    assert_eq!(h.cursor(), pos(0, 4));
    h.keys("0e");
    assert_eq!(h.cursor(), pos(0, 2));
}

#[test]
fn big_word_motions_skip_punctuation() {
    let mut h = Harness::new("foo.bar baz qux", 0, 0);
    h.keys("W");
    assert_eq!(h.cursor(), pos(0, 8));
    h.keys("E");
    assert_eq!(h.cursor(), pos(0, 10));
    h.keys("B");
    assert_eq!(h.cursor(), pos(0, 8));
    h.keys("B");
    assert_eq!(h.cursor(), pos(0, 0));
}

#[test]
fn word_motion_stops_on_empty_lines() {
    let mut h = Harness::new("a\n\nb", 0, 0);
    h.keys("w");
    assert_eq!(h.cursor(), pos(1, 0));
    h.keys("w");
    assert_eq!(h.cursor(), pos(2, 0));
    h.keys("b");
    assert_eq!(h.cursor(), pos(1, 0));
}

#[test]
fn paragraph_motions() {
    let mut h = Harness::new("a\nb\n\nc\nd", 0, 0);
    h.keys("}");
    assert_eq!(h.cursor(), pos(2, 0));
    h.keys("}");
    assert_eq!(h.cursor(), pos(4, 0));
    h.keys("{");
    assert_eq!(h.cursor(), pos(2, 0));
    h.keys("{");
    assert_eq!(h.cursor(), pos(0, 0));
}

#[test]
fn find_and_till_in_line() {
    let mut h = Harness::new("a,b,c,d", 0, 0);
    h.keys("f,");
    assert_eq!(h.cursor(), pos(0, 1));
    h.keys(";");
    assert_eq!(h.cursor(), pos(0, 3));
    h.keys(",");
    assert_eq!(h.cursor(), pos(0, 1));
    h.keys("0t,");
    // Already right before the comma: till does not move.
    assert_eq!(h.cursor(), pos(0, 0));
    h.keys("2f,");
    assert_eq!(h.cursor(), pos(0, 3));
    h.keys("F,");
    assert_eq!(h.cursor(), pos(0, 1));
    h.keys("$Tb");
    assert_eq!(h.cursor(), pos(0, 3));
}

#[test]
fn repeated_till_skips_adjacent_target() {
    let mut h = Harness::new("a.b.c", 0, 0);
    h.keys("t.");
    assert_eq!(h.cursor(), pos(0, 0));
    h.keys("l;");
    assert_eq!(h.cursor(), pos(0, 2));
}

#[test]
fn failed_find_leaves_cursor() {
    let mut h = Harness::new("abc", 0, 1);
    h.keys("fz");
    assert_eq!(h.cursor(), pos(0, 1));
    h.keys("l");
    assert_eq!(h.cursor(), pos(0, 2));
}

#[test]
fn star_and_hash_search_whole_words() {
    let mut h = Harness::new("foo bar\nfoobar foo baz foo", 0, 0);
    h.keys("*");
    assert_eq!(h.cursor(), pos(1, 7));
    h.keys("*");
    assert_eq!(h.cursor(), pos(1, 15));
    h.keys("*");
    assert_eq!(h.cursor(), pos(0, 0));
    h.keys("#");
    assert_eq!(h.cursor(), pos(1, 15));
}

#[test]
fn motions_on_empty_buffer_stay_at_origin() {
    let mut h = Harness::new("", 0, 0);
    h.keys("hjklwbe0$G{}");
    assert_eq!(h.cursor(), pos(0, 0));
    assert_eq!(h.text(), "");
}

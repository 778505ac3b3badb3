use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::utils::models::{Position, TabChar};

pub mod models;

/// Columns taken by a char in a terminal, control chars take none
fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Columns taken by a string in a terminal, hangul and other CJK count twice
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Shorten a string to fit in `width` columns, ending it with `…`
pub fn etc_str(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_owned();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        // Keep a column for the ellipsis
        if used + char_width(c) + 1 > width {
            break;
        }
        used += char_width(c);
        out.push(c);
    }
    out.push('…');

    out
}

/// Center a string in `width` columns, shortening it if needed
pub fn center(s: &str, width: usize) -> String {
    let s = etc_str(s, width);
    let free = width.saturating_sub(display_width(&s));
    let left = free / 2;

    format!("{}{}{}", " ".repeat(left), s, " ".repeat(free - left))
}

/// Horizontal line of the table
///
/// `widths` are the columns' widths. For middle lines, `rules[i]` says if
/// column `i` gets a horizontal bar; a column without one continues the cell
/// above and stays blank.
pub fn line_table(widths: &[usize], rules: &[bool], pos: Position) -> String {
    let bh = TabChar::Bh.val();
    let mut line = String::new();

    let ruled = |i: usize| rules.get(i).copied().unwrap_or(true);

    // Left edge
    line.push(match pos {
        Position::Top => TabChar::Jtl.val(),
        Position::Bottom => TabChar::Jbl.val(),
        Position::Middle => {
            if ruled(0) {
                TabChar::Jl.val()
            } else {
                TabChar::Bv.val()
            }
        }
    });

    for (i, width) in widths.iter().enumerate() {
        if ruled(i) {
            line.push_str(&bh.to_string().repeat(*width));
        } else {
            line.push_str(&" ".repeat(*width));
        }

        let last = i + 1 == widths.len();
        line.push(match (pos, last) {
            (Position::Top, false) => TabChar::Jtb.val(),
            (Position::Top, true) => TabChar::Jtr.val(),
            (Position::Bottom, false) => TabChar::Jtt.val(),
            (Position::Bottom, true) => TabChar::Jbr.val(),
            (Position::Middle, true) => {
                if ruled(i) {
                    TabChar::Jr.val()
                } else {
                    TabChar::Bv.val()
                }
            }
            (Position::Middle, false) => TabChar::joint(ruled(i), ruled(i + 1)).val(),
        });
    }
    line.push('\n');

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(display_width("수학"), 4);
        assert_eq!(display_width("18:00"), 5);
        assert_eq!(display_width("영어 A반"), 8);
        assert_eq!(display_width("📚"), 2);
        assert_eq!(display_width("e\u{301}"), 1);
    }

    #[test]
    fn shortening() {
        assert_eq!(etc_str("abc", 3), "abc");
        assert_eq!(etc_str("abcdef", 4), "abc…");
        assert_eq!(etc_str("고등수학심화", 7), "고등수…");
    }

    #[test]
    fn centering() {
        assert_eq!(center("월", 6), "  월  ");
        assert_eq!(center("ab", 5), " ab  ");
    }

    #[test]
    fn lines() {
        assert_eq!(
            line_table(&[2, 3], &[], Position::Top),
            "┌──┬───┐\n"
        );
        assert_eq!(
            line_table(&[2, 3], &[], Position::Bottom),
            "└──┴───┘\n"
        );
        assert_eq!(
            line_table(&[2, 3, 2], &[true, false, true], Position::Middle),
            "├──┤   ├──┤\n"
        );
        assert_eq!(
            line_table(&[2, 3], &[true, true], Position::Middle),
            "├──┼───┤\n"
        );
    }
}

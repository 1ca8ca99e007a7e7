use crossterm::event::KeyCode;

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Outcome of a keystroke sent to a single-line text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Changed,
    Submit,
    Cancel,
    Ignored,
}

pub fn edit_text(buffer: &mut String, key: KeyCode) -> TextEdit {
    match key {
        KeyCode::Char(c) => {
            buffer.push(c);
            TextEdit::Changed
        }
        KeyCode::Backspace => {
            buffer.pop();
            TextEdit::Changed
        }
        KeyCode::Enter => TextEdit::Submit,
        KeyCode::Esc => TextEdit::Cancel,
        _ => TextEdit::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_indices() {
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(0, 0), 0);
    }

    #[test]
    fn text_editing_keys() {
        let mut buffer = String::from("ker");
        assert_eq!(edit_text(&mut buffer, KeyCode::Char('a')), TextEdit::Changed);
        assert_eq!(buffer, "kera");
        edit_text(&mut buffer, KeyCode::Backspace);
        assert_eq!(buffer, "ker");
        assert_eq!(edit_text(&mut buffer, KeyCode::Enter), TextEdit::Submit);
        assert_eq!(edit_text(&mut buffer, KeyCode::Left), TextEdit::Ignored);
    }
}

//! Single-line search field with a cursor

/// One editing operation on the search field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// Search text plus cursor (byte index, always on a char boundary)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchField {
    text: String,
    cursor: usize,
}

impl SearchField {
    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters, for placing the terminal cursor
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text and move the cursor to its end
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Take the text, leaving the field empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Apply an edit; returns true if the text changed
    pub fn apply(&mut self, edit: SearchEdit) -> bool {
        match edit {
            SearchEdit::Insert(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            SearchEdit::Backspace => match self.prev_boundary() {
                Some(start) => {
                    self.text.replace_range(start..self.cursor, "");
                    self.cursor = start;
                    true
                }
                None => false,
            },
            SearchEdit::Delete => match self.next_boundary() {
                Some(end) => {
                    self.text.replace_range(self.cursor..end, "");
                    true
                }
                None => false,
            },
            SearchEdit::Left => {
                if let Some(start) = self.prev_boundary() {
                    self.cursor = start;
                }
                false
            }
            SearchEdit::Right => {
                if let Some(end) = self.next_boundary() {
                    self.cursor = end;
                }
                false
            }
            SearchEdit::Home => {
                self.cursor = 0;
                false
            }
            SearchEdit::End => {
                self.cursor = self.text.len();
                false
            }
            SearchEdit::Clear => {
                let changed = !self.text.is_empty();
                self.take();
                changed
            }
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

//! Markup stripping for rich-text email fields.
//!
//! Pure string parsing. A `<` opens a tag only when followed by an ASCII
//! letter, `/`, `!` or `?`; any other `<` or `>` is ordinary text. Inside a
//! tag, quoted attribute values may contain `>`. An unterminated tag swallows
//! the rest of the input. Whitespace outside tags is kept as is.

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Tag,
    Quoted(char),
}

/// Strip tags from `input`, keeping everything else byte for byte.
pub fn strip_tags(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut state = State::Text;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        state = match (state, ch) {
            (State::Text, '<') => match chars.peek() {
                Some(&next) if next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?') => {
                    State::Tag
                }
                _ => {
                    result.push(ch);
                    State::Text
                }
            },
            (State::Text, _) => {
                result.push(ch);
                State::Text
            }
            (State::Tag, '>') => State::Text,
            (State::Tag, '"' | '\'') => State::Quoted(ch),
            (State::Tag, _) => State::Tag,
            (State::Quoted(q), c) if c == q => State::Tag,
            (State::Quoted(q), _) => State::Quoted(q),
        };
    }
    result
}

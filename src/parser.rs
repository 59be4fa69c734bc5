// parser.rs

/// Splits a command line into words.
///
/// Single quotes keep everything literally, double quotes allow `\"` and
/// `\\`, and outside quotes a backslash takes the next character as is.
pub fn split_words(line: &str) -> Vec<String> {
    enum State { Normal, Single, Double }
    let mut words = Vec::new();
    let mut cur = String::new();
    // distinguishes `''` (an empty word) from no word at all
    let mut in_word = false;
    let mut state = State::Normal;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match state {
            State::Normal => match ch {
                '\'' => {
                    state = State::Single;
                    in_word = true;
                }
                '"' => {
                    state = State::Double;
                    in_word = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        cur.push(next);
                    }
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut cur));
                        in_word = false;
                    }
                }
                _ => {
                    cur.push(ch);
                    in_word = true;
                }
            },
            State::Single => match ch {
                '\'' => state = State::Normal,
                _ => cur.push(ch),
            },
            State::Double => match ch {
                '"' => state = State::Normal,
                '\\' => match chars.peek() {
                    Some(&next @ ('\\' | '"')) => {
                        cur.push(next);
                        chars.next();
                    }
                    _ => cur.push('\\'),
                },
                _ => cur.push(ch),
            },
        }
    }
    if in_word {
        words.push(cur);
    }
    words
}

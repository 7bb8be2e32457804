use crate::value::Lookup;

/// Replace the variables of `expression` by their value in `lookup`.
///
/// A variable is written `name` or `{name}`. Names glued to another letter,
/// digit or `_` (like `abc` in `2abc`) are part of a longer word and stay as
/// they are, as do names missing from `lookup`.
///
/// # Examples
///
/// ```
/// # use std::collections::HashMap;
/// # use reckon::{substitute, Value};
/// let mut variables: HashMap<String, Value> = HashMap::new();
/// variables.insert("x".into(), Value::Number(10.0));
///
/// assert_eq!(substitute("xyz + x", &variables), "xyz + 10");
/// assert_eq!(substitute("{x}*y", &variables), "10*y");
/// ```
pub fn substitute<L: Lookup + ?Sized>(expression: &str, lookup: &L) -> String {
    let bytes = expression.as_bytes();
    let mut output = String::with_capacity(expression.len());
    let mut copied = 0;
    let mut position = 0;

    while position < bytes.len() {
        let candidate = match Candidate::at(bytes, position) {
            Some(candidate) => candidate,
            None => {
                position += 1;
                continue;
            }
        };

        let glued = (candidate.start > 0 && is_word_byte(bytes[candidate.start - 1]))
            || (candidate.end < bytes.len() && is_word_byte(bytes[candidate.end]));
        let value = if glued {
            None
        } else {
            lookup.get(&expression[candidate.name.0..candidate.name.1])
        };

        if let Some(value) = value {
            output.push_str(&expression[copied..candidate.start]);
            output.push_str(&value.to_string());
            copied = candidate.end;
        }
        position = candidate.end;
    }

    output.push_str(&expression[copied..]);
    output
}

/// A possible variable reference, as byte offsets in the expression
struct Candidate {
    start: usize,
    end: usize,
    /// Offsets of the name, without the braces
    name: (usize, usize),
}

impl Candidate {
    /// Find a variable reference starting exactly at `start`
    fn at(bytes: &[u8], start: usize) -> Option<Self> {
        if bytes[start] == b'{' {
            let name_end = name_end(bytes, start + 1)?;
            if bytes.get(name_end) == Some(&b'}') {
                return Some(Self {
                    start,
                    end: name_end + 1,
                    name: (start + 1, name_end),
                });
            }
            return None;
        }
        let end = name_end(bytes, start)?;
        Some(Self {
            start,
            end,
            name: (start, end),
        })
    }
}

/// Get the end of the name starting at `start`, if there is one
fn name_end(bytes: &[u8], start: usize) -> Option<usize> {
    match bytes.get(start) {
        Some(&b) if b == b'_' || b.is_ascii_alphabetic() => {}
        _ => return None,
    }
    let length = bytes[start..]
        .iter()
        .take_while(|&&b| is_word_byte(b))
        .count();
    Some(start + length)
}

fn is_word_byte(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

use crate::token::Op;
use hashbrown::HashMap;

lazy_static! {
    /// Operator symbols, `**` included as an alias of `^`
    pub static ref OPERATORS: HashMap<&'static str, Op> = {
        let mut map = HashMap::<&'static str, Op>::new();
        map.insert("+", Op::Plus);
        map.insert("-", Op::Minus);
        map.insert("*", Op::Mul);
        map.insert("/", Op::Div);
        map.insert("%", Op::Rem);
        map.insert("^", Op::Exp);
        map.insert("**", Op::Exp);
        map.shrink_to_fit();
        map
    };
}

/// Characters accepted by the strict evaluation path, ASCII whitespace aside
const STRICT_CHARSET: &str = "0123456789+-*/.()%^ ";

/// Get the first character of `input` outside of the strict arithmetic
/// character set, if any.
pub fn first_non_arithmetic(input: &str) -> Option<char> {
    input
        .chars()
        .find(|&c| !(c.is_ascii_whitespace() || STRICT_CHARSET.contains(c)))
}

use crate::token::Op;
use std::error;
use std::fmt::{self, Display, Formatter};

/// Error type for the reckon crate
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The strict path met a character outside of the arithmetic set
    InvalidCharacter(char),
    /// Mismatched or misordered parenthesis
    UnbalancedParentheses,
    /// An operand that is not a number
    InvalidToken(String),
    /// An operator with less than two operands available
    InsufficientOperands(Op),
    /// Division with a zero right-hand side
    DivisionByZero,
    /// Remainder with a zero right-hand side
    ModuloByZero,
    /// Evaluation did not end with exactly one value; holds the number of
    /// values left on the stack
    MalformedExpression(usize),
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::InvalidCharacter(c) => write!(fmt, "InvalidCharacter: unexpected {:?}", c),
            Self::UnbalancedParentheses => write!(fmt, "UnbalancedParentheses: mismatched parenthesis"),
            Self::InvalidToken(ref token) => write!(fmt, "InvalidToken: {:?} is not a number", token),
            Self::InsufficientOperands(op) => {
                write!(fmt, "InsufficientOperands: not enough operands for '{}'", op)
            }
            Self::DivisionByZero => write!(fmt, "DivisionByZero: division by zero"),
            Self::ModuloByZero => write!(fmt, "ModuloByZero: modulo by zero"),
            Self::MalformedExpression(0) => write!(fmt, "MalformedExpression: empty expression"),
            Self::MalformedExpression(left) => {
                write!(fmt, "MalformedExpression: {} values left without operator", left)
            }
        }
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::token::Op;
    use test_case::test_case;

    #[test_case(Error::DivisionByZero => "DivisionByZero: division by zero" ; "division")]
    #[test_case(Error::InvalidToken("abc".into()) => "InvalidToken: \"abc\" is not a number" ; "token")]
    #[test_case(Error::InsufficientOperands(Op::Minus) => "InsufficientOperands: not enough operands for '-'" ; "operands")]
    #[test_case(Error::MalformedExpression(0) => "MalformedExpression: empty expression" ; "empty")]
    #[test_case(Error::MalformedExpression(2) => "MalformedExpression: 2 values left without operator" ; "leftovers")]
    fn display(error: Error) -> String {
        error.to_string()
    }
}

use crate::error::Error;
use std::fmt::{self, Display, Formatter};

/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Any operand: number literal or identifier, kept as written
    Value(String),
    /// A binary operator
    Op(Op),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Value(ref value) => write!(fmt, "{}", value),
            Self::Op(op) => write!(fmt, "{}", op),
            Self::LParen => write!(fmt, "("),
            Self::RParen => write!(fmt, ")"),
        }
    }
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`, remainder of the truncated division
    Rem,
    /// `^`, also written `**`
    Exp,
}

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first. Every operator, `^` included, groups left to right, so
    /// an operator of equal precedence is evaluated first too.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div | Self::Rem => 2,
            Self::Exp => 3,
        }
    }

    /// Canonical symbol of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Exp => "^",
        }
    }

    /// Apply the operator to `left` and `right`.
    ///
    /// # Errors
    ///
    /// Division and remainder fail when `right` is zero.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, Error> {
        match self {
            Self::Plus => Ok(left + right),
            Self::Minus => Ok(left - right),
            Self::Mul => Ok(left * right),
            Self::Div if right == 0.0 => Err(Error::DivisionByZero),
            Self::Div => Ok(left / right),
            Self::Rem if right == 0.0 => Err(Error::ModuloByZero),
            Self::Rem => Ok(libm::fmod(left, right)),
            Self::Exp => Ok(libm::pow(left, right)),
        }
    }
}

impl Display for Op {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Op};
    use test_case::test_case;

    #[test_case(Op::Plus, 2.0, 3.0 => Ok(5.0) ; "addition")]
    #[test_case(Op::Minus, 2.0, 3.0 => Ok(-1.0) ; "subtraction keeps operand order")]
    #[test_case(Op::Div, 3.0, 2.0 => Ok(1.5) ; "division keeps operand order")]
    #[test_case(Op::Rem, 10.0, 3.0 => Ok(1.0) ; "remainder")]
    #[test_case(Op::Rem, -7.0, 3.0 => Ok(-1.0) ; "remainder takes the sign of the dividend")]
    #[test_case(Op::Exp, 2.0, 10.0 => Ok(1024.0) ; "power")]
    #[test_case(Op::Div, 5.0, 0.0 => Err(Error::DivisionByZero) ; "division by zero")]
    #[test_case(Op::Rem, 10.0, 0.0 => Err(Error::ModuloByZero) ; "remainder by zero")]
    fn apply(op: Op, left: f64, right: f64) -> Result<f64, Error> {
        op.apply(left, right)
    }

    #[test]
    fn precedence_order() {
        assert!(Op::Exp.precedence() > Op::Mul.precedence());
        assert_eq!(Op::Mul.precedence(), Op::Div.precedence());
        assert_eq!(Op::Div.precedence(), Op::Rem.precedence());
        assert!(Op::Rem.precedence() > Op::Plus.precedence());
        assert_eq!(Op::Plus.precedence(), Op::Minus.precedence());
    }
}

use crate::lexer::{is_variable, Lexer};
use crate::token::Token;
use crate::util::first_non_arithmetic;
use crate::Error;
use std::fmt::{self, Display, Formatter};

/// Evaluate a single expression from `input`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed. Input that does not pass the
/// strict character check of [`eval_strict`](fn.eval_strict.html) goes through
/// the same pipeline anyway, so `Error::InvalidCharacter` never comes out of
/// this function.
///
/// # Example
///
/// ```
/// # use reckon::{eval, Error};
///
/// assert_eq!(eval("45 - 2^3"), Ok(37.0));
/// assert_eq!(eval("(2+3)*4"), Ok(20.0));
/// assert_eq!(eval("5/0"), Err(Error::DivisionByZero));
/// assert_eq!(eval("2 + abc"), Err(Error::InvalidToken("abc".into())));
/// ```
pub fn eval(input: &str) -> Result<f64, Error> {
    match eval_strict(input) {
        Err(Error::InvalidCharacter(_)) => Expr::parse(input).and_then(|expr| expr.eval()),
        result => result,
    }
}

/// Evaluate `input` only if it is made of digits, `.`, operators,
/// parenthesis and whitespace.
///
/// # Example
///
/// ```
/// # use reckon::{eval_strict, Error};
///
/// assert_eq!(eval_strict("10 % 3"), Ok(1.0));
/// assert_eq!(eval_strict("x + 1"), Err(Error::InvalidCharacter('x')));
/// ```
pub fn eval_strict(input: &str) -> Result<f64, Error> {
    if let Some(c) = first_non_arithmetic(input) {
        return Err(Error::InvalidCharacter(c));
    }
    Expr::parse(input).and_then(|expr| expr.eval())
}

/// A parsed mathematical expression, stored in reverse polish notation.
///
/// # Examples
/// ```
/// # use reckon::{Expr};
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.to_string(), "3 5 2 * +");
/// assert_eq!(expr.eval(), Ok(13.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    postfix: Vec<Token>,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// Only parenthesis are checked here, operands are checked by
    /// [`Expr::eval`](struct.Expr.html#method.eval).
    ///
    /// # Examples
    /// ```
    /// # use reckon::{Expr, Error};
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2").is_ok());
    /// // an invalid expression
    /// assert_eq!(Expr::parse("(3 + 5 * 2"), Err(Error::UnbalancedParentheses));
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let postfix = Lexer::new(expression).parse()?;
        Ok(Self { postfix })
    }

    /// Evaluate the expression with an operand stack.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reckon::{Expr, Error};
    /// assert_eq!(Expr::parse("20 / 4 / 2").unwrap().eval(), Ok(2.5));
    /// assert_eq!(Expr::parse("2 3").unwrap().eval(), Err(Error::MalformedExpression(2)));
    /// ```
    pub fn eval(&self) -> Result<f64, Error> {
        let mut stack: Vec<f64> = Vec::with_capacity(self.postfix.len());
        for token in &self.postfix {
            match *token {
                Token::Value(ref value) => stack.push(parse_number(value)?),
                Token::Op(op) => {
                    if stack.len() < 2 {
                        return Err(Error::InsufficientOperands(op));
                    }
                    let right = stack.pop().unwrap_or_default();
                    let left = stack.pop().unwrap_or_default();
                    stack.push(op.apply(left, right)?);
                }
                // the shunting-yard step never outputs parenthesis
                Token::LParen | Token::RParen => return Err(Error::UnbalancedParentheses),
            }
        }

        match stack.as_slice() {
            [result] => Ok(*result),
            values => Err(Error::MalformedExpression(values.len())),
        }
    }

    /// Get the tokens of the expression, in reverse polish notation
    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    /// Get the identifiers used by the expression, in order of first
    /// appearance.
    ///
    /// # Examples
    /// ```
    /// # use reckon::{Expr};
    /// let expr = Expr::parse("3 + 5 * 2").unwrap();
    /// assert!(expr.identifiers().is_empty());
    ///
    /// let expr = Expr::parse("(b + a) * b").unwrap();
    /// assert_eq!(expr.identifiers(), vec!["b", "a"]);
    /// ```
    pub fn identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = Vec::new();
        for token in &self.postfix {
            if let Token::Value(ref name) = *token {
                if is_variable(name) && !identifiers.contains(&name.as_str()) {
                    identifiers.push(name);
                }
            }
        }
        identifiers
    }
}

impl Display for Expr {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        let mut tokens = self.postfix.iter();
        if let Some(first) = tokens.next() {
            write!(fmt, "{}", first)?;
        }
        for token in tokens {
            write!(fmt, " {}", token)?;
        }
        Ok(())
    }
}

/// Parse a numeric operand. Words such as `inf` or `NaN` are not numbers
/// here, even if `f64::from_str` accepts them.
fn parse_number(value: &str) -> Result<f64, Error> {
    let numeric = value
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_digit() || c == '.');
    if numeric {
        if let Ok(number) = value.parse() {
            return Ok(number);
        }
    }
    Err(Error::InvalidToken(value.into()))
}

#[cfg(test)]
mod tests {
    use super::{eval, eval_strict, parse_number, Expr};
    use crate::token::Op;
    use crate::Error;
    use test_case::test_case;

    #[test_case("2+3" => Ok(5.0) ; "addition")]
    #[test_case("10-7" => Ok(3.0) ; "subtraction")]
    #[test_case("4*5" => Ok(20.0) ; "multiplication")]
    #[test_case("15/3" => Ok(5.0) ; "division")]
    #[test_case("2^3" => Ok(8.0) ; "power")]
    #[test_case("2**3" => Ok(8.0) ; "double star power")]
    #[test_case("10%3" => Ok(1.0) ; "modulo")]
    #[test_case("3.5+2.5" => Ok(6.0) ; "floating point")]
    #[test_case("2+3*4" => Ok(14.0) ; "product first")]
    #[test_case("10-2*3" => Ok(4.0) ; "product before subtraction")]
    #[test_case("20/4+3" => Ok(8.0) ; "division first")]
    #[test_case("2^3*2" => Ok(16.0) ; "power first")]
    #[test_case("2*3^2" => Ok(18.0) ; "power before product")]
    #[test_case("7-4%3" => Ok(6.0) ; "modulo before subtraction")]
    #[test_case("(2+3)*4" => Ok(20.0) ; "parenthesis first")]
    #[test_case("2*(3+4)" => Ok(14.0) ; "parenthesis last")]
    #[test_case("((2))*((3+4))" => Ok(14.0) ; "nested parenthesis")]
    #[test_case("10-2-3" => Ok(5.0) ; "subtraction left to right")]
    #[test_case("20/4/2" => Ok(2.5) ; "division left to right")]
    #[test_case("2^3^2" => Ok(64.0) ; "power left to right")]
    #[test_case("(10+5)*2-3/3+2^3" => Ok(37.0) ; "mixed")]
    #[test_case(" 1 +\t2\n" => Ok(3.0) ; "whitespace")]
    #[test_case("1.5e3 + 1" => Ok(1501.0) ; "scientific literal")]
    fn evaluate(input: &str) -> Result<f64, Error> {
        eval(input)
    }

    #[test_case("5/0" => Err(Error::DivisionByZero) ; "division by zero")]
    #[test_case("10%0" => Err(Error::ModuloByZero) ; "modulo by zero")]
    #[test_case("5/(2-2)" => Err(Error::DivisionByZero) ; "computed zero")]
    #[test_case("(2+3" => Err(Error::UnbalancedParentheses) ; "unclosed parenthesis")]
    #[test_case("2+3)" => Err(Error::UnbalancedParentheses) ; "unopened parenthesis")]
    #[test_case("()" => Err(Error::MalformedExpression(0)) ; "empty parenthesis")]
    #[test_case("" => Err(Error::MalformedExpression(0)) ; "empty input")]
    #[test_case("2 3" => Err(Error::MalformedExpression(2)) ; "missing operator")]
    #[test_case("2 + abc" => Err(Error::InvalidToken("abc".into())) ; "unresolved identifier")]
    #[test_case("inf * 2" => Err(Error::InvalidToken("inf".into())) ; "inf is a word")]
    #[test_case("2 +" => Err(Error::InsufficientOperands(Op::Plus)) ; "missing operand")]
    #[test_case("-5+3" => Err(Error::InsufficientOperands(Op::Minus)) ; "no unary minus")]
    #[test_case("2 $ 3" => Err(Error::MalformedExpression(2)) ; "unknown characters are skipped")]
    fn failures(input: &str) -> Result<f64, Error> {
        eval(input)
    }

    #[test]
    fn strict_path() {
        assert_eq!(eval_strict("2+3*4"), Ok(14.0));
        assert_eq!(eval_strict("(2+3"), Err(Error::UnbalancedParentheses));
        assert_eq!(eval_strict("2*x"), Err(Error::InvalidCharacter('x')));
        assert_eq!(eval_strict("1e3"), Err(Error::InvalidCharacter('e')));
        // the general path takes over
        assert_eq!(eval("1e3"), Ok(1000.0));
        assert_eq!(eval("2*x"), Err(Error::InvalidToken("x".into())));
    }

    #[test]
    fn very_small_numbers() {
        let result = eval("0.0000001*0.000000000001").unwrap();
        let expected = 0.000_000_1 * 0.000_000_000_001;
        assert!((result - expected).abs() < 1e-30);
    }

    #[test]
    fn reuse() {
        let expr = Expr::parse("(10+5)*2-3/3+2^3").unwrap();
        assert_eq!(expr.to_string(), "10 5 + 2 * 3 3 / - 2 3 ^ +");
        assert_eq!(expr.eval(), Ok(37.0));
        assert_eq!(expr.eval(), Ok(37.0));
        assert_eq!(expr.postfix().len(), 13);
    }

    #[test]
    fn identifiers() {
        let expr = Expr::parse("x * 2 + y_1 - x").unwrap();
        assert_eq!(expr.identifiers(), vec!["x", "y_1"]);
        assert_eq!(expr.eval(), Err(Error::InvalidToken("x".into())));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number("3."), Ok(3.0));
        assert_eq!(parse_number("0.25"), Ok(0.25));
        assert_eq!(parse_number("2e-3"), Ok(0.002));
        assert_eq!(parse_number("NaN"), Err(Error::InvalidToken("NaN".into())));
    }
}

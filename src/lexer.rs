use crate::error::Error;
use crate::token::{Op, Token};
use crate::util::OPERATORS;
use std::iter::Peekable;
use std::str::Chars;

#[must_use]
/// Check if `ident` is a valid variable name
///
/// # Examples
///
/// ```
/// # use reckon::is_variable;
///
/// assert_eq!(is_variable("__abc3"), true);
/// assert_eq!(is_variable("34zb"), false);
/// assert_eq!(is_variable("a.b"), false);
/// ```
pub fn is_variable(ident: &str) -> bool {
    let mut chars = ident.chars();
    // Check first char
    if !chars.next().map_or(false, is_variable_start) {
        return false;
    }
    // Check all others
    for c in chars {
        if !is_variable_part(c) {
            return false;
        }
    }
    return true;
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

/// Entries of the operator stack. Values never go there.
#[derive(Debug, Clone, Copy)]
enum Stacked {
    Op(Op),
    LParen,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `string`
    pub fn new(string: &str) -> Lexer {
        Lexer {
            input: string.chars().peekable(),
        }
    }

    /// Split the whole input into tokens, in source order.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Tokenize the input and reorder it in reverse polish notation.
    pub fn parse(&mut self) -> Result<Vec<Token>, Error> {
        to_postfix(self.tokenize())
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            let c = self.input.next()?;
            let token = match c {
                c if c.is_ascii_digit() => Token::Value(self.number(c)),
                c if is_variable_start(c) => {
                    let mut ident = String::new();
                    ident.push(c);
                    self.take_while_into(&mut ident, is_variable_part);
                    Token::Value(ident)
                }
                '(' => Token::LParen,
                ')' => Token::RParen,
                '*' if self.input.peek() == Some(&'*') => {
                    self.input.next();
                    Token::Op(Op::Exp)
                }
                c => {
                    let mut buffer = [0; 4];
                    match OPERATORS.get(&*c.encode_utf8(&mut buffer)) {
                        Some(&op) => Token::Op(op),
                        // Outside of the pattern set: skipped
                        None => continue,
                    }
                }
            };
            return Some(token);
        }
    }

    /// Read the rest of a number literal starting with `first`
    fn number(&mut self, first: char) -> String {
        let mut literal = String::new();
        literal.push(first);
        self.take_while_into(&mut literal, |c| c.is_ascii_digit());
        if self.input.peek() == Some(&'.') {
            self.input.next();
            literal.push('.');
            self.take_while_into(&mut literal, |c| c.is_ascii_digit());
        }

        // Exponent suffix, only when digits follow
        let mut ahead = self.input.clone();
        let mut suffix = String::new();
        if let Some(e) = ahead.next().filter(|&c| c == 'e' || c == 'E') {
            suffix.push(e);
            if let Some(sign) = ahead.peek().copied().filter(|&c| c == '+' || c == '-') {
                ahead.next();
                suffix.push(sign);
            }
            let mut digits = 0;
            while let Some(&c) = ahead.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                ahead.next();
                suffix.push(c);
                digits += 1;
            }
            if digits > 0 {
                self.input = ahead;
                literal.push_str(&suffix);
            }
        }
        literal
    }

    fn take_while_into(&mut self, buffer: &mut String, accept: impl Fn(char) -> bool) {
        while let Some(&c) = self.input.peek() {
            if accept(c) {
                self.input.next();
                buffer.push(c);
            } else {
                break;
            }
        }
    }
}

/// Reorder infix `tokens` in reverse polish notation with the shunting-yard
/// algorithm.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, Error> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators = Vec::new();

    'tokens: for token in tokens {
        match token {
            Token::Value(_) => output.push(token),
            Token::Op(o1) => {
                // All operators are left associative: equal precedence pops too
                while let Some(&Stacked::Op(o2)) = operators.last() {
                    if o2.precedence() < o1.precedence() {
                        break;
                    }
                    operators.pop();
                    output.push(Token::Op(o2));
                }
                operators.push(Stacked::Op(o1));
            }
            Token::LParen => operators.push(Stacked::LParen),
            Token::RParen => {
                while let Some(stacked) = operators.pop() {
                    match stacked {
                        Stacked::LParen => continue 'tokens,
                        Stacked::Op(op) => output.push(Token::Op(op)),
                    }
                }
                return Err(Error::UnbalancedParentheses);
            }
        }
    }

    while let Some(stacked) = operators.pop() {
        match stacked {
            Stacked::LParen => return Err(Error::UnbalancedParentheses),
            Stacked::Op(op) => output.push(Token::Op(op)),
        }
    }
    Ok(output)
}

/// Check if `c` can appear at the first character of a variable
pub(crate) fn is_variable_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Check if `c` can appear inside a variable
pub(crate) fn is_variable_part(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

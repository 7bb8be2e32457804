#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::non_ascii_literal
)]

//! Reckon, a crate for interactive evaluation of mathematical expressions
//! with stored variables.
//!
//! The easiest way to use this crate is with the [`eval`](fn.eval.html)
//! function:
//!
//! ```
//! assert_eq!(reckon::eval("3 + 5 * 2"), Ok(13.0));
//! ```
//!
//! Variables are resolved before evaluation by
//! [`substitute`](fn.substitute.html), which rewrites every standalone
//! variable name with its value taken from any [`Lookup`](trait.Lookup.html),
//! a `HashMap<String, Value>` for example:
//!
//! ```
//! use std::collections::HashMap;
//! use reckon::{eval, substitute, Value};
//!
//! let mut variables: HashMap<String, Value> = HashMap::new();
//! variables.insert("a".into(), Value::Number(3.5));
//! let expression = substitute("2 * a", &variables);
//! assert_eq!(expression, "2 * 3.5");
//! assert_eq!(eval(&expression), Ok(7.0));
//! ```
//!
//! It is also possible to separate the parsing from the evaluation of an
//! expression with the [`Expr`](struct.Expr.html) type.
//!
//! ```
//! use reckon::Expr;
//!
//! let expr = Expr::parse("3 + 5 * 2").unwrap();
//! assert_eq!(expr.eval(), Ok(13.0));
//! ```
//!
//! The [`Interpreter`](struct.Interpreter.html) puts everything together
//! for line-oriented sessions: it sorts each input into assignments,
//! expressions, history and variable listings, or free-form text.
//!
//! # Language definition
//!
//! The language implemented by reckon can contain the following elements:
//!
//! - unsigned float literal values: `12.456`, `3.`, `45e-6`, ...;
//! - left and right parenthesis;
//! - mathematical operators: `+` for addition, `-` for subtraction,
//!   `*` for multiplication, `/` for division, `%` for the remainder of the
//!   truncated division and `^` or `**` for exponentiation;
//! - variables, replaced by their value before evaluation. Variables names
//!   are ASCII only, start by a letter or `_`, contain letters, digits or `_`,
//!   and can be wrapped in braces: `{rate}`.
//!
//! Other characters are skipped. Any operand that is not a number once
//! variables have been replaced is an error.
//!
//! All operators are left associative: `2^3^2` is `64`. `^` binds tighter
//! than `*`, `/` and `%`, which bind tighter than `+` and `-`. There is no
//! unary minus: `-5 + 3` is an error.
//!
//! # Technical details
//!
//! reckon uses the shunting-yard algorithm to rewrite expressions in reverse
//! polish notation, evaluated with a stack of `f64`.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod config;
mod error;
mod expr;
mod history;
mod interpreter;
mod lexer;
mod substitute;
mod token;
mod util;
mod value;
mod variables;

pub use config::Config;
pub use error::Error;
pub use expr::{eval, eval_strict, Expr};
pub use history::{History, HistoryEntry};
pub use interpreter::{Command, ExecError, FreeFormHandler, Interpreter, Outcome, RejectFreeForm};
pub use lexer::{is_variable, Lexer};
pub use substitute::substitute;
pub use token::{Op, Token};
pub use util::OPERATORS;
pub use value::{format_number, Lookup, Value};
pub use variables::VariableStore;

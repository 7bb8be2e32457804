use crate::config::Config;
use crate::error::Error;
use crate::expr::Expr;
use crate::history::{History, HistoryEntry};
use crate::lexer::{is_variable, Lexer};
use crate::substitute::substitute;
use crate::token::Token;
use crate::value::{format_number, Value};
use crate::variables::VariableStore;
use regex::Regex;
use std::error;
use std::fmt::{self, Display, Formatter};

const NAME: &str = r"[A-Za-z_][A-Za-z0-9_]*";
const NUMBER: &str = r"[0-9]+(?:\.[0-9]*)?(?:[eE][-+]?[0-9]+)?";

lazy_static! {
    static ref ASSIGNMENT: Regex =
        Regex::new(&format!(r"^\s*({})\s*=\s*(.+?)\s*$", NAME)).expect("invalid assignment regex");
    static ref ARITHMETIC: Regex =
        Regex::new(r"^[0-9\s+\-*/().^%]+$").expect("invalid arithmetic regex");
    static ref OPERATIONS: Regex = {
        let operand = format!(
            r"(?:\(\s*)*(?:{number}|{name}|\{{{name}\}})(?:\s*\))*",
            number = NUMBER,
            name = NAME
        );
        let pattern = format!(
            r"^{operand}(?:\s*(?:\*\*|[-+*/^%])\s*{operand})*$",
            operand = operand
        );
        Regex::new(&pattern).expect("invalid operations regex")
    };
}

/// What an input line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `history`: list the last commands
    History,
    /// `history clear`
    ClearHistory,
    /// `history search <term>`
    SearchHistory(&'a str),
    /// `vars` or `variables`: list the variables
    Variables,
    /// `<name> = <expression>`
    #[allow(missing_docs)]
    Assignment { name: &'a str, expression: &'a str },
    /// An arithmetic expression, possibly using variables
    Expression(&'a str),
    /// Anything else
    FreeForm(&'a str),
}

impl<'a> Command<'a> {
    /// Sort `input` into one of the commands.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reckon::Command;
    /// assert_eq!(Command::classify("(2 + 3) * x"), Command::Expression("(2 + 3) * x"));
    /// assert_eq!(
    ///     Command::classify("total = 100"),
    ///     Command::Assignment { name: "total", expression: "100" }
    /// );
    /// assert_eq!(Command::classify("open youtube"), Command::FreeForm("open youtube"));
    /// ```
    pub fn classify(input: &'a str) -> Self {
        let trimmed = input.trim();
        match trimmed {
            "history" => return Self::History,
            "history clear" => return Self::ClearHistory,
            "vars" | "variables" => return Self::Variables,
            _ => {}
        }
        if let Some(term) = trimmed.strip_prefix("history search") {
            if term.is_empty() || term.starts_with(char::is_whitespace) {
                return Self::SearchHistory(term.trim());
            }
        }

        if let Some(captures) = ASSIGNMENT.captures(trimmed) {
            if let (Some(name), Some(expression)) = (captures.get(1), captures.get(2)) {
                return Self::Assignment {
                    name: name.as_str(),
                    expression: expression.as_str(),
                };
            }
        }

        if trimmed.is_empty() || ARITHMETIC.is_match(trimmed) || OPERATIONS.is_match(trimmed) {
            Self::Expression(trimmed)
        } else {
            Self::FreeForm(trimmed)
        }
    }
}

/// Receives the input that is not a calculator command
pub trait FreeFormHandler {
    /// Answer `input`, or explain why it can not be answered
    fn handle(&mut self, input: &str) -> Result<String, String>;
}

/// Refuses every free-form input
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectFreeForm;

impl FreeFormHandler for RejectFreeForm {
    fn handle(&mut self, input: &str) -> Result<String, String> {
        Err(format!("'{}' is not an expression nor an assignment", input))
    }
}

impl<F> FreeFormHandler for F
where
    F: FnMut(&str) -> Result<String, String>,
{
    fn handle(&mut self, input: &str) -> Result<String, String> {
        self(input)
    }
}

/// Result of a successful command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Value of an expression
    Number(f64),
    /// A variable was set
    Assigned {
        /// Name of the variable
        name: String,
        /// Its new value
        value: Value,
    },
    /// Entries listed or found in the history
    History(Vec<HistoryEntry>),
    /// Number of entries removed from the history
    HistoryCleared(usize),
    /// All the variables, sorted by name
    Variables(Vec<(String, Value)>),
    /// Answer of the free-form handler
    Reply(String),
}

impl Display for Outcome {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Number(number) => fmt.write_str(&format_number(number)),
            Self::Assigned {
                ref name,
                ref value,
            } => write!(fmt, "{} = {}", name, value),
            Self::History(ref entries) if entries.is_empty() => write!(fmt, "no command history"),
            Self::History(ref entries) => {
                let lines: Vec<String> = entries.iter().map(ToString::to_string).collect();
                fmt.write_str(&lines.join("\n"))
            }
            Self::HistoryCleared(count) => write!(fmt, "history cleared ({} entries)", count),
            Self::Variables(ref variables) if variables.is_empty() => {
                write!(fmt, "no variables defined")
            }
            Self::Variables(ref variables) => {
                let lines: Vec<String> = variables
                    .iter()
                    .map(|(name, value)| format!("{} = {} ({})", name, value, value.kind()))
                    .collect();
                fmt.write_str(&lines.join("\n"))
            }
            Self::Reply(ref reply) => fmt.write_str(reply),
        }
    }
}

/// Error type of [`Interpreter::execute`](struct.Interpreter.html#method.execute)
#[derive(Debug, Clone, PartialEq)]
pub enum ExecError {
    /// The expression could not be evaluated
    Eval(Error),
    /// A name of the expression that is not a variable
    UndefinedVariable(String),
    /// The free-form handler could not answer
    FreeForm(String),
}

impl From<Error> for ExecError {
    fn from(error: Error) -> Self {
        Self::Eval(error)
    }
}

impl Display for ExecError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Eval(ref error) => write!(fmt, "{}", error),
            Self::UndefinedVariable(ref name) => {
                write!(fmt, "NameError: name '{}' is not defined", name)
            }
            Self::FreeForm(ref message) => write!(fmt, "{}", message),
        }
    }
}

impl error::Error for ExecError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::Eval(ref error) => Some(error),
            Self::UndefinedVariable(_) | Self::FreeForm(_) => None,
        }
    }
}

/// Interactive calculator session: variables, history and command dispatch.
///
/// # Examples
///
/// ```
/// # use reckon::{Config, Interpreter, Outcome, Value};
/// let mut interpreter = Interpreter::new(Config::default());
/// interpreter.execute("total = 100").unwrap();
/// interpreter.execute("discount = total * 0.1").unwrap();
///
/// assert_eq!(interpreter.execute("total - discount"), Ok(Outcome::Number(90.0)));
/// assert_eq!(interpreter.variables().get("discount"), Some(&Value::Number(10.0)));
/// ```
#[derive(Debug)]
pub struct Interpreter<H = RejectFreeForm> {
    config: Config,
    variables: VariableStore,
    history: History,
    free_form: H,
}

impl Interpreter<RejectFreeForm> {
    /// Create an interpreter refusing free-form input
    pub fn new(config: Config) -> Self {
        Self::with_free_form(config, RejectFreeForm)
    }
}

impl<H: FreeFormHandler> Interpreter<H> {
    /// Create an interpreter sending free-form input to `free_form`
    pub fn with_free_form(config: Config, free_form: H) -> Self {
        Self {
            history: History::new(config.max_history),
            variables: VariableStore::new(),
            free_form,
            config,
        }
    }

    /// Run one input line.
    ///
    /// # Errors
    ///
    /// Fails when an expression can not be evaluated, when it uses an
    /// undefined variable, or when the free-form handler refuses the input.
    /// A failed assignment leaves the variables unchanged.
    ///
    /// Assignments and expressions are recorded in the history with their
    /// result or error message once they are done.
    pub fn execute(&mut self, input: &str) -> Result<Outcome, ExecError> {
        let command = Command::classify(input);
        debug!("{:?}", command);

        let outcome = self.dispatch(command);
        if let Command::Assignment { .. } | Command::Expression(_) = command {
            let result = match outcome {
                Ok(ref outcome) => outcome.to_string(),
                Err(ref error) => error.to_string(),
            };
            self.history.push(input.trim(), result);
        }
        outcome
    }

    fn dispatch(&mut self, command: Command) -> Result<Outcome, ExecError> {
        match command {
            Command::History => Ok(Outcome::History(
                self.history.recent(self.config.shown_history),
            )),
            Command::SearchHistory(term) => Ok(Outcome::History(self.history.search(term))),
            Command::ClearHistory => Ok(Outcome::HistoryCleared(self.history.clear())),
            Command::Variables => Ok(Outcome::Variables(self.variables.snapshot())),
            Command::Assignment { name, expression } => {
                let value = self.assigned_value(expression)?;
                debug!("{} = {}", name, value);
                self.variables.set(name, value.clone());
                Ok(Outcome::Assigned {
                    name: name.to_owned(),
                    value,
                })
            }
            Command::Expression(expression) => self.evaluate(expression).map(Outcome::Number),
            Command::FreeForm(text) => self
                .free_form
                .handle(text)
                .map(Outcome::Reply)
                .map_err(ExecError::FreeForm),
        }
    }

    /// Substitute the variables in `expression` and evaluate it.
    ///
    /// # Errors
    ///
    /// A name of `expression` missing from the variables gives
    /// `ExecError::UndefinedVariable`, other failures come from the evaluator.
    /// A text variable is substituted as it is, so a word in it fails as an
    /// `InvalidToken`.
    pub fn evaluate(&self, expression: &str) -> Result<f64, ExecError> {
        let substituted = substitute(expression, &self.variables);
        trace!("'{}' substituted as '{}'", expression, substituted);

        let expr = Expr::parse(&substituted)?;
        if let Some(name) = self.undefined_name(expression) {
            warn!("undefined variable '{}' in '{}'", name, expression);
            return Err(ExecError::UndefinedVariable(name));
        }
        Ok(expr.eval()?)
    }

    /// First name written in `expression` that is not a variable
    fn undefined_name(&self, expression: &str) -> Option<String> {
        Lexer::new(expression)
            .tokenize()
            .into_iter()
            .find_map(|token| match token {
                Token::Value(name) if is_variable(&name) && self.variables.get(&name).is_none() => {
                    Some(name)
                }
                _ => None,
            })
    }

    /// A double-quoted right-hand side is stored as text, anything else is
    /// evaluated
    fn assigned_value(&self, expression: &str) -> Result<Value, ExecError> {
        if expression.len() >= 2 && expression.starts_with('"') && expression.ends_with('"') {
            return Ok(Value::Text(expression[1..expression.len() - 1].to_owned()));
        }
        self.evaluate(expression).map(Value::Number)
    }

    /// Variables of the session
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Variables of the session, to set or remove them directly
    pub fn variables_mut(&mut self) -> &mut VariableStore {
        &mut self.variables
    }

    /// Commands run so far
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Settings the interpreter was created with
    pub fn config(&self) -> &Config {
        &self.config
    }
}

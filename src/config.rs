/// Settings of an [`Interpreter`](struct.Interpreter.html)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of commands kept in the history
    pub max_history: usize,
    /// Number of commands listed by the `history` command
    pub shown_history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_history: 100,
            shown_history: 10,
        }
    }
}

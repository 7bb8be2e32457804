use std::io::{self, BufRead, Write};
use std::process;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use reckon::{Config, Interpreter};

const HELP: &str = "\
arithmetic     (5 + 3) * 2, 2 ** 10, 10 % 3
variables      total = 100, discount = total * 0.1, name = \"Ivan\"
               {total} reads the variable total too
commands       history, history search <term>, history clear, vars
q, exit        quit";

/// reckon is an interactive calculator with stored variables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate this expression and exit instead of starting a session.
    #[arg(short, long)]
    eval: Option<String>,

    /// Number of commands kept in the history.
    #[arg(long, env = "RECKON_MAX_HISTORY", default_value_t = 100)]
    max_history: usize,

    /// Number of commands listed by `history`.
    #[arg(long, default_value_t = 10)]
    shown_history: usize,

    /// Log level, `RUST_LOG` directives are applied on top of it.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logger(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.into())
        .parse_default_env()
        .init();
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level);

    let config = Config {
        max_history: args.max_history,
        shown_history: args.shown_history,
    };
    log::debug!("{:?}", config);
    let mut interpreter = Interpreter::new(config);

    if let Some(expression) = args.eval {
        match interpreter.execute(&expression) {
            Ok(outcome) => println!("{}", outcome),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = repl(&mut interpreter) {
        eprintln!("Failed to read the input: {}", e);
        process::exit(1);
    }
}

fn repl(interpreter: &mut Interpreter) -> io::Result<()> {
    println!("reckon {}, 'help' for the commands, 'q' to quit", env!("CARGO_PKG_VERSION"));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match line.trim() {
            "" => continue,
            "q" | "exit" | "quit" => break,
            "help" => println!("{}", HELP),
            input => match interpreter.execute(input) {
                Ok(outcome) => println!("{}", outcome),
                Err(e) => println!("error: {}", e),
            },
        }
    }
    Ok(())
}

use std::cell::RefCell;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// Destination for the installer's leveled progress messages.
pub trait Logger {
    fn log(&self, level: LogLevel, message: &str);
}

/// Prints messages indented and colored by level: info to stdout, warnings and
/// errors to stderr.
///
/// In quiet mode informational lines are dropped; warnings and errors always print.
#[derive(Debug, Default)]
pub struct ConsoleLogger {
    pub quiet: bool,
}

impl ConsoleLogger {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => {
                if !self.quiet {
                    println!("    {}", message.green());
                }
            }
            LogLevel::Warning => eprintln!("    {}", message.yellow()),
            LogLevel::Error => eprintln!("    {}", message.red()),
        }
    }
}

/// Keeps every message in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: RefCell<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.borrow().clone()
    }

    /// Messages logged at `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

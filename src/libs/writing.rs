use std::io::{self, Write};

pub mod cc {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_RED: &str = "\x1b[91m";
}

pub const RULE_WIDTH: usize = 60;

/// Timestamped progress line on stderr. Used by the `log!` macro.
pub fn stamp_line(color: &str, args: std::fmt::Arguments<'_>) {
    let time = chrono::Utc::now().format("%H:%M:%S%.3f");
    let mut stderr = io::stderr().lock();
    let _ = writeln!(
        stderr,
        "{}{} | {}{}{}{}",
        cc::LIGHT_GRAY,
        time,
        cc::RESET,
        color,
        args,
        cc::RESET
    );
}

#[macro_export]
macro_rules! log {
    // log!("plain {}", x);
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::libs::writing::stamp_line(
            $crate::libs::writing::cc::LIGHT_GRAY,
            format_args!($fmt $(, $arg)*),
        )
    };
    // log!(cc::GREEN, "probe {} done", name);
    ($color:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::libs::writing::stamp_line($color, format_args!($fmt $(, $arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::libs::writing::stamp_line(
            $crate::libs::writing::cc::ORANGE,
            format_args!($($arg)*),
        )
    };
}

/// Report sink for probe diagnostics. Stdout in the binary, a buffer in
/// tests. Write errors are swallowed: a broken pipe must not turn into a
/// failed probe.
pub struct Printer<W: Write> {
    out: W,
    color: bool,
}

impl Printer<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    pub fn cprint(&mut self, text: &str, color: &str) {
        if self.color {
            let _ = writeln!(self.out, "{color}{text}{}", cc::RESET);
        } else {
            self.line(text);
        }
    }

    pub fn err_print(&mut self, text: &str) {
        self.cprint(text, cc::RED);
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    pub fn rule(&mut self) {
        self.line(&"=".repeat(RULE_WIDTH));
    }

    /// Blank line, rule, bold title, rule.
    pub fn banner(&mut self, title: &str) {
        self.blank();
        self.rule();
        self.cprint(title, cc::BOLD);
        self.rule();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

//! Command definitions
//!
//! A command is a verb, positional arguments in call order, and
//! `name=value` option tokens appended after them.

use std::fmt;

/// Number of characters of a command echoed back in protocol errors
pub const MAX_COMMAND_ECHO: usize = 100;

/// Command verbs understood by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    List,
    Drop,
    Close,
    Clear,
    Check,
    Multi,
    Set,
    Bulk,
    Info,
    Flush,
}

impl Verb {
    /// Wire spelling of the verb
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::List => "list",
            Verb::Drop => "drop",
            Verb::Close => "close",
            Verb::Clear => "clear",
            Verb::Check => "c",
            Verb::Multi => "m",
            Verb::Set => "s",
            Verb::Bulk => "b",
            Verb::Info => "info",
            Verb::Flush => "flush",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command ready to be encoded
///
/// Arguments and option values are written verbatim. Callers must not pass
/// values containing whitespace or line terminators.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    verb: Verb,
    args: Vec<String>,
    options: Vec<(String, String)>,
}

impl Command {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            args: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a positional argument if present; absent arguments leave no gap
    pub fn opt_arg<S: Into<String>>(mut self, arg: Option<S>) -> Self {
        if let Some(arg) = arg {
            self.args.push(arg.into());
        }
        self
    }

    /// Append several positional arguments in iteration order
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_string()));
        self
    }

    /// Append a `name=value` option token
    pub fn option(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.options.push((name.into(), value.to_string()));
        self
    }

    /// Append every option set on `options`
    pub fn options(mut self, options: &CreateOptions) -> Self {
        self.options.extend(options.tokens());
        self
    }

    /// Encode into a single wire line (without the terminator)
    pub fn encode(&self) -> String {
        let mut line = String::from(self.verb.as_str());
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        for (name, value) in &self.options {
            line.push(' ');
            line.push_str(name);
            line.push('=');
            line.push_str(value);
        }
        line
    }

    /// First characters of the encoded command, for diagnostics
    pub fn echo(&self) -> String {
        self.encode().chars().take(MAX_COMMAND_ECHO).collect()
    }
}

/// Options accepted by `create`
///
/// Only fields that were explicitly set are sent. Typed fields are emitted
/// first (capacity, prob, in_memory), followed by `extra` in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    /// Initial capacity of the filter
    pub capacity: Option<u64>,

    /// Target false-positive probability
    pub prob: Option<f64>,

    /// Keep the filter in memory only
    pub in_memory: Option<bool>,

    /// Options without a typed field, passed through as-is
    pub extra: Vec<(String, String)>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn prob(mut self, prob: f64) -> Self {
        self.prob = Some(prob);
        self
    }

    pub fn in_memory(mut self, in_memory: bool) -> Self {
        self.in_memory = Some(in_memory);
        self
    }

    pub fn extra(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.extra.push((name.into(), value.to_string()));
        self
    }

    /// Render to `(name, value)` pairs in wire order
    pub fn tokens(&self) -> Vec<(String, String)> {
        let mut tokens = Vec::with_capacity(3 + self.extra.len());
        if let Some(capacity) = self.capacity {
            tokens.push(("capacity".to_string(), capacity.to_string()));
        }
        if let Some(prob) = self.prob {
            tokens.push(("prob".to_string(), prob.to_string()));
        }
        if let Some(in_memory) = self.in_memory {
            let flag = if in_memory { "1" } else { "0" };
            tokens.push(("in_memory".to_string(), flag.to_string()));
        }
        tokens.extend(self.extra.iter().cloned());
        tokens
    }
}

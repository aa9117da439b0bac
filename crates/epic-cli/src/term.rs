//! The terminal the operator talks to.
//!
//! Everything interactive goes through [`Terminal`] so command flows can be
//! driven by a script in tests.

use std::io::{self, BufRead as _, Write as _};

use colored::Colorize as _;
use tabled::{builder::Builder, settings::Style};

/// Styling class of a one-line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
  Title,
  Info,
  Success,
  Error,
}

pub trait Terminal {
  /// Show `label` and read one line, without its line terminator.
  /// End of input is an [`io::ErrorKind::UnexpectedEof`] error.
  fn prompt(&mut self, label: &str) -> io::Result<String>;

  fn render_table(&mut self, title: Option<&str>, headers: &[&str], rows: &[Vec<String>]);

  fn notify(&mut self, kind: Notice, message: &str);
}

// ─── StdTerminal ─────────────────────────────────────────────────────────────

/// Stdin/stdout terminal with coloured output and box-drawn tables.
#[derive(Default)]
pub struct StdTerminal;

impl StdTerminal {
  pub fn new() -> Self { Self }
}

impl Terminal for StdTerminal {
  fn prompt(&mut self, label: &str) -> io::Result<String> {
    let mut out = io::stdout().lock();
    write!(out, "     {}: ", label.bold())?;
    out.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
      return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_owned())
  }

  fn render_table(&mut self, title: Option<&str>, headers: &[&str], rows: &[Vec<String>]) {
    let mut builder = Builder::default();
    if !headers.is_empty() {
      builder.push_record(headers.iter().map(|h| h.to_string()));
    }
    for row in rows {
      builder.push_record(row.iter().cloned());
    }
    let mut table = builder.build();
    table.with(Style::rounded());

    println!();
    if let Some(title) = title {
      println!("   {}", title.bold().blue());
    }
    for line in table.to_string().lines() {
      println!("   {line}");
    }
    println!();
  }

  fn notify(&mut self, kind: Notice, message: &str) {
    match kind {
      Notice::Title => println!("\n   {}", message.bold().blue()),
      Notice::Info => println!("  {} {message}", "ℹ".blue()),
      Notice::Success => println!("  {} {}", "✓".green(), message.yellow()),
      Notice::Error => eprintln!("  {} {}", "✗".red(), message.red().bold()),
    }
  }
}

// ─── ScriptedTerminal ────────────────────────────────────────────────────────

/// A table as it was handed to [`Terminal::render_table`].
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RenderedTable {
  pub title:   Option<String>,
  pub headers: Vec<String>,
  pub rows:    Vec<Vec<String>>,
}

/// Replays queued answers and records everything shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
  answers:     std::collections::VecDeque<String>,
  pub prompts: Vec<String>,
  pub notices: Vec<(Notice, String)>,
  pub tables:  Vec<RenderedTable>,
}

#[cfg(test)]
impl ScriptedTerminal {
  pub fn new<I, T>(answers: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<String>,
  {
    Self { answers: answers.into_iter().map(Into::into).collect(), ..Default::default() }
  }

  pub fn remaining(&self) -> usize { self.answers.len() }

  pub fn saw(&self, kind: Notice, needle: &str) -> bool {
    self.notices.iter().any(|(k, m)| *k == kind && m.contains(needle))
  }

  pub fn last_table(&self) -> Option<&RenderedTable> { self.tables.last() }
}

#[cfg(test)]
impl Terminal for ScriptedTerminal {
  fn prompt(&mut self, label: &str) -> io::Result<String> {
    self.prompts.push(label.to_owned());
    self
      .answers
      .pop_front()
      .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
  }

  fn render_table(&mut self, title: Option<&str>, headers: &[&str], rows: &[Vec<String>]) {
    self.tables.push(RenderedTable {
      title:   title.map(str::to_owned),
      headers: headers.iter().map(|h| h.to_string()).collect(),
      rows:    rows.to_vec(),
    });
  }

  fn notify(&mut self, kind: Notice, message: &str) {
    self.notices.push((kind, message.to_owned()));
  }
}

//! Eclipse preference files (`<project>/.settings/*.prefs`)
//!
//! These are Java properties files: `key=value` (or `key:value`, or whitespace
//! separated), `#`/`!` comment lines, backslash escapes and `\` line
//! continuations. Keys are kept sorted so rewritten files diff cleanly.

use crate::core::error::{JdtResult, ResultExt};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Marker key Eclipse writes at the top of every preference file
pub const VERSION_KEY: &str = "eclipse.preferences.version";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
  entries: BTreeMap<String, String>,
}

impl Preferences {
  /// Load a preference file; a missing file is an empty preference set.
  pub fn load(path: &Path) -> JdtResult<Self> {
    match fs::read_to_string(path) {
      Ok(content) => Ok(Self::parse(&content)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
      Err(e) => Err(e).with_context(|| format!("Failed to read preferences from {}", path.display())),
    }
  }

  pub fn parse(content: &str) -> Self {
    let mut entries = BTreeMap::new();

    for line in logical_lines(content) {
      let (key, value) = split_key_value(&line);
      entries.insert(unescape(key), unescape(value));
    }

    Self { entries }
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  /// Boolean preference; anything other than `true`/`false` (any case) is ignored.
  pub fn get_bool(&self, key: &str) -> Option<bool> {
    match self.get(key)?.trim().to_ascii_lowercase().as_str() {
      "true" => Some(true),
      "false" => Some(false),
      _ => None,
    }
  }

  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.entries.insert(key.into(), value.into());
  }

  /// Render in Eclipse's layout: version marker first, then sorted keys.
  pub fn render(&self) -> String {
    let mut out = String::new();
    let version = self.get(VERSION_KEY).unwrap_or("1");
    out.push_str(&format!("{}={}\n", VERSION_KEY, escape(version, false)));

    for (key, value) in self.entries.iter().filter(|(k, _)| k.as_str() != VERSION_KEY) {
      out.push_str(&format!("{}={}\n", escape(key, true), escape(value, false)));
    }
    out
  }

  /// Write the file, creating the `.settings` directory when needed.
  pub fn save(&self, path: &Path) -> JdtResult<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, self.render()).with_context(|| format!("Failed to write preferences to {}", path.display()))?;
    Ok(())
  }
}

/// Join continuation lines and drop blanks/comments.
fn logical_lines(content: &str) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current: Option<String> = None;

  for raw in content.lines() {
    let piece = match current {
      // Leading whitespace of a continuation line is not part of the value
      Some(_) => raw.trim_start(),
      None => {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
          continue;
        }
        trimmed
      }
    };

    let continued = ends_with_continuation(piece);
    let piece = if continued { &piece[..piece.len() - 1] } else { piece };
    let buffer = current.get_or_insert_with(String::new);
    buffer.push_str(piece);

    if !continued && let Some(done) = current.take() {
      lines.push(done);
    }
  }

  if let Some(rest) = current {
    lines.push(rest);
  }
  lines
}

/// Odd number of trailing backslashes means the line continues.
fn ends_with_continuation(line: &str) -> bool {
  line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
  let mut escaped = false;
  let mut key_end = line.len();

  for (i, c) in line.char_indices() {
    if escaped {
      escaped = false;
      continue;
    }
    match c {
      '\\' => escaped = true,
      '=' | ':' | ' ' | '\t' | '\u{c}' => {
        key_end = i;
        break;
      }
      _ => {}
    }
  }

  let key = &line[..key_end];
  let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
  if let Some(stripped) = rest.strip_prefix(['=', ':']) {
    rest = stripped.trim_start_matches([' ', '\t', '\u{c}']);
  }
  (key, rest)
}

fn unescape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars();

  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('t') => out.push('\t'),
      Some('n') => out.push('\n'),
      Some('r') => out.push('\r'),
      Some('f') => out.push('\u{c}'),
      Some('u') => {
        let hex: String = chars.by_ref().take(4).collect();
        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
          Some(decoded) => out.push(decoded),
          None => {
            out.push('u');
            out.push_str(&hex);
          }
        }
      }
      Some(other) => out.push(other),
      None => {}
    }
  }
  out
}

fn escape(s: &str, is_key: bool) -> String {
  let mut out = String::with_capacity(s.len());
  for (i, c) in s.chars().enumerate() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '=' | ':' => {
        out.push('\\');
        out.push(c);
      }
      ' ' if is_key || i == 0 => out.push_str("\\ "),
      '#' | '!' if i == 0 => {
        out.push('\\');
        out.push(c);
      }
      _ => out.push(c),
    }
  }
  out
}

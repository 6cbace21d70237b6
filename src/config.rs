//! Reader for the section-delimited `key=value` configs the game writes.
//!
//! Both `startup.ini` (beside the install) and the vendor `BeamNG.Drive.ini`
//! use this format. Parsing never fails: malformed lines are dropped and an
//! absent file reads as an empty document, which callers treat the same as
//! "key not found".

use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// Document
// ============================================================================

/// Parsed config: top-level keys plus named sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    /// Keys that appear before the first section header.
    pub globals: BTreeMap<String, String>,
    pub sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ConfigDocument {
    /// True when nothing was parsed (missing file, unreadable, or garbage).
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.sections.is_empty()
    }

    /// Look up a top-level key.
    pub fn global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(String::as_str)
    }

    /// Look up `key` inside `[section]`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse config text into a [`ConfigDocument`].
pub fn parse_ini(text: &str) -> ConfigDocument {
    let mut doc = ConfigDocument::default();
    let mut current: Option<String> = None;

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            // An unterminated header is noise; keep the previous section.
            if let Some(name) = header.strip_suffix(']') {
                let name = name.trim().to_string();
                doc.sections.entry(name.clone()).or_default();
                current = Some(name);
            }
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim().to_string();

        match &current {
            Some(section) => {
                doc.sections
                    .entry(section.clone())
                    .or_default()
                    .insert(key.to_string(), value);
            }
            None => {
                doc.globals.insert(key.to_string(), value);
            }
        }
    }

    doc
}

/// Read and parse a config file. Missing or unreadable files yield an empty document.
pub fn read_ini(path: &Path) -> ConfigDocument {
    match std::fs::read(path) {
        Ok(bytes) => parse_ini(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            debug!("could not read {}: {}", path.display(), e);
            ConfigDocument::default()
        }
    }
}

// ============================================================================
// Environment Expansion
// ============================================================================

/// Expand `%NAME%`, `$NAME` and `${NAME}` references from the process environment.
///
/// Unknown variables and unterminated references are kept verbatim.
pub fn expand_env_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

fn is_var_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// Windows names such as `ProgramFiles(x86)` carry parentheses.
fn is_percent_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| is_var_char(c) || c == '(' || c == ')')
}

fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(['%', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let (name, consumed) = if let Some(after) = tail.strip_prefix('%') {
            match after.find('%') {
                Some(end) if is_percent_name(&after[..end]) => (Some(&after[..end]), end + 2),
                _ => (None, 1),
            }
        } else if let Some(after) = tail.strip_prefix("${") {
            match after.find('}') {
                Some(end) if end > 0 => (Some(&after[..end]), end + 3),
                _ => (None, 1),
            }
        } else {
            let after = &tail[1..];
            let end = after.find(|c: char| !is_var_char(c)).unwrap_or(after.len());
            if end > 0 {
                (Some(&after[..end]), end + 1)
            } else {
                (None, 1)
            }
        };

        match name.and_then(&lookup) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&tail[..consumed]),
        }
        rest = &tail[consumed..];
    }

    out.push_str(rest);
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "LOCALAPPDATA" => Some("C:\\Users\\me\\AppData\\Local".to_string()),
            "HOME" => Some("/home/me".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_parse_sections_and_globals() {
        let doc = parse_ini(
            "userFolder = D:\\Games\\BeamNG\n\
             [filesystem]\n\
             UserPath=%LOCALAPPDATA%\\Custom\n\
             ; comment\n\
             [graphics]\n\
             width = 1920\n",
        );
        assert_eq!(doc.global("userFolder"), Some("D:\\Games\\BeamNG"));
        assert_eq!(
            doc.get("filesystem", "UserPath"),
            Some("%LOCALAPPDATA%\\Custom")
        );
        assert_eq!(doc.get("graphics", "width"), Some("1920"));
        assert_eq!(doc.get("graphics", "UserPath"), None);
    }

    #[test]
    fn test_value_splits_on_first_separator() {
        let doc = parse_ini("[a]\nkey = x=y=z\n");
        assert_eq!(doc.get("a", "key"), Some("x=y=z"));
    }

    #[test]
    fn test_garbage_yields_empty_document() {
        let doc = parse_ini("\u{0}\u{1}garbage\n[unterminated\n=novalue\n");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_bom_and_crlf() {
        let doc = parse_ini("\u{feff}[filesystem]\r\nUserPath = /tmp/x\r\n");
        assert_eq!(doc.get("filesystem", "UserPath"), Some("/tmp/x"));
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let doc = read_ini(Path::new("/definitely/not/here/startup.ini"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_expand_percent_style() {
        assert_eq!(
            expand_with("%LOCALAPPDATA%\\BeamNG", lookup),
            "C:\\Users\\me\\AppData\\Local\\BeamNG"
        );
    }

    #[test]
    fn test_expand_dollar_styles() {
        assert_eq!(expand_with("$HOME/games", lookup), "/home/me/games");
        assert_eq!(expand_with("${HOME}/games", lookup), "/home/me/games");
    }

    #[test]
    fn test_expand_keeps_unknown_and_unterminated() {
        assert_eq!(expand_with("%NOPE%\\x", lookup), "%NOPE%\\x");
        assert_eq!(expand_with("100% sure", lookup), "100% sure");
        assert_eq!(expand_with("${HOME", lookup), "${HOME");
        assert_eq!(expand_with("cost $5", lookup), "cost $5");
        assert_eq!(expand_with("$", lookup), "$");
    }
}

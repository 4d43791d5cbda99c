/// Normalised file-extension keys.
///
/// An extension always carries its leading separator (`.tmp`, not `tmp`) so
/// that configured keys and keys derived from file names compare directly.
/// Case folding is decided once, by the run's [`CaseSensitivity`].
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether `.TMP` and `.tmp` are the same extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseSensitivity {
    /// Keys are compared byte-for-byte.
    #[default]
    Sensitive,
    /// Keys are ASCII-lowercased on construction.
    Insensitive,
}

impl CaseSensitivity {
    /// Map the config file's `case_sensitive` flag onto a policy.
    pub fn from_flag(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Sensitive
        } else {
            Self::Insensitive
        }
    }

    fn fold(self, raw: &str) -> CompactString {
        match self {
            Self::Sensitive => CompactString::new(raw),
            Self::Insensitive => CompactString::new(raw.to_ascii_lowercase()),
        }
    }
}

/// An immutable, normalised extension such as `.log`.
///
/// The empty key means "no extension" (`Makefile`, `.bashrc`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionKey(CompactString);

impl ExtensionKey {
    /// Derive the key from a bare file name.
    ///
    /// Only the last suffix counts (`a.tar.gz` → `.gz`), and leading dots are
    /// part of the stem, so dotfiles such as `.bashrc` have no extension.
    pub fn from_file_name(name: &str, case: CaseSensitivity) -> Self {
        let stem_start = name.len() - name.trim_start_matches('.').len();
        let rest = &name[stem_start..];
        match rest.rfind('.') {
            Some(dot) => Self(case.fold(&rest[dot..])),
            None => Self(CompactString::default()),
        }
    }

    /// Normalise a configured extension: trims whitespace and adds the
    /// leading `.` when it is missing. Returns `None` for blank input.
    pub fn parse(raw: &str, case: CaseSensitivity) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('.') {
            Some(Self(case.fold(trimmed)))
        } else {
            Some(Self(case.fold(&format!(".{trimmed}"))))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ExtensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> String {
        ExtensionKey::from_file_name(name, CaseSensitivity::Sensitive)
            .as_str()
            .to_owned()
    }

    #[test]
    fn last_suffix_wins() {
        assert_eq!(key("a.tmp"), ".tmp");
        assert_eq!(key("archive.tar.gz"), ".gz");
    }

    #[test]
    fn no_suffix_is_empty() {
        assert_eq!(key("Makefile"), "");
        assert!(ExtensionKey::from_file_name("README", CaseSensitivity::Sensitive).is_empty());
    }

    /// Dotfiles keep their leading dot in the stem.
    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(key(".bashrc"), "");
        assert_eq!(key("..hidden"), "");
        assert_eq!(key(".config.bak"), ".bak");
    }

    #[test]
    fn trailing_dot_is_its_own_extension() {
        assert_eq!(key("weird."), ".");
    }

    #[test]
    fn case_policy_applies_to_file_names() {
        assert_eq!(key("SHOUT.TMP"), ".TMP");
        let folded = ExtensionKey::from_file_name("SHOUT.TMP", CaseSensitivity::Insensitive);
        assert_eq!(folded.as_str(), ".tmp");
    }

    #[test]
    fn parse_adds_leading_separator() {
        let k = ExtensionKey::parse("log", CaseSensitivity::Sensitive).unwrap();
        assert_eq!(k.as_str(), ".log");
        let k = ExtensionKey::parse("  .tmp ", CaseSensitivity::Sensitive).unwrap();
        assert_eq!(k.as_str(), ".tmp");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(ExtensionKey::parse("", CaseSensitivity::Sensitive).is_none());
        assert!(ExtensionKey::parse("   ", CaseSensitivity::Insensitive).is_none());
    }

    #[test]
    fn parse_and_file_name_agree_under_folding() {
        let configured = ExtensionKey::parse(".LOG", CaseSensitivity::Insensitive).unwrap();
        let seen = ExtensionKey::from_file_name("server.Log", CaseSensitivity::Insensitive);
        assert_eq!(configured, seen);
    }
}

//! # Validation & Naming
//!
//! Decides whether an upload is accepted based on its extension and mints the
//! collision-resistant name it is saved under.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::utils::constant::{SUPPORTED_EXTENSIONS, UNIQUE_SUFFIX_LEN};

/// Matches every character that may not appear in a saved file stem.
static UNSAFE_STEM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("Failed to compile stem regex"));

/// Case-insensitive set of accepted extensions, stored lower-cased with the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedExtensions(HashSet<String>);

impl AllowedExtensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        )
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(&extension.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AllowedExtensions {
    fn default() -> Self {
        Self::new(SUPPORTED_EXTENSIONS)
    }
}

/// Why an upload was left out of a batch without failing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedExtension { filename: String, extension: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedExtension { filename, extension } if extension.is_empty() => {
                write!(f, "`{filename}` has no file extension")
            }
            SkipReason::UnsupportedExtension { filename, extension } => {
                write!(f, "`{filename}` has unsupported extension `{extension}`")
            }
        }
    }
}

/// Splits the final component of `name` into `(stem, suffix)`.
///
/// The suffix keeps its leading dot and its original case. A name whose only dot
/// is the first character, or that ends with a dot, has no suffix.
fn split_name(name: &str) -> (&str, &str) {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}

/// Lower-cased extension of `name` including the leading dot, or an empty string.
pub fn extension_of(name: &str) -> String {
    split_name(name).1.to_lowercase()
}

/// Replaces every character outside `[a-zA-Z0-9_-]` with `_` and lower-cases the result.
pub fn sanitize_stem(stem: &str) -> String {
    UNSAFE_STEM_CHARS
        .replace_all(stem, "_")
        .to_ascii_lowercase()
}

/// The first hex characters of a random v4 UUID.
pub fn unique_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(UNIQUE_SUFFIX_LEN);
    suffix
}

/// An accepted upload name together with the name it will be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedName {
    pub original_name: String,
    pub extension: String,
    pub sanitized_stem: String,
    pub unique_suffix: String,
}

impl ValidatedName {
    /// Checks `name` against `allowed` and derives the output naming parts.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::UnsupportedExtension`] when the extension is missing or
    /// not part of `allowed`.
    pub fn validate(name: &str, allowed: &AllowedExtensions) -> Result<Self, SkipReason> {
        let (stem, _) = split_name(name);
        let extension = extension_of(name);

        if !allowed.contains(&extension) {
            return Err(SkipReason::UnsupportedExtension {
                filename: name.to_string(),
                extension,
            });
        }

        Ok(Self {
            original_name: name.to_string(),
            extension,
            sanitized_stem: sanitize_stem(stem),
            unique_suffix: unique_suffix(),
        })
    }

    /// `{sanitized_stem}_{unique_suffix}{extension}`
    pub fn output_name(&self) -> String {
        format!(
            "{}_{}{}",
            self.sanitized_stem, self.unique_suffix, self.extension
        )
    }

    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.output_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_last_suffix() {
        assert_eq!(extension_of("Quarterly Report.PDF"), ".pdf");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".pdf"), "");
        assert_eq!(extension_of("notes."), "");
        assert_eq!(extension_of("dir.v2/notes"), "");
    }

    #[test]
    fn default_set_is_case_insensitive() {
        let allowed = AllowedExtensions::default();
        assert_eq!(allowed.len(), 11);
        assert!(allowed.contains(".pdf"));
        assert!(allowed.contains(".SQLITE3"));
        assert!(!allowed.contains(".exe"));
        assert!(!allowed.contains(""));
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_stem("My Report (v2)"), "my_report__v2_");
        assert_eq!(sanitize_stem("déjà-vu_1"), "d_j_-vu_1");
        assert_eq!(sanitize_stem("../../etc"), "______etc");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for stem in ["My Report (v2)", "a.b.c", "ÜBER straße", "plain_name-1"] {
            let once = sanitize_stem(stem);
            assert_eq!(sanitize_stem(&once), once);
        }
    }

    #[test]
    fn unique_suffix_is_eight_hex_chars() {
        let suffix = unique_suffix();
        assert_eq!(suffix.len(), UNIQUE_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn validate_builds_output_name() {
        let name = ValidatedName::validate("Q3 Budget.XLSX", &AllowedExtensions::default())
            .expect("xlsx should be accepted");

        assert_eq!(name.extension, ".xlsx");
        assert_eq!(name.sanitized_stem, "q3_budget");
        assert_eq!(
            name.output_name(),
            format!("q3_budget_{}.xlsx", name.unique_suffix)
        );
        assert_eq!(
            name.output_path(Path::new("/data")),
            PathBuf::from(format!("/data/q3_budget_{}.xlsx", name.unique_suffix))
        );
    }

    #[test]
    fn validate_uses_only_final_path_component() {
        let name = ValidatedName::validate("../secret/plan.md", &AllowedExtensions::default())
            .unwrap();
        assert_eq!(name.sanitized_stem, "plan");
    }

    #[test]
    fn backslash_is_part_of_the_stem() {
        let name =
            ValidatedName::validate("a\\b.pdf", &AllowedExtensions::default()).unwrap();
        assert_eq!(name.sanitized_stem, "a_b");
        assert_eq!(name.extension, ".pdf");
    }

    #[test]
    fn validate_skips_unsupported_and_missing_extensions() {
        let allowed = AllowedExtensions::default();

        let skipped = ValidatedName::validate("setup.exe", &allowed).unwrap_err();
        assert_eq!(
            skipped,
            SkipReason::UnsupportedExtension {
                filename: "setup.exe".into(),
                extension: ".exe".into(),
            }
        );

        let skipped = ValidatedName::validate("README", &allowed).unwrap_err();
        assert_eq!(skipped.to_string(), "`README` has no file extension");
    }

    #[test]
    fn same_name_gets_distinct_suffixes() {
        let allowed = AllowedExtensions::default();
        let a = ValidatedName::validate("notes.txt", &allowed).unwrap();
        let b = ValidatedName::validate("notes.txt", &allowed).unwrap();
        assert_ne!(a.output_name(), b.output_name());
    }
}

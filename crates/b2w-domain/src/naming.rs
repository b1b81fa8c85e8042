use std::fmt;

use serde::Serialize;

/// Package name canonicalized for filesystem paths and module references.
///
/// The raw, human-chosen name stays in `METADATA` and on the left-hand side of
/// the console script mapping; everything path-shaped uses this form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(normalize_package_name(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{normalized}-{version}.dist-info`
    #[must_use]
    pub fn dist_info_dir(&self, version: &str) -> String {
        format!("{}-{version}.dist-info", self.0)
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercases `name` and maps `.` and `-` to `_`; every other character is kept.
#[must_use]
pub fn normalize_package_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for ch in name.chars() {
        if matches!(ch, '-' | '.') {
            result.push('_');
        } else {
            result.extend(ch.to_lowercase());
        }
    }
    result
}

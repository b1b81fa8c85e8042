//! Platform tags for binary wheels.
//!
//! Friendly aliases (`linux-x86_64`) map to the canonical tags installers
//! understand (`manylinux_2_17_x86_64`). Canonical tags pass through verbatim;
//! anything else is rejected.

use std::env;
use std::fmt;

use serde::Serialize;
use tracing::debug;

/// Friendly alias → canonical tag.
pub const PLATFORM_TAGS: [(&str, &str); 4] = [
    ("linux-x86_64", "manylinux_2_17_x86_64"),
    ("macos-arm64", "macosx_11_0_arm64"),
    ("macos-x86_64", "macosx_10_15_x86_64"),
    ("windows-x64", "win_amd64"),
];

const WINDOWS_TAGS: [&str; 3] = ["win32", "win_amd64", "win_arm64"];
const LEGACY_MANYLINUX: [&str; 3] = ["manylinux1_", "manylinux2010_", "manylinux2014_"];
const VERSIONED_PREFIXES: [&str; 3] = ["manylinux_", "musllinux_", "macosx_"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error(
        "Unknown platform `{input}` (expected one of linux-x86_64, macos-arm64, macos-x86_64, windows-x64 or a canonical wheel platform tag)"
    )]
    Unknown { input: String },
    #[error("Unknown platform: no wheel tag for host {os}/{arch}; pass an explicit platform")]
    UnsupportedHost { os: String, arch: String },
}

/// A canonical wheel platform tag, e.g. `win_amd64`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlatformTag(String);

impl PlatformTag {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `py3-none-{tag}`, the full compatibility triple written to `WHEEL`.
    #[must_use]
    pub fn wheel_tag(&self) -> String {
        format!("py3-none-{}", self.0)
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves a friendly alias or canonical tag.
///
/// # Errors
/// Returns [`PlatformError::Unknown`] naming `input` when it is neither.
pub fn resolve_platform_tag(input: &str) -> Result<PlatformTag, PlatformError> {
    if let Some((_, canonical)) = PLATFORM_TAGS.iter().find(|(alias, _)| *alias == input) {
        debug!(alias = input, tag = canonical, "resolved platform alias");
        return Ok(PlatformTag((*canonical).to_string()));
    }
    if is_canonical_tag(input) {
        debug!(tag = input, "platform tag passed through");
        return Ok(PlatformTag(input.to_string()));
    }
    Err(PlatformError::Unknown {
        input: input.to_string(),
    })
}

/// Returns an alias or canonical tag for the running host.
///
/// The result always resolves through [`resolve_platform_tag`].
///
/// # Errors
/// Returns [`PlatformError::UnsupportedHost`] when the host has no known tag.
pub fn detect_current_platform() -> Result<String, PlatformError> {
    host_platform(env::consts::OS, env::consts::ARCH)
}

pub(crate) fn host_platform(os: &str, arch: &str) -> Result<String, PlatformError> {
    let detected = match (os, arch) {
        ("linux", "x86_64") => "linux-x86_64",
        ("linux", "aarch64") => "manylinux_2_17_aarch64",
        ("macos", "aarch64") => "macos-arm64",
        ("macos", "x86_64") => "macos-x86_64",
        ("windows", "x86_64") => "windows-x64",
        ("windows", "aarch64") => "win_arm64",
        ("windows", "x86") => "win32",
        _ => {
            return Err(PlatformError::UnsupportedHost {
                os: os.to_string(),
                arch: arch.to_string(),
            })
        }
    };
    debug!(os, arch, platform = detected, "detected host platform");
    Ok(detected.to_string())
}

/// Whether `tag` is already a canonical platform tag.
///
/// Accepts the table's canonical values, the Windows tags, `linux_{arch}`,
/// legacy `manylinux{1,2010,2014}_{arch}`, versioned
/// `{manylinux,musllinux,macosx}_{major}_{minor}_{arch}`, and dotted
/// compressed sets of those.
#[must_use]
pub fn is_canonical_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.split('.').all(is_single_canonical_tag)
}

fn is_single_canonical_tag(tag: &str) -> bool {
    if PLATFORM_TAGS.iter().any(|(_, canonical)| *canonical == tag) {
        return true;
    }
    if WINDOWS_TAGS.contains(&tag) {
        return true;
    }
    if let Some(arch) = tag.strip_prefix("linux_") {
        return is_arch(arch);
    }
    if let Some(arch) = LEGACY_MANYLINUX
        .iter()
        .find_map(|prefix| tag.strip_prefix(prefix))
    {
        return is_arch(arch);
    }
    if let Some(rest) = VERSIONED_PREFIXES
        .iter()
        .find_map(|prefix| tag.strip_prefix(prefix))
    {
        let mut parts = rest.splitn(3, '_');
        let (Some(major), Some(minor), Some(arch)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        return is_number(major) && is_number(minor) && is_arch(arch);
    }
    false
}

fn is_number(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_arch(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('_')
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friendly_names_map_to_canonical_tags() {
        let cases = [
            ("linux-x86_64", "manylinux_2_17_x86_64"),
            ("macos-arm64", "macosx_11_0_arm64"),
            ("macos-x86_64", "macosx_10_15_x86_64"),
            ("windows-x64", "win_amd64"),
        ];
        for (alias, expected) in cases {
            let tag = resolve_platform_tag(alias).expect("alias resolves");
            assert_eq!(tag.as_str(), expected, "alias {alias}");
        }
    }

    #[test]
    fn table_has_exactly_four_aliases() {
        let aliases: Vec<_> = PLATFORM_TAGS.iter().map(|(alias, _)| *alias).collect();
        assert_eq!(
            aliases,
            ["linux-x86_64", "macos-arm64", "macos-x86_64", "windows-x64"]
        );
    }

    #[test]
    fn canonical_tags_pass_through_unchanged() {
        for tag in [
            "manylinux_2_17_x86_64",
            "win_amd64",
            "macosx_11_0_arm64",
            "musllinux_1_2_aarch64",
            "manylinux2014_x86_64",
            "macosx_10_9_universal2",
            "manylinux_2_17_x86_64.manylinux2014_x86_64",
            "linux_armv7l",
        ] {
            let resolved = resolve_platform_tag(tag).expect("canonical tag resolves");
            assert_eq!(resolved.as_str(), tag);
        }
    }

    #[test]
    fn unknown_platform_names_the_input() {
        let err = resolve_platform_tag("freebsd-amd64").expect_err("should fail");
        assert_eq!(
            err,
            PlatformError::Unknown {
                input: "freebsd-amd64".to_string()
            }
        );
        let message = err.to_string();
        assert!(message.starts_with("Unknown platform"), "{message}");
        assert!(message.contains("freebsd-amd64"), "{message}");
    }

    #[test]
    fn malformed_canonical_tags_are_rejected() {
        for tag in [
            "",
            "manylinux_2_x86_64",
            "manylinux_a_17_x86_64",
            "macosx_11_arm64",
            "MANYLINUX_2_17_X86_64",
            "linux_",
            "win_amd64.",
            "any",
        ] {
            assert!(
                resolve_platform_tag(tag).is_err(),
                "`{tag}` should not be accepted"
            );
        }
    }

    #[test]
    fn detected_platform_always_resolves() {
        match detect_current_platform() {
            Ok(detected) => {
                assert!(!detected.is_empty());
                assert!(resolve_platform_tag(&detected).is_ok(), "{detected}");
            }
            Err(PlatformError::UnsupportedHost { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn host_table_results_resolve() {
        let hosts = [
            ("linux", "x86_64", "manylinux_2_17_x86_64"),
            ("linux", "aarch64", "manylinux_2_17_aarch64"),
            ("macos", "aarch64", "macosx_11_0_arm64"),
            ("macos", "x86_64", "macosx_10_15_x86_64"),
            ("windows", "x86_64", "win_amd64"),
            ("windows", "aarch64", "win_arm64"),
            ("windows", "x86", "win32"),
        ];
        for (os, arch, expected) in hosts {
            let detected = host_platform(os, arch).expect("known host");
            let tag = resolve_platform_tag(&detected).expect("detected resolves");
            assert_eq!(tag.as_str(), expected, "{os}/{arch}");
        }
    }

    #[test]
    fn unsupported_host_is_reported() {
        let err = host_platform("freebsd", "x86_64").expect_err("no tag");
        assert!(matches!(err, PlatformError::UnsupportedHost { .. }));
        assert!(err.to_string().contains("freebsd/x86_64"));
    }

    #[test]
    fn wheel_tag_prefixes_python_and_abi() {
        let tag = resolve_platform_tag("windows-x64").expect("resolves");
        assert_eq!(tag.wheel_tag(), "py3-none-win_amd64");
        assert_eq!(
            serde_json::to_value(&tag).expect("serialize"),
            serde_json::json!("win_amd64")
        );
    }
}

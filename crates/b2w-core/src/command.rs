use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tracing::debug;

use b2w_domain::{detect_current_platform, resolve_platform_tag, PlatformTag, PLATFORM_TAGS};

use crate::artifacts::{format_bytes, short_digest};
use crate::config::Config;
use crate::error::BuildError;
use crate::wheel::{build_wheel_with, BuildRequest};
use crate::ExecutionOutcome;

/// Where the wheel's platform tag comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformChoice {
    Explicit(String),
    Detect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LongDescription {
    Inline(String),
    Readme(PathBuf),
}

/// Caller-facing request; unlike [`BuildRequest`] nothing is resolved yet.
#[derive(Clone, Debug)]
pub struct WrapRequest {
    pub name: String,
    pub version: String,
    pub binary: PathBuf,
    pub platform: PlatformChoice,
    pub output_dir: Option<PathBuf>,
    pub entry_point: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub url: Option<String>,
    pub long_description: Option<LongDescription>,
}

/// Resolves `request` and builds the wheel, reporting the result as an outcome.
#[must_use]
pub fn wrap_binary(config: &Config, request: &WrapRequest) -> ExecutionOutcome {
    if request.name.trim().is_empty() || request.version.trim().is_empty() {
        return ExecutionOutcome::user_error(
            "package name and version must not be empty",
            json!({ "reason": "invalid_request" }),
        );
    }
    match prepare(config, request).and_then(|build| {
        build_wheel_with(&build, config.archive()).map(|built| (build, built))
    }) {
        Ok((build, built)) => {
            let message = format!(
                "wrote {} ({}, sha256={}…)",
                built.path.display(),
                format_bytes(built.bytes),
                short_digest(&built.sha256)
            );
            ExecutionOutcome::success(
                message,
                json!({
                    "wheel": built.path.display().to_string(),
                    "bytes": built.bytes,
                    "sha256": built.sha256,
                    "name": build.raw_name,
                    "normalized_name": build.normalized_name(),
                    "version": build.version,
                    "platform_tag": built.platform_tag,
                    "entry_point": build.entry_point,
                    "entries": built.entries,
                }),
            )
        }
        Err(err) => error_outcome(&err),
    }
}

/// Turns a [`WrapRequest`] into a fully resolved [`BuildRequest`].
///
/// # Errors
/// Fails on an unresolvable platform or an unreadable readme.
pub fn prepare(config: &Config, request: &WrapRequest) -> Result<BuildRequest, BuildError> {
    let platform_tag = resolve_choice(&request.platform)?;
    let output_dir = request
        .output_dir
        .clone()
        .unwrap_or_else(|| config.default_output_dir().to_path_buf());
    let long_description = match &request.long_description {
        None => None,
        Some(LongDescription::Inline(text)) => Some(text.clone()),
        Some(LongDescription::Readme(path)) => {
            let text = fs::read_to_string(path).map_err(|source| BuildError::Readme {
                path: path.clone(),
                source,
            })?;
            Some(text)
        }
    };
    debug!(
        name = %request.name,
        platform = %platform_tag,
        out = %output_dir.display(),
        "prepared build request"
    );
    Ok(BuildRequest {
        raw_name: request.name.clone(),
        version: request.version.clone(),
        binary_path: request.binary.clone(),
        platform_tag,
        entry_point: request.entry_point.clone(),
        description: request.description.clone(),
        author: request.author.clone(),
        license_name: request.license.clone(),
        url: request.url.clone(),
        long_description,
        output_dir,
    })
}

fn resolve_choice(choice: &PlatformChoice) -> Result<PlatformTag, BuildError> {
    let raw = match choice {
        PlatformChoice::Explicit(raw) => raw.clone(),
        PlatformChoice::Detect => detect_current_platform()?,
    };
    Ok(resolve_platform_tag(&raw)?)
}

fn error_outcome(err: &BuildError) -> ExecutionOutcome {
    let mut details = json!({
        "reason": err.reason(),
        "error": err.to_string(),
    });
    let hint = match err {
        BuildError::Platform(_) => Some(format!(
            "use one of {} or a canonical tag such as manylinux_2_17_aarch64",
            PLATFORM_TAGS
                .iter()
                .map(|(alias, _)| *alias)
                .collect::<Vec<_>>()
                .join(", ")
        )),
        BuildError::BinaryNotFound { path, .. } => {
            details["binary"] = json!(path.display().to_string());
            Some("check the --binary path points at a readable file".to_string())
        }
        BuildError::Readme { path, .. } => {
            details["readme"] = json!(path.display().to_string());
            None
        }
        BuildError::Io { .. } | BuildError::Archive(_) => {
            Some("check the output directory exists or can be created and is writable".to_string())
        }
    };
    if let Some(hint) = hint {
        details["hint"] = json!(hint);
    }
    if err.is_user_error() {
        ExecutionOutcome::user_error(err.to_string(), details)
    } else {
        ExecutionOutcome::failure(err.to_string(), details)
    }
}

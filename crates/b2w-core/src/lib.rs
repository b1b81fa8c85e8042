//! Wraps a standalone native executable into an installable wheel that
//! exposes it as a console script and as `python -m {module}`.

mod artifacts;
mod command;
mod config;
mod error;
mod outcome;
pub mod wheel;

pub use b2w_domain::{
    detect_current_platform, normalize_package_name, record_digest, resolve_platform_tag,
    NormalizedName, PlatformError, PlatformTag, PLATFORM_TAGS,
};

pub use crate::command::{prepare, wrap_binary, LongDescription, PlatformChoice, WrapRequest};
pub use crate::config::{ArchiveConfig, Config, EnvSnapshot};
pub use crate::error::BuildError;
pub use crate::outcome::{format_status_message, to_json_response, CommandStatus, ExecutionOutcome};
pub use crate::wheel::{build_wheel, build_wheel_with, BuildRequest, BuiltWheel, GeneratedFile};

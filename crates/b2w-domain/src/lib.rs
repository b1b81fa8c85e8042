//! Domain primitives for wrapping native executables into wheels: package name
//! normalization, `RECORD` digests, and platform tag resolution.

pub mod hashing;
pub mod naming;
pub mod platform;

pub use hashing::{record_digest, sha256_hex};
pub use naming::{normalize_package_name, NormalizedName};
pub use platform::{
    detect_current_platform, is_canonical_tag, resolve_platform_tag, PlatformError, PlatformTag,
    PLATFORM_TAGS,
};

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use zip::{write::FileOptions, CompressionMethod, DateTime, ZipWriter};

use b2w_domain::{sha256_hex, PlatformTag};

use super::plan::{binary_filename, plan_wheel, BuildRequest, WheelPlan};
use crate::config::ArchiveConfig;
use crate::error::BuildError;

/// Mode stored for every archive entry, so the payload stays executable.
pub const ENTRY_MODE: u32 = 0o755;

/// Summary of a wheel written to disk.
#[derive(Clone, Debug, Serialize)]
pub struct BuiltWheel {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
    pub platform_tag: PlatformTag,
    pub entries: Vec<String>,
}

/// Builds the wheel described by `request` and returns its summary.
///
/// # Errors
/// [`BuildError::BinaryNotFound`] when the binary cannot be read,
/// [`BuildError::Io`] or [`BuildError::Archive`] when the wheel cannot be
/// written.
pub fn build_wheel(request: &BuildRequest) -> Result<BuiltWheel, BuildError> {
    build_wheel_with(request, ArchiveConfig::default())
}

/// [`build_wheel`] with explicit archive settings.
///
/// # Errors
/// See [`build_wheel`].
pub fn build_wheel_with(
    request: &BuildRequest,
    archive: ArchiveConfig,
) -> Result<BuiltWheel, BuildError> {
    let payload = read_binary(request)?;
    let filename = binary_filename(&request.binary_path)?;
    let plan = plan_wheel(request, &filename, payload);
    let archive_bytes = write_archive(&plan, archive)?;

    fs::create_dir_all(&request.output_dir).map_err(|err| {
        BuildError::io(
            format!("creating output directory {}", request.output_dir.display()),
            err,
        )
    })?;
    let path = request.output_dir.join(&plan.filename);
    persist(&request.output_dir, &path, &archive_bytes)?;

    let built = BuiltWheel {
        bytes: archive_bytes.len() as u64,
        sha256: sha256_hex(&archive_bytes),
        platform_tag: request.platform_tag.clone(),
        entries: plan.entry_names(),
        path,
    };
    info!(
        wheel = %built.path.display(),
        bytes = built.bytes,
        entries = built.entries.len(),
        "wrote wheel"
    );
    Ok(built)
}

fn read_binary(request: &BuildRequest) -> Result<Vec<u8>, BuildError> {
    let path = &request.binary_path;
    if !path.is_file() {
        return Err(BuildError::BinaryNotFound {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a regular file"),
        });
    }
    let data = fs::read(path).map_err(|source| BuildError::BinaryNotFound {
        path: path.clone(),
        source,
    })?;
    debug!(binary = %path.display(), bytes = data.len(), "read binary payload");
    Ok(data)
}

/// Serializes `plan` into an in-memory zip with every entry at [`ENTRY_MODE`].
pub(crate) fn write_archive(
    plan: &WheelPlan,
    archive: ArchiveConfig,
) -> Result<Vec<u8>, BuildError> {
    let mut options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(ENTRY_MODE);
    if let Some(stamp) = archive.source_date_epoch().map(zip_timestamp) {
        options = options.last_modified_time(stamp);
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for file in &plan.files {
        zip.start_file(file.archive_path.as_str(), options)?;
        zip.write_all(&file.content)
            .map_err(|err| BuildError::io(format!("writing {}", file.archive_path), err))?;
        debug!(entry = %file.archive_path, "stored wheel entry");
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn persist(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), BuildError> {
    let mut staged = NamedTempFile::new_in(dir)
        .map_err(|err| BuildError::io(format!("staging wheel in {}", dir.display()), err))?;
    staged
        .write_all(bytes)
        .map_err(|err| BuildError::io(format!("writing {}", path.display()), err))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // temp files are created 0600
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|err| BuildError::io(format!("writing {}", path.display()), err))?;
    }
    staged
        .persist(path)
        .map_err(|err| BuildError::io(format!("writing {}", path.display()), err.error))?;
    Ok(())
}

// Zip timestamps cover 1980..=2107; anything else clamps to the minimum.
fn zip_timestamp(epoch: i64) -> DateTime {
    zip_date(epoch).unwrap_or_else(|| {
        warn!(epoch, "timestamp not representable in zip; using archive minimum");
        DateTime::default()
    })
}

fn zip_date(epoch: i64) -> Option<DateTime> {
    let instant = OffsetDateTime::from_unix_timestamp(epoch).ok()?;
    let year = u16::try_from(instant.year()).ok()?;
    if year < 1980 {
        return None;
    }
    DateTime::from_date_and_time(
        year,
        u8::from(instant.month()),
        instant.day(),
        instant.hour(),
        instant.minute(),
        instant.second(),
    )
    .ok()
}

use std::io;
use std::path::{Path, PathBuf};

use b2w_domain::{NormalizedName, PlatformTag};
use tracing::debug;

use super::metadata::{render_entry_points, render_metadata, render_wheel_descriptor, CoreMetadata};
use super::record::render_record;
use super::stubs::{render_init_module, render_main_module};
use crate::error::BuildError;

/// Everything needed to wrap one binary. The platform tag is already resolved.
#[derive(Clone, Debug)]
pub struct BuildRequest {
    pub raw_name: String,
    pub version: String,
    pub binary_path: PathBuf,
    pub platform_tag: PlatformTag,
    pub entry_point: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license_name: Option<String>,
    pub url: Option<String>,
    pub long_description: Option<String>,
    pub output_dir: PathBuf,
}

impl BuildRequest {
    #[must_use]
    pub fn normalized_name(&self) -> NormalizedName {
        NormalizedName::new(&self.raw_name)
    }

    /// `{normalized}-{version}-py3-none-{platform}.whl`
    #[must_use]
    pub fn wheel_filename(&self) -> String {
        wheel_filename(&self.normalized_name(), &self.version, &self.platform_tag)
    }

    fn core_metadata(&self) -> CoreMetadata<'_> {
        CoreMetadata {
            name: &self.raw_name,
            version: &self.version,
            summary: self.description.as_deref(),
            author: self.author.as_deref(),
            license: self.license_name.as_deref(),
            home_page: self.url.as_deref(),
            long_description: self.long_description.as_deref(),
        }
    }
}

#[must_use]
pub fn wheel_filename(name: &NormalizedName, version: &str, platform: &PlatformTag) -> String {
    format!("{name}-{version}-{}.whl", platform.wheel_tag())
}

/// A file destined for the archive; `archive_path` is `/`-separated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub archive_path: String,
    pub content: Vec<u8>,
}

impl GeneratedFile {
    pub fn new(archive_path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            archive_path: archive_path.into(),
            content: content.into(),
        }
    }
}

/// In-memory layout of a wheel, in archive order, `RECORD` last.
#[derive(Clone, Debug)]
pub struct WheelPlan {
    pub filename: String,
    pub dist_info: String,
    pub binary_path: String,
    pub files: Vec<GeneratedFile>,
}

impl WheelPlan {
    #[must_use]
    pub fn record_path(&self) -> String {
        format!("{}/RECORD", self.dist_info)
    }

    #[must_use]
    pub fn entry_names(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|file| file.archive_path.clone())
            .collect()
    }
}

/// Lays out every archive member for `request`, given the binary's bytes and
/// its source filename.
#[must_use]
pub fn plan_wheel(request: &BuildRequest, binary_filename: &str, payload: Vec<u8>) -> WheelPlan {
    let normalized = request.normalized_name();
    let module = normalized.as_str();
    let dist_info = normalized.dist_info_dir(&request.version);
    let binary_path = format!("{module}/bin/{binary_filename}");

    let mut files = vec![
        GeneratedFile::new(
            format!("{module}/__init__.py"),
            render_init_module(&request.version, binary_filename),
        ),
        GeneratedFile::new(format!("{module}/__main__.py"), render_main_module()),
        GeneratedFile::new(binary_path.clone(), payload),
        GeneratedFile::new(
            format!("{dist_info}/METADATA"),
            render_metadata(&request.core_metadata()),
        ),
        GeneratedFile::new(
            format!("{dist_info}/WHEEL"),
            render_wheel_descriptor(&request.platform_tag),
        ),
    ];
    if let Some(command) = &request.entry_point {
        files.push(GeneratedFile::new(
            format!("{dist_info}/entry_points.txt"),
            render_entry_points(command, module),
        ));
    }

    let record_path = format!("{dist_info}/RECORD");
    let record = render_record(&files, &record_path);
    files.push(GeneratedFile::new(record_path, record));

    for file in &files {
        debug!(path = %file.archive_path, bytes = file.content.len(), "planned wheel entry");
    }

    WheelPlan {
        filename: request.wheel_filename(),
        dist_info,
        binary_path,
        files,
    }
}

/// The binary's own filename, verbatim, including any `.exe` suffix.
///
/// Names that are not valid UTF-8 are rejected rather than rewritten, since the
/// launcher looks the file up by this exact string.
pub(crate) fn binary_filename(path: &Path) -> Result<String, BuildError> {
    let invalid = |reason: &str| BuildError::BinaryNotFound {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, reason.to_string()),
    };
    let name = path.file_name().ok_or_else(|| invalid("path has no filename"))?;
    name.to_str()
        .map(str::to_string)
        .ok_or_else(|| invalid("filename is not valid UTF-8"))
}

//! Text descriptors stored under `{name}-{version}.dist-info/`.

use b2w_domain::PlatformTag;

pub const METADATA_VERSION: &str = "2.1";
pub const GENERATOR: &str = concat!("bin-to-wheel ", env!("CARGO_PKG_VERSION"));
const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// Inputs for the core `METADATA` file. Absent fields are omitted entirely.
#[derive(Clone, Debug, Default)]
pub struct CoreMetadata<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub summary: Option<&'a str>,
    pub author: Option<&'a str>,
    pub license: Option<&'a str>,
    pub home_page: Option<&'a str>,
    pub long_description: Option<&'a str>,
}

#[must_use]
pub fn render_metadata(metadata: &CoreMetadata<'_>) -> String {
    let mut lines = vec![
        format!("Metadata-Version: {METADATA_VERSION}"),
        format!("Name: {}", header_value(metadata.name)),
        format!("Version: {}", header_value(metadata.version)),
    ];
    let optional = [
        ("Summary", metadata.summary),
        ("Home-page", metadata.home_page),
        ("Author", metadata.author),
        ("License", metadata.license),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            lines.push(format!("{field}: {}", header_value(value)));
        }
    }

    let mut body = lines.join("\n");
    body.push('\n');
    if let Some(description) = metadata.long_description {
        body.push_str("Description-Content-Type: ");
        body.push_str(MARKDOWN_CONTENT_TYPE);
        body.push_str("\n\n");
        body.push_str(description);
        if !description.ends_with('\n') {
            body.push('\n');
        }
    }
    body
}

/// The `WHEEL` descriptor. Binary payloads are never purelib.
#[must_use]
pub fn render_wheel_descriptor(platform: &PlatformTag) -> String {
    format!(
        "Wheel-Version: 1.0\nGenerator: {GENERATOR}\nRoot-Is-Purelib: false\nTag: {}\n",
        platform.wheel_tag()
    )
}

/// `entry_points.txt` exposing `command` as a console script.
#[must_use]
pub fn render_entry_points(command: &str, module: &str) -> String {
    format!("[console_scripts]\n{command} = {module}:main\n")
}

// Header fields are single-line; folded continuation lines are not emitted.
fn header_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

use b2w_domain::record_digest;

use super::plan::GeneratedFile;

/// One `RECORD` row. The manifest's own row has neither hash nor size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordEntry {
    pub archive_path: String,
    pub hash: Option<String>,
    pub size: Option<usize>,
}

impl RecordEntry {
    #[must_use]
    pub fn for_content(archive_path: &str, content: &[u8]) -> Self {
        Self {
            archive_path: archive_path.to_string(),
            hash: Some(format!("sha256={}", record_digest(content))),
            size: Some(content.len()),
        }
    }

    #[must_use]
    pub fn unhashed(archive_path: &str) -> Self {
        Self {
            archive_path: archive_path.to_string(),
            hash: None,
            size: None,
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{},{},{}",
            csv_field(&self.archive_path),
            self.hash.as_deref().unwrap_or_default(),
            self.size.map(|size| size.to_string()).unwrap_or_default()
        )
    }
}

/// Renders `RECORD` for `files` in order, with `record_path` as the final
/// self-entry (`path,,`).
#[must_use]
pub fn render_record(files: &[GeneratedFile], record_path: &str) -> String {
    let mut lines: Vec<String> = files
        .iter()
        .filter(|file| file.archive_path != record_path)
        .map(|file| RecordEntry::for_content(&file.archive_path, &file.content).render())
        .collect();
    lines.push(RecordEntry::unhashed(record_path).render());
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

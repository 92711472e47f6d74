//! Front matter: YAML block between `---` fences at the top of a document

use crate::domain::Metadata;

const FENCE: &str = "---";

/// Split `content` into the raw front matter (if any) and the prose after it.
///
/// The opening fence must be the first line; without a closing fence the
/// whole content is treated as prose.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content
        .strip_prefix(FENCE)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let front = &rest[..offset];
            let prose = &rest[offset + line.len()..];
            return (Some(front), prose);
        }
        offset += line.len();
    }
    (None, content)
}

/// Deserialize raw front matter into metadata. Empty input yields empty metadata.
pub fn parse_metadata(raw: &str) -> Result<Metadata, serde_yaml::Error> {
    if raw.trim().is_empty() {
        return Ok(Metadata::new());
    }
    serde_yaml::from_str(raw)
}

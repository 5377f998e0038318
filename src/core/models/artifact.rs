use crate::global_constants;
use crate::utils::sanitize_filename;

/// Final output of a capture session: the serialized, inlined and
/// post-processed markup plus the metadata the output sinks need.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub markup: String,
    pub content_type: String,
    pub document_title: String,
}

impl Artifact {
    pub fn svg(markup: String, document_title: String) -> Self {
        Self {
            markup,
            content_type: global_constants::SVG_CONTENT_TYPE.to_string(),
            document_title,
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        self.markup.len()
    }

    /// Filesystem-safe filename derived from the document title.
    pub fn filename(&self) -> String {
        format!(
            "{}.{}",
            sanitize_filename(&self.document_title),
            global_constants::SVG_FILE_EXTENSION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_strips_forbidden_characters_from_title() {
        let artifact = Artifact::svg("<svg/>".to_string(), "My:Doc?".to_string());
        assert_eq!(artifact.filename(), "MyDoc.svg");
    }

    #[test]
    fn test_svg_artifact_carries_the_svg_content_type() {
        let artifact = Artifact::svg("<svg/>".to_string(), "Title".to_string());
        assert_eq!(artifact.content_type, "image/svg+xml");
        assert_eq!(artifact.size_in_bytes(), 6);
    }
}

use crate::eval::EvaluationContext;
use crate::predicates::Predicate;

/// Matches files by extension and/or MIME type.
///
/// Extensions are compared case-insensitively without the dot. MIME entries
/// match exactly, or by type prefix when written as `image/*`.
pub struct FileTypePredicate {
    extensions: Vec<String>,
    mime_types: Vec<String>,
}

impl FileTypePredicate {
    /// Build from extension and MIME lists; at least one must be non-empty.
    pub fn new(extensions: Vec<String>, mime_types: Vec<String>) -> Option<Self> {
        if extensions.is_empty() && mime_types.is_empty() {
            return None;
        }
        let extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        let mime_types = mime_types
            .into_iter()
            .map(|m| m.to_ascii_lowercase())
            .collect();
        Some(Self {
            extensions,
            mime_types,
        })
    }

    fn mime_entry_matches(entry: &str, mime: &str) -> bool {
        match entry.strip_suffix("/*") {
            Some(prefix) => mime
                .split_once('/')
                .is_some_and(|(main, _)| main == prefix),
            None => entry == mime,
        }
    }
}

impl Predicate for FileTypePredicate {
    fn matches(&self, ctx: &EvaluationContext) -> bool {
        if let Some(ext) = ctx.extension()
            && self.extensions.contains(&ext)
        {
            return true;
        }
        if let Some(mime) = ctx.mime_type.as_deref() {
            let mime = mime.to_ascii_lowercase();
            return self
                .mime_types
                .iter()
                .any(|entry| Self::mime_entry_matches(entry, &mime));
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ActionKind;

    fn ctx(name: Option<&str>, mime: Option<&str>) -> EvaluationContext {
        EvaluationContext {
            action: ActionKind::FileTransfer,
            source_url: None,
            destination_url: None,
            destination_component: None,
            file_name: name.map(String::from),
            mime_type: mime.map(String::from),
            size_bytes: None,
        }
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn needs_extensions_or_mime_types() {
        assert!(FileTypePredicate::new(vec![], vec![]).is_none());
        assert!(FileTypePredicate::new(strings(&["pdf"]), vec![]).is_some());
        assert!(FileTypePredicate::new(vec![], strings(&["application/pdf"])).is_some());
    }

    #[test]
    fn matches_extension_case_insensitively() {
        let p = FileTypePredicate::new(strings(&["pdf", "docx"]), vec![]).unwrap();
        assert!(p.matches(&ctx(Some("report.PDF"), None)));
        assert!(p.matches(&ctx(Some("notes.docx"), None)));
        assert!(!p.matches(&ctx(Some("image.png"), None)));
    }

    #[test]
    fn leading_dot_in_config_tolerated() {
        let p = FileTypePredicate::new(strings(&[".zip"]), vec![]).unwrap();
        assert!(p.matches(&ctx(Some("bundle.zip"), None)));
    }

    #[test]
    fn matches_exact_mime() {
        let p = FileTypePredicate::new(vec![], strings(&["application/zip"])).unwrap();
        assert!(p.matches(&ctx(None, Some("application/zip"))));
        assert!(!p.matches(&ctx(None, Some("application/pdf"))));
    }

    #[test]
    fn matches_mime_wildcard() {
        let p = FileTypePredicate::new(vec![], strings(&["image/*"])).unwrap();
        assert!(p.matches(&ctx(None, Some("image/png"))));
        assert!(p.matches(&ctx(None, Some("IMAGE/JPEG"))));
        assert!(!p.matches(&ctx(None, Some("video/mp4"))));
    }

    #[test]
    fn extension_or_mime_suffices() {
        let p =
            FileTypePredicate::new(strings(&["zip"]), strings(&["application/gzip"])).unwrap();
        assert!(p.matches(&ctx(Some("a.zip"), None)));
        assert!(p.matches(&ctx(None, Some("application/gzip"))));
    }

    #[test]
    fn absent_file_facts_never_match() {
        let p = FileTypePredicate::new(strings(&["pdf"]), strings(&["*/*"])).unwrap();
        assert!(!p.matches(&ctx(None, None)));
    }
}

use std::fmt;
use std::path::Path;

/// Source file classifications a [`SourceTree`](crate::SourceTree) can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    JavaScript,
    /// Vue single-file component; only its `<script>` blocks carry code.
    Vue,
}

impl FileKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "vue" => Some(Self::Vue),
            _ => None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        Self::from_extension(path.as_ref().extension()?.to_str()?)
    }

    /// Maps an LSP language identifier.
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id {
            "javascript" | "javascriptreact" => Some(Self::JavaScript),
            "vue" => Some(Self::Vue),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::Vue => "Vue.js",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::FileKind;

    #[test]
    fn classify_paths() {
        assert_eq!(FileKind::from_path("src/app.js"), Some(FileKind::JavaScript));
        assert_eq!(FileKind::from_path("src/App.JSX"), Some(FileKind::JavaScript));
        assert_eq!(FileKind::from_path("lib/index.mjs"), Some(FileKind::JavaScript));
        assert_eq!(FileKind::from_path("components/Card.vue"), Some(FileKind::Vue));
        assert_eq!(FileKind::from_path("main.ts"), None);
        assert_eq!(FileKind::from_path("Makefile"), None);
    }

    #[test]
    fn classify_language_ids() {
        assert_eq!(FileKind::from_language_id("javascriptreact"), Some(FileKind::JavaScript));
        assert_eq!(FileKind::from_language_id("vue"), Some(FileKind::Vue));
        assert_eq!(FileKind::from_language_id("typescript"), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(FileKind::JavaScript.to_string(), "JavaScript");
        assert_eq!(FileKind::Vue.to_string(), "Vue.js");
    }
}

use camino::Utf8PathBuf;
pub use line_index::{LineCol, LineIndex};
use logtrail_syntax::FileKind;

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
    /// `None` for files no syntax tree can be built for.
    pub kind: Option<FileKind>,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

impl File {
    /// Creates a file input classified by its extension.
    pub fn from_path(db: &dyn salsa::Database, path: Utf8PathBuf, text: String) -> Self {
        let kind = FileKind::from_path(&path);
        Self::new(db, path, text, kind)
    }
}

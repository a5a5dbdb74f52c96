use std::fmt;
use std::path::Path;

/// Entries that may already live in a directory before a project is created in it.
pub const DEFAULT_ALLOW_LIST: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    "docs",
    "LICENSE",
    "README.md",
    "mkdocs.yml",
    "Thumbs.db",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A pre-existing entry that is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub name: String,
    /// `None` when the entry could not be inspected.
    pub kind: Option<EntryKind>,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(EntryKind::Directory) => write!(f, "{}/", self.name),
            _ => f.write_str(&self.name),
        }
    }
}

pub type ConflictList = Vec<Conflict>;

/// Classify an entry from its (non-following) metadata; `None` when it could not be read.
fn entry_kind(metadata: std::io::Result<std::fs::Metadata>) -> Option<EntryKind> {
    let metadata = metadata.ok()?;
    Some(if metadata.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    })
}

/// List the immediate children of `root` that are not in `allow_list`, sorted by name.
///
/// Never fails: a missing or unreadable `root` yields no conflicts, and entries that
/// cannot be stat-ed are still reported, just without a kind.
pub fn check_safe(root: &Path, allow_list: &[String]) -> ConflictList {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };

    let mut conflicts: ConflictList = entries
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if allow_list.iter().any(|allowed| *allowed == name) {
                return None;
            }
            let kind = entry_kind(std::fs::symlink_metadata(entry.path()));
            Some(Conflict { name, kind })
        })
        .collect();

    conflicts.sort_by(|a, b| a.name.cmp(&b.name));
    conflicts
}

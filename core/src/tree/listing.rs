use super::node::{Action, ExpandState, NodeId, NodeKind, TreeNode};
use crate::traits::{DirEntryInfo, FileSystem};
use feruca::{Collator, Locale, Tailoring};
use std::path::Path;

/// CLDR root collation with punctuation kept significant, the order a
/// default `localeCompare` gives.
fn name_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Directories first, then by collated name.
pub fn sort_entries(entries: &mut [DirEntryInfo]) {
    let mut collator = name_collator();
    entries.sort_by(|a, b| {
        let a_is_dir = a.entry_type.is_dir();
        let b_is_dir = b.entry_type.is_dir();
        if a_is_dir != b_is_dir {
            return b_is_dir.cmp(&a_is_dir);
        }
        collator.collate(a.name.as_str(), b.name.as_str())
    });
}

/// Lists `dir` as tree nodes. Directories are tagged `SkillsSubFolder` when
/// `skills_root` is set, otherwise `Folder`.
///
/// A failed read is logged and yields no children.
pub async fn list_directory(fs: &dyn FileSystem, dir: &Path, skills_root: bool) -> Vec<TreeNode> {
    tracing::debug!("Listing directory: {}", dir.display());

    let mut entries = match fs.read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Error reading directory {}: {:#}", dir.display(), e);
            return vec![];
        }
    };
    sort_entries(&mut entries);

    entries
        .into_iter()
        .map(|entry| {
            let path = dir.join(&entry.name);
            let (kind, expand) = match (entry.entry_type.is_dir(), skills_root) {
                (true, true) => (NodeKind::SkillsSubFolder, ExpandState::Collapsed),
                (true, false) => (NodeKind::Folder, ExpandState::Collapsed),
                (false, _) => (NodeKind::File, ExpandState::None),
            };

            TreeNode {
                id: NodeId::Entry(path.clone()),
                label: entry.name,
                status: String::new(),
                action: Action::OpenFile,
                expand,
                kind,
                path: Some(path),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::EntryType;

    fn entry(name: &str, entry_type: EntryType) -> DirEntryInfo {
        DirEntryInfo {
            name: name.to_string(),
            entry_type,
        }
    }

    #[test]
    fn folders_before_files_then_alphabetical() {
        let mut entries = vec![
            entry("b.txt", EntryType::File),
            entry("A", EntryType::Directory),
            entry("a.txt", EntryType::File),
            entry("B", EntryType::Directory),
        ];
        sort_entries(&mut entries);

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "a.txt", "b.txt"]);
    }

    fn sorted_files(names: &[&str]) -> Vec<String> {
        let mut entries: Vec<_> = names.iter().map(|n| entry(n, EntryType::File)).collect();
        sort_entries(&mut entries);
        entries.into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn case_only_differences_put_lower_first() {
        assert_eq!(sorted_files(&["README", "readme"]), ["readme", "README"]);
        assert_eq!(sorted_files(&["Zeta", "alpha"]), ["alpha", "Zeta"]);
    }

    #[test]
    fn symbols_and_accents_sort_like_locale_compare() {
        let names = [
            "~draft", "alpha", "éclair", "fig", "Zeta", "_x", "a_b", "ab", "a-b", "a.b", "a b",
        ];
        assert_eq!(
            sorted_files(&names),
            [
                "_x", "~draft", "a b", "a_b", "a-b", "a.b", "ab", "alpha", "éclair", "fig", "Zeta",
            ]
        );
    }

    #[tokio::test]
    async fn skills_root_tags_only_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("pdf")).unwrap();
        std::fs::write(tmp.path().join("README.md"), "").unwrap();

        let nodes = list_directory(&crate::filesystem::LocalFileSystem, tmp.path(), true).await;
        let kinds: Vec<_> = nodes.iter().map(|n| (n.label.as_str(), n.kind)).collect();
        assert_eq!(
            kinds,
            [("pdf", NodeKind::SkillsSubFolder), ("README.md", NodeKind::File)]
        );
    }
}

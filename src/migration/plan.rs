use crate::migration::{MigrationDirection, MigrationFile};

use std::path::Path;


/// The direction-filtered, ordered migrations of one run.
#[derive(Debug)]
pub struct SelectionPlan {
    direction: MigrationDirection,
    files: Vec<MigrationFile>,
}

impl SelectionPlan {
    /// Keep the entries ending in the direction's suffix and order them for traversal.
    /// Entries of the opposite direction (or anything else) are dropped silently.
    pub fn select(
        directory: &Path,
        entries: impl IntoIterator<Item = String>,
        direction: MigrationDirection,
    ) -> Self {
        let mut names: Vec<String> = entries
            .into_iter()
            .filter(|name| name.ends_with(direction.suffix()))
            .collect();
        names.sort_by(|a, b| direction.compare(a, b));

        if names.is_empty() {
            tracing::warn!("No '*{}' migrations found in {directory:?}", direction.suffix());
        }

        let files = names
            .into_iter()
            .map(|name| MigrationFile::new(directory, name))
            .collect();

        SelectionPlan { direction, files }
    }

    pub fn direction(&self) -> MigrationDirection {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MigrationFile> {
        self.files.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a SelectionPlan {
    type Item = &'a MigrationFile;
    type IntoIter = std::slice::Iter<'a, MigrationFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<String> {
        [
            "002_users.down.sql",
            "001_init.up.sql",
            "003_posts.up.sql",
            "001_init.down.sql",
            "002_users.up.sql",
            "003_posts.down.sql",
            "notes.txt",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn up_keeps_up_files_ascending() {
        let plan = SelectionPlan::select(Path::new("m"), entries(), MigrationDirection::Up);
        assert_eq!(plan.names(), vec!["001_init.up.sql", "002_users.up.sql", "003_posts.up.sql"]);
        assert_eq!(plan.direction(), MigrationDirection::Up);
    }

    #[test]
    fn down_keeps_down_files_descending() {
        let plan = SelectionPlan::select(Path::new("m"), entries(), MigrationDirection::Down);
        assert_eq!(plan.names(), vec!["003_posts.down.sql", "002_users.down.sql", "001_init.down.sql"]);
    }

    #[test]
    fn suffix_match_is_exact() {
        let names = vec![
            "001_a.up.sql.bak".to_string(),
            "001_a.upsql".to_string(),
            "001_a.sql".to_string(),
        ];
        let plan = SelectionPlan::select(Path::new("m"), names, MigrationDirection::Up);
        assert!(plan.is_empty());
    }

    #[test]
    fn files_resolve_inside_the_directory() {
        let plan = SelectionPlan::select(Path::new("m"), entries(), MigrationDirection::Up);
        let first = plan.iter().next().unwrap();
        assert_eq!(first.path, Path::new("m").join("001_init.up.sql"));
    }
}

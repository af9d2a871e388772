//! Content loaders for reading catalog data and configuration from files.
//!
//! Every loader can parse a source string directly; the embedded tables use
//! that path, the file-based entry points read the file first.

pub mod actions;
pub mod config;
pub mod factory;
pub mod skills;

pub use actions::{ActionLoader, ActionRecord, GeneralRecord};
pub use config::{ConfigLoader, ScenarioConfig};
pub use factory::ContentFactory;
pub use skills::SkillLoader;

use std::path::Path;

use anyhow::Context;
use ops_core::Catalog;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Builds the validated catalog from the embedded tables.
pub fn standard_catalog() -> LoadResult<Catalog> {
    let actions = ActionLoader::embedded()?;
    let skills = SkillLoader::embedded()?;
    Catalog::new(actions, skills).context("embedded catalog failed validation")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ops_core::ActionType;

    #[test]
    fn standard_catalog_has_every_table() {
        let catalog = standard_catalog().unwrap();
        assert_eq!(catalog.actions.list_names(ActionType::Contract).len(), 3);
        assert_eq!(catalog.actions.list_names(ActionType::Operation).len(), 6);
        assert_eq!(catalog.actions.list_names(ActionType::BlackOp).len(), 21);
        assert_eq!(catalog.actions.list_names(ActionType::General).len(), 6);
        assert_eq!(catalog.skills.skill_names().len(), 12);
    }

    #[test]
    fn black_ops_start_with_typhoon_and_end_with_daedalus() {
        let catalog = standard_catalog().unwrap();
        let ordered: Vec<_> = catalog.actions.black_ops_by_rank().collect();
        assert_eq!(ordered.first().unwrap().name, "Operation Typhoon");
        assert_eq!(ordered.last().unwrap().name, "Operation Daedalus");
        assert!(ordered.windows(2).all(|pair| pair[0].required_rank < pair[1].required_rank));
    }

    #[test]
    fn read_file_reports_missing_path() {
        let err = read_file(Path::new("/definitely/not/here.ron")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.ron"));
    }
}

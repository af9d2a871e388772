//! Skill table loader.

use std::path::Path;

use ops_core::SkillDefinition;

use crate::loaders::{LoadResult, read_file};

const SKILLS: &str = include_str!("../../data/skills.ron");

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn parse(source: &str) -> LoadResult<Vec<SkillDefinition>> {
        ron::from_str(source).map_err(|e| anyhow::anyhow!("Failed to parse skills RON: {}", e))
    }

    /// The standard skill tree.
    pub fn embedded() -> LoadResult<Vec<SkillDefinition>> {
        Self::parse(SKILLS)
    }

    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ops_core::Multiplier;

    #[test]
    fn overclock_is_capped() {
        let skills = SkillLoader::embedded().unwrap();
        let overclock = skills.iter().find(|skill| skill.name == "Overclock").unwrap();
        assert_eq!(overclock.max_level, Some(90));
        assert_eq!(overclock.effects[0].multiplier, Multiplier::ActionTime);
        assert!(skills.iter().filter(|skill| skill.name != "Overclock").all(|skill| skill.max_level.is_none()));
    }

    #[test]
    fn multiplier_keys_are_camel_case() {
        let parsed = SkillLoader::parse(
            r#"[(name: "Focus", base_cost: 1.0, cost_increase: 1.0, max_level: None,
                 effects: [(multiplier: successEstimate, percent: 2.5)])]"#,
        )
        .unwrap();
        assert_eq!(parsed[0].effects[0].multiplier, Multiplier::SuccessEstimate);
        assert!(SkillLoader::parse(r#"[(name: "X", base_cost: 1.0, cost_increase: 1.0, max_level: None, effects: [(multiplier: SuccessAll, percent: 1.0)])]"#).is_err());
    }
}

use std::fs;
use std::path::Path;

use ops_content::{ConfigLoader, ContentFactory, SkillLoader, standard_catalog};
use ops_core::{ActionType, CityName, GeneralKind};
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn minimal_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "actions/contracts.ron",
        r#"[(name: "Tracking", difficulty: 125.0, rank_gain: 0.3, count: Some(10.0), growth: 1.0)]"#,
    );
    write(dir.path(), "actions/operations.ron", "[]");
    write(
        dir.path(),
        "actions/black_ops.ron",
        r#"[
            (name: "First Light", difficulty: 100.0, required_rank: 10.0),
            (name: "Last Light", difficulty: 200.0, required_rank: 20.0),
        ]"#,
    );
    write(dir.path(), "actions/general.ron", r#"[(name: "Training", kind: Training)]"#);
    write(
        dir.path(),
        "skills.ron",
        r#"[(name: "Cloak", base_cost: 2.0, cost_increase: 1.1, max_level: None, effects: [])]"#,
    );
    write(dir.path(), "config.toml", "[sim]\nstarting_city = \"Ishima\"\nrandom_events = false\n");
    dir
}

#[test]
fn factory_loads_a_custom_data_dir() {
    let dir = minimal_data_dir();
    let factory = ContentFactory::new(dir.path());

    let catalog = factory.load_catalog().unwrap();
    assert_eq!(catalog.actions.list_names(ActionType::Contract), vec!["Tracking"]);
    assert!(catalog.actions.list_names(ActionType::Operation).is_empty());
    assert_eq!(
        catalog.actions.preceding_black_op("Last Light").map(|op| op.name.as_str()),
        Some("First Light")
    );
    let training = catalog.actions.lookup(ActionType::General, "training").unwrap();
    assert_eq!(training.general, Some(GeneralKind::Training));

    let scenario = factory.load_config().unwrap();
    assert_eq!(scenario.sim.starting_city, CityName::Ishima);
    assert!(!scenario.sim.random_events);
}

#[test]
fn missing_table_is_reported_with_its_path() {
    let dir = minimal_data_dir();
    fs::remove_file(dir.path().join("actions/operations.ron")).unwrap();

    let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
    assert!(format!("{err:#}").contains("operations.ron"));
}

#[test]
fn duplicate_black_op_ranks_fail_validation() {
    let dir = minimal_data_dir();
    write(
        dir.path(),
        "actions/black_ops.ron",
        r#"[
            (name: "First Light", difficulty: 100.0, required_rank: 10.0),
            (name: "Twin Light", difficulty: 150.0, required_rank: 10.0),
        ]"#,
    );

    let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
    assert!(format!("{err:#}").contains("failed validation"));
}

#[test]
fn malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[sim\nrank_multiplier = ").unwrap();
    assert!(ConfigLoader::load(&path).is_err());
}

#[test]
fn skills_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skills.ron");
    fs::write(
        &path,
        r#"[(name: "Tracer", base_cost: 2.0, cost_increase: 2.1, max_level: Some(5),
             effects: [(multiplier: successContract, percent: 4.0)])]"#,
    )
    .unwrap();
    let skills = SkillLoader::load(&path).unwrap();
    assert_eq!(skills[0].max_level, Some(5));
}

#[test]
fn standard_catalog_resolves_aliases() {
    let catalog = standard_catalog().unwrap();
    assert!(catalog.actions.resolve("contr", "bounty hunter").is_some());
    assert!(catalog.actions.resolve(" Black Operations ", "Operation Zero").is_some());
    assert!(catalog.actions.resolve("gen", "Incite Violence").is_some());
    assert!(catalog.actions.resolve("ops", "Nonexistent").is_none());
}

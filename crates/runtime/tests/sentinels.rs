use ops_core::{ErrorKind, SimError};
use ops_runtime::{RuntimeError, Session};

fn session() -> Session {
    Session::builder().build().unwrap()
}

#[test]
fn unknown_actions_return_sentinels() {
    let session = session();
    assert_eq!(session.action_time_ms("contracts", "Nope"), -1.0);
    assert_eq!(session.action_time_ms("nonsense", "Tracking"), -1.0);
    assert_eq!(session.estimated_success_chance("ops", "Nope"), [-1.0, -1.0]);
    assert_eq!(session.rank_gain("ops", "Nope", None), -1.0);
    assert_eq!(session.action_count_remaining("ops", "Nope"), -1.0);
    assert_eq!(session.action_max_level("ops", "Nope"), -1);
    assert_eq!(session.action_current_level("ops", "Nope"), -1);
    assert!(!session.action_auto_level("ops", "Nope"));
    assert_eq!(session.team_size("ops", "Nope"), -1);
    assert_eq!(session.black_op_rank("Operation Nope"), -1.0);
    assert_eq!(session.skill_level("Nope"), -1);
    assert_eq!(session.skill_upgrade_cost("Nope", 1), -1);
}

#[test]
fn invalid_arguments_return_sentinels() {
    let session = session();
    assert_eq!(session.rank_gain("contracts", "Tracking", Some(0)), -1.0);
    assert_eq!(session.skill_upgrade_cost("Cloak", 0), -1);
    assert_eq!(session.skill_upgrade_cost("Overclock", 91), -1);
    assert!(session.skill_upgrade_cost("Overclock", 90) > 0);
}

#[test]
fn rank_gain_preview_never_shrinks_at_huge_levels() {
    let session = session();
    let low = session.rank_gain("contracts", "Tracking", Some(1));
    assert!((low - 0.3).abs() < 1e-12);
    for level in [3_000_000_000, i64::MAX] {
        assert!(session.rank_gain("contracts", "Tracking", Some(level)) >= low);
    }
}

#[test]
fn huge_skill_purchases_are_priced_immediately() {
    let session = session();
    // 3 * n + 2.1 * n * (n - 1) / 2 for n = 200_000_000
    let cost = session.skill_upgrade_cost("Blade's Intuition", 200_000_000);
    assert!((cost - 42_000_000_390_000_000).abs() < 1_000, "{cost}");
    assert!(session.skill_upgrade_cost("Blade's Intuition", u32::MAX) > cost);
}

#[test]
fn pools_report_floored_counts() {
    let session = session();
    assert_eq!(session.action_count_remaining("general", "Training"), f64::INFINITY);
    assert_eq!(session.action_count_remaining("contracts", "Tracking"), 2_500.0);
    assert_eq!(session.action_count_remaining("black op", "Operation Typhoon"), 1.0);
}

#[test]
fn estimates_bracket_the_general_chance_exactly() {
    let session = session();
    assert_eq!(session.estimated_success_chance("gen", "Training"), [1.0, 1.0]);
    let [low, high] = session.estimated_success_chance("contracts", "Tracking");
    assert!((0.0..=1.0).contains(&low) && low <= high && high <= 1.0);
}

#[test]
fn catalog_names_are_listed_in_order() {
    let session = session();
    assert_eq!(
        session.contract_names(),
        vec!["Tracking", "Bounty Hunter", "Retirement"]
    );
    assert_eq!(session.operation_names().len(), 6);
    assert_eq!(session.black_op_names().len(), 21);
    assert_eq!(session.general_action_names().len(), 6);
    assert_eq!(session.skill_names().len(), 12);
}

#[test]
fn unknown_type_is_not_found() {
    let mut session = session();
    let err = session.start_action("heists", "Tracking").unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownActionType { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = session.start_action("contracts", "Heist").unwrap_err();
    assert_eq!(err.error_code(), "ENGINE_UNKNOWN_ACTION");
    assert!(session.current_action().is_idle());
}

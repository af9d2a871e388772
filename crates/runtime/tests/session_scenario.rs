use ops_content::ScenarioConfig;
use ops_core::{
    Cities, City, CityName, ErrorKind, OperativeLedger, OpsState, SimConfig, SimError,
};
use ops_runtime::{RuntimeConfig, RuntimeError, Session, SessionEvent};

fn quiet_scenario() -> ScenarioConfig {
    ScenarioConfig {
        sim: SimConfig::default().with_random_events(false),
        ..ScenarioConfig::default()
    }
}

fn state_with(prepare: impl FnOnce(&mut OperativeLedger)) -> OpsState {
    let mut ledger = OperativeLedger::default();
    prepare(&mut ledger);
    OpsState::new(ledger, Cities::uniform(City::new(1.2e9, 1.0e9, 20)), 300.0)
}

fn session_with(prepare: impl FnOnce(&mut OperativeLedger)) -> Session {
    Session::builder()
        .config(RuntimeConfig::default().with_seed(42))
        .scenario(quiet_scenario())
        .initial_state(state_with(prepare))
        .build()
        .unwrap()
}

/// A short career: training, contract work, a skill purchase and a move.
#[test]
fn contract_career_from_idle_to_skill_purchase() {
    // Phase 1: idle session
    let mut session = session_with(|ledger| ledger.grant_skill_points(20));
    assert!(session.current_action().is_idle());
    assert_eq!(session.action_current_time_ms(), 0.0);

    // Phase 2: training banks a stamina bonus
    let max_before = session.stamina()[1];
    session.start_action("general", "Training").unwrap();
    assert_eq!(session.action_time_ms("gen", "training"), 30_000.0);
    session.tick(30.0);
    assert!(session.stamina()[1] > max_before);

    // Phase 3: contract work; the elapsed time is visible mid-attempt
    session.start_action("contracts", "Tracking").unwrap();
    let view = session.current_action();
    assert_eq!((view.kind.as_str(), view.name.as_str()), ("Contracts", "Tracking"));
    assert_eq!(session.action_time_ms("contracts", "Tracking"), 11_000.0);
    session.tick(5.0);
    assert_eq!(session.action_current_time_ms(), 5_000.0);

    let pool_before = session.action_count_remaining("contracts", "Tracking");
    for _ in 0..60 {
        session.tick(1.0);
    }
    let completions = session
        .events()
        .iter()
        .filter(|event| matches!(event, SessionEvent::Completed(c) if c.id.name == "Tracking"))
        .count();
    assert!(completions >= 3);
    assert!(session.action_count_remaining("contracts", "Tracking") <= pool_before);
    assert!(session.rank() >= 0.0);

    // Phase 4: skill purchase, priced before and charged after
    let quoted = session.skill_upgrade_cost("Blade's Intuition", 2);
    assert_eq!(quoted, 8);
    let points = session.skill_points();
    assert_eq!(session.upgrade_skill("blade's intuition", 2).unwrap(), 8);
    assert_eq!(session.skill_points(), points - 8);
    assert_eq!(session.skill_level("Blade's Intuition"), 2);

    // Phase 5: relocation and reset
    session.switch_city("New Tokyo").unwrap();
    assert_eq!(session.current_city(), CityName::NewTokyo);
    assert!(session.stop_action());
    assert!(!session.stop_action());
    assert!(session.current_action().is_idle());
    assert!(matches!(
        session.events().recent(1).next(),
        Some(SessionEvent::ActionReset { .. })
    ));
}

#[test]
fn black_ops_unlock_in_rank_order() {
    let mut session = session_with(|_| {});

    let err = session.start_action("black ops", "Operation Zero").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);
    let err = session.start_action("blackops", "Operation Typhoon").unwrap_err();
    assert_eq!(err.error_code(), "ENGINE_INSUFFICIENT_RANK");

    assert_eq!(session.action_count_remaining("blackops", "Operation Typhoon"), 1.0);
    assert_eq!(session.black_op_rank("Operation Typhoon"), 2_500.0);
    assert_eq!(session.black_op_rank("Operation Daedalus"), 400_000.0);
}

#[test]
fn team_assignments_share_the_recruited_pool() {
    let mut session = session_with(|ledger| ledger.personnel.recruit(5));

    assert_eq!(session.team_size("", ""), 5);
    assert_eq!(session.set_team_size("ops", "Sting Operation", 3).unwrap(), 3);
    assert_eq!(session.team_size("operations", "sting operation"), 3);

    let err = session.set_team_size("ops", "Raid", 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);
    let err = session.set_team_size("contracts", "Tracking", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    let err = session.set_team_size("ops", "Raid", -2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn levels_and_auto_level_round_trip_through_the_session() {
    let mut session = session_with(|_| {});

    assert_eq!(session.action_max_level("contracts", "Tracking"), 1);
    let err = session.set_action_level("contracts", "Tracking", 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    session.set_action_level("contracts", "Tracking", 1).unwrap();

    assert!(session.action_auto_level("contracts", "Tracking"));
    session.set_action_auto_level("contracts", "Tracking", false).unwrap();
    assert!(!session.action_auto_level("contracts", "Tracking"));
    assert_eq!(session.action_current_level("contracts", "Tracking"), 1);

    let expected = 0.3 * 1.041_f64.powi(2);
    assert!((session.rank_gain("contracts", "Tracking", Some(3)) - expected).abs() < 1e-12);
}

#[test]
fn bonus_time_drains_five_seconds_per_process() {
    let mut session = session_with(|_| {});
    session.store_cycles(300);
    assert_eq!(session.bonus_time_ms(), 60_000);

    let report = session.process().unwrap();
    assert_eq!(report.seconds, 5.0);
    assert_eq!(session.bonus_time_ms(), 55_000);

    while session.process().is_some() {}
    assert_eq!(session.bonus_time_ms(), 0);
}

#[test]
fn city_read_outs_reject_unknown_cities() {
    let session = session_with(|_| {});
    assert_eq!(session.city_estimated_population("sector-12").unwrap(), 1.0e9);
    assert_eq!(session.city_communities("Volhaven").unwrap(), 20);
    assert_eq!(session.city_chaos("Ishima").unwrap(), 0.0);

    let err = session.city_chaos("Atlantis").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let mut session = session;
    assert!(matches!(
        session.switch_city("Atlantis"),
        Err(RuntimeError::Engine(_))
    ));
}

#[test]
fn same_seed_same_history() {
    let run = || {
        let mut session = Session::builder()
            .config(RuntimeConfig::default().with_seed(7))
            .build()
            .unwrap();
        session.start_action("contracts", "Bounty Hunter").unwrap();
        for _ in 0..400 {
            session.tick(3.0);
        }
        let events: Vec<_> = session.events().iter().cloned().collect();
        (session.telemetry(), events)
    };
    assert_eq!(run(), run());
}

#[test]
fn telemetry_serializes_to_json() {
    let session = session_with(|_| {});
    let json = serde_json::to_value(session.telemetry()).unwrap();
    assert_eq!(json["current_action"]["type"], "Idle");
    assert_eq!(json["city"], "Sector-12");
}

use ops_core::{
    ActionDefinition, ActionType, Catalog, Cities, City, CityEffect, Engine, EngineError,
    ErrorKind, GeneralKind, OperativeLedger, OpsState, PcgRng, RngOracle, SimConfig, SimError,
    SkillDefinition, Stat, StatWeight,
};

fn weights() -> Vec<StatWeight> {
    vec![
        StatWeight::new(Stat::Strength, 0.2, 0.9),
        StatWeight::new(Stat::Dexterity, 0.4, 0.9),
        StatWeight::new(Stat::Agility, 0.4, 0.9),
    ]
}

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            ActionDefinition::new(ActionType::Contract, "Bounty Hunter", 250.0)
                .with_difficulty_factor(1.04)
                .with_rewards(0.9, 0.0, 1.085)
                .with_weights(weights())
                .with_pool(50.0, 1.0)
                .with_effects(
                    vec![
                        CityEffect::PopulationByCount { count: -1.0 },
                        CityEffect::ChaosByCount { count: 0.02 },
                    ],
                    vec![],
                )
                .kill(),
            ActionDefinition::new(ActionType::Operation, "Sting Operation", 650.0)
                .with_rewards(5.5, 0.5, 1.095)
                .with_weights(weights())
                .with_pool(20.0, 0.5),
            ActionDefinition::new(ActionType::Operation, "Undercover Operation", 500.0)
                .with_rewards(4.4, 0.4, 1.09)
                .with_weights(weights())
                .with_pool(20.0, 0.5),
            ActionDefinition::general("Training", GeneralKind::Training),
            ActionDefinition::general("Field Analysis", GeneralKind::FieldAnalysis),
        ],
        vec![SkillDefinition::new("Blade's Intuition", 3.0, 2.1)],
    )
    .unwrap()
}

fn fresh_state() -> OpsState {
    OpsState::new(
        OperativeLedger::default(),
        Cities::uniform(City::new(1.2e9, 1.0e9, 20)),
        300.0,
    )
}

fn quiet() -> SimConfig {
    SimConfig::default().with_random_events(false)
}

#[test]
fn start_then_reset_changes_no_rank_skill_points_or_cities() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    state.ledger.change_rank(7.0);
    let rank = state.ledger.rank();
    let points = state.ledger.skill_points();
    let cities = state.cities.clone();

    let mut engine = Engine::new(&mut state, &catalog, &config);
    engine
        .start_action(ActionType::Contract, "Bounty Hunter")
        .unwrap();
    engine.reset_action();
    engine.reset_action();

    assert!(state.ledger.current.is_none());
    assert_eq!(state.overflow.banked(), 0.0);
    assert_eq!(state.ledger.rank(), rank);
    assert_eq!(state.ledger.skill_points(), points);
    assert_eq!(state.cities, cities);
}

#[test]
fn ticks_summing_to_one_duration_resolve_exactly_once() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    let mut rng = PcgRng::seed_from_u64(5);
    let mut engine = Engine::new(&mut state, &catalog, &config);
    engine.start_action(ActionType::General, "Training").unwrap();

    let mut completions = 0;
    for _ in 0..3 {
        completions += engine.tick(10.0, &mut rng).completions.len();
    }

    assert_eq!(completions, 1);
    assert_eq!(state.overflow.banked(), 0.0);
    let current = state.ledger.current.as_ref().unwrap();
    assert_eq!(current.elapsed, 0.0);
}

#[test]
fn tick_of_two_durations_resolves_twice() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    let mut rng = PcgRng::seed_from_u64(6);
    let mut engine = Engine::new(&mut state, &catalog, &config);
    engine.start_action(ActionType::General, "Training").unwrap();

    let report = engine.tick(60.0, &mut rng);

    assert_eq!(report.completions.len(), 2);
    assert!(report.stopped.is_none());
    assert_eq!(state.overflow.banked(), 0.0);
}

#[test]
fn huge_tick_resolves_at_most_twice_and_caps_the_bank() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    let mut rng = PcgRng::seed_from_u64(7);
    let mut engine = Engine::new(&mut state, &catalog, &config);
    engine.start_action(ActionType::General, "Training").unwrap();

    let report = engine.tick(1_000.0, &mut rng);

    assert_eq!(report.completions.len(), 2);
    let total = state.ledger.current.as_ref().unwrap().total;
    assert!(state.overflow.banked() <= total);
}

#[test]
fn overflow_never_exceeds_one_duration_under_variable_ticks() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    let mut rng = PcgRng::seed_from_u64(8);
    let mut ticks = PcgRng::seed_from_u64(9);
    let mut engine = Engine::new(&mut state, &catalog, &config);
    engine
        .start_action(ActionType::Contract, "Bounty Hunter")
        .unwrap();

    for _ in 0..500 {
        let seconds = ticks.range_f64(0.1, 40.0);
        engine.tick(seconds, &mut rng);
        let state = engine.state();
        match &state.ledger.current {
            Some(current) => assert!(state.overflow.banked() <= current.total),
            None => assert_eq!(state.overflow.banked(), 0.0),
        }
        let ledger = &state.ledger;
        assert!(ledger.stamina() >= 0.0 && ledger.stamina() <= ledger.max_stamina());
        assert!(ledger.rank() >= 0.0);
        for (_, city) in state.cities.iter() {
            assert!(city.chaos() >= 0.0);
            assert!(city.estimate() >= 0.0);
        }
    }
}

#[test]
fn action_stops_when_stamina_runs_out() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    let mut rng = PcgRng::seed_from_u64(10);
    let mut engine = Engine::new(&mut state, &catalog, &config);
    engine
        .start_action(ActionType::Operation, "Sting Operation")
        .unwrap();

    let mut stopped = None;
    for _ in 0..10_000 {
        let report = engine.tick(1.0, &mut rng);
        if let Some(stop) = report.stopped {
            stopped = Some(stop);
            break;
        }
    }

    let stop = stopped.expect("the operation should eventually stop");
    assert!(matches!(
        stop.reason,
        ops_core::StopReason::Blocked(EngineError::InsufficientStamina { .. })
            | ops_core::StopReason::Blocked(EngineError::ActionDepleted { .. })
    ));
    assert!(state.ledger.current.is_none());
    assert_eq!(state.overflow.banked(), 0.0);
}

#[test]
fn process_consumes_at_most_five_seconds_per_call() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    let mut rng = PcgRng::seed_from_u64(11);
    let mut engine = Engine::new(&mut state, &catalog, &config);
    engine.store_cycles(5 * 60);

    let report = engine.process(&mut rng).unwrap();
    assert_eq!(report.seconds, 5.0);
    assert_eq!(engine.state().stored_cycles.cycles(), 5 * 55);
    assert_eq!(engine.state().stored_cycles.bonus_time_ms(), 55_000);

    let mut drained = Engine::new(&mut state, &catalog, &config);
    while drained.process(&mut rng).is_some() {}
    assert_eq!(state.stored_cycles.cycles(), 0);
}

#[test]
fn team_assignments_share_the_personnel_pool() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    state.ledger.personnel.recruit(10);
    let mut engine = Engine::new(&mut state, &catalog, &config);

    assert_eq!(
        engine.set_team_size(ActionType::Operation, "Sting Operation", 6),
        Ok(6)
    );
    assert_eq!(
        engine.set_team_size(ActionType::Operation, "Undercover Operation", 4),
        Ok(4)
    );
    let err = engine
        .set_team_size(ActionType::Operation, "Undercover Operation", 5)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);

    // replacing an assignment frees its old size first
    assert_eq!(
        engine.set_team_size(ActionType::Operation, "Sting Operation", 2),
        Ok(2)
    );
    assert_eq!(
        engine.set_team_size(ActionType::Operation, "Undercover Operation", 8),
        Ok(8)
    );

    let err = engine
        .set_team_size(ActionType::Operation, "Sting Operation", -1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    let err = engine
        .set_team_size(ActionType::Contract, "Bounty Hunter", 1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn auto_level_climbs_with_successes() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    let id = ops_core::ActionId::new(ActionType::Contract, "Bounty Hunter");
    let mut engine = Engine::new(&mut state, &catalog, &config);

    for _ in 0..3 {
        let completion = engine
            .resolve_outcome(&id, &ops_core::OutcomeRolls::with_chance(0.0))
            .unwrap();
        assert!(completion.success);
    }

    let definition = catalog.actions.get(&id).unwrap();
    let progress = state.action(definition);
    assert_eq!(progress.max_level, 2);
    assert_eq!(progress.level, 2);
}

#[test]
fn field_analysis_moves_estimate_toward_population() {
    let catalog = catalog();
    let config = quiet();
    let mut state = fresh_state();
    let mut rng = PcgRng::seed_from_u64(12);
    let gap_before = {
        let city = state.current_city();
        (city.population() - city.estimate()).abs()
    };
    let mut engine = Engine::new(&mut state, &catalog, &config);
    engine
        .start_action(ActionType::General, "Field Analysis")
        .unwrap();
    engine.tick(30.0, &mut rng);

    let city = state.current_city();
    assert!((city.population() - city.estimate()).abs() < gap_before);
    assert!((state.ledger.rank() - 0.1).abs() < 1e-12);
}

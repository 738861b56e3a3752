// tests/session_tests.rs

use qwalk::simulation::Outcome;
use qwalk::{
    CoinKind, Event, ResetParams, Session, SessionBuilder, SpinAmplitudes, WalkConfig, WalkEngine,
    WalkError,
};

// Helper: a started session on `sites` sites with the walker in the middle
fn running_session(sites: usize) -> Result<Session, WalkError> {
    let mut session = SessionBuilder::new().sites(sites).build()?;
    session.start();
    Ok(session)
}

#[test]
fn test_tick_matches_two_engine_steps() -> Result<(), WalkError> {
    let mut session = running_session(41)?;
    session.handle(Event::Tick)?;

    let engine = WalkEngine::with_sites(41)?;
    let quantum = engine.evolve_quantum(engine.initialize_quantum(20, SpinAmplitudes::up())?, 2)?;
    let classical = engine.evolve_classical(engine.initialize_classical(20)?, 2)?;

    assert_eq!(session.quantum(), &quantum);
    assert_eq!(session.classical(), &classical);
    Ok(())
}

#[test]
fn test_event_sequence_like_a_front_end() -> Result<(), WalkError> {
    let mut session = SessionBuilder::new().sites(51).build()?;
    let events = [
        Event::Tick,
        Event::Toggle,
        Event::Tick,
        Event::Tick,
        Event::Reset(ResetParams::new(10, SpinAmplitudes::new(0.0, 1.0, 1.0, 0.0))),
        Event::Tick,
        Event::Toggle,
        Event::Tick,
    ];
    let outcomes = events
        .iter()
        .map(|event| session.handle(*event))
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(
        outcomes,
        vec![
            Outcome::Idle,
            Outcome::Started,
            Outcome::Stepped { steps: 2 },
            Outcome::Stepped { steps: 2 },
            Outcome::Reset,
            Outcome::Stepped { steps: 2 },
            Outcome::Stopped,
            Outcome::Idle,
        ]
    );
    assert_eq!((session.ticks(), session.steps()), (1, 2));
    assert!(!session.is_running());
    Ok(())
}

#[test]
fn test_frame_tracks_counters() -> Result<(), WalkError> {
    let mut session = running_session(21)?;
    for _ in 0..3 {
        session.tick()?;
    }
    let frame = session.frame()?;
    assert_eq!((frame.tick, frame.steps), (3, 6));
    assert_eq!(frame.sites, (0..21).step_by(2).collect::<Vec<_>>());
    // After an even number of steps the walker sits on even sites only.
    let total: f64 = frame.envelope.iter().map(|e| e * e).sum();
    assert!((total - 1.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_session_from_config() -> Result<(), WalkError> {
    let config = WalkConfig::from_toml_str(
        r#"
        sites = 31
        coin = "identity"
        steps_per_tick = 3
        forward_probability = 1.0

        [initial]
        site = 5
        "#,
    )?;
    let mut session = Session::from_config(&config)?;
    session.start();
    session.tick()?;

    // Identity coin and a certain forward step: both walkers move right three sites.
    assert_eq!(session.classical().probability(8), Some(1.0));
    assert_eq!(session.quantum().density()[8], 1.0);
    assert_eq!(config.coin, CoinKind::Identity);
    Ok(())
}

#[test]
fn test_statistics_after_leak() -> Result<(), WalkError> {
    let mut session = SessionBuilder::new()
        .sites(5)
        .initial(ResetParams::new(2, SpinAmplitudes::up()))
        .build()?;
    session.advance(20)?;
    let stats = session.statistics();
    let classical = stats.classical.expect("some classical mass survives 20 steps");
    assert!(classical.mass < 1.0);
    assert!(classical.mass > 0.0);
    Ok(())
}

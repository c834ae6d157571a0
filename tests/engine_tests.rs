//! Turn engine tests.
//!
//! Full runs over generated mazes plus hand-built scenarios that pin down
//! step ordering, pickups, encounters, and the engine lifecycle.

use std::sync::{Arc, Mutex};

use maze_duel::core::{AgentId, AgentState, GameRng, GameState, Hand, PerAgent, Position};
use maze_duel::engine::{GameEvent, Observer, Outcome, Phase, Snapshot};
use maze_duel::maze::Maze;
use maze_duel::sandbox::{AgentError, FnAgent, Observation};
use maze_duel::{
    Error, RandomWalker, SimulationConfig, SimulationResult, StateError, TurnEngine, Wanderer,
};

/// A one-row corridor of five open cells at `y = 1`, `x = 1..=5`.
fn corridor(cells: [i32; 5]) -> Maze {
    let mut middle = vec![-1];
    middle.extend(cells);
    middle.push(-1);
    Maze::from_rows(&[vec![-1; 7], middle, vec![-1; 7]]).unwrap()
}

fn scenario(maze: Maze, first: AgentState, second: AgentState, steps: u32) -> TurnEngine {
    let config = SimulationConfig::new().with_seed(11).with_steps(steps);
    let state = GameState::from_parts(maze, PerAgent::from_pair(first, second), GameRng::new(11));
    TurnEngine::from_state(config, state)
}

fn goto(x: i32) -> FnAgent<impl FnMut(&Observation) -> Result<Position, AgentError> + Send + 'static> {
    FnAgent::new(format!("goto-{x}"), move |obs: &Observation| {
        Ok(Position::new(x, obs.position.y))
    })
}

fn generated(steps: u32) -> SimulationConfig {
    SimulationConfig::new()
        .with_dimensions(21, 15)
        .with_seed(42)
        .with_steps(steps)
}

// === Lifecycle ===

/// Test the lifecycle errors surfaced to callers.
#[test]
fn test_lifecycle_errors() {
    let mut engine = TurnEngine::new(generated(2)).unwrap();
    assert!(matches!(engine.step(), Err(StateError::NoAgentsRegistered)));
    assert!(matches!(engine.run(&mut ()), Err(StateError::NoAgentsRegistered)));

    engine.register_pair(RandomWalker::new(1), RandomWalker::new(2)).unwrap();
    assert!(matches!(
        engine.register_solo(RandomWalker::new(3)),
        Err(StateError::AgentsAlreadyRegistered)
    ));

    engine.run(&mut ()).unwrap();
    assert_eq!(engine.phase(), Phase::Finished);
    assert!(matches!(
        engine.step(),
        Err(StateError::SimulationFinished { steps: 2 })
    ));
}

/// Test that bad configuration never reaches maze generation.
#[test]
fn test_invalid_configuration() {
    let config = SimulationConfig::new().with_dimensions(2, 2);
    assert!(matches!(TurnEngine::new(config), Err(Error::Config(_))));
}

/// Test loading a configuration from TOML and running it.
#[test]
fn test_toml_configured_run() {
    let config = SimulationConfig::from_toml_str(
        r#"
        [maze]
        width = 15
        height = 11
        seed = 5

        [timing]
        steps = 12

        [scoring]
        cross_bonus = 30
        "#,
    )
    .unwrap();
    assert_eq!(config.scoring.cross_bonus, 30);
    assert_eq!(config.scoring.on_timeout, -15);

    let mut engine = TurnEngine::new(config).unwrap();
    engine.register_pair(Wanderer::new(1), Wanderer::new(2)).unwrap();
    let result = engine.run(&mut ()).unwrap();
    assert_eq!(result.steps, 12);
    assert_eq!(result.seed, 5);
}

// === Full runs ===

#[derive(Default)]
struct Recorder {
    started: bool,
    steps: Vec<u32>,
    events: Vec<GameEvent>,
    finished: Option<SimulationResult>,
}

impl Observer for Recorder {
    fn on_start(&mut self, snapshot: &Snapshot) {
        assert_eq!(snapshot.step, 0);
        self.started = true;
    }

    fn on_step(&mut self, snapshot: &Snapshot, events: &[GameEvent]) {
        self.steps.push(snapshot.step);
        self.events.extend_from_slice(events);
    }

    fn on_finish(&mut self, snapshot: &Snapshot, result: &SimulationResult) {
        assert!(snapshot.finished);
        self.finished = Some(result.clone());
    }
}

/// Test a full run with reference agents and an observer.
#[test]
fn test_full_run_reports_every_step() {
    let mut engine = TurnEngine::new(generated(50)).unwrap();
    engine.register_pair(RandomWalker::new(7), Wanderer::new(8)).unwrap();

    let mut recorder = Recorder::default();
    let result = engine.run(&mut recorder).unwrap();

    assert!(recorder.started);
    assert_eq!(recorder.steps, (1..=50).collect::<Vec<_>>());
    assert_eq!(recorder.finished.as_ref(), Some(&result));
    assert_eq!(
        recorder.events.last(),
        Some(&GameEvent::Finished { steps: 50 })
    );

    // Reference agents never fault.
    for id in AgentId::ALL {
        assert_eq!(result.faults[id].total(), 0);
    }

    // Every score change is accounted for by an event.
    for id in AgentId::ALL {
        let total: i64 = recorder
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ScoreChanged { agent, delta, .. } if *agent == id => Some(*delta),
                _ => None,
            })
            .sum();
        assert_eq!(total, result.scores[id]);
    }

    // Agents only ever occupy open cells.
    let maze = engine.state().maze();
    for position in engine.state().positions() {
        assert!(!maze.is_wall(position));
    }
}

/// Test that a seed plus seeded agents reproduce a run exactly.
#[test]
fn test_seeded_runs_are_deterministic() {
    let play = || {
        let mut engine = TurnEngine::new(generated(80)).unwrap();
        engine.register_pair(RandomWalker::new(3), Wanderer::new(4)).unwrap();
        let result = engine.run(&mut ()).unwrap();
        (result, engine.state().positions(), engine.state().maze().clone())
    };

    let (a, a_positions, a_maze) = play();
    let (b, b_positions, b_maze) = play();

    assert_eq!(a, b);
    assert_eq!(a_positions, b_positions);
    assert_eq!(a_maze, b_maze);
}

/// Test that a snapshot serializes.
#[test]
fn test_snapshot_serializes() {
    let mut engine = TurnEngine::new(generated(3)).unwrap();
    engine.register_solo(RandomWalker::new(1)).unwrap();
    engine.step().unwrap();

    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["step"], 1);
    assert_eq!(json["steps"], 3);
    assert_eq!(json["finished"], false);
    assert_eq!(json["names"]["data"][0], "Random walker");
    assert!(json["names"]["data"][1].is_null());
}

// === Scenarios ===

/// Test that the second agent observes the first agent's new position.
#[test]
fn test_second_agent_sees_first_move() {
    let mut engine = scenario(
        corridor([0; 5]),
        AgentState::new(Position::new(1, 1), Hand::Rock),
        AgentState::new(Position::new(5, 1), Hand::Rock),
        1,
    );
    let seen = Arc::new(Mutex::new(None));
    let record = Arc::clone(&seen);

    engine
        .register_pair(
            goto(2),
            FnAgent::new("watcher", move |obs: &Observation| {
                *record.lock().unwrap() = Some(obs.opponent_position);
                Ok(Position::new(4, 1))
            }),
        )
        .unwrap();
    engine.step().unwrap();

    assert_eq!(*seen.lock().unwrap(), Some(Position::new(2, 1)));
}

/// Test that two agents landing on one reward collect it once.
#[test]
fn test_simultaneous_landing_awards_once() {
    let mut engine = scenario(
        corridor([0, 0, 9, 0, 0]),
        AgentState::new(Position::new(2, 1), Hand::Paper),
        AgentState::new(Position::new(4, 1), Hand::Paper),
        1,
    );
    engine.register_pair(goto(3), goto(3)).unwrap();

    let events = engine.step().unwrap();

    let consumed = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CellConsumed { .. }))
        .count();
    assert_eq!(consumed, 1);
    assert_eq!(engine.state().agent(AgentId::First).score, 9);
    assert_eq!(engine.state().agent(AgentId::Second).score, 0);
    assert_eq!(engine.state().maze().get(Position::new(3, 1)), Some(0));
}

/// Test that Rock meeting Scissors pays the bonus and relocates Scissors.
#[test]
fn test_encounter_bonus_and_relocation() {
    let mut engine = scenario(
        corridor([0; 5]),
        AgentState::new(Position::new(2, 1), Hand::Rock),
        AgentState::new(Position::new(4, 1), Hand::Scissors),
        1,
    );
    engine.register_pair(goto(3), goto(3)).unwrap();

    let events = engine.step().unwrap();

    let state = engine.state();
    assert_eq!(state.agent(AgentId::First).score, 17);
    assert_eq!(state.agent(AgentId::Second).score, 0);
    assert_eq!(state.agent(AgentId::First).position, Position::new(3, 1));

    let relocated = state.agent(AgentId::Second).position;
    assert_ne!(relocated, Position::new(3, 1));
    assert!(state.maze().is_empty_cell(relocated));
    assert!(events.contains(&GameEvent::Encounter {
        winner: AgentId::First,
        loser: AgentId::Second,
        position: Position::new(3, 1),
        bonus: 17,
    }));
    assert_eq!(engine.result().outcome, Outcome::Winner(AgentId::First));
}

/// Test that encounters are off when type advantage is disabled.
#[test]
fn test_no_encounter_without_type_advantage() {
    let config = SimulationConfig::new()
        .with_seed(11)
        .with_steps(1)
        .with_type_advantage(false);
    let state = GameState::from_parts(
        corridor([0; 5]),
        PerAgent::from_pair(
            AgentState::new(Position::new(2, 1), Hand::Rock),
            AgentState::new(Position::new(4, 1), Hand::Scissors),
        ),
        GameRng::new(11),
    );
    let mut engine = TurnEngine::from_state(config, state);
    engine.register_pair(goto(3), goto(3)).unwrap();

    engine.step().unwrap();

    assert_eq!(engine.state().positions(), [Position::new(3, 1); 2]);
    assert_eq!(engine.result().outcome, Outcome::Draw);
}

/// Test that a consumed cell pays out only on the first visit.
#[test]
fn test_pickup_is_consumed() {
    let mut engine = scenario(
        corridor([0, 7, 0, 0, 0]),
        AgentState::new(Position::new(1, 1), Hand::Rock),
        AgentState::new(Position::new(5, 1), Hand::Rock),
        4,
    );
    engine
        .register_solo(FnAgent::new("pacer", |obs: &Observation| {
            let x = if obs.position.x == 1 { 2 } else { 1 };
            Ok(Position::new(x, obs.position.y))
        }))
        .unwrap();

    engine.run(&mut ()).unwrap();

    assert_eq!(engine.state().agent(AgentId::First).score, 7);
}

/// Test that a refresh cell changes the hand but not the score.
#[test]
fn test_refresh_cell_cycles_hand() {
    let mut engine = scenario(
        corridor([0, -2, 0, 0, 0]),
        AgentState::new(Position::new(1, 1), Hand::Scissors),
        AgentState::new(Position::new(5, 1), Hand::Rock),
        1,
    );
    engine.register_solo(goto(2)).unwrap();

    let events = engine.step().unwrap();

    let agent = engine.state().agent(AgentId::First);
    assert_ne!(agent.hand, Hand::Scissors);
    assert_eq!(agent.score, 0);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::HandChanged { agent: AgentId::First, from: Hand::Scissors, .. }
    )));
}

/// Test a single-agent run: the empty seat never moves or scores.
#[test]
fn test_single_agent_run() {
    let mut engine = scenario(
        corridor([0, 0, 0, 0, 5]),
        AgentState::new(Position::new(1, 1), Hand::Rock),
        AgentState::new(Position::new(5, 1), Hand::Paper),
        6,
    );
    engine.register_solo(RandomWalker::new(2)).unwrap();

    let result = engine.run(&mut ()).unwrap();

    let second = engine.state().agent(AgentId::Second);
    assert_eq!(second.position, Position::new(5, 1));
    assert_eq!(second.score, 0);
    assert_eq!(result.outcome, Outcome::Winner(AgentId::First));
    assert_eq!(engine.names()[AgentId::Second], None);
}

/// Test that faults cost points but the run still completes.
#[test]
fn test_faulting_agents_finish_the_run() {
    let mut engine = TurnEngine::new(generated(10).with_max_time_ms(200)).unwrap();
    engine
        .register_pair(
            FnAgent::new("panics", |_: &Observation| -> Result<Position, AgentError> {
                panic!("always")
            }),
            FnAgent::new("stays", |obs: &Observation| Ok(obs.position)),
        )
        .unwrap();

    let result = engine.run(&mut ()).unwrap();

    assert_eq!(result.steps, 10);
    assert_eq!(result.faults[AgentId::First].exceptions, 10);
    assert_eq!(result.faults[AgentId::Second].invalid_moves, 10);
}

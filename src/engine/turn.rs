//! The step loop.
//!
//! ## Step order
//!
//! 1. Agent 1 decides (sandboxed); its penalty and move are applied.
//! 2. Agent 2 decides, seeing agent 1's new position.
//! 3. Pickups, agent 1 first.
//! 4. Encounter (type-advantage mode, two agents only).
//! 5. The step counter advances; the run ends at the step limit.
//!
//! ## Lifecycle
//!
//! `NotStarted` → `Running` on the first step → `Finished` at the limit.
//! Agents are registered exactly once, before any step.

use std::thread;

use tracing::{debug, info};

use super::event::{GameEvent, ScoreCause};
use super::observer::{Observer, Snapshot};
use super::result::SimulationResult;
use super::rules;
use crate::core::{AgentId, Error, GameRng, GameState, PerAgent, SimulationConfig, StateError};
use crate::sandbox::{Agent, AgentSandbox, FaultTally, Observation};

/// Where the engine is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Finished,
}

struct Seats {
    first: AgentSandbox,
    second: Option<AgentSandbox>,
}

/// Drives a simulation from setup to the step limit.
pub struct TurnEngine {
    config: SimulationConfig,
    state: GameState,
    phase: Phase,
    seats: Option<Seats>,
    faults: PerAgent<FaultTally>,
}

impl TurnEngine {
    /// Validate `config` and generate the maze and starting state.
    ///
    /// The seed comes from `config.maze.seed`, or from entropy when unset;
    /// either way it is logged and available through `seed()`.
    pub fn new(config: SimulationConfig) -> Result<Self, Error> {
        config.validate()?;
        let rng = GameRng::from_optional_seed(config.maze.seed);
        let state = GameState::generate(&config, rng)?;

        info!(
            seed = state.rng.seed(),
            width = state.maze().width(),
            height = state.maze().height(),
            empty = state.maze().empty_count(),
            "maze generated"
        );

        Ok(Self::from_state(config, state))
    }

    /// Wrap an already-built state (hand-crafted mazes, replays).
    #[must_use]
    pub fn from_state(config: SimulationConfig, state: GameState) -> Self {
        Self {
            config,
            state,
            phase: Phase::NotStarted,
            seats: None,
            faults: PerAgent::default(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// An independent copy of the configuration, safe to hand to agents.
    #[must_use]
    pub fn clone_config(&self) -> SimulationConfig {
        self.config.clone()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Seed of the run's RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.state.rng.seed()
    }

    /// Fault counts so far.
    #[must_use]
    pub fn faults(&self) -> &PerAgent<FaultTally> {
        &self.faults
    }

    /// Registered agent names (`None` for an empty seat).
    #[must_use]
    pub fn names(&self) -> PerAgent<Option<String>> {
        match &self.seats {
            Some(seats) => PerAgent::from_pair(
                Some(seats.first.name().to_string()),
                seats.second.as_ref().map(|s| s.name().to_string()),
            ),
            None => PerAgent::default(),
        }
    }

    // === Registration ===

    /// Register the decision functions. With `second = None` the second
    /// seat stays inert: it keeps its starting cell and never scores.
    pub fn register_agents(
        &mut self,
        mut first: Box<dyn Agent>,
        mut second: Option<Box<dyn Agent>>,
    ) -> Result<(), StateError> {
        if self.seats.is_some() {
            return Err(StateError::AgentsAlreadyRegistered);
        }

        first.configure(self.clone_config());
        if let Some(agent) = second.as_mut() {
            agent.configure(self.clone_config());
        }

        let first = AgentSandbox::spawn(AgentId::First, first)?;
        let second = second
            .map(|agent| AgentSandbox::spawn(AgentId::Second, agent))
            .transpose()?;

        info!(
            first = first.name(),
            second = second.as_ref().map_or("-", |s| s.name()),
            "agents registered"
        );
        self.seats = Some(Seats { first, second });
        Ok(())
    }

    /// Register two agents.
    pub fn register_pair(
        &mut self,
        first: impl Agent,
        second: impl Agent,
    ) -> Result<(), StateError> {
        self.register_agents(Box::new(first), Some(Box::new(second)))
    }

    /// Register a single agent.
    pub fn register_solo(&mut self, agent: impl Agent) -> Result<(), StateError> {
        self.register_agents(Box::new(agent), None)
    }

    // === Stepping ===

    /// Advance the simulation by one step and return what happened.
    pub fn step(&mut self) -> Result<Vec<GameEvent>, StateError> {
        let Some(seats) = self.seats.as_mut() else {
            return Err(StateError::NoAgentsRegistered);
        };
        if self.phase == Phase::Finished {
            return Err(StateError::SimulationFinished {
                steps: self.state.step(),
            });
        }
        self.phase = Phase::Running;

        let mut events = Vec::new();
        let config = &self.config;

        play_turn(
            &mut seats.first,
            &mut self.state,
            config,
            &mut self.faults,
            &mut events,
        );
        if let Some(second) = seats.second.as_mut() {
            play_turn(second, &mut self.state, config, &mut self.faults, &mut events);
        }
        let duel = seats.second.is_some();

        rules::resolve_pickups(&mut self.state, config, duel, &mut events);
        if duel && config.rules.type_advantage {
            rules::resolve_encounter(&mut self.state, config, &mut events)?;
        }

        let step = self.state.advance_step();
        events.push(GameEvent::StepCompleted { step });
        if step >= config.timing.steps {
            self.phase = Phase::Finished;
            events.push(GameEvent::Finished { steps: step });
            debug!(step, "step limit reached");
        }

        Ok(events)
    }

    /// Run to the step limit, reporting to `observer` and honouring the
    /// configured start and step delays.
    pub fn run(&mut self, observer: &mut dyn Observer) -> Result<SimulationResult, StateError> {
        if self.seats.is_none() {
            return Err(StateError::NoAgentsRegistered);
        }

        observer.on_start(&self.snapshot());
        let start_delay = self.config.start_delay();
        if !start_delay.is_zero() && !self.is_finished() {
            thread::sleep(start_delay);
        }

        let step_delay = self.config.step_delay();
        while !self.is_finished() {
            let events = self.step()?;
            observer.on_step(&self.snapshot(), &events);
            if !step_delay.is_zero() && !self.is_finished() {
                thread::sleep(step_delay);
            }
        }

        let result = self.result();
        observer.on_finish(&self.snapshot(), &result);
        Ok(result)
    }

    // === Reporting ===

    /// Current standings. Final once the engine is finished.
    #[must_use]
    pub fn result(&self) -> SimulationResult {
        let scores = self.state.agents().map(|_, agent| agent.score);
        let solo = self.seats.as_ref().is_some_and(|s| s.second.is_none());
        SimulationResult {
            outcome: SimulationResult::outcome_for(&scores, solo),
            scores,
            faults: self.faults.clone(),
            steps: self.state.step(),
            seed: self.seed(),
        }
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            maze: self.state.maze().clone(),
            agents: self.state.agents().clone(),
            names: self.names(),
            step: self.state.step(),
            steps: self.config.timing.steps,
            finished: self.is_finished(),
        }
    }
}

fn observe(state: &GameState, config: &SimulationConfig, id: AgentId) -> Observation {
    let me = state.agent(id);
    let them = state.agent(id.opponent());
    Observation {
        maze: state.maze().clone(),
        position: me.position,
        opponent_position: them.position,
        hand: me.hand,
        opponent_hand: them.hand,
        score: me.score,
        opponent_score: them.score,
        step: state.step(),
        steps: config.timing.steps,
        time_budget: config.max_time(),
    }
}

fn play_turn(
    sandbox: &mut AgentSandbox,
    state: &mut GameState,
    config: &SimulationConfig,
    faults: &mut PerAgent<FaultTally>,
    events: &mut Vec<GameEvent>,
) {
    let id = sandbox.id();
    let observation = observe(state, config, id);
    let verdict = sandbox.invoke(observation, &mut state.rng, config);

    if let Some(fault) = &verdict.fault {
        let kind = fault.kind();
        faults[id].record(kind);
        events.push(GameEvent::Faulted {
            agent: id,
            kind,
            penalty: verdict.penalty,
        });
        if verdict.penalty != 0 {
            state.add_score(id, verdict.penalty);
            events.push(GameEvent::ScoreChanged {
                agent: id,
                delta: verdict.penalty,
                score: state.agent(id).score,
                cause: ScoreCause::Fault(kind),
            });
        }
    }

    let from = state.agent(id).position;
    state.move_agent(id, verdict.position);
    events.push(GameEvent::Moved {
        agent: id,
        from,
        to: verdict.position,
    });
}

//! Pickup and encounter resolution.
//!
//! Both run after every agent has moved for the step:
//! 1. Pickups: agent 1 first; agent 2 only when on a different cell, so a
//!    shared cell pays out once.
//! 2. Encounter: if both agents share a cell and type-advantage mode is on,
//!    the dominant hand earns the bonus and the other agent is relocated.

use std::cmp::Ordering;

use super::event::{GameEvent, ScoreCause};
use crate::core::{AgentId, GameState, SimulationConfig, StateError};
use crate::maze::{CellKind, Tier, EMPTY};

/// Consume the cells under the agents.
pub fn resolve_pickups(
    state: &mut GameState,
    config: &SimulationConfig,
    second_active: bool,
    events: &mut Vec<GameEvent>,
) {
    let [first, second] = state.positions();

    pickup(state, config, AgentId::First, events);
    if second_active && second != first {
        pickup(state, config, AgentId::Second, events);
    }
}

fn pickup(
    state: &mut GameState,
    config: &SimulationConfig,
    agent: AgentId,
    events: &mut Vec<GameEvent>,
) {
    let position = state.agent(agent).position;
    let code = state.maze().get(position).unwrap_or(EMPTY);
    let kind = CellKind::classify(code, config.scoring.score1_value);
    if !kind.is_consumable() {
        return;
    }

    state.collect_cell(position);
    events.push(GameEvent::CellConsumed {
        agent,
        position,
        kind,
    });

    if kind == CellKind::Refresh {
        let steps = state.rng.choose(&[1u8, 2]).copied().unwrap_or(1);
        let from = state.agent(agent).hand;
        let to = state.advance_hand(agent, steps);
        events.push(GameEvent::HandChanged { agent, from, to });
    } else {
        let delta = i64::from(code);
        state.add_score(agent, delta);
        events.push(GameEvent::ScoreChanged {
            agent,
            delta,
            score: state.agent(agent).score,
            cause: ScoreCause::Pickup,
        });
    }

    if !config.rules.regenerate_cells {
        return;
    }
    let Some(tier) = Tier::of(kind) else {
        return;
    };
    if tier == Tier::Refresh && !config.rules.type_advantage {
        return;
    }
    if let Some(at) = state.regenerate(tier, config) {
        let code = state.maze().get(at).unwrap_or(EMPTY);
        events.push(GameEvent::CellRegenerated {
            position: at,
            kind: CellKind::classify(code, config.scoring.score1_value),
        });
    }
}

/// Settle a same-cell meeting between the two agents.
///
/// Callers decide whether encounters apply (second agent present,
/// type-advantage mode on). A tie does nothing.
pub fn resolve_encounter(
    state: &mut GameState,
    config: &SimulationConfig,
    events: &mut Vec<GameEvent>,
) -> Result<(), StateError> {
    let [first, second] = state.positions();
    if first != second {
        return Ok(());
    }

    let first_hand = state.agent(AgentId::First).hand;
    let second_hand = state.agent(AgentId::Second).hand;
    let (winner, loser) = match first_hand.versus(second_hand) {
        Ordering::Greater => (AgentId::First, AgentId::Second),
        Ordering::Less => (AgentId::Second, AgentId::First),
        Ordering::Equal => return Ok(()),
    };

    let bonus = config.scoring.cross_bonus;
    state.add_score(winner, bonus);
    events.push(GameEvent::Encounter {
        winner,
        loser,
        position: first,
        bonus,
    });
    events.push(GameEvent::ScoreChanged {
        agent: winner,
        delta: bonus,
        score: state.agent(winner).score,
        cause: ScoreCause::Encounter,
    });

    let to = state.teleport(loser)?;
    events.push(GameEvent::Relocated {
        agent: loser,
        from: first,
        to,
    });

    Ok(())
}

//! Long-lived worker thread that owns one agent.
//!
//! The engine sends numbered requests and waits for the matching reply
//! with a deadline. A request that misses its deadline is abandoned, not
//! killed: the worker keeps running it, and its eventual reply is
//! discarded by sequence number. Requests that queued up behind it are
//! never run; the worker answers only the newest one, so a single hang
//! costs at most the calls made while `decide` was still busy. Panics
//! inside `decide` are caught so the worker survives them.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use super::agent::{Agent, Observation};
use crate::core::{Position, StateError};

struct Request {
    seq: u64,
    observation: Observation,
}

struct Reply {
    seq: u64,
    outcome: Result<Position, String>,
    elapsed: Duration,
}

/// Result of one deadline-bounded call.
#[derive(Debug)]
pub(crate) enum CallOutcome {
    /// The agent answered in time (by the engine's clock). `elapsed` is the
    /// time spent inside `decide`, measured by the worker.
    Returned {
        outcome: Result<Position, String>,
        elapsed: Duration,
    },
    /// No matching reply before the deadline.
    TimedOut,
    /// The worker thread is gone.
    Unavailable,
}

/// Handle to an agent's worker thread.
///
/// Dropping the handle closes the request channel; the thread exits once
/// its current call (if any) returns. It is never joined.
pub(crate) struct AgentWorker {
    requests: Sender<Request>,
    replies: Receiver<Reply>,
    next_seq: u64,
}

impl AgentWorker {
    /// Move `agent` onto a new named thread.
    pub(crate) fn spawn(agent: Box<dyn Agent>, label: &str) -> Result<Self, StateError> {
        let (requests, request_rx) = mpsc::channel::<Request>();
        let (reply_tx, replies) = mpsc::channel::<Reply>();

        thread::Builder::new()
            .name(format!("agent-{label}"))
            .spawn(move || serve(agent, request_rx, reply_tx))
            .map_err(|source| StateError::WorkerSpawn {
                agent: label.to_string(),
                source,
            })?;

        Ok(Self {
            requests,
            replies,
            next_seq: 0,
        })
    }

    /// Ask for a decision and wait at most `budget` for it.
    pub(crate) fn call(&mut self, observation: Observation, budget: Duration) -> CallOutcome {
        self.next_seq += 1;
        let seq = self.next_seq;
        let deadline = Instant::now() + budget;

        if self.requests.send(Request { seq, observation }).is_err() {
            return CallOutcome::Unavailable;
        }

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.replies.recv_timeout(remaining) {
                Ok(reply) if reply.seq == seq => {
                    return CallOutcome::Returned {
                        outcome: reply.outcome,
                        elapsed: reply.elapsed,
                    };
                }
                Ok(stale) => {
                    trace!(seq = stale.seq, current = seq, "discarding abandoned reply");
                }
                Err(RecvTimeoutError::Timeout) => return CallOutcome::TimedOut,
                Err(RecvTimeoutError::Disconnected) => return CallOutcome::Unavailable,
            }
        }
    }
}

fn serve(mut agent: Box<dyn Agent>, requests: Receiver<Request>, replies: Sender<Reply>) {
    while let Ok(request) = requests.recv() {
        // Anything queued behind the latest request was already given up on.
        let Request { seq, observation } = requests.try_iter().last().unwrap_or(request);
        let started = Instant::now();
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| agent.decide(&observation))) {
            Ok(Ok(position)) => Ok(position),
            Ok(Err(err)) => Err(err.to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        };
        let elapsed = started.elapsed();

        if replies.send(Reply { seq, outcome, elapsed }).is_err() {
            break;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with non-string payload".to_string()
    }
}

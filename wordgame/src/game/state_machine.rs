//! Game session state machine.
//!
//! The machine never performs I/O. Every call to [`GameMachine::handle`]
//! runs synchronously to completion and returns at most one [`Effect`]
//! that a driver must execute. The driver reports the outcome back as a
//! [`MachineEvent`] tagged with the [`InvocationId`] it was issued for, and
//! the machine drops any outcome whose request has since been superseded.

use log::{debug, info, warn};

use super::entities::{GameContext, GameState, InvocationId, Snapshot};
use crate::net::{
    errors::RemoteRequestFailed,
    messages::{GuessOutcome, GuessRequest, NewSession},
};

/// Events a presentation layer may dispatch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameEvent {
    /// Abandon whatever is going on and start a fresh session.
    New,
    /// Submit a letter. Only honored while playing.
    Guess(char),
    /// Re-attempt the request that failed. Only honored in failure.
    Retry,
}

/// Everything the machine reacts to: user events plus tagged completions
/// of the remote requests it asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum MachineEvent {
    User(GameEvent),
    SessionCreated {
        invocation: InvocationId,
        result: Result<NewSession, RemoteRequestFailed>,
    },
    GuessJudged {
        invocation: InvocationId,
        result: Result<GuessOutcome, RemoteRequestFailed>,
    },
}

impl From<GameEvent> for MachineEvent {
    fn from(value: GameEvent) -> Self {
        Self::User(value)
    }
}

/// A remote request the driver must start on the machine's behalf.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    CreateSession {
        invocation: InvocationId,
    },
    SubmitGuess {
        invocation: InvocationId,
        request: GuessRequest,
    },
}

impl Effect {
    #[must_use]
    pub const fn invocation(&self) -> InvocationId {
        match self {
            Self::CreateSession { invocation } | Self::SubmitGuess { invocation, .. } => *invocation,
        }
    }
}

/// What a remote request was for. Kept while it is in flight, and after
/// a failure so that `retry` can re-attempt exactly that request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Request {
    CreateSession,
    SubmitGuess(char),
}

/// The only request whose completion is still wanted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PendingRequest {
    invocation: InvocationId,
    request: Request,
}

/// Finite-state orchestration of one game session at a time.
#[derive(Debug)]
pub struct GameMachine {
    state: GameState,
    context: GameContext,
    next_invocation: u64,
    pending: Option<PendingRequest>,
    failed: Option<Request>,
}

impl Default for GameMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMachine {
    /// Create a machine in the quiescent `idle` state with default context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: GameState::Idle,
            context: GameContext::default(),
            next_invocation: 0,
            pending: None,
            failed: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn context(&self) -> &GameContext {
        &self.context
    }

    /// Copy of the current state and context for presentation layers.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            context: self.context.clone(),
        }
    }

    /// Request the machine is currently waiting on, if any.
    #[must_use]
    pub fn pending(&self) -> Option<InvocationId> {
        self.pending.map(|pending| pending.invocation)
    }

    /// Process one event to completion, including any automatic
    /// transitions it triggers.
    pub fn handle(&mut self, event: impl Into<MachineEvent>) -> Option<Effect> {
        let before = self.state;
        let effect = match event.into() {
            MachineEvent::User(event) => self.handle_user(event),
            MachineEvent::SessionCreated { invocation, result } => {
                self.handle_session_created(invocation, result);
                None
            }
            MachineEvent::GuessJudged { invocation, result } => {
                self.handle_guess_judged(invocation, result);
                None
            }
        };

        if before != self.state {
            debug!("session machine: {before} -> {}", self.state);
        }

        effect
    }

    fn handle_user(&mut self, event: GameEvent) -> Option<Effect> {
        match (self.state, event) {
            (_, GameEvent::New) => Some(self.start_session()),
            (GameState::Playing, GameEvent::Guess(letter)) => {
                self.context.current_guess = Some(letter);
                self.context.guessed_letters.push(letter);
                Some(self.submit_guess(letter))
            }
            (GameState::Failure, GameEvent::Retry) => match self.failed.take() {
                Some(Request::SubmitGuess(letter)) => {
                    info!("Retrying guess '{letter}' for session {}", self.context.id);
                    self.context.current_guess = Some(letter);
                    Some(self.submit_guess(letter))
                }
                Some(Request::CreateSession) => {
                    info!("Retrying session creation");
                    Some(self.start_session())
                }
                None => {
                    debug!("session machine: nothing to retry");
                    None
                }
            },
            (state, event) => {
                debug!("session machine: ignoring {event:?} while {state}");
                None
            }
        }
    }

    fn handle_session_created(
        &mut self,
        invocation: InvocationId,
        result: Result<NewSession, RemoteRequestFailed>,
    ) {
        let Some(request) = self.accept_completion(invocation, GameState::Loading) else {
            return;
        };

        match result {
            Ok(session) => {
                info!(
                    "Session {} created ({} letters, {} guesses)",
                    session.id,
                    session.current.chars().count(),
                    session.guesses_remaining
                );
                self.context = GameContext {
                    id: session.id,
                    current: session.current,
                    guesses_remaining: session.guesses_remaining,
                    guessed_letters: Vec::new(),
                    current_guess: None,
                };
                self.enter_playing();
            }
            Err(error) => self.fail(request, &error),
        }
    }

    fn handle_guess_judged(
        &mut self,
        invocation: InvocationId,
        result: Result<GuessOutcome, RemoteRequestFailed>,
    ) {
        let Some(request) = self.accept_completion(invocation, GameState::Guessing) else {
            return;
        };

        // Leaving guessing always clears the letter in flight.
        self.context.current_guess = None;

        match result {
            Ok(outcome) => {
                self.context.current = outcome.current;
                self.context.guesses_remaining = outcome.guesses_remaining;
                self.enter_playing();
            }
            Err(error) => self.fail(request, &error),
        }
    }

    /// Claim a completion if it answers the request the machine is still
    /// waiting on in `expected`. Anything else is stale.
    fn accept_completion(&mut self, invocation: InvocationId, expected: GameState) -> Option<Request> {
        match self.pending {
            Some(pending) if self.state == expected && pending.invocation == invocation => {
                self.pending = None;
                Some(pending.request)
            }
            _ => {
                debug!(
                    "session machine: dropping stale completion {invocation} (state {}, waiting on {:?})",
                    self.state,
                    self.pending()
                );
                None
            }
        }
    }

    fn start_session(&mut self) -> Effect {
        self.context = GameContext::default();
        self.failed = None;
        self.state = GameState::Loading;
        let invocation = self.issue(Request::CreateSession);
        Effect::CreateSession { invocation }
    }

    fn submit_guess(&mut self, letter: char) -> Effect {
        self.state = GameState::Guessing;
        let invocation = self.issue(Request::SubmitGuess(letter));
        Effect::SubmitGuess {
            invocation,
            request: GuessRequest::new(self.context.id.clone(), letter),
        }
    }

    fn issue(&mut self, request: Request) -> InvocationId {
        self.next_invocation += 1;
        let invocation = InvocationId(self.next_invocation);
        self.pending = Some(PendingRequest { invocation, request });
        invocation
    }

    /// Enter `playing` and settle the automatic transitions. A solved mask
    /// wins even when the same guess used up the last attempt.
    fn enter_playing(&mut self) {
        self.state = if self.context.is_solved() {
            info!("Session {} won: {}", self.context.id, self.context.current);
            GameState::Win
        } else if self.context.is_exhausted() {
            info!("Session {} lost: {}", self.context.id, self.context.current);
            GameState::Lose
        } else {
            GameState::Playing
        };
    }

    fn fail(&mut self, request: Request, error: &RemoteRequestFailed) {
        warn!("Session {:?}: {error}", self.context.id);
        self.failed = Some(request);
        self.state = GameState::Failure;
    }
}

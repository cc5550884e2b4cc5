//! Session actor implementation with async message handling.

use super::messages::{SessionError, SessionMessage};
use crate::{
    config::SessionConfig,
    game::{Effect, GameEvent, GameMachine, MachineEvent, Snapshot},
    net::client::Authority,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// Session actor handle for sending messages
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
    snapshots: watch::Receiver<Snapshot>,
}

impl SessionHandle {
    /// Send a message to the session
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the actor has stopped.
    pub async fn send(&self, message: SessionMessage) -> Result<(), SessionError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    /// Dispatch a presentation event
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the actor has stopped.
    pub async fn dispatch(&self, event: GameEvent) -> Result<(), SessionError> {
        self.send(SessionMessage::Dispatch(event)).await
    }

    /// Fetch the current snapshot
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the actor has stopped.
    pub async fn snapshot(&self) -> Result<Snapshot, SessionError> {
        let (response, rx) = oneshot::channel();
        self.send(SessionMessage::GetSnapshot { response }).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Subscribe to published snapshots.
    ///
    /// The receiver always holds the latest snapshot; a reader that falls
    /// behind skips straight to it. The current snapshot counts as unseen,
    /// so the first `changed()` returns immediately. Once the actor stops,
    /// `changed()` returns an error.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        let mut receiver = self.snapshots.clone();
        receiver.mark_changed();
        receiver
    }

    /// Stop the actor
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the actor has already stopped.
    pub async fn close(&self) -> Result<(), SessionError> {
        self.send(SessionMessage::Close).await
    }
}

/// Actor owning one [`GameMachine`] and driving its remote requests
pub struct SessionActor<A: Authority + 'static> {
    /// Session state machine
    machine: GameMachine,

    /// Remote game authority
    authority: Arc<A>,

    /// Driver configuration
    config: SessionConfig,

    /// Message inbox
    inbox: mpsc::Receiver<SessionMessage>,

    /// Tagged completions coming back from spawned requests
    completions: mpsc::UnboundedReceiver<MachineEvent>,
    completions_tx: mpsc::UnboundedSender<MachineEvent>,

    /// Last published snapshot, shared with every subscriber
    snapshots: watch::Sender<Snapshot>,

    /// Is session closed
    is_closed: bool,
}

impl<A: Authority + 'static> SessionActor<A> {
    /// Create a new session actor
    ///
    /// # Returns
    ///
    /// * `(SessionActor, SessionHandle)` - Actor and handle for sending messages
    pub fn new(authority: Arc<A>, config: SessionConfig) -> (Self, SessionHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity.max(1));
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let machine = GameMachine::new();
        let (snapshots, snapshot_rx) = watch::channel(machine.snapshot());

        let actor = Self {
            machine,
            authority,
            config,
            inbox,
            completions,
            completions_tx,
            snapshots,
            is_closed: false,
        };

        (
            actor,
            SessionHandle {
                sender,
                snapshots: snapshot_rx,
            },
        )
    }

    /// Run the session actor event loop
    pub async fn run(mut self) {
        log::info!("Game session starting");

        if self.config.autostart {
            self.process(GameEvent::New.into());
        }

        loop {
            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(message) => self.handle_message(message),
                    // Every handle dropped.
                    None => break,
                },

                Some(event) = self.completions.recv() => {
                    self.process(event);
                }
            }

            if self.is_closed {
                break;
            }
        }

        log::info!("Game session closed");
    }

    /// Handle a session message
    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Dispatch(event) => {
                self.process(event.into());
            }

            SessionMessage::GetSnapshot { response } => {
                let _ = response.send(self.machine.snapshot());
            }

            SessionMessage::Close => {
                self.is_closed = true;
            }
        }
    }

    /// Feed one event through the machine, start whatever request it asks
    /// for, and publish the resulting snapshot.
    fn process(&mut self, event: MachineEvent) {
        if let Some(effect) = self.machine.handle(event) {
            self.execute(effect);
        }
        self.publish();
    }

    /// Run a remote request on its own task. The task never touches the
    /// machine; it only reports back through the completion channel.
    fn execute(&self, effect: Effect) {
        let authority = Arc::clone(&self.authority);
        let completions = self.completions_tx.clone();

        log::debug!("Starting request {}", effect.invocation());

        tokio::spawn(async move {
            let event = match effect {
                Effect::CreateSession { invocation } => MachineEvent::SessionCreated {
                    invocation,
                    result: authority.create_session().await,
                },
                Effect::SubmitGuess {
                    invocation,
                    request,
                } => MachineEvent::GuessJudged {
                    invocation,
                    result: authority.submit_guess(&request).await,
                },
            };

            // The actor may be gone by now; nothing left to update then.
            let _ = completions.send(event);
        });
    }

    /// Publish the machine's snapshot if it differs from the last one
    fn publish(&self) {
        let snapshot = self.machine.snapshot();
        let changed = self.snapshots.send_if_modified(|published| {
            if *published == snapshot {
                false
            } else {
                *published = snapshot;
                true
            }
        });

        if changed {
            log::debug!(
                "Published snapshot to {} subscriber(s)",
                self.snapshots.receiver_count()
            );
        }
    }
}

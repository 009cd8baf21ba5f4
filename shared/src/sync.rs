//! Turn-ordered move exchange between two peers.
//!
//! Each peer runs one [`Session`] around its own [`GameEngine`]. The session
//! plays the local color, forwards accepted local moves to the peer, and
//! re-validates every move the peer claims before applying it. Any
//! disagreement ends the session.
//!
//! The session is a single cooperative loop: every frame it takes at most one
//! local command and decodes at most one inbound message, waiting a bounded
//! time for bytes so neither source can stall the other.

use crate::error::{ProtocolViolation, SessionError};
use crate::game::GameEngine;
use crate::message::{FrameDecoder, Message, MAX_WIRE_INDEX};
use crate::player::{GameResult, Player};
use log::{debug, error, info, warn};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::{interval, timeout, Duration, MissedTickBehavior};

const READ_CHUNK: usize = 64;

/// Timing of the cooperative loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Length of one loop frame.
    pub frame: Duration,
    /// Longest a frame waits for inbound bytes.
    pub poll_wait: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(16),
            poll_wait: Duration::from_millis(4),
        }
    }
}

/// Input from the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    Place { row: usize, col: usize },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished(GameResult),
    Quit,
}

/// What one frame of work did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    Updated,
    Ended(SessionOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Playing,
    /// The local player won and the peer has yet to send `YOU-WIN`.
    AwaitingConcession,
}

enum Inbound {
    Message(Message),
    Closed,
}

pub struct Session<S> {
    stream: S,
    engine: GameEngine,
    local: Player,
    decoder: FrameDecoder,
    phase: Phase,
    config: SessionConfig,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an established stream. `local` is the color this peer plays.
    pub fn new(
        stream: S,
        engine: GameEngine,
        local: Player,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let (cols, rows) = (engine.cols(), engine.rows());
        if cols > MAX_WIRE_INDEX + 1 || rows > MAX_WIRE_INDEX + 1 {
            return Err(SessionError::UnsupportedGeometry { cols, rows });
        }

        info!("Session started as {} on a {}x{} board", local, cols, rows);
        Ok(Self {
            stream,
            engine,
            local,
            decoder: FrameDecoder::new(),
            phase: Phase::Playing,
            config,
        })
    }

    pub fn local_player(&self) -> Player {
        self.local
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Drives frames until the game ends, the player quits, or the session
    /// fails. `on_update` sees the engine at start and after every change.
    ///
    /// A closed command channel counts as a quit.
    pub async fn run<F>(
        &mut self,
        commands: &mut mpsc::Receiver<LocalCommand>,
        mut on_update: F,
    ) -> Result<SessionOutcome, SessionError>
    where
        F: FnMut(&GameEngine),
    {
        let mut frame = interval(self.config.frame);
        frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
        on_update(&self.engine);

        loop {
            frame.tick().await;

            let command = match commands.try_recv() {
                Ok(command) => Some(command),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(LocalCommand::Quit),
            };

            match self.step(command).await? {
                Step::Idle => {}
                Step::Updated => on_update(&self.engine),
                Step::Ended(outcome) => {
                    on_update(&self.engine);
                    return Ok(outcome);
                }
            }
        }
    }

    /// One frame: at most one local command, then at most one inbound message.
    ///
    /// On error the session is already torn down; the peer has been sent
    /// `ERROR` if the error was a protocol violation.
    pub async fn step(&mut self, command: Option<LocalCommand>) -> Result<Step, SessionError> {
        match self.frame(command).await {
            Ok(Step::Ended(outcome)) => {
                info!("Session ended: {:?}", outcome);
                self.close().await;
                Ok(Step::Ended(outcome))
            }
            Ok(step) => Ok(step),
            Err(err) => {
                self.abort(&err).await;
                Err(err)
            }
        }
    }

    async fn frame(&mut self, command: Option<LocalCommand>) -> Result<Step, SessionError> {
        let mut updated = false;

        match command {
            Some(LocalCommand::Quit) => return Ok(Step::Ended(SessionOutcome::Quit)),
            Some(LocalCommand::Place { row, col }) => match self.submit_local_move(row, col).await? {
                Step::Ended(outcome) => return Ok(Step::Ended(outcome)),
                Step::Updated => updated = true,
                Step::Idle => {}
            },
            None => {}
        }

        let step = match self.poll_inbound().await? {
            Some(Inbound::Message(message)) => self.handle_message(message).await?,
            Some(Inbound::Closed) => self.handle_closed()?,
            None => Step::Idle,
        };

        Ok(match step {
            Step::Idle if updated => Step::Updated,
            step => step,
        })
    }

    /// Applies and sends a local selection. Selections that are out of turn
    /// or not droppable are ignored.
    async fn submit_local_move(&mut self, row: usize, col: usize) -> Result<Step, SessionError> {
        if self.engine.game_state() != self.local.to_move() {
            debug!("Ignoring selection (row {}, col {}): not our turn", row, col);
            return Ok(Step::Idle);
        }
        if !self.engine.is_valid_move(row, col) {
            debug!("Ignoring selection (row {}, col {}): not droppable", row, col);
            return Ok(Step::Idle);
        }
        let message = match Message::place(row, col) {
            Some(message) => message,
            None => return Ok(Step::Idle),
        };
        if let Err(err) = self.engine.apply_move(row, col) {
            debug!("Ignoring selection: {}", err);
            return Ok(Step::Idle);
        }

        info!("{} (local) plays row {}, col {}", self.local, row, col);
        self.send(message).await?;

        match self.engine.game_result() {
            Ok(result) if result.winner() == Some(self.local) => {
                info!("{}; waiting for the peer to concede", result);
                self.phase = Phase::AwaitingConcession;
                Ok(Step::Updated)
            }
            Ok(result) => Ok(Step::Ended(SessionOutcome::Finished(result))),
            Err(_) => Ok(Step::Updated),
        }
    }

    async fn handle_message(&mut self, message: Message) -> Result<Step, SessionError> {
        match message {
            Message::Move { col, row } => self.apply_remote_move(row as usize, col as usize).await,
            Message::YouWin => match self.phase {
                Phase::AwaitingConcession => {
                    info!("Peer conceded");
                    Ok(Step::Ended(SessionOutcome::Finished(self.local.win())))
                }
                Phase::Playing => Err(ProtocolViolation::UnexpectedMessage(message).into()),
            },
            Message::Error => {
                warn!("Peer reported an error");
                Err(SessionError::PeerAborted)
            }
        }
    }

    async fn apply_remote_move(&mut self, row: usize, col: usize) -> Result<Step, SessionError> {
        let remote = self.local.opposite();
        if self.engine.game_state() != remote.to_move() {
            return Err(ProtocolViolation::OutOfTurn { row, col }.into());
        }
        if !self.engine.is_valid_move(row, col) {
            return Err(ProtocolViolation::IllegalRemoteMove { row, col }.into());
        }
        self.engine
            .apply_move(row, col)
            .map_err(|_| ProtocolViolation::IllegalRemoteMove { row, col })?;

        info!("{} (remote) plays row {}, col {}", remote, row, col);

        match self.engine.game_result() {
            Ok(result) => {
                if result.winner() == Some(remote) {
                    info!("{}; conceding", result);
                    self.send(Message::YouWin).await?;
                }
                Ok(Step::Ended(SessionOutcome::Finished(result)))
            }
            Err(_) => Ok(Step::Updated),
        }
    }

    fn handle_closed(&mut self) -> Result<Step, SessionError> {
        match self.phase {
            Phase::AwaitingConcession => {
                warn!("Peer closed the connection without conceding");
                Ok(Step::Ended(SessionOutcome::Finished(self.local.win())))
            }
            Phase::Playing => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "peer closed the connection",
            )
            .into()),
        }
    }

    /// Waits up to `poll_wait` for one complete message.
    async fn poll_inbound(&mut self) -> Result<Option<Inbound>, SessionError> {
        if let Some(message) = self.decoder.next_message()? {
            return Ok(Some(Inbound::Message(message)));
        }

        match timeout(self.config.poll_wait, self.read_message()).await {
            Ok(inbound) => inbound.map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Reads until a full message is buffered. Cancel-safe: bytes already
    /// read stay in the decoder.
    async fn read_message(&mut self) -> Result<Inbound, SessionError> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let len = self.stream.read(&mut chunk).await?;
            if len == 0 {
                return Ok(Inbound::Closed);
            }

            self.decoder.extend(&chunk[..len]);
            if let Some(message) = self.decoder.next_message()? {
                return Ok(Inbound::Message(message));
            }
        }
    }

    async fn send(&mut self, message: Message) -> Result<(), SessionError> {
        debug!("Sending {}", message);
        self.stream.write_all(&message.encode()).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn abort(&mut self, err: &SessionError) {
        error!("Session aborted: {}", err);
        if err.notifies_peer() {
            if let Err(e) = self.send(Message::Error).await {
                warn!("Failed to notify peer: {}", e);
            }
        }
        self.close().await;
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Shutdown failed: {}", e);
        }
    }
}

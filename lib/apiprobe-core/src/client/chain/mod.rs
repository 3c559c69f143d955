//! The ordered pipeline of handlers applied to a new connection.
//!
//! A chain always carries three built-in stages in a fixed order — request
//! encoding/auth injection, response logging/decoding, transport selection —
//! and lets callers insert custom [`Stage`]s before or after that sequence.
//! The built-in order must not change: the response stage assumes the request
//! stage has run, and the transport stage is terminal.

mod connection;
mod stage;

pub use self::connection::ConnectionBuilder;
pub use self::stage::{RequestStage, ResponseStage, Stage, TransportStage};

use crate::client::error::ConfigError;
use crate::client::oauth2::OAuth2Params;

/// An ordered, immutable-once-applied list of pipeline stages.
///
/// Built fresh for every client build; the built-in stages capture the
/// credential and logging state passed to [`assemble`](Self::assemble) and do
/// not re-read it afterward. Configuration changes therefore affect later
/// builds only, never chains (or clients) that already exist.
#[derive(Debug)]
pub struct HandlerChain {
    before: Vec<Box<dyn Stage>>,
    builtin: [Box<dyn Stage>; 3],
    after: Vec<Box<dyn Stage>>,
}

impl HandlerChain {
    /// Assembles the built-in three-stage pipeline from the current
    /// configuration.
    ///
    /// The credential provider is read by reference and its token snapshotted
    /// here; `logging` is the already-resolved logging preference.
    pub fn assemble(credentials: Option<&OAuth2Params>, logging: Option<&str>) -> Self {
        Self {
            before: Vec::new(),
            builtin: [
                Box::new(RequestStage::new(credentials)),
                Box::new(ResponseStage::new(logging)),
                Box::new(TransportStage),
            ],
            after: Vec::new(),
        }
    }

    /// Inserts a custom stage to run before the built-in sequence.
    ///
    /// Stages inserted here run in insertion order, all of them ahead of the
    /// request stage.
    pub fn insert_before(&mut self, stage: impl Stage + 'static) {
        self.before.push(Box::new(stage));
    }

    /// Inserts a custom stage to run after the built-in sequence.
    pub fn insert_after(&mut self, stage: impl Stage + 'static) {
        self.after.push(Box::new(stage));
    }

    /// Returns the number of stages in the chain; `3` unless custom stages
    /// were inserted.
    pub fn stage_count(&self) -> usize {
        self.before.len() + self.builtin.len() + self.after.len()
    }

    /// Iterates the stages in application order.
    pub fn stages(&self) -> impl Iterator<Item = &dyn Stage> {
        self.before
            .iter()
            .chain(self.builtin.iter())
            .chain(self.after.iter())
            .map(|stage| &**stage)
    }

    /// Applies every stage, in order, to the connection.
    pub(crate) fn apply(&self, connection: &mut ConnectionBuilder) -> Result<(), ConfigError> {
        for stage in self.stages() {
            stage.apply(connection)?;
        }
        Ok(())
    }
}

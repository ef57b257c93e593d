//! Presentation flow state machine.
//!
//! A pure transition function over three states and four events, plus the
//! [`Flow`] interpreter that holds the current state. The machine knows
//! nothing about credentials, network calls, or rendering; the
//! presentation layer chooses which event to send after inspecting the
//! session client.

use std::fmt;

/// The phase of a presentation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    /// Waiting for the operator to authenticate.
    Login,
    /// Composing a message.
    Message,
    /// Showing the outcome of the last send attempt.
    Result,
}

/// Events accepted by the flow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowEvent {
    /// Authentication succeeded.
    Auth,
    /// A send attempt completed (successfully or not).
    Sent,
    /// The credential was revoked; log in again.
    Reauth,
    /// The operator wants to send another message.
    New,
}

impl FlowState {
    /// The transition table, as a pure function.
    ///
    /// Events with no transition from the current state are no-ops.
    pub fn on(self, event: FlowEvent) -> FlowState {
        match (self, event) {
            (FlowState::Login, FlowEvent::Auth) => FlowState::Message,
            (FlowState::Message, FlowEvent::Sent) => FlowState::Result,
            (FlowState::Message, FlowEvent::Reauth) => FlowState::Login,
            (FlowState::Result, FlowEvent::New) => FlowState::Message,
            (state, _) => state,
        }
    }
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::Login
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Login => "login",
            FlowState::Message => "message",
            FlowState::Result => "result",
        };
        write!(f, "{}", name)
    }
}

/// Interpreter holding the current flow state.
#[derive(Debug, Clone, Default)]
pub struct Flow {
    state: FlowState,
}

impl Flow {
    /// Create a flow in the initial `login` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Apply an event and return the resulting state.
    ///
    /// The transition table is applied on every call; undefined events
    /// leave the state unchanged.
    pub fn send(&mut self, event: FlowEvent) -> FlowState {
        self.state = self.state.on(event);
        self.state
    }
}

//! Ports: named anchors of the transition graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an item can sit or pass through.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Port {
    /// Visible slot on the runway, `0..count`.
    Slot(usize),
    /// Exit threshold at the head of the runway.
    StartPort,
    /// Exit threshold at the tail of the runway.
    EndPort,
    /// Off-stage rest position.
    Sleep,
    /// No movement; only valid as a transition target.
    Stick,
}

impl Port {
    /// True for the entry/exit thresholds.
    #[inline]
    pub fn is_access(&self) -> bool {
        matches!(self, Port::StartPort | Port::EndPort)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Slot(i) => write!(f, "{i}"),
            Port::StartPort => f.write_str("startPort"),
            Port::EndPort => f.write_str("endPort"),
            Port::Sleep => f.write_str("sleep"),
            Port::Stick => f.write_str("stick"),
        }
    }
}

impl From<usize> for Port {
    fn from(slot: usize) -> Self {
        Port::Slot(slot)
    }
}

/// Cache key of a transition. Renders as `"<from>_<to>"`, with an empty
/// `<from>` when the transition has no explicit origin.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TransitionKey {
    pub from: Option<Port>,
    pub to: Port,
}

impl TransitionKey {
    pub fn new(from: Option<Port>, to: Port) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(f, "{from}_{}", self.to),
            None => write!(f, "_{}", self.to),
        }
    }
}

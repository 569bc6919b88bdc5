use crate::cards::board::Board;
use crate::cards::street::Stage;
use crate::tree::action::Action;
use crate::tree::strategy::{RegretMatrix, StrategyMatrix};
use crate::Chips;

pub type NodeId = usize;

/// A decision point for the acting player: attaches the mixed
/// strategy and regret accumulators the resolver reads and writes
/// during its downward/upward passes.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// 0 or 1 — whose range `sigma`/`regret` belong to at this node.
    pub acting: usize,
    pub stage: Stage,
    /// Actions taken within the current stage; resets at every chance node.
    pub depth: usize,
    pub board: Board,
    pub pot: Chips,
    pub bet_to_call: Chips,
    pub raises_left: usize,
    /// Chips each player has committed to the pot so far this hand.
    pub committed: [Chips; 2],
    /// Actions since the last raise (or stage start); used to detect
    /// that a betting round has closed.
    pub round_history: Vec<Action>,
    pub sigma: StrategyMatrix,
    pub regret: RegretMatrix,
    /// Realized action -> child node, at most one per `Action`
    /// variant. Populated only when `closed_into` is `None`.
    pub children: Vec<(Action, NodeId)>,
    /// If entering this state already closed the betting round, it
    /// has no actions of its own: it transitions straight into a
    /// `ChanceState` (next stage) or a showdown `TerminalState`
    /// (closing the river), stored here instead of `children`.
    pub closed_into: Option<NodeId>,
    pub v_acting: Vec<f32>,
    pub v_other: Vec<f32>,
}

impl PlayerState {
    pub fn child(&self, action: Action) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }

    /// True if, given the round history this state was entered with,
    /// the betting round is already closed and this state should not
    /// generate its own fold/call/raise children.
    ///
    /// `round_history` resets to a single-element `[Raise]` whenever
    /// a raise occurs (the raiser's turn is already accounted for),
    /// and otherwise accumulates calls; two entries since the last
    /// raise means every remaining heads-up player has acted at the
    /// current bet level.
    pub fn round_closed(&self) -> bool {
        self.round_history.len() >= 2
    }
}

/// A public-card reveal node: one child [`PlayerState`] per sampled
/// board-completion event, capped at `max_events` rather than
/// enumerating every combinatorial outcome.
#[derive(Debug, Clone)]
pub struct ChanceState {
    pub stage: Stage,
    pub board: Board,
    pub events: Vec<NodeId>,
    pub v_acting: Vec<f32>,
    pub v_other: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    /// `folder` is the index (0 or 1) of the player who folded.
    Fold { folder: usize },
    Showdown,
}

#[derive(Debug, Clone)]
pub struct TerminalState {
    pub kind: TerminalKind,
    pub board: Board,
    pub pot: Chips,
    /// Populated by the resolver's downward pass (zero until then);
    /// a terminal's evaluation depends on the ranges live at the time
    /// it was reached, which vary by CFR iteration, so unlike most of
    /// this node's fields it cannot be derived from `kind`/`board` alone.
    pub v_acting: Vec<f32>,
    pub v_other: Vec<f32>,
}

#[derive(Debug, Clone)]
pub enum Node {
    Player(PlayerState),
    Chance(ChanceState),
    Terminal(TerminalState),
}

impl Node {
    pub fn as_player(&self) -> Option<&PlayerState> {
        match self {
            Self::Player(p) => Some(p),
            _ => None,
        }
    }
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match self {
            Self::Player(p) => Some(p),
            _ => None,
        }
    }
    pub fn as_chance(&self) -> Option<&ChanceState> {
        match self {
            Self::Chance(c) => Some(c),
            _ => None,
        }
    }
    pub fn as_terminal(&self) -> Option<&TerminalState> {
        match self {
            Self::Terminal(t) => Some(t),
            _ => None,
        }
    }
}

use super::action::Action;
use super::node::{ChanceState, Node, NodeId, PlayerState, TerminalKind, TerminalState};
use super::strategy::{RegretMatrix, StrategyMatrix};
use crate::cards::board::Board;
use crate::cards::street::Stage;
use crate::config::GameConfig;
use crate::oracle::rollout::undealt_cards;
use crate::Chips;
use rand::seq::SliceRandom;
use rand::Rng;

/// The realized outcome of a requested action, after chip accounting:
/// a raise a player can't afford becomes a call; a call a player
/// can't afford becomes a fold. These three functions are the only
/// place chip accounting happens.
#[derive(Debug, Clone, Copy)]
pub struct ActionOutcome {
    pub action: Action,
    pub bet_to_call: Chips,
    pub raises_left: usize,
    pub committed: [Chips; 2],
}

pub fn handle_fold(committed: [Chips; 2], bet_to_call: Chips, raises_left: usize) -> ActionOutcome {
    ActionOutcome {
        action: Action::Fold,
        bet_to_call,
        raises_left,
        committed,
    }
}

pub fn handle_call(
    acting: usize,
    committed: [Chips; 2],
    bet_to_call: Chips,
    raises_left: usize,
    stack: Chips,
) -> ActionOutcome {
    let owed = bet_to_call - committed[acting];
    let available = stack - committed[acting];
    if owed > available {
        return handle_fold(committed, bet_to_call, raises_left);
    }
    let mut committed = committed;
    committed[acting] += owed;
    ActionOutcome {
        action: Action::Call,
        bet_to_call,
        raises_left,
        committed,
    }
}

pub fn handle_raise(
    acting: usize,
    committed: [Chips; 2],
    bet_to_call: Chips,
    raises_left: usize,
    stack: Chips,
    raise_unit: Chips,
) -> ActionOutcome {
    if raises_left == 0 {
        return handle_call(acting, committed, bet_to_call, raises_left, stack);
    }
    let new_bet_to_call = bet_to_call + raise_unit;
    let owed = new_bet_to_call - committed[acting];
    let available = stack - committed[acting];
    if owed > available {
        return handle_call(acting, committed, bet_to_call, raises_left, stack);
    }
    let mut committed = committed;
    committed[acting] += owed;
    ActionOutcome {
        action: Action::Raise,
        bet_to_call: new_bet_to_call,
        raises_left: raises_left - 1,
        committed,
    }
}

/// Builds a depth-limited public betting tree in an arena indexed by
/// `NodeId`, so traversal and the resolver's per-node buffers are
/// plain index lookups rather than a pointer-chasing object graph.
pub struct StateManager {
    config: GameConfig,
    arena: Vec<Node>,
}

impl StateManager {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            arena: Vec::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    /// Mutable node access for the resolver's downward/upward passes,
    /// which write per-iteration values and regret onto existing nodes.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.arena[id]
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.arena.push(node);
        self.arena.len() - 1
    }

    #[allow(clippy::too_many_arguments)]
    pub fn generate_root_state(
        &mut self,
        acting: usize,
        committed: [Chips; 2],
        board: Board,
        pot: Chips,
        raises_left: usize,
        bet_to_call: Chips,
        stage: Stage,
        round_history: Vec<Action>,
        depth: usize,
        h: usize,
    ) -> NodeId {
        let state = PlayerState {
            acting,
            stage,
            depth,
            board,
            pot,
            bet_to_call,
            raises_left,
            committed,
            round_history,
            sigma: StrategyMatrix::uniform(h),
            regret: RegretMatrix::zeros(h),
            children: Vec::new(),
            closed_into: None,
            v_acting: vec![0.0; h],
            v_other: vec![0.0; h],
        };
        self.push(Node::Player(state))
    }

    /// Expands `root` until every leaf is beyond `end_stage`, at or
    /// past `end_depth` within `end_stage`, a `TerminalState`, or a
    /// leaf of a pruned-events chance node. `known` holds cards
    /// already dealt to either player's hole, excluded from chance
    /// sampling.
    pub fn generate_subtree<R: Rng>(
        &mut self,
        root: NodeId,
        end_stage: Stage,
        end_depth: usize,
        known: crate::cards::hand::Hand,
        rng: &mut R,
    ) {
        let (stage, depth) = {
            let p = match &self.arena[root] {
                Node::Player(p) => p,
                _ => return,
            };
            (p.stage, p.depth)
        };
        if stage > end_stage || (stage == end_stage && depth >= end_depth) {
            return;
        }

        let closed = self.arena[root].as_player().unwrap().round_closed();
        if closed {
            if stage == Stage::Rive {
                let (board, pot) = {
                    let p = self.arena[root].as_player().unwrap();
                    (p.board, p.pot)
                };
                let h = self.config.n_hole_pairs();
                let terminal = self.push(Node::Terminal(TerminalState {
                    kind: TerminalKind::Showdown,
                    board,
                    pot,
                    v_acting: vec![0.0; h],
                    v_other: vec![0.0; h],
                }));
                self.arena[root].as_player_mut().unwrap().closed_into = Some(terminal);
            } else {
                let chance_id = self.attach_chance(root, known, rng);
                self.arena[root].as_player_mut().unwrap().closed_into = Some(chance_id);
                let events = self.arena[chance_id].as_chance().unwrap().events.clone();
                for event in events {
                    self.generate_subtree(event, end_stage, end_depth, known, rng);
                }
            }
            return;
        }

        self.attach_actions(root);
        let child_ids: Vec<NodeId> = self.arena[root]
            .as_player()
            .unwrap()
            .children
            .iter()
            .map(|(_, id)| *id)
            .collect();
        for id in child_ids {
            if matches!(self.arena[id], Node::Player(_)) {
                self.generate_subtree(id, end_stage, end_depth, known, rng);
            }
        }
    }

    fn attach_actions(&mut self, root: NodeId) {
        let (acting, board, pot, bet_to_call, raises_left, committed, round_history, stage, depth, h) = {
            let p = self.arena[root].as_player().unwrap();
            (
                p.acting,
                p.board,
                p.pot,
                p.bet_to_call,
                p.raises_left,
                p.committed,
                p.round_history.clone(),
                p.stage,
                p.depth,
                p.sigma.h(),
            )
        };

        let mut children = Vec::with_capacity(3);
        for requested in Action::ALL {
            let outcome = match requested {
                Action::Fold => handle_fold(committed, bet_to_call, raises_left),
                Action::Call => handle_call(acting, committed, bet_to_call, raises_left, self.config.stack),
                Action::Raise => handle_raise(
                    acting,
                    committed,
                    bet_to_call,
                    raises_left,
                    self.config.stack,
                    self.config.big_blind,
                ),
            };

            let child_id = if outcome.action == Action::Fold {
                self.push(Node::Terminal(TerminalState {
                    kind: TerminalKind::Fold { folder: acting },
                    board,
                    pot,
                    v_acting: vec![0.0; h],
                    v_other: vec![0.0; h],
                }))
            } else {
                let delta = outcome.committed[acting] - committed[acting];
                let new_history = if outcome.action == Action::Raise {
                    vec![Action::Raise]
                } else {
                    let mut history = round_history.clone();
                    history.push(Action::Call);
                    history
                };
                let child = PlayerState {
                    acting: 1 - acting,
                    stage,
                    depth: depth + 1,
                    board,
                    pot: pot + delta,
                    bet_to_call: outcome.bet_to_call,
                    raises_left: outcome.raises_left,
                    committed: outcome.committed,
                    round_history: new_history,
                    sigma: StrategyMatrix::uniform(h),
                    regret: RegretMatrix::zeros(h),
                    children: Vec::new(),
                    closed_into: None,
                    v_acting: vec![0.0; h],
                    v_other: vec![0.0; h],
                };
                self.push(Node::Player(child))
            };
            children.push((requested, child_id));
        }
        self.arena[root].as_player_mut().unwrap().children = children;
    }

    fn attach_chance<R: Rng>(
        &mut self,
        root: NodeId,
        known: crate::cards::hand::Hand,
        rng: &mut R,
    ) -> NodeId {
        let (acting, committed, board, pot, next_stage, h) = {
            let p = self.arena[root].as_player().unwrap();
            (p.acting, p.committed, p.board, p.pot, p.stage.next(), p.sigma.h())
        };
        let n_new = next_stage.n_revealed();
        let excluded = known.union(board.hand());
        let mut pool = undealt_cards(excluded, &self.config);

        let mut events = Vec::with_capacity(self.config.max_events);
        for _ in 0..self.config.max_events {
            if pool.len() < n_new {
                break;
            }
            pool.shuffle(rng);
            let drawn: Vec<_> = pool.drain(..n_new).collect();
            let new_board = board.add(&drawn);
            let event_state = PlayerState {
                acting,
                stage: next_stage,
                depth: 0,
                board: new_board,
                pot,
                bet_to_call: 0,
                raises_left: self.config.raises_per_stage,
                committed,
                round_history: Vec::new(),
                sigma: StrategyMatrix::uniform(h),
                regret: RegretMatrix::zeros(h),
                children: Vec::new(),
                closed_into: None,
                v_acting: vec![0.0; h],
                v_other: vec![0.0; h],
            };
            events.push(self.push(Node::Player(event_state)));
        }

        self.push(Node::Chance(ChanceState {
            stage: next_stage,
            board,
            events,
            v_acting: vec![0.0; h],
            v_other: vec![0.0; h],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::hand::Hand;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn fresh_manager() -> StateManager {
        StateManager::new(GameConfig::limited())
    }

    #[test]
    fn root_state_is_a_player_node() {
        let mut mgr = fresh_manager();
        let h = mgr.config.n_hole_pairs();
        let root = mgr.generate_root_state(
            0,
            [0, 0],
            Board::empty(),
            0,
            2,
            2,
            Stage::Pref,
            Vec::new(),
            0,
            h,
        );
        assert!(mgr.node(root).as_player().is_some());
    }

    #[test]
    fn preflop_to_flop_subtree_terminates_with_no_open_player_leaves_past_cutoff() {
        let mut mgr = fresh_manager();
        let h = mgr.config.n_hole_pairs();
        let root = mgr.generate_root_state(
            0,
            [0, 0],
            Board::empty(),
            0,
            2,
            2,
            Stage::Pref,
            Vec::new(),
            0,
            h,
        );
        let mut rng = SmallRng::seed_from_u64(42);
        mgr.generate_subtree(root, Stage::Flop, 1, Hand::empty(), &mut rng);
        assert!(mgr.node(root).as_player().is_some());
    }

    #[test]
    fn illegal_raise_downgrades_to_call() {
        let committed = [100, 100];
        let outcome = handle_raise(0, committed, 100, 2, 100, 2);
        assert_eq!(outcome.action, Action::Call);
    }

    #[test]
    fn illegal_call_downgrades_to_fold() {
        let committed = [100, 50];
        let outcome = handle_call(1, committed, 100, 2, 100);
        assert_eq!(outcome.action, Action::Fold);
    }

    #[test]
    fn raise_with_no_raises_left_becomes_call() {
        let committed = [0, 0];
        let outcome = handle_raise(0, committed, 2, 0, 100, 2);
        assert_eq!(outcome.action, Action::Call);
    }

    #[test]
    fn deterministic_seed_yields_identical_chance_sampling() {
        let config = GameConfig::limited();
        let h = config.n_hole_pairs();

        let build = || {
            let mut mgr = StateManager::new(config);
            let root = mgr.generate_root_state(
                0,
                [2, 2],
                Board::empty(),
                4,
                0,
                2,
                Stage::Pref,
                vec![Action::Call, Action::Call],
                1,
                h,
            );
            let mut rng = SmallRng::seed_from_u64(99);
            mgr.generate_subtree(root, Stage::Flop, 1, Hand::empty(), &mut rng);
            let chance_id = mgr.node(root).as_player().unwrap().closed_into.unwrap();
            mgr.node(chance_id).as_chance().unwrap().events.len()
        };
        assert_eq!(build(), build());
    }
}

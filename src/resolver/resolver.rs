use crate::cards::street::Stage;
use crate::config::GameConfig;
use crate::oracle::matrix::utility_matrix;
use crate::tree::action::Action;
use crate::tree::manager::StateManager;
use crate::tree::node::{Node, NodeId, TerminalKind};
use crate::tree::range::{bayesian_range_update, Range};
use crate::tree::strategy::{RegretMatrix, StrategyMatrix};
use crate::valuenet::ValueNet;
use crate::Chips;

/// Runs CFR re-solves over a tree already built by a [`StateManager`].
/// Holds no state of its own between calls — every accumulator it
/// needs lives on the tree's nodes, per the arena design in
/// [`crate::tree::node`].
pub struct Resolver<'a> {
    manager: &'a mut StateManager,
    value_net: &'a ValueNet,
    config: GameConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(manager: &'a mut StateManager, value_net: &'a ValueNet, config: GameConfig) -> Self {
        Self {
            manager,
            value_net,
            config,
        }
    }

    /// Runs `t` CFR iterations rooted at `root` and returns the
    /// running-mean average strategy over all of them. `root` must
    /// already be expanded to `(end_stage, end_depth)` via
    /// [`StateManager::generate_subtree`].
    pub fn resolve(
        &mut self,
        root: NodeId,
        r_p: Range,
        r_o: Range,
        end_stage: Stage,
        end_depth: usize,
        t: usize,
    ) -> StrategyMatrix {
        let h = self.config.n_hole_pairs();
        reset_accumulators(self.manager, root, h);
        log::debug!("resolve: starting {t} iterations over {h} hole pairs");

        let mut average = StrategyMatrix::zeros(h);
        for iteration in 1..=t {
            subtree_traversal_rollout(
                self.manager,
                self.value_net,
                &self.config,
                root,
                &r_p,
                &r_o,
                end_stage,
                end_depth,
            );
            update_strategy(self.manager, root, self.config.regret_floor);

            let sigma = match self.manager.node(root) {
                Node::Player(p) => p.sigma.clone(),
                _ => unreachable!("resolver root must be a PlayerState"),
            };
            average.accumulate_running_mean(&sigma, iteration);
            if iteration % 100 == 0 || iteration == t {
                log::debug!("resolve: completed iteration {iteration}/{t}");
            }
        }
        average
    }
}

/// Zeroes every PlayerState's regret and resets its strategy to
/// uniform before the first iteration, in case `root` was reused from
/// a previous resolve call.
fn reset_accumulators(manager: &mut StateManager, node: NodeId, h: usize) {
    enum Shape {
        Player {
            children: Vec<(Action, NodeId)>,
            closed_into: Option<NodeId>,
        },
        Chance {
            events: Vec<NodeId>,
        },
        Terminal,
    }

    let shape = match manager.node(node) {
        Node::Player(p) => Shape::Player {
            children: p.children.clone(),
            closed_into: p.closed_into,
        },
        Node::Chance(c) => Shape::Chance {
            events: c.events.clone(),
        },
        Node::Terminal(_) => Shape::Terminal,
    };

    match shape {
        Shape::Terminal => {}
        Shape::Chance { events } => {
            for event in events {
                reset_accumulators(manager, event, h);
            }
        }
        Shape::Player { children, closed_into } => {
            if let Node::Player(p) = manager.node_mut(node) {
                p.sigma = StrategyMatrix::uniform(h);
                p.regret = RegretMatrix::zeros(h);
            }
            for (_, child) in &children {
                reset_accumulators(manager, *child, h);
            }
            if let Some(closed) = closed_into {
                reset_accumulators(manager, closed, h);
            }
        }
    }
}

/// Descending pass: assigns `(v_acting, v_other)` to every node in the
/// subtree rooted at `node`, per hole-pair, given the ranges live at
/// this point in the recursion.
fn subtree_traversal_rollout(
    manager: &mut StateManager,
    value_net: &ValueNet,
    config: &GameConfig,
    node: NodeId,
    r_acting: &Range,
    r_other: &Range,
    end_stage: Stage,
    end_depth: usize,
) -> (Vec<f32>, Vec<f32>) {
    let h = config.n_hole_pairs();

    enum Shape {
        Showdown { board: crate::cards::board::Board },
        Fold,
        Chance { events: Vec<NodeId> },
        CutoffLeaf { stage: Stage, board: crate::cards::board::Board, pot: Chips },
        ClosedInto(NodeId),
        Decision { children: Vec<(Action, NodeId)>, sigma: StrategyMatrix },
    }

    let shape = match manager.node(node) {
        Node::Terminal(term) => match term.kind {
            TerminalKind::Showdown => Shape::Showdown { board: term.board },
            TerminalKind::Fold { .. } => Shape::Fold,
        },
        Node::Chance(c) => Shape::Chance {
            events: c.events.clone(),
        },
        Node::Player(p) if p.children.is_empty() && p.closed_into.is_none() => Shape::CutoffLeaf {
            stage: p.stage,
            board: p.board,
            pot: p.pot,
        },
        Node::Player(p) if p.closed_into.is_some() => Shape::ClosedInto(p.closed_into.unwrap()),
        Node::Player(p) => Shape::Decision {
            children: p.children.clone(),
            sigma: p.sigma.clone(),
        },
    };

    let (v_acting, v_other) = match shape {
        Shape::Showdown { board } => {
            let (u, _keys) = utility_matrix(board.hand(), config);
            let v_acting: Vec<f32> = (0..h)
                .map(|i| (0..h).map(|j| u[i][j] as f32 * r_other.get(j)).sum())
                .collect();
            let v_other: Vec<f32> = (0..h)
                .map(|j| -(0..h).map(|i| r_acting.get(i) * u[i][j] as f32).sum::<f32>())
                .collect();
            (v_acting, v_other)
        }
        Shape::Fold => (vec![0.0; h], vec![0.0; h]),
        Shape::Chance { events } => {
            let mut v_acting = vec![0.0f32; h];
            let mut v_other = vec![0.0f32; h];
            let n = events.len();
            if n > 0 {
                for event in events {
                    let (ea, eo) = subtree_traversal_rollout(
                        manager, value_net, config, event, r_acting, r_other, end_stage, end_depth,
                    );
                    for i in 0..h {
                        v_acting[i] += ea[i] / n as f32;
                        v_other[i] += eo[i] / n as f32;
                    }
                }
            }
            (v_acting, v_other)
        }
        Shape::CutoffLeaf { stage, board, pot } => {
            if stage <= end_stage {
                let mut input = Vec::with_capacity(2 * h + config.deck_size() + 1);
                input.extend_from_slice(r_acting.as_slice());
                let mut board_encoding = vec![0.0f32; config.deck_size()];
                for card in board.cards() {
                    board_encoding[crate::oracle::keys::card_index(card, config)] = 1.0;
                }
                input.extend_from_slice(&board_encoding);
                input.push(pot as f32 / config.stage_max_pot(stage) as f32);
                input.extend_from_slice(r_other.as_slice());
                let (v1, v2, _z) = value_net.predict(stage, &input, config.limited);
                (v1, v2)
            } else {
                (vec![0.0; h], vec![0.0; h])
            }
        }
        Shape::ClosedInto(closed) => subtree_traversal_rollout(
            manager, value_net, config, closed, r_acting, r_other, end_stage, end_depth,
        ),
        Shape::Decision { children, sigma } => {
            let mut v_acting = vec![0.0f32; h];
            let mut v_other = vec![0.0f32; h];
            for (action, child_id) in children {
                let r_acting_prime = bayesian_range_update(r_acting, action, &sigma);
                let (v_acting_child, v_other_child) = subtree_traversal_rollout(
                    manager,
                    value_net,
                    config,
                    child_id,
                    r_other,
                    &r_acting_prime,
                    end_stage,
                    end_depth,
                );
                for i in 0..h {
                    v_acting[i] += sigma.probability(i, action) * v_other_child[i];
                    v_other[i] += sigma.probability(i, action) * v_acting_child[i];
                }
            }
            (v_acting, v_other)
        }
    };

    match manager.node_mut(node) {
        Node::Player(p) => {
            p.v_acting = v_acting.clone();
            p.v_other = v_other.clone();
        }
        Node::Chance(c) => {
            c.v_acting = v_acting.clone();
            c.v_other = v_other.clone();
        }
        Node::Terminal(term) => {
            term.v_acting = v_acting.clone();
            term.v_other = v_other.clone();
        }
    }
    (v_acting, v_other)
}

/// Ascending pass: updates cumulative/positive regret and derives a
/// fresh strategy at every PlayerState, deepest first.
fn update_strategy(manager: &mut StateManager, node: NodeId, regret_floor: f32) {
    let (children, closed_into) = match manager.node(node) {
        Node::Player(p) => (p.children.clone(), p.closed_into),
        _ => return,
    };

    for (_, child) in &children {
        if matches!(manager.node(*child), Node::Player(_)) {
            update_strategy(manager, *child, regret_floor);
        }
    }
    if let Some(closed) = closed_into {
        update_strategy(manager, closed, regret_floor);
        return;
    }
    if children.is_empty() {
        return;
    }

    let v_acting_n = match manager.node(node) {
        Node::Player(p) => p.v_acting.clone(),
        _ => unreachable!(),
    };
    let h = v_acting_n.len();

    for (action, child_id) in &children {
        let v_other_child = match manager.node(*child_id) {
            Node::Player(c) => c.v_other.clone(),
            Node::Chance(c) => c.v_other.clone(),
            Node::Terminal(t) => t.v_other.clone(),
        };
        if let Node::Player(p) = manager.node_mut(node) {
            for hp in 0..h {
                p.regret.accumulate(hp, *action, v_other_child[hp] - v_acting_n[hp]);
            }
        }
    }

    if let Node::Player(p) = manager.node_mut(node) {
        p.sigma = p.regret.derive_strategy(regret_floor);
    }
}

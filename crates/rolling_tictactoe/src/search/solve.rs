//! Retrograde solving of the game graph.
//!
//! Positions are labelled backwards from terminal placements: a node is
//! won if some move wins outright or leads to a lost node for the
//! opponent, and lost once every move leads to a won node for the
//! opponent. Whatever is left when the queue drains can be held forever
//! by both sides and is a draw.

use super::graph::{Arena, Edge, NodeId, PackedState};
use crate::GameState;
use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{info, instrument};

/// Game-theoretic value of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The side to move wins in this many plies (its own final move included).
    Win(u16),
    /// The side to move loses after this many plies.
    Loss(u16),
    /// Neither side can force a result.
    Draw,
}

impl Verdict {
    /// Minimax score for the side to move: +1, 0 or -1.
    pub fn score(self) -> i8 {
        match self {
            Verdict::Win(_) => 1,
            Verdict::Draw => 0,
            Verdict::Loss(_) => -1,
        }
    }

    /// The same position seen by the other side, one ply earlier.
    ///
    /// If the opponent (to move here) wins in `n`, the side that moved
    /// into this position loses in `n + 1`, and vice versa.
    pub fn for_previous_mover(self) -> Self {
        match self {
            Verdict::Win(n) => Verdict::Loss(n + 1),
            Verdict::Loss(n) => Verdict::Win(n + 1),
            Verdict::Draw => Verdict::Draw,
        }
    }

    /// Total order used to pick between moves: any win beats any draw,
    /// any draw beats any loss, faster wins and slower losses first.
    pub fn rank(self) -> (i8, i32) {
        match self {
            Verdict::Win(n) => (1, -i32::from(n)),
            Verdict::Draw => (0, 0),
            Verdict::Loss(n) => (-1, i32::from(n)),
        }
    }
}

/// Labels every node of `arena`.
pub fn retrograde(arena: &Arena) -> Vec<Verdict> {
    let n = arena.len();
    let mut verdicts: Vec<Option<Verdict>> = vec![None; n];

    // Moves not yet known to hand the opponent a win. A node with a
    // drawing placement can never be lost.
    let mut remaining: Vec<u32> = vec![0; n];
    let mut can_lose: Vec<bool> = vec![true; n];

    let mut queue: VecDeque<NodeId> = VecDeque::new();

    for (id, node) in arena.nodes.iter().enumerate() {
        for (_, edge) in &node.succ {
            match edge {
                Edge::Win => verdicts[id] = Some(Verdict::Win(1)),
                Edge::Draw => can_lose[id] = false,
                Edge::Node(_) => remaining[id] += 1,
            }
        }
        if verdicts[id].is_some() {
            queue.push_back(id);
        }
    }

    // FIFO order keeps plies non-decreasing, so the first win found for a
    // node is its fastest and the last resolved child of a loss its slowest.
    while let Some(v) = queue.pop_front() {
        let Some(verdict) = verdicts[v] else {
            continue;
        };
        for &p in &arena.nodes[v].pred {
            if verdicts[p].is_some() {
                continue;
            }
            match verdict {
                Verdict::Loss(plies) => {
                    verdicts[p] = Some(Verdict::Win(plies + 1));
                    queue.push_back(p);
                }
                Verdict::Win(plies) => {
                    remaining[p] -= 1;
                    if remaining[p] == 0 && can_lose[p] {
                        verdicts[p] = Some(Verdict::Loss(plies + 1));
                        queue.push_back(p);
                    }
                }
                Verdict::Draw => {}
            }
        }
    }

    verdicts
        .into_iter()
        .map(|v| v.unwrap_or(Verdict::Draw))
        .collect()
}

/// Solved values for every position reachable from a set of roots.
#[derive(Debug, Clone, Default)]
pub struct Tablebase {
    verdicts: HashMap<PackedState, Verdict>,
}

impl Tablebase {
    /// Explores and solves everything reachable from `roots`.
    #[instrument(skip_all, fields(roots = roots.len()))]
    pub fn solve(roots: &[GameState]) -> Self {
        let started = Instant::now();
        let arena = Arena::explore(roots);
        let labels = retrograde(&arena);

        let verdicts: HashMap<PackedState, Verdict> = arena
            .nodes
            .iter()
            .zip(labels)
            .map(|(node, verdict)| (node.state, verdict))
            .collect();

        let wins = verdicts.values().filter(|v| matches!(v, Verdict::Win(_))).count();
        let losses = verdicts.values().filter(|v| matches!(v, Verdict::Loss(_))).count();
        info!(
            positions = verdicts.len(),
            wins,
            losses,
            draws = verdicts.len() - wins - losses,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Tablebase solved"
        );

        Self { verdicts }
    }

    /// Number of solved positions.
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    /// Returns true if nothing was solved.
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Adds every position solved in `other`.
    ///
    /// A position's value depends only on what is reachable from it, so
    /// tables solved from different roots agree wherever they overlap.
    pub fn merge(&mut self, other: Tablebase) {
        self.verdicts.extend(other.verdicts);
    }

    /// Value of an in-progress `state` for its side to move.
    pub fn get(&self, state: &GameState) -> Option<Verdict> {
        self.verdicts.get(&PackedState::pack(state)).copied()
    }
}

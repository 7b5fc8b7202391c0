//! The game graph reachable from a set of root positions.
//!
//! Rolling placement lets positions recur, so the game tree is really a
//! cyclic graph. Each node is an in-progress position; edges are the
//! placements available to the side to move. Placements that end the
//! game do not lead to a node and are recorded as terminal edges instead.

use crate::history::MoveHistory;
use crate::{GameState, GameStatus, Position, Side};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, instrument};

/// Index of a node in an [`Arena`].
pub type NodeId = usize;

/// An in-progress position packed into 25 bits.
///
/// Bits 0-11 hold X's history and bits 12-23 O's, as three 4-bit slots
/// oldest first (0 = unused, 1-9 = cell index + 1). Bit 24 is set when
/// O is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackedState(u32);

const HISTORY_BITS: u32 = 12;
const SLOT_BITS: u32 = 4;
const SIDE_BIT: u32 = 1 << 24;

impl PackedState {
    /// Packs the histories and side to move of `state`.
    ///
    /// The board and status are derived data and are not stored.
    pub fn pack(state: &GameState) -> Self {
        let first = pack_history(state.history(Side::First));
        let second = pack_history(state.history(Side::Second));
        let side = match state.side_to_move() {
            Side::First => 0,
            Side::Second => SIDE_BIT,
        };
        Self(first | (second << HISTORY_BITS) | side)
    }

    /// Rebuilds the in-progress state this key was packed from.
    pub fn unpack(self) -> GameState {
        let first = unpack_history(self.0);
        let second = unpack_history(self.0 >> HISTORY_BITS);
        let side = if self.0 & SIDE_BIT == 0 {
            Side::First
        } else {
            Side::Second
        };
        GameState::from_histories(first, second, side)
    }
}

fn pack_history(history: &MoveHistory) -> u32 {
    history
        .iter()
        .enumerate()
        .fold(0, |acc, (slot, pos)| {
            acc | ((pos.to_index() as u32 + 1) << (slot as u32 * SLOT_BITS))
        })
}

fn unpack_history(bits: u32) -> MoveHistory {
    (0..3)
        .map(|slot| (bits >> (slot * SLOT_BITS)) & 0xF)
        .take_while(|cell| *cell != 0)
        .filter_map(|cell| Position::from_index(cell as usize - 1))
        .collect()
}

/// Where a placement leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The placement wins for the side that made it.
    Win,
    /// The placement fills the board without a line.
    Draw,
    /// The game continues at this node, opponent to move.
    Node(NodeId),
}

/// A position and its moves.
#[derive(Debug, Clone)]
pub struct Node {
    /// The packed position.
    pub state: PackedState,
    /// One edge per empty cell, row-major.
    pub succ: Vec<(Position, Edge)>,
    /// Nodes with an edge into this one.
    pub pred: Vec<NodeId>,
}

/// All positions reachable from a set of roots.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    /// Nodes in discovery order.
    pub nodes: Vec<Node>,
    index: HashMap<PackedState, NodeId>,
}

impl Arena {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no root was in progress.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up the node for a packed position.
    pub fn id_of(&self, state: PackedState) -> Option<NodeId> {
        self.index.get(&state).copied()
    }

    /// Explores every position reachable from `roots`.
    ///
    /// Terminal roots are skipped. Successors are generated with the same
    /// placement rule as real play, including eviction.
    #[instrument(skip_all, fields(roots = roots.len()))]
    pub fn explore(roots: &[GameState]) -> Self {
        let mut arena = Self::default();
        let mut queue = VecDeque::new();

        for root in roots.iter().filter(|r| r.status() == GameStatus::InProgress) {
            arena.intern(PackedState::pack(root), &mut queue);
        }

        while let Some(id) = queue.pop_front() {
            let state = arena.nodes[id].state.unpack();
            let mut succ = Vec::with_capacity(9);

            for pos in state.empty_positions() {
                let mut next = state;
                next.place(pos);
                let edge = match next.status() {
                    GameStatus::Won(_) => Edge::Win,
                    GameStatus::Drawn => Edge::Draw,
                    GameStatus::InProgress => {
                        Edge::Node(arena.intern(PackedState::pack(&next), &mut queue))
                    }
                };
                succ.push((pos, edge));
            }

            for (_, edge) in &succ {
                if let Edge::Node(child) = edge {
                    arena.nodes[*child].pred.push(id);
                }
            }
            arena.nodes[id].succ = succ;
        }

        debug!(nodes = arena.len(), "Game graph explored");
        arena
    }

    fn intern(&mut self, state: PackedState, queue: &mut VecDeque<NodeId>) -> NodeId {
        if let Some(id) = self.id_of(state) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            state,
            succ: Vec::new(),
            pred: Vec::new(),
        });
        self.index.insert(state, id);
        queue.push_back(id);
        id
    }
}

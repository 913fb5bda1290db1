//! Bookkeeping owned by a single search invocation.

/// Frontier of nodes still eligible for expansion.
///
/// Members are kept in insertion order so that ties on `fScore` resolve to
/// the node that entered the frontier first.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    order: Vec<usize>,
    members: Vec<bool>,
}

impl OpenSet {
    pub(crate) fn with_capacity(len: usize) -> Self {
        Self {
            order: Vec::with_capacity(len),
            members: vec![false; len],
        }
    }

    /// Add `node` unless it is already present.
    pub(crate) fn insert(&mut self, node: usize) -> bool {
        match self.members.get_mut(node) {
            Some(present) if !*present => {
                *present = true;
                self.order.push(node);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn contains(&self, node: usize) -> bool {
        self.members.get(node).copied().unwrap_or(false)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove and return the member with the smallest score.
    ///
    /// Only a strictly smaller score displaces the current best, so the
    /// earliest inserted node wins a tie.
    pub(crate) fn pop_lowest(&mut self, scores: &ScoreTable) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (position, &node) in self.order.iter().enumerate() {
            let score = scores.f(node);
            match best {
                Some((_, lowest)) if score.total_cmp(&lowest).is_ge() => {}
                _ => best = Some((position, score)),
            }
        }
        let (position, _) = best?;
        let node = self.order.remove(position);
        if let Some(present) = self.members.get_mut(node) {
            *present = false;
        }
        Some(node)
    }
}

/// `gScore`, `fScore` and predecessor for every candidate.
///
/// Every entry starts at positive infinity with no predecessor; the start
/// node is seeded by [`ScoreTable::new`].
#[derive(Debug)]
pub(crate) struct ScoreTable {
    g: Vec<f64>,
    f: Vec<f64>,
    came_from: Vec<Option<usize>>,
}

impl ScoreTable {
    pub(crate) fn new(len: usize, start: usize, start_estimate: f64) -> Self {
        let mut table = Self {
            g: vec![f64::INFINITY; len],
            f: vec![f64::INFINITY; len],
            came_from: vec![None; len],
        };
        table.set_scores(start, 0.0, start_estimate);
        table
    }

    pub(crate) fn g(&self, node: usize) -> f64 {
        self.g.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub(crate) fn f(&self, node: usize) -> f64 {
        self.f.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub(crate) fn predecessor(&self, node: usize) -> Option<usize> {
        self.came_from.get(node).copied().flatten()
    }

    fn set_scores(&mut self, node: usize, g: f64, f: f64) {
        if let Some(slot) = self.g.get_mut(node) {
            *slot = g;
        }
        if let Some(slot) = self.f.get_mut(node) {
            *slot = f;
        }
    }

    /// Record a strictly better path to `node` through `via`.
    ///
    /// Returns `false`, leaving the table untouched, when `tentative` does not
    /// improve on the known `gScore`. Requiring a strict improvement keeps the
    /// predecessor chain acyclic.
    pub(crate) fn relax(&mut self, node: usize, via: usize, tentative: f64, f: f64) -> bool {
        if tentative.total_cmp(&self.g(node)).is_ge() {
            return false;
        }
        self.set_scores(node, tentative, f);
        if let Some(slot) = self.came_from.get_mut(node) {
            *slot = Some(via);
        }
        true
    }

    /// Walk predecessors back from `goal` and return the path start-first.
    pub(crate) fn reconstruct(&self, goal: usize) -> Vec<usize> {
        let mut path = vec![goal];
        let mut cursor = goal;
        while let Some(previous) = self.predecessor(cursor) {
            if path.len() > self.came_from.len() {
                log::warn!("predecessor chain from node {goal} does not terminate; truncating");
                break;
            }
            path.push(previous);
            cursor = previous;
        }
        path.reverse();
        path
    }
}

//! Arena of search nodes. Nodes refer to each other through [NodeId] handles, so reparenting
//! and cost propagation are plain index rewrites.
use grid_util::Point;
use std::ops::Index;

/// Stable handle of a [PathPoint] inside a [PathGraph].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A discovered cell together with the cost of the best known route to it.
///
/// `child` is a back-pointer to the most recent node that took this one as parent. It only
/// exists to push cost decreases down a chain, so a node tracks at most one child.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPoint {
    pub point: Point,
    pub cost: f64,
    pub parent: Option<NodeId>,
    pub child: Option<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct PathGraph {
    nodes: Vec<PathPoint>,
}

impl PathGraph {
    pub fn new() -> PathGraph {
        PathGraph::default()
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
    pub fn get(&self, id: NodeId) -> Option<&PathPoint> {
        self.nodes.get(id.0)
    }

    /// Adds a node and records it as the child of its parent.
    pub fn insert(&mut self, point: Point, cost: f64, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(PathPoint {
            point,
            cost,
            parent,
            child: None,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].child = Some(id);
        }
        id
    }

    /// Moves `id` under `new_parent` with the cheaper `new_cost` and lowers every node on its
    /// child chain by the same amount. Returns the decrease.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId, new_cost: f64) -> f64 {
        if let Some(old_parent) = self.nodes[id.0].parent {
            let old = &mut self.nodes[old_parent.0];
            if old.child == Some(id) {
                old.child = None;
            }
        }
        self.nodes[id.0].parent = Some(new_parent);
        self.nodes[new_parent.0].child = Some(id);
        let delta = self.nodes[id.0].cost - new_cost;
        self.lower_cost(id, delta);
        delta
    }

    /// Subtracts `delta` from `id` and all of its descendants along the child chain.
    pub fn lower_cost(&mut self, id: NodeId, delta: f64) {
        let mut next = Some(id);
        while let Some(current) = next {
            let node = &mut self.nodes[current.0];
            node.cost -= delta;
            next = node.child;
        }
    }

    /// The node followed by its ancestors, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &PathPoint> + '_ {
        std::iter::successors(self.get(id), |node| node.parent.and_then(|p| self.get(p)))
    }
    /// The node followed by its chain of recorded children.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = &PathPoint> + '_ {
        std::iter::successors(self.get(id), |node| node.child.and_then(|c| self.get(c)))
    }
}

impl Index<NodeId> for PathGraph {
    type Output = PathPoint;

    fn index(&self, id: NodeId) -> &PathPoint {
        &self.nodes[id.0]
    }
}

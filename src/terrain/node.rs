//! Quadtree node with destructible leaves
//!
//! A node is either a leaf (solid or cleared) or an internal dispatcher that
//! owns exactly four children tiling its square. Internal nodes never merge
//! back into leaves; craters only refine the tree near their rim and replace
//! fully destroyed regions with cleared leaves.

use glam::{IVec2, Vec2};

use crate::geometry::{Circle, Rect};

/// One of the four equal sub-squares produced by subdivision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NW,
    NE,
    SW,
    SE,
}

impl Quadrant {
    /// Child storage and point-location tie-break order
    pub const ALL: [Quadrant; 4] = [Quadrant::NW, Quadrant::NE, Quadrant::SW, Quadrant::SE];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Offset of this quadrant's corner from the parent's corner
    pub fn offset(self, half: u32) -> IVec2 {
        let h = half as i32;
        match self {
            Quadrant::NW => IVec2::ZERO,
            Quadrant::NE => IVec2::new(h, 0),
            Quadrant::SW => IVec2::new(0, h),
            Quadrant::SE => IVec2::new(h, h),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    /// Renderable ground
    Solid,
    /// Ground destroyed by a crater; never rendered, never refined
    Cleared,
    /// Internal node, children in `Quadrant::ALL` order
    Split(Box<[TerrainNode; 4]>),
}

/// A square region of terrain
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainNode {
    origin: IVec2,
    size: u32,
    min_size: u32,
    damaged: bool,
    kind: NodeKind,
}

impl TerrainNode {
    /// Create a solid leaf. Position and size are rounded to the integer grid;
    /// `min_size` is the resolution floor (at least 1).
    ///
    /// The size is shrunk so the far corner `origin + size` stays on the
    /// `i32` grid.
    pub fn new(position: Vec2, size: f32, min_size: u32) -> Self {
        let origin = position.round().as_ivec2();
        let room = i64::from(i32::MAX) - i64::from(origin.x.max(origin.y));
        let size = (size.round() as u32).min(room.clamp(0, i64::from(i32::MAX)) as u32);
        Self::leaf(origin, size, min_size.max(1))
    }

    fn leaf(origin: IVec2, size: u32, min_size: u32) -> Self {
        Self {
            origin,
            size,
            min_size,
            damaged: false,
            kind: NodeKind::Solid,
        }
    }

    #[inline]
    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    /// Closed square covered by this node
    pub fn rect(&self) -> Rect {
        Rect::square(self.origin.as_vec2(), self.size as f32)
    }

    pub fn midpoint(&self) -> Vec2 {
        self.rect().midpoint()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        !matches!(self.kind, NodeKind::Split(_))
    }

    /// Leaf that still holds ground
    #[inline]
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, NodeKind::Solid)
    }

    /// Leaf whose ground was removed
    #[inline]
    pub fn is_cleared(&self) -> bool {
        matches!(self.kind, NodeKind::Cleared)
    }

    /// Touched by at least one crater
    #[inline]
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    /// Children in NW, NE, SW, SE order; empty for leaves
    pub fn children(&self) -> &[TerrainNode] {
        match &self.kind {
            NodeKind::Split(children) => &children[..],
            _ => &[],
        }
    }

    pub fn quadrant(&self, q: Quadrant) -> Option<&TerrainNode> {
        self.children().get(q.index())
    }

    /// Whether this node sits above the resolution floor. Odd sizes stop
    /// here too so children always tile the parent exactly.
    #[inline]
    pub fn can_subdivide(&self) -> bool {
        self.size % 2 == 0 && self.size / 2 >= self.min_size
    }

    /// Split a solid leaf into four solid quadrants.
    ///
    /// Returns false (and changes nothing) at the resolution floor, on cleared
    /// leaves and on nodes that are already internal.
    pub fn subdivide(&mut self) -> bool {
        if !self.is_solid() || !self.can_subdivide() {
            return false;
        }
        let half = self.size / 2;
        let children =
            Quadrant::ALL.map(|q| Self::leaf(self.origin + q.offset(half), half, self.min_size));
        self.kind = NodeKind::Split(Box::new(children));
        log::trace!(
            "subdivided node at ({}, {}) size {} -> {}",
            self.origin.x,
            self.origin.y,
            self.size,
            half
        );
        true
    }

    /// Closed containment test on `[origin, origin + size]` in both axes
    #[inline]
    pub fn intersects(&self, p: Vec2) -> bool {
        self.rect().intersects(p)
    }

    /// Leaf containing `p`, if any.
    ///
    /// Points on an edge shared by siblings resolve to the first matching
    /// quadrant in NW, NE, SW, SE order.
    pub fn node_at(&self, p: Vec2) -> Option<&TerrainNode> {
        match &self.kind {
            NodeKind::Split(children) => children
                .iter()
                .find(|n| n.intersects(p))
                .and_then(|n| n.node_at(p)),
            _ => self.intersects(p).then_some(self),
        }
    }

    /// Number of leaves (solid or cleared) below and including this node
    pub fn count_nodes(&self) -> usize {
        match &self.kind {
            NodeKind::Split(children) => children.iter().map(Self::count_nodes).sum(),
            _ => 1,
        }
    }

    /// Longest path from this node to a leaf
    pub fn depth(&self) -> usize {
        match &self.kind {
            NodeKind::Split(children) => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Total area of solid leaves
    pub fn solid_area(&self) -> u64 {
        let mut area = 0;
        self.for_each_leaf(&mut |leaf: &TerrainNode| {
            if leaf.is_solid() {
                area += u64::from(leaf.size) * u64::from(leaf.size);
            }
        });
        area
    }

    /// Visit every leaf depth-first in quadrant order
    pub fn for_each_leaf<F>(&self, f: &mut F)
    where
        F: FnMut(&TerrainNode),
    {
        match &self.kind {
            NodeKind::Split(children) => {
                for n in children.iter() {
                    n.for_each_leaf(f);
                }
            }
            _ => f(self),
        }
    }

    /// True iff the circle touches or penetrates this node's square
    pub fn overlaps_circle(&self, c: &Circle) -> bool {
        self.rect().overlaps_circle(c)
    }

    /// True iff all four corners are strictly inside the circle
    pub fn is_inside_circle(&self, c: &Circle) -> bool {
        self.rect().inside_circle(c)
    }

    /// Drop all ground (and any subtree) in this node
    fn clear(&mut self) {
        self.kind = NodeKind::Cleared;
    }

    /// Carve `c` out of this node.
    ///
    /// Solid leaves fully inside the circle, or at the resolution floor while
    /// overlapping it, are cleared. Partially covered leaves are subdivided and
    /// carved again. Regions the circle does not reach are not visited.
    pub fn remove_circle(&mut self, c: &Circle) {
        if let NodeKind::Split(children) = &mut self.kind {
            for child in children.iter_mut() {
                if child.is_cleared() || !child.overlaps_circle(c) {
                    continue;
                }
                child.damaged = true;
                if child.is_inside_circle(c) || !child.can_subdivide() {
                    child.clear();
                } else {
                    child.subdivide();
                    child.remove_circle(c);
                }
            }
            return;
        }

        if !self.is_solid() || !self.overlaps_circle(c) {
            return;
        }
        if self.is_inside_circle(c) || !self.can_subdivide() {
            self.clear();
        } else {
            self.subdivide();
            self.remove_circle(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn root(size: f32) -> TerrainNode {
        TerrainNode::new(Vec2::ZERO, size, 4)
    }

    /// Checks the tiling and floor invariants for every node below `node`
    fn assert_well_formed(node: &TerrainNode, is_root: bool) {
        if node.is_leaf() {
            assert!(node.children().is_empty(), "leaf must have no children");
            if !is_root {
                assert!(node.size() >= node.min_size(), "leaf below floor: {}", node.size());
            }
            return;
        }
        assert_eq!(node.children().len(), 4, "internal node must have 4 children");
        let half = node.size() / 2;
        assert_eq!(half * 2, node.size(), "internal node size must be even");
        for (q, child) in Quadrant::ALL.iter().zip(node.children()) {
            assert_eq!(child.size(), half, "child size must be half of parent");
            assert_eq!(child.origin(), node.origin() + q.offset(half), "child misplaced");
            assert_well_formed(child, false);
        }
    }

    /// Whether the cell `(origin, size)` is still internal or was cleared
    fn split_or_cleared(node: &TerrainNode, origin: IVec2, size: u32) -> bool {
        if node.origin() == origin && node.size() == size {
            return !node.is_leaf() || node.is_cleared();
        }
        if node.is_leaf() {
            return node.is_cleared();
        }
        let half = node.size() as i32 / 2;
        let rel = origin - node.origin();
        let q = match (rel.x >= half, rel.y >= half) {
            (false, false) => Quadrant::NW,
            (true, false) => Quadrant::NE,
            (false, true) => Quadrant::SW,
            (true, true) => Quadrant::SE,
        };
        node.quadrant(q)
            .is_some_and(|child| split_or_cleared(child, origin, size))
    }

    fn internal_cells(node: &TerrainNode, out: &mut Vec<(IVec2, u32)>) {
        if !node.is_leaf() {
            out.push((node.origin(), node.size()));
            for child in node.children() {
                internal_cells(child, out);
            }
        }
    }

    fn touches_solid_leaf(node: &TerrainNode, c: &Circle) -> bool {
        let mut hit = false;
        node.for_each_leaf(&mut |leaf: &TerrainNode| {
            hit |= leaf.is_solid() && leaf.overlaps_circle(c);
        });
        hit
    }

    #[test]
    fn test_new_rounds_to_grid() {
        let node = TerrainNode::new(Vec2::new(10.4, 19.6), 15.5, 4);
        assert_eq!(node.origin(), IVec2::new(10, 20));
        assert_eq!(node.size(), 16);
        assert!(node.is_leaf());
        assert!(node.is_solid());
        assert!(!node.is_damaged());
    }

    #[test]
    fn test_far_corner_stays_on_grid() {
        let mut node = TerrainNode::new(Vec2::new(2.0e9, 0.0), 4.0e8, 4);
        assert!(i64::from(node.origin().x) + i64::from(node.size()) <= i64::from(i32::MAX));
        node.remove_circle(&Circle::new(node.rect().pos, 10.0));
        assert_well_formed(&node, true);

        let mut huge = TerrainNode::new(Vec2::new(-1.0e10, 0.0), 1.0e12, 4);
        assert_eq!(huge.origin().x, i32::MIN);
        assert_eq!(huge.size(), i32::MAX as u32);
        huge.remove_circle(&Circle::new(huge.midpoint(), 100.0));
        assert!(huge.is_cleared());

        // Room to spare: refines normally right next to the limit
        let mut edge = TerrainNode::new(Vec2::new(2.0e9, 2.0e9), 1024.0, 4);
        assert_eq!(edge.size(), 1024);
        edge.remove_circle(&Circle::new(Vec2::new(2.0e9, 2.0e9), 10.0));
        assert!(!edge.is_leaf());
        assert_well_formed(&edge, true);
    }

    #[test]
    fn test_subdivide_tiles_parent() {
        let mut node = TerrainNode::new(Vec2::new(8.0, 16.0), 16.0, 4);
        assert!(node.subdivide());
        assert!(!node.is_leaf());
        let origins: Vec<IVec2> = node.children().iter().map(|n| n.origin()).collect();
        assert_eq!(
            origins,
            vec![
                IVec2::new(8, 16),
                IVec2::new(16, 16),
                IVec2::new(8, 24),
                IVec2::new(16, 24)
            ]
        );
        assert!(node.children().iter().all(|n| n.size() == 8 && n.is_solid()));
        assert_eq!(node.count_nodes(), 4);

        // Already internal: nothing changes
        let before = node.clone();
        assert!(!node.subdivide());
        assert_eq!(node, before);
    }

    #[test]
    fn test_subdivide_stops_at_floor() {
        let mut node = root(4.0);
        assert!(!node.subdivide());
        assert!(node.is_leaf());

        // Odd sizes cannot be tiled by integer halves
        let mut odd = root(6.0);
        assert!(!odd.subdivide());
    }

    #[test]
    fn test_min_size_is_at_least_one() {
        let mut node = TerrainNode::new(Vec2::ZERO, 2.0, 0);
        assert_eq!(node.min_size(), 1);
        assert!(node.subdivide());
        assert!(node.children().iter().all(|n| !n.can_subdivide()));
    }

    #[test]
    fn test_node_at() {
        let mut node = root(16.0);
        assert!(std::ptr::eq(node.node_at(Vec2::new(3.0, 3.0)).unwrap(), &node));

        node.subdivide();
        let se = node.node_at(Vec2::new(12.0, 12.0)).unwrap();
        assert_eq!(se.origin(), IVec2::new(8, 8));

        // Shared edges resolve in NW, NE, SW, SE order
        assert_eq!(node.node_at(Vec2::new(8.0, 8.0)).unwrap().origin(), IVec2::ZERO);
        assert_eq!(node.node_at(Vec2::new(8.0, 12.0)).unwrap().origin(), IVec2::new(0, 8));
        assert_eq!(node.node_at(Vec2::new(12.0, 8.0)).unwrap().origin(), IVec2::new(8, 0));
    }

    #[test]
    fn test_node_at_outside_bounds() {
        let mut node = root(16.0);
        for p in [Vec2::new(-0.1, 4.0), Vec2::new(4.0, 16.1), Vec2::new(17.0, 17.0)] {
            assert!(node.node_at(p).is_none());
        }
        node.subdivide();
        assert!(node.node_at(Vec2::new(16.5, 2.0)).is_none());
        assert!(node.node_at(Vec2::new(16.0, 16.0)).is_some());
    }

    #[test]
    fn test_remove_circle_covering_root() {
        let mut node = root(16.0);
        node.remove_circle(&Circle::new(Vec2::new(8.0, 8.0), 20.0));
        assert!(node.is_leaf());
        assert!(node.is_cleared());
        assert_eq!(node.count_nodes(), 1);
        assert_eq!(node.solid_area(), 0);
    }

    #[test]
    fn test_remove_circle_refines_only_touched_quadrant() {
        let mut node = root(16.0);
        node.remove_circle(&Circle::new(Vec2::ZERO, 1.0));

        assert_eq!(node.count_nodes(), 7);
        for q in [Quadrant::NE, Quadrant::SW, Quadrant::SE] {
            let child = node.quadrant(q).unwrap();
            assert!(child.is_solid());
            assert_eq!(child.size(), 8);
            assert!(!child.is_damaged());
        }

        let nw = node.quadrant(Quadrant::NW).unwrap();
        assert!(nw.is_damaged());
        assert_eq!(nw.children().len(), 4);
        let corner = nw.quadrant(Quadrant::NW).unwrap();
        assert_eq!(corner.size(), 4);
        assert!(corner.is_damaged());
        // Partial damage at the floor is all-or-nothing
        assert!(corner.is_cleared());
        assert!(nw.children()[1..].iter().all(|n| n.is_solid() && !n.is_damaged()));
        assert_eq!(node.solid_area(), 256 - 16);
    }

    #[test]
    fn test_remove_circle_clears_internal_child_inside() {
        let mut node = root(32.0);
        node.remove_circle(&Circle::new(Vec2::new(2.0, 2.0), 2.0));
        assert!(!node.quadrant(Quadrant::NW).unwrap().is_leaf());

        // Second crater swallows the whole refined NW quadrant
        node.remove_circle(&Circle::new(Vec2::new(8.0, 8.0), 12.0));
        let nw = node.quadrant(Quadrant::NW).unwrap();
        assert!(nw.is_cleared());
        assert!(nw.is_damaged());
    }

    #[test]
    fn test_cleared_leaves_never_regrow() {
        let mut node = root(16.0);
        node.remove_circle(&Circle::new(Vec2::new(8.0, 8.0), 20.0));
        let before = node.clone();
        assert!(!node.subdivide());
        node.remove_circle(&Circle::new(Vec2::new(0.0, 0.0), 3.0));
        assert_eq!(node, before);
    }

    #[test]
    fn test_depth() {
        let mut node = root(16.0);
        assert_eq!(node.depth(), 0);
        node.remove_circle(&Circle::new(Vec2::ZERO, 1.0));
        assert_eq!(node.depth(), 2);
    }

    fn circle_strategy() -> impl Strategy<Value = Circle> {
        (-16.0f32..48.0, -16.0f32..48.0, -4.0f32..24.0)
            .prop_map(|(x, y, r)| Circle::new(Vec2::new(x, y), r))
    }

    proptest! {
        #[test]
        fn tree_stays_well_formed(
            size in 1u32..80,
            min_size in 1u32..8,
            circles in prop::collection::vec(circle_strategy(), 1..6),
        ) {
            let mut node = TerrainNode::new(Vec2::ZERO, size as f32, min_size);
            for c in &circles {
                node.remove_circle(c);
                assert_well_formed(&node, true);
            }
        }

        #[test]
        fn internal_nodes_never_merge_back(
            circles in prop::collection::vec(circle_strategy(), 2..6),
        ) {
            let mut node = root(32.0);
            let mut seen = Vec::new();
            for c in &circles {
                internal_cells(&node, &mut seen);
                node.remove_circle(c);
                for &(origin, size) in &seen {
                    prop_assert!(split_or_cleared(&node, origin, size));
                }
            }
        }

        #[test]
        fn remove_circle_is_idempotent(
            warmup in prop::collection::vec(circle_strategy(), 0..3),
            c in circle_strategy(),
        ) {
            let mut node = root(32.0);
            for w in &warmup {
                node.remove_circle(w);
            }
            node.remove_circle(&c);
            let once = node.clone();
            node.remove_circle(&c);
            prop_assert_eq!(node, once);
        }

        #[test]
        fn non_positive_radius_is_noop(x in -16.0f32..48.0, y in -16.0f32..48.0, r in -10.0f32..=0.0) {
            let mut node = root(32.0);
            node.remove_circle(&Circle::new(Vec2::new(4.0, 4.0), 3.0));
            let before = node.clone();
            node.remove_circle(&Circle::new(Vec2::new(x, y), r));
            prop_assert_eq!(node, before);
        }

        #[test]
        fn circle_outside_root_is_noop(
            x in -200.0f32..200.0,
            y in -200.0f32..200.0,
            r in 0.0f32..50.0,
        ) {
            let c = Circle::new(Vec2::new(x, y), r);
            let mut node = root(32.0);
            prop_assume!(!c.bounds().overlaps(&node.rect()));
            let before = node.clone();
            node.remove_circle(&c);
            prop_assert_eq!(node.count_nodes(), before.count_nodes());
            prop_assert_eq!(node, before);
        }

        #[test]
        fn solid_area_never_grows(
            warmup in prop::collection::vec(circle_strategy(), 0..3),
            c in circle_strategy(),
        ) {
            let mut node = root(32.0);
            for w in &warmup {
                node.remove_circle(w);
            }
            let before = node.solid_area();
            let touched = touches_solid_leaf(&node, &c);
            node.remove_circle(&c);
            let after = node.solid_area();
            prop_assert!(after <= before);
            prop_assert_eq!(after == before, !touched);
        }
    }
}

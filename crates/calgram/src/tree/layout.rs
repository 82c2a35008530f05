//! Canvas coordinates for drawing a parse tree.
//!
//! Leaves are laid out left to right, each taking one node diameter plus a
//! fixed gap, and every parent sits midway between its first and last child.
//! The result depends only on the tree's shape, so the leftmost and rightmost
//! trees of the same input lay out identically.

use crate::grammar::Symbol;
use crate::tree::Node;

/// Margin added beyond the outermost node when sizing the canvas.
const CANVAS_MARGIN: f64 = 20.0;

/// Spacing metrics for [`layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Radius of the circle drawn for each node.
    pub node_radius: f64,
    /// Vertical distance between consecutive levels.
    pub level_height: f64,
    /// Horizontal gap between neighbouring leaves.
    pub horizontal_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            level_height: 60.0,
            horizontal_spacing: 30.0,
        }
    }
}

/// Where one node goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// The node's label.
    pub label: char,
    /// Whether the node is a terminal.
    pub terminal: bool,
    /// Distance from the root.
    pub depth: usize,
    /// Preorder index of the parent; `None` for the root.
    pub parent: Option<usize>,
    /// Horizontal centre.
    pub x: f64,
    /// Vertical centre.
    pub y: f64,
}

/// All placements of a tree, in preorder.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// One entry per node; index 0 is the root.
    pub placements: Vec<Placement>,
    radius: f64,
}

impl Layout {
    /// Canvas width and height needed to show every node.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        let max_x = self.placements.iter().map(|p| p.x).fold(0.0, f64::max);
        let max_y = self.placements.iter().map(|p| p.y).fold(0.0, f64::max);
        (
            max_x + self.radius + CANVAS_MARGIN,
            max_y + self.radius + CANVAS_MARGIN,
        )
    }

    /// Parent/child index pairs, one per edge, in preorder of the child.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.placements
            .iter()
            .enumerate()
            .filter_map(|(child, p)| p.parent.map(|parent| (parent, child)))
    }
}

/// Computes canvas positions for every node of `root`.
#[must_use]
pub fn layout(root: &Node, config: &LayoutConfig) -> Layout {
    let mut placer = Placer {
        config,
        placements: Vec::with_capacity(root.node_count()),
    };
    placer.place(root, 0, 0.0, None);
    Layout {
        placements: placer.placements,
        radius: config.node_radius,
    }
}

struct Placer<'a> {
    config: &'a LayoutConfig,
    placements: Vec<Placement>,
}

impl Placer<'_> {
    /// Places `node`'s subtree starting at `x_offset` and returns its width.
    #[allow(clippy::cast_precision_loss)]
    fn place(&mut self, node: &Node, depth: usize, x_offset: f64, parent: Option<usize>) -> f64 {
        let radius = self.config.node_radius;
        let index = self.placements.len();
        self.placements.push(Placement {
            label: node.label(),
            terminal: matches!(node.symbol(), Symbol::Terminal(_)),
            depth,
            parent,
            x: 0.0,
            y: depth as f64 * self.config.level_height + radius,
        });

        if node.is_leaf() {
            self.placements[index].x = x_offset + radius;
            return radius * 2.0 + self.config.horizontal_spacing;
        }

        let mut width = 0.0;
        let mut first_x = None;
        let mut last_x = 0.0;
        for child in node.children() {
            let child_index = self.placements.len();
            width += self.place(child, depth + 1, x_offset + width, Some(index));
            last_x = self.placements[child_index].x;
            first_x.get_or_insert(last_x);
        }
        self.placements[index].x = (first_x.unwrap_or(last_x) + last_x) / 2.0;
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::NonTerminal;

    fn two_leaves() -> Node {
        let mut root = Node::new(NonTerminal::M.into());
        root.add_child(Node::new(Symbol::Terminal('1')));
        root.add_child(Node::new(NonTerminal::V.into()))
            .add_child(Node::new(Symbol::Terminal('2')));
        root
    }

    #[test]
    fn test_leaf_spacing_and_centering() {
        let layout = layout(&two_leaves(), &LayoutConfig::default());
        let xs: Vec<f64> = layout.placements.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = layout.placements.iter().map(|p| p.y).collect();
        // M, 1, V, 2 in preorder: leaves at 20 and 90, V centred over its only child.
        assert_eq!(xs, vec![55.0, 20.0, 90.0, 90.0]);
        assert_eq!(ys, vec![20.0, 80.0, 80.0, 140.0]);
    }

    #[test]
    fn test_parents_and_edges() {
        let layout = layout(&two_leaves(), &LayoutConfig::default());
        let parents: Vec<Option<usize>> = layout.placements.iter().map(|p| p.parent).collect();
        assert_eq!(parents, vec![None, Some(0), Some(0), Some(2)]);
        assert_eq!(layout.edges().collect::<Vec<_>>(), vec![(0, 1), (0, 2), (2, 3)]);
        assert!(layout.placements[1].terminal);
        assert!(!layout.placements[2].terminal);
    }

    #[test]
    fn test_extent() {
        let layout = layout(&two_leaves(), &LayoutConfig::default());
        assert_eq!(layout.extent(), (130.0, 180.0));
    }

    #[test]
    fn test_custom_metrics() {
        let config = LayoutConfig {
            node_radius: 10.0,
            level_height: 40.0,
            horizontal_spacing: 0.0,
        };
        let layout = layout(&Node::new(Symbol::Terminal('7')), &config);
        assert_eq!(layout.placements.len(), 1);
        assert_eq!((layout.placements[0].x, layout.placements[0].y), (10.0, 10.0));
    }
}

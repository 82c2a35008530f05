//! Ordered, rooted parse trees.
//!
//! A parent owns its children outright and nothing points back up, so a tree
//! is a plain value: it can be cloned, compared and handed to a renderer
//! without any shared state. Children are only ever appended, in the order
//! their symbols appear in the production that created them.

use crate::grammar::Symbol;

pub mod layout;

/// One node of a parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    symbol: Symbol,
    children: Vec<Node>,
}

impl Node {
    /// Creates a childless node.
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            children: Vec::new(),
        }
    }

    /// The symbol this node is labelled with.
    #[must_use]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// The character this node prints as.
    #[must_use]
    pub fn label(&self) -> char {
        self.symbol.label()
    }

    /// Children in left-to-right order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Appends `child` after any existing children and returns it.
    pub fn add_child(&mut self, child: Node) -> &mut Node {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf symbols, read left to right.
    #[must_use]
    pub fn leaves(&self) -> Vec<Symbol> {
        self.preorder()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.symbol)
            .collect()
    }

    /// The string spelled by the leaves.
    #[must_use]
    pub fn yield_string(&self) -> String {
        self.leaves().into_iter().map(Symbol::label).collect()
    }

    /// Iterates over `(depth, node)` pairs in preorder, the root at depth 0.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(0, self)],
        }
    }

    /// Number of levels, counting the root; a lone leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Total number of nodes, the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Follows child indices down from this node.
    #[must_use]
    pub fn child_at_path(&self, path: &[usize]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    pub(crate) fn child_at_path_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    /// Draws the tree with box-drawing branches, one node per line.
    ///
    /// ```text
    /// M
    /// ├── 0
    /// └── X
    ///     └── 5
    /// ```
    #[must_use]
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        out.push(self.label());
        out.push('\n');
        self.render_children("", &mut out);
        out
    }

    fn render_children(&self, prefix: &str, out: &mut String) {
        let last = self.children.len().saturating_sub(1);
        for (i, child) in self.children.iter().enumerate() {
            let (branch, indent) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            out.push_str(prefix);
            out.push_str(branch);
            out.push(child.label());
            out.push('\n');
            child.render_children(&format!("{prefix}{indent}"), out);
        }
    }
}

/// Preorder traversal returned by [`Node::preorder`].
#[derive(Debug)]
pub struct Preorder<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::NonTerminal;

    fn month_tree() -> Node {
        let mut m = Node::new(NonTerminal::M.into());
        m.add_child(Node::new(Symbol::Terminal('0')));
        m.add_child(Node::new(NonTerminal::X.into()))
            .add_child(Node::new(Symbol::Terminal('5')));
        m
    }

    #[test]
    fn test_add_child_keeps_order() {
        let tree = month_tree();
        let labels: Vec<char> = tree.children().iter().map(Node::label).collect();
        assert_eq!(labels, vec!['0', 'X']);
        assert!(tree.children()[0].is_leaf());
        assert!(!tree.children()[1].is_leaf());
    }

    #[test]
    fn test_leaves_and_yield() {
        let tree = month_tree();
        assert_eq!(
            tree.leaves(),
            vec![Symbol::Terminal('0'), Symbol::Terminal('5')]
        );
        assert_eq!(tree.yield_string(), "05");
    }

    #[test]
    fn test_preorder_depths() {
        let visited: Vec<(usize, char)> = month_tree()
            .preorder()
            .map(|(depth, node)| (depth, node.label()))
            .collect();
        assert_eq!(visited, vec![(0, 'M'), (1, '0'), (1, 'X'), (2, '5')]);
    }

    #[test]
    fn test_depth_and_count() {
        let tree = month_tree();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(Node::new(Symbol::Terminal('1')).depth(), 1);
    }

    #[test]
    fn test_child_at_path() {
        let tree = month_tree();
        assert_eq!(tree.child_at_path(&[]).map(Node::label), Some('M'));
        assert_eq!(tree.child_at_path(&[1, 0]).map(Node::label), Some('5'));
        assert!(tree.child_at_path(&[2]).is_none());
    }

    #[test]
    fn test_render_ascii() {
        assert_eq!(month_tree().render_ascii(), "M\n├── 0\n└── X\n    └── 5\n");
    }
}

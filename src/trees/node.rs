use crate::data::dataset::{Number, WholeNumber};

/// Decision tree node. A fitted tree is either a single leaf or rooted at a
/// decision node, and every decision node owns exactly two children.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode<XT: Number, YT: WholeNumber> {
    /// Internal test on one feature column; rows with a strictly smaller
    /// value descend left, the rest descend right.
    Decision {
        feature_index: usize,
        threshold: XT,
        left: Box<TreeNode<XT, YT>>,
        right: Box<TreeNode<XT, YT>>,
    },
    /// Terminal node carrying the majority label of the rows that reached it.
    Leaf { label: YT },
}

impl<XT: Number, YT: WholeNumber> TreeNode<XT, YT> {
    pub fn leaf(label: YT) -> Self {
        TreeNode::Leaf { label }
    }

    pub fn decision(
        feature_index: usize,
        threshold: XT,
        left: TreeNode<XT, YT>,
        right: TreeNode<XT, YT>,
    ) -> Self {
        TreeNode::Decision {
            feature_index,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Number of levels in the subtree rooted here, counting this node.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Decision { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Depth-first rendering for inspection: decision nodes as
    /// `[X<feature> < <threshold>]`, leaves as `[<label>]`, children indented
    /// one space per level, left subtree before right.
    pub fn render_into(&self, depth: usize, lines: &mut Vec<String>) {
        match self {
            TreeNode::Decision {
                feature_index,
                threshold,
                left,
                right,
            } => {
                lines.push(format!(
                    "{}[X{} < {:.3}]",
                    " ".repeat(depth),
                    feature_index,
                    threshold
                ));
                left.render_into(depth + 1, lines);
                right.render_into(depth + 1, lines);
            }
            TreeNode::Leaf { label } => {
                lines.push(format!("{}[{}]", " ".repeat(depth), label));
            }
        }
    }
}

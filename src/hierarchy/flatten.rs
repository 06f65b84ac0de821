//! Pre-order traversal with subtree exclusion
//!
//! Used for parent selection (a team cannot move under itself or a
//! descendant) and for tabular listings of a tree.

use super::HierarchyNode;

/// Depth-first pre-order walk that skips the subtree rooted at `exclude`.
///
/// Lazy and non-mutating; clone it to restart from the same position.
#[derive(Debug)]
pub struct FlattenWithDepth<'a, N> {
    stack: Vec<(usize, &'a N)>,
    exclude: Option<&'a str>,
}

impl<'a, N> Clone for FlattenWithDepth<'a, N> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            exclude: self.exclude,
        }
    }
}

impl<'a, N: HierarchyNode> Iterator for FlattenWithDepth<'a, N> {
    type Item = (usize, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, node)) = self.stack.pop() {
            if self.exclude == Some(node.id()) {
                continue;
            }
            self.stack
                .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
            return Some((depth, node));
        }
        None
    }
}

/// Same walk as [`FlattenWithDepth`], yielding only the nodes
#[derive(Debug)]
pub struct Flatten<'a, N> {
    inner: FlattenWithDepth<'a, N>,
}

impl<'a, N> Clone for Flatten<'a, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, N: HierarchyNode> Iterator for Flatten<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, node)| node)
    }
}

pub fn flatten<'a, N: HierarchyNode>(tree: &'a N, exclude: Option<&'a str>) -> Flatten<'a, N> {
    Flatten {
        inner: flatten_with_depth(tree, exclude),
    }
}

pub fn flatten_with_depth<'a, N: HierarchyNode>(
    tree: &'a N,
    exclude: Option<&'a str>,
) -> FlattenWithDepth<'a, N> {
    FlattenWithDepth {
        stack: vec![(0, tree)],
        exclude,
    }
}

//! Tree traversal

use crate::OutputNode;

/// Depth-first, pre-order walk over an output subtree.
///
/// Uses an explicit stack so very deep documents do not recurse.
pub struct Descendants<'a> {
    stack: Vec<&'a OutputNode>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(root: &'a OutputNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a OutputNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

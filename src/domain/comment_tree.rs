//! Comment-thread reconstruction.
//!
//! The API delivers a snippet's comments as one flat list where each
//! record carries a nullable parent id. [`build_tree`] turns that list
//! into an ordered forest of [`CommentNode`]s:
//!
//! - comments with a null parent id become roots, in input order;
//! - comments whose parent is present are appended to that parent's
//!   replies, preserving relative input order among siblings;
//! - comments whose declared parent id is absent from the input are
//!   silently dropped — not promoted to root, not reported.
//!
//! The transformation is pure and idempotent: the same input always
//! yields the same forest. Both assembly and traversal use explicit
//! stacks, so reply depth is bounded only by memory, never by the call
//! stack.

use std::collections::{HashMap, HashSet};

use super::comment::Comment;

/// One comment with its resolved replies.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    /// The flat record this node was built from.
    pub comment: Comment,
    /// Direct replies, in input order.
    pub replies: Vec<CommentNode>,
}

/// Builds the reply forest from a flat comment list.
///
/// O(n) grouping followed by an O(n) stack-based assembly. The input is
/// not mutated; records are cloned into the result.
#[must_use]
pub fn build_tree(comments: &[Comment]) -> Vec<CommentNode> {
    let present: HashSet<&str> = comments.iter().map(|c| c.id.as_str()).collect();

    // Single pass: group children under their parent, collect roots.
    // Orphans (parent id not in the input) fall through and are dropped.
    let mut children: HashMap<&str, Vec<&Comment>> = HashMap::new();
    let mut roots: Vec<&Comment> = Vec::new();
    for comment in comments {
        match comment.parent_id.as_ref() {
            None => roots.push(comment),
            Some(parent) if present.contains(parent.as_str()) => {
                children.entry(parent.as_str()).or_default().push(comment);
            }
            Some(parent) => {
                tracing::debug!(
                    comment = %comment.id,
                    parent = %parent,
                    "dropping comment with unresolvable parent"
                );
            }
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, &children))
        .collect()
}

/// Frame of the iterative assembly: a borrowed record, a cursor into its
/// child list, and the owned nodes built so far.
struct Frame<'a> {
    comment: &'a Comment,
    next_child: usize,
    replies: Vec<CommentNode>,
}

/// Converts one root and its (transitively) grouped children into an
/// owned subtree without recursing.
fn assemble(root: &Comment, children: &HashMap<&str, Vec<&Comment>>) -> CommentNode {
    let mut stack = vec![Frame {
        comment: root,
        next_child: 0,
        replies: Vec::new(),
    }];

    loop {
        let pending_child = match stack.last_mut() {
            Some(frame) => {
                let child = children
                    .get(frame.comment.id.as_str())
                    .and_then(|kids| kids.get(frame.next_child))
                    .copied();
                frame.next_child = frame.next_child.saturating_add(1);
                child
            }
            // The stack starts non-empty and the root returns before the
            // last pop, so this arm is unreachable in practice.
            None => {
                return CommentNode {
                    comment: root.clone(),
                    replies: Vec::new(),
                };
            }
        };

        match pending_child {
            Some(child) => stack.push(Frame {
                comment: child,
                next_child: 0,
                replies: Vec::new(),
            }),
            None => {
                let Some(frame) = stack.pop() else {
                    continue;
                };
                let node = CommentNode {
                    comment: frame.comment.clone(),
                    replies: frame.replies,
                };
                match stack.last_mut() {
                    Some(parent) => parent.replies.push(node),
                    None => return node,
                }
            }
        }
    }
}

/// Pre-order, depth-first traversal over a forest.
///
/// Yields `(depth, node)` pairs with roots at depth 0, using an explicit
/// stack so arbitrarily deep threads can be rendered iteratively.
#[must_use]
pub fn walk(forest: &[CommentNode]) -> Walk<'_> {
    Walk {
        stack: forest.iter().rev().map(|node| (0, node)).collect(),
    }
}

/// Iterator returned by [`walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a CommentNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a CommentNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for reply in node.replies.iter().rev() {
            self.stack.push((depth.saturating_add(1), reply));
        }
        Some((depth, node))
    }
}

/// Total number of nodes in a forest (roots plus all descendants).
#[must_use]
pub fn node_count(forest: &[CommentNode]) -> usize {
    walk(forest).count()
}

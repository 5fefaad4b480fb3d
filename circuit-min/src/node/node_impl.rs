// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{NodeError, UnboundVariable},
    node::Assignment,
};
use once_cell::sync::{Lazy, OnceCell};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    hash::{Hash, Hasher},
    ops::{BitAnd, BitOr, Not},
    slice,
    sync::Arc,
};
use twox_hash::XxHash64;

/// An immutable Boolean expression.
///
/// Cloning a `Node` is cheap: subtrees are reference-counted and shared between the trees that
/// contain them.
///
/// The children of `And` and `Or` nodes are kept sorted in the canonical order implemented by
/// [`Ord`], so equality does not depend on the order children were passed in:
///
/// ```
/// use circuit_min::node::Node;
///
/// let a = Node::variable("A").unwrap();
/// let b = Node::variable("B").unwrap();
/// assert_eq!(Node::and([a.clone(), b.clone()]).unwrap(), Node::and([b, a]).unwrap());
/// ```
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeData>,
}

struct NodeData {
    kind: NodeKind,
    size: usize,
    fingerprint: OnceCell<u64>,
    rendered: OnceCell<String>,
}

/// The shape of a [`Node`].
#[derive(Clone, Debug)]
pub enum NodeKind {
    Zero,
    One,
    Variable(Arc<str>),
    Not(Node),
    /// At least two children, sorted.
    And(Vec<Node>),
    /// At least two children, sorted.
    Or(Vec<Node>),
}

impl NodeKind {
    /// Position of this kind in the canonical order.
    fn rank(&self) -> u8 {
        match self {
            NodeKind::Zero => 0,
            NodeKind::One => 1,
            NodeKind::Variable(_) => 2,
            NodeKind::Not(_) => 3,
            NodeKind::And(_) => 4,
            NodeKind::Or(_) => 5,
        }
    }
}

static ZERO: Lazy<Node> = Lazy::new(|| Node::from_kind(NodeKind::Zero));
static ONE: Lazy<Node> = Lazy::new(|| Node::from_kind(NodeKind::One));

impl Node {
    #[inline]
    pub fn zero() -> Self {
        ZERO.clone()
    }

    #[inline]
    pub fn one() -> Self {
        ONE.clone()
    }

    #[inline]
    pub fn constant(value: bool) -> Self {
        if value {
            Self::one()
        } else {
            Self::zero()
        }
    }

    /// Creates a variable. Names that are empty or only whitespace are rejected.
    pub fn variable(name: impl AsRef<str>) -> Result<Self, NodeError> {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(NodeError::EmptyVariableName);
        }
        Ok(Self::from_kind(NodeKind::Variable(name.into())))
    }

    /// A variable named by a single character, which is always a valid name.
    pub(crate) fn symbol(symbol: char) -> Self {
        Self::from_kind(NodeKind::Variable(symbol.to_string().into()))
    }

    #[inline]
    pub fn not(child: Node) -> Self {
        Self::from_kind(NodeKind::Not(child))
    }

    /// Creates an And of at least two children.
    pub fn and(children: impl IntoIterator<Item = Node>) -> Result<Self, NodeError> {
        let children = Self::sorted_children("And", children)?;
        Ok(Self::from_kind(NodeKind::And(children)))
    }

    /// Creates an Or of at least two children.
    pub fn or(children: impl IntoIterator<Item = Node>) -> Result<Self, NodeError> {
        let children = Self::sorted_children("Or", children)?;
        Ok(Self::from_kind(NodeKind::Or(children)))
    }

    /// Creates the conjunction of any number of nodes: `One` if there are none, the node itself
    /// if there is exactly one, and an And otherwise.
    pub fn and_of(children: impl IntoIterator<Item = Node>) -> Self {
        let mut children: Vec<_> = children.into_iter().collect();
        match children.len() {
            0 => Self::one(),
            1 => children.pop().unwrap_or_else(Self::one),
            _ => {
                children.sort_unstable();
                Self::from_kind(NodeKind::And(children))
            }
        }
    }

    /// Creates the disjunction of any number of nodes: `Zero` if there are none, the node itself
    /// if there is exactly one, and an Or otherwise.
    pub fn or_of(children: impl IntoIterator<Item = Node>) -> Self {
        let mut children: Vec<_> = children.into_iter().collect();
        match children.len() {
            0 => Self::zero(),
            1 => children.pop().unwrap_or_else(Self::zero),
            _ => {
                children.sort_unstable();
                Self::from_kind(NodeKind::Or(children))
            }
        }
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.inner.kind
    }

    /// The number of nodes in this tree: 1 for leaves, 1 plus the size of every child otherwise.
    #[inline]
    pub fn size(&self) -> usize {
        self.inner.size
    }

    /// The direct children: one for Not, none for leaves.
    pub fn children(&self) -> &[Node] {
        match self.kind() {
            NodeKind::Zero | NodeKind::One | NodeKind::Variable(_) => &[],
            NodeKind::Not(child) => slice::from_ref(child),
            NodeKind::And(children) | NodeKind::Or(children) => children,
        }
    }

    /// Rebuilds this node with new children, keeping its kind. Leaves are returned unchanged.
    ///
    /// If every new child is the same allocation as the old one, `self` is shared as is.
    pub(crate) fn with_children(&self, children: Vec<Node>) -> Node {
        let unchanged = children.len() == self.children().len()
            && children
                .iter()
                .zip(self.children())
                .all(|(new, old)| Arc::ptr_eq(&new.inner, &old.inner));
        if unchanged {
            return self.clone();
        }
        match self.kind() {
            NodeKind::Zero | NodeKind::One | NodeKind::Variable(_) => self.clone(),
            NodeKind::Not(_) => match children.into_iter().next() {
                Some(child) => Node::not(child),
                None => self.clone(),
            },
            NodeKind::And(_) => Node::and_of(children),
            NodeKind::Or(_) => Node::or_of(children),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self.kind(), NodeKind::Zero)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self.kind(), NodeKind::One)
    }

    #[inline]
    pub fn is_and(&self) -> bool {
        matches!(self.kind(), NodeKind::And(_))
    }

    #[inline]
    pub fn is_or(&self) -> bool {
        matches!(self.kind(), NodeKind::Or(_))
    }

    /// The inner node of a Not.
    #[inline]
    pub fn as_not(&self) -> Option<&Node> {
        match self.kind() {
            NodeKind::Not(child) => Some(child),
            _ => None,
        }
    }

    #[inline]
    pub fn as_variable(&self) -> Option<&str> {
        match self.kind() {
            NodeKind::Variable(name) => Some(&**name),
            _ => None,
        }
    }

    /// Returns true for a variable or a negated variable.
    pub fn is_literal(&self) -> bool {
        match self.kind() {
            NodeKind::Variable(_) => true,
            NodeKind::Not(child) => child.as_variable().is_some(),
            _ => false,
        }
    }

    /// The number of variable occurrences in this tree.
    pub fn literal_count(&self) -> usize {
        match self.kind() {
            NodeKind::Zero | NodeKind::One => 0,
            NodeKind::Variable(_) => 1,
            _ => self.children().iter().map(Node::literal_count).sum(),
        }
    }

    /// The names of all free variables, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut variables = BTreeSet::new();
        self.collect_variables(&mut variables);
        variables
    }

    /// Returns true if this is an And or Or with `child` as a direct child.
    pub fn contains(&self, child: &Node) -> bool {
        match self.kind() {
            NodeKind::And(children) | NodeKind::Or(children) => {
                children.binary_search(child).is_ok()
            }
            _ => false,
        }
    }

    /// Evaluates this tree, looking up variables in `assignment`.
    ///
    /// ```
    /// use circuit_min::node::Node;
    /// use std::collections::HashMap;
    ///
    /// let a = Node::variable("A").unwrap();
    /// let b = Node::variable("B").unwrap();
    /// let node = a & !b;
    ///
    /// let assignment = HashMap::from([("A", true), ("B", false)]);
    /// assert_eq!(node.evaluate(&assignment), Ok(true));
    ///
    /// let partial = HashMap::from([("A", true)]);
    /// assert_eq!(node.evaluate(&partial).unwrap_err().name, "B");
    /// ```
    pub fn evaluate<A: Assignment + ?Sized>(
        &self,
        assignment: &A,
    ) -> Result<bool, UnboundVariable> {
        match self.kind() {
            NodeKind::Zero => Ok(false),
            NodeKind::One => Ok(true),
            NodeKind::Variable(name) => {
                assignment
                    .value_of(name)
                    .ok_or_else(|| UnboundVariable {
                        name: name.to_string(),
                    })
            }
            NodeKind::Not(child) => Ok(!child.evaluate(assignment)?),
            NodeKind::And(children) => {
                // Every child is evaluated so that unbound variables are always reported.
                let mut result = true;
                for child in children {
                    result &= child.evaluate(assignment)?;
                }
                Ok(result)
            }
            NodeKind::Or(children) => {
                let mut result = false;
                for child in children {
                    result |= child.evaluate(assignment)?;
                }
                Ok(result)
            }
        }
    }

    pub(super) fn rendered(&self, init: impl FnOnce() -> String) -> &str {
        self.inner.rendered.get_or_init(init)
    }

    // ---
    // Helper methods
    // ---

    fn from_kind(kind: NodeKind) -> Self {
        let size = match &kind {
            NodeKind::Zero | NodeKind::One | NodeKind::Variable(_) => 1,
            NodeKind::Not(child) => 1 + child.size(),
            NodeKind::And(children) | NodeKind::Or(children) => {
                1 + children.iter().map(Node::size).sum::<usize>()
            }
        };
        Self {
            inner: Arc::new(NodeData {
                kind,
                size,
                fingerprint: OnceCell::new(),
                rendered: OnceCell::new(),
            }),
        }
    }

    fn sorted_children(
        kind: &'static str,
        children: impl IntoIterator<Item = Node>,
    ) -> Result<Vec<Node>, NodeError> {
        let mut children: Vec<_> = children.into_iter().collect();
        if children.len() < 2 {
            return Err(NodeError::TooFewChildren {
                kind,
                count: children.len(),
            });
        }
        children.sort_unstable();
        Ok(children)
    }

    fn collect_variables<'a>(&'a self, variables: &mut BTreeSet<&'a str>) {
        match self.kind() {
            NodeKind::Variable(name) => {
                variables.insert(&**name);
            }
            _ => {
                for child in self.children() {
                    child.collect_variables(variables);
                }
            }
        }
    }

    /// A structural hash, memoized. Children are sorted, so the hash does not depend on the
    /// order they were passed in.
    fn fingerprint(&self) -> u64 {
        *self.inner.fingerprint.get_or_init(|| {
            let mut hasher = XxHash64::with_seed(0);
            hasher.write_u8(self.kind().rank());
            match self.kind() {
                NodeKind::Zero | NodeKind::One => {}
                NodeKind::Variable(name) => hasher.write(name.as_bytes()),
                _ => {
                    for child in self.children() {
                        hasher.write_u64(child.fingerprint());
                    }
                }
            }
            hasher.finish()
        })
    }
}

/// The canonical order: `Zero < One < Variable < Not < And < Or`. Variables compare by name, Not
/// by child, And and Or lexicographically by their sorted children.
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return Ordering::Equal;
        }
        match (self.kind(), other.kind()) {
            (NodeKind::Variable(a), NodeKind::Variable(b)) => a.cmp(b),
            (NodeKind::Not(a), NodeKind::Not(b)) => a.cmp(b),
            (NodeKind::And(a), NodeKind::And(b)) | (NodeKind::Or(a), NodeKind::Or(b)) => {
                a.iter().cmp(b.iter())
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        if self.size() != other.size() || self.fingerprint() != other.fingerprint() {
            return false;
        }
        match (self.kind(), other.kind()) {
            (NodeKind::Zero, NodeKind::Zero) | (NodeKind::One, NodeKind::One) => true,
            (NodeKind::Variable(a), NodeKind::Variable(b)) => a == b,
            (NodeKind::Not(a), NodeKind::Not(b)) => a == b,
            (NodeKind::And(a), NodeKind::And(b)) | (NodeKind::Or(a), NodeKind::Or(b)) => {
                multiset_eq(a, b)
            }
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint());
    }
}

/// Returns true if every element of `a` has a distinct equal partner in `b`.
fn multiset_eq(a: &[Node], b: &[Node]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut matched = vec![false; b.len()];
    a.iter().all(|x| {
        match (0..b.len()).find(|&ix| !matched[ix] && *x == b[ix]) {
            Some(ix) => {
                matched[ix] = true;
                true
            }
            None => false,
        }
    })
}

// ---
// Operators
// ---

impl Not for Node {
    type Output = Node;

    fn not(self) -> Self::Output {
        Node::not(self)
    }
}

impl<'a> Not for &'a Node {
    type Output = Node;

    fn not(self) -> Self::Output {
        Node::not(self.clone())
    }
}

impl BitAnd for Node {
    type Output = Node;

    fn bitand(self, rhs: Self) -> Self::Output {
        Node::and_of([self, rhs])
    }
}

impl<'a, 'b> BitAnd<&'b Node> for &'a Node {
    type Output = Node;

    fn bitand(self, rhs: &'b Node) -> Self::Output {
        Node::and_of([self.clone(), rhs.clone()])
    }
}

impl BitOr for Node {
    type Output = Node;

    fn bitor(self, rhs: Self) -> Self::Output {
        Node::or_of([self, rhs])
    }
}

impl<'a, 'b> BitOr<&'b Node> for &'a Node {
    type Output = Node;

    fn bitor(self, rhs: &'b Node) -> Self::Output {
        Node::or_of([self.clone(), rhs.clone()])
    }
}

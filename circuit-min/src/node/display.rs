// Copyright (c) The circuit-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::node::{Node, NodeKind};
use itertools::{Itertools, Position};
use std::fmt;

/// Renders the canonical infix form: `&` for And, `+` for Or, a `~` prefix for Not and `0`/`1`
/// for constants. An Or directly inside an And is parenthesized and vice versa; a Not of an And
/// or Or wraps it in parentheses.
///
/// ```
/// use circuit_min::node::Node;
///
/// let a = Node::variable("A").unwrap();
/// let b = Node::variable("B").unwrap();
/// let c = Node::variable("C").unwrap();
/// assert_eq!((&a & &(&b | &c)).to_string(), "A&(B+C)");
/// assert_eq!((!(&a & &b)).to_string(), "~(A&B)");
/// ```
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.rendered(|| render(self)))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Node")
            .field(&format_args!("{}", self))
            .finish()
    }
}

fn render(node: &Node) -> String {
    let mut out = String::new();
    match node.kind() {
        NodeKind::Zero => out.push('0'),
        NodeKind::One => out.push('1'),
        NodeKind::Variable(name) => out.push_str(name),
        NodeKind::Not(child) => {
            if child.is_and() || child.is_or() {
                out.push_str("~(");
                out.push_str(&child.to_string());
                out.push(')');
            } else {
                out.push('~');
                out.push_str(&child.to_string());
            }
        }
        NodeKind::And(children) => write_joined(&mut out, children, '&', Node::is_or),
        NodeKind::Or(children) => write_joined(&mut out, children, '+', Node::is_and),
    }
    out
}

fn write_joined(out: &mut String, children: &[Node], separator: char, wrap: fn(&Node) -> bool) {
    for child in children.iter().with_position() {
        let (child, last) = match child {
            Position::First(child) | Position::Middle(child) => (child, false),
            Position::Last(child) | Position::Only(child) => (child, true),
        };
        if wrap(child) {
            out.push('(');
            out.push_str(&child.to_string());
            out.push(')');
        } else {
            out.push_str(&child.to_string());
        }
        if !last {
            out.push(separator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Node {
        Node::variable(name).unwrap()
    }

    #[test]
    fn test_render() {
        let (a, b, c, d) = (var("A"), var("B"), var("C"), var("D"));

        assert_eq!(Node::zero().to_string(), "0");
        assert_eq!(Node::one().to_string(), "1");
        assert_eq!(var("x1").to_string(), "x1");
        assert_eq!((!&a).to_string(), "~A");
        assert_eq!((!!&a).to_string(), "~~A");
        assert_eq!((!(&a | &b)).to_string(), "~(A+B)");
        assert_eq!(Node::and_of([c.clone(), a.clone(), b.clone()]).to_string(), "A&B&C");
        assert_eq!(((&a & &b) | (&c & &d)).to_string(), "(A&B)+(C&D)");
        assert_eq!(((&a | &b) & !(&c & &d)).to_string(), "~(C&D)&(A+B)");
        assert_eq!(Node::or_of([!&a, Node::one(), b]).to_string(), "1+B+~A");
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", var("A") & !var("B")), "Node(A&~B)");
    }
}

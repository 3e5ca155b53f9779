//! Variable substitution.
//!
//! Re-binding a tree onto another variable is how independently built
//! trees are merged: each operand is copied onto one shared variable
//! before the combinator wraps them.

use crate::node::{Leaf, Node};
use crate::var::Var;

impl<T> Node<T> {
    /// Returns a copy of the tree with every occurrence of `old` replaced
    /// by `new`. The receiver is left untouched.
    ///
    /// A tree that never mentions `old` (e.g. a constant) comes back as a
    /// plain clone.
    pub fn substitute(&self, old: &Var, new: &Var) -> Node<T> {
        if old == new || !self.references(old) {
            return self.clone();
        }
        self.rebind(old, new)
    }

    fn rebind(&self, old: &Var, new: &Var) -> Node<T> {
        let sub = |node: &Node<T>| Box::new(node.rebind(old, new));
        match self {
            Node::Var(v) if v == old => Node::Var(new.clone()),
            Node::Var(_) | Node::Literal(_) => self.clone(),
            Node::Member { target, name } => Node::Member {
                target: sub(target),
                name: name.clone(),
            },
            Node::Call {
                target,
                method,
                args,
            } => Node::Call {
                target: sub(target),
                method: method.clone(),
                args: args.iter().map(|a| a.rebind(old, new)).collect(),
            },
            Node::Leaf(leaf) => Node::Leaf(match leaf {
                Leaf::Compare { left, op, right } => Leaf::Compare {
                    left: sub(left),
                    op: *op,
                    right: sub(right),
                },
                Leaf::Test {
                    subject,
                    operator,
                    operand,
                    test,
                } => Leaf::Test {
                    subject: sub(subject),
                    operator: operator.clone(),
                    operand: operand.clone(),
                    test: test.clone(),
                },
                Leaf::Custom { var, label, test } => Leaf::Custom {
                    var: if var == old { new.clone() } else { var.clone() },
                    label: label.clone(),
                    test: test.clone(),
                },
            }),
            Node::And(l, r) => Node::And(sub(l), sub(r)),
            Node::Or(l, r) => Node::Or(sub(l), sub(r)),
            Node::Not(inner) => Node::Not(sub(inner)),
            Node::Conditional {
                test,
                if_true,
                if_false,
            } => Node::Conditional {
                test: sub(test),
                if_true: sub(if_true),
                if_false: sub(if_false),
            },
            Node::Add(l, r) => Node::Add(sub(l), sub(r)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Node, Path};
    use crate::test_utils::Flags;
    use crate::var::Var;

    fn flag_a(x: &Var) -> Node<Flags> {
        Node::eq(Path::parse("a").bind(x), Node::bool(true))
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let x = Var::fresh("x");
        let y = Var::fresh("y");
        let tree = Node::and(
            flag_a(&x),
            Node::custom(&x, "b_set", |f: &Flags| Ok(f.b)),
        );

        let moved = tree.substitute(&x, &y);
        assert!(!moved.references(&x));
        assert_eq!(moved.free_vars().into_iter().collect::<Vec<_>>(), vec![y]);
    }

    #[test]
    fn test_substitute_leaves_original_untouched() {
        let x = Var::fresh("x");
        let y = Var::fresh("y");
        let tree = flag_a(&x);
        let before = tree.clone();

        let _moved = tree.substitute(&x, &y);
        assert!(tree.structurally_eq(&before));
        assert!(tree.references(&x));
    }

    #[test]
    fn test_substitute_without_occurrence_is_noop() {
        let x = Var::fresh("x");
        let y = Var::fresh("y");
        let constant: Node<Flags> = Node::bool(true);

        let moved = constant.substitute(&x, &y);
        assert!(moved.structurally_eq(&constant));
    }

    #[test]
    fn test_substitute_keeps_other_variables() {
        let x = Var::fresh("x");
        let y = Var::fresh("y");
        let z = Var::fresh("z");
        let tree = Node::or(flag_a(&x), flag_a(&z));

        let moved = tree.substitute(&x, &y);
        assert!(moved.references(&y));
        assert!(moved.references(&z));
        assert!(!moved.references(&x));
    }
}

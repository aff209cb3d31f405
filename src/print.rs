//! Diagnostic rendering of the tree shape.

use std::fmt;

use crate::node::Link;
use crate::AvlTree;

const INDENT: usize = 4;

/// Renders a tree sideways: the root in the first column, right subtrees
/// above their parent and left subtrees below, one key per line.
struct Sideways<'a, K, F> {
    root: Link<K>,
    key_fn: &'a F,
}

impl<K, F> fmt::Display for Sideways<'_, K, F>
where
    F: Fn(&K) -> String,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Reverse in-order walk with an explicit stack of (node, depth)
        let mut stack = Vec::new();
        let mut current = self.root;
        let mut depth = 0;
        loop {
            while let Some(node_ptr) = current {
                stack.push((node_ptr, depth));
                current = unsafe { node_ptr.as_ref().right() };
                depth += 1;
            }
            let Some((node_ptr, node_depth)) = stack.pop() else {
                break;
            };
            let node = unsafe { node_ptr.as_ref() };
            writeln!(
                f,
                "{:indent$}{}",
                "",
                (self.key_fn)(&node.key),
                indent = node_depth * INDENT
            )?;
            current = node.left();
            depth = node_depth + 1;
        }
        Ok(())
    }
}

impl<K, C> AvlTree<K, C> {
    /// Renders the tree shape as text, one key per line, using `key_fn` to
    /// format keys. The root sits in the first column; each level below it
    /// is indented further, with right children printed above their parent.
    ///
    /// ```
    /// use avl_index::AvlTree;
    /// let tree: AvlTree<_> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.print(|key| key.to_string()), "    3\n2\n    1\n");
    /// ```
    pub fn print<F>(&self, key_fn: F) -> String
    where
        F: Fn(&K) -> String,
    {
        Sideways {
            root: self.root_link(),
            key_fn: &key_fn,
        }
        .to_string()
    }
}

impl<K: fmt::Display, C> fmt::Display for AvlTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let key_fn = |key: &K| key.to_string();
        let sideways = Sideways {
            root: self.root_link(),
            key_fn: &key_fn,
        };
        write!(f, "{sideways}")
    }
}

#[cfg(test)]
mod tests {
    use crate::AvlTree;

    #[test]
    fn print_empty() {
        let tree = AvlTree::<i32>::new();
        assert_eq!(tree.print(|key| key.to_string()), "");
        assert_eq!(tree.to_string(), "");
    }

    #[test]
    fn print_shape() {
        let tree: AvlTree<_> = (1..=7).collect();
        let expected = "        7\n    6\n        5\n4\n        3\n    2\n        1\n";
        assert_eq!(tree.print(|key| key.to_string()), expected);
        assert_eq!(tree.to_string(), expected);
        assert_eq!(tree.print(|key| format!("<{key}>")).lines().nth(3), Some("<4>"));
    }
}

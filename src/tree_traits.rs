use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::OrderedEntryStore;

/// Renders a tree-shaped structure for terminal display.
pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T> TreeDisplay for OrderedEntryStore<T> {
    /// Left children are prefixed with `<`, right children with `>=`.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty store".to_string());
        };

        fn build_tree<T>(
            store: &OrderedEntryStore<T>,
            node_idx: Index,
            label: String,
        ) -> Tree<String> {
            let mut tree = Tree::new(label);
            if let Some(node) = store.get_node(node_idx) {
                for (prefix, child_idx) in [("<", node.left), (">=", node.right)] {
                    let Some(child_idx) = child_idx else {
                        continue;
                    };
                    if let Some(child) = store.get_node(child_idx) {
                        let child_label = format!("{} {}", prefix, child.key);
                        tree.push(build_tree(store, child_idx, child_label));
                    }
                }
            }
            tree
        }

        let root_label = self
            .get_node(root_idx)
            .map(|n| n.key.clone())
            .unwrap_or_default();
        build_tree(self, root_idx, root_label)
    }
}

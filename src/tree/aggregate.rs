use super::{CoverageTree, NodeId};
use crate::model::percent;

/// Fill in `hits`, `lines` and `ratio` for every directory from its children.
///
/// Walks the arena in reverse id order: children always have larger ids than
/// their parent, so every child total is final before its parent is summed.
/// File nodes are left as built.
pub fn aggregate(tree: &mut CoverageTree) {
    for index in (0..tree.len()).rev() {
        let id = NodeId(index);
        let node = tree.node(id);
        if !node.is_dir() {
            continue;
        }

        let (hits, lines) = node.children.iter().fold((0, 0), |(hits, lines), &child| {
            let child = tree.node(child);
            (hits + child.hits, lines + child.lines)
        });

        let node = tree.node_mut(id);
        node.hits = hits;
        node.lines = lines;
        node.ratio = percent(hits, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileRecord;

    #[test]
    fn test_aggregate_totals() {
        let mut tree = CoverageTree::build(&[
            FileRecord::new("a/x.go", 2, 4),
            FileRecord::new("a/y.go", 0, 6),
            FileRecord::new("b/z.go", 5, 5),
        ]);
        aggregate(&mut tree);

        assert_eq!((tree.root().hits, tree.root().lines), (7, 15));
        let a = tree.node(tree.find("a").unwrap());
        assert_eq!((a.hits, a.lines), (2, 10));
        assert_eq!(a.ratio, 20.0);
        let b = tree.node(tree.find("b").unwrap());
        assert_eq!(b.ratio, 100.0);
    }

    #[test]
    fn test_aggregate_deep_chain() {
        let mut tree = CoverageTree::build(&[
            FileRecord::new("a/b/c/d.go", 3, 4),
            FileRecord::new("a/e.go", 1, 4),
        ]);
        aggregate(&mut tree);
        let c = tree.node(tree.find("a/b/c").unwrap());
        assert_eq!((c.hits, c.lines), (3, 4));
        let a = tree.node(tree.find("a").unwrap());
        assert_eq!((a.hits, a.lines), (4, 8));
        assert_eq!(a.ratio, 50.0);
    }

    #[test]
    fn test_zero_lines_stay_finite() {
        let mut tree = CoverageTree::build(&[
            FileRecord::new("gen/empty.go", 0, 0),
            FileRecord::new("top.go", 0, 0),
        ]);
        aggregate(&mut tree);
        for index in 0..tree.len() {
            let node = tree.node(NodeId(index));
            assert!(node.ratio.is_finite(), "{} has ratio {}", node.name, node.ratio);
        }
        assert_eq!(tree.node(tree.find("gen").unwrap()).ratio_label(), "-");
    }

    #[test]
    fn test_aggregate_leaves_files_alone() {
        let mut tree = CoverageTree::build(&[FileRecord::new("a/x.go", 3, 4)]);
        aggregate(&mut tree);
        aggregate(&mut tree);
        let x = tree.node(tree.find("a/x.go").unwrap());
        assert_eq!((x.hits, x.lines), (3, 4));
        assert_eq!(x.ratio, 75.0);
        assert_eq!((tree.root().hits, tree.root().lines), (3, 4));
    }
}

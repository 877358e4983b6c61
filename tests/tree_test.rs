//! Rebalancing scenarios on the public tree API

use pretty_assertions::assert_eq;
use rstest::rstest;

use avltree::{AvlTree, TreeView};

fn tree_of(values: &[i64]) -> AvlTree<i64> {
    values.iter().copied().collect()
}

/// Pre-order dump `value/height` so two shapes can be compared exactly.
fn shape(view: TreeView<'_, i64>) -> Vec<String> {
    fn walk(view: TreeView<'_, i64>, out: &mut Vec<String>) {
        match view.value() {
            None => out.push(".".into()),
            Some(v) => {
                out.push(format!("{}/{}", v, view.height()));
                walk(view.left(), out);
                walk(view.right(), out);
            }
        }
    }
    let mut out = Vec::new();
    walk(view, &mut out);
    out
}

// ============================================================
// Single insertion rebalance cases
// ============================================================

#[rstest]
#[case::right_right(&[10, 20, 30])]
#[case::left_left(&[30, 20, 10])]
#[case::left_right(&[30, 10, 20])]
#[case::right_left(&[10, 30, 20])]
fn given_three_values_when_inserted_then_middle_value_is_root(#[case] values: &[i64]) {
    let tree = tree_of(values);

    assert_eq!(tree.root_value(), Some(&20));
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.to_vec(), vec![10, 20, 30]);
    assert_eq!(shape(tree.view()), vec!["20/2", "10/1", ".", ".", "30/1", ".", "."]);
    tree.validate().unwrap();
}

#[test]
fn given_left_right_case_when_inserted_then_direction_follows_inserted_value() {
    // 50 <- 20 with 20 -> 30 inserted last: only the left-right double rotation
    // yields 30 at the root
    let tree = tree_of(&[50, 20, 60, 10, 30, 25]);
    assert_eq!(tree.root_value(), Some(&30));
    assert_eq!(
        shape(tree.view()),
        vec!["30/3", "20/2", "10/1", ".", ".", "25/1", ".", ".", "50/2", ".", "60/1", ".", "."]
    );
    tree.validate().unwrap();
}

#[test]
fn given_right_left_case_when_inserted_then_direction_follows_inserted_value() {
    let tree = tree_of(&[20, 10, 50, 60, 40, 45]);
    assert_eq!(tree.root_value(), Some(&40));
    assert_eq!(tree.to_vec(), vec![10, 20, 40, 45, 50, 60]);
    tree.validate().unwrap();
}

// ============================================================
// Deletion
// ============================================================

#[test]
fn given_two_child_node_when_deleted_then_successor_promoted() {
    let mut tree = tree_of(&[10, 20, 30, 40, 50, 25]);
    assert_eq!(tree.root_value(), Some(&30));

    assert!(tree.delete(&30));

    assert_eq!(tree.to_vec(), vec![10, 20, 25, 40, 50]);
    assert_eq!(tree.root_value(), Some(&40));
    assert_eq!(tree.len(), 5);
    tree.validate().unwrap();
}

#[test]
fn given_deep_tree_when_deleting_then_rebalances_up_to_root() {
    // Fibonacci-shaped tree: removing the shallow side forces rotations on
    // more than one level
    let mut tree = tree_of(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
    tree.validate().unwrap();
    let before = tree.height();

    assert!(tree.delete(&12));
    tree.validate().unwrap();
    // rotated at 11, then again at the root
    assert_eq!(tree.root_value(), Some(&5));
    assert_eq!(
        tree.view().pre_order().copied().collect::<Vec<_>>(),
        vec![5, 3, 2, 1, 4, 8, 7, 6, 10, 9, 11]
    );
    assert!(tree.delete(&10));
    tree.validate().unwrap();

    assert!(tree.height() <= before);
    assert_eq!(tree.to_vec(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 11]);
}

#[rstest]
#[case::empty(&[], 5)]
#[case::non_empty(&[1, 2, 3], 5)]
fn given_missing_value_when_deleted_then_tree_unchanged(#[case] values: &[i64], #[case] missing: i64) {
    let mut tree = tree_of(values);
    let before = shape(tree.view());

    assert!(!tree.delete(&missing));

    assert_eq!(shape(tree.view()), before);
    assert_eq!(tree.len(), values.len());
}

#[test]
fn given_present_value_when_inserted_again_then_shape_unchanged() {
    let mut tree = tree_of(&[4, 2, 6, 1, 3]);
    let before = shape(tree.view());

    assert!(!tree.insert(3));

    assert_eq!(shape(tree.view()), before);
    assert_eq!(tree.len(), 5);
}

#[test]
fn given_all_values_deleted_when_done_then_tree_is_empty() {
    let mut tree: AvlTree<i64> = (1..=32).collect();
    for v in (1..=32).rev().step_by(2).chain((1..=32).step_by(2)) {
        tree.delete(&v);
        tree.validate().unwrap();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[test]
fn given_sorted_input_when_inserted_then_height_is_logarithmic() {
    let tree: AvlTree<i64> = (0..1023).collect();
    // AVL bound: h < 1.44 log2(n + 2)
    assert!(tree.height() <= 14, "height {}", tree.height());
    assert_eq!(tree.len(), 1023);
    tree.validate().unwrap();
}

#[test]
fn given_string_keys_when_inserted_then_ordered() {
    let mut tree: AvlTree<String> = ["pear", "apple", "fig"].iter().map(|s| s.to_string()).collect();
    assert!(tree.delete(&"pear".to_string()));
    assert_eq!(tree.to_vec(), vec!["apple".to_string(), "fig".to_string()]);
}

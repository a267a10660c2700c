use rb_tree::{Position, RbTree, TreeConfig, TreeError};

fn assert_rb_tree<K, V, C>(tree: &RbTree<K, V, C>)
where
    C: Fn(&K, &K) -> std::cmp::Ordering,
{
    tree.validate().unwrap();
    assert_eq!(tree.iter().count(), tree.len());
}

fn keys<V, C>(tree: &RbTree<i32, V, C>) -> Vec<i32>
where
    C: Fn(&i32, &i32) -> std::cmp::Ordering,
{
    tree.keys().copied().collect()
}

#[test]
fn unique_insert_erase_example_matrix() {
    let mut tree = RbTree::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        let (pos, inserted) = tree.insert_unique(k, ()).unwrap();
        assert!(inserted);
        assert_eq!(*tree.key(pos), k);
        assert_rb_tree(&tree);
    }
    assert_eq!(keys(&tree), vec![1, 3, 4, 5, 7, 8, 9]);

    assert_eq!(tree.erase_key(&5), 1);
    assert_eq!(keys(&tree), vec![1, 3, 4, 7, 8, 9]);
    assert_eq!(tree.len(), 6);
    assert_eq!(*tree.key(tree.lower_bound(&4)), 4);
    assert_eq!(*tree.key(tree.upper_bound(&4)), 7);
    assert_rb_tree(&tree);
}

#[test]
fn multi_insert_example_matrix() {
    let mut tree = RbTree::new();
    for k in [2, 2, 2, 1, 3] {
        tree.insert_multi(k, ()).unwrap();
        assert_rb_tree(&tree);
    }
    let (first, last) = tree.equal_range(&2);
    let span: Vec<_> = tree.range(first, last).map(|(k, _)| *k).collect();
    assert_eq!(span, vec![2, 2, 2]);
    assert_eq!(tree.count(&2), 3);
    assert_eq!(tree.count(&4), 0);
}

#[test]
fn duplicate_unique_insert_matrix() {
    let mut tree = RbTree::new();
    let (first, inserted) = tree.insert_unique(10, "a").unwrap();
    assert!(inserted);
    for _ in 0..3 {
        let (again, inserted) = tree.insert_unique(10, "b").unwrap();
        assert!(!inserted);
        assert_eq!(again, first);
        assert_eq!(tree.len(), 1);
    }
    assert_eq!(*tree.value(first), "a");
}

#[test]
fn find_then_erase_round_trip_matrix() {
    let mut tree = RbTree::new();
    let nums = [88, 13, 30, 18, 35, 98, 51, 76, 96, 72, 94, 59, 92];
    for num in nums {
        tree.insert_unique(num, num * 2).unwrap();
    }

    for num in nums {
        let pos = tree.find(&num);
        assert_eq!(*tree.key(pos), num);
        assert_eq!(*tree.value(pos), num * 2);
        tree.erase(pos);
        assert!(tree.find(&num).is_end());
        assert_rb_tree(&tree);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.begin(), tree.end());
}

#[test]
fn stepping_forward_and_backward_matrix() {
    let tree: RbTree<i32, ()> = (1..=20).map(|k| (k * 3, ())).collect();

    let mut forward = Vec::new();
    let mut pos = tree.begin();
    while pos != tree.end() {
        forward.push(*tree.key(pos));
        pos = tree.next_pos(pos);
    }
    assert_eq!(forward, (1..=20).map(|k| k * 3).collect::<Vec<_>>());

    let mut backward = Vec::new();
    let mut pos = tree.end();
    while pos != tree.begin() {
        pos = tree.prev_pos(pos);
        backward.push(*tree.key(pos));
    }
    forward.reverse();
    assert_eq!(backward, forward);
}

#[test]
fn erase_preserves_relative_order_matrix() {
    let mut tree = RbTree::new();
    for (i, k) in [4, 1, 4, 2, 4, 3, 1].into_iter().enumerate() {
        tree.insert_multi(k, i).unwrap();
    }
    // Drop the middle 4 and one of the 1s by position.
    let fours: Vec<Position> = {
        let (mut pos, last) = tree.equal_range(&4);
        let mut out = Vec::new();
        while pos != last {
            out.push(pos);
            pos = tree.next_pos(pos);
        }
        out
    };
    tree.erase(fours[1]);
    tree.erase(tree.find(&1));

    let got: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(got, vec![(1, 6), (2, 3), (3, 5), (4, 0), (4, 4)]);
    assert_rb_tree(&tree);
}

#[test]
fn positions_survive_unrelated_mutations_matrix() {
    let mut tree = RbTree::new();
    let held = tree.insert_unique(500, "held").unwrap().0;
    for k in 0..200 {
        tree.insert_unique(k, "x").unwrap();
        tree.insert_unique(1000 - k, "y").unwrap();
    }
    for k in 0..200 {
        if k % 2 == 0 {
            tree.erase_unique(&k);
        }
    }
    assert_eq!(tree.get(held), Some((&500, &"held")));
    assert_rb_tree(&tree);
}

#[test]
fn swap_exchanges_contents_matrix() {
    let mut a: RbTree<i32, char> = [(1, 'a'), (2, 'b')].into_iter().collect();
    let mut b: RbTree<i32, char> = [(9, 'z')].into_iter().collect();
    let held = a.find(&2);

    a.swap(&mut b);
    assert_eq!(keys(&a), vec![9]);
    assert_eq!(keys(&b), vec![1, 2]);
    // Positions follow the elements into the other tree.
    assert_eq!(b.get(held), Some((&2, &'b')));
    assert_rb_tree(&a);
    assert_rb_tree(&b);
}

#[test]
fn clear_resets_to_empty_matrix() {
    let mut tree: RbTree<i32, ()> = (0..100).map(|k| (k, ())).collect();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert_rb_tree(&tree);

    tree.insert_unique(1, ()).unwrap();
    assert_eq!(keys(&tree), vec![1]);
}

#[test]
fn clone_is_independent_matrix() {
    let mut tree: RbTree<i32, String> = (0..50).map(|k| (k, k.to_string())).collect();
    let copy = tree.clone();
    assert_eq!(copy, tree);
    assert_eq!(copy.height(), tree.height());
    assert_eq!(copy.black_height(), tree.black_height());

    tree.erase_unique(&10);
    *tree.value_mut(tree.find(&11)) = "changed".to_string();
    assert_eq!(copy.len(), 50);
    assert_eq!(copy.get(copy.find(&11)), Some((&11, &"11".to_string())));
    assert_rb_tree(&copy);
}

#[test]
fn custom_comparator_matrix() {
    // Case-insensitive ordering: "B" and "b" are equivalent keys.
    let mut tree = RbTree::with_comparator(|a: &String, b: &String| {
        a.to_lowercase().cmp(&b.to_lowercase())
    });
    for s in ["b", "A", "c", "B"] {
        tree.insert_unique(s.to_string(), ()).unwrap();
    }
    let got: Vec<_> = tree.keys().cloned().collect();
    assert_eq!(got, vec!["A", "b", "c"]);
    assert!(!tree.find(&"C".to_string()).is_end());
}

#[test]
fn allocation_failure_rolls_back_matrix() {
    let config = TreeConfig::new().with_node_limit(8);
    let mut tree = RbTree::with_config(|a: &i32, b: &i32| a.cmp(b), config);
    for k in 0..8 {
        tree.insert_multi(k, k).unwrap();
    }
    let before: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();

    let err = TreeError::AllocFailed { requested: 1 };
    assert_eq!(tree.insert_multi(3, 0), Err(err.clone()));
    assert_eq!(tree.insert_unique(100, 0).map(|(_, ok)| ok), Err(err.clone()));
    assert_eq!(tree.insert_multi_hint(tree.begin(), -1, 0), Err(err.clone()));
    assert_eq!(tree.insert_unique_iter([(50, 0), (51, 0)]), Err(err));

    let after: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(after, before);
    assert_eq!(tree.len(), 8);
    assert_rb_tree(&tree);

    // Freed slots are handed out again.
    tree.erase_unique(&0);
    tree.insert_unique(100, 0).unwrap();
    assert_rb_tree(&tree);
}

#[test]
fn height_stays_logarithmic_matrix() {
    let mut tree = RbTree::new();
    for k in 0..1024 {
        tree.insert_unique(k, ()).unwrap();
    }
    assert_rb_tree(&tree);
    // A red-black tree with n nodes is at most 2 * log2(n + 1) high.
    assert!(tree.height() <= 20, "height {}", tree.height());
    assert!(tree.black_height() >= 5);
}

use tango_forest::{BinarySearchTree, TreeConfig, TreeError, TreeKind, TreeStats, MAX_LEVELS};

#[test]
fn perfect_tree_shape_for_every_kind_matrix() {
    for kind in TreeKind::ALL {
        let tree = TreeConfig::new(kind, 3).build(|k| k).unwrap();
        let root = tree.view(tree.root().unwrap());
        assert_eq!(tree.len(), 7, "{kind}");
        assert_eq!(tree.keys(), (1..=7).collect::<Vec<_>>(), "{kind}");
        assert_eq!(root.key, 4, "{kind}");
        assert_eq!(root.size, 7, "{kind}");
        assert_eq!(root.parent, None, "{kind}");
    }
}

#[test]
fn views_expose_family_augmentation_matrix() {
    for kind in TreeKind::ALL {
        let tree = TreeConfig::new(kind, 2).build(|k| k).unwrap();
        let root = tree.view(tree.root().unwrap());
        match kind {
            TreeKind::Basic | TreeKind::Splay => {
                assert_eq!(root.color, None);
                assert_eq!(root.depth, None);
                assert!(!root.marked);
            }
            TreeKind::RedBlack => {
                assert!(root.color.is_some());
                assert_eq!(root.depth, None);
            }
            TreeKind::RedBlackTango | TreeKind::UnbalancedTango => {
                assert!(root.marked);
                assert_eq!(root.depth, Some(0));
            }
        }
    }
}

#[test]
fn mutability_follows_kind_matrix() {
    for kind in TreeKind::ALL {
        let mut tree = TreeConfig::new(kind, 2).build(|k| k).unwrap();
        let inserted = tree.insert(10, 10);
        let removed = tree.remove(1);
        if kind.is_mutable() {
            assert!(inserted.is_ok(), "{kind}");
            assert_eq!(removed, Ok(Some(1)), "{kind}");
            assert_eq!(tree.keys(), vec![2, 3, 10], "{kind}");
        } else {
            assert_eq!(inserted, Err(TreeError::OperationNotPermitted("insert")));
            assert_eq!(removed, Err(TreeError::OperationNotPermitted("remove")));
            assert_eq!(tree.keys(), vec![1, 2, 3], "{kind}");
        }
    }
}

#[test]
fn search_hits_for_every_kind_matrix() {
    for kind in TreeKind::ALL {
        let mut tree = TreeConfig::new(kind, 4).build(|k| format!("v{k}")).unwrap();
        for key in 1..=15 {
            let hit = tree.search(key).unwrap();
            assert!(hit.exact, "{kind} search({key})");
            assert_eq!(hit.value, &format!("v{key}"));
        }
        assert!(tree.stats().traversals >= 15, "{kind}");
        tree.reset_stats();
        assert_eq!(tree.stats(), TreeStats::default());
    }
}

#[test]
fn tree_config_json_matrix() {
    let config: TreeConfig = serde_json::from_str(r#"{"kind":"rbTango","levels":4}"#).unwrap();
    assert_eq!(config, TreeConfig::new(TreeKind::RedBlackTango, 4));

    let config: TreeConfig = serde_json::from_str(r#"{"kind":"splay","levels":2}"#).unwrap();
    assert_eq!(config.kind, TreeKind::Splay);

    let json = serde_json::to_string(&TreeConfig::new(TreeKind::UnbalancedTango, 3)).unwrap();
    assert_eq!(json, r#"{"kind":"uTango","levels":3}"#);

    assert!(serde_json::from_str::<TreeConfig>(r#"{"kind":"avl","levels":3}"#).is_err());
}

#[test]
fn stats_json_matrix() {
    let mut tree = TreeKind::Splay.create::<i32>();
    tree.initialize_perfect_tree(3, |k| k).unwrap();
    tree.search(1);
    let stats = tree.stats();
    assert_eq!(stats.rotations, 2);

    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["rotations"], 2);
    assert_eq!(json["traversals"], 3);
    assert_eq!(json["other_traversals"], 0);
    assert_eq!(stats.to_string(), "TreeStats: rot=2,trav=3,otrav=0");
}

#[test]
fn invalid_levels_matrix() {
    for kind in TreeKind::ALL {
        for levels in [0, MAX_LEVELS + 1] {
            let err = TreeConfig::new(kind, levels).build(|k| k).err().unwrap();
            assert_eq!(
                err,
                TreeError::InvalidLevels {
                    levels,
                    max: MAX_LEVELS
                }
            );
        }
    }
    let err = TreeConfig::new(TreeKind::Basic, 0).build(|k| k).err().unwrap();
    assert_eq!(err.to_string(), "perfect tree levels must be in 1..=30, got 0");
}

#[test]
fn unknown_kind_matrix() {
    let err = "avl".parse::<TreeKind>().unwrap_err();
    assert_eq!(err, TreeError::UnknownTreeKind("avl".to_string()));
    assert_eq!(err.to_string(), "unknown tree kind: \"avl\"");

    for kind in TreeKind::ALL {
        assert_eq!(kind.name().to_lowercase().parse::<TreeKind>().unwrap(), kind);
    }
}

#[test]
fn reinitialize_replaces_contents_matrix() {
    for kind in TreeKind::ALL {
        let mut tree = kind.create::<i32>();
        assert!(tree.is_empty());
        tree.initialize_perfect_tree(4, |k| k).unwrap();
        tree.search(3);
        tree.initialize_perfect_tree(2, |k| -k).unwrap();
        assert_eq!(tree.keys(), vec![1, 2, 3], "{kind}");
        assert_eq!(tree.search(2).map(|hit| *hit.value), Some(-2), "{kind}");
    }
}

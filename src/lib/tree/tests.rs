use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{is_last_sibling, render_prefix, shapes};

prop_compose! {
    // Depth sequences as produced by real navigation: start at 1, grow by at most one.
    fn nav_depths()(steps in proptest::collection::vec(-3i32..=1, 0..24)) -> Vec<u32> {
        let mut depths = vec![1u32];
        for step in steps {
            let last = *depths.last().unwrap() as i32;
            depths.push((last + step).max(1) as u32);
        }
        depths
    }
}

#[test]
fn last_sibling_stops_at_shallower_entry() {
    let depths = [1, 2, 2, 1];
    assert!(!is_last_sibling(&depths, 0));
    assert!(!is_last_sibling(&depths, 1));
    assert!(is_last_sibling(&depths, 2));
    assert!(is_last_sibling(&depths, 3));
}

#[test]
fn ancestor_flags_have_depth_minus_one_entries() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&proptest::collection::vec(1u32..6, 1..20), |depths| {
            for (shape, depth) in shapes(&depths).iter().zip(&depths) {
                prop_assert_eq!(shape.ancestor_is_last.len(), *depth as usize - 1);
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn parent_is_nearest_shallower_predecessor() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&nav_depths(), |depths| {
            let shapes = shapes(&depths);
            for (i, shape) in shapes.iter().enumerate() {
                let expected = (0..i).rev().find(|&j| depths[j] < depths[i]);
                prop_assert_eq!(shape.parent, expected);
                let has_children = depths.get(i + 1).is_some_and(|&n| n > depths[i]);
                prop_assert_eq!(shape.has_children, has_children);
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn ancestor_flags_match_parent_chain() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&nav_depths(), |depths| {
            let shapes = shapes(&depths);
            for (i, shape) in shapes.iter().enumerate() {
                // Without depth skips, the innermost flag is the parent's own flag.
                if let Some(p) = shape.parent {
                    prop_assert_eq!(
                        shape.ancestor_is_last.last().copied(),
                        Some(shapes[p].is_last_sibling)
                    );
                    prop_assert_eq!(&shape.ancestor_is_last[..depths[p] as usize - 1], &shapes[p].ancestor_is_last[..]);
                } else {
                    prop_assert_eq!(depths[i], 1);
                }
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn depth_one_has_no_prefix() {
    let shapes = shapes(&[1, 1]);
    assert_eq!(render_prefix(1, &shapes[0]), None);
    assert_eq!(render_prefix(1, &shapes[1]), None);
}

#[test]
fn last_child_under_finished_root() {
    let shapes = shapes(&[1, 2, 2]);
    assert_eq!(render_prefix(2, &shapes[1]).as_deref(), Some("├─ "));
    assert_eq!(render_prefix(2, &shapes[2]).as_deref(), Some("   └─ "));
}

#[test]
fn prefixes_draw_continuation_lines() {
    let depths = [1, 2, 3, 2, 1, 2];
    let shapes = shapes(&depths);
    let prefixes: Vec<Option<String>> = depths
        .iter()
        .zip(&shapes)
        .map(|(d, s)| render_prefix(*d, s))
        .collect();
    assert_eq!(
        prefixes,
        vec![
            None,
            Some("│  ├─ ".to_string()),
            Some("│  │  └─ ".to_string()),
            Some("│  └─ ".to_string()),
            None,
            Some("   └─ ".to_string()),
        ]
    );
}

#[test]
fn skipped_depths_render_as_finished() {
    let shapes = shapes(&[1, 3]);
    assert_eq!(shapes[1].ancestor_is_last, vec![true, true]);
    assert_eq!(render_prefix(3, &shapes[1]).as_deref(), Some("      └─ "));
}

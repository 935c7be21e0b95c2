use rb_stepper::{
    Color, Snapshot, Step, StepKind, Stepper, StepperError, Tick,
};

fn completed(values: &[i32]) -> Stepper<i32> {
    let mut s = Stepper::new();
    for &v in values {
        s.insert(v).unwrap();
        s.run_to_completion();
        if let Err(err) = s.tree().check() {
            panic!("invalid red-black tree after insert({v}): {err}");
        }
    }
    s
}

fn root_value(s: &Stepper<i32>) -> i32 {
    let root = s.tree().root().expect("non-empty tree");
    s.tree().node(root).value
}

#[test]
fn ascending_three_rotates_to_middle_root() {
    let s = completed(&[10, 20, 30]);
    let snap = Snapshot::capture(s.tree());
    assert_eq!(
        snap.preorder(),
        vec![(&20, Color::Black), (&10, Color::Red), (&30, Color::Red)]
    );
    let last = s.history().current().unwrap();
    assert_eq!(last.kind, StepKind::Case3);
}

#[test]
fn delete_with_successor_keeps_black_height() {
    let mut s = completed(&[10, 20, 30, 40, 50, 60, 70]);
    s.delete(&20).unwrap();
    s.run_to_completion();
    assert_eq!(root_value(&s), 30);
    assert_eq!(s.values(), vec![10, 30, 40, 50, 60, 70]);
    assert!(s.black_height().is_ok());
    assert_eq!(s.tree().check(), Ok(()));

    let descriptions = s.history().descriptions();
    assert_eq!(descriptions[0], "Starting delete for: 20");
    assert_eq!(descriptions[1], "Pre-Delete: Successor 30 found.");
}

#[test]
fn empty_tree_black_height_is_one() {
    let s = Stepper::<i32>::new();
    assert_eq!(s.black_height(), Ok(1));
    assert_eq!(s.height(), 0);
    assert_eq!(s.node_count(), 0);
}

#[test]
fn insert_then_delete_restores_tree() {
    let mut s = completed(&[10, 20, 30, 40]);
    let before = Snapshot::capture(s.tree());
    s.insert(5).unwrap();
    s.run_to_completion();
    s.delete(&5).unwrap();
    s.run_to_completion();
    assert_eq!(Snapshot::capture(s.tree()), before);
}

#[test]
fn insert_then_delete_restores_key_set() {
    let mut s = completed(&[20, 10, 30]);
    s.insert(5).unwrap();
    s.run_to_completion();
    s.delete(&5).unwrap();
    s.run_to_completion();
    assert_eq!(s.values(), vec![10, 20, 30]);
    assert_eq!(s.tree().check(), Ok(()));
}

#[test]
fn delete_absent_changes_nothing() {
    let mut s = completed(&[8, 4, 12, 2, 6]);
    let before = Snapshot::capture(s.tree());
    assert_eq!(s.delete(&7), Err(StepperError::ValueNotFound));
    assert_eq!(Snapshot::capture(s.tree()), before);
    assert_eq!(s.fixup_kind(), None);
    assert_eq!(
        s.history().descriptions(),
        vec![
            "Starting delete for: 7",
            "Value not found in tree (No change)"
        ]
    );
}

#[test]
fn duplicate_insert_changes_nothing() {
    let mut s = completed(&[8, 4, 12]);
    let before = Snapshot::capture(s.tree());
    assert_eq!(s.insert(4), Err(StepperError::DuplicateValue));
    assert_eq!(Snapshot::capture(s.tree()), before);
}

#[test]
fn red_removal_completes_without_machine() {
    let mut s = completed(&[20, 10, 30]);
    s.delete(&30).unwrap();
    assert_eq!(s.fixup_kind(), None);
    let last = s.history().current().unwrap();
    assert_eq!(last.kind, StepKind::Complete);
    assert_eq!(last.description, "Deleted RED node 30. Fix-up complete.");
}

#[test]
fn black_removal_is_stepped() {
    let mut s = completed(&[20, 10, 30, 40]);
    s.delete(&40).unwrap();
    s.delete(&10).unwrap();
    assert!(s.fixup_kind().is_some());
    // Deficient left slot of 20: black heights disagree until fixed.
    assert!(s.black_height().is_err());

    assert_eq!(s.tick(), Tick::Advanced(Step::Continue));
    assert_eq!(s.history().current().unwrap().kind, StepKind::Case2);
    assert_eq!(s.tick(), Tick::Advanced(Step::Stop));
    assert_eq!(s.history().current().unwrap().kind, StepKind::Complete);
    assert_eq!(s.black_height(), Ok(2));
    assert_eq!(s.tree().check(), Ok(()));
}

#[test]
fn clear_resets_tree_and_history() {
    let mut s = completed(&[1, 2, 3]);
    s.insert(4).unwrap();
    s.clear();
    assert!(s.tree().is_empty());
    assert_eq!(s.fixup_kind(), None);
    assert_eq!(s.history().descriptions(), vec!["Tree cleared"]);
    assert_eq!(s.history().current().unwrap().kind, StepKind::Cleared);
}

#[test]
fn each_operation_starts_a_new_history() {
    let mut s = completed(&[1, 2]);
    s.insert(3).unwrap();
    assert_eq!(s.history().len(), 2);
    s.run_to_completion();
    assert_eq!(s.history().len(), 3);
    s.insert(4).unwrap();
    assert_eq!(s.history().len(), 2);
    assert_eq!(s.history().entries()[0].description, "Starting insert for: 4");
}

#[test]
fn mixed_sequence_matrix() {
    let mut s = completed(&[10, 11, 12, 50, 60, 25, 100, 88, 33, 22, 55, 59, 51]);
    assert_eq!(s.node_count(), 13);
    for (value, left) in [(100, 12), (33, 11), (10, 10), (60, 9), (22, 8)] {
        s.delete(&value).unwrap();
        s.run_to_completion();
        assert_eq!(s.node_count(), left);
        if let Err(err) = s.tree().check() {
            panic!("invalid red-black tree after delete({value}): {err}");
        }
    }
    assert_eq!(s.delete(&33), Err(StepperError::ValueNotFound));
}

#[test]
fn numbers_from_0_to_100() {
    let mut s = Stepper::new();
    for i in 0..=100 {
        s.insert(i).unwrap();
        s.run_to_completion();
        assert_eq!(s.node_count(), (i + 1) as usize);
    }
    assert_eq!(s.tree().check(), Ok(()));
    for i in 0..=100 {
        s.delete(&i).unwrap();
        s.run_to_completion();
        assert_eq!(s.node_count(), (100 - i) as usize);
        assert_eq!(s.tree().check(), Ok(()));
    }
}

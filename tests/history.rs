use eframe_sketch::{Drawable, History, MarkerLine, Stamp};
use egui::{Color32, pos2};

fn stroke_a() -> Drawable {
    Drawable::Stroke(MarkerLine::from_points(
        vec![pos2(0.0, 0.0), pos2(5.0, 5.0)],
        2.0,
        Color32::BLACK,
    ))
}

fn stamp_b() -> Drawable {
    Drawable::Stamp(Stamp::new(pos2(10.0, 10.0), "★", 12.0))
}

#[test]
fn test_undo_redo_walks_both_stacks() {
    let mut history = History::new();
    history.commit(stroke_a());
    history.commit(stamp_b());

    assert!(history.undo());
    assert_eq!(history.committed(), &[stroke_a()]);
    assert_eq!(history.undone(), &[stamp_b()]);

    assert!(history.undo());
    assert!(history.committed().is_empty());
    assert_eq!(history.undone(), &[stamp_b(), stroke_a()]);

    assert!(history.redo());
    assert_eq!(history.committed(), &[stroke_a()]);
    assert_eq!(history.undone(), &[stamp_b()]);

    assert!(history.redo());
    assert_eq!(history.committed(), &[stroke_a(), stamp_b()]);
    assert!(history.undone().is_empty());
}

#[test]
fn test_undo_then_redo_restores_identical_sequence() {
    let mut history = History::new();
    for i in 0..5 {
        let x = i as f32;
        history.commit(Drawable::Stroke(MarkerLine::from_points(
            vec![pos2(x, x), pos2(x + 1.0, x + 2.0)],
            x + 1.0,
            Color32::from_rgb(10 * i as u8, 0, 0),
        )));
    }
    let before = history.committed().to_vec();

    for _ in 0..3 {
        history.undo();
    }
    for _ in 0..3 {
        history.redo();
    }

    assert_eq!(history.committed(), before.as_slice());
}

#[test]
fn test_commit_discards_redo_stack() {
    let mut history = History::new();
    history.commit(stroke_a());
    history.commit(stamp_b());
    history.undo();
    history.undo();
    assert_eq!(history.undone().len(), 2);

    history.commit(stamp_b());
    assert!(history.undone().is_empty());
    assert!(!history.can_redo());
    assert!(!history.redo());
    assert_eq!(history.committed(), &[stamp_b()]);
}

#[test]
fn test_empty_stacks_are_noops() {
    let mut history = History::new();
    assert!(!history.undo());
    assert!(!history.redo());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_clear_empties_both_stacks() {
    let mut history = History::new();
    history.commit(stroke_a());
    history.commit(stamp_b());
    history.undo();

    history.clear();
    assert!(history.committed().is_empty());
    assert!(history.undone().is_empty());
    assert!(!history.undo());
}

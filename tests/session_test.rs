//! Scripted sessions wired through the service container, as the CLI runs them.

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use avltree::application::{ApplicationError, Change, Outcome};
use avltree::config::{RenderStyle, Settings};
use avltree::infrastructure::ServiceContainer;
use avltree::util::testing::{init_test_setup, SharedBuffer};

#[fixture]
fn buffer() -> SharedBuffer {
    init_test_setup();
    SharedBuffer::default()
}

fn container(render: RenderStyle) -> ServiceContainer {
    ServiceContainer::new(Settings {
        render,
        ..Settings::default()
    })
}

#[rstest]
fn given_script_when_run_then_every_change_is_rendered_in_order(buffer: SharedBuffer) {
    let mut session = container(RenderStyle::Inorder).session(buffer.clone());
    let script = "\
# build a small tree
insert 10 20 30
delete 20
+5
";

    let executed = session.run_script(script, |_, _| {}).unwrap();

    assert_eq!(executed, 3);
    assert_eq!(
        buffer.contents(),
        "insert 10:\n[10]\n\
         insert 20:\n[10, 20]\n\
         insert 30:\n[10, 20, 30]\n\
         delete 20:\n[10, 30]\n\
         insert 5:\n[5, 10, 30]\n"
    );
}

#[rstest]
fn given_tree_style_when_rotation_happens_then_diagram_shows_new_root(buffer: SharedBuffer) {
    let mut session = container(RenderStyle::Tree).session(buffer.clone());

    session.run_script("insert 10 20 30", |_, _| {}).unwrap();

    let out = buffer.contents();
    let last = out.rsplit("insert 30:\n").next().unwrap();
    assert!(last.starts_with("20\n"), "{out}");
    assert!(last.contains("10"));
    assert!(last.contains("30"));
}

#[rstest]
fn given_noop_commands_when_run_then_nothing_redrawn(buffer: SharedBuffer) {
    let mut session = container(RenderStyle::Inorder).session(buffer.clone());
    session.run_script("insert 1", |_, _| {}).unwrap();
    buffer.clear();

    session.run_script("insert 1\ndelete 99\nshow\ncontains 1", |_, _| {}).unwrap();

    assert!(buffer.contents().is_empty());
}

#[rstest]
fn given_redraw_noops_when_duplicate_inserted_then_drawn_with_marker(buffer: SharedBuffer) {
    let settings = Settings {
        render: RenderStyle::Inorder,
        redraw_noops: true,
        ..Settings::default()
    };
    let mut session = ServiceContainer::new(settings).session(buffer.clone());

    session.run_script("insert 4\ninsert 4", |_, _| {}).unwrap();

    assert_eq!(buffer.contents(), "insert 4:\n[4]\ninsert 4 (no change):\n[4]\n");
}

#[rstest]
fn given_script_when_run_then_callback_sees_outcomes_and_tree(buffer: SharedBuffer) {
    let mut session = container(RenderStyle::Quiet).session(buffer.clone());
    let mut seen = Vec::new();

    session
        .run_script("insert 3 1\ncontains 3\nlist\nquit\ninsert 99", |outcome, view| {
            seen.push((outcome.clone(), view.len()));
        })
        .unwrap();

    assert_eq!(
        seen,
        vec![
            (
                Outcome::Inserted(vec![
                    Change { value: 3, changed: true },
                    Change { value: 1, changed: true },
                ]),
                2
            ),
            (Outcome::Contains { value: 3, found: true }, 2),
            (Outcome::Listed(vec![1, 3]), 2),
            (Outcome::Quit, 2),
        ]
    );
    assert!(!session.tree().contains(&99));
    assert!(buffer.contents().is_empty());
}

#[rstest]
#[case::bad_number("insert 1\ninsert 2x\ninsert 3", 2)]
#[case::unknown_command("\n\nfrobnicate 4", 3)]
#[case::missing_argument("# header\ndelete", 2)]
fn given_bad_line_when_run_then_error_carries_line_number(
    buffer: SharedBuffer,
    #[case] script: &str,
    #[case] expected_line: usize,
) {
    let mut session = container(RenderStyle::Quiet).session(buffer);

    let err = session.run_script(script, |_, _| {}).unwrap_err();

    assert!(err.is_input_error());
    match err {
        ApplicationError::Script { line, .. } => assert_eq!(line, expected_line),
        other => panic!("expected script error, got {other:?}"),
    }
}

#[rstest]
fn given_failing_line_when_run_then_earlier_lines_applied(buffer: SharedBuffer) {
    let mut session = container(RenderStyle::Quiet).session(buffer);

    assert!(session.run_script("insert 5 6\ndelete abc\ninsert 7", |_, _| {}).is_err());

    assert_eq!(session.tree().to_vec(), vec![5, 6]);
}

#[rstest]
fn given_seeded_settings_when_clear_then_empty_tree_drawn(buffer: SharedBuffer) {
    let settings = Settings {
        render: RenderStyle::Tree,
        seed: vec![2, 1, 3],
        ..Settings::default()
    };
    let mut session = ServiceContainer::new(settings).session(buffer.clone());
    assert!(buffer.contents().is_empty());

    session.run_script("clear\ncheck", |_, _| {}).unwrap();

    assert_eq!(buffer.contents(), "clear:\n(empty)\n");
    assert!(session.tree().is_empty());
}

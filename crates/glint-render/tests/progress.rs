use std::sync::Arc;
use std::time::Duration;

use glint_render::progress::{ManualClock, Progress, ProgressColumn, TaskState, TaskUpdate};
use glint_render::{ProgressBar, Render};
use glint_style::Capability;

fn output(progress: &Progress<Vec<u8>>) -> String {
    String::from_utf8_lossy(progress.writer()).into_owned()
}

#[test]
fn test_hundred_advances_complete_the_task() {
    let clock = Arc::new(ManualClock::new());
    let mut progress = Progress::new(Vec::new())
        .capability(Capability::None)
        .clock(clock.clone());
    let task = progress.add_task("Working", Some(100.0));
    progress.start().unwrap();

    for _ in 0..100 {
        progress.advance(task, 1.0).unwrap();
        clock.advance(Duration::from_millis(30));
        progress.tick().unwrap();
    }
    progress.stop().unwrap();

    let state = progress.task(task).unwrap();
    assert_eq!(state.completed(), 100.0);
    assert_eq!(state.state(), TaskState::Completed);
    assert!(progress.finished());

    let out = output(&progress);
    assert!(out.contains(&"━".repeat(40)), "{out}");
    assert!(out.contains("100%"));
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn test_interactive_session_redraws_in_place() {
    let clock = Arc::new(ManualClock::new());
    let mut progress = Progress::new(Vec::new())
        .capability(Capability::TrueColor)
        .clock(clock.clone())
        .width(50);
    let a = progress.add_task("first", Some(10.0));
    let b = progress.add_task("second", Some(10.0));
    progress.start().unwrap();

    for step in 0..10 {
        progress.advance(a, 1.0).unwrap();
        if step % 2 == 0 {
            progress.advance(b, 2.0).unwrap();
        }
        clock.advance(Duration::from_millis(100));
        assert!(progress.tick().unwrap());
    }
    progress.stop().unwrap();

    let out = output(&progress);
    assert!(out.starts_with("\x1b[?25l"));
    assert!(out.ends_with("\n\x1b[?25h"));
    assert!(out.contains("\r\x1b[2K\x1b[1A\x1b[2K"));

    let stripped = console::strip_ansi_codes(&out).into_owned();
    let last_frame: Vec<&str> = stripped.lines().rev().take(2).collect();
    assert!(last_frame.iter().all(|line| line.contains("100%")), "{stripped}");
}

#[test]
fn test_indeterminate_task_pulses() {
    let clock = Arc::new(ManualClock::new());
    let mut progress = Progress::new(Vec::new())
        .capability(Capability::TrueColor)
        .clock(clock.clone())
        .columns(vec![ProgressColumn::Bar { width: Some(20) }]);
    progress.add_task("spin", None);
    progress.start().unwrap();
    let first = progress.render_lines();
    clock.advance(Duration::from_millis(200));
    let second = progress.render_lines();
    assert_ne!(first, second);
    assert!(!progress.finished());
}

#[test]
fn test_update_changes_description_and_total() {
    let clock = Arc::new(ManualClock::new());
    let mut progress = Progress::new(Vec::new())
        .capability(Capability::None)
        .clock(clock.clone())
        .columns(vec![
            ProgressColumn::Description,
            ProgressColumn::Count,
            ProgressColumn::Elapsed,
        ]);
    let task = progress.add_task("download", None);
    progress
        .update(task, TaskUpdate::new().total(Some(4.0)).completed(1.0))
        .unwrap();
    progress
        .update(task, TaskUpdate::new().description("[bold]unpack[/bold]"))
        .unwrap();
    clock.advance(Duration::from_secs(61));
    let lines = progress.render_lines();
    assert_eq!(lines[0].plain_text(), "unpack 1/4 0:01:01");
}

#[test]
fn test_bar_renderable_standalone() {
    let bar = ProgressBar::new(Some(4.0)).completed(1.0);
    let line = &bar.render(8)[0];
    assert_eq!(line.plain_text(), "━━╺━━━━━");
    assert_eq!(line.width(), 8);
}

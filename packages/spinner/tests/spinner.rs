use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pistonite_spinner as spinner;
use spinner::{Capture, Indicator, ProgressSpinner, ProgressSpinnerOptions, SpinnerState};

const GLYPHS: [&str; 4] = ["a", "b", "c", "d"];

fn spinner(interval_ms: u64) -> (ProgressSpinner<Capture>, Capture) {
    let capture = Capture::new();
    let options = ProgressSpinnerOptions::default()
        .label("Spin: ")
        .glyphs(GLYPHS)
        .update_interval_ms(interval_ms);
    let spinner = ProgressSpinner::with_console(options, capture.clone()).unwrap();
    (spinner, capture)
}

fn glyph_index(frame: &str) -> usize {
    let glyph = frame.strip_prefix("Spin: ").unwrap();
    GLYPHS.iter().position(|x| *x == glyph).unwrap()
}

#[test]
fn test_frames_advance_in_cyclic_order() {
    let (spinner, capture) = spinner(20);
    spinner.start();
    thread::sleep(Duration::from_millis(300));
    spinner.stop();

    let frames = capture.frames();
    let (done, frames) = frames.split_last().unwrap();
    assert_eq!(done, "Spin:  ✓ OK!\n");
    assert_eq!(frames[0], "Spin: a");
    // loose bounds, the scheduler may be slow
    assert!(frames.len() >= 3, "only {} frames", frames.len());
    assert!(frames.len() <= 20, "{} frames", frames.len());
    for pair in frames.windows(2) {
        let (prev, next) = (glyph_index(&pair[0]), glyph_index(&pair[1]));
        assert_eq!(next, (prev + 1) % GLYPHS.len(), "{pair:?}");
    }
    assert_eq!(
        spinner.frame_index(),
        glyph_index(frames.last().unwrap())
    );
}

#[test]
fn test_double_stop_prints_one_completion() {
    let (spinner, capture) = spinner(10);
    spinner.start();
    thread::sleep(Duration::from_millis(30));
    spinner.stop();
    spinner.stop();
    assert_eq!(capture.completed_lines(), vec!["Spin:  ✓ OK!"]);
    assert_eq!(capture.cursor_visible(), Some(true));
    assert_eq!(spinner.state(), SpinnerState::Stopped);
}

#[test]
fn test_no_frames_after_stop() {
    let (spinner, capture) = spinner(5);
    spinner.start();
    thread::sleep(Duration::from_millis(20));
    spinner.stop();
    let count = capture.events().len();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(capture.events().len(), count);
    assert!(capture.output().ends_with("Spin:  ✓ OK!\n"));
}

#[test]
fn test_update_text_shows_on_next_frame() {
    let (spinner, capture) = spinner(10);
    spinner.start();
    spinner.update_text("Halfway there: ");
    thread::sleep(Duration::from_millis(50));
    spinner.stop();
    assert!(capture.frames().iter().any(|x| x.starts_with("Halfway there: ")));
    assert_eq!(capture.completed_lines(), vec!["Halfway there:  ✓ OK!"]);
}

#[test]
fn test_drop_stops_spinner() {
    let (spinner, capture) = spinner(10);
    spinner.start();
    drop(spinner);
    assert_eq!(capture.completed_lines(), vec!["Spin:  ✓ OK!"]);
    assert_eq!(capture.cursor_visible(), Some(true));
}

#[test]
fn test_stop_from_another_thread() {
    let (spinner, capture) = spinner(10);
    let spinner = Arc::new(spinner);
    spinner.start();
    let handle = {
        let spinner = Arc::clone(&spinner);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            spinner.stop();
        })
    };
    handle.join().unwrap();
    assert_eq!(spinner.state(), SpinnerState::Stopped);
    assert_eq!(capture.completed_lines().len(), 1);
}

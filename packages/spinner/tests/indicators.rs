use std::sync::Arc;

use pistonite_spinner as spinner;
use spinner::console::Event;
use spinner::{
    Capture, ConfigError, Error, HProgressBar, HProgressBarOptions, Indicator, Progress,
    ProgressSpinner, ProgressSpinnerOptions, VProgressBar, VProgressBarOptions,
};

fn hbar(options: HProgressBarOptions) -> (HProgressBar<Capture>, Capture) {
    let capture = Capture::new();
    let bar = HProgressBar::with_console(options, capture.clone()).unwrap();
    (bar, capture)
}

fn vbar(options: VProgressBarOptions) -> (VProgressBar<Capture>, Capture) {
    let capture = Capture::new();
    let bar = VProgressBar::with_console(options, capture.clone()).unwrap();
    (bar, capture)
}

#[test]
fn test_hbar_segments_for_all_percentages() {
    let (bar, _capture) = hbar(HProgressBarOptions::default().segments(7));
    for p in -50..=150 {
        let p = p as f64;
        bar.update_progress(p);
        let expected = (p.clamp(0.0, 100.0) / 100.0 * 7.0).round() as usize;
        assert_eq!(bar.current_segments(), expected, "percentage {p}");
        assert!(bar.current_segments() <= bar.total_segments());
    }
}

#[test]
fn test_hbar_half_renders_five_and_five() {
    let (bar, capture) = hbar(HProgressBarOptions::default().segments(10));
    bar.update_progress(50.0);
    let frame = capture.last_frame().unwrap();
    let track = frame
        .strip_prefix("Progress: [")
        .and_then(|x| x.strip_suffix(']'))
        .unwrap();
    assert_eq!(track, "█████░░░░░");
    assert_eq!(track.matches('█').count(), 5);
    assert_eq!(track.matches('░').count(), 5);
}

#[test]
fn test_hbar_stop_fills_and_prints_completion() {
    let (bar, capture) = hbar(
        HProgressBarOptions::default()
            .segments(4)
            .label("Loading: ")
            .completed_label("done"),
    );
    bar.start();
    bar.update_progress(30.0);
    bar.stop();
    assert_eq!(bar.current_segments(), 4);
    assert_eq!(capture.completed_lines(), vec!["Loading: done"]);
    assert!(capture.output().ends_with("Loading: done\n"));
    assert_eq!(capture.cursor_visible(), Some(true));

    // every call prints the completion line again
    bar.stop();
    assert_eq!(capture.completed_lines().len(), 2);
    assert_eq!(capture.cursor_visible(), Some(true));
}

#[test]
fn test_hbar_final_frame_is_not_flushed() {
    let (bar, capture) = hbar(HProgressBarOptions::default().segments(2).use_brackets(false));
    bar.start();
    capture.reset();
    bar.stop();
    assert_eq!(
        capture.events(),
        vec![
            Event::ClearLine,
            Event::Text("Progress: ██".to_string()),
            Event::ClearLine,
            Event::Text("Progress:  ✓ OK!\n".to_string()),
            Event::ShowCursor(true),
            Event::Flush,
        ]
    );
}

#[test]
fn test_hbar_zero_segments_rejected_without_output() {
    let capture = Capture::new();
    let result = HProgressBar::with_console(
        HProgressBarOptions::default().segments(0),
        capture.clone(),
    );
    assert_eq!(
        result.unwrap_err(),
        Error::InvalidConfiguration(ConfigError::ZeroSegments)
    );
    assert!(capture.events().is_empty());
}

#[test]
fn test_hbar_drop_restores_cursor() {
    let (bar, capture) = hbar(HProgressBarOptions::default().segments(2).use_brackets(false));
    bar.update_progress(50.0);
    drop(bar);
    assert_eq!(capture.output(), "Progress: █░\n");
    assert_eq!(capture.cursor_visible(), Some(true));
    assert!(capture.completed_lines().iter().all(|x| !x.contains("OK")));
}

#[test]
fn test_vbar_ramp_of_five() {
    let (bar, capture) = vbar(VProgressBarOptions::default().glyphs(["0", "1", "2", "3", "4"]));
    assert_eq!(bar.frame_index(), 0);
    assert_eq!(capture.last_frame().unwrap(), "Progress: 0");

    bar.update_progress(0.0);
    assert_eq!(bar.frame_index(), 0);

    bar.update_progress(75.0);
    assert_eq!(bar.frame_index(), 4);
    assert_eq!(capture.last_frame().unwrap(), "Progress: 4");
    assert!(capture.completed_lines().is_empty());

    bar.update_progress(100.0);
    assert_eq!(bar.frame_index(), 4);
    assert!(bar.is_completed());
    assert_eq!(capture.completed_lines(), vec!["Progress:  ✓ OK!"]);
    // no frame is drawn after the completion line
    assert!(capture.frames().last().unwrap().ends_with('\n'));
}

#[test]
fn test_vbar_update_text_clears_latch() {
    let (bar, capture) = vbar(VProgressBarOptions::default().glyphs(["a", "b", "c"]));
    bar.update_progress(100.0);
    assert!(bar.is_completed());

    bar.update_text("Next: ");
    assert!(!bar.is_completed());
    assert_eq!(capture.last_frame().unwrap(), "Next: c");

    capture.reset();
    bar.update_progress(50.0);
    assert_eq!(capture.frames(), vec!["Next: b"]);

    // the bar can complete again
    bar.update_progress(100.0);
    assert_eq!(capture.completed_lines(), vec!["Next:  ✓ OK!"]);
}

#[test]
fn test_vbar_start_is_noop() {
    let (bar, capture) = vbar(VProgressBarOptions::default());
    let count = capture.events().len();
    bar.start();
    assert_eq!(capture.events().len(), count);
}

#[test]
fn test_vbar_stop_prints_completion() {
    let (bar, capture) = vbar(VProgressBarOptions::default().label("Step: "));
    bar.update_progress(40.0);
    bar.stop();
    assert_eq!(capture.completed_lines(), vec!["Step:  ✓ OK!"]);
    assert_eq!(capture.cursor_visible(), Some(true));
}

#[test]
fn test_empty_glyphs_rejected_without_output() {
    let capture = Capture::new();
    let empty: [&str; 0] = [];

    let err = VProgressBar::with_console(VProgressBarOptions::default().glyphs(empty), capture.clone())
        .unwrap_err();
    assert_eq!(err, Error::InvalidConfiguration(ConfigError::EmptyGlyphs));

    let err = ProgressSpinner::with_console(
        ProgressSpinnerOptions::default().glyphs(empty),
        capture.clone(),
    )
    .unwrap_err();
    assert_eq!(err, Error::InvalidConfiguration(ConfigError::EmptyGlyphs));

    let err = HProgressBar::with_console(HProgressBarOptions::default().glyphs(empty), capture.clone())
        .unwrap_err();
    assert_eq!(err, Error::InvalidConfiguration(ConfigError::GlyphPair(0)));

    assert!(capture.events().is_empty());
}

#[test]
fn test_bars_through_dyn_progress() {
    let h = hbar(HProgressBarOptions::default().segments(4).use_brackets(false));
    let v = vbar(VProgressBarOptions::default().glyphs(["a", "b", "c", "d"]));
    let bars: [&dyn Progress; 2] = [&h.0, &v.0];
    for bar in bars {
        bar.start();
        bar.update_progress(60.0);
    }
    assert_eq!(h.1.last_frame().unwrap(), "Progress: ██░░");
    assert_eq!(v.1.last_frame().unwrap(), "Progress: c");
}

#[test]
fn test_updates_from_many_threads_never_tear() {
    let capture = Capture::new();
    let bar = Arc::new(
        HProgressBar::with_console(
            HProgressBarOptions::default().segments(20).use_brackets(false),
            capture.clone(),
        )
        .unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let bar = Arc::clone(&bar);
            std::thread::spawn(move || {
                for i in 0..50 {
                    bar.update_progress(((t * 50 + i) % 101) as f64);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    for frame in capture.frames() {
        let track = frame.strip_prefix("Progress: ").unwrap();
        assert_eq!(track.chars().count(), 20, "torn frame: {frame:?}");
    }
}

#[test]
fn test_indicators_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HProgressBar>();
    assert_send_sync::<VProgressBar>();
    assert_send_sync::<ProgressSpinner>();
    assert_send_sync::<HProgressBar<Capture>>();
    assert_send_sync::<ProgressSpinner<Capture>>();
}

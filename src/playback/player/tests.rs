use std::thread;
use std::time::Instant;

use super::*;

fn device() -> RodioDevice {
    RodioDevice::spawn(Duration::from_millis(20))
}

/// Wait for the next play resolution, skipping position reports.
fn next_play_result(device: &mut RodioDevice) -> DeviceEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(e) = device.poll_event() {
            if matches!(e.event, MediaEvent::PlayResolved { .. }) {
                return e;
            }
            continue;
        }
        assert!(Instant::now() < deadline, "audio thread never answered");
        thread::sleep(Duration::from_millis(5));
    }
}

fn missing_path(dir: &tempfile::TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

#[test]
fn play_without_load_resolves_not_loaded() {
    let mut d = device();
    d.play(PlayToken(1));

    let e = next_play_result(&mut d);
    assert_eq!(
        e,
        DeviceEvent::new(
            LoadId(0),
            MediaEvent::PlayResolved {
                token: PlayToken(1),
                result: Err(PlaybackError::NotLoaded),
            }
        )
    );
}

#[test]
fn play_after_loading_a_missing_file_reports_the_fetch_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = device();
    d.load(LoadId(1), &missing_path(&dir, "gone.mp3"));
    d.play(PlayToken(7));

    let e = next_play_result(&mut d);
    assert_eq!(e.load, LoadId(1));
    match e.event {
        MediaEvent::PlayResolved { token, result } => {
            assert_eq!(token, PlayToken(7));
            assert!(matches!(result, Err(PlaybackError::Fetch(_))));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn events_carry_the_latest_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = device();
    d.load(LoadId(1), &missing_path(&dir, "a.mp3"));
    d.load(LoadId(2), &missing_path(&dir, "b.mp3"));
    d.play(PlayToken(3));

    let e = next_play_result(&mut d);
    assert_eq!(e.load, LoadId(2));
}

#[test]
fn commands_are_handled_while_a_load_is_pending() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = device();
    d.load(LoadId(1), &missing_path(&dir, "slow.mp3"));
    d.pause();
    d.set_volume(0.3);
    d.seek(Duration::from_secs(4));
    d.play(PlayToken(1));

    let e = next_play_result(&mut d);
    assert_eq!(e.load, LoadId(1));
}

#[test]
fn dropping_the_device_stops_the_audio_thread() {
    let d = device();
    let tx = d.tx.clone();
    drop(d);

    // The thread owned the receiving end; once joined, sends fail.
    assert!(tx.send(DeviceCmd::Pause).is_err());
}

#[test]
fn play_after_the_thread_exits_resolves_disconnected() {
    let mut d = device();
    d.load(LoadId(4), "/nonexistent/a.mp3");
    d.send(DeviceCmd::Quit).unwrap();
    d.join.take().unwrap().join().unwrap();

    d.play(PlayToken(9));
    assert_eq!(
        d.poll_event(),
        Some(DeviceEvent::new(
            LoadId(4),
            MediaEvent::PlayResolved {
                token: PlayToken(9),
                result: Err(PlaybackError::Disconnected),
            }
        ))
    );
    assert_eq!(d.poll_event(), None);
}

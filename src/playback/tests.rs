use std::collections::VecDeque;
use std::time::Duration;

use super::*;
use crate::catalog::Track;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(String),
    Play(PlayToken),
    Pause,
    Seek(Duration),
    Volume(f32),
}

/// Records every command; events are queued by the test and stamped with
/// the load that was current when they were queued.
#[derive(Default)]
struct FakeDevice {
    calls: Vec<Call>,
    load: LoadId,
    queued: VecDeque<DeviceEvent>,
}

impl FakeDevice {
    fn emit(&mut self, event: MediaEvent) {
        self.queued.push_back(DeviceEvent::new(self.load, event));
    }

    fn last_play(&self) -> Option<PlayToken> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Play(t) => Some(*t),
            _ => None,
        })
    }

    fn last_volume(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Volume(v) => Some(*v),
            _ => None,
        })
    }
}

impl PlaybackDevice for FakeDevice {
    fn load(&mut self, id: LoadId, source: &str) {
        self.load = id;
        self.calls.push(Call::Load(source.to_string()));
    }
    fn play(&mut self, token: PlayToken) {
        self.calls.push(Call::Play(token));
    }
    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }
    fn seek(&mut self, position: Duration) {
        self.calls.push(Call::Seek(position));
    }
    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::Volume(volume));
    }
    fn poll_event(&mut self) -> Option<DeviceEvent> {
        self.queued.pop_front()
    }
}

fn track(id: &str, audio: Option<&str>) -> Track {
    Track {
        id: id.into(),
        title: id.into(),
        artist: String::new(),
        album: String::new(),
        cover: String::new(),
        duration: 200,
        audio_url: audio.map(str::to_string),
        lyrics: Vec::new(),
    }
}

fn controller() -> PlaybackController<FakeDevice> {
    PlaybackController::new(FakeDevice::default(), 70)
}

/// Load a track and resolve a play request successfully.
fn playing_controller() -> PlaybackController<FakeDevice> {
    let mut c = controller();
    c.load(&track("a", Some("/music/a.mp3")));
    c.play();
    let token = c.device().last_play().unwrap();
    c.handle_event(MediaEvent::PlayResolved {
        token,
        result: Ok(()),
    });
    assert!(c.is_playing());
    c
}

#[test]
fn new_pushes_initial_effective_volume() {
    let c = controller();
    assert_eq!(c.device().calls, vec![Call::Volume(0.7)]);
}

#[test]
fn load_resets_position_and_playing_for_tracks_with_audio() {
    let mut c = playing_controller();
    c.handle_event(MediaEvent::TimeUpdate(42.0));

    c.load(&track("b", Some("https://example.com/b.mp3")));
    assert_eq!(c.current_time(), 0.0);
    assert!(!c.is_playing());
    assert_eq!(c.duration(), 200.0);
    assert_eq!(
        c.device().calls.last(),
        Some(&Call::Load("https://example.com/b.mp3".into()))
    );
}

#[test]
fn load_without_audio_source_is_a_no_op() {
    let mut c = controller();
    c.load(&track("silent", None));
    c.load(&track("blank", Some("  ")));
    assert!(!c.is_loaded());
    assert_eq!(c.device().calls, vec![Call::Volume(0.7)]);
}

#[test]
fn play_success_sets_playing() {
    let c = playing_controller();
    assert!(c.last_error().is_none());
    assert!(!c.is_play_pending());
}

#[test]
fn play_rejection_keeps_paused_and_records_reason() {
    let mut c = controller();
    c.load(&track("a", Some("/music/a.mp3")));
    c.play();
    assert!(c.is_play_pending());

    let token = c.device().last_play().unwrap();
    c.device_mut().emit(MediaEvent::PlayResolved {
        token,
        result: Err(PlaybackError::Decode("bad frame".into())),
    });
    c.tick();

    assert!(!c.is_playing());
    assert_eq!(
        c.last_error(),
        Some(&PlaybackError::Decode("bad frame".into()))
    );
}

#[test]
fn play_with_nothing_loaded_fails_without_touching_the_device() {
    let mut c = controller();
    c.play();
    assert!(!c.is_playing());
    assert_eq!(c.last_error(), Some(&PlaybackError::NotLoaded));
    assert!(c.device().last_play().is_none());
}

#[test]
fn play_result_arriving_after_pause_is_ignored() {
    let mut c = controller();
    c.load(&track("a", Some("/music/a.mp3")));
    c.play();
    let token = c.device().last_play().unwrap();
    c.pause();

    c.handle_event(MediaEvent::PlayResolved {
        token,
        result: Ok(()),
    });
    assert!(!c.is_playing());
}

#[test]
fn play_result_from_previous_load_is_ignored() {
    let mut c = controller();
    c.load(&track("a", Some("/music/a.mp3")));
    c.play();
    let stale = c.device().last_play().unwrap();

    c.load(&track("b", Some("/music/b.mp3")));
    c.handle_event(MediaEvent::PlayResolved {
        token: stale,
        result: Ok(()),
    });
    assert!(!c.is_playing());
}

#[test]
fn toggle_play_pause_alternates() {
    let mut c = playing_controller();
    c.toggle_play_pause();
    assert!(!c.is_playing());
    assert_eq!(c.device().calls.last(), Some(&Call::Pause));

    c.toggle_play_pause();
    assert!(c.is_play_pending());
    assert!(matches!(c.device().calls.last(), Some(Call::Play(_))));
}

#[test]
fn seek_is_optimistic_and_clamped() {
    let mut c = playing_controller();
    c.handle_event(MediaEvent::MetadataReady(180.0));

    c.seek(30.0);
    assert_eq!(c.current_time(), 30.0);
    assert_eq!(
        c.device().calls.last(),
        Some(&Call::Seek(Duration::from_secs(30)))
    );

    c.seek(-5.0);
    assert_eq!(c.current_time(), 0.0);

    c.seek(500.0);
    assert_eq!(c.current_time(), 180.0);

    c.seek(10.0);
    c.seek_by(-15.0);
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn time_updates_are_clamped_to_duration() {
    let mut c = playing_controller();
    c.handle_event(MediaEvent::MetadataReady(100.0));
    c.handle_event(MediaEvent::TimeUpdate(150.0));
    assert_eq!(c.current_time(), 100.0);
}

#[test]
fn metadata_replaces_provisional_duration_but_ignores_garbage() {
    let mut c = playing_controller();
    assert_eq!(c.duration(), 200.0);
    c.handle_event(MediaEvent::MetadataReady(f64::NAN));
    assert_eq!(c.duration(), 200.0);
    c.handle_event(MediaEvent::MetadataReady(123.5));
    assert_eq!(c.duration(), 123.5);
}

#[test]
fn toggle_mute_twice_restores_and_mutes_output() {
    let mut c = controller();
    let before = c.is_muted();

    c.toggle_mute();
    assert!(c.is_muted());
    assert_eq!(c.effective_volume(), 0.0);
    assert_eq!(c.device().last_volume(), Some(0.0));

    c.toggle_mute();
    assert_eq!(c.is_muted(), before);
    assert_eq!(c.device().last_volume(), Some(0.7));
}

#[test]
fn muted_output_is_zero_for_any_volume() {
    for v in [0u8, 1, 50, 100] {
        let mut c = controller();
        c.change_volume(v);
        c.toggle_mute();
        assert!(c.is_muted());
        assert_eq!(c.effective_volume(), 0.0);
        assert_eq!(c.device().last_volume(), Some(0.0));
    }
}

#[test]
fn change_volume_zero_keeps_mute_positive_clears_it() {
    let mut c = controller();
    c.toggle_mute();

    c.change_volume(0);
    assert!(c.is_muted());
    assert_eq!(c.volume(), 0);

    c.change_volume(35);
    assert!(!c.is_muted());
    assert_eq!(c.device().last_volume(), Some(0.35));

    c.change_volume(250);
    assert_eq!(c.volume(), 100);
}

#[test]
fn ended_resets_regardless_of_volume_and_mute() {
    for (volume, muted) in [(0u8, false), (70, true), (100, false)] {
        let mut c = playing_controller();
        c.change_volume(volume);
        if muted {
            c.toggle_mute();
        }
        c.handle_event(MediaEvent::TimeUpdate(120.0));

        c.device_mut().emit(MediaEvent::Ended);
        c.tick();

        assert!(!c.is_playing());
        assert_eq!(c.current_time(), 0.0);
    }
}

#[test]
fn time_update_from_previous_track_does_not_leak_into_new_load() {
    let mut c = playing_controller();
    c.device_mut().emit(MediaEvent::TimeUpdate(150.0));

    c.load(&track("b", Some("/music/b.mp3")));
    c.tick();

    assert_eq!(c.current_time(), 0.0);
    assert!(!c.is_playing());
}

#[test]
fn ended_from_previous_track_does_not_cancel_new_play() {
    let mut c = playing_controller();
    c.device_mut().emit(MediaEvent::Ended);

    c.load(&track("b", Some("/music/b.mp3")));
    c.play();
    let token = c.device().last_play().unwrap();
    c.device_mut().emit(MediaEvent::PlayResolved {
        token,
        result: Ok(()),
    });
    c.tick();

    assert!(c.is_playing());
    assert!(!c.is_play_pending());
}

#[test]
fn events_for_the_current_load_still_apply_after_a_switch() {
    let mut c = playing_controller();
    c.load(&track("b", Some("/music/b.mp3")));
    c.device_mut().emit(MediaEvent::MetadataReady(90.0));
    c.device_mut().emit(MediaEvent::TimeUpdate(12.0));
    c.tick();

    assert_eq!(c.duration(), 90.0);
    assert_eq!(c.current_time(), 12.0);
}

//! Demo catalog used when neither a catalog file nor a music directory is given.

use super::model::{Playlist, Track};

struct Seed {
    id: &'static str,
    title: &'static str,
    artist: &'static str,
    album: &'static str,
    cover: &'static str,
    duration: u32,
    song: u8,
}

const SEEDS: [Seed; 6] = [
    Seed {
        id: "1",
        title: "Ночной город",
        artist: "Артем Волков",
        album: "Городские огни",
        cover: "https://images.unsplash.com/photo-1470225620780-dba8ba36b745?w=300&h=300&fit=crop",
        duration: 234,
        song: 1,
    },
    Seed {
        id: "2",
        title: "Летний дождь",
        artist: "Мария Светлова",
        album: "Времена года",
        cover: "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=300&h=300&fit=crop",
        duration: 198,
        song: 2,
    },
    Seed {
        id: "3",
        title: "Космический рейс",
        artist: "DJ Nebula",
        album: "Space Journey",
        cover: "https://images.unsplash.com/photo-1514320291840-2e0a9bf2a9ae?w=300&h=300&fit=crop",
        duration: 312,
        song: 3,
    },
    Seed {
        id: "4",
        title: "Рассвет над морем",
        artist: "Анна Морская",
        album: "Берег мечты",
        cover: "https://images.unsplash.com/photo-1459749411175-04bf5292ceea?w=300&h=300&fit=crop",
        duration: 267,
        song: 4,
    },
    Seed {
        id: "5",
        title: "Танцы до утра",
        artist: "Beat Masters",
        album: "Club Hits 2024",
        cover: "https://images.unsplash.com/photo-1571330735066-03aaa9429d89?w=300&h=300&fit=crop",
        duration: 189,
        song: 5,
    },
    Seed {
        id: "6",
        title: "Тишина",
        artist: "Павел Тихонов",
        album: "Акустика",
        cover: "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=300&h=300&fit=crop",
        duration: 245,
        song: 6,
    },
];

pub(super) fn tracks() -> Vec<Track> {
    SEEDS
        .iter()
        .map(|s| Track {
            id: s.id.to_string(),
            title: s.title.to_string(),
            artist: s.artist.to_string(),
            album: s.album.to_string(),
            cover: s.cover.to_string(),
            duration: s.duration,
            audio_url: Some(format!(
                "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-{}.mp3",
                s.song
            )),
            lyrics: Vec::new(),
        })
        .collect()
}

pub(super) fn playlists(tracks: &[Track]) -> Vec<Playlist> {
    let cover = |i: usize| tracks.get(i).map(|t| t.cover.clone()).unwrap_or_default();
    vec![
        Playlist {
            id: "1".into(),
            name: "Любимые треки".into(),
            track_count: 12,
            cover: cover(0),
        },
        Playlist {
            id: "2".into(),
            name: "Для работы".into(),
            track_count: 24,
            cover: cover(1),
        },
        Playlist {
            id: "3".into(),
            name: "Вечерняя музыка".into(),
            track_count: 18,
            cover: cover(2),
        },
    ]
}

pub(super) fn favorites() -> Vec<String> {
    vec!["1".into(), "3".into()]
}

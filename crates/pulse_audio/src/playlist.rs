//! Shuffled round-robin playlist

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A pool of track names played round-robin with wraparound
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    tracks: Vec<String>,
    cursor: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<String>) -> Self {
        Self { tracks, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current cursor position (index of the next track handed out)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Shuffle the pool and rewind the cursor
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.tracks.shuffle(rng);
        self.cursor = 0;
    }

    /// Hand out the next track and advance, wrapping at the pool length
    pub fn next(&mut self) -> Option<&str> {
        if self.tracks.is_empty() {
            return None;
        }
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.tracks.len();
        Some(&self.tracks[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn playlist() -> Playlist {
        Playlist::new(vec!["a".into(), "b".into(), "c".into()])
    }

    #[test]
    fn test_round_robin_wraps() {
        let mut p = playlist();
        let got: Vec<String> = (0..4).map(|_| p.next().unwrap().to_string()).collect();
        assert_eq!(got, ["a", "b", "c", "a"]);
    }

    #[test]
    fn test_empty_playlist() {
        let mut p = Playlist::default();
        assert!(p.next().is_none());
    }

    #[test]
    fn test_shuffle_keeps_all_tracks() {
        let mut p = playlist();
        p.shuffle(&mut StdRng::seed_from_u64(3));
        let mut got: Vec<String> = (0..3).map(|_| p.next().unwrap().to_string()).collect();
        got.sort();
        assert_eq!(got, ["a", "b", "c"]);
    }
}

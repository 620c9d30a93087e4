//! Sound cues for the arcade variant
//!
//! The terminal has no mixer, so one-shot cues ring the bell and background
//! music is tracked as a flag that the header displays.

use std::io::Write;
use tracing::{debug, warn};

use crate::assets::SoundLevels;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    GameOver,
}

pub trait AudioSink {
    /// Start the looping background track
    fn start_music(&mut self);
    fn halt_music(&mut self);
    fn is_music_playing(&self) -> bool;
    fn play(&mut self, cue: SoundCue);
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn start_music(&mut self) {
        (**self).start_music()
    }

    fn halt_music(&mut self) {
        (**self).halt_music()
    }

    fn is_music_playing(&self) -> bool {
        (**self).is_music_playing()
    }

    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue)
    }
}

/// Rings BEL on `W` for every cue whose level is non-zero
pub struct BellAudio<W: Write> {
    out: W,
    levels: SoundLevels,
    music_playing: bool,
}

impl BellAudio<std::io::Stderr> {
    pub fn stderr(levels: SoundLevels) -> Self {
        Self::new(std::io::stderr(), levels)
    }
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W, levels: SoundLevels) -> Self {
        Self {
            out,
            levels,
            music_playing: false,
        }
    }

    fn level(&self, cue: SoundCue) -> u8 {
        match cue {
            SoundCue::Eat => self.levels.eat,
            SoundCue::GameOver => self.levels.game_over,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn start_music(&mut self) {
        if self.levels.music == 0 {
            return;
        }
        debug!(level = self.levels.music, "music started");
        self.music_playing = true;
    }

    fn halt_music(&mut self) {
        if self.music_playing {
            debug!("music halted");
        }
        self.music_playing = false;
    }

    fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    fn play(&mut self, cue: SoundCue) {
        let level = self.level(cue);
        if level == 0 {
            return;
        }
        debug!(?cue, level, "sound cue");
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            warn!(?err, "failed to ring terminal bell");
        }
    }
}

/// Plays nothing; used by the classic variant and `--mute`
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn start_music(&mut self) {}

    fn halt_music(&mut self) {}

    fn is_music_playing(&self) -> bool {
        false
    }

    fn play(&mut self, _cue: SoundCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: SoundLevels = SoundLevels {
        eat: 80,
        game_over: 0,
        music: 30,
    };

    #[test]
    fn test_bell_rings_for_audible_cue() {
        let mut audio = BellAudio::new(Vec::new(), LEVELS);
        audio.play(SoundCue::Eat);
        audio.play(SoundCue::Eat);
        assert_eq!(audio.into_inner(), b"\x07\x07");
    }

    #[test]
    fn test_muted_cue_is_silent() {
        let mut audio = BellAudio::new(Vec::new(), LEVELS);
        audio.play(SoundCue::GameOver);
        assert!(audio.into_inner().is_empty());
    }

    #[test]
    fn test_music_flag() {
        let mut audio = BellAudio::new(Vec::new(), LEVELS);
        assert!(!audio.is_music_playing());

        audio.start_music();
        assert!(audio.is_music_playing());

        audio.halt_music();
        assert!(!audio.is_music_playing());
    }

    #[test]
    fn test_zero_music_level_never_plays() {
        let levels = SoundLevels { music: 0, ..LEVELS };
        let mut audio = BellAudio::new(Vec::new(), levels);
        audio.start_music();
        assert!(!audio.is_music_playing());
    }

    #[test]
    fn test_silent_audio() {
        let mut audio = SilentAudio;
        audio.start_music();
        audio.play(SoundCue::Eat);
        assert!(!audio.is_music_playing());
    }
}

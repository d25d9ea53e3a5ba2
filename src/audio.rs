use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Click,
    Correct,
    Wrong,
    Win,
    Lose,
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Rings the terminal bell for cues worth interrupting the player for.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn rings_for(sound: Sound) -> bool {
        matches!(sound, Sound::Wrong | Sound::Win | Sound::Lose)
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: Sound) {
        if !Self::rings_for(sound) {
            return;
        }
        if let Err(e) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
            log::debug!("Bell failed for {sound:?}: {e}");
        }
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_rings_only_for_wrong_win_lose() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(Sound::Click);
        bell.play(Sound::Correct);
        assert!(bell.out.is_empty());

        bell.play(Sound::Wrong);
        bell.play(Sound::Win);
        bell.play(Sound::Lose);
        assert_eq!(bell.out, b"\x07\x07\x07");
    }
}

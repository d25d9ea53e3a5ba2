use crate::selector::Selection;

pub const MAX_TRIES: usize = 6;
pub const PLACEHOLDER: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
    /// Letter was already guessed; nothing changed.
    Repeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

/// One round: from word selection to win or loss.
#[derive(Clone, Debug)]
pub struct RoundState {
    answer: String,
    hint: String,
    category: String,
    guessed_letters: Vec<char>,
    incorrect_count: usize,
}

impl RoundState {
    #[must_use]
    pub fn new(selection: &Selection) -> Self {
        Self {
            answer: selection.answer().to_lowercase(),
            hint: selection.hint().to_string(),
            category: selection.category().to_string(),
            guessed_letters: Vec::new(),
            incorrect_count: 0,
        }
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let letter = letter.to_lowercase().next().unwrap_or(letter);
        if self.guessed_letters.contains(&letter) {
            return GuessOutcome::Repeated;
        }
        self.guessed_letters.push(letter);
        if self.answer.contains(letter) {
            GuessOutcome::Correct
        } else {
            self.incorrect_count += 1;
            GuessOutcome::Wrong
        }
    }

    /// Answer with unguessed letters masked, e.g. `c _ t`.
    #[must_use]
    pub fn display_word(&self) -> String {
        self.answer
            .chars()
            .map(|c| {
                if !c.is_alphabetic() || self.guessed_letters.contains(&c) {
                    c.to_string()
                } else {
                    PLACEHOLDER.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        !self.display_word().contains(PLACEHOLDER)
    }

    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.incorrect_count >= MAX_TRIES
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        if self.has_won() {
            RoundStatus::Won
        } else if self.has_lost() {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Guessed letters in the order they were entered.
    #[must_use]
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    #[must_use]
    pub fn remaining_tries(&self) -> usize {
        MAX_TRIES.saturating_sub(self.incorrect_count)
    }

    #[must_use]
    pub fn correct_letters(&self) -> Vec<char> {
        self.guessed_letters
            .iter()
            .copied()
            .filter(|c| self.answer.contains(*c))
            .collect()
    }

    #[must_use]
    pub fn incorrect_letters(&self) -> Vec<char> {
        self.guessed_letters
            .iter()
            .copied()
            .filter(|c| !self.answer.contains(*c))
            .collect()
    }
}

//! Screen flow for the game: menu, category, difficulty and the round itself.
//!
//! # State Machine
//! - `Menu` → `Categories` → `Difficulty` → `Game`, each step driven by a [`NavAction`]
//! - `Back` walks the chain in reverse and is ignored on `Menu`
//! - `Restart` replaces the round while staying on `Game`
//!
//! Navigation never touches rendering: frontends translate clicks and keys
//! into actions, call [`ScreenFlowController::update`] once per frame and
//! drain queued sounds with [`ScreenFlowController::take_sounds`].

use crate::audio::Sound;
use crate::error::SelectionError;
use crate::event_log::LogSink;
use crate::game_state::{GuessOutcome, RoundState, RoundStatus};
use crate::selector::{CategoryChoice, RandomCategoryStrategy, SelectorFactory};
use crate::wordbank::{Difficulty, WordCorpus};
use crate::{debug_log, info_log};
use log::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Categories,
    Difficulty,
    Game,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Start,
    ChooseCategory(CategoryChoice),
    ChooseDifficulty(Difficulty),
    Back,
    Restart,
    ToggleSound,
    Guess(char),
}

/// Result of dispatching one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Moved(Screen),
    Restarted,
    Guessed(GuessOutcome),
    SoundToggled(bool),
    /// The action has no meaning on the current screen.
    Ignored,
}

pub struct ScreenFlowController<'c, L: LogSink> {
    corpus: &'c WordCorpus,
    log: L,
    selector_factory: SelectorFactory,
    screen: Screen,
    selected_category: Option<CategoryChoice>,
    selected_difficulty: Option<Difficulty>,
    round: Option<RoundState>,
    /// Latch for the round-finished effect; reset whenever a round starts.
    game_over: bool,
    sound_enabled: bool,
    pending_sounds: Vec<Sound>,
    last_error: Option<SelectionError>,
}

impl<'c, L: LogSink> ScreenFlowController<'c, L> {
    pub fn new(corpus: &'c WordCorpus, log: L) -> Self {
        Self {
            corpus,
            log,
            selector_factory: RandomCategoryStrategy::boxed,
            screen: Screen::Menu,
            selected_category: None,
            selected_difficulty: None,
            round: None,
            game_over: false,
            sound_enabled: true,
            pending_sounds: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn with_selector_factory(mut self, factory: SelectorFactory) -> Self {
        self.selector_factory = factory;
        self
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<CategoryChoice> {
        self.selected_category
    }

    #[must_use]
    pub fn selected_difficulty(&self) -> Option<Difficulty> {
        self.selected_difficulty
    }

    /// The active round; only present on the game screen.
    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        if !enabled {
            self.pending_sounds.clear();
        }
    }

    /// Error from the last failed attempt to start a round, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&SelectionError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Sounds queued since the last call, in order.
    pub fn take_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.pending_sounds)
    }

    pub fn start(&mut self) -> Transition {
        // Start never builds a round, so it cannot fail.
        self.dispatch(NavAction::Start).unwrap_or(Transition::Ignored)
    }

    pub fn choose_category(&mut self, category: CategoryChoice) -> Transition {
        self.dispatch(NavAction::ChooseCategory(category))
            .unwrap_or(Transition::Ignored)
    }

    pub fn choose_difficulty(&mut self, difficulty: Difficulty) -> Result<Transition, SelectionError> {
        self.dispatch(NavAction::ChooseDifficulty(difficulty))
    }

    pub fn back(&mut self) -> Transition {
        self.dispatch(NavAction::Back).unwrap_or(Transition::Ignored)
    }

    pub fn restart(&mut self) -> Result<Transition, SelectionError> {
        self.dispatch(NavAction::Restart)
    }

    pub fn toggle_sound(&mut self) -> Transition {
        self.dispatch(NavAction::ToggleSound)
            .unwrap_or(Transition::Ignored)
    }

    pub fn guess(&mut self, letter: char) -> Transition {
        self.dispatch(NavAction::Guess(letter))
            .unwrap_or(Transition::Ignored)
    }

    /// Apply one action according to the transition table.
    pub fn dispatch(&mut self, action: NavAction) -> Result<Transition, SelectionError> {
        debug_log!("dispatch() - {:?} on {:?}", action, self.screen);
        let transition = match (self.screen, action) {
            (_, NavAction::ToggleSound) => {
                self.set_sound_enabled(!self.sound_enabled);
                Transition::SoundToggled(self.sound_enabled)
            }
            (Screen::Menu, NavAction::Start) => {
                self.queue_sound(Sound::Click);
                self.move_to(Screen::Categories)
            }
            (Screen::Categories, NavAction::ChooseCategory(category)) => {
                self.queue_sound(Sound::Click);
                self.selected_category = Some(category);
                self.move_to(Screen::Difficulty)
            }
            (Screen::Difficulty, NavAction::ChooseDifficulty(difficulty)) => {
                self.begin_round(self.selected_category, difficulty)?;
                self.queue_sound(Sound::Click);
                self.selected_difficulty = Some(difficulty);
                self.move_to(Screen::Game)
            }
            (Screen::Game, NavAction::Restart) => {
                let Some(difficulty) = self.selected_difficulty else {
                    return Ok(Transition::Ignored);
                };
                self.begin_round(self.selected_category, difficulty)?;
                self.queue_sound(Sound::Click);
                Transition::Restarted
            }
            (Screen::Game, NavAction::Guess(letter)) => self.apply_guess(letter),
            (Screen::Game, NavAction::Back) => {
                self.round = None;
                self.game_over = false;
                self.move_to(Screen::Difficulty)
            }
            (Screen::Difficulty, NavAction::Back) => self.move_to(Screen::Categories),
            (Screen::Categories, NavAction::Back) => self.move_to(Screen::Menu),
            _ => Transition::Ignored,
        };
        Ok(transition)
    }

    /// Fire the round-finished effect the first time the round is won or lost.
    ///
    /// Call once per frame. Returns the final status only on the call that fired.
    pub fn update(&mut self) -> Option<RoundStatus> {
        if self.screen != Screen::Game || self.game_over {
            return None;
        }
        let round = self.round.as_ref()?;
        let status = round.status();
        let (sound, message) = match status {
            RoundStatus::InProgress => return None,
            RoundStatus::Won => (Sound::Win, format!("Round won: Word={}", round.answer())),
            RoundStatus::Lost => (Sound::Lose, format!("Round lost: Word={}", round.answer())),
        };
        self.game_over = true;
        self.log.log(&message);
        self.queue_sound(sound);
        info_log!("update() - {}", message);
        Some(status)
    }

    fn move_to(&mut self, screen: Screen) -> Transition {
        self.screen = screen;
        Transition::Moved(screen)
    }

    fn queue_sound(&mut self, sound: Sound) {
        if self.sound_enabled {
            self.pending_sounds.push(sound);
        }
    }

    fn begin_round(
        &mut self,
        category: Option<CategoryChoice>,
        difficulty: Difficulty,
    ) -> Result<(), SelectionError> {
        let selector = (self.selector_factory)(category, Some(difficulty));
        let selection = match selector.select(self.corpus) {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Cannot start round ({category:?}, {difficulty}): {e}");
                self.last_error = Some(e.clone());
                return Err(e);
            }
        };

        let round = RoundState::new(&selection);
        self.log.log(&format!(
            "New game: Category={}, Word={}",
            round.category(),
            round.answer()
        ));
        self.round = Some(round);
        self.game_over = false;
        self.last_error = None;
        Ok(())
    }

    fn apply_guess(&mut self, letter: char) -> Transition {
        if self.game_over || !letter.is_alphabetic() {
            return Transition::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return Transition::Ignored;
        };
        if round.status() != RoundStatus::InProgress {
            return Transition::Ignored;
        }

        let letter = letter.to_lowercase().next().unwrap_or(letter);
        let outcome = round.guess(letter);
        match outcome {
            GuessOutcome::Correct => {
                self.log.log(&format!("Correct guess: {letter}"));
                self.queue_sound(Sound::Correct);
            }
            GuessOutcome::Wrong => {
                self.log.log(&format!("Wrong guess: {letter}"));
                self.queue_sound(Sound::Wrong);
            }
            GuessOutcome::Repeated => {}
        }
        Transition::Guessed(outcome)
    }
}

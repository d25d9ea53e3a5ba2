// Integration tests for the hangman application
// These tests verify that the corpus, selector, controller and frontends work together

use hangman::audio::{AudioSink, Sound};
use hangman::cli::run_plain;
use hangman::*;
use std::fs;
use std::io::Cursor;

const WORDS: &str = r#"{
    "animal": {"easy": ["cat"], "medium": ["donkey"], "hard": ["elephant"]},
    "fruit": {"easy": ["fig"], "medium": ["banana"], "hard": ["persimmon"]}
}"#;

const RIDDLES: &str = r#"{
    "easy": [["What has hands but cannot clap?", "clock"]],
    "medium": [["What runs but never walks?", "river"]],
    "hard": [["I speak without a mouth.", "echo"]]
}"#;

#[derive(Default)]
struct RecordingAudio {
    played: Vec<Sound>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.played.push(sound);
    }
}

#[test]
fn test_menu_to_word_game_scenario() {
    let corpus = load_embedded_corpus().unwrap();
    let mut controller = ScreenFlowController::new(&corpus, Vec::<String>::new());

    controller.start();
    controller.choose_category(CategoryChoice::Words);
    controller.choose_difficulty(Difficulty::Easy).unwrap();

    assert_eq!(controller.screen(), Screen::Game);
    let round = controller.round().expect("Expected an active round");
    assert_ne!(round.hint(), "riddle");
    assert!(corpus.category_names().any(|name| name == round.hint()));
}

#[test]
fn test_back_three_times_reaches_menu() {
    let corpus = load_embedded_corpus().unwrap();
    let mut controller = ScreenFlowController::new(&corpus, Vec::<String>::new());
    controller.start();
    controller.choose_category(CategoryChoice::Riddle);
    controller.choose_difficulty(Difficulty::Medium).unwrap();

    let mut screens = Vec::new();
    for _ in 0..3 {
        controller.back();
        screens.push(controller.screen());
    }
    assert_eq!(
        screens,
        vec![Screen::Difficulty, Screen::Categories, Screen::Menu]
    );
    assert_eq!(controller.back(), Transition::Ignored);
    assert_eq!(controller.screen(), Screen::Menu);
}

#[test]
fn test_selection_membership_over_many_trials() {
    let corpus = load_corpus_from_str(WORDS, RIDDLES).unwrap();
    for difficulty in Difficulty::ALL {
        let words = RandomCategoryStrategy::new(Some(CategoryChoice::Words), Some(difficulty));
        for _ in 0..1200 {
            let selection = words.select(&corpus).unwrap();
            let bucket = corpus.words(selection.category(), difficulty).unwrap();
            assert!(bucket.iter().any(|w| w == selection.answer()));
        }

        let riddles = RandomCategoryStrategy::new(Some(CategoryChoice::Riddle), Some(difficulty));
        for _ in 0..1200 {
            let selection = riddles.select(&corpus).unwrap();
            let bucket = corpus.riddles(difficulty).unwrap();
            assert!(
                bucket
                    .iter()
                    .any(|r| r.answer == selection.answer() && r.clue == selection.hint())
            );
        }
    }
}

#[test]
fn test_plain_riddle_game_won_and_logged() {
    let corpus = load_corpus_from_str(WORDS, RIDDLES).unwrap();
    let mut controller = ScreenFlowController::new(&corpus, Vec::<String>::new());
    let mut audio = RecordingAudio::default();
    let mut out = Vec::new();

    // Easy riddle answer is always "clock".
    let input = "start\nriddles\neasy\nc\nz\nl\nc\no\nk\nquit\n";
    run_plain(&mut controller, Cursor::new(input), &mut out, &mut audio).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Hint: What has hands but cannot clap?"));
    assert!(text.contains("Word: c _ _ c _"));
    assert!(text.contains("Incorrect guesses: z"));
    assert!(text.contains("You Won! Word: clock"));
    assert_eq!(text.matches("You Won!").count(), 1);

    assert_eq!(
        controller.log(),
        &vec![
            "New game: Category=riddle, Word=clock".to_string(),
            "Correct guess: c".to_string(),
            "Wrong guess: z".to_string(),
            "Correct guess: l".to_string(),
            "Correct guess: o".to_string(),
            "Correct guess: k".to_string(),
            "Round won: Word=clock".to_string(),
        ]
    );
    assert_eq!(audio.played.iter().filter(|s| **s == Sound::Win).count(), 1);
    assert_eq!(audio.played.iter().filter(|s| **s == Sound::Wrong).count(), 1);
}

#[test]
fn test_plain_game_lost_then_restarted() {
    let corpus = load_corpus_from_str(WORDS, RIDDLES).unwrap();
    let mut controller = ScreenFlowController::new(&corpus, Vec::<String>::new());
    let mut audio = RecordingAudio::default();
    let mut out = Vec::new();

    // Medium riddle answer is "river"; six misses lose, extra guesses are ignored.
    let input = "start\nr\nmedium\na\nb\nc\nd\nf\ng\nh\nrestart\nquit\n";
    run_plain(&mut controller, Cursor::new(input), &mut out, &mut audio).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("You Lost! Word: river"));
    assert!(text.contains("Attempts left: 0/6"));

    let log = controller.log();
    assert_eq!(log.iter().filter(|l| l.starts_with("Wrong guess")).count(), 6);
    assert!(!log.iter().any(|l| l == "Wrong guess: h"));
    assert_eq!(log.iter().filter(|l| l.starts_with("New game")).count(), 2);
    assert_eq!(audio.played.iter().filter(|s| **s == Sound::Lose).count(), 1);

    let round = controller.round().unwrap();
    assert_eq!(round.incorrect_count(), 0);
    assert!(!controller.is_game_over());
}

#[test]
fn test_plain_mute_silences_everything() {
    let corpus = load_corpus_from_str(WORDS, RIDDLES).unwrap();
    let mut controller = ScreenFlowController::new(&corpus, Vec::<String>::new());
    controller.set_sound_enabled(false);
    let mut audio = RecordingAudio::default();

    let input = "start\nwords\neasy\nz\nquit\n";
    run_plain(&mut controller, Cursor::new(input), Vec::<u8>::new(), &mut audio).unwrap();
    assert!(audio.played.is_empty());
}

#[test]
fn test_event_log_file_records_round() {
    let path = std::env::temp_dir().join("hangman_integration_game_log.txt");
    let _ = fs::remove_file(&path);
    let corpus = load_corpus_from_str(WORDS, RIDDLES).unwrap();

    {
        let mut event_log = EventLog::open(&path);
        let mut controller = ScreenFlowController::new(&corpus, &mut event_log);
        controller.start();
        controller.choose_category(CategoryChoice::Riddle);
        controller.choose_difficulty(Difficulty::Hard).unwrap();
        for letter in "echo".chars() {
            controller.guess(letter);
        }
        assert_eq!(controller.update(), Some(RoundStatus::Won));
    }

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].ends_with("] New game: Category=riddle, Word=echo"));
    assert!(lines[1].ends_with("] Correct guess: e"));
    assert!(lines[5].ends_with("] Round won: Word=echo"));

    let _ = fs::remove_file(&path);
}

#[test]
fn test_corpus_files_round_trip_into_game() {
    let dir = std::env::temp_dir();
    let words_path = dir.join("hangman_integration_words.json");
    let riddles_path = dir.join("hangman_integration_riddles.json");
    fs::write(&words_path, WORDS).unwrap();
    fs::write(&riddles_path, RIDDLES).unwrap();

    let corpus = load_corpus_from_files(&words_path, &riddles_path).unwrap();
    let mut controller = ScreenFlowController::new(&corpus, Vec::<String>::new());
    controller.start();
    controller.choose_category(CategoryChoice::Words);
    controller.choose_difficulty(Difficulty::Hard).unwrap();
    let answer = controller.round().unwrap().answer().to_string();
    assert!(answer == "elephant" || answer == "persimmon");

    let _ = fs::remove_file(&words_path);
    let _ = fs::remove_file(&riddles_path);
}

#[test]
fn test_malformed_corpus_is_fatal() {
    let words = r#"{"animal": {"easy": ["cat"], "medium": ["donkey"]}}"#;
    assert!(matches!(
        load_corpus_from_str(words, RIDDLES),
        Err(CorpusLoadError::MissingDifficulty { .. })
    ));
    assert!(load_corpus_from_str("not json", RIDDLES).is_err());
    assert!(load_corpus_from_str(WORDS, r#"{"easy": "clock"}"#).is_err());
}

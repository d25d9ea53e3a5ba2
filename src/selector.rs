use crate::error::SelectionError;
use crate::wordbank::{Difficulty, RIDDLE_CATEGORY, WordCorpus};
use rand::seq::IndexedRandom;
use std::fmt;

/// Choice offered on the categories screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryChoice {
    Riddle,
    Words,
}

impl CategoryChoice {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Riddle => RIDDLE_CATEGORY,
            Self::Words => "words",
        }
    }
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a selector hands to a new round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Riddle { clue: String, answer: String },
    Word { category: String, word: String },
}

impl Selection {
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Riddle { .. } => RIDDLE_CATEGORY,
            Self::Word { category, .. } => category,
        }
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        match self {
            Self::Riddle { answer, .. } => answer,
            Self::Word { word, .. } => word,
        }
    }

    /// The riddle's clue, or the category name for plain words.
    #[must_use]
    pub fn hint(&self) -> &str {
        match self {
            Self::Riddle { clue, .. } => clue,
            Self::Word { category, .. } => category,
        }
    }
}

/// Word selection policy. `select` is the whole contract, so new policies
/// slot in without touching the flow controller.
pub trait WordSelector {
    fn select(&self, corpus: &WordCorpus) -> Result<Selection, SelectionError>;
}

/// Builds a selector from the constraints remembered by the flow controller.
pub type SelectorFactory =
    fn(Option<CategoryChoice>, Option<Difficulty>) -> Box<dyn WordSelector>;

/// Uniform random choice; unset constraints are re-rolled on every call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomCategoryStrategy {
    category: Option<CategoryChoice>,
    difficulty: Option<Difficulty>,
}

impl RandomCategoryStrategy {
    #[must_use]
    pub fn new(category: Option<CategoryChoice>, difficulty: Option<Difficulty>) -> Self {
        Self {
            category,
            difficulty,
        }
    }

    #[must_use]
    pub fn boxed(
        category: Option<CategoryChoice>,
        difficulty: Option<Difficulty>,
    ) -> Box<dyn WordSelector> {
        Box::new(Self::new(category, difficulty))
    }

    fn resolve_difficulty<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Difficulty {
        self.difficulty
            .or_else(|| Difficulty::ALL.choose(rng).copied())
            .unwrap_or(Difficulty::Easy)
    }
}

impl WordSelector for RandomCategoryStrategy {
    fn select(&self, corpus: &WordCorpus) -> Result<Selection, SelectionError> {
        let mut rng = rand::rng();

        if self.category == Some(CategoryChoice::Riddle) {
            let difficulty = self.resolve_difficulty(&mut rng);
            let riddle = corpus
                .riddles(difficulty)
                .and_then(|riddles| riddles.choose(&mut rng))
                .ok_or_else(|| SelectionError::EmptyBucket {
                    category: RIDDLE_CATEGORY.to_string(),
                    difficulty,
                })?;
            return Ok(Selection::Riddle {
                clue: riddle.clue.clone(),
                answer: riddle.answer.clone(),
            });
        }

        let categories: Vec<&str> = corpus.category_names().collect();
        let category = *categories
            .choose(&mut rng)
            .ok_or(SelectionError::NoCategories)?;
        let difficulty = self.resolve_difficulty(&mut rng);
        let words = corpus
            .words(category, difficulty)
            .ok_or_else(|| SelectionError::UnknownCategory(category.to_string()))?;
        let word = words
            .choose(&mut rng)
            .ok_or_else(|| SelectionError::EmptyBucket {
                category: category.to_string(),
                difficulty,
            })?;
        Ok(Selection::Word {
            category: category.to_string(),
            word: word.to_lowercase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::{load_corpus_from_str, load_embedded_corpus};
    use std::collections::HashSet;

    const TRIALS: usize = 1500;

    #[test]
    fn test_riddle_selection_stays_in_bucket() {
        let corpus = load_embedded_corpus().unwrap();
        let strategy =
            RandomCategoryStrategy::new(Some(CategoryChoice::Riddle), Some(Difficulty::Medium));
        let bucket = corpus.riddles(Difficulty::Medium).unwrap();

        for _ in 0..TRIALS {
            match strategy.select(&corpus).unwrap() {
                Selection::Riddle { clue, answer } => {
                    assert!(bucket.iter().any(|r| r.clue == clue && r.answer == answer));
                }
                other => panic!("Expected a riddle, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_word_selection_stays_in_bucket() {
        let corpus = load_embedded_corpus().unwrap();
        let strategy =
            RandomCategoryStrategy::new(Some(CategoryChoice::Words), Some(Difficulty::Hard));
        let mut seen_categories = HashSet::new();

        for _ in 0..TRIALS {
            let selection = strategy.select(&corpus).unwrap();
            let Selection::Word { category, word } = &selection else {
                panic!("Expected a word, got {selection:?}");
            };
            assert_ne!(category, RIDDLE_CATEGORY);
            let bucket = corpus.words(category, Difficulty::Hard).unwrap();
            assert!(bucket.contains(word), "{word} not in {category}/hard");
            assert_eq!(selection.hint(), category);
            seen_categories.insert(category.clone());
        }
        // Four categories over 1500 uniform draws.
        assert_eq!(seen_categories.len(), 4);
    }

    #[test]
    fn test_unconfigured_strategy_picks_words() {
        let corpus = load_embedded_corpus().unwrap();
        let strategy = RandomCategoryStrategy::default();
        for _ in 0..200 {
            let selection = strategy.select(&corpus).unwrap();
            assert!(matches!(selection, Selection::Word { .. }));
        }
    }

    #[test]
    fn test_unset_difficulty_is_rerolled() {
        let words = r#"{"animal": {"easy": ["cat"], "medium": ["donkey"], "hard": ["elephant"]}}"#;
        let riddles = r#"{"easy": [["c", "a"]], "medium": [["c", "b"]], "hard": [["c", "d"]]}"#;
        let corpus = load_corpus_from_str(words, riddles).unwrap();
        let strategy = RandomCategoryStrategy::new(Some(CategoryChoice::Words), None);

        let seen: HashSet<String> = (0..300)
            .map(|_| strategy.select(&corpus).unwrap().answer().to_string())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_empty_bucket_reports_error() {
        let words = r#"{"animal": {"easy": [], "medium": ["donkey"], "hard": ["elephant"]}}"#;
        let riddles = r#"{"easy": [], "medium": [["c", "b"]], "hard": [["c", "d"]]}"#;
        let corpus = load_corpus_from_str(words, riddles).unwrap();

        let words_strategy =
            RandomCategoryStrategy::new(Some(CategoryChoice::Words), Some(Difficulty::Easy));
        assert_eq!(
            words_strategy.select(&corpus),
            Err(SelectionError::EmptyBucket {
                category: "animal".to_string(),
                difficulty: Difficulty::Easy,
            })
        );

        let riddle_strategy =
            RandomCategoryStrategy::new(Some(CategoryChoice::Riddle), Some(Difficulty::Easy));
        assert!(matches!(
            riddle_strategy.select(&corpus),
            Err(SelectionError::EmptyBucket { category, .. }) if category == RIDDLE_CATEGORY
        ));
    }

    #[test]
    fn test_selection_accessors() {
        let riddle = Selection::Riddle {
            clue: "What runs but never walks?".to_string(),
            answer: "river".to_string(),
        };
        assert_eq!(riddle.category(), "riddle");
        assert_eq!(riddle.answer(), "river");
        assert_eq!(riddle.hint(), "What runs but never walks?");

        let word = Selection::Word {
            category: "fruit".to_string(),
            word: "kiwi".to_string(),
        };
        assert_eq!(word.category(), "fruit");
        assert_eq!(word.hint(), "fruit");
    }
}

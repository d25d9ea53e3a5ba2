use crate::error::CorpusLoadError;
use log::{info, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const EMBEDDED_WORDS: &str = include_str!("resources/words.json");
pub const EMBEDDED_RIDDLES: &str = include_str!("resources/riddles.json");

/// Category name under which riddles live in the merged corpus.
pub const RIDDLE_CATEGORY: &str = "riddle";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CorpusLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(CorpusLoadError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Riddle {
    pub clue: String,
    pub answer: String,
}

/// The merged word + riddle dataset.
#[derive(Clone, Debug, Default)]
pub struct WordCorpus {
    categories: BTreeMap<String, BTreeMap<Difficulty, Vec<String>>>,
    riddles: BTreeMap<Difficulty, Vec<Riddle>>,
}

impl WordCorpus {
    /// Word categories in sorted order. Never includes the riddle category.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        category == RIDDLE_CATEGORY || self.categories.contains_key(category)
    }

    #[must_use]
    pub fn words(&self, category: &str, difficulty: Difficulty) -> Option<&[String]> {
        self.categories
            .get(category)
            .and_then(|buckets| buckets.get(&difficulty))
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn riddles(&self, difficulty: Difficulty) -> Option<&[Riddle]> {
        self.riddles.get(&difficulty).map(Vec::as_slice)
    }

    /// Total number of playable entries, riddles included.
    #[must_use]
    pub fn word_count(&self) -> usize {
        let words: usize = self
            .categories
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum();
        let riddles: usize = self.riddles.values().map(Vec::len).sum();
        words + riddles
    }
}

/// Words document: category -> difficulty -> words.
type RawWords = HashMap<String, HashMap<String, Vec<String>>>;

/// Riddles document: difficulty -> `[clue, answer]` pairs.
type RawRiddles = HashMap<String, Vec<RawRiddle>>;

#[derive(Deserialize)]
struct RawRiddle(String, String);

fn canonical(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Canonicalize an answer and reject ones with nothing to guess.
fn canonical_answer(
    category: &str,
    difficulty: Difficulty,
    entry: &str,
) -> Result<String, CorpusLoadError> {
    let answer = canonical(entry);
    if !answer.chars().any(char::is_alphabetic) {
        return Err(CorpusLoadError::InvalidEntry {
            category: category.to_string(),
            difficulty,
            entry: entry.to_string(),
        });
    }
    Ok(answer)
}

fn parse_buckets<T>(
    category: &str,
    raw: HashMap<String, Vec<T>>,
) -> Result<BTreeMap<Difficulty, Vec<T>>, CorpusLoadError> {
    let mut buckets = BTreeMap::new();
    for (key, entries) in raw {
        let difficulty: Difficulty = key.parse()?;
        if entries.is_empty() {
            warn!("Corpus bucket {category}/{difficulty} is empty");
        }
        if buckets.insert(difficulty, entries).is_some() {
            return Err(CorpusLoadError::DuplicateKey {
                category: category.to_string(),
                key,
            });
        }
    }
    for difficulty in Difficulty::ALL {
        if !buckets.contains_key(&difficulty) {
            return Err(CorpusLoadError::MissingDifficulty {
                category: category.to_string(),
                difficulty,
            });
        }
    }
    Ok(buckets)
}

/// Build a corpus from the two JSON documents.
///
/// `words_json` maps category -> difficulty -> list of words, and
/// `riddles_json` maps difficulty -> list of `[clue, answer]` pairs.
pub fn load_corpus_from_str(
    words_json: &str,
    riddles_json: &str,
) -> Result<WordCorpus, CorpusLoadError> {
    let raw_words: RawWords = serde_json::from_str(words_json).map_err(|source| {
        CorpusLoadError::Json {
            document: "words",
            source,
        }
    })?;
    let raw_riddles: RawRiddles = serde_json::from_str(riddles_json)
        .map_err(|source| CorpusLoadError::Json {
            document: "riddles",
            source,
        })?;

    if raw_words.is_empty() {
        return Err(CorpusLoadError::NoCategories);
    }

    let mut categories = BTreeMap::new();
    for (key, raw) in raw_words {
        let name = canonical(&key);
        if name == RIDDLE_CATEGORY {
            return Err(CorpusLoadError::ReservedCategory);
        }
        if categories.contains_key(&name) {
            return Err(CorpusLoadError::DuplicateKey {
                category: name,
                key,
            });
        }
        let mut buckets = parse_buckets(&name, raw)?;
        for (difficulty, words) in buckets.iter_mut() {
            for word in words.iter_mut() {
                *word = canonical_answer(&name, *difficulty, word)?;
            }
        }
        categories.insert(name, buckets);
    }

    let mut riddles = BTreeMap::new();
    for (difficulty, pairs) in parse_buckets(RIDDLE_CATEGORY, raw_riddles)? {
        let bucket = pairs
            .into_iter()
            .map(|RawRiddle(clue, answer)| {
                canonical_answer(RIDDLE_CATEGORY, difficulty, &answer).map(|answer| Riddle {
                    clue: clue.trim().to_string(),
                    answer,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        riddles.insert(difficulty, bucket);
    }

    let corpus = WordCorpus {
        categories,
        riddles,
    };
    info!(
        "Loaded corpus: {} categories, {} entries",
        corpus.categories.len(),
        corpus.word_count()
    );
    Ok(corpus)
}

pub fn load_corpus_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
    words_path: P,
    riddles_path: Q,
) -> Result<WordCorpus, CorpusLoadError> {
    let read = |path: &Path| {
        fs::read_to_string(path).map_err(|source| CorpusLoadError::Io {
            path: path.display().to_string(),
            source,
        })
    };
    let words = read(words_path.as_ref())?;
    let riddles = read(riddles_path.as_ref())?;
    load_corpus_from_str(&words, &riddles)
}

pub fn load_embedded_corpus() -> Result<WordCorpus, CorpusLoadError> {
    load_corpus_from_str(EMBEDDED_WORDS, EMBEDDED_RIDDLES)
}

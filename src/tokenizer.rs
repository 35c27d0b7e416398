use crate::error::NfResult;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Hand-curated Russian function words: prepositions, pronouns and their
/// oblique forms, plus a few frequent auxiliaries.
pub const BUILTIN_STOPWORDS: &[&str] = &[
    "в", "к", "с", "на", "о", "об", "обо", "во", "ко", "со", "по", "под", "за", "до", "над", "от",
    "ото", "пред", "при", "у", "вне", "из", "про", "для", "без", "он", "его", "него", "ему",
    "нему", "им", "ним", "она", "ее", "нее", "ей", "ней", "оно", "мне", "я", "моя", "мой", "меня",
    "мной", "моем", "моём", "мои", "моих", "моим", "они", "их", "них", "вы", "вам", "вас", "вами",
    "ваш", "ваша", "ваше", "вашего", "вашей", "ваши", "вашим", "вашему", "ты", "тебе", "тобой",
    "тебя", "твой", "твоя", "твои", "твоих", "твоим", "твоей", "твоего", "твоими", "себе", "себя",
    "собой", "свой", "своя", "свои", "своих", "своим", "своего", "своей", "мы", "нас", "наш",
    "наша", "наши", "нашего", "нашим", "наших", "нашу", "наше", "нашей", "нашему", "либо",
    "после", "сквозь", "вокруг", "были",
];

/// Union of every configured stopword source. Entries are stored case-folded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut set = Self::empty();
        set.extend(BUILTIN_STOPWORDS.iter().copied());
        set
    }

    /// Reads a one-word-per-line corpus (blank lines and `#` comments ignored).
    pub fn from_reader<R: Read>(reader: R) -> NfResult<Self> {
        let mut set = Self::empty();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            set.insert(word);
        }
        Ok(set)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> NfResult<Self> {
        let path = path.as_ref();
        let set = Self::from_reader(File::open(path)?)?;
        debug!("Loaded {} stopwords from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn extend<'a, I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        for w in words {
            self.insert(w);
        }
    }

    pub fn union(mut self, other: StopwordSet) -> Self {
        self.words.extend(other.words);
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: StopwordSet,
}

impl Tokenizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    /// Lower-cases `text`, splits it on Unicode word boundaries and keeps
    /// alphanumeric, non-numeric tokens that are not stopwords. Hyphenated
    /// words (`кто-то`) stay whole and so fail the alphanumeric check.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        hyphenated_words(&lower)
            .into_iter()
            .filter(|w| self.keep(w))
            .map(str::to_string)
            .collect()
    }

    fn keep(&self, word: &str) -> bool {
        !word.is_empty()
            && word.chars().all(char::is_alphanumeric)
            && !word.chars().all(char::is_numeric)
            && !self.stopwords.contains(word)
    }
}

/// Word segments of `text`, with `-`-joined runs kept as one slice.
fn hyphenated_words(text: &str) -> Vec<&str> {
    let segments: Vec<(usize, &str)> = text.split_word_bound_indices().collect();
    let is_word = |s: &str| s.chars().any(char::is_alphanumeric);

    let mut words = Vec::new();
    let mut i = 0;
    while i < segments.len() {
        let (start, seg) = segments[i];
        if !is_word(seg) {
            i += 1;
            continue;
        }
        let mut end = start + seg.len();
        while i + 2 < segments.len() && segments[i + 1].1 == "-" && is_word(segments[i + 2].1) {
            let (next, word) = segments[i + 2];
            end = next + word.len();
            i += 2;
        }
        words.push(&text[start..end]);
        i += 1;
    }
    words
}

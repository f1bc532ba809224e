use rand::seq::IndexedRandom;
use rand::Rng;

/// Number of hints every word carries
pub const HINTS_PER_WORD: usize = 4;

/// Wrong answers bots post when they miss
pub const DECOY_WORDS: [&str; 8] = [
    "HAUS", "AUTO", "BAUM", "WASSER", "FEUER", "KATZE", "HUND", "SONNE",
];

/// A word to guess and its clues, revealed in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub hints: [String; HINTS_PER_WORD],
}

impl WordEntry {
    pub fn new(word: &str, hints: [&str; HINTS_PER_WORD]) -> Self {
        Self {
            word: word.to_string(),
            hints: hints.map(str::to_string),
        }
    }

    /// Hint text for a 1-based hint number
    pub fn hint(&self, number: u32) -> Option<&str> {
        let index = (number as usize).checked_sub(1)?;
        self.hints.get(index).map(String::as_str)
    }

    pub fn hint_count(&self) -> u32 {
        self.hints.len() as u32
    }
}

#[derive(Debug, Clone)]
pub struct WordBank {
    entries: Vec<WordEntry>,
}

impl WordBank {
    /// Build a bank from custom entries; `None` if there are none
    pub fn new(entries: Vec<WordEntry>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        Some(Self { entries })
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &WordEntry {
        // non-empty by construction
        self.entries.choose(rng).unwrap_or(&self.entries[0])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self {
            entries: vec![
                WordEntry::new(
                    "ELEFANT",
                    [
                        "Das ist ein großes Säugetier",
                        "Es hat einen langen Rüssel",
                        "Man findet es in Afrika und Asien",
                        "Es vergisst nie etwas",
                    ],
                ),
                WordEntry::new(
                    "PIZZA",
                    [
                        "Das ist ein beliebtes Essen",
                        "Es ist rund und flach",
                        "Es hat Käse und Tomatensauce",
                        "Es wird oft nach Hause geliefert",
                    ],
                ),
                WordEntry::new(
                    "REGENBOGEN",
                    [
                        "Man kann es am Himmel sehen",
                        "Es erscheint nach dem Regen",
                        "Es hat mehrere Farben",
                        "Es bildet eine Bogenform",
                    ],
                ),
                WordEntry::new(
                    "GITARRE",
                    [
                        "Das ist ein Musikinstrument",
                        "Es hat Saiten",
                        "Man spielt es mit den Fingern",
                        "Es ist beliebt in der Rockmusik",
                    ],
                ),
                WordEntry::new(
                    "OZEAN",
                    [
                        "Das ist eine große Wassermasse",
                        "Es bedeckt den größten Teil der Erde",
                        "Es ist die Heimat von Walen und Delfinen",
                        "Es hat Wellen und Gezeiten",
                    ],
                ),
            ],
        }
    }
}

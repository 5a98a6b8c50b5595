//! Option alphabets and numerals for the two supported scripts

use crate::types::MAX_OPTIONS;

const LATIN_LETTERS: [&str; MAX_OPTIONS] = ["A", "B", "C", "D", "E", "F"];
const BENGALI_LETTERS: [&str; MAX_OPTIONS] = ["ক", "খ", "গ", "ঘ", "ঙ", "চ"];
const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Script {
    #[default]
    Latin,
    Bengali,
}

impl Script {
    pub fn from_bangla_flag(use_bangla: bool) -> Self {
        if use_bangla {
            Script::Bengali
        } else {
            Script::Latin
        }
    }

    /// The first `count` option letters, capped at the alphabet length
    pub fn option_letters(self, count: usize) -> &'static [&'static str] {
        let alphabet: &'static [&'static str] = match self {
            Script::Latin => &LATIN_LETTERS,
            Script::Bengali => &BENGALI_LETTERS,
        };
        &alphabet[..count.min(alphabet.len())]
    }

    /// Render a number in this script's digits
    pub fn numeral(self, value: usize) -> String {
        let arabic = value.to_string();
        match self {
            Script::Latin => arabic,
            Script::Bengali => arabic
                .chars()
                .map(|d| match d.to_digit(10) {
                    Some(n) => BENGALI_DIGITS[n as usize],
                    None => d,
                })
                .collect(),
        }
    }

    /// Question label as printed beside the bubbles, e.g. "12."
    pub fn question_label(self, number: usize) -> String {
        format!("{}.", self.numeral(number))
    }
}

/// True when the text carries any character from the Bengali block
pub fn contains_bengali(text: &str) -> bool {
    text.chars().any(|c| ('\u{0980}'..='\u{09FF}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bengali_numeral_multi_digit() {
        assert_eq!(Script::Bengali.numeral(105), "১০৫");
        assert_eq!(Script::Latin.numeral(105), "105");
    }

    #[test]
    fn test_question_label() {
        assert_eq!(Script::Latin.question_label(7), "7.");
        assert_eq!(Script::Bengali.question_label(40), "৪০.");
    }

    #[test]
    fn test_contains_bengali() {
        assert!(contains_bengali("সবুজ মডেল স্কুল"));
        assert!(!contains_bengali("Green Model School"));
    }
}

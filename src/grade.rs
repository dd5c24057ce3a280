//! Letter-by-letter feedback and the rule that produces it.

use std::{
    convert::TryFrom,
    fmt::{Debug, Display},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ValidationError, Word, WORD_LEN};

/// A Wordle "grade" that indicates the correctness of a letter in a guess.
///
/// `Correct` means that the letter is in the correct position. `Present`
/// means that the letter is in the word, but not in that position. `Absent`
/// means that the answer has no more copies of the letter to hand out.
///
/// The discriminants match the numeric marks adapters pass in: 0 for absent,
/// 1 for present and 2 for correct.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
pub enum Grade {
    /// The letter is not in the answer (or all copies are accounted for).
    Absent = 0,

    /// The letter is in the answer, but not there.
    Present = 1,

    /// The letter is in the correct position.
    Correct = 2,
}

impl Grade {
    /// Parses a tile character: `0`, `b`, `x` or `.` for absent, `1` or `y`
    /// for present and `2` or `g` for correct.
    pub fn from_char(c: char) -> Result<Self, ValidationError> {
        match c.to_ascii_lowercase() {
            '0' | 'b' | 'x' | '.' => Ok(Grade::Absent),
            '1' | 'y' => Ok(Grade::Present),
            '2' | 'g' => Ok(Grade::Correct),
            other => Err(ValidationError::InvalidMarkChar(other)),
        }
    }

    /// Returns the digit used when printing grades.
    pub fn to_char(self) -> char {
        match self {
            Grade::Absent => '0',
            Grade::Present => '1',
            Grade::Correct => '2',
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = ValidationError;

    fn try_from(mark: u8) -> Result<Self, Self::Error> {
        match mark {
            0 => Ok(Grade::Absent),
            1 => Ok(Grade::Present),
            2 => Ok(Grade::Correct),
            n => Err(ValidationError::InvalidMark(n)),
        }
    }
}

/// A full row of grades packed into a single base-3 number.
///
/// Position `i` contributes `grade * 3^i`, so every one of the 243 possible
/// rows maps to a distinct value below [`Pattern::COUNT`]. This is the
/// outcome key the ranker counts with, so computing it never allocates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern(u8);

impl Pattern {
    /// The number of distinct patterns (3^5).
    pub const COUNT: usize = 243;

    /// The pattern of a correct guess.
    pub const ALL_CORRECT: Pattern = Pattern(242);

    /// Grades `guess` against `answer`.
    ///
    /// Letters in the right spot are marked first, and each consumes one copy
    /// of its letter from the answer. The remaining positions are then marked
    /// from left to right, each taking a copy if one is left. A guess with
    /// more copies of a letter than the answer therefore only gets as many
    /// [`Grade::Correct`] and [`Grade::Present`] marks as the answer has,
    /// and earlier positions win.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wordle_assist::{Grade::*, Pattern, Word};
    ///
    /// let sassy: Word = "sassy".parse()?;
    /// let silly: Word = "silly".parse()?;
    ///
    /// let pattern = Pattern::compute(&sassy, &silly);
    /// assert_eq!(pattern.grades(), [Correct, Absent, Absent, Absent, Correct]);
    /// #
    /// # Ok::<_, wordle_assist::ValidationError>(())
    /// ```
    #[inline]
    pub fn compute(guess: &Word, answer: &Word) -> Self {
        let mut budget = [0_u8; 26];
        for i in 0..WORD_LEN {
            budget[answer.slot(i)] += 1;
        }

        let mut digits = [0_u8; WORD_LEN];
        for i in 0..WORD_LEN {
            if guess.letters()[i] == answer.letters()[i] {
                digits[i] = Grade::Correct as u8;
                budget[guess.slot(i)] -= 1;
            }
        }

        for i in 0..WORD_LEN {
            if digits[i] == Grade::Correct as u8 {
                continue;
            }
            let left = &mut budget[guess.slot(i)];
            if *left > 0 {
                digits[i] = Grade::Present as u8;
                *left -= 1;
            }
        }

        Self::pack(digits)
    }

    #[inline]
    fn pack(digits: [u8; WORD_LEN]) -> Self {
        Pattern(digits.iter().rev().fold(0, |acc, &d| acc * 3 + d))
    }

    /// Packs a row of grades.
    pub fn from_grades(grades: [Grade; WORD_LEN]) -> Self {
        let mut digits = [0_u8; WORD_LEN];
        for (d, g) in digits.iter_mut().zip(grades) {
            *d = g as u8;
        }
        Self::pack(digits)
    }

    /// Unpacks the row of grades.
    pub fn grades(self) -> [Grade; WORD_LEN] {
        let mut rest = self.0;
        let mut grades = [Grade::Absent; WORD_LEN];
        for grade in grades.iter_mut() {
            *grade = match rest % 3 {
                0 => Grade::Absent,
                1 => Grade::Present,
                _ => Grade::Correct,
            };
            rest /= 3;
        }
        grades
    }

    /// The index of this pattern in a table of [`Pattern::COUNT`] slots.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_win(self) -> bool {
        self == Self::ALL_CORRECT
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for grade in self.grades() {
            write!(f, "{}", grade.to_char())?;
        }
        Ok(())
    }
}

impl Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pattern({})", self)
    }
}

/// A guessed word and the grade each of its letters received.
///
/// The grades are either supplied from outside (tiles read off a board) or
/// derived with [`GuessResult::derive()`] against a hypothetical answer.
///
/// # Examples
///
/// ```rust
/// use wordle_assist::{GuessResult, Word};
///
/// let crane: Word = "crane".parse()?;
/// let trace: Word = "trace".parse()?;
///
/// let result = GuessResult::derive(crane, &trace);
/// assert_eq!(result.to_string(), "crane:12202");
/// assert!(result.matches(&trace));
/// assert!(!result.matches(&crane));
///
/// let parsed: GuessResult = "crane:12202".parse()?;
/// assert_eq!(parsed, result);
/// #
/// # Ok::<_, wordle_assist::ValidationError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct GuessResult {
    word: Word,
    grades: [Grade; WORD_LEN],
}

impl GuessResult {
    /// Pairs a word with numeric marks (0 absent, 1 present, 2 correct).
    ///
    /// Fails if the word is malformed, if the number of marks differs from
    /// the number of letters, or if a mark is out of range.
    pub fn new(word: &str, marks: &[u8]) -> Result<Self, ValidationError> {
        let parsed: Word = word.parse()?;
        if marks.len() != WORD_LEN {
            return Err(ValidationError::LengthMismatch {
                word: parsed.to_string(),
                marks: marks.len(),
            });
        }

        let mut grades = [Grade::Absent; WORD_LEN];
        for (grade, &mark) in grades.iter_mut().zip(marks) {
            *grade = Grade::try_from(mark)?;
        }

        Ok(Self::from_grades(parsed, grades))
    }

    pub fn from_grades(word: Word, grades: [Grade; WORD_LEN]) -> Self {
        GuessResult { word, grades }
    }

    /// Grades `guess` as if `answer` were the solution.
    pub fn derive(guess: Word, answer: &Word) -> Self {
        Self::from_grades(guess, Pattern::compute(&guess, answer).grades())
    }

    pub fn word(&self) -> Word {
        self.word
    }

    pub fn grades(&self) -> &[Grade; WORD_LEN] {
        &self.grades
    }

    pub fn pattern(&self) -> Pattern {
        Pattern::from_grades(self.grades)
    }

    /// Returns true if `answer` would have produced exactly these grades.
    pub fn matches(&self, answer: &Word) -> bool {
        Pattern::compute(&self.word, answer) == self.pattern()
    }
}

impl Display for GuessResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.word, self.pattern())
    }
}

impl FromStr for GuessResult {
    type Err = ValidationError;

    /// Parses `word:marks`, where marks are tile characters as accepted by
    /// [`Grade::from_char()`], for example `crane:00210` or `crane:bbgyb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, marks) = s
            .split_once(|c: char| c == ':' || c == '=' || c.is_whitespace())
            .unwrap_or((s, ""));
        let word: Word = word.parse()?;
        let marks = marks
            .trim()
            .chars()
            .map(|c| Grade::from_char(c).map(|g| g as u8))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&word, &marks)
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn str_to_grades(input: &str) -> [Grade; WORD_LEN] {
        let mut res = [Grade::Absent; WORD_LEN];
        for (i, c) in input.chars().enumerate() {
            res[i] = Grade::from_char(c).unwrap();
        }
        res
    }

    macro_rules! grade_test {
        ($fn_name:ident [$( $answer:expr => { $( [$guess:expr, $res:expr] );* } );*]) => {
            #[test]
            fn $fn_name() {
                $($(
                    let pattern = Pattern::compute(&word($guess), &word($answer));
                    assert_eq!(
                        pattern.grades(),
                        str_to_grades($res),
                        "{} against {}",
                        $guess,
                        $answer
                    );
                    assert_eq!(pattern.is_win(), $guess == $answer);
                )*)*
            }
        };
    }

    grade_test! { duplicate_guess_letters [
        "silly" => { ["sassy", "20002"] };
        "sober" => { ["spool", "20100"]; ["soaks", "22000"] };
        "tills" => { ["pines", "02002"]; ["sills", "02222"] }
    ] }

    grade_test! { duplicate_answer_letters [
        "spoon" => { ["odors", "10201"] };
        "earth" => { ["ratio", "12100"] }
    ] }

    grade_test! { earlier_positions_win [
        "abbey" => { ["babes", "11220"]; ["kebab", "01211"] };
        "crimp" => { ["props", "12000"]; ["error", "02000"]; ["trier", "02200"] }
    ] }

    grade_test! { exact_and_disjoint [
        "crane" => { ["crane", "22222"]; ["built", "00000"] };
        "trace" => { ["crane", "12202"] }
    ] }

    #[test]
    fn packs_grades_in_base_three() {
        let grades = [
            Grade::Correct,
            Grade::Absent,
            Grade::Present,
            Grade::Absent,
            Grade::Correct,
        ];
        let pattern = Pattern::from_grades(grades);
        assert_eq!(pattern.index(), 2 + 9 + 2 * 81);
        assert_eq!(pattern.grades(), grades);
        assert_eq!(Pattern::from_grades([Grade::Correct; WORD_LEN]), Pattern::ALL_CORRECT);
        assert_eq!(Pattern::from_grades([Grade::Absent; WORD_LEN]).index(), 0);
    }

    #[test]
    fn new_validates_marks() {
        assert!(GuessResult::new("crane", &[0, 0, 2, 1, 0]).is_ok());
        assert_eq!(
            GuessResult::new("crane", &[0, 0, 2, 1]),
            Err(ValidationError::LengthMismatch {
                word: "crane".to_string(),
                marks: 4
            })
        );
        assert_eq!(
            GuessResult::new("crane", &[0, 0, 2, 1, 3]),
            Err(ValidationError::InvalidMark(3))
        );
        assert_eq!(
            GuessResult::new("cran", &[0, 0, 2, 1]),
            Err(ValidationError::InvalidWord("cran".to_string()))
        );
    }

    #[test]
    fn parses_tile_strings() {
        let digits: GuessResult = "crane:00210".parse().unwrap();
        let letters: GuessResult = "CRANE bbgyx".parse().unwrap();
        assert_eq!(digits, letters);
        assert_eq!(digits.grades(), &str_to_grades("00210"));

        assert_eq!(
            "crane:00z10".parse::<GuessResult>(),
            Err(ValidationError::InvalidMarkChar('z'))
        );
        assert!("crane:0021".parse::<GuessResult>().is_err());
    }

    #[test]
    fn missing_marks_are_a_length_mismatch() {
        assert_eq!(
            "crane".parse::<GuessResult>(),
            Err(ValidationError::LengthMismatch {
                word: "crane".to_string(),
                marks: 0
            })
        );
        assert_eq!(
            " Crane: ".parse::<GuessResult>(),
            Err(ValidationError::LengthMismatch {
                word: "crane".to_string(),
                marks: 0
            })
        );
        assert_eq!(
            "cranes".parse::<GuessResult>(),
            Err(ValidationError::InvalidWord("cranes".to_string()))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_words() {
        let result: GuessResult = "crane:00210".parse().unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"word":"crane","grades":["absent","absent","correct","present","absent"]}"#
        );
        let back: GuessResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert!(serde_json::from_str::<Word>(r#""cranes""#).is_err());
    }

    proptest! {
        #[test]
        fn derived_feedback_matches_its_answer(guess in "[a-f]{5}", answer in "[a-f]{5}") {
            let guess = word(&guess);
            let answer = word(&answer);
            let result = GuessResult::derive(guess, &answer);
            prop_assert!(result.matches(&answer));
            prop_assert_eq!(result.pattern().is_win(), guess == answer);
        }

        #[test]
        fn marks_never_exceed_answer_copies(guess in "[a-c]{5}", answer in "[a-c]{5}") {
            let guess = word(&guess);
            let answer = word(&answer);
            let grades = Pattern::compute(&guess, &answer).grades();
            for letter in b'a'..=b'c' {
                let hits = guess
                    .letters()
                    .iter()
                    .zip(grades.iter())
                    .filter(|&(&l, &g)| l == letter && g != Grade::Absent)
                    .count();
                let copies = answer.letters().iter().filter(|&&l| l == letter).count();
                prop_assert!(hits <= copies);
            }
        }
    }
}

//! Consonant/vowel shape of a stem.
//!
//! Every letter maps to `c` or `v`. `a e i o u` are vowels, `y` is a vowel
//! when the letter before it is a consonant and a consonant otherwise, every
//! other character is a consonant.

use std::fmt;

/// Shape signature of a stem together with the stem's characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StemShape {
    chars: Vec<char>,
    vowels: Vec<bool>,
}

impl StemShape {
    /// Compute the shape of a stem.
    pub fn new(stem: &str) -> Self {
        let chars: Vec<char> = stem.chars().map(|c| c.to_ascii_lowercase()).collect();
        let mut vowels: Vec<bool> = Vec::with_capacity(chars.len());

        for (i, &c) in chars.iter().enumerate() {
            let vowel = match c {
                'a' | 'e' | 'i' | 'o' | 'u' => true,
                'y' => i > 0 && !vowels[i - 1],
                _ => false,
            };
            vowels.push(vowel);
        }

        StemShape { chars, vowels }
    }

    /// Number of characters in the stem.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the stem is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The Porter measure `m`: number of `vc` pairs in the signature.
    pub fn measure(&self) -> usize {
        self.vowels
            .windows(2)
            .filter(|pair| pair[0] && !pair[1])
            .count()
    }

    /// `*v*`: the signature contains a vowel.
    pub fn has_vowel(&self) -> bool {
        self.vowels.iter().any(|&vowel| vowel)
    }

    /// `*d`: ends in a consonant whose last two characters are identical.
    pub fn ends_double_consonant(&self) -> bool {
        let n = self.len();
        n >= 2 && !self.vowels[n - 1] && self.chars[n - 1] == self.chars[n - 2]
    }

    /// `*o`: ends in `cvc` where the last character is not `w`, `x` or `y`.
    pub fn ends_cvc(&self) -> bool {
        let n = self.len();
        n >= 3
            && !self.vowels[n - 3]
            && self.vowels[n - 2]
            && !self.vowels[n - 1]
            && !matches!(self.chars[n - 1], 'w' | 'x' | 'y')
    }

    /// `*X`: the stem ends with the given letter (case-insensitive).
    pub fn ends_with(&self, letter: char) -> bool {
        self.chars
            .last()
            .is_some_and(|&last| last == letter.to_ascii_lowercase())
    }
}

impl fmt::Display for StemShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &vowel in &self.vowels {
            write!(f, "{}", if vowel { 'v' } else { 'c' })?;
        }
        Ok(())
    }
}

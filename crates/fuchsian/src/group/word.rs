use std::fmt;
use std::ops::{Index, Mul};

/// Generator index with exponent `±1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Letter {
    pub generator: usize,
    pub exponent: i32,
}

impl Letter {
    #[inline]
    pub fn new(generator: usize, exponent: i32) -> Self {
        Self {
            generator,
            exponent,
        }
    }

    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            generator: self.generator,
            exponent: -self.exponent,
        }
    }

    /// `self` followed by `other` cancels in the free group.
    #[inline]
    pub fn cancels(&self, other: &Letter) -> bool {
        self.generator == other.generator && self.exponent == -other.exponent
    }
}

/// Word in the generators; products concatenate without reducing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Word {
    letters: Vec<Letter>,
}

impl Word {
    #[inline]
    pub fn new(letters: Vec<Letter>) -> Self {
        Self { letters }
    }

    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Word from `(generator, exponent)` pairs.
    pub fn from_pairs(pairs: &[(usize, i32)]) -> Self {
        Self {
            letters: pairs.iter().map(|&(g, e)| Letter::new(g, e)).collect(),
        }
    }

    #[inline]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[inline]
    pub fn push(&mut self, l: Letter) {
        self.letters.push(l);
    }

    #[inline]
    pub fn last(&self) -> Option<&Letter> {
        self.letters.last()
    }

    pub(crate) fn letters_mut(&mut self) -> &mut [Letter] {
        &mut self.letters
    }

    pub fn inverse(&self) -> Word {
        Word {
            letters: self.letters.iter().rev().map(Letter::inverse).collect(),
        }
    }

    /// Free reduction: cancels adjacent inverse letters until none remain.
    pub fn contract(&self) -> Word {
        let mut stack: Vec<Letter> = Vec::with_capacity(self.letters.len());
        for l in &self.letters {
            match stack.last() {
                Some(top) if top.cancels(l) => {
                    stack.pop();
                }
                _ => stack.push(*l),
            }
        }
        Word { letters: stack }
    }

    pub fn contract_in_place(&mut self) {
        *self = self.contract();
    }

    pub fn contract_all(words: &[Word]) -> Vec<Word> {
        words.iter().map(Word::contract).collect()
    }

    /// `self · w` for each `w`.
    pub fn left_multiply_all(&self, words: &[Word]) -> Vec<Word> {
        words.iter().map(|w| self * w).collect()
    }
}

impl From<Vec<Letter>> for Word {
    fn from(letters: Vec<Letter>) -> Self {
        Self { letters }
    }
}

impl Index<usize> for Word {
    type Output = Letter;
    #[inline]
    fn index(&self, i: usize) -> &Letter {
        &self.letters[i]
    }
}

impl Mul<&Word> for &Word {
    type Output = Word;
    fn mul(self, rhs: &Word) -> Word {
        let mut letters = Vec::with_capacity(self.len() + rhs.len());
        letters.extend_from_slice(&self.letters);
        letters.extend_from_slice(&rhs.letters);
        Word { letters }
    }
}

impl Mul<Word> for Word {
    type Output = Word;
    fn mul(mut self, rhs: Word) -> Word {
        self.letters.extend(rhs.letters);
        self
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, l) in self.letters.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", l.generator, l.exponent)?;
        }
        write!(f, "]")
    }
}

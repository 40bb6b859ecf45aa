use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::error::{GeometryError, Result};

use super::surface::TopologicalSurface;
use super::word::{Letter, Word};

/// Finite presentation `⟨ generators | relators ⟩` with optional cusp words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscreteGroup {
    generators: Vec<String>,
    relations: Vec<Word>,
    cusps: Vec<Word>,
    closed_surface_group: bool,
}

fn commutator(a: usize, b: usize) -> [Letter; 4] {
    [
        Letter::new(a, 1),
        Letter::new(b, 1),
        Letter::new(a, -1),
        Letter::new(b, -1),
    ]
}

fn has_duplicates(names: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(names.len());
    !names.iter().all(|n| seen.insert(n))
}

impl DiscreteGroup {
    /// Plain presentation; no cusps, not flagged as a closed surface group.
    pub fn new(generators: Vec<String>, relations: Vec<Word>) -> Self {
        Self {
            generators,
            relations,
            cusps: Vec::new(),
            closed_surface_group: false,
        }
    }

    /// Standard presentation `⟨ a1, b1, …, ag, bg, c1, …, cn | [a1,b1]⋯[ag,bg]·c1⋯cn ⟩`.
    pub fn from_surface(s: &TopologicalSurface) -> Self {
        let (genus, punctures) = (s.genus(), s.nb_punctures());
        let mut generators = Vec::with_capacity(2 * genus + punctures);
        for k in 1..=genus {
            generators.push(format!("a{}", k));
            generators.push(format!("b{}", k));
        }
        for k in 1..=punctures {
            generators.push(format!("c{}", k));
        }

        let mut relator = Word::empty();
        for k in 0..genus {
            for l in commutator(2 * k, 2 * k + 1) {
                relator.push(l);
            }
        }
        let mut cusps = Vec::with_capacity(punctures);
        for k in 2 * genus..2 * genus + punctures {
            relator.push(Letter::new(k, 1));
            cusps.push(Word::new(vec![Letter::new(k, 1)]));
        }

        Self {
            generators,
            relations: vec![relator],
            cusps,
            closed_surface_group: punctures == 0,
        }
    }

    pub fn from_surface_data(genus: usize, nb_punctures: usize) -> Self {
        Self::from_surface(&TopologicalSurface::new(genus, nb_punctures))
    }

    #[inline]
    pub fn generators(&self) -> &[String] {
        &self.generators
    }

    #[inline]
    pub fn nb_generators(&self) -> usize {
        self.generators.len()
    }

    #[inline]
    pub fn relations(&self) -> &[Word] {
        &self.relations
    }

    #[inline]
    pub fn cusps(&self) -> &[Word] {
        &self.cusps
    }

    #[inline]
    pub fn nb_cusps(&self) -> usize {
        self.cusps.len()
    }

    #[inline]
    pub fn is_closed_surface_group(&self) -> bool {
        self.closed_surface_group
    }

    /// Genus of a closed surface group; `None` otherwise.
    pub fn genus(&self) -> Option<usize> {
        if self.closed_surface_group {
            Some(self.generators.len() / 2)
        } else {
            None
        }
    }

    /// Reduced words of length exactly `n`, ordered by prefix, then generator, then sign.
    ///
    /// Length 0 gives the empty word alone.
    pub fn words_of_length_equal_to(&self, n: usize) -> Vec<Word> {
        self.words_by_length(n, true)
    }

    /// All reduced words of length `< n`, shortest first.
    pub fn words_of_length_less_than(&self, n: usize) -> Vec<Word> {
        (0..n)
            .flat_map(|j| self.words_of_length_equal_to(j))
            .collect()
    }

    /// Words of length `n` whose consecutive letters use different generators.
    pub fn words_of_non_repeating_letters_length_equal_to(&self, n: usize) -> Vec<Word> {
        self.words_by_length(n, false)
    }

    /// Non-repeating words of lengths `1..n`.
    pub fn words_of_non_repeating_letters_length_less_than(&self, n: usize) -> Vec<Word> {
        (1..n)
            .flat_map(|j| self.words_of_non_repeating_letters_length_equal_to(j))
            .collect()
    }

    fn words_by_length(&self, n: usize, allow_power: bool) -> Vec<Word> {
        let ng = self.generators.len();
        if n == 0 {
            return vec![Word::empty()];
        }
        if n == 1 {
            let mut out = Vec::with_capacity(2 * ng);
            for k in 0..ng {
                out.push(Word::new(vec![Letter::new(k, 1)]));
                out.push(Word::new(vec![Letter::new(k, -1)]));
            }
            return out;
        }
        let previous = self.words_by_length(n - 1, allow_power);
        let mut out = Vec::with_capacity(previous.len() * 2 * ng);
        for w in &previous {
            let Some(last) = w.last().copied() else {
                continue;
            };
            for k in 0..ng {
                if k != last.generator {
                    for e in [1, -1] {
                        let mut next = w.clone();
                        next.push(Letter::new(k, e));
                        out.push(next);
                    }
                } else if allow_power {
                    let mut next = w.clone();
                    next.push(last);
                    out.push(next);
                }
            }
        }
        out
    }

    fn closed_genus(&self, what: &str) -> Result<usize> {
        match self.genus() {
            Some(g) if g > 0 => Ok(g),
            _ => Err(GeometryError::InvalidPresentation(format!(
                "{} needs a closed surface group of positive genus",
                what
            ))),
        }
    }

    /// Partial products of the relator, read from one vertex of the standard 4g-gon.
    ///
    /// Starts with the empty word and stops one letter before the full relator,
    /// for `4g` words in total.
    pub fn pairings_from_vertex(&self) -> Result<Vec<Word>> {
        let genus = self.closed_genus("pairings from vertex")?;
        let mut out = Vec::with_capacity(4 * genus);
        let mut store = Word::empty();
        out.push(store.clone());
        for k in 0..genus {
            let letters = commutator(2 * k, 2 * k + 1);
            let take = if k + 1 == genus { 3 } else { 4 };
            for l in &letters[..take] {
                store.push(*l);
                out.push(store.clone());
            }
        }
        Ok(out)
    }

    /// Inverses of `pairings_from_vertex`: the translates of the polygon around one vertex.
    pub fn pairings_around_vertex(&self) -> Result<Vec<Word>> {
        Ok(self
            .pairings_from_vertex()?
            .iter()
            .map(Word::inverse)
            .collect())
    }

    /// Side pairings of the standard 4g-gon, side `k` paired with side `k + 2` in each block.
    pub fn side_pairings(&self) -> Result<Vec<Word>> {
        let genus = self.closed_genus("side pairings")?;
        let mut out = vec![Word::empty(); 4 * genus];
        let mut store = Word::empty();
        for k in 0..genus {
            let (a, b) = (2 * k, 2 * k + 1);
            let first = &(&store * &Word::from_pairs(&[(a, 1), (b, 1), (a, -1)])) * &store.inverse();
            out[4 * k + 2] = first.inverse();
            out[4 * k] = first;
            let second = &(&store
                * &Word::from_pairs(&[(a, 1), (b, 1), (a, -1), (b, -1), (a, -1)]))
                * &store.inverse();
            out[4 * k + 3] = second.inverse();
            out[4 * k + 1] = second;
            store = &store * &Word::new(commutator(a, b).to_vec());
        }
        Ok(out)
    }

    /// Translates of the polygon covering the neighborhoods of all its vertices.
    ///
    /// For each vertex word `w_j`, the around-vertex list minus the two
    /// entries that would give back the polygon or a translate already
    /// adjacent to it, left-multiplied by `w_j`: `4g·(4g − 2)` words.
    pub fn pairings_around_vertices(&self) -> Result<Vec<Word>> {
        let genus = self.closed_genus("pairings around vertices")?;
        let to_vertex = self.pairings_around_vertex()?;
        let from_vertex = self.pairings_from_vertex()?;
        let mut out = Vec::with_capacity(16 * genus * genus - 8 * genus);
        for (j, w) in from_vertex.iter().enumerate() {
            let mut others = to_vertex.clone();
            others.remove(j);
            if j % 4 == 0 || j % 4 == 1 {
                others.remove(if j == 4 * genus - 3 { 0 } else { j + 2 });
            } else {
                others.remove(j - 1);
            }
            out.extend(w.left_multiply_all(&others));
        }
        Ok(out)
    }

    fn check_compatibility_for_amalgamation(g1: &DiscreteGroup, g2: &DiscreteGroup) -> Result<()> {
        if has_duplicates(&g1.generators) || has_duplicates(&g2.generators) {
            return Err(GeometryError::InvalidPresentation(
                "group generators contain duplicates".into(),
            ));
        }
        if g1.generators.iter().any(|n| g2.generators.contains(n)) {
            return Err(GeometryError::InvalidPresentation(
                "common generator names".into(),
            ));
        }
        if g1.nb_cusps() != 0 || g2.nb_cusps() != 0 {
            return Err(GeometryError::InvalidPresentation(
                "amalgamation of groups with cusps is not supported".into(),
            ));
        }
        Ok(())
    }

    fn check_compatibility_for_hnn_extension(g: &DiscreteGroup) -> Result<()> {
        if has_duplicates(&g.generators) {
            return Err(GeometryError::InvalidPresentation(
                "group generators contain duplicates".into(),
            ));
        }
        if g.nb_cusps() != 0 {
            return Err(GeometryError::InvalidPresentation(
                "HNN extension of groups with cusps is not supported".into(),
            ));
        }
        Ok(())
    }

    fn require_generator(&self, name: &str) -> Result<usize> {
        self.find_generator_index(name).ok_or_else(|| {
            GeometryError::InvalidPresentation(format!("generator {} is not in the group", name))
        })
    }

    /// Free product of `g1` and `g2` with the extra relator `a · b` (b = a⁻¹).
    ///
    /// Generators of `g2` are renumbered after those of `g1`.
    pub fn amalgamate_over_inverse(
        g1: &DiscreteGroup,
        a: &str,
        g2: &DiscreteGroup,
        a_inverse: &str,
    ) -> Result<DiscreteGroup> {
        let i1 = g1.require_generator(a)?;
        let j1 = g2.require_generator(a_inverse)?;
        Self::check_compatibility_for_amalgamation(g1, g2)?;

        let offset = g1.generators.len();
        let mut generators = g1.generators.clone();
        generators.extend(g2.generators.iter().cloned());

        let mut relations = g1.relations.clone();
        for w in &g2.relations {
            let mut shifted = w.clone();
            for l in shifted.letters_mut() {
                l.generator += offset;
            }
            relations.push(shifted);
        }
        relations.push(Word::new(vec![Letter::new(i1, 1), Letter::new(j1 + offset, 1)]));
        debug!(
            nb_generators = generators.len(),
            nb_relations = relations.len(),
            "amalgamated presentation"
        );
        Ok(DiscreteGroup::new(generators, relations))
    }

    /// Adds the stable letter `t` and the relator `b · t⁻¹ · a · t` (b = a⁻¹).
    pub fn hnn_extension_over_inverse(
        g: &DiscreteGroup,
        a: &str,
        a_inverse: &str,
        new_generator: &str,
    ) -> Result<DiscreteGroup> {
        let i1 = g.require_generator(a)?;
        let j1 = g.require_generator(a_inverse)?;
        Self::check_compatibility_for_hnn_extension(g)?;
        if g.find_generator_index(new_generator).is_some() {
            return Err(GeometryError::InvalidPresentation(format!(
                "generator {} already exists",
                new_generator
            )));
        }

        let mut generators = g.generators.clone();
        generators.push(new_generator.to_string());
        let t = generators.len() - 1;
        let mut relations = g.relations.clone();
        relations.push(Word::new(vec![
            Letter::new(j1, 1),
            Letter::new(t, -1),
            Letter::new(i1, 1),
            Letter::new(t, 1),
        ]));
        Ok(DiscreteGroup::new(generators, relations))
    }

    pub fn reset(&mut self) {
        self.generators.clear();
        self.relations.clear();
        self.cusps.clear();
        self.closed_surface_group = false;
    }

    /// Pair of pants `⟨ c1, c2, c3 | c3 c2 c1 ⟩`.
    pub fn set_pair_of_pants(&mut self, c1: &str, c2: &str, c3: &str) {
        self.reset();
        self.generators = vec![c1.to_string(), c2.to_string(), c3.to_string()];
        self.relations = vec![Word::from_pairs(&[(2, 1), (1, 1), (0, 1)])];
    }

    /// Rotates the generator names to the right; words keep their indices.
    pub fn rotate_generators(&mut self, right_shift: usize) {
        let n = self.generators.len();
        if n == 0 {
            return;
        }
        self.generators.rotate_right(right_shift % n);
    }

    /// Shifts every generator index of `w` by `shift`, modulo the generator count.
    pub fn rotate_word(&self, w: &mut Word, shift: usize) {
        let n = self.generators.len();
        if n == 0 {
            return;
        }
        for l in w.letters_mut() {
            l.generator = (l.generator + shift) % n;
        }
    }

    pub fn find_generator_index(&self, name: &str) -> Option<usize> {
        self.generators.iter().position(|g| g == name)
    }

    /// `a1`, or `a1^-1` for a non-unit exponent.
    pub fn letter_as_string(&self, l: &Letter) -> String {
        let name = self
            .generators
            .get(l.generator)
            .map(String::as_str)
            .unwrap_or("?");
        if l.exponent == 1 {
            name.to_string()
        } else {
            format!("{}^{}", name, l.exponent)
        }
    }

    pub fn word_as_string(&self, w: &Word) -> String {
        w.letters()
            .iter()
            .map(|l| self.letter_as_string(l))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for DiscreteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relations: Vec<String> = self
            .relations
            .iter()
            .map(|w| self.word_as_string(w))
            .collect();
        write!(
            f,
            "< {} | {} >",
            self.generators.join(", "),
            relations.join(", ")
        )
    }
}

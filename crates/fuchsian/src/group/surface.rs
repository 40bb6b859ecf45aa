/// Orientable surface of finite type, given by genus and number of punctures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TopologicalSurface {
    genus: usize,
    nb_punctures: usize,
}

impl TopologicalSurface {
    #[inline]
    pub fn new(genus: usize, nb_punctures: usize) -> Self {
        Self {
            genus,
            nb_punctures,
        }
    }

    #[inline]
    pub fn genus(&self) -> usize {
        self.genus
    }

    #[inline]
    pub fn nb_punctures(&self) -> usize {
        self.nb_punctures
    }

    /// `2 − 2g − n`.
    #[inline]
    pub fn euler_characteristic(&self) -> i64 {
        2 - 2 * self.genus as i64 - self.nb_punctures as i64
    }

    /// Admits a complete hyperbolic metric (negative Euler characteristic).
    #[inline]
    pub fn is_hyperbolic(&self) -> bool {
        self.euler_characteristic() < 0
    }
}

use super::*;
use crate::error::GeometryError;

fn w(pairs: &[(usize, i32)]) -> Word {
    Word::from_pairs(pairs)
}

#[test]
fn genus_one_presentation() {
    let g = DiscreteGroup::from_surface_data(1, 0);
    assert_eq!(g.generators(), ["a1", "b1"]);
    assert_eq!(g.relations(), [w(&[(0, 1), (1, 1), (0, -1), (1, -1)])]);
    assert!(g.is_closed_surface_group());
    assert_eq!(g.nb_cusps(), 0);
    assert_eq!(g.to_string(), "< a1, b1 | a1 b1 a1^-1 b1^-1 >");
}

#[test]
fn punctured_presentation_has_cusps() {
    let g = DiscreteGroup::from_surface(&TopologicalSurface::new(1, 2));
    assert_eq!(g.nb_generators(), 4);
    assert_eq!(g.generators()[2..], ["c1", "c2"]);
    assert_eq!(g.nb_cusps(), 2);
    assert!(g.cusps().iter().all(|c| c.len() == 1));
    assert!(!g.is_closed_surface_group());
    assert_eq!(g.relations()[0].len(), 6);
    assert!(g.pairings_from_vertex().is_err());
    assert_eq!(g.genus(), None);
}

#[test]
fn surface_euler_characteristic() {
    assert_eq!(TopologicalSurface::new(2, 0).euler_characteristic(), -2);
    assert!(TopologicalSurface::new(0, 3).is_hyperbolic());
    assert!(!TopologicalSurface::new(1, 0).is_hyperbolic());
}

#[test]
fn contraction_is_free_reduction() {
    let x = w(&[(0, 1), (1, 1), (1, -1), (0, -1), (2, 1)]);
    assert_eq!(x.contract(), w(&[(2, 1)]));
    let y = w(&[(0, 1), (1, -1), (2, 1), (2, 1)]);
    assert_eq!(y.contract(), y);
    assert_eq!(y.contract().contract(), y.contract());
    assert!((&y * &y.inverse()).contract().is_empty());
    let mut z = &x * &y;
    assert_eq!(z.len(), x.len() + y.len());
    z.contract_in_place();
    assert_eq!(z, (x.contract() * y.clone()).contract());
    assert_eq!(Word::contract_all(&[x, y.clone()])[1], y);
}

#[test]
fn word_enumeration_counts() {
    let g = DiscreteGroup::from_surface_data(1, 0);
    assert_eq!(g.words_of_length_equal_to(0), vec![Word::empty()]);
    let ones = g.words_of_length_equal_to(1);
    assert_eq!(ones.len(), 4);
    assert_eq!(ones[1], w(&[(0, -1)]));
    let twos = g.words_of_length_equal_to(2);
    assert_eq!(twos.len(), 4 * 3);
    for x in &twos {
        assert_eq!(x.contract(), *x);
    }
    assert_eq!(g.words_of_length_equal_to(3).len(), 4 * 3 * 3);
    assert_eq!(g.words_of_length_less_than(3).len(), 1 + 4 + 12);

    let nr = g.words_of_non_repeating_letters_length_equal_to(3);
    assert_eq!(nr.len(), 4 * 2 * 2);
    for x in &nr {
        let l = x.letters();
        assert!(l.windows(2).all(|p| p[0].generator != p[1].generator));
    }
    assert_eq!(g.words_of_non_repeating_letters_length_less_than(3).len(), 4 + 8);
}

#[test]
fn pairings_from_and_around_vertex() {
    let g = DiscreteGroup::from_surface_data(2, 0);
    let from = g.pairings_from_vertex().unwrap();
    assert_eq!(from.len(), 8);
    assert!(from[0].is_empty());
    assert_eq!(from[7], w(&[(0, 1), (1, 1), (0, -1), (1, -1), (2, 1), (3, 1), (2, -1)]));
    let around = g.pairings_around_vertex().unwrap();
    for (a, b) in from.iter().zip(&around) {
        assert!((a * b).contract().is_empty());
    }
}

#[test]
fn pairings_around_vertices_count() {
    for genus in 1..=3 {
        let g = DiscreteGroup::from_surface_data(genus, 0);
        let n = 4 * genus;
        assert_eq!(g.pairings_around_vertices().unwrap().len(), n * (n - 2));
    }
}

#[test]
fn side_pairings_come_in_inverse_pairs() {
    let g = DiscreteGroup::from_surface_data(2, 0);
    let s = g.side_pairings().unwrap();
    assert_eq!(s.len(), 8);
    for k in [0, 1, 4, 5] {
        assert!((&s[k] * &s[k + 2]).contract().is_empty());
    }
    assert_eq!(s[0], w(&[(0, 1), (1, 1), (0, -1)]));
}

#[test]
fn amalgamation_and_hnn() {
    let mut p1 = DiscreteGroup::default();
    p1.set_pair_of_pants("x1", "x2", "x3");
    let mut p2 = DiscreteGroup::default();
    p2.set_pair_of_pants("y1", "y2", "y3");
    let g = DiscreteGroup::amalgamate_over_inverse(&p1, "x1", &p2, "y2").unwrap();
    assert_eq!(g.nb_generators(), 6);
    assert_eq!(g.relations().len(), 3);
    assert_eq!(g.relations()[1], w(&[(5, 1), (4, 1), (3, 1)]));
    assert_eq!(g.relations()[2], w(&[(0, 1), (4, 1)]));

    assert!(matches!(
        DiscreteGroup::amalgamate_over_inverse(&p1, "x1", &p1, "x2"),
        Err(GeometryError::InvalidPresentation(_))
    ));
    assert!(DiscreteGroup::amalgamate_over_inverse(&p1, "nope", &p2, "y1").is_err());
    let punctured = DiscreteGroup::from_surface_data(0, 3);
    assert!(DiscreteGroup::amalgamate_over_inverse(&p1, "x1", &punctured, "c1").is_err());

    let h = DiscreteGroup::hnn_extension_over_inverse(&p1, "x1", "x2", "t").unwrap();
    assert_eq!(h.generators(), ["x1", "x2", "x3", "t"]);
    assert_eq!(h.relations()[1], w(&[(1, 1), (3, -1), (0, 1), (3, 1)]));
    assert!(DiscreteGroup::hnn_extension_over_inverse(&p1, "x1", "x2", "x3").is_err());
    assert!(DiscreteGroup::hnn_extension_over_inverse(&p1, "x1", "zz", "t").is_err());
}

#[test]
fn editing_operations() {
    let mut g = DiscreteGroup::from_surface_data(1, 1);
    g.rotate_generators(1);
    assert_eq!(g.generators(), ["c1", "a1", "b1"]);
    assert_eq!(g.find_generator_index("a1"), Some(1));
    assert_eq!(g.find_generator_index("zz"), None);
    let mut x = w(&[(0, 1), (2, -1)]);
    g.rotate_word(&mut x, 1);
    assert_eq!(x, w(&[(1, 1), (0, -1)]));
    assert_eq!(g.letter_as_string(&Letter::new(0, -1)), "c1^-1");
    assert_eq!(g.word_as_string(&x), "a1 c1^-1");
    g.reset();
    assert_eq!(g.nb_generators(), 0);
    assert!(!g.is_closed_surface_group());
}

//! Named combinators, by their canonical rendering.
//!
//! The texts are written exactly as the printer renders the combinator on its own,
//! so that a printed abstraction can be looked up by plain string comparison.

pub const KNOWN_COMBINATORS: &[(&str, &str)] = &[
    ("I", "λa.a"),
    ("I*", "λab.ab"),
    ("K", "λab.a"),
    ("π", "λab.b"),
    ("S", "λabc.ac(bc)"),
    ("B", "λabc.a(bc)"),
    ("B₁", "λabcd.a(bcd)"),
    ("B₂", "λabcde.a(bcde)"),
    ("B₃", "λabcd.a(b(cd))"),
    ("C", "λabc.acb"),
    ("C*", "λabcd.abdc"),
    ("C**", "λabcde.abced"),
    ("D", "λabcd.ab(cd)"),
    ("D₁", "λabcde.abc(de)"),
    ("D₂", "λabcde.a(bc)(de)"),
    ("E", "λabcde.ab(cde)"),
    ("Ê", "λabcdefg.a(bcd)(efg)"),
    ("F", "λabc.cba"),
    ("G", "λabcd.ad(bc)"),
    ("H", "λabc.abcb"),
    ("J", "λabcd.ab(adc)"),
    ("L", "λab.a(bb)"),
    ("M", "λa.aa"),
    ("M₂", "λab.ab(ab)"),
    ("O", "λab.b(ab)"),
    ("Φ", "λabcd.a(bd)(cd)"),
    ("Φ₁", "λabcde.a(bde)(cde)"),
    ("Ψ", "λabcd.a(bc)(bd)"),
    ("Q", "λabc.b(ac)"),
    ("Q₁", "λabc.a(cb)"),
    ("Q₂", "λabc.b(ca)"),
    ("Q₃", "λabc.c(ab)"),
    ("R", "λabc.bca"),
    ("T", "λab.ba"),
    ("U", "λab.b(aab)"),
    ("V", "λabc.cab"),
    ("W", "λab.abb"),
    ("W₁", "λab.baa"),
    ("W*", "λabc.abcc"),
    ("W**", "λabcd.abcdd"),
];

/// The lambda text a combinator name stands for.
pub fn expansion(name: &str) -> Option<&'static str> {
    KNOWN_COMBINATORS
        .iter()
        .find_map(|(known, text)| (*known == name).then_some(*text))
}

/// The name of the combinator rendered as `canonical`, if it has one.
pub fn name_of(canonical: &str) -> Option<&'static str> {
    KNOWN_COMBINATORS
        .iter()
        .find_map(|(name, text)| (*text == canonical).then_some(*name))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(expansion("S"), Some("λabc.ac(bc)"));
        assert_eq!(expansion("NotX"), None);
        assert_eq!(name_of("λab.b"), Some("π"));
        assert_eq!(name_of("(λab.b)"), None);
    }

    #[test]
    fn test_unique() {
        for (i, (name, text)) in KNOWN_COMBINATORS.iter().enumerate() {
            for (other_name, other_text) in &KNOWN_COMBINATORS[i + 1..] {
                assert_ne!(name, other_name);
                assert_ne!(text, other_text, "{name} and {other_name}");
            }
        }
    }
}

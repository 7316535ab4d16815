//! Identifier derivation
//!
//! 表示名から安定した識別子を生成する。識別子は重複排除・マージのキーとして使う。

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Derive the stable identifier for a display name.
///
/// The result is a pure function of `name`: diacritics are stripped after
/// NFD decomposition, anything outside `[A-Za-z0-9_]`, whitespace and `-` is
/// dropped, whitespace runs become a single `-` and the whole token is
/// lower-cased.
///
/// ```
/// use taxonomy_core::catalog::derive_id;
///
/// assert_eq!(derive_id("Peças de Reposição"), "pecas-de-reposicao");
/// assert_eq!(derive_id("  BRITADORES  "), "britadores");
/// assert_eq!(derive_id("   "), "");
/// ```
pub fn derive_id(name: &str) -> String {
    let kept: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| is_word_char(*c) || c.is_whitespace() || *c == '-')
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}

/// True when a name would produce an empty identifier
pub fn is_blank_id(name: &str) -> bool {
    derive_id(name).is_empty()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(derive_id("Máquinas Pesadas"), "maquinas-pesadas");
        assert_eq!(derive_id("Serviços"), "servicos");
        assert_eq!(derive_id("Separadores Magnéticos"), "separadores-magneticos");
    }

    #[test]
    fn test_drops_punctuation_but_keeps_hyphen() {
        assert_eq!(derive_id("Bombas (centrífugas)"), "bombas-centrifugas");
        assert_eq!(derive_id("Rolo-guia / retorno"), "rolo-guia-retorno");
        assert_eq!(derive_id("snake_case item"), "snake_case-item");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(derive_id("Foo   Bar"), "foo-bar");
        assert_eq!(derive_id("\tFoo \n Bar "), "foo-bar");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(derive_id(""), "");
        assert_eq!(derive_id("   "), "");
        assert_eq!(derive_id("!!!"), "");
        assert!(is_blank_id(" ?? "));
        assert!(!is_blank_id("Geral"));
    }

    #[test]
    fn test_case_and_accent_variants_collide() {
        assert_eq!(derive_id("PEÇAS"), derive_id("pecas"));
        assert_eq!(derive_id("Correia Transportadora"), derive_id("correia  transportadora"));
    }

    proptest! {
        #[test]
        fn prop_case_insensitive(s in "[a-zA-Z ]{0,24}") {
            prop_assert_eq!(derive_id(&s.to_uppercase()), derive_id(&s.to_lowercase()));
        }

        #[test]
        fn prop_whitespace_run_length_irrelevant(
            words in proptest::collection::vec("[a-z]{1,8}", 1..5),
            pad in 1usize..4,
        ) {
            let single = words.join(" ");
            let padded = words.join(" ".repeat(pad).as_str());
            let surrounded = format!("{}{}{}", " ".repeat(pad), single, " ".repeat(pad));
            prop_assert_eq!(derive_id(&single), derive_id(&padded));
            prop_assert_eq!(derive_id(&single), derive_id(&surrounded));
        }

        #[test]
        fn prop_accented_vowels_fold(s in "[aeiou ]{0,16}") {
            let accented: String = s
                .chars()
                .map(|c| match c {
                    'a' => 'á',
                    'e' => 'ê',
                    'i' => 'í',
                    'o' => 'õ',
                    'u' => 'ü',
                    other => other,
                })
                .collect();
            prop_assert_eq!(derive_id(&accented), derive_id(&s));
        }

        #[test]
        fn prop_output_is_machine_safe(s in "\\PC{0,32}") {
            let id = derive_id(&s);
            prop_assert!(id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
        }
    }
}

//! 照合モジュール
//!
//! 選択済み列の1セルと語彙から「NY LOCAL か」を判定する純粋関数。
//! 欠損・空セルは常に不一致。

use crate::normalize::{normalize_text, tokens};
use crate::vocabulary::{MatchMode, Vocabulary};

/// セル値が語彙に一致するか判定する
pub fn is_match(value: Option<&str>, vocabulary: &Vocabulary, mode: MatchMode) -> bool {
    matched_term(value, vocabulary, mode).is_some()
}

/// 一致した語彙エントリを返す（最初に見つかったもの）
///
/// token モードはセル内の単語順、cell モードは語彙のソート順で探索する。
pub fn matched_term<'v>(
    value: Option<&str>,
    vocabulary: &'v Vocabulary,
    mode: MatchMode,
) -> Option<&'v str> {
    let normalized = normalize_text(value?);
    if normalized.is_empty() {
        return None;
    }

    match mode {
        MatchMode::Token => tokens(&normalized).find_map(|word| vocabulary.get(word)),
        MatchMode::Cell => vocabulary.iter().find(|term| normalized.contains(term)),
    }
}

impl Vocabulary {
    /// 語彙自身の導出モードで照合する
    pub fn matches(&self, value: Option<&str>) -> bool {
        is_match(value, self, self.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_vocabulary() -> Vocabulary {
        Vocabulary::from_terms(MatchMode::Token, ["apple", "corn"])
    }

    #[test]
    fn test_token_match_any_word() {
        assert!(is_match(Some("Fresh Apple Pie"), &token_vocabulary(), MatchMode::Token));
    }

    #[test]
    fn test_token_no_match() {
        assert!(!is_match(Some("Banana Bread"), &token_vocabulary(), MatchMode::Token));
    }

    #[test]
    fn test_token_requires_whole_word() {
        assert!(!is_match(Some("Pineapple Juice"), &token_vocabulary(), MatchMode::Token));
        assert!(!is_match(Some("Popcorn"), &token_vocabulary(), MatchMode::Token));
    }

    #[test]
    fn test_cell_substring_false_positive() {
        let vocabulary = Vocabulary::from_terms(MatchMode::Cell, ["apple"]);
        assert!(is_match(Some("pineapple juice"), &vocabulary, MatchMode::Cell));
        assert_eq!(
            matched_term(Some("Pineapple  Juice"), &vocabulary, MatchMode::Cell),
            Some("apple")
        );
    }

    #[test]
    fn test_cell_multi_word_entry_spans_irregular_spacing() {
        let vocabulary = Vocabulary::from_terms(MatchMode::Cell, ["sweet corn"]);
        assert!(is_match(Some("  Organic SWEET\t corn 12ct"), &vocabulary, MatchMode::Cell));
        assert!(!is_match(Some("sweet potato corn"), &vocabulary, MatchMode::Cell));
    }

    #[test]
    fn test_empty_and_missing_never_match() {
        for mode in [MatchMode::Token, MatchMode::Cell] {
            let vocabulary = Vocabulary::from_terms(mode, ["apple"]);
            assert!(!is_match(None, &vocabulary, mode));
            assert!(!is_match(Some(""), &vocabulary, mode));
            assert!(!is_match(Some("   "), &vocabulary, mode));
        }
    }

    #[test]
    fn test_vocabulary_matches_uses_own_mode() {
        let vocabulary = Vocabulary::from_terms(MatchMode::Cell, ["apple"]);
        assert!(vocabulary.matches(Some("Pineapple")));
        let vocabulary = Vocabulary::from_terms(MatchMode::Token, ["apple"]);
        assert!(!vocabulary.matches(Some("Pineapple")));
    }

    #[test]
    fn test_token_mode_equals_set_intersection() {
        let vocabulary = Vocabulary::from_terms(MatchMode::Token, ["maple", "syrup", "honey"]);
        let inputs = ["Maple Syrup 8oz", "raw HONEY", "Honeycrisp", "", "Grade A  maple"];
        for input in inputs {
            let normalized = normalize_text(input);
            let expected = tokens(&normalized).any(|t| vocabulary.contains(t));
            assert_eq!(is_match(Some(input), &vocabulary, MatchMode::Token), expected, "{}", input);
        }
    }

    #[test]
    fn test_growing_vocabulary_is_monotone() {
        let inputs = ["Fresh Apple Pie", "pineapple juice", "Corn Flakes", "Banana"];
        for mode in [MatchMode::Token, MatchMode::Cell] {
            let small = Vocabulary::from_terms(mode, ["apple"]);
            let large = Vocabulary::from_terms(mode, ["apple", "banana", "kale"]);
            for input in inputs {
                if is_match(Some(input), &small, mode) {
                    assert!(is_match(Some(input), &large, mode), "{} / {}", mode, input);
                }
            }
        }
    }
}

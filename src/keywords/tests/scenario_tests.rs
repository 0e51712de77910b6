use crate::keywords::{KeywordRanker, rank_keywords};
use crate::results::RankingPath;
use crate::utils::char_slice;

const EIFFEL: &str =
    "The Eiffel Tower is a wrought-iron lattice tower on the Champ de Mars in Paris, France.";

const SAMPLES: &[&str] = &[
    EIFFEL,
    "Marie Curie was born in Warsaw. She moved to Paris, where Marie Curie met Pierre Curie \
     at the Sorbonne. The Nobel Prize followed, and later a second Nobel Prize.",
    "Die Universität Wien liegt in Österreich. Sigmund Freud lehrte an der Universität Wien, \
     bevor er nach London emigrierte.",
    "Apollo Eleven launched from Kennedy Space Center. Neil Armstrong and Buzz Aldrin walked \
     on the Moon while Michael Collins orbited. NASA called Houston. Houston answered NASA. \
     Florida cheered. Ohio, Texas and California watched. Washington sent congratulations \
     to Armstrong, Aldrin and Collins. Moscow listened.",
    "plain lowercase words without any capital letter at all in this paragraph",
];

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_eiffel_tower_listing() {
        let result = KeywordRanker::default().rank(EIFFEL, 5);
        assert_eq!(result.path, RankingPath::Listing);
        assert_eq!(
            result.texts(),
            vec!["Champ", "Paris", "France", "The Eiffel Tower"]
        );
        assert_eq!(result.keywords[1].offsets, vec![EIFFEL.find("Paris").unwrap()]);
    }

    #[test]
    fn test_offsets_reproduce_keywords() {
        for text in SAMPLES {
            for keyword in rank_keywords(text, 10) {
                assert!(!keyword.offsets.is_empty(), "{} not found", keyword.keyword);
                for offset in keyword.offsets {
                    let len = keyword.keyword.chars().count();
                    assert_eq!(char_slice(text, offset, len), keyword.keyword);
                }
            }
        }
    }

    #[test]
    fn test_offsets_count_characters_not_bytes() {
        let text = "Köln und Paris sind Städte in Europa heute.";
        let keywords = rank_keywords(text, 10);
        let paris = keywords.iter().find(|k| k.keyword == "Paris").unwrap();
        assert_eq!(paris.offsets, vec![9]);
        let europa = keywords.iter().find(|k| k.keyword == "Europa").unwrap();
        assert_eq!(europa.offsets, vec![30]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let ranker = KeywordRanker::default();
        for text in SAMPLES {
            for k in [1, 3, 10] {
                let first = ranker.rank(text, k);
                let second = ranker.rank(text, k);
                assert_eq!(first, second);
                assert_eq!(rank_keywords(text, k), first.keywords);
            }
        }
    }

    #[test]
    fn test_non_empty_text_never_yields_nothing() {
        for text in SAMPLES {
            assert!(!rank_keywords(text, 10).is_empty());
        }
    }
}

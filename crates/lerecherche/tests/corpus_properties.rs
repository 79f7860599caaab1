// Property tests for the corpus index
//
// These tests verify the search contract over randomly generated catalogs:
// result bounds, index validity, score ordering, and self-retrieval.

use lecatalogue::CatalogItem;
use lerecherche::CorpusIndex;
use proptest::prelude::*;

const WORDS: &[&str] = &[
    "java", "python", "sql", "leadership", "verbal", "numerical", "sales", "the", "and",
    "assessment", "skills", "test", "reasoning", "with", "cognitive", "developer",
];

fn phrase(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), min..=max).prop_map(|w| w.join(" "))
}

fn catalog() -> impl Strategy<Value = Vec<CatalogItem>> {
    prop::collection::vec((phrase(1, 4), phrase(0, 6)), 1..20).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, description))| {
                CatalogItem::new(name, format!("https://example.com/{}", i), description)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn search_respects_bounds_and_ordering(
        items in catalog(),
        query in phrase(0, 5),
        n in 1usize..30,
    ) {
        let Ok(index) = CorpusIndex::build(&items) else {
            return Ok(());
        };
        let hits = index.search(&query, n);

        prop_assert!(hits.len() <= n);
        prop_assert_eq!(hits.len(), n.min(items.len()));
        for hit in &hits {
            prop_assert!(hit.index < items.len());
            prop_assert!((0.0..=1.0 + 1e-5).contains(&hit.score));
        }
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
    }

    #[test]
    fn item_text_retrieves_item_among_top(items in catalog(), pick in any::<prop::sample::Index>()) {
        let Ok(index) = CorpusIndex::build(&items) else {
            return Ok(());
        };
        let target = pick.index(items.len());
        let hits = index.search(&items[target].document(), items.len());

        let top = hits[0].score;
        let own = hits
            .iter()
            .find(|h| h.index == target)
            .map(|h| h.score)
            .unwrap_or(-1.0);
        prop_assert!(own >= top - 1e-5, "own score {} below top {}", own, top);
    }
}

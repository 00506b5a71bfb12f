mod common;

use feed_reader::{
    Article, EntityCategory, Heuristic, HeuristicOptions, HeuristicRegistry, QuickHeuristic,
};
use std::sync::Arc;
use tracing::info;

fn names(heuristic: &dyn Heuristic, text: &str) -> Vec<String> {
    heuristic.extract(text).map(|o| o.name).collect()
}

#[test]
fn test_quick_single_article_repeated_name() {
    common::init_tracing();

    let article = Article::new("Alice meets Bob", "Alice waves. Alice smiles.");
    let heuristic = QuickHeuristic::new();

    let occurrences: Vec<_> = heuristic.extract(&article.scan_text()).collect();
    info!("Occurrences: {:?}", occurrences);

    let found: Vec<&str> = occurrences.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(found, vec!["Alice", "Bob", "Alice", "Alice"]);
    assert!(occurrences.iter().all(|o| o.category == EntityCategory::Other));
}

#[test]
fn test_quick_coalesces_adjacent_capitalized_words() {
    let heuristic = QuickHeuristic::new();
    let found = names(
        &heuristic,
        "The New York Times reported. New York Times again.",
    );

    assert_eq!(found, vec!["New York Times", "New York Times"]);
}

#[test]
fn test_quick_keeps_stopwords_when_filter_disabled() {
    let heuristic = QuickHeuristic::without_stopwords();
    let found = names(
        &heuristic,
        "The New York Times reported. New York Times again.",
    );

    assert_eq!(found, vec!["The New York Times", "New York Times"]);
}

#[test]
fn test_quick_stopword_only_filtered_at_sentence_start() {
    let heuristic = QuickHeuristic::new();

    assert_eq!(names(&heuristic, "It rained in Paris."), vec!["Paris"]);
    assert_eq!(
        names(&heuristic, "Rain in Oslo. The storm hit Bergen."),
        vec!["Rain", "Oslo", "Bergen"]
    );
    assert_eq!(names(&heuristic, "Oslo!\nThe end"), vec!["Oslo"]);
}

#[test]
fn test_quick_mid_sentence_stopword_joins_run() {
    let heuristic = QuickHeuristic::new();

    assert_eq!(
        names(&heuristic, "Reported by The Guardian today."),
        vec!["Reported", "The Guardian"]
    );
}

#[test]
fn test_quick_newline_and_punctuation_break_runs() {
    let heuristic = QuickHeuristic::new();

    assert_eq!(names(&heuristic, "Alice meets Bob\nCarol"), vec!["Alice", "Bob", "Carol"]);
    assert_eq!(names(&heuristic, "Alice, Bob; Carol"), vec!["Alice", "Bob", "Carol"]);
    assert_eq!(names(&heuristic, "Alice  Bob\tCarol"), vec!["Alice Bob Carol"]);
}

#[test]
fn test_quick_word_internal_joiners_and_possessives() {
    let heuristic = QuickHeuristic::new();

    assert_eq!(
        names(&heuristic, "yesterday Jean-Luc Picard met O'Brien"),
        vec!["Jean-Luc Picard", "O'Brien"]
    );
    assert_eq!(
        names(&heuristic, "analysts praised Google's Android update"),
        vec!["Google", "Android"]
    );
    assert_eq!(
        names(&heuristic, "shares of Apple\u{2019}s supplier"),
        vec!["Apple"]
    );
}

#[test]
fn test_quick_ignores_lowercase_and_numeric_tokens() {
    let heuristic = QuickHeuristic::new();

    assert!(names(&heuristic, "nothing here but 2024 and lowercase words").is_empty());
    assert_eq!(names(&heuristic, "visit Zürich or Ørsted"), vec!["Zürich", "Ørsted"]);
}

#[test]
fn test_quick_requires_uppercase_letter() {
    let heuristic = QuickHeuristic::new();

    assert_eq!(names(&heuristic, "\u{216B} Legion met \u{24B6}lpha"), vec!["Legion"]);
    assert_eq!(
        names(&heuristic, "Rain over \u{00C9}mile and \u{03A9}mega"),
        vec!["Rain", "\u{00C9}mile", "\u{03A9}mega"]
    );
}

#[test]
fn test_quick_empty_text_yields_nothing() {
    let heuristic = QuickHeuristic::new();

    assert_eq!(heuristic.extract("").count(), 0);
    assert_eq!(heuristic.extract("\n").count(), 0);
    assert_eq!(heuristic.extract("  ...  !!").count(), 0);
}

#[test]
fn test_quick_is_deterministic() {
    let heuristic = QuickHeuristic::new();
    let text = "Alice met Bob in New York. The Mayor of London said Alice was late.\nBob agreed.";

    assert!(heuristic.is_deterministic());
    let first: Vec<_> = heuristic.extract(text).collect();
    for _ in 0..5 {
        let again: Vec<_> = heuristic.extract(text).collect();
        assert_eq!(first, again);
    }
}

#[test]
fn test_quick_extraction_is_lazy() {
    let heuristic = QuickHeuristic::new();
    let text = "Alice and Bob and Carol and Dave";

    let mut occurrences = heuristic.extract(text);
    assert_eq!(occurrences.next().map(|o| o.name), Some("Alice".to_string()));
    assert_eq!(occurrences.next().map(|o| o.name), Some("Bob".to_string()));
}

#[test]
fn test_custom_stopwords() {
    let heuristic = QuickHeuristic::with_stopwords(["Breaking"]);

    assert_eq!(names(&heuristic, "Breaking news from Rome"), vec!["Rome"]);
    assert_eq!(names(&heuristic, "The Senate voted"), vec!["The Senate"]);
}

#[test]
fn test_registry_selects_quick_by_default() {
    common::init_tracing();

    let registry = HeuristicRegistry::new();
    let options = HeuristicOptions::default();

    assert_eq!(registry.list_heuristics(), vec!["quick".to_string()]);
    assert_eq!(registry.default_heuristic(), "quick");
    assert_eq!(registry.select(None, &options).name(), "quick");
    assert_eq!(registry.select(Some("QUICK"), &options).name(), "quick");
}

#[test]
fn test_registry_falls_back_on_unknown_name() {
    common::init_tracing();

    let registry = HeuristicRegistry::new();
    let heuristic = registry.select(Some("fancy"), &HeuristicOptions::default());

    assert_eq!(heuristic.name(), "quick");
    assert!(!registry.contains("fancy"));
}

#[test]
fn test_registry_fallback_notice() {
    let registry = HeuristicRegistry::new();

    assert_eq!(
        registry.fallback_notice(Some("Fancy")).as_deref(),
        Some("Unknown heuristic: fancy. Using default (quick).")
    );
    assert_eq!(registry.fallback_notice(Some("QUICK")), None);
    assert_eq!(registry.fallback_notice(None), None);
}

#[test]
fn test_registry_passes_options_to_factory() {
    let registry = HeuristicRegistry::new();
    let options = HeuristicOptions {
        keep_stopwords: true,
    };

    let heuristic = registry.select(Some("quick"), &options);
    assert_eq!(names(heuristic.as_ref(), "The Times"), vec!["The Times"]);
}

struct ShoutHeuristic;

impl Heuristic for ShoutHeuristic {
    fn name(&self) -> &str {
        "shout"
    }

    fn extract<'a>(&'a self, text: &'a str) -> feed_reader::Occurrences<'a> {
        Box::new(
            text.split_whitespace()
                .filter(|w| w.len() > 1 && w.chars().all(|c| c.is_ascii_uppercase()))
                .map(|w| feed_reader::EntityOccurrence::new(w, EntityCategory::Organization)),
        )
    }
}

fn shout_factory(_options: &HeuristicOptions) -> Arc<dyn Heuristic> {
    Arc::new(ShoutHeuristic)
}

#[test]
fn test_registry_accepts_new_heuristics() {
    let mut registry = HeuristicRegistry::new();
    registry.register("Shout", shout_factory);

    let heuristic = registry.select(Some("shout"), &HeuristicOptions::default());
    assert_eq!(heuristic.name(), "shout");
    assert_eq!(names(heuristic.as_ref(), "NASA and ESA met Bob"), vec!["NASA", "ESA"]);
    assert_eq!(registry.list_heuristics(), vec!["quick".to_string(), "shout".to_string()]);
}

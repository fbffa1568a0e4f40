use std::collections::HashMap;

use chrono::Utc;

use stockpulse_sentiment::{ModelWeights, SentimentClassifier, CONFIDENCE_FLOOR};

use super::*;

/// Fixture classifier: "soar" → positive, "crash" → negative, both well above
/// the confidence floor. Anything else pools to the zero vector and collapses
/// to a low-confidence neutral.
fn fixture_classifier() -> SentimentClassifier {
    let mut vocab = HashMap::new();
    vocab.insert("[PAD]".to_string(), 0);
    vocab.insert("[UNK]".to_string(), 1);
    vocab.insert("soar".to_string(), 2);
    vocab.insert("crash".to_string(), 3);
    let weights = ModelWeights {
        vocab,
        pad_id: 0,
        unk_id: 1,
        embed_dim: 2,
        max_tokens: 8,
        labels: vec![
            "positive".to_string(),
            "negative".to_string(),
            "neutral".to_string(),
        ],
        embedding: vec![
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ],
        output_weights: vec![vec![6.0, 0.0], vec![0.0, 6.0], vec![0.0, 0.0]],
        output_bias: vec![0.0, 0.0, 0.0],
    };
    SentimentClassifier::from_weights(weights).expect("fixture weights must validate")
}

fn item(title: &str) -> HotItem {
    HotItem {
        title: title.to_string(),
        score: 10,
        source_url: "https://example.com/post".to_string(),
        observed_at: Utc::now(),
    }
}

#[test]
fn tag_title_prefixes_source_in_brackets() {
    assert_eq!(
        tag_title("wallstreetbets", "GME to the moon"),
        "[wallstreetbets] GME to the moon"
    );
}

#[test]
fn classify_batch_preserves_source_then_fetch_order() {
    let classifier = fixture_classifier();
    let items = vec![
        ("A".to_string(), item("soar")),
        ("A".to_string(), item("crash")),
        ("B".to_string(), item("soar")),
        ("B".to_string(), item("crash")),
    ];

    let rows = classify_batch(&classifier, &items);

    assert_eq!(rows.len(), 4);
    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["[A] soar", "[A] crash", "[B] soar", "[B] crash"]
    );
    assert_eq!(rows[0].sentiment, "positive");
    assert_eq!(rows[1].sentiment, "negative");
    assert_eq!(rows[2].sentiment, "positive");
    assert_eq!(rows[3].sentiment, "negative");
    for row in &rows {
        assert!(
            row.confidence >= CONFIDENCE_FLOOR,
            "fixture should classify confidently, got {}",
            row.confidence
        );
    }
}

#[test]
fn classify_batch_continues_past_a_mid_batch_fault() {
    let classifier = fixture_classifier();
    let items = vec![
        ("A".to_string(), item("soar")),
        // Punctuation-only title tokenizes to nothing: a classification fault.
        ("A".to_string(), item("???")),
        ("A".to_string(), item("crash")),
    ];

    let rows = classify_batch(&classifier, &items);

    assert_eq!(rows.len(), 3, "a fault must not drop the rest of the batch");
    assert_eq!(rows[0].sentiment, "positive");
    assert_eq!(rows[1].sentiment, "error");
    assert_eq!(rows[1].confidence, 0.0);
    assert_eq!(rows[2].sentiment, "negative");
}

#[test]
fn classify_batch_stamps_rows_with_the_item_observation_time() {
    let classifier = fixture_classifier();
    let fetched = item("soar");
    let observed_at = fetched.observed_at;

    let rows = classify_batch(&classifier, &[("A".to_string(), fetched)]);

    assert_eq!(rows[0].date, observed_at);
}

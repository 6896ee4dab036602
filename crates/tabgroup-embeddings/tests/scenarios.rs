//! End-to-end behavior of the embedding generator.

use proptest::prelude::*;
use std::sync::Arc;
use tabgroup_core::similarity::{cosine_similarity, magnitude};
use tabgroup_embeddings::prelude::*;

#[tokio::test]
async fn near_duplicates_are_closer_than_unrelated_text() {
    let generator = EmbeddingGenerator::new();

    let tech = generator.generate("technology and computers").await.unwrap();
    let tech_systems = generator
        .generate("technology and computer systems")
        .await
        .unwrap();
    let cooking = generator.generate("cooking and recipes").await.unwrap();

    let close = cosine_similarity(&tech, &tech_systems).unwrap();
    let far = cosine_similarity(&tech, &cooking).unwrap();
    assert!(close > 0.5, "near-duplicate similarity was {close}");
    assert!(far < close);
}

#[tokio::test]
async fn empty_text_yields_unit_vector() {
    let generator = EmbeddingGenerator::new();
    let v = generator.generate("").await.unwrap();

    assert_eq!(v.len(), 384);
    assert!(v.iter().all(|x| x.is_finite()));
    assert!((magnitude(&v) - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn lexicon_analyzer_keeps_vectors_normalized() {
    let generator =
        EmbeddingGenerator::new().with_analyzer(Arc::new(LexiconAnalyzer::new()));
    assert_eq!(generator.analyzer_name(), "lexicon");

    let happy = generator
        .generate("Great news from Mozilla: Firefox is fast and wonderful")
        .await
        .unwrap();
    let sad = generator
        .generate("Terrible crash in Firefox, broken and slow")
        .await
        .unwrap();

    assert!((magnitude(&happy) - 1.0).abs() < 1e-6);
    assert!((magnitude(&sad) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(&happy, &sad).unwrap() < 1.0);
}

#[tokio::test]
async fn separate_generators_agree() {
    let a = EmbeddingGenerator::new();
    let b = EmbeddingGenerator::new();
    let text = "Borrow checker errors and how to read them";
    assert_eq!(a.embed(text).await.unwrap(), b.embed(text).await.unwrap());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_text_embeds_to_unit_norm(text in "\\PC{0,200}") {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let generator = EmbeddingGenerator::new();
        let v = rt.block_on(generator.generate(&text)).unwrap();

        prop_assert_eq!(v.len(), 384);
        prop_assert!(v.iter().all(|x| x.is_finite()));
        prop_assert!((magnitude(&v) - 1.0).abs() <= 1e-6);
    }
}

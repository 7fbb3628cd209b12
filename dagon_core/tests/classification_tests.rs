//! Classification against the builtin registry

use dagon_core::{Advisory, AlgorithmRegistry, Classifier};
use dagon_test_utils::fixtures::{
    BCRYPT_SAMPLE, MD5_PASSWORD, MD5CRYPT_SAMPLE, MYSQL_PASSWORD, SHA1_PASSWORD, SHA256_PASSWORD,
};

#[test]
fn test_md5_digest_ranks_md5_first() {
    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify(MD5_PASSWORD, false);

    let likely = ranking.likely_names();
    assert_eq!(likely.first(), Some(&"md5"));
    for name in ["md2", "md4", "md5(md5(pass))", "ntlm"] {
        assert!(likely.contains(&name), "{name} missing from {likely:?}");
    }
    // Plain 32 hex characters never look like a prefixed format
    assert!(!likely.contains(&"postgresql"));
}

#[test]
fn test_equal_specificity_orders_by_code() {
    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify(SHA1_PASSWORD, false);

    let codes: Vec<u32> = ranking.likely().map(|spec| spec.code()).collect();
    let mut sorted = codes.clone();
    sorted.sort_unstable();
    assert_eq!(codes, sorted);
    assert_eq!(codes.first(), Some(&300));
}

#[test]
fn test_unimplemented_shapes_are_reported_not_dropped() {
    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify(SHA1_PASSWORD, false);

    let haval = ranking
        .candidates()
        .iter()
        .find(|candidate| candidate.spec.name() == "haval160")
        .expect("haval160 should be classified");
    assert!(haval.likely);
    assert!(!haval.is_implemented());
    assert!(ranking.implemented_likely().all(|spec| spec.is_implemented()));
}

#[test]
fn test_prefixed_formats() {
    let registry = AlgorithmRegistry::with_builtins();
    let classifier = Classifier::new(&registry);

    assert_eq!(
        classifier.classify(MYSQL_PASSWORD, false).likely_names(),
        vec!["mysql"]
    );
    assert_eq!(
        classifier.classify(BCRYPT_SAMPLE, false).likely_names(),
        vec!["blowfish"]
    );

    let md5crypt = classifier.classify(MD5CRYPT_SAMPLE, false);
    assert_eq!(md5crypt.likely_names(), vec!["md5crypt"]);
    assert_eq!(md5crypt.implemented_likely().count(), 0);
}

#[test]
fn test_all_types_adds_unlikely_tier() {
    let registry = AlgorithmRegistry::with_builtins();
    let classifier = Classifier::new(&registry);

    let narrow = classifier.classify(SHA256_PASSWORD, false);
    let wide = classifier.classify(SHA256_PASSWORD, true);

    assert!(narrow.unlikely_names().is_empty());
    assert_eq!(narrow.likely_names(), wide.likely_names());
    assert!(wide.len() >= narrow.len());
}

#[test]
fn test_unrecognised_digest_is_empty_ranking() {
    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify("not a digest at all!", true);

    assert!(ranking.is_empty());
    assert!(ranking.advisories().is_empty());
}

#[test]
fn test_single_candidate_note() {
    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify(MYSQL_PASSWORD, true);

    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking.advisories(), &[Advisory::SingleCandidate]);

    // Only a request for all types produces the note
    let narrow = Classifier::new(&registry).classify(MYSQL_PASSWORD, false);
    assert!(narrow.advisories().is_empty());
}

#[test]
fn test_ranking_serializes_facets() {
    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify(MD5_PASSWORD, false);

    let json = serde_json::to_value(ranking.candidates()).unwrap();
    let first = &json[0];
    assert_eq!(first["name"], "md5");
    assert_eq!(first["code"], 100);
    assert_eq!(first["likely"], true);
    assert_eq!(first["implemented"], true);
}

//! Property tests for classification and recovery

use dagon_core::{
    AlgorithmRegistry, Classifier, ExhaustionReason, RecoveryEngine, Salt, SaltPlacement,
};
use proptest::prelude::*;

fn placement() -> impl Strategy<Value = SaltPlacement> {
    prop_oneof![Just(SaltPlacement::Prefix), Just(SaltPlacement::Suffix)]
}

fn algorithm() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("md5"),
        Just("sha1"),
        Just("sha256"),
        Just("sha3_256"),
        Just("ripemd160"),
        Just("ntlm"),
    ]
}

proptest! {
    #[test]
    fn test_classification_is_deterministic(digest in "[0-9a-zA-Z$*:{}./+=]{0,80}", all_types: bool) {
        let registry = AlgorithmRegistry::with_builtins();
        let classifier = Classifier::new(&registry);

        let first = classifier.classify(&digest, all_types);
        let second = classifier.classify(&digest, all_types);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_every_likely_candidate_accepts_its_own_digest(
        name in algorithm(),
        plaintext in "[ -~]{0,24}",
    ) {
        let registry = AlgorithmRegistry::with_builtins();
        let digest = registry.get(name).unwrap().hash_bytes(plaintext.as_bytes());
        let ranking = Classifier::new(&registry).classify(&digest, false);

        prop_assert!(ranking.likely_names().contains(&name));
    }

    #[test]
    fn test_salt_round_trip(
        name in algorithm(),
        plaintext in "[a-z0-9]{0,16}",
        salt in "[A-Za-z0-9]{1,12}",
        placement in placement(),
    ) {
        let registry = AlgorithmRegistry::with_builtins();
        let primitive = registry.get(name).unwrap();
        let salt = Salt::new(salt, placement);

        let constructed = primitive.hash_salted(plaintext.as_bytes(), &salt).unwrap();
        let recomputed = primitive.hash_bytes(salt.apply(&plaintext).as_bytes());

        prop_assert_eq!(constructed, recomputed);
    }

    #[test]
    fn test_recovery_soundness(
        name in algorithm(),
        words in prop::collection::vec("[a-z]{1,8}", 1..40),
        pick in any::<prop::sample::Index>(),
        salt in proptest::option::of(("[0-9]{1,6}", placement())),
    ) {
        let registry = AlgorithmRegistry::with_builtins();
        let spec = registry.spec(name).unwrap();
        let salt = salt.map(|(value, placement)| Salt::new(value, placement));

        let k = pick.index(words.len());
        let word = &words[k];
        let primitive = spec.primitive().unwrap();
        let target = match &salt {
            Some(salt) => primitive.hash_salted(word.as_bytes(), salt).unwrap(),
            None => primitive.hash_bytes(word.as_bytes()),
        };

        let outcome = RecoveryEngine::new()
            .recover(&target, spec, &words, salt.as_ref())
            .unwrap();

        let result = outcome.result().unwrap();
        prop_assert_eq!(&result.plaintext, word);
        prop_assert!(result.attempts <= k as u64 + 1);
    }

    #[test]
    fn test_exhaustion_completeness(
        name in algorithm(),
        words in prop::collection::vec("[a-z]{0,8}", 0..60),
    ) {
        let registry = AlgorithmRegistry::with_builtins();
        let spec = registry.spec(name).unwrap();
        // Upper case never appears among the candidates
        let target = spec.primitive().unwrap().hash_bytes(b"NOT-A-CANDIDATE");

        let outcome = RecoveryEngine::new()
            .recover(&target, spec, &words, None)
            .unwrap();

        let failure = outcome.failure().unwrap();
        prop_assert_eq!(failure.reason, ExhaustionReason::Exhausted);
        prop_assert_eq!(failure.attempts, words.len() as u64);
    }

    #[test]
    fn test_resolve_is_pure(code in -100i64..2000) {
        let registry = AlgorithmRegistry::with_builtins();

        let first = registry.resolve(code).map(|spec| spec.name()).map_err(|e| e.to_string());
        let second = registry.resolve(code).map(|spec| spec.name()).map_err(|e| e.to_string());

        prop_assert_eq!(first, second);
    }
}

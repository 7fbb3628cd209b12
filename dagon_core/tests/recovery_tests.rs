//! End-to-end recovery: classify, then search

use dagon_core::error::ValidationError;
use dagon_core::hashing::algorithms::{Blowfish, MySql};
use dagon_core::hashing::{Alphabet, DigestShape};
use dagon_core::{
    AlgorithmRegistry, AlgorithmSpec, CancellationToken, Classifier, Error, ExhaustionReason, Keyspace,
    ParallelRecovery, RecoveryEngine, RecoveryOptions, Salt, SaltPlacement, Wordlist,
};
use dagon_test_utils::fixtures::{COMMON_WORDS, MD5_PASSWORD, NTLM_PASSWORD, SHA256_PASSWORD};
use dagon_test_utils::{RecordingProvider, TargetBuilder, WordlistBuilder};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_md5_scenario() {
    let registry = AlgorithmRegistry::with_builtins();
    let md5 = registry.spec("md5").unwrap();

    let outcome = RecoveryEngine::new()
        .recover(MD5_PASSWORD, md5, ["hello", "password", "test"], None)
        .unwrap();

    let result = outcome.result().unwrap();
    assert_eq!(result.plaintext, "password");
    assert_eq!(result.algorithm, "md5");
    assert_eq!(result.code, 100);
    assert_eq!(result.attempts, 2);
}

#[test]
fn test_uppercase_target_is_canonicalised() {
    let registry = AlgorithmRegistry::with_builtins();
    let md5 = registry.spec("md5").unwrap();
    let shouted = format!("  {}\n", MD5_PASSWORD.to_uppercase());

    let outcome = RecoveryEngine::new()
        .recover(&shouted, md5, COMMON_WORDS, None)
        .unwrap();

    assert_eq!(outcome.result().unwrap().digest, MD5_PASSWORD);
}

#[test]
fn test_classify_then_recover_from_wordlist_file() {
    let file = WordlistBuilder::new()
        .with_filler(50)
        .with_word("password")
        .with_crlf()
        .build()
        .unwrap();

    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify(SHA256_PASSWORD, false);
    let wordlist = Wordlist::open(file.path()).unwrap();

    let outcome = RecoveryEngine::new()
        .recover_ranked(&ranking, wordlist, None)
        .unwrap();

    let result = outcome.result().unwrap();
    assert_eq!(result.plaintext, "password");
    assert_eq!(result.algorithm, "sha256");
}

#[test]
fn test_ranked_recovery_is_word_major() {
    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify(NTLM_PASSWORD, false);
    let trials = ranking.implemented_likely().count() as u64;
    let ntlm_position = ranking
        .implemented_likely()
        .position(|spec| spec.name() == "ntlm")
        .unwrap() as u64;

    let outcome = RecoveryEngine::new()
        .recover_ranked(&ranking, COMMON_WORDS, None)
        .unwrap();

    let result = outcome.result().unwrap();
    assert_eq!(result.algorithm, "ntlm");
    // "password" is the fourth word
    assert_eq!(result.attempts, 3 * trials + ntlm_position + 1);
}

#[test]
fn test_ranked_recovery_needs_an_implemented_candidate() {
    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify("definitely not a digest", false);

    let result = RecoveryEngine::new().recover_ranked(&ranking, COMMON_WORDS, None);
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::InvalidParameter { .. }))
    ));
}

#[test]
fn test_salted_recovery_reports_unsalted_word() {
    let target = TargetBuilder::new("sha1", "letmein")
        .with_salt("NaCl", SaltPlacement::Prefix)
        .build()
        .unwrap();
    let salt = Salt::new("NaCl", SaltPlacement::Prefix);

    let registry = AlgorithmRegistry::with_builtins();
    let sha1 = registry.spec("sha1").unwrap();
    let outcome = RecoveryEngine::new()
        .recover(&target, sha1, COMMON_WORDS, Some(&salt))
        .unwrap();

    assert_eq!(outcome.result().unwrap().plaintext, "letmein");

    // Wrong placement never matches
    let swapped = Salt::new("NaCl", SaltPlacement::Suffix);
    let outcome = RecoveryEngine::new()
        .recover(&target, sha1, COMMON_WORDS, Some(&swapped))
        .unwrap();
    assert_eq!(outcome.failure().unwrap().attempts, COMMON_WORDS.len() as u64);
}

#[test]
fn test_structural_salt_recovery() {
    let target = TargetBuilder::new("postgresql", "dragon")
        .with_salt("postgres", SaltPlacement::Suffix)
        .build()
        .unwrap();
    assert!(target.starts_with("md5"));

    let registry = AlgorithmRegistry::with_builtins();
    let ranking = Classifier::new(&registry).classify(&target, false);
    assert_eq!(ranking.likely_names(), vec!["postgresql"]);

    let salt = Salt::new("postgres", SaltPlacement::Suffix);
    let outcome = RecoveryEngine::new()
        .recover_ranked(&ranking, COMMON_WORDS, Some(&salt))
        .unwrap();
    assert_eq!(outcome.result().unwrap().plaintext, "dragon");
}

#[test]
fn test_embedded_salt_recovery() {
    let registry = AlgorithmRegistry::with_builtins();
    let ssha = registry.get("ssha").unwrap();
    let target = ssha.hash_bytes(b"qwerty");

    let outcome = RecoveryEngine::new()
        .recover(&target, registry.spec("ssha").unwrap(), COMMON_WORDS, None)
        .unwrap();
    assert_eq!(outcome.result().unwrap().plaintext, "qwerty");
}

#[test]
fn test_bruteforce_keyspace() {
    let target = TargetBuilder::new("md4", "cab").build().unwrap();
    let keyspace = Keyspace::new("abc", 1, 3).unwrap();

    let registry = AlgorithmRegistry::with_builtins();
    let outcome = RecoveryEngine::new()
        .recover(&target, registry.spec("md4").unwrap(), &keyspace, None)
        .unwrap();

    let result = outcome.result().unwrap();
    assert_eq!(result.plaintext, "cab");
    // 3 one-letter and 9 two-letter words come first; "cab" is 20th of length three
    assert_eq!(result.attempts, 3 + 9 + 20);
}

#[test]
fn test_exhaustion_counts_every_candidate() {
    let registry = AlgorithmRegistry::with_builtins();
    let keyspace = Keyspace::new("xyz", 1, 4).unwrap();

    let outcome = RecoveryEngine::new()
        .recover(MD5_PASSWORD, registry.spec("md5").unwrap(), &keyspace, None)
        .unwrap();

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.reason, ExhaustionReason::Exhausted);
    assert_eq!(Some(failure.attempts), keyspace.size());
}

#[test]
fn test_cancelled_session() {
    let token = CancellationToken::new();
    token.cancel();
    let engine = RecoveryEngine::new().with_options(RecoveryOptions::new().with_cancellation(token));

    let registry = AlgorithmRegistry::with_builtins();
    let outcome = engine
        .recover(MD5_PASSWORD, registry.spec("md5").unwrap(), COMMON_WORDS, None)
        .unwrap();

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.reason, ExhaustionReason::Cancelled);
    assert_eq!(failure.attempts, 0);
}

#[test]
fn test_timeout_is_distinct_from_exhaustion() {
    let engine =
        RecoveryEngine::new().with_options(RecoveryOptions::new().with_timeout(Duration::ZERO));
    let registry = AlgorithmRegistry::with_builtins();
    let keyspace = Keyspace::new("abcdefghij", 1, 6).unwrap();

    let outcome = engine
        .recover(MD5_PASSWORD, registry.spec("md5").unwrap(), &keyspace, None)
        .unwrap();

    assert_eq!(outcome.failure().unwrap().reason, ExhaustionReason::Timeout);
}

#[test]
fn test_progress_reports_at_interval() {
    let progress = RecordingProvider::new();
    let engine = RecoveryEngine::new()
        .with_options(RecoveryOptions::new().with_progress_interval(10))
        .with_progress(Arc::new(progress.clone()));

    let registry = AlgorithmRegistry::with_builtins();
    let keyspace = Keyspace::new("abcde", 2, 2).unwrap();
    engine
        .recover(MD5_PASSWORD, registry.spec("md5").unwrap(), &keyspace, None)
        .unwrap();

    assert_eq!(progress.attempt_counts(), vec![10, 20]);
    assert_eq!(progress.completions(), 1);
}

#[test]
fn test_parallel_recovery_over_wordlist() {
    let file = WordlistBuilder::new()
        .with_filler(500)
        .with_word("password")
        .with_filler(500)
        .build()
        .unwrap();
    let words = Wordlist::open(file.path()).unwrap().read_all().unwrap();

    let registry = AlgorithmRegistry::with_builtins();
    let md5 = registry.spec("md5").unwrap();
    let outcome = ParallelRecovery::new(RecoveryEngine::new(), 4)
        .unwrap()
        .recover(MD5_PASSWORD, md5, &words, None)
        .unwrap();

    let result = outcome.result().unwrap();
    assert_eq!(result.plaintext, "password");
    assert_eq!(result.attempts, 501);
}

#[test]
fn test_missing_wordlist_keeps_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("rockyou.txt");

    let error = match Wordlist::open(&missing) {
        Err(Error::Io(error)) => error,
        other => panic!("expected an I/O error, got {:?}", other.map(|_| ())),
    };
    assert!(error.to_string().contains("rockyou.txt"));
}

#[test]
fn test_wordlist_bytes_reach_the_primitive_unchanged() {
    let registry = AlgorithmRegistry::with_builtins();
    let md5 = registry.spec("md5").unwrap();
    let target = registry.get("md5").unwrap().hash_bytes(b"caf\xe9");
    let wordlist = Wordlist::from_reader(&b"hello\ncaf\xe9\n"[..]);

    let outcome = RecoveryEngine::new().recover(&target, md5, wordlist, None).unwrap();

    let result = outcome.result().unwrap();
    assert_eq!(result.attempts, 2);
    assert_eq!(result.plaintext_hex.as_deref(), Some("636166e9"));
}

#[test]
fn test_cancellation_while_drawing_candidates() {
    let token = CancellationToken::new();
    let engine = RecoveryEngine::new().with_options(
        RecoveryOptions::new()
            .with_cancellation(token.clone())
            .with_progress_interval(0),
    );
    let registry = AlgorithmRegistry::with_builtins();
    let md5 = registry.spec("md5").unwrap();

    // cancelled as the sixth word is drawn, before it is hashed
    let words = (0..).map(|i| {
        if i == 5 {
            token.cancel();
        }
        if i == 10 { "password".to_string() } else { format!("word{i}") }
    });

    let outcome = engine.recover(MD5_PASSWORD, md5, words, None).unwrap();

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.reason, ExhaustionReason::Cancelled);
    assert_eq!(failure.attempts, 5);
}

#[test]
fn test_losing_shards_stop_after_a_match() {
    let shard_len = 200_000;
    let mut words: Vec<String> = (0..2 * shard_len).map(|i| format!("filler{i}")).collect();
    words[0] = "password".to_string();

    let progress = RecordingProvider::new();
    let engine = RecoveryEngine::new()
        .with_options(RecoveryOptions::new().with_progress_interval(1_000))
        .with_progress(Arc::new(progress.clone()));
    let registry = AlgorithmRegistry::with_builtins();
    let md5 = registry.spec("md5").unwrap();

    let outcome = ParallelRecovery::new(engine, 2)
        .unwrap()
        .recover(MD5_PASSWORD, md5, &words, None)
        .unwrap();
    assert_eq!(outcome.result().unwrap().attempts, 1);

    let reached = progress
        .attempt_counts_for("shard 1")
        .into_iter()
        .max()
        .unwrap_or(0);
    assert!(
        reached < shard_len as u64 / 2,
        "losing shard kept going to {reached} attempts"
    );
}

#[test]
fn test_ranked_recovery_skips_algorithms_that_cannot_read_the_digest() {
    const BCRYPT_LIKE: DigestShape = DigestShape::encoded(Alphabet::Crypt, 53, 53)
        .with_prefixes(&["$2a$"])
        .with_cost_field();

    let mut registry = AlgorithmRegistry::new();
    registry
        .register(AlgorithmSpec::implemented(500, "blowfish", BCRYPT_LIKE, Blowfish::with_cost(4)))
        .unwrap();
    registry
        .register(AlgorithmSpec::implemented(510, "mysql", BCRYPT_LIKE, MySql))
        .unwrap();

    // well formed, but a cost of 99 is outside what bcrypt accepts
    let digest = "$2a$99$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";
    let ranking = Classifier::new(&registry).classify(digest, false);
    assert_eq!(ranking.likely_names().len(), 2);

    let outcome = RecoveryEngine::new()
        .recover_ranked(&ranking, COMMON_WORDS, None)
        .unwrap();

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.reason, ExhaustionReason::Exhausted);
    assert_eq!(failure.attempts, COMMON_WORDS.len() as u64);
}

#[test]
fn test_malformed_bcrypt_digest_is_a_user_error() {
    let registry = AlgorithmRegistry::with_builtins();
    let digest = format!("$2a${}", "a".repeat(56));
    let ranking = Classifier::new(&registry).classify(&digest, true);
    assert!(!ranking.likely_names().contains(&"blowfish"));

    let error = RecoveryEngine::new()
        .recover_ranked(&ranking, COMMON_WORDS, None)
        .unwrap_err();
    assert!(error.is_user_error());

    let blowfish = registry.spec("blowfish").unwrap();
    let error = RecoveryEngine::new()
        .recover(&digest, blowfish, COMMON_WORDS, None)
        .unwrap_err();
    assert!(matches!(
        error,
        Error::Validation(ValidationError::InvalidParameter { .. })
    ));
}

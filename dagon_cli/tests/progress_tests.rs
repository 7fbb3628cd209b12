use dagon_cli::progress::{ProgressSession, create_progress_infrastructure};
use dagon_core::progress::ProgressUpdate;
use dagon_core::{AlgorithmRegistry, RecoveryEngine, RecoveryOptions};
use dagon_test_utils::fixtures::MD5_PASSWORD;

fn words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("word{i}")).collect()
}

#[test]
fn test_engine_reports_through_channel() {
    let registry = AlgorithmRegistry::with_builtins();
    let md5 = registry.spec("md5").unwrap();
    let (provider, rx) = create_progress_infrastructure();

    let engine = RecoveryEngine::new()
        .with_options(RecoveryOptions::new().with_progress_interval(5))
        .with_progress(provider);
    let outcome = engine.recover(MD5_PASSWORD, md5, words(12), None).unwrap();
    assert!(!outcome.is_found());
    drop(engine);

    let counts: Vec<u64> = rx
        .iter()
        .filter_map(|update| match update {
            ProgressUpdate::Attempts { attempts, .. } => Some(attempts),
            ProgressUpdate::Status { .. } => None,
        })
        .collect();
    assert_eq!(counts, vec![5, 10]);
}

#[test]
fn test_enabled_session_finishes_after_recovery() {
    let registry = AlgorithmRegistry::with_builtins();
    let md5 = registry.spec("md5").unwrap();
    let session = ProgressSession::start(true);

    let engine = RecoveryEngine::new()
        .with_options(RecoveryOptions::new().with_progress_interval(1))
        .with_progress(session.provider());
    let mut candidates = words(20);
    candidates.push("password".to_string());

    let outcome = engine.recover(MD5_PASSWORD, md5, &candidates, None).unwrap();
    assert_eq!(outcome.attempts(), 21);

    // the renderer thread exits once the channel closes
    session.finish();
}

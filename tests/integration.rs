//! Library-level tests against the public API.

use reqmatrix::analyzer::criteria::{evaluate_clarity, evaluate_completeness, evaluate_correctness};
use reqmatrix::analyzer::{
    AnalysisEngine, Lexicon, MatchMode, SubstringLexicon, Vocabulary, WordBoundaryLexicon,
};
use reqmatrix::parser::parse_requirements;
use reqmatrix::{
    analyze_file, generate_validation_matrix, Category, Criterion, FindingKind, Verdict,
};
use std::fs;
use std::path::Path;

const EXAMPLE: &str = "[Functional] The system shall allow login\n\
                       [Functional] The system must ensure fast performance\n\
                       [Non-Functional] The system shall respond within 2 seconds\n";

#[test]
fn example_end_to_end() {
    let parsed = parse_requirements(EXAMPLE);
    assert_eq!(parsed.functional.len(), 2);
    assert_eq!(parsed.non_functional.len(), 1);

    let matrix = generate_validation_matrix(EXAMPLE);
    assert_eq!(matrix.get(Criterion::Correctness, Category::Functional), Verdict::Fair);
    assert_eq!(matrix.get(Criterion::Completeness, Category::NonFunctional), Verdict::Good);
}

#[test]
fn lexical_predicates_on_reference_statements() {
    let lex = SubstringLexicon::default();
    let stmt = "The system shall respond within 2 seconds";
    assert!(lex.has_action(stmt));
    assert!(lex.has_measurable(stmt));
    assert!(lex.has_ambiguity("The system shall be robust"));
}

#[test]
fn empty_buckets_score_poor_correctness() {
    let only_functional = generate_validation_matrix("[Functional] The system shall allow login\n");
    assert_eq!(
        only_functional.get(Criterion::Correctness, Category::NonFunctional),
        Verdict::Poor
    );
    assert_eq!(
        only_functional.get(Criterion::Completeness, Category::NonFunctional),
        Verdict::Good
    );

    let only_nfr = generate_validation_matrix("[Non-Functional] Respond within 2 seconds always\n");
    assert_eq!(
        only_nfr.get(Criterion::Correctness, Category::Functional),
        Verdict::Poor
    );
}

#[test]
fn completeness_two_missing_is_fair_four_is_poor() {
    let lex = SubstringLexicon::default();
    // each statement lacks both an action and a measurable value
    let two = ["Pages load"];
    assert_eq!(evaluate_completeness(&two, true, &lex), Verdict::Fair);

    let three = ["Login", "Logout", "Profile page"];
    assert_eq!(evaluate_completeness(&three, false, &lex), Verdict::Fair);

    let four = ["Login", "Logout", "Profile page", "Settings"];
    assert_eq!(evaluate_completeness(&four, false, &lex), Verdict::Poor);
}

#[test]
fn correctness_fifty_percent_is_fair() {
    let lex = SubstringLexicon::default();
    let bucket = [
        "The system shall be robust",
        "The system shall log every request",
    ];
    assert_eq!(evaluate_correctness(&bucket, &lex), Verdict::Fair);
    let empty: [&str; 0] = [];
    assert_eq!(evaluate_correctness(&empty, &lex), Verdict::Poor);
}

#[test]
fn clarity_short_and_ambiguous_counts_once() {
    let lex = SubstringLexicon::default();
    assert_eq!(evaluate_clarity(&["Be fast"], &lex), Verdict::Sufficient);
    assert_eq!(
        evaluate_clarity(&["The system shall log every failed login attempt"], &lex),
        Verdict::Good
    );
}

#[test]
fn word_matches_are_subset_of_substring_matches() {
    let substring = SubstringLexicon::default();
    let word = WordBoundaryLexicon::new(Vocabulary::default()).unwrap();
    for stmt in [
        "Serve breakfast",
        "Notify William",
        "List items",
        "The system must be fast",
        "Handle 10 requests",
    ] {
        if word.has_ambiguity(stmt) {
            assert!(substring.has_ambiguity(stmt), "{stmt}");
        }
        if word.has_action(stmt) {
            assert!(substring.has_action(stmt), "{stmt}");
        }
        if word.has_measurable(stmt) {
            assert!(substring.has_measurable(stmt), "{stmt}");
        }
    }
    assert!(substring.has_ambiguity("Serve breakfast"));
    assert!(!word.has_ambiguity("Serve breakfast"));
}

#[test]
fn injected_vocabulary_changes_verdicts() {
    let vocab = Vocabulary::empty()
        .with_action_verbs(["deberá"])
        .with_ambiguous_terms(["rápido"])
        .with_measurable_markers(["segundos"]);
    let engine = AnalysisEngine::new().with_lexicon(MatchMode::Substring.build(vocab).unwrap());
    let matrix = engine.generate_matrix(
        "[Functional] El sistema deberá registrar a cada usuario nuevo\n\
         [Non-Functional] El sistema deberá responder en pocos segundos siempre\n",
    );
    assert_eq!(matrix.get(Criterion::Completeness, Category::Functional), Verdict::Good);
    assert_eq!(matrix.get(Criterion::Completeness, Category::NonFunctional), Verdict::Good);
    assert_eq!(matrix.get(Criterion::Correctness, Category::Functional), Verdict::Excellent);
}

#[test]
fn analyze_file_uses_config_in_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(
        dir.path().join(".reqmatrixrc.json"),
        r#"{ "matching": "word", "findings": { "too-few-words": "off" } }"#,
    )
    .unwrap();
    let file = dir.path().join("menu.req");
    fs::write(
        &file,
        "[Functional] The system shall print the breakfast menu every morning\n[Functional] Login\n",
    )
    .unwrap();

    let result = analyze_file(&file, dir.path(), None).unwrap();
    // "breakfast" no longer trips "fast", "Login" has no action verb
    assert_eq!(
        result.matrix.get(Criterion::Correctness, Category::Functional),
        Verdict::Excellent
    );
    assert_eq!(
        result.matrix.get(Criterion::Completeness, Category::Functional),
        Verdict::Sufficient
    );
    assert!(result
        .findings
        .iter()
        .all(|f| f.kind != FindingKind::TooFewWords));
    assert!(result
        .findings
        .iter()
        .any(|f| f.kind == FindingKind::MissingActionVerb && f.line == 2));
}

#[test]
fn analyze_file_reports_missing_file() {
    let err = analyze_file(Path::new("tests/fixtures/missing.req"), Path::new("tests/fixtures"), None)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read requirements file"));
}

#[test]
fn aggregate_over_fixtures() {
    let engine = AnalysisEngine::new();
    let results: Vec<_> = ["tests/fixtures/login.req", "tests/fixtures/strong.req"]
        .iter()
        .map(|p| engine.analyze(Path::new(p), None).unwrap())
        .collect();
    let stats = AnalysisEngine::aggregate_stats(&results);
    assert_eq!(stats.files_analyzed, 2);
    assert_eq!(stats.functional, 4);
    assert_eq!(stats.non_functional, 3);
    assert_eq!(stats.worst_verdict, Some(Verdict::Fair));
}

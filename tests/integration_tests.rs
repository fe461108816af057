//! 통합 테스트 - 학습, 저장/로드, 감지 전체 흐름

use std::fs;
use std::sync::Arc;

use langid::config::LangIdConfig;
use langid::training::{load_dataset, train_and_evaluate};
use langid::{
    compute_stats, evaluate_against_labels, load_model, parse_labeled_sections, save_model,
    LanguageDetector, ModelKind, TrainedModel,
};

const CSV: &str = "\
text,language,source
the quick brown fox jumps over the lazy dog,English,a
hello world this is a simple sentence,English,a
the weather is nice and the sun is warm,English,b
we read books in the library every day,English,b
быстрая коричневая лиса прыгает через собаку,Russian,a
привет мир это простое предложение,Russian,a
погода хорошая и солнце тёплое,Russian,b
мы читаем книги в библиотеке каждый день,Russian,b
빠른 갈색 여우가 게으른 개를 뛰어넘는다,Korean,a
안녕하세요 세계 이것은 간단한 문장입니다,Korean,a
날씨가 좋고 햇볕이 따뜻합니다,Korean,b
우리는 매일 도서관에서 책을 읽습니다,Korean,b
η γρήγορη καφέ αλεπού πηδάει πάνω από τον σκύλο,Greek,a
γεια σου κόσμε αυτή είναι μια απλή πρόταση,Greek,a
ο καιρός είναι ωραίος και ο ήλιος ζεστός,Greek,b
διαβάζουμε βιβλία στη βιβλιοθήκη κάθε μέρα,Greek,b
";

fn config(kind: ModelKind) -> LangIdConfig {
    let mut config = LangIdConfig {
        model_kind: kind,
        test_size: 0.25,
        ..LangIdConfig::default()
    };
    config.vectorizer.min_df = 1;
    config
}

fn train(kind: ModelKind) -> TrainedModel {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("train.csv");
    fs::write(&csv_path, CSV).unwrap();

    let dataset = load_dataset(&csv_path).unwrap();
    assert_eq!(dataset.len(), 16);
    let (model, report) = train_and_evaluate(&dataset, &config(kind)).unwrap();
    assert_eq!(report.train_size, 12);
    assert_eq!(report.test_size, 4);
    model
}

fn detector() -> LanguageDetector {
    LanguageDetector::from_model(train(ModelKind::Logistic))
}

#[test]
fn test_labels_are_sorted() {
    let detector = detector();
    assert_eq!(
        detector.labels().as_slice(),
        &["English", "Greek", "Korean", "Russian"]
    );
}

#[test]
fn test_classify_each_script() {
    for kind in [ModelKind::Logistic, ModelKind::NaiveBayes] {
        let model = train(kind);
        let cases = [
            ("the sun is nice", "English"),
            ("мир и солнце", "Russian"),
            ("안녕하세요 세계", "Korean"),
            ("ο ήλιος και ο κόσμος", "Greek"),
        ];
        for (text, expected) in cases {
            let result = model.classify(text);
            assert_eq!(result.language.as_deref(), Some(expected), "{kind}: {text}");
        }
    }
}

#[test]
fn test_classify_is_deterministic() {
    let model = train(ModelKind::Logistic);
    let again = train(ModelKind::Logistic);
    for text in ["hello", "привет", "안녕", "γεια", "12345 ???"] {
        assert_eq!(model.classify(text), model.classify(text));
        assert_eq!(model.classify(text), again.classify(text));
    }
}

#[test]
fn test_distribution_sums_to_one() {
    let detector = detector();
    for text in ["hello world", "x", "мир", "1 2 3", "🙂"] {
        let result = detector.analyze_word(text);
        let dist = result.distribution.as_ref().unwrap();
        assert_eq!(dist.len(), 4);
        let sum: f64 = dist.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-6, "{text}: {sum}");
        assert!(dist.iter().all(|(_, p)| (0.0..=1.0).contains(p)));

        let max = dist.iter().map(|(_, p)| *p).fold(f64::MIN, f64::max);
        assert_eq!(result.confidence, max);
        assert_eq!(result.probability(result.language.as_deref().unwrap()), Some(max));
    }
}

#[test]
fn test_empty_input_sentinel() {
    let detector = detector();
    for text in ["", "   ", "\n\n"] {
        let analysis = detector.analyze_text(text, true);
        assert!(analysis.result.language.is_none());
        assert_eq!(analysis.result.confidence, 0.0);
        assert!(analysis.result.distribution.is_none());
    }
    assert!(detector.analyze_page("", true).line_breakdown.is_empty());
}

#[test]
fn test_page_aggregation() {
    let detector = detector();
    let text = "hello world\nпривет мир\n\n안녕하세요 세계\nthe weather is nice\n";
    let page = detector.analyze_page(text, false);

    assert_eq!(page.line_breakdown.len(), 4);
    assert_eq!(page.overall.stats.lines, 6);
    assert_eq!(page.languages_present, vec!["English", "Russian", "Korean"]);

    let total: usize = page.language_distribution.iter().map(|(_, n)| n).sum();
    assert_eq!(total, page.line_breakdown.len());
    assert_eq!(page.language_distribution[0], ("English".to_string(), 2));

    let numbers: Vec<usize> = page.line_breakdown.iter().map(|l| l.line_number).collect();
    assert_eq!(numbers, vec![1, 2, 4, 5]);
}

#[test]
fn test_save_and_load_reproduces_predictions() {
    let model = train(ModelKind::NaiveBayes);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("language_detector.json");

    save_model(&model, &path).unwrap();
    let loaded = load_model(&path).unwrap();
    assert_eq!(loaded.kind(), ModelKind::NaiveBayes);

    for text in ["hello", "мир", "세계", "κόσμε", "mixed мир text"] {
        assert_eq!(loaded.classify(text), model.classify(text));
    }

    let detector = LanguageDetector::load(&path).unwrap();
    assert_eq!(detector.labels(), model.labels());
}

#[test]
fn test_load_missing_model_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(LanguageDetector::load(dir.path().join("none.json")).is_err());
}

#[test]
fn test_concurrent_readers_share_detector() {
    let detector = Arc::new(detector());
    let expected = detector.analyze_text("привет мир", true);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let detector = Arc::clone(&detector);
            let expected = &expected;
            scope.spawn(move || {
                for _ in 0..10 {
                    assert_eq!(&detector.analyze_text("привет мир", true), expected);
                }
            });
        }
    });
}

#[test]
fn test_sections_end_to_end() {
    let detector = detector();
    let text = "\
Russian (русский): мир (world), привет (hello)
Korean (한국어): 세계 (world), 안녕하세요 (hello)

Greek: κόσμε, ήλιος
";
    let sections = parse_labeled_sections(text);
    assert_eq!(sections.labels().collect::<Vec<_>>(), vec!["Russian", "Korean", "Greek"]);

    let analysis = detector.analyze_sections(&sections);
    assert_eq!(analysis.detections.len(), 6);

    let eval = evaluate_against_labels(&analysis.detections);
    assert_eq!(eval.total_words, 6);
    assert_eq!(eval.matched_count, 6);
    assert_eq!(eval.detected_language_counts.values().sum::<usize>(), 6);
}

#[test]
fn test_stats_scenario() {
    let stats = compute_stats("Hello, this is a test! 123");
    assert_eq!(stats.total_characters, 26);
    assert_eq!(stats.characters_no_spaces, 21);
    assert_eq!(stats.letters, 16);
    assert_eq!(stats.words, 6);
    assert_eq!(stats.spaces, 5);
    assert_eq!(stats.lines, 1);

    let empty = compute_stats("");
    assert_eq!(empty.lines, 1);
    assert_eq!(empty.total_characters, 0);
    assert_eq!(empty.words, 0);
}

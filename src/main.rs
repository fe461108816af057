//! langid - 다국어 텍스트 언어 감지 CLI

use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use langid::classifier::{ClassificationResult, ModelKind};
use langid::config::{load_config, LangIdConfig};
use langid::detection::{
    evaluate_against_labels, parse_labeled_sections, InputKind, LanguageDetector, PageAnalysis,
    SectionAnalysis, TextAnalysis, WordDetection,
};
use langid::model::save_model;
use langid::text::{compute_stats, TextStats};
use langid::training::{load_dataset, train_and_evaluate, EvaluationReport};

type CliResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// 확률 목록에서 보여줄 최소 확률
const MIN_SHOWN_PROBABILITY: f64 = 0.001;
/// 확률 목록 최대 개수
const TOP_PROBABILITIES: usize = 10;
/// 줄별 미리보기 최대 글자 수
const PREVIEW_CHARS: usize = 60;

fn main() {
    // 로깅 초기화 (error/warn만 출력, RUST_LOG로 변경 가능)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default)]
struct CliOptions {
    command: String,
    input: Option<String>,
    model_path: Option<PathBuf>,
    kind: Option<ModelKind>,
    probabilities: bool,
    json: bool,
}

fn help_text() -> String {
    "\
사용법: langid <명령> [인자] [옵션]

명령:
  train <CSV>             CSV(text,language 열)로 모델 학습 후 저장
  analyze <입력>          텍스트 전체의 언어 감지 + 통계
  page <입력>             줄 단위 언어 감지
  word <단어>             단어 하나의 언어 감지 (확률 포함)
  words \"<w1, w2 (뜻)>\"   쉼표로 구분된 단어 목록 감지
  sections <입력>         'Label: word, word' 형식 용어집 감지
  stats <입력>            텍스트 통계 (모델 불필요)
  repl                    대화형 모드

입력: 텍스트 그대로, file:PATH, 또는 - (표준 입력)

옵션:
  --model PATH            모델 파일 경로 (기본값: 설정 파일의 model_path)
  --kind KIND             train 분류기 종류: logistic | naive_bayes
  --probs                 전체 확률 분포 출력
  --json                  JSON으로 출력
  -h, --help              도움말"
        .to_string()
}

fn parse_args(args: Vec<String>) -> CliResult<CliOptions> {
    let mut options = CliOptions::default();
    let mut positional = Vec::new();

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                options.command = "help".to_string();
                return Ok(options);
            }
            "--model" => {
                idx += 1;
                let value = args.get(idx).ok_or("--model 값이 필요합니다")?;
                options.model_path = Some(PathBuf::from(value));
            }
            "--kind" => {
                idx += 1;
                let value = args.get(idx).ok_or("--kind 값이 필요합니다")?;
                options.kind = Some(value.parse::<ModelKind>()?);
            }
            "--probs" => options.probabilities = true,
            "--json" => options.json = true,
            other if other.starts_with("--") => {
                return Err(format!("알 수 없는 옵션: {other}\n\n{}", help_text()).into());
            }
            value => positional.push(value.to_string()),
        }
        idx += 1;
    }

    let mut positional = positional.into_iter();
    options.command = positional.next().unwrap_or_else(|| "help".to_string());
    options.input = positional.next();
    if let Some(extra) = positional.next() {
        return Err(format!("인자가 너무 많습니다: {extra}").into());
    }
    Ok(options)
}

fn run() -> CliResult<()> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let config = load_config();

    match options.command.as_str() {
        "help" => println!("{}", help_text()),
        "train" => cmd_train(&options, config)?,
        "stats" => {
            let text = read_input(options.input.as_deref())?;
            let stats = compute_stats(&text);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
        }
        "analyze" | "page" | "word" | "words" | "sections" | "repl" => {
            let model_path = options.model_path.clone().unwrap_or(config.model_path);
            let detector = LanguageDetector::load(&model_path)?;
            if options.command == "repl" {
                return run_repl(&detector);
            }
            cmd_detect(&detector, &options)?;
        }
        other => return Err(format!("알 수 없는 명령: {other}\n\n{}", help_text()).into()),
    }
    Ok(())
}

/// 텍스트 입력 해석: `file:PATH`, `-` (표준 입력), 그 밖에는 그대로
fn read_input(input: Option<&str>) -> CliResult<String> {
    match input {
        None => Err("입력이 필요합니다".into()),
        Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(value) => match value.strip_prefix("file:") {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => Ok(value.to_string()),
        },
    }
}

fn cmd_train(options: &CliOptions, mut config: LangIdConfig) -> CliResult<()> {
    let csv_path = options.input.as_deref().ok_or("학습용 CSV 경로가 필요합니다")?;
    if let Some(kind) = options.kind {
        config.model_kind = kind;
    }
    let model_path = options.model_path.clone().unwrap_or_else(|| config.model_path.clone());

    let dataset = load_dataset(csv_path)?;
    let (model, report) = train_and_evaluate(&dataset, &config)?;
    save_model(&model, &model_path)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        println!("\n모델 저장: {}", model_path.display());
    }
    Ok(())
}

fn cmd_detect(detector: &LanguageDetector, options: &CliOptions) -> CliResult<()> {
    let input = read_input(options.input.as_deref())?;

    match options.command.as_str() {
        "analyze" => {
            let analysis = detector.analyze_text(&input, options.probabilities);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_text_analysis(&analysis);
            }
        }
        "page" => {
            let page = detector.analyze_page(&input, options.probabilities);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_page(&page);
            }
        }
        "word" => {
            let result = detector.analyze_word(&input);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
                print_probabilities(&result);
            }
        }
        "words" => {
            let words = detector.detect_multiple_words(&input);
            if options.json {
                println!("{}", serde_json::to_string_pretty(&words)?);
            } else {
                print_words(&words, options.probabilities);
            }
        }
        "sections" => {
            let analysis = detector.analyze_sections(&parse_labeled_sections(&input));
            if options.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_sections(&analysis);
            }
        }
        other => return Err(format!("알 수 없는 명령: {other}").into()),
    }
    Ok(())
}

fn run_repl(detector: &LanguageDetector) -> CliResult<()> {
    println!("지원 언어 {}개: {}", detector.labels().len(), detector.labels().as_slice().join(", "));
    println!("텍스트를 입력하세요. 'help' 도움말, 'quit' 종료");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut probabilities = false;

    loop {
        print!("\n> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();

        match input.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" => {
                println!("  quit | exit   종료");
                println!("  prob          확률 분포 표시 전환 (현재: {})", on_off(probabilities));
                println!("  multi         여러 줄 입력 (빈 줄로 끝냄)");
                println!("  word1, word2  단어 목록 감지");
                continue;
            }
            "prob" => {
                probabilities = !probabilities;
                println!("확률 표시: {}", on_off(probabilities));
                continue;
            }
            "multi" => {
                println!("여러 줄을 입력하세요 (빈 줄로 끝냄):");
                let mut buffer = Vec::new();
                for line in lines.by_ref() {
                    let line = line?;
                    if line.trim().is_empty() {
                        if buffer.is_empty() {
                            continue;
                        }
                        break;
                    }
                    buffer.push(line);
                }
                let text = buffer.join("\n");
                match InputKind::detect(&text) {
                    InputKind::Formatted => {
                        let analysis = detector.analyze_sections(&parse_labeled_sections(&text));
                        print_sections(&analysis);
                    }
                    _ => print_page(&detector.analyze_page(&text, probabilities)),
                }
                continue;
            }
            _ => {}
        }

        match InputKind::detect(input) {
            InputKind::WordList => print_words(&detector.detect_multiple_words(input), probabilities),
            _ => print_text_analysis(&detector.analyze_text(input, probabilities)),
        }
    }

    println!("종료합니다.");
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "켜짐"
    } else {
        "꺼짐"
    }
}

fn language_name(result: &ClassificationResult) -> &str {
    result.language.as_deref().unwrap_or("(없음)")
}

fn print_result(result: &ClassificationResult) {
    println!(
        "언어: {} (신뢰도 {:.4}, {:.2}%)",
        language_name(result),
        result.confidence,
        result.confidence * 100.0
    );
}

fn print_probabilities(result: &ClassificationResult) {
    let top = result.top(TOP_PROBABILITIES);
    if top.is_empty() {
        return;
    }
    println!("확률 분포:");
    for (lang, p) in top.into_iter().filter(|(_, p)| *p > MIN_SHOWN_PROBABILITY) {
        println!("  • {lang}: {p:.4} ({:.2}%)", p * 100.0);
    }
}

fn print_stats(stats: &TextStats) {
    println!("통계:");
    println!("  • 전체 문자: {}", stats.total_characters);
    println!("  • 공백 제외 문자: {}", stats.characters_no_spaces);
    println!("  • 글자: {}", stats.letters);
    println!("  • 단어: {}", stats.words);
    println!("  • 공백: {}", stats.spaces);
    println!("  • 줄: {}", stats.lines);
}

fn print_text_analysis(analysis: &TextAnalysis) {
    print_result(&analysis.result);
    print_stats(&analysis.stats);
    print_probabilities(&analysis.result);
}

fn print_page(page: &PageAnalysis) {
    print!("전체 ");
    print_text_analysis(&page.overall);
    if !page.languages_present.is_empty() {
        println!("감지된 언어: {}", page.languages_present.join(", "));
    }

    for line in &page.line_breakdown {
        let preview: String = line.text.chars().take(PREVIEW_CHARS).collect();
        let ellipsis = if line.text.chars().count() > PREVIEW_CHARS { "..." } else { "" };
        println!("\n{}번째 줄: {preview}{ellipsis}", line.line_number);
        println!(
            "  언어: {} (신뢰도 {:.4})",
            language_name(&line.result),
            line.result.confidence
        );
        println!(
            "  글자 {}, 단어 {}, 문자 {}",
            line.letter_count, line.word_count, line.character_count
        );
    }
}

fn print_words(words: &[WordDetection], probabilities: bool) {
    for detection in words {
        println!(
            "{:<20} → {} ({:.4})",
            detection.word,
            language_name(&detection.result),
            detection.result.confidence
        );
        if probabilities {
            print_probabilities(&detection.result);
        }
    }
}

fn print_sections(analysis: &SectionAnalysis) {
    for section in &analysis.sections {
        println!("\n[{}]", section.label);
        print_words(&section.words, false);
    }

    let eval = evaluate_against_labels(&analysis.detections);
    println!("\n요약 (근사치):");
    println!("  • 단어 수: {}", eval.total_words);
    println!("  • 레이블 일치: {}", eval.matched_count);
    println!("  • 고신뢰 감지: {}", eval.high_confidence_count);
    for (lang, count) in &eval.detected_language_counts {
        println!("  • {lang}: {count}");
    }
}

fn print_report(report: &EvaluationReport) {
    println!("학습 샘플: {}, 평가 샘플: {}", report.train_size, report.test_size);
    println!("정확도: {:.4}", report.accuracy);
    println!(
        "\n{:<20} {:>9} {:>9} {:>9} {:>8}",
        "language", "precision", "recall", "f1", "support"
    );
    for class in &report.per_class {
        println!(
            "{:<20} {:>9.4} {:>9.4} {:>9.4} {:>8}",
            class.language, class.precision, class.recall, class.f1, class.support
        );
    }
}

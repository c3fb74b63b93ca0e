//! 集成测试
//!
//! 模式判定、安全扫描与输出格式化的完整流程

use pretty_assertions::assert_eq;
use shellmate::commands::OutputFormat;
use shellmate::mode::{Mode, ModeSelection, detect_auto_mode};
use shellmate::output::{FormatRequest, extract_fix_sections, format_output};
use shellmate::safety::{SafetyLevel, detect_safety, has_high_risk};

const FIX_RESPONSE: &str = "# Possible causes\n- Missing file\n\n# Diagnostics\n```sh\nls -la\n```\n\n# Fixes\n```sh\nmkdir data\n```";

fn render(content: &str, mode: Mode, format: OutputFormat) -> String {
    let warnings = detect_safety(content);
    format_output(&FormatRequest {
        content,
        warnings: &warnings,
        blocked: false,
        mode,
        format,
    })
    .unwrap()
}

/// stdin 输入一律判定为 fix
#[test]
fn test_stdin_always_fix() {
    for input in ["find recent pdf files", "ls -la", "", "hello"] {
        assert_eq!(detect_auto_mode(input, true), Mode::Fix, "input {:?}", input);
    }
}

#[test]
fn test_auto_mode_examples() {
    assert_eq!(detect_auto_mode("command not found: foo", false), Mode::Fix);
    assert_eq!(detect_auto_mode("tar -xzvf file.tar.gz", false), Mode::Explain);
    assert_eq!(detect_auto_mode("find recent pdf files", false), Mode::Generate);
}

#[test]
fn test_forced_mode_skips_detection() {
    let selection: ModeSelection = "refactor".parse().unwrap();
    assert_eq!(selection.resolve("Traceback (most recent call last)", true), Mode::Refactor);
    let auto: ModeSelection = "AUTO".parse().unwrap();
    assert_eq!(auto.resolve("ls -la", false), Mode::Explain);
}

#[test]
fn test_safety_levels() {
    let warnings = detect_safety("rm -rf ./tmp");
    assert!(!warnings.is_empty());
    assert_eq!(warnings[0].level, SafetyLevel::High);
    assert!(has_high_risk(&warnings));

    let chmod = detect_safety("chmod -R 777 /tmp/data");
    assert!(chmod.iter().any(|w| w.level == SafetyLevel::High));
    assert!(chmod.iter().any(|w| w.level == SafetyLevel::Medium));

    assert!(detect_safety("ls -la").is_empty());
}

/// generate 模式 JSON 输出提取 fenced block 中的命令
#[test]
fn test_generate_json_items() {
    let output = render("```sh\nls -la\n```", Mode::Generate, OutputFormat::Json);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["items"][0]["command"], "ls -la");
    assert_eq!(json["mode"], "generate");
    assert_eq!(json["blocked"], false);
    assert_eq!(json["warnings"], serde_json::json!([]));
}

#[test]
fn test_json_key_order_is_stable() {
    let output = render("```sh\nls -la\n```", Mode::Generate, OutputFormat::Json);
    let mode_at = output.find("\"mode\"").unwrap();
    let blocked_at = output.find("\"blocked\"").unwrap();
    let warnings_at = output.find("\"warnings\"").unwrap();
    let items_at = output.find("\"items\"").unwrap();
    assert!(mode_at < blocked_at && blocked_at < warnings_at && warnings_at < items_at);
}

#[test]
fn test_fix_json_sections() {
    let output = render(FIX_RESPONSE, Mode::Fix, OutputFormat::Json);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["fix"]["causes"][0], "Missing file");
    assert_eq!(json["fix"]["diagnostics"][0]["command"], "ls -la");
    assert_eq!(json["fix"]["fixes"][0]["command"], "mkdir data");

    let sections = extract_fix_sections(FIX_RESPONSE);
    assert_eq!(sections.causes, vec!["Missing file".to_string()]);
}

#[test]
fn test_explain_json_keeps_raw_output() {
    let content = "Lists files.\n- `-l`: long format";
    let output = render(content, Mode::Explain, OutputFormat::Json);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["output"], content);
    assert!(json.get("items").is_none());
}

#[test]
fn test_quiet_outputs_commands_only() {
    let content = "Use this:\n```bash\nfind . -name '*.pdf'\ndu -sh .\n```\nDone.";
    assert_eq!(
        render(content, Mode::Generate, OutputFormat::Quiet),
        "find . -name '*.pdf'\ndu -sh ."
    );
    assert_eq!(render(FIX_RESPONSE, Mode::Fix, OutputFormat::Quiet), "mkdir data");
}

#[test]
fn test_text_output_appends_warnings() {
    let output = render("```sh\nrm -rf ./build\n```\n", Mode::Generate, OutputFormat::Text);
    assert_eq!(
        output,
        "```sh\nrm -rf ./build\n```\n\n# Safety warnings\n- [HIGH] HIGH RISK: recursive delete (rm -rf)."
    );
    assert_eq!(render("  ls -la  ", Mode::Generate, OutputFormat::Text), "ls -la");
}

#[test]
fn test_formatting_is_idempotent() {
    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Quiet] {
        for mode in Mode::ALL {
            assert_eq!(
                render(FIX_RESPONSE, mode, format),
                render(FIX_RESPONSE, mode, format)
            );
        }
    }
}

//! Response formatter.
//!
//! Turns the provider's free text into one of three renderings:
//! - text: the content plus a "Safety warnings" section
//! - quiet: extracted command lines only
//! - JSON: `{mode, blocked, warnings, items|fix|output}`
//!
//! Command extraction prefers fenced code blocks; without any fence it falls
//! back to plain lines, skipping comments and prose bullets.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::commands::format::OutputFormat;
use crate::error::Result;
use crate::mode::Mode;
use crate::safety::SafetyWarning;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)```").expect("static fenced block pattern")
});

/// Where an extracted command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Diagnostic,
    Fix,
    Command,
}

/// One extracted command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputItem {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ItemCategory>,
}

impl OutputItem {
    fn tagged(command: String, category: ItemCategory) -> Self {
        Self {
            command,
            category: Some(category),
        }
    }
}

/// Structured fix-mode sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixSections {
    pub causes: Vec<String>,
    pub diagnostics: Vec<OutputItem>,
    pub fixes: Vec<OutputItem>,
}

/// Mode-dependent part of the JSON report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum ReportBody<'a> {
    Items(Vec<OutputItem>),
    Fix(FixSections),
    Output(&'a str),
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    mode: Mode,
    blocked: bool,
    warnings: &'a [SafetyWarning],
    #[serde(flatten)]
    body: ReportBody<'a>,
}

/// Formatter input.
#[derive(Debug, Clone, Copy)]
pub struct FormatRequest<'a> {
    /// Response text (already replaced by the block message when blocked).
    pub content: &'a str,
    pub warnings: &'a [SafetyWarning],
    pub blocked: bool,
    pub mode: Mode,
    pub format: OutputFormat,
}

/// Renders a response. Pure: identical requests give byte-identical output.
pub fn format_output(request: &FormatRequest<'_>) -> Result<String> {
    match request.format {
        OutputFormat::Json => render_json(request),
        OutputFormat::Quiet => Ok(render_quiet(request.content, request.mode)),
        OutputFormat::Text => Ok(render_text(request.content, request.warnings)),
    }
}

fn render_json(request: &FormatRequest<'_>) -> Result<String> {
    let body = match request.mode {
        Mode::Fix => ReportBody::Fix(extract_fix_sections(request.content)),
        mode if mode.renders_items() => ReportBody::Items(
            extract_commands(request.content)
                .into_iter()
                .map(|c| OutputItem::tagged(c, ItemCategory::Command))
                .collect(),
        ),
        _ => ReportBody::Output(request.content),
    };

    let report = JsonReport {
        mode: request.mode,
        blocked: request.blocked,
        warnings: request.warnings,
        body,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_quiet(content: &str, mode: Mode) -> String {
    let commands = if mode == Mode::Fix {
        extract_fix_sections(content)
            .fixes
            .into_iter()
            .map(|item| item.command)
            .collect()
    } else {
        extract_commands(content)
    };
    commands.join("\n").trim().to_string()
}

fn render_text(content: &str, warnings: &[SafetyWarning]) -> String {
    if warnings.is_empty() {
        return content.trim().to_string();
    }

    let mut out = format!("{}\n# Safety warnings", content);
    for warning in warnings {
        out.push_str(&format!(
            "\n- [{}] {}",
            warning.level.label(),
            warning.message
        ));
    }
    out.trim().to_string()
}

/// Extracts command lines from text.
///
/// Fenced blocks win; every fenced block contributes its lines. Without a
/// fence, every non-empty, non-comment line is a candidate except prose
/// bullets (a bullet counts only when it wraps a backticked command).
pub fn extract_commands(text: &str) -> Vec<String> {
    let fenced: Vec<&str> = FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    if !fenced.is_empty() {
        return fenced
            .iter()
            .flat_map(|block| block.lines())
            .filter_map(|line| clean_candidate(line, true))
            .collect();
    }

    text.lines()
        .filter_map(|line| clean_candidate(line, false))
        .collect()
}

fn clean_candidate(line: &str, in_fence: bool) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with("```") {
        return None;
    }

    let (is_bullet, rest) = match strip_bullet(line) {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    let unquoted = strip_backticks(rest);

    if is_bullet && !in_fence && unquoted.is_none() {
        return None;
    }

    let command = unquoted.unwrap_or(rest).trim();
    (!command.is_empty()).then(|| command.to_string())
}

fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| strip_numbered_marker(line))
        .map(str::trim_start)
}

/// `1. ` / `2) ` list markers.
fn strip_numbered_marker(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..]
        .strip_prefix('.')
        .or_else(|| line[digits..].strip_prefix(')'))?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}

fn strip_backticks(text: &str) -> Option<&str> {
    text.strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .filter(|t| !t.contains('`'))
}

/// Which fix-mode section a heading opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FixSection {
    Causes,
    Diagnostics,
    Fixes,
}

fn classify_heading(heading: &str) -> Option<FixSection> {
    let heading = heading.to_lowercase();
    if heading.contains("possible causes") {
        Some(FixSection::Causes)
    } else if heading.contains("diagnostic") {
        Some(FixSection::Diagnostics)
    } else if heading.contains("fix") {
        Some(FixSection::Fixes)
    } else {
        None
    }
}

/// Splits content on `#` headings outside code fences.
fn split_sections(content: &str) -> Vec<(Option<FixSection>, String)> {
    let mut sections: Vec<(Option<FixSection>, String)> = Vec::new();
    let mut current: Option<(Option<FixSection>, String)> = None;
    let mut in_fence = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
        } else if !in_fence && trimmed.starts_with('#') {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            let heading = trimmed.trim_start_matches('#').trim();
            current = Some((classify_heading(heading), String::new()));
            continue;
        }

        if let Some((_, body)) = current.as_mut() {
            body.push_str(line);
            body.push('\n');
        }
    }

    if let Some(done) = current {
        sections.push(done);
    }
    sections
}

fn extract_causes(body: &str) -> Vec<String> {
    let bullets: Vec<String> = body
        .lines()
        .filter_map(|line| strip_bullet(line.trim()))
        .map(|cause| cause.trim().to_string())
        .filter(|cause| !cause.is_empty())
        .collect();
    if !bullets.is_empty() {
        return bullets;
    }
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts causes, diagnostics and fixes from fix-mode content.
///
/// Without a fixes section that yields commands, fixes fall back to the
/// commands of the whole content.
pub fn extract_fix_sections(content: &str) -> FixSections {
    let mut sections = FixSections::default();

    for (kind, body) in split_sections(content) {
        match kind {
            Some(FixSection::Causes) => sections.causes.extend(extract_causes(&body)),
            Some(FixSection::Diagnostics) => sections.diagnostics.extend(
                extract_commands(&body)
                    .into_iter()
                    .map(|c| OutputItem::tagged(c, ItemCategory::Diagnostic)),
            ),
            Some(FixSection::Fixes) => sections.fixes.extend(
                extract_commands(&body)
                    .into_iter()
                    .map(|c| OutputItem::tagged(c, ItemCategory::Fix)),
            ),
            None => {}
        }
    }

    if sections.fixes.is_empty() {
        sections.fixes = extract_commands(content)
            .into_iter()
            .map(|c| OutputItem::tagged(c, ItemCategory::Fix))
            .collect();
    }
    sections
}

use std::sync::LazyLock;

use regex::Regex;

use crate::fields::Field;

static DIGIT: LazyLock<Regex> = LazyLock::new(|| compile(r"\d"));
static EDITION: LazyLock<Regex> = LazyLock::new(|| compile(r"(\d{4})年(\d{1,2})月第(\d+)版"));
static PRINT_RUN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\d{4})年(\d{1,2})月第(\d+)次印刷"));
static PRICE: LazyLock<Regex> = LazyLock::new(|| compile(r"\d+\.?\d*元"));
static PAPER_FORMAT: LazyLock<Regex> = LazyLock::new(|| compile(r"\d+\s*×\s*\d+\s*1/\d+"));
static SHEET_COUNT: LazyLock<Regex> = LazyLock::new(|| compile(r"印张[：:]*\s*(\d+)"));
static WORD_COUNT: LazyLock<Regex> = LazyLock::new(|| compile(r"字数[：:]*\s*(\d+)千?字"));

pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern {pattern}: {err}"))
}

/// One line-scoped category. `claims` decides whether the line belongs to the
/// category at all; `extract` pulls the value out of a claimed line.
pub(crate) struct LineRule {
    pub field: Field,
    pub claims: fn(&str) -> bool,
    pub extract: fn(&str) -> Option<String>,
}

/// Evaluated top to bottom; the first rule that claims a line owns it, even
/// when its field is already filled or its pattern does not match.
pub(crate) const LINE_RULES: [LineRule; 6] = [
    LineRule {
        field: Field::Edition,
        claims: claims_edition,
        extract: extract_edition,
    },
    LineRule {
        field: Field::PrintRun,
        claims: claims_print_run,
        extract: extract_print_run,
    },
    LineRule {
        field: Field::Price,
        claims: claims_price,
        extract: extract_price,
    },
    LineRule {
        field: Field::PaperFormat,
        claims: claims_paper_format,
        extract: extract_paper_format,
    },
    LineRule {
        field: Field::SheetCount,
        claims: claims_sheet_count,
        extract: extract_sheet_count,
    },
    LineRule {
        field: Field::WordCount,
        claims: claims_word_count,
        extract: extract_word_count,
    },
];

/// Returns the rule that owns `line`, if any.
pub(crate) fn claiming_rule(line: &str) -> Option<&'static LineRule> {
    LINE_RULES.iter().find(|rule| (rule.claims)(line))
}

fn contains_all(line: &str, needles: &[&str]) -> bool {
    needles.iter().all(|needle| line.contains(needle))
}

fn first_match(pattern: &Regex, line: &str) -> Option<String> {
    pattern.find(line).map(|found| found.as_str().to_string())
}

fn first_group(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|group| group.as_str().to_string())
}

fn claims_edition(line: &str) -> bool {
    contains_all(line, &["版", "年", "月"])
}

fn extract_edition(line: &str) -> Option<String> {
    first_match(&EDITION, line)
}

fn claims_print_run(line: &str) -> bool {
    contains_all(line, &["印", "年", "月"])
}

fn extract_print_run(line: &str) -> Option<String> {
    first_match(&PRINT_RUN, line)
}

fn claims_price(line: &str) -> bool {
    line.contains("定价") || (line.contains('元') && DIGIT.is_match(line))
}

fn extract_price(line: &str) -> Option<String> {
    if line.contains("印张") {
        return None;
    }
    first_match(&PRICE, line)
}

fn claims_paper_format(line: &str) -> bool {
    line.contains("开本") || (line.contains('×') && line.contains('/'))
}

fn extract_paper_format(line: &str) -> Option<String> {
    first_match(&PAPER_FORMAT, line)
}

fn claims_sheet_count(line: &str) -> bool {
    line.contains("印张")
}

// Integer part only: "印张：12.5" yields "12".
fn extract_sheet_count(line: &str) -> Option<String> {
    first_group(&SHEET_COUNT, line)
}

fn claims_word_count(line: &str) -> bool {
    line.contains("字数") || line.contains("千字")
}

// The unit is always reported as 千字, whatever the page printed.
fn extract_word_count(line: &str) -> Option<String> {
    first_group(&WORD_COUNT, line).map(|count| format!("{count}千字"))
}

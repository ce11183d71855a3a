use std::sync::LazyLock;

use regex::Regex;

use crate::fields::{CopyrightFields, Field};
use crate::rules::{claiming_rule, compile};

static ISBN: LazyLock<Regex> = LazyLock::new(|| compile(r"ISBN\s*[0-9-]{13,17}"));
static CIP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"CIP\s*数据核字\s*\([0-9]{4}\)\s*第\s*[0-9-]*\s*号"));
static CLASSIFICATION: LazyLock<Regex> = LazyLock::new(|| compile(r"IV[0-9.A-Z]+"));

const AUTHOR_MARKERS: [&str; 3] = ["主编", "著", "编"];

/// Title segment and publication segment of a `书名/作者：出版社，日期` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationLine {
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub date: Option<String>,
}

/// Runs every rule over the recognized lines and returns the filled record.
///
/// Document-wide patterns (ISBN, CIP number) search the newline-joined text;
/// the remaining fields are line scoped.
pub fn extract<S: AsRef<str>>(lines: &[S]) -> CopyrightFields {
    let mut fields = CopyrightFields::default();
    let full_text = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");

    if let Some(found) = ISBN.find(&full_text) {
        fields.set(Field::Isbn, found.as_str());
    }
    if let Some(found) = CIP_NUMBER.find(&full_text) {
        fields.set(Field::CipNumber, found.as_str());
    }

    let classification = lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| line.contains("IV"))
        .find_map(|line| CLASSIFICATION.find(line));
    if let Some(found) = classification {
        fields.set(Field::Classification, found.as_str());
    }

    for line in lines.iter().map(AsRef::as_ref) {
        if let Some(publication) = parse_publication_line(line) {
            apply_publication(&mut fields, publication);
            continue;
        }
        let Some(rule) = claiming_rule(line) else {
            continue;
        };
        if fields.is_set(rule.field) {
            continue;
        }
        if let Some(value) = (rule.extract)(line) {
            fields.set(rule.field, value);
        }
    }

    fields
}

/// Parses a line carrying `/`, `：` and `出版`; other lines yield `None`.
pub fn parse_publication_line(line: &str) -> Option<PublicationLine> {
    if !(line.contains('/') && line.contains('：') && line.contains("出版")) {
        return None;
    }
    let (title_part, info_part) = line.split_once('/')?;
    let title = title_part
        .rsplit('：')
        .next()
        .unwrap_or(title_part)
        .trim()
        .to_string();
    let info = info_part.trim();

    let (publisher, date) = match info.split_once('：') {
        Some((_, rest)) => match rest.split_once('，') {
            Some((publisher, date)) => (Some(publisher.trim()), Some(date.trim())),
            None => (Some(rest.trim()), None),
        },
        None => (None, None),
    };

    Some(PublicationLine {
        title,
        author: author_from(info),
        publisher: publisher.map(str::to_string),
        date: date.map(str::to_string),
    })
}

// The name is assumed to sit right before the role marker; the cut keeps two
// characters from the marker onward.
fn author_from(info: &str) -> Option<String> {
    let start = AUTHOR_MARKERS
        .iter()
        .find_map(|marker| info.find(marker))?;
    let end = info[start..]
        .char_indices()
        .nth(2)
        .map(|(offset, _)| start + offset)
        .unwrap_or(info.len());
    Some(info[..end].trim().to_string())
}

// Later publication lines overwrite whatever they produce.
fn apply_publication(fields: &mut CopyrightFields, publication: PublicationLine) {
    let PublicationLine {
        title,
        author,
        publisher,
        date,
    } = publication;
    fields.set(Field::Title, title);
    if let Some(author) = author {
        fields.set(Field::Author, author);
    }
    if let Some(publisher) = publisher {
        fields.set(Field::Publisher, publisher);
    }
    if let Some(date) = date {
        fields.set(Field::PublicationDate, date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publication_line_splits_title_and_publisher() {
        let parsed = parse_publication_line("鲁迅文集：短篇小说卷/王编：人民文学出版社，2020年")
            .expect("line should trigger");
        assert_eq!(parsed.title, "短篇小说卷");
        assert_eq!(parsed.author.as_deref(), Some("王编："));
        assert_eq!(parsed.publisher.as_deref(), Some("人民文学出版社"));
        assert_eq!(parsed.date.as_deref(), Some("2020年"));
    }

    #[test]
    fn author_prefers_chief_editor_marker() {
        let parsed = parse_publication_line("数据结构/张三主编.—北京：清华大学出版社，2019")
            .expect("line should trigger");
        assert_eq!(parsed.title, "数据结构");
        assert_eq!(parsed.author.as_deref(), Some("张三主编"));
        assert_eq!(parsed.publisher.as_deref(), Some("清华大学出版社"));
        assert_eq!(parsed.date.as_deref(), Some("2019"));
    }

    #[test]
    fn author_marker_at_end_of_segment() {
        assert_eq!(author_from("李四著").as_deref(), Some("李四著"));
        assert_eq!(author_from("王五 等编").as_deref(), Some("王五 等编"));
        assert_eq!(author_from("人民出版社"), None);
    }

    #[test]
    fn publication_line_without_date() {
        let parsed = parse_publication_line("书名：算法导论/李四著：机械工业出版社")
            .expect("line should trigger");
        assert_eq!(parsed.title, "算法导论");
        assert_eq!(parsed.publisher.as_deref(), Some("机械工业出版社"));
        assert_eq!(parsed.date, None);
    }

    #[test]
    fn lines_missing_a_trigger_are_ignored() {
        assert!(parse_publication_line("人民文学出版社/2020").is_none());
        assert!(parse_publication_line("书名：短篇小说卷/王编").is_none());
        assert!(parse_publication_line("出版：人民文学出版社").is_none());
    }

    #[test]
    fn classification_takes_first_matching_line() {
        let fields = extract(&["中图分类号：I210.4", "IV", "Ⅳ.①I2 IV2TP312", "IVX9"]);
        assert_eq!(fields.classification.as_deref(), Some("IV2TP312"));
    }
}

use std::fmt::Write as _;

/// Heading written above the rendered field list.
pub const RESULT_HEADER: &str = "版权页信息提取结果：";

/// Bibliographic fields read from a copyright page, in display order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Field {
    Isbn,
    Title,
    Author,
    Publisher,
    PublicationDate,
    Edition,
    PrintRun,
    Price,
    PaperFormat,
    SheetCount,
    WordCount,
    CipNumber,
    Classification,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Isbn,
        Field::Title,
        Field::Author,
        Field::Publisher,
        Field::PublicationDate,
        Field::Edition,
        Field::PrintRun,
        Field::Price,
        Field::PaperFormat,
        Field::SheetCount,
        Field::WordCount,
        Field::CipNumber,
        Field::Classification,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Isbn => "ISBN",
            Field::Title => "书名",
            Field::Author => "作者",
            Field::Publisher => "出版社",
            Field::PublicationDate => "出版时间",
            Field::Edition => "版次",
            Field::PrintRun => "印次",
            Field::Price => "定价",
            Field::PaperFormat => "开本",
            Field::SheetCount => "印张",
            Field::WordCount => "字数",
            Field::CipNumber => "CIP编号",
            Field::Classification => "中图分类号",
        }
    }
}

/// Result of one extraction pass. Unmatched fields stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyrightFields {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_date: Option<String>,
    pub edition: Option<String>,
    pub print_run: Option<String>,
    pub price: Option<String>,
    pub paper_format: Option<String>,
    pub sheet_count: Option<String>,
    pub word_count: Option<String>,
    pub cip_number: Option<String>,
    pub classification: Option<String>,
}

impl CopyrightFields {
    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Isbn => &self.isbn,
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Publisher => &self.publisher,
            Field::PublicationDate => &self.publication_date,
            Field::Edition => &self.edition,
            Field::PrintRun => &self.print_run,
            Field::Price => &self.price,
            Field::PaperFormat => &self.paper_format,
            Field::SheetCount => &self.sheet_count,
            Field::WordCount => &self.word_count,
            Field::CipNumber => &self.cip_number,
            Field::Classification => &self.classification,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// True when no rule produced a value.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| !self.is_set(*field))
    }

    /// Every field in display order; unset fields yield an empty string.
    pub fn entries(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .map(move |field| (field, self.get(field).unwrap_or("")))
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Isbn => &mut self.isbn,
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Publisher => &mut self.publisher,
            Field::PublicationDate => &mut self.publication_date,
            Field::Edition => &mut self.edition,
            Field::PrintRun => &mut self.print_run,
            Field::Price => &mut self.price,
            Field::PaperFormat => &mut self.paper_format,
            Field::SheetCount => &mut self.sheet_count,
            Field::WordCount => &mut self.word_count,
            Field::CipNumber => &mut self.cip_number,
            Field::Classification => &mut self.classification,
        }
    }
}

/// Formats the record as the result pane shows it: a heading, a blank line,
/// then one `label：value` line per field.
pub fn render(fields: &CopyrightFields) -> String {
    let mut output = String::new();
    output.push_str(RESULT_HEADER);
    output.push_str("\n\n");
    for (field, value) in fields.entries() {
        let _ = writeln!(output, "{}：{}", field.label(), value);
    }
    output
}

use colophon_extract::{CopyrightFields, Field, RESULT_HEADER, extract, render};

fn sample_page() -> Vec<&'static str> {
    vec![
        "图书在版编目（CIP）数据",
        "鲁迅文集：短篇小说卷/王编：人民文学出版社，2020年",
        "ISBN 978-7-115-12345-6",
        "Ⅰ.鲁… Ⅱ.王… IV.I210.4",
        "中国版本图书馆CIP数据核字(2020)第123456号",
        "开本：787×1092 1/16",
        "印张：12.5",
        "字数：350千字",
        "2020年5月第1版",
        "2021年3月第2次印刷",
        "定价：39.80元",
    ]
}

#[test]
fn full_page_fills_every_field() {
    let fields = extract(&sample_page());
    assert_eq!(fields.isbn.as_deref(), Some("ISBN 978-7-115-12345-6"));
    assert_eq!(fields.title.as_deref(), Some("短篇小说卷"));
    assert_eq!(fields.author.as_deref(), Some("王编："));
    assert_eq!(fields.publisher.as_deref(), Some("人民文学出版社"));
    assert_eq!(fields.publication_date.as_deref(), Some("2020年"));
    assert_eq!(fields.edition.as_deref(), Some("2020年5月第1版"));
    assert_eq!(fields.print_run.as_deref(), Some("2021年3月第2次印刷"));
    assert_eq!(fields.price.as_deref(), Some("39.80元"));
    assert_eq!(fields.paper_format.as_deref(), Some("787×1092 1/16"));
    assert_eq!(fields.sheet_count.as_deref(), Some("12"));
    assert_eq!(fields.word_count.as_deref(), Some("350千字"));
    assert_eq!(
        fields.cip_number.as_deref(),
        Some("CIP数据核字(2020)第123456号")
    );
    assert_eq!(fields.classification.as_deref(), Some("IV.I210.4"));
}

#[test]
fn empty_input_yields_all_keys_with_empty_values() {
    let lines: Vec<String> = Vec::new();
    let fields = extract(&lines);
    assert_eq!(fields, CopyrightFields::default());
    assert!(fields.is_empty());
    let rendered = render(&fields);
    assert_eq!(rendered.lines().count(), 2 + Field::ALL.len());
}

#[test]
fn key_set_is_fixed_regardless_of_matches() {
    for lines in [vec!["ISBN 978-7-115-12345-6"], vec!["nothing here"], sample_page()] {
        let fields = extract(&lines);
        let keys: Vec<Field> = fields.entries().map(|(field, _)| field).collect();
        assert_eq!(keys, Field::ALL.to_vec());
    }
}

#[test]
fn isbn_line_is_reported_verbatim() {
    let fields = extract(&["ISBN 978-7-115-12345-6"]);
    assert_eq!(fields.isbn.as_deref(), Some("ISBN 978-7-115-12345-6"));
}

#[test]
fn edition_and_print_run_lines() {
    let fields = extract(&["2020年5月第1版"]);
    assert_eq!(fields.edition.as_deref(), Some("2020年5月第1版"));
    assert_eq!(fields.print_run, None);

    let fields = extract(&["2020年5月第1版", "2021年3月第2次印刷"]);
    assert_eq!(fields.edition.as_deref(), Some("2020年5月第1版"));
    assert_eq!(fields.print_run.as_deref(), Some("2021年3月第2次印刷"));
}

#[test]
fn first_edition_candidate_wins() {
    let fields = extract(&["2019年1月第1版", "2020年5月第2版"]);
    assert_eq!(fields.edition.as_deref(), Some("2019年1月第1版"));

    let fields = extract(&["2020年5月第2版", "2019年1月第1版"]);
    assert_eq!(fields.edition.as_deref(), Some("2020年5月第2版"));
}

#[test]
fn publication_line_populates_title_publisher_and_date() {
    let fields = extract(&["鲁迅文集：短篇小说卷/王编：人民文学出版社，2020年"]);
    assert_eq!(fields.title.as_deref(), Some("短篇小说卷"));
    assert_eq!(fields.publisher.as_deref(), Some("人民文学出版社"));
    assert_eq!(fields.publication_date.as_deref(), Some("2020年"));
}

#[test]
fn publication_line_is_not_offered_to_line_rules() {
    // The line mentions 版/年/月 but is consumed by the publication rule.
    let fields = extract(&["丛书：新版/张三主编：人民出版社，2020年5月第1版"]);
    assert_eq!(fields.edition, None);
    assert_eq!(fields.publication_date.as_deref(), Some("2020年5月第1版"));
}

#[test]
fn price_and_sheet_count() {
    let fields = extract(&["定价：39.80元", "印张：12.5"]);
    assert_eq!(fields.price.as_deref(), Some("39.80元"));
    assert_eq!(fields.sheet_count.as_deref(), Some("12"));
}

#[test]
fn cip_number_found_across_full_text() {
    let fields = extract(&["中国版本图书馆", "CIP 数据核字 (2018) 第 076543 号"]);
    assert_eq!(
        fields.cip_number.as_deref(),
        Some("CIP 数据核字 (2018) 第 076543 号")
    );
}

#[test]
fn render_lists_extracted_values() {
    let fields = extract(&["定价：39.80元"]);
    let rendered = render(&fields);
    assert!(rendered.starts_with(RESULT_HEADER));
    assert!(rendered.contains("\n定价：39.80元\n"));
    assert!(rendered.contains("\nISBN：\n"));
}

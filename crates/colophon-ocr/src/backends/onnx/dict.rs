use std::fs;
use std::path::Path;

use crate::OcrError;

/// Reads a recogniser dictionary: one entry per line, with the space
/// character appended as the final class.
pub(super) fn load_dictionary(path: &Path) -> Result<Vec<String>, OcrError> {
    let content = fs::read_to_string(path).map_err(|err| OcrError::model(path, err))?;
    let mut entries: Vec<String> = content.lines().map(str::to_string).collect();
    if entries.is_empty() {
        return Err(OcrError::model(path, "character dictionary is empty"));
    }
    entries.push(" ".to_string());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::load_dictionary;
    use crate::OcrError;

    #[test]
    fn appends_space_entry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "版\r\n权\n页").unwrap();
        let entries = load_dictionary(file.path()).unwrap();
        assert_eq!(entries, vec!["版", "权", "页", " "]);
    }

    #[test]
    fn rejects_empty_dictionary() {
        let file = tempfile::NamedTempFile::new().unwrap();
        match load_dictionary(file.path()) {
            Err(OcrError::Model { message, .. }) => assert!(message.contains("empty")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_dictionary_is_a_model_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(
            load_dictionary(&path),
            Err(OcrError::Model { .. })
        ));
    }
}

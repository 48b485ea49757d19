//! Delimited text records.
//!
//! Splitting honours double-quoted fields (with `""` as an escaped quote) so
//! the same rules read the name tables and write the CSV outputs.

use std::borrow::Cow;

pub fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Quotes a field that contains the delimiter, a quote or a line break.
pub fn quote_field(field: &str, delimiter: char) -> Cow<'_, str> {
    if field.contains(|c| c == delimiter || c == '"' || c == '\n' || c == '\r') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn join_record<S: AsRef<str>>(fields: &[S], delimiter: char) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(delimiter);
        }
        line.push_str(&quote_field(field.as_ref(), delimiter));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(split_record("a|b||c", '|'), vec!["a", "b", "", "c"]);
        assert_eq!(split_record("hip,name\r\n", ','), vec!["hip", "name"]);
    }

    #[test]
    fn test_split_quoted() {
        assert_eq!(
            split_record(r#"1,"Rigil, Kentaurus","say ""hi""""#, ','),
            vec!["1", "Rigil, Kentaurus", r#"say "hi""#]
        );
    }

    #[test]
    fn test_join_quotes_when_needed() {
        let line = join_record(&["1-8-1", "", "Alpha, Beta", "x\"y"], ',');
        assert_eq!(line, r#"1-8-1,,"Alpha, Beta","x""y""#);
        assert_eq!(split_record(&line, ','), vec!["1-8-1", "", "Alpha, Beta", "x\"y"]);
    }
}

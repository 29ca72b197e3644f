//! Tag-structured (XML) benchmark output reader.
//!
//! A small event scanner (element-open / text / element-close) feeds a
//! state machine that assembles one [`Record`] per `<query>` element:
//! the `nr` attribute seeds the record name, the duration element (in
//! seconds, scaled to milliseconds) and the result-count element are each
//! captured once, first-write-wins. Malformed input aborts the parse; no
//! partial record is emitted.

use crate::errors::ReportError;
use crate::record::{leading_float, Record};

/// Element names carrying the values of interest.
const TAG_RECORD: &str = "query";
const ATTR_NAME: &str = "nr";
const TAG_DURATION: &str = "aqetg";
const TAG_RESULTS: &str = "avgresults";

#[derive(Debug, PartialEq)]
enum Event {
    Open {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Close(String),
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    path: String,
    pending_close: Option<String>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, path: &str) -> Self {
        Self {
            input,
            pos: 0,
            path: path.to_string(),
            pending_close: None,
        }
    }

    fn error(&self, message: impl Into<String>) -> ReportError {
        ReportError::Parse {
            path: self.path.clone(),
            line: self.input[..self.pos].matches('\n').count() + 1,
            message: message.into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Advances past `marker`, or fails with `what` unterminated.
    fn skip_until(&mut self, marker: &str, what: &str) -> Result<(), ReportError> {
        match self.rest().find(marker) {
            Some(offset) => {
                self.pos += offset + marker.len();
                Ok(())
            }
            None => Err(self.error(format!("unterminated {what}"))),
        }
    }

    fn next_event(&mut self) -> Result<Option<Event>, ReportError> {
        if let Some(name) = self.pending_close.take() {
            return Ok(Some(Event::Close(name)));
        }
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Ok(None);
            }
            if let Some(after) = rest.strip_prefix('<') {
                if after.starts_with("!--") {
                    self.skip_until("-->", "comment")?;
                    continue;
                }
                if after.starts_with('?') {
                    self.skip_until("?>", "processing instruction")?;
                    continue;
                }
                if after.starts_with('!') {
                    self.skip_until(">", "declaration")?;
                    continue;
                }
                if let Some(close) = after.strip_prefix('/') {
                    let end = close
                        .find('>')
                        .ok_or_else(|| self.error("unterminated closing tag"))?;
                    let name = close[..end].trim().to_string();
                    self.pos += 2 + end + 1;
                    return Ok(Some(Event::Close(name)));
                }
                return self.scan_open_tag().map(Some);
            }
            let end = rest.find('<').unwrap_or(rest.len());
            let text = &rest[..end];
            self.pos += end;
            if !text.trim().is_empty() {
                return Ok(Some(Event::Text(decode_entities(text))));
            }
        }
    }

    fn scan_open_tag(&mut self) -> Result<Event, ReportError> {
        let body = self.rest();
        let end = body
            .find('>')
            .ok_or_else(|| self.error("unterminated tag"))?;
        let self_closing = body[..end].ends_with('/');
        let inner = body[1..end].trim_end_matches('/').trim();
        let (name, attr_text) = match inner.find(char::is_whitespace) {
            Some(split) => (&inner[..split], inner[split..].trim()),
            None => (inner, ""),
        };
        if name.is_empty() {
            return Err(self.error("tag without a name"));
        }
        let attributes = self.scan_attributes(attr_text)?;
        self.pos += end + 1;
        if self_closing {
            self.pending_close = Some(name.to_string());
        }
        Ok(Event::Open {
            name: name.to_string(),
            attributes,
        })
    }

    fn scan_attributes(&self, mut text: &str) -> Result<Vec<(String, String)>, ReportError> {
        let mut attributes = Vec::new();
        loop {
            text = text.trim_start();
            if text.is_empty() {
                return Ok(attributes);
            }
            let name_end = text
                .find(|c: char| c.is_whitespace() || c == '=')
                .ok_or_else(|| self.error("attribute without a value"))?;
            let name = &text[..name_end];
            text = text[name_end..].trim_start();
            let value_text = text
                .strip_prefix('=')
                .ok_or_else(|| self.error(format!("attribute '{name}' without a value")))?
                .trim_start();
            let quote = match value_text.chars().next() {
                Some(c @ ('"' | '\'')) => c,
                _ => return Err(self.error(format!("attribute '{name}' value is not quoted"))),
            };
            let value_body = &value_text[1..];
            let close = value_body
                .find(quote)
                .ok_or_else(|| self.error(format!("unterminated value for attribute '{name}'")))?;
            attributes.push((name.to_string(), decode_entities(&value_body[..close])));
            text = &value_body[close + 1..];
        }
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Reads every `<query>` record from a tag-structured document.
pub fn read_query_records(input: &str, path: &str) -> Result<Vec<Record>, ReportError> {
    let mut scanner = Scanner::new(input, path);
    let mut records = Vec::new();
    let mut current: Option<Record> = None;
    let mut open_tag = String::new();

    while let Some(event) = scanner.next_event()? {
        match event {
            Event::Open { name, attributes } => {
                if name == TAG_RECORD {
                    let mut record = Record::new();
                    let query_name = attributes
                        .iter()
                        .find(|(attr, _)| attr == ATTR_NAME)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default();
                    record.set("name", query_name);
                    current = Some(record);
                }
                if current.is_some() {
                    open_tag = name;
                }
            }
            Event::Text(text) => {
                if let Some(record) = current.as_mut() {
                    if open_tag == TAG_DURATION && !record.contains("time") {
                        let seconds = leading_float(&text).unwrap_or(f64::NAN);
                        record.set_once("time", format!("{}", seconds * 1000.0));
                    } else if open_tag == TAG_RESULTS && !record.contains("results") {
                        let results = leading_float(&text).unwrap_or(f64::NAN);
                        record.set_once("results", format!("{results}"));
                    }
                }
            }
            Event::Close(name) => {
                if name == TAG_RECORD {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::read_query_records;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<bsbm>
  <!-- timings are in seconds -->
  <querymix>
    <query nr="1">
      <executecount>10</executecount>
      <aqetg>0.25</aqetg>
      <avgresults>42</avgresults>
    </query>
    <query nr="2">
      <aqetg>1.5</aqetg>
      <aqetg>9.9</aqetg>
      <avgresults>7</avgresults>
    </query>
  </querymix>
</bsbm>
"#;

    #[test]
    fn records_carry_name_time_and_results() {
        let records = read_query_records(SAMPLE, "bsbm.xml").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field("name"), Some("1"));
        assert_eq!(records[0].field("time"), Some("250"));
        assert_eq!(records[0].field("results"), Some("42"));
    }

    #[test]
    fn duration_is_captured_first_write_wins() {
        let records = read_query_records(SAMPLE, "bsbm.xml").unwrap();
        assert_eq!(records[1].field("time"), Some("1500"));
    }

    #[test]
    fn missing_value_elements_leave_fields_absent() {
        let records =
            read_query_records(r#"<root><query nr="3"></query></root>"#, "bsbm.xml").unwrap();
        assert_eq!(records[0].field("time"), None);
        assert_eq!(records[0].field("results"), None);
    }

    #[test]
    fn self_closing_record_is_emitted() {
        let records = read_query_records(r#"<root><query nr="4"/></root>"#, "bsbm.xml").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("name"), Some("4"));
    }

    #[test]
    fn unterminated_tag_is_a_parse_error() {
        let err = read_query_records("<root><query nr=\"1\"", "bsbm.xml").unwrap_err();
        assert!(err.to_string().contains("bsbm.xml"), "{err}");
    }

    #[test]
    fn unquoted_attribute_is_a_parse_error() {
        assert!(read_query_records("<query nr=1></query>", "bsbm.xml").is_err());
    }

    #[test]
    fn entities_are_decoded_in_attributes() {
        let records =
            read_query_records(r#"<r><query nr="a&amp;b"/></r>"#, "bsbm.xml").unwrap();
        assert_eq!(records[0].field("name"), Some("a&b"));
    }
}

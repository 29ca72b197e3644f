/// One parsed row/entry of an input file: a bag of named string fields.
///
/// Field sets vary per source format, so presence of a field is checked at
/// the point of consumption, not at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Sets a field, replacing an existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Sets a field only if it has not been captured yet (first-write-wins).
    pub fn set_once(&mut self, name: &str, value: impl Into<String>) {
        if !self.contains(name) {
            self.fields.push((name.to_string(), value.into()));
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parses the leading integer of a field value, `None` when there is none.
///
/// Mirrors the coercion the report formats rely on: `"123ms"` -> 123,
/// `"-4"` -> -4, `""`/garbage -> `None` (NaN in numeric contexts).
pub fn leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Parses the leading floating-point number of a field value.
pub fn leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_exp = false;
    for (i, c) in trimmed.char_indices() {
        let ok = match c {
            '0'..='9' => true,
            '-' | '+' => i == 0 || matches!(trimmed.as_bytes()[i - 1], b'e' | b'E'),
            '.' if !seen_dot && !seen_exp => {
                seen_dot = true;
                true
            }
            'e' | 'E' if !seen_exp && i > 0 => {
                seen_exp = true;
                true
            }
            _ => false,
        };
        if !ok {
            break;
        }
        end = i + c.len_utf8();
    }
    while end > 0 && matches!(trimmed.as_bytes()[end - 1], b'e' | b'E' | b'+' | b'-' | b'.') {
        end -= 1;
    }
    if end == 0 {
        return None;
    }
    trimmed[..end].parse::<f64>().ok()
}

/// Numeric view of a field: missing or non-numeric values become NaN.
pub fn numeric_field(record: &Record, name: &str) -> f64 {
    record
        .field(name)
        .and_then(leading_int)
        .map_or(f64::NAN, |n| n as f64)
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EnhanceError, EnhanceResult};

/// Picker date format (`Y-m-d H:i` style tokens) translated to a `chrono`
/// strftime pattern.
///
/// Server-rendered inputs must pre-fill values in the same format the picker
/// parses, so the binder uses this to spot values the picker would drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    source: String,
    pattern: String,
    has_time: bool,
}

impl DateFormat {
    pub fn parse(format: &str) -> EnhanceResult<Self> {
        if format.trim().is_empty() {
            return Err(EnhanceError::InvalidDateFormat(
                "date format must not be empty".to_owned(),
            ));
        }

        let mut pattern = String::with_capacity(format.len() * 2);
        let mut has_time = false;
        let mut chars = format.chars();
        while let Some(ch) = chars.next() {
            let item = match ch {
                '\\' => {
                    let Some(literal) = chars.next() else {
                        return Err(EnhanceError::InvalidDateFormat(format!(
                            "dangling escape in `{format}`"
                        )));
                    };
                    push_literal(&mut pattern, literal);
                    continue;
                }
                'Y' => "%Y",
                'y' => "%y",
                'm' => "%m",
                'n' => "%-m",
                'd' => "%d",
                'j' => "%-d",
                'M' => "%b",
                'F' => "%B",
                'D' => "%a",
                'l' => "%A",
                'H' => "%H",
                'G' => "%I",
                'h' => "%-I",
                'i' => "%M",
                'S' => "%S",
                's' => "%-S",
                'K' => "%p",
                'U' => "%s",
                'Z' => "%Y-%m-%dT%H:%M:%S%.3fZ",
                other => {
                    push_literal(&mut pattern, other);
                    continue;
                }
            };
            has_time |= matches!(ch, 'H' | 'G' | 'h' | 'i' | 'S' | 's' | 'K' | 'U' | 'Z');
            pattern.push_str(item);
        }

        Ok(Self {
            source: format.to_owned(),
            pattern,
            has_time,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn chrono_pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    #[must_use]
    pub fn format(&self, value: NaiveDateTime) -> String {
        value.format(&self.pattern).to_string()
    }

    /// Parses a value; date-only formats yield midnight.
    pub fn parse_value(&self, value: &str) -> EnhanceResult<NaiveDateTime> {
        let parsed = if self.has_time {
            NaiveDateTime::parse_from_str(value, &self.pattern)
        } else {
            NaiveDate::parse_from_str(value, &self.pattern)
                .map(|date| date.and_time(NaiveTime::default()))
        };
        parsed.map_err(|e| {
            EnhanceError::InvalidDateFormat(format!(
                "value `{value}` does not match `{}`: {e}",
                self.source
            ))
        })
    }

    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.parse_value(value).is_ok()
    }
}

fn push_literal(pattern: &mut String, ch: char) {
    if ch == '%' {
        pattern.push_str("%%");
    } else {
        pattern.push(ch);
    }
}

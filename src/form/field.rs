use chrono::NaiveDate;
use serde_json::Value;

/// Display format of date fields, e.g. `24.12.1980`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

const MASK: &str = "********";

/// How a control's text maps to a settings value and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Combo,
    Toggle,
    Date,
    Password,
    /// Only the listed options are accepted.
    RadioGroup(Vec<String>),
}

impl FieldKind {
    pub fn radio_group<'a>(options: impl IntoIterator<Item = &'a str>) -> Self {
        Self::RadioGroup(options.into_iter().map(str::to_string).collect())
    }

    /// Control text to the value stored in settings.
    pub fn parse(&self, text: &str) -> Value {
        match self {
            Self::Text | Self::Password => Value::String(text.trim().to_string()),
            Self::Combo => Value::String(text.to_string()),
            Self::Toggle => Value::Bool(text.trim().eq_ignore_ascii_case("true")),
            Self::Date => Value::String(parse_date(text).unwrap_or_default()),
            Self::RadioGroup(options) => {
                let choice = text.trim();
                let accepted = options.iter().any(|option| option == choice);
                Value::String(if accepted { choice.to_string() } else { String::new() })
            }
        }
    }

    /// Stored value to control text. Absent and `null` values show as empty.
    pub fn format(&self, value: Option<&Value>) -> String {
        let value = value.filter(|value| !value.is_null());
        match self {
            Self::Toggle => {
                let on = match value {
                    Some(Value::Bool(on)) => *on,
                    Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
                    _ => false,
                };
                on.to_string()
            }
            Self::RadioGroup(options) => value
                .and_then(Value::as_str)
                .filter(|choice| options.iter().any(|option| option == choice))
                .unwrap_or_default()
                .to_string(),
            Self::Text | Self::Combo | Self::Date | Self::Password => match value {
                None => String::new(),
                Some(Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
            },
        }
    }

    /// Value as it may appear in log output.
    pub fn loggable(&self, value: &Value) -> String {
        match self {
            Self::Password => MASK.to_string(),
            _ => value.to_string(),
        }
    }
}

fn parse_date(text: &str) -> Option<String> {
    let text = text.trim();
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => Some(date.format(DATE_FORMAT).to_string()),
        Err(err) => {
            if !text.is_empty() {
                tracing::debug!(text, ?err, "rejected date input");
            }
            None
        }
    }
}

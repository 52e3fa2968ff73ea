//! Form inputs and how a value is read out of each kind

use crate::error::AdminError;
use std::collections::BTreeMap;
use time::Date;
use time::macros::format_description;

/// Field key -> extracted string value
pub type FieldValues = BTreeMap<String, String>;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq)]
pub enum InputWidget {
    TextField { label: String, value: String },
    NumberField { label: String, value: Option<f64> },
    TextArea { label: String, value: String },
    ComboBox {
        label: String,
        items: Vec<String>,
        value: Option<String>,
    },
    Checkbox { label: String, checked: bool },
    DatePicker { label: String, value: Option<Date> },
    /// Any component the form does not know how to read
    Unsupported { label: String, kind: String },
}

impl InputWidget {
    pub fn text_field(label: &str, value: &str) -> Self {
        InputWidget::TextField {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    pub fn number_field(label: &str, value: Option<f64>) -> Self {
        InputWidget::NumberField {
            label: label.to_string(),
            value,
        }
    }

    pub fn text_area(label: &str, value: &str) -> Self {
        InputWidget::TextArea {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    pub fn combo_box(label: &str, items: Vec<String>, value: Option<String>) -> Self {
        InputWidget::ComboBox {
            label: label.to_string(),
            items,
            value,
        }
    }

    pub fn checkbox(label: &str, checked: bool) -> Self {
        InputWidget::Checkbox {
            label: label.to_string(),
            checked,
        }
    }

    pub fn date_picker(label: &str, value: Option<Date>) -> Self {
        InputWidget::DatePicker {
            label: label.to_string(),
            value,
        }
    }

    pub fn unsupported(label: &str, kind: &str) -> Self {
        InputWidget::Unsupported {
            label: label.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            InputWidget::TextField { label, .. }
            | InputWidget::NumberField { label, .. }
            | InputWidget::TextArea { label, .. }
            | InputWidget::ComboBox { label, .. }
            | InputWidget::Checkbox { label, .. }
            | InputWidget::DatePicker { label, .. }
            | InputWidget::Unsupported { label, .. } => label,
        }
    }

    /// The value as the form submits it; `None` means the field is left out.
    ///
    /// Empty number/date/combo inputs yield `None`. Unsupported widgets
    /// always yield `None`, so their field is silently absent from the
    /// submitted values.
    pub fn extract_value(&self) -> Option<String> {
        match self {
            InputWidget::TextField { value, .. } | InputWidget::TextArea { value, .. } => {
                Some(value.clone())
            }
            InputWidget::NumberField { value, .. } => value.map(format_number),
            InputWidget::ComboBox { value, .. } => value.clone(),
            InputWidget::Checkbox { checked, .. } => Some(checked.to_string()),
            InputWidget::DatePicker { value, .. } => value.and_then(|d| d.format(DATE_FORMAT).ok()),
            InputWidget::Unsupported { .. } => None,
        }
    }

    /// Text shown in an editable input for this widget
    pub fn display_text(&self) -> String {
        match self {
            InputWidget::NumberField { value, .. } => value.map(format_number).unwrap_or_default(),
            InputWidget::Checkbox { .. } | InputWidget::Unsupported { .. } => String::new(),
            other => other.extract_value().unwrap_or_default(),
        }
    }

    /// Apply user-typed text. Number and date inputs that cannot parse the text
    /// are left empty and report the error.
    pub fn set_text(&mut self, input: &str) -> Result<(), AdminError> {
        match self {
            InputWidget::TextField { value, .. } | InputWidget::TextArea { value, .. } => {
                *value = input.to_string();
            }
            InputWidget::NumberField { label, value } => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    *value = None;
                } else {
                    *value = trimmed.parse::<f64>().ok();
                    if value.is_none() {
                        return Err(AdminError::Validation(format!(
                            "{}: please enter a valid number",
                            label
                        )));
                    }
                }
            }
            InputWidget::DatePicker { label, value } => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    *value = None;
                } else {
                    *value = Date::parse(trimmed, DATE_FORMAT).ok();
                    if value.is_none() {
                        return Err(AdminError::Validation(format!(
                            "{}: expected YYYY-MM-DD",
                            label
                        )));
                    }
                }
            }
            InputWidget::ComboBox { label, items, value } => {
                if input.is_empty() {
                    *value = None;
                } else if items.iter().any(|i| i == input) {
                    *value = Some(input.to_string());
                } else {
                    return Err(AdminError::Validation(format!(
                        "{}: {} is not one of the choices",
                        label, input
                    )));
                }
            }
            InputWidget::Checkbox { checked, .. } => {
                *checked = matches!(input.trim(), "true" | "on" | "1");
            }
            InputWidget::Unsupported { kind, .. } => {
                return Err(AdminError::Validation(format!(
                    "{} inputs cannot be edited",
                    kind
                )));
            }
        }
        Ok(())
    }

    pub fn set_checked(&mut self, value: bool) {
        if let InputWidget::Checkbox { checked, .. } = self {
            *checked = value;
        }
    }

    pub fn clear(&mut self) {
        match self {
            InputWidget::TextField { value, .. } | InputWidget::TextArea { value, .. } => {
                value.clear()
            }
            InputWidget::NumberField { value, .. } => *value = None,
            InputWidget::ComboBox { value, .. } => *value = None,
            InputWidget::Checkbox { checked, .. } => *checked = false,
            InputWidget::DatePicker { value, .. } => *value = None,
            InputWidget::Unsupported { .. } => {}
        }
    }
}

/// Whole numbers keep one decimal place (`12.0`), everything else prints as-is
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e7 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Which of the two form columns a binding renders in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormColumn {
    Left,
    Right,
}

/// A named field and the widget that edits it
#[derive(Debug, Clone, PartialEq)]
pub struct InputBinding {
    pub field: String,
    pub widget: InputWidget,
    pub column: FormColumn,
}

/// Read every binding, skipping those that yield no value
pub fn collect_values(bindings: &[InputBinding]) -> FieldValues {
    let mut values = FieldValues::new();
    for binding in bindings {
        if let InputWidget::Unsupported { kind, .. } = &binding.widget {
            log::warn!(
                "Field '{}' uses an unsupported {} input and is left out",
                binding.field,
                kind
            );
        }
        if let Some(value) = binding.widget.extract_value() {
            values.insert(binding.field.clone(), value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn bind(field: &str, widget: InputWidget) -> InputBinding {
        InputBinding {
            field: field.to_string(),
            widget,
            column: FormColumn::Left,
        }
    }

    #[test]
    fn test_extraction_per_kind() {
        let date = Date::from_calendar_date(2024, Month::March, 9).unwrap();
        assert_eq!(
            InputWidget::text_field("Name", "Widget").extract_value(),
            Some("Widget".to_string())
        );
        assert_eq!(
            InputWidget::text_field("Name", "").extract_value(),
            Some(String::new())
        );
        assert_eq!(
            InputWidget::number_field("Price", Some(12.0)).extract_value(),
            Some("12.0".to_string())
        );
        assert_eq!(
            InputWidget::number_field("Price", Some(9.99)).extract_value(),
            Some("9.99".to_string())
        );
        assert_eq!(InputWidget::number_field("Price", None).extract_value(), None);
        assert_eq!(
            InputWidget::combo_box("Type", vec!["T".into(), "W".into()], Some("W".into()))
                .extract_value(),
            Some("W".to_string())
        );
        assert_eq!(
            InputWidget::checkbox("Active", false).extract_value(),
            Some("false".to_string())
        );
        assert_eq!(
            InputWidget::date_picker("Due", Some(date)).extract_value(),
            Some("2024-03-09".to_string())
        );
        assert_eq!(InputWidget::unsupported("Photo", "Upload").extract_value(), None);
    }

    #[test]
    fn test_collect_values_omits_empty_number_and_unsupported() {
        let bindings = vec![
            bind("name", InputWidget::text_field("Name", "Widget")),
            bind("price", InputWidget::number_field("Price", None)),
            bind("active", InputWidget::checkbox("Active", true)),
            bind("photo", InputWidget::unsupported("Photo", "Upload")),
        ];

        let values = collect_values(&bindings);

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("name").map(String::as_str), Some("Widget"));
        assert_eq!(values.get("active").map(String::as_str), Some("true"));
        assert!(!values.contains_key("price"));
        assert!(!values.contains_key("photo"));
    }

    #[test]
    fn test_set_text_parses_numbers_and_dates() {
        let mut price = InputWidget::number_field("Price", Some(1.0));
        price.set_text(" 42.5 ").unwrap();
        assert_eq!(price.extract_value(), Some("42.5".to_string()));

        price.set_text("").unwrap();
        assert_eq!(price.extract_value(), None);

        let mut due = InputWidget::date_picker("Due", None);
        due.set_text("2025-12-31").unwrap();
        assert_eq!(due.display_text(), "2025-12-31");
        assert!(due.set_text("31/12/2025").is_err());
        assert_eq!(due.extract_value(), None);
    }

    #[test]
    fn test_unparseable_number_clears_previous_value() {
        let mut price = InputWidget::number_field("Price", Some(12.0));
        assert!(price.set_text("12x").is_err());
        assert_eq!(price.extract_value(), None);

        let bindings = vec![
            bind("name", InputWidget::text_field("Name", "Widget")),
            bind("price", price),
        ];
        assert!(!collect_values(&bindings).contains_key("price"));
    }

    #[test]
    fn test_combo_box_only_accepts_items() {
        let mut kind = InputWidget::combo_box("Type", vec!["T".into(), "W".into()], None);
        assert!(kind.set_text("X").is_err());
        kind.set_text("T").unwrap();
        assert_eq!(kind.extract_value(), Some("T".to_string()));
        kind.clear();
        assert_eq!(kind.extract_value(), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(-3.0), "-3.0");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(1e9), "1000000000");
    }
}

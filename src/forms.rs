//! Schema forms for the two creation endpoints. A form parses an
//! already-decoded JSON body; decoding failures are the caller's problem and
//! map to "malformed", while anything rejected here maps to "invalid format".
//!
//! String fields accept only true JSON strings. A number or bool submitted
//! for a text field is rejected, never coerced.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl FieldError {
    fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

/// All field failures for one request, aggregated. Surfaced to the caller as
/// a single generic invalid-format response; the per-field detail only goes
/// to the logs.
#[derive(Debug, Clone, Error)]
#[error("invalid fields: {}", self.field_list())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    fn field_list(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{} {}", e.field, e.reason))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn string_field<'a>(
    body: &'a Value,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<&'a str, FieldError> {
    match body.get(field) {
        Some(Value::String(s)) => {
            let len = s.chars().count();
            if len < min || len > max {
                Err(FieldError::new(field, "length out of range"))
            } else {
                Ok(s)
            }
        }
        Some(_) => Err(FieldError::new(field, "must be a string")),
        None => Err(FieldError::new(field, "is required")),
    }
}

fn int_field(
    body: &Value,
    field: &'static str,
    min: i64,
    max: i64,
) -> Result<i64, FieldError> {
    match body.get(field) {
        Some(value) => match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => Ok(n),
            Some(_) => Err(FieldError::new(field, "out of range")),
            None => Err(FieldError::new(field, "must be an integer")),
        },
        None => Err(FieldError::new(field, "is required")),
    }
}

#[derive(Debug, Clone)]
pub struct ItemForm {
    pub title: String,
    pub description: String,
    pub price: i64,
}

impl ItemForm {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let title = string_field(body, "title", 1, 64);
        let description = string_field(body, "description", 1, 1024);
        let price = int_field(body, "price", 1, 1_000_000);

        match (title, description, price) {
            (Ok(title), Ok(description), Ok(price)) => Ok(Self {
                title: title.to_owned(),
                description: description.to_owned(),
                price,
            }),
            (title, description, price) => Err(ValidationError {
                errors: title
                    .err()
                    .into_iter()
                    .chain(description.err())
                    .chain(price.err())
                    .collect(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewForm {
    pub text: String,
    pub grade: i64,
}

impl ReviewForm {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let text = string_field(body, "text", 1, 1024);
        let grade = int_field(body, "grade", 1, 10);

        match (text, grade) {
            (Ok(text), Ok(grade)) => Ok(Self {
                text: text.to_owned(),
                grade,
            }),
            (text, grade) => Err(ValidationError {
                errors: text.err().into_iter().chain(grade.err()).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_form_accepts_valid_payload() {
        let form = ItemForm::parse(&json!({
            "title": "Pen",
            "description": "Blue ink pen",
            "price": 100,
        }))
        .unwrap();
        assert_eq!(form.title, "Pen");
        assert_eq!(form.description, "Blue ink pen");
        assert_eq!(form.price, 100);
    }

    #[test]
    fn item_form_accepts_boundary_lengths() {
        let body = json!({
            "title": "t".repeat(64),
            "description": "d".repeat(1024),
            "price": 1_000_000,
        });
        assert!(ItemForm::parse(&body).is_ok());
    }

    #[test]
    fn item_form_rejects_empty_and_overlong_strings() {
        for (title, description) in [
            ("", "ok"),
            ("ok", ""),
        ] {
            let body = json!({"title": title, "description": description, "price": 5});
            assert!(ItemForm::parse(&body).is_err());
        }
        let body = json!({
            "title": "t".repeat(65),
            "description": "ok",
            "price": 5,
        });
        assert!(ItemForm::parse(&body).is_err());
    }

    #[test]
    fn item_form_rejects_price_out_of_range() {
        for price in [0, -1, 1_000_001] {
            let body = json!({"title": "Pen", "description": "x", "price": price});
            assert!(ItemForm::parse(&body).is_err());
        }
    }

    #[test]
    fn string_fields_reject_non_string_values() {
        // No coercion: a numeric title is a type error, not "123"
        let body = json!({"title": 123, "description": "x", "price": 5});
        let err = ItemForm::parse(&body).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "title");
        assert_eq!(err.errors[0].reason, "must be a string");

        let body = json!({"title": true, "description": "x", "price": 5});
        assert!(ItemForm::parse(&body).is_err());
    }

    #[test]
    fn int_fields_reject_non_integer_values() {
        for grade in [json!("9"), json!(9.5), json!(true)] {
            let body = json!({"text": "fine", "grade": grade});
            let err = ReviewForm::parse(&body).unwrap_err();
            assert_eq!(err.errors[0].field, "grade");
            assert_eq!(err.errors[0].reason, "must be an integer");
        }
    }

    #[test]
    fn review_form_rejects_grade_out_of_range() {
        for grade in [0, 11] {
            let body = json!({"text": "fine", "grade": grade});
            assert!(ReviewForm::parse(&body).is_err());
        }
    }

    #[test]
    fn missing_fields_aggregate() {
        let err = ItemForm::parse(&json!({})).unwrap_err();
        assert_eq!(err.errors.len(), 3);
        let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "description", "price"]);
    }

    #[test]
    fn non_object_body_is_a_schema_failure() {
        // Well-formed JSON that is not an object fails per-field, not as a
        // decode error
        assert!(ReviewForm::parse(&json!([1, 2, 3])).is_err());
        assert!(ReviewForm::parse(&json!("text")).is_err());
    }
}

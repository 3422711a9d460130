//! Contact and checkout forms: parsing, local validation and error display.
//!
//! Local checks catch obvious mistakes before a backend round trip. Messages
//! are translation keys; backend 422 messages are plain text and pass through
//! the translator unchanged.

use std::collections::BTreeMap;

use bazaar_core::{Email, Locale, Translator, ValidationErrors};
use serde::Deserialize;

use crate::backend::{ContactRequest, OrderLineRequest, OrderRequest};

/// Longest accepted contact message.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Longest accepted single-line field.
const MAX_LINE_CHARS: usize = 255;

/// Accumulates field errors as translation keys.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    fn fail(&mut self, field: &str, key: &str) {
        // One message per field is enough
        if self.errors.first(field).is_none() {
            self.errors.push(field, key);
        }
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "validation.required");
        }
        self
    }

    pub fn max_chars(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.trim().chars().count() > max {
            self.fail(field, "validation.too_long");
        }
        self
    }

    /// Checks shape only when a value is present.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.trim().is_empty() && Email::parse(value).is_err() {
            self.fail(field, "validation.email");
        }
        self
    }

    /// 7 to 15 digits, allowing a leading `+`, spaces and dashes.
    pub fn phone(&mut self, field: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        let digits = value.chars().filter(char::is_ascii_digit).count();
        let allowed = value
            .char_indices()
            .all(|(i, c)| c.is_ascii_digit() || c == ' ' || c == '-' || (c == '+' && i == 0));
        if !allowed || !(7..=15).contains(&digits) {
            self.fail(field, "validation.phone");
        }
        self
    }

    /// # Errors
    ///
    /// Returns the collected errors if any check failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Field errors resolved to display text.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
    /// Form-level message from the backend, if any.
    pub summary: Option<String>,
}

impl FormErrors {
    /// Translate the first message of each field.
    #[must_use]
    pub fn new(errors: &ValidationErrors, i18n: Translator) -> Self {
        let fields = errors
            .fields
            .iter()
            .filter_map(|(field, messages)| {
                messages
                    .first()
                    .map(|m| (field.clone(), i18n.t(m).to_string()))
            })
            .collect();
        Self {
            fields,
            summary: errors.message.as_deref().map(|m| i18n.t(m).to_string()),
        }
    }

    /// Like [`FormErrors::new`], with `fallback_key` as the summary when the
    /// errors carry no form-level message.
    #[must_use]
    pub fn with_fallback(errors: &ValidationErrors, i18n: Translator, fallback_key: &str) -> Self {
        let mut view = Self::new(errors, i18n);
        if view.summary.is_none() {
            view.summary = Some(i18n.t(fallback_key).to_string());
        }
        view
    }

    /// Form-level message only, for failures not tied to a field.
    #[must_use]
    pub fn with_summary(summary: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            summary: Some(summary.into()),
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.summary.is_none()
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Contact form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Validate and build the backend request.
    ///
    /// # Errors
    ///
    /// Returns field errors keyed by form field name.
    pub fn validate(&self) -> Result<ContactRequest, ValidationErrors> {
        let mut v = Validator::default();
        v.required("name", &self.name)
            .max_chars("name", &self.name, MAX_LINE_CHARS)
            .required("email", &self.email)
            .email("email", &self.email)
            .phone("phone", &self.phone)
            .max_chars("subject", &self.subject, MAX_LINE_CHARS)
            .required("message", &self.message)
            .max_chars("message", &self.message, MAX_MESSAGE_CHARS);
        v.finish()?;

        Ok(ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            subject: optional(&self.subject),
            message: self.message.trim().to_string(),
        })
    }
}

/// Checkout form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub notes: String,
}

impl CheckoutForm {
    /// Validate and build the order for `items`.
    ///
    /// # Errors
    ///
    /// Returns field errors keyed by form field name.
    pub fn validate(
        &self,
        items: Vec<OrderLineRequest>,
        locale: Locale,
    ) -> Result<OrderRequest, ValidationErrors> {
        let mut v = Validator::default();
        v.required("customer_name", &self.customer_name)
            .max_chars("customer_name", &self.customer_name, MAX_LINE_CHARS)
            .required("customer_phone", &self.customer_phone)
            .phone("customer_phone", &self.customer_phone)
            .email("customer_email", &self.customer_email)
            .required("shipping_address", &self.shipping_address)
            .max_chars("shipping_address", &self.shipping_address, MAX_MESSAGE_CHARS)
            .required("city", &self.city)
            .max_chars("city", &self.city, MAX_LINE_CHARS)
            .max_chars("notes", &self.notes, MAX_MESSAGE_CHARS);
        v.finish()?;

        Ok(OrderRequest {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            customer_email: optional(&self.customer_email),
            shipping_address: self.shipping_address.trim().to_string(),
            city: self.city.trim().to_string(),
            notes: optional(&self.notes),
            locale: locale.code().to_string(),
            items,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::ProductId;

    use super::*;

    fn contact() -> ContactForm {
        ContactForm {
            name: " Sara ".into(),
            email: "sara@example.sa".into(),
            phone: String::new(),
            subject: String::new(),
            message: "Where is my order?".into(),
        }
    }

    #[test]
    fn test_contact_valid_trims_and_drops_empty_optionals() {
        let request = contact().validate().unwrap();
        assert_eq!(request.name, "Sara");
        assert_eq!(request.phone, None);
        assert_eq!(request.subject, None);
    }

    #[test]
    fn test_contact_reports_each_field_once() {
        let form = ContactForm {
            email: "nope".into(),
            ..ContactForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.first("name"), Some("validation.required"));
        assert_eq!(errors.first("email"), Some("validation.email"));
        assert_eq!(errors.first("message"), Some("validation.required"));
        assert_eq!(errors.fields["name"].len(), 1);
    }

    #[test]
    fn test_contact_message_length_limit() {
        let mut form = contact();
        form.message = "ا".repeat(MAX_MESSAGE_CHARS);
        assert!(form.validate().is_ok());
        form.message.push('!');
        assert_eq!(
            form.validate().unwrap_err().first("message"),
            Some("validation.too_long")
        );
    }

    #[test]
    fn test_phone_rules() {
        let mut v = Validator::default();
        v.phone("a", "+966 50-123-4567")
            .phone("b", "12345")
            .phone("c", "05x1234567")
            .phone("d", "");
        let errors = v.finish().unwrap_err();
        assert_eq!(errors.first("a"), None);
        assert_eq!(errors.first("b"), Some("validation.phone"));
        assert_eq!(errors.first("c"), Some("validation.phone"));
        assert_eq!(errors.first("d"), None);
    }

    #[test]
    fn test_checkout_builds_order() {
        let form = CheckoutForm {
            customer_name: "Omar".into(),
            customer_phone: "0501234567".into(),
            customer_email: String::new(),
            shipping_address: "Olaya St".into(),
            city: "Riyadh".into(),
            notes: " ring twice ".into(),
        };
        let items = vec![OrderLineRequest {
            product_id: ProductId::new(1),
            quantity: 2,
        }];
        let order = form.validate(items, Locale::Ar).unwrap();
        assert_eq!(order.locale, "ar");
        assert_eq!(order.customer_email, None);
        assert_eq!(order.notes.as_deref(), Some("ring twice"));
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_form_errors_translate_keys_and_keep_backend_text() {
        let mut errors = ValidationErrors::default();
        errors.push("email", "validation.email");
        errors.push("phone", "The phone has already been taken.");
        let view = FormErrors::new(&errors, Translator::new(Locale::En));
        assert_eq!(view.get("email"), Some("Please enter a valid email address."));
        assert_eq!(view.get("phone"), Some("The phone has already been taken."));
        assert_eq!(view.get("name"), None);
        assert!(!view.is_empty());
    }
}

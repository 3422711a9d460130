//! Product and category forms: parsing, local checks and error display.

use std::str::FromStr;

use bazaar_core::{Category, CategoryId, Product, Translator, ValidationErrors};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::{CategoryInput, ProductInput};

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn fail(errors: &mut ValidationErrors, field: &str, key: &str) {
    if errors.first(field).is_none() {
        errors.push(field, key);
    }
}

fn required(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        fail(errors, field, "validation.required");
    }
}

/// Parse a non-negative number; blank yields `None`.
fn non_negative<T>(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<T>() {
        Ok(value) if value < T::default() => {
            fail(errors, field, "validation.min_zero");
            None
        }
        Ok(value) => Some(value),
        Err(_) => {
            fail(errors, field, "validation.number");
            None
        }
    }
}

/// One display line per invalid field.
///
/// Fields with a known label are prefixed with it; backend messages already
/// name their field and pass through the translator unchanged.
#[must_use]
pub fn error_lines(errors: &ValidationErrors, i18n: Translator) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .fields
        .iter()
        .filter_map(|(field, messages)| {
            let message = i18n.t(messages.first()?);
            let label_key = format!("admin.field.{field}");
            Some(
                if bazaar_core::i18n::has_key(i18n.locale(), &label_key) {
                    format!("{}: {message}", i18n.t(&label_key))
                } else {
                    message.to_string()
                },
            )
        })
        .collect();
    if lines.is_empty()
        && let Some(message) = &errors.message
    {
        lines.push(i18n.t(message).to_string());
    }
    lines
}

/// Product form as posted by the browser. Every field arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_ar: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub image: String,
    /// Checkbox: present when ticked.
    #[serde(default)]
    pub is_featured: Option<String>,
}

impl ProductForm {
    /// Prefill from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            name_ar: product.name_ar.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            description_ar: product.description_ar.clone().unwrap_or_default(),
            price: product.price.to_string(),
            sale_price: product.sale_price.map(|p| p.to_string()).unwrap_or_default(),
            stock: product.stock.unwrap_or(0).to_string(),
            category_id: product
                .category_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            image: product.image.clone().unwrap_or_default(),
            is_featured: product.is_featured.then(|| "on".to_string()),
        }
    }

    #[must_use]
    pub const fn featured(&self) -> bool {
        self.is_featured.is_some()
    }

    /// Whether `id` is the selected category, for the `<select>`.
    #[must_use]
    pub fn is_category(&self, id: &CategoryId) -> bool {
        self.category_id.trim() == id.to_string()
    }

    /// Check the form and build the request body.
    ///
    /// # Errors
    ///
    /// Returns field errors as translation keys.
    pub fn validate(&self) -> Result<ProductInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        required(&mut errors, "name", &self.name);
        required(&mut errors, "price", &self.price);
        let price = non_negative::<Decimal>(&mut errors, "price", &self.price);
        let sale_price = non_negative::<Decimal>(&mut errors, "sale_price", &self.sale_price);
        let stock = non_negative::<i64>(&mut errors, "stock", &self.stock);
        let category_id = match self.category_id.trim() {
            "" => None,
            raw => match raw.parse::<CategoryId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    fail(&mut errors, "category_id", "validation.number");
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ProductInput {
            name: self.name.trim().to_string(),
            name_ar: optional(&self.name_ar),
            description: optional(&self.description),
            description_ar: optional(&self.description_ar),
            price: price.unwrap_or_default(),
            sale_price,
            stock: stock.unwrap_or(0),
            category_id,
            image: optional(&self.image),
            is_featured: self.featured(),
        })
    }
}

/// Category form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl CategoryForm {
    #[must_use]
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            name_ar: category.name_ar.clone().unwrap_or_default(),
            description: category.description.clone().unwrap_or_default(),
            image: category.image.clone().unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns field errors as translation keys.
    pub fn validate(&self) -> Result<CategoryInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        required(&mut errors, "name", &self.name);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CategoryInput {
            name: self.name.trim().to_string(),
            name_ar: optional(&self.name_ar),
            description: optional(&self.description),
            image: optional(&self.image),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::Locale;

    use super::*;

    fn product_form() -> ProductForm {
        ProductForm {
            name: " Ajwa dates ".into(),
            price: "45.50".into(),
            stock: "12".into(),
            category_id: "3".into(),
            is_featured: Some("on".into()),
            ..ProductForm::default()
        }
    }

    #[test]
    fn test_valid_product_form() {
        let input = product_form().validate().unwrap();
        assert_eq!(input.name, "Ajwa dates");
        assert_eq!(input.price, Decimal::new(4550, 2));
        assert_eq!(input.stock, 12);
        assert_eq!(input.category_id, Some(CategoryId::new(3)));
        assert_eq!(input.sale_price, None);
        assert!(input.is_featured);
        assert_eq!(input.name_ar, None);
    }

    #[test]
    fn test_product_form_rejects_negative_and_garbage() {
        let form = ProductForm {
            name: "   ".into(),
            price: "-1".into(),
            stock: "many".into(),
            sale_price: "-0.5".into(),
            ..ProductForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.first("name"), Some("validation.required"));
        assert_eq!(errors.first("price"), Some("validation.min_zero"));
        assert_eq!(errors.first("stock"), Some("validation.number"));
        assert_eq!(errors.first("sale_price"), Some("validation.min_zero"));
    }

    #[test]
    fn test_blank_price_is_required_not_number() {
        let form = ProductForm {
            name: "Oud".into(),
            ..ProductForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.first("price"), Some("validation.required"));
        assert!(errors.first("stock").is_none());
    }

    #[test]
    fn test_category_form_requires_name() {
        assert!(CategoryForm::default().validate().is_err());
        let input = CategoryForm {
            name: "Spices".into(),
            name_ar: "بهارات".into(),
            ..CategoryForm::default()
        }
        .validate()
        .unwrap();
        assert_eq!(input.name_ar.as_deref(), Some("بهارات"));
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_error_lines_label_known_fields() {
        let mut errors = ValidationErrors::default();
        errors.push("price", "validation.min_zero");
        errors.push("sku", "The sku has already been taken.");
        let lines = error_lines(&errors, Translator::new(Locale::En));
        assert_eq!(
            lines,
            vec![
                "Price: Must be zero or more.".to_string(),
                "The sku has already been taken.".to_string(),
            ]
        );
    }

    #[test]
    fn test_error_lines_fall_back_to_message() {
        let errors = ValidationErrors {
            message: Some("Category has products.".into()),
            ..ValidationErrors::default()
        };
        assert_eq!(
            error_lines(&errors, Translator::new(Locale::En)),
            vec!["Category has products.".to_string()]
        );
    }
}

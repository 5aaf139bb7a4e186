//! # Form Drafts
//!
//! The raw text a form holds while the user is typing, and the validation
//! that turns it into a domain value.
//!
//! ```text
//! CustomerDraft ──validate()──► Ok(Customer)      or Err(FieldErrors)
//! SupplierDraft ──validate()──► Ok(Supplier)      or Err(FieldErrors)
//! BuyerContact  ──validate()──► Ok(BuyerContact)  or Err(FieldErrors)
//! ProductDraft  ──validate()──► Ok(Product)       or Err(FieldErrors)
//! ```
//!
//! Every field is checked on each submit so the form can show all inline
//! messages at once.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::types::{Customer, Product, Supplier};
use crate::validation::{
    parse_stock_input, validate_categories, validate_email, validate_name, validate_phone,
    validate_required, validate_sku, FieldErrors,
};

const NAME_MAX: usize = 100;
const ADDRESS_MAX: usize = 250;
const NOTES_MAX: usize = 500;

fn new_id(existing: &Option<String>) -> String {
    existing
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Trims optional free text, capped at `max` characters.
fn optional_text(errors: &mut FieldErrors, field: &str, value: &str, max: usize) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    errors
        .check(validate_name(field, value, max))
        .unwrap_or_default()
}

// =============================================================================
// Customer
// =============================================================================

/// New-customer form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub id: Option<String>,
    pub name: String,
    pub phone: String,
    /// Optional; validated only when filled in.
    pub email: String,
    pub address: String,
}

impl CustomerDraft {
    pub fn validate(&self) -> Result<Customer, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(validate_name("name", &self.name, NAME_MAX));
        let phone = errors.check(validate_phone("phone", &self.phone));
        let email = if self.email.trim().is_empty() {
            Some(None)
        } else {
            errors.check(validate_email("email", &self.email)).map(Some)
        };
        let address = optional_text(&mut errors, "address", &self.address, ADDRESS_MAX);

        match (name, phone, email) {
            (Some(name), Some(phone), Some(email)) if errors.is_empty() => Ok(Customer {
                id: new_id(&self.id),
                name,
                phone,
                email,
                address,
                loyalty_points: 0,
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// Create/edit supplier form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    /// `Some` when editing an existing supplier.
    pub id: Option<String>,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub categories: Vec<String>,
    pub notes: String,
}

impl SupplierDraft {
    /// Prefills the form for editing.
    pub fn from_supplier(supplier: &Supplier) -> Self {
        Self {
            id: Some(supplier.id.clone()),
            name: supplier.name.clone(),
            contact_person: supplier.contact_person.clone(),
            email: supplier.email.clone(),
            phone: supplier.phone.clone(),
            address: supplier.address.clone(),
            categories: supplier.categories.clone(),
            notes: supplier.notes.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Toggles a category chip on or off.
    pub fn toggle_category(&mut self, category: &str) {
        match self
            .categories
            .iter()
            .position(|c| c.eq_ignore_ascii_case(category))
        {
            Some(index) => {
                self.categories.remove(index);
            }
            None => self.categories.push(category.to_string()),
        }
    }

    pub fn validate(&self) -> Result<Supplier, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(validate_name("name", &self.name, NAME_MAX));
        let contact_person =
            errors.check(validate_name("contact_person", &self.contact_person, NAME_MAX));
        let email = errors.check(validate_email("email", &self.email));
        let phone = errors.check(validate_phone("phone", &self.phone));
        let categories = errors.check(validate_categories("category", &self.categories));
        let address = optional_text(&mut errors, "address", &self.address, ADDRESS_MAX);
        let notes = optional_text(&mut errors, "notes", &self.notes, NOTES_MAX);

        match (name, contact_person, email, phone, categories) {
            (Some(name), Some(contact_person), Some(email), Some(phone), Some(categories))
                if errors.is_empty() =>
            {
                Ok(Supplier {
                    id: new_id(&self.id),
                    name,
                    contact_person,
                    email,
                    phone,
                    address,
                    categories,
                    notes,
                })
            }
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Buyer Contact
// =============================================================================

/// Contact details collected by the payment form and prefilled into the
/// payment widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl BuyerContact {
    /// Returns the normalized contact (trimmed, phone as bare digits).
    pub fn validate(&self) -> Result<BuyerContact, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(validate_name("name", &self.name, NAME_MAX));
        let email = errors.check(validate_email("email", &self.email));
        let phone = errors.check(validate_phone("phone", &self.phone));

        match (name, email, phone) {
            (Some(name), Some(email), Some(phone)) => Ok(BuyerContact { name, email, phone }),
            _ => Err(errors),
        }
    }

    /// Prefill from a selected customer.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone().unwrap_or_default(),
            phone: customer.phone.clone(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// Add/edit product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub id: Option<String>,
    pub name: String,
    pub sku: String,
    /// Decimal text such as `"249.50"`.
    pub price: String,
    pub stock: String,
    pub category: String,
}

impl ProductDraft {
    /// Validates with prices entered in `decimals` fractional digits.
    pub fn validate(&self, decimals: u8) -> Result<Product, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(validate_name("name", &self.name, NAME_MAX));
        let sku = errors.check(validate_sku(&self.sku));
        let price = errors.check(Money::parse_decimal(&self.price, "price", decimals));
        let stock = errors.check(parse_stock_input("stock", &self.stock));
        let category = errors.check(validate_required("category", &self.category));

        match (name, sku, price, stock, category) {
            (Some(name), Some(sku), Some(price), Some(stock), Some(category)) => Ok(Product {
                id: new_id(&self.id),
                name,
                sku,
                price_cents: price.cents(),
                stock,
                category,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier_draft() -> SupplierDraft {
        SupplierDraft {
            id: None,
            name: "Annapurna Traders".to_string(),
            contact_person: "Ravi Kumar".to_string(),
            email: "orders@annapurna.in".to_string(),
            phone: "+91 98450 12345".to_string(),
            address: "12 Market Road, Pune".to_string(),
            categories: vec!["Grains".to_string()],
            notes: String::new(),
        }
    }

    #[test]
    fn test_valid_supplier() {
        let supplier = supplier_draft().validate().unwrap();
        assert_eq!(supplier.phone, "9845012345");
        assert!(!supplier.id.is_empty());
        assert_eq!(supplier.categories, vec!["Grains".to_string()]);
    }

    #[test]
    fn test_supplier_reports_every_field() {
        let draft = SupplierDraft {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            categories: vec![],
            ..supplier_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("email"));
        assert_eq!(errors.get("category"), Some("select at least one category"));
        assert!(!errors.contains("phone"));
    }

    #[test]
    fn test_edit_keeps_id_and_toggles_categories() {
        let original = supplier_draft().validate().unwrap();
        let mut draft = SupplierDraft::from_supplier(&original);
        assert!(draft.is_edit());

        draft.toggle_category("Oils");
        draft.toggle_category("grains");
        assert_eq!(draft.categories, vec!["Oils".to_string()]);

        let edited = draft.validate().unwrap();
        assert_eq!(edited.id, original.id);
    }

    #[test]
    fn test_customer_email_is_optional() {
        let draft = CustomerDraft {
            name: "Meera Iyer".to_string(),
            phone: "9123456780".to_string(),
            ..Default::default()
        };
        let customer = draft.validate().unwrap();
        assert_eq!(customer.email, None);
        assert_eq!(customer.loyalty_points, 0);

        let draft = CustomerDraft {
            email: "meera@".to_string(),
            ..draft
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.contains("email"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_customer_requires_phone() {
        let draft = CustomerDraft {
            name: "Meera Iyer".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().unwrap_err().contains("phone"));
    }

    #[test]
    fn test_buyer_contact() {
        let contact = BuyerContact {
            name: " Asha Rao ".to_string(),
            email: "asha@example.com".to_string(),
            phone: "98765-43210".to_string(),
        };
        let valid = contact.validate().unwrap();
        assert_eq!(valid.name, "Asha Rao");
        assert_eq!(valid.phone, "9876543210");

        let errors = BuyerContact::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_product_draft() {
        let draft = ProductDraft {
            id: None,
            name: "Mustard Oil 1L".to_string(),
            sku: "OIL-MUST-1".to_string(),
            price: "189".to_string(),
            stock: "7".to_string(),
            category: "Oils".to_string(),
        };
        let product = draft.validate(2).unwrap();
        assert_eq!(product.price_cents, 18900);
        assert_eq!(product.stock, 7);

        let bad = ProductDraft {
            price: "-5".to_string(),
            stock: "many".to_string(),
            sku: "bad sku".to_string(),
            ..draft
        };
        let errors = bad.validate(2).unwrap_err();
        assert!(errors.contains("price"));
        assert!(errors.contains("stock"));
        assert!(errors.contains("sku"));
    }
}

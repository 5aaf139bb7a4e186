//! # Seed Data
//!
//! Sample catalog, customers, suppliers, and purchase orders the register
//! starts with. Dates are relative to `today` so overdue flags stay
//! meaningful whenever the demo runs.

use chrono::{Duration, NaiveDate};
use shopfront_core::{
    Customer, Discount, DiscountBook, Money, Product, PurchaseOrder, PurchaseOrderItem,
    PurchaseOrderStatus, Supplier,
};

fn product(id: &str, name: &str, sku: &str, price_cents: i64, stock: u32, category: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        sku: sku.to_string(),
        price_cents,
        stock,
        category: category.to_string(),
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product("p-rice-5", "Basmati Rice 5kg", "RICE-5KG", 54900, 12, "Grains"),
        product("p-rice-brown", "Brown Rice 1kg", "RICE-BRN-1", 12900, 3, "Grains"),
        product("p-atta-10", "Whole Wheat Atta 10kg", "ATTA-10KG", 46500, 8, "Grains"),
        product("p-dal-toor", "Toor Dal 1kg", "DAL-TOOR-1", 16500, 0, "Pulses"),
        product("p-dal-moong", "Moong Dal 1kg", "DAL-MOONG-1", 14200, 20, "Pulses"),
        product("p-oil-mustard", "Mustard Oil 1L", "OIL-MUST-1", 18900, 7, "Oils"),
        product("p-oil-ground", "Groundnut Oil 1L", "OIL-GRND-1", 21500, 5, "Oils"),
        product("p-ghee", "Cow Ghee 500ml", "GHEE-500", 32000, 6, "Dairy"),
        product("p-paneer", "Paneer 200g", "PANEER-200", 9000, 10, "Dairy"),
        product("p-tea", "Assam Tea 250g", "TEA-ASSAM-250", 15500, 15, "Beverages"),
        product("p-coffee", "Filter Coffee 200g", "COFFEE-200", 18000, 9, "Beverages"),
        product("p-salt", "Iodised Salt 1kg", "SALT-1KG", 2800, 40, "Essentials"),
        product("p-sugar", "Sugar 1kg", "SUGAR-1KG", 4800, 25, "Essentials"),
        product("p-turmeric", "Turmeric Powder 100g", "SPICE-TURM-100", 3500, 30, "Spices"),
    ]
}

pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "c-meera".to_string(),
            name: "Meera Iyer".to_string(),
            phone: "9123456780".to_string(),
            email: Some("meera.iyer@example.com".to_string()),
            address: "22 Residency Road, Bengaluru".to_string(),
            loyalty_points: 120,
        },
        Customer {
            id: "c-arjun".to_string(),
            name: "Arjun Das".to_string(),
            phone: "9988776655".to_string(),
            email: None,
            address: String::new(),
            loyalty_points: 0,
        },
        Customer {
            id: "c-fatima".to_string(),
            name: "Fatima Sheikh".to_string(),
            phone: "9811122233".to_string(),
            email: Some("fatima@example.com".to_string()),
            address: "5 Park Street, Kolkata".to_string(),
            loyalty_points: 45,
        },
    ]
}

pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: "s-annapurna".to_string(),
            name: "Annapurna Foods".to_string(),
            contact_person: "Ravi Kumar".to_string(),
            email: "ravi@annapurna.example".to_string(),
            phone: "9845012345".to_string(),
            address: "APMC Yard, Yeshwanthpur".to_string(),
            categories: vec!["Grains".to_string(), "Pulses".to_string()],
            notes: "Weekly delivery on Mondays".to_string(),
        },
        Supplier {
            id: "s-ganga".to_string(),
            name: "Ganga Oils".to_string(),
            contact_person: "Sita Rao".to_string(),
            email: "sita@gangaoils.example".to_string(),
            phone: "9900112233".to_string(),
            address: String::new(),
            categories: vec!["Oils".to_string()],
            notes: String::new(),
        },
        Supplier {
            id: "s-nandini".to_string(),
            name: "Nandini Dairy".to_string(),
            contact_person: "Prakash".to_string(),
            email: "orders@nandini.example".to_string(),
            phone: "9740099887".to_string(),
            address: String::new(),
            categories: vec!["Dairy".to_string()],
            notes: "Cold chain; morning slots only".to_string(),
        },
    ]
}

fn item(name: &str, sku: &str, unit_price_cents: i64, quantity: u32) -> PurchaseOrderItem {
    PurchaseOrderItem {
        name: name.to_string(),
        sku: sku.to_string(),
        unit_price_cents,
        quantity,
    }
}

pub fn purchase_orders(today: NaiveDate) -> Vec<PurchaseOrder> {
    vec![
        PurchaseOrder {
            id: "po-1042".to_string(),
            order_number: "PO-1042".to_string(),
            supplier_id: "s-annapurna".to_string(),
            supplier_name: "Annapurna Foods".to_string(),
            items: vec![
                item("Basmati Rice 5kg", "RICE-5KG", 45000, 20),
                item("Toor Dal 1kg", "DAL-TOOR-1", 13000, 50),
            ],
            status: PurchaseOrderStatus::Pending,
            order_date: today - Duration::days(9),
            expected_delivery: today - Duration::days(2),
            actual_delivery: None,
            notes: Some("Deliver to the back entrance".to_string()),
            total_cents: None,
        },
        PurchaseOrder {
            id: "po-1041".to_string(),
            order_number: "PO-1041".to_string(),
            supplier_id: "s-ganga".to_string(),
            supplier_name: "Ganga Oils".to_string(),
            items: vec![item("Mustard Oil 1L", "OIL-MUST-1", 15000, 24)],
            status: PurchaseOrderStatus::Processing,
            order_date: today - Duration::days(4),
            expected_delivery: today + Duration::days(3),
            actual_delivery: None,
            notes: None,
            total_cents: Some(360000),
        },
        PurchaseOrder {
            id: "po-1040".to_string(),
            order_number: "PO-1040".to_string(),
            supplier_id: "s-nandini".to_string(),
            supplier_name: "Nandini Dairy".to_string(),
            items: vec![
                item("Cow Ghee 500ml", "GHEE-500", 26000, 10),
                item("Paneer 200g", "PANEER-200", 7000, 30),
            ],
            status: PurchaseOrderStatus::Delivered,
            order_date: today - Duration::days(15),
            expected_delivery: today - Duration::days(12),
            actual_delivery: Some(today - Duration::days(12)),
            notes: None,
            total_cents: None,
        },
        PurchaseOrder {
            id: "po-1039".to_string(),
            order_number: "PO-1039".to_string(),
            supplier_id: "s-ganga".to_string(),
            supplier_name: "Ganga Oils".to_string(),
            items: vec![item("Groundnut Oil 1L", "OIL-GRND-1", 17500, 12)],
            status: PurchaseOrderStatus::Cancelled,
            order_date: today - Duration::days(20),
            expected_delivery: today - Duration::days(14),
            actual_delivery: None,
            notes: Some("Supplier out of stock".to_string()),
            total_cents: None,
        },
    ]
}

/// Codes the cashier can type into the cart.
pub fn discounts() -> DiscountBook {
    DiscountBook::new()
        .with_code("WELCOME10", Discount::Percentage(1000))
        .with_code("FLAT50", Discount::Fixed(Money::from_cents(5000)))
        .with_code("STAFF20", Discount::Percentage(2000))
}

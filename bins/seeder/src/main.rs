//! Database seeder for Salient development and testing.
//!
//! Seeds demo products, customers, and a year of sales so every dashboard
//! panel and insight rule has data to work with: one loss-making product
//! for the profit warning, mixed category margins, and a sales spike for
//! the growth insight.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use salient_db::entities::{customers, products, sales};

/// Demo product: name, category, cost price, unit sale price.
struct DemoProduct {
    name: &'static str,
    category: &'static str,
    cost_price: Decimal,
    unit_price: Decimal,
}

fn demo_products() -> Vec<DemoProduct> {
    let d = |cents: i64| Decimal::new(cents, 2);
    vec![
        DemoProduct {
            name: "Aurora 4K Monitor",
            category: "Electronics",
            cost_price: d(18_000),
            unit_price: d(24_999),
        },
        DemoProduct {
            name: "Vertex Mechanical Keyboard",
            category: "Electronics",
            cost_price: d(5_500),
            unit_price: d(8_999),
        },
        DemoProduct {
            name: "Orbit USB-C Hub",
            category: "Electronics",
            cost_price: d(2_100),
            unit_price: d(3_499),
        },
        DemoProduct {
            name: "Nimbus Laptop Stand",
            category: "Accessories",
            cost_price: d(1_250),
            unit_price: d(3_999),
        },
        DemoProduct {
            name: "Halo Desk Lamp",
            category: "Accessories",
            cost_price: d(900),
            unit_price: d(2_499),
        },
        DemoProduct {
            name: "Pulse Wireless Mouse",
            category: "Accessories",
            cost_price: d(875),
            unit_price: d(2_999),
        },
        // Sold below cost: feeds the profit-warning insight.
        DemoProduct {
            name: "Drift Office Chair",
            category: "Furniture",
            cost_price: d(24_000),
            unit_price: d(22_999),
        },
        DemoProduct {
            name: "Atlas Standing Desk",
            category: "Furniture",
            cost_price: d(31_000),
            unit_price: d(44_999),
        },
    ]
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = salient_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding products...");
    let catalog = seed_products(&db).await;

    println!("Seeding customers...");
    let customer_ids = seed_customers(&db).await;

    println!("Seeding sales...");
    seed_sales(&db, &catalog, &customer_ids).await;

    println!("Seeding complete!");
}

/// Inserts the demo catalog, returning (product_id, unit_price) pairs.
async fn seed_products(db: &DatabaseConnection) -> Vec<(i32, Decimal)> {
    let mut catalog = Vec::new();
    for product in demo_products() {
        let inserted = products::ActiveModel {
            product_name: Set(product.name.to_string()),
            category: Set(product.category.to_string()),
            cost_price: Set(product.cost_price),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert product");
        catalog.push((inserted.product_id, product.unit_price));
    }
    catalog
}

/// Inserts customers spread across the year, returning their IDs.
async fn seed_customers(db: &DatabaseConnection) -> Vec<i32> {
    let mut ids = Vec::new();
    for i in 0..40u32 {
        let month = i % 12 + 1;
        let day = i % 28 + 1;
        let signup_date = NaiveDate::from_ymd_opt(2025, month, day).unwrap();
        let inserted = customers::ActiveModel {
            customer_name: Set(format!("Demo Customer {}", i + 1)),
            signup_date: Set(signup_date),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert customer");
        ids.push(inserted.customer_id);
    }
    ids
}

/// Inserts a year of sales with an extra spike in November so the
/// highest-growth insight has something to find.
async fn seed_sales(db: &DatabaseConnection, catalog: &[(i32, Decimal)], customer_ids: &[i32]) {
    let mut rng = rand::rng();

    for month in 1..=12u32 {
        let count = if month == 11 {
            55
        } else {
            rng.random_range(18..=30)
        };

        for _ in 0..count {
            let (product_id, unit_price) = catalog[rng.random_range(0..catalog.len())];
            let customer_id = customer_ids[rng.random_range(0..customer_ids.len())];
            let quantity = rng.random_range(1..=3i32);
            let sale_date =
                NaiveDate::from_ymd_opt(2025, month, rng.random_range(1..=28u32)).unwrap();

            sales::ActiveModel {
                product_id: Set(product_id),
                customer_id: Set(customer_id),
                quantity: Set(quantity),
                total_price: Set(unit_price * Decimal::from(quantity)),
                sale_date: Set(sale_date),
                ..Default::default()
            }
            .insert(db)
            .await
            .expect("Failed to insert sale");
        }
    }
}

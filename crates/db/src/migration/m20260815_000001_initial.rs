//! Initial database migration.
//!
//! Creates the sales schema tables, supporting indexes, and the
//! `product_performance` aggregate view the dashboard queries read from.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CORE TABLES
        // ============================================================
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(SALES_SQL).await?;

        // ============================================================
        // PART 2: INDEXES
        // ============================================================
        db.execute_unprepared(INDEXES_SQL).await?;

        // ============================================================
        // PART 3: VIEWS
        // ============================================================
        db.execute_unprepared(PRODUCT_PERFORMANCE_VIEW_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP VIEW IF EXISTS product_performance")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS sales").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS customers")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS products")
            .await?;

        Ok(())
    }
}

// ============================================================================
// SQL Definitions
// ============================================================================

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    product_id SERIAL PRIMARY KEY,
    product_name VARCHAR(255) NOT NULL,
    category VARCHAR(100) NOT NULL,
    cost_price NUMERIC(12, 2) NOT NULL CHECK (cost_price >= 0)
);
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    customer_id SERIAL PRIMARY KEY,
    customer_name VARCHAR(255) NOT NULL,
    signup_date DATE NOT NULL
);
";

const SALES_SQL: &str = r"
CREATE TABLE sales (
    sale_id SERIAL PRIMARY KEY,
    product_id INTEGER NOT NULL REFERENCES products(product_id),
    customer_id INTEGER NOT NULL REFERENCES customers(customer_id),
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    total_price NUMERIC(12, 2) NOT NULL CHECK (total_price >= 0),
    sale_date DATE NOT NULL
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_sales_product_id ON sales(product_id);
CREATE INDEX idx_sales_customer_id ON sales(customer_id);
CREATE INDEX idx_sales_sale_date ON sales(sale_date);
CREATE INDEX idx_customers_signup_date ON customers(signup_date);
";

const PRODUCT_PERFORMANCE_VIEW_SQL: &str = r"
CREATE VIEW product_performance AS
SELECT
    p.product_id,
    p.product_name,
    p.category,
    SUM(s.total_price) AS total_revenue,
    SUM(s.total_price - s.quantity * p.cost_price) AS total_profit
FROM products p
JOIN sales s ON s.product_id = p.product_id
GROUP BY p.product_id, p.product_name, p.category;
";

//! `SeaORM` entity definitions for the sales schema.

pub mod customers;
pub mod product_performance;
pub mod products;
pub mod sales;

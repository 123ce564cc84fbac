//! Database seeding command.
//!
//! Inserts a small sample dataset (three customers, three batches, three
//! sales) through the same repositories the API uses, so seeded batches
//! get sequential numbers and consume chemical stock like real ones.

use chrono::NaiveDate;

use glueledger_server::config::AppConfig;
use glueledger_server::db::{self, BatchRepository, CustomerRepository, SaleRepository};
use glueledger_server::models::batch::CreateBatchInput;
use glueledger_server::models::customer::CreateCustomerInput;
use glueledger_server::models::sale::CreateSaleInput;

/// Seed the configured database with sample data.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Seeding database...");

    let customer_repo = CustomerRepository::new(&pool);
    let mut customer_ids = Vec::new();
    for (name, contact_info) in [
        ("ABC Rubber Co.", "077-123-4567"),
        ("Lanka Exports Ltd.", "011-234-5678"),
        ("Green Valley Industries", "076-987-6543"),
    ] {
        let customer = customer_repo
            .create_customer(&CreateCustomerInput {
                name: name.to_string(),
                contact_info: Some(contact_info.to_string()),
            })
            .await?;
        tracing::info!(id = %customer.id, name, "customer added");
        customer_ids.push(customer.id);
    }

    let batch_repo = BatchRepository::new(&pool);
    let mut batch_ids = Vec::new();
    for (latex_quantity, glue_separated, date, cost_to_prepare, selling_price_per_kg, notes) in [
        (100.0, 85.0, "2024-01-15", 15000.0, 250.0, "Good quality batch"),
        (120.0, 95.0, "2024-01-20", 18000.0, 260.0, "Premium grade"),
        (80.0, 70.0, "2024-01-25", 12000.0, 240.0, ""),
    ] {
        let batch = batch_repo
            .create_batch(&CreateBatchInput {
                latex_quantity,
                glue_separated,
                production_date: date.parse::<NaiveDate>()?,
                cost_to_prepare,
                selling_price_per_kg,
                notes: Some(notes.to_string()),
            })
            .await?;
        tracing::info!(id = %batch.id, number = batch.batch_number, "batch added");
        batch_ids.push(batch.id);
    }

    let sale_repo = SaleRepository::new(&pool);
    for (batch_idx, customer_idx, quantity_sold, price_per_kg, date) in [
        (0, 0, 30.0, 250.0, "2024-01-16"),
        (0, 1, 25.0, 250.0, "2024-01-18"),
        (1, 2, 40.0, 260.0, "2024-01-22"),
    ] {
        let batch_id = *batch_ids.get(batch_idx).ok_or("missing seed batch")?;
        let customer_id = *customer_ids.get(customer_idx).ok_or("missing seed customer")?;
        let sale = sale_repo
            .create_sale(&CreateSaleInput {
                batch_id,
                customer_id,
                quantity_sold,
                price_per_kg,
                sale_date: date.parse::<NaiveDate>()?,
            })
            .await?;
        tracing::info!(id = %sale.id, total = sale.total_amount, "sale added");
    }

    tracing::info!("Database seeding completed");
    Ok(())
}

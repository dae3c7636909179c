//! Seed the catalog with sample products.
//!
//! Inserts a small fixed set of products for local development.
//! Existing rows with the same id are left untouched, so the command
//! is safe to run repeatedly.

use sqlx::PgPool;

use shopkart_core::{Price, ProductId};

use super::CommandError;

/// Sample rows: (id, name, category, price, description).
const SAMPLE_PRODUCTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "pixel-9",
        "Pixel 9",
        "Android",
        "799.00",
        "Google flagship with a 6.3-inch display",
    ),
    (
        "galaxy-s25",
        "Galaxy S25",
        "Android",
        "859.99",
        "Samsung flagship, 256 GB",
    ),
    (
        "iphone-16",
        "iPhone 16",
        "iPhone",
        "929.00",
        "Apple flagship, 128 GB",
    ),
    (
        "ipad-air",
        "iPad Air",
        "Tablet",
        "599.00",
        "11-inch tablet with the M-series chip",
    ),
    (
        "usb-c-charger",
        "USB-C Charger 45W",
        "Accessories",
        "29.99",
        "Fast charger with a 2 m cable",
    ),
];

/// Seed the catalog with [`SAMPLE_PRODUCTS`].
///
/// # Errors
///
/// Returns [`CommandError`] if the database is unreachable or an
/// insert fails. Invalid sample data is a programming error and is
/// reported the same way.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    let mut inserted = 0_usize;
    for (id, name, category, price, description) in SAMPLE_PRODUCTS {
        if insert_sample(&pool, id, name, category, price, description).await? {
            inserted += 1;
        }
    }

    tracing::info!(
        inserted,
        skipped = SAMPLE_PRODUCTS.len() - inserted,
        "Seeding complete"
    );
    Ok(())
}

async fn insert_sample(
    pool: &PgPool,
    id: &str,
    name: &str,
    category: &str,
    price: &str,
    description: &str,
) -> Result<bool, CommandError> {
    // Run sample data through the same validation the server applies.
    let id = ProductId::parse(id).map_err(bad_sample)?;
    let price = Price::parse(price).map_err(bad_sample)?;

    let result = sqlx::query(
        r"
        INSERT INTO product (id, name, category, price, description)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO NOTHING
        ",
    )
    .bind(&id)
    .bind(name)
    .bind(category)
    .bind(price)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn bad_sample(e: impl std::fmt::Display) -> CommandError {
    CommandError::InvalidSample(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_products_pass_validation() {
        for (id, name, category, price, _) in SAMPLE_PRODUCTS {
            assert!(ProductId::parse(id).is_ok(), "bad sample id {id:?}");
            assert!(Price::parse(price).is_ok(), "bad sample price {price:?}");
            assert!(!name.is_empty());
            assert!(!category.is_empty());
        }
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let mut ids: Vec<_> = SAMPLE_PRODUCTS.iter().map(|(id, ..)| id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SAMPLE_PRODUCTS.len());
    }
}

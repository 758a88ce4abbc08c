//! Sale Repository
//!
//! Stateless data-access functions for the `sales` table, including the
//! joined listing, invoice and report queries behind the CSV exports.

use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};
use uuid::Uuid;

use crate::domain::{NewSale, Sale, SaleInvoice, SalePatch, SaleReportEntry, SaleSummary};
use crate::shared::error::AppError;

const SUMMARY_SELECT: &str = "SELECT \
    s.id AS sale_id, s.date, s.sale_price AS price, \
    v.make || ' ' || v.model AS vehicle, \
    c.first_name || ' ' || c.last_name AS customer \
    FROM sales s \
    JOIN vehicles v ON s.vehicle_id = v.id \
    JOIN customers c ON s.customer_id = c.id";

/// The 20 most recent sales for the listing view.
pub async fn find_recent(conn: &mut PgConnection) -> Result<Vec<SaleSummary>, AppError> {
    let mut tx = conn.begin().await?;

    let sales = sqlx::query_as::<_, SaleSummary>(&format!(
        "{SUMMARY_SELECT} ORDER BY s.date DESC LIMIT 20"
    ))
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(sales)
}

/// Every sale, oldest first, for the full CSV export.
pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<SaleSummary>, AppError> {
    let mut tx = conn.begin().await?;

    let sales =
        sqlx::query_as::<_, SaleSummary>(&format!("{SUMMARY_SELECT} ORDER BY s.date ASC"))
            .fetch_all(&mut *tx)
            .await?;

    tx.commit().await?;
    Ok(sales)
}

/// Invoice detail for one sale.
pub async fn find_invoice(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<SaleInvoice>, AppError> {
    let mut tx = conn.begin().await?;

    let invoice = sqlx::query_as::<_, SaleInvoice>(
        "SELECT \
         s.id AS sale_id, s.date, s.sale_price, \
         v.vin, v.make, v.model, v.year, \
         c.first_name, c.last_name, c.address, c.ph_number, c.email \
         FROM sales s \
         JOIN vehicles v ON s.vehicle_id = v.id \
         JOIN customers c ON s.customer_id = c.id \
         WHERE s.id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(invoice)
}

/// Sales within `[start, end]` with the profit margin over market price,
/// for the weekly report export.
pub async fn find_in_range(
    conn: &mut PgConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<SaleReportEntry>, AppError> {
    let mut tx = conn.begin().await?;

    let entries = sqlx::query_as::<_, SaleReportEntry>(
        "SELECT \
         s.id AS sale_id, s.date, s.sale_price AS price, \
         v.make || ' ' || v.model AS vehicle, \
         c.first_name || ' ' || c.last_name AS customer, \
         s.sale_price - v.market_price AS profit \
         FROM sales s \
         JOIN vehicles v ON s.vehicle_id = v.id \
         JOIN customers c ON s.customer_id = c.id \
         WHERE s.date >= $1 AND s.date <= $2 \
         ORDER BY s.date ASC",
    )
    .bind(start)
    .bind(end)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(entries)
}

/// Record a sale.
///
/// The referenced vehicle and customer must exist; a foreign-key violation
/// surfaces as `NotFound` naming the missing entity.
pub async fn create(conn: &mut PgConnection, new: &NewSale) -> Result<Sale, AppError> {
    let mut tx = conn.begin().await?;

    let sale = sqlx::query_as::<_, Sale>(
        "INSERT INTO sales (vehicle_id, customer_id, date, sale_price) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, vehicle_id, customer_id, date, sale_price",
    )
    .bind(new.vehicle_id)
    .bind(new.customer_id)
    .bind(new.date)
    .bind(new.sale_price)
    .fetch_one(&mut *tx)
    .await
    .map_err(AppError::from_db)?;

    tx.commit().await?;
    Ok(sale)
}

/// Update price and/or date of a sale. Returns `None` when the id matches
/// no row.
pub async fn update(
    conn: &mut PgConnection,
    id: Uuid,
    patch: &SalePatch,
) -> Result<Option<Sale>, AppError> {
    let mut tx = conn.begin().await?;

    let sale = sqlx::query_as::<_, Sale>(
        "UPDATE sales \
         SET sale_price = COALESCE($1, sale_price), date = COALESCE($2, date) \
         WHERE id = $3 \
         RETURNING id, vehicle_id, customer_id, date, sale_price",
    )
    .bind(patch.sale_price)
    .bind(patch.date)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(sale)
}

//! Sales Handlers
//!
//! JSON CRUD plus the two CSV exports (full history and the date-bounded
//! weekly report).

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::request::{CreateSaleRequest, ReportRangeParams, UpdateSaleRequest};
use crate::domain::{Sale, SaleInvoice, SaleReportEntry, SaleSummary};
use crate::infrastructure::repositories::sale_repository;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_date, parse_uuid};
use crate::startup::AppState;

/// List recent sales
pub async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<SaleSummary>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let sales = sale_repository::find_recent(&mut conn).await?;
    Ok(Json(sales))
}

/// Invoice detail for one sale
pub async fn get_sale_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SaleInvoice>, AppError> {
    let id = parse_uuid(&id, "sale")?;

    let mut conn = state.db.acquire().await?;
    let invoice = sale_repository::find_invoice(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale not found".into()))?;

    Ok(Json(invoice))
}

/// Record a sale
pub async fn create_sale(
    State(state): State<AppState>,
    Json(body): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<Sale>), AppError> {
    let new_sale = body.try_into_domain()?;
    new_sale.validate()?;

    let mut conn = state.db.acquire().await?;
    let created = sale_repository::create(&mut conn, &new_sale).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update price and/or date of a sale
pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSaleRequest>,
) -> Result<Json<Sale>, AppError> {
    let id = parse_uuid(&id, "sale")?;

    let patch = body.try_into_domain()?;
    patch.validate()?;

    let mut conn = state.db.acquire().await?;
    let updated = sale_repository::update(&mut conn, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale not found".into()))?;

    Ok(Json(updated))
}

/// Export the full sales history as CSV
pub async fn export_sales_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut conn = state.db.acquire().await?;
    let sales = sale_repository::find_all(&mut conn).await?;
    drop(conn);

    Ok(csv_response(sales_csv(&sales), "sales_export.csv"))
}

/// Export sales in a date range, with profit margins, as CSV
pub async fn weekly_report_csv(
    State(state): State<AppState>,
    Query(params): Query<ReportRangeParams>,
) -> Result<Response, AppError> {
    let (Some(start), Some(end)) = (params.start, params.end) else {
        return Err(AppError::InvalidInput(
            "Missing required query parameters: start, end".into(),
        ));
    };
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;
    if start > end {
        return Err(AppError::InvalidInput("Invalid date range: start is after end".into()));
    }

    let mut conn = state.db.acquire().await?;
    let entries = sale_repository::find_in_range(&mut conn, start, end).await?;
    drop(conn);

    let filename = format!("weekly_sales_report_{start}_to_{end}.csv");
    Ok(csv_response(report_csv(&entries), &filename))
}

fn csv_response(body: String, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn sales_csv(sales: &[SaleSummary]) -> String {
    let mut out = String::from("sale_id,date,sale_price,vehicle,customer\n");
    for sale in sales {
        out.push_str(&format!(
            "{},{},{:.2},{},{}\n",
            sale.sale_id,
            sale.date,
            sale.price,
            csv_escape(&sale.vehicle),
            csv_escape(&sale.customer),
        ));
    }
    out
}

fn report_csv(entries: &[SaleReportEntry]) -> String {
    let mut out = String::from("sale_id,date,sale_price,vehicle,customer,profit\n");
    for entry in entries {
        out.push_str(&format!(
            "{},{},{:.2},{},{},{:.2}\n",
            entry.sale_id,
            entry.date,
            entry.price,
            csv_escape(&entry.vehicle),
            csv_escape(&entry.customer),
            entry.profit,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn summary(vehicle: &str, customer: &str) -> SaleSummary {
        SaleSummary {
            sale_id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            price: 28_500.0,
            vehicle: vehicle.into(),
            customer: customer.into(),
        }
    }

    #[test]
    fn test_csv_escape_plain_field_untouched() {
        assert_eq!(csv_escape("Honda Accord"), "Honda Accord");
    }

    #[test]
    fn test_csv_escape_quotes_comma() {
        assert_eq!(csv_escape("Doe, Jane"), "\"Doe, Jane\"");
    }

    #[test]
    fn test_csv_escape_doubles_quotes() {
        assert_eq!(csv_escape("the \"deal\""), "\"the \"\"deal\"\"\"");
    }

    #[test]
    fn test_sales_csv_header_and_row() {
        let csv = sales_csv(&[summary("Honda Accord", "Jane Doe")]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("sale_id,date,sale_price,vehicle,customer"));
        assert_eq!(
            lines.next(),
            Some(
                "00000000-0000-0000-0000-000000000000,2025-06-15,28500.00,Honda Accord,Jane Doe"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_report_csv_includes_profit_column() {
        let entry = SaleReportEntry {
            sale_id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            price: 28_500.0,
            vehicle: "Honda Accord".into(),
            customer: "Jane Doe".into(),
            profit: 3_500.0,
        };
        let csv = report_csv(&[entry]);
        assert!(csv.starts_with("sale_id,date,sale_price,vehicle,customer,profit\n"));
        assert!(csv.ends_with(",3500.00\n"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(sales_csv(&[]), "sale_id,date,sale_price,vehicle,customer\n");
    }
}

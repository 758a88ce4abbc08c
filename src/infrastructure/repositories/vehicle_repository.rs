//! Vehicle Repository
//!
//! Stateless data-access functions for the `vehicles` table. Enum columns
//! are stored as VARCHAR, so queries read them as strings and convert
//! through the domain parsers.

use sqlx::{Connection, PgConnection};
use uuid::Uuid;

use crate::domain::{FuelType, NewVehicle, Transmission, Vehicle, VehicleStatus};
use crate::shared::error::AppError;

/// Database row representation of a vehicle, with an optional first image
/// for listing responses.
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    vin: String,
    make: String,
    model: String,
    year: i32,
    odometer: i32,
    fuel_type: String,
    transmission: String,
    trim: Option<String>,
    market_price: f64,
    status: String,
    first_image: Option<String>,
}

impl VehicleRow {
    /// Convert to the domain entity; an unparseable enum value means the
    /// stored data is corrupt, which is an internal failure.
    fn into_vehicle(self) -> Result<(Vehicle, Option<String>), AppError> {
        let fuel_type = FuelType::parse(&self.fuel_type)
            .ok_or_else(|| AppError::Internal(format!("bad fuel_type in row: {}", self.fuel_type)))?;
        let transmission = Transmission::parse(&self.transmission).ok_or_else(|| {
            AppError::Internal(format!("bad transmission in row: {}", self.transmission))
        })?;
        let status = VehicleStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("bad status in row: {}", self.status)))?;

        let vehicle = Vehicle {
            id: self.id,
            vin: self.vin,
            make: self.make,
            model: self.model,
            year: self.year,
            odometer: self.odometer,
            fuel_type,
            transmission,
            trim: self.trim,
            market_price: self.market_price,
            status,
        };
        Ok((vehicle, self.first_image))
    }
}

const VEHICLE_SELECT: &str = "SELECT \
    v.id, v.vin, v.make, v.model, v.year, v.odometer, \
    v.fuel_type, v.transmission, v.trim, v.market_price, v.status, \
    (SELECT img_url FROM images WHERE vehicle_id = v.id ORDER BY id LIMIT 1) AS first_image \
    FROM vehicles v";

/// Fetch the full inventory, newest model years first.
pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<(Vehicle, Option<String>)>, AppError> {
    let mut tx = conn.begin().await?;

    let rows = sqlx::query_as::<_, VehicleRow>(&format!("{VEHICLE_SELECT} ORDER BY v.year DESC"))
        .fetch_all(&mut *tx)
        .await?;

    tx.commit().await?;
    rows.into_iter().map(VehicleRow::into_vehicle).collect()
}

/// Fetch vehicles still on the lot.
pub async fn find_available(
    conn: &mut PgConnection,
) -> Result<Vec<(Vehicle, Option<String>)>, AppError> {
    let mut tx = conn.begin().await?;

    let rows = sqlx::query_as::<_, VehicleRow>(&format!(
        "{VEHICLE_SELECT} WHERE v.status = $1 ORDER BY v.year DESC"
    ))
    .bind(VehicleStatus::Available.as_str())
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    rows.into_iter().map(VehicleRow::into_vehicle).collect()
}

/// Fetch a single vehicle by id.
pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Vehicle>, AppError> {
    let mut tx = conn.begin().await?;

    let row = sqlx::query_as::<_, VehicleRow>(&format!("{VEHICLE_SELECT} WHERE v.id = $1"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    tx.commit().await?;
    row.map(|r| r.into_vehicle().map(|(v, _)| v)).transpose()
}

/// Insert a new vehicle.
pub async fn create(conn: &mut PgConnection, new: &NewVehicle) -> Result<Vehicle, AppError> {
    let mut tx = conn.begin().await?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO vehicles \
         (vin, make, model, year, odometer, fuel_type, transmission, trim, market_price, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING id",
    )
    .bind(&new.vin)
    .bind(&new.make)
    .bind(&new.model)
    .bind(new.year)
    .bind(new.odometer)
    .bind(new.fuel_type.as_str())
    .bind(new.transmission.as_str())
    .bind(&new.trim)
    .bind(new.market_price)
    .bind(new.status.as_str())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Vehicle {
        id,
        vin: new.vin.clone(),
        make: new.make.clone(),
        model: new.model.clone(),
        year: new.year,
        odometer: new.odometer,
        fuel_type: new.fuel_type,
        transmission: new.transmission,
        trim: new.trim.clone(),
        market_price: new.market_price,
        status: new.status,
    })
}

/// Replace all fields of an existing vehicle. Returns `None` when the id
/// matches no row.
pub async fn update(
    conn: &mut PgConnection,
    id: Uuid,
    new: &NewVehicle,
) -> Result<Option<Vehicle>, AppError> {
    let mut tx = conn.begin().await?;

    let updated = sqlx::query_scalar::<_, Uuid>(
        "UPDATE vehicles \
         SET vin = $1, make = $2, model = $3, year = $4, odometer = $5, \
             fuel_type = $6, transmission = $7, trim = $8, market_price = $9, status = $10 \
         WHERE id = $11 \
         RETURNING id",
    )
    .bind(&new.vin)
    .bind(&new.make)
    .bind(&new.model)
    .bind(new.year)
    .bind(new.odometer)
    .bind(new.fuel_type.as_str())
    .bind(new.transmission.as_str())
    .bind(&new.trim)
    .bind(new.market_price)
    .bind(new.status.as_str())
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(updated.map(|id| Vehicle {
        id,
        vin: new.vin.clone(),
        make: new.make.clone(),
        model: new.model.clone(),
        year: new.year,
        odometer: new.odometer,
        fuel_type: new.fuel_type,
        transmission: new.transmission,
        trim: new.trim.clone(),
        market_price: new.market_price,
        status: new.status,
    }))
}

//! Response DTOs
//!
//! Data structures for API response bodies. Most entities serialize
//! directly; only shapes that combine entity data with query extras live
//! here.

use serde::Serialize;

use crate::domain::Vehicle;

/// Inventory listing item: the vehicle plus its first stored image, which
/// the listing views show as a thumbnail.
#[derive(Debug, Serialize)]
pub struct VehicleListItem {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub first_image: Option<String>,
}

impl VehicleListItem {
    pub fn new((vehicle, first_image): (Vehicle, Option<String>)) -> Self {
        Self {
            vehicle,
            first_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FuelType, Transmission, VehicleStatus};
    use uuid::Uuid;

    #[test]
    fn test_vehicle_list_item_flattens_entity() {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            vin: "VIN123".into(),
            make: "Honda".into(),
            model: "Accord".into(),
            year: 2020,
            odometer: 45_000,
            fuel_type: FuelType::Gas,
            transmission: Transmission::Automatic,
            trim: None,
            market_price: 18_500.0,
            status: VehicleStatus::Available,
        };

        let json: serde_json::Value =
            serde_json::to_value(VehicleListItem::new((vehicle, Some("/uploads/x.jpg".into()))))
                .unwrap();

        assert_eq!(json["make"], "Honda");
        assert_eq!(json["status"], "AVAILABLE");
        assert_eq!(json["first_image"], "/uploads/x.jpg");
    }
}

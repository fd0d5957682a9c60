use crate::{
    error::{AppError, AppResult},
    models::{GeoPoint, NearbyCustomers, TransactionRecord},
};

/// Mean Earth radius in meters used for great-circle distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_009.0;

/// Great-circle distance between two points on a spherical Earth, in meters
///
/// Uses the atan2 form of the spherical law, which stays accurate for both
/// very short and near-antipodal distances. Identical points yield exactly 0.
pub fn great_circle_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lon1) = (from.latitude.to_radians(), from.longitude.to_radians());
    let (lat2, lon2) = (to.latitude.to_radians(), to.longitude.to_radians());

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_lat2, cos_lat2) = lat2.sin_cos();
    let (sin_dlon, cos_dlon) = (lon2 - lon1).sin_cos();

    let y = ((cos_lat2 * sin_dlon).powi(2)
        + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon).powi(2))
    .sqrt();
    let x = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

    EARTH_RADIUS_METERS * y.atan2(x)
}

/// Collects every transaction row within `radius_meters` of the reference point
///
/// Scans all rows; a row is included when its distance is `<= radius_meters`.
/// Customers are not deduplicated: each matching row adds one entry.
pub fn find_nearby(
    transactions: &[TransactionRecord],
    reference_lat: f64,
    reference_lon: f64,
    radius_meters: f64,
) -> AppResult<NearbyCustomers> {
    let reference = GeoPoint::new(reference_lat, reference_lon);
    validate_query(reference, radius_meters)?;

    let mut nearby = NearbyCustomers::default();
    for record in transactions {
        let location = record.location();
        if great_circle_distance(reference, location) <= radius_meters {
            nearby.push(record.customer_id, location);
        }
    }

    tracing::debug!(
        latitude = reference_lat,
        longitude = reference_lon,
        radius_meters,
        scanned = transactions.len(),
        matched = nearby.len(),
        "Proximity scan completed"
    );

    Ok(nearby)
}

fn validate_query(reference: GeoPoint, radius_meters: f64) -> AppResult<()> {
    if !reference.is_valid() {
        return Err(AppError::InvalidInput(format!(
            "reference coordinate ({}, {}) is outside [-90, 90] x [-180, 180]",
            reference.latitude, reference.longitude
        )));
    }

    if !radius_meters.is_finite() || radius_meters < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "radius must be a non-negative number of meters, got {}",
            radius_meters
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(customer_id: i64, latitude: f64, longitude: f64) -> TransactionRecord {
        TransactionRecord {
            customer_id,
            product_id: 1,
            product_name: "P".to_string(),
            quantity: 1,
            sale_value: 10.0,
            product_line: "GENERAL".to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_distance_of_identical_points_is_zero() {
        let p = GeoPoint::new(4.711, -74.0721);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }

    #[test]
    fn test_distance_one_millidegree_on_equator() {
        let d = great_circle_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.001));
        assert!((d - 111.195).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let bogota = GeoPoint::new(4.711, -74.0721);
        let medellin = GeoPoint::new(6.2442, -75.5812);
        let there = great_circle_distance(bogota, medellin);
        let back = great_circle_distance(medellin, bogota);
        assert!((there - back).abs() < 1e-6);
        // Roughly 240 km between the two cities
        assert!((230_000.0..250_000.0).contains(&there), "got {}", there);
    }

    #[test]
    fn test_find_nearby_radius_boundary_scenario() {
        let transactions = vec![row(1, 0.0, 0.0), row(2, 0.0, 0.001)];

        let small = find_nearby(&transactions, 0.0, 0.0, 50.0).unwrap();
        assert_eq!(small.customer_ids, vec![1]);

        let large = find_nearby(&transactions, 0.0, 0.0, 200.0).unwrap();
        assert_eq!(large.customer_ids, vec![1, 2]);
        assert_eq!(large.locations[1], GeoPoint::new(0.0, 0.001));
    }

    #[test]
    fn test_find_nearby_is_monotonic_in_radius() {
        let transactions = vec![
            row(1, 4.60, -74.08),
            row(2, 4.61, -74.09),
            row(3, 4.70, -74.05),
            row(4, 5.00, -74.50),
            row(5, 4.60, -74.08),
        ];

        let radii = [0.0, 500.0, 2_000.0, 15_000.0, 80_000.0];
        let results: Vec<NearbyCustomers> = radii
            .iter()
            .map(|r| find_nearby(&transactions, 4.60, -74.08, *r).unwrap())
            .collect();

        for pair in results.windows(2) {
            for id in &pair[0].customer_ids {
                assert!(pair[1].customer_ids.contains(id));
            }
            assert!(pair[0].len() <= pair[1].len());
        }
    }

    #[test]
    fn test_find_nearby_zero_radius_matches_exact_coordinates_only() {
        let transactions = vec![
            row(1, 4.60, -74.08),
            row(2, 4.60, -74.080001),
            row(3, 4.60, -74.08),
        ];

        let nearby = find_nearby(&transactions, 4.60, -74.08, 0.0).unwrap();
        assert_eq!(nearby.customer_ids, vec![1, 3]);
    }

    #[test]
    fn test_find_nearby_keeps_duplicate_customer_rows() {
        let transactions = vec![row(7, 1.0, 1.0), row(7, 1.0, 1.0), row(8, 1.0, 1.0)];

        let nearby = find_nearby(&transactions, 1.0, 1.0, 10.0).unwrap();
        assert_eq!(nearby.customer_ids, vec![7, 7, 8]);
        assert_eq!(nearby.locations.len(), 3);
    }

    #[test]
    fn test_find_nearby_empty_when_nothing_in_range() {
        let transactions = vec![row(1, 10.0, 10.0)];
        let nearby = find_nearby(&transactions, 0.0, 0.0, 1_000.0).unwrap();
        assert!(nearby.is_empty());
    }

    #[test]
    fn test_find_nearby_rejects_invalid_reference() {
        let transactions = vec![row(1, 0.0, 0.0)];

        for (lat, lon) in [(91.0, 0.0), (0.0, 181.0), (f64::NAN, 0.0)] {
            let err = find_nearby(&transactions, lat, lon, 100.0).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_find_nearby_rejects_invalid_radius() {
        let transactions = vec![row(1, 0.0, 0.0)];

        for radius in [-1.0, f64::NAN, f64::INFINITY] {
            let err = find_nearby(&transactions, 0.0, 0.0, radius).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
    }
}

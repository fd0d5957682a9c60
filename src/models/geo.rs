use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and within the WGS84 degree ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Customers whose transaction rows fall inside a search radius
///
/// `customer_ids[i]` was recorded at `locations[i]`. A customer appears once
/// per matching transaction row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearbyCustomers {
    pub customer_ids: Vec<i64>,
    pub locations: Vec<GeoPoint>,
}

impl NearbyCustomers {
    pub fn push(&mut self, customer_id: i64, location: GeoPoint) {
        self.customer_ids.push(customer_id);
        self.locations.push(location);
    }

    pub fn len(&self) -> usize {
        self.customer_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customer_ids.is_empty()
    }

    /// Removes every entry belonging to `customer_id`
    pub fn without_customer(self, customer_id: i64) -> Self {
        let mut kept = Self::default();
        for (id, location) in self.customer_ids.into_iter().zip(self.locations) {
            if id != customer_id {
                kept.push(id, location);
            }
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validity() {
        assert!(GeoPoint::new(4.65, -74.05).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.1).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_without_customer_keeps_pairs_aligned() {
        let mut nearby = NearbyCustomers::default();
        nearby.push(1, GeoPoint::new(1.0, 1.0));
        nearby.push(2, GeoPoint::new(2.0, 2.0));
        nearby.push(1, GeoPoint::new(1.5, 1.5));
        nearby.push(3, GeoPoint::new(3.0, 3.0));

        let others = nearby.without_customer(1);
        assert_eq!(others.customer_ids, vec![2, 3]);
        assert_eq!(
            others.locations,
            vec![GeoPoint::new(2.0, 2.0), GeoPoint::new(3.0, 3.0)]
        );
    }
}

/*
This file is part of the Point Matching Tool
Copyright (C) 2022 Novel-T

The Point Matching Tool is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use geo::{Geometry, Polygon};
use wkt::{ToWkt, TryFromWkt};

use crate::error::{Error, Result};
use crate::feature::{FeatureId, FeatureSet};

pub fn geometry_to_wkt(geometry: &Geometry<f64>) -> String {
    geometry.wkt_string()
}

pub fn geometry_from_wkt(text: &str) -> Result<Geometry<f64>> {
    Geometry::<f64>::try_from_wkt_str(text).map_err(|e| Error::WktParse {
        message: e.to_string(),
    })
}

/// Strict polygon parse, any other geometry kind is rejected.
pub fn polygon_from_wkt(text: &str) -> Result<Polygon<f64>> {
    Polygon::<f64>::try_from_wkt_str(text).map_err(|e| Error::WktParse {
        message: e.to_string(),
    })
}

/// The set's geometry column as WKT, one entry per feature in order.
pub fn wkt_records<G: ToWkt<f64>>(set: &FeatureSet<G>) -> Vec<(FeatureId, String)> {
    set.iter()
        .map(|feature| (feature.id.clone(), feature.geometry.wkt_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Point, Polygon};

    use crate::crs::Crs;
    use crate::feature::{Feature, PointSet};

    #[test]
    fn test_wkt_point_round_trip() {
        let parsed = geometry_from_wkt("POINT(1.5 2.5)").unwrap();
        assert_eq!(Geometry::Point(Point::new(1.5, 2.5)), parsed);

        let reparsed = geometry_from_wkt(&geometry_to_wkt(&parsed)).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_wkt_polygon_round_trip() {
        let polygon = polygon_from_wkt("POLYGON((0 0,4 0,4 4,0 4,0 0))").unwrap();
        assert_eq!(5, polygon.exterior().0.len());

        let text = geometry_to_wkt(&Geometry::Polygon(polygon.clone()));
        let reparsed = polygon_from_wkt(&text).unwrap();
        assert_eq!(polygon, reparsed);
    }

    #[test]
    fn test_wkt_rejects_garbage() {
        assert!(matches!(
            geometry_from_wkt("not a geometry").unwrap_err(),
            Error::WktParse { .. }
        ));
    }

    #[test]
    fn test_polygon_parse_rejects_other_kinds() {
        assert!(matches!(
            polygon_from_wkt("POINT(1 1)").unwrap_err(),
            Error::WktParse { .. }
        ));
    }

    #[test]
    fn test_wkt_records_in_order() {
        let mut set = PointSet::new(Crs::wgs84());
        set.push(Feature::new(2, Point::new(0.0, 0.0)));
        set.push(Feature::new(1, Point::new(1.0, 1.0)));

        let records = wkt_records(&set);
        assert_eq!(2, records.len());
        assert_eq!(FeatureId::Int(2), records[0].0);
        assert_eq!(FeatureId::Int(1), records[1].0);

        let reparsed = geometry_from_wkt(&records[1].1).unwrap();
        assert_eq!(Geometry::Point(Point::new(1.0, 1.0)), reparsed);
    }

    #[test]
    fn test_polygon_set_wkt_records() {
        let polygon: Polygon<f64> = polygon_from_wkt("POLYGON((0 0,1 0,1 1,0 1,0 0))").unwrap();
        let mut set = crate::feature::PolygonSet::new(Crs::wgs84());
        set.push(Feature::new("zone_a", polygon.clone()));

        let records = wkt_records(&set);
        assert_eq!(polygon, polygon_from_wkt(&records[0].1).unwrap());
    }
}

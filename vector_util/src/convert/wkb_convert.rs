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
use geo::Geometry;
use log::warn;

use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureId};

/// Hex payloads arrive with stray whitespace and sometimes a `0x`
/// prefix, both are tolerated.
pub fn hex_to_wkb(hex_text: &str) -> Result<Vec<u8>> {
    let trimmed = hex_text.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(trimmed)?)
}

pub fn wkb_to_geometry(bytes: &[u8]) -> Result<Geometry<f64>> {
    let mut reader = bytes;
    wkb::wkb_to_geom(&mut reader).map_err(|e| Error::WkbCodec {
        message: format!("{:?}", e),
    })
}

pub fn geometry_to_wkb(geometry: &Geometry<f64>) -> Result<Vec<u8>> {
    wkb::geom_to_wkb(geometry).map_err(|e| Error::WkbCodec {
        message: format!("{:?}", e),
    })
}

/// Decodes a whole id plus hex-WKB column, keeping row order.  One bad
/// row fails the whole conversion, partial feature lists never escape.
pub fn hex_column_to_features(rows: &[(FeatureId, String)]) -> Result<Vec<Feature<Geometry<f64>>>> {
    let mut features = Vec::with_capacity(rows.len());
    for (id, hex_text) in rows {
        let geometry = hex_to_wkb(hex_text).and_then(|bytes| wkb_to_geometry(&bytes));
        let geometry = match geometry {
            Ok(g) => g,
            Err(e) => {
                warn!("Could not decode the geometry of row {}", id);
                return Err(e);
            }
        };
        features.push(Feature {
            id: id.clone(),
            geometry,
        });
    }
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    #[test]
    fn test_wkb_round_trip() {
        let point = Geometry::Point(Point::new(3.25, -7.5));
        let bytes = geometry_to_wkb(&point).unwrap();
        assert_eq!(point, wkb_to_geometry(&bytes).unwrap());

        let polygon =
            crate::convert::geometry_from_wkt("POLYGON((0 0,4 0,4 4,0 4,0 0))").unwrap();
        let bytes = geometry_to_wkb(&polygon).unwrap();
        assert_eq!(polygon, wkb_to_geometry(&bytes).unwrap());
    }

    #[test]
    fn test_hex_to_wkb_tolerates_prefix_and_whitespace() {
        let bytes = geometry_to_wkb(&Geometry::Point(Point::new(1.0, 2.0))).unwrap();
        let hex_text = hex::encode(&bytes);

        assert_eq!(bytes, hex_to_wkb(&hex_text).unwrap());
        assert_eq!(bytes, hex_to_wkb(&format!("  0x{}  ", hex_text)).unwrap());
        assert_eq!(bytes, hex_to_wkb(&format!("0X{}", hex_text.to_uppercase())).unwrap());
    }

    #[test]
    fn test_hex_to_wkb_rejects_garbage() {
        assert!(matches!(
            hex_to_wkb("zz00").unwrap_err(),
            Error::HexDecode(_)
        ));
        assert!(matches!(hex_to_wkb("abc").unwrap_err(), Error::HexDecode(_)));
    }

    #[test]
    fn test_hex_column_to_features() {
        let a = Geometry::Point(Point::new(1.0, 2.0));
        let b = Geometry::Point(Point::new(-3.0, 4.5));
        let rows = vec![
            (FeatureId::Int(1), hex::encode(geometry_to_wkb(&a).unwrap())),
            (
                FeatureId::from("named"),
                hex::encode(geometry_to_wkb(&b).unwrap()),
            ),
        ];

        let features = hex_column_to_features(&rows).unwrap();
        assert_eq!(2, features.len());
        assert_eq!(FeatureId::Int(1), features[0].id);
        assert_eq!(a, features[0].geometry);
        assert_eq!(FeatureId::from("named"), features[1].id);
        assert_eq!(b, features[1].geometry);
    }

    #[test]
    fn test_hex_column_fails_on_bad_row() {
        let a = Geometry::Point(Point::new(1.0, 2.0));
        let rows = vec![
            (FeatureId::Int(1), hex::encode(geometry_to_wkb(&a).unwrap())),
            (FeatureId::Int(2), "nonsense".to_string()),
        ];
        assert!(hex_column_to_features(&rows).is_err());
    }
}

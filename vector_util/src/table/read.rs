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
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use geo::Point;
use log::debug;

use crate::convert::polygon_from_wkt;
use crate::crs::Crs;
use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureId, PointSet, PolygonSet};

/// Column layout of a point table.
#[derive(Debug, Clone)]
pub struct PointCsvSpec {
    pub id_field: String,
    pub x_field: String,
    pub y_field: String,
    pub crs: Option<Crs>,
}

impl Default for PointCsvSpec {
    fn default() -> PointCsvSpec {
        PointCsvSpec {
            id_field: "fid".to_string(),
            x_field: "lon".to_string(),
            y_field: "lat".to_string(),
            crs: None,
        }
    }
}

/// Column layout of a polygon table carrying WKT geometries.
#[derive(Debug, Clone)]
pub struct PolygonCsvSpec {
    pub id_field: String,
    pub wkt_field: String,
    pub crs: Option<Crs>,
}

impl Default for PolygonCsvSpec {
    fn default() -> PolygonCsvSpec {
        PolygonCsvSpec {
            id_field: "fid".to_string(),
            wkt_field: "geometry".to_string(),
            crs: None,
        }
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| Error::MissingColumn {
            name: name.to_string(),
        })
}

fn parse_f64(record: &StringRecord, idx: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("");
    raw.trim().parse::<f64>().map_err(|_| Error::BadField {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Loads a point table.  The set's CRS is whatever the spec carries,
/// possibly none, sets without one fail later in CRS dependent ops.
pub fn read_point_set<R: Read>(reader: R, spec: &PointCsvSpec) -> Result<PointSet> {
    let mut csv_reader = ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let id_idx = column_index(&headers, &spec.id_field)?;
    let x_idx = column_index(&headers, &spec.x_field)?;
    let y_idx = column_index(&headers, &spec.y_field)?;

    let mut set = match &spec.crs {
        Some(crs) => PointSet::new(crs.clone()),
        None => PointSet::without_crs(),
    };
    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = row_idx + 1;
        let id = FeatureId::parse(record.get(id_idx).unwrap_or(""));
        let x = parse_f64(&record, x_idx, &spec.x_field, row)?;
        let y = parse_f64(&record, y_idx, &spec.y_field, row)?;
        set.push(Feature::new(id, Point::new(x, y)));
    }

    debug!("Read {} point rows", set.len());
    Ok(set)
}

/// Loads a polygon table from a WKT geometry column.  Non polygon rows
/// fail the whole load.
pub fn read_polygon_set<R: Read>(reader: R, spec: &PolygonCsvSpec) -> Result<PolygonSet> {
    let rows = read_id_text_column(reader, &spec.id_field, &spec.wkt_field)?;

    let mut set = match &spec.crs {
        Some(crs) => PolygonSet::new(crs.clone()),
        None => PolygonSet::without_crs(),
    };
    for (id, text) in rows {
        set.push(Feature {
            id,
            geometry: polygon_from_wkt(&text)?,
        });
    }

    debug!("Read {} polygon rows", set.len());
    Ok(set)
}

/// Pulls an id column and one text column out of a table, in row order.
pub fn read_id_text_column<R: Read>(
    reader: R,
    id_field: &str,
    text_field: &str,
) -> Result<Vec<(FeatureId, String)>> {
    let mut csv_reader = ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let id_idx = column_index(&headers, id_field)?;
    let text_idx = column_index(&headers, text_field)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let id = FeatureId::parse(record.get(id_idx).unwrap_or(""));
        rows.push((id, record.get(text_idx).unwrap_or("").to_string()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_point_set() {
        let data = "fid,lon,lat\n1,0.0,51.5\nb2,0.001,51.5\n";
        let spec = PointCsvSpec {
            crs: Some(Crs::wgs84()),
            ..Default::default()
        };
        let set = read_point_set(data.as_bytes(), &spec).unwrap();

        assert_eq!(2, set.len());
        assert_eq!(Some(&Crs::wgs84()), set.crs());
        assert_eq!(FeatureId::Int(1), set.features()[0].id);
        assert_eq!(Point::new(0.0, 51.5), set.features()[0].geometry);
        assert_eq!(FeatureId::from("b2"), set.features()[1].id);
        assert_eq!(Point::new(0.001, 51.5), set.features()[1].geometry);
    }

    #[test]
    fn test_read_point_set_custom_columns() {
        let data = "name,x,y\nsite_a,10.5,20.5\n";
        let spec = PointCsvSpec {
            id_field: "name".to_string(),
            x_field: "x".to_string(),
            y_field: "y".to_string(),
            crs: None,
        };
        let set = read_point_set(data.as_bytes(), &spec).unwrap();

        assert_eq!(None, set.crs());
        assert_eq!(FeatureId::from("site_a"), set.features()[0].id);
        assert_eq!(Point::new(10.5, 20.5), set.features()[0].geometry);
    }

    #[test]
    fn test_read_point_set_missing_column() {
        let data = "fid,lon\n1,0.0\n";
        let err = read_point_set(data.as_bytes(), &PointCsvSpec::default()).unwrap_err();
        match err {
            Error::MissingColumn { name } => assert_eq!("lat", name),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_read_point_set_bad_number() {
        let data = "fid,lon,lat\n1,0.0,51.5\n2,abc,51.5\n";
        let err = read_point_set(data.as_bytes(), &PointCsvSpec::default()).unwrap_err();
        match err {
            Error::BadField { row, column, value } => {
                assert_eq!(2, row);
                assert_eq!("lon", column);
                assert_eq!("abc", value);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_read_point_set_short_row() {
        let data = "fid,lon,lat\n1,2.0\n";
        assert!(read_point_set(data.as_bytes(), &PointCsvSpec::default()).is_err());
    }

    #[test]
    fn test_read_polygon_set() {
        let data = "fid,geometry\n7,\"POLYGON((0 0,1 0,1 1,0 1,0 0))\"\n";
        let spec = PolygonCsvSpec {
            crs: Some(Crs::wgs84()),
            ..Default::default()
        };
        let set = read_polygon_set(data.as_bytes(), &spec).unwrap();

        assert_eq!(1, set.len());
        assert_eq!(FeatureId::Int(7), set.features()[0].id);
        assert_eq!(5, set.features()[0].geometry.exterior().0.len());
    }

    #[test]
    fn test_read_polygon_set_rejects_points() {
        let data = "fid,geometry\n7,POINT(1 1)\n";
        assert!(matches!(
            read_polygon_set(data.as_bytes(), &PolygonCsvSpec::default()).unwrap_err(),
            Error::WktParse { .. }
        ));
    }

    #[test]
    fn test_read_id_text_column() {
        let data = "fid,geometry\n1,abc\nx9,def\n";
        let rows = read_id_text_column(data.as_bytes(), "fid", "geometry").unwrap();
        assert_eq!(
            vec![
                (FeatureId::Int(1), "abc".to_string()),
                (FeatureId::from("x9"), "def".to_string()),
            ],
            rows
        );
    }
}

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
use std::io::Write;

use csv::WriterBuilder;

use crate::error::Result;
use crate::feature::{FeatureId, PointSet};
use crate::table::PointCsvSpec;
use crate::vector::{JoinRow, NearestTable};

/// Writes a nearest table with the fixed columns
/// `left_id,right_id,x,y,nearest_x,nearest_y,distance_meters`.
pub fn write_nearest_table<W: Write>(writer: W, table: &NearestTable) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record([
        "left_id",
        "right_id",
        "x",
        "y",
        "nearest_x",
        "nearest_y",
        "distance_meters",
    ])?;
    for row in table.rows() {
        csv_writer.write_record([
            row.left_id.to_string(),
            row.right_id.to_string(),
            row.point.x().to_string(),
            row.point.y().to_string(),
            row.nearest_point.x().to_string(),
            row.nearest_point.y().to_string(),
            row.distance_meters.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes join rows as `left_id,right_id`, unmatched rows get an empty
/// right id.
pub fn write_join_rows<W: Write>(writer: W, rows: &[JoinRow]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(["left_id", "right_id"])?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes a point table using the spec's column names, the inverse of
/// the point reader.
pub fn write_point_set<W: Write>(writer: W, set: &PointSet, spec: &PointCsvSpec) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record([
        spec.id_field.as_str(),
        spec.x_field.as_str(),
        spec.y_field.as_str(),
    ])?;
    for feature in set.iter() {
        csv_writer.write_record([
            feature.id.to_string(),
            feature.geometry.x().to_string(),
            feature.geometry.y().to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes id plus WKT rows under the given column names.
pub fn write_wkt_records<W: Write>(
    writer: W,
    id_field: &str,
    wkt_field: &str,
    rows: &[(FeatureId, String)],
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record([id_field, wkt_field])?;
    for (id, wkt_text) in rows {
        csv_writer.write_record([&id.to_string(), wkt_text])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    use crate::crs::Crs;
    use crate::feature::{Feature, PointSet};
    use crate::table::read_point_set;
    use crate::vector::find_nearest_and_distance;

    #[test]
    fn test_write_nearest_table() {
        let mut left = PointSet::new(Crs::wgs84());
        left.push(Feature::new(1, Point::new(0.0, 51.5)));
        let mut right = PointSet::new(Crs::wgs84());
        right.push(Feature::new(10, Point::new(0.001, 51.5)));
        right.push(Feature::new(11, Point::new(10.0, 10.0)));
        let table = find_nearest_and_distance(&left, &right).unwrap();

        let mut buffer = Vec::new();
        write_nearest_table(&mut buffer, &table).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            Some("left_id,right_id,x,y,nearest_x,nearest_y,distance_meters"),
            lines.next()
        );

        let fields: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!("1", fields[0]);
        assert_eq!("10", fields[1]);

        let x: f64 = fields[2].parse().unwrap();
        let y: f64 = fields[3].parse().unwrap();
        assert!(x.abs() < 1e-6);
        assert!((y - 51.5).abs() < 1e-6);

        let distance: f64 = fields[6].parse().unwrap();
        assert!((distance - 69.7).abs() <= 69.7 * 0.05);
        assert_eq!(None, lines.next());
    }

    #[test]
    fn test_write_join_rows() {
        let rows = vec![
            JoinRow {
                left_id: FeatureId::Int(1),
                right_id: Some(FeatureId::Int(100)),
            },
            JoinRow {
                left_id: FeatureId::from("site_a"),
                right_id: None,
            },
        ];

        let mut buffer = Vec::new();
        write_join_rows(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!("left_id,right_id\n1,100\nsite_a,\n", text);
    }

    #[test]
    fn test_point_set_write_read_round_trip() {
        let spec = crate::table::PointCsvSpec {
            crs: Some(Crs::wgs84()),
            ..Default::default()
        };
        let mut set = PointSet::new(Crs::wgs84());
        set.push(Feature::new(1, Point::new(0.25, 51.5)));
        set.push(Feature::new(2, Point::new(-3.5, 40.0)));

        let mut buffer = Vec::new();
        write_point_set(&mut buffer, &set, &spec).unwrap();
        let returned = read_point_set(buffer.as_slice(), &spec).unwrap();
        assert_eq!(set, returned);
    }

    #[test]
    fn test_write_wkt_records() {
        let rows = vec![
            (FeatureId::Int(7), "POLYGON((0 0,1 0,1 1,0 1,0 0))".to_string()),
            (FeatureId::Int(8), "POINT(1 2)".to_string()),
        ];

        let mut buffer = Vec::new();
        write_wkt_records(&mut buffer, "fid", "geometry", &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("fid,geometry\n"));
        let returned = crate::table::read_id_text_column(
            text.as_bytes(),
            "fid",
            "geometry",
        )
        .unwrap();
        assert_eq!(rows, returned);
    }
}

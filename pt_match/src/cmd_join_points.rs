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
use std::fs::File;
use std::path::PathBuf;
use anyhow::Result;
use structopt::StructOpt;
use vector_util::table::{read_point_set, read_polygon_set, write_join_rows, PointCsvSpec, PolygonCsvSpec};
use vector_util::vector::{join_points_to_polygons, JoinHow, SpatialPredicate};
use vector_util::Crs;

#[derive(StructOpt)]
pub struct JoinPointsArgs {
    #[structopt(long, parse(from_os_str), help="Point table")]
    pub(crate) points_csv: PathBuf,

    #[structopt(long, parse(from_os_str), help="Polygon table with a WKT geometry column")]
    pub(crate) polygons_csv: PathBuf,

    #[structopt(long, help="CRS of the point table")]
    pub(crate) points_crs: Option<Crs>,

    #[structopt(long, help="CRS of the polygon table")]
    pub(crate) polygons_crs: Option<Crs>,

    #[structopt(long, default_value="fid")]
    pub(crate) point_id_field: String,

    #[structopt(long, default_value="lon")]
    pub(crate) x_field: String,

    #[structopt(long, default_value="lat")]
    pub(crate) y_field: String,

    #[structopt(long, default_value="fid")]
    pub(crate) polygon_id_field: String,

    #[structopt(long, default_value="geometry")]
    pub(crate) wkt_field: String,

    #[structopt(long, default_value="inner")]
    pub(crate) how: JoinHow,

    #[structopt(long, default_value="within")]
    pub(crate) predicate: SpatialPredicate,

    #[structopt(long, parse(from_os_str), help="Output csv")]
    pub(crate) out_csv: PathBuf,
}

pub fn join_points(args: &JoinPointsArgs) -> Result<()>
{
    let point_spec = PointCsvSpec {
        id_field: args.point_id_field.clone(),
        x_field: args.x_field.clone(),
        y_field: args.y_field.clone(),
        crs: args.points_crs.clone(),
    };
    let polygon_spec = PolygonCsvSpec {
        id_field: args.polygon_id_field.clone(),
        wkt_field: args.wkt_field.clone(),
        crs: args.polygons_crs.clone(),
    };

    let points = read_point_set(File::open(&args.points_csv)?, &point_spec)?;
    let polygons = read_polygon_set(File::open(&args.polygons_csv)?, &polygon_spec)?;

    let rows = join_points_to_polygons(&points, &polygons, args.how, args.predicate)?;

    write_join_rows(File::create(&args.out_csv)?, &rows)?;

    println!("Wrote {} join rows to {:?}", rows.len(), args.out_csv);

    Ok(())
}

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
use vector_util::table::{read_polygon_set, write_join_rows, PolygonCsvSpec};
use vector_util::vector::{join_polygons, JoinHow, SpatialPredicate};
use vector_util::Crs;

#[derive(StructOpt)]
pub struct JoinPolygonsArgs {
    #[structopt(long, parse(from_os_str), help="Polygon table driving the join")]
    pub(crate) left_csv: PathBuf,

    #[structopt(long, parse(from_os_str), help="Polygon table joined against")]
    pub(crate) right_csv: PathBuf,

    #[structopt(long, help="CRS of the left table")]
    pub(crate) left_crs: Option<Crs>,

    #[structopt(long, help="CRS of the right table")]
    pub(crate) right_crs: Option<Crs>,

    #[structopt(long, default_value="fid")]
    pub(crate) left_id_field: String,

    #[structopt(long, default_value="fid")]
    pub(crate) right_id_field: String,

    #[structopt(long, default_value="geometry")]
    pub(crate) wkt_field: String,

    #[structopt(long, default_value="inner")]
    pub(crate) how: JoinHow,

    #[structopt(long, default_value="intersects")]
    pub(crate) predicate: SpatialPredicate,

    #[structopt(long, parse(from_os_str), help="Output csv")]
    pub(crate) out_csv: PathBuf,
}

pub fn join_polygon_sets(args: &JoinPolygonsArgs) -> Result<()>
{
    let left_spec = PolygonCsvSpec {
        id_field: args.left_id_field.clone(),
        wkt_field: args.wkt_field.clone(),
        crs: args.left_crs.clone(),
    };
    let right_spec = PolygonCsvSpec {
        id_field: args.right_id_field.clone(),
        wkt_field: args.wkt_field.clone(),
        crs: args.right_crs.clone(),
    };

    let left = read_polygon_set(File::open(&args.left_csv)?, &left_spec)?;
    let right = read_polygon_set(File::open(&args.right_csv)?, &right_spec)?;

    let rows = join_polygons(&left, &right, args.how, args.predicate)?;

    write_join_rows(File::create(&args.out_csv)?, &rows)?;

    println!("Wrote {} join rows to {:?}", rows.len(), args.out_csv);

    Ok(())
}

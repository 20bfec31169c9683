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
use vector_util::convert::wkt_records;
use vector_util::table::{read_polygon_set, write_wkt_records, PolygonCsvSpec};
use vector_util::vector::filter_intersecting_polygons;
use vector_util::Crs;

#[derive(StructOpt)]
pub struct FilterPolygonsArgs {
    #[structopt(long, parse(from_os_str), help="Polygon table to filter")]
    pub(crate) in_csv: PathBuf,

    #[structopt(long, parse(from_os_str), help="Polygon table acting as the mask")]
    pub(crate) mask_csv: PathBuf,

    #[structopt(long, help="CRS of the input table")]
    pub(crate) in_crs: Option<Crs>,

    #[structopt(long, help="CRS of the mask table")]
    pub(crate) mask_crs: Option<Crs>,

    #[structopt(long, default_value="fid")]
    pub(crate) id_field: String,

    #[structopt(long, default_value="geometry")]
    pub(crate) wkt_field: String,

    #[structopt(long, parse(from_os_str), help="Output csv")]
    pub(crate) out_csv: PathBuf,
}

pub fn filter_polygons(args: &FilterPolygonsArgs) -> Result<()>
{
    let in_spec = PolygonCsvSpec {
        id_field: args.id_field.clone(),
        wkt_field: args.wkt_field.clone(),
        crs: args.in_crs.clone(),
    };
    let mask_spec = PolygonCsvSpec {
        crs: args.mask_crs.clone(),
        ..in_spec.clone()
    };

    let polygons = read_polygon_set(File::open(&args.in_csv)?, &in_spec)?;
    let mask = read_polygon_set(File::open(&args.mask_csv)?, &mask_spec)?;

    let kept = filter_intersecting_polygons(&polygons, &mask)?;

    let rows = wkt_records(&kept);
    write_wkt_records(
        File::create(&args.out_csv)?,
        &args.id_field,
        &args.wkt_field,
        &rows,
    )?;

    println!(
        "Kept {} of {} polygons, wrote {:?}",
        kept.len(),
        polygons.len(),
        args.out_csv
    );

    Ok(())
}

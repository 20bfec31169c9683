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
use vector_util::table::{read_point_set, write_nearest_table, PointCsvSpec};
use vector_util::vector::find_nearest_and_distance;
use vector_util::Crs;

#[derive(StructOpt)]
pub struct NearestArgs {
    #[structopt(long, parse(from_os_str), help="Point table to find matches for")]
    pub(crate) left_csv: PathBuf,

    #[structopt(long, parse(from_os_str), help="Point table to match against")]
    pub(crate) right_csv: PathBuf,

    #[structopt(long, help="CRS of the left table, an EPSG code or a proj4 string")]
    pub(crate) left_crs: Option<Crs>,

    #[structopt(long, help="CRS of the right table, defaults to the left CRS")]
    pub(crate) right_crs: Option<Crs>,

    #[structopt(long, default_value="fid")]
    pub(crate) left_id_field: String,

    #[structopt(long, default_value="fid")]
    pub(crate) right_id_field: String,

    #[structopt(long, default_value="lon")]
    pub(crate) x_field: String,

    #[structopt(long, default_value="lat")]
    pub(crate) y_field: String,

    #[structopt(long, parse(from_os_str), help="Output csv")]
    pub(crate) out_csv: PathBuf,
}

pub fn nearest(args: &NearestArgs) -> Result<()>
{
    let left_spec = PointCsvSpec {
        id_field: args.left_id_field.clone(),
        x_field: args.x_field.clone(),
        y_field: args.y_field.clone(),
        crs: args.left_crs.clone(),
    };
    let right_spec = PointCsvSpec {
        id_field: args.right_id_field.clone(),
        crs: args.right_crs.clone().or_else(|| args.left_crs.clone()),
        ..left_spec.clone()
    };

    let left = read_point_set(File::open(&args.left_csv)?, &left_spec)?;
    let right = read_point_set(File::open(&args.right_csv)?, &right_spec)?;

    let table = find_nearest_and_distance(&left, &right)?;

    write_nearest_table(File::create(&args.out_csv)?, &table)?;

    println!(
        "Wrote {} rows in {} to {:?}",
        table.len(),
        table.crs(),
        args.out_csv
    );

    Ok(())
}

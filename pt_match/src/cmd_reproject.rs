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
use vector_util::table::{read_point_set, write_point_set, PointCsvSpec};
use vector_util::vector::ensure_crs;
use vector_util::Crs;

#[derive(StructOpt)]
pub struct ReprojectArgs {
    #[structopt(long, parse(from_os_str), help="Point table to reproject")]
    pub(crate) in_csv: PathBuf,

    #[structopt(long, help="CRS of the input table")]
    pub(crate) in_crs: Option<Crs>,

    #[structopt(long, help="Target CRS, an EPSG code or a proj4 string")]
    pub(crate) to_crs: Crs,

    #[structopt(long, default_value="fid")]
    pub(crate) id_field: String,

    #[structopt(long, default_value="lon")]
    pub(crate) x_field: String,

    #[structopt(long, default_value="lat")]
    pub(crate) y_field: String,

    #[structopt(long, parse(from_os_str), help="Output csv")]
    pub(crate) out_csv: PathBuf,
}

pub fn reproject(args: &ReprojectArgs) -> Result<()>
{
    let spec = PointCsvSpec {
        id_field: args.id_field.clone(),
        x_field: args.x_field.clone(),
        y_field: args.y_field.clone(),
        crs: args.in_crs.clone(),
    };

    let points = read_point_set(File::open(&args.in_csv)?, &spec)?;
    let converted = ensure_crs(&points, &args.to_crs)?;

    write_point_set(File::create(&args.out_csv)?, &converted, &spec)?;

    println!(
        "Wrote {} points in {} to {:?}",
        converted.len(),
        args.to_crs,
        args.out_csv
    );

    Ok(())
}

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
use vector_util::convert::{geometry_to_wkt, hex_column_to_features};
use vector_util::table::{read_id_text_column, write_wkt_records};

#[derive(StructOpt)]
pub struct WkbToWktArgs {
    #[structopt(long, parse(from_os_str), help="Table with a hex encoded WKB column")]
    pub(crate) in_csv: PathBuf,

    #[structopt(long, default_value="fid")]
    pub(crate) id_field: String,

    #[structopt(long, default_value="geometry")]
    pub(crate) geometry_field: String,

    #[structopt(long, parse(from_os_str), help="Output csv")]
    pub(crate) out_csv: PathBuf,
}

pub fn wkb_to_wkt(args: &WkbToWktArgs) -> Result<()>
{
    let rows = read_id_text_column(
        File::open(&args.in_csv)?,
        &args.id_field,
        &args.geometry_field,
    )?;

    let features = hex_column_to_features(&rows)?;
    let wkt_rows: Vec<_> = features
        .iter()
        .map(|f| (f.id.clone(), geometry_to_wkt(&f.geometry)))
        .collect();

    write_wkt_records(
        File::create(&args.out_csv)?,
        &args.id_field,
        &args.geometry_field,
        &wkt_rows,
    )?;

    println!("Converted {} geometries to WKT in {:?}", wkt_rows.len(), args.out_csv);

    Ok(())
}

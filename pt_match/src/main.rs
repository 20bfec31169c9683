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
mod cmd_filter_polygons;
mod cmd_join_points;
mod cmd_join_polygons;
mod cmd_nearest;
mod cmd_reproject;
mod cmd_wkb_to_wkt;

use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use structopt::StructOpt;
use crate::cmd_filter_polygons::{filter_polygons, FilterPolygonsArgs};
use crate::cmd_join_points::{join_points, JoinPointsArgs};
use crate::cmd_join_polygons::{join_polygon_sets, JoinPolygonsArgs};
use crate::cmd_nearest::{nearest, NearestArgs};
use crate::cmd_reproject::{reproject, ReprojectArgs};
use crate::cmd_wkb_to_wkt::{wkb_to_wkt, WkbToWktArgs};

#[derive(StructOpt)]
struct Cli {

    #[structopt(long, default_value = "Warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    cmd: Command
}

#[derive(StructOpt)]
enum Command {

    #[structopt(help="Nearest right point and meter distance for every left point")]
    Nearest(NearestArgs),

    #[structopt(help="Reprojects a point table to a target CRS")]
    Reproject(ReprojectArgs),

    JoinPoints(JoinPointsArgs),

    JoinPolygons(JoinPolygonsArgs),

    FilterPolygons(FilterPolygonsArgs),

    #[structopt(help="Rewrites a hex WKB geometry column as WKT")]
    WkbToWkt(WkbToWktArgs),
}

fn run() -> Result<()> {

    let args = Cli::from_args();

    SimpleLogger::new().with_level(args.log_level).init()?;

    match &args.cmd {

        Command::Nearest(r) => {
            nearest(r)?;
        }
        Command::Reproject(r) => {
            reproject(r)?;
        }
        Command::JoinPoints(r) => {
            join_points(r)?;
        }
        Command::JoinPolygons(r) => {
            join_polygon_sets(r)?;
        }
        Command::FilterPolygons(r) => {
            filter_polygons(r)?;
        }
        Command::WkbToWkt(r) => {
            wkb_to_wkt(r)?;
        }
    }

    Ok(())
}

fn main() {
    run().unwrap();
}

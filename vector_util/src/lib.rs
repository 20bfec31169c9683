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
/// CRS aware vector utilities used by the point matching tool

pub mod convert;
pub mod crs;
pub mod error;
pub mod feature;
pub mod table;
pub mod vector;

pub use crate::crs::Crs;
pub use crate::error::{Error, Result};
pub use crate::feature::{Feature, FeatureId, FeatureSet, PointSet, PolygonSet};

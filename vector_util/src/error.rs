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

/// Everything that can go wrong in this crate, one variant per failure
/// family so callers can match on the kind instead of parsing messages.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A CRS dependent operation was handed a feature set without a CRS.
    #[error("the {side} feature set has no coordinate reference system defined")]
    MissingCrs { side: &'static str },

    /// The candidate set of a nearest search has no features at all.
    #[error("the candidate feature set is empty, no nearest feature exists")]
    EmptyCandidates,

    #[error("EPSG:{code} is not in the bundled registry")]
    UnknownEpsg { code: u16 },

    #[error("projection failure: {0}")]
    Projection(#[from] proj4rs::errors::Error),

    #[error("predicate {predicate} does not apply to {operation}")]
    UnsupportedPredicate {
        predicate: &'static str,
        operation: &'static str,
    },

    #[error("invalid WKT: {message}")]
    WktParse { message: String },

    #[error("WKB codec failure: {message}")]
    WkbCodec { message: String },

    #[error("invalid hex encoded geometry: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("column {name:?} is not in the header row")]
    MissingColumn { name: String },

    #[error("row {row}: cannot parse column {column:?} value {value:?} as a number")]
    BadField {
        row: usize,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

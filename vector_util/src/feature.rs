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
use std::fmt;

use geo::{Point, Polygon};
use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::error::{Error, Result};

/// Feature identifier as it came out of the source table.  Keys that
/// look like integers are kept as integers, everything else stays text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    Int(i64),
    Text(String),
}

impl FeatureId {
    pub fn parse(raw: &str) -> FeatureId {
        match raw.trim().parse::<i64>() {
            Ok(value) => FeatureId::Int(value),
            Err(_) => FeatureId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Int(value) => write!(f, "{}", value),
            FeatureId::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for FeatureId {
    fn from(value: i64) -> FeatureId {
        FeatureId::Int(value)
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> FeatureId {
        FeatureId::Text(value.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> FeatureId {
        FeatureId::Text(value)
    }
}

/// One identified geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature<G> {
    pub id: FeatureId,
    pub geometry: G,
}

impl<G> Feature<G> {
    pub fn new(id: impl Into<FeatureId>, geometry: G) -> Feature<G> {
        Feature {
            id: id.into(),
            geometry,
        }
    }
}

/// An ordered collection of features sharing one CRS, the in memory
/// equivalent of a loaded geometry table.  Row order is preserved by
/// every operation in this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet<G> {
    crs: Option<Crs>,
    features: Vec<Feature<G>>,
}

pub type PointSet = FeatureSet<Point<f64>>;
pub type PolygonSet = FeatureSet<Polygon<f64>>;

impl<G> FeatureSet<G> {
    pub fn new(crs: Crs) -> FeatureSet<G> {
        FeatureSet {
            crs: Some(crs),
            features: Vec::new(),
        }
    }

    pub fn without_crs() -> FeatureSet<G> {
        FeatureSet {
            crs: None,
            features: Vec::new(),
        }
    }

    pub fn from_features(crs: Crs, features: Vec<Feature<G>>) -> FeatureSet<G> {
        FeatureSet {
            crs: Some(crs),
            features,
        }
    }

    pub fn push(&mut self, feature: Feature<G>) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    /// The set's CRS, or a [`Error::MissingCrs`] naming which side of the
    /// failed operation had none.
    pub fn require_crs(&self, side: &'static str) -> Result<&Crs> {
        self.crs.as_ref().ok_or(Error::MissingCrs { side })
    }

    pub fn features(&self) -> &[Feature<G>] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature<G>> {
        self.features.iter()
    }
}

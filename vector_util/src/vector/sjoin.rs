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
use std::str::FromStr;

use geo::{BoundingRect, Contains, Intersects, Point, Polygon};
use itertools::Itertools;
use log::info;
use rstar::{RTree, RTreeObject, AABB};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::feature::{FeatureId, PointSet, PolygonSet};
use crate::vector::ensure_crs;

/// How two geometries have to relate for a join row to be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialPredicate {
    Within,
    Intersects,
    Contains,
}

impl SpatialPredicate {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialPredicate::Within => "within",
            SpatialPredicate::Intersects => "intersects",
            SpatialPredicate::Contains => "contains",
        }
    }

    fn polygon_pair(&self, left: &Polygon<f64>, right: &Polygon<f64>) -> bool {
        match self {
            SpatialPredicate::Within => right.contains(left),
            SpatialPredicate::Intersects => left.intersects(right),
            SpatialPredicate::Contains => left.contains(right),
        }
    }
}

impl fmt::Display for SpatialPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpatialPredicate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<SpatialPredicate, String> {
        match s.to_ascii_lowercase().as_str() {
            "within" => Ok(SpatialPredicate::Within),
            "intersects" => Ok(SpatialPredicate::Intersects),
            "contains" => Ok(SpatialPredicate::Contains),
            _ => Err(format!(
                "unknown predicate {:?}, expected within, intersects or contains",
                s
            )),
        }
    }
}

/// Inner joins drop unmatched left features, left joins keep them with
/// an empty right id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinHow {
    Inner,
    Left,
}

impl JoinHow {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinHow::Inner => "inner",
            JoinHow::Left => "left",
        }
    }
}

impl fmt::Display for JoinHow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JoinHow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<JoinHow, String> {
        match s.to_ascii_lowercase().as_str() {
            "inner" => Ok(JoinHow::Inner),
            "left" => Ok(JoinHow::Left),
            _ => Err(format!("unknown join type {:?}, expected inner or left", s)),
        }
    }
}

/// One id pair out of a spatial join.  A left feature matching several
/// right features produces several rows, in the right set's order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinRow {
    pub left_id: FeatureId,
    pub right_id: Option<FeatureId>,
}

/// Envelope plus the feature's position in its source set, the entry
/// stored in the candidate lookup tree.
#[derive(Debug, Clone, Copy)]
struct EnvelopeEntry {
    idx: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for EnvelopeEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn polygon_envelope(polygon: &Polygon<f64>) -> Option<AABB<[f64; 2]>> {
    let rect = polygon.bounding_rect()?;
    Some(AABB::from_corners(
        [rect.min().x, rect.min().y],
        [rect.max().x, rect.max().y],
    ))
}

fn polygon_rtree(polygons: &PolygonSet) -> RTree<EnvelopeEntry> {
    let mut entries = Vec::with_capacity(polygons.len());
    for (idx, feature) in polygons.iter().enumerate() {
        // degenerate empty polygons have no envelope and never match
        if let Some(envelope) = polygon_envelope(&feature.geometry) {
            entries.push(EnvelopeEntry { idx, envelope });
        }
    }
    RTree::bulk_load(entries)
}

/// Joins each point with the polygons it falls in.  Points are aligned
/// to the polygon set's CRS before testing, candidate polygons come out
/// of an envelope tree so only plausible pairs hit the real predicate.
pub fn join_points_to_polygons(
    points: &PointSet,
    polygons: &PolygonSet,
    how: JoinHow,
    predicate: SpatialPredicate,
) -> Result<Vec<JoinRow>> {
    info!("Starting spatial join of points to polygons");

    if predicate == SpatialPredicate::Contains {
        return Err(Error::UnsupportedPredicate {
            predicate: "contains",
            operation: "a point to polygon join",
        });
    }

    points.require_crs("points")?;
    let polygon_crs = polygons.require_crs("polygons")?;
    let points = ensure_crs(points, polygon_crs)?;

    let tree = polygon_rtree(polygons);
    let mut rows = Vec::new();
    for feature in points.iter() {
        let point = feature.geometry;
        let query = AABB::from_point([point.x(), point.y()]);
        let mut candidates = tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.idx)
            .collect_vec();
        candidates.sort_unstable();

        let mut matched = false;
        for idx in candidates {
            let polygon = &polygons.features()[idx];
            let hit = match predicate {
                SpatialPredicate::Within => polygon.geometry.contains(&point),
                SpatialPredicate::Intersects => polygon.geometry.intersects(&point),
                SpatialPredicate::Contains => unreachable!(),
            };
            if hit {
                matched = true;
                rows.push(JoinRow {
                    left_id: feature.id.clone(),
                    right_id: Some(polygon.id.clone()),
                });
            }
        }
        if !matched && how == JoinHow::Left {
            rows.push(JoinRow {
                left_id: feature.id.clone(),
                right_id: None,
            });
        }
    }

    info!("Spatial join produced {} rows", rows.len());
    Ok(rows)
}

/// Joins two polygon sets on the given predicate, read as
/// `left predicate right`.  The left set is aligned to the right set's
/// CRS before testing.
pub fn join_polygons(
    left: &PolygonSet,
    right: &PolygonSet,
    how: JoinHow,
    predicate: SpatialPredicate,
) -> Result<Vec<JoinRow>> {
    info!("Starting spatial join of two polygon sets");

    left.require_crs("left")?;
    let right_crs = right.require_crs("right")?;
    let left = ensure_crs(left, right_crs)?;

    let tree = polygon_rtree(right);
    let mut rows = Vec::new();
    for feature in left.iter() {
        let mut matched = false;
        if let Some(envelope) = polygon_envelope(&feature.geometry) {
            let mut candidates = tree
                .locate_in_envelope_intersecting(&envelope)
                .map(|entry| entry.idx)
                .collect_vec();
            candidates.sort_unstable();

            for idx in candidates {
                let candidate = &right.features()[idx];
                if predicate.polygon_pair(&feature.geometry, &candidate.geometry) {
                    matched = true;
                    rows.push(JoinRow {
                        left_id: feature.id.clone(),
                        right_id: Some(candidate.id.clone()),
                    });
                }
            }
        }
        if !matched && how == JoinHow::Left {
            rows.push(JoinRow {
                left_id: feature.id.clone(),
                right_id: None,
            });
        }
    }

    info!("Spatial join produced {} rows", rows.len());
    Ok(rows)
}

/// Keeps the left polygons intersecting at least one right polygon.
/// Survivors keep their id, order and the left set's CRS.
pub fn filter_intersecting_polygons(left: &PolygonSet, right: &PolygonSet) -> Result<PolygonSet> {
    info!("Filtering polygons against the mask set");

    let left_crs = left.require_crs("left")?;
    right.require_crs("right")?;
    let right = ensure_crs(right, left_crs)?;

    let tree = polygon_rtree(&right);
    let mut kept = PolygonSet::new(left_crs.clone());
    for feature in left.iter() {
        if let Some(envelope) = polygon_envelope(&feature.geometry) {
            let hit = tree
                .locate_in_envelope_intersecting(&envelope)
                .any(|entry| right.features()[entry.idx].geometry.intersects(&feature.geometry));
            if hit {
                kept.push(feature.clone());
            }
        }
    }

    info!("Kept {} of {} polygons", kept.len(), left.len());
    Ok(kept)
}

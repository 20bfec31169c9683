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
use geo::{Coord, EuclideanDistance, Point};
use log::{debug, info};

use crate::crs::{utm_zone_for, Crs};
use crate::error::{Error, Result};
use crate::feature::{FeatureId, PointSet};
use crate::vector::Reprojector;

/// One matched pair.  Both coordinates are reported in the left set's
/// original CRS, the separation is measured on the estimated metric
/// plane and is always in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestRow {
    pub left_id: FeatureId,
    pub right_id: FeatureId,
    pub point: Point<f64>,
    pub nearest_point: Point<f64>,
    pub distance_meters: f64,
}

/// Result of a nearest point search, one row per left feature in the
/// left set's order.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestTable {
    crs: Crs,
    rows: Vec<NearestRow>,
}

impl NearestTable {
    /// CRS the row coordinates are expressed in.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn rows(&self) -> &[NearestRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Picks the UTM system covering the center of the set's extent.
///
/// Sets in a projected CRS get the center converted to lon/lat first.
/// Zone edges round toward the higher zone, the hemisphere comes from
/// the sign of the center latitude.
pub fn estimate_utm_crs(points: &PointSet) -> Result<Crs> {
    let source = points.require_crs("input")?;
    assert!(
        !points.is_empty(),
        "cannot estimate a metric CRS for an empty set"
    );

    let mut x_min = f64::MAX;
    let mut y_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_max = f64::MIN;
    for feature in points.iter() {
        x_min = x_min.min(feature.geometry.x());
        x_max = x_max.max(feature.geometry.x());
        y_min = y_min.min(feature.geometry.y());
        y_max = y_max.max(feature.geometry.y());
    }

    let mut center = Coord {
        x: (x_min + x_max) / 2.0,
        y: (y_min + y_max) / 2.0,
    };
    if !source.is_geographic()? {
        let to_geographic = Reprojector::between(source, &Crs::wgs84())?;
        center = to_geographic.project_coord(center)?;
        debug!("Extent center in lon/lat: {:?}", center);
    }

    let zone = utm_zone_for(center.x);
    let north = center.y >= 0.0;
    let utm = Crs::utm(zone, north);
    info!("Estimated UTM CRS: {}", utm);
    Ok(utm)
}

/// For every left point, the closest right point by planar distance in
/// an automatically estimated UTM system, with the separation in meters.
///
/// Every left feature produces exactly one row, in the left set's order.
/// Equidistant candidates resolve to the first one in the right set's
/// positional order.  The scan is a full pass over every left/right
/// pair, which is fine at the table sizes this tool is used on.
pub fn find_nearest_and_distance(left: &PointSet, right: &PointSet) -> Result<NearestTable> {
    info!("Starting nearest point and distance calculation");

    let left_crs = left.require_crs("left")?.clone();
    right.require_crs("right")?;
    if right.is_empty() {
        return Err(Error::EmptyCandidates);
    }

    info!("Original CRS: {}", left_crs);

    if left.is_empty() {
        return Ok(NearestTable {
            crs: left_crs,
            rows: Vec::new(),
        });
    }

    let metric_crs = estimate_utm_crs(left)?;
    let left_metric = left.to_crs(&metric_crs)?;
    let right_metric = right.to_crs(&metric_crs)?;
    info!("Converted both point sets to {} for the distance scan", metric_crs);

    let back = Reprojector::between(&metric_crs, &left_crs)?;

    let mut rows = Vec::with_capacity(left.len());
    for metric in left_metric.iter() {
        let mut nearest_idx = 0;
        let mut nearest_distance = f64::INFINITY;
        for (candidate_idx, candidate) in right_metric.iter().enumerate() {
            let distance = metric.geometry.euclidean_distance(&candidate.geometry);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_idx = candidate_idx;
            }
        }

        // both ends of the matched pair go back through the same
        // transform, so the reported pair is exactly what was measured
        let nearest = &right_metric.features()[nearest_idx];
        rows.push(NearestRow {
            left_id: metric.id.clone(),
            right_id: nearest.id.clone(),
            point: back.project_point(metric.geometry)?,
            nearest_point: back.project_point(nearest.geometry)?,
            distance_meters: nearest_distance,
        });
    }

    info!(
        "Completed nearest point and distance calculation, {} rows",
        rows.len()
    );
    Ok(NearestTable {
        crs: left_crs,
        rows,
    })
}

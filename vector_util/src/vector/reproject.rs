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
use geo::{Coord, LineString, Point, Polygon};
use log::info;
use proj4rs::proj::Proj;

use crate::crs::Crs;
use crate::error::Result;
use crate::feature::{Feature, FeatureSet};

/// A resolved one way transform between two reference systems.
///
/// proj4rs works in radians for geographic systems, so degree
/// conversion happens here and callers only ever see degrees or
/// planar units, whichever the CRS uses.
pub struct Reprojector {
    source: Proj,
    target: Proj,
    source_is_geographic: bool,
    target_is_geographic: bool,
}

impl Reprojector {
    pub fn between(source: &Crs, target: &Crs) -> Result<Reprojector> {
        Ok(Reprojector {
            source: source.resolve()?,
            target: target.resolve()?,
            source_is_geographic: source.is_geographic()?,
            target_is_geographic: target.is_geographic()?,
        })
    }

    pub fn project_coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let mut xyz = (coord.x, coord.y, 0.0);
        if self.source_is_geographic {
            xyz.0 = xyz.0.to_radians();
            xyz.1 = xyz.1.to_radians();
        }

        proj4rs::transform::transform(&self.source, &self.target, &mut xyz)?;

        if self.target_is_geographic {
            xyz.0 = xyz.0.to_degrees();
            xyz.1 = xyz.1.to_degrees();
        }
        Ok(Coord { x: xyz.0, y: xyz.1 })
    }

    pub fn project_point(&self, point: Point<f64>) -> Result<Point<f64>> {
        Ok(Point(self.project_coord(point.0)?))
    }

    pub fn project_polygon(&self, polygon: &Polygon<f64>) -> Result<Polygon<f64>> {
        let exterior = self.project_line_string(polygon.exterior())?;

        let mut interiors = Vec::with_capacity(polygon.interiors().len());
        for ring in polygon.interiors() {
            interiors.push(self.project_line_string(ring)?);
        }
        Ok(Polygon::new(exterior, interiors))
    }

    fn project_line_string(&self, line: &LineString<f64>) -> Result<LineString<f64>> {
        let mut coords = Vec::with_capacity(line.0.len());
        for coord in line.coords() {
            coords.push(self.project_coord(*coord)?);
        }
        Ok(LineString(coords))
    }
}

/// Geometry kinds that can be pushed through a [`Reprojector`].
pub trait Reproject: Sized {
    fn reproject(&self, projector: &Reprojector) -> Result<Self>;
}

impl Reproject for Point<f64> {
    fn reproject(&self, projector: &Reprojector) -> Result<Point<f64>> {
        projector.project_point(*self)
    }
}

impl Reproject for Polygon<f64> {
    fn reproject(&self, projector: &Reprojector) -> Result<Polygon<f64>> {
        projector.project_polygon(self)
    }
}

impl<G: Reproject> FeatureSet<G> {
    /// A reprojected copy of the whole set, the receiver stays untouched.
    pub fn to_crs(&self, target: &Crs) -> Result<FeatureSet<G>> {
        let source = self.require_crs("input")?;
        let projector = Reprojector::between(source, target)?;

        let mut features = Vec::with_capacity(self.len());
        for feature in self.iter() {
            features.push(Feature {
                id: feature.id.clone(),
                geometry: feature.geometry.reproject(&projector)?,
            });
        }
        Ok(FeatureSet::from_features(target.clone(), features))
    }
}

/// Reprojects `set` when its CRS differs from `desired`, otherwise hands
/// back an unchanged copy.  The usual normalization step right after a
/// table is loaded.
pub fn ensure_crs<G: Reproject + Clone>(set: &FeatureSet<G>, desired: &Crs) -> Result<FeatureSet<G>> {
    let current = set.require_crs("input")?;

    if current == desired {
        info!("CRS already matches the desired CRS: {}", desired);
        return Ok(set.clone());
    }

    info!("Converting CRS from {} to {}", current, desired);
    set.to_crs(desired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    use crate::feature::PointSet;

    #[test]
    fn test_degrees_to_utm_magnitude() {
        let projector = Reprojector::between(&Crs::wgs84(), &Crs::utm(31, true)).unwrap();
        let projected = projector.project_point(Point::new(0.0, 51.5)).unwrap();

        assert!(projected.x() > 280_000.0 && projected.x() < 300_000.0);
        assert!(projected.y() > 5_650_000.0 && projected.y() < 5_750_000.0);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let utm = Crs::utm(31, true);
        let there = Reprojector::between(&Crs::wgs84(), &utm).unwrap();
        let back = Reprojector::between(&utm, &Crs::wgs84()).unwrap();

        let original = Point::new(0.0, 51.5);
        let returned = back
            .project_point(there.project_point(original).unwrap())
            .unwrap();

        assert!(approx_eq!(f64, original.x(), returned.x(), epsilon = 1e-6));
        assert!(approx_eq!(f64, original.y(), returned.y(), epsilon = 1e-6));
    }

    #[test]
    fn test_polygon_rings_survive() {
        let exterior = LineString(vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 0.0, y: 0.0 },
        ]);
        let hole = LineString(vec![
            Coord { x: 0.25, y: 0.25 },
            Coord { x: 0.75, y: 0.25 },
            Coord { x: 0.75, y: 0.75 },
            Coord { x: 0.25, y: 0.75 },
            Coord { x: 0.25, y: 0.25 },
        ]);
        let polygon = Polygon::new(exterior, vec![hole]);

        let projector = Reprojector::between(&Crs::wgs84(), &Crs::utm(31, true)).unwrap();
        let projected = projector.project_polygon(&polygon).unwrap();

        assert_eq!(5, projected.exterior().0.len());
        assert_eq!(1, projected.interiors().len());
        assert_eq!(
            projected.exterior().0.first(),
            projected.exterior().0.last()
        );
    }

    #[test]
    fn test_to_crs_leaves_source_untouched() {
        let mut set = PointSet::new(Crs::wgs84());
        set.push(Feature::new(1, Point::new(0.0, 51.5)));

        let projected = set.to_crs(&Crs::utm(31, true)).unwrap();

        assert_eq!(Some(&Crs::wgs84()), set.crs());
        assert_eq!(Point::new(0.0, 51.5), set.features()[0].geometry);
        assert_eq!(Some(&Crs::utm(31, true)), projected.crs());
        assert_ne!(projected.features()[0].geometry, set.features()[0].geometry);
    }

    #[test]
    fn test_ensure_crs_noop_when_matching() {
        let mut set = PointSet::new(Crs::wgs84());
        set.push(Feature::new(1, Point::new(10.0, 10.0)));

        let unchanged = ensure_crs(&set, &Crs::wgs84()).unwrap();
        assert_eq!(set, unchanged);
    }

    #[test]
    fn test_ensure_crs_requires_crs() {
        let set: PointSet = PointSet::without_crs();
        let err = ensure_crs(&set, &Crs::wgs84()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::MissingCrs { side: "input" }
        ));
    }
}

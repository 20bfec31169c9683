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

use proj4rs::proj::Proj;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A coordinate reference system, either a code from the bundled EPSG
/// registry or a raw proj4 definition string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crs {
    Epsg(u16),
    Proj4(String),
}

impl Crs {
    pub fn wgs84() -> Crs {
        Crs::Epsg(4326)
    }

    /// The WGS84 based UTM system for the given zone and hemisphere.
    pub fn utm(zone: u8, north: bool) -> Crs {
        assert!(zone >= 1 && zone <= 60, "UTM zone {} out of range", zone);
        let base = if north { 32600 } else { 32700 };
        Crs::Epsg(base + zone as u16)
    }

    pub fn proj_string(&self) -> Result<String> {
        match self {
            Crs::Epsg(code) => {
                let def = crs_definitions::from_code(*code)
                    .ok_or(Error::UnknownEpsg { code: *code })?;
                Ok(def.proj4.to_string())
            }
            Crs::Proj4(text) => Ok(text.clone()),
        }
    }

    /// Builds the runtime projection for this system.
    pub fn resolve(&self) -> Result<Proj> {
        let text = self.proj_string()?;
        Ok(Proj::from_proj_string(&text)?)
    }

    /// True when coordinates in this system are lon/lat degrees rather
    /// than planar units.
    pub fn is_geographic(&self) -> Result<bool> {
        let text = self.proj_string()?;
        Ok(text.split_whitespace().any(|token| {
            matches!(
                token,
                "+proj=longlat" | "+proj=latlong" | "+proj=lonlat" | "+proj=latlon"
            )
        }))
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{}", code),
            Crs::Proj4(text) => write!(f, "{}", text),
        }
    }
}

/// Accepts `4326`, `EPSG:4326` or a proj4 string.  Anything that is not
/// recognizably an EPSG code is kept verbatim as a proj4 definition, bad
/// definitions surface later when the CRS is resolved.
impl FromStr for Crs {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Crs, Self::Err> {
        let trimmed = s.trim();

        if let Some(code_text) = trimmed
            .strip_prefix("EPSG:")
            .or_else(|| trimmed.strip_prefix("epsg:"))
        {
            if let Ok(code) = code_text.parse::<u16>() {
                return Ok(Crs::Epsg(code));
            }
        }
        if let Ok(code) = trimmed.parse::<u16>() {
            return Ok(Crs::Epsg(code));
        }

        Ok(Crs::Proj4(trimmed.to_string()))
    }
}

/// UTM zone containing the given longitude.  Longitudes on a zone edge
/// fall in the higher zone, the antimeridian clamps to the valid range.
pub fn utm_zone_for(lon: f64) -> u8 {
    let zone = ((lon + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_zone_for() {
        assert_eq!(31, utm_zone_for(0.0));
        assert_eq!(31, utm_zone_for(5.9999));
        assert_eq!(32, utm_zone_for(6.0));
        assert_eq!(50, utm_zone_for(116.0));
        assert_eq!(10, utm_zone_for(-122.0));
        assert_eq!(1, utm_zone_for(-180.0));
        assert_eq!(1, utm_zone_for(-179.99));
        assert_eq!(60, utm_zone_for(179.99));
        assert_eq!(60, utm_zone_for(180.0));
    }

    #[test]
    fn test_utm_codes() {
        assert_eq!(Crs::Epsg(32631), Crs::utm(31, true));
        assert_eq!(Crs::Epsg(32733), Crs::utm(33, false));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Crs::Epsg(4326), "4326".parse().unwrap());
        assert_eq!(Crs::Epsg(4326), "EPSG:4326".parse().unwrap());
        assert_eq!(Crs::Epsg(32631), "epsg:32631".parse().unwrap());

        let proj4 = "+proj=longlat +datum=WGS84 +no_defs";
        assert_eq!(Crs::Proj4(proj4.to_string()), proj4.parse().unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!("EPSG:4326", Crs::wgs84().to_string());
        assert_eq!("+proj=abc", Crs::Proj4("+proj=abc".to_string()).to_string());
    }

    #[test]
    fn test_resolve() {
        assert!(Crs::wgs84().resolve().is_ok());
        assert!(Crs::Epsg(32631).resolve().is_ok());

        let err = Crs::Epsg(65000).resolve().unwrap_err();
        assert!(matches!(err, Error::UnknownEpsg { code: 65000 }));
    }

    #[test]
    fn test_is_geographic() {
        assert!(Crs::wgs84().is_geographic().unwrap());
        assert!(!Crs::Epsg(32631).is_geographic().unwrap());

        let longlat = Crs::Proj4("+proj=longlat +datum=WGS84 +no_defs".to_string());
        assert!(longlat.is_geographic().unwrap());
    }
}

//! Inverse UTM projection (easting/northing + zone -> WGS84 lat/lng).
//!
//! Source geometry is digitized in planar UTM coordinates; everything past
//! the load boundary works in geographic degrees, so this runs once per
//! vertex at load time. Pure and deterministic: same inputs give
//! bit-identical outputs.

use thiserror::Error;

use crate::models::GeoPoint;

/// Zone letter outside the C..X band (I and O are not used).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("zone letter '{0}' out of range (must be between C and X)")]
pub struct InvalidZone(pub char);

const K0: f64 = 0.9996;
const E: f64 = 0.00669438;
const R: f64 = 6_378_137.0;

const E2: f64 = E * E;
const E3: f64 = E2 * E;
const E_P2: f64 = E / (1.0 - E);

const M1: f64 = 1.0 - E / 4.0 - 3.0 * E2 / 64.0 - 5.0 * E3 / 256.0;

/// Convert a UTM coordinate to geographic latitude/longitude.
///
/// The zone letter selects the hemisphere: `N` and above is northern,
/// below `N` the standard 10,000,000 m false northing is removed first.
/// Lowercase letters are accepted.
pub fn to_latlng(
    easting: f64,
    northing: f64,
    zone_number: u8,
    zone_letter: char,
) -> Result<GeoPoint, InvalidZone> {
    // sqrt() is not const-callable, so the derived constants live here.
    let sqrt_e = (1.0 - E).sqrt();
    let e_: f64 = (1.0 - sqrt_e) / (1.0 + sqrt_e);
    let e_2 = e_ * e_;
    let e_3 = e_2 * e_;
    let e_4 = e_3 * e_;
    let e_5 = e_4 * e_;

    let p2 = 3.0 / 2.0 * e_ - 27.0 / 32.0 * e_3 + 269.0 / 512.0 * e_5;
    let p3 = 21.0 / 16.0 * e_2 - 55.0 / 32.0 * e_4;
    let p4 = 151.0 / 96.0 * e_3 - 417.0 / 128.0 * e_5;
    let p5 = 1097.0 / 512.0 * e_4;

    let x = easting - 500_000.0;
    let mut y = northing;

    let letter = zone_letter.to_ascii_uppercase();
    if !('C'..='X').contains(&letter) || letter == 'I' || letter == 'O' {
        return Err(InvalidZone(zone_letter));
    }
    let northern = letter >= 'N';

    if !northern {
        y -= 10_000_000.0;
    }

    let m = y / K0;
    let mu = m / (R * M1);

    // Footpoint latitude from the meridian arc.
    let p_rad = mu
        + p2 * (2.0 * mu).sin()
        + p3 * (4.0 * mu).sin()
        + p4 * (6.0 * mu).sin()
        + p5 * (8.0 * mu).sin();

    let p_sin = p_rad.sin();
    let p_sin2 = p_sin * p_sin;

    let p_cos = p_rad.cos();

    let p_tan = p_sin / p_cos;
    let p_tan2 = p_tan * p_tan;
    let p_tan4 = p_tan2 * p_tan2;

    let ep_sin = 1.0 - E * p_sin2;
    let ep_sin_sqrt = (1.0 - E * p_sin2).sqrt();

    let n = R / ep_sin_sqrt;
    let r = (1.0 - E) / ep_sin;

    let c = e_ * p_cos * p_cos;
    let c2 = c * c;

    let d = x / (n * K0);
    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d3 * d;
    let d5 = d4 * d;
    let d6 = d5 * d;

    let latitude = p_rad
        - (p_tan / r)
            * (d2 / 2.0 - d4 / 24.0 * (5.0 + 3.0 * p_tan2 + 10.0 * c - 4.0 * c2 - 9.0 * E_P2))
        + d6 / 720.0
            * (61.0 + 90.0 * p_tan2 + 298.0 * c + 45.0 * p_tan4 - 252.0 * E_P2 - 3.0 * c2);

    let longitude = (d
        - d3 / 6.0 * (1.0 + 2.0 * p_tan2 + c)
        + d5 / 120.0 * (5.0 - 2.0 * c + 28.0 * p_tan2 - 3.0 * c2 + 8.0 * E_P2 + 24.0 * p_tan4))
        / p_cos;

    Ok(GeoPoint {
        lat: latitude.to_degrees(),
        lng: longitude.to_degrees() + f64::from(central_longitude(zone_number)),
    })
}

/// Central meridian of a UTM zone, in degrees.
fn central_longitude(zone_number: u8) -> i32 {
    (i32::from(zone_number) - 1) * 6 - 180 + 3
}

//! Transverse Mercator on the GRS80 ellipsoid.
//!
//! Uses the sixth-order Krüger series in the third flattening `n`
//! (Karney, "Transverse Mercator with an accuracy of a few nanometers",
//! 2011), which is accurate to well below a millimetre across the few
//! degrees of longitude spanned by the Polish grids.

/// GRS80 semi-major axis (metres)
pub const GRS80_A: f64 = 6_378_137.0;
/// GRS80 flattening
pub const GRS80_F: f64 = 1.0 / 298.257_222_101;

/// Defining parameters of one Transverse Mercator grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TmParams {
    pub central_meridian_deg: f64,
    pub scale: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

/// Geodetic coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

/// Precomputed series for one grid.
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    params: TmParams,
    /// Eccentricity
    e: f64,
    /// Rectifying radius times the scale factor
    ka: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl TransverseMercator {
    pub fn new(params: TmParams) -> Self {
        let f = GRS80_F;
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let rectifying = GRS80_A / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1_983_433.0 * n6 / 1_935_360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167_603.0 * n6 / 181_440.0,
            49561.0 * n4 / 161_280.0 - 179.0 * n5 / 168.0 + 6_601_661.0 * n6 / 7_257_600.0,
            34729.0 * n5 / 80640.0 - 3_418_889.0 * n6 / 1_995_840.0,
            212_378_941.0 * n6 / 319_334_400.0,
        ];

        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604_800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1_118_711.0 * n6 / 3_870_720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161_280.0 - 11.0 * n5 / 504.0 - 830_251.0 * n6 / 7_257_600.0,
            4583.0 * n5 / 161_280.0 - 108_847.0 * n6 / 3_991_680.0,
            20_648_693.0 * n6 / 638_668_800.0,
        ];

        Self {
            params,
            e: (f * (2.0 - f)).sqrt(),
            ka: params.scale * rectifying,
            alpha,
            beta,
        }
    }

    pub fn params(&self) -> &TmParams {
        &self.params
    }

    /// Geodetic → grid (easting, northing)
    pub fn forward(&self, geo: Geodetic) -> (f64, f64) {
        let phi = geo.lat_deg.to_radians();
        let lambda = (geo.lon_deg - self.params.central_meridian_deg).to_radians();

        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - self.e * (self.e * sin_phi).atanh()).sinh();
        let xi_p = t.atan2(lambda.cos());
        let eta_p = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        (
            self.params.false_easting + self.ka * eta,
            self.params.false_northing + self.ka * xi,
        )
    }

    /// Grid (easting, northing) → geodetic
    pub fn inverse(&self, easting: f64, northing: f64) -> Geodetic {
        let xi = (northing - self.params.false_northing) / self.ka;
        let eta = (easting - self.params.false_easting) / self.ka;

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta = eta_p.sinh();
        let cos_xi = xi_p.cos();
        let tau_p = xi_p.sin() / (sinh_eta * sinh_eta + cos_xi * cos_xi).sqrt();
        let lambda = sinh_eta.atan2(cos_xi);
        let tau = self.conformal_to_geodetic_tan(tau_p);

        Geodetic {
            lat_deg: tau.atan().to_degrees(),
            lon_deg: self.params.central_meridian_deg + lambda.to_degrees(),
        }
    }

    /// Solve tan(φ) from the conformal-latitude tangent by Newton iteration.
    fn conformal_to_geodetic_tan(&self, tau_p: f64) -> f64 {
        let e = self.e;
        let e2m = 1.0 - e * e;
        let mut tau = tau_p;
        for _ in 0..8 {
            let tau1 = (1.0 + tau * tau).sqrt();
            let sigma = (e * (e * tau / tau1).atanh()).sinh();
            let tau_p_i = tau * (1.0 + sigma * sigma).sqrt() - sigma * tau1;
            let delta = (tau_p - tau_p_i) / (1.0 + tau_p_i * tau_p_i).sqrt()
                * (1.0 + e2m * tau * tau)
                / (e2m * tau1);
            tau += delta;
            if delta.abs() < 1e-14 * tau.abs().max(1.0) {
                break;
            }
        }
        tau
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puwg1992() -> TransverseMercator {
        TransverseMercator::new(TmParams {
            central_meridian_deg: 19.0,
            scale: 0.9993,
            false_easting: 500_000.0,
            false_northing: -5_300_000.0,
        })
    }

    #[test]
    fn test_false_origin_maps_to_equator_on_central_meridian() {
        let tm = puwg1992();
        let geo = tm.inverse(500_000.0, -5_300_000.0);
        assert!(geo.lat_deg.abs() < 1e-12);
        assert!((geo.lon_deg - 19.0).abs() < 1e-12);

        let (e, n) = tm.forward(Geodetic {
            lat_deg: 0.0,
            lon_deg: 19.0,
        });
        assert!((e - 500_000.0).abs() < 1e-9);
        assert!((n + 5_300_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_central_meridian_has_false_easting() {
        let tm = puwg1992();
        let (e, n) = tm.forward(Geodetic {
            lat_deg: 52.0,
            lon_deg: 19.0,
        });
        assert!((e - 500_000.0).abs() < 1e-6);
        // Meridian arc to 52° is ~5.76e6 m
        assert!(n > 450_000.0 && n < 470_000.0, "northing {n}");
    }

    #[test]
    fn test_geodetic_roundtrip() {
        let tm = puwg1992();
        for (lat, lon) in [(49.0, 14.2), (52.23, 21.01), (54.8, 18.6), (50.5, 24.1)] {
            let (e, n) = tm.forward(Geodetic {
                lat_deg: lat,
                lon_deg: lon,
            });
            let back = tm.inverse(e, n);
            assert!((back.lat_deg - lat).abs() < 1e-10, "lat {lat}");
            assert!((back.lon_deg - lon).abs() < 1e-10, "lon {lon}");
        }
    }

    #[test]
    fn test_east_of_meridian_has_larger_easting() {
        let tm = puwg1992();
        let (west, _) = tm.forward(Geodetic {
            lat_deg: 52.0,
            lon_deg: 18.0,
        });
        let (east, _) = tm.forward(Geodetic {
            lat_deg: 52.0,
            lon_deg: 20.0,
        });
        assert!(west < 500_000.0);
        assert!(east > 500_000.0);
        // Symmetric about the central meridian
        assert!(((500_000.0 - west) - (east - 500_000.0)).abs() < 1e-6);
    }
}

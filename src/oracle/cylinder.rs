//! Magnetic field of a uniformly polarized solid cylinder.
//!
//! The field is split into an axial part (Derby & Olbert, 2010) and a
//! diametric part (Caciagli et al., 2018), both expressed in cylindrical
//! coordinates of the magnet's body frame and normalised by its radius.

use crate::constant::{DIAMETRIC_TAYLOR_RADIUS, PI, RIM_RTOL};
use crate::error::Result;
use crate::oracle::elliptic::{cel, ellipke_parameter};
use crate::shapes::{Cylinder, Volume};
use nalgebra::{Point3, Vector3};

fn is_close(a: f64, b: f64, rtol: f64) -> bool {
    (a - b).abs() <= rtol * b.abs()
}

/// Converts Cartesian `(x, y)` to polar `(r, phi)`.
fn cart_to_cyl(x: f64, y: f64) -> (f64, f64) {
    (x.hypot(y), y.atan2(x))
}

/// Converts a vector with cylindrical components `(v_r, v_phi)` at azimuth
/// `phi` into Cartesian `(v_x, v_y)`.
fn vec_cyl_to_cart(v_r: f64, v_phi: f64, phi: f64) -> (f64, f64) {
    let (sin, cos) = phi.sin_cos();
    (v_r * cos - v_phi * sin, v_r * sin + v_phi * cos)
}

/// Field `(B_r, 0, B_z)` of a cylinder with unit axial polarization.
///
/// # Arguments
///
/// `r`, `z`: field point in units of the cylinder radius.
///
/// `z0`: half height over radius.
pub fn unit_axial_field(r: f64, z: f64, z0: f64) -> Result<Vector3<f64>> {
    let (zp, zm) = (z + z0, z - z0);
    let (rp, rm) = (1.0 + r, 1.0 - r);

    let (zp2, zm2) = (zp * zp, zm * zm);
    let (rp2, rm2) = (rp * rp, rm * rm);

    let sq0 = (zm2 + rp2).sqrt();
    let sq1 = (zp2 + rp2).sqrt();

    let kp = ((zp2 + rm2) / (zp2 + rp2)).sqrt();
    let km = ((zm2 + rm2) / (zm2 + rp2)).sqrt();

    let gamma = rm / rp;
    let gamma2 = gamma * gamma;

    let br = (cel(kp, 1.0, 1.0, -1.0)? / sq1 - cel(km, 1.0, 1.0, -1.0)? / sq0) / PI;
    let bz = (zp * cel(kp, gamma2, 1.0, gamma)? / sq1 - zm * cel(km, gamma2, 1.0, gamma)? / sq0)
        / (rp * PI);
    Ok(Vector3::new(br, 0.0, bz))
}

/// Field `(B_r, B_phi, B_z)` of a cylinder with unit diametric polarization
/// along `phi = 0`.
///
/// Close to the axis a series expansion replaces the elliptic form, which
/// loses precision as `r -> 0`.
pub fn unit_diametric_field(r: f64, phi: f64, z: f64, z0: f64) -> Result<Vector3<f64>> {
    let (zp, zm) = (z + z0, z - z0);
    let (zp2, zm2) = (zp * zp, zm * zm);
    let r2 = r * r;
    let (sin_phi, cos_phi) = phi.sin_cos();

    if r < DIAMETRIC_TAYLOR_RADIUS {
        let (zp4, zm4) = (zp2 * zp2, zm2 * zm2);
        let (zpp, zmm) = (zp2 + 1.0, zm2 + 1.0);
        let (zpp2, zmm2) = (zpp * zpp, zmm * zmm);
        let (zpp3, zmm3) = (zpp2 * zpp, zmm2 * zmm);
        let (zpp4, zmm4) = (zpp3 * zpp, zmm3 * zmm);
        let (zpp5, zmm5) = (zpp4 * zpp, zmm4 * zmm);
        let (sqrt_p, sqrt_m) = (zpp.sqrt(), zmm.sqrt());
        let (frac_p, frac_m) = (zp / sqrt_p, zm / sqrt_m);

        let r3 = r2 * r;
        let r4 = r3 * r;
        let r5 = r4 * r;

        let term1 = frac_p - frac_m;
        let term2 = (frac_p / zpp2 - frac_m / zmm2) * r2 / 8.0;
        let term3 =
            ((3.0 - 4.0 * zp2) * frac_p / zpp4 - (3.0 - 4.0 * zm2) * frac_m / zmm4) / 64.0 * r4;

        let br = -cos_phi / 4.0 * (term1 + 9.0 * term2 + 25.0 * term3);
        let bphi = sin_phi / 4.0 * (term1 + 3.0 * term2 + 5.0 * term3);
        let bz = -cos_phi / 4.0
            * (r * (1.0 / zpp / sqrt_p - 1.0 / zmm / sqrt_m)
                + 3.0 / 8.0
                    * r3
                    * ((1.0 - 4.0 * zp2) / zpp3 / sqrt_p - (1.0 - 4.0 * zm2) / zmm3 / sqrt_m)
                + 15.0 / 64.0
                    * r5
                    * ((1.0 - 12.0 * zp2 + 8.0 * zp4) / zpp5 / sqrt_p
                        - (1.0 - 12.0 * zm2 + 8.0 * zm4) / zmm5 / sqrt_m));
        return Ok(Vector3::new(br, bphi, bz));
    }

    let (rp, rm) = (r + 1.0, r - 1.0);
    let (rp2, rm2) = (rp * rp, rm * rm);

    let (ap2, am2) = (zp2 + rm2, zm2 + rm2);
    let (ap, am) = (ap2.sqrt(), am2.sqrt());

    let (argp, argm) = (-4.0 * r / ap2, -4.0 * r / am2);

    // r == 1 makes the third-kind characteristic singular; its term vanishes
    let (argc, one_over_rm) = if rm == 0.0 {
        (1e16, 0.0)
    } else {
        (-4.0 * r / rm2, 1.0 / rm)
    };

    let (ellk_p, elle_p) = ellipke_parameter(argp)?;
    let (ellk_m, elle_m) = ellipke_parameter(argm)?;
    let ellpi_p = cel((1.0 - argp).sqrt(), 1.0 - argc, 1.0, 1.0)?;
    let ellpi_m = cel((1.0 - argm).sqrt(), 1.0 - argc, 1.0, 1.0)?;

    let br = -cos_phi / (4.0 * PI * r2)
        * (-zm * am * elle_m + zp * ap * elle_p + zm / am * (2.0 + zm2) * ellk_m
            - zp / ap * (2.0 + zp2) * ellk_p
            + (zm / am * ellpi_m - zp / ap * ellpi_p) * rp * (r2 + 1.0) * one_over_rm);

    let bphi = sin_phi / (4.0 * PI * r2)
        * (zm * am * elle_m - zp * ap * elle_p - zm / am * (2.0 + zm2 + 2.0 * r2) * ellk_m
            + zp / ap * (2.0 + zp2 + 2.0 * r2) * ellk_p
            + zm / am * rp2 * ellpi_m
            - zp / ap * rp2 * ellpi_p);

    let bz = -cos_phi / (2.0 * PI * r)
        * (am * elle_m - ap * elle_p - (1.0 + zm2 + r2) / am * ellk_m
            + (1.0 + zp2 + r2) / ap * ellk_p);

    Ok(Vector3::new(br, bphi, bz))
}

/// Calculates the B-field of a cylinder in its own body frame.
///
/// # Arguments
///
/// `point`: field point in the body frame, m
///
/// `cylinder`: magnet geometry
///
/// `polarization`: body-frame polarization, T
///
/// Points on the rim of the cylinder, where the field is singular, return zero.
pub fn local_field(
    point: &Point3<f64>,
    cylinder: &Cylinder,
    polarization: &Vector3<f64>,
) -> Result<Vector3<f64>> {
    let radius = cylinder.radius();
    let (r, phi) = cart_to_cyl(point.x, point.y);
    let (pol_r, theta) = cart_to_cyl(polarization.x, polarization.y);

    let r_n = r / radius;
    let z_n = point.z / radius;
    let z0 = cylinder.height() / 2.0 / radius;

    if is_close(r_n, 1.0, RIM_RTOL) && is_close(z_n.abs(), z0, RIM_RTOL) {
        return Ok(Vector3::zeros());
    }

    let mut b_cyl = Vector3::zeros();
    if polarization.z != 0.0 {
        b_cyl += polarization.z * unit_axial_field(r_n, z_n, z0)?;
    }
    if pol_r != 0.0 {
        b_cyl += pol_r * unit_diametric_field(r_n, phi - theta, z_n, z0)?;
    }

    let (bx, by) = vec_cyl_to_cart(b_cyl.x, b_cyl.y, phi);
    // the diametric solution is an H-field; inside the magnet B = mu0 H + J
    if cylinder.contains(point) {
        return Ok(Vector3::new(
            bx + polarization.x,
            by + polarization.y,
            b_cyl.z,
        ));
    }
    Ok(Vector3::new(bx, by, b_cyl.z))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn assert_vector_close(actual: Vector3<f64>, expected: Vector3<f64>, tol: f64) {
        for i in 0..3 {
            assert_approx_eq!(actual[i], expected[i], tol);
        }
    }

    /// On the symmetry axis the axial field has the textbook closed form.
    #[test]
    fn test_axial_field_on_axis() {
        let cylinder = Cylinder::new(0.01, 0.02).unwrap();
        let polarization = Vector3::new(0.0, 0.0, 0.9);
        let (radius, half) = (0.005_f64, 0.01_f64);
        for &z in &[0.02_f64, 0.025, 0.03, -0.05] {
            let field = local_field(&Point3::new(0.0, 0.0, z), &cylinder, &polarization).unwrap();
            let expected = 0.9 / 2.0
                * ((z + half) / ((z + half).powi(2) + radius * radius).sqrt()
                    - (z - half) / ((z - half).powi(2) + radius * radius).sqrt());
            assert_approx_eq!(field.z, expected, 1e-12);
            assert_approx_eq!(field.x, 0.0, 1e-15);
            assert_approx_eq!(field.y, 0.0, 1e-15);
        }
    }

    #[test]
    fn test_field_at_centre() {
        let cylinder = Cylinder::new(3.0, 3.0).unwrap();
        let field = local_field(
            &Point3::origin(),
            &cylinder,
            &Vector3::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        assert_vector_close(
            field,
            Vector3::new(0.6464466094067263, 0.6464466094067263, 0.7071067811865476),
            1e-9,
        );
    }

    #[test]
    fn test_field_off_axis() {
        let cylinder = Cylinder::new(2.0, 2.0).unwrap();
        let field = local_field(
            &Point3::new(1.0, -1.0, 0.0),
            &cylinder,
            &Vector3::new(1.0, 2.0, 3.0),
        )
        .unwrap();
        assert_vector_close(
            field,
            Vector3::new(-0.36846056628423773, -0.10171405289381394, -0.3300649209932216),
            1e-8,
        );

        let cylinder = Cylinder::new(1.0, 2.0).unwrap();
        let field = local_field(
            &Point3::new(1.0, 1.0, 1.0),
            &cylinder,
            &Vector3::new(3.0, 2.0, -1.0),
        )
        .unwrap();
        assert_vector_close(
            field,
            Vector3::new(0.05331225054004448, 0.07895873346514143, 0.10406997810600024),
            1e-8,
        );
    }

    #[test]
    fn test_rim_returns_zero() {
        let cylinder = Cylinder::new(1.0, 2.0).unwrap();
        let field = local_field(
            &Point3::new(0.5, 0.0, 1.0),
            &cylinder,
            &Vector3::new(1.0, 2.0, 3.0),
        )
        .unwrap();
        assert_eq!(field, Vector3::zeros());
    }

    /// The series and elliptic forms of the diametric field must agree where they meet.
    #[test]
    fn test_diametric_branches_agree() {
        let below = unit_diametric_field(DIAMETRIC_TAYLOR_RADIUS * (1.0 - 1e-9), 0.3, 1.7, 2.0)
            .unwrap();
        let above = unit_diametric_field(DIAMETRIC_TAYLOR_RADIUS * (1.0 + 1e-9), 0.3, 1.7, 2.0)
            .unwrap();
        assert_vector_close(below, above, 1e-7);
    }

    #[test]
    fn test_diametric_field_on_side_surface() {
        let field = unit_diametric_field(1.0, 0.0, 0.2, 1.0).unwrap();
        assert!(field.iter().all(|c| c.is_finite()));
    }
}

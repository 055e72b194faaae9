//! Ray Sources

use itertools::iproduct;
use optics_core::geometry::*;
use optics_core::rays::*;
use optics_core::raytrace::*;

/// Lay out an `n x n` grid over `[-extent, extent]^2`, keep the points
/// inside the disc of radius `extent` and triangulate the grid squares whose
/// corners all survive. Returns the kept points and the cells indexing them.
///
/// * `n`      - Points per side.
/// * `extent` - Half width of the grid and radius of the disc.
fn disc_grid(n: usize, extent: Float) -> (Vec<(Float, Float)>, Vec<Cell>) {
    if n < 2 {
        return (vec![(0.0, 0.0)], vec![]);
    }

    let step = 2.0 * extent / (n - 1) as Float;
    let limit = extent * extent * (1.0 + 1e-9);

    let mut points = vec![];
    let mut index = vec![None; n * n];
    for (j, i) in iproduct!(0..n, 0..n) {
        let x = -extent + step * i as Float;
        let y = -extent + step * j as Float;
        if x * x + y * y <= limit {
            index[j * n + i] = Some(points.len());
            points.push((x, y));
        }
    }

    let mut cells = vec![];
    for (j, i) in iproduct!(0..n - 1, 0..n - 1) {
        let corners = [
            index[j * n + i],
            index[j * n + i + 1],
            index[(j + 1) * n + i + 1],
            index[(j + 1) * n + i],
        ];
        if let [Some(a), Some(b), Some(c), Some(d)] = corners {
            cells.push([a, b, c]);
            cells.push([a, c, d]);
        }
    }
    (points, cells)
}

/// Polarisation and medium shared by the sources.
fn finish(
    mut rays: RayCollection,
    cells: Vec<Cell>,
    e_vector: &Vector3f,
    e1_amp: Complex,
    e2_amp: Complex,
    refractive_index: Complex,
) -> RayCollection {
    rays.set_polarisation(e_vector);
    rays.set_amplitudes(e1_amp, e2_amp);
    rays.set_refractive_index(refractive_index);
    rays.cells = cells;
    rays
}

/// A collimated beam: a square grid of parallel rays clipped to a disc
/// perpendicular to the beam direction.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelRaySource {
    /// Source name.
    pub name: String,

    /// Centre of the beam.
    pub origin: Point3f,

    /// Beam direction. Need not be normalized.
    pub direction: Vector3f,

    /// Beam radius.
    pub radius: Float,

    /// Grid points along each side of the square before clipping.
    pub rays_per_side: usize,

    /// Polarisation reference. Made orthogonal to the beam.
    pub e_vector: Vector3f,

    /// Amplitude along `e_vector`.
    pub e1_amp: Complex,

    /// Amplitude along `direction x e_vector`.
    pub e2_amp: Complex,

    /// Index of the medium the rays start in.
    pub refractive_index: Complex,

    /// Upper bound on ray lengths.
    pub max_ray_len: Float,
}

impl Default for ParallelRaySource {
    fn default() -> Self {
        Self {
            name: "parallel source".to_string(),
            origin: Point3f::ORIGIN,
            direction: Vector3f::Z,
            radius: 1.0,
            rays_per_side: 10,
            e_vector: Vector3f::X,
            e1_amp: real(1.0),
            e2_amp: real(0.0),
            refractive_index: real(1.0),
            max_ray_len: DEFAULT_MAX_LENGTH,
        }
    }
}

impl RaySource for ParallelRaySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_rays(&self) -> RayCollection {
        let d = self.direction.normalize();
        let (u, v) = coordinate_system(&d);
        let (points, cells) = disc_grid(self.rays_per_side, self.radius);

        let origins: Vec<Point3f> = points
            .iter()
            .map(|&(x, y)| self.origin + u * x + v * y)
            .collect();
        let directions = vec![d; origins.len()];
        debug!("Parallel source '{}': {} rays", self.name, origins.len());

        finish(
            RayCollection::new(origins, directions, self.max_ray_len),
            cells,
            &self.e_vector,
            self.e1_amp,
            self.e2_amp,
            self.refractive_index,
        )
    }
}

/// Rays converging through a focus: a grid of directions within a cone of
/// half-angle `theta` about the axis, each ray starting `working_dist`
/// before the focus.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfocalRaySource {
    /// Source name.
    pub name: String,

    /// Point every ray passes through.
    pub focus: Point3f,

    /// Cone axis. Need not be normalized.
    pub direction: Vector3f,

    /// Distance from each ray's origin to the focus.
    pub working_dist: Float,

    /// Cone half-angle in degrees.
    pub theta: Float,

    /// Grid points along each side of the square before clipping.
    pub rays_per_side: usize,

    /// Polarisation reference. Made orthogonal to each ray.
    pub e_vector: Vector3f,

    /// Amplitude along `e_vector`.
    pub e1_amp: Complex,

    /// Amplitude along `direction x e_vector`.
    pub e2_amp: Complex,

    /// Index of the medium the rays start in.
    pub refractive_index: Complex,

    /// Upper bound on ray lengths.
    pub max_ray_len: Float,
}

impl Default for ConfocalRaySource {
    fn default() -> Self {
        Self {
            name: "confocal source".to_string(),
            focus: Point3f::ORIGIN,
            direction: Vector3f::Z,
            working_dist: 0.1,
            theta: 10.0,
            rays_per_side: 10,
            e_vector: Vector3f::X,
            e1_amp: real(1.0),
            e2_amp: real(0.0),
            refractive_index: real(1.0),
            max_ray_len: DEFAULT_MAX_LENGTH,
        }
    }
}

impl RaySource for ConfocalRaySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_rays(&self) -> RayCollection {
        let axis = self.direction.normalize();
        let (u, v) = coordinate_system(&axis);
        let tan_theta = clamp(self.theta, 0.0, 89.0).to_radians().tan();
        let (points, cells) = disc_grid(self.rays_per_side, tan_theta);

        let directions: Vec<Vector3f> = points
            .iter()
            .map(|&(tx, ty)| (axis + u * tx + v * ty).normalize())
            .collect();
        let origins = directions
            .iter()
            .map(|d| self.focus - *d * self.working_dist)
            .collect();
        debug!("Confocal source '{}': {} rays", self.name, directions.len());

        finish(
            RayCollection::new(origins, directions, self.max_ray_len),
            cells,
            &self.e_vector,
            self.e1_amp,
            self.e2_amp,
            self.refractive_index,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn parallel_grid_is_clipped_to_disc() {
        let source = ParallelRaySource {
            radius: 3.0,
            rays_per_side: 7,
            ..ParallelRaySource::default()
        };
        let rays = source.input_rays();
        assert_eq!(rays.len(), 29);
        for o in rays.origin.iter() {
            assert!(o.x * o.x + o.y * o.y <= 9.0 + 1e-9);
            assert!(approx_eq!(Float, o.z, 0.0, epsilon = 1e-12));
        }
        assert!(!rays.cells.is_empty());
        assert!(rays.cells.iter().flatten().all(|&i| i < rays.len()));
    }

    #[test]
    fn single_ray_source() {
        let source = ParallelRaySource {
            rays_per_side: 1,
            ..ParallelRaySource::default()
        };
        let rays = source.input_rays();
        assert_eq!(rays.len(), 1);
        assert!(rays.cells.is_empty());
    }

    #[test]
    fn source_sets_polarisation_and_medium() {
        let source = ParallelRaySource {
            direction: Vector3f::new(1.0, 1.0, 0.0),
            e_vector: Vector3f::Z,
            e2_amp: real(0.5),
            refractive_index: real(1.33),
            ..ParallelRaySource::default()
        };
        let rays = source.input_rays();
        for i in 0..rays.len() {
            assert!(approx_eq!(Float, rays.e_vector[i].dot(&rays.direction[i]), 0.0, epsilon = 1e-12));
            assert_eq!(rays.e2_amp[i], real(0.5));
            assert_eq!(rays.refractive_index[i], real(1.33));
            assert!(rays.length[i].is_infinite());
        }
    }

    proptest! {
        #[test]
        fn confocal_rays_pass_through_focus(
            theta in 1.0..60.0f64,
            wd in 0.1..10.0f64,
            n in 3..12usize,
        ) {
            let source = ConfocalRaySource {
                focus: Point3f::new(1.0, -2.0, 3.0),
                working_dist: wd,
                theta,
                rays_per_side: n,
                ..ConfocalRaySource::default()
            };
            let rays = source.input_rays();
            prop_assert!(!rays.is_empty());

            let max_angle = theta.to_radians() + 1e-9;
            for i in 0..rays.len() {
                let p = rays.origin[i] + rays.direction[i] * wd;
                prop_assert!(p.distance(&source.focus) < 1e-9);
                prop_assert!(rays.direction[i].z.acos() <= max_angle);
            }
        }
    }
}

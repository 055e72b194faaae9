//! Ray Collections

use super::{perpendicular_to, Ray};
use crate::geometry::*;
use crate::raytrace::*;
use serde::{Deserialize, Serialize};

/// A triangle of ray indices within one generation used to keep track of
/// ray bundle connectivity.
pub type Cell = [usize; 3];

/// A generation of rays stored column by column. All per-ray vectors have
/// the same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RayCollection {
    /// Ray origins.
    pub origin: Vec<Point3f>,

    /// Unit ray directions.
    pub direction: Vec<Vector3f>,

    /// Distance to the termination point; infinite until a hit is found.
    #[serde(with = "lengths")]
    pub length: Vec<Float>,

    /// Outward surface normal at the termination point; zero if none.
    pub normal: Vec<Normal3f>,

    /// Complex refractive index of the medium each ray travels through.
    pub refractive_index: Vec<Complex>,

    /// Unit polarisation reference vectors orthogonal to `direction`.
    pub e_vector: Vec<Vector3f>,

    /// Complex amplitudes along `e_vector`.
    pub e1_amp: Vec<Complex>,

    /// Complex amplitudes along `direction x e_vector`.
    pub e2_amp: Vec<Complex>,

    /// Registry index of the face each ray terminated on.
    pub end_face: Vec<Option<usize>>,

    /// Index of each ray's parent in the previous generation. For a seed
    /// batch this is the ray's own index.
    pub parent_ids: Vec<usize>,

    /// Generation index of the parent batch within a `TracedRays`.
    pub parent: Option<usize>,

    /// Upper bound used when computing termination points.
    pub max_length: Float,

    /// Ray bundle topology.
    pub cells: Vec<Cell>,
}

impl RayCollection {
    /// Returns an empty collection with room for `capacity` rays.
    ///
    /// * `capacity`   - Number of rays to reserve space for.
    /// * `max_length` - Upper bound used when computing termination points.
    pub fn with_capacity(capacity: usize, max_length: Float) -> Self {
        Self {
            origin: Vec::with_capacity(capacity),
            direction: Vec::with_capacity(capacity),
            length: Vec::with_capacity(capacity),
            normal: Vec::with_capacity(capacity),
            refractive_index: Vec::with_capacity(capacity),
            e_vector: Vec::with_capacity(capacity),
            e1_amp: Vec::with_capacity(capacity),
            e2_amp: Vec::with_capacity(capacity),
            end_face: Vec::with_capacity(capacity),
            parent_ids: Vec::with_capacity(capacity),
            parent: None,
            max_length,
            cells: vec![],
        }
    }

    /// Returns a seed collection of unpolarised-looking rays in vacuum. The
    /// directions are normalized and each ray is polarised along an
    /// arbitrary perpendicular with unit `E1` amplitude.
    ///
    /// * `origin`     - Ray origins.
    /// * `direction`  - Ray directions; must match `origin` in length.
    /// * `max_length` - Upper bound used when computing termination points.
    pub fn new(origin: Vec<Point3f>, direction: Vec<Vector3f>, max_length: Float) -> Self {
        debug_assert_eq!(origin.len(), direction.len());
        Self::from_rays(
            origin
                .into_iter()
                .zip(direction)
                .enumerate()
                .map(|(i, (o, d))| Ray {
                    parent_id: i,
                    ..Ray::new(o, d)
                }),
            max_length,
        )
    }

    /// Returns a collection holding the given rays.
    ///
    /// * `rays`       - The rays.
    /// * `max_length` - Upper bound used when computing termination points.
    pub fn from_rays<I>(rays: I, max_length: Float) -> Self
    where
        I: IntoIterator<Item = Ray>,
    {
        let iter = rays.into_iter();
        let mut batch = Self::with_capacity(iter.size_hint().0, max_length);
        for ray in iter {
            batch.push(ray);
        }
        batch
    }

    /// Returns the next generation built from `children`. Cells of the
    /// parent whose members all have a child are re-expressed in child
    /// indices; the others are dropped.
    ///
    /// * `parent`     - The parent batch.
    /// * `parent_gen` - Generation index of `parent`.
    /// * `children`   - Child rays, `parent_id` referencing `parent`.
    pub fn from_parent(parent: &RayCollection, parent_gen: usize, children: Vec<Ray>) -> Self {
        let mut batch = Self::from_rays(children, parent.max_length);
        batch.parent = Some(parent_gen);
        batch.cells = remap_cells(parent.len(), &parent.cells, &batch.parent_ids);
        batch
    }

    /// Returns the number of rays.
    pub fn len(&self) -> usize {
        self.origin.len()
    }

    /// Returns true if there are no rays.
    pub fn is_empty(&self) -> bool {
        self.origin.is_empty()
    }

    /// Appends a ray with no recorded termination.
    ///
    /// * `ray` - The ray.
    pub fn push(&mut self, ray: Ray) {
        self.origin.push(ray.origin);
        self.direction.push(ray.direction);
        self.length.push(INFINITY);
        self.normal.push(Normal3f::ZERO);
        self.refractive_index.push(ray.refractive_index);
        self.e_vector.push(ray.e_vector);
        self.e1_amp.push(ray.e1_amp);
        self.e2_amp.push(ray.e2_amp);
        self.end_face.push(None);
        self.parent_ids.push(ray.parent_id);
    }

    /// Returns the row view of the ray at index `i`.
    ///
    /// * `i` - Ray index.
    pub fn ray(&self, i: usize) -> Ray {
        Ray {
            origin: self.origin[i],
            direction: self.direction[i],
            refractive_index: self.refractive_index[i],
            e_vector: self.e_vector[i],
            e1_amp: self.e1_amp[i],
            e2_amp: self.e2_amp[i],
            parent_id: self.parent_ids[i],
        }
    }

    /// Sets every ray's polarisation reference to the component of `e`
    /// orthogonal to its direction, normalized. Rays travelling parallel to
    /// `e` get an arbitrary perpendicular.
    ///
    /// * `e` - Desired polarisation direction.
    pub fn set_polarisation(&mut self, e: &Vector3f) {
        for (ev, d) in self.e_vector.iter_mut().zip(&self.direction) {
            *ev = perpendicular_to(d, e);
        }
    }

    /// Sets the complex amplitudes of every ray.
    ///
    /// * `e1_amp` - Amplitude along `e_vector`.
    /// * `e2_amp` - Amplitude along `direction x e_vector`.
    pub fn set_amplitudes(&mut self, e1_amp: Complex, e2_amp: Complex) {
        self.e1_amp.iter_mut().for_each(|a| *a = e1_amp);
        self.e2_amp.iter_mut().for_each(|a| *a = e2_amp);
    }

    /// Sets the refractive index of every ray.
    ///
    /// * `n` - Complex refractive index.
    pub fn set_refractive_index(&mut self, n: Complex) {
        self.refractive_index.iter_mut().for_each(|r| *r = n);
    }

    /// Forget any recorded terminations.
    pub fn reset_length(&mut self) {
        self.length.iter_mut().for_each(|l| *l = INFINITY);
        self.normal.iter_mut().for_each(|n| *n = Normal3f::ZERO);
        self.end_face.iter_mut().for_each(|f| *f = None);
    }

    /// Record the termination of ray `i`.
    ///
    /// * `i`      - Ray index.
    /// * `length` - Distance to the hit.
    /// * `face`   - Registry index of the face hit.
    /// * `normal` - Outward surface normal at the hit.
    pub fn set_hit(&mut self, i: usize, length: Float, face: usize, normal: Normal3f) {
        self.length[i] = length;
        self.end_face[i] = Some(face);
        self.normal[i] = normal;
    }

    /// Returns the termination point of ray `i`: the origin advanced along
    /// the direction by the length clipped to `[0, max_length]`.
    ///
    /// * `i` - Ray index.
    pub fn termination_of(&self, i: usize) -> Point3f {
        let length = clamp(self.length[i], 0.0, self.max_length);
        self.origin[i] + self.direction[i] * length
    }

    /// Returns the termination points of all rays.
    pub fn termination(&self) -> Vec<Point3f> {
        (0..self.len()).map(|i| self.termination_of(i)).collect()
    }

    /// Returns the number of rays that terminated on a face.
    pub fn hits(&self) -> usize {
        self.end_face.iter().filter(|f| f.is_some()).count()
    }

    /// Returns the total intensity carried by the batch.
    pub fn total_intensity(&self) -> Float {
        self.e1_amp
            .iter()
            .zip(&self.e2_amp)
            .map(|(e1, e2)| e1.norm_sqr() + e2.norm_sqr())
            .sum()
    }
}

/// Re-express parent cells in child indices. Each parent ray maps to its
/// last child; a cell with any member lacking a child is dropped.
///
/// * `parent_len`   - Number of rays in the parent batch.
/// * `parent_cells` - Cells of the parent batch.
/// * `parent_ids`   - Parent index of each child ray.
pub fn remap_cells(parent_len: usize, parent_cells: &[Cell], parent_ids: &[usize]) -> Vec<Cell> {
    if parent_cells.is_empty() {
        return vec![];
    }

    let mut forward: Vec<Option<usize>> = vec![None; parent_len];
    for (child, &pid) in parent_ids.iter().enumerate() {
        if let Some(slot) = forward.get_mut(pid) {
            *slot = Some(child);
        }
    }

    parent_cells
        .iter()
        .filter_map(|cell| {
            let a = forward.get(cell[0]).copied().flatten()?;
            let b = forward.get(cell[1]).copied().flatten()?;
            let c = forward.get(cell[2]).copied().flatten()?;
            Some([a, b, c])
        })
        .collect()
}

/// Concatenate batches into one. Cells are shifted by the number of rays in
/// the preceding batches, `max_length` is the largest of the inputs and the
/// parent link is dropped.
///
/// * `batches` - The batches to combine.
pub fn collect_rays(batches: &[RayCollection]) -> RayCollection {
    let total = batches.iter().map(|b| b.len()).sum();
    let max_length = batches
        .iter()
        .map(|b| b.max_length)
        .fold(0.0, |a: Float, b| a.max(b));

    let mut out = RayCollection::with_capacity(total, max_length);
    let mut offset = 0;
    for b in batches {
        out.origin.extend_from_slice(&b.origin);
        out.direction.extend_from_slice(&b.direction);
        out.length.extend_from_slice(&b.length);
        out.normal.extend_from_slice(&b.normal);
        out.refractive_index.extend_from_slice(&b.refractive_index);
        out.e_vector.extend_from_slice(&b.e_vector);
        out.e1_amp.extend_from_slice(&b.e1_amp);
        out.e2_amp.extend_from_slice(&b.e2_amp);
        out.end_face.extend_from_slice(&b.end_face);
        out.parent_ids.extend_from_slice(&b.parent_ids);
        out.cells.extend(
            b.cells
                .iter()
                .map(|c| [c[0] + offset, c[1] + offset, c[2] + offset]),
        );
        offset += b.len();
    }
    out
}

/// JSON has no representation for infinity so unterminated lengths are
/// written as `null`.
mod lengths {
    use crate::raytrace::{Float, INFINITY};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(v: &[Float], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(v.iter().map(|&l| if l.is_finite() { Some(l) } else { None }))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Float>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Vec::<Option<Float>>::deserialize(deserializer)?;
        Ok(v.into_iter().map(|l| l.unwrap_or(INFINITY)).collect())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn three_rays() -> RayCollection {
        RayCollection::new(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![Vector3f::new(0.0, 0.0, 3.0); 3],
            100.0,
        )
    }

    #[test]
    fn new_defaults() {
        let rays = three_rays();
        assert_eq!(rays.len(), 3);
        assert!(rays.length.iter().all(|l| l.is_infinite()));
        assert!(rays.end_face.iter().all(|f| f.is_none()));
        assert_eq!(rays.parent_ids, vec![0, 1, 2]);
        assert_eq!(rays.direction[0], Vector3f::Z);
    }

    #[test]
    fn termination_is_clipped() {
        let mut rays = three_rays();
        rays.max_length = 5.0;
        assert_eq!(rays.termination_of(0), Point3f::new(0.0, 0.0, 5.0));
        rays.length[1] = 2.0;
        assert_eq!(rays.termination_of(1), Point3f::new(1.0, 0.0, 2.0));
        rays.length[2] = -1.0;
        assert_eq!(rays.termination_of(2), Point3f::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn set_polarisation_projects_out_direction() {
        let mut rays = three_rays();
        rays.set_polarisation(&Vector3f::new(1.0, 0.0, 1.0));
        assert_eq!(rays.e_vector[0], Vector3f::X);

        rays.set_polarisation(&Vector3f::Z);
        for (e, d) in rays.e_vector.iter().zip(&rays.direction) {
            assert!(approx_eq!(Float, e.dot(d), 0.0, epsilon = 1e-12));
            assert!(approx_eq!(Float, e.length(), 1.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn cells_survive_when_all_members_have_children() {
        let mut parent = three_rays();
        parent.cells = vec![[0, 1, 2]];
        let children = vec![
            Ray { parent_id: 2, ..parent.ray(2) },
            Ray { parent_id: 0, ..parent.ray(0) },
            Ray { parent_id: 1, ..parent.ray(1) },
        ];
        let child = RayCollection::from_parent(&parent, 0, children);
        assert_eq!(child.cells, vec![[1, 2, 0]]);
        assert_eq!(child.parent, Some(0));
    }

    #[test]
    fn cells_with_absorbed_member_are_dropped() {
        let mut parent = three_rays();
        parent.cells = vec![[0, 1, 2]];
        let children = vec![
            Ray { parent_id: 0, ..parent.ray(0) },
            Ray { parent_id: 2, ..parent.ray(2) },
        ];
        let child = RayCollection::from_parent(&parent, 0, children);
        assert!(child.cells.is_empty());
    }

    #[test]
    fn remap_uses_last_child_of_each_parent() {
        let cells = remap_cells(3, &[[0, 1, 2]], &[0, 0, 1, 2, 2]);
        assert_eq!(cells, vec![[1, 2, 4]]);
    }

    #[test]
    fn collect_shifts_cells() {
        let mut a = three_rays();
        a.cells = vec![[0, 1, 2]];
        a.parent = Some(4);
        let mut b = three_rays();
        b.cells = vec![[2, 1, 0]];
        b.max_length = 250.0;

        let all = collect_rays(&[a, b]);
        assert_eq!(all.len(), 6);
        assert_eq!(all.cells, vec![[0, 1, 2], [5, 4, 3]]);
        assert_eq!(all.max_length, 250.0);
        assert_eq!(all.parent, None);
        assert_eq!(all.e1_amp.len(), 6);
    }

    #[test]
    fn infinite_lengths_survive_json() {
        let mut rays = three_rays();
        rays.length[1] = 4.5;
        let json = serde_json::to_string(&rays).unwrap();
        let back: RayCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back.length[1], 4.5);
        assert!(back.length[0].is_infinite());
        assert_eq!(back.e1_amp, rays.e1_amp);
    }
}

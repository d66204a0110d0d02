use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    /// Marker index (same as the source point index).
    pub index: usize,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Deterministic ray picking against spherical markers of `radius`.
///
/// Ordering contract:
/// - The closest entry hit along the (normalized) ray wins.
/// - If multiple markers are hit at the same distance, the lower index wins.
///
/// A ray starting inside a marker hits it at distance 0.
pub fn pick_ray<I>(ray: Ray, markers: I, radius: f64, opts: PickOptions) -> Option<PickHit>
where
    I: IntoIterator<Item = Vec3>,
{
    let dir = ray.dir.normalized()?;
    if radius.is_nan() || radius <= 0.0 {
        return None;
    }

    let mut best: Option<(f64, usize)> = None;
    for (index, center) in markers.into_iter().enumerate() {
        let Some(t) = ray_sphere_hit_t(ray.origin, dir, center, radius) else {
            continue;
        };
        if t > opts.max_distance {
            continue;
        }

        best = match best {
            None => Some((t, index)),
            Some((bt, bi)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| index.cmp(&bi));
                if ord.is_lt() { Some((t, index)) } else { Some((bt, bi)) }
            }
        };
    }

    let (t, index) = best?;
    Some(PickHit {
        index,
        distance: t,
        point: ray.origin + dir.scale(t),
    })
}

/// Resolves a pointer ray to a marker index, or `None` for a miss.
pub fn resolve_pick<I>(ray: Ray, markers: I, radius: f64) -> Option<usize>
where
    I: IntoIterator<Item = Vec3>,
{
    pick_ray(ray, markers, radius, PickOptions::default()).map(|hit| hit.index)
}

/// Nearest marker to `position` within `max_distance`.
///
/// Equal distances resolve to the lower index.
pub fn resolve_pick_nearest<I>(position: Vec3, markers: I, max_distance: f64) -> Option<usize>
where
    I: IntoIterator<Item = Vec3>,
{
    markers
        .into_iter()
        .enumerate()
        .map(|(index, m)| (m.distance(position), index))
        .filter(|(d, _)| *d <= max_distance)
        .min_by(|a, b| stable_total_cmp_f64(a.0, b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, index)| index)
}

fn ray_sphere_hit_t(origin: Vec3, dir: Vec3, center: Vec3, radius: f64) -> Option<f64> {
    // `dir` is unit length, so the quadratic's leading coefficient is 1.
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    if b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some((-b - disc.sqrt()).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::{PickOptions, Ray, pick_ray, resolve_pick, resolve_pick_nearest};
    use foundation::math::Vec3;

    fn markers() -> Vec<Vec3> {
        vec![
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(5.0, 5.0, 0.0),
        ]
    }

    #[test]
    fn ray_picks_nearest_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let hit = pick_ray(ray, markers(), 1.0, PickOptions::default()).expect("hit");
        assert_eq!(hit.index, 1);
        assert!((hit.distance - 4.0).abs() < 1e-12);
        assert!((hit.point.x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn tie_breaks_by_lower_index() {
        let same = vec![Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)];
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(resolve_pick(ray, same, 1.0), Some(0));
    }

    #[test]
    fn misses_return_none() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(resolve_pick(ray, markers(), 1.0), None);

        let backwards = Ray::new(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(resolve_pick(backwards, markers(), 1.0), None);

        let degenerate = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(resolve_pick(degenerate, markers(), 1.0), None);
    }

    #[test]
    fn respects_max_distance() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let opts = PickOptions { max_distance: 3.0 };
        assert!(pick_ray(ray, markers(), 1.0, opts).is_none());
    }

    #[test]
    fn nearest_point_within_threshold() {
        assert_eq!(resolve_pick_nearest(Vec3::new(5.0, 4.0, 0.0), markers(), 2.0), Some(2));
        assert_eq!(resolve_pick_nearest(Vec3::new(50.0, 0.0, 0.0), markers(), 2.0), None);
    }
}

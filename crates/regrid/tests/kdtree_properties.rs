//! Randomized checks of the k-d tree against brute force.

use projection::{distance_sq, project, Cartesian};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regrid::KdTree;
use test_utils::{fixtures, COLLINEAR_X, CUBE_CORNERS};

fn brute_force(points: &[Cartesian], query: &Cartesian) -> f64 {
    points
        .iter()
        .map(|p| distance_sq(p, query))
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

fn random_sphere_points(rng: &mut StdRng, n: usize) -> Vec<Cartesian> {
    (0..n)
        .map(|_| {
            let lon = rng.gen_range(-180.0..180.0);
            let lat = rng.gen_range(-90.0..=90.0);
            project(lon, lat)
        })
        .collect()
}

#[test]
fn test_random_sphere_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    let points = random_sphere_points(&mut rng, 2000);
    let tree = KdTree::build(&points).unwrap();
    assert_eq!(tree.size(), 2000);

    for _ in 0..500 {
        let query = project(rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..=90.0));
        let (index, distance) = tree.query_nearest(&query);
        let expected = brute_force(&points, &query);

        // Distances agree exactly; the index may differ only on ties
        assert_eq!(distance, expected);
        assert_eq!(distance_sq(&points[index], &query).sqrt(), distance);
    }
}

#[test]
fn test_random_cube_matches_brute_force() {
    // Points off the sphere exercise the same geometry with different splits
    let mut rng = StdRng::seed_from_u64(7);
    let points: Vec<Cartesian> = (0..1000)
        .map(|_| {
            [
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            ]
        })
        .collect();
    let tree = KdTree::build(&points).unwrap();

    for _ in 0..300 {
        let query = [
            rng.gen_range(-1.5..1.5),
            rng.gen_range(-1.5..1.5),
            rng.gen_range(-1.5..1.5),
        ];
        let hit = tree.nearest(&query).unwrap();
        assert_eq!(hit.distance, brute_force(&points, &query));
        assert_eq!(hit.point, points[hit.index]);
    }
}

#[test]
fn test_members_are_found_at_zero_distance() {
    let mut rng = StdRng::seed_from_u64(1234);
    let points = random_sphere_points(&mut rng, 300);
    let tree = KdTree::build(&points).unwrap();

    for p in &points {
        let (index, distance) = tree.query_nearest(p);
        assert_eq!(distance, 0.0);
        assert_eq!(points[index], *p);
    }
}

#[test]
fn test_many_duplicates() {
    let mut points = vec![[0.0, 0.0, 1.0]; 64];
    points.push([1.0, 0.0, 0.0]);
    let tree = KdTree::build(&points).unwrap();

    let (index, distance) = tree.query_nearest(&[0.0, 0.0, 0.9]);
    assert!(index < 64);
    assert!((distance - 0.1).abs() < 1e-12);

    let (index, distance) = tree.query_nearest(&[0.9, 0.0, 0.0]);
    assert_eq!(index, 64);
    assert!((distance - 0.1).abs() < 1e-12);
}

#[test]
fn test_cube_corner_scenario() {
    let tree = KdTree::build(&CUBE_CORNERS).unwrap();

    let (_, distance) = tree.query_nearest(&[0.5, 0.5, 0.5]);
    assert!((distance - 0.75f64.sqrt()).abs() < 1e-12);

    let (index, distance) = tree.query_nearest(&[0.9, 0.1, 0.95]);
    assert_eq!(CUBE_CORNERS[index], [1.0, 0.0, 1.0]);
    assert!(distance < 0.2);
}

#[test]
fn test_collinear_scenario() {
    let tree = KdTree::build(&COLLINEAR_X).unwrap();
    let (index, distance) = tree.query_nearest(&[2.3, 0.0, 0.0]);
    assert_eq!(index, 2);
    assert!((distance - 0.3).abs() < 1e-12);

    let (index, _) = tree.query_nearest(&[-10.0, 0.0, 0.0]);
    assert_eq!(index, 0);
    let (index, _) = tree.query_nearest(&[10.0, 0.0, 0.0]);
    assert_eq!(index, fixtures::COLLINEAR_X.len() - 1);
}

#[test]
fn test_depth_is_logarithmic() {
    let mut rng = StdRng::seed_from_u64(99);
    for n in [1usize, 2, 3, 100, 1023, 1024, 5000] {
        let tree = KdTree::build(&random_sphere_points(&mut rng, n)).unwrap();
        let bits = usize::BITS - n.leading_zeros();
        assert_eq!(tree.depth(), bits as usize, "n = {}", n);
    }
}

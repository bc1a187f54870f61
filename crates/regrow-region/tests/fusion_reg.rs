//! Region fusion regression test
//!
//! Two adjacent regions with overlapping windows merge into one region
//! owning the union of both pixel sets; regions with disjoint colors stay
//! apart.

use regrow_core::{Color, OwnershipGrid, PixelGrid, Point, RegionId};
use regrow_region::{GrowthParams, Region, RegionError};
use regrow_test::RegParams;
use std::collections::HashSet;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two uniform blocks side by side, split at `split`
fn make_blocks(w: u32, h: u32, split: u32, left: Color, right: Color) -> PixelGrid {
    PixelGrid::from_fn(w, h, |p| if p.col < split { left } else { right }).unwrap()
}

/// Grow both regions with a zero-width window so each keeps its own block
fn grow_pair(
    image: &PixelGrid,
    owners: &mut OwnershipGrid,
    a: Point,
    b: Point,
) -> (Region, Region) {
    let exact = GrowthParams::default()
        .with_threshold(0, 0)
        .with_coef_sd(0.0, 0.0);
    let mut ra = Region::new(RegionId(1), a, image, owners, &exact).unwrap();
    let mut rb = Region::new(RegionId(2), b, image, owners, &exact).unwrap();
    while !(ra.is_terminal() && rb.is_terminal()) {
        ra.step(owners).unwrap();
        rb.step(owners).unwrap();
    }
    (ra, rb)
}

#[test]
fn fusion_reg() {
    init_logger();
    let mut rp = RegParams::new("fusion");

    // Blocks 1 level apart: compatible once the windows are widened
    eprintln!("=== compatible blocks ===");
    let image = make_blocks(6, 4, 3, Color::new(80, 120, 40), Color::new(81, 120, 41));
    let mut owners = OwnershipGrid::for_image(&image);
    let (mut a, b) = grow_pair(&image, &mut owners, Point::new(0, 0), Point::new(3, 5));
    rp.compare_values(12.0, a.member_count() as f64, 0.0);
    rp.compare_values(12.0, b.member_count() as f64, 0.0);

    // Exact windows do not contain the other mean
    let strict = a.verify_fusion(&b);
    rp.compare_values(0.0, if strict { 1.0 } else { 0.0 }, 0.0);

    let adjacent = a.is_adjacent_to(b.id(), &owners) && b.is_adjacent_to(a.id(), &owners);
    rp.compare_values(1.0, if adjacent { 1.0 } else { 0.0 }, 0.0);

    let b_pixels: HashSet<Point> = b.members().iter().copied().collect();
    let expected_count = a.member_count() + b.member_count();
    a.merge(b, &mut owners).unwrap();
    rp.compare_values(expected_count as f64, a.member_count() as f64, 0.0);
    let reassigned = b_pixels
        .iter()
        .all(|&p| owners.owner(p) == Some(RegionId(1)));
    rp.compare_values(1.0, if reassigned { 1.0 } else { 0.0 }, 0.0);
    rp.compare_labels(&[1; 24], &owners.labels());
    rp.compare_values(0.0, a.boundary().len() as f64, 0.0);
    rp.compare_values(80.5, a.mean()[0], 1e-9);

    assert!(rp.cleanup());
}

#[test]
fn test_verify_fusion_with_default_windows() {
    // Default threshold 5 makes 3 levels of difference compatible
    let image = make_blocks(4, 2, 2, Color::gray(100), Color::gray(103));
    let mut owners = OwnershipGrid::for_image(&image);
    let params = GrowthParams::default();
    let a = Region::new(RegionId(1), Point::new(0, 0), &image, &mut owners, &params).unwrap();
    let b = Region::new(RegionId(2), Point::new(0, 3), &image, &mut owners, &params).unwrap();
    assert!(a.verify_fusion(&b));
    assert!(b.verify_fusion(&a));
    assert!(a.verify_fusion_color(Color::gray(103)));
    assert!(!a.verify_fusion_color(Color::gray(110)));
    assert!((a.merge_criterion(&b) - (27.0f64).sqrt()).abs() < 1e-9);
}

#[test]
fn test_disjoint_blocks_stay_apart() {
    let image = make_blocks(6, 3, 3, Color::new(10, 10, 10), Color::new(10, 10, 200));
    let mut owners = OwnershipGrid::for_image(&image);
    let (a, b) = grow_pair(&image, &mut owners, Point::new(1, 0), Point::new(1, 5));
    assert!(!a.verify_fusion(&b));
    assert!(!b.verify_fusion(&a));
    assert_eq!(a.neighbor_ids(&owners).into_iter().collect::<Vec<_>>(), vec![RegionId(2)]);
}

#[test]
fn test_merge_consumes_frontier_and_boundary() {
    // A third block stays unclaimed and remains on the merged boundary
    let image = PixelGrid::from_fn(9, 1, |p| match p.col {
        0..=2 => Color::gray(20),
        3..=5 => Color::gray(21),
        _ => Color::gray(250),
    })
    .unwrap();
    let mut owners = OwnershipGrid::for_image(&image);
    let (mut a, b) = grow_pair(&image, &mut owners, Point::new(0, 0), Point::new(0, 5));
    assert_eq!(b.boundary_points(), vec![Point::new(0, 2), Point::new(0, 6)]);
    a.merge(b, &mut owners).unwrap();
    assert_eq!(a.member_count(), 6);
    assert_eq!(a.boundary_points(), vec![Point::new(0, 6)]);
    assert!(a.frontier().is_empty());
    assert!(a.is_terminal());
}

#[test]
fn test_merge_with_stale_region_fails_cleanly() {
    let image = make_blocks(4, 1, 2, Color::gray(0), Color::gray(1));
    let mut owners = OwnershipGrid::for_image(&image);
    let (mut a, b) = grow_pair(&image, &mut owners, Point::new(0, 0), Point::new(0, 3));
    let stale = b.clone();
    a.merge(b, &mut owners).unwrap();
    let labels = owners.labels();
    let count = a.member_count();

    // Every pixel of the stale copy now belongs to `a`
    match a.merge(stale, &mut owners) {
        Err(RegionError::MergeOverlap { target, source_id, .. }) => {
            assert_eq!((target, source_id), (1, 2));
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    assert_eq!(owners.labels(), labels);
    assert_eq!(a.member_count(), count);
}

#[test]
fn test_merge_rejects_foreign_pixels() {
    // `c` claims a pixel `b` thinks it owns
    let image = make_blocks(4, 1, 2, Color::gray(0), Color::gray(1));
    let mut owners = OwnershipGrid::for_image(&image);
    let (mut a, b) = grow_pair(&image, &mut owners, Point::new(0, 0), Point::new(0, 3));
    let mut other_owners = OwnershipGrid::for_image(&image);
    other_owners.claim(Point::new(0, 2), RegionId(3)).unwrap();
    other_owners.claim(Point::new(0, 3), RegionId(2)).unwrap();
    assert!(matches!(
        a.merge(b, &mut other_owners),
        Err(RegionError::Core(_))
    ));
    assert_eq!(owners.count_owned_by(RegionId(2)), 2);
}

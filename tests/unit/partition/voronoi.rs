//! Tests for nearest-seed partitions

#[cfg(test)]
mod tests {
    use imgproc::color::rgb::RED;
    use imgproc::partition::divider::Divider;
    use imgproc::partition::voronoi::{VoronoiDivider, nearest_seeds};
    use ndarray::Array3;

    // Tests seeds are ranked by distance with ties broken by index
    #[test]
    fn test_nearest_seeds_order() {
        let seeds = [[0.0, 4.0], [0.0, 0.0], [0.0, -4.0]];
        assert_eq!(nearest_seeds([0.0, 1.0], &seeds, 2), vec![1, 0]);
        assert_eq!(nearest_seeds([0.0, 0.0], &seeds, 3), vec![1, 0, 2]);
        assert_eq!(nearest_seeds([0.0, 0.0], &seeds, 5).len(), 3);
    }

    #[test]
    fn test_invalid_arguments() {
        let image = Array3::zeros((4, 4, 3));
        assert!(VoronoiDivider::new(image.clone(), &[], 1, false).is_err());
        assert!(VoronoiDivider::new(image.clone(), &[[0.0, 0.0]], 0, false).is_err());
        assert!(VoronoiDivider::new(image.clone(), &[[0.0, 0.0]], 2, false).is_err());
        assert!(VoronoiDivider::new(image, &[[f64::NAN, 0.0]], 1, false).is_err());
    }

    // Tests two seeds split a strip into two halves that cover it
    #[test]
    fn test_two_seed_split() {
        let image = Array3::zeros((1, 6, 3));
        let divider = VoronoiDivider::new(image, &[[0.0, 0.0], [0.0, 5.0]], 1, false).unwrap();
        assert_eq!(divider.len(), 2);
        assert_eq!(divider.keys(), &[vec![0], vec![1]]);
        assert_eq!(divider.cell(0).unwrap().cols(), &[0, 1, 2]);
        assert_eq!(divider.cell(1).unwrap().cols(), &[3, 4, 5]);
    }

    // Tests ordered keys merge pixels that share the same nearest set
    #[test]
    fn test_ordered_keys_merge_rankings() {
        let seeds = [[0.0, 0.0], [0.0, 6.0]];
        let image = Array3::zeros((1, 7, 3));

        let ranked = VoronoiDivider::new(image.clone(), &seeds, 2, false).unwrap();
        assert_eq!(ranked.keys(), &[vec![0, 1], vec![1, 0]]);

        let merged = VoronoiDivider::new(image, &seeds, 2, true).unwrap();
        assert_eq!(merged.keys(), &[vec![0, 1]]);
        assert_eq!(merged.cell(0).unwrap().len(), 7);
    }

    #[test]
    fn test_cells_cover_image() {
        let seeds = [[1.0, 1.0], [6.0, 2.0], [3.0, 7.0], [7.0, 7.0]];
        let mut divider = VoronoiDivider::new(Array3::zeros((9, 9, 3)), &seeds, 1, false).unwrap();
        let total: usize = divider.cells().iter().map(|c| c.len()).sum();
        assert_eq!(total, 81);
        assert_eq!(divider.len(), 4);

        divider.paint_all(|| RED).unwrap();
        assert!(divider.stitch().outer_iter().all(|row| row
            .outer_iter()
            .all(|px| px[0] == 255 && px[1] == 0)));
    }

    // Tests the partial selection matches a full sort on tied distances
    #[test]
    fn test_nearest_seeds_matches_full_ranking() {
        let seeds: Vec<[f64; 2]> = (0..5)
            .flat_map(|r| (0..5).map(move |c| [f64::from(r) * 2.0, f64::from(c) * 2.0]))
            .collect();
        let point = [4.0, 4.0];

        let mut expected: Vec<(f64, usize)> = seeds
            .iter()
            .enumerate()
            .map(|(i, s)| ((s[0] - point[0]).powi(2) + (s[1] - point[1]).powi(2), i))
            .collect();
        expected.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for k in [1, 3, 5, 9, 24, 25] {
            let want: Vec<usize> = expected.iter().take(k).map(|&(_, i)| i).collect();
            assert_eq!(nearest_seeds(point, &seeds, k), want, "k = {k}");
        }
        assert!(nearest_seeds(point, &seeds, 0).is_empty());
    }
}

//! Tests for sample sizes, selections and the provided divider helpers

#[cfg(test)]
mod tests {
    use imgproc::Image;
    use imgproc::color::Color;
    use imgproc::color::rgb::RED;
    use imgproc::morph::channels::negative;
    use imgproc::partition::divider::{Divider, SampleSize, Selection};
    use imgproc::partition::grid::RegularGridDivider;
    use imgproc::partition::ring::CircularDivider;
    use ndarray::{Array3, s};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn black(size: usize) -> Image {
        Array3::zeros((size, size, 3))
    }

    fn red_cells(image: &Image, cell: usize) -> usize {
        let cells = image.dim().0 / cell;
        (0..cells * cells)
            .filter(|k| {
                let (row, col) = (k / cells, k % cells);
                image[[row * cell, col * cell, 0]] == 255
            })
            .count()
    }

    // Tests fractions floor and counts never exceed the total
    // Verified by rounding fractions to nearest
    #[test]
    fn test_sample_size_resolve() {
        assert_eq!(SampleSize::Fraction(0.5).resolve(5).unwrap(), 2);
        assert_eq!(SampleSize::Fraction(1.0).resolve(7).unwrap(), 7);
        assert_eq!(SampleSize::Count(3).resolve(3).unwrap(), 3);
        assert!(SampleSize::Count(4).resolve(3).is_err());
        assert!(SampleSize::Fraction(0.0).resolve(3).is_err());
        assert!(SampleSize::Fraction(1.01).resolve(3).is_err());
        assert!(SampleSize::Fraction(f64::NAN).resolve(3).is_err());
    }

    // Tests random samples hold distinct indices of the requested size
    #[test]
    fn test_random_indices_are_distinct() {
        let mut rng = StdRng::seed_from_u64(11);
        let divider = RegularGridDivider::new(black(8), (2, 2)).unwrap();
        let picked = divider.random_indices(SampleSize::Count(10), &mut rng).unwrap();
        let unique: HashSet<_> = picked.iter().copied().collect();
        assert_eq!(picked.len(), 10);
        assert_eq!(unique.len(), 10);
        assert!(picked.iter().all(|&(r, c)| r < 4 && c < 4));
    }

    #[test]
    fn test_select_variants() {
        let mut rng = StdRng::seed_from_u64(3);
        let divider = RegularGridDivider::new(black(4), (2, 2)).unwrap();
        assert_eq!(divider.select(&Selection::All, &mut rng).unwrap().len(), 4);
        assert_eq!(divider.select(&Selection::Random, &mut rng).unwrap().len(), 1);
        assert_eq!(
            divider
                .select(&Selection::Selected(vec![(1, 1), (0, 0)]), &mut rng)
                .unwrap(),
            vec![(1, 1), (0, 0)]
        );
    }

    // Tests painting a random half of a grid paints exactly that many cells
    // Verified by sampling with replacement
    #[test]
    fn test_paint_random_sample() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut divider = RegularGridDivider::new(black(8), (2, 2)).unwrap();
        divider
            .paint_random_sample(|| RED, SampleSize::Fraction(0.5), &mut rng)
            .unwrap();
        assert_eq!(red_cells(&divider.stitch(), 2), 8);
    }

    #[test]
    fn test_paint_and_apply_helpers() {
        let mut rng = StdRng::seed_from_u64(4);

        let mut divider = RegularGridDivider::new(black(4), (2, 2)).unwrap();
        divider.paint_random(|| RED, &mut rng).unwrap();
        assert_eq!(red_cells(&divider.stitch(), 2), 1);

        let mut divider = RegularGridDivider::new(black(4), (2, 2)).unwrap();
        divider.paint_all(|| RED).unwrap();
        assert_eq!(red_cells(&divider.stitch(), 2), 4);

        let mut divider = RegularGridDivider::new(black(4), (2, 2)).unwrap();
        divider.apply_to_selected(&[(0, 1)], &negative).unwrap();
        let out = divider.stitch();
        assert!(out.slice(s![..2, 2.., ..]).iter().all(|&v| v == 255));
        assert!(out.slice(s![2.., .., ..]).iter().all(|&v| v == 0));

        let mut divider = RegularGridDivider::new(black(4), (2, 2)).unwrap();
        divider.apply_to_all(&negative).unwrap();
        assert!(divider.stitch().iter().all(|&v| v == 255));

        let mut divider = RegularGridDivider::new(black(4), (2, 2)).unwrap();
        divider.apply_to_random(&negative, &mut rng).unwrap();
        assert_eq!(divider.stitch().iter().filter(|&&v| v == 255).count(), 12);

        let mut divider = RegularGridDivider::new(black(4), (2, 2)).unwrap();
        divider
            .apply_to_random_sample(&negative, SampleSize::Count(3), &mut rng)
            .unwrap();
        assert_eq!(divider.stitch().iter().filter(|&&v| v == 255).count(), 36);
    }

    // Tests the color source is called once per painted container
    #[test]
    fn test_color_source_called_per_container() {
        let mut shade = 0u8;
        let mut divider = CircularDivider::new(black(9), &[2.0, 4.0], None).unwrap();
        divider
            .paint_selected(&[0, 2], || {
                shade += 100;
                Color::new(shade, shade, shade)
            })
            .unwrap();
        assert_eq!(shade, 200);

        let out = divider.stitch();
        assert_eq!(out[[4, 4, 0]], 100);
        assert_eq!(out[[0, 0, 0]], 200);
        assert_eq!(out[[4, 7, 0]], 0);
    }

    #[test]
    fn test_empty_helpers() {
        let mut rng = StdRng::seed_from_u64(0);
        let divider = RegularGridDivider::new(Array3::zeros((0, 0, 3)), (2, 2)).unwrap();
        assert!(divider.is_empty());
        assert!(divider.random_index(&mut rng).is_none());
        assert!(divider.select(&Selection::Random, &mut rng).unwrap().is_empty());
    }
}

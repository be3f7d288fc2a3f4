//! Tests for whole-image color statistics

#[cfg(test)]
mod tests {
    use imgproc::Image;
    use imgproc::analysis::scan::{
        background_color, color_ratios, distance_to_color, distance_to_mode, entropy,
        mean_luminance, num_colors,
    };
    use imgproc::color::rgb::{BLACK, BLUE, RED, WHITE};
    use ndarray::{Array3, s};

    fn three_red_one_blue() -> Image {
        let mut image = Array3::zeros((2, 2, 3));
        image.slice_mut(s![.., .., 0]).fill(255);
        image.slice_mut(s![1, 1, ..]).assign(&ndarray::aview1(&BLUE.0));
        image
    }

    // Tests the most frequent color wins
    // Verified by returning the least frequent color
    #[test]
    fn test_background_color_mode() {
        assert_eq!(background_color(three_red_one_blue().view()), RED);
    }

    // Tests ties resolve to the smallest packed value
    // Verified by breaking ties toward the largest value
    #[test]
    fn test_background_color_tie() {
        let mut image: Image = Array3::zeros((1, 2, 3));
        image.slice_mut(s![0, 0, ..]).assign(&ndarray::aview1(&BLUE.0));
        image.slice_mut(s![0, 1, ..]).assign(&ndarray::aview1(&RED.0));
        assert_eq!(background_color(image.view()), RED);
    }

    #[test]
    fn test_background_color_empty_is_black() {
        let image: Image = Array3::zeros((0, 0, 3));
        assert_eq!(background_color(image.view()), BLACK);
    }

    // Tests ratios follow packed color order and sum to one
    #[test]
    fn test_color_ratios() {
        let ratios = color_ratios(three_red_one_blue().view());
        assert_eq!(ratios, vec![0.75, 0.25]);
    }

    // Tests entropy of uniform two-color image equals ln 2
    // Verified by switching to log base 2
    #[test]
    fn test_entropy() {
        let flat: Image = Array3::from_elem((3, 3, 3), 7);
        assert!(entropy(flat.view()).abs() < 1e-12);

        let mut halves: Image = Array3::zeros((2, 2, 3));
        halves.slice_mut(s![0, .., ..]).fill(255);
        assert!((entropy(halves.view()) - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_num_colors() {
        assert_eq!(num_colors(three_red_one_blue().view()), 2);
        let flat: Image = Array3::zeros((4, 4, 3));
        assert_eq!(num_colors(flat.view()), 1);
    }

    // Tests luminance weights sum to one on white
    #[test]
    fn test_mean_luminance() {
        let white: Image = Array3::from_elem((2, 3, 3), 255);
        assert!((mean_luminance(white.view()) - 255.0).abs() < 1e-9);

        let empty: Image = Array3::zeros((0, 3, 3));
        assert!(mean_luminance(empty.view()).abs() < f64::EPSILON);
    }

    // Tests Frobenius norm of the difference to a flat color
    // Verified by dropping the square root
    #[test]
    fn test_distance_to_color() {
        let mut image: Image = Array3::zeros((1, 1, 3));
        image[[0, 0, 0]] = 3;
        image[[0, 0, 1]] = 4;
        assert!((distance_to_color(image.view(), BLACK) - 5.0).abs() < 1e-12);

        let white: Image = Array3::from_elem((1, 1, 3), 255);
        assert!(distance_to_color(white.view(), WHITE).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_mode() {
        let flat: Image = Array3::from_elem((3, 2, 3), 90);
        assert!(distance_to_mode(flat.view()).abs() < 1e-12);

        // One blue pixel among red: distance is that pixel's distance to red
        let expected = (2.0f64 * 255.0 * 255.0).sqrt();
        assert!((distance_to_mode(three_red_one_blue().view()) - expected).abs() < 1e-9);
    }
}

//! Tests for rectangle and polygon filling

#[cfg(test)]
mod tests {
    use imgproc::Image;
    use imgproc::color::rgb::{RED, WHITE};
    use imgproc::morph::draw::{
        Side, diagonal_corner, fill_polygon, fill_rectangle, polygon, rectangle_on_base,
        rotated_rectangle,
    };
    use ndarray::{Array3, s};

    fn canvas(height: usize, width: usize) -> Image {
        Array3::zeros((height, width, 3))
    }

    fn painted(image: &Image) -> usize {
        image.slice(s![.., .., 0]).iter().filter(|&&v| v == 255).count()
    }

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    // Tests both corners are inclusive and other channels keep the fill color
    #[test]
    fn test_fill_rectangle() {
        let mut image = canvas(10, 10);
        fill_rectangle(&mut image, [5.0, 7.0], [2.0, 3.0], RED).unwrap();
        assert_eq!(painted(&image), 20);
        assert_eq!(image.slice(s![2, 3, ..]).to_vec(), vec![255, 0, 0]);
        assert_eq!(image.slice(s![5, 7, ..]).to_vec(), vec![255, 0, 0]);
        assert_eq!(image.slice(s![6, 7, ..]).to_vec(), vec![0, 0, 0]);
    }

    #[test]
    fn test_fill_rectangle_clipped() {
        let mut image = canvas(6, 6);
        fill_rectangle(&mut image, [-5.0, -5.0], [1.0, 1.0], WHITE).unwrap();
        assert_eq!(painted(&image), 4);

        let mut untouched = canvas(6, 6);
        fill_rectangle(&mut untouched, [10.0, 10.0], [20.0, 20.0], WHITE).unwrap();
        assert_eq!(painted(&untouched), 0);
        assert!(fill_rectangle(&mut untouched, [f64::NAN, 0.0], [1.0, 1.0], WHITE).is_err());
    }

    // Tests a right triangle covers its legs and hypotenuse
    // Verified by counting the pixels with row + col <= 4
    #[test]
    fn test_fill_triangle() {
        let mut image = canvas(8, 8);
        fill_polygon(&mut image, &[[0.0, 0.0], [0.0, 4.0], [4.0, 0.0]], WHITE).unwrap();
        assert_eq!(painted(&image), 15);
        assert_eq!(image[[2, 2, 0]], 255);
        assert_eq!(image[[3, 2, 0]], 0);
    }

    #[test]
    fn test_fill_diamond() {
        let mut image = canvas(11, 11);
        let diamond = [[3.0, 5.0], [5.0, 7.0], [7.0, 5.0], [5.0, 3.0]];
        fill_polygon(&mut image, &diamond, WHITE).unwrap();
        assert_eq!(painted(&image), 13);
        assert_eq!(image[[5, 5, 0]], 255);
        assert_eq!(image[[4, 4, 0]], 255);
        assert_eq!(image[[3, 4, 0]], 0);
    }

    #[test]
    fn test_fill_polygon_rejects_bad_input() {
        let mut image = canvas(4, 4);
        assert!(fill_polygon(&mut image, &[[0.0, 0.0], [1.0, 1.0]], WHITE).is_err());
        assert!(fill_polygon(&mut image, &[[0.0, 0.0], [1.0, f64::INFINITY], [2.0, 0.0]], WHITE).is_err());

        let mut rgba: Image = Array3::zeros((4, 4, 4));
        assert!(fill_polygon(&mut rgba, &[[0.0, 0.0], [0.0, 2.0], [2.0, 0.0]], WHITE).is_err());
    }

    // Tests an unrotated rectangle matches the axis-aligned fill
    #[test]
    fn test_rotated_rectangle_unrotated() {
        let corners = rotated_rectangle([1.0, 1.0], 4.0, 2.0, 0.0);
        assert!(close(corners[1], [5.0, 1.0]));
        assert!(close(corners[2], [5.0, 3.0]));
        assert!(close(corners[3], [1.0, 3.0]));

        let mut rotated = canvas(8, 8);
        fill_polygon(&mut rotated, &corners, WHITE).unwrap();
        let mut straight = canvas(8, 8);
        fill_rectangle(&mut straight, [1.0, 1.0], [5.0, 3.0], WHITE).unwrap();
        assert_eq!(rotated, straight);
    }

    #[test]
    fn test_rotated_rectangle_quarter_turn() {
        let corners = rotated_rectangle([2.0, 2.0], 3.0, 1.0, 90.0);
        assert!(close(corners[1], [2.0, 5.0]));
        assert!(close(corners[2], [1.0, 5.0]));
        assert!(close(corners[3], [1.0, 2.0]));
    }

    #[test]
    fn test_diagonal_corner() {
        assert!(close(diagonal_corner([1.0, 1.0], 3.0, 0.0), [4.0, 1.0]));
        let half = 2.0_f64.sqrt();
        assert!(close(diagonal_corner([0.0, 0.0], 2.0, 45.0), [half, half]));
    }

    // Tests the right side of a left-to-right base lies below it on screen
    #[test]
    fn test_rectangle_on_base() {
        let right = rectangle_on_base([[5.0, 2.0], [5.0, 8.0]], 3.0, Side::Right).unwrap();
        assert!(close(right[2], [8.0, 8.0]));
        assert!(close(right[3], [8.0, 2.0]));

        let left = rectangle_on_base([[5.0, 2.0], [5.0, 8.0]], 3.0, Side::Left).unwrap();
        assert!(close(left[2], [2.0, 8.0]));
        assert!(close(left[3], [2.0, 2.0]));

        assert!(rectangle_on_base([[1.0, 1.0], [1.0, 1.0]], 2.0, Side::Right).is_err());
    }

    #[test]
    fn test_polygon_transform() {
        let image = canvas(6, 6);
        let draw = polygon(vec![[0.0, 0.0], [0.0, 5.0], [5.0, 5.0], [5.0, 0.0]], RED).unwrap();
        let out = draw(image.view());
        assert_eq!(painted(&out), 36);
        assert!(image.iter().all(|&v| v == 0));

        let rgba: Image = Array3::zeros((2, 2, 4));
        assert_eq!(draw(rgba.view()), rgba);
        assert!(polygon(vec![[0.0, 0.0]], RED).is_err());
    }
}

//! Tests for image loading, saving, conversion and folder listing

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use imgproc::Image;
    use imgproc::io::error::ImgprocError;
    use imgproc::io::image::{
        FileSize, check_image, describe, from_rgb_image, has_image_extension, list_images,
        load_rgb, save, to_rgb_image,
    };
    use ndarray::Array3;
    use std::path::Path;

    fn gradient(height: usize, width: usize) -> Image {
        Array3::from_shape_fn((height, width, 3), |(i, j, c)| {
            ((i * 17 + j * 5 + c * 70) % 256) as u8
        })
    }

    #[test]
    fn test_check_image() {
        assert_eq!(check_image(&gradient(3, 5)).unwrap(), (3, 5));
        let gray: Image = Array3::zeros((3, 5, 1));
        assert!(matches!(
            check_image(&gray),
            Err(ImgprocError::InvalidSourceData { .. })
        ));
    }

    // Tests conversion keeps (height, width) orientation
    // Verified by swapping width and height in the conversion
    #[test]
    fn test_rgb_image_conversion() {
        let image = gradient(2, 7);
        let rgb = to_rgb_image(&image).unwrap();
        assert_eq!((rgb.width(), rgb.height()), (7, 2));
        assert_eq!(rgb.get_pixel(6, 1).0[0], image[[1, 6, 0]]);
        assert_eq!(from_rgb_image(rgb).unwrap(), image);
    }

    // Tests PNG files load back identically and parent folders are created
    // Verified by disabling directory creation
    #[test]
    fn test_save_and_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.png");
        let image = gradient(6, 4);

        save(&image, &path).unwrap();
        assert!(path.exists());
        assert_eq!(load_rgb(&path).unwrap(), image);
    }

    #[test]
    fn test_load_missing_file() {
        let error = load_rgb(Path::new("does/not/exist.png")).unwrap_err();
        assert!(error.to_string().contains("does/not/exist.png"));
    }

    // Tests opaque alpha is accepted and real transparency is rejected
    // Verified by rejecting every image with an alpha channel
    #[test]
    fn test_transparency_check() {
        let dir = tempfile::tempdir().unwrap();

        let opaque = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 255]));
        let opaque_path = dir.path().join("opaque.png");
        opaque.save(&opaque_path).unwrap();
        let loaded = load_rgb(&opaque_path).unwrap();
        assert_eq!(loaded[[2, 2, 2]], 30);

        let mut seethrough = opaque;
        seethrough.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let seethrough_path = dir.path().join("seethrough.png");
        seethrough.save(&seethrough_path).unwrap();
        assert!(matches!(
            load_rgb(&seethrough_path),
            Err(ImgprocError::TransparentImage { .. })
        ));
    }

    #[test]
    fn test_list_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPG", "c.jpeg"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("folder.png")).unwrap();

        let files = list_images(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png", "c.jpeg"]);
        assert!(!has_image_extension(Path::new("scan.gif")));
    }

    // Tests human sizes round up and stop below a gigabyte
    #[test]
    fn test_file_size() {
        assert_eq!(FileSize::from_bytes(999).unwrap().to_string(), "999 B");
        assert_eq!(FileSize::from_bytes(1_001).unwrap().to_string(), "2 KB");
        assert_eq!(FileSize::from_bytes(2_500_000).unwrap().to_string(), "3 MB");
        assert!(FileSize::from_bytes(1_000_000_000).is_err());
    }

    #[test]
    fn test_describe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.png");
        save(&gradient(5, 9), &path).unwrap();

        let info = describe(&path).unwrap();
        assert_eq!(info.extension, "PNG");
        assert_eq!(info.format, Some(image::ImageFormat::Png));
        assert_eq!(info.dimensions, (5, 9));
        assert_eq!(info.size.unit, "B");
    }
}

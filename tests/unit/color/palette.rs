//! Tests for palette parsing, lookup and random picks

#[cfg(test)]
mod tests {
    use imgproc::color::Palette;
    use imgproc::color::rgb::RED;
    use imgproc::io::error::ImgprocError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_builtin_palette() {
        let palette = Palette::builtin().unwrap();
        assert!(!palette.is_empty());
        assert!(palette.names().any(|name| name == "Vermilion"));
        assert_eq!(palette.find("red").unwrap(), RED);
    }

    // Tests lookup ignores case and rejects unknown names
    // Verified by using case-sensitive comparison
    #[test]
    fn test_find() {
        let palette =
            Palette::from_json_str(r##"[{"name": "Ochre", "color": "#cc7722"}]"##).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.find("OCHRE").unwrap().to_hex(), "#cc7722");
        assert!(matches!(
            palette.find("teal"),
            Err(ImgprocError::InvalidParameter { parameter: "color", .. })
        ));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(Palette::from_json_str("{}").is_err());
        assert!(matches!(
            Palette::from_json_str(r##"[{"name": "Bad", "color": "#12"}]"##),
            Err(ImgprocError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_random() {
        let mut rng = StdRng::seed_from_u64(3);
        let palette = Palette::builtin().unwrap();
        let color = palette.random(&mut rng).unwrap();
        assert!(palette.names().any(|name| palette.find(name).unwrap() == color));

        let empty = Palette::from_json_str("[]").unwrap();
        assert!(matches!(
            empty.random(&mut rng),
            Err(ImgprocError::InvalidSourceData { .. })
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.json");
        std::fs::write(&path, r##"[{"name": "Teal", "color": "#008080"}]"##).unwrap();
        let palette = Palette::from_json_file(&path).unwrap();
        assert_eq!(palette.find("teal").unwrap().to_hex(), "#008080");

        assert!(matches!(
            Palette::from_json_file(dir.path().join("missing.json")),
            Err(ImgprocError::FileSystem { .. })
        ));
    }
}

//! Shared assertions.

/// Assert every entry is a lowercase `#rrggbb` string
pub fn assert_hex_colors(colors: &[String]) {
    for color in colors {
        assert_eq!(color.len(), 7, "not #rrggbb: {color}");
        assert!(color.starts_with('#'), "missing '#': {color}");
        assert!(
            color[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
            "not lowercase hex: {color}"
        );
    }
}

/// Assert two floats agree within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{actual} differs from {expected} by more than {tolerance}"
    );
}

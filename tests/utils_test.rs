use spotlens::types::HourCount;
use spotlens::utils::*;

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), STATE_LENGTH);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    assert_ne!(state, generate_state());
}

#[test]
fn test_parse_intensity() {
    assert_eq!(parse_intensity("3").unwrap().value(), 3);
    assert_eq!(parse_intensity(" 5 ").unwrap().value(), 5);
    assert!(parse_intensity("0").is_err());
    assert!(parse_intensity("6").is_err());
    assert!(parse_intensity("loud").is_err());
    assert!(parse_intensity("-1").is_err());
}

#[test]
fn test_histogram_bar() {
    assert_eq!(histogram_bar(0, 0), "");
    assert_eq!(histogram_bar(4, 4).chars().count(), 40);
    assert_eq!(histogram_bar(2, 4).chars().count(), 20);
    // Any play at all shows up
    assert_eq!(histogram_bar(1, 1000).chars().count(), 1);
}

#[test]
fn test_max_plays() {
    let pattern = vec![
        HourCount { hour: 3, plays: 2 },
        HourCount { hour: 14, plays: 3 },
    ];

    assert_eq!(max_plays(&pattern), 3);
    assert_eq!(max_plays(&[]), 0);
}

#[test]
fn test_format_hour() {
    assert_eq!(format_hour(3), "03:00");
    assert_eq!(format_hour(22), "22:00");
}

//! Unit tests for logging setup

use momentix::logging::{init_logging, LogFormat};

#[test]
fn test_format_follows_environment() {
    assert_eq!(LogFormat::for_environment("production"), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("prod"), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("sandbox"), LogFormat::Pretty);
}

#[test]
fn test_second_init_is_rejected() {
    let _ = init_logging("sandbox");
    assert!(init_logging("sandbox").is_err());
}

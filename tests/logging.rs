use gearcut::init_logging;

#[test]
fn test_logging_installs_once() {
    assert!(init_logging().is_ok());
    assert!(init_logging().is_err());
}

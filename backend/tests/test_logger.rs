use serial_test::serial;

use facilitydb_backend::logger::{self, Level};

mod helpers;
use helpers as h;

#[test]
#[serial]
fn test_set_log_level_by_name() {
    let _t = h::test_db_setup();

    assert!(logger::set_log_level_str("DEBUG"));
    assert_eq!(logger::get_log_level(), Level::Debug);

    assert!(logger::set_log_level_str(" warn "));
    assert_eq!(logger::get_log_level(), Level::Warn);
    logger::warn("warnings are still written at the warn level");

    assert!(!logger::set_log_level_str("verbose"));
    assert_eq!(logger::get_log_level(), Level::Warn);

    logger::set_log_level(Level::Info);
    assert_eq!(logger::get_log_level(), Level::Info);
}

use eatery::constant::hard_limit;
use eatery::error::AppErrorCode;
use eatery::{AppCfgHardLimit, AppConfig};

use crate::EXAMPLE_REL_PATH;

fn ut_parse(cfg_fname: &str) -> Result<eatery::ApiServerCfg, eatery::error::AppError> {
    let fullpath = env!("CARGO_MANIFEST_DIR").to_string() + EXAMPLE_REL_PATH + cfg_fname;
    let limit = AppCfgHardLimit {
        nitems_per_inmem_table: hard_limit::MAX_ITEMS_STORED_PER_MODEL,
    };
    AppConfig::parse_from_file(fullpath, limit)
}

#[test]
fn parse_ok() {
    let result = ut_parse("config_ok.json");
    let cfg = result.unwrap();
    assert_eq!(cfg.listen.port, 8012);
    assert_eq!(cfg.listen.routes.len(), 2);
}

#[test]
fn parse_error_file_missing() {
    let e = ut_parse("config_nonexist.json").err().unwrap();
    assert!(matches!(e.code, AppErrorCode::IOerror(_)));
}

#[test]
fn listener_error_no_routes() {
    let e = ut_parse("config_err_no_routes.json").err().unwrap();
    assert_eq!(e.code, AppErrorCode::NoRouteApiServerCfg);
}

#[test]
fn listener_error_bad_version() {
    let e = ut_parse("config_err_bad_version.json").err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidVersion);
}

#[test]
fn logging_error_unknown_handler_in_logger() {
    let e = ut_parse("config_err_logger_unknown_handler.json")
        .err()
        .unwrap();
    assert_eq!(e.code, AppErrorCode::NoHandlerInLoggerCfg);
    assert_eq!(e.detail.unwrap().as_str(), "unittest");
}

#[test]
fn logging_error_localfs_without_path() {
    // a local-fs handler must name the file it appends to, this has to be
    // rejected at config load instead of surfacing at writer setup
    let e = ut_parse("config_err_localfs_no_path.json").err().unwrap();
    assert_eq!(e.code, AppErrorCode::MissingLogPathCfg);
    assert_eq!(e.detail.unwrap().as_str(), "errlog-file-web-api");
}

#[test]
fn datastore_error_exceeds_hard_limit() {
    let e = ut_parse("config_err_inmem_limit.json").err().unwrap();
    assert_eq!(e.code, AppErrorCode::ExceedingMaxLimit);
}

use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::result::Result as DefaultResult;

use serde::de::{Error as DeserializeError, Unexpected};
use serde::Deserialize;

use crate::constant::{env_vars, logging as const_log};
use crate::error::{AppError, AppErrorCode};
use crate::{AppLogAlias, WebApiPath};

fn jsn_deny_empty_string<'de, D>(raw: D) -> DefaultResult<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(raw)?;
    if s.is_empty() {
        Err(DeserializeError::invalid_value(
            Unexpected::Str(""),
            &"non-empty string",
        ))
    } else {
        Ok(s)
    }
}

#[derive(Deserialize)]
pub struct AppLogHandlerCfg {
    pub min_level: const_log::Level,
    pub destination: const_log::Destination,
    pub alias: AppLogAlias,
    pub path: Option<String>,
}

#[derive(Deserialize)]
pub struct AppLoggerCfg {
    pub alias: AppLogAlias,
    pub handlers: Vec<String>,
    pub level: Option<const_log::Level>,
}

#[derive(Deserialize)]
pub struct AppLoggingCfg {
    pub handlers: Vec<AppLogHandlerCfg>,
    pub loggers: Vec<AppLoggerCfg>,
}

#[derive(Deserialize)]
pub struct WebApiRouteCfg {
    pub path: WebApiPath,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub handler: String,
}

impl ToString for WebApiRouteCfg {
    fn to_string(&self) -> String {
        format!("path:{}, handler:{}", self.path, self.handler)
    }
}

#[derive(Deserialize)]
pub struct WebApiListenCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub api_version: String,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub cors: String,
    pub routes: Vec<WebApiRouteCfg>,
}

#[derive(Deserialize, Debug)]
pub struct AppInMemoryDbCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub alias: String,
    pub max_items: u32,
}

#[allow(non_camel_case_types)]
#[derive(Deserialize)]
#[serde(tag = "_type")]
pub enum AppDataStoreCfg {
    InMemory(AppInMemoryDbCfg),
}

#[derive(Deserialize)]
pub struct ApiServerCfg {
    pub logging: AppLoggingCfg,
    pub listen: WebApiListenCfg,
    pub limit_req_body_in_bytes: usize,
    pub num_workers: u8,
    pub stack_sz_kb: u16,
    pub data_store: Vec<AppDataStoreCfg>,
}

pub struct AppBasepathCfg {
    pub system: String,
    pub service: String,
}

pub struct AppConfig {
    pub basepath: AppBasepathCfg,
    pub api_server: ApiServerCfg,
}

pub struct AppCfgHardLimit {
    pub nitems_per_inmem_table: u32,
}

pub struct AppCfgInitArgs {
    pub env_var_map: HashMap<String, String, RandomState>,
    pub limit: AppCfgHardLimit,
}

impl AppConfig {
    pub fn new(args: AppCfgInitArgs) -> DefaultResult<Self, AppError> {
        let (mut env_var_map, limit) = (args.env_var_map, args.limit);
        let sys_basepath = if let Some(s) = env_var_map.remove(env_vars::SYS_BASEPATH) {
            s + "/"
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingSysBasePath,
            });
        };
        let app_basepath = if let Some(a) = env_var_map.remove(env_vars::SERVICE_BASEPATH) {
            a + "/"
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingAppBasePath,
            });
        };
        let api_srv_cfg = if let Some(cfg_path) = env_var_map.remove(env_vars::CFG_FILEPATH) {
            let fullpath = app_basepath.clone() + &cfg_path;
            Self::parse_from_file(fullpath, limit)?
        } else {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingConfigPath,
            });
        };
        Ok(Self {
            api_server: api_srv_cfg,
            basepath: AppBasepathCfg {
                system: sys_basepath,
                service: app_basepath,
            },
        })
    } // end of fn new

    // load and parse a config file with given path
    pub fn parse_from_file(
        filepath: String,
        limit: AppCfgHardLimit,
    ) -> DefaultResult<ApiServerCfg, AppError> {
        let fileobj = File::open(filepath).map_err(|e| AppError {
            detail: Some(e.to_string()),
            code: AppErrorCode::IOerror(e.kind()),
        })?;
        let reader = BufReader::new(fileobj);
        let jsnobj = serde_json::from_reader::<BufReader<File>, ApiServerCfg>(reader).map_err(
            |e| AppError {
                detail: Some(e.to_string()),
                code: AppErrorCode::InvalidJsonFormat,
            },
        )?;
        Self::_check_web_listener(&jsnobj.listen)?;
        Self::_check_logging(&jsnobj.logging)?;
        Self::_check_datastore(&jsnobj.data_store, limit)?;
        Ok(jsnobj)
    } // end of fn parse_from_file

    fn _check_web_listener(obj: &WebApiListenCfg) -> DefaultResult<(), AppError> {
        let version: Vec<&str> = obj.api_version.split('.').collect();
        let mut iter = version.iter().filter(|i| i.parse::<u16>().is_err());
        let mut iter2 = obj
            .routes
            .iter()
            .filter(|i| i.path.is_empty() || i.handler.is_empty());
        if obj.routes.is_empty() {
            Err(AppError {
                detail: None,
                code: AppErrorCode::NoRouteApiServerCfg,
            })
        } else if iter.next().is_some() {
            Err(AppError {
                detail: Some("version must be numeric".to_string()),
                code: AppErrorCode::InvalidVersion,
            })
        } else if let Some(badroute) = iter2.next() {
            Err(AppError {
                detail: Some(badroute.to_string()),
                code: AppErrorCode::InvalidRouteConfig,
            })
        } else {
            Ok(())
        }
    } // end of fn _check_web_listener

    fn _check_logging(obj: &AppLoggingCfg) -> DefaultResult<(), AppError> {
        if obj.handlers.is_empty() {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::NoLogHandlerCfg,
            });
        }
        if obj.loggers.is_empty() {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::NoLoggerCfg,
            });
        }
        let mut iter = obj.handlers.iter().filter(|i| i.alias.is_empty());
        if iter.next().is_some() {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingAliasLogHdlerCfg,
            });
        }
        let mut iter = obj.loggers.iter().filter(|i| i.alias.is_empty());
        if iter.next().is_some() {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingAliasLoggerCfg,
            });
        }
        // a local-fs handler needs a relative file path it can append to
        let mut iter = obj.handlers.iter().filter(|i| {
            matches!(i.destination, const_log::Destination::LOCALFS)
                && i.path
                    .as_deref()
                    .map_or(true, |p| p.is_empty() || p.ends_with('/'))
        });
        if let Some(bad) = iter.next() {
            return Err(AppError {
                detail: Some(bad.alias.clone()),
                code: AppErrorCode::MissingLogPathCfg,
            });
        }
        let declared = obj
            .handlers
            .iter()
            .map(|i| i.alias.as_str())
            .collect::<HashSet<&str>>();
        let mut badlogger = obj.loggers.iter().filter(|i| {
            i.handlers.is_empty()
                || i.handlers
                    .iter()
                    .any(|a| !declared.contains(a.as_str()))
        });
        if let Some(bad) = badlogger.next() {
            Err(AppError {
                detail: Some(bad.alias.to_string()),
                code: AppErrorCode::NoHandlerInLoggerCfg,
            })
        } else {
            Ok(())
        }
    } // end of fn _check_logging

    fn _check_datastore(
        obj: &Vec<AppDataStoreCfg>,
        limit: AppCfgHardLimit,
    ) -> DefaultResult<(), AppError> {
        if obj.is_empty() {
            return Err(AppError {
                detail: None,
                code: AppErrorCode::MissingDataStore,
            });
        }
        let mut iter = obj.iter().filter_map(|c| match c {
            AppDataStoreCfg::InMemory(c2) => {
                if c2.max_items > limit.nitems_per_inmem_table {
                    Some(c2)
                } else {
                    None
                }
            }
        });
        if let Some(bad) = iter.next() {
            let detail = format!(
                "in-mem max items limit exceeds, given:{}, limit:{}",
                bad.max_items, limit.nitems_per_inmem_table
            );
            Err(AppError {
                detail: Some(detail),
                code: AppErrorCode::ExceedingMaxLimit,
            })
        } else {
            Ok(())
        }
    } // end of fn _check_datastore
} // end of impl AppConfig

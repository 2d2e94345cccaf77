use std::collections::HashMap;
use std::io::stdout;
use std::path::Path;

use tracing::dispatcher::Dispatch;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::Layer as TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer as LayerIntf, Registry};

use crate::config::{AppBasepathCfg, AppLogHandlerCfg, AppLoggerCfg, AppLoggingCfg};
use crate::constant::logging::{Destination as DstOption, Level as AppLogLevelInner};
use crate::AppLogAlias;

pub type AppLogLevel = AppLogLevelInner;

// each configured handler keeps its non-blocking writer, the default level
// applied when a logger does not override it, and the flush guard
type WriterHandle = (NonBlocking, tracing::Level, WorkerGuard);

pub struct AppLogContext {
    // guards must stay alive for the whole process, dropping them silently
    // stops flushing to the underlying I/O writers
    _io_guards: Vec<WorkerGuard>,
    dispatchers: HashMap<AppLogAlias, Dispatch>,
}

// the macro has to be exported, handlers in the top-level binary expand it
#[macro_export]
macro_rules! to_3rdparty_level {
    ($lvlin:expr) => {
        match $lvlin {
            $crate::logging::AppLogLevel::FATAL | $crate::logging::AppLogLevel::ERROR => {
                tracing::Level::ERROR
            }
            $crate::logging::AppLogLevel::WARNING => tracing::Level::WARN,
            $crate::logging::AppLogLevel::INFO => tracing::Level::INFO,
            $crate::logging::AppLogLevel::DEBUG => tracing::Level::DEBUG,
            $crate::logging::AppLogLevel::TRACE => tracing::Level::TRACE,
        } // `tracing` orders levels the other way around,
          // TRACE > DEBUG > INFO > WARN > ERROR
    };
}

fn build_writer(basepath: &AppBasepathCfg, cfg: &AppLogHandlerCfg) -> WriterHandle {
    let lvl = to_3rdparty_level!(&cfg.min_level);
    let (io_wr, guard) = match &cfg.destination {
        DstOption::CONSOLE => tracing_appender::non_blocking(stdout()),
        DstOption::LOCALFS => {
            // the config check rejects local-fs handlers without a path,
            // anything still unusable degrades to console output
            let rpath = cfg.path.as_deref().filter(|p| !p.is_empty());
            let fullpath = rpath.map(|r| {
                let sep = if basepath.system.ends_with('/') || r.starts_with('/') {
                    ""
                } else {
                    "/"
                };
                format!("{}{}{}", basepath.system, sep, r)
            });
            match fullpath.as_deref().map(Path::new) {
                Some(p) => match (p.parent(), p.file_name()) {
                    (Some(dir), Some(fname_prefix)) => {
                        let appender =
                            RollingFileAppender::new(Rotation::NEVER, dir, fname_prefix);
                        tracing_appender::non_blocking(appender)
                    }
                    _others => tracing_appender::non_blocking(stdout()),
                },
                None => tracing_appender::non_blocking(stdout()),
            }
        }
    }; // note the writer spawns one dedicated flush thread for each handler
    (io_wr, lvl, guard)
}

fn build_dispatcher(cfg: &AppLoggerCfg, writers: &HashMap<AppLogAlias, WriterHandle>) -> Dispatch {
    let iter = cfg.handlers.iter().filter_map(|alias| {
        writers.get(alias).map(|(wr_ptr, default_lvl, _guard)| {
            let lvl = if let Some(l) = cfg.level.as_ref() {
                to_3rdparty_level!(l)
            } else {
                *default_lvl
            };
            TraceLayer::new()
                .with_writer(wr_ptr.clone())
                .with_file(false) // avoid exposing full source path
                .with_line_number(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(LevelFilter::from_level(lvl))
        })
    });
    let layers = Vec::from_iter(iter);
    Dispatch::new(Registry::default().with(layers))
}

impl AppLogContext {
    pub fn new(basepath: &AppBasepathCfg, cfg: &AppLoggingCfg) -> Self {
        let writers = cfg
            .handlers
            .iter()
            .map(|item| (item.alias.clone(), build_writer(basepath, item)))
            .collect::<HashMap<_, _>>();
        let dispatchers = cfg
            .loggers
            .iter()
            .map(|item| (item.alias.clone(), build_dispatcher(item, &writers)))
            .collect();
        Self {
            dispatchers,
            _io_guards: writers.into_values().map(|(_, _, g)| g).collect(),
        }
    }

    pub fn get_assigner(&self, key: &str) -> Option<&Dispatch> {
        self.dispatchers.get(&key.to_string())
    }
} // end of impl AppLogContext

#[macro_export]
macro_rules! app_log_event {
    ( $ctx:ident, $lvl:expr, $($arg:tt)+ ) => {{
        const MOD_PATH:&str = module_path!();
        if let Some(assigner) = $ctx.get_assigner(MOD_PATH) {
            const LVL_INNER: tracing::Level = $crate::logging::to_3rdparty_level!($lvl);
            tracing::dispatcher::with_default(assigner, || {
                tracing::event!(LVL_INNER, $($arg)+);
            });
        } else {
            println!("[WARN] log dispatcher not found at the module path: {}", MOD_PATH);
            println!($($arg)+);
        }
    }};
}

pub use app_log_event;
pub use to_3rdparty_level;

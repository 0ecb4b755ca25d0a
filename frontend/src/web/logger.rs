//! 控制台日志
//!
//! `log` 门面的实现：wasm 下写入 `console.*`，其他目标写入 stderr。

use log::{Level, Log, Metadata, Record};

pub struct ConsoleLogger {
    level: Level,
}

static LOGGER: ConsoleLogger = ConsoleLogger {
    level: if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    },
};

/// 安装全局 logger；重复调用时忽略
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LOGGER.level.to_level_filter());
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{} {}", record.level(), record.args());
        write(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write(_level: Level, line: &str) {
    eprintln!("{}", line);
}

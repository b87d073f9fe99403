//! 日志初始化，基于 `tracing`。
//!
//! `RUST_LOG` 优先；未设置时 crate 自身默认 `warn`，`--verbose` 时为 `debug`。

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// 默认过滤规则
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    format!("warn,dashie_rs={}", level)
}

/// 初始化日志，重复调用无效
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // 测试等场景可能已有全局subscriber
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init();
    });
}

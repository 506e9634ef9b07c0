//! 集成测试公共工具

use tracing_subscriber::EnvFilter;

/// 初始化测试日志，可通过 `RUST_LOG=pathconf_core=trace` 查看缓存行为
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

//! 日志初始化

use infrastructure_common::{ContainerError, ContainerResult, LoggingConfig};
use tracing::info;

/// 按配置安装全局 tracing 订阅器
///
/// 订阅器只能安装一次，重复调用返回 [`ContainerError::Logging`]。
pub fn init_logging(config: &LoggingConfig) -> ContainerResult<()> {
    let level = config.tracing_level()?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| ContainerError::Logging {
        message: e.to_string(),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}

use crate::AndroidConfig;

/// Route [`log`] output to logcat (or stderr off-device). Only the first call has any effect.
pub(crate) fn init(config: &AndroidConfig) {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| install(config));
}

#[cfg(target_os = "android")]
fn install(config: &AndroidConfig) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(config.max_log_level)
            .with_tag(config.log_tag),
    );
}

#[cfg(not(target_os = "android"))]
fn install(config: &AndroidConfig) {
    let _ = env_logger::Builder::new()
        .filter_level(config.max_log_level)
        .parse_default_env()
        .try_init();
}

// This module setup the logger level.

use std::env;

pub fn setup(logger_level: &str) {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", filter(logger_level));
    }

    tracing_subscriber::fmt::init();
}

fn filter(logger_level: &str) -> String {
    format!("filesmanager_app={logger_level},filesmanager_infrastructure={logger_level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_covers_workspace_crates() {
        assert_eq!(
            filter("debug"),
            "filesmanager_app=debug,filesmanager_infrastructure=debug"
        );
    }
}

//! Platform detection utilities

use std::fs;

/// Detect if running in WSL (Windows Subsystem for Linux)
///
/// Speech backend selection differs there: WSLg's PulseAudio server is
/// more dependable than Speech Dispatcher.
pub fn is_wsl() -> bool {
    if std::env::var("WSL_DISTRO_NAME").is_ok() {
        return true;
    }

    ["/proc/version", "/proc/sys/kernel/osrelease"]
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .any(|contents| mentions_wsl(&contents))
}

fn mentions_wsl(kernel_info: &str) -> bool {
    let lower = kernel_info.to_lowercase();
    lower.contains("microsoft") || lower.contains("wsl")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wsl() {
        // Result depends on the platform; just make sure it doesn't panic
        let _ = is_wsl();
    }

    #[test]
    fn test_mentions_wsl() {
        assert!(mentions_wsl("5.15.90.1-microsoft-standard-WSL2"));
        assert!(!mentions_wsl("Linux version 6.8.0-45-generic"));
    }
}

use crate::types::{CredentialSource, EnvironmentInfo};

pub fn credential_source_label(source: &CredentialSource) -> &str {
    match source {
        CredentialSource::Auto => "Auto-detect",
        CredentialSource::Linux => "Linux (~/.aws)",
        CredentialSource::Wsl2 => "WSL2 Linux",
        CredentialSource::Windows => "Windows",
        CredentialSource::Custom => "Custom Path",
        CredentialSource::Other(raw) => raw,
    }
}

// WSL2 hosts can report Windows-adjacent flags, so WSL2 must win.
pub fn environment_label(env: &EnvironmentInfo) -> &'static str {
    if env.is_wsl2 {
        "WSL2"
    } else if env.is_windows {
        "Windows"
    } else if env.is_mac_os {
        "macOS"
    } else if env.is_linux {
        "Linux"
    } else {
        "Unknown"
    }
}

use std::process::Command;

/// Whether the desktop prefers a dark theme. Defaults to dark when the
/// setting can't be read.
pub fn is_dark_mode() -> bool {
    query().unwrap_or(true)
}

#[cfg(target_os = "macos")]
fn query() -> Option<bool> {
    let out = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    // The key is absent in light mode, which makes `defaults` exit non-zero.
    Some(macos_style_is_dark(&String::from_utf8_lossy(&out.stdout)))
}

#[cfg(target_os = "windows")]
fn query() -> Option<bool> {
    let out = Command::new("reg")
        .args([
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output()
        .ok()?;
    windows_registry_is_dark(&String::from_utf8_lossy(&out.stdout))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn query() -> Option<bool> {
    let out = Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    gnome_scheme_is_dark(&String::from_utf8_lossy(&out.stdout))
}

#[cfg_attr(not(any(target_os = "macos", test)), allow(dead_code))]
fn macos_style_is_dark(stdout: &str) -> bool {
    stdout.trim().eq_ignore_ascii_case("dark")
}

/// `AppsUseLightTheme` is a DWORD: 0x0 dark, 0x1 light.
#[cfg_attr(not(any(target_os = "windows", test)), allow(dead_code))]
fn windows_registry_is_dark(stdout: &str) -> Option<bool> {
    let line = stdout.lines().find(|l| l.contains("AppsUseLightTheme"))?;
    match line.split_whitespace().last()? {
        "0x0" => Some(true),
        "0x1" => Some(false),
        _ => None,
    }
}

#[cfg_attr(any(target_os = "macos", target_os = "windows"), allow(dead_code))]
fn gnome_scheme_is_dark(stdout: &str) -> Option<bool> {
    match stdout.trim().trim_matches('\'') {
        "prefer-dark" => Some(true),
        "prefer-light" | "default" => Some(false),
        _ => None,
    }
}

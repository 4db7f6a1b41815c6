//! Console-mode probing for the Windows console host.

use std::{fs, io, mem};

use windows_sys::Win32::System::{
    Console::{
        GetConsoleMode, GetStdHandle, SetConsoleMode, CONSOLE_MODE,
        ENABLE_VIRTUAL_TERMINAL_PROCESSING, STD_OUTPUT_HANDLE,
    },
    SystemInformation::{GetVersionExW, OSVERSIONINFOW},
};

use super::{ColorLevel, DetectError, Detection, EnvSource};

/// Fallback detection when `TERM` is unset: most likely a native Windows
/// console rather than a Unix-like terminal emulator.
pub(super) fn detect_console(env: &dyn EnvSource) -> Detection {
    // MSYS-like shells (git-bash) translate ANSI sequences themselves.
    if let Some(msystem) = env.var("MSYSTEM") {
        return Detection::new(ColorLevel::Extended256, format!("MSYSTEM={msystem}"));
    }

    if env.var("WSL_DISTRO_NAME").is_some() && is_wsl() {
        return Detection::new(ColorLevel::TrueColor, "WSL");
    }

    match enable_virtual_terminal() {
        // A console host that accepts the VT mode bit renders full RGB.
        Ok(()) => Detection::new(ColorLevel::TrueColor, "VirtualTerminal"),
        Err(err) => {
            let mut detection = legacy_console_level();
            detection
                .errors
                .push(DetectError::new("enabling virtual terminal processing", err));
            detection
        }
    }
}

fn is_wsl() -> bool {
    fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|contents| contents.to_ascii_lowercase().contains("microsoft"))
        .unwrap_or(false)
}

fn enable_virtual_terminal() -> io::Result<()> {
    // SAFETY: standard console API calls; the mode pointer references a local.
    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        let mut mode: CONSOLE_MODE = 0;
        if GetConsoleMode(handle, &mut mode) == 0 {
            return Err(io::Error::last_os_error());
        }
        if SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING) == 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Legacy heuristic for console hosts that reject the VT mode bit. The
/// Windows 10 console gained ANSI rendering in build 10586 and true color in
/// build 14931; anything older renders escape sequences as mojibake.
fn legacy_console_level() -> Detection {
    let Some((major, build)) = os_version() else {
        return Detection::default();
    };
    if major >= 10 && build >= 14931 {
        Detection::new(ColorLevel::TrueColor, format!("ConsoleHost build {build}"))
    } else if major >= 10 && build >= 10586 {
        Detection::new(
            ColorLevel::Extended256,
            format!("ConsoleHost build {build}"),
        )
    } else {
        Detection::default()
    }
}

fn os_version() -> Option<(u32, u32)> {
    // SAFETY: the struct is zero-initialized and carries its size, as the API
    // requires.
    unsafe {
        let mut info: OSVERSIONINFOW = mem::zeroed();
        info.dwOSVersionInfoSize = mem::size_of::<OSVERSIONINFOW>() as u32;
        if GetVersionExW(&mut info) == 0 {
            return None;
        }
        Some((info.dwMajorVersion, info.dwBuildNumber))
    }
}

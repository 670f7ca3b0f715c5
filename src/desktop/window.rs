use crate::error::{BotError, BotResult};
use crate::geometry::Region;
use windows::Win32::Foundation::{HWND, POINT, RECT};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, GetClientRect, SetProcessDPIAware};
use windows::core::PCWSTR;

/// Opt out of DPI virtualisation so client coordinates are physical pixels.
///
/// Must run before any window geometry is read.
pub fn set_dpi_aware() {
    // SAFETY: no arguments; only changes how this process is scaled
    let ok = unsafe { SetProcessDPIAware() };
    if !ok.as_bool() {
        log::warn!("⚠️ SetProcessDPIAware failed, coordinates may be scaled");
    }
}

fn find_window(title: &str) -> BotResult<HWND> {
    let wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
    // SAFETY: `wide` is NUL terminated and outlives the call
    let hwnd = unsafe { FindWindowW(PCWSTR::null(), PCWSTR(wide.as_ptr())) }.map_err(|_| {
        BotError::WindowNotFound {
            title: title.to_string(),
        }
    })?;

    if hwnd.is_invalid() {
        return Err(BotError::WindowNotFound {
            title: title.to_string(),
        });
    }
    Ok(hwnd)
}

/// Screen rectangle of the client area of the window titled exactly `title`
pub fn client_region(title: &str) -> BotResult<Region> {
    let hwnd = find_window(title)?;
    let query_failed = |description: String| BotError::WindowQueryFailed {
        title: title.to_string(),
        description,
    };

    let mut rect = RECT::default();
    // SAFETY: `hwnd` came from FindWindowW and `rect` is a valid out pointer
    unsafe { GetClientRect(hwnd, &mut rect) }.map_err(|e| query_failed(e.to_string()))?;

    let mut origin = POINT { x: 0, y: 0 };
    // SAFETY: as above
    if !unsafe { ClientToScreen(hwnd, &mut origin) }.as_bool() {
        return Err(query_failed("ClientToScreen failed".to_string()));
    }

    let region = Region::new(
        origin.x,
        origin.y,
        (rect.right - rect.left).max(0) as u32,
        (rect.bottom - rect.top).max(0) as u32,
    );
    if !region.is_valid() {
        return Err(query_failed("client area is empty (minimised?)".to_string()));
    }

    log::info!(
        "🪟 Found '{}' client area {}x{} at ({}, {})",
        title,
        region.width,
        region.height,
        region.left,
        region.top
    );
    Ok(region)
}

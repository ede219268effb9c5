//! C-ABI FFI bindings for host integration.
//!
//! This module provides a C-compatible API so design-tool plugins and other
//! languages can hand a scene snapshot to wcagscan and receive the scan
//! response as JSON.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::render::{JsonFormat, ScanReport};
use crate::scan::{scan_request, ScanOptions, ScanRequest};
use crate::{check_contrast, is_large_text, load_scene_file, render, scan_selection, Scene};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct WcagscanResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `wcagscan_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `wcagscan_free_result`.
    pub error: *mut c_char,
}

impl WcagscanResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

unsafe fn str_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("{} cannot be null", name));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| format!("Invalid UTF-8 {}", name))
}

/// Scan a scene snapshot and return the scan response as JSON.
///
/// `request_json` may be null, in which case the snapshot's saved selection
/// is scanned with the WCAG AA thresholds.
///
/// # Safety
///
/// `scene_json` must be a valid null-terminated UTF-8 string.
/// `request_json` must be null or a valid null-terminated UTF-8 string.
/// The returned result must be freed with `wcagscan_free_result`.
#[no_mangle]
pub unsafe extern "C" fn wcagscan_scan_json(
    scene_json: *const c_char,
    request_json: *const c_char,
) -> WcagscanResult {
    let scene_json = match str_arg(scene_json, "scene_json") {
        Ok(s) => s,
        Err(e) => return WcagscanResult::error(e),
    };

    let request_json = if request_json.is_null() {
        None
    } else {
        match str_arg(request_json, "request_json") {
            Ok(s) => Some(s),
            Err(e) => return WcagscanResult::error(e),
        }
    };

    match scan_json_internal(scene_json, request_json) {
        Ok(json) => WcagscanResult::success(json),
        Err(e) => WcagscanResult::error(e.to_string()),
    }
}

fn scan_json_internal(scene_json: &str, request_json: Option<&str>) -> crate::Result<String> {
    let scene = Scene::from_json(scene_json)?;
    let options = ScanOptions::default();

    let response = match request_json {
        Some(json) => {
            let request: ScanRequest = serde_json::from_str(json)?;
            if let Some(ref thresholds) = request.thresholds {
                thresholds.validate()?;
            }
            scan_request(&scene, &request, &options)
        }
        None => scan_selection(&scene, &options),
    };

    Ok(serde_json::to_string(&response)?)
}

/// Scan the saved selection of a snapshot file and return a JSON report.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `wcagscan_free_result`.
#[no_mangle]
pub unsafe extern "C" fn wcagscan_scan_file(path: *const c_char, pretty: bool) -> WcagscanResult {
    let path_str = match str_arg(path, "path") {
        Ok(s) => s,
        Err(e) => return WcagscanResult::error(e),
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    match scan_file_internal(Path::new(path_str), format) {
        Ok(json) => WcagscanResult::success(json),
        Err(e) => WcagscanResult::error(e.to_string()),
    }
}

fn scan_file_internal(path: &Path, format: JsonFormat) -> crate::Result<String> {
    let scene = load_scene_file(path)?;
    let options = ScanOptions::default();
    let report = ScanReport::new(scan_selection(&scene, &options), options.thresholds)
        .with_document(scene.name())
        .with_source(path.display().to_string());
    render::to_json(&report, format)
}

/// Contrast ratio between two hex colors.
///
/// # Safety
///
/// Both arguments must be valid null-terminated UTF-8 strings.
/// Returns -1.0 on error.
#[no_mangle]
pub unsafe extern "C" fn wcagscan_contrast_ratio(
    foreground: *const c_char,
    background: *const c_char,
) -> f64 {
    let (Ok(fg), Ok(bg)) = (
        str_arg(foreground, "foreground"),
        str_arg(background, "background"),
    ) else {
        return -1.0;
    };

    check_contrast(fg, bg).unwrap_or(-1.0)
}

/// Whether text of the given size and numeric weight counts as large text.
#[no_mangle]
pub extern "C" fn wcagscan_is_large_text(font_size: f64, font_weight: f64) -> bool {
    is_large_text(font_size, font_weight)
}

/// Free a result returned by any wcagscan function.
///
/// # Safety
///
/// The `result` must have been returned by a wcagscan function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn wcagscan_free_result(result: WcagscanResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by wcagscan.
///
/// # Safety
///
/// The `ptr` must have been allocated by wcagscan.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn wcagscan_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the wcagscan library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn wcagscan_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

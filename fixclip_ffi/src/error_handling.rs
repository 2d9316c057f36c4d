use std::{cell::RefCell, ffi::CString};

/// Holds last error information data.
pub struct LastErrorData {
    /// Human readable error message.
    pub error_msg: CString,
    /// Name of the function that failed and the inputs it received that are relevant to the
    /// error.
    pub error_report_data: CString,
}

impl LastErrorData {
    pub fn new(error_msg: CString, error_report_data: CString) -> Self {
        LastErrorData {
            error_msg,
            error_report_data,
        }
    }
}

// Storage for last error set
thread_local!(pub static LAST_ERROR: RefCell<Option<LastErrorData>> = const { RefCell::new(None) });

/// Interior nul bytes are dropped so the conversion cannot fail.
fn to_c_string<T: Into<Vec<u8>>>(value: T) -> CString {
    let mut bytes = value.into();
    bytes.retain(|&b| b != 0);
    CString::new(bytes).unwrap_or_default()
}

/// Set last error information for the calling thread.
pub fn set_last_error<T: Into<Vec<u8>>, U: Into<Vec<u8>>>(error_msg: T, error_report: U) {
    let msg = to_c_string(error_msg);
    let report = to_c_string(error_report);
    log::debug!("ffi error: {:?} ({:?})", msg, report);

    LAST_ERROR.with(|last_result| {
        *last_result.borrow_mut() = Some(LastErrorData::new(msg, report));
    });
}

/// Clear the last error of the calling thread.
pub fn clear_last_error() {
    LAST_ERROR.with(|last_result| {
        *last_result.borrow_mut() = None;
    });
}

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;
use swell_sim_core::{ConfigError, GridError};

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code passed across the FFI boundary
/// - `msg()` - Returns the error message for diagnostics
///
/// # Example
/// ```ignore
/// let err = DefaultSwellSimError::null_pointer("out_instance");
/// assert_eq!(err.code(), SwellSimErrorCode::NullPointer);
/// assert_eq!(err.msg(), "Parameter 'out_instance' cannot be null");
/// ```
pub(crate) trait SwellSimError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> SwellSimErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `SwellSimError` for the FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultSwellSimError {
    code: SwellSimErrorCode,
    msg: String,
}

impl DefaultSwellSimError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: SwellSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"state"`, `"points_snapshot"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: SwellSimErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for a rejected land grid.
    pub fn invalid_grid(error: &GridError) -> Self {
        Self {
            code: SwellSimErrorCode::InvalidGrid,
            msg: format!("Land grid: {error}"),
        }
    }

    /// Create error for a rejected engine configuration.
    pub fn invalid_config(error: &ConfigError) -> Self {
        Self {
            code: SwellSimErrorCode::InvalidParameter,
            msg: format!("Swell config: {error}"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: SwellSimErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for an index past the end of a collection.
    ///
    /// # Arguments
    /// * `what` - The indexed collection (e.g., `"ray"`)
    /// * `index` - The requested index
    /// * `len` - The collection length
    pub fn index_out_of_range(what: &str, index: usize, len: usize) -> Self {
        Self {
            code: SwellSimErrorCode::IndexOutOfRange,
            msg: format!("{what} index {index} out of range (len {len})"),
        }
    }
}

impl SwellSimError for DefaultSwellSimError {
    fn code(&self) -> SwellSimErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by swell simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwellSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid land grid: zero or overflowing dimensions, or a cell buffer of the wrong length.
    InvalidGrid = 3,

    /// Invalid parameter passed to function.
    InvalidParameter = 4,

    /// Ray or storm index past the end of the current field.
    IndexOutOfRange = 5,
}

impl From<DefaultSwellSimError> for SwellSimErrorCode {
    fn from(error: DefaultSwellSimError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is kept alive here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, SwellSimErrorCode)> = const { RefCell::new((None, SwellSimErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, SwellSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, SwellSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error, or until the thread terminates.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// SwellSimInstance* sim = nullptr;
/// SwellSimErrorCode err = swell_sim_new(200, 160, nullptr, &sim);
/// if (err != SwellSimErrorCode::Ok) {
///     const char* error = swell_sim_get_last_error();
///     if (error) {
///         printf("Swell sim creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn swell_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `SwellSimErrorCode::Ok` (0) if the last call on this thread succeeded.
/// Error state is per thread.
#[no_mangle]
pub extern "C" fn swell_sim_get_last_error_code() -> SwellSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

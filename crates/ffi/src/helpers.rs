use crate::error::{with_last_error_mut, DefaultSwellSimError, SwellSimError, SwellSimErrorCode};
use crate::instance::{SwellSimInstance, SwellState};
use std::ffi::CString;
use std::sync::{MutexGuard, RwLockReadGuard, RwLockWriteGuard};

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl SwellSimError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl SwellSimError) -> SwellSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = SwellSimErrorCode::Ok;
    });
}

/// Record the error of a failed result and hand back its code.
pub(crate) fn track_result<T>(result: Result<T, DefaultSwellSimError>) -> Result<T, SwellSimErrorCode> {
    result.map_err(|e| track_error(&e))
}

/// Run an FFI body, clearing the last error on success and recording it on failure.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> SwellSimErrorCode
where
    F: FnOnce() -> Result<(), DefaultSwellSimError>,
{
    match f() {
        Ok(()) => {
            clear_last_error();
            SwellSimErrorCode::Ok
        }
        Err(e) => track_error(&e),
    }
}

/// Borrow an instance from a raw pointer handed out by `swell_sim_new`.
pub(crate) fn instance_from_ptr<'a>(ptr: *const SwellSimInstance) -> Result<&'a SwellSimInstance, DefaultSwellSimError> {
    // SAFETY: non-null pointers come from `Box::into_raw` in `swell_sim_new` and
    // stay valid until `swell_sim_destroy`, per the documented contract.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultSwellSimError::null_pointer("ptr"))
}

/// Shared access to the instance state.
pub(crate) fn read_state(instance: &SwellSimInstance) -> Result<RwLockReadGuard<'_, SwellState>, DefaultSwellSimError> {
    instance
        .state
        .read()
        .map_err(|_| DefaultSwellSimError::lock_poisoned("state"))
}

/// Exclusive access to the instance state.
pub(crate) fn write_state(instance: &SwellSimInstance) -> Result<RwLockWriteGuard<'_, SwellState>, DefaultSwellSimError> {
    instance
        .state
        .write()
        .map_err(|_| DefaultSwellSimError::lock_poisoned("state"))
}

/// Lock one of the snapshot buffers.
pub(crate) fn lock_snapshot<'a, T>(
    snapshot: &'a std::sync::Mutex<Vec<T>>,
    name: &str,
) -> Result<MutexGuard<'a, Vec<T>>, DefaultSwellSimError> {
    snapshot
        .lock()
        .map_err(|_| DefaultSwellSimError::lock_poisoned(name))
}

use swell_sim_core::{LandGrid, LandMask, LandPolygon, MapProjection};

use crate::error::{DefaultSwellSimError, SwellSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, read_state, track_error, write_state};
use crate::instance::SwellSimInstance;

/// Mark a single cell as land (`true`) or water (`false`).
///
/// Returns
/// - `SwellSimErrorCode::Ok` (0) on success
/// - `SwellSimErrorCode::NullPointer` if `ptr` is null
/// - `SwellSimErrorCode::IndexOutOfRange` if the cell lies outside the grid
/// - `SwellSimErrorCode::LockPoisoned` if the internal lock is poisoned
#[no_mangle]
pub extern "C" fn swell_sim_set_land(ptr: *const SwellSimInstance, col: usize, row: usize, is_land: bool) -> SwellSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let mut state = write_state(instance)?;
        let (width, height) = (state.land.width(), state.land.height());
        if col >= width {
            return Err(DefaultSwellSimError::index_out_of_range("column", col, width));
        }
        if row >= height {
            return Err(DefaultSwellSimError::index_out_of_range("row", row, height));
        }
        state.land.set_land(col, row, is_land);
        Ok(())
    })
}

/// Replace every cell of the grid from a row-major buffer (0 water, non-zero land).
///
/// The grid keeps its dimensions; `len` must equal `width * height`.
///
/// Returns
/// - `SwellSimErrorCode::Ok` (0) on success
/// - `SwellSimErrorCode::NullPointer` if `ptr` or `cells` is null
/// - `SwellSimErrorCode::InvalidGrid` if `len` does not match the grid
///
/// # Safety
/// `cells` must point to at least `len` readable bytes. They are copied.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_set_land_cells(
    ptr: *const SwellSimInstance,
    cells: *const u8,
    len: usize,
) -> SwellSimErrorCode {
    if cells.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("cells"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        // SAFETY: caller guarantees `len` readable bytes at `cells`.
        let slice = unsafe { std::slice::from_raw_parts(cells, len) };
        let mut state = write_state(instance)?;
        let grid = LandGrid::from_cells(state.land.width(), state.land.height(), slice.to_vec())
            .map_err(|e| DefaultSwellSimError::invalid_grid(&e))?;
        state.land = grid;
        // A fresh grid restarts its revision count, so cached rays cannot be trusted
        state.cache.invalidate();
        Ok(())
    })
}

/// Rasterize the built-in Pacific coastlines (Hawaii, Japan, Kamchatka,
/// Alaska, North America) onto the grid, replacing its contents.
///
/// Uses the default map window (10°N to 65°N, 130°E to 110°W).
///
/// Returns
/// - `SwellSimErrorCode::Ok` (0) on success
/// - `SwellSimErrorCode::NullPointer` if `ptr` is null
#[no_mangle]
pub extern "C" fn swell_sim_load_pacific_land(ptr: *const SwellSimInstance) -> SwellSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let mut state = write_state(instance)?;
        let projection = MapProjection::default().with_grid(state.land.width(), state.land.height());
        let grid = LandGrid::from_polygons(&projection, &LandPolygon::pacific_defaults())
            .map_err(|e| DefaultSwellSimError::invalid_grid(&e))?;
        state.land = grid;
        state.cache.invalidate();
        Ok(())
    })
}

/// Query a cell. Cells outside the grid report land.
///
/// # Safety
/// `out_is_land` must be a valid, non-null pointer to a `bool`.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_is_land(
    ptr: *const SwellSimInstance,
    col: i64,
    row: i64,
    out_is_land: *mut bool,
) -> SwellSimErrorCode {
    if out_is_land.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_is_land"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let state = read_state(instance)?;
        unsafe {
            *out_is_land = state.land.is_land(col, row);
        }
        Ok(())
    })
}

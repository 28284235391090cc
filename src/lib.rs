use core::ffi::c_int;
use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    ptr, slice,
};

pub mod utilities;
use utilities::{
    error::KmeansError,
    kmeans::compute_clusters,
    structs::{ClusterOptions, Execution, Point},
};

pub use utilities::{
    compute_clusters_parallel, compute_clusters_sequential,
    structs::{Aggregate, Centroid, CentroidSet, Clustering, Termination},
};

pub const OK: c_int = 0;
pub const ERR_INVALID_ARGS: c_int = 1;
pub const ERR_PANIC: c_int = 2;
pub const ERR_PARSE: c_int = 4;
pub const ERR_EMPTY_CLUSTER: c_int = 5;
pub const ERR_TASK: c_int = 6;

#[repr(C)]
pub struct Buf {
    pub ptr: *mut u8,
    pub len: usize,
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn alloc(size: usize) -> *mut u8 {
    if size == 0 {
        return core::ptr::null_mut();
    }
    let mut v = Vec::<u8>::with_capacity(size);
    let p = v.as_mut_ptr();
    core::mem::forget(v);
    p
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_(ptr_raw: *mut u8, size: usize) {
    if !ptr_raw.is_null() {
        let _ = unsafe { Vec::<u8>::from_raw_parts(ptr_raw, size, size) };
    }
}

/// Clusters a row-major `i64` dataset.
///
/// `options_ptr` holds a JSON `ClusterOptions` object (null means defaults);
/// `data_len` and `centroids_len` count values, not rows. On success the
/// JSON of the resulting `Clustering` is written to `out_json` and must be
/// released with `free_`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn kmeans(
    data_ptr: *const i64,
    data_len: usize,
    centroids_ptr: *const i64,
    centroids_len: usize,
    options_ptr: *const u8,
    options_len: usize,
    parallel: c_int,
    out_json: *mut Buf,
) -> c_int {
    if data_ptr.is_null() || centroids_ptr.is_null() || out_json.is_null() {
        return ERR_INVALID_ARGS;
    }
    let run = || -> Result<(), c_int> {
        let options = if options_ptr.is_null() || options_len == 0 {
            ClusterOptions::default()
        } else {
            let raw = unsafe { slice::from_raw_parts(options_ptr, options_len) };
            ClusterOptions::from_json(raw).map_err(|e| error_code(&e))?
        };
        let values = unsafe { slice::from_raw_parts(data_ptr, data_len) };
        let seeds = unsafe { slice::from_raw_parts(centroids_ptr, centroids_len) };
        let dataset = to_rows(values, options.num_columns)?;
        let initial = to_rows(seeds, options.num_columns)?;

        let execution = if parallel != 0 {
            Execution::Parallel
        } else {
            Execution::Sequential
        };
        let clustering = compute_clusters(&dataset, &initial, &options, execution)
            .map_err(|e| error_code(&e))?;
        let s = serde_json::to_string(&clustering).map_err(|_| ERR_PARSE)?;
        write_buf(out_json, s.into_bytes().into_boxed_slice());
        Ok(())
    };
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(())) => OK,
        Ok(Err(code)) => code,
        Err(_) => ERR_PANIC,
    }
}

pub fn error_code(e: &KmeansError) -> c_int {
    match e {
        KmeansError::Json(_) => ERR_PARSE,
        KmeansError::EmptyCluster { .. } => ERR_EMPTY_CLUSTER,
        KmeansError::TaskFailure { .. }
        | KmeansError::TaskPanicked(_)
        | KmeansError::ThreadPool(_) => ERR_TASK,
        KmeansError::DimensionMismatch { .. }
        | KmeansError::CentroidCountMismatch { .. }
        | KmeansError::InsufficientData { .. }
        | KmeansError::InvalidOptions(_) => ERR_INVALID_ARGS,
    }
}

fn to_rows(values: &[i64], num_columns: usize) -> Result<Vec<Point>, c_int> {
    if num_columns == 0 || values.len() % num_columns != 0 {
        return Err(ERR_INVALID_ARGS);
    }
    Ok(values.chunks_exact(num_columns).map(|r| r.to_vec()).collect())
}

fn write_buf(out: *mut Buf, bytes: Box<[u8]>) {
    let len = bytes.len();
    let ptr_bytes = Box::into_raw(bytes) as *mut u8;
    unsafe {
        ptr::write_unaligned(
            out,
            Buf {
                ptr: ptr_bytes,
                len,
            },
        )
    };
}

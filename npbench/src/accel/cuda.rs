//! NVIDIA devices through the CUDA driver API.
//!
//! Only available with the `cuda` feature. Without it the probe reports the backend as absent.
use npbench_instance::Point;

use super::{BackendError, DistanceMatrix, ProbeError, ProbeReport};

#[cfg(feature = "cuda")]
mod device {
    use cudarc::driver::{CudaDevice, LaunchAsync, LaunchConfig};
    use cudarc::nvrtc::compile_ptx;

    use super::*;

    const MODULE: &str = "npbench_distance";
    const KERNEL: &str = "pairwise_distance";

    const KERNEL_SRC: &str = r#"
extern "C" __global__ void pairwise_distance(
    double *out,
    const double *xs,
    const double *ys,
    const int n
) {
    int idx = blockIdx.x * blockDim.x + threadIdx.x;
    if (idx < n * n) {
        int i = idx / n;
        int j = idx % n;
        out[idx] = hypot(xs[i] - xs[j], ys[i] - ys[j]);
    }
}
"#;

    /// Largest instance whose cell index fits the kernel's `int` arithmetic.
    const MAX_POINTS: usize = 46_340;

    fn device_error(err: impl std::fmt::Debug) -> BackendError {
        BackendError::Device(format!("{:?}", err))
    }

    pub fn probe() -> Result<ProbeReport, ProbeError> {
        let count = CudaDevice::count().map_err(|err| ProbeError::Failed(format!("{:?}", err)))?;
        Ok(ProbeReport {
            present: true,
            cuda_available: count > 0,
            device_count: count.max(0) as usize,
            error: None,
        })
    }

    pub fn distance_matrix(points: &[Point]) -> Result<DistanceMatrix, BackendError> {
        let size = points.len();
        if size == 0 {
            return Ok(DistanceMatrix::from_vec(0, vec![]));
        }
        if size > MAX_POINTS {
            return Err(BackendError::Kernel(format!(
                "{} points exceed the kernel limit of {}",
                size, MAX_POINTS
            )));
        }

        let count = CudaDevice::count().map_err(device_error)?;
        if count <= 0 {
            return Err(BackendError::NoDevice);
        }

        let device = CudaDevice::new(0).map_err(device_error)?;
        let ptx =
            compile_ptx(KERNEL_SRC).map_err(|err| BackendError::Kernel(format!("{:?}", err)))?;
        device
            .load_ptx(ptx, MODULE, &[KERNEL])
            .map_err(device_error)?;
        let kernel = device
            .get_func(MODULE, KERNEL)
            .ok_or_else(|| BackendError::Kernel(format!("kernel {} not found", KERNEL)))?;

        let xs = device
            .htod_copy(points.iter().map(|point| point.x).collect::<Vec<f64>>())
            .map_err(device_error)?;
        let ys = device
            .htod_copy(points.iter().map(|point| point.y).collect::<Vec<f64>>())
            .map_err(device_error)?;
        let mut out = device
            .alloc_zeros::<f64>(size * size)
            .map_err(device_error)?;

        let config = LaunchConfig::for_num_elems((size * size) as u32);
        unsafe { kernel.launch(config, (&mut out, &xs, &ys, size as i32)) }
            .map_err(|err| BackendError::Kernel(format!("{:?}", err)))?;

        let data = device.dtoh_sync_copy(&out).map_err(device_error)?;
        Ok(DistanceMatrix::from_vec(size, data))
    }
}

#[cfg(feature = "cuda")]
pub use device::{distance_matrix, probe};

#[cfg(not(feature = "cuda"))]
pub fn probe() -> Result<ProbeReport, ProbeError> {
    Err(ProbeError::NotCompiled("cuda"))
}

#[cfg(not(feature = "cuda"))]
pub fn distance_matrix(_points: &[Point]) -> Result<DistanceMatrix, BackendError> {
    Err(BackendError::NotCompiled("cuda"))
}

//! Host multi-core backend on the rayon thread pool.
use rayon::prelude::*;

use npbench_instance::Point;

use super::{BackendError, DistanceMatrix, ProbeError, ProbeReport};

pub fn probe() -> Result<ProbeReport, ProbeError> {
    Ok(ProbeReport {
        present: true,
        cuda_available: false,
        device_count: rayon::current_num_threads(),
        error: None,
    })
}

/// Computes one matrix row per task.
pub fn distance_matrix(points: &[Point]) -> Result<DistanceMatrix, BackendError> {
    let size = points.len();
    let mut data = vec![0.0; size * size];

    if size > 0 {
        data.par_chunks_mut(size)
            .enumerate()
            .for_each(|(i, row)| {
                for (cell, point) in row.iter_mut().zip(points.iter()) {
                    *cell = points[i].distance(point);
                }
            });
    }

    Ok(DistanceMatrix::from_vec(size, data))
}

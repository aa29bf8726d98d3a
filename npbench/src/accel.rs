//! Compute backends for the dense pairwise distance matrix.
//!
//! Accelerated backends are an optimization only. Each one is probed once per run, usable
//! backends are tried in probe order and any [`BackendError`] makes the caller fall back to the
//! next candidate and finally to the sequential CPU path.
//!
//! Only [`Backend::Cuda`] runs on a GPU. [`Backend::Parallel`] is a host backend on the rayon
//! thread pool: it never reports CUDA availability and is used when more than one worker thread
//! is available.
use log::info;
use serde::Serialize;
use thiserror::Error;

use npbench_instance::Point;

mod cuda;
mod parallel;

/// Failure while using a backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend `{0}` is not compiled in")]
    NotCompiled(&'static str),
    #[error("no device available")]
    NoDevice,
    #[error("device error: {0}")]
    Device(String),
    #[error("kernel error: {0}")]
    Kernel(String),
}

/// Failure while probing a backend.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("backend `{0}` is not compiled in")]
    NotCompiled(&'static str),
    #[error("probe failed: {0}")]
    Failed(String),
}

/// Capabilities reported by a backend probe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub present: bool,
    pub cuda_available: bool,
    pub device_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<ProbeReport, ProbeError>> for ProbeReport {
    fn from(result: Result<ProbeReport, ProbeError>) -> ProbeReport {
        result.unwrap_or_else(|err| ProbeReport {
            error: Some(err.to_string()),
            ..ProbeReport::default()
        })
    }
}

/// Available implementations of [`Backend::distance_matrix`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Sequential host computation.
    Cpu,
    /// NVIDIA device through the CUDA driver API.
    Cuda,
    /// Host computation spread over the rayon thread pool.
    Parallel,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Cpu => "cpu",
            Backend::Cuda => "cuda",
            Backend::Parallel => "parallel",
        }
    }

    /// Query the capabilities of this backend.
    pub fn probe(self) -> Result<ProbeReport, ProbeError> {
        match self {
            Backend::Cpu => Ok(ProbeReport {
                present: true,
                cuda_available: false,
                device_count: 1,
                error: None,
            }),
            Backend::Cuda => cuda::probe(),
            Backend::Parallel => parallel::probe(),
        }
    }

    /// Whether a probe result makes this backend worth using over the CPU path.
    pub fn is_usable(self, report: &ProbeReport) -> bool {
        match self {
            Backend::Cpu => false,
            Backend::Cuda => report.cuda_available && report.device_count > 0,
            Backend::Parallel => report.present && report.device_count > 1,
        }
    }

    /// All pairwise Euclidean distances between `points`.
    pub fn distance_matrix(self, points: &[Point]) -> Result<DistanceMatrix, BackendError> {
        match self {
            Backend::Cpu => Ok(DistanceMatrix::from_fn(points.len(), |i, j| {
                points[i].distance(&points[j])
            })),
            Backend::Cuda => cuda::distance_matrix(points),
            Backend::Parallel => parallel::distance_matrix(points),
        }
    }
}

/// Probe results of all accelerated backends, in probe order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Accelerators {
    pub cuda: ProbeReport,
    pub parallel: ProbeReport,
}

impl Accelerators {
    /// Probe all accelerated backends.
    pub fn probe() -> Accelerators {
        let accelerators = Accelerators {
            cuda: Backend::Cuda.probe().into(),
            parallel: Backend::Parallel.probe().into(),
        };
        for &(backend, report) in accelerators.reports().iter() {
            info!(
                "Backend {}: present={} cuda_available={} device_count={}{}",
                backend.name(),
                report.present,
                report.cuda_available,
                report.device_count,
                report
                    .error
                    .as_ref()
                    .map(|err| format!(" ({})", err))
                    .unwrap_or_default(),
            );
        }
        accelerators
    }

    fn reports(&self) -> [(Backend, &ProbeReport); 2] {
        [(Backend::Cuda, &self.cuda), (Backend::Parallel, &self.parallel)]
    }

    /// Usable backends in order of preference.
    pub fn candidates(&self) -> Vec<Backend> {
        self.reports()
            .iter()
            .filter(|(backend, report)| backend.is_usable(report))
            .map(|&(backend, _)| backend)
            .collect()
    }
}

/// A dense, row-major `size × size` matrix of distances.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Wrap row-major data of length `size * size`.
    pub fn from_vec(size: usize, data: Vec<f64>) -> DistanceMatrix {
        assert_eq!(data.len(), size * size);
        DistanceMatrix { size, data }
    }

    /// Build a matrix entry by entry.
    pub fn from_fn(size: usize, mut entry: impl FnMut(usize, usize) -> f64) -> DistanceMatrix {
        let mut data = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                data.push(entry(i, j));
            }
        }
        DistanceMatrix { size, data }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use npbench_instance::point::strategy::points;

    #[test]
    fn cpu_is_never_a_candidate() {
        let report = Backend::Cpu.probe().unwrap();
        assert!(report.present);
        assert!(!Backend::Cpu.is_usable(&report));
    }

    #[test]
    fn candidates_follow_probe_order() {
        let accelerators = Accelerators {
            cuda: ProbeReport {
                present: true,
                cuda_available: true,
                device_count: 2,
                error: None,
            },
            parallel: ProbeReport {
                present: true,
                cuda_available: false,
                device_count: 8,
                error: None,
            },
        };
        assert_eq!(
            accelerators.candidates(),
            vec![Backend::Cuda, Backend::Parallel]
        );

        let accelerators = Accelerators {
            cuda: ProbeReport::from(Err(ProbeError::NotCompiled("cuda"))),
            parallel: ProbeReport {
                present: true,
                cuda_available: false,
                device_count: 1,
                error: None,
            },
        };
        assert!(accelerators.candidates().is_empty());
        assert!(!accelerators.cuda.present);
        assert!(accelerators.cuda.error.is_some());
    }

    #[test]
    fn probe_never_fails() {
        let accelerators = Accelerators::probe();
        assert!(accelerators.parallel.present);
        assert!(!accelerators.parallel.cuda_available);
        assert!(accelerators.parallel.device_count >= 1);
        if accelerators.cuda.present {
            assert!(accelerators.cuda.error.is_none());
        } else {
            assert!(!accelerators.cuda.cuda_available);
        }
    }

    #[test]
    fn empty_matrix() {
        for &backend in [Backend::Cpu, Backend::Parallel].iter() {
            let matrix = backend.distance_matrix(&[]).unwrap();
            assert_eq!(matrix.size(), 0);
        }
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn cuda_not_compiled() {
        let err = Backend::Cuda
            .distance_matrix(&[Point::new(0.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, BackendError::NotCompiled("cuda")));
    }

    proptest! {
        #[test]
        fn parallel_matches_cpu(points in points(0..60)) {
            let cpu = Backend::Cpu.distance_matrix(&points).unwrap();
            let parallel = Backend::Parallel.distance_matrix(&points).unwrap();

            prop_assert_eq!(&cpu, &parallel);

            for i in 0..points.len() {
                prop_assert_eq!(cpu.get(i, i), 0.0);
                for j in 0..points.len() {
                    prop_assert_eq!(cpu.get(i, j), cpu.get(j, i));
                }
            }
        }
    }
}

use log::{info, warn};
use thousands::Separable;

use guillo_rs::CutError;
use guillo_rs::allocation::{Allocation, Allocator};
use guillo_rs::io::import::CutRequest;
use guillo_rs::oracle::MaxRectsOracle;
use guillo_rs::util::CutConfig;

use crate::EPOCH;

/// Greedy Cut-Line solver: allocates the requested pieces over bins with a [`MaxRectsOracle`]
/// and consolidates every bin into guillotine-cuttable slabs.
pub struct GclSolver {
    pub config: CutConfig,
    oracle: MaxRectsOracle,
}

impl GclSolver {
    pub fn new(config: CutConfig) -> Self {
        Self {
            config,
            oracle: MaxRectsOracle::new(config.oracle),
        }
    }

    /// Runs the allocation. An expired time limit is not fatal: the partial allocation is returned.
    pub fn solve(&self, request: &CutRequest) -> Result<Allocation, CutError> {
        let start = EPOCH.elapsed();
        let allocator = Allocator::new(&self.oracle, self.config);

        let result = allocator.allocate(
            request.pieces.clone(),
            request.bin_width,
            request.bin_height,
        );
        let allocation = match result {
            Ok(allocation) => allocation,
            Err(CutError::DeadlineExceeded {
                elapsed_ms,
                partial,
            }) => {
                warn!(
                    "[GCL] time limit expired after {}ms, reporting the partial allocation",
                    elapsed_ms.separate_with_commas()
                );
                *partial
            }
            Err(e) => return Err(e),
        };

        info!(
            "[GCL] {} of {} pieces placed in {} bins, {} unplaced, density {:.3}% ({}ms)",
            allocation.n_placed().separate_with_commas(),
            request.pieces.len().separate_with_commas(),
            allocation.containers.len(),
            allocation.unplaced.len(),
            allocation.density() * 100.0,
            (EPOCH.elapsed() - start).as_millis().separate_with_commas()
        );
        Ok(allocation)
    }
}

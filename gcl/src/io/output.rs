use serde::{Deserialize, Serialize};

use guillo_rs::io::ext_repr::{ExtRequest, ExtResponse};

use crate::config::GclConfig;

#[derive(Serialize, Deserialize, Clone)]
pub struct GclOutput {
    #[serde(flatten)]
    pub request: ExtRequest,
    pub solution: ExtResponse,
    pub config: GclConfig,
    pub run_time_ms: u64,
}

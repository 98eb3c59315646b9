use serde::{Deserialize, Serialize};

use guillo_rs::io::svg::SvgDrawOptions;
use guillo_rs::util::CutConfig;

/// Configuration for the GCL binary
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GclConfig {
    /// Configuration of the consolidation engine, the allocation loop and the packing oracle
    #[serde(default)]
    pub cut_config: CutConfig,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
    /// Write one SVG per bin next to the solution
    #[serde(default = "default_write_svg")]
    pub write_svg: bool,
}

fn default_write_svg() -> bool {
    true
}

impl Default for GclConfig {
    fn default() -> Self {
        Self {
            cut_config: CutConfig::default(),
            svg_draw_options: SvgDrawOptions::default(),
            write_svg: default_write_svg(),
        }
    }
}

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::FlowResult;

/// Precomputed flow lines and direction glyphs in the simulation frame (Z-up)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamlineDataset {
    #[serde(default)]
    pub curves: Vec<FlowCurve>,
    #[serde(default)]
    pub arrows: Vec<FlowArrow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCurve {
    pub points: Vec<Vec3>,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowArrow {
    pub origin: Vec3,
    pub direction: Vec3,
    pub color: [f32; 3],
}

impl StreamlineDataset {
    pub fn from_json(raw: &str) -> FlowResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> FlowResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty() && self.arrows.is_empty()
    }
}

/// Streamlines ready for a line/cone renderer (Y-up, displaced)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplacedStreamlines {
    pub curves: Vec<FlowCurve>,
    pub arrows: Vec<FlowArrow>,
}

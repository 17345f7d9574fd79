use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use super::shape::{Obstacle, ObstacleKind};
use crate::config::TunnelConfig;
use crate::error::{FlowError, FlowResult};

/// Obstacle as delivered by the pose feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDescriptor {
    /// Feed geometry code, see [`ObstacleKind`]
    #[serde(rename = "type")]
    pub kind: u32,
    pub pos: [f32; 3],
    /// Row-major local-to-world basis; identity when absent
    #[serde(default)]
    pub mat: Option<[f32; 9]>,
    #[serde(default)]
    pub size: [f32; 3],
}

impl TryFrom<&ObstacleDescriptor> for Obstacle {
    type Error = FlowError;

    fn try_from(desc: &ObstacleDescriptor) -> FlowResult<Self> {
        let kind = ObstacleKind::from_code(desc.kind)
            .ok_or(FlowError::UnknownObstacleKind(desc.kind))?;
        let orientation = desc
            .mat
            .map(|m| Mat3::from_cols_array(&m).transpose())
            .unwrap_or(Mat3::IDENTITY);

        Ok(Obstacle::new(kind, Vec3::from_array(desc.pos), orientation, desc.size))
    }
}

/// Priority-ordered obstacle list for one tick
///
/// Order is observable: collision recovery stops at the first obstacle that
/// contains a particle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleSnapshot {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference configuration: proxy sphere at the reference position first,
    /// then the static origin sphere (when configured)
    pub fn reference(reference_position: Vec3, config: &TunnelConfig) -> Self {
        let mut snapshot = Self::new();
        snapshot.push(Obstacle::sphere(reference_position, config.proxy_radius));
        if let Some(radius) = config.origin_sphere_radius {
            snapshot.push(Obstacle::sphere(Vec3::ZERO, radius));
        }
        snapshot
    }

    /// Build from feed descriptors, skipping any the model does not know
    pub fn from_descriptors(descriptors: &[ObstacleDescriptor]) -> Self {
        let obstacles = descriptors
            .iter()
            .filter_map(|desc| match Obstacle::try_from(desc) {
                Ok(obstacle) => Some(obstacle),
                Err(e) => {
                    log::warn!("Skipping obstacle descriptor: {}", e);
                    None
                }
            })
            .collect();
        Self { obstacles }
    }

    /// Append at the lowest priority
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Obstacles that take part in collision and deflection, in priority order
    pub fn flow_obstacles(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter().filter(|o| o.participates_in_flow())
    }
}

impl FromIterator<Obstacle> for ObstacleSnapshot {
    fn from_iter<I: IntoIterator<Item = Obstacle>>(iter: I) -> Self {
        Self {
            obstacles: iter.into_iter().collect(),
        }
    }
}

// crates/tripglobe-core/src/labels.rs

//! # Label Layout Engine
//!
//! Places one label per visible entry. Placement is a pure function of the
//! entry order and the projected anchor points: sides alternate by index,
//! and the label distance grows with the size of the neighbor group an
//! anchor belongs to. Nothing is randomized, so two passes over the same
//! input never disagree.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::LabelConfig;
use crate::machine::LabelPhase;
use crate::model::ClusterEntry;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &ScreenPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Approximate `(lat, lng)` -> screen mapping supplied by the renderer.
///
/// Returns `None` for points that are not on screen (far side of the globe).
pub trait Projector {
    fn project(&self, latitude: f64, longitude: f64) -> Option<ScreenPoint>;
}

impl<F> Projector for F
where
    F: Fn(f64, f64) -> Option<ScreenPoint>,
{
    fn project(&self, latitude: f64, longitude: f64) -> Option<ScreenPoint> {
        self(latitude, longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub entry_id: String,
    pub side: LabelSide,
    /// Pixels between anchor and label.
    pub distance: f64,
    /// Carried over from an earlier pass instead of freshly computed.
    pub is_frozen: bool,
}

/// What the renderer should draw this pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelFrame {
    pub entries: Vec<ClusterEntry>,
    pub placements: Vec<LabelPlacement>,
}

#[derive(Debug, Clone)]
pub struct LabelLayoutEngine {
    config: LabelConfig,
    last: Option<LabelFrame>,
}

impl LabelLayoutEngine {
    pub fn new(config: LabelConfig) -> Self {
        Self { config, last: None }
    }

    /// Lay out `entries`.
    ///
    /// While `animating`, the previous frame is returned unchanged (all
    /// placements frozen) so a camera move never flashes intermediate
    /// clusters. In the [`LabelPhase::Close`] phase, entries already placed
    /// in the previous frame keep their placement.
    pub fn layout(
        &mut self,
        entries: &[ClusterEntry],
        animating: bool,
        phase: LabelPhase,
        projector: &dyn Projector,
    ) -> LabelFrame {
        if animating {
            if let Some(last) = &self.last {
                return freeze(last);
            }
        }

        let mut placements = self.place(entries, projector);
        if phase == LabelPhase::Close {
            if let Some(last) = &self.last {
                let previous: HashMap<&str, &LabelPlacement> = last
                    .placements
                    .iter()
                    .map(|p| (p.entry_id.as_str(), p))
                    .collect();
                for p in &mut placements {
                    if let Some(prev) = previous.get(p.entry_id.as_str()) {
                        p.side = prev.side;
                        p.distance = prev.distance;
                        p.is_frozen = true;
                    }
                }
            }
        }

        let frame = LabelFrame {
            entries: entries.to_vec(),
            placements,
        };
        self.last = Some(frame.clone());
        frame
    }

    /// Forget the previous frame (pattern switch / reset).
    pub fn clear(&mut self) {
        self.last = None;
    }

    fn place(&self, entries: &[ClusterEntry], projector: &dyn Projector) -> Vec<LabelPlacement> {
        let points: Vec<Option<ScreenPoint>> = entries
            .iter()
            .map(|e| projector.project(e.center_latitude, e.center_longitude))
            .collect();
        let groups = neighbor_groups(&points, self.config.crowding_radius_px);

        let mut group_size: HashMap<usize, usize> = HashMap::new();
        for &g in &groups {
            *group_size.entry(g).or_default() += 1;
        }
        let mut seen_in_group: HashMap<usize, usize> = HashMap::new();

        let cfg = &self.config;
        entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let g = groups[i];
                let size = group_size[&g];
                let rank = {
                    let r = seen_in_group.entry(g).or_default();
                    let current = *r;
                    *r += 1;
                    current
                };
                // Same-side neighbors are two ranks apart.
                let distance = cfg.min_distance_px
                    + cfg.distance_step_px * (size - 1) as f64
                    + cfg.stagger_px * (rank / 2) as f64;
                LabelPlacement {
                    entry_id: e.id.clone(),
                    side: if i % 2 == 0 {
                        LabelSide::Right
                    } else {
                        LabelSide::Left
                    },
                    distance: distance.clamp(cfg.min_distance_px, cfg.max_distance_px),
                    is_frozen: false,
                }
            })
            .collect()
    }
}

fn freeze(frame: &LabelFrame) -> LabelFrame {
    LabelFrame {
        entries: frame.entries.clone(),
        placements: frame
            .placements
            .iter()
            .map(|p| LabelPlacement {
                is_frozen: true,
                ..p.clone()
            })
            .collect(),
    }
}

/// Single-link components of points closer than `radius`.
///
/// Returns a group id per point; unprojected points are singletons.
fn neighbor_groups(points: &[Option<ScreenPoint>], radius: f64) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..points.len()).collect();

    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for i in 0..points.len() {
        let Some(a) = points[i] else { continue };
        for j in (i + 1)..points.len() {
            let Some(b) = points[j] else { continue };
            if a.distance(&b) <= radius {
                let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                if ri != rj {
                    parent[rj.max(ri)] = ri.min(rj);
                }
            }
        }
    }
    (0..points.len()).map(|i| find(&mut parent, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::build_clusters;
    use crate::model::{DisplayMode, Location};

    /// Equirectangular projection, 10 px per degree.
    fn flat(lat: f64, lng: f64) -> Option<ScreenPoint> {
        Some(ScreenPoint::new(lng * 10.0, -lat * 10.0))
    }

    fn cities() -> Vec<ClusterEntry> {
        let locs = vec![
            Location::new("JPN", "Tokyo", 35.68, 139.69, "#e11d48"),
            Location::new("JPN", "Yokohama", 35.44, 139.64, "#e11d48"),
            Location::new("JPN", "Kawasaki", 35.53, 139.70, "#e11d48"),
            Location::new("JPN", "Sapporo", 43.06, 141.35, "#e11d48"),
        ];
        build_clusters(&locs, DisplayMode::City, Some("JPN"))
    }

    #[test]
    fn sides_alternate_by_index() {
        let mut engine = LabelLayoutEngine::new(LabelConfig::default());
        let frame = engine.layout(&cities(), false, LabelPhase::Overview, &flat);
        let sides: Vec<_> = frame.placements.iter().map(|p| p.side).collect();
        assert_eq!(
            sides,
            [LabelSide::Right, LabelSide::Left, LabelSide::Right, LabelSide::Left]
        );
    }

    #[test]
    fn crowded_anchors_are_pushed_further_out() {
        let cfg = LabelConfig::default();
        let mut engine = LabelLayoutEngine::new(cfg);
        let frame = engine.layout(&cities(), false, LabelPhase::Overview, &flat);
        let d: Vec<f64> = frame.placements.iter().map(|p| p.distance).collect();
        // Tokyo, Yokohama, Kawasaki form one group of three.
        assert_eq!(d[0], cfg.min_distance_px + 2.0 * cfg.distance_step_px);
        assert_eq!(d[2], d[0] + cfg.stagger_px);
        // Sapporo stands alone.
        assert_eq!(d[3], cfg.min_distance_px);
        assert!(d.iter().all(|&x| x <= cfg.max_distance_px));
    }

    #[test]
    fn distance_is_capped() {
        let cfg = LabelConfig {
            max_distance_px: 14.0,
            ..LabelConfig::default()
        };
        let mut engine = LabelLayoutEngine::new(cfg);
        let frame = engine.layout(&cities(), false, LabelPhase::Overview, &flat);
        assert!(frame.placements.iter().all(|p| p.distance <= 14.0));
    }

    #[test]
    fn animation_keeps_the_previous_frame() {
        let mut engine = LabelLayoutEngine::new(LabelConfig::default());
        let first = engine.layout(&cities(), false, LabelPhase::Overview, &flat);
        let frozen = engine.layout(&[], true, LabelPhase::Overview, &flat);
        assert_eq!(frozen.entries, first.entries);
        assert!(frozen.placements.iter().all(|p| p.is_frozen));

        let snapped = engine.layout(&[], false, LabelPhase::Overview, &flat);
        assert!(snapped.entries.is_empty());
    }

    #[test]
    fn close_phase_keeps_existing_placements() {
        let mut engine = LabelLayoutEngine::new(LabelConfig::default());
        let all = cities();
        let first = engine.layout(&all, false, LabelPhase::Close, &flat);
        // Drop Tokyo: indices shift, but the survivors keep their placement.
        let frame = engine.layout(&all[1..], false, LabelPhase::Close, &flat);
        assert!(frame.placements.iter().all(|p| p.is_frozen));
        assert_eq!(frame.placements[0].side, first.placements[1].side);
        assert_eq!(frame.placements[0].distance, first.placements[1].distance);
    }

    #[test]
    fn unprojected_points_are_singletons() {
        let hidden = |_: f64, _: f64| -> Option<ScreenPoint> { None };
        let mut engine = LabelLayoutEngine::new(LabelConfig::default());
        let frame = engine.layout(&cities(), false, LabelPhase::Overview, &hidden);
        let min = LabelConfig::default().min_distance_px;
        assert!(frame.placements.iter().all(|p| p.distance == min));
    }
}

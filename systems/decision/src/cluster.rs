//! Quadrant clustering of collectible targets.

use slide_gems_core::{BoardView, CellCoord, Direction};

const PROXIMITY_WEIGHT: f64 = 100.0;
const FULL_ALIGNMENT: f64 = 50.0;
const PARTIAL_ALIGNMENT: f64 = 25.0;

/// Board quadrant relative to the agent's cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    /// Evaluation order; earlier quadrants win ties.
    pub(crate) const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Quadrant of `target` as seen from `agent`. Cells sharing the agent's
    /// row count as south, cells sharing its column count as east.
    pub(crate) fn classify(agent: CellCoord, target: CellCoord) -> Self {
        let north = target.row() < agent.row();
        let west = target.column() < agent.column();
        match (north, west) {
            (true, true) => Self::NorthWest,
            (true, false) => Self::NorthEast,
            (false, true) => Self::SouthWest,
            (false, false) => Self::SouthEast,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::NorthWest => 0,
            Self::NorthEast => 1,
            Self::SouthWest => 2,
            Self::SouthEast => 3,
        }
    }
}

/// Targets gathered into a single quadrant.
#[derive(Clone, Debug)]
pub(crate) struct TargetCluster {
    quadrant: Quadrant,
    targets: Vec<CellCoord>,
}

impl TargetCluster {
    pub(crate) fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Integer mean of the target coordinates, truncated toward zero.
    pub(crate) fn centroid(&self) -> CellCoord {
        let count = u64::try_from(self.targets.len()).unwrap_or(u64::MAX).max(1);
        let (rows, columns) = self
            .targets
            .iter()
            .fold((0_u64, 0_u64), |(rows, columns), target| {
                (rows + u64::from(target.row()), columns + u64::from(target.column()))
            });
        CellCoord::new(
            u32::try_from(rows / count).unwrap_or(u32::MAX),
            u32::try_from(columns / count).unwrap_or(u32::MAX),
        )
    }

    /// Mean Euclidean distance from `from` to every target.
    pub(crate) fn average_distance(&self, from: CellCoord) -> f64 {
        if self.targets.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .targets
            .iter()
            .map(|target| from.euclidean_distance(*target))
            .sum();
        total / self.targets.len() as f64
    }

    /// How well a slide ending on `from` in `direction` approaches the cluster.
    ///
    /// Proximity contributes `100 / average distance`, with distances under
    /// one cell counted as one. The direction earns 50 when it points at the
    /// centroid on both axes and 25 when it matches on one.
    pub(crate) fn approach_score(&self, from: CellCoord, direction: Direction) -> f64 {
        let distance = self.average_distance(from).max(1.0);

        let centroid = self.centroid();
        let toward = (
            (i64::from(centroid.row()) - i64::from(from.row())).signum(),
            (i64::from(centroid.column()) - i64::from(from.column())).signum(),
        );
        let (row_delta, column_delta) = direction.delta();
        let heading = (i64::from(row_delta), i64::from(column_delta));

        let alignment = if heading == toward {
            FULL_ALIGNMENT
        } else if heading.0 == toward.0 || heading.1 == toward.1 {
            PARTIAL_ALIGNMENT
        } else {
            0.0
        };

        PROXIMITY_WEIGHT / distance + alignment
    }
}

/// Collects every gem and shield on the board into non-empty quadrant
/// clusters, in [`Quadrant::ALL`] order.
pub(crate) fn cluster_targets<B>(board: &B) -> Vec<TargetCluster>
where
    B: BoardView + ?Sized,
{
    let agent = board.agent();
    let mut buckets: [Vec<CellCoord>; 4] = Default::default();

    for cell in board.size().cells() {
        if board.cell(cell).is_some_and(|flags| flags.is_collectible()) {
            buckets[Quadrant::classify(agent, cell).index()].push(cell);
        }
    }

    Quadrant::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, targets)| !targets.is_empty())
        .map(|(quadrant, targets)| TargetCluster { quadrant, targets })
        .collect()
}

#[cfg(test)]
mod tests {
    use slide_gems_world::{query, World};

    use super::*;

    fn cluster(targets: &[(u32, u32)]) -> TargetCluster {
        TargetCluster {
            quadrant: Quadrant::SouthEast,
            targets: targets
                .iter()
                .map(|&(row, column)| CellCoord::new(row, column))
                .collect(),
        }
    }

    #[test]
    fn ties_on_the_agent_axes_go_south_and_east() {
        let agent = CellCoord::new(2, 2);
        assert_eq!(Quadrant::classify(agent, CellCoord::new(1, 1)), Quadrant::NorthWest);
        assert_eq!(Quadrant::classify(agent, CellCoord::new(1, 2)), Quadrant::NorthEast);
        assert_eq!(Quadrant::classify(agent, CellCoord::new(2, 1)), Quadrant::SouthWest);
        assert_eq!(Quadrant::classify(agent, CellCoord::new(2, 2)), Quadrant::SouthEast);
    }

    #[test]
    fn clusters_skip_empty_quadrants() {
        let world = World::from_layout(
            "
            G....
            .....
            ..A..
            ....S
            ...G.
            ",
        )
        .expect("layout parses");

        let clusters = cluster_targets(&query::board_view(&world));

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].quadrant(), Quadrant::NorthWest);
        assert_eq!(clusters[1].quadrant(), Quadrant::SouthEast);
        assert_eq!(clusters[1].targets.len(), 2);
    }

    #[test]
    fn centroid_truncates() {
        assert_eq!(cluster(&[(0, 0), (1, 3)]).centroid(), CellCoord::new(0, 1));
    }

    #[test]
    fn approach_score_rewards_alignment() {
        let target = cluster(&[(0, 4)]);
        let from = CellCoord::new(0, 0);

        // Same row: east matches both axes, west only the row sign, south neither.
        let east = target.approach_score(from, Direction::East);
        let west = target.approach_score(from, Direction::West);
        let south = target.approach_score(from, Direction::South);
        assert!((east - (25.0 + FULL_ALIGNMENT)).abs() < 1e-9);
        assert!((west - (25.0 + PARTIAL_ALIGNMENT)).abs() < 1e-9);
        assert!((south - 25.0).abs() < 1e-9);
    }

    #[test]
    fn standing_on_the_target_counts_as_one_cell_away() {
        let target = cluster(&[(3, 3)]);
        let score = target.approach_score(CellCoord::new(3, 3), Direction::West);
        assert!(score.is_finite());
        assert!((score - (PROXIMITY_WEIGHT + PARTIAL_ALIGNMENT)).abs() < 1e-9);
    }
}

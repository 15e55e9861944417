use std::fmt;

use clap::ValueEnum;

/// Rule for the distance between two clusters during agglomeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Linkage {
    /// Minimum distance between members.
    Single,
    /// Maximum distance between members.
    #[default]
    Complete,
    /// Mean distance between members (UPGMA).
    Average,
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
        };
        f.write_str(s)
    }
}

pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Symmetric distance matrix stored in condensed (upper triangle) form.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.data[self.n * i - i * (i + 1) / 2 + (j - i - 1)]
    }
}

/// Euclidean distance between every pair of rows.
pub fn pairwise_distances(rows: &[Vec<f64>]) -> DistanceMatrix {
    let n = rows.len();
    let mut data = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            data.push(euclidean(&rows[i], &rows[j]));
        }
    }
    DistanceMatrix { n, data }
}

/// A single agglomeration step.
///
/// Leaves have ids `0..n`; the k-th merge creates the cluster with id `n + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    pub size: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dendrogram {
    leaves: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    pub fn is_empty(&self) -> bool {
        self.leaves == 0
    }

    /// Id of the root cluster, `None` for an empty tree.
    pub fn root(&self) -> Option<usize> {
        match self.leaves {
            0 => None,
            n => Some(n + self.merges.len() - 1),
        }
    }

    /// Distance of the last merge, `0.0` when nothing was merged.
    pub fn height(&self) -> f64 {
        self.merges.last().map_or(0.0, |m| m.distance)
    }

    /// Leaves from left to right as they appear when the tree is drawn.
    pub fn leaf_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.leaves);
        let Some(root) = self.root() else {
            return order;
        };

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if id < self.leaves {
                order.push(id);
            } else {
                let merge = &self.merges[id - self.leaves];
                stack.push(merge.right);
                stack.push(merge.left);
            }
        }
        order
    }

    /// Drawing coordinates of every node as `(position, height)`.
    ///
    /// Leaves sit at height zero on consecutive positions following
    /// [`Dendrogram::leaf_order`]; a merged cluster sits halfway between its
    /// children at its merge distance. Indexed by node id.
    pub fn node_positions(&self) -> Vec<(f64, f64)> {
        let mut positions = vec![(0.0, 0.0); self.leaves + self.merges.len()];
        for (pos, leaf) in self.leaf_order().into_iter().enumerate() {
            positions[leaf] = (pos as f64, 0.0);
        }
        for (k, merge) in self.merges.iter().enumerate() {
            let left = positions[merge.left].0;
            let right = positions[merge.right].0;
            positions[self.leaves + k] = ((left + right) / 2.0, merge.distance);
        }
        positions
    }

    /// Flat cluster label per leaf after undoing all but the first `n - k`
    /// merges.
    ///
    /// `k` is clamped to `1..=n`. Labels are numbered by first appearance in
    /// leaf index order.
    pub fn cut(&self, k: usize) -> Vec<usize> {
        let n = self.leaves;
        if n == 0 {
            return Vec::new();
        }
        let k = k.clamp(1, n);

        // each node points to the cluster it was merged into
        let mut parent: Vec<usize> = (0..n + self.merges.len()).collect();
        for (step, merge) in self.merges.iter().take(n - k).enumerate() {
            parent[merge.left] = n + step;
            parent[merge.right] = n + step;
        }

        let find = |mut id: usize| {
            while parent[id] != id {
                id = parent[id];
            }
            id
        };

        let mut labels = Vec::with_capacity(n);
        let mut roots: Vec<usize> = Vec::new();
        for leaf in 0..n {
            let root = find(leaf);
            let label = match roots.iter().position(|&r| r == root) {
                Some(label) => label,
                None => {
                    roots.push(root);
                    roots.len() - 1
                }
            };
            labels.push(label);
        }
        labels
    }
}

/// Agglomerative hierarchical clustering of `rows` by Euclidean distance.
///
/// Repeatedly merges the closest pair of clusters and updates distances with
/// the Lance-Williams formula for `method`. Ties go to the lowest pair of
/// cluster slots.
pub fn linkage(rows: &[Vec<f64>], method: Linkage) -> Dendrogram {
    let n = rows.len();
    let condensed = pairwise_distances(rows);

    let mut dist: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| condensed.get(i, j)).collect())
        .collect();
    let mut active = vec![true; n];
    let mut ids: Vec<usize> = (0..n).collect();
    let mut sizes = vec![1usize; n];
    let mut merges = Vec::with_capacity(n.saturating_sub(1));

    for step in 0..n.saturating_sub(1) {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in (0..n).filter(|&i| active[i]) {
            for j in ((i + 1)..n).filter(|&j| active[j]) {
                if best.is_none_or(|(_, _, d)| dist[i][j] < d) {
                    best = Some((i, j, dist[i][j]));
                }
            }
        }

        let Some((i, j, distance)) = best else {
            break;
        };

        let size = sizes[i] + sizes[j];
        merges.push(Merge {
            left: ids[i].min(ids[j]),
            right: ids[i].max(ids[j]),
            distance,
            size,
        });

        for k in (0..n).filter(|&k| active[k] && k != i && k != j) {
            let (dik, djk) = (dist[i][k], dist[j][k]);
            let updated = match method {
                Linkage::Single => dik.min(djk),
                Linkage::Complete => dik.max(djk),
                Linkage::Average => {
                    (sizes[i] as f64 * dik + sizes[j] as f64 * djk) / size as f64
                }
            };
            dist[i][k] = updated;
            dist[k][i] = updated;
        }

        active[j] = false;
        sizes[i] = size;
        ids[i] = n + step;
    }

    Dendrogram { leaves: n, merges }
}

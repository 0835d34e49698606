use std::collections::{BTreeMap, BTreeSet};

/// Integer lattice point `(x, y)` in cell units.
pub type LatticePoint = (i64, i64);

/// A directed boundary edge between two lattice points.
pub type LatticeEdge = (LatticePoint, LatticePoint);

/// Traces closed boundary loops from a set of directed unit edges.
///
/// Every loop is walked with the enclosed area on its left. Starting edges are
/// chosen top-most then left-most, and at vertices with several exits (cells
/// touching only at a corner) the sharpest left turn wins, which keeps
/// diagonally touching cells in separate loops.
///
/// Returned loops contain only corner vertices; collinear runs are merged.
pub fn trace_loops(edges: &BTreeSet<LatticeEdge>) -> Vec<Vec<LatticePoint>> {
    let mut adjacency: BTreeMap<LatticePoint, Vec<LatticePoint>> = BTreeMap::new();
    for &(start, end) in edges {
        adjacency.entry(start).or_default().push(end);
    }

    let mut used: BTreeSet<LatticeEdge> = BTreeSet::new();
    let mut loops = Vec::new();

    while let Some(start_edge) = find_start_edge(edges, &used) {
        let boundary = trace_one_loop(start_edge, &adjacency, &mut used);
        let corners = merge_collinear(&boundary);
        if corners.len() >= 4 {
            loops.push(corners);
        }
    }

    loops
}

/// Finds the next unused edge whose start has the lowest y (then x).
fn find_start_edge(
    edges: &BTreeSet<LatticeEdge>,
    used: &BTreeSet<LatticeEdge>,
) -> Option<LatticeEdge> {
    edges
        .iter()
        .filter(|e| !used.contains(*e))
        .min_by_key(|((x, y), end)| (*y, *x, end.1, end.0))
        .copied()
}

/// Walks a single loop, marking its edges as used.
fn trace_one_loop(
    start_edge: LatticeEdge,
    adjacency: &BTreeMap<LatticePoint, Vec<LatticePoint>>,
    used: &mut BTreeSet<LatticeEdge>,
) -> Vec<LatticePoint> {
    let mut boundary = Vec::new();
    let mut current = start_edge;

    loop {
        if !used.insert(current) {
            break;
        }
        boundary.push(current.0);

        let Some(next) = pick_next_edge(current, start_edge, adjacency, used) else {
            break;
        };
        if next == start_edge {
            break;
        }
        current = next;
    }

    boundary
}

/// Picks the outgoing edge at the end of `incoming` with the sharpest left turn.
/// The loop's own start edge stays eligible so the walk can close.
fn pick_next_edge(
    incoming: LatticeEdge,
    start_edge: LatticeEdge,
    adjacency: &BTreeMap<LatticePoint, Vec<LatticePoint>>,
    used: &BTreeSet<LatticeEdge>,
) -> Option<LatticeEdge> {
    let (from, node) = incoming;
    let dir_in = (node.0 - from.0, node.1 - from.1);

    adjacency
        .get(&node)?
        .iter()
        .map(|&target| (node, target))
        .filter(|e| *e == start_edge || !used.contains(e))
        .max_by_key(|&(_, target)| {
            let dir_out = (target.0 - node.0, target.1 - node.1);
            turn_rank(dir_in, dir_out)
        })
}

/// Ranks a turn: left = 2, straight = 1, right = 0, reversal = -1.
fn turn_rank(dir_in: (i64, i64), dir_out: (i64, i64)) -> i32 {
    let cross = dir_in.0 * dir_out.1 - dir_in.1 * dir_out.0;
    let dot = dir_in.0 * dir_out.0 + dir_in.1 * dir_out.1;
    match (cross.signum(), dot.signum()) {
        (1, _) => 2,
        (0, 1) => 1,
        (-1, _) => 0,
        _ => -1,
    }
}

/// Drops vertices that lie on a straight run between their neighbours.
fn merge_collinear(points: &[LatticePoint]) -> Vec<LatticePoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            let a = (cur.0 - prev.0, cur.1 - prev.1);
            let b = (next.0 - cur.0, next.1 - cur.1);
            a.0 * b.1 - a.1 * b.0 != 0
        })
        .map(|i| points[i])
        .collect()
}

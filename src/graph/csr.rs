use crate::error::CsrViolation;
use crate::graph::stats::validate_parts;

/// Immutable CSR graph.
///
/// Row `u` spans `column_indices[row_offsets[u]..row_offsets[u + 1]]`.
/// `edge_values` runs parallel to `column_indices` and starts at 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    offsets: Vec<usize>,    // len=n+1
    dst: Vec<usize>,        // len=m
    values: Vec<f64>,       // len=m
    node_names: Vec<String>, // len=n
}

impl Graph {
    /// Assemble a graph from raw arrays, checking every CSR invariant.
    /// Node names are regenerated as decimal indices.
    pub fn from_parts(
        offsets: Vec<usize>,
        dst: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<Self, CsrViolation> {
        validate_parts(&offsets, &dst, &values)?;
        let n = offsets.len() - 1;
        Ok(Self {
            offsets,
            dst,
            values,
            node_names: node_names(n),
        })
    }

    /// Caller has already established the invariants.
    pub(crate) fn from_validated(
        offsets: Vec<usize>,
        dst: Vec<usize>,
        values: Vec<f64>,
        node_names: Vec<String>,
    ) -> Self {
        debug_assert!(validate_parts(&offsets, &dst, &values).is_ok());
        debug_assert_eq!(node_names.len() + 1, offsets.len());
        Self {
            offsets,
            dst,
            values,
            node_names,
        }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn edge_count(&self) -> usize {
        self.dst.len()
    }

    pub fn row_offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn column_indices(&self) -> &[usize] {
        &self.dst
    }

    pub fn edge_values(&self) -> &[f64] {
        &self.values
    }

    pub fn node_names(&self) -> &[String] {
        &self.node_names
    }

    /// Destinations of `u`'s outgoing edges. Panics if `u >= node_count()`.
    pub fn neighbors(&self, u: usize) -> &[usize] {
        let start = self.offsets[u];
        let end = self.offsets[u + 1];
        &self.dst[start..end]
    }

    pub fn out_degree(&self, u: usize) -> usize {
        self.offsets[u + 1] - self.offsets[u]
    }

    /// All `(source, destination)` pairs in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count()).flat_map(move |u| self.neighbors(u).iter().map(move |&v| (u, v)))
    }

    /// `(row_offsets, column_indices, edge_values, node_names)`
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Vec<f64>, Vec<String>) {
        (self.offsets, self.dst, self.values, self.node_names)
    }
}

/// Identity naming: node `i` is called `"i"`.
pub(crate) fn node_names(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        // 0 -> 1, 0 -> 2, 2 -> 0, row 1 empty
        Graph::from_parts(vec![0, 2, 2, 3], vec![1, 2, 0], vec![0.0; 3]).unwrap()
    }

    #[test]
    fn accessors() {
        let g = sample();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert!(g.neighbors(1).is_empty());
        assert_eq!(g.out_degree(2), 1);
        assert_eq!(g.node_names(), &["0", "1", "2"]);
    }

    #[test]
    fn edges_are_row_major() {
        let g = sample();
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (2, 0)]);
    }

    #[test]
    fn from_parts_rejects_bad_column() {
        let err = Graph::from_parts(vec![0, 1], vec![1], vec![0.0]).unwrap_err();
        assert_eq!(
            err,
            CsrViolation::ColumnOutOfRange {
                edge: 0,
                column: 1,
                node_count: 1
            }
        );
    }

    #[test]
    fn empty_graph() {
        let g = Graph::from_parts(vec![0], vec![], vec![]).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edges().count(), 0);
        let (offsets, dst, values, names) = g.into_parts();
        assert_eq!(offsets, vec![0]);
        assert!(dst.is_empty() && values.is_empty() && names.is_empty());
    }
}

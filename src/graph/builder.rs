use std::collections::TryReserveError;

use tracing::debug;

use super::csr::Graph;
use crate::error::LoadError;

/// Why an edge could not be appended. The edge-stream parser attaches the
/// offending line before surfacing it as a `LoadError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushError {
    NonMonotonic { current_row: usize },
    RowOverflow { row: usize },
    EdgeOverflow { declared: usize },
}

/// Owns the CSR arrays while a graph is being filled. Rows are opened in
/// non-decreasing order; `finish` closes any trailing rows and hands back
/// an immutable `Graph`.
#[derive(Debug)]
pub struct CsrBuilder {
    node_count: usize,
    edge_count: usize,
    offsets: Vec<usize>,
    dst: Vec<usize>,
    values: Vec<f64>,
    node_names: Vec<String>,
    current_row: usize,
    current_edge: usize,
}

fn zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>, TryReserveError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, T::default());
    Ok(v)
}

impl CsrBuilder {
    /// Size the CSR storage for the declared counts. Nothing is allocated
    /// unless both counts are usable.
    pub fn allocate(nodes: i64, edges: i64) -> Result<Self, LoadError> {
        let fail = |reason| LoadError::Allocation {
            nodes,
            edges,
            reason,
        };

        if nodes < 0 || edges < 0 {
            return Err(fail("negative count"));
        }
        let node_count = usize::try_from(nodes).map_err(|_| fail("node count exceeds usize"))?;
        let edge_count = usize::try_from(edges).map_err(|_| fail("edge count exceeds usize"))?;
        let offsets_len = node_count
            .checked_add(1)
            .ok_or_else(|| fail("row offset length overflows"))?;

        debug!(node_count, edge_count, "allocating CSR storage");

        let offsets = zeroed::<usize>(offsets_len).map_err(|_| fail("row offsets"))?;
        let dst = zeroed::<usize>(edge_count).map_err(|_| fail("column indices"))?;
        let values = zeroed::<f64>(edge_count).map_err(|_| fail("edge values"))?;

        // the table is reserved fallibly, the name strings are not
        let mut node_names = Vec::new();
        node_names
            .try_reserve_exact(node_count)
            .map_err(|_| fail("node names"))?;
        node_names.extend((0..node_count).map(|i| i.to_string()));

        Ok(Self {
            node_count,
            edge_count,
            offsets,
            dst,
            values,
            node_names,
            current_row: 0,
            current_edge: 0,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn edges_filled(&self) -> usize {
        self.current_edge
    }

    /// Append `source -> destination`. Both ids must already be below
    /// `node_count`. Every row skipped on the way to `source` gets an empty
    /// range.
    pub fn push_edge(&mut self, source: usize, destination: usize) -> Result<(), PushError> {
        debug_assert!(destination < self.node_count);

        while source != self.current_row {
            if source < self.current_row {
                return Err(PushError::NonMonotonic {
                    current_row: self.current_row,
                });
            }
            self.current_row += 1;
            if self.current_row > self.node_count {
                return Err(PushError::RowOverflow {
                    row: self.current_row,
                });
            }
            self.offsets[self.current_row] = self.current_edge;
        }

        if self.current_edge == self.edge_count {
            return Err(PushError::EdgeOverflow {
                declared: self.edge_count,
            });
        }
        self.dst[self.current_edge] = destination;
        self.current_edge += 1;
        Ok(())
    }

    /// Close trailing rows and yield the graph. The declared edge count is
    /// a contract: any shortfall is an error.
    pub fn finish(mut self) -> Result<Graph, LoadError> {
        if self.current_edge != self.edge_count {
            return Err(LoadError::EdgeCountMismatch {
                expected: self.edge_count,
                actual: self.current_edge,
            });
        }
        for row in self.current_row + 1..=self.node_count {
            self.offsets[row] = self.current_edge;
        }
        Ok(Graph::from_validated(
            self.offsets,
            self.dst,
            self.values,
            self.node_names,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_sizes_arrays() {
        let b = CsrBuilder::allocate(4, 2).unwrap();
        assert_eq!(b.node_count(), 4);
        assert_eq!(b.edge_count(), 2);
        assert_eq!(b.offsets.len(), 5);
        assert_eq!(b.dst.len(), 2);
        assert_eq!(b.values, vec![0.0, 0.0]);
        assert_eq!(b.node_names, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn allocate_rejects_negative_counts() {
        for (n, m) in [(-1, 0), (0, -1)] {
            match CsrBuilder::allocate(n, m) {
                Err(LoadError::Allocation { reason, .. }) => assert_eq!(reason, "negative count"),
                other => panic!("expected Allocation, got {other:?}"),
            }
        }
    }

    #[test]
    fn allocate_rejects_impossible_size() {
        assert!(matches!(
            CsrBuilder::allocate(i64::MAX, 0),
            Err(LoadError::Allocation { .. })
        ));
    }

    #[test]
    fn skipped_rows_get_empty_ranges() {
        let mut b = CsrBuilder::allocate(5, 3).unwrap();
        b.push_edge(0, 1).unwrap();
        b.push_edge(3, 4).unwrap();
        b.push_edge(3, 0).unwrap();
        assert_eq!(b.current_row(), 3);
        let g = b.finish().unwrap();
        assert_eq!(g.row_offsets(), &[0, 1, 1, 1, 3, 3]);
        assert_eq!(g.column_indices(), &[1, 4, 0]);
    }

    #[test]
    fn trailing_rows_are_closed() {
        let mut b = CsrBuilder::allocate(4, 1).unwrap();
        b.push_edge(0, 3).unwrap();
        let g = b.finish().unwrap();
        assert_eq!(g.row_offsets(), &[0, 1, 1, 1, 1]);
    }

    #[test]
    fn decreasing_source_is_rejected() {
        let mut b = CsrBuilder::allocate(3, 2).unwrap();
        b.push_edge(2, 0).unwrap();
        assert_eq!(
            b.push_edge(1, 0),
            Err(PushError::NonMonotonic { current_row: 2 })
        );
    }

    #[test]
    fn row_past_node_count_is_rejected() {
        let mut b = CsrBuilder::allocate(3, 1).unwrap();
        assert_eq!(b.push_edge(5, 0), Err(PushError::RowOverflow { row: 4 }));
        assert_eq!(b.edges_filled(), 0);
    }

    #[test]
    fn extra_edge_is_rejected() {
        let mut b = CsrBuilder::allocate(2, 1).unwrap();
        b.push_edge(0, 1).unwrap();
        assert_eq!(
            b.push_edge(1, 0),
            Err(PushError::EdgeOverflow { declared: 1 })
        );
        assert_eq!(b.edges_filled(), 1);
    }

    #[test]
    fn short_stream_is_rejected() {
        let mut b = CsrBuilder::allocate(2, 2).unwrap();
        b.push_edge(0, 1).unwrap();
        match b.finish() {
            Err(LoadError::EdgeCountMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (2, 1));
            }
            other => panic!("expected EdgeCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_declaration_finishes() {
        let g = CsrBuilder::allocate(0, 0).unwrap().finish().unwrap();
        assert_eq!(g.row_offsets(), &[0]);
        assert_eq!(g.edge_count(), 0);
    }
}

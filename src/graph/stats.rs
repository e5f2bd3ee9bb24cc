use super::csr::Graph;
use crate::error::CsrViolation;

pub fn validate_csr(g: &Graph) -> Result<(), CsrViolation> {
    validate_parts(g.row_offsets(), g.column_indices(), g.edge_values())
}

pub(crate) fn validate_parts(
    offsets: &[usize],
    dst: &[usize],
    values: &[f64],
) -> Result<(), CsrViolation> {
    if offsets.is_empty() {
        return Err(CsrViolation::EmptyOffsets);
    }
    if offsets[0] != 0 {
        return Err(CsrViolation::NonZeroStart(offsets[0]));
    }
    let n = offsets.len() - 1;
    let m = dst.len();
    for i in 0..n {
        if offsets[i] > offsets[i + 1] {
            return Err(CsrViolation::Decreasing { row: i });
        }
    }
    let last = offsets[n];
    if last != m {
        return Err(CsrViolation::EndMismatch { last, edges: m });
    }
    if values.len() != m {
        return Err(CsrViolation::ValueLength {
            values: values.len(),
            edges: m,
        });
    }
    if let Some((edge, &column)) = dst.iter().enumerate().find(|&(_, &v)| v >= n) {
        return Err(CsrViolation::ColumnOutOfRange {
            edge,
            column,
            node_count: n,
        });
    }
    Ok(())
}

/// Out-degree summary of a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeSummary {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

pub fn degree_summary(g: &Graph) -> DegreeSummary {
    let n = g.node_count();
    if n == 0 {
        return DegreeSummary {
            min: 0,
            max: 0,
            mean: 0.0,
        };
    }
    let mut min = usize::MAX;
    let mut max = 0usize;

    for u in 0..n {
        let d = g.out_degree(u);
        min = min.min(d);
        max = max.max(d);
    }

    DegreeSummary {
        min,
        max,
        mean: g.edge_count() as f64 / n as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonzero_start() {
        assert_eq!(
            validate_parts(&[1, 1], &[0], &[0.0]),
            Err(CsrViolation::NonZeroStart(1))
        );
    }

    #[test]
    fn rejects_decreasing_offsets() {
        assert_eq!(
            validate_parts(&[0, 2, 1, 2], &[0, 1], &[0.0, 0.0]),
            Err(CsrViolation::Decreasing { row: 1 })
        );
    }

    #[test]
    fn rejects_end_mismatch() {
        assert_eq!(
            validate_parts(&[0, 1, 1], &[0, 1], &[0.0, 0.0]),
            Err(CsrViolation::EndMismatch { last: 1, edges: 2 })
        );
    }

    #[test]
    fn rejects_value_length() {
        assert_eq!(
            validate_parts(&[0, 1], &[0], &[]),
            Err(CsrViolation::ValueLength { values: 0, edges: 1 })
        );
    }

    #[test]
    fn rejects_empty_offsets() {
        assert_eq!(validate_parts(&[], &[], &[]), Err(CsrViolation::EmptyOffsets));
    }

    #[test]
    fn degree_summary_counts_empty_rows() {
        let g = Graph::from_parts(vec![0, 3, 3, 4], vec![0, 1, 2, 0], vec![0.0; 4]).unwrap();
        let s = degree_summary(&g);
        assert_eq!(s.min, 0);
        assert_eq!(s.max, 3);
        assert!((s.mean - 4.0 / 3.0).abs() < 1e-12);
        assert!(validate_csr(&g).is_ok());
    }

    #[test]
    fn degree_summary_of_empty_graph() {
        let g = Graph::from_parts(vec![0], vec![], vec![]).unwrap();
        assert_eq!(
            degree_summary(&g),
            DegreeSummary {
                min: 0,
                max: 0,
                mean: 0.0
            }
        );
    }
}

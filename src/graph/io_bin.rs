use std::{
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use super::csr::Graph;
use crate::error::BinIoError;

pub fn offsets_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}_csrOffset_u64.bin"))
}

pub fn dest_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}_csrDest_u64.bin"))
}

pub fn values_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}_csrValue_f64.bin"))
}

fn read_all(path: &Path) -> Result<Vec<u8>, BinIoError> {
    let io_err = |op, source| BinIoError::Io {
        op,
        path: path.to_path_buf(),
        source,
    };
    let mut f = File::open(path).map_err(|e| io_err("open", e))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).map_err(|e| io_err("read", e))?;
    if buf.len() % 8 != 0 {
        return Err(BinIoError::Length {
            path: path.to_path_buf(),
            len: buf.len(),
            width: 8,
        });
    }
    Ok(buf)
}

fn write_all(path: &Path, buf: &[u8]) -> Result<(), BinIoError> {
    let io_err = |op, source| BinIoError::Io {
        op,
        path: path.to_path_buf(),
        source,
    };
    let mut f = File::create(path).map_err(|e| io_err("create", e))?;
    f.write_all(buf).map_err(|e| io_err("write", e))?;
    Ok(())
}

pub fn read_u64_bin(path: &Path) -> Result<Vec<u64>, BinIoError> {
    let buf = read_all(path)?;
    Ok(buf
        .chunks_exact(8)
        .map(|c| u64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect())
}

pub fn read_f64_bin(path: &Path) -> Result<Vec<f64>, BinIoError> {
    let buf = read_all(path)?;
    Ok(buf
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect())
}

/// Little-endian, independent of host byte order.
pub fn write_u64_bin(path: &Path, data: &[u64]) -> Result<(), BinIoError> {
    let mut buf = Vec::with_capacity(data.len() * 8);
    for &x in data {
        buf.extend_from_slice(&x.to_le_bytes());
    }
    write_all(path, &buf)
}

pub fn write_f64_bin(path: &Path, data: &[f64]) -> Result<(), BinIoError> {
    let mut buf = Vec::with_capacity(data.len() * 8);
    for &x in data {
        buf.extend_from_slice(&x.to_le_bytes());
    }
    write_all(path, &buf)
}

fn to_usize(path: &Path, xs: Vec<u64>) -> Result<Vec<usize>, BinIoError> {
    xs.into_iter()
        .map(|value| {
            usize::try_from(value).map_err(|_| BinIoError::Overflow {
                path: path.to_path_buf(),
                value,
            })
        })
        .collect()
}

/// Dump the offset, destination and value arrays of `g` under `dir`.
pub fn write_csr_to_dir(dir: impl AsRef<Path>, name: &str, g: &Graph) -> Result<(), BinIoError> {
    let dir = dir.as_ref();

    let offsets: Vec<u64> = g.row_offsets().iter().map(|&x| x as u64).collect();
    let dst: Vec<u64> = g.column_indices().iter().map(|&x| x as u64).collect();

    let off_path = offsets_path(dir, name);
    let dst_path = dest_path(dir, name);
    let val_path = values_path(dir, name);

    debug!(path = ?off_path, "writing row offsets");
    write_u64_bin(&off_path, &offsets)?;
    debug!(path = ?dst_path, "writing column indices");
    write_u64_bin(&dst_path, &dst)?;
    debug!(path = ?val_path, "writing edge values");
    write_f64_bin(&val_path, g.edge_values())?;
    Ok(())
}

/// Reload a graph written by `write_csr_to_dir`. A missing value file means
/// every edge value is 0.0.
pub fn load_csr_from_dir(dir: impl AsRef<Path>, name: &str) -> Result<Graph, BinIoError> {
    let dir = dir.as_ref();

    let off_path = offsets_path(dir, name);
    let dst_path = dest_path(dir, name);
    let val_path = values_path(dir, name);

    let offsets = to_usize(&off_path, read_u64_bin(&off_path)?)?;
    let dst = to_usize(&dst_path, read_u64_bin(&dst_path)?)?;

    let values = if val_path.exists() {
        read_f64_bin(&val_path)?
    } else {
        vec![0.0; dst.len()]
    };

    Graph::from_parts(offsets, dst, values).map_err(|source| BinIoError::Invalid {
        dir: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsrViolation;
    use tempfile::tempdir;

    #[test]
    fn dump_and_reload() {
        let dir = tempdir().unwrap();
        let g = Graph::from_parts(vec![0, 1, 1, 3], vec![2, 0, 1], vec![0.0, 0.5, 1.5]).unwrap();
        write_csr_to_dir(dir.path(), "g", &g).unwrap();
        let back = load_csr_from_dir(dir.path(), "g").unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn missing_values_default_to_zero() {
        let dir = tempdir().unwrap();
        write_u64_bin(&offsets_path(dir.path(), "g"), &[0, 2, 2]).unwrap();
        write_u64_bin(&dest_path(dir.path(), "g"), &[1, 0]).unwrap();
        let g = load_csr_from_dir(dir.path(), "g").unwrap();
        assert_eq!(g.edge_values(), &[0.0, 0.0]);
        assert_eq!(g.neighbors(0), &[1, 0]);
    }

    #[test]
    fn truncated_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = offsets_path(dir.path(), "g");
        std::fs::write(&path, [0u8; 5]).unwrap();
        assert!(matches!(
            read_u64_bin(&path),
            Err(BinIoError::Length { len: 5, width: 8, .. })
        ));
    }

    #[test]
    fn invalid_csr_is_rejected() {
        let dir = tempdir().unwrap();
        write_u64_bin(&offsets_path(dir.path(), "g"), &[0, 1]).unwrap();
        write_u64_bin(&dest_path(dir.path(), "g"), &[7]).unwrap();
        match load_csr_from_dir(dir.path(), "g") {
            Err(BinIoError::Invalid { source, .. }) => assert!(matches!(
                source,
                CsrViolation::ColumnOutOfRange { column: 7, .. }
            )),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}

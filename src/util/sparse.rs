//! Compressed sparse row storage for event x centroid matrices.
use serde::{Deserialize, Serialize};

/// A CSR matrix of `f64`.
///
/// Row `r` owns the entries `row_ptr[r]..row_ptr[r + 1]` of `col_idx`/`values`.
/// Zeros are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    n_rows: usize,
    n_cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl Default for SparseMatrix {
    fn default() -> Self {
        Self::zeros(0, 0)
    }
}

impl SparseMatrix {
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Builds a matrix from dense rows. The column count is the length of the
    /// longest row; shorter rows are padded with zeros.
    pub fn from_dense<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let n_cols = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut matrix = Self::zeros(0, n_cols);
        for row in rows {
            for (col, &val) in row.as_ref().iter().enumerate() {
                if val != 0.0 {
                    matrix.col_idx.push(col);
                    matrix.values.push(val);
                }
            }
            matrix.row_ptr.push(matrix.values.len());
            matrix.n_rows += 1;
        }
        matrix
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.row(row)
            .find(|&(c, _)| c == col)
            .map_or(0.0, |(_, v)| v)
    }

    /// Iterates the stored `(column, value)` pairs of a row. Rows past the end
    /// are empty.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let (start, end) = if row < self.n_rows {
            (self.row_ptr[row], self.row_ptr[row + 1])
        } else {
            (0, 0)
        };
        self.col_idx[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }
}

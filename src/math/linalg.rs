// linalg.rs -- Small dense linear algebra for the estimators.
//
// Everything here is sized for transform estimation: systems of at most
// a dozen unknowns. Least squares accumulates the normal matrix
// M = A^T A and right-hand side A^T b row by row rather than storing A,
// then solves M x = A^T b with partial-pivot Gaussian elimination.
//
// `symmetric_eigen` is a cyclic Jacobi sweep. It is used for the 4x4
// Horn matrix of the 3-D Helmert estimator and for the 9x9 normal matrix
// of the homography, where the eigenvector of the smallest eigenvalue is
// the null-space solution.

use std::ops::{Index, IndexMut};

/// Row-major dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix { rows, cols, data: vec![0.0; rows * cols] }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from rows. All rows must have the same length.
    pub fn from_rows(rows: &[&[f64]]) -> Option<Self> {
        let r = rows.len();
        let c = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| row.len() != c) {
            return None;
        }
        let data = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Some(Matrix { rows: r, cols: c, data })
    }

    pub fn from_array3(m: &[[f64; 3]; 3]) -> Self {
        let mut out = Self::zeros(3, 3);
        for r in 0..3 {
            for c in 0..3 {
                out[(r, c)] = m[r][c];
            }
        }
        out
    }

    pub fn to_array3(&self) -> Option<[[f64; 3]; 3]> {
        if self.rows != 3 || self.cols != 3 {
            return None;
        }
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = self[(r, c)];
            }
        }
        Some(out)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t[(c, r)] = self[(r, c)];
            }
        }
        t
    }

    pub fn mul_vec(&self, v: &[f64]) -> Option<Vec<f64>> {
        if v.len() != self.cols {
            return None;
        }
        Some(
            (0..self.rows)
                .map(|r| {
                    let row = &self.data[r * self.cols..(r + 1) * self.cols];
                    row.iter().zip(v).map(|(a, b)| a * b).sum()
                })
                .collect(),
        )
    }

    pub fn matmul(&self, other: &Matrix) -> Option<Matrix> {
        if self.cols != other.rows {
            return None;
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(r, k)];
                if a == 0.0 {
                    continue;
                }
                for c in 0..other.cols {
                    out[(r, c)] += a * other[(k, c)];
                }
            }
        }
        Some(out)
    }

    /// Determinant by elimination. None for non-square input.
    pub fn determinant(&self) -> Option<f64> {
        if !self.is_square() {
            return None;
        }
        let n = self.rows;
        let mut a = self.clone();
        let mut det = 1.0;
        for col in 0..n {
            let pivot = pivot_row(&a, col, col);
            if a[(pivot, col)] == 0.0 {
                return Some(0.0);
            }
            if pivot != col {
                a.swap_rows(pivot, col);
                det = -det;
            }
            let p = a[(col, col)];
            det *= p;
            for r in col + 1..n {
                let f = a[(r, col)] / p;
                for c in col..n {
                    let v = a[(col, c)];
                    a[(r, c)] -= f * v;
                }
            }
        }
        Some(det)
    }

    /// Gauss-Jordan inverse. None when singular or not square.
    pub fn inverse(&self) -> Option<Matrix> {
        if !self.is_square() {
            return None;
        }
        let n = self.rows;
        let mut a = self.clone();
        let mut inv = Matrix::identity(n);
        for col in 0..n {
            let pivot = pivot_row(&a, col, col);
            if a[(pivot, col)].abs() < SINGULAR_EPS {
                return None;
            }
            a.swap_rows(pivot, col);
            inv.swap_rows(pivot, col);
            let p = a[(col, col)];
            for c in 0..n {
                a[(col, c)] /= p;
                inv[(col, c)] /= p;
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let f = a[(r, col)];
                if f == 0.0 {
                    continue;
                }
                for c in 0..n {
                    let av = a[(col, c)];
                    let iv = inv[(col, c)];
                    a[(r, c)] -= f * av;
                    inv[(r, c)] -= f * iv;
                }
            }
        }
        Some(inv)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;
    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[r * self.cols + c]
    }
}

const SINGULAR_EPS: f64 = 1e-12;

fn pivot_row(a: &Matrix, col: usize, from: usize) -> usize {
    let mut best = from;
    for r in from + 1..a.rows {
        if a[(r, col)].abs() > a[(best, col)].abs() {
            best = r;
        }
    }
    best
}

// ============================================================
// Linear systems
// ============================================================

/// Solve the square system `a x = b` with partial pivoting.
pub fn solve(a: &Matrix, b: &[f64]) -> Option<Vec<f64>> {
    let n = a.rows;
    if !a.is_square() || b.len() != n {
        return None;
    }
    let mut m = a.clone();
    let mut rhs = b.to_vec();

    // Scale-aware singularity test.
    let scale = m.data.iter().fold(0.0f64, |acc, v| acc.max(v.abs())).max(1.0);

    for col in 0..n {
        let pivot = pivot_row(&m, col, col);
        if m[(pivot, col)].abs() < SINGULAR_EPS * scale {
            return None;
        }
        m.swap_rows(pivot, col);
        rhs.swap(pivot, col);
        let p = m[(col, col)];
        for r in col + 1..n {
            let f = m[(r, col)] / p;
            if f == 0.0 {
                continue;
            }
            for c in col..n {
                let v = m[(col, c)];
                m[(r, c)] -= f * v;
            }
            rhs[r] -= f * rhs[col];
        }
    }

    let mut x = vec![0.0; n];
    for r in (0..n).rev() {
        let mut s = rhs[r];
        for c in r + 1..n {
            s -= m[(r, c)] * x[c];
        }
        x[r] = s / m[(r, r)];
    }
    Some(x)
}

/// Accumulates A^T A and A^T b one observation row at a time.
#[derive(Debug, Clone)]
pub struct NormalEquations {
    ata: Matrix,
    atb: Vec<f64>,
    rows: usize,
}

impl NormalEquations {
    pub fn new(unknowns: usize) -> Self {
        NormalEquations {
            ata: Matrix::zeros(unknowns, unknowns),
            atb: vec![0.0; unknowns],
            rows: 0,
        }
    }

    pub fn unknowns(&self) -> usize {
        self.atb.len()
    }

    /// Number of observation rows added so far.
    pub fn observations(&self) -> usize {
        self.rows
    }

    /// Add one observation `row . x = rhs`. Extra or missing coefficients
    /// beyond `unknowns` are ignored/treated as zero.
    pub fn add_row(&mut self, row: &[f64], rhs: f64) {
        let n = self.unknowns().min(row.len());
        for i in 0..n {
            if row[i] == 0.0 {
                continue;
            }
            for j in 0..n {
                self.ata[(i, j)] += row[i] * row[j];
            }
            self.atb[i] += row[i] * rhs;
        }
        self.rows += 1;
    }

    /// The accumulated normal matrix.
    pub fn normal_matrix(&self) -> &Matrix {
        &self.ata
    }

    pub fn solve(&self) -> Option<Vec<f64>> {
        if self.rows < self.unknowns() {
            return None;
        }
        solve(&self.ata, &self.atb)
    }
}

/// Least-squares solution of an overdetermined `a x = b`.
pub fn least_squares(a: &Matrix, b: &[f64]) -> Option<Vec<f64>> {
    if b.len() != a.rows {
        return None;
    }
    let mut ne = NormalEquations::new(a.cols);
    for (r, &rhs) in b.iter().enumerate() {
        ne.add_row(&a.data[r * a.cols..(r + 1) * a.cols], rhs);
    }
    ne.solve()
}

// ============================================================
// Symmetric eigen decomposition (cyclic Jacobi)
// ============================================================

/// Eigen decomposition of a symmetric matrix.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    /// Eigenvalues in descending order.
    pub values: Vec<f64>,
    /// Eigenvectors as columns, matching `values`.
    pub vectors: Matrix,
}

impl SymmetricEigen {
    pub fn vector(&self, i: usize) -> Vec<f64> {
        (0..self.vectors.rows).map(|r| self.vectors[(r, i)]).collect()
    }
}

const JACOBI_MAX_SWEEPS: usize = 100;

pub fn symmetric_eigen(m: &Matrix) -> Option<SymmetricEigen> {
    if !m.is_square() {
        return None;
    }
    let n = m.rows;
    let mut a = m.clone();
    let mut v = Matrix::identity(n);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in p + 1..n {
                off += a[(p, q)] * a[(p, q)];
            }
        }
        if off < 1e-30 {
            break;
        }

        for p in 0..n {
            for q in p + 1..n {
                let apq = a[(p, q)];
                if apq.abs() < 1e-300 {
                    continue;
                }
                let theta = (a[(q, q)] - a[(p, p)]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                // A <- J^T A J
                for k in 0..n {
                    let akp = a[(k, p)];
                    let akq = a[(k, q)];
                    a[(k, p)] = c * akp - s * akq;
                    a[(k, q)] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[(p, k)];
                    let aqk = a[(q, k)];
                    a[(p, k)] = c * apk - s * aqk;
                    a[(q, k)] = s * apk + c * aqk;
                }
                // V <- V J
                for k in 0..n {
                    let vkp = v[(k, p)];
                    let vkq = v[(k, q)];
                    v[(k, p)] = c * vkp - s * vkq;
                    v[(k, q)] = s * vkp + c * vkq;
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[(j, j)].total_cmp(&a[(i, i)]));

    let values = order.iter().map(|&i| a[(i, i)]).collect();
    let mut vectors = Matrix::zeros(n, n);
    for (dst, &src) in order.iter().enumerate() {
        for r in 0..n {
            vectors[(r, dst)] = v[(r, src)];
        }
    }
    Some(SymmetricEigen { values, vectors })
}

// ============================================================
// 3x3 helpers
// ============================================================

pub fn mat3_vec3(m: &[[f64; 3]; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

pub fn mat3_mul(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, v) in row.iter_mut().enumerate() {
            *v = a[r][0] * b[0][c] + a[r][1] * b[1][c] + a[r][2] * b[2][c];
        }
    }
    out
}

pub fn mat3_transpose(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, v) in row.iter_mut().enumerate() {
            *v = m[c][r];
        }
    }
    out
}

pub fn mat3_det(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_3x3() {
        let a = Matrix::from_rows(&[&[2.0, 1.0, -1.0], &[-3.0, -1.0, 2.0], &[-2.0, 1.0, 2.0]])
            .unwrap();
        let x = solve(&a, &[8.0, -11.0, -3.0]).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert!((x[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_singular() {
        let a = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]).unwrap();
        assert!(solve(&a, &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_least_squares_line() {
        // y = 2x + 1 sampled exactly.
        let rows: Vec<[f64; 2]> = (0..10).map(|i| [i as f64, 1.0]).collect();
        let row_refs: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let a = Matrix::from_rows(&row_refs).unwrap();
        let b: Vec<f64> = (0..10).map(|i| 2.0 * i as f64 + 1.0).collect();
        let x = least_squares(&a, &b).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-10);
        assert!((x[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_normal_equations_underdetermined() {
        let mut ne = NormalEquations::new(3);
        ne.add_row(&[1.0, 0.0, 0.0], 1.0);
        assert!(ne.solve().is_none());
    }

    #[test]
    fn test_inverse_and_determinant() {
        let a = Matrix::from_rows(&[&[4.0, 7.0], &[2.0, 6.0]]).unwrap();
        assert!((a.determinant().unwrap() - 10.0).abs() < 1e-12);
        let inv = a.inverse().unwrap();
        let id = a.matmul(&inv).unwrap();
        for r in 0..2 {
            for c in 0..2 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert!((id[(r, c)] - expected).abs() < 1e-12);
            }
        }
        let singular = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]).unwrap();
        assert!(singular.inverse().is_none());
        assert_eq!(singular.determinant(), Some(0.0));
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(Matrix::from_rows(&[&[1.0, 2.0], &[3.0]]).is_none());
    }

    #[test]
    fn test_symmetric_eigen() {
        let m = Matrix::from_rows(&[&[2.0, 1.0, 0.0], &[1.0, 2.0, 0.0], &[0.0, 0.0, 5.0]]).unwrap();
        let eig = symmetric_eigen(&m).unwrap();
        assert!((eig.values[0] - 5.0).abs() < 1e-10);
        assert!((eig.values[1] - 3.0).abs() < 1e-10);
        assert!((eig.values[2] - 1.0).abs() < 1e-10);

        // M v = lambda v for every pair.
        for i in 0..3 {
            let v = eig.vector(i);
            let mv = m.mul_vec(&v).unwrap();
            for k in 0..3 {
                assert!((mv[k] - eig.values[i] * v[k]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_mat3_helpers() {
        let r = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert!((mat3_det(&r) - 1.0).abs() < 1e-12);
        let id = mat3_mul(&r, &mat3_transpose(&r));
        for i in 0..3 {
            assert!((id[i][i] - 1.0).abs() < 1e-12);
        }
        let v = mat3_vec3(&r, &[1.0, 0.0, 0.0]);
        assert_eq!(v, [0.0, 1.0, 0.0]);
    }
}

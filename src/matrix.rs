use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::feq;
use crate::tuple::Tuple;
use crate::error::{ Result, TraceError };

/// A square matrix of any size.
///
/// 4x4 matrices are used almost universally in the ray tracer logic; they
/// encode transformations in 3D space, transforming both vectors and points
/// (`w` components of `0.0` and `1.0`, respectively). Smaller matrices show
/// up while computing determinants, since every submatrix is one row and one
/// column smaller than its parent. A single type covers all of these sizes.
///
/// Elements are stored row-major. Operations never mutate their operands;
/// each returns a new matrix.
///
/// # Examples
///
/// Creating an identity matrix:
///
/// ```
/// # #![allow(unused)]
/// # use sphere_tracer::matrix::Matrix;
/// let mat = Matrix::identity(4);
/// assert_eq!(mat.determinant(), 1.0);
/// ```
///
/// Inverting a transformation:
///
/// ```
/// # use sphere_tracer::tuple::Tuple;
/// # use sphere_tracer::matrix::Matrix;
/// let m = Matrix::translation(5.0, -3.0, 2.0);
/// let inv = m.inverse().unwrap();
/// assert_eq!(&inv * Tuple::point(5.0, -3.0, 2.0), Tuple::point(0.0, 0.0, 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

/// Determines whether two matrices are equal.
///
/// Sizes must match exactly; elements are compared approximately.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.size == other.size
            && self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Default for Matrix {
    fn default() -> Matrix {
        Matrix::identity(4)
    }
}

impl Matrix {
    /// Creates a new `size`-by-`size` matrix. All elements are `0.0`.
    pub fn new(size: usize) -> Matrix {
        Matrix { size, data: vec![0.0; size * size] }
    }

    /// Instantiates an identity matrix.
    pub fn identity(size: usize) -> Matrix {
        let mut m = Matrix::new(size);
        for i in 0..size {
            m[(i, i)] = 1.0;
        }

        m
    }

    /// Builds a matrix from row-major data.
    ///
    /// Returns `None` unless `data` holds exactly `size * size` elements.
    pub fn from_slice(size: usize, data: &[f64]) -> Option<Matrix> {
        if data.len() != size * size {
            return None;
        }

        Some(Matrix { size, data: data.to_vec() })
    }

    /// Builds a matrix from rows. Returns `None` unless the rows form a
    /// square.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Matrix> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }

        Some(Matrix { size, data: rows.concat() })
    }

    /// The number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self[(row, col)] = value;
    }

    /// Returns a row of a 4x4 matrix as a tuple.
    pub fn row(&self, row: usize) -> Tuple {
        assert_eq!(self.size, 4, "row tuples need a 4x4 matrix");
        Tuple::new(self[(row, 0)], self[(row, 1)], self[(row, 2)],
            self[(row, 3)])
    }

    /// Returns a column of a 4x4 matrix as a tuple.
    pub fn column(&self, col: usize) -> Tuple {
        assert_eq!(self.size, 4, "column tuples need a 4x4 matrix");
        Tuple::new(self[(0, col)], self[(1, col)], self[(2, col)],
            self[(3, col)])
    }

    /// Multiplies two matrices of the same size.
    ///
    /// Fails with `SizeMismatch` rather than panicking like the `*` operator.
    pub fn try_multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.size != other.size {
            return Err(TraceError::SizeMismatch {
                left: self.size,
                right: other.size,
            });
        }

        Ok(self.product(other))
    }

    fn product(&self, other: &Matrix) -> Matrix {
        let n = self.size;
        let mut res = Matrix::new(n);
        for r in 0..n {
            for c in 0..n {
                res[(r, c)] = (0..n).map(|k| self[(r, k)] * other[(k, c)]).sum();
            }
        }

        res
    }

    /// Treats a 4x4 matrix as a linear map on a tuple.
    pub fn multiply_tuple(&self, t: &Tuple) -> Tuple {
        assert_eq!(self.size, 4, "tuples can only be transformed by 4x4 matrices");
        Tuple {
            x: self.row(0).dot(t),
            y: self.row(1).dot(t),
            z: self.row(2).dot(t),
            w: self.row(3).dot(t),
        }
    }

    /// Produces the transpose of a matrix.
    ///
    /// The transpose of a matrix is roughly defined by the following formula
    /// (given matrix `A`, create transpose matrix `A^T`):
    ///
    /// ```latex
    /// A^T_{ij} = A_{ji}
    /// ```
    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::new(self.size);
        for r in 0..self.size {
            for c in 0..self.size {
                res[(c, r)] = self[(r, c)];
            }
        }

        res
    }

    /// Returns the submatrix at `row` and `col`.
    ///
    /// A submatrix can be thought of as a matrix which "eliminates" a row and
    /// column of a larger matrix. For example, given the following 3x3 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0, 2.0,
    ///     3.0, 1.0, 0.0,
    ///     1.0, 1.0, 1.0
    /// ]
    /// ```
    ///
    /// The corresponding submatrix for `row == 1`, `col == 2` (assuming zero
    /// index), would be a 2x2 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0,
    ///     1.0, 1.0
    /// ]
    /// ```
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix {
        let mut data = Vec::with_capacity((self.size - 1) * (self.size - 1));
        for r in (0..self.size).filter(|&r| r != row) {
            for c in (0..self.size).filter(|&c| c != col) {
                data.push(self[(r, c)]);
            }
        }

        Matrix { size: self.size - 1, data }
    }

    /// The determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// The minor at `row` and `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        if (row + col) % 2 == 0 { m } else { -m }
    }

    /// Calculates the determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        if self.size == 1 {
            return self.data[0];
        }

        (0..self.size).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Calculates the inverse of a matrix, if it exists.
    ///
    /// The inverse is the transposed cofactor matrix divided by the
    /// determinant. A zero determinant yields `DegenerateMatrix`.
    pub fn inverse(&self) -> Result<Matrix> {
        let determinant = self.determinant();
        if determinant == 0.0 {
            return Err(TraceError::DegenerateMatrix { determinant });
        }

        let mut inv = Matrix::new(self.size);
        for r in 0..self.size {
            for c in 0..self.size {
                inv[(c, r)] = self.cofactor(r, c) / determinant;
            }
        }

        Ok(inv)
    }
}

macro_rules! matrix_from_array {
    ($($len:expr => $size:expr),*) => {
        $(
            impl From<[f64; $len]> for Matrix {
                fn from(data: [f64; $len]) -> Matrix {
                    Matrix { size: $size, data: data.to_vec() }
                }
            }
        )*
    };
}

matrix_from_array!(1 => 1, 4 => 2, 9 => 3, 16 => 4);

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index<'a>(&'a self, index: (usize, usize)) -> &'a f64 {
        &self.data[(index.0 * self.size) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut<'a>(&'a mut self, index: (usize, usize)) -> &'a mut f64 {
        &mut self.data[(index.0 * self.size) + index.1]
    }
}

/// Multiplication between two matrices.
///
/// Note that matrix multiplication is not commutative; in other words, for
/// matrix `A` and matrix `B`, `A * B` is not necessarily equal to `B * A`.
/// Panics if the sizes differ; see `Matrix::try_multiply`.
///
/// # Examples
///
/// ```
/// # use sphere_tracer::matrix::Matrix;
/// let m1 = Matrix::scaling(2.0, 3.0, 4.0);
/// let m2 = Matrix::scaling(4.0, 3.0, 2.0);
/// assert_eq!(&m1 * &m2, Matrix::scaling(8.0, 9.0, 8.0));
/// ```
impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, other: &'b Matrix) -> Matrix {
        assert_eq!(self.size, other.size, "matrix sizes must match");
        self.product(other)
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Matrix {
        &self * &other
    }
}

/// Multiplication between a 4x4 matrix and a `Tuple`.
///
/// Note that `Tuple`s are multiplied on the right, matching the convention
/// of a 4D vector having 4 rows, 1 column.
///
/// # Examples
///
/// ```
/// # use sphere_tracer::tuple::Tuple;
/// # use sphere_tracer::matrix::Matrix;
/// let v = Tuple::vector(1.0, 4.0, 5.0);
/// let m = Matrix::scaling(2.0, 2.0, 2.0);
/// assert_eq!(&m * v, Tuple::vector(2.0, 8.0, 10.0));
/// ```
impl<'a> Mul<Tuple> for &'a Matrix {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        self.multiply_tuple(&other)
    }
}

impl Mul<Tuple> for Matrix {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        self.multiply_tuple(&other)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            write!(f, "|")?;
            for c in 0..self.size {
                write!(f, " {:9.5} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r + 1 != self.size {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
fn samples() -> Vec<Matrix> {
    vec![
        [ 3.0, -9.0,  7.0,  3.0,
          3.0,  8.0,  2.0, -9.0,
         -4.0,  4.0,  4.0,  1.0,
         -6.0,  5.0, -1.0,  1.0, ].into(),
        [ 8.0, -5.0,  9.0,  2.0,
          7.0,  5.0,  6.0,  1.0,
         -6.0,  0.0,  9.0,  6.0,
         -3.0,  0.0, -9.0, -4.0, ].into(),
        [ 9.0,  3.0,  0.0,  9.0,
         -5.0, -2.0, -6.0, -3.0,
         -4.0,  9.0,  6.0,  4.0,
         -7.0,  6.0,  6.0,  2.0, ].into(),
        Matrix::translation(1.0, -2.0, 3.5),
        &Matrix::rotation_y(0.7) * &Matrix::shearing(1.0, 0.0, 0.5, 0.0, 0.0, 2.0),
        [ 1.0, 2.0, 6.0,
         -5.0, 8.0, -4.0,
          2.0, 6.0, 4.0, ].into(),
        [ 1.0, 5.0,
         -3.0, 2.0, ].into(),
    ]
}

#[test]
fn construct_and_inspect() {
    let m = Matrix::from_rows(&[
        vec![ 1.0,  2.0,  3.0,  4.0],
        vec![ 5.5,  6.5,  7.5,  8.5],
        vec![ 9.0, 10.0, 11.0, 12.0],
        vec![13.5, 14.5, 15.5, 16.5],
    ]).unwrap();

    assert_eq!(m.size(), 4);
    assert_eq!(m.get(0, 0), 1.0);
    assert_eq!(m.get(0, 3), 4.0);
    assert_eq!(m.get(1, 0), 5.5);
    assert_eq!(m.get(1, 2), 7.5);
    assert_eq!(m.get(3, 2), 15.5);
}

#[test]
fn non_square_rows_rejected() {
    assert!(Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_none());
    assert!(Matrix::from_slice(3, &[1.0; 8]).is_none());
}

#[test]
fn equality_requires_same_size() {
    let a = Matrix::identity(3);
    let b = Matrix::identity(4);

    assert_ne!(a, b);
    assert_eq!(Matrix::identity(4), b);
}

#[test]
fn equality_is_approximate() {
    let a = Matrix::identity(2);
    let b: Matrix = [1.000001, 0.0, 0.0, 0.999999].into();
    let c: Matrix = [1.1, 0.0, 0.0, 1.0].into();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn multiply_matrices() {
    let a: Matrix = [ 1.0, 2.0, 3.0, 4.0,
                      5.0, 6.0, 7.0, 8.0,
                      9.0, 8.0, 7.0, 6.0,
                      5.0, 4.0, 3.0, 2.0, ].into();
    let b: Matrix = [-2.0, 1.0, 2.0,  3.0,
                      3.0, 2.0, 1.0, -1.0,
                      4.0, 3.0, 6.0,  5.0,
                      1.0, 2.0, 7.0,  8.0, ].into();
    let p: Matrix = [20.0, 22.0,  50.0,  48.0,
                     44.0, 54.0, 114.0, 108.0,
                     40.0, 58.0, 110.0, 102.0,
                     16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(&a * &b, p);
    assert_eq!(a.try_multiply(&b).unwrap(), p);
}

#[test]
fn multiply_mismatched_sizes() {
    let err = Matrix::identity(3).try_multiply(&Matrix::identity(4));

    assert!(matches!(err, Err(TraceError::SizeMismatch { left: 3, right: 4 })));
}

#[test]
fn multiply_by_tuple() {
    let a: Matrix = [1.0, 2.0, 3.0, 4.0,
                     2.0, 4.0, 4.0, 2.0,
                     8.0, 6.0, 4.0, 1.0,
                     0.0, 0.0, 0.0, 1.0, ].into();
    let b = Tuple::new(1.0, 2.0, 3.0, 1.0);

    assert_eq!(&a * b, Tuple::new(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn identity() {
    let i = Matrix::identity(4);
    let a: Matrix = [ 0.0, 1.0,  2.0,  4.0,
                      1.0, 2.0,  4.0,  8.0,
                      2.0, 4.0,  8.0, 16.0,
                      4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(&i * &a, a);
    assert_eq!(&a * &i, a);

    for m in samples().iter().filter(|m| m.size() == 4) {
        assert_eq!(&Matrix::identity(4) * m, *m);
    }

    let t = Tuple::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(&i * t, t);
}

#[test]
fn transpose() {
     let a: Matrix = [ 0.0, 9.0, 3.0, 0.0,
                       9.0, 8.0, 0.0, 8.0,
                       1.0, 8.0, 5.0, 3.0,
                       0.0, 0.0, 5.0, 8.0, ].into();

     let t: Matrix = [ 0.0, 9.0, 1.0, 0.0,
                       9.0, 8.0, 8.0, 0.0,
                       3.0, 0.0, 5.0, 5.0,
                       0.0, 8.0, 3.0, 8.0, ].into();

     assert_eq!(t, a.transpose());
     assert_eq!(t.transpose(), a);
}

#[test]
fn transpose_identity() {
    let i = Matrix::identity(4);
    assert_eq!(i, i.transpose());
}

#[test]
fn mat2_determinant() {
    let a: Matrix = [ 1.0, 5.0,
                     -3.0, 2.0, ].into();

    assert_eq!(a.determinant(), 17.0);
}

#[test]
fn mat1_determinant() {
    let a: Matrix = [ -4.5 ].into();

    assert_eq!(a.determinant(), -4.5);
}

#[test]
fn mat3_submatrix() {
    let a: Matrix = [  1.0, 5.0,  0.0,
                      -3.0, 2.0,  7.0,
                       0.0, 6.0, -3.0, ].into();

    let s: Matrix = [ -3.0, 2.0,
                       0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2), s);
}

#[test]
fn mat4_submatrix() {
     let a: Matrix = [ -6.0, 1.0,  1.0, 6.0,
                       -8.0, 5.0,  8.0, 6.0,
                       -1.0, 0.0,  8.0, 2.0,
                       -7.0, 1.0, -1.0, 1.0, ].into();

     let s: Matrix = [ -6.0,  1.0, 6.0,
                       -8.0,  8.0, 6.0,
                       -7.0, -1.0, 1.0, ].into();

     assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_minor() {
    let a: Matrix = [ 3.0,  5.0,  0.0,
                      2.0, -1.0, -7.0,
                      6.0, -1.0,  5.0, ].into();

    assert_eq!(a.submatrix(1, 0).determinant(), 25.0);
    assert_eq!(a.minor(1, 0), 25.0);
}

#[test]
fn mat3_cofactor() {
    let a: Matrix = [ 3.0,  5.0,  0.0,
                      2.0, -1.0, -7.0,
                      6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
     let a: Matrix = [  1.0, 2.0,  6.0,
                       -5.0, 8.0, -4.0,
                        2.0, 6.0,  4.0, ].into();

     assert_eq!(a.cofactor(0, 0), 56.0);
     assert_eq!(a.cofactor(0, 1), 12.0);
     assert_eq!(a.cofactor(0, 2), -46.0);
     assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
     let a: Matrix = [ -2.0, -8.0,  3.0,  5.0,
                       -3.0,  1.0,  7.0,  3.0,
                        1.0,  2.0, -9.0,  6.0,
                       -6.0,  7.0,  7.0, -9.0, ].into();

     assert_eq!(a.cofactor(0, 0), 690.0);
     assert_eq!(a.cofactor(0, 1), 447.0);
     assert_eq!(a.cofactor(0, 2), 210.0);
     assert_eq!(a.cofactor(0, 3), 51.0);
     assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn invertible() {
     let a: Matrix = [ 6.0,  4.0, 4.0,  4.0,
                       5.0,  5.0, 7.0,  6.0,
                       4.0, -9.0, 3.0, -7.0,
                       9.0,  1.0, 7.0, -6.0, ].into();

     assert_eq!(a.determinant(), -2120.0);
     assert!(a.is_invertible());
}

#[test]
fn non_invertible() {
     let a: Matrix = [ -4.0,  2.0, -2.0, -3.0,
                        9.0,  6.0,  2.0,  6.0,
                        0.0, -5.0,  1.0, -5.0,
                        0.0,  0.0,  0.0,  0.0, ].into();

     assert_eq!(a.determinant(), 0.0);
     assert!(!a.is_invertible());
     assert!(matches!(a.inverse(), Err(TraceError::DegenerateMatrix { .. })));
}

#[test]
fn mat4_inverse() {
     let a: Matrix = [ -5.0,  2.0,  6.0, -8.0,
                        1.0, -5.0,  1.0,  8.0,
                        7.0,  7.0, -6.0, -7.0,
                        1.0, -3.0,  7.0,  4.0, ].into();

     let b = a.inverse().unwrap();

     assert_eq!(a.determinant(), 532.0);
     assert_eq!(a.cofactor(2, 3), -160.0);
     assert_eq!(b[(3, 2)], -160.0 / 532.0);
     assert_eq!(a.cofactor(3, 2), 105.0);
     assert_eq!(b[(2, 3)], 105.0 / 532.0);

     let i: Matrix = [  0.21805,  0.45113,  0.24060, -0.04511,
                       -0.80827, -1.45677, -0.44361,  0.52068,
                       -0.07895, -0.22368, -0.05263,  0.19737,
                       -0.52256, -0.81391, -0.30075,  0.30639, ].into();

     assert_eq!(b, i);
}

#[test]
fn mat4_inverse_second() {
     let a: Matrix = [  8.0, -5.0,  9.0,  2.0,
                        7.0,  5.0,  6.0,  1.0,
                       -6.0,  0.0,  9.0,  6.0,
                       -3.0,  0.0, -9.0, -4.0, ].into();

     let i: Matrix = [ -0.15385, -0.15385, -0.28205, -0.53846,
                       -0.07692,  0.12308,  0.02564,  0.03077,
                        0.35897,  0.35897,  0.43590,  0.92308,
                       -0.69231, -0.69231, -0.76923, -1.92308, ].into();

     assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn mat4_inverse_mult() {
     let a: Matrix = [  3.0, -9.0,  7.0,  3.0,
                        3.0,  8.0,  2.0, -9.0,
                       -4.0,  4.0,  4.0,  1.0,
                       -6.0,  5.0, -1.0,  1.0, ].into();

     let b: Matrix = [ 8.0,  2.0, 2.0, 2.0,
                       3.0, -1.0, 7.0, 0.0,
                       7.0,  0.0, 5.0, 4.0,
                       6.0, -2.0, 0.0, 5.0  ].into();

     let c = &a * &b;

     assert_eq!(a, &c * &b.inverse().unwrap());
}

#[test]
fn product_with_inverse_is_identity() {
    for m in samples() {
        let inv = m.inverse().unwrap();
        assert_eq!(&m * &inv, Matrix::identity(m.size()));
    }
}

#[test]
fn transpose_and_inverse_commute() {
    for m in samples() {
        assert_eq!(m.transpose().inverse().unwrap(),
            m.inverse().unwrap().transpose());
    }
}

#[test]
fn display_rows() {
    let m: Matrix = [1.0, 2.0, 3.0, 4.0].into();

    assert_eq!(format!("{}", m),
        "|   1.00000 |   2.00000 |\n|   3.00000 |   4.00000 |");
}
